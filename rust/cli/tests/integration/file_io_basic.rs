use crate::helpers::cli_runner::CliRunner;
use crate::helpers::temp_files::TempFileManager;

#[test]
fn c1_cfg_rejects_malformed_toml_file() {
    let tfm = TempFileManager::new().expect("tfm");
    let path = tfm
        .create_file("bad.toml", "this is not valid toml :::")
        .expect("file");
    let cli = CliRunner::new().expect("CliRunner init");
    let res = cli.run_with_env(&["cfg"], &[("axiomind_CONFIG", &path.to_string_lossy())]);
    assert_ne!(res.exit_code, 0);
    assert!(
        res.stderr.contains("Invalid configuration"),
        "stderr should report the config error: {}",
        res.stderr
    );
}

#[test]
fn c2_sim_rejects_rake_percent_over_100() {
    let tfm = TempFileManager::new().expect("tfm");
    let path = tfm
        .create_file("rake.toml", "rake_percent = 150\n")
        .expect("file");
    let cli = CliRunner::new().expect("CliRunner init");
    let res = cli.run_with_env(
        &["sim", "--hands", "1"],
        &[("axiomind_CONFIG", &path.to_string_lossy())],
    );
    assert_ne!(res.exit_code, 0);
    assert!(
        res.stderr.to_lowercase().contains("rake_percent"),
        "stderr should mention rake_percent violation: {}",
        res.stderr
    );
}

#[test]
fn c3_play_vs_human_accepts_piped_stdin() {
    let cli = CliRunner::new().expect("CliRunner init");
    let res = cli.run_with_input(&["play", "--vs", "human", "--hands", "1"], "q\n");
    assert_eq!(
        res.exit_code, 0,
        "Expected success with piped stdin, stderr: {}",
        res.stderr
    );
    assert!(
        res.stdout.to_lowercase().contains("completed"),
        "Expected successful completion, got: {}",
        res.stdout
    );
}

#[test]
fn c4_sim_writes_output_file_under_nested_directory() {
    let tfm = TempFileManager::new().expect("tfm");
    let sim_dir = tfm.create_directory("nested/out").expect("create dir");
    let out_path = sim_dir.join("summary.json");
    let cli = CliRunner::new().expect("CliRunner init");
    let res = cli.run(&[
        "sim",
        "--hands",
        "2",
        "--seed",
        "1",
        "--output",
        &out_path.to_string_lossy(),
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(out_path.is_file(), "expected summary file to be written");
}
