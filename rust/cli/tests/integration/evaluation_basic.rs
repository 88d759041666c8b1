use crate::helpers::cli_runner::CliRunner;

#[test]
fn e1_eval_rejects_unrecognized_flags() {
    let cli = CliRunner::new().unwrap();
    let res = cli.run(&["eval", "--ai-a", "baseline", "--ai-b", "baseline"]);
    assert_ne!(res.exit_code, 0);
}

#[test]
fn e2_eval_works_with_identical_strategies() {
    let cli = CliRunner::new().unwrap();
    let res = cli.run(&[
        "eval",
        "--strategy-a",
        "baseline",
        "--strategy-b",
        "baseline",
        "--hands",
        "4",
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let json: serde_json::Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(json["hands"], 4);
}

#[test]
fn e3_eval_is_deterministic_with_seed() {
    let cli = CliRunner::new().unwrap();
    let a = cli.run(&[
        "eval",
        "--strategy-a",
        "baseline",
        "--strategy-b",
        "baseline",
        "--hands",
        "8",
        "--seed",
        "42",
    ]);
    let b = cli.run(&[
        "eval",
        "--strategy-a",
        "baseline",
        "--strategy-b",
        "baseline",
        "--hands",
        "8",
        "--seed",
        "42",
    ]);
    assert_eq!(a.exit_code, 0);
    assert_eq!(b.exit_code, 0);
    assert_eq!(
        a.stdout, b.stdout,
        "same seed should produce identical results"
    );
}
