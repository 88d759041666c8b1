// A-series: Basic CLI functionality tests

use crate::helpers::cli_runner::CliRunner;

#[test]
fn a1_help_lists_all_commands() {
    let cli = CliRunner::new().expect("CliRunner should initialize with binary path");

    let res = cli.run(&["--help"]);

    assert_eq!(res.exit_code, 0, "--help should exit with code 0");
    let out = res.stdout;
    for cmd in [
        "play", "sim", "eval", "verify", "deal", "bench", "rng", "cfg", "doctor",
    ] {
        assert!(out.contains(cmd), "help should list `{}`", cmd);
    }
}

#[test]
fn a2_version_prints_version_and_exits_zero() {
    let cli = CliRunner::new().expect("CliRunner should initialize");
    let res = cli.run(&["--version"]);
    assert_eq!(res.exit_code, 0, "--version should exit 0");
    assert!(
        !res.stdout.trim().is_empty(),
        "version should print some text"
    );
}

#[test]
fn a3_unknown_subcommand_shows_help_excerpt_on_stderr() {
    let cli = CliRunner::new().expect("CliRunner should initialize");
    let res = cli.run(&["unknown"]);
    assert_ne!(res.exit_code, 0, "unknown subcommand should be non-zero");
    // Expect help excerpt to include the Commands list (not just Usage)
    let err = res.stderr;
    assert!(
        err.contains("Commands:"),
        "stderr should contain help Commands section\n---stderr---\n{}\n-----------",
        err
    );
    assert!(
        err.contains("play"),
        "stderr help excerpt should list 'play'"
    );
}
