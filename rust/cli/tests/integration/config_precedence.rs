use crate::helpers::cli_runner::CliRunner;
use crate::helpers::temp_files::TempFileManager;

use serde_json::Value;
use std::sync::{Mutex, OnceLock};

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

#[test]
fn i1_cfg_shows_defaults_for_starting_stack_and_level() {
    let _guard = env_lock().lock().unwrap();
    unsafe {
        std::env::remove_var("axiomind_CONFIG");
    }
    unsafe {
        std::env::remove_var("axiomind_SEED");
    }
    unsafe {
        std::env::remove_var("axiomind_LEVEL");
    }

    let cli = CliRunner::new().expect("init");
    let res = cli.run(&["cfg"]);
    assert_eq!(res.exit_code, 0);
    let json: Value = serde_json::from_str(&res.stdout).unwrap();

    let starting_stack = &json["starting_stack"];
    assert_eq!(starting_stack["value"].as_u64(), Some(200));
    assert_eq!(starting_stack["source"].as_str(), Some("default"));

    let level = &json["level"];
    assert_eq!(level["value"].as_u64(), Some(1));
    assert_eq!(level["source"].as_str(), Some("default"));
}

#[test]
fn i2_precedence_env_over_file_for_seed_and_level() {
    let _guard = env_lock().lock().unwrap();
    unsafe {
        std::env::remove_var("axiomind_CONFIG");
    }
    unsafe {
        std::env::remove_var("axiomind_SEED");
    }
    unsafe {
        std::env::remove_var("axiomind_LEVEL");
    }

    let tfm = TempFileManager::new().unwrap();
    let cfg_path = tfm
        .create_file("axiomind.toml", "seed = 456\nlevel = 3\n")
        .unwrap();
    unsafe {
        std::env::set_var("axiomind_CONFIG", &cfg_path);
    }

    let cli = CliRunner::new().expect("init");
    let cfg1 = cli.run(&["cfg"]);
    assert_eq!(cfg1.exit_code, 0);
    let json1: Value = serde_json::from_str(&cfg1.stdout).unwrap();
    assert_eq!(json1["seed"]["value"].as_u64(), Some(456));
    assert_eq!(json1["seed"]["source"].as_str(), Some("file"));
    assert_eq!(json1["level"]["value"].as_u64(), Some(3));
    assert_eq!(json1["level"]["source"].as_str(), Some("file"));

    unsafe {
        std::env::set_var("axiomind_SEED", "123");
    }
    unsafe {
        std::env::set_var("axiomind_LEVEL", "7");
    }
    let cfg2 = cli.run(&["cfg"]);
    assert_eq!(cfg2.exit_code, 0);
    let json2: Value = serde_json::from_str(&cfg2.stdout).unwrap();
    assert_eq!(json2["seed"]["value"].as_u64(), Some(123));
    assert_eq!(json2["seed"]["source"].as_str(), Some("env"));
    assert_eq!(json2["level"]["value"].as_u64(), Some(7));
    assert_eq!(json2["level"]["source"].as_str(), Some("env"));

    let r1 = cli.run(&["rng", "--seed", "42"]);
    let r2 = cli.run(&["rng", "--seed", "42"]);
    assert_eq!(
        r1.stdout, r2.stdout,
        "same seed should produce identical RNG output"
    );

    unsafe {
        std::env::remove_var("axiomind_CONFIG");
    }
    unsafe {
        std::env::remove_var("axiomind_SEED");
    }
    unsafe {
        std::env::remove_var("axiomind_LEVEL");
    }
}

#[test]
fn i3_seed_default_is_non_deterministic() {
    let cli = CliRunner::new().expect("init");
    let a = cli.run(&["rng"]);
    let b = cli.run(&["rng"]);
    assert_ne!(
        a.stdout, b.stdout,
        "rng without --seed should be non-deterministic"
    );
}
