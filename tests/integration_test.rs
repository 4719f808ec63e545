// tests/integration_test.rs
use std::process::Command;

fn helleaser() -> Command {
    Command::new(env!("CARGO_BIN_EXE_helleaser"))
}

#[test]
fn test_help_exits_zero() {
    let output = helleaser()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("helleaser"));
    assert!(stdout.contains("--merge"));
    assert!(stdout.contains("--skip-version"));
    assert!(!stdout.contains("--no-tag"));
}

#[test]
fn test_short_help_exits_zero() {
    let output = helleaser().arg("-h").output().expect("Failed to execute command");
    assert!(output.status.success());
}

#[test]
fn test_version_prints_package_version() {
    for flag in ["--version", "-v"] {
        let output = helleaser().arg(flag).output().expect("Failed to execute command");

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(stdout.trim(), format!("v{}", env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_unknown_flag_exits_one() {
    let output = helleaser()
        .arg("--definitely-not-a-flag")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unreadable_config_exits_one() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = helleaser()
        .current_dir(dir.path())
        .args(["--config", "missing.toml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error loading config"));
}

#[test]
fn test_unknown_environment_exits_one() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("helleaser.toml");
    std::fs::write(&config, "[release]\nenvironment = \"qa\"\n").unwrap();

    let output = helleaser()
        .current_dir(dir.path())
        .args(["--config", config.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid environment 'qa'"));
}
