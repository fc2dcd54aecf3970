use std::process::{Command, Output};

fn pwforge(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pwforge"))
        .args(args)
        .env_remove("PWFORGE_WORDLIST")
        .output()
        .expect("failed to run pwforge")
}

#[test]
fn validation_errors_exit_with_1() {
    for args in [
        &["--length", "7"][..],
        &["--length", "twelve"],
        &["--bogus"],
        &["--count", "101"],
        &["--count", "0"],
        &["--preset", "fortress"],
        &["--mode", "passphrase", "--length", "2"],
    ] {
        let output = pwforge(args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert!(output.stdout.is_empty(), "{args:?}");
        assert!(!output.stderr.is_empty(), "{args:?}");
    }
}

#[test]
fn help_and_version_exit_with_0() {
    for flag in ["--help", "--version"] {
        let output = pwforge(&[flag]);
        assert_eq!(output.status.code(), Some(0), "{flag}");
        assert!(!output.stdout.is_empty(), "{flag}");
    }
}

#[test]
fn successful_runs_print_one_secret_per_line() {
    let output = pwforge(&["--length", "20", "--count", "3"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.chars().count() == 20));
}

#[test]
fn json_output_for_a_preset() {
    let output = pwforge(&["--preset", "ultra", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["password"].as_str().unwrap().chars().count(), 64);
    assert_eq!(value["strength"], "Very Strong");
}
