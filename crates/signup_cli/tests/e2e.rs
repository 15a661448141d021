//! End-to-end tests for the `signup` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[allow(deprecated)]
fn signup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("signup").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("SIGNUP_CONFIG")
        .env_remove("NO_COLOR")
        .arg("--no-color");
    cmd
}

// =============================================================================
// check
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn valid_flags_exit_zero() {
        signup_cmd()
            .args([
                "check",
                "--name",
                "Jo",
                "--email",
                "a@b.com",
                "--password",
                "12345678",
                "--confirm-password",
                "12345678",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("accepted"));
    }

    #[test]
    fn invalid_document_lists_every_field() {
        signup_cmd()
            .args(["check", "--json", "tests/fixtures/invalid.json"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("name: Name must be at least 2 characters"))
            .stdout(predicate::str::contains("email: Invalid email address"))
            .stdout(predicate::str::contains("confirmPassword: Passwords don't match"))
            .stdout(predicate::str::contains("phone: Phone number must be 10 digits"))
            .stdout(predicate::str::contains("age: Age must be between 18 and 100"));
    }

    #[test]
    fn json_output_for_valid_document() {
        signup_cmd()
            .args(["check", "--json", "tests/fixtures/valid.json", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"accepted\": true"))
            .stdout(predicate::str::contains("\"phone\": \"1234567890\""))
            .stdout(predicate::str::contains("12345678\"").not());
    }

    #[test]
    fn flag_overrides_document() {
        signup_cmd()
            .args(["check", "--json", "tests/fixtures/valid.json", "--age", "17"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("age: Age must be between 18 and 100"));
    }

    #[test]
    fn json_from_stdin() {
        signup_cmd()
            .args(["check", "--json", "-"])
            .write_stdin(r#"{"name":"Jo","email":"a@b.com","password":"12345678","confirmPassword":"12345678"}"#)
            .assert()
            .success();
    }

    #[test]
    fn malformed_document_is_failure() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        signup_cmd()
            .args(["check", "--json"])
            .arg(file.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid submission document"));
    }

    #[test]
    fn misspelled_key_is_failure() {
        signup_cmd()
            .args(["check", "--json", "-"])
            .write_stdin(r#"{"name":"Jo","email":"a@b.com","password":"12345678","confirm_password":"12345678"}"#)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid submission document"))
            .stderr(predicate::str::contains("confirm_password"));
    }

    #[test]
    fn numeric_age_is_accepted() {
        signup_cmd()
            .args(["check", "--json", "-", "--format", "json"])
            .write_stdin(r#"{"name":"Jo","email":"a@b.com","password":"12345678","confirmPassword":"12345678","age":25}"#)
            .assert()
            .success()
            .stdout(predicate::str::contains("\"age\": \"25\""));
    }

    #[test]
    fn config_changes_thresholds() {
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, "[validation]\nage_min = 16").unwrap();
        signup_cmd()
            .arg("--config")
            .arg(config.path())
            .args(["check", "--json", "tests/fixtures/valid.json", "--age", "17"])
            .assert()
            .success();
    }

    #[test]
    fn bad_config_is_failure() {
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, "[validation]\nage_min = 90\nage_max = 10").unwrap();
        signup_cmd()
            .arg("--config")
            .arg(config.path())
            .args(["check", "--name", "Jo"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("age_min"));
    }
}

// =============================================================================
// interactive
// =============================================================================

mod interactive {
    use super::*;

    #[test]
    fn submit_shows_errors_then_success() {
        signup_cmd()
            .arg("interactive")
            .write_stdin(
                "name=J\nsubmit\nname=Jo\nemail=a@b.com\npassword=12345678\n\
                 confirmPassword=12345678\nsubmit\n",
            )
            .assert()
            .success()
            .stdout(predicate::str::contains("Name must be at least 2 characters"))
            .stdout(predicate::str::contains("Form submitted successfully!"));
    }

    #[test]
    fn unknown_field_is_reported_and_skipped() {
        signup_cmd()
            .arg("interactive")
            .write_stdin("nickname=x\nquit\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("unknown field: nickname"));
    }
}

// =============================================================================
// fields
// =============================================================================

#[test]
#[allow(deprecated)]
fn no_color_env_is_honored() {
    for value in ["1", "true", "0", ""] {
        Command::cargo_bin("signup")
            .unwrap()
            .env_remove("RUST_LOG")
            .env_remove("SIGNUP_CONFIG")
            .env("NO_COLOR", value)
            .arg("fields")
            .assert()
            .success()
            .stdout(predicate::str::contains("phone"));
    }
}

#[test]
fn fields_lists_inventory() {
    signup_cmd()
        .arg("fields")
        .assert()
        .success()
        .stdout(predicate::str::contains("phone"))
        .stdout(predicate::str::contains("optional"));
}
