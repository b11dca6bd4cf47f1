//! Tests for opening, creating and configuring a session.

use crate::support::*;

#[test]
fn test_typed_password() {
    let t = Test::with_accounts();

    let output = t.session_typed(&format!("{}\nfind\n", PASSWORD));
    assert_success(&output);
    assert_stdout_contains(&output, " 3 results.");
}

#[test]
fn test_typed_password_is_retried() {
    let t = Test::with_accounts();

    let output = t.session_typed(&format!("wrong\n{}\nfind mail\n", PASSWORD));
    assert_success(&output);
    assert_stderr_contains(&output, "wrong credentials");
    assert_stdout_contains(&output, "[0] Mail");
}

#[test]
fn test_typed_password_attempts_run_out() {
    let t = Test::with_accounts();

    let output = t.session_typed("one\ntwo\nthree\n");
    assert_code(&output, 1);
    assert_stderr_contains(&output, "wrong credentials");
}

#[test]
fn test_wrong_given_password_is_fatal() {
    let t = Test::with_accounts();

    let output = t
        .cmd()
        .arg("-f")
        .arg(t.file())
        .args(["-p", "not-the-password"])
        .write_stdin("find\n")
        .output()
        .unwrap();
    assert_code(&output, 1);
    assert_stderr_contains(&output, "wrong credentials");
    assert_stdout_excludes(&output, "results.");
}

#[test]
fn test_missing_file_argument() {
    let t = Test::new();

    let output = t.cmd().write_stdin("").output().unwrap();
    assert_code(&output, 1);
    assert_stderr_contains(&output, "missing file argument");
}

#[test]
fn test_file_from_environment() {
    let t = Test::with_accounts();

    let output = t
        .cmd()
        .env("LOCKBOX_FILE", t.file())
        .args(["-p", PASSWORD])
        .write_stdin("find\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, " 3 results.");
}

#[test]
fn test_new_file_is_created_on_first_save() {
    let t = Test::new();

    let output = t.session_typed("y\nfresh\nfresh\nnew Site\n\n\n\nsecret\n\ny\n");
    assert_success(&output);
    assert_stdout_contains(&output, "does not exist");

    let store = t.store_with("fresh");
    assert_eq!(store.keys(), vec!["Site"]);
    assert_eq!(store.get("Site").unwrap().secret, "secret");
}

#[test]
fn test_new_file_declined() {
    let t = Test::new();

    let output = t.session_typed("n\n");
    assert_code(&output, 0);
    assert!(!t.file().exists());
}

#[test]
fn test_new_file_password_mismatch() {
    let t = Test::new();

    let output = t.session_typed("y\none\ntwo\n");
    assert_code(&output, 1);
    assert_stderr_contains(&output, "passwords do not match");
}

#[test]
fn test_opens_legacy_file() {
    let t = Test::new();
    std::fs::copy(legacy_file(), t.file()).unwrap();

    let output = t.session("show 0\n");
    assert_success(&output);
    assert_stdout_contains(&output, "pseudo: alice");
}

#[test]
fn test_config_file_supplies_session_file() {
    let t = Test::with_accounts();
    std::fs::write(
        t.config_file(),
        format!("file = {:?}\n", t.file().display().to_string()),
    )
    .unwrap();

    let output = t.cmd().args(["-p", PASSWORD]).write_stdin("find\n").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, " 3 results.");
}

#[test]
fn test_config_password_attempts() {
    let t = Test::with_accounts();
    std::fs::write(t.config_file(), "password_attempts = 1\n").unwrap();

    let output = t.session_typed(&format!("wrong\n{}\n", PASSWORD));
    assert_code(&output, 1);
}

#[test]
fn test_config_indent_dumps() {
    let t = Test::with_accounts();
    std::fs::write(t.config_file(), "indent_dumps = false\n").unwrap();

    let output = t.session("dump export.json\n");
    assert_success(&output);
    assert!(!std::fs::read_to_string(t.path("export.json")).unwrap().contains('\n'));
}

#[test]
fn test_invalid_config_is_fatal() {
    let t = Test::with_accounts();
    std::fs::write(t.config_file(), "password_attempts = 0\n").unwrap();

    let output = t.session("find\n");
    assert_code(&output, 1);
    assert_stderr_contains(&output, "invalid config");
}
