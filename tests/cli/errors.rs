//! Tests for error reporting and recovery.

use crate::support::*;

#[test]
fn test_errors_do_not_end_the_session() {
    let t = Test::with_accounts();

    let output = t.session("show 9\nload\ndump\nload missing.json\nfind /(/\nfind mail\n");
    assert_success(&output);
    assert_stderr_contains(&output, "ambiguous account (0 matches)");
    assert_stderr_contains(&output, "incomplete command. Usage: load <path>");
    assert_stderr_contains(&output, "failed to read 'missing.json'");
    assert_stderr_contains(&output, "invalid pattern '('");
    assert_stdout_contains(&output, "[0] Mail");
}

#[test]
fn test_interrupted_prompt_keeps_store() {
    let t = Test::with_accounts();

    let output = t.session("delete mail\n");
    assert_success(&output);
    assert_stderr_contains(&output, "input closed");
    assert_eq!(t.store().len(), 3);
}

#[test]
fn test_empty_name_is_refused() {
    let t = Test::with_accounts();

    let output = t.session("new\n \n\n\n\n\n");
    assert_success(&output);
    assert_stderr_contains(&output, "empty name");
    assert_eq!(t.store().len(), 3);
}

#[test]
fn test_corrupted_session_file() {
    let t = Test::new();
    std::fs::write(t.file(), "definitely not a lockbox file").unwrap();

    let output = t.session("find\n");
    assert_code(&output, 1);
    assert_stderr_contains(&output, "wrong credentials");
}

#[test]
fn test_directory_as_session_file() {
    let t = Test::new();
    std::fs::create_dir(t.file()).unwrap();

    let output = t.session("find\n");
    assert_code(&output, 1);
    assert_stderr_contains(&output, "is not a regular file");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::with_accounts();

    let output = t
        .cmd()
        .arg("-f")
        .arg(t.file())
        .args(["-p", PASSWORD, "--verbose"])
        .write_stdin("find\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "loading store");
    assert_stdout_excludes(&output, "loading store");
}
