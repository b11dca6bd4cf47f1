//! Tests for the one-shot `--encrypt` and `--decrypt` modes.

use crate::support::*;

#[test]
fn test_encrypt_then_decrypt() {
    let t = Test::new();
    let plain = t.path("plain.json");
    std::fs::write(&plain, ACCOUNTS_JSON).unwrap();

    let output = t.encrypt(&plain, &t.file());
    assert_code(&output, 0);
    assert_stdout_contains(&output, "3 accounts encrypted");

    let sealed = std::fs::read_to_string(t.file()).unwrap();
    assert!(sealed.starts_with("U2FsdGVkX1"));
    assert!(!sealed.contains("hunter2"));

    let opened = t.path("opened.json");
    let output = t.decrypt(&t.file(), PASSWORD, &opened);
    assert_code(&output, 0);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&opened).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0]["name"], "Bank A");
    assert_eq!(json[0]["password"], "hunter2");
    assert_eq!(json[2]["creation date"], "2016-03-01T10:00:00.000");
}

#[test]
fn test_decrypt_legacy_file() {
    let t = Test::new();
    let out = t.path("legacy.json");

    let output = t.decrypt(&legacy_file(), PASSWORD, &out);
    assert_success(&output);

    let decrypted: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let expected: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(legacy_json()).unwrap()).unwrap();
    assert_eq!(decrypted, expected);
}

#[test]
fn test_decrypt_wrong_password() {
    let t = Test::new();
    let out = t.path("out.json");

    let output = t.decrypt(&legacy_file(), "wrong", &out);
    assert_code(&output, 1);
    assert_stderr_contains(&output, "wrong credentials");
    assert!(!out.exists());
}

#[test]
fn test_encrypt_missing_input_fails() {
    let t = Test::new();

    let output = t.encrypt(&t.path("absent.json"), &t.file());
    assert_code(&output, 1);
    assert!(!t.file().exists());
}

#[test]
fn test_encrypt_invalid_json_fails() {
    let t = Test::new();
    let plain = t.path("plain.json");
    std::fs::write(&plain, "{not json").unwrap();

    let output = t.encrypt(&plain, &t.file());
    assert_code(&output, 1);
    assert_stderr_contains(&output, "not a valid accounts file");
}

#[test]
fn test_encrypt_and_decrypt_conflict() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["-f", "in", "-e", "a", "-d", "b"])
        .output()
        .unwrap();
    assert_failure(&output);
}

#[test]
fn test_encrypt_reports_renamed_duplicates() {
    let t = Test::new();
    let plain = t.path("plain.json");
    std::fs::write(
        &plain,
        r#"[{"name":"Gmail","password":"personal-pw"},{"name":"gmail","password":"work-pw"}]"#,
    )
    .unwrap();

    let output = t.encrypt(&plain, &t.file());
    assert_code(&output, 0);
    assert_stdout_contains(&output, "kept as 'gmail (2)'");
    assert_stdout_contains(&output, "2 accounts encrypted");
    assert_eq!(t.store().len(), 2);
}
