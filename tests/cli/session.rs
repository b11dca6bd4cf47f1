//! Tests for the interactive session, driven through piped stdin.

use predicates::prelude::*;

use crate::support::*;

// Search and listing

#[test]
fn test_find_lists_numbered_results() {
    let t = Test::with_accounts();

    let output = t.session("find bank\n");
    assert_success(&output);
    assert_stdout_contains(&output, "[0] Bank A");
    assert_stdout_contains(&output, "[1] Bank B");
    assert_stdout_contains(&output, " 2 results.");
    assert_stdout_excludes(&output, "Mail");
}

#[test]
fn test_find_without_pattern_lists_everything() {
    let t = Test::with_accounts();

    let output = t.session("find\n");
    assert_success(&output);
    assert_stdout_contains(&output, "[2] Mail");
    assert_stdout_contains(&output, " 3 results.");
}

#[test]
fn test_find_regex() {
    let t = Test::with_accounts();

    let output = t.session("find /b.*/\n");
    assert_success(&output);
    assert_stdout_contains(&output, "[0] Bank A");
    assert_stdout_contains(&output, "[1] Bank B");
}

#[test]
fn test_find_regex_with_space() {
    let t = Test::with_accounts();

    let output = t.session("find /bank   b/\n");
    assert_success(&output);
    assert_stdout_contains(&output, "[0] Bank B");
    assert_stdout_contains(&output, " 1 results.");
}

#[test]
fn test_unknown_word_searches() {
    let t = Test::with_accounts();

    let output = t.session("personal\nshow\n");
    assert_success(&output);
    assert_stdout_contains(&output, "[0] Bank B");
    assert_stdout_contains(&output, "pseudo: bob");
}

#[test]
fn test_fuzzy_command() {
    let t = Test::with_accounts();

    let output = t.session("find bank\nsho 1\n");
    assert_success(&output);
    assert_stdout_contains(&output, "unrecognized command. Assuming 'show'");
    assert_stdout_contains(&output, "pseudo: bob");
}

// Showing and copying

#[test]
fn test_show_never_prints_password() {
    let t = Test::with_accounts();

    let output = t.session("show bank work\n");
    assert_success(&output);
    assert_stdout_contains(&output, "pseudo: alice");
    assert_stdout_contains(&output, "notes: work");
    assert_stdout_excludes(&output, "hunter2");
}

#[test]
fn test_show_prints_timestamps() {
    let t = Test::with_accounts();

    let output = t.session("show mail\n");
    assert_stdout_contains(&output, "created: 2016-03-01T10:00:00.000");
    assert_stdout_contains(&output, "modified: 2016-03-02T11:30:00.000");
}

#[test]
fn test_showpass_prints_password_when_piped() {
    let t = Test::with_accounts();

    let output = t.session("showpass bank work\nshowpass mail\n");
    assert_success(&output);
    assert_stdout_contains(&output, "hunter2");
    assert_stdout_contains(&output, "empty password.");
}

#[test]
fn test_ambiguous_target_is_reported() {
    let t = Test::with_accounts();

    let output = t.session("show\nshow bank\nfind mail\n");
    assert_success(&output);
    assert_stderr_contains(&output, "missing index (3 results selected)");
    assert_stderr_contains(&output, "ambiguous account (2 matches)");
    // the session went on
    assert_stdout_contains(&output, "[0] Mail");
}

#[test]
fn test_copy_requires_field() {
    let t = Test::with_accounts();

    let output = t.session("copy\ncopy colour mail\n");
    assert_success(&output);
    assert_stderr_contains(&output, "incomplete command. Usage: copy <field> [target]");
    assert_stderr_contains(&output, "invalid field colour");
}

// Mutations

#[test]
fn test_new_account_is_saved() {
    let t = Test::with_accounts();

    let output = t.session("new Home Router\n\nadmin\n\ns3cret\nrack 2\ny\n");
    assert_success(&output);
    assert_stdout_contains(&output, "saved.");

    let store = t.store();
    let router = store.get("Home Router").expect("account saved");
    assert_eq!(router.login, "admin");
    assert_eq!(router.secret, "s3cret");
    assert_eq!(router.notes, "rack 2");
    assert!(router.created_at.is_some());
    assert_eq!(store.len(), 4);
}

#[test]
fn test_add_is_an_alias() {
    let t = Test::with_accounts();

    let output = t.session("add Forum\n\n\n\n\n\ny\n");
    assert_success(&output);
    assert!(t.store().get("Forum").is_some());
}

#[test]
fn test_edit_account() {
    let t = Test::with_accounts();

    let output = t.session("edit mail\n\nmailer\n\nnew-pass\n\ny\n");
    assert_success(&output);

    let store = t.store();
    let mail = store.get("Mail").unwrap();
    assert_eq!(mail.login, "mailer");
    assert_eq!(mail.secret, "new-pass");
    assert_eq!(mail.email, "me@example.org");
    assert_eq!(mail.created_at.as_deref(), Some("2016-03-01T10:00:00.000"));
    assert_ne!(mail.modified_at.as_deref(), Some("2016-03-02T11:30:00.000"));
}

#[test]
fn test_edit_clears_field_with_dash() {
    let t = Test::with_accounts();

    let output = t.session("edit mail\n\n\n-\n\n\ny\n");
    assert_success(&output);

    let store = t.store();
    let mail = store.get("Mail").unwrap();
    assert_eq!(mail.email, "");
    assert_eq!(mail.name, "Mail");
}

#[test]
fn test_edit_without_changes() {
    let t = Test::with_accounts();
    let before = std::fs::read(t.file()).unwrap();

    let output = t.session("edit mail\n\n\n\n\n\n");
    assert_success(&output);
    assert_stdout_contains(&output, "nothing to save.");
    assert_eq!(std::fs::read(t.file()).unwrap(), before);
}

#[test]
fn test_rename_onto_existing_name_keeps_names_unique() {
    let t = Test::with_accounts();

    let output = t.session("edit mail\nBANK A\n\n\n\n\ny\n");
    assert_success(&output);

    let store = t.store();
    assert_eq!(store.keys(), vec!["BANK A", "Bank B"]);
    assert_eq!(store.get("BANK A").unwrap().email, "me@example.org");
}

#[test]
fn test_delete_account() {
    let t = Test::with_accounts();

    let output = t.session("delete bank personal\ny\n");
    assert_success(&output);
    assert!(t.store().get("Bank B").is_none());
    assert_eq!(t.store().len(), 2);
}

#[test]
fn test_delete_declined() {
    let t = Test::with_accounts();

    let output = t.session("delete mail\nn\n");
    assert_success(&output);
    assert_stdout_contains(&output, "nothing deleted.");
    assert_eq!(t.store().len(), 3);
}

#[test]
fn test_deleted_index_does_not_shift() {
    let t = Test::with_accounts();

    let output = t.session("find bank\ndelete 0\ny\nshow 0\nshow 1\n");
    assert_success(&output);
    assert_stderr_contains(&output, "account 'Bank A' no longer exists");
    assert_stdout_contains(&output, "pseudo: bob");
}

// Import and export

#[test]
fn test_dump_and_load() {
    let t = Test::with_accounts();

    let output = t.session("dump export.json\n");
    assert_success(&output);
    let dumped = std::fs::read_to_string(t.path("export.json")).unwrap();
    assert!(dumped.contains("\"pseudo\": \"alice\""));
    assert!(dumped.contains("\"creation date\": \"2016-03-01T10:00:00.000\""));

    let output = t.session("delete mail\ny\nload export.json\ny\n");
    assert_success(&output);
    assert_stdout_contains(&output, "3 accounts loaded");
    assert!(t.store().get("Mail").is_some());
}

#[test]
fn test_dump_compact() {
    let t = Test::with_accounts();

    let output = t.session("dump export.json true\n");
    assert_success(&output);
    let dumped = std::fs::read_to_string(t.path("export.json")).unwrap();
    assert!(!dumped.contains('\n'));
}

#[test]
fn test_dump_asks_before_overwrite() {
    let t = Test::with_accounts();
    std::fs::write(t.path("export.json"), "keep").unwrap();

    let output = t.session("dump export.json\nn\n");
    assert_success(&output);
    assert_eq!(std::fs::read_to_string(t.path("export.json")).unwrap(), "keep");
}

// Help and exit

#[test]
fn test_help_and_man() {
    let t = Test::with_accounts();

    let output = t.session("help\nman dump\nhelp nope\n");
    assert_success(&output);
    assert_stdout_contains(&output, "Available commands: add, copy, delete, dump, edit, exit");
    assert_stdout_contains(&output, "dump <path> [noIndent:boolean]");
}

#[test]
fn test_exit_command_returns_one() {
    let t = Test::with_accounts();

    let output = t.session("exit\nfind\n");
    assert_code(&output, 1);
    assert_stdout_excludes(&output, "results.");
}

#[test]
fn test_end_of_input_returns_zero() {
    let t = Test::with_accounts();

    let output = t.session("");
    assert_code(&output, 0);
}

#[test]
fn test_show_by_index_after_find() {
    let t = Test::with_accounts();

    t.cmd()
        .arg("-f")
        .arg(t.file())
        .args(["-p", PASSWORD])
        .write_stdin("find mail\nshow 0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("me@example.org"))
        .stdout(predicate::str::contains("Bank A").not());
}

#[test]
fn test_load_keeps_names_differing_in_case() {
    let t = Test::with_accounts();
    std::fs::write(
        t.path("legacy.json"),
        r#"[{"name":"Gmail","password":"personal-pw"},{"name":"gmail","password":"work-pw"}]"#,
    )
    .unwrap();

    let output = t.session("load legacy.json\ny\n");
    assert_success(&output);
    assert_stdout_contains(&output, "duplicate account name 'gmail' kept as 'gmail (2)'.");
    assert_stdout_contains(&output, "2 accounts loaded");

    let store = t.store();
    assert_eq!(store.keys(), vec!["Gmail", "gmail (2)"]);
    assert_eq!(store.get("gmail (2)").unwrap().secret, "work-pw");
}
