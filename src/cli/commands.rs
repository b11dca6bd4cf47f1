//! Command implementations.
//!
//! Handler functions for each interactive command. Handlers take the
//! session explicitly and persist before returning whenever they mutate
//! the store.

use std::path::Path;

use crate::cli::output;
use crate::cli::session::Session;
use crate::cli::terminal::Terminal;
use crate::core::domain::{Credential, Field};
use crate::core::store::{can_write_to, CredentialStore, Loaded, WriteCheck};
use crate::error::{CommandError, Result, StoreError};

/// List accounts matching every pattern, or all of them.
///
/// Arguments reading `/regex/` once joined are a full-match regular
/// expression; whitespace runs inside it read as single spaces. The results
/// become the selection; an empty result leaves it alone.
pub fn find(session: &mut Session, args: &[String]) -> Result<()> {
    let names = match args {
        [] => session.store.keys(),
        patterns => match regex_argument(patterns) {
            Some(regex) => session.store.find_by_regex(&regex)?,
            None => session.store.find(patterns)?,
        },
    };

    if names.is_empty() {
        output::warn("no match.");
        return Ok(());
    }

    for (index, name) in names.iter().enumerate() {
        output::result(index, name);
    }
    output::dimmed(&format!(" {} results.", names.len()));
    session.selection.replace(names);
    Ok(())
}

/// Print the target account, password excluded.
pub fn show(session: &mut Session, args: &[String]) -> Result<()> {
    let Some(name) = session.target(args)? else {
        return no_accounts();
    };
    let credential = session.store.require(&name)?;

    output::blank();
    output::field("name", &credential.name);
    output::field("pseudo", &credential.login);
    output::field("email", &credential.email);
    output::field("notes", &credential.notes);
    if let Some(created) = &credential.created_at {
        output::field("created", output::dim(created));
    }
    if let Some(modified) = &credential.modified_at {
        output::field("modified", output::dim(modified));
    }
    output::blank();
    Ok(())
}

/// Reveal the password of the target account.
pub fn showpass(session: &mut Session, args: &[String]) -> Result<()> {
    let Some(name) = session.target(args)? else {
        return no_accounts();
    };
    let credential = session.store.require(&name)?;

    if credential.secret.is_empty() {
        output::warn("empty password.");
        return Ok(());
    }
    session.terminal.reveal("password", &credential.secret)
}

/// `copy <field> [target]`
pub fn copy(session: &mut Session, args: &[String]) -> Result<()> {
    let Some((field, rest)) = args.split_first() else {
        return Err(missing_argument(session, "copy"));
    };
    copy_field(session, field.parse()?, rest)
}

/// `pass [target]`, shorthand for `copy password [target]`.
pub fn pass(session: &mut Session, args: &[String]) -> Result<()> {
    copy_field(session, Field::Secret, args)
}

fn copy_field(session: &mut Session, field: Field, args: &[String]) -> Result<()> {
    let Some(name) = session.target(args)? else {
        return no_accounts();
    };
    let value = session.store.require(&name)?.get(field);

    if value.is_empty() {
        output::warn("nothing to copy (empty field).");
        return Ok(());
    }
    session.clipboard.copy(value)?;
    output::success(&format!(
        "{} for account {} copied to clipboard.",
        field,
        output::name(&name)
    ));
    Ok(())
}

/// Edit the target account field by field.
///
/// Renaming onto another account's name (case-insensitively) replaces that
/// account after confirmation.
pub fn edit(session: &mut Session, args: &[String]) -> Result<()> {
    let Some(name) = session.target(args)? else {
        return no_accounts();
    };
    let current = session.store.require(&name)?.clone();

    let edited = prompt_fields(session.terminal.as_mut(), &current)?;
    if edited.name.is_empty() {
        return Err(StoreError::EmptyName.into());
    }
    if edited.same_content(&current) {
        output::info("nothing to save.");
        return Ok(());
    }

    let collision = session
        .store
        .find_key_case_insensitive(&edited.name)
        .filter(|key| *key != name.as_str())
        .map(str::to_string);
    let question = match &collision {
        Some(key) => override_question(key),
        None => "save changes ?".to_string(),
    };
    if !session.terminal.confirm(&question)? {
        output::info("nothing saved.");
        return Ok(());
    }

    let mut updated = current;
    updated.override_with(edited);
    session.store.remove(&name);
    if let Some(key) = &collision {
        session.store.remove(key);
    }
    let new_name = updated.name.clone();
    session.store.put(new_name.clone(), updated);
    session.selection.rename(&name, &new_name);
    session.save()
}

/// Create an account. The arguments, joined, pre-fill its name.
pub fn new(session: &mut Session, args: &[String]) -> Result<()> {
    let draft = prompt_fields(session.terminal.as_mut(), &Credential::named(args.join(" ")))?;
    if draft.name.is_empty() {
        return Err(StoreError::EmptyName.into());
    }

    let existing = session
        .store
        .find_key_case_insensitive(&draft.name)
        .map(str::to_string);
    let question = match &existing {
        Some(key) => override_question(key),
        None => format!("create account '{}' ?", draft.name),
    };
    if !session.terminal.confirm(&question)? {
        output::info("nothing saved.");
        return Ok(());
    }

    let mut credential = existing
        .and_then(|key| session.store.remove(&key))
        .unwrap_or_default();
    credential.override_with(draft);
    let name = credential.name.clone();
    session.store.put(name.clone(), credential);
    session.selection.replace(vec![name]);
    session.save()
}

/// Delete the target account after confirmation.
pub fn delete(session: &mut Session, args: &[String]) -> Result<()> {
    let Some(name) = session.target(args)? else {
        return no_accounts();
    };

    if !session
        .terminal
        .confirm(&format!("delete account '{}' ?", name))?
    {
        output::info("nothing deleted.");
        return Ok(());
    }

    session.store.remove(&name);
    output::success(&format!("account {} deleted.", output::name(&name)));
    session.save()
}

/// Replace every account with a plaintext JSON import, then save.
///
/// Asks first when accounts would be replaced or when the import had to
/// rename near-duplicate names.
pub fn load(session: &mut Session, args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        return Err(missing_argument(session, "load"));
    };
    let Loaded { store, renamed } = CredentialStore::load_plain(Path::new(path))?;
    output::renamed(&renamed);

    let question = if !session.store.is_empty() {
        Some(format!(
            "replace the {} current accounts with the {} accounts of '{}' ?",
            session.store.len(),
            store.len(),
            path
        ))
    } else if !renamed.is_empty() {
        Some(format!("load the {} accounts of '{}' ?", store.len(), path))
    } else {
        None
    };
    if let Some(question) = question {
        if !session.terminal.confirm(&question)? {
            output::info("nothing loaded.");
            return Ok(());
        }
    }

    session.store = store;
    session.selection.replace(session.store.keys());
    output::success(&format!(
        "{} accounts loaded from {}.",
        session.store.len(),
        output::path(path)
    ));
    session.save()
}

/// Write every account as plaintext JSON.
///
/// A second argument of `true` disables indentation.
pub fn dump(session: &mut Session, args: &[String]) -> Result<()> {
    let Some(target) = args.first() else {
        return Err(missing_argument(session, "dump"));
    };
    if session.store.is_empty() {
        output::warn("nothing to dump (no accounts).");
        return Ok(());
    }

    let indent = match args.get(1) {
        Some(no_indent) => !no_indent.eq_ignore_ascii_case("true"),
        None => session.indent_dumps,
    };

    let path = Path::new(target);
    if can_write_to(path)? == WriteCheck::Exists
        && !session
            .terminal
            .confirm(&format!("file '{}' already exists. overwrite ?", target))?
    {
        output::info("nothing written.");
        return Ok(());
    }

    session.store.save_plain(path, indent)?;
    output::success(&format!("saved to {}.", output::path(target)));
    Ok(())
}

/// List command names, or describe one.
pub fn help(session: &Session, args: &[String]) {
    match args
        .first()
        .and_then(|name| session.resolver.get(&name.to_lowercase()))
    {
        Some(doc) => output::raw(&doc.full_description()),
        None => output::raw(&session.resolver.help()),
    }
}

/// Describe every command, or one.
pub fn man(session: &Session, args: &[String]) {
    if args.is_empty() {
        output::raw(&session.resolver.man());
    } else {
        help(session, args);
    }
}

/// Ask for every editable field, each pre-filled with its current value.
fn prompt_fields(terminal: &mut dyn Terminal, current: &Credential) -> Result<Credential> {
    let credential = Credential {
        name: terminal.read_with_default("name", &current.name)?,
        login: terminal.read_with_default("pseudo", &current.login)?,
        email: terminal.read_with_default("email", &current.email)?,
        secret: terminal.read_password("password", &current.secret)?,
        notes: terminal.read_with_default("notes", &current.notes)?,
        created_at: current.created_at.clone(),
        modified_at: current.modified_at.clone(),
    };
    Ok(credential.trimmed())
}

fn override_question(key: &str) -> String {
    format!("an account named '{}' already exists. override ?", key)
}

fn missing_argument(session: &Session, command: &str) -> crate::error::Error {
    let usage = session
        .resolver
        .get(command)
        .map_or_else(|| command.to_string(), |doc| doc.syntax());
    CommandError::MissingArgument { usage }.into()
}

fn no_accounts() -> Result<()> {
    output::warn("no accounts.");
    Ok(())
}

/// `/.../` with something between the slashes.
fn is_regex(arg: &str) -> bool {
    arg.len() > 2 && arg.starts_with('/') && arg.ends_with('/')
}

/// The regex between the slashes of the arguments joined back into one.
fn regex_argument(args: &[String]) -> Option<String> {
    let joined = args.join(" ");
    is_regex(&joined).then(|| joined[1..joined.len() - 1].to_string())
}
