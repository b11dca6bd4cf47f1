//! Interactive session.
//!
//! Owns everything a command may touch: the store, the session file and
//! its password, the selection context and the I/O adapters. Each input
//! line runs to completion before the next one is read.

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::clipboard::Clipboard;
use crate::cli::command::{Command, Resolution, Resolver};
use crate::cli::commands;
use crate::cli::output;
use crate::cli::terminal::Terminal;
use crate::core::cipher::Cipher;
use crate::core::selection::{self, Selection};
use crate::core::store::CredentialStore;
use crate::error::Result;

/// Main prompt.
const PROMPT: &str = "> ";

/// What the loop does after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// The `exit` command.
    Exit,
    /// Input ran out at the main prompt.
    EndOfInput,
}

/// State of one interactive session.
pub struct Session {
    pub(crate) store: CredentialStore,
    pub(crate) selection: Selection,
    pub(crate) terminal: Box<dyn Terminal>,
    pub(crate) clipboard: Box<dyn Clipboard>,
    pub(crate) resolver: Resolver,
    pub(crate) indent_dumps: bool,
    path: PathBuf,
    password: Zeroizing<String>,
    cipher: Box<dyn Cipher>,
}

impl Session {
    /// Start a session on an opened store. Every account is selected.
    pub fn new(
        store: CredentialStore,
        path: PathBuf,
        password: Zeroizing<String>,
        cipher: Box<dyn Cipher>,
        terminal: Box<dyn Terminal>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let selection = Selection::new(store.keys());
        Self {
            store,
            selection,
            terminal,
            clipboard,
            resolver: Resolver::new(),
            indent_dumps: true,
            path,
            password,
            cipher,
        }
    }

    /// Default indentation of `dump` output.
    pub fn with_indent_dumps(mut self, indent: bool) -> Self {
        self.indent_dumps = indent;
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and execute lines until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Only a failure to read the main prompt ends the loop with an error;
    /// command failures are printed and the loop continues.
    pub fn run(&mut self) -> Result<Ending> {
        output::hint(&format!("type {} for the list of commands", output::cmd("help")));
        loop {
            let Some(line) = self.terminal.read_line(PROMPT)? else {
                debug!("end of input");
                return Ok(Ending::EndOfInput);
            };
            if self.execute(&line) == Flow::Exit {
                return Ok(Ending::Exit);
            }
        }
    }

    /// Execute one input line, reporting any failure.
    pub fn execute(&mut self, line: &str) -> Flow {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let Some((first, args)) = tokens.split_first() else {
            return Flow::Continue;
        };

        let result = match self.resolver.resolve(first) {
            Resolution::Exact(command) => self.dispatch(command, args),
            Resolution::Fuzzy(doc) => {
                output::warn(&format!("unrecognized command. Assuming '{}'", doc.name));
                self.dispatch(doc.command, args)
            }
            Resolution::Search => {
                debug!(patterns = tokens.len(), "default search");
                commands::find(self, &tokens).map(|()| Flow::Continue)
            }
        };

        result.unwrap_or_else(|e| {
            output::error(&e.to_string());
            Flow::Continue
        })
    }

    /// Run a resolved command.
    pub fn dispatch(&mut self, command: Command, args: &[String]) -> Result<Flow> {
        debug!(?command, args = args.len(), "dispatch");
        match command {
            Command::Find => commands::find(self, args)?,
            Command::Show => commands::show(self, args)?,
            Command::ShowPass => commands::showpass(self, args)?,
            Command::Copy => commands::copy(self, args)?,
            Command::Pass => commands::pass(self, args)?,
            Command::Edit => commands::edit(self, args)?,
            Command::New => commands::new(self, args)?,
            Command::Delete => commands::delete(self, args)?,
            Command::Load => commands::load(self, args)?,
            Command::Dump => commands::dump(self, args)?,
            Command::Help => commands::help(self, args),
            Command::Man => commands::man(self, args),
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Resolve a command's arguments to one account name.
    pub fn target(&mut self, args: &[String]) -> Result<Option<String>> {
        selection::resolve_target(&self.store, &mut self.selection, args)
    }

    /// Persist the store to the session file.
    pub fn save(&self) -> Result<()> {
        self.store
            .save(self.cipher.as_ref(), &self.path, &self.password)?;
        output::success("saved.");
        Ok(())
    }
}
