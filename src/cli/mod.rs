//! Command-line interface.

pub mod batch;
pub mod clipboard;
pub mod command;
pub mod commands;
pub mod output;
pub mod session;
pub mod startup;
pub mod terminal;

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::cli::clipboard::SystemClipboard;
use crate::cli::session::{Ending, Session};
use crate::cli::terminal::ConsoleTerminal;
use crate::core::cipher::OpenSsl;
use crate::core::config::Config;
use crate::error::{ConfigError, Result};

/// Lockbox - A local, encrypted password store.
#[derive(Parser, Debug)]
#[command(
    name = "lockbox",
    about = "A local, encrypted password store",
    version,
    after_help = "Type help at the prompt for the list of commands."
)]
pub struct Cli {
    /// Session file
    #[arg(short, long, env = "LOCKBOX_FILE", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Password of the session file
    #[arg(short, long, value_name = "PASSWORD")]
    pub pass: Option<String>,

    /// Disable colored output
    #[arg(long = "nocolor", visible_alias = "no-color")]
    pub no_color: bool,

    /// Encrypt the plaintext JSON given with --file into OUT, then exit
    #[arg(short, long, value_name = "OUT", conflicts_with = "decrypt")]
    pub encrypt: Option<PathBuf>,

    /// Decrypt the file given with --file into plaintext JSON at OUT, then exit
    #[arg(short, long, value_name = "OUT")]
    pub decrypt: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run lockbox and return the process exit code.
///
/// 0 after end of input, a successful conversion or a declined startup;
/// 1 after the `exit` command.
///
/// # Errors
///
/// Returns every startup failure: missing file argument, unreadable
/// config, wrong password, failed conversion.
pub fn execute(cli: Cli) -> Result<i32> {
    let config = Config::load()?;
    if cli.no_color || config.no_color || output::no_color_env() {
        output::disable_colors();
    }

    let file = cli
        .file
        .or(config.file)
        .ok_or(ConfigError::MissingFile)?;
    debug!(file = %file.display(), "session file");

    let mut terminal = ConsoleTerminal::new();

    if let Some(out) = cli.encrypt {
        batch::encrypt(&OpenSsl, &mut terminal, &file, &out, cli.pass)?;
        return Ok(0);
    }
    if let Some(out) = cli.decrypt {
        batch::decrypt(&OpenSsl, &mut terminal, &file, &out, cli.pass)?;
        return Ok(0);
    }

    let Some(opened) = startup::open(
        &OpenSsl,
        &mut terminal,
        &file,
        cli.pass,
        config.password_attempts,
    )?
    else {
        return Ok(0);
    };

    let mut session = Session::new(
        opened.store,
        file,
        opened.password,
        Box::new(OpenSsl),
        Box::new(terminal),
        Box::new(SystemClipboard::new()),
    )
    .with_indent_dumps(config.indent_dumps);

    match session.run()? {
        Ending::Exit => Ok(1),
        Ending::EndOfInput => Ok(0),
    }
}
