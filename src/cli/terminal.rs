//! Terminal input.
//!
//! Every read the session performs goes through [`Terminal`], so handlers
//! never touch stdin directly. [`ConsoleTerminal`] uses dialoguer prompts on
//! a TTY and plain line reads when stdin is piped.

use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::{Confirm, Input, Password};

use crate::cli::output;
use crate::error::{CommandError, Result};

/// Piped answer that clears a pre-filled value.
pub const CLEAR_VALUE: &str = "-";

/// Line-oriented user input.
pub trait Terminal {
    /// Read the next command line. `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Read a value, pre-filled with `initial`.
    ///
    /// When piped, an empty line keeps `initial` and [`CLEAR_VALUE`] clears it.
    fn read_with_default(&mut self, prompt: &str, initial: &str) -> Result<String>;

    /// Read a hidden value. An empty answer yields `fallback`.
    fn read_password(&mut self, prompt: &str, fallback: &str) -> Result<String>;

    /// Ask a yes/no question; anything but yes is no.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Show a secret until the user presses a key, then erase it.
    fn reveal(&mut self, label: &str, secret: &str) -> Result<()>;
}

/// The process terminal.
pub struct ConsoleTerminal {
    term: Term,
    interactive: bool,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            interactive: io::stdin().is_terminal() && io::stdout().is_terminal(),
        }
    }

    /// Plain read for piped input; `None` at end of input.
    fn next_piped_line(&self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn required_piped_line(&self, prompt: &str) -> Result<String> {
        self.next_piped_line(prompt)?
            .ok_or_else(|| CommandError::InputClosed.into())
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for ConsoleTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        if !self.interactive {
            return self.next_piped_line(&output::prompt(prompt));
        }
        self.term.write_str(&output::prompt(prompt))?;
        match self.term.read_line() {
            Ok(line) => Ok(Some(line)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_with_default(&mut self, prompt: &str, initial: &str) -> Result<String> {
        if !self.interactive {
            let line = self.required_piped_line(&output::prompt(&format!("{}> ", prompt)))?;
            return Ok(piped_value(line, initial));
        }
        let value = Input::<String>::new()
            .with_prompt(format!("   {}", prompt))
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn read_password(&mut self, prompt: &str, fallback: &str) -> Result<String> {
        let value = if self.interactive {
            Password::new()
                .with_prompt(format!("   {}", prompt))
                .allow_empty_password(true)
                .interact()?
        } else {
            self.required_piped_line(&output::prompt(&format!("{}> ", prompt)))?
        };
        Ok(if value.is_empty() {
            fallback.to_string()
        } else {
            value
        })
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        if !self.interactive {
            let answer = self.required_piped_line(&output::prompt(&format!("{} [y|N] ", question)))?;
            return Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"));
        }
        let answer = Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()?;
        Ok(answer)
    }

    fn reveal(&mut self, label: &str, secret: &str) -> Result<()> {
        let line = format!("   {} {}", output::prompt(&format!("{}>", label)), secret);
        if !self.interactive {
            output::raw(&line);
            return Ok(());
        }
        self.term.write_str(&line)?;
        self.term.read_key()?;
        self.term.clear_line()?;
        Ok(())
    }
}

/// Resolve a piped answer to a pre-filled prompt.
fn piped_value(line: String, initial: &str) -> String {
    match line.as_str() {
        "" => initial.to_string(),
        CLEAR_VALUE => String::new(),
        _ => line,
    }
}
