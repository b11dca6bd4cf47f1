//! Command table and resolution.
//!
//! Maps the first token of an input line to a command: exact name first,
//! then the nearest name by edit distance, then the default search.

use std::fmt;

use tracing::debug;

use crate::core::constants::FUZZY_THRESHOLD;

/// Interactive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Find,
    Show,
    ShowPass,
    Copy,
    Pass,
    Edit,
    New,
    Delete,
    Load,
    Dump,
    Help,
    Man,
    Exit,
}

/// Usage documentation of one command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDoc {
    pub name: &'static str,
    pub command: Command,
    pub args: &'static str,
    pub descr: &'static str,
}

impl CommandDoc {
    /// `name args` line.
    pub fn syntax(&self) -> String {
        if self.args.is_empty() {
            self.name.to_string()
        } else {
            format!("{} {}", self.name, self.args)
        }
    }

    /// Syntax followed by the indented description.
    pub fn full_description(&self) -> String {
        format!("{}\n    {}", self.syntax(), self.descr)
    }
}

impl fmt::Display for CommandDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Every command name, aliases included, in alphabetical order.
///
/// Fuzzy matching scans this table in order, which makes tie-breaking
/// deterministic.
pub const COMMANDS: &[CommandDoc] = &[
    CommandDoc {
        name: "add",
        command: Command::New,
        args: "[name words...]",
        descr: "alias for new.",
    },
    CommandDoc {
        name: "copy",
        command: Command::Copy,
        args: "<field> [target]",
        descr: "copy a field (name, pseudo, email, pass, notes) of the target account to the clipboard.",
    },
    CommandDoc {
        name: "delete",
        command: Command::Delete,
        args: "[target]",
        descr: "delete the target account after confirmation.",
    },
    CommandDoc {
        name: "dump",
        command: Command::Dump,
        args: "<path> [noIndent:boolean]",
        descr: "write every account as cleartext json to path (indented unless noIndent is true).",
    },
    CommandDoc {
        name: "edit",
        command: Command::Edit,
        args: "[target]",
        descr: "edit the target account; empty answers keep the current value, '-' clears it when piped.",
    },
    CommandDoc {
        name: "exit",
        command: Command::Exit,
        args: "",
        descr: "leave the session.",
    },
    CommandDoc {
        name: "find",
        command: Command::Find,
        args: "[pattern...] | /regex/",
        descr: "list the accounts whose name, pseudo, email or notes contain every pattern; no pattern lists everything.",
    },
    CommandDoc {
        name: "help",
        command: Command::Help,
        args: "[command]",
        descr: "list the available commands, or describe one.",
    },
    CommandDoc {
        name: "load",
        command: Command::Load,
        args: "<path>",
        descr: "replace the accounts with the content of a cleartext json file and save.",
    },
    CommandDoc {
        name: "man",
        command: Command::Man,
        args: "[command]",
        descr: "describe every command, or one.",
    },
    CommandDoc {
        name: "new",
        command: Command::New,
        args: "[name words...]",
        descr: "create a new account.",
    },
    CommandDoc {
        name: "pass",
        command: Command::Pass,
        args: "[target]",
        descr: "copy the password of the target account to the clipboard.",
    },
    CommandDoc {
        name: "show",
        command: Command::Show,
        args: "[target]",
        descr: "show the target account, password excluded.",
    },
    CommandDoc {
        name: "showpass",
        command: Command::ShowPass,
        args: "[target]",
        descr: "show the password of the target account until a key is pressed.",
    },
];

/// How an input token was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The token names a command.
    Exact(Command),
    /// The token is close to the named command.
    Fuzzy(&'static CommandDoc),
    /// Nothing close: search with the whole line.
    Search,
}

/// Resolves typed tokens against the command table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver {
    docs: &'static [CommandDoc],
    threshold: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            docs: COMMANDS,
            threshold: FUZZY_THRESHOLD,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a command token. Matching is case-insensitive.
    pub fn resolve(&self, token: &str) -> Resolution {
        let token = token.to_lowercase();
        if let Some(doc) = self.get(&token) {
            return Resolution::Exact(doc.command);
        }

        match self.closest(&token) {
            Some(doc) => {
                debug!(token = %token, command = doc.name, "fuzzy command match");
                Resolution::Fuzzy(doc)
            }
            None => Resolution::Search,
        }
    }

    /// Documentation of a command name.
    pub fn get(&self, name: &str) -> Option<&'static CommandDoc> {
        self.docs.iter().find(|doc| doc.name == name)
    }

    /// All documented names.
    pub fn docs(&self) -> &'static [CommandDoc] {
        self.docs
    }

    /// The first command with the strictly smallest distance, if that
    /// distance is below the threshold.
    fn closest(&self, token: &str) -> Option<&'static CommandDoc> {
        let mut best: Option<(&'static CommandDoc, usize)> = None;
        for doc in self.docs {
            let distance = levenshtein(doc.name, token);
            if best.map_or(true, |(_, min)| distance < min) {
                best = Some((doc, distance));
            }
        }
        best.filter(|(_, distance)| *distance < self.threshold)
            .map(|(doc, _)| doc)
    }

    /// `Available commands: a, b, ...`
    pub fn help(&self) -> String {
        let names: Vec<&str> = self.docs.iter().map(|doc| doc.name).collect();
        format!("Available commands: {}", names.join(", "))
    }

    /// Every full description.
    pub fn man(&self) -> String {
        self.docs
            .iter()
            .map(|doc| format!("* {}", doc.full_description()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Edit distance with unit insert, delete and substitute costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
