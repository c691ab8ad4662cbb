//! Command parsing for the line-oriented host shell.
//!
//! Every menu item and dialog of a notepad maps onto one command line. The
//! shell reads a line, parses it into a [`Command`], and hands it to the
//! [`Editor`](crate::editor::Editor). Positions are written `LINE.COLUMN`
//! (line 1-based, column 0-based), the same convention the status bar uses.
//!
//! # Supported commands
//!
//! | Command                 | Action                                   |
//! |-------------------------|------------------------------------------|
//! | `:e <path>`             | Open a file                              |
//! | `:w`                    | Save to the current file path            |
//! | `:w <path>`             | Save to a specific path (save-as)        |
//! | `:q`                    | Quit (refuses if the buffer is modified) |
//! | `:q!`                   | Force quit (discard changes)             |
//! | `:wq`                   | Save and quit                            |
//! | `:i L.C <text>`         | Insert text (`\n`, `\t`, `\\` escapes)   |
//! | `:d L.C L.C`            | Delete a range                           |
//! | `:m L.C`                | Move the cursor                          |
//! | `:b L.C L.C`            | Toggle bold                              |
//! | `:it L.C L.C`           | Toggle italic                            |
//! | `:u L.C L.C`            | Toggle underline                         |
//! | `:tag <name> L.C L.C`   | Add an arbitrary tag                     |
//! | `:untag <name> L.C L.C` | Remove an arbitrary tag                  |
//! | `:tags <name>`          | List a tag's ranges                      |
//! | `:tags`                 | List the tags in use                     |
//! | `:find <needle>`        | Highlight every match                    |
//! | `:n <needle>`           | Move to the next match                   |
//! | `:r <needle> <rep>`     | Replace every occurrence in the document |
//! | `:s/pat/rep/`           | Same, with an explicit delimiter         |
//! | `:p`                    | Print the document                       |
//! | `:set ...`              | Options (see [`options`](crate::options))|
//!
//! Ranges may be given in either order; they are normalized.
//!
//! The `:s` delimiter is whatever follows the `s` (`:s#a/b#c#` works), and
//! `\<delim>` escapes it. Needles and replacements also understand `\n` and
//! `\t`. `:%s` is accepted as a synonym: replacement always covers the whole
//! document.

use std::path::PathBuf;

use thiserror::Error;

use crate::position::{ParsePositionError, Position, Range};
use crate::tag;

/// Command parsing error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),

    #[error(transparent)]
    Position(#[from] ParsePositionError),
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:e <path>` — open a file.
    Edit(PathBuf),

    /// `:w` — save to the current path.
    Write,

    /// `:w <path>` — save to a specific path.
    WriteAs(PathBuf),

    /// `:q` — quit (refuses if the buffer is modified).
    Quit,

    /// `:q!` — force quit.
    ForceQuit,

    /// `:wq` — save and quit.
    WriteQuit,

    /// `:i` — insert text.
    Insert { at: Position, text: String },

    /// `:d` — delete a range.
    Delete(Range),

    /// `:m` — move the cursor.
    Move(Position),

    /// `:b`, `:it`, `:u` — toggle a formatting tag.
    ToggleTag { name: String, range: Range },

    /// `:tag` — add a tag.
    AddTag { name: String, range: Range },

    /// `:untag` — remove a tag.
    RemoveTag { name: String, range: Range },

    /// `:tags <name>` — list a tag's ranges.
    ListTag(String),

    /// `:tags` — list the names of the tags in use.
    ListTagNames,

    /// `:find` — highlight every match.
    Find(String),

    /// `:n` — move to the next match.
    FindNext(String),

    /// `:r` or `:s/pat/rep/` — replace every occurrence.
    Replace { needle: String, replacement: String },

    /// `:p` — print the document.
    Print,

    /// `:set` — options; the argument string is parsed by
    /// [`options::parse_set`](crate::options::parse_set).
    Set(String),
}

/// Parse a command string. The leading `:` is optional.
///
/// # Errors
///
/// Returns [`CommandError`] for unknown commands and malformed arguments.
pub fn parse(input: &str) -> Result<Command, CommandError> {
    let trimmed = input.trim_start();
    let trimmed = trimmed.strip_prefix(':').unwrap_or(trimmed);
    let trimmed = trimmed.trim_end_matches(['\r', '\n']);

    if trimmed.trim().is_empty() {
        return Err(CommandError::UnknownCommand(String::new()));
    }

    // Substitution: the delimiter follows the `s` directly.
    let sub_body = trimmed
        .strip_prefix("%s")
        .or_else(|| trimmed.strip_prefix('s'));
    if let Some(body) = sub_body {
        if body.starts_with(|c: char| !c.is_alphanumeric() && !c.is_whitespace()) {
            return parse_substitute(body);
        }
    }

    // Split into command and arguments. Arguments keep inner whitespace;
    // only the single separating run is dropped.
    let (cmd, arg) = trimmed
        .find(char::is_whitespace)
        .map_or((trimmed, ""), |pos| {
            (&trimmed[..pos], trimmed[pos..].trim_start())
        });

    match cmd {
        "e" | "edit" => {
            let path = arg.trim();
            if path.is_empty() {
                return Err(CommandError::InvalidSyntax("usage: :e <path>".into()));
            }
            Ok(Command::Edit(PathBuf::from(path)))
        }
        "w" | "write" => {
            let path = arg.trim();
            if path.is_empty() {
                Ok(Command::Write)
            } else {
                Ok(Command::WriteAs(PathBuf::from(path)))
            }
        }
        "q" | "quit" => Ok(Command::Quit),
        "q!" => Ok(Command::ForceQuit),
        "wq" => Ok(Command::WriteQuit),
        "i" | "insert" => {
            let (at, text) = arg
                .split_once(char::is_whitespace)
                .unwrap_or((arg, ""));
            Ok(Command::Insert {
                at: at.parse()?,
                text: unescape(text, None),
            })
        }
        "d" | "delete" => Ok(Command::Delete(parse_range(arg)?)),
        "m" | "move" => Ok(Command::Move(arg.trim().parse()?)),
        "b" | "bold" => toggle(tag::BOLD, arg),
        "it" | "italic" => toggle(tag::ITALIC, arg),
        "u" | "underline" => toggle(tag::UNDERLINE, arg),
        "tag" => {
            let (name, range) = parse_named_range(arg)?;
            Ok(Command::AddTag { name, range })
        }
        "untag" => {
            let (name, range) = parse_named_range(arg)?;
            Ok(Command::RemoveTag { name, range })
        }
        "tags" => {
            let name = arg.trim();
            if name.is_empty() {
                Ok(Command::ListTagNames)
            } else {
                Ok(Command::ListTag(name.to_string()))
            }
        }
        "r" | "replace" => {
            let (needle, replacement) = arg
                .split_once(char::is_whitespace)
                .unwrap_or((arg, ""));
            Ok(Command::Replace {
                needle: unescape(needle, None),
                replacement: unescape(replacement, None),
            })
        }
        "find" | "f" => Ok(Command::Find(unescape(arg, None))),
        "n" | "next" => Ok(Command::FindNext(unescape(arg, None))),
        "p" | "print" => Ok(Command::Print),
        "set" => Ok(Command::Set(arg.to_string())),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn toggle(name: &str, arg: &str) -> Result<Command, CommandError> {
    Ok(Command::ToggleTag {
        name: name.to_string(),
        range: parse_range(arg)?,
    })
}

/// Parse `L.C L.C` into a normalized range.
fn parse_range(arg: &str) -> Result<Range, CommandError> {
    let mut parts = arg.split_whitespace();
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::InvalidSyntax(format!(
            "expected two positions, got `{}`",
            arg.trim()
        )));
    };
    Ok(Range::ordered(a.parse()?, b.parse()?))
}

/// Parse `<name> L.C L.C`.
fn parse_named_range(arg: &str) -> Result<(String, Range), CommandError> {
    let (name, rest) = arg
        .split_once(char::is_whitespace)
        .ok_or_else(|| CommandError::InvalidSyntax("usage: <name> L.C L.C".into()))?;
    Ok((name.to_string(), parse_range(rest)?))
}

/// Parse the body of a `:s` command (everything after the `s`).
///
/// The first character is the delimiter. The trailing delimiter is optional.
fn parse_substitute(body: &str) -> Result<Command, CommandError> {
    let Some(delim) = body.chars().next() else {
        return Err(CommandError::InvalidSyntax("usage: :s/needle/replacement/".into()));
    };
    let after_delim = &body[delim.len_utf8()..];

    let Some((needle, rest)) = split_at_unescaped(after_delim, delim) else {
        return Err(CommandError::InvalidSyntax(format!(
            "missing replacement: :s{delim}needle{delim}replacement{delim}"
        )));
    };

    let replacement = match split_at_unescaped(rest, delim) {
        Some((replacement, trailing)) if trailing.trim().is_empty() => replacement,
        Some((_, trailing)) => {
            return Err(CommandError::InvalidSyntax(format!(
                "unexpected text after replacement: `{trailing}`"
            )));
        }
        None => rest,
    };

    Ok(Command::Replace {
        needle: unescape(needle, Some(delim)),
        replacement: unescape(replacement, Some(delim)),
    })
}

/// Split a string at the first unescaped occurrence of `delim`.
///
/// `\<delim>` is treated as an escaped delimiter and not a split point.
fn split_at_unescaped(s: &str, delim: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (byte_idx, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
            continue;
        }
        if ch == delim {
            return Some((&s[..byte_idx], &s[byte_idx + ch.len_utf8()..]));
        }
    }
    None
}

/// Resolve `\n`, `\t`, `\\` and (when given) `\<delim>`. Any other `\X`
/// passes through unchanged.
fn unescape(s: &str, delim: Option<char>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some(next) if Some(next) == delim => result.push(next),
            _ => {
                result.push('\\');
                continue;
            }
        }
        chars.next();
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
