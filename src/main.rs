// SPDX-License-Identifier: MIT
//
// notepad — a small notepad driven from a line-oriented shell.
//
// This is the main binary. It wires stdin to the document model:
//
//   stdin line → command::parse → Shell::run_command → Editor
//   CommandResult → message on stdout (or quit)
//
// The Editor in notepad-core keeps buffer, tags and cursor in step; this
// file only turns commands into Editor calls and results into text.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use notepad_core::command::{self, Command};
use notepad_core::editor::Editor;
use notepad_core::position::{Position, Range};
use notepad_core::tag::Toggle;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

// ─── Command results ────────────────────────────────────────────────────────

/// Outcome of one command line.
#[derive(Debug, PartialEq, Eq)]
enum CommandResult {
    /// Done; optionally show a message.
    Ok(Option<String>),
    /// Failed; show the error and keep going.
    Err(String),
    /// Leave the shell.
    Quit,
}

impl CommandResult {
    fn msg(text: impl Into<String>) -> Self {
        Self::Ok(Some(text.into()))
    }
}

// ─── Shell ──────────────────────────────────────────────────────────────────

struct Shell {
    editor: Editor,
}

impl Shell {
    const fn new(editor: Editor) -> Self {
        Self { editor }
    }

    /// Read commands until `:q` or end of input.
    fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.editor.title())?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match self.execute(&line) {
                CommandResult::Ok(Some(msg)) => writeln!(out, "{msg}")?,
                CommandResult::Ok(None) => {}
                CommandResult::Err(msg) => writeln!(out, "error: {msg}")?,
                CommandResult::Quit => break,
            }
        }
        out.flush()
    }

    /// Parse and run one command line.
    fn execute(&mut self, line: &str) -> CommandResult {
        match command::parse(line) {
            Ok(cmd) => {
                debug!(?cmd, "command");
                self.run_command(cmd)
            }
            Err(e) => {
                warn!(input = line, error = %e, "rejected command");
                CommandResult::Err(e.to_string())
            }
        }
    }

    fn run_command(&mut self, cmd: Command) -> CommandResult {
        match cmd {
            Command::Edit(path) => self.cmd_edit(&path),
            Command::Write => self.cmd_write(),
            Command::WriteAs(path) => self.cmd_write_as(&path),
            Command::Quit => self.cmd_quit(),
            Command::ForceQuit => CommandResult::Quit,
            Command::WriteQuit => match self.cmd_write() {
                CommandResult::Ok(_) => CommandResult::Quit,
                err => err,
            },
            Command::Insert { at, text } => match self.editor.insert(at, &text) {
                Ok(_) => CommandResult::msg(self.editor.cursor_text()),
                Err(e) => CommandResult::Err(e.to_string()),
            },
            Command::Delete(range) => match self.editor.delete(range) {
                Ok(removed) => CommandResult::msg(format!(
                    "{} chars deleted | {}",
                    removed.chars().count(),
                    self.editor.cursor_text()
                )),
                Err(e) => CommandResult::Err(e.to_string()),
            },
            Command::Move(pos) => match self.editor.move_cursor(pos) {
                Ok(()) => CommandResult::msg(self.editor.cursor_text()),
                Err(e) => CommandResult::Err(e.to_string()),
            },
            Command::ToggleTag { name, range } => {
                match self.editor.toggle_formatting(&name, range) {
                    Ok(Toggle::Added) => CommandResult::msg(format!("{name} on {range}")),
                    Ok(Toggle::Removed) => CommandResult::msg(format!("{name} off {range}")),
                    Ok(Toggle::Skipped) => CommandResult::Ok(None),
                    Err(e) => CommandResult::Err(e.to_string()),
                }
            }
            Command::AddTag { name, range } => self
                .editor
                .apply_formatting(&name, range)
                .map_or_else(|e| CommandResult::Err(e.to_string()), |()| CommandResult::Ok(None)),
            Command::RemoveTag { name, range } => self
                .editor
                .remove_formatting(&name, range)
                .map_or_else(|e| CommandResult::Err(e.to_string()), |()| CommandResult::Ok(None)),
            Command::ListTag(name) => CommandResult::msg(self.list_tag(&name)),
            Command::ListTagNames => CommandResult::msg(self.list_tag_names()),
            Command::Find(needle) => {
                if needle.is_empty() {
                    return CommandResult::Ok(None);
                }
                let count = self.editor.search(&needle);
                CommandResult::msg(format!("{count} match{}", plural_es(count)))
            }
            Command::FindNext(needle) => match self.editor.find_next(&needle) {
                Some(range) => CommandResult::msg(format!(
                    "found at {} | {}",
                    range.start,
                    self.editor.cursor_text()
                )),
                None if needle.is_empty() => CommandResult::Ok(None),
                None => CommandResult::Err(format!("Pattern not found: {needle}")),
            },
            Command::Replace {
                needle,
                replacement,
            } => {
                if needle.is_empty() {
                    return CommandResult::Ok(None);
                }
                let count = self.editor.replace(&needle, &replacement);
                CommandResult::msg(format!(
                    "{count} replacement{}",
                    if count == 1 { "" } else { "s" }
                ))
            }
            Command::Print => CommandResult::msg(self.print()),
            Command::Set(args) => match self.editor.set_option(&args) {
                Ok(lines) if lines.is_empty() => CommandResult::Ok(None),
                Ok(lines) => CommandResult::msg(lines.join("\n")),
                Err(e) => CommandResult::Err(e.to_string()),
            },
        }
    }

    /// `:e <path>` — open a file, refusing to drop unsaved changes.
    fn cmd_edit(&mut self, path: &Path) -> CommandResult {
        if let Err(e) = self.editor.check_quit() {
            return CommandResult::Err(e.to_string());
        }
        match self.editor.open(path) {
            Ok(()) => CommandResult::msg(format!(
                "{} | {} lines",
                self.editor.title(),
                self.editor.buffer().line_count()
            )),
            Err(e) => CommandResult::Err(format!("Can't open {}: {e}", path.display())),
        }
    }

    /// `:w` — save to the current path.
    fn cmd_write(&mut self) -> CommandResult {
        match self.editor.save() {
            Ok(()) => CommandResult::msg(self.written_message()),
            Err(e) => CommandResult::Err(e.to_string()),
        }
    }

    /// `:w <path>` — save as.
    fn cmd_write_as(&mut self, path: &Path) -> CommandResult {
        match self.editor.save_as(path) {
            Ok(()) => CommandResult::msg(self.written_message()),
            Err(e) => CommandResult::Err(format!("Can't save {}: {e}", path.display())),
        }
    }

    /// `:q` — quit if nothing is unsaved.
    fn cmd_quit(&self) -> CommandResult {
        match self.editor.check_quit() {
            Ok(()) => CommandResult::Quit,
            Err(e) => CommandResult::Err(e.to_string()),
        }
    }

    fn written_message(&self) -> String {
        let name = self
            .editor
            .buffer()
            .path()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("???");
        let bytes = self.editor.serialize_content().len();
        format!("\"{name}\" written, {bytes}B")
    }

    fn list_tag(&self, name: &str) -> String {
        let ranges: Vec<String> = self
            .editor
            .ranges_of(name)
            .map(|r: Range| r.to_string())
            .collect();
        if ranges.is_empty() {
            format!("{name}: none")
        } else {
            format!("{name}: {}", ranges.join(", "))
        }
    }

    fn list_tag_names(&self) -> String {
        let names: Vec<&str> = self.editor.tags().names().collect();
        if names.is_empty() {
            "tags: none".to_string()
        } else {
            format!("tags: {}", names.join(", "))
        }
    }

    /// `:p` — the document with line numbers, then the status bar.
    fn print(&self) -> String {
        let buf = self.editor.buffer();
        let width = buf.line_count().to_string().len();
        let mut out = String::new();
        for line in 1..=buf.line_count() {
            let text = buf
                .line_content_len(line)
                .and_then(|len| {
                    buf.text_of(Range::new(Position::new(line, 0), Position::new(line, len)))
                        .ok()
                })
                .unwrap_or_default();
            out.push_str(&format!("{line:>width$} {text}\n"));
        }
        let modified = if self.editor.is_modified() { " [+]" } else { "" };
        out.push_str(&format!("{}{modified}", self.editor.cursor_text()));
        out
    }
}

const fn plural_es(count: usize) -> &'static str {
    if count == 1 { "" } else { "es" }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let editor = if args.len() > 1 {
        Editor::from_file(Path::new(&args[1])).unwrap_or_else(|e| {
            eprintln!("notepad: {}: {e}", args[1]);
            process::exit(1);
        })
    } else {
        Editor::new()
    };

    let mut shell = Shell::new(editor);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if let Err(e) = shell.run(stdin.lock(), &mut stdout) {
        eprintln!("notepad: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Helpers ───────────────────────────────────────────────────────────

    fn shell_with(text: &str) -> Shell {
        let mut editor = Editor::new();
        editor.load_content(text);
        Shell::new(editor)
    }

    /// Run a script through the shell and return everything it printed.
    fn session(shell: &mut Shell, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ── Commands ─────────────────────────────────────────────────────────

    #[test]
    fn insert_then_print() {
        let mut sh = shell_with("");
        assert_eq!(
            sh.execute(":i 1.0 hello\\nworld"),
            CommandResult::msg("Line: 2 | Column: 5")
        );
        assert_eq!(
            sh.execute(":p"),
            CommandResult::msg("1 hello\n2 world\nLine: 2 | Column: 5 [+]")
        );
    }

    #[test]
    fn delete_reports_count() {
        let mut sh = shell_with("hello world");
        assert_eq!(
            sh.execute(":d 1.11 1.5"),
            CommandResult::msg("6 chars deleted | Line: 1 | Column: 5")
        );
        assert_eq!(sh.editor.serialize_content(), "hello");
    }

    #[test]
    fn toggle_and_list_tags() {
        let mut sh = shell_with("hello world");
        assert_eq!(sh.execute(":b 1.0 1.5"), CommandResult::msg("bold on 1.0-1.5"));
        assert_eq!(sh.execute(":tags bold"), CommandResult::msg("bold: 1.0-1.5"));
        assert_eq!(sh.execute(":b 1.0 1.5"), CommandResult::msg("bold off 1.0-1.5"));
        assert_eq!(sh.execute(":tags bold"), CommandResult::msg("bold: none"));
    }

    #[test]
    fn list_tag_names_skips_emptied_tags() {
        let mut sh = shell_with("hello world");
        assert_eq!(sh.execute(":tags"), CommandResult::msg("tags: none"));
        sh.execute(":u 1.0 1.5");
        sh.execute(":tag strike 1.6 1.11");
        sh.execute(":find o");
        assert_eq!(
            sh.execute(":tags"),
            CommandResult::msg("tags: found, strike, underline")
        );
        sh.execute(":untag strike 1.0 1.11");
        assert_eq!(
            sh.execute(":tags"),
            CommandResult::msg("tags: found, underline")
        );
    }

    #[test]
    fn find_and_replace() {
        let mut sh = shell_with("cat and cat");
        assert_eq!(sh.execute(":find cat"), CommandResult::msg("2 matches"));
        assert_eq!(
            sh.execute(":tags found"),
            CommandResult::msg("found: 1.0-1.3, 1.8-1.11")
        );
        assert_eq!(sh.execute(":r cat dog"), CommandResult::msg("2 replacements"));
        assert_eq!(sh.execute(":tags found"), CommandResult::msg("found: none"));
        assert_eq!(sh.execute(":s/dog/cow/"), CommandResult::msg("2 replacements"));
        assert_eq!(sh.editor.serialize_content(), "cow and cow");
    }

    #[test]
    fn find_next_moves_cursor() {
        let mut sh = shell_with("a\nab");
        assert_eq!(
            sh.execute(":n b"),
            CommandResult::msg("found at 2.1 | Line: 2 | Column: 2")
        );
        assert_eq!(
            sh.execute(":n zz"),
            CommandResult::Err("Pattern not found: zz".into())
        );
    }

    #[test]
    fn bad_input_is_reported() {
        let mut sh = shell_with("abc");
        assert_eq!(
            sh.execute(":zap"),
            CommandResult::Err("Unknown command: zap".into())
        );
        assert!(matches!(sh.execute(":m 5.0"), CommandResult::Err(_)));
        assert!(matches!(sh.execute(":set fs=9999"), CommandResult::Err(_)));
    }

    #[test]
    fn quit_refused_while_modified() {
        let mut sh = shell_with("abc");
        assert_eq!(sh.execute(":q"), CommandResult::Quit);
        sh.execute(":i 1.0 x");
        assert!(matches!(sh.execute(":q"), CommandResult::Err(_)));
        assert_eq!(sh.execute(":q!"), CommandResult::Quit);
    }

    #[test]
    fn write_without_path_fails() {
        let mut sh = shell_with("abc");
        assert_eq!(sh.execute(":w"), CommandResult::Err("No file name".into()));
    }

    // ── Sessions ─────────────────────────────────────────────────────────

    #[test]
    fn session_edit_save_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memo.txt");
        std::fs::write(&path, "alpha\r\nbeta\r\n").unwrap();

        let mut sh = Shell::new(Editor::new());
        let script = format!(
            ":e {}\n:i 2.4 !\n:w\n:q\n:p\n",
            path.display()
        );
        let out = session(&mut sh, &script);
        assert!(out.starts_with("Notepad\n"));
        assert!(out.contains("\"memo.txt\" written, 14B"));
        // Output stops at :q.
        assert!(!out.contains("alpha"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "alpha\r\nbeta!\r\n"
        );
    }

    #[test]
    fn session_continues_after_errors() {
        let mut sh = shell_with("x");
        let out = session(&mut sh, ":bogus\n\n:set fs?\n");
        assert_eq!(
            out,
            "Notepad\nerror: Unknown command: bogus\nfontsize=12\n"
        );
    }
}
