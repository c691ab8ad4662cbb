//! Editor options — the `:set` system.
//!
//! Provides parsed `:set` directives, option name validation, and the
//! [`Options`] values they act on. The rendering collaborator reads the font
//! settings from here; the document model itself only consults `hlsearch`.
//!
//! # Supported syntax
//!
//! | Syntax           | Effect                        |
//! |------------------|-------------------------------|
//! | `:set option`    | Enable boolean / show value   |
//! | `:set nooption`  | Disable boolean               |
//! | `:set option!`   | Toggle boolean                |
//! | `:set option?`   | Query current value           |
//! | `:set option=V`  | Assign a value                |
//! | `:set`           | Show changed options          |
//! | `:set all`       | Show all options              |
//!
//! `font=` takes the rest of the line, so `:set font=Times New Roman` works.
//!
//! # Option names
//!
//! | Full name  | Abbrev | Type    | Default     |
//! |------------|--------|---------|-------------|
//! | `font`     | `fn`   | string  | `Helvetica` |
//! | `fontsize` | `fs`   | integer | 12          |
//! | `wrap`     |        | bool    | true        |
//! | `hlsearch` | `hls`  | bool    | true        |

use crate::error::EditorError;

/// Font sizes outside this range are rejected.
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u16> = 1..=512;

/// A parsed `:set` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetDirective {
    /// `:set option` — enable a boolean option.
    On(String),

    /// `:set nooption` — disable a boolean option.
    Off(String),

    /// `:set option!` — toggle a boolean option.
    Toggle(String),

    /// `:set option?` — query the current value.
    Query(String),

    /// `:set option=value` — assign a value.
    Assign(String, String),

    /// `:set` with no arguments — show changed options.
    ShowChanged,

    /// `:set all` — show all options.
    ShowAll,
}

/// Returns `true` if `name` is a known boolean option (full name or abbreviation).
#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    matches!(name, "wrap" | "hlsearch" | "hls")
}

/// Returns `true` if `name` is a known numeric option.
#[must_use]
pub fn is_numeric_option(name: &str) -> bool {
    matches!(name, "fontsize" | "fs")
}

/// Returns `true` if `name` is a known string option.
#[must_use]
pub fn is_string_option(name: &str) -> bool {
    matches!(name, "font" | "fn")
}

/// Returns `true` if `name` is any known option.
#[must_use]
pub fn is_known_option(name: &str) -> bool {
    is_bool_option(name) || is_numeric_option(name) || is_string_option(name)
}

/// Parse the full `:set` arguments string into directives.
///
/// Multiple space-separated arguments are supported (e.g., `:set nowrap fs=14`).
/// An empty argument string produces [`SetDirective::ShowChanged`].
#[must_use]
pub fn parse_set(args: &str) -> Vec<SetDirective> {
    let mut rest = args.trim();
    if rest.is_empty() {
        return vec![SetDirective::ShowChanged];
    }

    let mut directives = Vec::new();
    while !rest.is_empty() {
        let (arg, tail) = rest
            .split_once(char::is_whitespace)
            .unwrap_or((rest, ""));

        // A string assignment swallows the remainder of the line.
        if let Some((name, value)) = arg.split_once('=') {
            if is_string_option(name) {
                let value = format!("{value} {tail}");
                directives.push(SetDirective::Assign(
                    name.to_string(),
                    value.trim().to_string(),
                ));
                break;
            }
        }

        directives.push(parse_set_arg(arg));
        rest = tail.trim_start();
    }
    directives
}

/// Parse a single `:set` argument into a directive.
#[must_use]
pub fn parse_set_arg(arg: &str) -> SetDirective {
    if arg == "all" {
        return SetDirective::ShowAll;
    }

    if let Some((name, value)) = arg.split_once('=') {
        return SetDirective::Assign(name.to_string(), value.to_string());
    }

    if let Some(name) = arg.strip_suffix('?') {
        return SetDirective::Query(name.to_string());
    }

    if let Some(name) = arg.strip_suffix('!') {
        return SetDirective::Toggle(name.to_string());
    }

    // Negation: nooption — only if the remainder is a known boolean option.
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return SetDirective::Off(name.to_string());
        }
    }

    // Bare non-boolean option name = query its value (Vim behavior).
    if is_numeric_option(arg) || is_string_option(arg) {
        return SetDirective::Query(arg.to_string());
    }

    SetDirective::On(arg.to_string())
}

/// Format a boolean option for display (`:set` output).
///
/// Returns `"name"` when true, `"noname"` when false.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Current option values for one editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Font family handed to the renderer.
    pub font: String,
    /// Font size in points.
    pub font_size: u16,
    /// Soft-wrap long lines at word boundaries.
    pub wrap: bool,
    /// Tag search matches with `found`.
    pub hlsearch: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            font_size: 12,
            wrap: true,
            hlsearch: true,
        }
    }
}

impl Options {
    /// Apply one directive. Queries and listings return the text to show.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Option`] for unknown names, values of the wrong
    /// type, and out-of-range font sizes.
    pub fn apply(&mut self, directive: &SetDirective) -> Result<Option<String>, EditorError> {
        match directive {
            SetDirective::On(name) => self.set_bool(name, true).map(|()| None),
            SetDirective::Off(name) => self.set_bool(name, false).map(|()| None),
            SetDirective::Toggle(name) => {
                let current = self.get_bool(name)?;
                self.set_bool(name, !current).map(|()| None)
            }
            SetDirective::Query(name) => self.describe(name).map(Some),
            SetDirective::Assign(name, value) => self.assign(name, value).map(|()| None),
            SetDirective::ShowChanged => Ok(Some(self.changed())),
            SetDirective::ShowAll => Ok(Some(self.all())),
        }
    }

    fn get_bool(&self, name: &str) -> Result<bool, EditorError> {
        match name {
            "wrap" => Ok(self.wrap),
            "hlsearch" | "hls" => Ok(self.hlsearch),
            _ => Err(unknown_or_mistyped(name, "boolean")),
        }
    }

    fn set_bool(&mut self, name: &str, value: bool) -> Result<(), EditorError> {
        match name {
            "wrap" => self.wrap = value,
            "hlsearch" | "hls" => self.hlsearch = value,
            _ => return Err(unknown_or_mistyped(name, "boolean")),
        }
        Ok(())
    }

    fn assign(&mut self, name: &str, value: &str) -> Result<(), EditorError> {
        match name {
            "font" | "fn" => {
                if value.is_empty() {
                    return Err(EditorError::Option("font name cannot be empty".into()));
                }
                self.font = value.to_string();
            }
            "fontsize" | "fs" => {
                let size: u16 = value
                    .parse()
                    .map_err(|_| EditorError::Option(format!("invalid number: {value}")))?;
                if !FONT_SIZE_RANGE.contains(&size) {
                    return Err(EditorError::Option(format!(
                        "font size must be {}-{}",
                        FONT_SIZE_RANGE.start(),
                        FONT_SIZE_RANGE.end()
                    )));
                }
                self.font_size = size;
            }
            _ if is_bool_option(name) => {
                return Err(EditorError::Option(format!("{name} is a boolean option")));
            }
            _ => return Err(EditorError::Option(format!("unknown option: {name}"))),
        }
        Ok(())
    }

    fn describe(&self, name: &str) -> Result<String, EditorError> {
        match name {
            "font" | "fn" => Ok(format!("font={}", self.font)),
            "fontsize" | "fs" => Ok(format!("fontsize={}", self.font_size)),
            "wrap" => Ok(format_bool("wrap", self.wrap)),
            "hlsearch" | "hls" => Ok(format_bool("hlsearch", self.hlsearch)),
            _ => Err(EditorError::Option(format!("unknown option: {name}"))),
        }
    }

    fn all(&self) -> String {
        ["font", "fontsize", "wrap", "hlsearch"]
            .iter()
            .filter_map(|name| self.describe(name).ok())
            .collect::<Vec<_>>()
            .join("  ")
    }

    fn changed(&self) -> String {
        let defaults = Self::default();
        let mut parts = Vec::new();
        if self.font != defaults.font {
            parts.push(format!("font={}", self.font));
        }
        if self.font_size != defaults.font_size {
            parts.push(format!("fontsize={}", self.font_size));
        }
        if self.wrap != defaults.wrap {
            parts.push(format_bool("wrap", self.wrap));
        }
        if self.hlsearch != defaults.hlsearch {
            parts.push(format_bool("hlsearch", self.hlsearch));
        }
        parts.join("  ")
    }
}

fn unknown_or_mistyped(name: &str, expected: &str) -> EditorError {
    if is_known_option(name) {
        EditorError::Option(format!("{name} is not a {expected} option"))
    } else {
        EditorError::Option(format!("unknown option: {name}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── parse_set_arg ─────────────────────────────────────────────────────

    #[test]
    fn parse_boolean_on_off_toggle() {
        assert_eq!(parse_set_arg("wrap"), SetDirective::On("wrap".into()));
        assert_eq!(parse_set_arg("nowrap"), SetDirective::Off("wrap".into()));
        assert_eq!(parse_set_arg("nohls"), SetDirective::Off("hls".into()));
        assert_eq!(parse_set_arg("wrap!"), SetDirective::Toggle("wrap".into()));
    }

    #[test]
    fn parse_query_and_assign() {
        assert_eq!(parse_set_arg("wrap?"), SetDirective::Query("wrap".into()));
        assert_eq!(
            parse_set_arg("fs=14"),
            SetDirective::Assign("fs".into(), "14".into())
        );
    }

    #[test]
    fn parse_bare_value_option_is_query() {
        assert_eq!(parse_set_arg("fontsize"), SetDirective::Query("fontsize".into()));
        assert_eq!(parse_set_arg("font"), SetDirective::Query("font".into()));
    }

    #[test]
    fn parse_unknown_no_prefix_stays_on() {
        assert_eq!(parse_set_arg("nofoo"), SetDirective::On("nofoo".into()));
    }

    // ── parse_set ────────────────────────────────────────────────────────

    #[test]
    fn parse_empty_is_show_changed() {
        assert_eq!(parse_set(""), vec![SetDirective::ShowChanged]);
        assert_eq!(parse_set("   "), vec![SetDirective::ShowChanged]);
    }

    #[test]
    fn parse_multiple_args() {
        assert_eq!(
            parse_set("nowrap  fs=14 all"),
            vec![
                SetDirective::Off("wrap".into()),
                SetDirective::Assign("fs".into(), "14".into()),
                SetDirective::ShowAll,
            ]
        );
    }

    #[test]
    fn font_takes_rest_of_line() {
        assert_eq!(
            parse_set("nowrap font=Times New Roman "),
            vec![
                SetDirective::Off("wrap".into()),
                SetDirective::Assign("font".into(), "Times New Roman".into()),
            ]
        );
    }

    // ── Options::apply ───────────────────────────────────────────────────

    #[test]
    fn apply_bool_directives() {
        let mut o = Options::default();
        o.apply(&SetDirective::Off("wrap".into())).unwrap();
        assert!(!o.wrap);
        o.apply(&SetDirective::Toggle("hls".into())).unwrap();
        assert!(!o.hlsearch);
        o.apply(&SetDirective::On("hlsearch".into())).unwrap();
        assert!(o.hlsearch);
    }

    #[test]
    fn apply_assignments() {
        let mut o = Options::default();
        o.apply(&SetDirective::Assign("fs".into(), "16".into())).unwrap();
        o.apply(&SetDirective::Assign("font".into(), "Courier New".into()))
            .unwrap();
        assert_eq!(o.font_size, 16);
        assert_eq!(o.font, "Courier New");
    }

    #[test]
    fn apply_rejects_bad_values() {
        let mut o = Options::default();
        for bad in [
            SetDirective::Assign("fs".into(), "big".into()),
            SetDirective::Assign("fs".into(), "0".into()),
            SetDirective::Assign("fs".into(), "9000".into()),
            SetDirective::Assign("font".into(), String::new()),
            SetDirective::Assign("wrap".into(), "1".into()),
            SetDirective::On("fontsize".into()),
            SetDirective::On("bogus".into()),
            SetDirective::Query("bogus".into()),
        ] {
            assert!(
                matches!(o.apply(&bad), Err(EditorError::Option(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(o, Options::default());
    }

    #[test]
    fn query_and_listings() {
        let mut o = Options::default();
        assert_eq!(
            o.apply(&SetDirective::Query("fs".into())).unwrap(),
            Some("fontsize=12".into())
        );
        assert_eq!(o.apply(&SetDirective::ShowChanged).unwrap(), Some(String::new()));

        o.apply(&SetDirective::Off("wrap".into())).unwrap();
        assert_eq!(
            o.apply(&SetDirective::ShowChanged).unwrap(),
            Some("nowrap".into())
        );
        assert_eq!(
            o.apply(&SetDirective::ShowAll).unwrap(),
            Some("font=Helvetica  fontsize=12  nowrap  hlsearch".into())
        );
    }

    #[test]
    fn format_bool_on_off() {
        assert_eq!(format_bool("wrap", true), "wrap");
        assert_eq!(format_bool("wrap", false), "nowrap");
    }
}
