//! Formatting of diagnostic text.
//!
//! Response bodies and similar payloads are frequently logged; when they span
//! several lines, writing them verbatim makes the log hard to read. The helpers
//! here wrap such text in recognisable delimiters and indent continuation lines.

const NEW_LINE_CHARACTERS: [char; 2] = ['\r', '\n'];

/// Delimiters used by [`format_multi_line_with`].
///
/// # Example
///
/// ```rust
/// use apikit::text::{MultiLineFormat, format_multi_line_with};
///
/// let format = MultiLineFormat::default().with_prefix("[").with_suffix("]");
/// assert_eq!(format_multi_line_with("single", &format), "[single]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLineFormat {
    /// Text placed before the formatted content.
    pub prefix: String,
    /// Text placed after the formatted content.
    pub suffix: String,
    /// Text placed before every line when the content spans several lines.
    pub separator: String,
}

impl Default for MultiLineFormat {
    fn default() -> Self {
        Self {
            prefix: "<<".to_owned(),
            suffix: ">>".to_owned(),
            separator: "\n  ".to_owned(),
        }
    }
}

impl MultiLineFormat {
    /// Sets the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the suffix.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the line separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Formats text using the default delimiters (`<<`, `>>` and `"\n  "`).
///
/// See [`format_multi_line_with`] for the exact rules.
#[must_use]
pub fn format_multi_line(text: &str) -> String {
    format_multi_line_with(text, &MultiLineFormat::default())
}

/// Formats text, with extra handling when it spans several lines.
///
/// Trailing line breaks are discarded and `\r\n` pairs count as a single
/// break. Text that fits on one line is rendered as `prefix + text + suffix`.
/// Otherwise every line is preceded by the separator and the suffix is placed
/// on a line of its own:
///
/// ```rust
/// use apikit::format_multi_line;
///
/// assert_eq!(format_multi_line("one\r\ntwo\n"), "<<\n  one\n  two\n>>");
/// ```
#[must_use]
pub fn format_multi_line_with(text: &str, format: &MultiLineFormat) -> String {
    let text = text.trim_end_matches(NEW_LINE_CHARACTERS).replace("\r\n", "\n");
    let lines: Vec<&str> = text.split(NEW_LINE_CHARACTERS).collect();
    match lines.as_slice() {
        [] => format!("{}{}", format.prefix, format.suffix),
        [line] => format!("{}{line}{}", format.prefix, format.suffix),
        _ => format!(
            "{}{}{}\n{}",
            format.prefix,
            format.separator,
            lines.join(format.separator.as_str()),
            format.suffix
        ),
    }
}
