//! Line-prefix aware output buffer
//!
//! Containers (list items, block quotes) don't re-indent their content after
//! the fact. Instead they push a [`LinePrefix`] and every line written while it
//! is active starts with the accumulated prefixes. Blank lines get the
//! prefixes with trailing whitespace trimmed, so the output never carries
//! trailing spaces from indentation.

use std::fmt;

#[derive(Debug)]
struct LinePrefix {
    /// Written at the start of the first line (e.g. a list marker).
    first: String,
    /// Written at the start of every later line.
    rest: String,
    first_used: bool,
}

#[derive(Debug, Default)]
pub(crate) struct Emitter {
    buf: String,
    prefixes: Vec<LinePrefix>,
    at_line_start: bool,
    /// Byte offset in `buf` where the current line's content begins, past
    /// any prefixes.
    content_start: usize,
    last_output_len: usize,
}

impl Emitter {
    pub(crate) fn new() -> Self {
        Emitter {
            at_line_start: true,
            ..Default::default()
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Byte length of the most recent write.
    pub(crate) fn last_output_len(&self) -> usize {
        self.last_output_len
    }

    /// Content of the current, unfinished line without its prefixes.
    pub(crate) fn current_line(&self) -> &str {
        if self.at_line_start {
            ""
        } else {
            &self.buf[self.content_start..]
        }
    }

    pub(crate) fn push_prefix(&mut self, first: impl Into<String>, rest: impl Into<String>) {
        self.prefixes.push(LinePrefix {
            first: first.into(),
            rest: rest.into(),
            first_used: false,
        });
    }

    /// Pops the innermost prefix. Returns its first-line text when no line
    /// was ever written under it, so the caller can still emit it.
    pub(crate) fn pop_prefix(&mut self) -> Option<String> {
        let prefix = self.prefixes.pop()?;
        (!prefix.first_used).then_some(prefix.first)
    }

    pub(crate) fn write(&mut self, s: &str) {
        self.last_output_len = s.len();
        for piece in s.split_inclusive('\n') {
            if self.at_line_start {
                if piece == "\n" {
                    self.write_blank_prefix();
                } else {
                    self.write_line_prefix();
                }
                self.content_start = self.buf.len();
            }
            self.buf.push_str(piece);
            self.at_line_start = piece.ends_with('\n');
        }
    }

    /// Terminates the current line unless it is already terminated.
    pub(crate) fn ensure_newline(&mut self) {
        if !self.at_line_start {
            self.write("\n");
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }

    fn write_line_prefix(&mut self) {
        for prefix in &mut self.prefixes {
            if prefix.first_used {
                self.buf.push_str(&prefix.rest);
            } else {
                self.buf.push_str(&prefix.first);
                prefix.first_used = true;
            }
        }
    }

    fn write_blank_prefix(&mut self) {
        let start = self.buf.len();
        for prefix in &self.prefixes {
            self.buf.push_str(&prefix.rest);
        }
        let trimmed = self.buf[start..].trim_end().len();
        self.buf.truncate(start + trimmed);
    }
}

impl fmt::Write for Emitter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}
