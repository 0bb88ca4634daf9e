/// A position in the input, used to undo a lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint(usize);

/// Position-tracked view over the source string.
///
/// The position always sits on a char boundary and only moves forward, except through
/// [`Cursor::restore`].
#[derive(Debug)]
pub(crate) struct Cursor<'source> {
    input: &'source str,
    pos: usize,
}

impl<'source> Cursor<'source> {
    pub(crate) fn new(input: &'source str) -> Self {
        Cursor { input, pos: 0 }
    }

    /// The not yet consumed part of the input.
    #[inline]
    fn rest(&self) -> &'source str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consumes one character and returns it as a slice of the input.
    ///
    /// Returns the empty string at the end of the input.
    pub(crate) fn next_char_str(&mut self) -> &'source str {
        let start = self.pos;
        self.next();
        self.input.get(start..self.pos).unwrap_or_default()
    }

    #[inline]
    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consumes `ch` if it is the next character.
    pub(crate) fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `prefix` if the input continues with it.
    pub(crate) fn eat_str(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Whether the input continues with the command `\name`.
    ///
    /// `\right` is not found in `\rightarrow`.
    pub(crate) fn at_command(&self, name: &str) -> bool {
        let Some(after) = self
            .rest()
            .strip_prefix('\\')
            .and_then(|rest| rest.strip_prefix(name))
        else {
            return false;
        };
        !after.starts_with(|ch: char| ch.is_ascii_alphabetic())
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next();
        }
    }

    /// Reads a command name after a `\`.
    ///
    /// The name is either a run of ASCII letters or exactly one other character. A doubled
    /// backslash yields the name `\`, and a backslash at the end of the input yields the empty
    /// name.
    pub(crate) fn read_command(&mut self) -> &'source str {
        if !self.eat('\\') {
            return "";
        }
        let start = self.pos;
        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() => {
                while self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
                    self.next();
                }
                self.input.get(start..self.pos).unwrap_or_default()
            }
            _ => self.next_char_str(),
        }
    }

    /// Reads a brace group verbatim and returns the text between the outer braces.
    ///
    /// Inner braces are kept. If no `{` follows (after whitespace), nothing is consumed and the
    /// empty string is returned. An unclosed group extends to the end of the input.
    pub(crate) fn read_raw_group(&mut self) -> &'source str {
        self.skip_whitespace();
        if !self.eat('{') {
            return "";
        }
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(ch) = self.next() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        // The closing brace is one byte long.
                        return self.input.get(start..self.pos - 1).unwrap_or_default();
                    }
                }
                _ => {}
            }
        }
        self.input.get(start..).unwrap_or_default()
    }

    /// Consumes and returns everything that is left.
    pub(crate) fn take_rest(&mut self) -> &'source str {
        let rest = self.rest();
        self.pos = self.input.len();
        rest
    }

    #[inline]
    pub(crate) fn save(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    #[inline]
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0;
    }

    /// The input consumed since `checkpoint`.
    pub(crate) fn since(&self, checkpoint: Checkpoint) -> &'source str {
        self.input.get(checkpoint.0..self.pos).unwrap_or_default()
    }
}
