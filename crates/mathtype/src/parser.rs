use bitflags::bitflags;

use mathml_renderer::{
    arena::Arena,
    ast::Node,
    attribute::{FracStyle, ScriptPlacement, TextKind},
    config::Config,
};

use crate::commands::{self, Symbol};
use crate::cursor::Cursor;
use crate::environments::Env;

/// How many atoms may be nested inside each other before the rest of the input is taken
/// verbatim.
pub(crate) const MAX_NESTING: usize = 128;

static EMPTY_ROW: Node<'static> = Node::Row(&[]);

bitflags! {
    /// The tokens at which an expression ends.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct StopAt: u8 {
        /// `}`
        const GROUP_END = 1;
        /// `]`, for the index of a radical.
        const BRACKET_END = 1 << 1;
        /// `&`
        const COLUMN = 1 << 2;
        /// `\\`
        const ROW = 1 << 3;
        /// `\right`
        const RIGHT = 1 << 4;
        /// `\end{name}` for the name of the open environment.
        const ENV_END = 1 << 5;
    }
}

pub(crate) struct Parser<'config, 'arena, 'source> {
    pub(crate) cursor: Cursor<'source>,
    pub(crate) arena: &'arena Arena,
    config: &'config Config,
    depth: usize,
}

impl<'config, 'arena, 'source> Parser<'config, 'arena, 'source>
where
    'source: 'arena, // The reference to the source string will live as long as the arena.
{
    pub(crate) fn new(source: &'source str, arena: &'arena Arena, config: &'config Config) -> Self {
        Parser {
            cursor: Cursor::new(source),
            arena,
            config,
            depth: 0,
        }
    }

    /// Parses the whole input.
    #[inline]
    pub(crate) fn parse(&mut self) -> &'arena Node<'arena> {
        self.parse_expression(StopAt::empty(), None)
    }

    /// Collects atoms until the input ends or one of the `stop` tokens comes up.
    ///
    /// `env` is the name of the environment whose `\end` is looked for with
    /// [`StopAt::ENV_END`]. A single atom is returned as is, everything else as a row.
    pub(crate) fn parse_expression(
        &mut self,
        stop: StopAt,
        env: Option<&str>,
    ) -> &'arena Node<'arena> {
        let mut nodes = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() || self.at_stop(stop, env) {
                break;
            }
            match self.parse_atom() {
                Some(atom) => nodes.push(self.parse_scripts(atom)),
                None => {
                    if let Some(node) = self.parse_stray() {
                        nodes.push(node);
                    }
                }
            }
        }
        match nodes.as_slice() {
            [single] => *single,
            _ => self.arena.push(Node::Row(self.arena.push_slice(&nodes))),
        }
    }

    fn at_stop(&mut self, stop: StopAt, env: Option<&str>) -> bool {
        let Some(ch) = self.cursor.peek() else {
            return true;
        };
        (stop.contains(StopAt::GROUP_END) && ch == '}')
            || (stop.contains(StopAt::BRACKET_END) && ch == ']')
            || (stop.contains(StopAt::COLUMN) && ch == '&')
            || (stop.contains(StopAt::ROW) && self.cursor.starts_with("\\\\"))
            || (stop.contains(StopAt::RIGHT) && self.cursor.at_command("right"))
            || (stop.contains(StopAt::ENV_END) && env.is_some_and(|env| self.at_env_end(env)))
    }

    /// Whether the input continues with `\end{env}`.
    fn at_env_end(&mut self, env: &str) -> bool {
        if !self.cursor.at_command("end") {
            return false;
        }
        let checkpoint = self.cursor.save();
        self.cursor.read_command();
        let name = self.cursor.read_raw_group();
        self.cursor.restore(checkpoint);
        name == env
    }

    /// Parses one atom, without scripts.
    ///
    /// Returns `None` without consuming anything if the input continues with a token that
    /// ends or attaches to something: `}`, `^`, `_`, `&`, `\\`, `\right` or `\end`.
    fn parse_atom(&mut self) -> Option<&'arena Node<'arena>> {
        let ch = self.cursor.peek()?;
        match ch {
            '}' | '^' | '_' | '&' => return None,
            '\\' if self.cursor.starts_with("\\\\")
                || self.cursor.at_command("right")
                || self.cursor.at_command("end") =>
            {
                return None;
            }
            _ => {}
        }
        Some(self.nested(|p| match ch {
            '{' => p.parse_group(),
            '\\' => p.parse_command(),
            '0'..='9' => p.parse_number(),
            ch if ch.is_ascii_alphabetic() => p.parse_identifier(),
            _ => {
                let text = p.cursor.next_char_str();
                p.arena.push(Node::Operator { text, large: false })
            }
        }))
    }

    /// Runs `parse` one level deeper, unless the nesting limit has been reached.
    ///
    /// Past the limit, the rest of the input becomes a text node.
    fn nested<F>(&mut self, parse: F) -> &'arena Node<'arena>
    where
        F: FnOnce(&mut Self) -> &'arena Node<'arena>,
    {
        if self.depth >= MAX_NESTING {
            let text = self.cursor.take_rest();
            log::warn!(
                "nesting deeper than {MAX_NESTING} levels; taking {} bytes verbatim",
                text.len()
            );
            return self.arena.push(Node::Text {
                text,
                kind: TextKind::Text,
            });
        }
        self.depth += 1;
        let node = parse(self);
        self.depth -= 1;
        node
    }

    /// Consumes a structural token that no enclosing construct is waiting for.
    fn parse_stray(&mut self) -> Option<&'arena Node<'arena>> {
        match self.cursor.peek()? {
            '^' | '_' => Some(self.parse_scripts(&EMPTY_ROW)),
            '&' => {
                let text = self.cursor.next_char_str();
                Some(self.arena.push(Node::Operator { text, large: false }))
            }
            '\\' if self.cursor.eat_str("\\\\") => Some(self.arena.push(Node::LineBreak)),
            '\\' if self.cursor.at_command("end") => {
                self.cursor.read_command();
                // The name goes with the marker, so nothing of a dangling `\end{..}` shows up in
                // the output.
                let name = self.cursor.read_raw_group();
                log::debug!("ignoring \\end{{{name}}} without \\begin");
                None
            }
            '\\' => {
                // `\right` without `\left`; its delimiter is parsed as ordinary content.
                self.cursor.read_command();
                None
            }
            _ => {
                // A `}` without `{`.
                self.cursor.next();
                None
            }
        }
    }

    /// Attaches any `_` and `^` that follow `base`.
    ///
    /// Each kind of script is taken at most once; a repeated marker is left for the caller.
    fn parse_scripts(&mut self, base: &'arena Node<'arena>) -> &'arena Node<'arena> {
        let mut sub = None;
        let mut sup = None;
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some('_') if sub.is_none() => {
                    self.cursor.next();
                    sub = Some(self.parse_required_arg());
                }
                Some('^') if sup.is_none() => {
                    self.cursor.next();
                    sup = Some(self.parse_required_arg());
                }
                _ => break,
            }
        }
        if sub.is_none() && sup.is_none() {
            return base;
        }
        let placement = if matches!(base, Node::Operator { large: true, .. })
            && self.config.use_munderover
        {
            ScriptPlacement::UnderOver
        } else {
            ScriptPlacement::SubSup
        };
        self.arena.push(Node::Scripted {
            base,
            sub,
            sup,
            placement,
        })
    }

    /// A brace group, or else a single atom. A missing argument is an empty row.
    fn parse_required_arg(&mut self) -> &'arena Node<'arena> {
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some('{') {
            self.nested(Self::parse_group)
        } else {
            self.parse_atom().unwrap_or(&EMPTY_ROW)
        }
    }

    /// Parses `{...}`. An unclosed group ends with the input.
    fn parse_group(&mut self) -> &'arena Node<'arena> {
        self.cursor.eat('{');
        let content = self.parse_expression(StopAt::GROUP_END, None);
        self.cursor.eat('}');
        content
    }

    /// A run of digits, optionally followed by `.` and another run of digits.
    fn parse_number(&mut self) -> &'arena Node<'arena> {
        let start = self.cursor.save();
        self.skip_while(|ch| ch.is_ascii_digit());
        if self.cursor.eat('.') {
            self.skip_while(|ch| ch.is_ascii_digit());
        }
        self.arena.push(Node::Number(self.cursor.since(start)))
    }

    /// A run of ASCII letters is one identifier.
    fn parse_identifier(&mut self) -> &'arena Node<'arena> {
        let start = self.cursor.save();
        self.skip_while(|ch| ch.is_ascii_alphabetic());
        self.arena.push(Node::Identifier {
            text: self.cursor.since(start),
            upright: false,
        })
    }

    fn skip_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.cursor.peek().is_some_and(&predicate) {
            self.cursor.next();
        }
    }

    fn parse_command(&mut self) -> &'arena Node<'arena> {
        let name = self.cursor.read_command();
        match name {
            "" => &EMPTY_ROW,
            "frac" => self.parse_fraction(FracStyle::Inherit),
            "dfrac" => self.parse_fraction(FracStyle::Display),
            "tfrac" => self.parse_fraction(FracStyle::Text),
            "sqrt" => self.parse_radical(),
            "left" => self.parse_fenced(),
            "begin" => self.parse_environment(),
            "text" => self.parse_text(TextKind::Text),
            "operatorname" => self.parse_text(TextKind::OperatorName),
            "phantom" => {
                let body = self.parse_required_arg();
                self.arena.push(Node::Phantom(body))
            }
            "," => self.space(self.config.thin_space),
            ":" => self.space(self.config.medium_space),
            ";" => self.space(self.config.thick_space),
            "!" => self.space(-self.config.thin_space),
            "quad" => self.space(self.config.quad),
            "qquad" => self.space(self.config.qquad),
            name => self.parse_symbol(name),
        }
    }

    /// Commands that are looked up in the tables.
    fn parse_symbol(&mut self, name: &'source str) -> &'arena Node<'arena> {
        if let Some(variant) = commands::style(name) {
            let body = self.parse_required_arg();
            return self.arena.push(Node::Styled { variant, body });
        }
        if let Some((accent, position)) = commands::accent(name) {
            let body = self.parse_required_arg();
            return self.arena.push(Node::Accent {
                body,
                accent,
                position,
            });
        }
        let node = match commands::lookup(name) {
            Some(Symbol::Greek(letter)) => Node::Identifier {
                text: letter,
                upright: false,
            },
            Some(Symbol::Operator(op)) => Node::Operator {
                text: op,
                large: false,
            },
            Some(Symbol::LargeOperator(op)) => Node::Operator {
                text: op,
                large: true,
            },
            Some(Symbol::Function) => Node::Identifier {
                text: name,
                upright: true,
            },
            None if commands::is_escaped_literal(name) => Node::Operator {
                text: name,
                large: false,
            },
            None => {
                log::debug!("unknown command \\{name}");
                Node::Identifier {
                    text: name,
                    upright: false,
                }
            }
        };
        self.arena.push(node)
    }

    fn space(&self, width: f64) -> &'arena Node<'arena> {
        self.arena.push(Node::Space(width))
    }

    fn parse_fraction(&mut self, style: FracStyle) -> &'arena Node<'arena> {
        let num = self.parse_required_arg();
        let denom = self.parse_required_arg();
        self.arena.push(Node::Fraction { num, denom, style })
    }

    fn parse_radical(&mut self) -> &'arena Node<'arena> {
        self.cursor.skip_whitespace();
        let index = if self.cursor.eat('[') {
            let index = self.parse_expression(StopAt::BRACKET_END, None);
            self.cursor.eat(']');
            Some(index)
        } else {
            None
        };
        let body = self.parse_required_arg();
        self.arena.push(Node::Radical { body, index })
    }

    /// Parses the rest of `\left<delim> ... \right<delim>`.
    ///
    /// Without `\right`, the body extends to the end of the input and the closing glyph is
    /// empty.
    fn parse_fenced(&mut self) -> &'arena Node<'arena> {
        let open = self.parse_delimiter();
        let body = self.parse_expression(StopAt::RIGHT, None);
        let close = if self.cursor.at_command("right") {
            self.cursor.read_command();
            self.parse_delimiter()
        } else {
            ""
        };
        self.arena.push(Node::Fenced { open, close, body })
    }

    /// Reads the glyph after `\left` or `\right`.
    ///
    /// For a command that does not name a delimiter, the backslash alone is the glyph and the
    /// command name is left to be parsed as content.
    fn parse_delimiter(&mut self) -> &'source str {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => "",
            Some('\\') => {
                let checkpoint = self.cursor.save();
                let name = self.cursor.read_command();
                if let Some(glyph) = commands::named_delimiter(name) {
                    return glyph;
                }
                self.cursor.restore(checkpoint);
                self.cursor.next_char_str()
            }
            Some(_) => commands::literal_delimiter(self.cursor.next_char_str()),
        }
    }

    fn parse_environment(&mut self) -> &'arena Node<'arena> {
        let name = self.cursor.read_raw_group();
        if name.is_empty() {
            return &EMPTY_ROW;
        }
        if let Some(env) = Env::from_name(name) {
            if env.has_column_spec() {
                self.cursor.read_raw_group();
            }
            return self.parse_matrix(env);
        }
        log::debug!("unknown environment {name:?}; parsing its body as an expression");
        let content = self.parse_expression(StopAt::ENV_END, Some(name));
        if self.cursor.at_command("end") {
            self.cursor.read_command();
            self.cursor.read_raw_group();
        }
        content
    }

    /// `\text{...}` and `\operatorname{...}` keep their argument verbatim.
    fn parse_text(&mut self, kind: TextKind) -> &'arena Node<'arena> {
        let text = self.cursor.read_raw_group();
        self.arena.push(Node::Text { text, kind })
    }
}
