use std::fmt::Write;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::attribute::{AccentPosition, FracStyle, MathVariant, ScriptPlacement, TextKind};
use super::config::Config;
use super::fmt::{child_indent, new_line_and_indent, push_number};
use super::html_utils::escape_html_content;

/// AST node
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Node<'arena> {
    /// `<mrow>...</mrow>`
    Row(&'arena [&'arena Node<'arena>]),
    /// `<mi>...</mi>` for a letter run, a Greek letter, a function name or an unknown command.
    Identifier { text: &'arena str, upright: bool },
    /// `<mn>...</mn>`
    Number(&'arena str),
    /// `<mo>...</mo>`
    Operator { text: &'arena str, large: bool },
    /// `<mtext>...</mtext>`, or an upright `<mi>` for operator names.
    Text { text: &'arena str, kind: TextKind },
    /// `<mfrac>...</mfrac>`
    Fraction {
        /// Numerator
        num: &'arena Node<'arena>,
        /// Denominator
        denom: &'arena Node<'arena>,
        style: FracStyle,
    },
    /// `<msqrt>...</msqrt>` or `<mroot>...</mroot>`
    Radical {
        body: &'arena Node<'arena>,
        index: Option<&'arena Node<'arena>>,
    },
    /// `<msub>`, `<msup>`, `<msubsup>`, `<munder>`, `<mover>` or `<munderover>`
    Scripted {
        base: &'arena Node<'arena>,
        sub: Option<&'arena Node<'arena>>,
        sup: Option<&'arena Node<'arena>>,
        placement: ScriptPlacement,
    },
    /// `<mover accent="true">...</mover>` or `<munder accentunder="true">...</munder>`
    Accent {
        body: &'arena Node<'arena>,
        accent: &'static str,
        position: AccentPosition,
    },
    /// A body between two (possibly empty) fence glyphs.
    Fenced {
        open: &'arena str,
        close: &'arena str,
        body: &'arena Node<'arena>,
    },
    /// `<mtable>...</mtable>`, fenced if either glyph is non-empty.
    Matrix {
        rows: &'arena [&'arena [&'arena Node<'arena>]],
        open: &'static str,
        close: &'static str,
    },
    /// `<mstyle mathvariant="...">...</mstyle>`
    Styled {
        variant: MathVariant,
        body: &'arena Node<'arena>,
    },
    /// `<mspace width="..."/>`, width in `em`.
    Space(f64),
    /// `<mphantom>...</mphantom>`
    Phantom(&'arena Node<'arena>),
    /// `<mspace linebreak="newline"/>`
    LineBreak,
}

static_assertions::const_assert!(
    std::mem::size_of::<Node<'static>>() <= 8 * std::mem::size_of::<usize>()
);

macro_rules! writeln_indent {
    ($buf:expr, $indent:expr, $($tail:tt)+) => {
        new_line_and_indent($buf, $indent);
        write!($buf, $($tail)+)?
    };
}

const FENCE_OPEN: &str = "<mo fence=\"true\" stretchy=\"true\" lspace=\"0em\" rspace=\"0em\">";

pub struct MathMLEmitter<'config> {
    s: String,
    config: &'config Config,
}

impl<'config> MathMLEmitter<'config> {
    #[inline]
    pub fn new(config: &'config Config) -> Self {
        Self {
            s: String::new(),
            config,
        }
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.s
    }

    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.s.push_str(s);
    }

    /// Appends `text` with `&`, `<` and `>` escaped.
    #[inline]
    pub fn push_escaped(&mut self, text: &str) {
        escape_html_content(&mut self.s, text);
    }

    /// Appends a number in its shortest form.
    #[inline]
    pub fn push_number(&mut self, value: f64) {
        push_number(&mut self.s, value);
    }

    #[inline]
    pub fn new_line_and_indent(&mut self, indent: usize) {
        new_line_and_indent(&mut self.s, indent);
    }

    pub fn emit(&mut self, node: &Node<'_>, base_indent: usize) -> std::fmt::Result {
        let child_indent = child_indent(base_indent);

        // Get the base indent out of the way.
        new_line_and_indent(&mut self.s, base_indent);

        match node {
            Node::Row(nodes) => {
                write!(self.s, "<mrow>")?;
                for node in nodes.iter() {
                    self.emit(node, child_indent)?;
                }
                writeln_indent!(&mut self.s, base_indent, "</mrow>");
            }
            Node::Identifier { text, upright } => {
                if *upright {
                    write!(self.s, "<mi mathvariant=\"normal\">")?;
                } else {
                    write!(self.s, "<mi>")?;
                }
                self.push_escaped(text);
                write!(self.s, "</mi>")?;
            }
            Node::Number(number) => {
                write!(self.s, "<mn>")?;
                self.push_escaped(number);
                write!(self.s, "</mn>")?;
            }
            Node::Operator { text, large } => {
                self.emit_operator(text, *large)?;
            }
            Node::Text { text, kind } => {
                let (open, close) = match kind {
                    TextKind::Text => ("<mtext>", "</mtext>"),
                    TextKind::OperatorName => ("<mi mathvariant=\"normal\">", "</mi>"),
                };
                write!(self.s, "{open}")?;
                self.push_escaped(text);
                write!(self.s, "{close}")?;
            }
            Node::Fraction { num, denom, style } => match style.displaystyle() {
                Some(displaystyle) => {
                    write!(self.s, "<mstyle displaystyle=\"{displaystyle}\">")?;
                    new_line_and_indent(&mut self.s, child_indent);
                    self.emit_fraction(num, denom, child_indent)?;
                    writeln_indent!(&mut self.s, base_indent, "</mstyle>");
                }
                None => self.emit_fraction(num, denom, base_indent)?,
            },
            Node::Radical { body, index } => match index {
                Some(index) => {
                    write!(self.s, "<mroot>")?;
                    self.emit(body, child_indent)?;
                    self.emit(index, child_indent)?;
                    writeln_indent!(&mut self.s, base_indent, "</mroot>");
                }
                None => {
                    write!(self.s, "<msqrt>")?;
                    self.emit(body, child_indent)?;
                    writeln_indent!(&mut self.s, base_indent, "</msqrt>");
                }
            },
            Node::Scripted {
                base,
                sub,
                sup,
                placement,
            } => {
                let tag = match (placement, sub.is_some(), sup.is_some()) {
                    (ScriptPlacement::SubSup, true, true) => "msubsup",
                    (ScriptPlacement::SubSup, true, false) => "msub",
                    (ScriptPlacement::SubSup, false, true) => "msup",
                    (ScriptPlacement::UnderOver, true, true) => "munderover",
                    (ScriptPlacement::UnderOver, true, false) => "munder",
                    (ScriptPlacement::UnderOver, false, true) => "mover",
                    (_, false, false) => "mrow",
                };
                write!(self.s, "<{tag}>")?;
                self.emit(base, child_indent)?;
                for script in [sub, sup].into_iter().flatten() {
                    self.emit(script, child_indent)?;
                }
                writeln_indent!(&mut self.s, base_indent, "</{tag}>");
            }
            Node::Accent {
                body,
                accent,
                position,
            } => {
                let (open, close) = match position {
                    AccentPosition::Over => ("<mover accent=\"true\">", "</mover>"),
                    AccentPosition::Under => ("<munder accentunder=\"true\">", "</munder>"),
                };
                write!(self.s, "{open}")?;
                self.emit(body, child_indent)?;
                writeln_indent!(&mut self.s, child_indent, "<mo accent=\"true\">");
                self.push_escaped(accent);
                write!(self.s, "</mo>")?;
                writeln_indent!(&mut self.s, base_indent, "{close}");
            }
            Node::Fenced { open, close, body } => {
                write!(self.s, "<mrow>")?;
                self.emit_fence_glyph(open, child_indent)?;
                self.emit_fence_padding(child_indent)?;
                self.emit(body, child_indent)?;
                self.emit_fence_padding(child_indent)?;
                self.emit_fence_glyph(close, child_indent)?;
                writeln_indent!(&mut self.s, base_indent, "</mrow>");
            }
            Node::Matrix { rows, open, close } => {
                if open.is_empty() && close.is_empty() {
                    self.emit_table(rows, base_indent)?;
                } else {
                    write!(self.s, "<mrow>")?;
                    self.emit_fence_glyph(open, child_indent)?;
                    self.emit_fence_padding(child_indent)?;
                    new_line_and_indent(&mut self.s, child_indent);
                    self.emit_table(rows, child_indent)?;
                    self.emit_fence_padding(child_indent)?;
                    self.emit_fence_glyph(close, child_indent)?;
                    writeln_indent!(&mut self.s, base_indent, "</mrow>");
                }
            }
            Node::Styled { variant, body } => {
                write!(
                    self.s,
                    "<mstyle mathvariant=\"{}\">",
                    <&str>::from(variant)
                )?;
                self.emit(body, child_indent)?;
                writeln_indent!(&mut self.s, base_indent, "</mstyle>");
            }
            Node::Space(width) => {
                write!(self.s, "<mspace width=\"")?;
                push_number(&mut self.s, *width);
                write!(self.s, "em\"/>")?;
            }
            Node::Phantom(body) => {
                write!(self.s, "<mphantom>")?;
                self.emit(body, child_indent)?;
                writeln_indent!(&mut self.s, base_indent, "</mphantom>");
            }
            Node::LineBreak => {
                write!(self.s, "<mspace linebreak=\"newline\"/>")?;
            }
        };
        Ok(())
    }

    fn emit_operator(&mut self, text: &str, large: bool) -> std::fmt::Result {
        write!(self.s, "<mo")?;
        if large {
            write!(self.s, " largeop=\"true\" movablelimits=\"true\"")?;
        }
        if self.config.use_operator_spacing && (large || has_spaced_glyph(text)) {
            write!(self.s, " lspace=\"")?;
            push_number(&mut self.s, self.config.operator_spacing);
            write!(self.s, "em\" rspace=\"")?;
            push_number(&mut self.s, self.config.operator_spacing);
            write!(self.s, "em\"")?;
        }
        write!(self.s, ">")?;
        self.push_escaped(text);
        write!(self.s, "</mo>")?;
        Ok(())
    }

    /// Writes an `<mfrac>` starting at the current position.
    fn emit_fraction(
        &mut self,
        num: &Node<'_>,
        denom: &Node<'_>,
        indent: usize,
    ) -> std::fmt::Result {
        write!(self.s, "<mfrac linethickness=\"")?;
        push_number(&mut self.s, self.config.frac_line_thickness);
        write!(self.s, "em\"")?;
        if let Some(align) = self.config.frac_num_align {
            write!(self.s, " numalign=\"{}\"", <&str>::from(align))?;
        }
        if let Some(align) = self.config.frac_denom_align {
            write!(self.s, " denomalign=\"{}\"", <&str>::from(align))?;
        }
        write!(self.s, ">")?;
        let child_indent = child_indent(indent);
        self.emit(num, child_indent)?;
        self.emit(denom, child_indent)?;
        writeln_indent!(&mut self.s, indent, "</mfrac>");
        Ok(())
    }

    fn emit_fence_glyph(&mut self, glyph: &str, indent: usize) -> std::fmt::Result {
        if glyph.is_empty() {
            return Ok(());
        }
        writeln_indent!(&mut self.s, indent, "{FENCE_OPEN}");
        self.push_escaped(glyph);
        write!(self.s, "</mo>")?;
        Ok(())
    }

    fn emit_fence_padding(&mut self, indent: usize) -> std::fmt::Result {
        let padding = self.config.fence_padding;
        if padding == 0.0 || padding.is_nan() {
            return Ok(());
        }
        writeln_indent!(&mut self.s, indent, "<mspace width=\"");
        push_number(&mut self.s, padding);
        write!(self.s, "em\"/>")?;
        Ok(())
    }

    /// Writes an `<mtable>` starting at the current position.
    fn emit_table(
        &mut self,
        rows: &[&[&Node<'_>]],
        base_indent: usize,
    ) -> std::fmt::Result {
        let row_indent = child_indent(base_indent);
        let cell_indent = child_indent(row_indent);
        let content_indent = child_indent(cell_indent);

        write!(self.s, "<mtable rowspacing=\"")?;
        push_number(&mut self.s, self.config.matrix_row_gap);
        write!(self.s, "em\" columnspacing=\"")?;
        push_number(&mut self.s, self.config.matrix_col_gap);
        write!(self.s, "em\">")?;
        for row in rows.iter() {
            writeln_indent!(&mut self.s, row_indent, "<mtr>");
            for cell in row.iter() {
                writeln_indent!(&mut self.s, cell_indent, "<mtd>");
                self.emit(cell, content_indent)?;
                writeln_indent!(&mut self.s, cell_indent, "</mtd>");
            }
            writeln_indent!(&mut self.s, row_indent, "</mtr>");
        }
        writeln_indent!(&mut self.s, base_indent, "</mtable>");
        Ok(())
    }
}

/// Ordinary operators only get explicit spacing if they contain one of these glyphs.
fn has_spaced_glyph(text: &str) -> bool {
    text.contains(['+', '-', '*', '/', '=', '<', '>', '∑', '∏', '∫'])
}
