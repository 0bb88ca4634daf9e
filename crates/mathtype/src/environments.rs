use strum_macros::IntoStaticStr;

use mathml_renderer::ast::Node;

use crate::parser::{Parser, StopAt};

/// Environments that are laid out as a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub(crate) enum Env {
    #[strum(serialize = "matrix")]
    Matrix,
    #[strum(serialize = "pmatrix")]
    PMatrix,
    #[strum(serialize = "bmatrix")]
    BMatrix,
    #[strum(serialize = "Bmatrix")]
    Bmatrix,
    #[strum(serialize = "vmatrix")]
    VMatrix,
    #[strum(serialize = "Vmatrix")]
    Vmatrix,
    #[strum(serialize = "cases")]
    Cases,
    #[strum(serialize = "aligned")]
    Aligned,
    #[strum(serialize = "array")]
    Array,
    #[strum(serialize = "align")]
    Align,
    #[strum(serialize = "align*")]
    AlignStar,
    #[strum(serialize = "gathered")]
    Gathered,
}

impl Env {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        ENVIRONMENTS.get(name).copied()
    }

    /// `array` takes a column specification, which is read and discarded.
    #[inline]
    pub(crate) fn has_column_spec(self) -> bool {
        matches!(self, Env::Array)
    }

    /// Opening and closing fence glyphs; empty means no fence.
    pub(crate) fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            Env::PMatrix => ("(", ")"),
            Env::BMatrix => ("[", "]"),
            Env::Bmatrix => ("{", "}"),
            Env::VMatrix => ("|", "|"),
            Env::Vmatrix => ("‖", "‖"),
            Env::Cases => ("{", ""),
            Env::Matrix
            | Env::Aligned
            | Env::Array
            | Env::Align
            | Env::AlignStar
            | Env::Gathered => ("", ""),
        }
    }
}

static ENVIRONMENTS: phf::Map<&'static str, Env> = phf::phf_map! {
    "matrix" => Env::Matrix,
    "pmatrix" => Env::PMatrix,
    "bmatrix" => Env::BMatrix,
    "Bmatrix" => Env::Bmatrix,
    "vmatrix" => Env::VMatrix,
    "Vmatrix" => Env::Vmatrix,
    "cases" => Env::Cases,
    "aligned" => Env::Aligned,
    "array" => Env::Array,
    "align" => Env::Align,
    "align*" => Env::AlignStar,
    "gathered" => Env::Gathered,
};

impl<'arena, 'source> Parser<'_, 'arena, 'source>
where
    'source: 'arena,
{
    /// Parses the cells of a tabular environment up to and including `\end{...}`.
    ///
    /// Cells are separated by `&` and rows by `\\`. The row in progress is kept when the
    /// environment is closed or the input runs out, so rows may differ in length.
    pub(crate) fn parse_matrix(&mut self, env: Env) -> &'arena Node<'arena> {
        let name: &'static str = env.into();
        let stop = StopAt::COLUMN | StopAt::ROW | StopAt::ENV_END;
        let mut rows = Vec::new();
        let mut row = Vec::new();

        while !self.cursor.is_eof() {
            row.push(self.parse_expression(stop, Some(name)));
            if self.cursor.eat('&') {
                continue;
            }
            if self.cursor.eat_str("\\\\") {
                rows.push(self.arena.push_slice(&row));
                row.clear();
                continue;
            }
            if self.cursor.at_command("end") {
                self.cursor.read_command();
                self.cursor.read_raw_group();
                break;
            }
        }
        if !row.is_empty() {
            rows.push(self.arena.push_slice(&row));
        }

        let (open, close) = env.glyphs();
        self.arena.push(Node::Matrix {
            rows: self.arena.push_rows(&rows),
            open,
            close,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in ["matrix", "pmatrix", "Bmatrix", "cases", "array", "align*"] {
            let env = Env::from_name(name).unwrap();
            assert_eq!(<&str>::from(env), name);
        }
        assert_eq!(Env::from_name("equation"), None);
        assert_eq!(Env::from_name(""), None);
    }

    #[test]
    fn glyphs() {
        assert_eq!(Env::PMatrix.glyphs(), ("(", ")"));
        assert_eq!(Env::Vmatrix.glyphs(), ("‖", "‖"));
        assert_eq!(Env::Cases.glyphs(), ("{", ""));
        assert_eq!(Env::Aligned.glyphs(), ("", ""));
        assert!(Env::Array.has_column_spec());
        assert!(!Env::Matrix.has_column_spec());
    }
}
