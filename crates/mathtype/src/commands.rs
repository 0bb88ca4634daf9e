use mathml_renderer::attribute::{AccentPosition, MathVariant};

/// What a command that is not structural stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    /// A Greek letter, rendered as an identifier.
    Greek(&'static str),
    /// A symbol or relation, rendered as an operator.
    Operator(&'static str),
    /// A big operator like `\sum`.
    LargeOperator(&'static str),
    /// A function name like `\sin`, rendered upright under its own name.
    Function,
}

/// Looks up a command in the symbol tables, in order of precedence.
pub(crate) fn lookup(name: &str) -> Option<Symbol> {
    if let Some(&letter) = GREEK.get(name) {
        return Some(Symbol::Greek(letter));
    }
    if let Some(&op) = SYMBOLS.get(name) {
        return Some(Symbol::Operator(op));
    }
    if let Some(&op) = LARGE_OPERATORS.get(name) {
        return Some(Symbol::LargeOperator(op));
    }
    if FUNCTIONS.contains(name) {
        return Some(Symbol::Function);
    }
    None
}

/// Characters that stand for themselves when escaped with a backslash.
#[inline]
pub(crate) fn is_escaped_literal(name: &str) -> bool {
    matches!(name, "{" | "}" | "#" | "%" | "$")
}

/// The glyph of a delimiter given as a command, e.g. `\langle`.
#[inline]
pub(crate) fn named_delimiter(name: &str) -> Option<&'static str> {
    NAMED_DELIMITERS.get(name).copied()
}

/// The glyph of a delimiter given as a plain character; `.` means "no delimiter".
#[inline]
pub(crate) fn literal_delimiter(ch: &str) -> &str {
    if ch == "." { "" } else { ch }
}

#[inline]
pub(crate) fn accent(name: &str) -> Option<(&'static str, AccentPosition)> {
    ACCENTS.get(name).copied()
}

#[inline]
pub(crate) fn style(name: &str) -> Option<MathVariant> {
    STYLES.get(name).copied()
}

static GREEK: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "alpha" => "α",
    "beta" => "β",
    "gamma" => "γ",
    "delta" => "δ",
    "epsilon" => "ε",
    "varepsilon" => "ϵ",
    "zeta" => "ζ",
    "eta" => "η",
    "theta" => "θ",
    "vartheta" => "ϑ",
    "iota" => "ι",
    "kappa" => "κ",
    "lambda" => "λ",
    "mu" => "μ",
    "nu" => "ν",
    "xi" => "ξ",
    "omicron" => "ο",
    "pi" => "π",
    "varpi" => "ϖ",
    "rho" => "ρ",
    "varrho" => "ϱ",
    "sigma" => "σ",
    "varsigma" => "ς",
    "tau" => "τ",
    "upsilon" => "υ",
    "phi" => "φ",
    "varphi" => "ϕ",
    "chi" => "χ",
    "psi" => "ψ",
    "omega" => "ω",
    "Gamma" => "Γ",
    "Delta" => "Δ",
    "Theta" => "Θ",
    "Lambda" => "Λ",
    "Xi" => "Ξ",
    "Pi" => "Π",
    "Sigma" => "Σ",
    "Upsilon" => "Υ",
    "Phi" => "Φ",
    "Psi" => "Ψ",
    "Omega" => "Ω",
};

static SYMBOLS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "times" => "×",
    "cdot" => "·",
    "pm" => "±",
    "mp" => "∓",
    "div" => "÷",
    "le" => "≤",
    "leq" => "≤",
    "ge" => "≥",
    "geq" => "≥",
    "neq" => "≠",
    "approx" => "≈",
    "sim" => "∼",
    "simeq" => "≃",
    "equiv" => "≡",
    "propto" => "∝",
    "to" => "→",
    "rightarrow" => "→",
    "leftarrow" => "←",
    "leftrightarrow" => "↔",
    "Rightarrow" => "⇒",
    "Leftarrow" => "⇐",
    "Leftrightarrow" => "⇔",
    "mapsto" => "↦",
    "in" => "∈",
    "notin" => "∉",
    "subset" => "⊂",
    "subseteq" => "⊆",
    "supset" => "⊃",
    "supseteq" => "⊇",
    "cap" => "∩",
    "cup" => "∪",
    "setminus" => "∖",
    "forall" => "∀",
    "exists" => "∃",
    "nabla" => "∇",
    "partial" => "∂",
    "infty" => "∞",
    "angle" => "∠",
    "cdots" => "⋯",
    "ldots" => "…",
    "vdots" => "⋮",
    "ddots" => "⋱",
    "perp" => "⟂",
    "parallel" => "∥",
    "mid" => "∣",
    "neg" => "¬",
    "land" => "∧",
    "lor" => "∨",
    "oplus" => "⊕",
    "otimes" => "⊗",
    "oslash" => "⊘",
    "circ" => "∘",
    "bullet" => "•",
};

static LARGE_OPERATORS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "sum" => "∑",
    "prod" => "∏",
    "coprod" => "∐",
    "int" => "∫",
    "oint" => "∮",
    "iint" => "∬",
    "iiint" => "∭",
    "oiint" => "∯",
    "oiiint" => "∰",
    "bigcup" => "⋃",
    "bigcap" => "⋂",
    "bigsqcup" => "⨆",
    "bigvee" => "⋁",
    "bigwedge" => "⋀",
    "bigodot" => "⨀",
    "bigotimes" => "⨂",
    "bigoplus" => "⨁",
};

static FUNCTIONS: phf::Set<&'static str> = phf::phf_set! {
    "sin", "cos", "tan", "cot", "sec", "csc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh",
    "log", "ln", "exp",
    "lim", "max", "min", "sup", "inf",
    "det", "gcd", "lcm",
};

static NAMED_DELIMITERS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "(" => "(",
    ")" => ")",
    "[" => "[",
    "]" => "]",
    "{" => "{",
    "}" => "}",
    "|" => "|",
    "lbrace" => "{",
    "rbrace" => "}",
    "langle" => "⟨",
    "rangle" => "⟩",
    "lceil" => "⌈",
    "rceil" => "⌉",
    "lfloor" => "⌊",
    "rfloor" => "⌋",
    "vert" => "|",
    "lvert" => "|",
    "rvert" => "|",
    "Vert" => "‖",
    "lVert" => "‖",
    "rVert" => "‖",
};

static ACCENTS: phf::Map<&'static str, (&'static str, AccentPosition)> = phf::phf_map! {
    "overline" => ("¯", AccentPosition::Over),
    "bar" => ("¯", AccentPosition::Over),
    "underline" => ("_", AccentPosition::Under),
    "vec" => ("→", AccentPosition::Over),
    "hat" => ("^", AccentPosition::Over),
    "tilde" => ("~", AccentPosition::Over),
    "dot" => ("˙", AccentPosition::Over),
    "ddot" => ("¨", AccentPosition::Over),
};

static STYLES: phf::Map<&'static str, MathVariant> = phf::phf_map! {
    "mathrm" => MathVariant::Normal,
    "mathit" => MathVariant::Italic,
    "mathbb" => MathVariant::DoubleStruck,
    "mathbf" => MathVariant::Bold,
    "mathtt" => MathVariant::Monospace,
    "mathcal" => MathVariant::Script,
    "mathfrak" => MathVariant::Fraktur,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_order() {
        assert_eq!(lookup("alpha"), Some(Symbol::Greek("α")));
        assert_eq!(lookup("Omega"), Some(Symbol::Greek("Ω")));
        assert_eq!(lookup("leq"), Some(Symbol::Operator("≤")));
        assert_eq!(lookup("supseteq"), Some(Symbol::Operator("⊇")));
        assert_eq!(lookup("sum"), Some(Symbol::LargeOperator("∑")));
        assert_eq!(lookup("sin"), Some(Symbol::Function));
        assert_eq!(lookup("foobar"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(lookup("Rightarrow"), Some(Symbol::Operator("⇒")));
        assert_eq!(lookup("rightarrow"), Some(Symbol::Operator("→")));
        assert_eq!(lookup("Sin"), None);
    }

    #[test]
    fn delimiters() {
        assert_eq!(named_delimiter("langle"), Some("⟨"));
        assert_eq!(named_delimiter("{"), Some("{"));
        assert_eq!(named_delimiter("|"), Some("|"));
        assert_eq!(named_delimiter("("), Some("("));
        assert_eq!(named_delimiter("]"), Some("]"));
        assert_eq!(named_delimiter("."), None);
        assert_eq!(named_delimiter("alpha"), None);
        assert_eq!(literal_delimiter("."), "");
        assert_eq!(literal_delimiter("("), "(");
    }

    #[test]
    fn accents_and_styles() {
        assert_eq!(accent("underline"), Some(("_", AccentPosition::Under)));
        assert_eq!(accent("vec"), Some(("→", AccentPosition::Over)));
        assert_eq!(style("mathbb"), Some(MathVariant::DoubleStruck));
        assert_eq!(style("mathsf"), None);
    }

    #[test]
    fn escaped_literals() {
        for name in ["{", "}", "#", "%", "$"] {
            assert!(is_escaped_literal(name));
        }
        for name in ["^", "&", "_"] {
            assert!(!is_escaped_literal(name));
        }
    }
}
