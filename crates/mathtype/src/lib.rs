//! Convert TeX-like math notation to MathML.
//!
//! The input is parsed into a tree of [`Node`]s, which is then rendered as a `<math>` element.
//! The conversion never fails: unknown commands become identifiers and anything left open at the
//! end of the input is closed implicitly.
//!
//! # Usage
//!
//! For one-off conversions, call [`to_mathml`] with a [`Config`]. A [`Converter`] keeps a
//! configuration around and can derive new converters with some keys overridden.
//!
//! ```rust
//! use mathtype::{Config, Converter, PartialConfig};
//!
//! let converter = Converter::new(Config::default());
//! let mathml = converter.convert(r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}");
//! assert!(mathml.starts_with("<math"));
//!
//! let inline = converter.with_overrides(&PartialConfig {
//!     display_mode: Some(false),
//!     ..Default::default()
//! });
//! assert!(inline.convert("x").contains("display=\"inline\""));
//! ```
//!
//! # Features
//!
//! - `serde`: With this feature, [`Config`] implements serde's `Serialize` and `Deserialize`, and
//!   [`PartialConfig`] implements `Deserialize`.
//!
mod commands;
mod cursor;
mod environments;
mod parser;

pub use mathml_renderer::arena::Arena;
pub use mathml_renderer::ast::Node;
pub use mathml_renderer::attribute::{
    AccentPosition, FracAlign, FracStyle, MathVariant, ScriptPlacement, TextKind,
};
pub use mathml_renderer::config::{Config, PartialConfig, PrettyPrint};

use mathml_renderer::ast::MathMLEmitter;

use self::parser::Parser;

/// Parses `source` into a tree allocated in `arena`.
pub fn parse<'arena, 'source>(
    source: &'source str,
    config: &Config,
    arena: &'arena Arena,
) -> &'arena Node<'arena>
where
    'source: 'arena,
{
    Parser::new(source, arena, config).parse()
}

/// Renders a parsed tree as a complete `<math>` element.
///
/// There is no source text to annotate here, so `config.annotation` has no effect.
pub fn render(node: &Node<'_>, config: &Config) -> String {
    write_math(node, config, None)
}

/// Parses and renders `source` in one go.
///
/// ```rust
/// use mathtype::{to_mathml, Config};
///
/// let config = Config {
///     display_mode: false,
///     ..Default::default()
/// };
/// assert_eq!(
///     to_mathml("x_1", &config),
///     "<math xmlns=\"http://www.w3.org/1998/Math/MathML\" class=\"mathtype\" display=\"inline\" \
///      scriptminsize=\"8px\" scriptsizemultiplier=\"0.7\"><msub><mi>x</mi><mn>1</mn></msub></math>"
/// );
/// ```
pub fn to_mathml(source: &str, config: &Config) -> String {
    let arena = Arena::new();
    let node = parse(source, config, &arena);
    write_math(node, config, Some(source))
}

fn write_math(node: &Node<'_>, config: &Config, source: Option<&str>) -> String {
    let mut emitter = MathMLEmitter::new(config);
    emitter.push_str("<math xmlns=\"http://www.w3.org/1998/Math/MathML\" class=\"mathtype\"");
    if config.display_mode {
        emitter.push_str(" display=\"block\"");
    } else {
        emitter.push_str(" display=\"inline\"");
    }
    emitter.push_str(" scriptminsize=\"");
    emitter.push_number(config.script_min_size);
    emitter.push_str("px\" scriptsizemultiplier=\"");
    emitter.push_number(config.script_scale);
    emitter.push_str("\">");

    let pretty_print = config.is_pretty();
    let base_indent = if pretty_print { 1 } else { 0 };

    // We ignore the result of `emit` here, because the only possible error is a formatting error
    // when writing to the string, and `String`'s `write_str` implementation never returns one.
    match source.filter(|_| config.annotation) {
        Some(source) => {
            let inner_indent = if pretty_print { base_indent + 1 } else { 0 };
            emitter.new_line_and_indent(base_indent);
            emitter.push_str("<semantics>");
            let _ = emitter.emit(node, inner_indent);
            emitter.new_line_and_indent(inner_indent);
            emitter.push_str("<annotation encoding=\"application/x-tex\">");
            emitter.push_escaped(source);
            emitter.push_str("</annotation>");
            emitter.new_line_and_indent(base_indent);
            emitter.push_str("</semantics>");
        }
        None => {
            let _ = emitter.emit(node, base_indent);
        }
    }

    if pretty_print {
        emitter.push_str("\n");
    }
    emitter.push_str("</math>");
    emitter.into_inner()
}

/// A converter bound to one configuration.
///
/// The configuration never changes after construction; [`Converter::with_overrides`] returns a
/// new converter instead.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A converter whose configuration is this one with `overrides` laid over it.
    pub fn with_overrides(&self, overrides: &PartialConfig) -> Self {
        let mut config = self.config.clone();
        config.overlay(overrides);
        Self { config }
    }

    #[inline]
    pub fn convert(&self, source: &str) -> String {
        to_mathml(source, &self.config)
    }
}
