//! Rendering parameters.
//!
//! [`Config`] holds every named parameter with its default. [`PartialConfig`] has the same keys,
//! all optional, and is laid over a `Config` with [`Config::overlay`] so that only the keys it
//! sets change. Both use kebab-case keys when (de)serialized.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

use super::attribute::FracAlign;

/// Configuration for pretty-printing the MathML output.
///
/// Pretty-printing means that newlines and indentation are added to the MathML output, to make it
/// easier to read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum PrettyPrint {
    /// Never pretty print.
    #[default]
    Never,
    /// Always pretty print.
    Always,
    /// Pretty print block formulas only.
    Auto,
}

macro_rules! define_config {
    ($(
        $(#[doc = $doc:literal])*
        $name:ident: $ty:ty = $default:expr,
    )*) => {
        /// Configuration object for the conversion.
        ///
        /// ```rust
        /// use mathtype_renderer_internal::config::{Config, PrettyPrint};
        ///
        /// let config = Config {
        ///     pretty_print: PrettyPrint::Always,
        ///     use_munderover: false,
        ///     ..Default::default()
        /// };
        /// assert_eq!(config.script_scale, 0.7);
        /// ```
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
        pub struct Config {
            $(
                $(#[doc = $doc])*
                pub $name: $ty,
            )*
        }

        impl Default for Config {
            fn default() -> Self {
                Self {
                    $($name: $default,)*
                }
            }
        }

        /// A set of overrides for [`Config`]. Keys left at `None` keep their current value.
        #[derive(Debug, Clone, Default, PartialEq)]
        #[cfg_attr(feature = "serde", derive(Deserialize))]
        #[cfg_attr(
            feature = "serde",
            serde(default, rename_all = "kebab-case", deny_unknown_fields)
        )]
        pub struct PartialConfig {
            $(pub $name: Option<$ty>,)*
        }

        impl Config {
            /// Replaces every key that `partial` sets.
            pub fn overlay(&mut self, partial: &PartialConfig) {
                $(
                    if let Some(value) = &partial.$name {
                        self.$name = value.clone();
                    }
                )*
            }
        }
    };
}

define_config! {
    /// Base font size in pixels. Passed through for the embedding page.
    base_font_size: f64 = 22.0,
    /// Font stack for formulas. Passed through for the embedding page.
    math_font_family: String = "STIX Two Math, Cambria Math, Times New Roman, serif".to_string(),
    /// Font stack for surrounding UI. Passed through for the embedding page.
    ui_font_family: String = "Avenir Next, Gill Sans, Trebuchet MS, sans-serif".to_string(),
    /// Emitted as `scriptsizemultiplier` on the root element.
    script_scale: f64 = 0.7,
    /// Emitted as `scriptminsize` (in `px`) on the root element.
    script_min_size: f64 = 8.0,
    /// Fraction bar thickness in `em`.
    frac_line_thickness: f64 = 0.06,
    frac_num_align: Option<FracAlign> = Some(FracAlign::Center),
    frac_denom_align: Option<FracAlign> = Some(FracAlign::Center),
    /// Row spacing of matrices in `em`.
    matrix_row_gap: f64 = 0.3,
    /// Column spacing of matrices in `em`.
    matrix_col_gap: f64 = 0.4,
    /// Space between a fence glyph and its content in `em`. Zero disables the padding.
    fence_padding: f64 = 0.1,
    /// `lspace`/`rspace` of operators in `em`, if `use_operator_spacing` is set.
    operator_spacing: f64 = 0.16,
    use_operator_spacing: bool = false,
    /// Place the scripts of large operators under and over them.
    use_munderover: bool = true,
    /// Width of `\,`; `\!` is its negation.
    thin_space: f64 = 0.1667,
    /// Width of `\:`.
    medium_space: f64 = 0.2222,
    /// Width of `\;`.
    thick_space: f64 = 0.2778,
    quad: f64 = 1.0,
    qquad: f64 = 2.0,
    /// Render as a block formula (`display="block"`) rather than inline.
    display_mode: bool = true,
    pretty_print: PrettyPrint = PrettyPrint::Never,
    /// Wrap the output in `<semantics>` with the source as an annotation.
    annotation: bool = false,
}

impl Config {
    /// The default configuration with `partial` laid over it.
    pub fn from_partial(partial: &PartialConfig) -> Self {
        let mut config = Self::default();
        config.overlay(partial);
        config
    }

    /// Whether the output should be pretty printed.
    pub fn is_pretty(&self) -> bool {
        match self.pretty_print {
            PrettyPrint::Never => false,
            PrettyPrint::Always => true,
            PrettyPrint::Auto => self.display_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.base_font_size, 22.0);
        assert_eq!(config.script_min_size, 8.0);
        assert_eq!(config.frac_num_align, Some(FracAlign::Center));
        assert_eq!(config.thin_space, 0.1667);
        assert_eq!(config.qquad, 2.0);
        assert!(config.use_munderover);
        assert!(!config.use_operator_spacing);
        assert!(config.display_mode);
        assert_eq!(config.pretty_print, PrettyPrint::Never);
        assert!(!config.annotation);
    }

    #[test]
    fn overlay_only_changes_set_keys() {
        let partial = PartialConfig {
            matrix_row_gap: Some(1.5),
            use_munderover: Some(false),
            ..Default::default()
        };
        let mut config = Config::default();
        config.overlay(&partial);
        assert_eq!(
            config,
            Config {
                matrix_row_gap: 1.5,
                use_munderover: false,
                ..Default::default()
            }
        );
    }

    #[test]
    fn overlay_keeps_earlier_overrides() {
        let mut config = Config::from_partial(&PartialConfig {
            quad: Some(3.0),
            ..Default::default()
        });
        config.overlay(&PartialConfig {
            qquad: Some(5.0),
            ..Default::default()
        });
        assert_eq!(config.quad, 3.0);
        assert_eq!(config.qquad, 5.0);
    }

    #[test]
    fn overlay_can_clear_alignment() {
        let config = Config::from_partial(&PartialConfig {
            frac_num_align: Some(None),
            ..Default::default()
        });
        assert_eq!(config.frac_num_align, None);
        assert_eq!(config.frac_denom_align, Some(FracAlign::Center));
    }

    #[test]
    fn empty_overlay_is_identity() {
        assert_eq!(
            Config::from_partial(&PartialConfig::default()),
            Config::default()
        );
    }

    #[test]
    fn pretty_print_modes() {
        let mut config = Config {
            pretty_print: PrettyPrint::Auto,
            ..Default::default()
        };
        assert!(config.is_pretty());
        config.display_mode = false;
        assert!(!config.is_pretty());
        config.pretty_print = PrettyPrint::Always;
        assert!(config.is_pretty());
        assert_eq!(PrettyPrint::from_str("auto").unwrap(), PrettyPrint::Auto);
        assert_eq!(<&str>::from(PrettyPrint::Never), "never");
    }
}
