#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use strum_macros::{EnumString, IntoStaticStr};

/// `mathvariant` attribute of a styled group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum MathVariant {
    #[strum(serialize = "normal")]
    Normal,
    #[strum(serialize = "bold")]
    Bold,
    #[strum(serialize = "italic")]
    Italic,
    #[strum(serialize = "double-struck")]
    DoubleStruck,
    #[strum(serialize = "monospace")]
    Monospace,
    #[strum(serialize = "script")]
    Script,
    #[strum(serialize = "fraktur")]
    Fraktur,
}

/// Display style of a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum FracStyle {
    /// Use whatever style surrounds the fraction (`\frac`).
    #[default]
    Inherit,
    /// Force display style (`\dfrac`).
    Display,
    /// Force text style (`\tfrac`).
    Text,
}

impl FracStyle {
    /// The value of the `displaystyle` attribute of the wrapping `<mstyle>`, if any.
    #[inline]
    pub fn displaystyle(self) -> Option<&'static str> {
        match self {
            FracStyle::Inherit => None,
            FracStyle::Display => Some("true"),
            FracStyle::Text => Some("false"),
        }
    }
}

/// Alignment of the numerator or denominator of a fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum FracAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum AccentPosition {
    Over,
    Under,
}

/// How scripts are attached to their base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ScriptPlacement {
    /// `<msub>`, `<msup>`, `<msubsup>`
    SubSup,
    /// `<munder>`, `<mover>`, `<munderover>`
    UnderOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TextKind {
    /// `\text{...}`, rendered as `<mtext>`.
    Text,
    /// `\operatorname{...}`, rendered as an upright identifier.
    OperatorName,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn variant_names() {
        assert_eq!(<&str>::from(MathVariant::DoubleStruck), "double-struck");
        assert_eq!(<&str>::from(MathVariant::Normal), "normal");
        assert_eq!(<&str>::from(MathVariant::Fraktur), "fraktur");
    }

    #[test]
    fn frac_align_from_str() {
        assert_eq!(FracAlign::from_str("left").unwrap(), FracAlign::Left);
        assert_eq!(<&str>::from(FracAlign::Center), "center");
        assert!(FracAlign::from_str("middle").is_err());
    }

    #[test]
    fn frac_style_attribute() {
        assert_eq!(FracStyle::Inherit.displaystyle(), None);
        assert_eq!(FracStyle::Display.displaystyle(), Some("true"));
        assert_eq!(FracStyle::Text.displaystyle(), Some("false"));
    }
}
