//! Internal library for the `mathtype` crate for rendering MathML.
//!
//! This library allows you to construct an AST representing a formula and then render it to a
//! MathML string under a [`config::Config`].
//!
//! # Example
//!
//! ```rust
//! use mathtype_renderer_internal::ast::{MathMLEmitter, Node};
//! use mathtype_renderer_internal::attribute::ScriptPlacement;
//! use mathtype_renderer_internal::config::Config;
//!
//! let ast = Node::Row(&[
//!     &Node::Scripted {
//!         base: &Node::Operator { text: "∑", large: true },
//!         sub: Some(&Node::Identifier { text: "i", upright: false }),
//!         sup: None,
//!         placement: ScriptPlacement::UnderOver,
//!     },
//!     &Node::Identifier { text: "i", upright: false },
//! ]);
//!
//! let config = Config::default();
//! let mut emitter = MathMLEmitter::new(&config);
//! emitter.emit(&ast, 0).unwrap();
//! assert_eq!(
//!     emitter.into_inner(),
//!     "<mrow><munder><mo largeop=\"true\" movablelimits=\"true\">∑</mo><mi>i</mi></munder><mi>i</mi></mrow>"
//! );
//! ```
pub mod arena;
pub mod ast;
pub mod attribute;
pub mod config;
mod fmt;
pub mod html_utils;
