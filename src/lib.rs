//! lexpaint - token-stream syntax highlighting adapter
//!
//! This crate bridges a lexer/parser runtime and an editor's text-markup
//! layer: it tokenizes text, maps token types to visual attributes through a
//! color scheme, and paints range highlights into a markup model.
//!
//! Every pass runs the same fixed sequence: clear highlights (full passes
//! only) → tokenize → classify tokens → paint ranges → parse → highlight
//! tree nodes. Languages plug in through the [`Highlighter`] trait, whose
//! hooks (embedded islands, tree highlighting, context-sensitive
//! classification) all default to no-ops.

pub mod attrs;
pub mod highlighter;
pub mod langs;
pub mod markup;
pub mod scheme;
pub mod token;
pub mod tree;

// Re-export commonly used types
pub use attrs::{merge_keys, Color, StyleKey, TextAttributes};
pub use highlighter::{highlight_document, highlight_span, HighlightContext, Highlighter};
pub use markup::{HighlightLayer, HighlightRange, MarkupModel};
pub use scheme::{ColorScheme, SchemeError};
pub use token::{Token, TokenStream, TokenType, TOKEN_EOF};
pub use tree::ParseNode;
