//! Concrete language adapters
//!
//! Hand-written total lexers: they always terminate and degrade to error
//! tokens on malformed input, so a highlight pass can never take down the
//! host editor.

pub mod expr;
pub mod template;

pub use expr::ExprHighlighter;
pub use template::TemplateHighlighter;
