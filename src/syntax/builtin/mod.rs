//! Built-in lexers
//!
//! One module per supported language. Each exposes `lex(&str) -> Vec<Span>`
//! and `highlight(&str) -> String`; both return an empty result for empty
//! input.

pub mod bash;
pub mod css;
pub mod html;
pub mod javascript;
pub mod json;
