//! Template Compiler - lexing stage.
//!
//! The compiler front-end turns a markup template into a flat stream of
//! [`Token`]s. Parsing the stream into render instructions happens in a
//! later stage that consumes these tokens.

mod lexer;
mod token;

pub use lexer::tokenize;
pub use token::{Attribute, AttributeMap, TagFlags, TagToken, Token};
