#![warn(missing_docs)]
//! `nudge-treesitter` - Tree-sitter declaration extraction for `nudge-core`.
//!
//! The getter/setter detector needs the variable names declared in a document. This crate
//! provides a [`nudge_core::DeclarationParser`] backed by a Tree-sitter grammar and query, with
//! a ready-made Java configuration.

mod parser;

pub use parser::{JAVA_DECLARATIONS_QUERY, TreeSitterDeclarationParser, java_parser_factory};
