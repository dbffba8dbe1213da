//! Phrase-to-note auto-linking for markdown vaults.
//!
//! The [`engine::LinkEngine`] keeps a [`index::LinkIndex`] of every linkable
//! target (note titles and aliases, headings, block ids, tags), finds the
//! longest phrase around the cursor that names one of them, and produces the
//! wikilink that replaces it. The [`vault`] module adapts a directory of
//! markdown files as the engine's document source.

pub mod config;
pub mod engine;
pub mod frontmatter;
pub mod index;
pub mod link;
pub mod markdown_ast;
pub mod normalize;
pub mod scanner;
pub mod vault;

pub use engine::{EngineConfig, LinkEngine, LinkOutcome, Notice, Suggestion};
pub use link::{TextReplacement, resolve_link_text};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
