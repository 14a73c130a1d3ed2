//! # groffdown
//!
//! Convert Markdown to groff man pages.
//!
//! The document model and the `man` serializer live in `groffdown-core`;
//! this crate adds the Markdown front end, man page title handling and a
//! small service type tying them together.
//!
//! ## Design
//!
//! Markdown is parsed with pulldown-cmark and folded into the core
//! document tree. The tree is then serialized by the core `man` format:
//!
//! - **Line-oriented output**: every macro starts on its own line
//! - **Escaped text**: leading `.`/`'` and `-`/`\` never reach groff raw
//! - **Optional wrapping**: long lines break at spaces, never before a digit
//!
//! ## Example
//!
//! ```rust
//! use groffdown::ManService;
//!
//! let service = ManService::new();
//! let man = service.render("# Name\n\nHello *world*").unwrap();
//! assert_eq!(man, ".SH\nName\n.PP\nHello \\f[I]world\\f[]\n");
//! ```
//!
//! ## Example (page title)
//!
//! ```rust
//! use groffdown::{ManOptions, ManService};
//!
//! let service = ManService::with_options(ManOptions {
//!     detect_title: true,
//!     ..Default::default()
//! });
//! let man = service.render("# ls(1) -- list directory contents").unwrap();
//! assert!(man.starts_with(".TH \"LS\" \"1\"\n.SH\nNAME\n"));
//! ```

#[cfg(feature = "markdown")]
pub mod markdown;
mod service;
pub mod title;

#[cfg(feature = "markdown")]
pub use markdown::{parse_markdown, ParseOptions};
pub use service::{ManOptions, ManService};
pub use title::PageTitle;

pub use groffdown_core::{Document, NodeValue, Options};

/// Error type for groffdown operations
#[derive(Debug, thiserror::Error)]
pub enum GroffdownError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GroffdownError>;
