//! groffdown-core - document tree and groff man page serialization
//!
//! This crate provides the document model, the traversal and output engine,
//! and the groff `man` format. It is used by `groffdown`, which parses
//! Markdown into the tree, but any producer can build a [`Document`] directly.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────┐  enter/exit  ┌─────────────┐  code points  ┌─────────┐
//! Document ─────▶ │   Iter   │ ───────────▶ │ render_node │ ────────────▶ │  outc   │
//!                 └──────────┘              └─────────────┘               └─────────┘
//!                                                  │     Renderer (line state, wrap)
//!                                                  └──────────────────────────────▶ String
//! ```
//!
//! # Example
//!
//! ```rust
//! use groffdown_core::{render_man, Document, ListData, NodeValue, Options};
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let heading = doc.append(root, NodeValue::Heading { level: 1 });
//! doc.append(heading, NodeValue::text("NAME"));
//! let list = doc.append(root, NodeValue::List(ListData::ordered(1)));
//! let item = doc.append(list, NodeValue::Item);
//! let para = doc.append(item, NodeValue::Paragraph);
//! doc.append(para, NodeValue::text("first step"));
//!
//! let man = render_man(&doc, &Options::default(), 0);
//! assert_eq!(man, ".SH\nNAME\n.IP \"1.\" 4\nfirst step\n");
//! ```

mod ast;
mod iter;
mod man;
mod options;
mod render;

pub use ast::{Document, ListData, ListType, NodeId, NodeRef, NodeValue};
pub use iter::{EventType, Iter, Traverse};
pub use man::{render_man, Man};
pub use options::Options;
pub use render::{render, Escaping, Format, Output, Renderer};
