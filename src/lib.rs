//! Declarative PDF assembly for the TaskBoard documentation.
//!
//! A document is described by a [`StyleSheet`], an ordered [`Content`] sequence whose blocks
//! reference styles by name, and a [`DecorationPlan`] painting per-page chrome. The
//! [`Renderer`] paginates the blocks with `genpdf` and reports where every outline anchor landed.

pub mod backdrop;
pub mod content;
pub mod decoration;
pub mod documents;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod markup;
pub mod render;
pub mod style;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use content::{Block, Content, ContentBuilder, Paragraph, Table};
pub use decoration::{DecorationPlan, PageChrome, PageVariant};
pub use documents::{generate, DocumentKind, GenerateOptions, Publication};
pub use error::{RenderError, StyleError};
pub use render::{Anchor, PageSetup, RenderReport, RenderedPdf, Renderer};
pub use style::{StyleSheet, TextAlign, TextStyle};
