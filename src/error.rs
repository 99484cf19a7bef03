//! Error types shared across the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::markup::MarkupError;

/// Configuration errors raised by the [`StyleSheet`](crate::style::StyleSheet).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StyleError {
    /// A style was referenced but never defined.
    #[error("style `{0}` is not defined")]
    Undefined(String),
    /// `define` was called for a name that already exists.
    #[error("style `{0}` is already defined; use `override_style` to replace it")]
    AlreadyDefined(String),
}

/// Errors produced while turning a content sequence into a PDF.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document has no content blocks")]
    EmptyDocument,

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("invalid markup in block {block}")]
    Markup {
        block: usize,
        #[source]
        source: MarkupError,
    },

    #[error("invalid table in block {block}: {reason}")]
    InvalidTable { block: usize, reason: String },

    #[error("failed to load fonts")]
    Fonts(#[source] genpdf::error::Error),

    #[error("failed to lay out document")]
    Layout(#[source] genpdf::error::Error),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[cfg(feature = "bookmarks")]
    #[error("failed to embed section bookmarks")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}
