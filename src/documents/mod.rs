//! The TaskBoard documents shipped with the crate.
//!
//! Each document is pure data: a page setup, a style sheet, a decoration plan and a content
//! sequence written against that sheet. [`generate`] feeds one of them through the renderer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;

use crate::content::Content;
use crate::decoration::DecorationPlan;
use crate::error::{RenderError, StyleError};
use crate::render::{PageSetup, RenderReport, Renderer};
use crate::style::StyleSheet;

pub mod guide;
pub mod whitepaper;

/// Selects one of the built-in documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Dark-themed protocol whitepaper.
    Whitepaper,
    /// Light-themed technical guide.
    Guide,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Whitepaper, DocumentKind::Guide];

    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Whitepaper => "whitepaper",
            DocumentKind::Guide => "guide",
        }
    }

    /// File name written when no explicit output path is given.
    pub fn default_output(self) -> &'static str {
        match self {
            DocumentKind::Whitepaper => whitepaper::DEFAULT_OUTPUT,
            DocumentKind::Guide => guide::DEFAULT_OUTPUT,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Whitepaper => whitepaper::TITLE,
            DocumentKind::Guide => guide::TITLE,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| format!("unknown document `{}`", value))
    }
}

/// Everything needed to render one document.
#[derive(Clone, Debug)]
pub struct Publication {
    pub kind: DocumentKind,
    pub setup: PageSetup,
    pub sheet: StyleSheet,
    pub plan: DecorationPlan,
    pub content: Content,
}

impl Publication {
    /// Assembles the sheet and content of `kind`.
    pub fn build(kind: DocumentKind) -> Result<Self, StyleError> {
        let (setup, sheet, plan) = match kind {
            DocumentKind::Whitepaper => (
                whitepaper::page_setup(),
                whitepaper::style_sheet()?,
                whitepaper::decoration_plan(),
            ),
            DocumentKind::Guide => (
                guide::page_setup(),
                guide::style_sheet()?,
                guide::decoration_plan(),
            ),
        };
        let content = match kind {
            DocumentKind::Whitepaper => whitepaper::content(&sheet)?,
            DocumentKind::Guide => guide::content(&sheet)?,
        };
        Ok(Self {
            kind,
            setup,
            sheet,
            plan,
            content,
        })
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.setup).with_title(self.kind.title())
    }
}

/// Knobs shared by every generated document.
#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    /// Directory searched for fonts before the default locations.
    pub font_dir: Option<PathBuf>,
    /// Embed the section anchors as PDF bookmarks.
    #[cfg(feature = "bookmarks")]
    pub bookmarks: bool,
}

/// Builds and renders `kind` to `output`, or to its default file name in the working directory.
pub fn generate(
    kind: DocumentKind,
    output: Option<&Path>,
    options: &GenerateOptions,
) -> Result<(PathBuf, RenderReport), RenderError> {
    let publication = Publication::build(kind)?;
    let mut renderer = publication.renderer();
    if let Some(dir) = &options.font_dir {
        renderer = renderer.with_font_dir(dir);
    }
    #[cfg(feature = "bookmarks")]
    {
        renderer = renderer.with_bookmarks(options.bookmarks);
    }

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(kind.default_output()));
    info!("Generating {} into {}", kind, path.display());
    let report = renderer.render_to_file(
        &publication.sheet,
        &publication.content,
        &publication.plan,
        &path,
    )?;
    Ok((path, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_by_name() {
        assert_eq!("guide".parse::<DocumentKind>(), Ok(DocumentKind::Guide));
        assert_eq!(
            "Whitepaper".parse::<DocumentKind>(),
            Ok(DocumentKind::Whitepaper)
        );
        assert!("brochure".parse::<DocumentKind>().is_err());
    }

    #[test]
    fn default_outputs_are_distinct() {
        assert_eq!(
            DocumentKind::Whitepaper.default_output(),
            "TaskBoard_Documentation.pdf"
        );
        assert_eq!(DocumentKind::Guide.default_output(), "TaskBoard_Guide.pdf");
    }

    #[test]
    fn renderer_uses_the_document_page_setup() {
        let guide = Publication::build(DocumentKind::Guide).unwrap();
        assert_eq!(
            *guide.renderer().page_setup(),
            PageSetup::letter().with_uniform_margin(54.0)
        );
        let whitepaper = Publication::build(DocumentKind::Whitepaper).unwrap();
        assert_eq!(*whitepaper.renderer().page_setup(), PageSetup::letter());
    }

    #[test]
    fn every_document_builds() {
        for kind in DocumentKind::ALL {
            let publication = Publication::build(kind).unwrap();
            assert!(!publication.content.is_empty(), "{} is empty", kind);
            assert!(publication.content.outline().count() > 0);
        }
    }
}
