//! Render driver: turns a style sheet, a content sequence and a decoration plan into PDF bytes.
//!
//! Rendering happens in two phases.  The first phase checks every block against the sheet and
//! parses its markup without touching fonts or the filesystem, so configuration mistakes fail
//! fast and leave nothing behind.  The second phase loads the fonts, converts the prepared
//! blocks into `genpdf` elements and renders the whole document into memory.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use genpdf::elements::{
    Break, FrameCellDecorator, LinearLayout, PaddedElement, PageBreak, Paragraph, TableLayout,
};
use genpdf::fonts::{Font, FontFamily};
use genpdf::{Element, Margins, Size};
use log::{debug, info, warn};

use crate::content::{Block, Content};
use crate::decoration::{ChromeDecorator, DecorationPlan, PageTracker};
use crate::elements::{pt, Anchored, Gap, Tinted};
use crate::error::RenderError;
use crate::fonts;
use crate::markup::{parse_markup, plain_text, split_lines, Run, Span};
use crate::style::{StyleSheet, TextStyle};

/// Page geometry in PostScript points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSetup {
    width: f64,
    height: f64,
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl PageSetup {
    /// A page of the given size with one-inch margins.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            top: 72.0,
            right: 72.0,
            bottom: 72.0,
            left: 72.0,
        }
    }

    /// US Letter, 612 x 792 points.
    pub fn letter() -> Self {
        Self::new(612.0, 792.0)
    }

    pub fn with_margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.top = top;
        self.right = right;
        self.bottom = bottom;
        self.left = left;
        self
    }

    pub fn with_uniform_margin(self, points: f64) -> Self {
        self.with_margins(points, points, points, points)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub(crate) fn paper_size(&self) -> Size {
        Size::new(pt(self.width), pt(self.height))
    }

    pub(crate) fn margins(&self) -> Margins {
        Margins::trbl(pt(self.top), pt(self.right), pt(self.bottom), pt(self.left))
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

/// An outline anchor and the page its paragraph starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub title: String,
    pub page: usize,
}

/// Facts about a finished render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub page_count: usize,
    /// Pages that carry a printed page number.
    pub numbered_pages: Vec<usize>,
    /// Anchored paragraphs in authoring order.
    pub anchors: Vec<Anchor>,
}

/// A rendered document held in memory.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub report: RenderReport,
}

enum Prepared<'a> {
    Text {
        style: &'a TextStyle,
        lines: Vec<Vec<Span>>,
        anchor: Option<String>,
    },
    Table {
        style: &'a TextStyle,
        weights: Vec<usize>,
        rows: Vec<Vec<Vec<Vec<Span>>>>,
    },
    Gap(f64),
    PageBreak,
}

/// Renders content against a style sheet.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    setup: PageSetup,
    title: Option<String>,
    font_dir: Option<PathBuf>,
    #[cfg(feature = "bookmarks")]
    bookmarks: bool,
}

impl Renderer {
    pub fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            ..Self::default()
        }
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Searches `dir` for fonts before the default locations.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dir = Some(dir.into());
        self
    }

    /// Embeds the outline anchors as PDF bookmarks.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, enabled: bool) -> Self {
        self.bookmarks = enabled;
        self
    }

    pub fn page_setup(&self) -> &PageSetup {
        &self.setup
    }

    /// Renders the document into memory.
    pub fn render(
        &self,
        sheet: &StyleSheet,
        content: &Content,
        plan: &DecorationPlan,
    ) -> Result<RenderedPdf, RenderError> {
        if content.is_empty() {
            return Err(RenderError::EmptyDocument);
        }
        let prepared = prepare(sheet, content)?;
        debug!("Prepared {} blocks", prepared.len());

        let font_set = fonts::load_font_set(self.font_dir.as_deref()).map_err(RenderError::Fonts)?;
        let mut document = genpdf::Document::new(font_set.sans);
        let mono = font_set
            .mono
            .map(|family| document.add_font_family(family));

        document.set_paper_size(self.setup.paper_size());
        if let Some(title) = &self.title {
            document.set_title(title.as_str());
        }

        let tracker = PageTracker::default();
        document.set_page_decorator(ChromeDecorator::new(
            plan,
            (self.setup.width(), self.setup.height()),
            self.setup.margins(),
            mono,
            tracker.clone(),
        ));

        let mut anchor_slots = Vec::new();
        for block in prepared {
            match block {
                Prepared::Text {
                    style,
                    lines,
                    anchor,
                } => {
                    let element = text_element(style, &lines, mono);
                    match anchor {
                        Some(title) => {
                            let slot = Rc::new(Cell::new(None));
                            document.push(Anchored::new(element, tracker.clone(), slot.clone()));
                            anchor_slots.push((title, slot));
                        }
                        None => document.push(element),
                    }
                }
                Prepared::Table {
                    style,
                    weights,
                    rows,
                } => document.push(table_element(style, weights, &rows, mono)?),
                Prepared::Gap(points) => document.push(Gap::new(points)),
                Prepared::PageBreak => document.push(PageBreak::new()),
            }
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(RenderError::Layout)?;

        let page_count = tracker.current_page();
        let anchors = anchor_slots
            .into_iter()
            .filter_map(|(title, slot)| match slot.get() {
                Some(page) => Some(Anchor { title, page }),
                None => {
                    warn!("Anchor '{}' was never placed on a page", title);
                    None
                }
            })
            .collect::<Vec<_>>();

        #[cfg(feature = "bookmarks")]
        if self.bookmarks {
            bytes = crate::bookmarks::apply_anchor_bookmarks(&bytes, &anchors)?;
            debug!("Embedded {} bookmarks", anchors.len());
        }

        info!(
            "Rendered {} blocks onto {} pages ({} bytes)",
            content.len(),
            page_count,
            bytes.len()
        );

        Ok(RenderedPdf {
            bytes,
            report: RenderReport {
                page_count,
                numbered_pages: tracker.numbered_pages(),
                anchors,
            },
        })
    }

    /// Renders the document and writes it to `path`.
    ///
    /// The file is only created once the whole document rendered successfully.
    pub fn render_to_file(
        &self,
        sheet: &StyleSheet,
        content: &Content,
        plan: &DecorationPlan,
        path: impl AsRef<Path>,
    ) -> Result<RenderReport, RenderError> {
        let path = path.as_ref();
        let rendered = self.render(sheet, content, plan)?;
        fs::write(path, &rendered.bytes).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote {}", path.display());
        Ok(rendered.report)
    }
}

fn parse_runs(index: usize, text: &str) -> Result<Vec<Run>, RenderError> {
    parse_markup(text).map_err(|source| RenderError::Markup {
        block: index,
        source,
    })
}

fn prepare<'a>(sheet: &'a StyleSheet, content: &Content) -> Result<Vec<Prepared<'a>>, RenderError> {
    let mut prepared = Vec::with_capacity(content.len());
    for (index, block) in content.blocks().iter().enumerate() {
        let item = match block {
            Block::Paragraph(paragraph) => {
                let style = sheet.resolve(paragraph.style())?;
                let runs = parse_runs(index, paragraph.text())?;
                Prepared::Text {
                    style,
                    lines: split_lines(&runs),
                    anchor: paragraph.is_anchor().then(|| plain_text(&runs)),
                }
            }
            Block::Table(table) => {
                let style = sheet.resolve(table.style())?;
                table
                    .validate()
                    .map_err(|reason| RenderError::InvalidTable {
                        block: index,
                        reason,
                    })?;
                let rows = table
                    .rows()
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|cell| parse_runs(index, cell).map(|runs| split_lines(&runs)))
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Prepared::Table {
                    style,
                    weights: table.column_weights().to_vec(),
                    rows,
                }
            }
            Block::Spacer(points) => Prepared::Gap(*points),
            Block::PageBreak => Prepared::PageBreak,
        };
        prepared.push(item);
    }
    Ok(prepared)
}

fn lines_layout(style: &TextStyle, lines: &[Vec<Span>], mono: Option<FontFamily<Font>>) -> LinearLayout {
    let base = style.to_genpdf(mono);
    let mut layout = LinearLayout::vertical();
    for line in lines {
        if line.iter().all(|span| span.text().trim().is_empty()) {
            layout.push(Break::new(1).styled(base));
            continue;
        }
        let mut paragraph = Paragraph::default();
        for span in line {
            paragraph.push(span.to_styled_string(base));
        }
        paragraph.set_alignment(style.alignment());
        layout.push(paragraph);
    }
    layout
}

fn text_element(
    style: &TextStyle,
    lines: &[Vec<Span>],
    mono: Option<FontFamily<Font>>,
) -> Tinted<PaddedElement<LinearLayout>> {
    let padded = lines_layout(style, lines, mono).padded(Margins::trbl(
        pt(style.space_before),
        pt(style.right_indent),
        pt(style.space_after),
        pt(style.left_indent),
    ));
    Tinted::new(padded, style.background)
}

fn table_element(
    style: &TextStyle,
    weights: Vec<usize>,
    rows: &[Vec<Vec<Vec<Span>>>],
    mono: Option<FontFamily<Font>>,
) -> Result<TableLayout, RenderError> {
    let mut table = TableLayout::new(weights);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    for row in rows {
        let mut table_row = table.row();
        for cell in row {
            table_row.push_element(lines_layout(style, cell, mono).padded(Margins::all(pt(3.0))));
        }
        table_row.push().map_err(RenderError::Layout)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentBuilder;
    use crate::style::TextStyle;

    fn sheet() -> StyleSheet {
        let mut sheet = StyleSheet::new();
        sheet.define("Body", TextStyle::new()).unwrap();
        sheet
    }

    #[test]
    fn letter_page_in_millimetres() {
        let setup = PageSetup::letter();
        let size = setup.paper_size();
        assert!((crate::elements::mm_to_f64(size.width) - 215.9).abs() < 1e-6);
        assert!((crate::elements::mm_to_f64(size.height) - 279.4).abs() < 1e-6);
    }

    #[test]
    fn empty_content_is_rejected_before_fonts() {
        let sheet = sheet();
        let content = ContentBuilder::new(&sheet).finish();
        let err = Renderer::new(PageSetup::letter())
            .with_font_dir("/__taskboard_docs_missing_fonts__")
            .render(&sheet, &content, &DecorationPlan::plain())
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyDocument));
    }

    #[test]
    fn markup_errors_name_the_block() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        builder
            .paragraph("Body", "fine")
            .unwrap()
            .paragraph("Body", "<b>never closed")
            .unwrap();
        let content = builder.finish();
        match prepare(&sheet, &content) {
            Err(RenderError::Markup { block, .. }) => assert_eq!(block, 1),
            other => panic!("unexpected result: {:?}", other.map(|blocks| blocks.len())),
        }
    }

    #[test]
    fn ragged_tables_are_rejected() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        builder
            .table(
                "Body",
                vec![1, 2],
                vec![vec!["Component", "Version"], vec!["Solana"]],
            )
            .unwrap();
        let content = builder.finish();
        match prepare(&sheet, &content) {
            Err(RenderError::InvalidTable { block, reason }) => {
                assert_eq!(block, 0);
                assert!(reason.contains("row 1"));
            }
            other => panic!("unexpected result: {:?}", other.map(|blocks| blocks.len())),
        }
    }

    #[test]
    fn anchors_use_plain_text() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        builder.heading("Body", "01 <b>Executive</b> Summary").unwrap();
        let content = builder.finish();
        let prepared = prepare(&sheet, &content).unwrap();
        match &prepared[0] {
            Prepared::Text { anchor, .. } => {
                assert_eq!(anchor.as_deref(), Some("01 Executive Summary"))
            }
            _ => panic!("expected a text block"),
        }
    }
}
