//! Ordered content blocks ("flowables") and the builder that accumulates them.
//!
//! Blocks only reference styles by name.  The [`ContentBuilder`] borrows the
//! [`StyleSheet`] for its whole lifetime, which both checks every reference as soon as a block
//! is appended and keeps the sheet from changing while content is being written against it.

use crate::error::StyleError;
use crate::style::StyleSheet;

/// A paragraph of marked-up text rendered with a named style.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    style: String,
    text: String,
    anchor: bool,
}

impl Paragraph {
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
            anchor: false,
        }
    }

    /// Marks the paragraph as an outline anchor, recording the page it starts on.
    pub fn anchored(mut self) -> Self {
        self.anchor = true;
        self
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    /// Raw text including inline markup.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_anchor(&self) -> bool {
        self.anchor
    }
}

/// A grid of marked-up cells sharing one style.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    style: String,
    column_weights: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(style: impl Into<String>, column_weights: impl Into<Vec<usize>>) -> Self {
        Self {
            style: style.into(),
            column_weights: column_weights.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row and returns the updated table.
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn column_weights(&self) -> &[usize] {
        &self.column_weights
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Checks that the table has columns and that every row fills all of them.
    pub fn validate(&self) -> Result<(), String> {
        if self.column_weights.is_empty() {
            return Err("table has no columns".to_owned());
        }
        if self.column_weights.iter().any(|weight| *weight == 0) {
            return Err("column weights must be positive".to_owned());
        }
        if let Some((index, row)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.column_weights.len())
        {
            return Err(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                self.column_weights.len()
            ));
        }
        Ok(())
    }
}

/// Individual content blocks, in the order they are laid out.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled text.
    Paragraph(Paragraph),
    /// Fixed vertical gap, in points.
    Spacer(f64),
    /// Forces the next block onto a new page.
    PageBreak,
    /// Grid of styled cells.
    Table(Table),
}

impl Block {
    pub fn paragraph(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Paragraph(Paragraph::new(style, text))
    }

    pub fn spacer(points: f64) -> Self {
        Self::Spacer(points)
    }

    pub fn page_break() -> Self {
        Self::PageBreak
    }

    /// Name of the style this block references, if any.
    pub fn style(&self) -> Option<&str> {
        match self {
            Block::Paragraph(paragraph) => Some(paragraph.style()),
            Block::Table(table) => Some(table.style()),
            Block::Spacer(_) | Block::PageBreak => None,
        }
    }
}

/// Finished, immutable content sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Content {
    blocks: Vec<Block>,
}

impl Content {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of every anchored paragraph, in order.
    pub fn outline(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(paragraph) if paragraph.is_anchor() => Some(paragraph.text()),
            _ => None,
        })
    }
}

/// Accumulates blocks in presentation order, checking style references on the way in.
#[derive(Debug)]
pub struct ContentBuilder<'s> {
    sheet: &'s StyleSheet,
    blocks: Vec<Block>,
}

impl<'s> ContentBuilder<'s> {
    pub fn new(sheet: &'s StyleSheet) -> Self {
        Self {
            sheet,
            blocks: Vec::new(),
        }
    }

    /// Adds a block at the end of the sequence.
    pub fn append(&mut self, block: Block) -> Result<&mut Self, StyleError> {
        if let Some(style) = block.style() {
            self.sheet.resolve(style)?;
        }
        self.blocks.push(block);
        Ok(self)
    }

    pub fn paragraph(
        &mut self,
        style: &str,
        text: impl Into<String>,
    ) -> Result<&mut Self, StyleError> {
        self.append(Block::paragraph(style, text))
    }

    /// Adds a paragraph that is tracked as an outline entry.
    pub fn heading(&mut self, style: &str, text: impl Into<String>) -> Result<&mut Self, StyleError> {
        self.append(Block::Paragraph(Paragraph::new(style, text).anchored()))
    }

    pub fn spacer(&mut self, points: f64) -> Result<&mut Self, StyleError> {
        self.append(Block::spacer(points))
    }

    pub fn page_break(&mut self) -> Result<&mut Self, StyleError> {
        self.append(Block::PageBreak)
    }

    /// Adds a titled section: an anchored title followed by one body paragraph.
    pub fn section(
        &mut self,
        title_style: &str,
        title: impl Into<String>,
        body_style: &str,
        body: impl Into<String>,
    ) -> Result<&mut Self, StyleError> {
        self.heading(title_style, title)?;
        self.paragraph(body_style, body)
    }

    /// Adds one paragraph per item, each prefixed with `marker`.
    pub fn bullets<I, S>(
        &mut self,
        style: &str,
        marker: &str,
        items: I,
    ) -> Result<&mut Self, StyleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.paragraph(style, format!("{}{}", marker, item.as_ref()))?;
        }
        Ok(self)
    }

    /// Adds one paragraph per item, prefixed `1. `, `2. ` and so on.
    pub fn numbered<I, S>(&mut self, style: &str, items: I) -> Result<&mut Self, StyleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, item) in items.into_iter().enumerate() {
            self.paragraph(style, format!("{}. {}", index + 1, item.as_ref()))?;
        }
        Ok(self)
    }

    /// Adds a terminal transcript, one paragraph per line.
    ///
    /// Lines starting with `#` are rendered with `comment_style`, everything else with
    /// `command_style`.
    pub fn terminal<I, S>(
        &mut self,
        command_style: &str,
        comment_style: &str,
        lines: I,
    ) -> Result<&mut Self, StyleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sheet.resolve(command_style)?;
        self.sheet.resolve(comment_style)?;
        for line in lines {
            let line = line.as_ref();
            let style = if line.starts_with('#') {
                comment_style
            } else {
                command_style
            };
            self.paragraph(style, line)?;
        }
        Ok(self)
    }

    /// Adds term/description pairs as alternating paragraphs.
    pub fn definitions<I, T, D>(
        &mut self,
        term_style: &str,
        body_style: &str,
        pairs: I,
    ) -> Result<&mut Self, StyleError>
    where
        I: IntoIterator<Item = (T, D)>,
        T: Into<String>,
        D: Into<String>,
    {
        for (term, description) in pairs {
            self.paragraph(term_style, term)?;
            self.paragraph(body_style, description)?;
        }
        Ok(self)
    }

    /// Adds a table whose rows are given cell by cell.
    pub fn table<R, C, S>(
        &mut self,
        style: &str,
        column_weights: impl Into<Vec<usize>>,
        rows: R,
    ) -> Result<&mut Self, StyleError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = rows
            .into_iter()
            .fold(Table::new(style, column_weights), Table::with_row);
        self.append(Block::Table(table))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Finishes the sequence.
    pub fn finish(self) -> Content {
        Content {
            blocks: self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextStyle;

    fn sheet() -> StyleSheet {
        let mut sheet = StyleSheet::new();
        sheet.define("Body", TextStyle::new()).unwrap();
        sheet.define("Head", TextStyle::new().bold()).unwrap();
        sheet.define("Cmd", TextStyle::new()).unwrap();
        sheet.define("Comment", TextStyle::new().italic()).unwrap();
        sheet
    }

    #[test]
    fn append_rejects_undefined_style() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        let err = builder
            .append(Block::paragraph("Title", "Hello"))
            .unwrap_err();
        assert_eq!(err, StyleError::Undefined("Title".into()));
        assert!(builder.is_empty());
    }

    #[test]
    fn blocks_keep_authoring_order() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        builder
            .heading("Head", "1. Overview")
            .unwrap()
            .paragraph("Body", "first")
            .unwrap()
            .page_break()
            .unwrap()
            .heading("Head", "2. Architecture")
            .unwrap()
            .spacer(12.0)
            .unwrap();
        let content = builder.finish();

        assert_eq!(content.len(), 5);
        assert_eq!(content.blocks()[2], Block::PageBreak);
        assert_eq!(content.blocks()[4], Block::Spacer(12.0));
        let outline: Vec<_> = content.outline().collect();
        assert_eq!(outline, vec!["1. Overview", "2. Architecture"]);
    }

    #[test]
    fn bullets_and_numbers_prefix_items() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        builder.bullets("Body", "• ", ["SOL", "USDC"]).unwrap();
        builder.numbered("Body", ["propose", "vote"]).unwrap();
        let content = builder.finish();

        let texts: Vec<_> = content
            .blocks()
            .iter()
            .map(|block| match block {
                Block::Paragraph(paragraph) => paragraph.text().to_owned(),
                other => panic!("unexpected block {:?}", other),
            })
            .collect();
        assert_eq!(texts, vec!["• SOL", "• USDC", "1. propose", "2. vote"]);
    }

    #[test]
    fn terminal_alternates_styles_by_prefix() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        builder
            .terminal("Cmd", "Comment", ["# Install", "$ pip install sdk", "> ok"])
            .unwrap();
        let styles: Vec<_> = builder
            .finish()
            .blocks()
            .iter()
            .filter_map(Block::style)
            .map(str::to_owned)
            .collect();
        assert_eq!(styles, vec!["Comment", "Cmd", "Cmd"]);
    }

    #[test]
    fn terminal_checks_both_styles_up_front() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        let err = builder
            .terminal("Cmd", "Missing", ["$ only commands"])
            .unwrap_err();
        assert_eq!(err, StyleError::Undefined("Missing".into()));
        assert!(builder.is_empty());
    }

    #[test]
    fn section_anchors_title_only() {
        let sheet = sheet();
        let mut builder = ContentBuilder::new(&sheet);
        builder
            .section("Head", "Vision", "Body", "Robots on demand.")
            .unwrap();
        builder
            .definitions("Head", "Body", [("RaaS", "Robot-as-a-Service")])
            .unwrap();
        let content = builder.finish();
        assert_eq!(content.len(), 4);
        assert_eq!(content.outline().collect::<Vec<_>>(), vec!["Vision"]);
    }

    #[test]
    fn table_validation_reports_ragged_rows() {
        let table = Table::new("Body", vec![1, 2])
            .with_row(["Solana", "Mainnet-beta"])
            .with_row(["Anchor"]);
        let reason = table.validate().unwrap_err();
        assert!(reason.contains("row 1 has 1 cells"));
        assert!(Table::new("Body", Vec::new()).validate().is_err());
    }
}
