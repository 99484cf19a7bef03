//! Named text styles and the registry that holds them.
//!
//! A [`StyleSheet`] is populated up front and then handed by shared reference to the
//! [`ContentBuilder`](crate::content::ContentBuilder) and the [`Renderer`](crate::render::Renderer).
//! Styles carry their spacing in PostScript points; conversion to `genpdf` millimetres only
//! happens when a document is rendered.

use std::collections::BTreeMap;

use genpdf::fonts::{Font, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::Alignment;

use crate::error::StyleError;

const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Converts a length in points to millimetres.
pub fn points_to_mm(points: f64) -> f64 {
    points * MM_PER_POINT
}

/// Builds an RGB color from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Mixes `foreground` over `background` with the given opacity.
///
/// The renderer has no notion of transparency, so translucent strokes and fills are
/// flattened against the known page background instead.
pub fn blend(background: Color, foreground: Color, alpha: f64) -> Color {
    let (br, bg, bb) = channels(background);
    let (fr, fg, fb) = channels(foreground);
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, f: u8| (b as f64 + (f as f64 - b as f64) * alpha).round() as u8;
    Color::Rgb(mix(br, fr), mix(bg, fg), mix(bb, fb))
}

/// Returns the RGB channels of a color.
pub fn channels(color: Color) -> (u8, u8, u8) {
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Greyscale(v) => (v, v, v),
        Color::Cmyk(c, m, y, k) => {
            let k = 255.0 - k as f64;
            let convert = |v: u8| ((255.0 - v as f64) * k / 255.0).round() as u8;
            (convert(c), convert(m), convert(y))
        }
    }
}

/// Font family used by a style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontKind {
    /// Proportional body font.
    #[default]
    Sans,
    /// Fixed-width font for terminal and code blocks.
    Mono,
}

/// Horizontal alignment of a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Justified text. `genpdf` cannot stretch words, so this renders flush left.
    Justify,
}

/// Visual attributes of a named style.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontKind,
    pub bold: bool,
    pub italic: bool,
    /// Font size in points.
    pub size: u8,
    pub color: Color,
    pub align: TextAlign,
    /// Vertical space above the block, in points.
    pub space_before: f64,
    /// Vertical space below the block, in points.
    pub space_after: f64,
    /// Baseline-to-baseline distance, in points.
    pub leading: f64,
    pub left_indent: f64,
    pub right_indent: f64,
    /// Optional fill drawn behind the block.
    pub background: Option<Color>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontKind::Sans,
            bold: false,
            italic: false,
            size: 10,
            color: Color::Rgb(0, 0, 0),
            align: TextAlign::Left,
            space_before: 0.0,
            space_after: 0.0,
            leading: 12.0,
            left_indent: 0.0,
            right_indent: 0.0,
            background: None,
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: FontKind) -> Self {
        self.font = font;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Sets the font size and scales the leading to 1.2 times the size.
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self.leading = f64::from(size) * 1.2;
        self
    }

    pub fn with_leading(mut self, leading: f64) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_space_before(mut self, points: f64) -> Self {
        self.space_before = points;
        self
    }

    pub fn with_space_after(mut self, points: f64) -> Self {
        self.space_after = points;
        self
    }

    pub fn with_indent(mut self, left: f64, right: f64) -> Self {
        self.left_indent = left;
        self.right_indent = right;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Line spacing factor relative to the font size, as expected by `genpdf`.
    pub fn line_spacing(&self) -> f64 {
        if self.size == 0 {
            1.0
        } else {
            (self.leading / (f64::from(self.size) * 1.2)).max(0.5)
        }
    }

    /// Horizontal alignment understood by `genpdf`.
    pub fn alignment(&self) -> Alignment {
        match self.align {
            TextAlign::Left | TextAlign::Justify => Alignment::Left,
            TextAlign::Center => Alignment::Center,
            TextAlign::Right => Alignment::Right,
        }
    }

    /// Builds the `genpdf` character style for this text style.
    ///
    /// `mono` is the registered monospaced family; without it mono styles keep the
    /// document's default family.
    pub fn to_genpdf(&self, mono: Option<FontFamily<Font>>) -> Style {
        let mut style = Style::new()
            .with_font_size(self.size)
            .with_line_spacing(self.line_spacing())
            .with_color(self.color);
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        if let (FontKind::Mono, Some(family)) = (self.font, mono) {
            style.set_font_family(family);
        }
        style
    }
}

/// Names of the styles seeded by [`StyleSheet::with_base_styles`].
pub const BASE_STYLES: &[&str] = &["Normal", "BodyText", "Title", "Heading1", "Heading2", "Code"];

/// Registry mapping style names to [`TextStyle`]s.
///
/// The registry only grows: styles can be added or explicitly overridden, never removed.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    styles: BTreeMap<String, TextStyle>,
}

impl StyleSheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sheet seeded with the base styles listed in [`BASE_STYLES`].
    pub fn with_base_styles() -> Self {
        let normal = TextStyle::new().with_size(10).with_leading(12.0);
        let mut styles = BTreeMap::new();
        styles.insert("Normal".to_owned(), normal.clone());
        styles.insert(
            "BodyText".to_owned(),
            normal.clone().with_space_before(6.0),
        );
        styles.insert(
            "Title".to_owned(),
            normal
                .clone()
                .bold()
                .with_size(18)
                .with_leading(22.0)
                .with_align(TextAlign::Center)
                .with_space_after(6.0),
        );
        styles.insert(
            "Heading1".to_owned(),
            normal
                .clone()
                .bold()
                .with_size(18)
                .with_leading(22.0)
                .with_space_after(6.0),
        );
        styles.insert(
            "Heading2".to_owned(),
            normal
                .clone()
                .bold()
                .with_size(14)
                .with_leading(18.0)
                .with_space_before(12.0)
                .with_space_after(6.0),
        );
        styles.insert(
            "Code".to_owned(),
            normal
                .with_font(FontKind::Mono)
                .with_size(8)
                .with_leading(8.8)
                .with_indent(36.0, 0.0),
        );
        Self { styles }
    }

    /// Registers a new style.
    ///
    /// Fails if `name` is already taken; use [`StyleSheet::override_style`] to replace an
    /// existing definition on purpose.
    pub fn define(&mut self, name: impl Into<String>, style: TextStyle) -> Result<(), StyleError> {
        let name = name.into();
        if self.styles.contains_key(&name) {
            return Err(StyleError::AlreadyDefined(name));
        }
        self.styles.insert(name, style);
        Ok(())
    }

    /// Registers a style derived from `parent` after applying `edit` to a copy of it.
    pub fn derive<F>(
        &mut self,
        name: impl Into<String>,
        parent: &str,
        edit: F,
    ) -> Result<(), StyleError>
    where
        F: FnOnce(TextStyle) -> TextStyle,
    {
        let base = self.resolve(parent)?.clone();
        self.define(name, edit(base))
    }

    /// Replaces the definition of `name`, returning the previous one if there was any.
    pub fn override_style(
        &mut self,
        name: impl Into<String>,
        style: TextStyle,
    ) -> Option<TextStyle> {
        self.styles.insert(name.into(), style)
    }

    /// Looks up a style by name.
    pub fn resolve(&self, name: &str) -> Result<&TextStyle, StyleError> {
        self.styles
            .get(name)
            .ok_or_else(|| StyleError::Undefined(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_sheet_contains_reserved_styles() {
        let sheet = StyleSheet::with_base_styles();
        for name in BASE_STYLES {
            assert!(sheet.contains(name), "missing base style {name}");
        }
        assert_eq!(sheet.len(), BASE_STYLES.len());
        assert_eq!(sheet.resolve("Code").unwrap().font, FontKind::Mono);
    }

    #[test]
    fn justified_text_renders_flush_left() {
        let style = TextStyle::new().with_align(TextAlign::Justify);
        assert_eq!(style.alignment(), Alignment::Left);
        assert_eq!(
            TextStyle::new().with_align(TextAlign::Center).alignment(),
            Alignment::Center
        );
    }

    #[test]
    fn genpdf_style_carries_weight_and_color() {
        let style = TextStyle::new()
            .bold()
            .with_size(13)
            .with_color(rgb(0x22ae77))
            .to_genpdf(None);
        assert!(style.is_bold());
        assert!(!style.is_italic());
        assert_eq!(style.font_size(), 13);
        assert_eq!(style.color(), Some(Color::Rgb(0x22, 0xae, 0x77)));
    }

    #[test]
    fn define_rejects_existing_names() {
        let mut sheet = StyleSheet::with_base_styles();
        let err = sheet.define("Title", TextStyle::new()).unwrap_err();
        assert_eq!(err, StyleError::AlreadyDefined("Title".into()));
        assert!(sheet.resolve("Title").unwrap().bold);
    }

    #[test]
    fn override_replaces_definition() {
        let mut sheet = StyleSheet::with_base_styles();
        let previous = sheet.override_style("Title", TextStyle::new().with_size(30));
        assert!(previous.is_some_and(|style| style.size == 18));
        assert_eq!(sheet.resolve("Title").unwrap().size, 30);
    }

    #[test]
    fn resolve_unknown_style_fails() {
        let sheet = StyleSheet::new();
        assert_eq!(
            sheet.resolve("Body").unwrap_err(),
            StyleError::Undefined("Body".into())
        );
    }

    #[test]
    fn derive_copies_parent_attributes() {
        let mut sheet = StyleSheet::with_base_styles();
        sheet
            .derive("DocTitle", "Title", |style| {
                style.with_size(28).with_color(rgb(0x7c3aed))
            })
            .unwrap();
        let derived = sheet.resolve("DocTitle").unwrap();
        assert!(derived.bold);
        assert_eq!(derived.align, TextAlign::Center);
        assert_eq!(derived.color, Color::Rgb(0x7c, 0x3a, 0xed));

        let err = sheet
            .derive("Orphan", "Missing", |style| style)
            .unwrap_err();
        assert_eq!(err, StyleError::Undefined("Missing".into()));
        assert!(!sheet.contains("Orphan"));
    }

    #[test]
    fn blend_interpolates_channels() {
        let mixed = blend(Color::Rgb(0, 0, 0), Color::Rgb(200, 100, 50), 0.5);
        assert_eq!(mixed, Color::Rgb(100, 50, 25));
        assert_eq!(
            blend(Color::Rgb(1, 2, 3), Color::Rgb(9, 9, 9), 0.0),
            Color::Rgb(1, 2, 3)
        );
    }

    #[test]
    fn line_spacing_tracks_leading() {
        let style = TextStyle::new().with_size(10).with_leading(18.0);
        assert!((style.line_spacing() - 1.5).abs() < 1e-9);
    }
}
