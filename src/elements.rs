//! Custom `genpdf` elements used by the renderer.
//!
//! `genpdf` ships paragraphs, layouts and tables; this module adds the pieces the document
//! model needs on top of them: fixed gaps measured in points, elements that record the page
//! they start on, a tinted bar marking shaded blocks, and full-page backdrop images.

use std::cell::Cell;
use std::rc::Rc;

use genpdf::elements::Image;
use genpdf::error::Error;
use genpdf::style::{Color, Style};
use genpdf::{render, Element, Mm, Position, RenderResult, Scale, Size};
use image::GenericImageView;

use crate::decoration::PageTracker;
use crate::style::points_to_mm;

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
/// `genpdf` strokes every line at the PDF default width of one point.
const STROKE_WIDTH_PT: f64 = 1.0;
const TINT_BAR_STROKES: usize = 3;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Converts a length in PostScript points to a `genpdf` length.
pub(crate) fn pt(points: f64) -> Mm {
    mm_from_f64(points_to_mm(points))
}

pub(crate) fn mm_to_points(value: Mm) -> f64 {
    mm_to_f64(value) / points_to_mm(1.0)
}

/// Horizontal positions, in points, of the strokes that make up a tint bar.
fn tint_stroke_offsets() -> impl Iterator<Item = f64> {
    (0..TINT_BAR_STROKES).map(|stroke| (stroke as f64 + 0.5) * STROKE_WIDTH_PT)
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Wraps a bitmap into an image element stretched over a whole page of `page` size.
pub(crate) fn full_page_image(image: image::DynamicImage, page: Size) -> Result<Image, Error> {
    let natural = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
    let natural_width = mm_to_f64(natural.width);
    let natural_height = mm_to_f64(natural.height);
    let scale = if natural_width > f64::EPSILON && natural_height > f64::EPSILON {
        Scale::new(
            mm_to_f64(page.width) / natural_width,
            mm_to_f64(page.height) / natural_height,
        )
    } else {
        Scale::new(1.0, 1.0)
    };

    let mut element = Image::from_dynamic_image(image)?;
    element.set_scale(scale);
    element.set_position(Position::new(0, 0));
    Ok(element)
}

/// Vertical gap of a fixed height.
///
/// A gap that does not fit is cut at the bottom of the page instead of carrying over.
pub struct Gap {
    height: Mm,
}

impl Gap {
    /// Creates a gap of `points` PostScript points.
    pub fn new(points: f64) -> Self {
        Self {
            height: pt(points.max(0.0)),
        }
    }
}

impl Element for Gap {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };
        result.size = Size::new(area.size().width, height);
        Ok(result)
    }
}

/// Records the page on which the wrapped element first puts something on paper.
pub struct Anchored<E: Element> {
    inner: E,
    tracker: PageTracker,
    page: Rc<Cell<Option<usize>>>,
}

impl<E: Element> Anchored<E> {
    pub(crate) fn new(inner: E, tracker: PageTracker, page: Rc<Cell<Option<usize>>>) -> Self {
        Self {
            inner,
            tracker,
            page,
        }
    }
}

impl<E: Element> Element for Anchored<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area, style)?;
        if self.page.get().is_none() && result.size.height > Mm::default() {
            self.page.set(Some(self.tracker.current_page()));
        }
        Ok(result)
    }
}

/// Draws a three point colored bar along the left edge of the wrapped element, if a color is
/// set. The bar is built from adjacent default-width strokes.
pub struct Tinted<E: Element> {
    inner: E,
    color: Option<Color>,
}

impl<E: Element> Tinted<E> {
    pub fn new(inner: E, color: Option<Color>) -> Self {
        Self { inner, color }
    }
}

impl<E: Element> Element for Tinted<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area.clone(), style)?;
        let Some(color) = self.color else {
            return Ok(result);
        };
        if result.size.height > Mm::default() {
            for offset in tint_stroke_offsets() {
                let x = pt(offset);
                area.draw_line(
                    vec![Position::new(x, 0), Position::new(x, result.size.height)],
                    Style::new().with_color(color),
                );
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_convert_through_printpdf() {
        let inch = pt(72.0);
        assert!((mm_to_f64(inch) - 25.4).abs() < 1e-9);
    }

    #[test]
    fn image_size_uses_default_dpi() {
        let image = image::DynamicImage::ImageRgb8(image::RgbImage::new(300, 600));
        let size = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
        assert!((mm_to_f64(size.width) - 25.4).abs() < 1e-9);
        assert!((mm_to_f64(size.height) - 50.8).abs() < 1e-9);
    }

    #[test]
    fn tint_strokes_tile_three_points() {
        let offsets: Vec<f64> = tint_stroke_offsets().collect();
        assert_eq!(offsets, vec![0.5, 1.5, 2.5]);
        let right_edge = offsets.last().copied().unwrap() + STROKE_WIDTH_PT / 2.0;
        assert!((right_edge - 3.0).abs() < 1e-9);
    }

    #[test]
    fn millimetres_convert_back_to_points() {
        assert!((mm_to_points(pt(45.0)) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn negative_gap_is_empty() {
        assert_eq!(Gap::new(-5.0).height, Mm::default());
    }
}
