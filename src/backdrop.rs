//! Rasterised page backdrops.
//!
//! `genpdf` can print text, images and lines but cannot fill shapes, so dark page backgrounds
//! and their decorative art are painted into an RGB bitmap once per page variant and placed
//! behind the page content as a full-page image.  All geometry is given in PostScript points
//! with the origin in the bottom-left corner of the page.

use genpdf::style::Color;
use image::{ImageBuffer, Rgb, RgbImage};

use crate::style::{blend, channels};

/// Default bitmap resolution for backdrops.
pub const DEFAULT_BACKDROP_DPI: f64 = 24.0;

/// Decorative art painted over the background fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motif {
    /// Background fill only.
    Plain,
    /// Title page art: a large glow, three sweeping curves and a robot outline.
    TitleSweep,
    /// Body page art: curves in the top-right and bottom-left corners and a small glow.
    CornerCurves,
}

/// A full-page background: fill color plus a motif drawn in accent colors.
#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
    fill: Color,
    stroke: Color,
    glow: Color,
    motif: Motif,
    dpi: f64,
}

impl Backdrop {
    /// Creates a backdrop with the given background fill and no motif.
    pub fn new(fill: Color) -> Self {
        Self {
            fill,
            stroke: fill,
            glow: fill,
            motif: Motif::Plain,
            dpi: DEFAULT_BACKDROP_DPI,
        }
    }

    /// Sets the motif and the colors used for its strokes and glows.
    pub fn with_motif(mut self, motif: Motif, stroke: Color, glow: Color) -> Self {
        self.motif = motif;
        self.stroke = stroke;
        self.glow = glow;
        self
    }

    /// Overrides the bitmap resolution.
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi.max(1.0);
        self
    }

    pub fn motif(&self) -> Motif {
        self.motif
    }

    /// Paints the backdrop for a page of `width` x `height` points.
    pub fn rasterize(&self, width: f64, height: f64) -> RgbImage {
        let mut canvas = Canvas::new(width, height, self.dpi, self.fill);
        match self.motif {
            Motif::Plain => {}
            Motif::TitleSweep => self.paint_title_sweep(&mut canvas),
            Motif::CornerCurves => self.paint_corner_curves(&mut canvas),
        }
        canvas.into_image()
    }

    fn paint_title_sweep(&self, canvas: &mut Canvas) {
        let h = canvas.height;
        canvas.fill_circle((120.0, h - 350.0), 200.0, self.glow, 0.06);

        for i in 0..3 {
            let offset = f64::from(i) * 25.0;
            let curve = cubic(
                (-30.0 + offset, h - 150.0),
                (80.0 + offset, h - 300.0),
                (120.0 + offset, h - 450.0),
                (60.0 + offset, h - 600.0),
            );
            canvas.stroke(&curve, 1.0, self.stroke, 0.12);
        }

        canvas.stroke(
            &round_rect((50.0, h - 520.0), (70.0, 110.0), 22.0),
            1.0,
            self.stroke,
            0.08,
        );
        canvas.stroke(
            &round_rect((62.0, h - 480.0), (46.0, 45.0), 14.0),
            1.0,
            self.stroke,
            0.08,
        );
    }

    fn paint_corner_curves(&self, canvas: &mut Canvas) {
        let (w, h) = (canvas.width, canvas.height);
        let top_right = cubic(
            (w - 50.0, h),
            (w, h - 100.0),
            (w, h - 200.0),
            (w - 100.0, h - 250.0),
        );
        canvas.stroke(&top_right, 1.0, self.stroke, 0.1);

        let bottom_left = cubic((0.0, 100.0), (50.0, 50.0), (100.0, 30.0), (150.0, 0.0));
        canvas.stroke(&bottom_left, 1.0, self.stroke, 0.1);

        canvas.fill_circle((80.0, h - 120.0), 100.0, self.glow, 0.03);
    }
}

type Point = (f64, f64);

const CURVE_SEGMENTS: usize = 48;

/// Flattens a cubic Bézier curve into a polyline.
fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Vec<Point> {
    (0..=CURVE_SEGMENTS)
        .map(|step| {
            let t = step as f64 / CURVE_SEGMENTS as f64;
            let u = 1.0 - t;
            let a = u * u * u;
            let b = 3.0 * u * u * t;
            let c = 3.0 * u * t * t;
            let d = t * t * t;
            (
                a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
                a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
            )
        })
        .collect()
}

/// Outline of a rounded rectangle whose bottom-left corner is `origin`, as a closed polyline.
fn round_rect(origin: Point, size: (f64, f64), radius: f64) -> Vec<Point> {
    let (x, y) = origin;
    let (w, h) = size;
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    let corners = [
        ((x + w - r, y + h - r), 0.0),
        ((x + r, y + h - r), 90.0),
        ((x + r, y + r), 180.0),
        ((x + w - r, y + r), 270.0),
    ];

    let mut points = Vec::new();
    for ((cx, cy), start) in corners {
        for step in 0..=8 {
            let angle = (start + f64::from(step) * 90.0 / 8.0).to_radians();
            points.push((cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

struct Canvas {
    image: RgbImage,
    width: f64,
    height: f64,
    scale: f64,
}

impl Canvas {
    fn new(width: f64, height: f64, dpi: f64, fill: Color) -> Self {
        let scale = dpi / 72.0;
        let px_width = ((width * scale).round() as u32).max(1);
        let px_height = ((height * scale).round() as u32).max(1);
        let (r, g, b) = channels(fill);
        let image = ImageBuffer::from_pixel(px_width, px_height, Rgb([r, g, b]));
        Self {
            image,
            width,
            height,
            scale,
        }
    }

    fn into_image(self) -> RgbImage {
        self.image
    }

    fn to_pixel(&self, point: Point) -> Point {
        (point.0 * self.scale, (self.height - point.1) * self.scale)
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Color, alpha: f64) {
        let pixel = self.image.get_pixel_mut(x, y);
        let [r, g, b] = pixel.0;
        let (r, g, b) = channels(blend(Color::Rgb(r, g, b), color, alpha));
        *pixel = Rgb([r, g, b]);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, alpha: f64) {
        let (cx, cy) = self.to_pixel(center);
        let r = radius * self.scale;
        let (w, h) = self.image.dimensions();
        let x0 = (cx - r).floor().max(0.0) as u32;
        let y0 = (cy - r).floor().max(0.0) as u32;
        let x1 = ((cx + r).ceil().max(0.0) as u32).min(w);
        let y1 = ((cy + r).ceil().max(0.0) as u32).min(h);

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Strokes a polyline. Every covered pixel is blended exactly once.
    fn stroke(&mut self, points: &[Point], width: f64, color: Color, alpha: f64) {
        let (w, h) = self.image.dimensions();
        let mut covered = vec![false; (w as usize) * (h as usize)];
        let half = (width * self.scale / 2.0).max(0.5);

        for pair in points.windows(2) {
            let a = self.to_pixel(pair[0]);
            let b = self.to_pixel(pair[1]);
            let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
            let steps = (length * 2.0).ceil().max(1.0) as usize;
            for step in 0..=steps {
                let t = step as f64 / steps as f64;
                let px = a.0 + (b.0 - a.0) * t;
                let py = a.1 + (b.1 - a.1) * t;
                mark_disc(&mut covered, (w, h), (px, py), half);
            }
        }

        for y in 0..h {
            for x in 0..w {
                if covered[(y as usize) * (w as usize) + x as usize] {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }
}

fn mark_disc(covered: &mut [bool], (w, h): (u32, u32), (px, py): Point, radius: f64) {
    let x0 = (px - radius).floor();
    let x1 = (px + radius).ceil();
    let y0 = (py - radius).floor();
    let y1 = (py + radius).ceil();
    let mut y = y0;
    while y < y1 {
        let mut x = x0;
        while x < x1 {
            if x >= 0.0 && y >= 0.0 && (x as u32) < w && (y as u32) < h {
                let dx = x + 0.5 - px;
                let dy = y + 0.5 - py;
                if dx * dx + dy * dy <= radius * radius + 0.25 {
                    covered[(y as usize) * (w as usize) + x as usize] = true;
                }
            }
            x += 1.0;
        }
        y += 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::rgb;

    const LETTER: (f64, f64) = (612.0, 792.0);
    const BG: Color = rgb(0x002130);

    fn pixel_at(image: &RgbImage, point: Point, dpi: f64) -> [u8; 3] {
        let scale = dpi / 72.0;
        let x = (point.0 * scale) as u32;
        let y = ((LETTER.1 - point.1) * scale) as u32;
        image.get_pixel(x, y).0
    }

    #[test]
    fn plain_backdrop_is_a_solid_fill() {
        let image = Backdrop::new(BG).rasterize(LETTER.0, LETTER.1);
        assert_eq!(image.dimensions(), (204, 264));
        assert!(image.pixels().all(|pixel| pixel.0 == [0x00, 0x21, 0x30]));
    }

    #[test]
    fn corner_curves_leave_the_page_center_untouched() {
        let backdrop = Backdrop::new(BG)
            .with_motif(Motif::CornerCurves, rgb(0x3cba92), rgb(0x0ba360))
            .with_dpi(36.0);
        let image = backdrop.rasterize(LETTER.0, LETTER.1);

        assert_eq!(pixel_at(&image, (306.0, 396.0), 36.0), [0x00, 0x21, 0x30]);
        let glow = pixel_at(&image, (80.0, LETTER.1 - 120.0), 36.0);
        assert_ne!(glow, [0x00, 0x21, 0x30]);
        assert!(glow[1] > 0x21, "glow should lighten the green channel");
    }

    #[test]
    fn title_sweep_paints_left_half_only() {
        let backdrop = Backdrop::new(BG)
            .with_motif(Motif::TitleSweep, Color::Rgb(255, 255, 255), rgb(0x0ba360))
            .with_dpi(18.0);
        let plain = Backdrop::new(BG).with_dpi(18.0).rasterize(LETTER.0, LETTER.1);
        let image = backdrop.rasterize(LETTER.0, LETTER.1);

        let changed = image
            .pixels()
            .zip(plain.pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > 0);
        assert_eq!(pixel_at(&image, (560.0, 60.0), 18.0), [0x00, 0x21, 0x30]);
    }

    #[test]
    fn stroke_blends_each_pixel_once() {
        let mut canvas = Canvas::new(72.0, 72.0, 72.0, Color::Rgb(0, 0, 0));
        let line = [(10.0, 36.0), (30.0, 36.0), (10.0, 36.0)];
        canvas.stroke(&line, 1.0, Color::Rgb(200, 200, 200), 0.5);
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(20, 36).0, [100, 100, 100]);
        assert_eq!(image.get_pixel(50, 36).0, [0, 0, 0]);
        assert_eq!(image.get_pixel(20, 10).0, [0, 0, 0]);
    }

    #[test]
    fn cubic_hits_end_points() {
        let curve = cubic((0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0));
        assert_eq!(curve.first(), Some(&(0.0, 0.0)));
        let last = curve.last().copied().unwrap();
        assert!((last.0 - 4.0).abs() < 1e-9 && last.1.abs() < 1e-9);
    }

    #[test]
    fn round_rect_is_closed() {
        let outline = round_rect((0.0, 0.0), (10.0, 20.0), 3.0);
        assert_eq!(outline.first(), outline.last());
        assert!(outline
            .iter()
            .all(|(x, y)| (-1e-9..=10.0 + 1e-9).contains(x) && (-1e-9..=20.0 + 1e-9).contains(y)));
    }
}
