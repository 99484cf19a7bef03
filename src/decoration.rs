//! Per-page chrome painted by the renderer after each page is started.
//!
//! A [`DecorationPlan`] pairs two [`PageChrome`] values, one for the first page and one for
//! every later page.  The plan is handed to the [`Renderer`](crate::render::Renderer) together
//! with the content; the renderer turns it into a `genpdf` page decorator that paints the
//! backdrop, the page number and the footer rule, then shrinks the page to its margins.

use std::cell::RefCell;
use std::rc::Rc;

use genpdf::elements::Paragraph;
use genpdf::error::Error;
use genpdf::fonts::{Font, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::{render, Alignment, Element, Margins, PageDecorator, Position};
use image::DynamicImage;
use log::debug;

use crate::backdrop::Backdrop;
use crate::elements::{full_page_image, mm_to_f64, mm_to_points, pt};
use crate::style::TextStyle;

/// The two page variants a plan distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageVariant {
    FirstPage,
    LaterPages,
}

impl PageVariant {
    /// Variant used for the given 1-based page number.
    pub fn for_page(page: usize) -> Self {
        if page <= 1 {
            PageVariant::FirstPage
        } else {
            PageVariant::LaterPages
        }
    }
}

/// Page number printed centered near the bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct PageNumber {
    style: TextStyle,
    /// Distance of the text line from the bottom edge, in points.
    offset: f64,
}

impl PageNumber {
    pub fn new(style: TextStyle) -> Self {
        Self {
            style,
            offset: 30.0,
        }
    }

    pub fn with_offset(mut self, points: f64) -> Self {
        self.offset = points;
        self
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

/// Horizontal hairline near the bottom edge, stroked at the default PDF line width.
#[derive(Clone, Debug, PartialEq)]
pub struct FooterRule {
    color: Color,
    offset: f64,
    inset: f64,
}

impl FooterRule {
    /// A rule 45pt above the bottom edge, inset 72pt from both sides.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            offset: 45.0,
            inset: 72.0,
        }
    }

    pub fn with_offset(mut self, points: f64) -> Self {
        self.offset = points;
        self
    }

    pub fn with_inset(mut self, points: f64) -> Self {
        self.inset = points;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Start x, end x and y of the rule on a `width` x `height` page, measured in points from
    /// the top-left corner.
    pub fn span(&self, width: f64, height: f64) -> (f64, f64, f64) {
        let start = self.inset.min(width / 2.0);
        (start, width - start, height - self.offset)
    }
}

/// Everything painted on one page variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageChrome {
    backdrop: Option<Backdrop>,
    page_number: Option<PageNumber>,
    footer_rule: Option<FooterRule>,
}

impl PageChrome {
    /// Chrome that paints nothing.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    /// Prints the page number. It is never printed on page 1.
    pub fn with_page_number(mut self, page_number: PageNumber) -> Self {
        self.page_number = Some(page_number);
        self
    }

    pub fn with_footer_rule(mut self, rule: FooterRule) -> Self {
        self.footer_rule = Some(rule);
        self
    }

    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.backdrop.as_ref()
    }

    pub fn page_number(&self) -> Option<&PageNumber> {
        self.page_number.as_ref()
    }

    pub fn footer_rule(&self) -> Option<&FooterRule> {
        self.footer_rule.as_ref()
    }
}

/// Chrome for the first page and for all later pages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecorationPlan {
    first_page: PageChrome,
    later_pages: PageChrome,
}

impl DecorationPlan {
    pub fn new(first_page: PageChrome, later_pages: PageChrome) -> Self {
        Self {
            first_page,
            later_pages,
        }
    }

    /// A plan without any chrome.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn chrome(&self, variant: PageVariant) -> &PageChrome {
        match variant {
            PageVariant::FirstPage => &self.first_page,
            PageVariant::LaterPages => &self.later_pages,
        }
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    page: usize,
    numbered: Vec<usize>,
}

/// Page bookkeeping shared between the decorator and anchor elements during one render.
#[derive(Clone, Debug, Default)]
pub(crate) struct PageTracker {
    state: Rc<RefCell<TrackerState>>,
}

impl PageTracker {
    fn begin_page(&self) -> usize {
        let mut state = self.state.borrow_mut();
        state.page += 1;
        state.page
    }

    fn mark_numbered(&self, page: usize) {
        self.state.borrow_mut().numbered.push(page);
    }

    /// The page currently being laid out (0 before the first page starts).
    pub(crate) fn current_page(&self) -> usize {
        self.state.borrow().page
    }

    pub(crate) fn numbered_pages(&self) -> Vec<usize> {
        self.state.borrow().numbered.clone()
    }
}

struct PreparedChrome {
    backdrop: Option<DynamicImage>,
    page_number: Option<(PageNumber, Style)>,
    footer_rule: Option<FooterRule>,
}

impl PreparedChrome {
    fn new(chrome: &PageChrome, page: (f64, f64), mono: Option<FontFamily<Font>>) -> Self {
        let backdrop = chrome.backdrop().map(|backdrop| {
            debug!("Rasterising {:?} backdrop", backdrop.motif());
            DynamicImage::ImageRgb8(backdrop.rasterize(page.0, page.1))
        });
        let page_number = chrome
            .page_number()
            .map(|number| (number.clone(), number.style.to_genpdf(mono)));
        Self {
            backdrop,
            page_number,
            footer_rule: chrome.footer_rule().cloned(),
        }
    }
}

/// `genpdf` page decorator executing a [`DecorationPlan`].
pub(crate) struct ChromeDecorator {
    first_page: PreparedChrome,
    later_pages: PreparedChrome,
    margins: Margins,
    tracker: PageTracker,
}

impl ChromeDecorator {
    /// Prepares both variants for a page of `page` (width, height) points.
    pub(crate) fn new(
        plan: &DecorationPlan,
        page: (f64, f64),
        margins: Margins,
        mono: Option<FontFamily<Font>>,
        tracker: PageTracker,
    ) -> Self {
        Self {
            first_page: PreparedChrome::new(plan.chrome(PageVariant::FirstPage), page, mono),
            later_pages: PreparedChrome::new(plan.chrome(PageVariant::LaterPages), page, mono),
            margins,
            tracker,
        }
    }
}

impl PageDecorator for ChromeDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'a>,
        style: Style,
    ) -> Result<render::Area<'a>, Error> {
        let page = self.tracker.begin_page();
        let chrome = match PageVariant::for_page(page) {
            PageVariant::FirstPage => &self.first_page,
            PageVariant::LaterPages => &self.later_pages,
        };
        let page_size = area.size();

        if let Some(backdrop) = &chrome.backdrop {
            let mut image = full_page_image(backdrop.clone(), page_size)?;
            image.render(context, area.clone(), style)?;
        }

        if let Some((number, number_style)) = &chrome.page_number {
            if page > 1 {
                let line_height = number_style.line_height(&context.font_cache);
                let mut number_area = area.clone();
                number_area.add_offset(Position::new(
                    0,
                    page_size.height - pt(number.offset()) - line_height,
                ));
                let mut label = Paragraph::new(page.to_string());
                label.set_alignment(Alignment::Center);
                label.render(context, number_area, style.and(*number_style))?;
                self.tracker.mark_numbered(page);
            }
        }

        if let Some(rule) = &chrome.footer_rule {
            let (start, end, y) = rule.span(
                mm_to_points(page_size.width),
                mm_to_points(page_size.height),
            );
            area.draw_line(
                vec![Position::new(pt(start), pt(y)), Position::new(pt(end), pt(y))],
                Style::new().with_color(rule.color),
            );
        }

        debug!(
            "Decorated page {} ({:.1} x {:.1} mm)",
            page,
            mm_to_f64(page_size.width),
            mm_to_f64(page_size.height)
        );

        area.add_margins(self.margins);
        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backdrop::Motif;
    use crate::style::rgb;

    #[test]
    fn first_page_variant_only_for_page_one() {
        assert_eq!(PageVariant::for_page(1), PageVariant::FirstPage);
        assert_eq!(PageVariant::for_page(2), PageVariant::LaterPages);
        assert_eq!(PageVariant::for_page(17), PageVariant::LaterPages);
    }

    #[test]
    fn plan_selects_chrome_by_variant() {
        let plan = DecorationPlan::new(
            PageChrome::blank().with_backdrop(
                Backdrop::new(rgb(0x002130)).with_motif(
                    Motif::TitleSweep,
                    rgb(0x3cba92),
                    rgb(0x0ba360),
                ),
            ),
            PageChrome::blank()
                .with_page_number(PageNumber::new(TextStyle::new().with_size(9)))
                .with_footer_rule(FooterRule::new(rgb(0x3cba92))),
        );

        let first = plan.chrome(PageVariant::FirstPage);
        assert_eq!(
            first.backdrop().map(Backdrop::motif),
            Some(Motif::TitleSweep)
        );
        assert!(first.page_number().is_none());

        let later = plan.chrome(PageVariant::LaterPages);
        assert!(later.backdrop().is_none());
        assert_eq!(later.page_number().map(PageNumber::offset), Some(30.0));
        assert!(later.footer_rule().is_some());
    }

    #[test]
    fn footer_rule_spans_between_insets() {
        let rule = FooterRule::new(rgb(0x3cba92));
        assert_eq!(rule.span(612.0, 792.0), (72.0, 540.0, 747.0));

        let moved = rule.with_offset(20.0).with_inset(36.0);
        assert_eq!(moved.span(612.0, 792.0), (36.0, 576.0, 772.0));
        assert_eq!(moved.color(), rgb(0x3cba92));
    }

    #[test]
    fn oversized_inset_collapses_to_center() {
        let rule = FooterRule::new(rgb(0xaeaeae)).with_inset(400.0);
        let (start, end, _) = rule.span(612.0, 792.0);
        assert_eq!(start, end);
    }

    #[test]
    fn page_number_offset_is_adjustable() {
        let number = PageNumber::new(TextStyle::new()).with_offset(18.0);
        assert_eq!(number.offset(), 18.0);
    }

    #[test]
    fn tracker_counts_pages_and_numbers() {
        let tracker = PageTracker::default();
        assert_eq!(tracker.current_page(), 0);
        let shared = tracker.clone();
        assert_eq!(shared.begin_page(), 1);
        assert_eq!(shared.begin_page(), 2);
        shared.mark_numbered(2);
        assert_eq!(tracker.current_page(), 2);
        assert_eq!(tracker.numbered_pages(), vec![2]);
    }
}
