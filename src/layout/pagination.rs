//! Pagination: fills lines with measures and pages with lines.
//!
//! Both levels use the same move: speculatively `try_add` onto the current
//! container and, when it refuses, finish the container and start a fresh
//! one with the element that did not fit.

use crate::config::LayoutConfig;
use crate::model::*;
use super::constants::*;
use super::element::{Element, ElementKind, Group};
use super::flex::FlexGroup;
use super::geom::Rect;
use super::line::{LineBuilder, PartContext};
use super::measure::layout_measure;

// ═══════════════════════════════════════════════════════════════════════
// Page accumulation
// ═══════════════════════════════════════════════════════════════════════

struct Paginator<'a> {
    config: &'a LayoutConfig,
    /// Content area of the page being filled
    page: FlexGroup,
    pages: Vec<Element>,
}

impl<'a> Paginator<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self { config, page: Self::blank_page(config), pages: Vec::new() }
    }

    fn blank_page(config: &LayoutConfig) -> FlexGroup {
        FlexGroup::vertical(config.content_width(), config.content_height())
    }

    /// Put a line or header on the current page, separated from what is
    /// already there by the configured line spacing. Starts a new page when
    /// it does not fit; a spacer never opens a page.
    fn place(&mut self, element: Element) {
        let spacer = Element::space(self.config.content_width(), self.config.line_spacing);
        let mut spaced = false;
        if !self.page.is_empty() {
            if self.page.try_add(spacer, None).is_ok() {
                spaced = true;
            } else {
                self.flush_page();
            }
        }

        if let Err(element) = self.page.try_add(element, None) {
            if spaced {
                self.page.pop();
            }
            self.flush_page();
            self.page.add(element, None);
        }
    }

    /// Close the current page: wrap its content in a fixed-size page with
    /// the margins applied.
    fn flush_page(&mut self) {
        if self.page.is_empty() {
            return;
        }
        let mut content = std::mem::replace(&mut self.page, Self::blank_page(self.config));
        content.rect.x = self.config.margin_left;
        content.rect.y = self.config.margin_top;

        let index = self.pages.len();
        log::debug!(
            "page {} flushed with {} lines",
            index + 1,
            content.children().iter().filter(|c| c.kind == ElementKind::PageLine).count()
        );

        let mut page = Group::new(Rect::from_size(self.config.page_width, self.config.page_height));
        page.add(Element::flex(ElementKind::Group, content));
        self.pages.push(Element::group(ElementKind::Page { index }, page));
    }

    /// Stack every page, with the configured gap between them.
    fn finish(mut self) -> Element {
        self.flush_page();
        let mut root = FlexGroup::vertical(self.config.page_width, 0.0);
        for (i, page) in self.pages.into_iter().enumerate() {
            if i > 0 {
                root.add(Element::space(self.config.page_width, self.config.page_spacing), None);
            }
            root.add(page, None);
        }
        root.fit_content();
        Element::flex(ElementKind::Score, root)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Headers
// ═══════════════════════════════════════════════════════════════════════

/// A text centered across the content width by two equally stretched spaces.
fn centered_text(kind: ElementKind, text: &str, size: f64, width: f64) -> Element {
    let height = size * HEADER_LINE_FACTOR;
    let text_width = text.chars().count() as f64 * size * HEADER_CHAR_WIDTH_FACTOR;
    let mut row = FlexGroup::horizontal(width, height);
    row.add(Element::space(0.0, height), Some(1.0));
    row.add(
        Element::leaf(
            ElementKind::Text { text: text.to_string(), size },
            Rect::from_size(text_width, height),
        ),
        None,
    );
    row.add(Element::space(0.0, height), Some(1.0));
    row.layout(true);
    Element::flex(kind, row)
}

// ═══════════════════════════════════════════════════════════════════════
// Main pagination loop
// ═══════════════════════════════════════════════════════════════════════

/// Lay out every part of `score` and return the score root element.
pub(super) fn paginate(score: &Score, config: &LayoutConfig) -> Element {
    let mut paginator = Paginator::new(config);
    let width = config.content_width();

    if let Some(title) = &score.title {
        paginator.place(centered_text(ElementKind::Group, title, TITLE_FONT_SIZE, width));
    }
    if let Some(artist) = &score.artist {
        paginator.place(centered_text(ElementKind::Group, artist, PART_NAME_FONT_SIZE, width));
    }

    for (part_index, part) in score.parts.iter().enumerate() {
        paginator.place(centered_text(
            ElementKind::Part { index: part_index, name: part.name.clone() },
            &part.name,
            PART_NAME_FONT_SIZE,
            width,
        ));

        let ctx = PartContext::new(part, config);
        let mut line = LineBuilder::new(ctx.line_width, ctx.staff_height());
        for index in 0..part.measures.len() {
            let measure = layout_measure(
                part,
                part_index,
                index,
                ctx.shown_time_signature(index),
                ctx.line_height,
            );
            if let Err(measure) = line.try_push_measure(measure, index) {
                let next = LineBuilder::starting_with(ctx.line_width, ctx.staff_height(), measure, index);
                let full = std::mem::replace(&mut line, next);
                paginator.place(full.finish(&ctx, true));
            }
        }
        if !line.is_empty() {
            paginator.place(line.finish(&ctx, config.stretch_last_line));
        }
        log::debug!("part {} ({}) laid out", part_index + 1, part.name);
    }

    paginator.finish()
}
