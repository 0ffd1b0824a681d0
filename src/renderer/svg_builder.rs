//! SVG builder: accumulates SVG elements and produces the final string.

use super::constants::*;

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
    height: f64,
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub(super) fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Helvetica', 'Arial', sans-serif;">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    pub(super) fn dashed_line(&mut self, x1: f64, y: f64, x2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-dasharray="{}"/>"#,
            x1, y, x2, y, color, width, DASH_PATTERN
        ));
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, stroke: &str, stroke_width: f64) {
        if stroke_width > 0.0 {
            self.elements.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"/>"#,
                x, y, w, h, fill, stroke, stroke_width
            ));
        } else {
            self.elements.push(format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                x, y, w, h, fill
            ));
        }
    }

    pub(super) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.elements.push(format!(
            r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
    }

    pub(super) fn text(&mut self, x: f64, y: f64, content: &str, size: f64, weight: &str, fill: &str, anchor: &str) {
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" font-weight="{}" fill="{}" text-anchor="{}">{}</text>"#,
            x, y, size, weight, fill, anchor, escape(content)
        ));
    }

    /// Chord symbols are set in a serif face, like printed chord charts.
    pub(super) fn chord_text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str) {
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-family="Times New Roman, serif" font-size="{:.0}" font-weight="normal" fill="{}" text-anchor="start">{}</text>"#,
            x, y, size, fill, escape(content)
        ));
    }

    pub(super) fn path(&mut self, d: &str, fill: &str, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            d, fill, stroke, stroke_width
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Empty SVG fallback
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn empty_svg(message: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 100\">\
         <text x=\"200\" y=\"50\" text-anchor=\"middle\" font-size=\"14\" fill=\"gray\">{}</text>\
         </svg>",
        escape(message)
    )
}
