//! Shared constants for the SVG renderer (all in SVG user units).

// ── Strokes ─────────────────────────────────────────────────────────
pub(super) const STAFF_LINE_WIDTH: f64 = 0.8;
pub(super) const BARLINE_WIDTH: f64 = 1.0;
pub(super) const ARC_STROKE_WIDTH: f64 = 1.2;
pub(super) const SLIDE_STROKE_WIDTH: f64 = 1.2;
pub(super) const VIBRATO_STROKE_WIDTH: f64 = 1.0;
pub(super) const DASHED_STROKE_WIDTH: f64 = 0.8;
pub(super) const DEBUG_OUTLINE_WIDTH: f64 = 0.5;

// ── Text ────────────────────────────────────────────────────────────
pub(super) const NOTE_FONT_SIZE: f64 = 11.0;
pub(super) const CHORD_NAME_FONT_SIZE: f64 = 12.0;
pub(super) const DASHED_LABEL_FONT_SIZE: f64 = 9.0;
pub(super) const TEXT_BASELINE_FACTOR: f64 = 0.35; // baseline below the vertical center, per font size
pub(super) const DASHED_LABEL_CHAR_WIDTH: f64 = 5.0;

// ── Glyph shapes ────────────────────────────────────────────────────
pub(super) const REST_GLYPH_WIDTH: f64 = 6.0;
pub(super) const REST_GLYPH_HEIGHT: f64 = 4.0;
pub(super) const VIBRATO_PERIOD: f64 = 4.0;
pub(super) const DASH_PATTERN: &str = "3,2";
pub(super) const DASHED_END_TICK: f64 = 4.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const NOTE_COLOR: &str = "#1a1a1a";
pub(super) const STAFF_COLOR: &str = "#555555";
pub(super) const BARLINE_COLOR: &str = "#333333";
pub(super) const CHORD_COLOR: &str = "#4a4a9a";
pub(super) const HEADER_COLOR: &str = "#1a1a1a";
pub(super) const REST_COLOR: &str = "#1a1a1a";
pub(super) const PAGE_COLOR: &str = "white";
pub(super) const PAGE_BORDER_COLOR: &str = "#dddddd";
pub(super) const BACKGROUND_COLOR: &str = "#f4f4f4";
