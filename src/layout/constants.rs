//! Fixed glyph metrics for the layout engine (all in user units).
//!
//! Page geometry and staff line spacing are configurable through
//! [`crate::LayoutConfig`]; everything here is a property of the glyphs.

// ── Measures ────────────────────────────────────────────────────────
pub(super) const MEASURE_LEADING_SPACE: f64 = 10.0; // gap between bar line and first chord
pub(super) const BAR_LINE_WIDTH: f64 = 1.0;
pub(super) const TIME_SIGNATURE_WIDTH: f64 = 16.0;
pub(super) const TIME_SIGNATURE_FONT_SIZE: f64 = 16.0;

// ── Chords and notes ────────────────────────────────────────────────
pub(super) const QUARTER_NOTE_WIDTH: f64 = 24.0;
pub(super) const MIN_NOTE_WIDTH: f64 = 10.0;
pub(super) const REST_WIDTH: f64 = 10.0;
pub(super) const NOTE_CHAR_WIDTH: f64 = 7.0; // approximated advance per character
pub(super) const NOTE_PADDING: f64 = 2.0;
pub(super) const BEND_WIDTH_FACTOR: f64 = 2.0;

// ── Below the staff: stems, beams, dots ─────────────────────────────
pub(super) const STEM_WIDTH: f64 = 1.0;
pub(super) const STEM_HEIGHT: f64 = 24.0;
pub(super) const SHORT_STEM_HEIGHT: f64 = 12.0; // half notes
pub(super) const BEAM_HEIGHT: f64 = 3.0;
pub(super) const BEAM_LEVEL_STEP: f64 = 1.5 * BEAM_HEIGHT;
pub(super) const BEAM_STUB_WIDTH: f64 = 6.0;
pub(super) const DOT_SIZE: f64 = 3.0;
pub(super) const DOT_GAP: f64 = 2.0;

// ── Above the staff ─────────────────────────────────────────────────
pub(super) const GRID_ROW_SPACING: f64 = 2.0;
pub(super) const TEXT_FONT_SIZE: f64 = 10.0;
pub(super) const TEXT_HEIGHT: f64 = 12.0;
pub(super) const MEASURE_NUMBER_FONT_SIZE: f64 = 9.0;
pub(super) const CHORD_NAME_HEIGHT: f64 = 14.0;
pub(super) const VIBRATO_HEIGHT: f64 = 6.0;

// ── Ties and slides ─────────────────────────────────────────────────
pub(super) const ARC_HEIGHT: f64 = 6.0;
pub(super) const SLIDE_WIDTH: f64 = 8.0; // slides into or out of nowhere
pub(super) const SLIDE_HEIGHT: f64 = 5.0;

// ── Staff ───────────────────────────────────────────────────────────
pub(super) const STAFF_LINE_THICKNESS: f64 = 1.0;

// ── Headers ─────────────────────────────────────────────────────────
pub(super) const TITLE_FONT_SIZE: f64 = 22.0;
pub(super) const PART_NAME_FONT_SIZE: f64 = 14.0;
pub(super) const HEADER_CHAR_WIDTH_FACTOR: f64 = 0.55; // width per character, relative to font size
pub(super) const HEADER_LINE_FACTOR: f64 = 1.4; // header line height, relative to font size
