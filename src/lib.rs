//! tablayout: paginated layout engine for guitar and bass tablature.
//!
//! Takes a score (parts → measures → chords → notes) and computes where
//! everything goes: which measures share a line, which lines share a page,
//! where stems, beams and dots hang below the staff, how annotations stack
//! above it and how ties and slides connect notes across measures and
//! lines. The result is a [`LayoutTree`] of positioned boxes that can be
//! hit-tested or rendered to SVG.
//!
//! # Example
//! ```no_run
//! use tablayout::{layout_json, render_svg, LayoutConfig, RenderStyle};
//!
//! let json = std::fs::read_to_string("song.json").unwrap();
//! let tree = layout_json(&json, None).unwrap();
//! println!("Pages: {}", tree.pages().len());
//! let svg = render_svg(&tree, &LayoutConfig::default(), &RenderStyle::default());
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod renderer;

pub use config::LayoutConfig;
pub use error::{LayoutError, Result};
pub use layout::{layout_score, ElementKind, ElementTag, LayoutTree, MeasurePosition, NodeId, Point, Rect};
pub use model::*;
pub use renderer::{default_palette, render_score_to_svg, render_svg, RenderStyle};

/// Decode a score from its JSON form.
pub fn score_from_json(json: &str) -> Result<Score> {
    Ok(serde_json::from_str(json)?)
}

/// Convert a score to a JSON string.
/// Useful for handing the input model across process boundaries.
pub fn score_to_json(score: &Score) -> Result<String> {
    Ok(serde_json::to_string_pretty(score)?)
}

/// Decode a score (and optionally a configuration) from JSON and lay it out.
///
/// A missing configuration uses [`LayoutConfig::default`].
pub fn layout_json(score_json: &str, config_json: Option<&str>) -> Result<LayoutTree> {
    let score = score_from_json(score_json)?;
    let config = match config_json {
        Some(json) => LayoutConfig::from_json(json)?,
        None => LayoutConfig::default(),
    };
    Ok(layout_score(&score, &config))
}

/// Positions of every laid-out measure as JSON, for hosts that drive a
/// playback cursor.
pub fn measure_positions_json(tree: &LayoutTree) -> Result<String> {
    Ok(serde_json::to_string(&tree.measure_positions())?)
}
