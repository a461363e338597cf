// Report module: turns analyzer output into plain text for stdout.

pub mod terminal;

pub use terminal::{RenderOptions, render_assessment, render_band_groups, render_summary};
