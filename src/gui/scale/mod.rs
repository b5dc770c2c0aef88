pub mod model;
pub mod style;
pub mod view;
pub mod widget;

pub use model::{
    DialGeometry, Point, ScaleError, ScaleState, ScaleUpdate, Tick, TickKind, TickLabel,
    WeightRange,
};
pub use style::{HexColor, ScaleStyle};
pub use view::draw;
pub use widget::{ScaleMsg, ScaleOutput, ScaleWidget};

pub const BASE_OFFSET_DEG: f64 = -90.0; // puts the initial weight at the top of the dial
pub const LABEL_GAP: f64 = 5.0; // between a label and the inner end of its tick
pub const TICK_STROKE_WIDTH: f64 = 1.0;
pub const LABEL_FONT: &str = "Sans";

// Ring shadow
pub const SHADOW_BLUR: f64 = 60.0; // how far the shadow spreads past the ring
pub const SHADOW_ALPHA: f64 = 50.0 / 255.0; // total opacity at the ring edge
pub const SHADOW_STEPS: usize = 12;
