// Refresh and redraw scheduling on a wall-clock-minute cadence

mod bucket;
mod refresh;
mod render_gate;

pub use bucket::MinuteBucket;
pub use refresh::{RefreshState, Source};
pub use render_gate::RenderGate;
