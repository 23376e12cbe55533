// At most one redraw per calendar minute

use super::MinuteBucket;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderGate {
    last_rendered: Option<MinuteBucket>,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_rendered(&self) -> Option<MinuteBucket> {
        self.last_rendered
    }

    pub fn should_redraw(&self, current: MinuteBucket) -> bool {
        self.last_rendered != Some(current)
    }

    /// Call after the renderer accepted the frame.
    pub fn mark_rendered(&mut self, current: MinuteBucket) {
        self.last_rendered = Some(current);
    }
}
