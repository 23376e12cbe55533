// Display seam. The e-paper driver and bitmap layout are provided by the host application.

use crate::models::Frame;

pub trait Renderer: Send {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()>;

    /// Release the display (e.g. put the panel to sleep). Called once after the loop stops.
    fn shutdown(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Logs each frame as a JSON line instead of drawing it.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames_rendered: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &Frame) -> anyhow::Result<()> {
        let json = serde_json::to_string(frame)?;
        self.frames_rendered += 1;
        tracing::info!(frame = %json, "frame");
        Ok(())
    }

    fn shutdown(&mut self) -> anyhow::Result<()> {
        tracing::info!(frames_rendered = self.frames_rendered, "display released");
        Ok(())
    }
}
