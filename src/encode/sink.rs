use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use tracing::debug;

use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::SceneResult;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Physical frame size in pixels.
    pub frame_size: Canvas,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()>;
    /// Push one complete SVG document.
    fn push_frame(&mut self, idx: FrameIndex, svg: &str) -> SceneResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SceneResult<()>;
}

/// Writes each frame followed by a newline to a byte stream.
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    out: W,
    frames: u64,
}

impl WriteSink<std::io::Stdout> {
    /// Sink on the process's standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> WriteSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, frames: 0 }
    }

    /// Frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for WriteSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        debug!(
            width = cfg.frame_size.width,
            height = cfg.frame_size.height,
            fps = cfg.fps.as_f64(),
            "frame stream started"
        );
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, svg: &str) -> SceneResult<()> {
        self.out.write_all(svg.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        self.out.flush()?;
        debug!(frames = self.frames, "frame stream finished");
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Captured {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, String)>,
    ended: bool,
}

/// In-memory sink for tests and debugging.
///
/// Clones share the same storage, so a test can keep one while the scene owns another.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    inner: Rc<RefCell<Captured>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.inner.borrow().cfg.clone()
    }

    /// Copy of the captured frames.
    pub fn frames(&self) -> Vec<(FrameIndex, String)> {
        self.inner.borrow().frames.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().frames.is_empty()
    }

    /// Whether `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.inner.borrow().ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SceneResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.cfg = Some(cfg);
        inner.frames.clear();
        inner.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, svg: &str) -> SceneResult<()> {
        self.inner.borrow_mut().frames.push((idx, svg.to_owned()));
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        self.inner.borrow_mut().ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
