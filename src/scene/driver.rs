use tracing::trace;

use crate::animation::anim::Animation;
use crate::animation::ops::{Bundle, NoAnimation};
use crate::encode::sink::{FrameSink, SinkConfig, WriteSink};
use crate::foundation::config::Config;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SceneError, SceneResult};
use crate::graph::node::Node;
use crate::render::svg::{FrameView, Renderer, SvgRenderer};
use crate::updater::{Updater, UpdaterBundle, UpdaterHandle};

/// Authoring API a scene exposes, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneMode {
    /// Every [`Scene::play`] runs its animation to completion immediately.
    Player,
    /// Animations accumulate through [`Scene::push_animation`] and run on [`Scene::run`] or at the
    /// end of a [`Scene::with_scope`] block.
    Animations,
}

/// Top-level frame driver.
///
/// Owns the drawable list, the pending animation bundle, the updater bundle, a renderer and the
/// frame sink. Each emitted frame advances the animations by one external frame, then runs the
/// active updaters, then renders.
pub struct Scene {
    config: Config,
    mode: SceneMode,
    drawables: Vec<Node>,
    animations: Bundle,
    updaters: UpdaterBundle,
    renderer: Box<dyn Renderer>,
    sink: Box<dyn FrameSink>,
    frames_emitted: u64,
    started: bool,
    ended: bool,
}

impl Scene {
    /// Scene streaming SVG frames to standard output.
    pub fn new(config: Config, mode: SceneMode) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            mode,
            drawables: Vec::new(),
            animations: Bundle::new(),
            updaters: UpdaterBundle::new(),
            renderer: Box::new(SvgRenderer::new()),
            sink: Box::new(WriteSink::stdout()),
            frames_emitted: 0,
            started: false,
            ended: false,
        })
    }

    pub fn with_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Seconds of output emitted so far.
    pub fn time(&self) -> f64 {
        self.config.fps.frames_to_secs(self.frames_emitted)
    }

    pub fn drawables(&self) -> &[Node] {
        &self.drawables
    }

    /// Register a top-level drawable. Adding the same node twice is a no-op.
    pub fn add(&mut self, node: &Node) {
        if !self.drawables.iter().any(|n| n.ptr_eq(node)) {
            self.drawables.push(node.clone());
        }
    }

    /// Deregister a top-level drawable. Returns `true` if it was registered.
    pub fn remove(&mut self, node: &Node) -> bool {
        let before = self.drawables.len();
        self.drawables.retain(|n| !n.ptr_eq(node));
        self.drawables.len() != before
    }

    /// Queue an animation for the next [`Scene::run`].
    ///
    /// Fails when it writes a property that a registered updater or another queued animation
    /// writes.
    pub fn push_animation(&mut self, animation: impl Animation + 'static) -> SceneResult<()> {
        self.require(SceneMode::Animations, "push_animation")?;
        self.check_against_updaters(&animation)?;
        self.animations.push(animation)
    }

    /// Register an updater; it runs every frame until removed.
    pub fn push_updater(&mut self, updater: impl Updater + 'static) -> SceneResult<UpdaterHandle> {
        if let Some((object, property)) = self.animations.locker().conflict_with(updater.locker()) {
            return Err(SceneError::locked(object, property));
        }
        let handle = UpdaterHandle::new(updater);
        self.updaters.push(handle.clone())?;
        Ok(handle)
    }

    /// Deregister an updater. Returns `true` if it was registered.
    pub fn remove_updater(&mut self, handle: &UpdaterHandle) -> bool {
        self.updaters.remove(handle)
    }

    pub fn updaters(&self) -> &UpdaterBundle {
        &self.updaters
    }

    /// Advance the queued animations by one frame and emit it.
    ///
    /// Returns `Ok(false)` without emitting once the queue is exhausted; the queue is then reset.
    pub fn next_frame(&mut self) -> SceneResult<bool> {
        self.start()?;
        let mut bundle = std::mem::take(&mut self.animations);
        let more = self.step(&mut bundle)?;
        if more {
            self.animations = bundle;
        }
        Ok(more)
    }

    /// Run every queued animation to completion. Returns the number of frames emitted.
    #[tracing::instrument(skip(self), fields(mode = ?self.mode))]
    pub fn run(&mut self) -> SceneResult<u64> {
        self.start()?;
        let mut bundle = std::mem::take(&mut self.animations);
        let before = self.frames_emitted;
        while self.step(&mut bundle)? {}
        Ok(self.frames_emitted - before)
    }

    /// Run `animation` to completion right away. Returns the number of frames emitted.
    #[tracing::instrument(skip(self, animation))]
    pub fn play(&mut self, animation: impl Animation + 'static) -> SceneResult<u64> {
        self.require(SceneMode::Player, "play")?;
        self.check_against_updaters(&animation)?;
        self.start()?;
        let mut bundle = Bundle::new();
        bundle.push(animation)?;
        let before = self.frames_emitted;
        while self.step(&mut bundle)? {}
        Ok(self.frames_emitted - before)
    }

    /// Hold the current state for `duration` seconds (`None`: the configured default).
    ///
    /// Plays immediately in player mode; queues in animations mode.
    pub fn wait(&mut self, duration: Option<f64>) -> SceneResult<()> {
        let pause = NoAnimation::new(&self.config, duration)?;
        match self.mode {
            SceneMode::Player => self.play(pause).map(|_| ()),
            SceneMode::Animations => self.push_animation(pause),
        }
    }

    /// Run `f` against a scoped scene state, then play what it queued.
    ///
    /// Drawables and updaters registered inside the scope are dropped on exit, and animations
    /// queued before the scope resume afterwards. The outer state is restored even when `f` fails.
    #[tracing::instrument(skip(self, f))]
    pub fn with_scope<R>(
        &mut self,
        f: impl FnOnce(&mut Scene) -> SceneResult<R>,
    ) -> SceneResult<R> {
        self.require(SceneMode::Animations, "with_scope")?;
        let saved_drawables = self.drawables.clone();
        let saved_updaters = self.updaters.clone();
        let outer = std::mem::take(&mut self.animations);

        let result = f(self).and_then(|r| self.run().map(|_| r));

        self.drawables = saved_drawables;
        self.updaters = saved_updaters;
        self.animations = outer;
        result
    }

    /// Close the frame stream. Returns the total number of frames emitted.
    pub fn finish(mut self) -> SceneResult<u64> {
        self.start()?;
        self.end()?;
        Ok(self.frames_emitted)
    }

    fn step(&mut self, bundle: &mut Bundle) -> SceneResult<bool> {
        if !bundle.next_frame()? {
            return Ok(false);
        }
        let t = self.time();
        self.updaters.update(t, self.config.dt())?;
        self.emit()?;
        Ok(true)
    }

    fn start(&mut self) -> SceneResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.sink.begin(SinkConfig {
            frame_size: self.config.frame_size,
            fps: self.config.fps,
        })?;
        if self.config.print_initial {
            self.emit()?;
        }
        Ok(())
    }

    fn end(&mut self) -> SceneResult<()> {
        if self.ended {
            return Ok(());
        }
        self.ended = true;
        self.sink.end()
    }

    fn emit(&mut self) -> SceneResult<()> {
        let index = FrameIndex(self.frames_emitted);
        let view = FrameView {
            index,
            config: &self.config,
            drawables: &self.drawables,
        };
        let svg = self.renderer.render(&view)?;
        self.sink.push_frame(index, &svg)?;
        trace!(frame = index.0, bytes = svg.len(), "frame emitted");
        self.frames_emitted += 1;
        Ok(())
    }

    fn require(&self, mode: SceneMode, op: &str) -> SceneResult<()> {
        if self.mode != mode {
            return Err(SceneError::ModeMismatch(format!(
                "{op} requires a {mode:?} scene, this one is {:?}",
                self.mode
            )));
        }
        Ok(())
    }

    fn check_against_updaters(&self, animation: &impl Animation) -> SceneResult<()> {
        if let Some((object, property)) = self.updaters.locker().conflict_with(animation.locker()) {
            return Err(SceneError::locked(object, property));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("mode", &self.mode)
            .field("drawables", &self.drawables.len())
            .field("animations", &self.animations.len())
            .field("updaters", &self.updaters.len())
            .field("frames_emitted", &self.frames_emitted)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/driver.rs"]
mod tests;
