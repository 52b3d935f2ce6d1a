//! svgreel is a programmatic 2D scene-graph and animation engine that streams one SVG document
//! per frame.
//!
//! Authors build a tree of [`Node`]s, drive their properties with [`Animation`]s and per-frame
//! [`Updater`]s, and let a [`Scene`] emit frames into a [`FrameSink`]:
//!
//! - Property writes are arbitrated by [`Locker`]s at construction time
//! - [`Sequence`] and [`Bundle`] compose animations in time
//! - [`Lazy`] arguments defer reads until an animation starts
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod encode;
pub mod foundation;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod render;
pub mod scene;
pub mod updater;

pub use crate::foundation::config::Config;
pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, ObjectId, Rect, Rgb, SceneSize, Vec2,
};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::math::{Lerp, Transform};

pub use crate::animation::anim::{Animation, AnimationSpec, Compressed, Deferred, Pacing, Timeline};
pub use crate::animation::ease::Easing;
pub use crate::animation::lazy::{Arg, Lazy};
pub use crate::animation::locker::{ALL_PROPERTIES, Locker};
pub use crate::animation::ops::{
    Bundle, NoAnimation, RunFunction, Sequence, UpdaterAnimation, flash,
};
pub use crate::animation::path_anim::PathAnimation;
pub use crate::animation::property::{Animatable, PropertyAnimation, Timing, Tween, Value};
pub use crate::assets::image::ImageData;
pub use crate::assets::text::{ApproxMetrics, FontMetrics, MetricsCache, ParleyMetrics, TextExtent};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig, WriteSink};
pub use crate::geometry::path::{Path, Segment};
pub use crate::graph::node::{Node, NodeKind};
pub use crate::graph::shape::{Anchor, Shape};
pub use crate::graph::style::{ColorRef, Stroke, Style};
pub use crate::graph::transform::TransformRef;
pub use crate::layout::grid::GridOrganizer;
pub use crate::layout::tree::BinaryTreeOrganizer;
pub use crate::render::svg::{FrameView, Renderer, SvgRenderer};
pub use crate::scene::driver::{Scene, SceneMode};
pub use crate::updater::follow::TranslationUpdater;
pub use crate::updater::{FunctionUpdater, Updater, UpdaterBundle, UpdaterHandle};

/// Glob-importable set of the types most scenes need.
pub mod prelude {
    pub use crate::{
        Anchor, Animatable, Animation, AnimationSpec, Arg, Bundle, ColorRef, Config, Easing,
        FunctionUpdater, Lazy, Locker, Node, Path, PathAnimation, PropertyAnimation, Rgb, Scene,
        SceneError, SceneMode, SceneResult, Sequence, Transform, TransformRef, TranslationUpdater,
        Updater, Vec2,
    };
}
