use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::animation::property::{Animatable, Value};
use crate::assets::image::ImageData;
use crate::assets::text::{FontMetrics, TextExtent};
use crate::foundation::config::Config;
use crate::foundation::core::{ObjectId, Rect, Rgb, Vec2};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::Transform;
use crate::geometry::path::Path;
use crate::graph::invalidate::Observer;
use crate::graph::shape::{Anchor, Shape};
use crate::graph::style::{self, ColorRef, Stroke, Style, clamp_opacity};
use crate::graph::transform::TransformRef;

/// Property name of a node's ordering key.
pub const Z: &str = "z";
/// Property name of a rectangle's or image's width.
pub const WIDTH: &str = "width";
/// Property name of a rectangle's or image's height.
pub const HEIGHT: &str = "height";
/// Property name of a circle's radius.
pub const RADIUS: &str = "radius";
/// Property name of a text node's content.
pub const TEXT: &str = "text";

/// Text run with its measured extent.
#[derive(Clone)]
pub struct TextContent {
    pub text: String,
    pub family: String,
    pub size: f64,
    extent: TextExtent,
    metrics: Rc<dyn FontMetrics>,
}

impl TextContent {
    pub fn extent(&self) -> TextExtent {
        self.extent
    }

    fn remeasure(&mut self) -> SceneResult<()> {
        self.extent = self.metrics.measure(&self.text, &self.family, self.size)?;
        Ok(())
    }
}

impl std::fmt::Debug for TextContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextContent")
            .field("text", &self.text)
            .field("family", &self.family)
            .field("size", &self.size)
            .field("extent", &self.extent)
            .finish()
    }
}

/// Embedded image with its display size in scene units.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageContent {
    pub data: ImageData,
    pub width: f64,
    pub height: f64,
}

/// What a node draws. Geometry is given in the node's local space before the anchor shift.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Draws nothing itself; its shape covers its children.
    Group,
    /// Rectangle spanning `(0, 0)..(width, height)`.
    Rect { width: f64, height: f64 },
    /// Circle centred on the origin.
    Circle { radius: f64 },
    Path(Path),
    /// Text whose box spans `(0, 0)..(width, height)`.
    Text(TextContent),
    /// Image spanning `(0, 0)..(width, height)`.
    Image(ImageContent),
}

impl NodeKind {
    /// Bounds of the kind's own geometry.
    fn own_shape(&self) -> Shape {
        match self {
            Self::Group => Shape::default(),
            Self::Rect { width, height } => {
                Shape::from_rect(Rect::new(0.0, 0.0, *width, *height))
            }
            Self::Circle { radius } => {
                let r = radius.abs();
                Shape {
                    bounds: Rect::new(-r, -r, r, r),
                    radius: r,
                }
            }
            Self::Path(path) => Shape::from_rect(path.bounds()),
            Self::Text(t) => Shape::from_rect(Rect::new(0.0, 0.0, t.extent.width, t.extent.height)),
            Self::Image(img) => Shape::from_rect(Rect::new(0.0, 0.0, img.width, img.height)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Rect { .. } => "rect",
            Self::Circle { .. } => "circle",
            Self::Path(_) => "path",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }
}

struct NodeInner {
    id: ObjectId,
    transform: TransformRef,
    /// This node's registration on `transform`'s bus.
    observer: Weak<dyn Observer>,
    opacity: Cell<f64>,
    z: Cell<f64>,
    anchor: Cell<Anchor>,
    parent: RefCell<Weak<NodeInner>>,
    children: RefCell<Vec<Node>>,
    kind: RefCell<NodeKind>,
    style: RefCell<Style>,

    global: Cell<Option<Transform>>,
    shape: Cell<Option<Shape>>,
    transformed_shape: Cell<Option<Shape>>,
    global_shape: Cell<Option<Shape>>,
}

impl NodeInner {
    fn parent(&self) -> Option<Rc<NodeInner>> {
        self.parent.borrow().upgrade()
    }

    /// Drop this node's global caches and its descendants'.
    ///
    /// A node whose global transform is not cached has no descendant with a cached one, so the
    /// walk stops there.
    fn clear_global_tree(&self) {
        let was_cached = self.global.take().is_some();
        self.global_shape.set(None);
        if was_cached {
            for child in self.children.borrow().iter() {
                child.0.clear_global_tree();
            }
        }
    }

    /// Drop this node's shape caches and every ancestor's (group shapes cover their children).
    fn clear_shape_upward(&self) {
        self.shape.set(None);
        self.transformed_shape.set(None);
        self.global_shape.set(None);
        if let Some(parent) = self.parent() {
            parent.clear_shape_upward();
        }
    }
}

impl Drop for NodeInner {
    fn drop(&mut self) {
        self.transform.remove_observer(&self.observer);
    }
}

impl Observer for NodeInner {
    fn on_invalidate(&self) {
        self.transformed_shape.set(None);
        self.clear_global_tree();
        if let Some(parent) = self.parent() {
            parent.clear_shape_upward();
        }
    }
}

/// Drawable scene-graph node.
///
/// `Node` is a shared handle: clones refer to the same node. A parent owns its children; a child
/// holds only a weak back-pointer. Global transforms and shapes are cached and dropped through
/// the local transform's invalidation bus, so reads after a mutation recompute lazily.
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self::with_transform(kind, TransformRef::default())
    }

    /// Node driven by an existing shared transform.
    pub fn with_transform(kind: NodeKind, transform: TransformRef) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<NodeInner>| {
            let observer: Weak<dyn Observer> = weak.clone();
            transform.add_observer(observer.clone());
            NodeInner {
                id: ObjectId::next(),
                transform,
                observer,
                opacity: Cell::new(1.0),
                z: Cell::new(0.0),
                anchor: Cell::new(Anchor::Default),
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(Vec::new()),
                kind: RefCell::new(kind),
                style: RefCell::new(Style::default()),
                global: Cell::new(None),
                shape: Cell::new(None),
                transformed_shape: Cell::new(None),
                global_shape: Cell::new(None),
            }
        });
        Self(inner)
    }

    pub fn group() -> Self {
        Self::new(NodeKind::Group)
    }

    pub fn rect(width: f64, height: f64) -> Self {
        Self::new(NodeKind::Rect { width, height })
    }

    pub fn circle(radius: f64) -> Self {
        Self::new(NodeKind::Circle { radius })
    }

    pub fn path(path: Path) -> Self {
        Self::new(NodeKind::Path(path))
    }

    /// Text node measured through `metrics`.
    pub fn text(
        text: impl Into<String>,
        family: impl Into<String>,
        size: f64,
        metrics: Rc<dyn FontMetrics>,
    ) -> SceneResult<Self> {
        let mut content = TextContent {
            text: text.into(),
            family: family.into(),
            size,
            extent: TextExtent::default(),
            metrics,
        };
        content.remeasure()?;
        Ok(Self::new(NodeKind::Text(content)))
    }

    /// Text node in the configured default font.
    pub fn text_with_config(
        cfg: &Config,
        text: impl Into<String>,
        metrics: Rc<dyn FontMetrics>,
    ) -> SceneResult<Self> {
        Self::text(text, cfg.font_family.clone(), cfg.font_size, metrics)
    }

    /// Image node displayed at its pixel size.
    pub fn image(data: ImageData) -> Self {
        let (width, height) = (f64::from(data.width), f64::from(data.height));
        Self::new(NodeKind::Image(ImageContent {
            data,
            width,
            height,
        }))
    }

    pub fn with_fill(self, rgb: Rgb) -> Self {
        self.0.style.borrow_mut().fill = Some(ColorRef::new(rgb));
        self
    }

    pub fn with_stroke(self, rgb: Rgb, width: f64) -> Self {
        self.0.style.borrow_mut().stroke = Some(Stroke::new(rgb, width));
        self
    }

    /// Stroke with the configured default color and width.
    pub fn with_default_stroke(self, cfg: &Config) -> Self {
        self.with_stroke(cfg.stroke_color, cfg.stroke_width)
    }

    /// Builder form of [`Node::set_anchor`].
    pub fn with_anchor(self, anchor: Anchor) -> SceneResult<Self> {
        self.set_anchor(anchor)?;
        Ok(self)
    }

    /// Place the node at `(x, y)` in its parent's space.
    pub fn at(self, x: f64, y: f64) -> Self {
        self.0.transform.set_translation(Vec2::new(x, y));
        self
    }

    pub fn id(&self) -> ObjectId {
        self.0.id
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Handle to the local transform, for animations and updaters.
    pub fn transform(&self) -> TransformRef {
        self.0.transform.clone()
    }

    pub fn local_transform(&self) -> Transform {
        self.0.transform.get()
    }

    pub fn opacity(&self) -> f64 {
        self.0.opacity.get()
    }

    pub fn set_opacity(&self, opacity: f64) {
        self.0.opacity.set(clamp_opacity(opacity));
    }

    /// Product of this node's opacity and every ancestor's.
    pub fn global_opacity(&self) -> f64 {
        let mut opacity = self.opacity();
        let mut cursor = self.0.parent();
        while let Some(node) = cursor {
            opacity *= node.opacity.get();
            cursor = node.parent();
        }
        opacity
    }

    pub fn z(&self) -> f64 {
        self.0.z.get()
    }

    pub fn set_z(&self, z: f64) {
        self.0.z.set(z);
    }

    pub fn anchor(&self) -> Anchor {
        self.0.anchor.get()
    }

    /// Choose the reference point of the node's own geometry.
    ///
    /// Groups have no geometry of their own; any anchor other than [`Anchor::Default`] is
    /// rejected for them.
    pub fn set_anchor(&self, anchor: Anchor) -> SceneResult<()> {
        if anchor != Anchor::Default && matches!(*self.0.kind.borrow(), NodeKind::Group) {
            return Err(SceneError::validation(format!(
                "group {} cannot take anchor {anchor:?}",
                self.id()
            )));
        }
        self.0.anchor.set(anchor);
        self.0.clear_shape_upward();
        Ok(())
    }

    pub fn kind(&self) -> Ref<'_, NodeKind> {
        self.0.kind.borrow()
    }

    /// Mutate the kind in place; shape caches are dropped afterwards.
    pub fn update_kind<R>(&self, f: impl FnOnce(&mut NodeKind) -> R) -> R {
        let out = f(&mut self.0.kind.borrow_mut());
        self.0.clear_shape_upward();
        out
    }

    pub fn style(&self) -> Style {
        self.0.style.borrow().clone()
    }

    pub fn set_style(&self, style: Style) {
        *self.0.style.borrow_mut() = style;
    }

    /// Fill paint handle, if any.
    pub fn fill(&self) -> Option<ColorRef> {
        self.0.style.borrow().fill.clone()
    }

    /// Stroke paint handle, if any.
    pub fn stroke_color(&self) -> Option<ColorRef> {
        self.0.style.borrow().stroke.as_ref().map(|s| s.color.clone())
    }

    /// Replace a text node's content and re-measure it.
    pub fn set_text(&self, text: impl Into<String>) -> SceneResult<()> {
        let text = text.into();
        self.update_kind(|kind| match kind {
            NodeKind::Text(content) => {
                content.text = text;
                content.remeasure()
            }
            other => Err(SceneError::validation(format!(
                "set_text on a {} node",
                other.name()
            ))),
        })
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.parent().map(Node)
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    /// Return `true` when `self` is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &Node) -> bool {
        let mut cursor = other.0.parent();
        while let Some(node) = cursor {
            if Rc::ptr_eq(&node, &self.0) {
                return true;
            }
            cursor = node.parent();
        }
        false
    }

    /// Attach under `parent` (or detach with `None`).
    ///
    /// With `preserve_global` the node keeps its on-screen placement: its local transform becomes
    /// `parent.global⁻¹ ∘ old_global`. Otherwise the local transform is kept as is.
    pub fn set_parent(&self, parent: Option<&Node>, preserve_global: bool) -> SceneResult<()> {
        if let Some(p) = parent {
            if p.ptr_eq(self) {
                return Err(SceneError::hierarchy(format!(
                    "node {} cannot be its own parent",
                    self.id()
                )));
            }
            if self.is_ancestor_of(p) {
                return Err(SceneError::hierarchy(format!(
                    "node {} is an ancestor of node {}",
                    self.id(),
                    p.id()
                )));
            }
        }

        let new_local = if preserve_global {
            let saved = self.global_transform();
            Some(match parent {
                Some(p) => p.global_transform().inverse()?.compose(&saved),
                None => saved,
            })
        } else {
            None
        };

        if let Some(old) = self.0.parent() {
            old.children.borrow_mut().retain(|c| !c.ptr_eq(self));
            old.clear_shape_upward();
        }
        *self.0.parent.borrow_mut() = parent.map(|p| Rc::downgrade(&p.0)).unwrap_or_default();
        if let Some(p) = parent {
            p.0.children.borrow_mut().push(self.clone());
            p.0.clear_shape_upward();
        }
        self.0.clear_global_tree();

        if let Some(local) = new_local {
            self.0.transform.set(local);
        }
        Ok(())
    }

    /// Attach `child`, keeping its local transform.
    pub fn add_child(&self, child: &Node) -> SceneResult<()> {
        child.set_parent(Some(self), false)
    }

    /// Detach `child`; with `preserve_global` it keeps its on-screen placement.
    pub fn remove_child(&self, child: &Node, preserve_global: bool) -> SceneResult<()> {
        let is_child = child.parent().is_some_and(|p| p.ptr_eq(self));
        if !is_child {
            return Err(SceneError::NotAChild {
                parent: self.id(),
                child: child.id(),
            });
        }
        child.set_parent(None, preserve_global)
    }

    /// This node and all descendants, ordered by ascending `z`, parents before children.
    pub fn iter(&self) -> Vec<Node> {
        let mut out = Vec::new();
        self.collect_preorder(&mut out);
        out.sort_by(|a, b| a.z().total_cmp(&b.z()));
        out
    }

    fn collect_preorder(&self, out: &mut Vec<Node>) {
        out.push(self.clone());
        for child in self.0.children.borrow().iter() {
            child.collect_preorder(out);
        }
    }

    /// `parent.global ∘ local`, cached until an input changes.
    pub fn global_transform(&self) -> Transform {
        if let Some(global) = self.0.global.get() {
            return global;
        }
        let local = self.local_transform();
        let global = match self.parent() {
            Some(parent) => parent.global_transform().compose(&local),
            None => local,
        };
        self.0.global.set(Some(global));
        global
    }

    /// Return `true` when the global transform is currently cached.
    pub fn is_global_cached(&self) -> bool {
        self.0.global.get().is_some()
    }

    /// Shift applied to the node's own geometry so the anchor point lands on the origin.
    pub fn anchor_offset(&self) -> Vec2 {
        let kind = self.0.kind.borrow();
        if matches!(*kind, NodeKind::Group) {
            return Vec2::ZERO;
        }
        kind.own_shape().anchor_offset(self.anchor())
    }

    /// Bounds in the node's local space (identity transform), anchor applied.
    ///
    /// A group covers its children's transformed shapes.
    pub fn shape(&self) -> Shape {
        if let Some(shape) = self.0.shape.get() {
            return shape;
        }
        let shape = {
            let kind = self.0.kind.borrow();
            match &*kind {
                NodeKind::Group => self
                    .0
                    .children
                    .borrow()
                    .iter()
                    .map(Node::transformed_shape)
                    .reduce(|a, b| a.union(&b))
                    .unwrap_or_default(),
                other => {
                    let own = other.own_shape();
                    own.translated(own.anchor_offset(self.anchor()))
                }
            }
        };
        self.0.shape.set(Some(shape));
        shape
    }

    /// Shape under the local transform.
    pub fn transformed_shape(&self) -> Shape {
        if let Some(shape) = self.0.transformed_shape.get() {
            return shape;
        }
        let shape = self.shape().transformed(&self.local_transform());
        self.0.transformed_shape.set(Some(shape));
        shape
    }

    /// Shape under the global transform.
    pub fn global_shape(&self) -> Shape {
        if let Some(shape) = self.0.global_shape.get() {
            return shape;
        }
        let shape = self.shape().transformed(&self.global_transform());
        self.0.global_shape.set(Some(shape));
        shape
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id())
            .field("kind", &self.0.kind.borrow().name())
            .field("local", &self.local_transform())
            .field("children", &self.0.children.borrow().len())
            .finish()
    }
}

impl Animatable for Node {
    fn object_id(&self) -> ObjectId {
        self.id()
    }

    fn get_property(&self, property: &str) -> SceneResult<Value> {
        let kind = self.0.kind.borrow();
        let v = match (property, &*kind) {
            (style::OPACITY, _) => Value::Number(self.opacity()),
            (Z, _) => Value::Number(self.z()),
            (WIDTH, NodeKind::Rect { width, .. }) => Value::Number(*width),
            (HEIGHT, NodeKind::Rect { height, .. }) => Value::Number(*height),
            (WIDTH, NodeKind::Image(img)) => Value::Number(img.width),
            (HEIGHT, NodeKind::Image(img)) => Value::Number(img.height),
            (RADIUS, NodeKind::Circle { radius }) => Value::Number(*radius),
            (TEXT, NodeKind::Text(t)) => Value::Text(t.text.clone()),
            _ => return Err(SceneError::unknown_property(property)),
        };
        Ok(v)
    }

    fn set_property(&self, property: &str, value: Value) -> SceneResult<()> {
        match property {
            style::OPACITY => self.set_opacity(value.into_number(property)?),
            Z => self.set_z(value.into_number(property)?),
            TEXT => self.set_text(value.into_text(property)?)?,
            WIDTH | HEIGHT | RADIUS => {
                let v = value.into_number(property)?;
                self.update_kind(|kind| {
                    match (property, kind) {
                        (WIDTH, NodeKind::Rect { width, .. }) => *width = v,
                        (HEIGHT, NodeKind::Rect { height, .. }) => *height = v,
                        (WIDTH, NodeKind::Image(img)) => img.width = v,
                        (HEIGHT, NodeKind::Image(img)) => img.height = v,
                        (RADIUS, NodeKind::Circle { radius }) => *radius = v,
                        _ => return Err(SceneError::unknown_property(property)),
                    }
                    Ok(())
                })?;
            }
            _ => return Err(SceneError::unknown_property(property)),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/node.rs"]
mod tests;
