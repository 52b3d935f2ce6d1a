use std::collections::HashSet;
use std::fmt::Write as _;

use crate::foundation::config::Config;
use crate::foundation::core::{Affine, FrameIndex};
use crate::foundation::error::SceneResult;
use crate::graph::node::{Node, NodeKind};
use crate::graph::style::{ColorRef, Style};

/// Read-only view of the scene state handed to a [`Renderer`] for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub index: FrameIndex,
    pub config: &'a Config,
    /// Top-level drawables in registration order.
    pub drawables: &'a [Node],
}

/// A renderer that turns one [`FrameView`] into a complete SVG document.
pub trait Renderer {
    fn render(&mut self, view: &FrameView<'_>) -> SceneResult<String>;
}

/// Default renderer emitting plain SVG 1.1.
///
/// The viewBox spans the logical scene size centred on the origin; `width`/`height` carry the
/// physical frame size. Nodes are emitted in traversal order (ascending `z`, parents before
/// children), each with its global transform and global opacity.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, view: &FrameView<'_>) -> SceneResult<String> {
        let cfg = view.config;
        let (w, h) = (cfg.scene_size.width, cfg.scene_size.height);
        let mut out = String::with_capacity(1024);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            cfg.frame_size.width,
            cfg.frame_size.height,
            num(-w / 2.0),
            num(-h / 2.0),
            num(w),
            num(h),
        );
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            num(-w / 2.0),
            num(-h / 2.0),
            num(w),
            num(h),
            cfg.background.to_hex(),
        );

        for node in traversal(view.drawables) {
            write_node(&mut out, &node);
        }
        out.push_str("</svg>");
        Ok(out)
    }
}

/// Every reachable node once, ordered by ascending `z` with registration/preorder as tiebreak.
fn traversal(drawables: &[Node]) -> Vec<Node> {
    let mut seen = HashSet::new();
    let mut nodes: Vec<Node> = drawables
        .iter()
        .flat_map(Node::iter)
        .filter(|n| seen.insert(n.id()))
        .collect();
    nodes.sort_by(|a, b| a.z().total_cmp(&b.z()));
    nodes
}

fn write_node(out: &mut String, node: &Node) {
    let kind = node.kind();
    if matches!(*kind, NodeKind::Group) {
        return;
    }

    let placement = node.global_transform().to_affine() * Affine::translate(node.anchor_offset());
    let mut attrs = format!(r#" transform="{}""#, matrix(placement));
    let opacity = node.global_opacity();
    if opacity < 1.0 {
        let _ = write!(attrs, r#" opacity="{}""#, num(opacity));
    }
    write_paint(&mut attrs, &node.style());

    let _ = match &*kind {
        NodeKind::Group => Ok(()),
        NodeKind::Rect { width, height } => write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}"{attrs}/>"#,
            num(*width),
            num(*height),
        ),
        NodeKind::Circle { radius } => write!(
            out,
            r#"<circle cx="0" cy="0" r="{}"{attrs}/>"#,
            num(radius.abs()),
        ),
        NodeKind::Path(path) => write!(out, r#"<path d="{}"{attrs}/>"#, path.to_svg_d()),
        NodeKind::Text(t) => write!(
            out,
            r#"<text x="0" y="0" dominant-baseline="text-before-edge" font-family="{}" font-size="{}"{attrs}>{}</text>"#,
            escape(&t.family),
            num(t.size),
            escape(&t.text),
        ),
        NodeKind::Image(img) => write!(
            out,
            r#"<image x="0" y="0" width="{}" height="{}" href="{}"{attrs}/>"#,
            num(img.width),
            num(img.height),
            img.data.data_uri(),
        ),
    };
}

fn write_paint(attrs: &mut String, style: &Style) {
    match &style.fill {
        Some(fill) => write_color(attrs, "fill", fill),
        None => attrs.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &style.stroke {
        write_color(attrs, "stroke", &stroke.color);
        let _ = write!(attrs, r#" stroke-width="{}""#, num(stroke.width));
    }
}

fn write_color(attrs: &mut String, name: &str, color: &ColorRef) {
    let _ = write!(attrs, r#" {name}="{}""#, color.rgb().to_hex());
    if color.opacity() < 1.0 {
        let _ = write!(attrs, r#" {name}-opacity="{}""#, num(color.opacity()));
    }
}

fn matrix(a: Affine) -> String {
    let [a, b, c, d, e, f] = a.as_coeffs();
    format!(
        "matrix({} {} {} {} {} {})",
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    )
}

/// Compact decimal: at most 4 fractional digits, no trailing zeros, no `-0`.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let mut s = format!("{v:.4}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_owned();
    }
    s
}

/// Escape XML text and attribute content.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
