use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use crate::foundation::error::{SceneError, SceneResult};

/// Measured extent of a single run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Advance width.
    pub width: f64,
    /// Line height: ascent plus descent plus leading.
    pub height: f64,
}

/// Text measurement backend consumed by text drawables.
pub trait FontMetrics {
    fn measure(&self, text: &str, family: &str, size: f64) -> SceneResult<TextExtent>;
}

/// Fixed-ratio estimate: each char advances `0.6em`; lines are `1.2em` tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproxMetrics;

impl FontMetrics for ApproxMetrics {
    fn measure(&self, text: &str, _family: &str, size: f64) -> SceneResult<TextExtent> {
        validate_size(size)?;
        let widest = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let lines = text.lines().count().max(1);
        Ok(TextExtent {
            width: 0.6 * size * widest as f64,
            height: 1.2 * size * lines as f64,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct MeasureBrush;

/// Shaping-accurate metrics from registered font files, laid out with Parley.
///
/// Families without registered bytes fall back to [`ApproxMetrics`].
pub struct ParleyMetrics {
    font_ctx: RefCell<parley::FontContext>,
    layout_ctx: RefCell<parley::LayoutContext<MeasureBrush>>,
    families: RefCell<HashMap<String, String>>,
}

impl Default for ParleyMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyMetrics {
    pub fn new() -> Self {
        Self {
            font_ctx: RefCell::new(parley::FontContext::default()),
            layout_ctx: RefCell::new(parley::LayoutContext::new()),
            families: RefCell::new(HashMap::new()),
        }
    }

    /// Register a font file and make it answer for `family`.
    pub fn register(&self, family: &str, font_bytes: &[u8]) -> SceneResult<()> {
        let mut font_ctx = self.font_ctx.borrow_mut();
        let registered = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = registered
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| SceneError::validation("no font families registered from font bytes"))?;
        let resolved = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SceneError::validation("registered font family has no name"))?
            .to_string();
        debug!(family, resolved = %resolved, "registered font");
        self.families
            .borrow_mut()
            .insert(family.to_owned(), resolved);
        Ok(())
    }

    /// Register a font file read from disk.
    pub fn register_file(&self, family: &str, path: &std::path::Path) -> SceneResult<()> {
        use anyhow::Context as _;

        let bytes = std::fs::read(path)
            .with_context(|| format!("read font file '{}'", path.display()))?;
        self.register(family, &bytes)
    }
}

impl FontMetrics for ParleyMetrics {
    fn measure(&self, text: &str, family: &str, size: f64) -> SceneResult<TextExtent> {
        validate_size(size)?;
        let Some(resolved) = self.families.borrow().get(family).cloned() else {
            return ApproxMetrics.measure(text, family, size);
        };

        let mut font_ctx = self.font_ctx.borrow_mut();
        let mut layout_ctx = self.layout_ctx.borrow_mut();
        let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(resolved)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size as f32));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut extent = TextExtent::default();
        for line in layout.lines() {
            let m = line.metrics();
            extent.width = extent.width.max(f64::from(m.advance));
            extent.height += f64::from(m.ascent + m.descent + m.leading);
        }
        Ok(extent)
    }
}

/// Memoizes a backend per `(text, family, size)`.
pub struct MetricsCache {
    backend: Box<dyn FontMetrics>,
    entries: RefCell<HashMap<(String, String, u64), TextExtent>>,
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new(ApproxMetrics)
    }
}

impl MetricsCache {
    pub fn new(backend: impl FontMetrics + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Number of memoized measurements.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl FontMetrics for MetricsCache {
    fn measure(&self, text: &str, family: &str, size: f64) -> SceneResult<TextExtent> {
        let key = (text.to_owned(), family.to_owned(), size.to_bits());
        if let Some(extent) = self.entries.borrow().get(&key) {
            return Ok(*extent);
        }
        let extent = self.backend.measure(text, family, size)?;
        self.entries.borrow_mut().insert(key, extent);
        Ok(extent)
    }
}

fn validate_size(size: f64) -> SceneResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(SceneError::validation("font size must be finite and > 0"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
