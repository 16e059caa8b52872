use crate::{
    compile::compile_chart,
    error::ChartResult,
    layout::lay_out,
    model::{CategorySet, RawRecord},
    normalize::normalize_records,
    render::{ChartBackend, FrameRgba},
    style::ChartStyle,
};

/// Result of one chart-generation pass.
#[derive(Debug)]
pub enum ChartOutcome {
    Rendered(FrameRgba),
    /// No records were supplied; nothing to render. Not an error — the
    /// caller decides whether that is fatal.
    Empty,
}

impl ChartOutcome {
    pub fn frame(&self) -> Option<&FrameRgba> {
        match self {
            Self::Rendered(frame) => Some(frame),
            Self::Empty => None,
        }
    }
}

/// Run the full pipeline: normalize, lay out, compile, rasterize.
///
/// Fails fast on structurally invalid input; a partially-correct chart is
/// never produced.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn render_chart(
    records: &[RawRecord],
    categories: &CategorySet,
    style: &ChartStyle,
    backend: &mut dyn ChartBackend,
) -> ChartResult<ChartOutcome> {
    let normalized = normalize_records(records, categories)?;
    let layout = lay_out(normalized);
    if layout.is_empty() {
        tracing::warn!("no records supplied; nothing to render");
        return Ok(ChartOutcome::Empty);
    }
    tracing::debug!(
        rows = layout.rows.len(),
        spans = layout.spans.len(),
        "layout complete"
    );
    let plan = compile_chart(&layout, categories, style)?;
    tracing::debug!(ops = plan.ops.len(), "chart plan compiled");
    let frame = backend.render_plan(&plan)?;
    Ok(ChartOutcome::Rendered(frame))
}
