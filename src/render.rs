use std::path::Path;

use crate::{
    compile::ChartPlan,
    error::{ChartError, ChartResult},
};

pub mod cpu;

/// A finished frame in RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// A 2D surface capable of rasterizing a compiled chart plan.
pub trait ChartBackend {
    fn render_plan(&mut self, plan: &ChartPlan) -> ChartResult<FrameRgba>;
}

#[derive(Clone, Copy, Debug)]
pub enum BackendKind {
    Cpu,
}

/// Backend construction options.
///
/// Fonts are explicit per-backend configuration rather than process-global
/// state; text ops fail loudly when no font bytes were supplied.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Raw bytes of a TTF/OTF font used for all chart text.
    pub font: Option<Vec<u8>>,
}

pub fn create_backend(
    kind: BackendKind,
    options: RenderOptions,
) -> ChartResult<Box<dyn ChartBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(cpu::CpuBackend::new(options)?)),
    }
}

/// Write a rendered frame to `path` as PNG.
///
/// The chart paints an opaque background, so premultiplied and straight
/// alpha coincide and the bytes go out as-is. Sink failures surface
/// immediately and are not retried.
pub fn save_png(frame: &FrameRgba, path: &Path) -> ChartResult<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ChartError::output_write(format!("write png '{}': {e}", path.display())))
}
