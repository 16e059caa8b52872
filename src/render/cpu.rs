use std::borrow::Cow;

use crate::{
    compile::{ChartPlan, DrawOp, HAlign, LegendOp, Swatch, TextOp, VAlign},
    core::{Color, Point},
    error::{ChartError, ChartResult},
    render::{ChartBackend, FrameRgba, RenderOptions},
};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrushRgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Color> for TextBrushRgba8 {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

struct LoadedFont {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// CPU rasterizer for chart plans, backed by `vello_cpu` with Parley text
/// shaping. Font bytes come in through [`RenderOptions`]; a plan containing
/// text cannot render without them.
pub struct CpuBackend {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    loaded: Option<LoadedFont>,
}

impl CpuBackend {
    pub fn new(options: RenderOptions) -> ChartResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let loaded = match options.font {
            Some(bytes) => {
                let families = font_ctx
                    .collection
                    .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
                let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                    ChartError::validation("no font families registered from font bytes")
                })?;
                let family = font_ctx
                    .collection
                    .family_name(family_id)
                    .ok_or_else(|| {
                        ChartError::validation("registered font family has no name")
                    })?
                    .to_string();
                let font = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes),
                    0,
                );
                Some(LoadedFont { family, font })
            }
            None => None,
        };
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            loaded,
        })
    }

    fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ChartResult<parley::Layout<TextBrushRgba8>> {
        let family = self
            .loaded
            .as_ref()
            .map(|f| f.family.clone())
            .ok_or_else(|| {
                ChartError::validation("chart contains text but no font was configured")
            })?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    fn fill_glyphs(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        layout: &parley::Layout<TextBrushRgba8>,
        origin: (f64, f64),
    ) -> ChartResult<()> {
        let font = &self
            .loaded
            .as_ref()
            .ok_or_else(|| ChartError::validation("no font loaded"))?
            .font;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate(origin));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, op: &TextOp) -> ChartResult<()> {
        let layout = self.layout_plain(&op.content, op.size, op.color.into())?;
        let (tw, th) = (layout.width() as f64, layout.height() as f64);
        let x = match op.h_align {
            HAlign::Left => op.anchor.x,
            HAlign::Center => op.anchor.x - tw / 2.0,
            HAlign::Right => op.anchor.x - tw,
        };
        let y = match op.v_align {
            VAlign::Top => op.anchor.y,
            VAlign::Center => op.anchor.y - th / 2.0,
        };

        if let Some(frame) = &op.frame {
            let outer = vello_cpu::kurbo::Rect::new(
                x - frame.pad,
                y - frame.pad,
                x + tw + frame.pad,
                y + th + frame.pad,
            );
            set_paint(ctx, frame.border);
            ctx.fill_rect(&outer);
            set_paint(ctx, frame.fill);
            ctx.fill_rect(&outer.inset(-1.5));
        }

        self.fill_glyphs(ctx, &layout, (x, y))
    }

    fn draw_marker(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        center: Point,
        radius: f64,
        color: Color,
    ) {
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(vello_cpu::kurbo::Point::new(center.x, center.y - radius));
        path.line_to(vello_cpu::kurbo::Point::new(center.x + radius, center.y));
        path.line_to(vello_cpu::kurbo::Point::new(center.x, center.y + radius));
        path.line_to(vello_cpu::kurbo::Point::new(center.x - radius, center.y));
        path.close_path();
        set_paint(ctx, color);
        ctx.fill_path(&path);
    }

    fn draw_vline(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        x: f64,
        y0: f64,
        y1: f64,
        width: f64,
        color: Color,
        dash: Option<(f64, f64)>,
    ) {
        set_paint(ctx, color);
        let (x0, x1) = (x - width / 2.0, x + width / 2.0);
        match dash {
            None => ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1)),
            Some((on, off)) => {
                // Axis-aligned dashes rasterize as short rect segments.
                let step = (on + off).max(1.0);
                let mut y = y0;
                while y < y1 {
                    let seg_end = (y + on).min(y1);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y, x1, seg_end));
                    y += step;
                }
            }
        }
    }

    fn draw_legend(&mut self, ctx: &mut vello_cpu::RenderContext, op: &LegendOp) -> ChartResult<()> {
        const SWATCH_W: f64 = 20.0;
        const SWATCH_H: f64 = 12.0;
        const SWATCH_GAP: f64 = 7.0;
        const ENTRY_GAP: f64 = 26.0;

        let mut layouts = Vec::with_capacity(op.entries.len());
        let mut total = 0.0;
        for entry in &op.entries {
            let layout =
                self.layout_plain(&entry.label, op.size, Color::rgb(51, 51, 51).into())?;
            total += SWATCH_W + SWATCH_GAP + layout.width() as f64 + ENTRY_GAP;
            layouts.push(layout);
        }
        total -= ENTRY_GAP;

        let row_h = layouts
            .iter()
            .map(|l| l.height() as f64)
            .fold(SWATCH_H, f64::max);
        let mut x = op.center_x - total / 2.0;
        let mid_y = op.top_y + row_h / 2.0;

        for (entry, layout) in op.entries.iter().zip(&layouts) {
            match entry.swatch {
                Swatch::Bar => {
                    set_paint(ctx, entry.color);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        x,
                        mid_y - SWATCH_H / 2.0,
                        x + SWATCH_W,
                        mid_y + SWATCH_H / 2.0,
                    ));
                }
                Swatch::Diamond => {
                    self.draw_marker(
                        ctx,
                        Point::new(x + SWATCH_W / 2.0, mid_y),
                        SWATCH_H / 2.0 + 1.0,
                        entry.color,
                    );
                }
            }
            let text_x = x + SWATCH_W + SWATCH_GAP;
            let text_y = mid_y - layout.height() as f64 / 2.0;
            self.fill_glyphs(ctx, layout, (text_x, text_y))?;
            x = text_x + layout.width() as f64 + ENTRY_GAP;
        }
        Ok(())
    }
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, color: Color) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
}

impl ChartBackend for CpuBackend {
    fn render_plan(&mut self, plan: &ChartPlan) -> ChartResult<FrameRgba> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| ChartError::validation("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| ChartError::validation("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ChartError::validation("canvas must be non-empty"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for op in &plan.ops {
            match op {
                DrawOp::Fill { rect, color } => {
                    set_paint(&mut ctx, *color);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        rect.x0, rect.y0, rect.x1, rect.y1,
                    ));
                }
                DrawOp::VLine {
                    x,
                    y0,
                    y1,
                    width,
                    color,
                    dash,
                } => self.draw_vline(&mut ctx, *x, *y0, *y1, *width, *color, *dash),
                DrawOp::Marker {
                    center,
                    radius,
                    color,
                    outline,
                } => {
                    if let Some(outline) = outline {
                        self.draw_marker(&mut ctx, *center, radius + 2.0, *outline);
                    }
                    self.draw_marker(&mut ctx, *center, *radius, *color);
                }
                DrawOp::Text(text) => self.draw_text(&mut ctx, text)?,
                DrawOp::Legend(legend) => self.draw_legend(&mut ctx, legend)?,
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRgba {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}
