use chrono::NaiveDate;

use crate::{
    core::{Canvas, Color, Point, Rect},
    error::{ChartError, ChartResult},
    layout::ChartLayout,
    model::CategorySet,
    scale::TimeScale,
    style::ChartStyle,
};

const COLOR_TITLE: Color = Color::rgb(34, 34, 34);
const COLOR_MUTED: Color = Color::rgb(85, 85, 85);
const COLOR_GRID_MAJOR: Color = Color::rgb(221, 221, 221);
const COLOR_GRID_MINOR: Color = Color::rgb(238, 238, 238);
const COLOR_INLINE_LABEL: Color = Color::rgb(255, 255, 255);
const COLOR_LEGEND_GENERIC: Color = Color::rgb(128, 128, 128);

/// A compiled chart: canvas plus draw ops in painter order.
#[derive(Clone, Debug)]
pub struct ChartPlan {
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug)]
pub enum DrawOp {
    /// Axis-aligned filled rectangle.
    Fill { rect: Rect, color: Color },
    /// Vertical line from `y0` to `y1`, optionally dashed `(on, off)`.
    VLine {
        x: f64,
        y0: f64,
        y1: f64,
        width: f64,
        color: Color,
        dash: Option<(f64, f64)>,
    },
    /// Diamond marker; `outline` draws a slightly larger diamond underneath.
    Marker {
        center: Point,
        radius: f64,
        color: Color,
        outline: Option<Color>,
    },
    Text(TextOp),
    /// Horizontally centered legend row; the backend owns text measurement
    /// and therefore the entry spacing.
    Legend(LegendOp),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
}

/// Bordered box drawn behind a text op (category badges).
#[derive(Clone, Copy, Debug)]
pub struct TextFrame {
    pub fill: Color,
    pub border: Color,
    pub pad: f64,
}

#[derive(Clone, Debug)]
pub struct TextOp {
    pub anchor: Point,
    pub content: String,
    pub size: f32,
    pub color: Color,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub frame: Option<TextFrame>,
}

impl TextOp {
    fn plain(
        anchor: Point,
        content: impl Into<String>,
        size: f32,
        color: Color,
        h_align: HAlign,
        v_align: VAlign,
    ) -> Self {
        Self {
            anchor,
            content: content.into(),
            size,
            color,
            h_align,
            v_align,
            frame: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swatch {
    Bar,
    Diamond,
}

#[derive(Clone, Debug)]
pub struct LegendEntry {
    pub label: String,
    pub swatch: Swatch,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct LegendOp {
    pub center_x: f64,
    pub top_y: f64,
    pub size: f32,
    pub entries: Vec<LegendEntry>,
}

fn validated_tick_items(format: &str) -> ChartResult<Vec<chrono::format::Item<'_>>> {
    let items: Vec<chrono::format::Item<'_>> =
        chrono::format::StrftimeItems::new(format).collect();
    if items.iter().any(|i| matches!(i, chrono::format::Item::Error)) {
        return Err(ChartError::validation(format!(
            "invalid tick format '{format}'"
        )));
    }
    Ok(items)
}

fn format_tick(date: NaiveDate, items: &[chrono::format::Item<'_>]) -> String {
    date.format_with_items(items.iter().cloned()).to_string()
}

/// Compile a non-empty layout into a draw plan.
///
/// Op order is draw order: background, phase bands, gridlines, milestone
/// reference lines, bars, markers, labels, badges, axis text, legend.
pub fn compile_chart(
    layout: &ChartLayout,
    categories: &CategorySet,
    style: &ChartStyle,
) -> ChartResult<ChartPlan> {
    if layout.is_empty() {
        return Err(ChartError::validation("empty layout has nothing to compile"));
    }

    let w = style.canvas.width as f64;
    let h = style.canvas.height as f64;
    let plot = Rect::new(
        style.margins.left,
        style.margins.top,
        w - style.margins.right,
        h - style.margins.bottom,
    );
    if plot.width() <= 0.0 || plot.height() <= 0.0 {
        return Err(ChartError::validation(
            "margins leave no plot area on this canvas",
        ));
    }

    let tick_items = validated_tick_items(&style.tick_format)?;

    let min_start = layout
        .rows
        .iter()
        .map(|r| r.record.start)
        .min()
        .ok_or_else(|| ChartError::validation("layout has no rows"))?;
    let max_end = layout
        .rows
        .iter()
        .map(|r| r.record.end)
        .max()
        .ok_or_else(|| ChartError::validation("layout has no rows"))?;
    let scale = TimeScale::fit(min_start, max_end, plot.x0, plot.x1)?;

    let n = layout.rows.len() as f64;
    let row_h = plot.height() / n;
    // Slot-space value -> pixel y; slot centers sit at v = slot.
    let y_of = |v: f64| plot.y0 + (v + 0.5) * row_h;

    let scheme = |rank: usize| {
        categories
            .get(rank)
            .map(|c| c.colors)
            .ok_or_else(|| ChartError::validation(format!("no category at rank {rank}")))
    };

    let mut ops: Vec<DrawOp> = Vec::new();

    ops.push(DrawOp::Fill {
        rect: Rect::new(0.0, 0.0, w, h),
        color: style.background,
    });

    for span in &layout.spans {
        ops.push(DrawOp::Fill {
            rect: Rect::new(plot.x0, y_of(span.top), plot.x1, y_of(span.bottom)),
            color: scheme(span.category_rank)?.light.with_alpha(0.3),
        });
    }

    let ticks = scale.week_ticks(style.tick_major_weeks);
    for tick in ticks.iter().filter(|t| !t.major) {
        ops.push(DrawOp::VLine {
            x: tick.x,
            y0: plot.y0,
            y1: plot.y1,
            width: 1.0,
            color: COLOR_GRID_MINOR,
            dash: Some((2.0, 4.0)),
        });
    }
    for tick in ticks.iter().filter(|t| t.major) {
        ops.push(DrawOp::VLine {
            x: tick.x,
            y0: plot.y0,
            y1: plot.y1,
            width: 1.0,
            color: COLOR_GRID_MAJOR,
            dash: None,
        });
    }

    // Full-height dashed reference line per milestone, beneath the bars.
    for row in layout.rows.iter().filter(|r| r.record.milestone) {
        ops.push(DrawOp::VLine {
            x: scale.x(row.record.start),
            y0: plot.y0,
            y1: plot.y1,
            width: 1.5,
            color: scheme(row.record.category_rank)?.dark.with_alpha(0.3),
            dash: Some((6.0, 6.0)),
        });
    }

    let bar_h = row_h * style.bar_height_frac;
    for row in layout.rows.iter().filter(|r| !r.record.milestone) {
        let y = y_of(row.slot as f64);
        ops.push(DrawOp::Fill {
            rect: Rect::new(
                scale.x(row.record.start),
                y - bar_h / 2.0,
                scale.x_after(row.record.end),
                y + bar_h / 2.0,
            ),
            color: scheme(row.record.category_rank)?.main.with_alpha(0.8),
        });
    }

    for row in layout.rows.iter().filter(|r| r.record.milestone) {
        ops.push(DrawOp::Marker {
            center: Point::new(scale.x(row.record.start), y_of(row.slot as f64)),
            radius: style.marker_radius,
            color: scheme(row.record.category_rank)?.dark,
            outline: Some(Color::rgb(255, 255, 255)),
        });
    }

    for row in &layout.rows {
        let rec = &row.record;
        let y = y_of(row.slot as f64);
        if rec.milestone {
            ops.push(DrawOp::Text(TextOp::plain(
                Point::new(scale.x(rec.start) + style.marker_radius + 6.0, y),
                rec.name.clone(),
                style.label_size,
                COLOR_TITLE,
                HAlign::Left,
                VAlign::Center,
            )));
        } else {
            let x0 = scale.x(rec.start);
            let x1 = scale.x_after(rec.end);
            if rec.duration_days > style.inline_label_min_days {
                ops.push(DrawOp::Text(TextOp::plain(
                    Point::new((x0 + x1) / 2.0, y),
                    rec.name.clone(),
                    style.label_size,
                    COLOR_INLINE_LABEL,
                    HAlign::Center,
                    VAlign::Center,
                )));
            }
            // The name always repeats past the bar end, whatever the duration.
            ops.push(DrawOp::Text(TextOp::plain(
                Point::new(x1 + 6.0, y),
                rec.name.clone(),
                style.small_label_size,
                COLOR_MUTED,
                HAlign::Left,
                VAlign::Center,
            )));
        }
    }

    // Category badges at each span's vertical midpoint, in the left margin.
    for span in &layout.spans {
        let cat = categories
            .get(span.category_rank)
            .ok_or_else(|| ChartError::validation(format!("no category at rank {}", span.category_rank)))?;
        ops.push(DrawOp::Text(TextOp {
            anchor: Point::new(plot.x0 - 16.0, y_of((span.top + span.bottom) / 2.0)),
            content: cat.name.clone(),
            size: style.badge_size,
            color: cat.colors.dark,
            h_align: HAlign::Right,
            v_align: VAlign::Center,
            frame: Some(TextFrame {
                fill: Color::rgba(255, 255, 255, 230),
                border: cat.colors.dark,
                pad: 8.0,
            }),
        }));
    }

    for tick in ticks.iter().filter(|t| t.major) {
        ops.push(DrawOp::Text(TextOp::plain(
            Point::new(tick.x, plot.y1 + 8.0),
            format_tick(tick.date, &tick_items),
            style.tick_label_size,
            COLOR_MUTED,
            HAlign::Center,
            VAlign::Top,
        )));
    }

    if let Some(title) = &style.title {
        ops.push(DrawOp::Text(TextOp::plain(
            Point::new(w / 2.0, plot.y0 / 2.0),
            title.clone(),
            style.title_size,
            COLOR_TITLE,
            HAlign::Center,
            VAlign::Center,
        )));
    }
    if let Some(x_label) = &style.x_label {
        ops.push(DrawOp::Text(TextOp::plain(
            Point::new((plot.x0 + plot.x1) / 2.0, plot.y1 + 30.0),
            x_label.clone(),
            style.label_size,
            COLOR_MUTED,
            HAlign::Center,
            VAlign::Top,
        )));
    }

    // Legend: the two generic entries first, then every declared category in
    // declared order (including ones with no records).
    let mut entries = vec![
        LegendEntry {
            label: "Milestone".to_string(),
            swatch: Swatch::Diamond,
            color: COLOR_LEGEND_GENERIC,
        },
        LegendEntry {
            label: "Task".to_string(),
            swatch: Swatch::Bar,
            color: COLOR_LEGEND_GENERIC,
        },
    ];
    for cat in categories.iter() {
        entries.push(LegendEntry {
            label: cat.name.clone(),
            swatch: Swatch::Bar,
            color: cat.colors.main.with_alpha(0.8),
        });
    }
    ops.push(DrawOp::Legend(LegendOp {
        center_x: (plot.x0 + plot.x1) / 2.0,
        top_y: plot.y1 + 56.0,
        size: style.small_label_size,
        entries,
    }));

    Ok(ChartPlan {
        canvas: style.canvas,
        ops,
    })
}
