use crate::core::{Canvas, Color};

/// Bars strictly longer than this many days get their name drawn inside the
/// bar as well as beside it. Overridable via [`ChartStyle`].
pub const DEFAULT_INLINE_LABEL_MIN_DAYS: i64 = 3;

/// Margins around the plot area, in pixels.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Complete renderer configuration.
///
/// Everything the chart look depends on lives here and is passed explicitly
/// into compilation; there is no process-global styling state, so two calls
/// with different styles never interfere.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ChartStyle {
    pub canvas: Canvas,
    pub background: Color,
    pub margins: Margins,
    pub title: Option<String>,
    pub x_label: Option<String>,

    /// Inline bar labels appear only when `duration_days` exceeds this.
    pub inline_label_min_days: i64,
    /// Major tick (gridline + date label) cadence, in weeks.
    pub tick_major_weeks: u32,
    /// strftime format for major tick labels.
    pub tick_format: String,

    /// Bar height as a fraction of the row height.
    pub bar_height_frac: f64,
    /// Half-diagonal of the milestone diamond, in pixels.
    pub marker_radius: f64,

    pub title_size: f32,
    pub badge_size: f32,
    pub label_size: f32,
    pub small_label_size: f32,
    pub tick_label_size: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1600,
                height: 700,
            },
            background: Color::rgb(248, 249, 250),
            margins: Margins {
                left: 240.0,
                right: 60.0,
                top: 70.0,
                bottom: 120.0,
            },
            title: None,
            x_label: None,
            inline_label_min_days: DEFAULT_INLINE_LABEL_MIN_DAYS,
            tick_major_weeks: 2,
            tick_format: "%Y-%m-%d".to_string(),
            bar_height_frac: 0.5,
            marker_radius: 9.0,
            title_size: 26.0,
            badge_size: 17.0,
            label_size: 15.0,
            small_label_size: 13.0,
            tick_label_size: 13.0,
        }
    }
}

impl ChartStyle {
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas = Canvas { width, height };
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }
}
