//! Categorized timeline charts: deterministic Gantt layout and CPU PNG
//! rendering.
//!
//! The pipeline is a synchronous batch of pure stages: raw records are
//! normalized against a declared category order, sorted into stable
//! category-then-time rows with background phase spans, compiled into a
//! draw plan, and rasterized by a CPU backend.

#![forbid(unsafe_code)]

pub mod compile;
pub mod core;
pub mod error;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod scale;
pub mod style;

pub use compile::{ChartPlan, DrawOp, compile_chart};
pub use core::{Canvas, Color};
pub use error::{ChartError, ChartResult};
pub use layout::{ChartLayout, lay_out};
pub use model::{
    CategorySet, CategorySpec, ChartSpec, ColorScheme, PhaseSpan, PositionedRecord, RawRecord,
    Record,
};
pub use normalize::normalize_records;
pub use pipeline::{ChartOutcome, render_chart};
pub use render::{BackendKind, ChartBackend, FrameRgba, RenderOptions, create_backend, save_png};
pub use style::{ChartStyle, DEFAULT_INLINE_LABEL_MIN_DAYS};
