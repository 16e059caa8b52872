use ganttline::{
    Canvas, ChartPlan, Color, DrawOp, RenderOptions,
    compile::{HAlign, TextOp, VAlign},
    core::{Point, Rect},
    render::{ChartBackend, cpu::CpuBackend},
};

fn px(frame: &ganttline::FrameRgba, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn backend_without_font() -> CpuBackend {
    CpuBackend::new(RenderOptions::default()).unwrap()
}

#[test]
fn fills_land_on_the_expected_pixels() {
    let plan = ChartPlan {
        canvas: Canvas {
            width: 64,
            height: 64,
        },
        ops: vec![
            DrawOp::Fill {
                rect: Rect::new(0.0, 0.0, 64.0, 64.0),
                color: Color::rgb(248, 249, 250),
            },
            DrawOp::Fill {
                rect: Rect::new(10.0, 20.0, 30.0, 40.0),
                color: Color::rgb(255, 0, 0),
            },
        ],
    };
    let frame = backend_without_font().render_plan(&plan).unwrap();
    assert_eq!(frame.width, 64);
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    assert_eq!(px(&frame, 20, 30), [255, 0, 0, 255]);
    assert_eq!(px(&frame, 50, 50), [248, 249, 250, 255]);
}

#[test]
fn dashed_vline_leaves_gaps() {
    let plan = ChartPlan {
        canvas: Canvas {
            width: 32,
            height: 32,
        },
        ops: vec![
            DrawOp::Fill {
                rect: Rect::new(0.0, 0.0, 32.0, 32.0),
                color: Color::rgb(255, 255, 255),
            },
            DrawOp::VLine {
                x: 8.0,
                y0: 8.0,
                y1: 28.0,
                width: 2.0,
                color: Color::rgb(0, 0, 0),
                dash: Some((4.0, 4.0)),
            },
        ],
    };
    let frame = backend_without_font().render_plan(&plan).unwrap();
    // On segment: rows 8..12. Off segment: rows 12..16.
    assert_eq!(px(&frame, 7, 9), [0, 0, 0, 255]);
    assert_eq!(px(&frame, 7, 14), [255, 255, 255, 255]);
}

#[test]
fn marker_paints_a_diamond_over_its_outline() {
    let plan = ChartPlan {
        canvas: Canvas {
            width: 32,
            height: 32,
        },
        ops: vec![
            DrawOp::Fill {
                rect: Rect::new(0.0, 0.0, 32.0, 32.0),
                color: Color::rgb(0, 0, 0),
            },
            DrawOp::Marker {
                center: Point::new(16.0, 16.0),
                radius: 8.0,
                color: Color::rgb(61, 90, 153),
                outline: Some(Color::rgb(255, 255, 255)),
            },
        ],
    };
    let frame = backend_without_font().render_plan(&plan).unwrap();
    assert_eq!(px(&frame, 16, 16), [61, 90, 153, 255]);
    // The outline peeks out past the diamond tip.
    assert_eq!(px(&frame, 16, 7), [255, 255, 255, 255]);
    assert_eq!(px(&frame, 2, 2), [0, 0, 0, 255]);
}

#[test]
fn text_without_a_configured_font_fails_loudly() {
    let plan = ChartPlan {
        canvas: Canvas {
            width: 32,
            height: 32,
        },
        ops: vec![DrawOp::Text(TextOp {
            anchor: Point::new(4.0, 4.0),
            content: "hello".to_string(),
            size: 12.0,
            color: Color::rgb(0, 0, 0),
            h_align: HAlign::Left,
            v_align: VAlign::Top,
            frame: None,
        })],
    };
    let err = backend_without_font().render_plan(&plan).unwrap_err();
    assert!(matches!(err, ganttline::ChartError::Validation(_)), "{err}");
}

#[test]
fn oversized_canvas_is_rejected() {
    let plan = ChartPlan {
        canvas: Canvas {
            width: 100_000,
            height: 32,
        },
        ops: Vec::new(),
    };
    assert!(backend_without_font().render_plan(&plan).is_err());
}
