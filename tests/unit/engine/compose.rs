use super::*;
use crate::field::sampler::{FieldParams, PointerParams};
use crate::field::wave::WaveSpec;
use crate::foundation::core::GridDims;

fn flat(baseline: f64) -> EngineOpts {
    EngineOpts {
        cell_size: 2,
        field: FieldParams {
            baseline,
            wave_falloff: 0.0,
            pointer: PointerParams::default(),
            ..FieldParams::default()
        },
        waves: WaveSpec::Explicit { waves: vec![] },
        ..EngineOpts::default()
    }
}

#[test]
fn uniform_field_matches_duty_cycle() {
    let opts = flat(0.5);
    let mut c = FrameComposer::new(&opts);
    let space = FieldSpace::new(GridDims { cols: 8, rows: 8 });
    c.render_tones(&opts, &[], &space, 0.0, None);
    assert_eq!(c.cell_count(), 64);
    // 4x4 tiles, 8 of 16 levels below 0.5.
    assert_eq!(c.on_count(), 32);
}

#[test]
fn frame_pixels_match_tones() {
    let opts = flat(0.5);
    let mut c = FrameComposer::new(&opts);
    let canvas = Canvas::new(16, 16);
    let frame = c.compose(&opts, &[], canvas, 0.0, None).unwrap().clone();
    assert_eq!(frame.canvas(), canvas);
    let fg = frame.count_color(opts.palette.foreground);
    let bg = frame.count_color(opts.palette.background);
    assert_eq!(fg + bg, 256);
    assert_eq!(fg, c.on_count() * 4);
}

#[test]
fn empty_canvas_composes_nothing() {
    let opts = flat(0.5);
    let mut c = FrameComposer::new(&opts);
    assert!(c.compose(&opts, &[], Canvas::new(0, 10), 0.0, None).is_none());
}

#[test]
fn resize_reuses_composer() {
    let opts = flat(1.0);
    let mut c = FrameComposer::new(&opts);
    c.compose(&opts, &[], Canvas::new(10, 10), 0.0, None).unwrap();
    let f = c.compose(&opts, &[], Canvas::new(5, 3), 0.0, None).unwrap();
    assert_eq!(f.canvas(), Canvas::new(5, 3));
    assert_eq!(f.count_color(opts.palette.foreground), 15);
}

#[test]
fn field_space_follows_the_real_surface() {
    let opts = EngineOpts {
        cell_size: 64,
        ..flat(0.5)
    };
    let space = FrameComposer::field_space(&opts, Canvas::new(100, 70)).unwrap();
    assert_eq!(space.grid(), GridDims { cols: 2, rows: 2 });
    // Clipped edge cells sit at the middle of their visible part.
    let c = space.cell_center(1, 1);
    assert!((c.x - 0.82).abs() < 1e-12);
    assert!((c.y - 67.0 / 70.0).abs() < 1e-12);
    assert!(FrameComposer::field_space(&opts, Canvas::new(0, 70)).is_none());
}
