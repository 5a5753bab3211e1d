use super::*;
use crate::foundation::math::Rng64;

fn wave_at(x: f64, y: f64, amplitude: f64) -> Wave {
    Wave {
        origin: Point::new(x, y),
        frequency: 18.0,
        amplitude,
        phase: 0.0,
        speed: 1.0,
    }
}

#[test]
fn baseline_only_field_is_flat() {
    let params = FieldParams {
        baseline: 0.4,
        ..Default::default()
    };
    let s = IntensityFieldSampler::new(&params, &[]);
    let space = FieldSpace::new(GridDims { cols: 5, rows: 3 });
    let mut out = Vec::new();
    s.fill(&space, 3.0, None, &mut out);
    assert_eq!(out.len(), 15);
    assert!(out.iter().all(|&v| (v - 0.4).abs() < 1e-6));
}

#[test]
fn extreme_parameters_never_escape_unit_interval() {
    let mut rng = Rng64::new(0xD17);
    let extremes = [
        0.0,
        1e-300,
        -1e6,
        1e6,
        1e300,
        f64::MAX,
        f64::MIN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
    ];
    let grid = GridDims { cols: 9, rows: 4 };
    let space = FieldSpace::new(grid);
    for i in 0..400 {
        let pick = |rng: &mut Rng64| {
            if rng.next_u64() % 3 == 0 {
                extremes[(rng.next_u64() % extremes.len() as u64) as usize]
            } else {
                rng.range_f64(-50.0, 50.0)
            }
        };
        let params = FieldParams {
            baseline: pick(&mut rng),
            wave_falloff: pick(&mut rng),
            aspect: pick(&mut rng),
            pointer: PointerParams {
                enabled: true,
                amplitude: pick(&mut rng),
                falloff: pick(&mut rng),
            },
        };
        let waves = [
            Wave {
                origin: Point::new(pick(&mut rng), pick(&mut rng)),
                frequency: pick(&mut rng),
                amplitude: pick(&mut rng),
                phase: pick(&mut rng),
                speed: pick(&mut rng),
            },
            wave_at(0.5, 0.5, pick(&mut rng)),
        ];
        let s = IntensityFieldSampler::new(&params, &waves);
        let t = pick(&mut rng);
        let ptr = Some(Point::new(rng.next_f64_01(), rng.next_f64_01()));
        for y in 0..grid.rows {
            for x in 0..grid.cols {
                let v = s.sample_cell(&space, x, y, t, ptr);
                assert!(v.is_finite(), "iteration {i}: non-finite {v}");
                assert!((0.0..=1.0).contains(&v), "iteration {i}: out of range {v}");
            }
        }
    }
}

#[test]
fn wave_response_at_origin_is_finite() {
    let w = wave_at(0.5, 0.5, 1.0);
    let r = wave_response(&w, 0.0, 0.0, 1e12);
    assert!(r.is_finite());
    let r = wave_response(&w, 0.0, 0.0, 0.0);
    assert_eq!(r, 0.0);
}

#[test]
fn wave_attenuates_with_distance() {
    let w = Wave {
        phase: std::f64::consts::FRAC_PI_2,
        frequency: 0.0,
        ..wave_at(0.0, 0.0, 1.0)
    };
    let near = wave_response(&w, 0.1, 0.0, 4.0);
    let far = wave_response(&w, 2.0, 0.0, 4.0);
    assert!(near > far);
    assert!((near - 1.0 / 1.4).abs() < 1e-12);
}

#[test]
fn waves_travel_over_time() {
    let params = FieldParams::default();
    let waves = [wave_at(0.5, 0.5, 0.3)];
    let s = IntensityFieldSampler::new(&params, &waves);
    let space = FieldSpace::new(GridDims { cols: 32, rows: 32 });
    let p = space.cell_center(20, 11);
    assert_ne!(s.sample(&space, p, 0.0, None), s.sample(&space, p, 0.5, None));
}

#[test]
fn pointer_bump_is_local() {
    let params = FieldParams {
        baseline: 0.0,
        wave_falloff: 0.0,
        pointer: PointerParams {
            enabled: true,
            amplitude: 0.5,
            falloff: 80.0,
        },
        ..Default::default()
    };
    let s = IntensityFieldSampler::new(&params, &[]);
    let peak = s.pointer_term(0.0);
    assert_eq!(peak, 0.5);

    let r = params.pointer.radius();
    for mul in [3.0, 3.5, 5.0, 10.0] {
        let far = s.pointer_term(r * mul);
        assert!(far / peak < 0.01, "contribution {far} at {mul}x radius");
    }

    let grid = GridDims { cols: 64, rows: 64 };
    let space = FieldSpace::new(grid);
    let ptr = Point::new(0.25, 0.25);
    for y in 0..grid.rows {
        for x in 0..grid.cols {
            let c = space.cell_center(x, y);
            if space.distance(c, ptr) > 3.0 * r {
                assert!(s.sample(&space, c, 0.0, Some(ptr)) < 0.005);
            }
        }
    }
    assert!(s.sample(&space, ptr, 0.0, Some(ptr)) > 0.49);
}

#[test]
fn pointer_ignored_when_disabled() {
    let params = FieldParams {
        baseline: 0.2,
        pointer: PointerParams {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    let s = IntensityFieldSampler::new(&params, &[]);
    let space = FieldSpace::new(GridDims { cols: 8, rows: 8 });
    let p = Point::new(0.5, 0.5);
    assert_eq!(s.sample(&space, p, 0.0, Some(p)), s.sample(&space, p, 0.0, None));
}

#[test]
fn resized_surfaces_agree_at_normalized_points() {
    let params = FieldParams::default();
    let waves = [wave_at(0.3, 0.6, 0.25), wave_at(0.9, 0.1, 0.2)];
    let s = IntensityFieldSampler::new(&params, &waves);
    let ptr = Some(Point::new(0.4, 0.4));
    let before = FieldSpace::new(GridDims { cols: 100, rows: 100 });
    for after in [
        FieldSpace::new(GridDims { cols: 160, rows: 80 }),
        FieldSpace::new(GridDims { cols: 200, rows: 100 }),
        FieldSpace::new(GridDims { cols: 37, rows: 250 }),
    ] {
        for &(x, y) in &[(0.1, 0.1), (0.5, 0.5), (0.7, 0.5), (0.77, 0.31)] {
            let p = Point::new(x, y);
            assert_eq!(s.sample(&before, p, 1.0, ptr), s.sample(&after, p, 1.0, ptr));
        }
    }
}

#[test]
fn distances_use_the_configured_aspect() {
    let o = Point::new(0.5, 0.5);
    let right = Point::new(0.75, 0.5);
    let down = Point::new(0.5, 1.0);
    let square = FieldSpace::new(GridDims { cols: 200, rows: 100 });
    assert!((square.distance(o, right) - 0.25).abs() < 1e-12);
    assert!((square.distance(o, down) - 0.5).abs() < 1e-12);

    let wide = square.with_aspect(2.0);
    assert!((wide.distance(o, right) - wide.distance(o, down)).abs() < 1e-12);
}

#[test]
fn surface_cells_sit_where_they_are_drawn() {
    // 70 px wide, 64 px cells: the second column is clipped to 6 px.
    let space = FieldSpace::for_surface(Canvas::new(70, 70), 64).unwrap();
    assert_eq!(space.grid(), GridDims { cols: 2, rows: 2 });
    assert!((space.cell_center(0, 0).x - 32.0 / 70.0).abs() < 1e-12);
    assert!((space.cell_center(1, 0).x - 67.0 / 70.0).abs() < 1e-12);

    // A pointer over a cell's drawn center gives that cell the full bump.
    let params = FieldParams {
        baseline: 0.0,
        wave_falloff: 0.0,
        pointer: PointerParams {
            enabled: true,
            amplitude: 0.6,
            falloff: 50.0,
        },
        ..Default::default()
    };
    let s = IntensityFieldSampler::new(&params, &[]);
    let space = FieldSpace::for_surface(Canvas::new(100, 100), 64).unwrap();
    let ptr = Some(Point::new(0.32, 0.32));
    let own = s.sample_cell(&space, 0, 0, 0.0, ptr);
    assert!((own - 0.6).abs() < 1e-12, "{own}");
    assert!(s.sample_cell(&space, 1, 1, 0.0, ptr) < own);

    assert!(FieldSpace::for_surface(Canvas::new(0, 70), 64).is_none());
    assert!(FieldSpace::for_surface(Canvas::new(70, 70), 0).is_none());
}
