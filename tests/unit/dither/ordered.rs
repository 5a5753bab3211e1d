use super::*;
use crate::dither::matrix::{BAYER_4X4, BAYER_8X8};
use crate::foundation::math::Rng64;

fn uniform(grid: GridDims, v: f64) -> Vec<f64> {
    vec![v; grid.cell_count()]
}

#[test]
fn half_intensity_lights_exactly_the_low_levels() {
    let d = OrderedDitherer::new(&BAYER_4X4);
    let grid = GridDims { cols: 4, rows: 4 };
    let mut out = Vec::new();
    d.dither_into(grid, &uniform(grid, 0.5), &mut out);

    assert_eq!(count_on(&out), 8);
    for y in 0..4u32 {
        for x in 0..4u32 {
            let expected = if BAYER_4X4.level(x, y) < 8 {
                Tone::On
            } else {
                Tone::Off
            };
            assert_eq!(out[(y * 4 + x) as usize], expected, "cell ({x},{y})");
        }
    }
}

#[test]
fn duty_cycle_matches_every_level_of_4x4() {
    let d = OrderedDitherer::new(&BAYER_4X4);
    let grid = GridDims { cols: 16, rows: 8 };
    let mut out = Vec::new();
    for k in 0..=16u32 {
        d.dither_into(grid, &uniform(grid, f64::from(k) / 16.0), &mut out);
        let tiles = grid.cell_count() / 16;
        assert_eq!(count_on(&out), k as usize * tiles, "k={k}");
    }
}

#[test]
fn duty_cycle_matches_every_level_of_8x8() {
    let d = OrderedDitherer::new(&BAYER_8X8);
    let grid = GridDims { cols: 8, rows: 8 };
    let mut out = Vec::new();
    for k in 0..=64u32 {
        d.dither_into(grid, &uniform(grid, f64::from(k) / 64.0), &mut out);
        assert_eq!(count_on(&out), k as usize, "k={k}");
    }
}

#[test]
fn decisions_depend_only_on_intensity_and_tile_position() {
    let d = OrderedDitherer::new(&BAYER_8X8);
    let mut rng = Rng64::new(99);
    for _ in 0..500 {
        let v = rng.next_f64_01();
        let x = (rng.next_u64() % 1000) as u32;
        let y = (rng.next_u64() % 1000) as u32;
        let base = d.decide(v, x % 8, y % 8);
        assert_eq!(d.decide(v, x, y), base);
        assert_eq!(d.decide(v, x + 8, y + 16), base);
    }
}

#[test]
fn bulk_and_single_cell_paths_agree() {
    let d = OrderedDitherer::new(&BAYER_4X4);
    let grid = GridDims { cols: 7, rows: 5 };
    let mut rng = Rng64::new(3);
    let field: Vec<f64> = (0..grid.cell_count()).map(|_| rng.next_f64_01()).collect();
    let mut out = Vec::new();
    d.dither_into(grid, &field, &mut out);
    assert_eq!(out.len(), grid.cell_count());
    for y in 0..grid.rows {
        for x in 0..grid.cols {
            let i = (y * grid.cols + x) as usize;
            assert_eq!(out[i], d.decide(field[i], x, y));
        }
    }
}

#[test]
fn extremes_saturate() {
    let d = OrderedDitherer::new(&BAYER_4X4);
    let grid = GridDims { cols: 4, rows: 4 };
    let mut out = Vec::new();
    d.dither_into(grid, &uniform(grid, 0.0), &mut out);
    assert_eq!(count_on(&out), 0);
    d.dither_into(grid, &uniform(grid, 1.0), &mut out);
    assert_eq!(count_on(&out), 16);
}

#[test]
fn intensity_just_above_a_threshold_turns_on() {
    let d = OrderedDitherer::new(&BAYER_4X4);
    let grid = GridDims { cols: 4, rows: 4 };
    let mut out = Vec::new();
    d.dither_into(grid, &uniform(grid, 0.500_000_001), &mut out);
    assert_eq!(count_on(&out), 9);
    assert_eq!(out[2 * 4 + 3], Tone::Off);
    // Level 8 sits at (1, 0).
    assert_eq!(out[1], Tone::On);
}

#[test]
fn empty_grids_yield_no_tones() {
    let d = OrderedDitherer::new(&BAYER_8X8);
    let mut out = vec![Tone::On; 3];
    for grid in [GridDims { cols: 0, rows: 5 }, GridDims { cols: 5, rows: 0 }] {
        d.dither_into(grid, &[0.9; 5], &mut out);
        assert!(out.is_empty());
    }
}
