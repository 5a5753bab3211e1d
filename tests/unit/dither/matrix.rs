use super::*;

fn assert_is_permutation(m: &ThresholdMatrix) {
    let n = m.size();
    let mut seen = vec![false; m.level_count() as usize];
    for y in 0..n {
        for x in 0..n {
            let l = m.level(x, y) as usize;
            assert!(!seen[l], "level {l} repeated");
            seen[l] = true;
        }
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn matrices_hold_each_level_once() {
    assert_is_permutation(&BAYER_4X4);
    assert_is_permutation(&BAYER_8X8);
}

#[test]
fn bayer4_matches_reference_layout() {
    let rows: Vec<Vec<u8>> = (0..4)
        .map(|y| (0..4).map(|x| BAYER_4X4.level(x, y)).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec![0, 8, 2, 10],
            vec![12, 4, 14, 6],
            vec![3, 11, 1, 9],
            vec![15, 7, 13, 5],
        ]
    );
}

#[test]
fn thresholds_are_normalized_and_tile() {
    assert_eq!(BAYER_4X4.threshold(0, 0), 0.0);
    assert_eq!(BAYER_4X4.threshold(3, 3), 5.0 / 16.0);
    assert_eq!(BAYER_4X4.threshold(4, 0), BAYER_4X4.threshold(0, 0));
    assert_eq!(BAYER_8X8.threshold(9, 17), BAYER_8X8.threshold(1, 1));
    for y in 0..8 {
        for x in 0..8 {
            let t = BAYER_8X8.threshold(x, y);
            assert!((0.0..1.0).contains(&t));
        }
    }
}

#[test]
fn threshold_row_agrees_with_point_lookup() {
    for y in 0..6 {
        let row: Vec<f64> = BAYER_8X8.threshold_row(y).collect();
        assert_eq!(row.len(), 8);
        for (x, t) in row.iter().enumerate() {
            assert_eq!(*t, BAYER_8X8.threshold(x as u32, y));
        }
    }
}

#[test]
fn matrix_size_serde_names() {
    let s = serde_json::to_string(&MatrixSize::Bayer8).unwrap();
    assert_eq!(s, "\"8x8\"");
    let m: MatrixSize = serde_json::from_str("\"4x4\"").unwrap();
    assert_eq!(m.matrix().size(), 4);
}
