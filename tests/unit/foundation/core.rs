use super::*;

#[test]
fn canvas_area_and_emptiness() {
    assert_eq!(Canvas::new(4, 3).area(), 12);
    assert!(Canvas::new(0, 3).is_empty());
    assert!(Canvas::new(3, 0).is_empty());
    assert!(!Canvas::new(1, 1).is_empty());
}

#[test]
fn grid_covers_partial_edge_cells() {
    let g = GridDims::covering(Canvas::new(10, 7), 4).unwrap();
    assert_eq!(g, GridDims { cols: 3, rows: 2 });
    assert_eq!(g.cell_count(), 6);

    let exact = GridDims::covering(Canvas::new(8, 8), 4).unwrap();
    assert_eq!(exact, GridDims { cols: 2, rows: 2 });
}

#[test]
fn grid_rejects_degenerate_inputs() {
    assert!(GridDims::covering(Canvas::new(0, 10), 2).is_none());
    assert!(GridDims::covering(Canvas::new(10, 10), 0).is_none());
}

#[test]
fn rgb_to_rgba_is_opaque() {
    assert_eq!(Rgb8::new(1, 2, 3).to_rgba(), [1, 2, 3, 255]);
}
