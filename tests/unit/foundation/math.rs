use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_seeds_diverge() {
    let mut a = Rng64::new(1);
    let mut b = Rng64::new(2);
    assert_ne!(a.next_u64(), b.next_u64());
}

#[test]
fn unit_interval_and_ranges_are_bounded() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
        let r = rng.range_f64(-2.0, 3.0);
        assert!((-2.0..3.0).contains(&r));
    }
    assert_eq!(rng.range_f64(5.0, 5.0), 5.0);
    assert_eq!(rng.range_f64(5.0, 1.0), 5.0);
}

#[test]
fn clamp01_handles_non_finite() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(f64::INFINITY), 1.0);
    assert_eq!(clamp01(f64::NEG_INFINITY), 0.0);
    assert_eq!(clamp01(0.25), 0.25);
}
