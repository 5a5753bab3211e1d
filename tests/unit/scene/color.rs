use super::*;
use serde_json::json;

#[test]
fn parses_long_and_short_hex() {
    assert_eq!(Rgb8::from_hex("#ff8000").unwrap(), Rgb8::new(255, 128, 0));
    assert_eq!(Rgb8::from_hex("FF8000").unwrap(), Rgb8::new(255, 128, 0));
    assert_eq!(Rgb8::from_hex("#f80").unwrap(), Rgb8::new(255, 136, 0));
    assert!(Rgb8::from_hex("#ff80").is_err());
    assert!(Rgb8::from_hex("#gg0000").is_err());
    assert!(Rgb8::from_hex("#ééé").is_err());
}

#[test]
fn hex_round_trips_through_serde() {
    let c = Rgb8::new(0x12, 0xab, 0x0f);
    let v = serde_json::to_value(c).unwrap();
    assert_eq!(v, json!("#12ab0f"));
    let back: Rgb8 = serde_json::from_value(v).unwrap();
    assert_eq!(back, c);
}

#[test]
fn parses_object_and_array_forms() {
    let c: Rgb8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgb8::new(1, 2, 3));
    let c: Rgb8 = serde_json::from_value(json!([4, 5, 6])).unwrap();
    assert_eq!(c, Rgb8::new(4, 5, 6));
    assert!(serde_json::from_value::<Rgb8>(json!([1, 2])).is_err());
    assert!(serde_json::from_value::<Rgb8>(json!([1, 2, 300])).is_err());
}
