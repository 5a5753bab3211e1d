use super::*;
use crate::foundation::core::Rect;
use crate::host::headless::HeadlessHost;

fn host() -> HeadlessHost {
    HeadlessHost::new(Rect::new(0.0, 0.0, 100.0, 100.0), 1.0)
}

#[test]
fn fires_once_across_enter_exit_reenter() {
    let h = host();
    let mut env = h.clone();
    let mut gate = ViewportActivationGate::new(DEFAULT_ACTIVATION_THRESHOLD);
    gate.arm(&mut env);
    assert_eq!(h.attached_of(ListenerKind::Visibility), 1);

    let reports = [0.0, 0.05, 0.3, 0.0, 0.8, 0.0, 1.0];
    let fires = reports
        .iter()
        .filter(|&&f| gate.observe(f, &mut env))
        .count();
    assert_eq!(fires, 1);
    assert!(gate.has_fired());
    assert_eq!(h.attached(), 0);
    assert_eq!(h.stray_detaches(), 0);
}

#[test]
fn below_threshold_never_fires() {
    let h = host();
    let mut env = h.clone();
    let mut gate = ViewportActivationGate::new(0.5);
    gate.arm(&mut env);
    for f in [0.0, 0.1, 0.49, f64::NAN] {
        assert!(!gate.observe(f, &mut env));
    }
    assert!(gate.is_armed());

    gate.release(&mut env);
    gate.release(&mut env);
    assert_eq!(h.attached(), 0);
    assert_eq!(h.stray_detaches(), 0);
}

#[test]
fn unarmed_gate_ignores_reports() {
    let h = host();
    let mut env = h.clone();
    let mut gate = ViewportActivationGate::new(0.1);
    assert!(!gate.observe(1.0, &mut env));
    assert!(!gate.has_fired());
}

#[test]
fn fired_gate_does_not_rearm() {
    let h = host();
    let mut env = h.clone();
    let mut gate = ViewportActivationGate::new(0.1);
    gate.arm(&mut env);
    assert!(gate.observe(0.2, &mut env));
    gate.arm(&mut env);
    assert!(!gate.is_armed());
    assert_eq!(h.attached(), 0);
}
