// ============================================================================
// EASING FUNCTIONS for transient effects
// ============================================================================

/// Ease-out cubic: fast at start, decelerates at end
/// Good for "burst" animations like click ripples
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = 1.0 - t;
    1.0 - x * x * x
}

/// Ripple ring look at normalized age `t`: (diameter fraction, opacity fraction)
pub fn ripple_envelope(t: f32) -> (f32, f32) {
    let eased = ease_out_cubic(t.clamp(0.0, 1.0));
    (eased, 1.0 - eased)
}
