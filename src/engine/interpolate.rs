use bevy::math::Vec2;

/// Move `current` a fixed fraction of the remaining distance toward `target`.
///
/// `factor` is expected in (0, 1). Repeated calls against a fixed target give
/// exponential smoothing: the value converges without ever passing the target.
pub fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Per-axis [`lerp`] for screen positions
pub fn lerp_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    Vec2::new(
        lerp(current.x, target.x, factor),
        lerp(current.y, target.y, factor),
    )
}

/// A 2D position chasing a target via interpolation
///
/// Overwritten in place every tick; never reallocated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Follower {
    pub position: Vec2,
}

impl Follower {
    pub fn at(position: Vec2) -> Self {
        Follower { position }
    }

    /// Step toward `target` and return the new position
    pub fn chase(&mut self, target: Vec2, factor: f32) -> Vec2 {
        self.position = lerp_vec2(self.position, target, factor);
        self.position
    }

    pub fn snap_to(&mut self, position: Vec2) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_fixed_point() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let value = rng.random_range(-5000.0..5000.0);
            let factor = rng.random_range(0.001..0.999);
            assert_eq!(
                lerp(value, value, factor),
                value,
                "lerp({value}, {value}, {factor}) must stay put"
            );
        }
    }

    #[test]
    fn test_converges_without_overshoot() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let start = rng.random_range(-2000.0..2000.0_f32);
            let target = rng.random_range(-2000.0..2000.0_f32);
            let factor = rng.random_range(0.01..0.99);

            let mut current = start;
            let mut distance = (target - current).abs();

            for _ in 0..400 {
                current = lerp(current, target, factor);
                let next_distance = (target - current).abs();

                assert!(
                    next_distance <= distance,
                    "distance grew from {distance} to {next_distance} (factor {factor})"
                );
                if start <= target {
                    assert!(current <= target, "overshot {target} with {current}");
                } else {
                    assert!(current >= target, "overshot {target} with {current}");
                }
                distance = next_distance;
            }
        }
    }

    #[test]
    fn test_deterministic_sequence() {
        let run = || {
            let mut follower = Follower::at(Vec2::new(-400.0, -400.0));
            let targets = [Vec2::new(10.0, 20.0), Vec2::new(300.0, 5.0), Vec2::ZERO];
            let mut out = Vec::new();
            for _ in 0..30 {
                for &target in &targets {
                    out.push(follower.chase(target, 0.13));
                }
            }
            out
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_axes_are_independent() {
        let mut follower = Follower::at(Vec2::new(0.0, 50.0));
        let position = follower.chase(Vec2::new(100.0, 50.0), 0.25);

        assert_eq!(position, Vec2::new(25.0, 50.0));
    }
}
