use bevy::math::{Rect, Vec2};

use super::GeometryError;
use super::hover::{HoverMachine, KindChange};

/// Attraction toward the center of the hovered target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticField {
    /// Distance (px) inside which the pull applies
    pub radius: f32,
    /// Maximum blend toward the center, in (0, 1)
    pub strength: f32,
}

impl MagneticField {
    pub fn new(radius: f32, strength: f32) -> Self {
        MagneticField { radius, strength }
    }

    /// Pull factor at `distance` from the center, bounded in [0, strength]
    pub fn force_at(&self, distance: f32) -> f32 {
        if distance >= self.radius {
            return 0.0;
        }
        (1.0 - distance / self.radius) * self.strength
    }

    /// Adjusted follow target for `pointer` given the hovered bounds (if any)
    pub fn resolve(&self, pointer: Vec2, bounds: Option<Rect>) -> Vec2 {
        let Some(bounds) = bounds else {
            return pointer;
        };

        let center = bounds.center();
        let force = self.force_at(pointer.distance(center));
        if force <= 0.0 {
            return pointer;
        }

        pointer - (pointer - center) * force
    }

    /// Resolve against the hover machine's current target.
    ///
    /// A stale target clears the hover state and the pointer is returned
    /// unchanged; the error never leaves this function.
    pub fn resolve_hovered<H, F>(
        &self,
        pointer: Vec2,
        hover: &mut HoverMachine<H>,
        geometry: F,
    ) -> (Vec2, Option<KindChange>)
    where
        H: Copy + Eq + std::fmt::Debug,
        F: FnOnce(H) -> Result<Rect, GeometryError<H>>,
    {
        let Some(handle) = hover.handle() else {
            return (pointer, None);
        };

        match geometry(handle) {
            Ok(bounds) => (self.resolve(pointer, Some(bounds)), None),
            Err(err) => {
                log::debug!("Dropping hover target: {}", err);
                (pointer, hover.invalidate())
            }
        }
    }
}
