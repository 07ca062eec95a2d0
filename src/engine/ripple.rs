use std::collections::VecDeque;
use std::time::Duration;

use bevy::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RippleId(pub u64);

/// A click ring anchored where it was spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: RippleId,
    pub position: Vec2,
    pub created_at: Duration,
}

/// Bounded, creation-ordered set of live ripples.
///
/// Timestamps are durations on one monotonic clock supplied by the caller.
#[derive(Debug, Clone)]
pub struct RippleEmitter {
    ripples: VecDeque<Ripple>,
    next_id: u64,
    cap: usize,
    lifetime: Duration,
}

impl RippleEmitter {
    pub fn new(cap: usize, lifetime: Duration) -> Self {
        RippleEmitter {
            ripples: VecDeque::with_capacity(cap + 1),
            next_id: 0,
            cap,
            lifetime,
        }
    }

    /// Spawn a ripple at `position`, dropping the oldest beyond the cap
    pub fn emit(&mut self, position: Vec2, now: Duration) -> RippleId {
        let id = RippleId(self.next_id);
        self.next_id += 1;

        self.ripples.push_back(Ripple {
            id,
            position,
            created_at: now,
        });
        while self.ripples.len() > self.cap {
            self.ripples.pop_front();
        }

        id
    }

    /// Remove every ripple whose lifetime has elapsed; returns how many went
    pub fn expire(&mut self, now: Duration) -> usize {
        let before = self.ripples.len();
        let lifetime = self.lifetime;
        self.ripples.retain(|ripple| now < ripple.created_at + lifetime);
        before - self.ripples.len()
    }

    /// Ripples still alive at `now`, oldest first
    pub fn list(&self, now: Duration) -> impl Iterator<Item = &Ripple> + '_ {
        let lifetime = self.lifetime;
        self.ripples
            .iter()
            .filter(move |ripple| now < ripple.created_at + lifetime)
    }

    /// Normalized age of `ripple` in [0, 1]
    pub fn progress(&self, ripple: &Ripple, now: Duration) -> f32 {
        let age = now.saturating_sub(ripple.created_at);
        (age.as_secs_f32() / self.lifetime.as_secs_f32()).clamp(0.0, 1.0)
    }
}
