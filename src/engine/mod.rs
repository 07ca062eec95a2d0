pub mod frame;
pub mod hover;
pub mod interpolate;
pub mod magnet;
pub mod ripple;
pub mod trail;

use std::fmt;
use std::time::Duration;

use bevy::math::{Rect, Vec2};

use crate::config::EngineConfig;

pub use frame::{CursorRig, FrameOutput, PointerSnapshot};
pub use hover::{CursorKind, ElementRole, HoverMachine, HoverTarget, KindChange};
pub use magnet::MagneticField;
pub use ripple::{Ripple, RippleEmitter, RippleId};

/// Geometry lookup failure for a hover handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError<H> {
    /// The element was removed from the visual tree
    Detached(H),
}

impl<H: fmt::Debug> fmt::Display for GeometryError<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::Detached(handle) => {
                write!(f, "Hover target {:?} is no longer attached", handle)
            }
        }
    }
}

impl<H: fmt::Debug> std::error::Error for GeometryError<H> {}

/// Result of one render tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Engine stopped; nothing was updated
    Inert,
    Rendered { kind_change: Option<KindChange> },
}

/// The whole cursor effect: handler-written input state plus tick-owned followers.
///
/// Handlers (`pointer_moved`, `set_pressed`, `hover_*`, `clicked`) only write
/// input state; [`CursorEngine::tick`] is the only writer of follower state.
#[derive(Debug, Clone)]
pub struct CursorEngine<H> {
    config: EngineConfig,
    pointer: Vec2,
    pressed: bool,
    hover: HoverMachine<H>,
    field: MagneticField,
    rig: CursorRig,
    ripples: RippleEmitter,
    running: bool,
}

impl<H: Copy + Eq + fmt::Debug> CursorEngine<H> {
    pub fn new(config: EngineConfig) -> Self {
        CursorEngine {
            pointer: config.rest(),
            pressed: false,
            hover: HoverMachine::default(),
            field: MagneticField::new(config.magnetic_radius, config.magnetic_strength),
            rig: CursorRig::new(&config),
            ripples: RippleEmitter::new(config.ripple_cap, config.ripple_lifetime()),
            running: false,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin ticking; followers resume from the last known pointer position
    pub fn start(&mut self) {
        self.running = true;
        self.rig.snap_to(self.pointer);
    }

    /// Stop ticking and drop transient interaction state
    pub fn stop(&mut self) -> Option<KindChange> {
        self.running = false;
        self.pressed = false;
        self.hover.invalidate()
    }

    // === Handlers ===

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = position;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn hover_entered(&mut self, handle: H, role: ElementRole) -> Option<KindChange> {
        self.hover.on_enter(handle, role)
    }

    pub fn hover_left<F>(&mut self, related: Option<H>, is_descendant: F) -> Option<KindChange>
    where
        F: Fn(H, H) -> bool,
    {
        self.hover.on_leave(related, is_descendant)
    }

    /// Spawn a ripple at the current pointer position
    pub fn clicked(&mut self, now: Duration) -> RippleId {
        self.ripples.emit(self.pointer, now)
    }

    /// Ripple expiry runs on its own clock, whether or not the engine ticks
    pub fn expire_ripples(&mut self, now: Duration) -> usize {
        self.ripples.expire(now)
    }

    // === Render tick ===

    /// Advance every follower by one frame.
    ///
    /// `geometry` resolves the hovered handle to its bounds; a failure clears
    /// the hover target and this and later ticks use the raw pointer.
    pub fn tick<F>(&mut self, geometry: F) -> Tick
    where
        F: FnOnce(H) -> Result<Rect, GeometryError<H>>,
    {
        if !self.running {
            return Tick::Inert;
        }

        let snapshot = PointerSnapshot {
            position: self.pointer,
            pressed: self.pressed,
        };
        let (target, kind_change) =
            self.field
                .resolve_hovered(snapshot.position, &mut self.hover, geometry);
        self.rig.step(snapshot, target, self.hover.kind());

        Tick::Rendered { kind_change }
    }

    // === Queries ===

    pub fn output(&self) -> &FrameOutput {
        self.rig.output()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn kind(&self) -> CursorKind {
        self.hover.kind()
    }

    pub fn hover_target(&self) -> Option<HoverTarget<H>> {
        self.hover.target()
    }

    pub fn ripples(&self, now: Duration) -> impl Iterator<Item = &Ripple> + '_ {
        self.ripples.list(now)
    }

    pub fn ripple_progress(&self, ripple: &Ripple, now: Duration) -> f32 {
        self.ripples.progress(ripple, now)
    }

    pub fn trail_weight(&self, index: usize) -> f32 {
        self.rig.trail().weight(index)
    }
}
