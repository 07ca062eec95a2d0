use bevy::math::Vec2;

use crate::config::EngineConfig;

use super::hover::CursorKind;
use super::interpolate::Follower;
use super::trail::TrailChain;

/// Pointer state read once at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSnapshot {
    pub position: Vec2,
    pub pressed: bool,
}

/// Everything the presentation layer needs for one frame.
///
/// Overwritten in place each tick; `trail` is sized once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Lagged ring center
    pub ring: Vec2,
    /// Eased ring size for the current cursor kind, before the press scale
    pub ring_extent: Vec2,
    /// Press multiplier, applied directly without easing
    pub ring_scale: f32,
    /// Top-left corner of the glow blob
    pub glow: Vec2,
    /// Precision dot center, always the raw pointer
    pub dot: Vec2,
    pub dot_visible: bool,
    pub kind: CursorKind,
    /// Trail node centers, head first
    pub trail: Vec<Vec2>,
}

/// Ring extents per cursor kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingShapes {
    pub default: Vec2,
    pub interactive: Vec2,
    pub text_entry: Vec2,
}

impl RingShapes {
    pub fn for_kind(&self, kind: CursorKind) -> Vec2 {
        match kind {
            CursorKind::Default => self.default,
            CursorKind::Interactive => self.interactive,
            CursorKind::TextEntry => self.text_entry,
        }
    }
}

/// Follower states owned by the render tick
#[derive(Debug, Clone)]
pub struct CursorRig {
    ring: Follower,
    extent: Follower,
    trail: TrailChain,
    shapes: RingShapes,
    ring_factor: f32,
    press_scale: f32,
    glow_offset: Vec2,
    output: FrameOutput,
}

impl CursorRig {
    pub fn new(config: &EngineConfig) -> Self {
        let rest = config.rest();
        let shapes = RingShapes {
            default: Vec2::splat(config.ring_size),
            interactive: Vec2::splat(config.hover_ring_size),
            text_entry: config.text_bar(),
        };
        let glow_offset = Vec2::splat(-config.glow_size * 0.5);

        CursorRig {
            ring: Follower::at(rest),
            extent: Follower::at(shapes.default),
            trail: TrailChain::new(config.trail_length, config.trail_factor, rest),
            shapes,
            ring_factor: config.ring_factor,
            press_scale: config.press_scale,
            glow_offset,
            output: FrameOutput {
                ring: rest,
                ring_extent: shapes.default,
                ring_scale: 1.0,
                glow: rest + glow_offset,
                dot: rest,
                dot_visible: true,
                kind: CursorKind::Default,
                trail: vec![rest; config.trail_length],
            },
        }
    }

    /// Put every follower at `position` and reset the shape
    pub fn snap_to(&mut self, position: Vec2) {
        self.ring.snap_to(position);
        self.extent.snap_to(self.shapes.default);
        self.trail.snap_to(position);
        self.publish(
            PointerSnapshot {
                position,
                pressed: false,
            },
            CursorKind::Default,
        );
    }

    /// One frame: ring chases `target`, trail cascades, derived outputs follow
    pub fn step(
        &mut self,
        pointer: PointerSnapshot,
        target: Vec2,
        kind: CursorKind,
    ) -> &FrameOutput {
        self.ring.chase(target, self.ring_factor);
        self.extent.chase(self.shapes.for_kind(kind), self.ring_factor);
        self.trail.advance(self.ring.position);

        self.publish(pointer, kind);
        &self.output
    }

    pub fn output(&self) -> &FrameOutput {
        &self.output
    }

    pub fn trail(&self) -> &TrailChain {
        &self.trail
    }

    fn publish(&mut self, pointer: PointerSnapshot, kind: CursorKind) {
        let out = &mut self.output;
        out.ring = self.ring.position;
        out.ring_extent = self.extent.position;
        out.ring_scale = if pointer.pressed {
            self.press_scale
        } else {
            1.0
        };
        out.glow = self.ring.position + self.glow_offset;
        out.dot = pointer.position;
        out.dot_visible = kind != CursorKind::Interactive;
        out.kind = kind;
        for (slot, position) in out.trail.iter_mut().zip(self.trail.positions()) {
            *slot = position;
        }
    }
}
