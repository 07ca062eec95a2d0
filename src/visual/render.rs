//! UI nodes that draw the cursor: glow blob, precision dot, ring, trail and
//! click ripples.
//!
//! Everything here is absolute-positioned in logical viewport pixels and tagged
//! `DespawnOnExit(EngineState::Running)`, so stopping the engine removes it.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy::ui::{
    BackgroundGradient, ColorStop, Gradient, RadialGradient, RadialGradientShape, UiPosition,
};

use crate::{
    engine::{CursorKind, RippleId},
    session::GlowSession,
    visual::{lifecycle::EngineState, utils::ripple_envelope},
};

const PRIMARY: Color = Color::srgb(0.098, 0.463, 0.824);
const PRIMARY_LIGHT: Color = Color::srgb(0.259, 0.647, 0.961);

const GLOW_ALPHA: f32 = 0.08;
const GLOW_FADE_PERCENT: f32 = 70.0;
const DOT_ALPHA: f32 = 0.55;
const RING_ALPHA: f32 = 0.7;
const TRAIL_ALPHA: f32 = 0.35;
const TRAIL_SIZE: f32 = 10.0;
const RIPPLE_ALPHA: f32 = 0.85;
const RIPPLE_BORDER: f32 = 1.5;
const RING_BORDER: f32 = 1.5;

const Z_GLOW: i32 = 9990;
const Z_RIPPLE: i32 = 9993;
const Z_TRAIL: i32 = 9994;
const Z_DOT: i32 = 9995;
const Z_RING: i32 = 9996;

/// Which output a node draws
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPart {
    Glow,
    Dot,
    Ring,
    /// Trail node, head first
    Trail(usize),
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleRing {
    pub id: RippleId,
}

/// Soft blob: faint at the center, fully transparent from 70% outward
pub fn glow_gradient() -> BackgroundGradient {
    BackgroundGradient(vec![Gradient::Radial(RadialGradient::new(
        UiPosition::CENTER,
        RadialGradientShape::FarthestCorner,
        vec![
            ColorStop::new(PRIMARY_LIGHT.with_alpha(GLOW_ALPHA), Val::Percent(0.0)),
            ColorStop::new(PRIMARY_LIGHT.with_alpha(0.0), Val::Percent(GLOW_FADE_PERCENT)),
        ],
    ))])
}

fn absolute_node(size: Vec2) -> Node {
    Node {
        position_type: PositionType::Absolute,
        width: Val::Px(size.x),
        height: Val::Px(size.y),
        ..default()
    }
}

/// Move `node` so its box is `size` and centered on `center`
fn place(node: &mut Node, center: Vec2, size: Vec2) {
    let top_left = center - size * 0.5;
    node.left = Val::Px(top_left.x);
    node.top = Val::Px(top_left.y);
    node.width = Val::Px(size.x);
    node.height = Val::Px(size.y);
}

/// OnEnter(Running): spawn one node per output at the current frame state
pub fn spawn_outputs(mut commands: Commands, session: Res<GlowSession>) {
    let config = *session.config();
    let frame = session.output();

    let glow = Vec2::splat(config.glow_size);
    let mut glow_node = absolute_node(glow);
    place(&mut glow_node, frame.glow + glow * 0.5, glow);
    commands.spawn((
        Name::new("Cursor Glow"),
        CursorPart::Glow,
        glow_node,
        glow_gradient(),
        GlobalZIndex(Z_GLOW),
        DespawnOnExit(EngineState::Running),
    ));

    for (index, center) in frame.trail.iter().enumerate() {
        let weight = session.trail_weight(index);
        let size = Vec2::splat(TRAIL_SIZE * weight);
        let mut node = absolute_node(size);
        place(&mut node, *center, size);
        commands.spawn((
            Name::new(format!("Cursor Trail {index}")),
            CursorPart::Trail(index),
            node,
            BackgroundColor(PRIMARY_LIGHT.with_alpha(TRAIL_ALPHA * weight)),
            BorderRadius::MAX,
            GlobalZIndex(Z_TRAIL),
            DespawnOnExit(EngineState::Running),
        ));
    }

    let dot = Vec2::splat(config.dot_size);
    let mut dot_node = absolute_node(dot);
    place(&mut dot_node, frame.dot, dot);
    commands.spawn((
        Name::new("Cursor Dot"),
        CursorPart::Dot,
        dot_node,
        BackgroundColor(PRIMARY.with_alpha(DOT_ALPHA)),
        BorderRadius::MAX,
        GlobalZIndex(Z_DOT),
        DespawnOnExit(EngineState::Running),
    ));

    let ring = frame.ring_extent * frame.ring_scale;
    let mut ring_node = Node {
        border: UiRect::all(Val::Px(RING_BORDER)),
        ..absolute_node(ring)
    };
    place(&mut ring_node, frame.ring, ring);
    commands.spawn((
        Name::new("Cursor Ring"),
        CursorPart::Ring,
        ring_node,
        BorderColor::all(PRIMARY.with_alpha(RING_ALPHA)),
        BorderRadius::MAX,
        GlobalZIndex(Z_RING),
        DespawnOnExit(EngineState::Running),
    ));

    debug!("Spawned cursor outputs ({} trail nodes)", frame.trail.len());
}

/// System: Copy the latest frame onto the output nodes
pub fn push_outputs(
    session: Res<GlowSession>,
    mut parts: Query<(&CursorPart, &mut Node, &mut Visibility, Option<&mut BackgroundColor>)>,
) {
    let frame = session.output();
    let config = session.config();

    for (part, mut node, mut visibility, background) in &mut parts {
        match *part {
            CursorPart::Glow => {
                let size = Vec2::splat(config.glow_size);
                place(&mut node, frame.glow + size * 0.5, size);
            }
            CursorPart::Dot => {
                place(&mut node, frame.dot, Vec2::splat(config.dot_size));
                visibility.set_if_neq(if frame.dot_visible {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                });
            }
            CursorPart::Ring => {
                place(&mut node, frame.ring, frame.ring_extent * frame.ring_scale);
            }
            CursorPart::Trail(index) => {
                let Some(center) = frame.trail.get(index) else {
                    continue;
                };
                let weight = session.trail_weight(index);
                place(&mut node, *center, Vec2::splat(TRAIL_SIZE * weight));
                if let Some(mut background) = background {
                    // Fade the trail slightly while over text
                    let alpha = match frame.kind {
                        CursorKind::TextEntry => TRAIL_ALPHA * 0.5,
                        _ => TRAIL_ALPHA,
                    };
                    background.0 = PRIMARY_LIGHT.with_alpha(alpha * weight);
                }
            }
        }
    }
}

/// System: Mirror the live ripple set onto ripple ring nodes
pub fn sync_ripple_rings(
    mut commands: Commands,
    time: Res<Time<Real>>,
    session: Res<GlowSession>,
    mut rings: Query<(Entity, &RippleRing, &mut Node, &mut BorderColor)>,
) {
    let now = time.elapsed();
    let max_diameter = session.config().ripple_max_diameter;
    let mut drawn = HashSet::new();

    for (entity, ring, mut node, mut border) in &mut rings {
        let live = session.ripples(now).find(|ripple| ripple.id == ring.id);
        let Some(ripple) = live else {
            commands.entity(entity).despawn();
            continue;
        };

        let (growth, fade) = ripple_envelope(session.ripple_progress(ripple, now));
        place(&mut node, ripple.position, Vec2::splat(max_diameter * growth));
        *border = BorderColor::all(PRIMARY.with_alpha(RIPPLE_ALPHA * fade));
        drawn.insert(ring.id);
    }

    for ripple in session.ripples(now).filter(|ripple| !drawn.contains(&ripple.id)) {
        let mut node = Node {
            border: UiRect::all(Val::Px(RIPPLE_BORDER)),
            ..absolute_node(Vec2::ZERO)
        };
        place(&mut node, ripple.position, Vec2::ZERO);
        commands.spawn((
            Name::new("Cursor Ripple"),
            RippleRing { id: ripple.id },
            node,
            BorderColor::all(PRIMARY.with_alpha(RIPPLE_ALPHA)),
            BorderRadius::MAX,
            GlobalZIndex(Z_RIPPLE),
            DespawnOnExit(EngineState::Running),
        ));
    }
}
