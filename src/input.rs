use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::session::GlowSession;

#[derive(Message, Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Window (logical) coordinates: pixels from top-left
    pub position: Vec2,
    pub event_type: PointerEventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Up,
    /// Press and release of the primary button
    Click,
}

/// System: Overwrite the pointer sample with the latest cursor position
pub fn track_pointer(mut moves: MessageReader<CursorMoved>, mut session: ResMut<GlowSession>) {
    for e in moves.read() {
        // last event wins
        session.pointer_moved(e.position);
    }
}

/// System: Turn primary-button state into pointer events
pub fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    session: Res<GlowSession>,
    mut out: MessageWriter<PointerEvent>,
) {
    let position = session.pointer();

    if mouse_buttons.just_pressed(MouseButton::Left) {
        out.write(PointerEvent {
            position,
            event_type: PointerEventType::Down,
        });
    }
    if mouse_buttons.just_released(MouseButton::Left) {
        out.write(PointerEvent {
            position,
            event_type: PointerEventType::Up,
        });
        out.write(PointerEvent {
            position,
            event_type: PointerEventType::Click,
        });
    }
}

/// System: Apply button events to the session (press state, ripples)
pub fn apply_pointer_events(
    mut events: MessageReader<PointerEvent>,
    time: Res<Time<Real>>,
    mut session: ResMut<GlowSession>,
) {
    for event in events.read() {
        match event.event_type {
            PointerEventType::Down => session.set_pressed(true),
            PointerEventType::Up => session.set_pressed(false),
            PointerEventType::Click => {
                let id = session.clicked(time.elapsed());
                debug!("Ripple {:?} at {:?}", id, event.position);
            }
        }
    }
}
