use bevy::prelude::*;
use bevy::ui::{ComputedNode, UiGlobalTransform};

use crate::{
    engine::Tick,
    session::GlowSession,
    visual::hover::{CursorKindChanged, CursorTarget, hovered_bounds},
};

/// System: One render tick per frame while the engine runs
pub fn tick_engine(
    mut session: ResMut<GlowSession>,
    targets: Query<(&ComputedNode, &UiGlobalTransform), With<CursorTarget>>,
    mut kinds: MessageWriter<CursorKindChanged>,
) {
    let tick = session.tick(|entity| hovered_bounds(&targets, entity));

    if let Tick::Rendered {
        kind_change: Some(change),
    } = tick
    {
        kinds.write(CursorKindChanged::from(change));
    }
}

/// System: Drop ripples past their lifetime. Runs whether or not the engine ticks.
pub fn expire_ripples(time: Res<Time<Real>>, mut session: ResMut<GlowSession>) {
    let expired = session.expire_ripples(time.elapsed());
    if expired > 0 {
        debug!("Expired {} ripple(s)", expired);
    }
}
