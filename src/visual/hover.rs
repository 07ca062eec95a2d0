use bevy::prelude::*;
use bevy::ui::{ComputedNode, UiGlobalTransform};

use crate::{
    engine::{CursorKind, ElementRole, GeometryError, KindChange},
    session::GlowSession,
};

/// Marks a UI element the cursor reacts to
#[derive(Component, Debug, Clone, Copy)]
pub struct CursorTarget {
    pub role: ElementRole,
}

impl CursorTarget {
    pub fn new(role: ElementRole) -> Self {
        CursorTarget { role }
    }
}

/// Pointer crossed an element boundary (leave is always written before enter)
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCrossing {
    Enter {
        target: Entity,
    },
    Leave {
        target: Entity,
        /// Element the pointer moved into, if any
        related: Option<Entity>,
    },
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorKindChanged {
    pub from: CursorKind,
    pub to: CursorKind,
}

impl From<KindChange> for CursorKindChanged {
    fn from(change: KindChange) -> Self {
        CursorKindChanged {
            from: change.from,
            to: change.to,
        }
    }
}

/// Innermost target under the pointer as of the last frame
#[derive(Resource, Debug, Default)]
pub struct CrossingTracker {
    under: Option<Entity>,
}

impl CrossingTracker {
    pub fn reset(&mut self) {
        self.under = None;
    }
}

/// Bounds of a laid-out UI node in logical viewport pixels
pub fn target_bounds(node: &ComputedNode, transform: &UiGlobalTransform) -> Rect {
    let scale = node.inverse_scale_factor();
    Rect::from_center_size(transform.translation * scale, node.size() * scale)
}

/// Topmost candidate containing `pointer`
pub fn innermost_hit<I>(pointer: Vec2, candidates: I) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, Rect, u32)>,
{
    candidates
        .into_iter()
        .filter(|(_, bounds, _)| bounds.contains(pointer))
        .max_by_key(|&(_, _, stack_index)| stack_index)
        .map(|(entity, _, _)| entity)
}

/// Walk `ChildOf` links upward from `entity` looking for `ancestor`
pub fn is_descendant(parents: &Query<&ChildOf>, entity: Entity, ancestor: Entity) -> bool {
    let mut current = entity;
    while let Ok(child_of) = parents.get(current) {
        let parent = child_of.parent();
        if parent == ancestor {
            return true;
        }
        current = parent;
    }
    false
}

/// System: Hit-test targets and emit enter/leave crossings
pub fn detect_crossings(
    session: Res<GlowSession>,
    targets: Query<
        (Entity, &ComputedNode, &UiGlobalTransform, &InheritedVisibility),
        With<CursorTarget>,
    >,
    mut tracker: ResMut<CrossingTracker>,
    mut crossings: MessageWriter<PointerCrossing>,
) {
    let pointer = session.pointer();
    let hit = innermost_hit(
        pointer,
        targets
            .iter()
            .filter(|(_, _, _, visibility)| visibility.get())
            .map(|(entity, node, transform, _)| {
                (entity, target_bounds(node, transform), node.stack_index())
            }),
    );

    if hit == tracker.under {
        return;
    }

    if let Some(previous) = tracker.under {
        crossings.write(PointerCrossing::Leave {
            target: previous,
            related: hit,
        });
    }
    if let Some(target) = hit {
        crossings.write(PointerCrossing::Enter { target });
    }
    tracker.under = hit;
}

/// System: Feed crossings into the hover state machine
pub fn apply_crossings(
    mut crossings: MessageReader<PointerCrossing>,
    targets: Query<&CursorTarget>,
    parents: Query<&ChildOf>,
    mut session: ResMut<GlowSession>,
    mut kinds: MessageWriter<CursorKindChanged>,
) {
    for crossing in crossings.read() {
        let change = match *crossing {
            PointerCrossing::Enter { target } => {
                // Despawned between hit-test and now
                let Ok(cursor_target) = targets.get(target) else {
                    continue;
                };
                session.hover_entered(target, cursor_target.role)
            }
            PointerCrossing::Leave { related, .. } => {
                session.hover_left(related, |entity, ancestor| {
                    is_descendant(&parents, entity, ancestor)
                })
            }
        };

        if let Some(change) = change {
            debug!("Cursor kind {:?} -> {:?}", change.from, change.to);
            kinds.write(CursorKindChanged::from(change));
        }
    }
}

/// Geometry lookup used by the tick; a missing entity is a stale reference
pub fn hovered_bounds(
    targets: &Query<(&ComputedNode, &UiGlobalTransform), With<CursorTarget>>,
    entity: Entity,
) -> Result<Rect, GeometryError<Entity>> {
    targets
        .get(entity)
        .map(|(node, transform)| target_bounds(node, transform))
        .map_err(|_| GeometryError::Detached(entity))
}
