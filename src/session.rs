// session.rs

use bevy::prelude::*;

use crate::config::EngineConfig;
use crate::engine::CursorEngine;

/// The cursor engine as seen by Bevy systems.
///
/// Hover handles are entities: a despawned element simply fails its lookup.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct GlowSession(CursorEngine<Entity>);

impl GlowSession {
    pub fn new(config: EngineConfig) -> Self {
        GlowSession(CursorEngine::new(config))
    }
}
