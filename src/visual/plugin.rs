use bevy::prelude::*;

use crate::capability::CapabilityPlugin;
use crate::config::EngineConfig;
use crate::input::{PointerEvent, apply_pointer_events, collect_pointer_events, track_pointer};
use crate::session::GlowSession;
use crate::visual::hover::{
    CrossingTracker, CursorKindChanged, PointerCrossing, apply_crossings, detect_crossings,
};
use crate::visual::lifecycle::{
    EngineState, HostView, conceal_os_cursor, reveal_os_cursor, start_engine, stop_engine,
    sync_engine_state,
};
use crate::visual::render::{push_outputs, spawn_outputs, sync_ripple_rings};
use crate::visual::scheduler::{expire_ripples, tick_engine};

/// The cursor glow effect: followers, hover morphing, magnetism and ripples
pub struct CursorGlowPlugin {
    config: EngineConfig,
}

impl CursorGlowPlugin {
    pub fn with_config(config: EngineConfig) -> Self {
        CursorGlowPlugin { config }
    }
}

impl Default for CursorGlowPlugin {
    /// Defaults, unless a JSON override is named in the environment (native only)
    fn default() -> Self {
        CursorGlowPlugin::with_config(resolve_config())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_config() -> EngineConfig {
    match EngineConfig::from_env() {
        Ok(Some(config)) => {
            info!("Loaded cursor config from ${}", crate::config::CONFIG_ENV_VAR);
            config
        }
        Ok(None) => EngineConfig::default(),
        Err(err) => {
            warn!("Ignoring cursor config override: {}", err);
            EngineConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn resolve_config() -> EngineConfig {
    EngineConfig::default()
}

impl Plugin for CursorGlowPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config)
            .insert_resource(GlowSession::new(self.config))
            .init_resource::<HostView>()
            .init_resource::<CrossingTracker>()
            .init_state::<EngineState>()
            .add_message::<PointerEvent>()
            .add_message::<PointerCrossing>()
            .add_message::<CursorKindChanged>()
            .add_plugins(CapabilityPlugin {
                forced: self.config.force_hover,
            })
            .add_systems(PreUpdate, sync_engine_state)
            .add_systems(
                OnEnter(EngineState::Running),
                (start_engine, spawn_outputs, conceal_os_cursor).chain(),
            )
            .add_systems(OnExit(EngineState::Running), (stop_engine, reveal_os_cursor))
            .add_systems(
                Update,
                (
                    // Handlers: write input state only
                    track_pointer,
                    collect_pointer_events,
                    apply_pointer_events,
                    detect_crossings,
                    apply_crossings,
                    // Render tick
                    tick_engine,
                    push_outputs,
                    sync_ripple_rings,
                )
                    .chain()
                    .run_if(in_state(EngineState::Running)),
            )
            .add_systems(Update, expire_ripples.before(sync_ripple_rings))
            .add_systems(Last, reveal_os_cursor.run_if(on_message::<AppExit>));
    }
}
