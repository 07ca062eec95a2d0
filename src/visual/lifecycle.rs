use bevy::prelude::*;
use bevy::window::{CursorOptions, PrimaryWindow};

use crate::{
    capability::HoverCapability,
    session::GlowSession,
    visual::hover::{CrossingTracker, CursorKindChanged},
};

/// Whether the engine is ticking
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineState {
    /// Nothing rendered, no pointer systems run
    #[default]
    Inert,
    Running,
}

/// The page hosting the effect; the engine only runs while it is mounted
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct HostView {
    mounted: bool,
}

impl HostView {
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// Process-wide "hide the OS pointer" override, present only while held
#[derive(Resource, Debug, Clone, Copy)]
pub struct OsCursorOverride {
    window: Entity,
    previously_visible: bool,
}

/// System: Run the engine iff the host is mounted and hover is supported
pub fn sync_engine_state(
    host: Res<HostView>,
    capability: Res<HoverCapability>,
    state: Res<State<EngineState>>,
    mut next_state: ResMut<NextState<EngineState>>,
) {
    let desired = if host.is_mounted() && capability.supports_hover() {
        EngineState::Running
    } else {
        EngineState::Inert
    };

    if *state.get() != desired {
        info!(
            "Cursor engine {:?} -> {:?} (mounted={}, hover={})",
            state.get(),
            desired,
            host.is_mounted(),
            capability.supports_hover()
        );
        next_state.set(desired);
    }
}

/// System: Begin ticking from where the OS pointer is now.
///
/// Moves are not tracked while inert, so the window's cursor position is the
/// freshest sample; without one the last tracked position is kept.
pub fn start_engine(
    mut session: ResMut<GlowSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if let Some(position) = windows.single().ok().and_then(Window::cursor_position) {
        session.pointer_moved(position);
    }
    session.start();
}

/// System: Stop ticking and forget transient hover state
pub fn stop_engine(
    mut session: ResMut<GlowSession>,
    mut tracker: ResMut<CrossingTracker>,
    mut kinds: MessageWriter<CursorKindChanged>,
) {
    if let Some(change) = session.stop() {
        kinds.write(CursorKindChanged::from(change));
    }
    tracker.reset();
}

/// System: Hide the OS pointer, remembering how it was
pub fn conceal_os_cursor(
    mut commands: Commands,
    mut windows: Query<(Entity, &mut CursorOptions), With<PrimaryWindow>>,
) {
    let Ok((window, mut options)) = windows.single_mut() else {
        debug!("No primary window, OS cursor left alone");
        return;
    };

    commands.insert_resource(OsCursorOverride {
        window,
        previously_visible: options.visible,
    });
    options.visible = false;
}

/// System: Give the OS pointer back. Safe to run when nothing is held.
pub fn reveal_os_cursor(
    mut commands: Commands,
    held: Option<Res<OsCursorOverride>>,
    mut cursor_options: Query<&mut CursorOptions>,
) {
    let Some(held) = held else {
        return;
    };

    // The window may already be gone on shutdown
    if let Ok(mut options) = cursor_options.get_mut(held.window) {
        options.visible = held.previously_visible;
    }
    commands.remove_resource::<OsCursorOverride>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    use crate::capability::CapabilityPlugin;
    use crate::config::presets;

    fn make_lifecycle_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.add_plugins(CapabilityPlugin { forced: None });
        app.insert_resource(GlowSession::new(presets::SILKY));
        app.init_resource::<HostView>();
        app.init_resource::<CrossingTracker>();
        app.add_message::<CursorKindChanged>();
        app.init_state::<EngineState>();
        app.add_systems(PreUpdate, sync_engine_state);
        app.add_systems(OnEnter(EngineState::Running), (start_engine, conceal_os_cursor));
        app.add_systems(OnExit(EngineState::Running), (stop_engine, reveal_os_cursor));
        app
    }

    fn state(app: &App) -> EngineState {
        *app.world().resource::<State<EngineState>>().get()
    }

    #[test]
    fn test_starts_only_when_mounted() {
        let mut app = make_lifecycle_app();
        app.update();
        assert_eq!(state(&app), EngineState::Inert);

        app.world_mut().resource_mut::<HostView>().mount();
        app.update();
        assert_eq!(state(&app), EngineState::Running);
        assert!(app.world().resource::<GlowSession>().is_running());
    }

    #[test]
    fn test_unmount_stops() {
        let mut app = make_lifecycle_app();
        app.world_mut().resource_mut::<HostView>().mount();
        app.update();

        app.world_mut().resource_mut::<HostView>().unmount();
        app.update();
        assert_eq!(state(&app), EngineState::Inert);
        assert!(!app.world().resource::<GlowSession>().is_running());
    }

    #[test]
    fn test_capability_revocation_and_return() {
        let mut app = make_lifecycle_app();
        app.world_mut().resource_mut::<HostView>().mount();
        app.update();

        app.world_mut()
            .resource_mut::<HoverCapability>()
            .set_detected(false);
        app.update();
        assert_eq!(state(&app), EngineState::Inert);

        app.world_mut()
            .resource_mut::<HoverCapability>()
            .set_detected(true);
        app.update();
        assert_eq!(state(&app), EngineState::Running);
    }

    #[test]
    fn test_restart_seeds_pointer_from_window() {
        let mut app = make_lifecycle_app();
        let window = app
            .world_mut()
            .spawn((PrimaryWindow, Window::default(), CursorOptions::default()))
            .id();
        app.world_mut()
            .resource_mut::<GlowSession>()
            .pointer_moved(Vec2::new(10.0, 10.0));

        // The pointer moved while nothing was tracking it
        app.world_mut()
            .get_mut::<Window>(window)
            .unwrap()
            .set_cursor_position(Some(Vec2::new(120.0, 80.0)));
        app.world_mut().resource_mut::<HostView>().mount();
        app.update();

        let session = app.world().resource::<GlowSession>();
        assert_eq!(session.pointer(), Vec2::new(120.0, 80.0));
        assert_eq!(session.output().ring, Vec2::new(120.0, 80.0));
        assert_eq!(session.output().dot, Vec2::new(120.0, 80.0));
    }

    #[test]
    fn test_reveal_without_override_is_noop() {
        let mut app = make_lifecycle_app();
        app.world_mut().resource_mut::<HostView>().mount();
        app.update();
        // Headless: no primary window, so nothing was held
        assert!(app.world().get_resource::<OsCursorOverride>().is_none());

        app.world_mut().resource_mut::<HostView>().unmount();
        app.update();
        assert!(app.world().get_resource::<OsCursorOverride>().is_none());
    }

    #[test]
    fn test_override_round_trip() {
        let mut app = make_lifecycle_app();
        let window = app
            .world_mut()
            .spawn((PrimaryWindow, CursorOptions::default()))
            .id();

        app.world_mut().resource_mut::<HostView>().mount();
        app.update();
        assert!(!app.world().get::<CursorOptions>(window).unwrap().visible);
        assert!(app.world().get_resource::<OsCursorOverride>().is_some());

        app.world_mut().resource_mut::<HostView>().unmount();
        app.update();
        assert!(app.world().get::<CursorOptions>(window).unwrap().visible);
        assert!(app.world().get_resource::<OsCursorOverride>().is_none());
    }
}
