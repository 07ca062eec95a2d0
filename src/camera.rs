use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// UI-only scene: one 2D camera renders the page and the cursor layers
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}
