use bevy::prelude::*;

mod camera;
mod capability;
mod config;
mod demo;
mod engine;
mod input;
mod session;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use demo::DemoPlugin;

use crate::visual::plugin::CursorGlowPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Cursor Glow".into(),
            resolution: WindowResolution::new(1280, 800),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(CameraPlugin)
    .add_plugins(CursorGlowPlugin::default())
    .add_plugins(DemoPlugin);

    app.run();
}
