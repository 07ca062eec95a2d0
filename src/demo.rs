//! Demo page hosting the cursor: controls, text fields and cards.
//!
//! `M` mounts/unmounts the page, `H` pins the device to "no hover".

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    capability::{HoverCapability, HoverCapabilityChanged},
    engine::ElementRole,
    session::GlowSession,
    visual::{
        hover::{CursorKindChanged, CursorTarget},
        lifecycle::HostView,
    },
};

/// Seed for card placement jitter
const LAYOUT_SEED: u64 = 0x5eed_c0de;
/// Max vertical nudge for a card, in px
const CARD_JITTER: f32 = 14.0;

const PAGE_BACKGROUND: Color = Color::srgb(0.96, 0.97, 0.98);
const SURFACE: Color = Color::WHITE;
const INK: Color = Color::srgb(0.13, 0.15, 0.18);
const MUTED: Color = Color::srgb(0.45, 0.48, 0.52);
const ACCENT: Color = Color::srgb(0.098, 0.463, 0.824);
const OUTLINE: Color = Color::srgb(0.82, 0.85, 0.88);

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_page, mount_host))
            .add_systems(
                Update,
                (
                    handle_demo_keys,
                    update_status,
                    log_kind_changes,
                    log_capability_changes,
                ),
            );
    }
}

#[derive(Component)]
struct StatusLine;

/// Deterministic vertical offsets for `count` cards
pub fn card_jitter(seed: u64, count: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| rng.random_range(-CARD_JITTER..=CARD_JITTER))
        .collect()
}

fn mount_host(mut host: ResMut<HostView>) {
    host.mount();
}

fn label(text: &'static str, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn button(role: ElementRole, text: &'static str) -> impl Bundle {
    let (fill, ink) = match role {
        ElementRole::Link => (Color::NONE, ACCENT),
        _ => (ACCENT, Color::WHITE),
    };
    (
        Name::new(format!("{role:?}: {text}")),
        CursorTarget::new(role),
        Node {
            padding: UiRect::axes(Val::Px(18.0), Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(fill),
        BorderRadius::all(Val::Px(8.0)),
        children![label(text, 16.0, ink)],
    )
}

fn text_field(role: ElementRole, placeholder: &'static str, height: f32) -> impl Bundle {
    (
        Name::new(format!("{role:?}: {placeholder}")),
        CursorTarget::new(role),
        Node {
            width: Val::Px(320.0),
            height: Val::Px(height),
            padding: UiRect::all(Val::Px(10.0)),
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BackgroundColor(SURFACE),
        BorderColor::all(OUTLINE),
        BorderRadius::all(Val::Px(6.0)),
        children![label(placeholder, 15.0, MUTED)],
    )
}

fn card_node(offset: f32) -> Node {
    Node {
        width: Val::Px(260.0),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(10.0),
        padding: UiRect::all(Val::Px(18.0)),
        margin: UiRect::top(Val::Px(offset)),
        ..default()
    }
}

fn row() -> Node {
    Node {
        flex_direction: FlexDirection::Row,
        align_items: AlignItems::FlexStart,
        column_gap: Val::Px(16.0),
        ..default()
    }
}

fn spawn_page(mut commands: Commands) {
    info!("Spawning demo page");
    let jitter = card_jitter(LAYOUT_SEED, 3);

    commands
        .spawn((
            Name::new("Demo Page"),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(28.0),
                padding: UiRect::all(Val::Px(48.0)),
                ..default()
            },
            BackgroundColor(PAGE_BACKGROUND),
        ))
        .with_children(|page| {
            page.spawn(label("Cursor Glow", 34.0, INK));
            page.spawn((StatusLine, label("", 14.0, MUTED)));

            page.spawn(row()).with_children(|controls| {
                controls.spawn(button(ElementRole::Button, "Primary"));
                controls.spawn(button(ElementRole::Button, "Secondary"));
                controls.spawn(button(ElementRole::Checkbox, "Remember me"));
                controls.spawn(button(ElementRole::Select, "Choose..."));
                controls.spawn(button(ElementRole::Link, "Read the docs"));
                controls.spawn(button(ElementRole::Link, "Pricing"));
            });

            page.spawn(row()).with_children(|fields| {
                fields.spawn(text_field(ElementRole::TextInput, "Your name", 42.0));
                fields.spawn(text_field(ElementRole::TextArea, "Tell us more...", 96.0));
            });

            page.spawn(row()).with_children(|cards| {
                cards.spawn((
                    Name::new("Plain card"),
                    CursorTarget::new(ElementRole::Container),
                    card_node(jitter[0]),
                    BackgroundColor(SURFACE),
                    BorderRadius::all(Val::Px(12.0)),
                    children![
                        label("Plain card", 20.0, INK),
                        label("Nothing to click here.", 14.0, MUTED),
                    ],
                ));

                cards.spawn((
                    Name::new("Prose card"),
                    CursorTarget::new(ElementRole::Text),
                    card_node(jitter[1]),
                    BackgroundColor(SURFACE),
                    BorderRadius::all(Val::Px(12.0)),
                    children![
                        label("Prose", 20.0, INK),
                        label("Just text; the ring stays round.", 14.0, MUTED),
                    ],
                ));

                // Clickable card with its own button: leaving into the button keeps hover
                cards.spawn((
                    Name::new("Link card"),
                    CursorTarget::new(ElementRole::Link),
                    card_node(jitter[2]),
                    BackgroundColor(SURFACE),
                    BorderRadius::all(Val::Px(12.0)),
                    children![
                        label("Clickable card", 20.0, INK),
                        label("The whole card is a link.", 14.0, MUTED),
                        button(ElementRole::Button, "Like"),
                    ],
                ));
            });
        });
}

/// System: Demo toggles for mount and hover capability
fn handle_demo_keys(
    keys: Res<ButtonInput<KeyCode>>,
    mut host: ResMut<HostView>,
    mut capability: ResMut<HoverCapability>,
) {
    if keys.just_pressed(KeyCode::KeyM) {
        if host.is_mounted() {
            host.unmount();
        } else {
            host.mount();
        }
        info!("Host view mounted={}", host.is_mounted());
    }

    if keys.just_pressed(KeyCode::KeyH) {
        let forced = match capability.forced() {
            Some(false) => None,
            _ => Some(false),
        };
        capability.force(forced);
        info!("Hover capability forced={:?}", forced);
    }
}

fn update_status(
    session: Res<GlowSession>,
    capability: Res<HoverCapability>,
    mut status: Query<&mut Text, With<StatusLine>>,
) {
    let Ok(mut text) = status.single_mut() else {
        return;
    };

    let target = match session.hover_target() {
        Some(target) => format!("{}", target.handle),
        None => "-".to_string(),
    };
    let line = format!(
        "running: {}   cursor: {:?} on {}   pressed: {}   \
         hover: {} (detected {}, forced {:?})   [M] mount   [H] no-hover",
        session.is_running(),
        session.kind(),
        target,
        session.pressed(),
        capability.supports_hover(),
        capability.detected(),
        capability.forced(),
    );
    if text.0 != line {
        text.0 = line;
    }
}

fn log_kind_changes(mut kinds: MessageReader<CursorKindChanged>) {
    for change in kinds.read() {
        debug!("Cursor morph {:?} -> {:?}", change.from, change.to);
    }
}

fn log_capability_changes(mut changes: MessageReader<HoverCapabilityChanged>) {
    for change in changes.read() {
        if !change.supported {
            info!("Touch-only pointer: cursor effect parked until hover returns");
        }
    }
}
