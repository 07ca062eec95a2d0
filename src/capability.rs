use bevy::prelude::*;

/// Whether the device can hover (a mouse or trackpad rather than touch only)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverCapability {
    detected: bool,
    forced: Option<bool>,
}

impl HoverCapability {
    pub fn new(detected: bool, forced: Option<bool>) -> Self {
        HoverCapability { detected, forced }
    }

    pub fn supports_hover(&self) -> bool {
        self.forced.unwrap_or(self.detected)
    }

    pub fn detected(&self) -> bool {
        self.detected
    }

    pub fn forced(&self) -> Option<bool> {
        self.forced
    }

    // Only the browser probe detects anything on its own
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn set_detected(&mut self, detected: bool) {
        self.detected = detected;
    }

    /// Pin the capability regardless of detection; `None` restores detection
    pub fn force(&mut self, forced: Option<bool>) {
        self.forced = forced;
    }
}

impl Default for HoverCapability {
    fn default() -> Self {
        // Desktop builds always have a hovering pointer
        HoverCapability::new(true, None)
    }
}

/// Emitted whenever the effective hover capability flips.
///
/// Outward notification for the host page; the engine lifecycle polls
/// [`HoverCapability`] directly so it also sees changes made the same frame.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverCapabilityChanged {
    pub supported: bool,
}

pub struct CapabilityPlugin {
    pub forced: Option<bool>,
}

impl Plugin for CapabilityPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(HoverCapability::new(true, self.forced))
            .add_message::<HoverCapabilityChanged>()
            .add_systems(PreUpdate, publish_capability_changes);

        #[cfg(target_arch = "wasm32")]
        {
            app.insert_non_send_resource(web::MediaQueryProbe::new())
                .add_systems(
                    PreUpdate,
                    web::probe_media_query.before(publish_capability_changes),
                );
        }
    }
}

/// System: Announce capability transitions (the first evaluation included)
pub fn publish_capability_changes(
    capability: Res<HoverCapability>,
    mut last: Local<Option<bool>>,
    mut changed: MessageWriter<HoverCapabilityChanged>,
) {
    let supported = capability.supports_hover();
    if *last == Some(supported) {
        return;
    }

    match *last {
        Some(_) => info!("Hover capability changed: supported={}", supported),
        None => info!("Hover capability detected: supported={}", supported),
    }
    *last = Some(supported);
    changed.write(HoverCapabilityChanged { supported });
}

#[cfg(target_arch = "wasm32")]
mod web {
    use bevy::prelude::*;

    use super::HoverCapability;

    /// Same query the page stylesheet would use to detect touch-only devices
    const NO_HOVER_QUERY: &str = "(hover: none)";

    pub struct MediaQueryProbe {
        query: Option<web_sys::MediaQueryList>,
    }

    impl MediaQueryProbe {
        pub fn new() -> Self {
            let query = web_sys::window()
                .and_then(|window| window.match_media(NO_HOVER_QUERY).ok().flatten());
            if query.is_none() {
                warn!("matchMedia unavailable, assuming a hovering pointer");
            }
            MediaQueryProbe { query }
        }
    }

    /// System: Re-evaluate the media query; only writes on change
    pub fn probe_media_query(
        probe: NonSend<MediaQueryProbe>,
        mut capability: ResMut<HoverCapability>,
    ) {
        let Some(query) = probe.query.as_ref() else {
            return;
        };

        let detected = !query.matches();
        if capability.detected() != detected {
            capability.set_detected(detected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app(forced: Option<bool>) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CapabilityPlugin { forced });
        app
    }

    fn drain(app: &mut App) -> Vec<bool> {
        app.world_mut()
            .resource_mut::<Messages<HoverCapabilityChanged>>()
            .drain()
            .map(|msg| msg.supported)
            .collect()
    }

    #[test]
    fn test_force_overrides_detection() {
        let mut capability = HoverCapability::new(true, None);
        assert!(capability.supports_hover());

        capability.force(Some(false));
        assert!(!capability.supports_hover());

        capability.force(None);
        capability.set_detected(false);
        assert!(!capability.supports_hover());
    }

    #[test]
    fn test_change_messages() {
        let mut app = make_app(None);
        app.update();
        assert_eq!(drain(&mut app), vec![true]);

        app.update();
        assert!(drain(&mut app).is_empty(), "no change, no message");

        app.world_mut()
            .resource_mut::<HoverCapability>()
            .set_detected(false);
        app.update();
        assert_eq!(drain(&mut app), vec![false]);
    }

    #[test]
    fn test_forced_from_config() {
        let mut app = make_app(Some(false));
        app.update();

        assert!(!app.world().resource::<HoverCapability>().supports_hover());
        assert_eq!(drain(&mut app), vec![false]);
    }
}
