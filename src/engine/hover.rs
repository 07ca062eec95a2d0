use serde::{Deserialize, Serialize};

/// Cursor shape category driven by the hovered element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorKind {
    #[default]
    Default,
    Interactive,
    TextEntry,
}

/// Role of an element that can sit under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRole {
    Button,
    Link,
    Checkbox,
    Radio,
    Select,
    Summary,
    TextInput,
    TextArea,
    SearchBox,
    ContentEditable,
    Text,
    Image,
    Container,
}

impl ElementRole {
    /// Roles that render the interactive (clickable) cursor
    pub const INTERACTIVE: &'static [ElementRole] = &[
        ElementRole::Button,
        ElementRole::Link,
        ElementRole::Checkbox,
        ElementRole::Radio,
        ElementRole::Select,
        ElementRole::Summary,
    ];

    /// Roles that render the text-entry cursor
    pub const TEXT_ENTRY: &'static [ElementRole] = &[
        ElementRole::TextInput,
        ElementRole::TextArea,
        ElementRole::SearchBox,
        ElementRole::ContentEditable,
    ];

    pub fn classify(self) -> CursorKind {
        if Self::INTERACTIVE.contains(&self) {
            CursorKind::Interactive
        } else if Self::TEXT_ENTRY.contains(&self) {
            CursorKind::TextEntry
        } else {
            CursorKind::Default
        }
    }
}

/// Weak relation to the element under the pointer.
///
/// `handle` is a lookup key only; whether it still refers to a live element is
/// checked by the caller before every geometry query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget<H> {
    pub handle: H,
    pub kind: CursorKind,
}

/// Emitted whenever the classified cursor kind changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindChange {
    pub from: CursorKind,
    pub to: CursorKind,
}

/// Default / Interactive / TextEntry machine fed by enter and leave events
#[derive(Debug, Clone)]
pub struct HoverMachine<H> {
    target: Option<HoverTarget<H>>,
    kind: CursorKind,
}

impl<H> Default for HoverMachine<H> {
    fn default() -> Self {
        HoverMachine {
            target: None,
            kind: CursorKind::Default,
        }
    }
}

impl<H: Copy + Eq> HoverMachine<H> {
    pub fn kind(&self) -> CursorKind {
        self.kind
    }

    pub fn target(&self) -> Option<HoverTarget<H>> {
        self.target
    }

    pub fn handle(&self) -> Option<H> {
        self.target.map(|target| target.handle)
    }

    /// Pointer entered `handle`.
    ///
    /// The target only moves together with a kind transition; entering a
    /// nested element of the same kind keeps the outer one tracked.
    pub fn on_enter(&mut self, handle: H, role: ElementRole) -> Option<KindChange> {
        let kind = role.classify();

        if kind == self.kind {
            return None;
        }

        self.target = match kind {
            CursorKind::Default => None,
            _ => Some(HoverTarget { handle, kind }),
        };
        self.transition(kind)
    }

    /// Pointer left an element toward `related`.
    ///
    /// The target is kept when `related` is the tracked element or one of its
    /// descendants (`is_descendant(candidate, ancestor)`).
    pub fn on_leave<F>(&mut self, related: Option<H>, is_descendant: F) -> Option<KindChange>
    where
        F: Fn(H, H) -> bool,
    {
        let tracked = self.target?;

        if let Some(related) = related {
            if related == tracked.handle || is_descendant(related, tracked.handle) {
                return None;
            }
        }

        self.target = None;
        self.transition(CursorKind::Default)
    }

    /// Forget a target whose element no longer exists
    pub fn invalidate(&mut self) -> Option<KindChange> {
        self.target = None;
        self.transition(CursorKind::Default)
    }

    fn transition(&mut self, to: CursorKind) -> Option<KindChange> {
        if self.kind == to {
            return None;
        }
        let from = self.kind;
        self.kind = to;
        Some(KindChange { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tiny tree: 1 = card, 2 = button inside card, 3 = label inside button, 9 = input
    fn parent_of(node: u32) -> Option<u32> {
        match node {
            2 => Some(1),
            3 => Some(2),
            _ => None,
        }
    }

    fn is_descendant(candidate: u32, ancestor: u32) -> bool {
        let mut current = candidate;
        while let Some(parent) = parent_of(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    #[test]
    fn test_classification_sets() {
        assert_eq!(ElementRole::Button.classify(), CursorKind::Interactive);
        assert_eq!(ElementRole::Link.classify(), CursorKind::Interactive);
        assert_eq!(ElementRole::TextArea.classify(), CursorKind::TextEntry);
        assert_eq!(ElementRole::Text.classify(), CursorKind::Default);
        assert_eq!(ElementRole::Container.classify(), CursorKind::Default);

        for role in ElementRole::INTERACTIVE {
            assert!(
                !ElementRole::TEXT_ENTRY.contains(role),
                "{:?} is in both rule sets",
                role
            );
        }
    }

    #[test]
    fn test_initial_state() {
        let machine = HoverMachine::<u32>::default();
        assert_eq!(machine.kind(), CursorKind::Default);
        assert!(machine.target().is_none());
    }

    #[test]
    fn test_enter_then_leave_reverts_to_default() {
        let mut machine = HoverMachine::default();

        let change = machine.on_enter(2, ElementRole::Button);
        assert_eq!(
            change,
            Some(KindChange {
                from: CursorKind::Default,
                to: CursorKind::Interactive
            })
        );
        assert_eq!(machine.handle(), Some(2));

        let change = machine.on_leave(None, is_descendant);
        assert_eq!(
            change,
            Some(KindChange {
                from: CursorKind::Interactive,
                to: CursorKind::Default
            })
        );
        assert!(machine.handle().is_none());
    }

    #[test]
    fn test_leave_into_descendant_keeps_target() {
        let mut machine = HoverMachine::default();
        machine.on_enter(2, ElementRole::Button);

        // Moving onto the label inside the button
        assert_eq!(machine.on_leave(Some(3), is_descendant), None);
        assert_eq!(machine.kind(), CursorKind::Interactive);
        assert_eq!(machine.handle(), Some(2));
    }

    #[test]
    fn test_leave_to_ancestor_clears() {
        let mut machine = HoverMachine::default();
        machine.on_enter(2, ElementRole::Button);

        assert!(machine.on_leave(Some(1), is_descendant).is_some());
        assert_eq!(machine.kind(), CursorKind::Default);
    }

    #[test]
    fn test_switch_between_kinds() {
        let mut machine = HoverMachine::default();
        machine.on_enter(2, ElementRole::Button);
        machine.on_leave(Some(9), is_descendant);

        let change = machine.on_enter(9, ElementRole::TextInput);
        assert_eq!(
            change,
            Some(KindChange {
                from: CursorKind::Default,
                to: CursorKind::TextEntry
            })
        );
        assert_eq!(machine.handle(), Some(9));
    }

    #[test]
    fn test_same_kind_enter_keeps_outer_target() {
        let mut machine = HoverMachine::default();
        machine.on_enter(1, ElementRole::Link);

        assert_eq!(machine.on_enter(2, ElementRole::Button), None);
        assert_eq!(machine.handle(), Some(1));
    }

    #[test]
    fn test_parent_child_round_trip_is_stable() {
        let mut machine = HoverMachine::default();
        machine.on_enter(1, ElementRole::Link);

        // card -> nested button
        assert_eq!(machine.on_leave(Some(2), is_descendant), None);
        assert_eq!(machine.on_enter(2, ElementRole::Button), None);
        // nested button -> back onto the card
        assert_eq!(machine.on_leave(Some(1), is_descendant), None);
        assert_eq!(machine.on_enter(1, ElementRole::Link), None);

        assert_eq!(machine.kind(), CursorKind::Interactive);
        assert_eq!(machine.handle(), Some(1));
    }

    #[test]
    fn test_leave_without_target_is_noop() {
        let mut machine = HoverMachine::<u32>::default();
        assert_eq!(machine.on_leave(Some(4), is_descendant), None);
    }

    #[test]
    fn test_invalidate() {
        let mut machine = HoverMachine::default();
        machine.on_enter(9, ElementRole::SearchBox);

        assert!(machine.invalidate().is_some());
        assert!(machine.target().is_none());
        assert_eq!(machine.invalidate(), None);
    }
}
