use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FootstepSide {
    #[default]
    Left,
    Right,
}

impl FootstepSide {
    pub fn other(self) -> Self {
        match self {
            FootstepSide::Left => FootstepSide::Right,
            FootstepSide::Right => FootstepSide::Left,
        }
    }
}

/// Player pressed the scan trigger. Absorbed silently while a pulse is
/// already running.
#[derive(Event)]
pub struct ScanRequestedEvent;

/// Written once per accepted scan trigger, after the pulse engine has
/// captured the new origin and direction. Downstream readers (icon effect,
/// footprint reclassification) run later in the same frame.
#[derive(Event)]
pub struct ScanStartedEvent;

/// One foot touched the ground. Emitted by the movement stride tracker.
#[derive(Event)]
pub struct FootstepEvent {
    pub side: FootstepSide,
}
