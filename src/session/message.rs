//! Messages delivered to a running session.

use crate::state::{FilterEvent, Slot};
use crate::types::{CategoryId, ColorId, FilterValue, ManufacturerId};

/// A selection made by the user through one of the three controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserEvent {
    Category(FilterValue<CategoryId>),
    Manufacturer(FilterValue<ManufacturerId>),
    Color(FilterValue<ColorId>),
}

impl UserEvent {
    pub fn slot(&self) -> Slot {
        match self {
            UserEvent::Category(_) => Slot::Category,
            UserEvent::Manufacturer(_) => Slot::Manufacturer,
            UserEvent::Color(_) => Slot::Color,
        }
    }
}

impl From<UserEvent> for FilterEvent {
    fn from(event: UserEvent) -> Self {
        match event {
            UserEvent::Category(v) => FilterEvent::CategoryChanged(v),
            UserEvent::Manufacturer(v) => FilterEvent::ManufacturerChanged(v),
            UserEvent::Color(v) => FilterEvent::ColorChanged(v),
        }
    }
}

/// Messages that can be sent to a session.
///
/// The session processes them one at a time on its own task, interleaved with
/// fetch completions.
#[derive(Debug)]
pub enum SessionMessage {
    /// A control changed.
    User(UserEvent),

    /// Re-render the controls and the last results.
    Show,

    /// Stop the session. In-flight fetches are abandoned.
    Shutdown,
}
