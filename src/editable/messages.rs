//! Events delivered to an inline widget.

use crate::dom::NodeId;

use super::state::RevertHandle;

/// Keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Other,
}

/// Events and commands for one [`EditableWidget`](super::EditableWidget)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetMsg {
    // === User events ===
    /// Click somewhere inside the widget's element
    Click { target: NodeId },
    /// Double click on the edit control
    DoubleClick,
    /// Edit control lost focus
    Blur,
    /// Edit control value changed
    Change,
    KeyDown { key: Key },
    /// Edit form submitted (submit button or Enter)
    Submit,
    /// Edit form reset (reset input or cancel link)
    Reset,

    // === Lifecycle ===
    Enable,
    Disable,
    Destroy,

    // === Remote write results ===
    /// Restore the value captured by `handle`
    Revert(RevertHandle),
    /// Show the server's value after a successful write
    Confirm { handle: RevertHandle, value: String },
}
