use crate::state::{CommittedSelection, DiffViewMode};

/// Every state change in the app goes through one of these.
#[derive(Debug, Clone)]
pub enum Action {
    // Lifecycle
    Quit,
    Tick,

    // Scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,

    // View
    ToggleViewMode,
    CycleTheme,

    // Pointer
    PointerDown { column: u16, row: u16 },
    PointerDrag { column: u16, row: u16 },
    PointerUp,

    // Emitted by the viewer's listeners
    ViewModeChanged(DiffViewMode),
    SelectionCommitted(CommittedSelection),

    // Resize
    Resize,
}
