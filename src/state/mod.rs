pub mod diff_state;
pub mod selection_state;

pub use diff_state::{DiffInputs, DiffViewMode, ModeControl};
pub use selection_state::{
    CommittedSelection, LineSelection, ReleaseSubscription, SelectionState, SelectionTracker,
};
