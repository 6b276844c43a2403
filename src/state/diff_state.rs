#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffViewMode {
    Split,
    Unified,
}

impl DiffViewMode {
    pub fn from_unified_flag(unified: bool) -> Self {
        if unified {
            DiffViewMode::Unified
        } else {
            DiffViewMode::Split
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DiffViewMode::Split => DiffViewMode::Unified,
            DiffViewMode::Unified => DiffViewMode::Split,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DiffViewMode::Split => "Split",
            DiffViewMode::Unified => "Unified",
        }
    }
}

/// Who owns the active view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeControl {
    /// The embedding application decides; toggles only notify it.
    Controlled(DiffViewMode),
    /// The viewer keeps its own mode.
    Uncontrolled(DiffViewMode),
}

impl ModeControl {
    pub fn mode(self) -> DiffViewMode {
        match self {
            ModeControl::Controlled(mode) | ModeControl::Uncontrolled(mode) => mode,
        }
    }
}

/// The two text blobs being compared and everything that describes them.
#[derive(Debug, Clone, Default)]
pub struct DiffInputs {
    pub old_text: String,
    pub new_text: String,
    /// Bumped on every text change; identifies the inputs for caching.
    pub revision: u64,
    pub language: Option<String>,
    pub old_title: Option<String>,
    pub new_title: Option<String>,
}

impl DiffInputs {
    pub fn set_texts(&mut self, old_text: String, new_text: String) {
        self.old_text = old_text;
        self.new_text = new_text;
        self.revision += 1;
    }
}
