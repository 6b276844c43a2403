pub mod split;
pub mod stats;
pub mod text;
pub mod types;
pub mod unified;

pub use split::compute_split_alignment;
pub use stats::DiffStats;
pub use text::split_lines;
pub use types::{ChangeKind, DiffLine, Side, SplitAlignedRow};
pub use unified::compute_unified_diff;
