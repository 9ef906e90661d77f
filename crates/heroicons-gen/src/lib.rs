pub mod category;
pub mod feedback;
pub mod filter;
pub mod naming;
pub mod readme;
pub mod registry;
pub mod render;
pub mod sync;
pub mod updater;

pub use category::{COMPONENT_ROOT, IconCategory, NAME_CLASS_SOURCE_LABEL, default_categories};
pub use feedback::Feedback;
pub use filter::{ArchiveEntry, OPTIMIZED_SUBTREE, archive_root, filter_under_prefix};
pub use sync::{ReleaseInfo, ReleaseProvider, SyncError};
pub use updater::{IconSetUpdater, SyncReport};
