mod catalog_index;
mod command_line;
mod fuzzy_matcher;
mod reconciler;

pub use catalog_index::{CatalogIndex, IndexStats, SearchDocument, DEFAULT_RESULT_LIMIT};
pub use command_line::{parse_uninstall_command, QUIET_FLAG};
pub use fuzzy_matcher::FuzzyMatcher;
pub use reconciler::Reconciler;
