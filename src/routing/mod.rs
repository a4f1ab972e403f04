//! Client-side routing: route table, history, fragment loading.

mod fragment;
mod history;
mod route_table;
mod router;
mod source;

pub use fragment::{extract_region, FALLBACK_ERROR_FRAGMENT};
pub use history::{History, HistoryEntry};
pub use route_table::{PageDescriptor, RouteKey, RouteTable};
pub use router::{LoadPhase, NavigationState, Router};
pub use source::{FragmentSource, FsFragmentSource};
