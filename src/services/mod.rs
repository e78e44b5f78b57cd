//! Business logic layer for balance-digest
//!
//! - `hierarchy`: category/subcategory structure from provider collections
//! - `snapshot`: current-period balance snapshot
//! - `digest`: the run pipeline tying provider, report, dispatch and storage

pub mod digest;
pub mod hierarchy;
pub mod snapshot;

pub use digest::{DigestService, PreparedDigest, RunOutcome, RunState};
pub use hierarchy::{CategoryNode, Hierarchy, SubcategoryEntry};
pub use snapshot::build_current_snapshot;
