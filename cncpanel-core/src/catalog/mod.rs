//! Job file catalog
//!
//! The list of job files found on the storage medium together with the
//! selection and the visible window over it.

pub mod entry;
pub mod list;

pub use entry::{CatalogEntry, EntryName, MAX_NAME_LEN};
pub use list::{Catalog, ReloadSummary, VisibleRow, MAX_CATALOG_ENTRIES, WINDOW_ROWS};
