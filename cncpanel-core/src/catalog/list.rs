//! Catalog list and scroll window
//!
//! Invariants after every mutation, for a non-empty catalog:
//!
//! - `selected < len`
//! - `window_start <= selected`
//! - `selected < window_start + WINDOW_ROWS`
//!
//! An empty catalog always has `selected == window_start == 0`.

use heapless::Vec;

use cncpanel_hal::DirEntry;

use super::entry::{CatalogEntry, EntryName};

/// Maximum number of entries kept; the rest of a directory is dropped
pub const MAX_CATALOG_ENTRIES: usize = 256;

/// Rows in the visible window
pub const WINDOW_ROWS: usize = 8;

/// Outcome of a [`Catalog::reload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Entries kept after filtering and truncation
    pub count: usize,
    /// A pending selection name was set but is no longer in the listing
    pub pending_missed: bool,
}

/// A row of the visible window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow<'a> {
    /// Index into the catalog
    pub index: usize,
    /// Entry shown on the row
    pub entry: &'a CatalogEntry,
    /// Row carries the selection
    pub is_selected: bool,
}

/// Job file catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry, MAX_CATALOG_ENTRIES>,
    selected: usize,
    window_start: usize,
    /// Name to re-select after the next reload
    pending: Option<EntryName>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a directory listing
    ///
    /// Directories, hidden entries and `exclude` (the tuning file) are
    /// skipped. Entries beyond [`MAX_CATALOG_ENTRIES`] are dropped.
    /// If the listing fails part way the catalog is left empty and the
    /// error is returned.
    ///
    /// A pending selection name is applied afterwards and consumed.
    pub fn reload<I, E>(&mut self, entries: I, exclude: &str) -> Result<ReloadSummary, E>
    where
        I: IntoIterator<Item = Result<DirEntry, E>>,
    {
        self.clear();

        for item in entries {
            let dir_entry = match item {
                Ok(entry) => entry,
                Err(e) => {
                    self.clear();
                    return Err(e);
                }
            };

            if dir_entry.is_dir || dir_entry.is_hidden() || dir_entry.name.as_str() == exclude {
                continue;
            }

            let Some(entry) = CatalogEntry::new(&dir_entry.name) else {
                warn!("Skipping unusable file name ({} bytes)", dir_entry.name.len());
                continue;
            };

            if self.entries.push(entry).is_err() {
                debug!("Catalog full at {} entries, rest dropped", MAX_CATALOG_ENTRIES);
                break;
            }
        }

        let pending_missed = match self.pending.take() {
            Some(name) => !self.select_by_name(&name),
            None => false,
        };

        Ok(ReloadSummary {
            count: self.entries.len(),
            pending_missed,
        })
    }

    /// Drop all entries and reset the selection
    ///
    /// The pending selection name survives.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.window_start = 0;
    }

    /// Remember a name to re-select after the next reload
    pub fn remember_selection(&mut self, name: EntryName) {
        self.pending = Some(name);
    }

    /// Pending selection name, if any
    pub fn pending_selection(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Select an entry by name
    ///
    /// The window is placed at the top if the entry is on the first page,
    /// at the bottom if it is on the last page, and starts at the entry
    /// otherwise. The pending selection name is cleared whether or not
    /// the name was found; on a miss nothing else changes.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        self.pending = None;

        let Some(index) = self.entries.iter().position(|e| e.name() == name) else {
            return false;
        };

        let len = self.entries.len();
        self.selected = index;
        self.window_start = if index < WINDOW_ROWS {
            0
        } else if len - index < WINDOW_ROWS {
            len - WINDOW_ROWS
        } else {
            index
        };
        true
    }

    /// Move the selection by `delta` rows
    ///
    /// Moving past the last entry lands on the first, moving before the
    /// first lands on the last. The window only moves as far as needed
    /// to keep the selection visible.
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }

        // Overflow is past the end for a forward move, before the start otherwise
        let target = (self.selected as isize)
            .checked_add(delta)
            .unwrap_or(if delta > 0 { isize::MAX } else { isize::MIN });
        self.selected = if target >= len as isize {
            0
        } else if target < 0 {
            len - 1
        } else {
            target as usize
        };

        if self.selected < self.window_start {
            self.window_start = self.selected;
        } else if self.selected >= self.window_start + WINDOW_ROWS {
            self.window_start = self.selected + 1 - WINDOW_ROWS;
        }
    }

    /// Rows currently inside the window
    pub fn visible_rows(&self) -> impl Iterator<Item = VisibleRow<'_>> {
        let end = (self.window_start + WINDOW_ROWS).min(self.entries.len());
        let selected = self.selected;
        self.entries[self.window_start.min(end)..end]
            .iter()
            .enumerate()
            .map(move |(offset, entry)| {
                let index = self.window_start + offset;
                VisibleRow {
                    index,
                    entry,
                    is_selected: index == selected,
                }
            })
    }

    /// Currently selected entry
    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.entries.get(self.selected)
    }

    /// Index of the selected entry
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Index of the first visible row
    pub fn window_start(&self) -> usize {
        self.window_start
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry by index
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// All entries in directory order
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn listing(names: &[&str]) -> std::vec::Vec<Result<DirEntry, ()>> {
        names.iter().map(|n| Ok(DirEntry::file(n))).collect()
    }

    fn numbered(count: usize) -> Catalog {
        let names: std::vec::Vec<std::string::String> =
            (0..count).map(|i| format!("job{:03}.nc", i)).collect();
        let mut catalog = Catalog::new();
        catalog
            .reload(
                names.iter().map(|n| Ok::<_, ()>(DirEntry::file(n))),
                "sm.conf",
            )
            .unwrap();
        catalog
    }

    fn assert_invariants(catalog: &Catalog) {
        if catalog.is_empty() {
            assert_eq!(catalog.selected(), 0);
            assert_eq!(catalog.window_start(), 0);
            return;
        }
        assert!(catalog.selected() < catalog.len());
        assert!(catalog.window_start() <= catalog.selected());
        assert!(catalog.selected() < catalog.window_start() + WINDOW_ROWS);
    }

    #[test]
    fn test_reload_filters_entries() {
        let mut catalog = Catalog::new();
        let entries = vec![
            Ok(DirEntry::dir(".")),
            Ok(DirEntry::dir("..")),
            Ok(DirEntry::file("a.nc")),
            Ok(DirEntry::dir("archive")),
            Ok(DirEntry::file("sm.conf")),
            Ok(DirEntry::file(".hidden.nc")),
            Ok::<_, ()>(DirEntry::file("b.nc")),
        ];
        let summary = catalog.reload(entries, "sm.conf").unwrap();
        assert_eq!(summary.count, 2);
        assert!(!summary.pending_missed);
        let names: std::vec::Vec<&str> = catalog.entries().map(|e| e.name()).collect();
        assert_eq!(names, ["a.nc", "b.nc"]);
    }

    #[test]
    fn test_reload_error_empties_catalog() {
        let mut catalog = numbered(5);
        catalog.move_selection(3);
        let entries = vec![Ok(DirEntry::file("a.nc")), Err(7u8)];
        assert_eq!(catalog.reload(entries, "sm.conf"), Err(7));
        assert!(catalog.is_empty());
        assert_invariants(&catalog);
    }

    #[test]
    fn test_reload_truncates_at_capacity() {
        let catalog = numbered(MAX_CATALOG_ENTRIES + 10);
        assert_eq!(catalog.len(), MAX_CATALOG_ENTRIES);
        assert_eq!(
            catalog.get(MAX_CATALOG_ENTRIES - 1).unwrap().name(),
            "job255.nc"
        );
    }

    #[test]
    fn test_reload_skips_long_names() {
        let long = "x".repeat(100);
        let mut catalog = Catalog::new();
        catalog
            .reload(listing(&["a.nc", long.as_str(), "b.nc"]), "sm.conf")
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_reload_resets_selection_without_pending() {
        let mut catalog = numbered(20);
        catalog.move_selection(10);
        catalog
            .reload(listing(&["a.nc", "b.nc", "c.nc"]), "sm.conf")
            .unwrap();
        assert_eq!(catalog.selected(), 0);
        assert_eq!(catalog.window_start(), 0);
    }

    #[test]
    fn test_reload_applies_pending_selection() {
        let names: std::vec::Vec<std::string::String> =
            (0..30).map(|i| format!("job{:03}.nc", i)).collect();
        let mut catalog = Catalog::new();
        catalog.remember_selection(crate::catalog::entry::entry_name("job015.nc").unwrap());
        catalog
            .reload(
                names.iter().map(|n| Ok::<_, ()>(DirEntry::file(n))),
                "sm.conf",
            )
            .unwrap();
        assert_eq!(catalog.selected(), 15);
        assert_eq!(catalog.window_start(), 15);
        assert!(catalog.pending_selection().is_none());
    }

    #[test]
    fn test_reload_reports_pending_miss() {
        let mut catalog = Catalog::new();
        catalog.remember_selection(crate::catalog::entry::entry_name("gone.nc").unwrap());
        let summary = catalog
            .reload(listing(&["a.nc", "b.nc"]), "sm.conf")
            .unwrap();
        assert!(summary.pending_missed);
        assert_eq!(catalog.selected(), 0);
        assert!(catalog.pending_selection().is_none());
    }

    #[test]
    fn test_reload_finds_pending_first_entry() {
        let mut catalog = Catalog::new();
        catalog.remember_selection(crate::catalog::entry::entry_name("a.nc").unwrap());
        let summary = catalog
            .reload(listing(&["a.nc", "b.nc"]), "sm.conf")
            .unwrap();
        assert!(!summary.pending_missed);
        assert_eq!(catalog.selected(), 0);
    }

    #[test]
    fn test_select_by_name_window_placement() {
        let mut catalog = numbered(20);

        // First page: window at the top
        assert!(catalog.select_by_name("job005.nc"));
        assert_eq!((catalog.selected(), catalog.window_start()), (5, 0));

        // Last page: window at the bottom
        assert!(catalog.select_by_name("job015.nc"));
        assert_eq!((catalog.selected(), catalog.window_start()), (15, 12));

        // Middle: window starts at the entry
        assert!(catalog.select_by_name("job010.nc"));
        assert_eq!((catalog.selected(), catalog.window_start()), (10, 10));
        assert_invariants(&catalog);
    }

    #[test]
    fn test_select_by_name_miss_only_clears_pending() {
        let mut catalog = numbered(20);
        catalog.move_selection(9);
        catalog.remember_selection(crate::catalog::entry::entry_name("job009.nc").unwrap());
        let before = (catalog.selected(), catalog.window_start(), catalog.len());

        assert!(!catalog.select_by_name("missing.nc"));
        assert_eq!(
            (catalog.selected(), catalog.window_start(), catalog.len()),
            before
        );
        assert!(catalog.pending_selection().is_none());
    }

    #[test]
    fn test_jump_to_end_and_wrap() {
        let mut catalog = numbered(20);
        catalog.move_selection(19);
        assert_eq!(catalog.selected(), 19);
        assert_eq!(catalog.window_start(), 12);

        catalog.move_selection(1);
        assert_eq!(catalog.selected(), 0);
        assert_eq!(catalog.window_start(), 0);
    }

    #[test]
    fn test_move_up_from_top_wraps_to_last() {
        let mut catalog = numbered(20);
        catalog.move_selection(-1);
        assert_eq!(catalog.selected(), 19);
        assert_eq!(catalog.window_start(), 12);
    }

    #[test]
    fn test_window_is_sticky() {
        let mut catalog = numbered(20);
        catalog.move_selection(19);
        // Moving up inside the window does not scroll it
        catalog.move_selection(-3);
        assert_eq!(catalog.selected(), 16);
        assert_eq!(catalog.window_start(), 12);
        // Leaving the top of the window scrolls by the minimum amount
        catalog.move_selection(-5);
        assert_eq!(catalog.selected(), 11);
        assert_eq!(catalog.window_start(), 11);
    }

    #[test]
    fn test_page_jumps() {
        let mut catalog = numbered(20);
        catalog.move_selection(WINDOW_ROWS as isize);
        assert_eq!((catalog.selected(), catalog.window_start()), (8, 1));
        catalog.move_selection(WINDOW_ROWS as isize);
        assert_eq!((catalog.selected(), catalog.window_start()), (16, 9));
        // Past the end snaps to the first entry
        catalog.move_selection(WINDOW_ROWS as isize);
        assert_eq!((catalog.selected(), catalog.window_start()), (0, 0));
        // Before the start snaps to the last entry
        catalog.move_selection(-(WINDOW_ROWS as isize));
        assert_eq!((catalog.selected(), catalog.window_start()), (19, 12));
    }

    #[test]
    fn test_extreme_deltas() {
        let mut catalog = numbered(20);
        catalog.move_selection(5);
        catalog.move_selection(isize::MAX);
        assert_eq!((catalog.selected(), catalog.window_start()), (0, 0));

        catalog.move_selection(5);
        catalog.move_selection(isize::MIN);
        assert_eq!((catalog.selected(), catalog.window_start()), (19, 12));

        catalog.move_selection(isize::MIN);
        assert_eq!(catalog.selected(), 19);
        catalog.move_selection(isize::MAX);
        assert_eq!((catalog.selected(), catalog.window_start()), (0, 0));
        assert_invariants(&catalog);
    }

    #[test]
    fn test_move_on_empty_catalog_is_noop() {
        let mut catalog = Catalog::new();
        catalog.move_selection(5);
        catalog.move_selection(-5);
        assert_invariants(&catalog);
        assert!(catalog.selected_entry().is_none());
        assert_eq!(catalog.visible_rows().count(), 0);
    }

    #[test]
    fn test_visible_rows() {
        let mut catalog = numbered(20);
        catalog.move_selection(10);
        let rows: std::vec::Vec<VisibleRow<'_>> = catalog.visible_rows().collect();
        assert_eq!(rows.len(), WINDOW_ROWS);
        assert_eq!(rows[0].index, 3);
        assert!(rows[WINDOW_ROWS - 1].is_selected);
        assert_eq!(rows.iter().filter(|r| r.is_selected).count(), 1);
    }

    #[test]
    fn test_visible_rows_clipped_to_len() {
        let catalog = numbered(3);
        let rows: std::vec::Vec<VisibleRow<'_>> = catalog.visible_rows().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_selected);
        assert_eq!(rows[2].entry.name(), "job002.nc");
    }

    proptest! {
        #[test]
        fn prop_window_invariants_hold(
            len in 0usize..=MAX_CATALOG_ENTRIES,
            deltas in proptest::collection::vec(
                prop_oneof![-600isize..600, any::<isize>()],
                0..64,
            ),
        ) {
            let mut catalog = numbered(len);
            for delta in deltas {
                catalog.move_selection(delta);
                assert_invariants(&catalog);
            }
        }

        #[test]
        fn prop_single_steps_visit_every_entry(len in 1usize..64) {
            let mut catalog = numbered(len);
            for expected in 1..=len {
                catalog.move_selection(1);
                prop_assert_eq!(catalog.selected(), expected % len);
                assert_invariants(&catalog);
            }
        }

        #[test]
        fn prop_select_by_name_keeps_invariants(len in 1usize..=80, pick in 0usize..80) {
            let mut catalog = numbered(len);
            let index = pick % len;
            let name = format!("job{:03}.nc", index);
            prop_assert!(catalog.select_by_name(&name));
            prop_assert_eq!(catalog.selected(), index);
            assert_invariants(&catalog);
        }
    }
}
