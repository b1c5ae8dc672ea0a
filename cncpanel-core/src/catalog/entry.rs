//! Catalog entries

use heapless::String;

/// Longest job file name the panel keeps
pub const MAX_NAME_LEN: usize = 79;

/// Bounded file name
pub type EntryName = String<MAX_NAME_LEN>;

/// A job file listed from storage
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CatalogEntry {
    name: EntryName,
}

impl CatalogEntry {
    /// Create an entry from a directory name
    ///
    /// Returns `None` for empty names, names with path separators and
    /// names longer than [`MAX_NAME_LEN`] bytes. Long names are not
    /// truncated because the shortened name would not open the file.
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return None;
        }
        let mut n = EntryName::new();
        n.push_str(name).ok()?;
        Some(Self { name: n })
    }

    /// File name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// File name as an owned bounded string
    pub fn to_name(&self) -> EntryName {
        self.name.clone()
    }
}

/// Copy a name into an [`EntryName`], `None` if it does not fit
pub fn entry_name(name: &str) -> Option<EntryName> {
    let mut n = EntryName::new();
    n.push_str(name).ok()?;
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let entry = CatalogEntry::new("bracket.nc").unwrap();
        assert_eq!(entry.name(), "bracket.nc");
    }

    #[test]
    fn test_rejects_separators_and_empty() {
        assert!(CatalogEntry::new("").is_none());
        assert!(CatalogEntry::new("jobs/part.nc").is_none());
        assert!(CatalogEntry::new("jobs\\part.nc").is_none());
    }

    #[test]
    fn test_length_limit() {
        let ok = "a".repeat(MAX_NAME_LEN);
        let too_long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(CatalogEntry::new(&ok).is_some());
        assert!(CatalogEntry::new(&too_long).is_none());
        assert!(entry_name(&too_long).is_none());
    }
}
