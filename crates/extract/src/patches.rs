//! The ordered index of every release the static asset host knows about.

use exn::ResultExt;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::models::Patch;

/// One entry of the asset host's JSON directory listing.
///
/// ```json
/// [{ "name": "12.5", "type": "directory" }, { "name": "latest", "type": "directory" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}
impl ListingEntry {
    fn is_directory(&self) -> bool {
        self.kind == "directory"
    }
}

/// Known release patches, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchIndex {
    patches: Vec<Patch>,
}
impl PatchIndex {
    /// Build an index from any collection of patches; duplicates are dropped
    /// and the result is sorted descending.
    pub fn new(patches: impl IntoIterator<Item = Patch>) -> Self {
        let mut patches: Vec<Patch> = patches.into_iter().collect();
        patches.sort_unstable_by(|a, b| b.cmp(a));
        patches.dedup();
        Self { patches }
    }

    /// Keep only directory entries named like `12.5`; everything else
    /// (`latest`, `pbe`, files, three-component names) is ignored.
    pub fn from_listing(entries: &[ListingEntry]) -> Self {
        Self::new(
            entries
                .iter()
                .filter(|entry| entry.is_directory())
                .filter_map(|entry| entry.name.parse::<Patch>().ok()),
        )
    }

    /// Parse the raw JSON body of the directory listing.
    #[instrument(skip(json), fields(json_size = json.len()))]
    pub fn from_listing_json(json: &[u8]) -> Result<Self> {
        let entries: Vec<ListingEntry> = serde_json::from_slice(json).or_raise(|| ErrorKind::ParseError {
            field: "listing",
            value: String::from_utf8_lossy(&json[..json.len().min(64)]).into_owned(),
        })?;
        let index = Self::from_listing(&entries);
        tracing::debug!(patches = index.len(), latest = ?index.latest(), "parsed patch listing");
        Ok(index)
    }

    /// The release immediately preceding `patch`: the entry right after the
    /// first exact match in the descending list.
    ///
    /// A patch that is not in the index, or is the oldest one, is an error:
    /// it means the notes mention a release the asset host never published.
    pub fn previous(&self, patch: &Patch) -> Result<Patch> {
        self.patches
            .iter()
            .position(|p| p == patch)
            .and_then(|index| self.patches.get(index + 1))
            .copied()
            .ok_or_else(|| exn::Exn::from(ErrorKind::PatchNotFound(*patch)))
    }

    pub fn latest(&self) -> Option<Patch> {
        self.patches.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kind: &str) -> ListingEntry {
        ListingEntry {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }

    fn index() -> PatchIndex {
        PatchIndex::from_listing(&[
            entry("12.9", "directory"),
            entry("12.10", "directory"),
            entry("latest", "directory"),
            entry("pbe", "directory"),
            entry("12.4", "directory"),
            entry("12.5", "directory"),
            entry("13.1", "file"),
            entry("7.1.1", "directory"),
            entry(" 12.3", "directory"),
            entry("12.2 ", "directory"),
        ])
    }

    #[test]
    fn test_listing_is_filtered_and_sorted_descending() {
        let patches: Vec<String> = index().iter().map(Patch::to_string).collect();
        assert_eq!(patches, ["12.10", "12.9", "12.5", "12.4"]);
    }

    #[test]
    fn test_previous() {
        let index = index();
        assert_eq!(index.previous(&Patch::new(12, 10)).unwrap(), Patch::new(12, 9));
        assert_eq!(index.previous(&Patch::new(12, 5)).unwrap(), Patch::new(12, 4));
    }

    #[test]
    fn test_previous_unknown_patch() {
        let err = index().previous(&Patch::new(11, 1)).unwrap_err();
        assert_eq!(*err, ErrorKind::PatchNotFound(Patch::new(11, 1)));
    }

    #[test]
    fn test_previous_of_oldest_patch() {
        let err = index().previous(&Patch::new(12, 4)).unwrap_err();
        assert_eq!(*err, ErrorKind::PatchNotFound(Patch::new(12, 4)));
    }

    #[test]
    fn test_from_listing_json() {
        let json = br#"[
            {"name": "12.1", "type": "directory", "mtime": "Thu, 06 Jan 2022 19:30:59 GMT"},
            {"name": "12.2", "type": "directory", "mtime": "Wed, 19 Jan 2022 21:12:52 GMT"},
            {"name": "cdragon", "type": "directory", "mtime": "Mon, 01 Jan 2018 00:00:00 GMT"}
        ]"#;
        let index = PatchIndex::from_listing_json(json).unwrap();
        assert_eq!(index.latest(), Some(Patch::new(12, 2)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_from_listing_json_rejects_garbage() {
        assert!(PatchIndex::from_listing_json(b"<html>nope</html>").is_err());
    }
}
