//! Tags
//!
//! A small sorted tag set used to mark toppings for offer eligibility (for
//! example the `signature` tag that scores double in the large combo).

use smallvec::SmallVec;

/// A sorted, deduplicated set of string tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: SmallVec<[String; 4]>,
}

impl TagSet {
    /// Create an empty tag set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tags: SmallVec::new(),
        }
    }

    /// Create a tag set from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        let mut set = Self::empty();

        for tag in tags {
            set.add(tag);
        }

        set
    }

    /// Whether the set contains `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)).is_ok()
    }

    /// Insert `tag`, keeping the set sorted; duplicates are ignored.
    pub fn add(&mut self, tag: &str) {
        if let Err(pos) = self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)) {
            self.tags.insert(pos, tag.to_string());
        }
    }

    /// Whether any tag is shared with `other`.
    pub fn intersects(&self, other: &Self) -> bool {
        self.tags.iter().any(|tag| other.contains(tag))
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Number of tags in the set.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Iterate over the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for TagSet {
    fn from(tags: Vec<String>) -> Self {
        let mut set = Self::empty();

        for tag in &tags {
            set.add(tag);
        }

        set
    }
}
