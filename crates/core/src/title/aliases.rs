use serde::{Deserialize, Serialize};

/// A canonical title and the alternate names release groups use for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub canonical: String,
    pub alternates: Vec<String>,
}

impl AliasEntry {
    pub fn new(canonical: &str, alternates: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            alternates: alternates.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Read-only mapping from canonical series names to alternate names.
///
/// Entry order is preserved; it drives the order of alias-derived queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// An empty table (no alias expansion).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from entries.
    ///
    /// Empty alternates are dropped. A repeated canonical name replaces the
    /// alternates of the earlier entry but keeps its position.
    pub fn from_entries(entries: impl IntoIterator<Item = AliasEntry>) -> Self {
        let mut table = Self::empty();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    fn insert(&mut self, entry: AliasEntry) {
        let alternates: Vec<String> = entry
            .alternates
            .into_iter()
            .filter(|a| !a.trim().is_empty())
            .collect();

        match self.entries.iter_mut().find(|e| e.canonical == entry.canonical) {
            Some(existing) => existing.alternates = alternates,
            None => self.entries.push(AliasEntry {
                canonical: entry.canonical,
                alternates,
            }),
        }
    }

    /// Alternates for an exact canonical name.
    pub fn get(&self, canonical: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.canonical == canonical)
            .map(|e| e.alternates.as_slice())
    }

    /// Entries whose canonical name is contained in `title` without being equal to it.
    ///
    /// Substring matching can pick up short keys inside unrelated longer titles;
    /// extra queries are cheap compared to missing a release.
    pub fn contained_in<'a>(&'a self, title: &'a str) -> impl Iterator<Item = &'a AliasEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.canonical != title && title.contains(e.canonical.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    /// Built-in aliases for long-running series and arcs.
    fn default() -> Self {
        Self::from_entries([
            AliasEntry::new(
                "Jujutsu Kaisen",
                &[
                    "Jujutsu Kaisen: Shimetsu Kaiyuu",
                    "Jujutsu Kaisen Culling Game",
                    "Jujutsu Kaisen 3rd Season",
                    "Jujutsu Kaisen - Shimetsu Kaiyu",
                ],
            ),
            AliasEntry::new("Frieren: Beyond Journey's End", &["Sousou no Frieren"]),
            AliasEntry::new("Frieren", &["Sousou no Frieren"]),
            AliasEntry::new(
                "Demon Slayer: Kimetsu no Yaiba",
                &["Kimetsu no Yaiba", "Demon Slayer"],
            ),
            AliasEntry::new("Demon Slayer", &["Kimetsu no Yaiba"]),
            AliasEntry::new("Attack on Titan", &["Shingeki no Kyojin"]),
            AliasEntry::new("Mushoku Tensei: Jobless Reincarnation", &["Mushoku Tensei"]),
            AliasEntry::new(
                "Re:Zero - Starting Life in Another World",
                &["Re:Zero kara Hajimeru Isekai Seikatsu", "Re:Zero"],
            ),
        ])
    }
}
