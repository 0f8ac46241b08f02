//! Collision-free file names for category documents.
//!
//! Label and milestone documents live in different directories but share one namespace, so a
//! label and a milestone with the same name never end up with the same stem.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::sanitize::sanitize;

/// Stem used when a key sanitizes to nothing.
const EMPTY_KEY_NAME: &str = "_";

/// One of the two grouping dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Label,
    Milestone,
}

impl Facet {
    /// Directory holding this facet's documents, relative to the output root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Facet::Label => "by-label",
            Facet::Milestone => "by-milestone",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Facet::Label => "Label",
            Facet::Milestone => "Milestone",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Assigns file stems in call order: the first key to claim a sanitized name gets it as-is,
/// later ones get `-2`, `-3`, …
#[derive(Debug, Default)]
pub struct CategoryNamer {
    taken: HashSet<String>,
    assigned: HashMap<(Facet, String), String>,
}

impl CategoryNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// File stem for `key` under `facet`. Stable for the lifetime of the namer.
    pub fn resolve(&mut self, facet: Facet, key: &str) -> String {
        if let Some(name) = self.assigned.get(&(facet, key.to_owned())) {
            return name.clone();
        }

        let mut base = sanitize(key);
        if base.is_empty() {
            base = EMPTY_KEY_NAME.to_owned();
        }

        let mut name = base.clone();
        let mut suffix = 2u32;
        while self.taken.contains(&name) {
            name = format!("{base}-{suffix}");
            suffix += 1;
        }

        self.taken.insert(name.clone());
        self.assigned.insert((facet, key.to_owned()), name.clone());
        name
    }

    /// Previously assigned stem, if any.
    pub fn get(&self, facet: Facet, key: &str) -> Option<&str> {
        self.assigned.get(&(facet, key.to_owned())).map(String::as_str)
    }
}
