//! Exercise catalog - the static set of fill-in-the-blank templates
//!
//! The catalog is fixed at build time; there is no persisted or dynamic
//! storage. A per-session subset of it becomes the visible pool (see
//! [`crate::session`]).

mod templates;

use crate::error::{Error, Result};

/// Identifier of a catalog entry.
pub type ExerciseId = &'static str;

/// A single exercise: an id and an immutable code template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    /// Stable identifier, e.g. `"prog7"`.
    pub id: ExerciseId,
    /// Template source shown in the editor, blank included.
    pub template: &'static str,
}

impl Exercise {
    /// Human-facing label derived from the id (`"prog7"` -> `"Prog 7"`).
    pub fn label(&self) -> String {
        match self.id.strip_prefix("prog") {
            Some(n) => format!("Prog {}", n),
            None => self.id.to_string(),
        }
    }
}

/// The static mapping from identifier to template source.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [Exercise],
}

impl Catalog {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        Catalog {
            entries: templates::TEMPLATES,
        }
    }

    /// Look up an exercise by id.
    pub fn get(&self, id: &str) -> Result<&'static Exercise> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::Catalog(format!("unknown exercise '{}'", id)))
    }

    /// Whether an id exists in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// All entries, in definition order.
    pub fn entries(&self) -> &'static [Exercise] {
        self.entries
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
