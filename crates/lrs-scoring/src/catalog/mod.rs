//! Schema catalog: the fixed enumeration of schemas every profile reports,
//! plus the descriptive metadata shown alongside each score.

mod fallback;
mod merge;

pub use merge::{merge_entry, MetadataOverride, MetadataTable};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Four weekly practices, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionPlan {
    pub week1: String,
    pub week2: String,
    pub week3: String,
    pub week4: String,
}

impl InterventionPlan {
    pub fn from_weeks(weeks: [&str; 4]) -> Self {
        let [week1, week2, week3, week4] = weeks.map(str::to_string);
        Self {
            week1,
            week2,
            week3,
            week4,
        }
    }

    pub fn weeks(&self) -> [&str; 4] {
        [
            self.week1.as_str(),
            self.week2.as_str(),
            self.week3.as_str(),
            self.week4.as_str(),
        ]
    }
}

/// Descriptive metadata for one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaMetadata {
    pub name: String,
    pub category: String,
    pub causes: String,
    pub symptoms: String,
    pub manifestations: String,
    pub plan: InterventionPlan,
}

impl SchemaMetadata {
    /// Splits the manifestation text into tags such as `Roots (parent loss)`.
    /// Commas inside parentheses do not split.
    pub fn manifestation_tags(&self) -> Vec<&str> {
        let mut tags = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (index, ch) in self.manifestations.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    tags.push(self.manifestations[start..index].trim());
                    start = index + 1;
                }
                _ => {}
            }
        }
        tags.push(self.manifestations[start..].trim());
        tags.retain(|tag| !tag.is_empty());
        tags
    }
}

/// Ordered, duplicate-free list of the schemas a profile always reports.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    entries: Vec<SchemaMetadata>,
}

impl SchemaCatalog {
    /// The built-in catalog of the 18 Young schemas with complete plans.
    pub fn standard() -> Self {
        Self {
            entries: fallback::standard_entries(),
        }
    }

    pub fn from_entries(entries: Vec<SchemaMetadata>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        if let Some(duplicate) = first_duplicate(&entries) {
            return Err(CatalogError::DuplicateSchema(duplicate));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SchemaMetadata] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&SchemaMetadata> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn first_duplicate(entries: &[SchemaMetadata]) -> Option<String> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .iter()
        .find(|entry| !seen.insert(entry.name.as_str()))
        .map(|entry| entry.name.clone())
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("schema catalog has no entries")]
    Empty,
    #[error("schema '{0}' appears more than once in the catalog")]
    DuplicateSchema(String),
}
