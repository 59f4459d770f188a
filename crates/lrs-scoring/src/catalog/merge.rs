use super::{InterventionPlan, SchemaMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Externally supplied metadata for one schema. `None` means the source left
/// the field blank and the catalog value stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataOverride {
    pub name: String,
    pub category: Option<String>,
    pub causes: Option<String>,
    pub symptoms: Option<String>,
    pub manifestations: Option<String>,
    pub plan: [Option<String>; 4],
}

/// External metadata rows keyed by exact schema name.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    rows: HashMap<String, MetadataOverride>,
    order: Vec<String>,
}

impl MetadataTable {
    /// Builds the lookup; when a schema name repeats, the first row is kept.
    pub fn from_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = MetadataOverride>,
    {
        let mut table = Self::default();
        for mut row in overrides {
            row.name = row.name.trim().to_string();
            if row.name.is_empty() || table.rows.contains_key(&row.name) {
                continue;
            }
            table.order.push(row.name.clone());
            table.rows.insert(row.name.clone(), row);
        }
        table
    }

    pub fn get(&self, schema_name: &str) -> Option<&MetadataOverride> {
        self.rows.get(schema_name)
    }

    /// Schema names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Layers `external` over `fallback` field by field. Non-blank external values
/// win; blank or missing ones keep the fallback text. The name is always the
/// catalog's.
pub fn merge_entry(
    fallback: &SchemaMetadata,
    external: Option<&MetadataOverride>,
) -> SchemaMetadata {
    let Some(external) = external else {
        return fallback.clone();
    };

    let [week1, week2, week3, week4] = [0, 1, 2, 3]
        .map(|week| prefer(external.plan[week].as_deref(), fallback.plan.weeks()[week]));

    SchemaMetadata {
        name: fallback.name.clone(),
        category: prefer(external.category.as_deref(), &fallback.category),
        causes: prefer(external.causes.as_deref(), &fallback.causes),
        symptoms: prefer(external.symptoms.as_deref(), &fallback.symptoms),
        manifestations: prefer(external.manifestations.as_deref(), &fallback.manifestations),
        plan: InterventionPlan {
            week1,
            week2,
            week3,
            week4,
        },
    }
}

fn prefer(external: Option<&str>, fallback: &str) -> String {
    match external.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}
