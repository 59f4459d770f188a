use super::normalizer::{clean_cell, normalize_header};
use csv::StringRecord;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Canonical columns recognised across the reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Column {
    QuestionId,
    SchemaName,
    Weight,
    Direction,
    Category,
    Causes,
    Symptoms,
    Manifestations,
    Week(u8),
}

impl Column {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Column::QuestionId => "Question ID",
            Column::SchemaName => "Schema Name",
            Column::Weight => "Weight",
            Column::Direction => "SCORING LOGIC",
            Column::Category => "Category",
            Column::Causes => "Causes",
            Column::Symptoms => "Symptoms",
            Column::Manifestations => "Manifestations",
            Column::Week(1) => "Week 1",
            Column::Week(2) => "Week 2",
            Column::Week(3) => "Week 3",
            Column::Week(_) => "Week 4",
        }
    }
}

static HEADER_ALIASES: OnceLock<HashMap<String, (Column, usize)>> = OnceLock::new();

/// Column and alias rank for a raw header; lower ranks win.
fn column_for_header(header: &str) -> Option<(Column, usize)> {
    header_aliases().get(&normalize_header(header)).copied()
}

fn header_aliases() -> &'static HashMap<String, (Column, usize)> {
    HEADER_ALIASES.get_or_init(|| {
        const ALIASES: &[(Column, &[&str])] = &[
            (Column::QuestionId, &["Question ID", "QID", "ID"]),
            (Column::SchemaName, &["Schema Name", "Schema"]),
            (Column::Weight, &["Weight", "Weighting"]),
            (
                Column::Direction,
                &["SCORING LOGIC", "Scoring", "Direction", "Scoring Direction"],
            ),
            (Column::Category, &["Category", "Domain"]),
            (Column::Causes, &["Causes", "Origins", "Origin"]),
            (Column::Symptoms, &["Symptoms"]),
            (Column::Manifestations, &["Manifestations", "Manifestation"]),
            (Column::Week(1), &["Week 1", "Week1 Plan", "Plan Week 1"]),
            (Column::Week(2), &["Week 2", "Week2 Plan", "Plan Week 2"]),
            (Column::Week(3), &["Week 3", "Week3 Plan", "Plan Week 3"]),
            (Column::Week(4), &["Week 4", "Week4 Plan", "Plan Week 4"]),
        ];

        let mut map = HashMap::new();
        for (column, aliases) in ALIASES {
            for (rank, alias) in aliases.iter().enumerate() {
                map.entry(normalize_header(alias))
                    .or_insert((*column, rank));
            }
        }
        map
    })
}

/// Positions of each canonical column in a CSV header row, best alias first.
#[derive(Debug, Default)]
pub(crate) struct ColumnLayout {
    positions: HashMap<Column, Vec<(usize, usize)>>,
}

impl ColumnLayout {
    pub(crate) fn resolve(headers: &StringRecord) -> Self {
        let mut layout = Self::default();
        for (index, header) in headers.iter().enumerate() {
            if let Some((column, rank)) = column_for_header(header) {
                layout
                    .positions
                    .entry(column)
                    .or_default()
                    .push((rank, index));
            }
        }
        for candidates in layout.positions.values_mut() {
            candidates.sort();
        }
        layout
    }

    pub(crate) fn contains(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    /// First non-blank cell for `column`, trying headers in alias order.
    pub(crate) fn value<'r>(&self, record: &'r StringRecord, column: Column) -> Option<&'r str> {
        self.positions
            .get(&column)?
            .iter()
            .find_map(|(_, index)| record.get(*index).and_then(clean_cell))
    }
}
