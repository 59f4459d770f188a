use crate::routes::CalculateResponse;
use clap::Args;
use lrs_scoring::catalog::SchemaCatalog;
use lrs_scoring::config::AppConfig;
use lrs_scoring::error::AppError;
use lrs_scoring::profile::{ProfileEngine, ScoredSchemaRecord};
use lrs_scoring::scoring::{parse_answer_payload, AnswerSet};
use lrs_scoring::tables::{MetadataTableImporter, WeightTableImporter};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the answers, either bare or wrapped as {"answers": {...}}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Weighting table to use instead of the configured one
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// Schema information table to use instead of the configured one
    #[arg(long)]
    pub(crate) schema_info: Option<PathBuf>,
    /// Only print the N highest-scoring schemas
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the API response body instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Include the four-week plan for each listed schema
    #[arg(long)]
    pub(crate) plans: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

/// Accepts either a bare answer object or one wrapped as `{"answers": ...}`.
pub(crate) fn parse_answers(raw: &str) -> Result<AnswerSet, AppError> {
    let members: BTreeMap<String, Box<RawValue>> = serde_json::from_str(raw)?;
    match members.get("answers") {
        Some(answers) => Ok(parse_answer_payload(Some(&**answers))?),
        None => Ok(serde_json::from_str(raw)?),
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    println!("{}", score_output(args)?);
    Ok(())
}

/// Scores the answer file and renders the report `run_score` prints.
pub(crate) fn score_output(args: ScoreArgs) -> Result<String, AppError> {
    let ScoreArgs {
        answers,
        weights,
        schema_info,
        top,
        json,
        plans,
    } = args;

    let config = AppConfig::load()?;
    let weights_path = weights.unwrap_or(config.data.weights_file);
    let schema_info_path = schema_info.unwrap_or(config.data.schema_info_file);

    let rules = WeightTableImporter::from_path(&weights_path)?;
    let metadata = if schema_info_path.exists() {
        Some(MetadataTableImporter::from_path(&schema_info_path)?)
    } else {
        None
    };
    let rule_count = rules.len();
    let engine = ProfileEngine::new(Some(rules), SchemaCatalog::standard(), metadata);

    let answer_set = parse_answers(&std::fs::read_to_string(&answers)?)?;
    let mut records = engine.score(&answer_set)?;
    if let Some(limit) = top {
        records.truncate(limit);
    }

    if json {
        let body = CalculateResponse {
            top_schemas: records,
        };
        return to_pretty_json(&body);
    }

    Ok(render_profile(
        &records,
        &weights_path,
        answer_set.len(),
        rule_count,
        plans,
    )?)
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = SchemaCatalog::standard();

    if args.json {
        println!("{}", to_pretty_json(catalog.entries())?);
        return Ok(());
    }

    let mut current_category = "";
    for entry in catalog.entries() {
        if entry.category != current_category {
            println!("{}", entry.category);
            current_category = &entry.category;
        }
        println!("  - {}", entry.name);
        for tag in entry.manifestation_tags() {
            println!("      {}", tag);
        }
    }
    Ok(())
}

fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(AppError::Serialize)
}

pub(crate) fn render_profile(
    records: &[ScoredSchemaRecord],
    weights_path: &Path,
    answer_count: usize,
    rule_count: usize,
    include_plans: bool,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "LRS schema profile")?;
    writeln!(
        out,
        "- {} answers scored against {} weighting rules ({})",
        answer_count,
        rule_count,
        weights_path.display()
    )?;

    let width = records
        .iter()
        .map(|record| record.name.len())
        .max()
        .unwrap_or(0);

    for (rank, record) in records.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {:<width$}  {:>7.2}  [{}]",
            rank + 1,
            record.name,
            record.score,
            record.category,
        )?;

        if include_plans {
            for (week, practice) in record.plan.weeks().iter().enumerate() {
                writeln!(out, "      Week {}: {}", week + 1, practice)?;
            }
        }
    }

    Ok(out.trim_end().to_string())
}
