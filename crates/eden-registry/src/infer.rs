//! Code-field inference over source attribute columns.
//!
//! External boundary releases are not standardized: the level-3 code column
//! has shipped as `US_L3CODE`, `L3_CODE`, `NA_L3CODE` and others. Inference
//! scores every column against an explicit decision table and refuses to
//! guess below a confidence threshold, reporting its candidates so an
//! operator can pass the field explicitly.

use tracing::debug;

use crate::error::{RegistryError, Result};

/// One scoring rule: a named predicate over the lowercased column name and
/// the weight it contributes when it matches.
struct ScoreRule {
    name: &'static str,
    weight: i32,
    applies: fn(&str) -> bool,
}

fn has_level3_marker(column: &str) -> bool {
    column.contains("l3") || column.contains("level3") || column.contains("lvl3")
}

fn has_code_marker(column: &str) -> bool {
    column.contains("code")
}

fn has_us_level3_marker(column: &str) -> bool {
    column.contains("us") && (column.contains("l3") || column.contains("level3"))
}

fn has_ecoregion_marker(column: &str) -> bool {
    column.contains("eco") || column.contains("ecoreg") || column.contains("region")
}

fn has_descriptive_marker(column: &str) -> bool {
    column.contains("name") || column.contains("desc") || column.contains("label")
}

/// The scoring policy, kept as a table so it is testable and extensible
/// independently of the selection logic.
const RULES: &[ScoreRule] = &[
    ScoreRule {
        name: "level-3 marker",
        weight: 4,
        applies: has_level3_marker,
    },
    ScoreRule {
        name: "code marker",
        weight: 3,
        applies: has_code_marker,
    },
    ScoreRule {
        name: "US level-3 marker",
        weight: 2,
        applies: has_us_level3_marker,
    },
    ScoreRule {
        name: "ecoregion marker",
        weight: 1,
        applies: has_ecoregion_marker,
    },
    ScoreRule {
        name: "descriptive-field penalty",
        weight: -2,
        applies: has_descriptive_marker,
    },
];

/// Minimum score required before inference is trusted.
const CONFIDENCE_THRESHOLD: i32 = 3;

/// A scored candidate column.
#[derive(Debug, Clone)]
pub struct FieldScore {
    pub column: String,
    pub score: i32,
    /// Names of the rules that matched, for diagnostics.
    pub matched: Vec<&'static str>,
}

/// Score every column against the rule table.
///
/// Results sort by score descending, then by column name descending. The
/// name tie-break is deterministic but arbitrary; it exists so that reruns
/// over the same schema always pick the same field, not because either
/// column is preferable.
pub fn score_columns(columns: &[String]) -> Vec<FieldScore> {
    let mut scores: Vec<FieldScore> = columns
        .iter()
        .map(|column| {
            let lower = column.to_lowercase();
            let mut score = 0;
            let mut matched = Vec::new();
            for rule in RULES {
                if (rule.applies)(&lower) {
                    score += rule.weight;
                    matched.push(rule.name);
                }
            }
            FieldScore {
                column: column.clone(),
                score,
                matched,
            }
        })
        .collect();
    scores.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| b.column.cmp(&a.column)));
    scores
}

/// Identify the attribute column holding the region code.
///
/// An explicit `preferred` override must exist among the columns. Without
/// one, the highest-scoring column wins; a best score below the confidence
/// threshold is fatal and reports the top candidates.
pub fn pick_code_field(columns: &[String], preferred: Option<&str>) -> Result<String> {
    if let Some(field) = preferred {
        if columns.iter().any(|column| column == field) {
            return Ok(field.to_string());
        }
        return Err(RegistryError::CodeFieldNotFound {
            field: field.to_string(),
            columns: columns.to_vec(),
        });
    }

    let scores = score_columns(columns);
    match scores.first() {
        Some(best) if best.score >= CONFIDENCE_THRESHOLD => {
            debug!(
                column = %best.column,
                score = best.score,
                matched = ?best.matched,
                "inferred code field"
            );
            Ok(best.column.clone())
        }
        _ => Err(RegistryError::AmbiguousCodeField {
            columns: columns.to_vec(),
            candidates: scores
                .iter()
                .take(8)
                .map(|s| format!("{} ({})", s.column, s.score))
                .collect(),
        }),
    }
}
