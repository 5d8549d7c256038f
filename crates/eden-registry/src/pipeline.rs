//! The region preparation pipeline.
//!
//! Takes a catalog selection plus a raw polygon source and produces the
//! canonical registry: matched, repaired, measured features with catalog
//! metadata attached. Every stage fails loudly; a registry missing any
//! requested region never reaches disk.

use std::collections::{BTreeMap, BTreeSet};

use geo::MultiPolygon;
use tracing::{debug, info, warn};

use eden_catalog::Selection;
use eden_model::{RegionFeature, RegionSpec, SourceCollection, normalize_code, normalize_raw};

use crate::dissolve::dissolve_by_uid;
use crate::error::{RegistryError, Result};
use crate::infer::pick_code_field;
use crate::metrics::{DEFAULT_AREA_CRS, DEFAULT_TARGET_CRS, area_km2, native_bounds, reproject};
use crate::repair::{RepairStrategy, repair};

/// How many distinct source codes to report when nothing matches.
const SAMPLE_CODE_LIMIT: usize = 25;

/// Knobs for one preparation run.
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// Explicit code column; `None` means infer it.
    pub code_field: Option<String>,
    /// CRS the finished registry is written in.
    pub target_crs: String,
    /// Equal-area CRS used for area computation only.
    pub area_crs: String,
    /// Union multi-part regions into one feature per uid.
    pub dissolve: bool,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            code_field: None,
            target_crs: DEFAULT_TARGET_CRS.to_string(),
            area_crs: DEFAULT_AREA_CRS.to_string(),
            dissolve: true,
        }
    }
}

/// A finished registry, ready for the writer.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Features sorted by (code, uid).
    pub features: Vec<RegionFeature>,
    /// The column the codes were read from, inferred or explicit.
    pub code_field: String,
    /// Per-uid repair strategies that actually fired, for the run summary.
    pub repairs: Vec<(String, RepairStrategy)>,
    /// CRS of the feature geometries and bounds.
    pub target_crs: String,
}

/// Run the full pipeline: match source features against the selection,
/// repair geometries, optionally dissolve, attach metadata, and compute
/// area and bounds.
pub fn prepare_regions(
    selection: &Selection,
    source: &SourceCollection,
    config: &PrepConfig,
) -> Result<Registry> {
    if source.crs.trim().is_empty() {
        return Err(RegistryError::MissingCrs);
    }

    let code_field = pick_code_field(&source.columns, config.code_field.as_deref())?;
    let wanted = selection.wanted_codes();

    // Match source features to requested codes, keeping every normalized
    // source code around for the no-match diagnostic.
    let mut seen_codes: BTreeSet<String> = BTreeSet::new();
    let mut matched: Vec<(&RegionSpec, MultiPolygon<f64>)> = Vec::new();
    for feature in &source.features {
        let code = normalize_code(&feature.attr(&code_field).to_code_string());
        if code.is_empty() {
            continue;
        }
        seen_codes.insert(code.clone());
        if let Some(spec) = selection.get(&code) {
            matched.push((spec, feature.geometry.clone()));
        }
    }
    if matched.is_empty() {
        return Err(RegistryError::NoMatches {
            code_field,
            wanted: wanted.iter().cloned().collect(),
            sample_codes: seen_codes.into_iter().take(SAMPLE_CODE_LIMIT).collect(),
        });
    }
    debug!(
        matched = matched.len(),
        of = source.len(),
        code_field = %code_field,
        "matched source features against catalog selection"
    );

    // Repair before any measurement so area and bounds are computed over
    // valid geometry. Empty repair results drop the part entirely.
    let mut repairs: Vec<(String, RepairStrategy)> = Vec::new();
    let mut parts: Vec<(String, MultiPolygon<f64>)> = Vec::new();
    let mut meta_by_uid: BTreeMap<String, &RegionSpec> = BTreeMap::new();
    for (spec, geometry) in matched {
        let repaired = repair(&geometry);
        if repaired.strategy != RepairStrategy::None {
            warn!(
                uid = %spec.uid,
                strategy = repaired.strategy.as_str(),
                "repaired invalid geometry"
            );
            repairs.push((spec.uid.clone(), repaired.strategy));
        }
        if repaired.geometry.0.is_empty() {
            warn!(uid = %spec.uid, "geometry empty after repair; dropping part");
            continue;
        }
        meta_by_uid.insert(spec.uid.clone(), spec);
        parts.push((spec.uid.clone(), repaired.geometry));
    }

    let grouped: Vec<(String, MultiPolygon<f64>)> = if config.dissolve {
        dissolve_by_uid(parts).into_iter().collect()
    } else {
        parts
    };

    let mut features = Vec::with_capacity(grouped.len());
    for (uid, geometry) in grouped {
        // Every uid in `grouped` came through `meta_by_uid` above.
        let Some(spec) = meta_by_uid.get(&uid) else {
            continue;
        };
        let area_km2 = area_km2(&geometry, &source.crs, &config.area_crs)?;
        let projected = reproject(&geometry, &source.crs, &config.target_crs)?;
        let Some(bounds) = native_bounds(&projected) else {
            continue;
        };
        features.push(RegionFeature {
            uid: uid.clone(),
            scheme: spec.scheme.clone(),
            level: spec.level,
            code: normalize_raw(spec.code.as_ref()),
            name: spec.display_name().to_string(),
            area_km2,
            geometry: projected,
            bounds,
        });
    }
    features.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.uid.cmp(&b.uid)));

    // Completeness: every requested code must have produced at least one
    // feature. Shortfalls name the exact missing codes.
    let found: BTreeSet<String> = features.iter().map(|f| f.code.clone()).collect();
    let missing: Vec<String> = wanted.difference(&found).cloned().collect();
    if !missing.is_empty() {
        return Err(RegistryError::IncompleteRegistry { missing });
    }

    info!(
        features = features.len(),
        repairs = repairs.len(),
        dissolve = config.dissolve,
        target_crs = %config.target_crs,
        "prepared region registry"
    );
    Ok(Registry {
        features,
        code_field,
        repairs,
        target_crs: config.target_crs.clone(),
    })
}
