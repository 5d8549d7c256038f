//! Region catalog loading and scheme/level selection.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use eden_model::{RegionSpec, normalize_raw};

use crate::error::{CatalogError, Result};

/// The parsed region catalog. The top-level `regions:` list is required;
/// a malformed file fails loudly instead of yielding an empty catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    /// Optional hand-maintained top-level AOI bounds.
    #[serde(default)]
    pub bounds: Option<Vec<f64>>,
    pub regions: Vec<RegionSpec>,
}

/// Load and parse a region catalog from YAML.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog: Catalog =
        serde_yaml_ng::from_str(&text).map_err(|source| CatalogError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        path = %path.display(),
        region_count = catalog.regions.len(),
        "loaded region catalog"
    );
    Ok(catalog)
}

/// The subset of the catalog selected for one (scheme, level), keyed by
/// normalized code. Construction enforces the catalog invariants: at least
/// one region, no missing codes, no normalized-code collisions.
#[derive(Debug, Clone)]
pub struct Selection {
    pub scheme: String,
    pub level: i64,
    pub by_code: BTreeMap<String, RegionSpec>,
}

impl Selection {
    /// The set of normalized codes the registry must contain.
    pub fn wanted_codes(&self) -> BTreeSet<String> {
        self.by_code.keys().cloned().collect()
    }

    pub fn get(&self, code: &str) -> Option<&RegionSpec> {
        self.by_code.get(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Filter the catalog to one scheme and level and index it by normalized
/// code.
pub fn select_regions(catalog: &Catalog, scheme: &str, level: i64) -> Result<Selection> {
    let wanted: Vec<&RegionSpec> = catalog
        .regions
        .iter()
        .filter(|region| region.scheme == scheme && region.level == level)
        .collect();
    if wanted.is_empty() {
        return Err(CatalogError::EmptySelection {
            scheme: scheme.to_string(),
            level,
        });
    }

    let mut by_code = BTreeMap::new();
    for region in wanted {
        let code = normalize_raw(region.code.as_ref());
        if code.is_empty() {
            return Err(CatalogError::MissingCode {
                uid: region.uid.clone(),
            });
        }
        if by_code.insert(code.clone(), region.clone()).is_some() {
            return Err(CatalogError::DuplicateCode {
                code,
                scheme: scheme.to_string(),
                level,
            });
        }
    }

    debug!(
        scheme,
        level,
        selected = by_code.len(),
        "selected catalog regions"
    );
    Ok(Selection {
        scheme: scheme.to_string(),
        level,
        by_code,
    })
}
