//! Optional QA export: a flat CSV for eyeballing the finished registry in
//! a spreadsheet, including which repair strategies fired per region.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use eden_registry::Registry;

use crate::error::{OutputError, Result};

#[derive(Debug, Serialize)]
struct QaRow<'a> {
    uid: &'a str,
    code: &'a str,
    name: &'a str,
    area_km2: f64,
    repair: String,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

/// Write one CSV row per registry feature. The `repair` column lists the
/// strategies that fired for that uid ("none" when the geometry was already
/// valid), joined with `+` for multi-part regions.
pub fn write_qa(path: &Path, registry: &Registry) -> Result<()> {
    let mut repairs_by_uid: BTreeMap<&str, Vec<&'static str>> = BTreeMap::new();
    for (uid, strategy) in &registry.repairs {
        repairs_by_uid
            .entry(uid.as_str())
            .or_default()
            .push(strategy.as_str());
    }

    let mut writer = csv::Writer::from_path(path).map_err(OutputError::Csv)?;
    for feature in &registry.features {
        let repair = repairs_by_uid
            .get(feature.uid.as_str())
            .map(|strategies| strategies.join("+"))
            .unwrap_or_else(|| "none".to_string());
        writer.serialize(QaRow {
            uid: &feature.uid,
            code: &feature.code,
            name: &feature.name,
            area_km2: feature.area_km2,
            repair,
            xmin: feature.bounds.xmin,
            ymin: feature.bounds.ymin,
            xmax: feature.bounds.xmax,
            ymax: feature.bounds.ymax,
        })?;
    }
    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(rows = registry.features.len(), path = %path.display(), "wrote QA export");
    Ok(())
}
