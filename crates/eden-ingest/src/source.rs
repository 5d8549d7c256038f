//! Shapefile reading into [`SourceCollection`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use geo::MultiPolygon;
use shapefile::dbase::FieldValue;
use tracing::{debug, info};

use eden_model::{AttrValue, SourceCollection, SourceFeature};

use crate::error::{IngestError, Result};

/// Read a polygon shapefile and its attribute table into memory.
///
/// The CRS comes from the `.prj` sidecar; its absence is fatal, as is an
/// empty source. Geometries are carried as-read, possibly invalid; repair
/// happens downstream.
pub fn read_polygon_source(path: &Path) -> Result<SourceCollection> {
    if !path.exists() {
        return Err(IngestError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let crs = read_prj(path)?;

    let pairs = shapefile::read_as::<_, shapefile::Polygon, shapefile::dbase::Record>(path)
        .map_err(|source| IngestError::Shapefile {
            path: path.to_path_buf(),
            source,
        })?;
    if pairs.is_empty() {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    let mut columns: BTreeSet<String> = BTreeSet::new();
    let mut features = Vec::with_capacity(pairs.len());
    for (polygon, record) in pairs {
        let geometry: MultiPolygon<f64> = polygon.into();
        let mut attrs = BTreeMap::new();
        for (name, value) in record {
            columns.insert(name.clone());
            attrs.insert(name, attr_from_field(value));
        }
        features.push(SourceFeature { attrs, geometry });
    }

    let columns: Vec<String> = columns.into_iter().collect();
    info!(
        path = %path.display(),
        feature_count = features.len(),
        column_count = columns.len(),
        "read geometry source"
    );
    debug!(?columns, "source attribute columns");

    Ok(SourceCollection {
        features,
        crs,
        columns,
    })
}

/// Read the CRS definition (usually WKT) from the `.prj` next to the `.shp`.
fn read_prj(shp_path: &Path) -> Result<String> {
    let prj_path = shp_path.with_extension("prj");
    let contents = std::fs::read_to_string(&prj_path)
        .map_err(|_| IngestError::MissingCrs {
            path: prj_path.clone(),
        })?
        .trim()
        .to_string();
    if contents.is_empty() {
        return Err(IngestError::MissingCrs { path: prj_path });
    }
    Ok(contents)
}

fn attr_from_field(value: FieldValue) -> AttrValue {
    match value {
        FieldValue::Character(Some(text)) => AttrValue::Text(text),
        FieldValue::Memo(text) => AttrValue::Text(text),
        FieldValue::Numeric(Some(number)) => AttrValue::Number(number),
        FieldValue::Float(Some(number)) => AttrValue::Number(f64::from(number)),
        FieldValue::Integer(number) => AttrValue::Number(f64::from(number)),
        FieldValue::Double(number) => AttrValue::Number(number),
        FieldValue::Currency(number) => AttrValue::Number(number),
        FieldValue::Logical(Some(flag)) => AttrValue::Text(flag.to_string()),
        // Nulls and date-typed fields never hold region codes.
        _ => AttrValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_fatal() {
        let err = read_polygon_source(Path::new("/nonexistent/us_eco_l3.shp")).unwrap_err();
        assert!(matches!(err, IngestError::SourceNotFound { .. }));
    }

    #[test]
    fn missing_prj_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let shp = dir.path().join("eco.shp");
        std::fs::write(&shp, b"").expect("touch shp");
        let err = read_polygon_source(&shp).unwrap_err();
        assert!(matches!(err, IngestError::MissingCrs { .. }));
    }

    #[test]
    fn character_and_numeric_fields_map_to_attrs() {
        assert_eq!(
            attr_from_field(FieldValue::Character(Some("56h".to_string()))),
            AttrValue::Text("56h".to_string())
        );
        assert_eq!(
            attr_from_field(FieldValue::Numeric(Some(7.0))),
            AttrValue::Number(7.0)
        );
        assert_eq!(attr_from_field(FieldValue::Character(None)), AttrValue::Null);
    }
}
