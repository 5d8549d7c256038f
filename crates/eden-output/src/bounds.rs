//! Flat per-region bounds table.
//!
//! A small parquet file next to the geometry store, holding one row per
//! registry feature. Downstream area-of-interest lookups read this table
//! instead of parsing geometry.

use std::collections::BTreeSet;
use std::fs;
use std::fs::File;
use std::path::Path;

use polars::prelude::{DataFrame, ParquetReader, ParquetWriter, SerReader};
use tracing::info;

use eden_model::Bbox;
use eden_registry::Registry;

use crate::error::{OutputError, Result};

/// Bounds table schema, in column order.
pub const BOUNDS_COLUMNS: [&str; 8] = [
    "uid", "code", "name", "xmin", "ymin", "xmax", "ymax", "area_km2",
];

/// Write the registry's bounds table, one row per feature in registry
/// order.
pub fn write_bounds(path: &Path, registry: &Registry) -> Result<()> {
    let features = &registry.features;
    let mut df = polars::df!(
        "uid" => features.iter().map(|f| f.uid.as_str()).collect::<Vec<_>>(),
        "code" => features.iter().map(|f| f.code.as_str()).collect::<Vec<_>>(),
        "name" => features.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
        "xmin" => features.iter().map(|f| f.bounds.xmin).collect::<Vec<_>>(),
        "ymin" => features.iter().map(|f| f.bounds.ymin).collect::<Vec<_>>(),
        "xmax" => features.iter().map(|f| f.bounds.xmax).collect::<Vec<_>>(),
        "ymax" => features.iter().map(|f| f.bounds.ymax).collect::<Vec<_>>(),
        "area_km2" => features.iter().map(|f| f.area_km2).collect::<Vec<_>>(),
    )?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetWriter::new(file).finish(&mut df)?;
    info!(rows = features.len(), path = %path.display(), "wrote bounds table");
    Ok(())
}

/// Read a previously written bounds table.
pub fn read_bounds(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ParquetReader::new(file).finish()?)
}

/// Union of the bounds of the given codes, read from the computed table.
/// `None` when no row matches.
pub fn aoi_from_bounds(path: &Path, wanted: &BTreeSet<String>) -> Result<Option<Bbox>> {
    let df = read_bounds(path)?;
    let codes = df.column("code")?.str()?;
    let xmins = df.column("xmin")?.f64()?;
    let ymins = df.column("ymin")?.f64()?;
    let xmaxs = df.column("xmax")?.f64()?;
    let ymaxs = df.column("ymax")?.f64()?;

    let mut boxes = Vec::new();
    for i in 0..df.height() {
        let Some(code) = codes.get(i) else { continue };
        if !wanted.contains(code) {
            continue;
        }
        if let (Some(xmin), Some(ymin), Some(xmax), Some(ymax)) =
            (xmins.get(i), ymins.get(i), xmaxs.get(i), ymaxs.get(i))
        {
            boxes.push(Bbox {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
    }
    Ok(Bbox::union_all(boxes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eden_model::RegionFeature;
    use geo::MultiPolygon;

    fn feature(uid: &str, code: &str, bounds: Bbox, area_km2: f64) -> RegionFeature {
        RegionFeature {
            uid: uid.to_string(),
            scheme: "EPA_US".to_string(),
            level: 3,
            code: code.to_string(),
            name: format!("region {code}"),
            area_km2,
            geometry: MultiPolygon::new(vec![]),
            bounds,
        }
    }

    fn registry() -> Registry {
        Registry {
            features: vec![
                feature(
                    "r1",
                    "1",
                    Bbox {
                        xmin: -120.0,
                        ymin: 35.0,
                        xmax: -118.0,
                        ymax: 37.0,
                    },
                    100.0,
                ),
                feature(
                    "r7",
                    "7",
                    Bbox {
                        xmin: -122.0,
                        ymin: 36.0,
                        xmax: -121.0,
                        ymax: 39.0,
                    },
                    250.0,
                ),
            ],
            code_field: "US_L3CODE".to_string(),
            repairs: Vec::new(),
            target_crs: "EPSG:4326".to_string(),
        }
    }

    #[test]
    fn bounds_round_trip_preserves_schema_and_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bounds.parquet");
        write_bounds(&path, &registry()).expect("write");

        let df = read_bounds(&path).expect("read");
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names_str();
        assert_eq!(names, BOUNDS_COLUMNS);
        assert_eq!(df.column("code").expect("col").str().expect("str").get(1), Some("7"));
        assert_eq!(
            df.column("area_km2").expect("col").f64().expect("f64").get(0),
            Some(100.0)
        );
    }

    #[test]
    fn aoi_unions_only_requested_codes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bounds.parquet");
        write_bounds(&path, &registry()).expect("write");

        let only_seven: BTreeSet<String> = ["7".to_string()].into();
        let bbox = aoi_from_bounds(&path, &only_seven)
            .expect("aoi")
            .expect("match");
        assert_eq!((bbox.xmin, bbox.ymax), (-122.0, 39.0));

        let both: BTreeSet<String> = ["1".to_string(), "7".to_string()].into();
        let bbox = aoi_from_bounds(&path, &both).expect("aoi").expect("match");
        assert_eq!((bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax), (-122.0, 35.0, -118.0, 39.0));

        let none: BTreeSet<String> = ["99".to_string()].into();
        assert!(aoi_from_bounds(&path, &none).expect("aoi").is_none());
    }
}
