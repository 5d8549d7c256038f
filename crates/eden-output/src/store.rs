//! Layered geometry store.
//!
//! A store is a directory of GeoJSON layer files plus a `store.json`
//! manifest describing them. Rewriting a layer replaces its file and its
//! manifest entry; other layers are untouched, so one store can accumulate
//! registries for several scheme/level combinations.

use std::fs;
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use eden_model::RegionFeature;
use eden_registry::Registry;

use crate::error::{OutputError, Result};

pub const STORE_MANIFEST: &str = "store.json";
pub const STORE_VERSION: u32 = 1;

/// The `store.json` manifest: which layers exist and what is in them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreManifest {
    pub version: u32,
    pub layers: Vec<LayerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    /// Layer file name, relative to the store directory.
    pub file: String,
    pub crs: String,
    pub feature_count: usize,
}

impl StoreManifest {
    fn empty() -> Self {
        Self {
            version: STORE_VERSION,
            layers: Vec::new(),
        }
    }

    pub fn layer(&self, name: &str) -> Option<&LayerEntry> {
        self.layers.iter().find(|layer| layer.name == name)
    }
}

/// Read the store manifest, or `None` when the store does not exist yet.
/// A manifest written by a newer version is refused rather than misread.
pub fn load_manifest(dir: &Path) -> Result<Option<StoreManifest>> {
    let path = dir.join(STORE_MANIFEST);
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest: StoreManifest =
        serde_json::from_str(&text).map_err(|source| OutputError::Json {
            path: path.clone(),
            source,
        })?;
    if manifest.version > STORE_VERSION {
        return Err(OutputError::ManifestVersion {
            path,
            found: manifest.version,
            supported: STORE_VERSION,
        });
    }
    Ok(Some(manifest))
}

/// Write a registry as one named layer of the store, creating or updating
/// the manifest. Returns the path of the written layer file.
pub fn write_layer(dir: &Path, layer_name: &str, registry: &Registry) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let collection = to_feature_collection(registry);
    let file_name = format!("{layer_name}.geojson");
    let layer_path = dir.join(&file_name);
    let text = serde_json::to_string(&collection).map_err(|source| OutputError::Json {
        path: layer_path.clone(),
        source,
    })?;
    fs::write(&layer_path, text).map_err(|source| OutputError::Io {
        path: layer_path.clone(),
        source,
    })?;

    let mut manifest = load_manifest(dir)?.unwrap_or_else(StoreManifest::empty);
    manifest.layers.retain(|layer| layer.name != layer_name);
    manifest.layers.push(LayerEntry {
        name: layer_name.to_string(),
        file: file_name,
        crs: registry.target_crs.clone(),
        feature_count: registry.features.len(),
    });
    manifest.layers.sort_by(|a, b| a.name.cmp(&b.name));

    let manifest_path = dir.join(STORE_MANIFEST);
    let manifest_text =
        serde_json::to_string_pretty(&manifest).map_err(|source| OutputError::Json {
            path: manifest_path.clone(),
            source,
        })?;
    fs::write(&manifest_path, manifest_text).map_err(|source| OutputError::Io {
        path: manifest_path.clone(),
        source,
    })?;

    info!(
        layer = layer_name,
        features = registry.features.len(),
        path = %layer_path.display(),
        "wrote store layer"
    );
    Ok(layer_path)
}

fn to_feature_collection(registry: &Registry) -> FeatureCollection {
    let features = registry.features.iter().map(to_feature).collect();
    let bbox = eden_model::Bbox::union_all(registry.features.iter().map(|f| f.bounds))
        .map(|b| vec![b.xmin, b.ymin, b.xmax, b.ymax]);
    FeatureCollection {
        bbox,
        features,
        foreign_members: None,
    }
}

fn to_feature(region: &RegionFeature) -> Feature {
    let mut properties = JsonObject::new();
    properties.insert("uid".to_string(), json!(region.uid));
    properties.insert("code".to_string(), json!(region.code));
    properties.insert("name".to_string(), json!(region.name));
    properties.insert("scheme".to_string(), json!(region.scheme));
    properties.insert("level".to_string(), json!(region.level));
    properties.insert("area_km2".to_string(), json!(region.area_km2));
    Feature {
        bbox: Some(vec![
            region.bounds.xmin,
            region.bounds.ymin,
            region.bounds.xmax,
            region.bounds.ymax,
        ]),
        geometry: Some(Geometry::new(geojson::Value::from(&region.geometry))),
        id: Some(geojson::feature::Id::String(region.uid.clone())),
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eden_model::Bbox;
    use geo::{MultiPolygon, polygon};

    fn registry() -> Registry {
        let geometry = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ]]);
        Registry {
            features: vec![RegionFeature {
                uid: "eco_l3_07".to_string(),
                scheme: "EPA_US".to_string(),
                level: 3,
                code: "7".to_string(),
                name: "Central Valley".to_string(),
                area_km2: 12.5,
                geometry,
                bounds: Bbox {
                    xmin: 0.0,
                    ymin: 0.0,
                    xmax: 1.0,
                    ymax: 1.0,
                },
            }],
            code_field: "US_L3CODE".to_string(),
            repairs: Vec::new(),
            target_crs: "EPSG:4326".to_string(),
        }
    }

    #[test]
    fn writing_a_layer_creates_file_and_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_layer(dir.path(), "epa_us_l3", &registry()).expect("write");
        assert!(path.exists());

        let manifest = load_manifest(dir.path()).expect("load").expect("exists");
        assert_eq!(manifest.version, STORE_VERSION);
        let layer = manifest.layer("epa_us_l3").expect("layer entry");
        assert_eq!(layer.feature_count, 1);
        assert_eq!(layer.crs, "EPSG:4326");

        let text = fs::read_to_string(&path).expect("read layer");
        let collection: FeatureCollection = text.parse().expect("valid geojson");
        assert_eq!(collection.features.len(), 1);
        let props = collection.features[0].properties.as_ref().expect("props");
        assert_eq!(props["code"], json!("7"));
        assert_eq!(props["area_km2"], json!(12.5));
    }

    #[test]
    fn rewriting_a_layer_replaces_its_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_layer(dir.path(), "epa_us_l3", &registry()).expect("first write");
        write_layer(dir.path(), "epa_us_l3", &registry()).expect("second write");
        let manifest = load_manifest(dir.path()).expect("load").expect("exists");
        assert_eq!(manifest.layers.len(), 1);
    }

    #[test]
    fn missing_store_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_manifest(dir.path()).expect("load").is_none());
    }
}
