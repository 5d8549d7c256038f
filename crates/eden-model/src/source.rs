//! In-memory representation of an external polygon source.

use std::collections::BTreeMap;

use geo::MultiPolygon;

use crate::attr::AttrValue;

/// One polygon record from the external geometry source: an arbitrary
/// attribute table plus exactly one (multi)polygon, possibly invalid.
#[derive(Debug, Clone)]
pub struct SourceFeature {
    pub attrs: BTreeMap<String, AttrValue>,
    pub geometry: MultiPolygon<f64>,
}

impl SourceFeature {
    /// Attribute lookup; absent columns read as an explicit [`AttrValue::Null`].
    pub fn attr(&self, column: &str) -> &AttrValue {
        self.attrs.get(column).unwrap_or(&AttrValue::Null)
    }
}

/// A fully read geometry source. The CRS is mandatory: area and bounds are
/// geometrically meaningless without one, so readers fail before producing a
/// collection that lacks it.
#[derive(Debug, Clone)]
pub struct SourceCollection {
    pub features: Vec<SourceFeature>,
    /// CRS definition (EPSG code or WKT) taken from the source.
    pub crs: String,
    /// Attribute column names in source order.
    pub columns: Vec<String>,
}

impl SourceCollection {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }
}
