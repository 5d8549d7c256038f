//! Catalog region specs and finished registry features.

use geo::MultiPolygon;
use serde::{Deserialize, Deserializer, Serialize};

use crate::code::RawCode;

/// Bounding box as (xmin, ymin, xmax, ymax).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Bbox {
    /// Coerce a `[xmin, ymin, xmax, ymax]` slice into a bbox. Returns `None`
    /// unless exactly four finite values are present.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [xmin, ymin, xmax, ymax] if values.iter().all(|v| v.is_finite()) => Some(Self {
                xmin: *xmin,
                ymin: *ymin,
                xmax: *xmax,
                ymax: *ymax,
            }),
            _ => None,
        }
    }

    /// The smallest bbox containing both inputs.
    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox {
            xmin: self.xmin.min(other.xmin),
            ymin: self.ymin.min(other.ymin),
            xmax: self.xmax.max(other.xmax),
            ymax: self.ymax.max(other.ymax),
        }
    }

    /// Union of all bboxes in the iterator, or `None` when empty.
    pub fn union_all(bboxes: impl IntoIterator<Item = Bbox>) -> Option<Bbox> {
        bboxes.into_iter().reduce(|acc, b| acc.union(&b))
    }

    /// Readable `[xmin, ymin, xmax, ymax]` rendering with fixed precision.
    pub fn format(&self, precision: usize) -> String {
        format!(
            "[{:.p$}, {:.p$}, {:.p$}, {:.p$}]",
            self.xmin,
            self.ymin,
            self.xmax,
            self.ymax,
            p = precision
        )
    }
}

/// One region the catalog says should exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    /// Stable catalog-assigned identifier, independent of source-file code
    /// formatting.
    pub uid: String,
    /// Raw code as written in the catalog; normalized before any comparison.
    #[serde(default)]
    pub code: Option<RawCode>,
    /// Taxonomy this region belongs to (e.g. "EPA_US").
    pub scheme: String,
    /// Granularity tier within the scheme.
    #[serde(deserialize_with = "deserialize_level")]
    pub level: i64,
    #[serde(default)]
    pub name: Option<String>,
    /// Hand-maintained fallback bounds; the computed bounds table is
    /// authoritative once it exists.
    #[serde(default)]
    pub bounds: Option<Vec<f64>>,
}

impl RegionSpec {
    /// The manual bounds entry as a bbox, if present and well-formed.
    pub fn bounds_bbox(&self) -> Option<Bbox> {
        self.bounds.as_deref().and_then(Bbox::from_slice)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// A finished registry row: one valid (multi)polygon per uid, owned
/// exclusively by the registry writer. Downstream consumers treat it
/// read-only.
#[derive(Debug, Clone)]
pub struct RegionFeature {
    pub uid: String,
    pub scheme: String,
    pub level: i64,
    /// Normalized code.
    pub code: String,
    pub name: String,
    pub area_km2: f64,
    pub geometry: MultiPolygon<f64>,
    /// Bounds in the output CRS.
    pub bounds: Bbox,
}

/// Catalogs sometimes quote levels ("3") and sometimes write bare integers.
fn deserialize_level<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLevel {
        Int(i64),
        Text(String),
    }
    match RawLevel::deserialize(deserializer)? {
        RawLevel::Int(value) => Ok(value),
        RawLevel::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid level: {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_coercion_rejects_bad_shapes() {
        assert!(Bbox::from_slice(&[0.0, 1.0, 2.0]).is_none());
        assert!(Bbox::from_slice(&[0.0, 1.0, 2.0, f64::NAN]).is_none());
        let b = Bbox::from_slice(&[-125.0, 32.0, -114.0, 42.0]).expect("valid bbox");
        assert_eq!(b.xmax, -114.0);
    }

    #[test]
    fn bbox_union_covers_both() {
        let a = Bbox {
            xmin: 0.0,
            ymin: 0.0,
            xmax: 2.0,
            ymax: 2.0,
        };
        let b = Bbox {
            xmin: -1.0,
            ymin: 1.0,
            xmax: 1.0,
            ymax: 3.0,
        };
        let u = a.union(&b);
        assert_eq!((u.xmin, u.ymin, u.xmax, u.ymax), (-1.0, 0.0, 2.0, 3.0));
        assert_eq!(Bbox::union_all([a, b]), Some(u));
        assert_eq!(Bbox::union_all([]), None);
    }

    #[test]
    fn bbox_formats_with_precision() {
        let b = Bbox {
            xmin: -120.123456,
            ymin: 35.5,
            xmax: -119.0,
            ymax: 36.25,
        };
        assert_eq!(b.format(2), "[-120.12, 35.50, -119.00, 36.25]");
    }
}
