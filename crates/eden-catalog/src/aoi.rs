//! AOI bounds resolution from the catalog.
//!
//! These are the hand-maintained fallback bounds. The computed bounds table
//! written by the registry is the canonical source; callers should consult
//! it first and only fall back here when the table does not yet exist.

use eden_model::Bbox;

use crate::loader::Catalog;

/// Resolve an AOI bbox from the catalog: top-level `bounds:` when present,
/// otherwise the union of per-region `bounds:` entries. Returns `None` when
/// no valid bounds exist anywhere.
pub fn aoi_from_catalog(catalog: &Catalog) -> Option<Bbox> {
    if let Some(bbox) = catalog.bounds.as_deref().and_then(Bbox::from_slice) {
        return Some(bbox);
    }
    Bbox::union_all(
        catalog
            .regions
            .iter()
            .filter_map(eden_model::RegionSpec::bounds_bbox),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use eden_model::{RawCode, RegionSpec};

    fn spec_with_bounds(uid: &str, bounds: Option<Vec<f64>>) -> RegionSpec {
        RegionSpec {
            uid: uid.to_string(),
            code: Some(RawCode::Int(1)),
            scheme: "EPA_US".to_string(),
            level: 3,
            name: None,
            bounds,
        }
    }

    #[test]
    fn top_level_bounds_win() {
        let catalog = Catalog {
            bounds: Some(vec![-125.0, 32.0, -114.0, 42.0]),
            regions: vec![spec_with_bounds("r1", Some(vec![0.0, 0.0, 1.0, 1.0]))],
        };
        let bbox = aoi_from_catalog(&catalog).expect("aoi");
        assert_eq!(bbox.xmin, -125.0);
    }

    #[test]
    fn per_region_bounds_union_as_fallback() {
        let catalog = Catalog {
            bounds: None,
            regions: vec![
                spec_with_bounds("a", Some(vec![0.0, 0.0, 2.0, 2.0])),
                spec_with_bounds("b", Some(vec![-1.0, 1.0, 1.0, 3.0])),
                spec_with_bounds("c", None),
            ],
        };
        let bbox = aoi_from_catalog(&catalog).expect("aoi");
        assert_eq!(
            (bbox.xmin, bbox.ymin, bbox.xmax, bbox.ymax),
            (-1.0, 0.0, 2.0, 3.0)
        );
    }

    #[test]
    fn no_bounds_anywhere_resolves_to_none() {
        let catalog = Catalog {
            bounds: Some(vec![1.0, 2.0]),
            regions: vec![spec_with_bounds("a", None)],
        };
        assert!(aoi_from_catalog(&catalog).is_none());
    }
}
