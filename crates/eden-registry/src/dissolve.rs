//! Dissolving multi-part regions into one feature per uid.
//!
//! External sources often represent one logical region as several disjoint
//! polygon parts. Dissolve unions all parts sharing a uid; only the
//! canonical attributes survive, which callers re-attach from the catalog.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use geo::{BooleanOps, MultiPolygon};

/// Union all geometries sharing a uid. A uid with a single part comes back
/// unchanged.
pub fn dissolve_by_uid(
    parts: Vec<(String, MultiPolygon<f64>)>,
) -> BTreeMap<String, MultiPolygon<f64>> {
    let mut grouped: BTreeMap<String, MultiPolygon<f64>> = BTreeMap::new();
    for (uid, geometry) in parts {
        match grouped.entry(uid) {
            Entry::Occupied(mut slot) => {
                let merged = slot.get().union(&geometry);
                *slot.get_mut() = merged;
            }
            Entry::Vacant(slot) => {
                slot.insert(geometry);
            }
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, polygon};

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]])
    }

    #[test]
    fn single_part_is_unchanged() {
        let original = square(0.0, 0.0, 2.0);
        let dissolved = dissolve_by_uid(vec![("r1".to_string(), original.clone())]);
        assert_eq!(dissolved.len(), 1);
        assert_eq!(dissolved["r1"], original);
    }

    #[test]
    fn disjoint_parts_become_one_multipolygon() {
        let dissolved = dissolve_by_uid(vec![
            ("r1".to_string(), square(0.0, 0.0, 1.0)),
            ("r1".to_string(), square(5.0, 5.0, 1.0)),
        ]);
        assert_eq!(dissolved.len(), 1);
        assert_eq!(dissolved["r1"].0.len(), 2);
        assert!((dissolved["r1"].unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn adjacent_parts_merge() {
        let dissolved = dissolve_by_uid(vec![
            ("r1".to_string(), square(0.0, 0.0, 1.0)),
            ("r1".to_string(), square(1.0, 0.0, 1.0)),
        ]);
        // Shared edge disappears; one polygon with the combined area.
        assert!((dissolved["r1"].unsigned_area() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn distinct_uids_stay_separate() {
        let dissolved = dissolve_by_uid(vec![
            ("r1".to_string(), square(0.0, 0.0, 1.0)),
            ("r2".to_string(), square(5.0, 5.0, 1.0)),
        ]);
        assert_eq!(dissolved.len(), 2);
    }
}
