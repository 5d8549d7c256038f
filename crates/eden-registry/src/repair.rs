//! Geometry validity repair.
//!
//! Released boundary files routinely contain self-intersections and bad
//! ring winding. Repair runs an ordered list of strategies and records
//! which one produced a valid geometry, so the choice stays auditable per
//! feature instead of being swallowed.

use geo::Validation;
use geo::orient::{Direction, Orient};
use geo::{Area, BooleanOps, MultiPolygon, Polygon};

/// The repair strategy that produced the final geometry, in order of
/// preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairStrategy {
    /// Geometry was already valid; nothing applied.
    None,
    /// Exterior/interior ring winding re-orientation.
    Reorient,
    /// Self-union through the boolean-ops kernel, which re-nodes
    /// self-intersections.
    SelfUnion,
    /// Last resort: drop degenerate rings (fewer than four coordinates or
    /// near-zero area). Lossy; the dropped detail does not come back.
    DropDegenerateRings,
}

impl RepairStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            RepairStrategy::None => "none",
            RepairStrategy::Reorient => "reorient",
            RepairStrategy::SelfUnion => "self-union",
            RepairStrategy::DropDegenerateRings => "drop-degenerate-rings",
        }
    }
}

/// A repaired geometry and the strategy that fixed it.
#[derive(Debug, Clone)]
pub struct Repaired {
    pub geometry: MultiPolygon<f64>,
    pub strategy: RepairStrategy,
}

/// Repair an invalid (multi)polygon, trying each strategy in order until
/// one yields a valid geometry. The final stage always returns; its result
/// may be empty, which callers drop.
pub fn repair(geometry: &MultiPolygon<f64>) -> Repaired {
    if geometry.is_valid() {
        return Repaired {
            geometry: geometry.clone(),
            strategy: RepairStrategy::None,
        };
    }

    let oriented = geometry.orient(Direction::Default);
    if oriented.is_valid() {
        return Repaired {
            geometry: oriented,
            strategy: RepairStrategy::Reorient,
        };
    }

    let unioned = oriented.union(&MultiPolygon::new(vec![]));
    if unioned.is_valid() {
        return Repaired {
            geometry: unioned,
            strategy: RepairStrategy::SelfUnion,
        };
    }

    Repaired {
        geometry: drop_degenerate_rings(&unioned),
        strategy: RepairStrategy::DropDegenerateRings,
    }
}

fn drop_degenerate_rings(geometry: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let mut polygons = Vec::new();
    for polygon in &geometry.0 {
        if polygon.exterior().0.len() < 4 || polygon.unsigned_area() <= f64::EPSILON {
            continue;
        }
        let interiors: Vec<_> = polygon
            .interiors()
            .iter()
            .filter(|ring| ring.0.len() >= 4)
            .cloned()
            .collect();
        polygons.push(Polygon::new(polygon.exterior().clone(), interiors));
    }
    MultiPolygon::new(polygons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn valid_geometry_passes_through_untouched() {
        let square = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 2.0),
        ]]);
        let repaired = repair(&square);
        assert_eq!(repaired.strategy, RepairStrategy::None);
        assert_eq!(repaired.geometry, square);
    }

    #[test]
    fn bowtie_is_repaired_to_a_valid_geometry() {
        // Self-intersecting "bowtie": invalid as drawn.
        let bowtie = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 2.0, y: 0.0),
            (x: 0.0, y: 2.0),
        ]]);
        let repaired = repair(&bowtie);
        assert!(repaired.geometry.is_valid());
        assert_ne!(repaired.strategy, RepairStrategy::None);
        assert!(repaired.geometry.unsigned_area() > 0.0);
    }

    #[test]
    fn degenerate_rings_are_dropped() {
        let sliver = MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
        ]]);
        let stripped = drop_degenerate_rings(&sliver);
        assert!(stripped.0.is_empty());
    }

    #[test]
    fn strategies_have_stable_audit_names() {
        assert_eq!(RepairStrategy::SelfUnion.as_str(), "self-union");
        assert_eq!(
            RepairStrategy::DropDegenerateRings.as_str(),
            "drop-degenerate-rings"
        );
    }
}
