//! Equal-area area computation and bounding boxes.

use geo::{Area, BoundingRect, MapCoords, MultiPolygon};
use proj::Proj;

use eden_model::Bbox;

use crate::error::{RegistryError, Result};

/// CONUS Albers, an equal-area projection appropriate for the continental
/// US extent. Other extents should pass a suitable equal-area CRS instead.
pub const DEFAULT_AREA_CRS: &str = "EPSG:5070";

/// WGS84, matching the climate rasters the registry is joined against.
pub const DEFAULT_TARGET_CRS: &str = "EPSG:4326";

/// Reproject a geometry between two CRS definitions (EPSG codes or WKT).
/// Identical definitions short-circuit without touching the transform
/// backend.
pub fn reproject(
    geometry: &MultiPolygon<f64>,
    from: &str,
    to: &str,
) -> Result<MultiPolygon<f64>> {
    if from == to {
        return Ok(geometry.clone());
    }
    let transform =
        Proj::new_known_crs(from, to, None).map_err(|source| RegistryError::ProjCreate {
            from: from.to_string(),
            to: to.to_string(),
            source,
        })?;
    let projected = geometry.try_map_coords(|coord| {
        let (x, y) = transform.convert((coord.x, coord.y))?;
        Ok::<_, proj::ProjError>(geo::Coord { x, y })
    })?;
    Ok(projected)
}

/// Polygon area in km², computed in an equal-area CRS as projected m² over
/// 1,000,000.
pub fn area_km2(geometry: &MultiPolygon<f64>, crs: &str, area_crs: &str) -> Result<f64> {
    let projected = reproject(geometry, crs, area_crs)?;
    Ok(projected.unsigned_area() / 1_000_000.0)
}

/// Bounding box in whatever CRS the geometry is currently in. `None` for
/// empty geometries.
pub fn native_bounds(geometry: &MultiPolygon<f64>) -> Option<Bbox> {
    geometry.bounding_rect().map(|rect| Bbox {
        xmin: rect.min().x,
        ymin: rect.min().y,
        xmax: rect.max().x,
        ymax: rect.max().y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn square() -> MultiPolygon<f64> {
        MultiPolygon::new(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 2000.0, y: 0.0),
            (x: 2000.0, y: 2000.0),
            (x: 0.0, y: 2000.0),
        ]])
    }

    #[test]
    fn same_crs_short_circuits() {
        let geometry = square();
        let projected = reproject(&geometry, "EPSG:5070", "EPSG:5070").expect("reproject");
        assert_eq!(projected, geometry);
    }

    #[test]
    fn area_scales_to_square_km() {
        // 2 km x 2 km in an already-equal-area CRS.
        let area = area_km2(&square(), "EPSG:5070", "EPSG:5070").expect("area");
        assert!((area - 4.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_the_geometry() {
        let bounds = native_bounds(&square()).expect("bounds");
        assert_eq!(
            (bounds.xmin, bounds.ymin, bounds.xmax, bounds.ymax),
            (0.0, 0.0, 2000.0, 2000.0)
        );
        assert!(native_bounds(&MultiPolygon::new(vec![])).is_none());
    }
}
