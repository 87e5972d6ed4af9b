//! Geometry model shared by the persistence and API layers
//!
//! Geometries travel as GeoJSON objects and are stored as GeoJSON text. All
//! coordinates are expressed in a single fixed spatial reference system
//! (SRID 4326 / WGS84); callers must supply geometry already in that system.
//!
//! The SQL backend delegates spatial predicates to PostGIS. The in-memory
//! backend evaluates them with the `geo` crate, using the standard
//! two-dimensional intersects predicate (shared point, boundary touching
//! included, no buffering or tolerance).

use serde::{Deserialize, Serialize};

/// Spatial reference system for every geometry in the datastore (WGS84).
pub const SRID: u32 = 4326;

/// GeoJSON-shaped geometry.
///
/// Points and line strings describe infrastructure; polygons and
/// multipolygons describe administrative and sensitivity areas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<[f64; 2]>>> },
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point {
            coordinates: [x, y],
        }
    }

    pub fn line_string(coordinates: Vec<[f64; 2]>) -> Self {
        Geometry::LineString { coordinates }
    }

    /// Polygon from a single exterior ring, no holes.
    pub fn polygon(exterior: Vec<[f64; 2]>) -> Self {
        Geometry::Polygon {
            coordinates: vec![exterior],
        }
    }

    pub fn geojson_type(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }

    /// Parse from stored GeoJSON text.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to GeoJSON text for storage.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn to_geo(&self) -> geo::Geometry<f64> {
        fn ring(coords: &[[f64; 2]]) -> geo::LineString<f64> {
            geo::LineString::from(
                coords
                    .iter()
                    .map(|c| (c[0], c[1]))
                    .collect::<Vec<(f64, f64)>>(),
            )
        }
        fn polygon(rings: &[Vec<[f64; 2]>]) -> geo::Polygon<f64> {
            let exterior = rings.first().map(|r| ring(r)).unwrap_or_else(|| ring(&[]));
            let interiors = rings.iter().skip(1).map(|r| ring(r)).collect();
            geo::Polygon::new(exterior, interiors)
        }

        match self {
            Geometry::Point { coordinates } => {
                geo::Geometry::Point(geo::Point::new(coordinates[0], coordinates[1]))
            }
            Geometry::LineString { coordinates } => geo::Geometry::LineString(ring(coordinates)),
            Geometry::Polygon { coordinates } => geo::Geometry::Polygon(polygon(coordinates)),
            Geometry::MultiPolygon { coordinates } => geo::Geometry::MultiPolygon(
                geo::MultiPolygon(coordinates.iter().map(|p| polygon(p)).collect()),
            ),
        }
    }

    /// Two-dimensional intersects predicate, boundary touching included.
    pub fn intersects(&self, other: &Geometry) -> bool {
        use geo::Intersects;

        self.to_geo().intersects(&other.to_geo())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Geometry {
        Geometry::polygon(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ])
    }

    #[test]
    fn test_geojson_roundtrip_point() {
        let point = Geometry::point(5.37, 43.29);
        let json = point.to_json().unwrap();
        assert!(json.contains(r#""type":"Point""#));
        assert_eq!(Geometry::from_json(&json).unwrap(), point);
    }

    #[test]
    fn test_geojson_parse_line_string() {
        let json = r#"{"type":"LineString","coordinates":[[0.0,0.0],[1.0,1.0]]}"#;
        let geom = Geometry::from_json(json).unwrap();
        assert_eq!(geom.geojson_type(), "LineString");
    }

    #[test]
    fn test_geojson_rejects_unknown_type() {
        let json = r#"{"type":"GeometryCollection","geometries":[]}"#;
        assert!(Geometry::from_json(json).is_err());
    }

    #[test]
    fn test_point_inside_polygon_intersects() {
        let point = Geometry::point(0.5, 0.5);
        assert!(point.intersects(&unit_square()));
        assert!(unit_square().intersects(&point));
    }

    #[test]
    fn test_point_outside_polygon_does_not_intersect() {
        let point = Geometry::point(2.0, 2.0);
        assert!(!point.intersects(&unit_square()));
    }

    #[test]
    fn test_boundary_touch_counts_as_intersects() {
        let point = Geometry::point(1.0, 0.5);
        assert!(point.intersects(&unit_square()));
    }

    #[test]
    fn test_line_crossing_polygon_intersects() {
        let line = Geometry::line_string(vec![[-1.0, 0.5], [2.0, 0.5]]);
        assert!(line.intersects(&unit_square()));
    }

    #[test]
    fn test_multipolygon_intersects() {
        let multi = Geometry::MultiPolygon {
            coordinates: vec![
                vec![vec![
                    [10.0, 10.0],
                    [11.0, 10.0],
                    [11.0, 11.0],
                    [10.0, 11.0],
                    [10.0, 10.0],
                ]],
                vec![vec![
                    [0.0, 0.0],
                    [1.0, 0.0],
                    [1.0, 1.0],
                    [0.0, 1.0],
                    [0.0, 0.0],
                ]],
            ],
        };
        assert!(Geometry::point(0.5, 0.5).intersects(&multi));
        assert!(!Geometry::point(5.0, 5.0).intersects(&multi));
    }
}
