//! GeoJSON geometry as exchanged over the HTTP boundary.
//!
//! Stores keep geometry in their own native representation; the adapters
//! convert with [`Geometry::to_geojson`] on the way in and
//! [`Geometry::from_geojson`] on the way out, and nowhere else.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A coordinate tuple: `[x, y]` or `[x, y, z]`.
pub type Position = Vec<f64>;

/// A GeoJSON geometry object (RFC 7946 §3.1), tagged by its `type` member.
///
/// Foreign members such as a legacy `crs` object are ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
  Point { coordinates: Position },
  MultiPoint { coordinates: Vec<Position> },
  LineString { coordinates: Vec<Position> },
  MultiLineString { coordinates: Vec<Vec<Position>> },
  Polygon { coordinates: Vec<Vec<Position>> },
  MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
  GeometryCollection { geometries: Vec<Geometry> },
}

/// Axis-aligned 2D extent of a geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
  pub min_x: f64,
  pub min_y: f64,
  pub max_x: f64,
  pub max_y: f64,
}

impl Geometry {
  /// Parse GeoJSON text as produced by a spatial store.
  pub fn from_geojson(text: &str) -> serde_json::Result<Self> { serde_json::from_str(text) }

  /// Serialise to compact GeoJSON text for a spatial store.
  pub fn to_geojson(&self) -> serde_json::Result<String> { serde_json::to_string(self) }

  /// The GeoJSON `type` member of this geometry.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Point { .. } => "Point",
      Self::MultiPoint { .. } => "MultiPoint",
      Self::LineString { .. } => "LineString",
      Self::MultiLineString { .. } => "MultiLineString",
      Self::Polygon { .. } => "Polygon",
      Self::MultiPolygon { .. } => "MultiPolygon",
      Self::GeometryCollection { .. } => "GeometryCollection",
    }
  }

  /// Check structural validity: ordinate counts, finite values, minimum
  /// line lengths and closed polygon rings.
  pub fn validate(&self) -> Result<()> {
    match self {
      Self::Point { coordinates } => check_position(coordinates),
      Self::MultiPoint { coordinates } => coordinates.iter().try_for_each(|p| check_position(p)),
      Self::LineString { coordinates } => check_line(coordinates),
      Self::MultiLineString { coordinates } => coordinates.iter().try_for_each(|l| check_line(l)),
      Self::Polygon { coordinates } => check_polygon(coordinates),
      Self::MultiPolygon { coordinates } => {
        coordinates.iter().try_for_each(|p| check_polygon(p))
      }
      Self::GeometryCollection { geometries } => geometries.iter().try_for_each(Self::validate),
    }
  }

  /// The 2D bounding box, or `None` if the geometry has no positions.
  pub fn bbox(&self) -> Option<BoundingBox> {
    let mut extent: Option<BoundingBox> = None;
    self.for_each_position(&mut |p| {
      let (x, y) = match p.as_slice() {
        [x, y, ..] => (*x, *y),
        _ => return,
      };
      extent = Some(match extent {
        None => BoundingBox { min_x: x, min_y: y, max_x: x, max_y: y },
        Some(b) => BoundingBox {
          min_x: b.min_x.min(x),
          min_y: b.min_y.min(y),
          max_x: b.max_x.max(x),
          max_y: b.max_y.max(y),
        },
      });
    });
    extent
  }

  fn for_each_position(&self, f: &mut dyn FnMut(&Position)) {
    match self {
      Self::Point { coordinates } => f(coordinates),
      Self::MultiPoint { coordinates } | Self::LineString { coordinates } => {
        coordinates.iter().for_each(|p| f(p))
      }
      Self::MultiLineString { coordinates } | Self::Polygon { coordinates } => {
        coordinates.iter().flatten().for_each(|p| f(p))
      }
      Self::MultiPolygon { coordinates } => {
        coordinates.iter().flatten().flatten().for_each(|p| f(p))
      }
      Self::GeometryCollection { geometries } => {
        for g in geometries {
          g.for_each_position(f);
        }
      }
    }
  }
}

fn check_position(p: &[f64]) -> Result<()> {
  if !(2..=3).contains(&p.len()) {
    return Err(Error::validation(format!(
      "a position needs 2 or 3 ordinates, got {}",
      p.len()
    )));
  }
  if p.iter().any(|v| !v.is_finite()) {
    return Err(Error::validation("position ordinates must be finite numbers"));
  }
  Ok(())
}

fn check_line(line: &[Position]) -> Result<()> {
  if line.len() < 2 {
    return Err(Error::validation("a line string needs at least 2 positions"));
  }
  line.iter().try_for_each(|p| check_position(p))
}

fn check_polygon(rings: &[Vec<Position>]) -> Result<()> {
  if rings.is_empty() {
    return Err(Error::validation("a polygon needs at least one ring"));
  }
  for ring in rings {
    if ring.len() < 4 {
      return Err(Error::validation("a polygon ring needs at least 4 positions"));
    }
    ring.iter().try_for_each(|p| check_position(p))?;
    if ring.first() != ring.last() {
      return Err(Error::validation("a polygon ring must be closed"));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn square() -> Geometry {
    Geometry::Polygon {
      coordinates: vec![vec![
        vec![30.0, -20.0],
        vec![31.0, -20.0],
        vec![31.0, -19.0],
        vec![30.0, -19.0],
        vec![30.0, -20.0],
      ]],
    }
  }

  #[test]
  fn parses_store_output_with_crs_member() {
    let text = r#"{"type":"Point","crs":{"type":"name","properties":{"name":"EPSG:32736"}},"coordinates":[30.8,-20.07]}"#;
    let g = Geometry::from_geojson(text).unwrap();
    assert_eq!(g, Geometry::Point { coordinates: vec![30.8, -20.07] });
  }

  #[test]
  fn serialises_with_type_tag() {
    let json = serde_json::to_value(square()).unwrap();
    assert_eq!(json["type"], "Polygon");
    assert_eq!(json["coordinates"][0].as_array().unwrap().len(), 5);
  }

  #[test]
  fn collection_uses_geometries_member() {
    let text = r#"{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[1,2]}]}"#;
    let g = Geometry::from_geojson(text).unwrap();
    assert_eq!(g.kind(), "GeometryCollection");
    assert!(g.validate().is_ok());
  }

  #[test]
  fn unknown_type_is_rejected() {
    assert!(Geometry::from_geojson(r#"{"type":"Circle","coordinates":[0,0]}"#).is_err());
  }

  #[test]
  fn validate_accepts_closed_polygon() { assert!(square().validate().is_ok()); }

  #[test]
  fn validate_rejects_open_ring() {
    let g = Geometry::Polygon {
      coordinates: vec![vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
      ]],
    };
    assert!(matches!(g.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn validate_rejects_polygon_without_rings() {
    let g = Geometry::Polygon { coordinates: vec![] };
    assert!(matches!(g.validate(), Err(Error::Validation(m)) if m.contains("ring")));

    let g = Geometry::MultiPolygon { coordinates: vec![vec![]] };
    assert!(matches!(g.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn validate_rejects_short_position() {
    let g = Geometry::Point { coordinates: vec![1.0] };
    assert!(matches!(g.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn validate_rejects_single_point_line() {
    let g = Geometry::LineString { coordinates: vec![vec![1.0, 2.0]] };
    assert!(g.validate().is_err());
  }

  #[test]
  fn bbox_spans_all_positions() {
    let b = square().bbox().unwrap();
    assert_eq!(b, BoundingBox { min_x: 30.0, min_y: -20.0, max_x: 31.0, max_y: -19.0 });
  }

  #[test]
  fn bbox_of_empty_collection_is_none() {
    let g = Geometry::GeometryCollection { geometries: vec![] };
    assert!(g.bbox().is_none());
  }
}
