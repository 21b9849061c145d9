//! Region resolution: which planning-area polygon contains a cache.
//!
//! Polygons come from a GeoJSON `FeatureCollection` with the region name in a
//! feature property. The set is small (Singapore has 55 planning areas), so
//! lookup is a linear scan in file order.
//!
//! Coordinates are (x, y) = (longitude, latitude) throughout, matching GeoJSON.

use std::path::Path;

use gcscrape_core::{CacheRecord, NO_REGION};
use geo::{Contains, LineString, MultiPolygon, Point, Polygon};
use serde::Deserialize;

use crate::error::ScraperError;

/// One named administrative boundary.
#[derive(Debug, Clone)]
pub struct RegionPolygon {
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

impl RegionPolygon {
    #[must_use]
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        self.geometry.contains(&Point::new(longitude, latitude))
    }
}

/// The loaded polygons, in file order. Read-only for the run.
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    polygons: Vec<RegionPolygon>,
}

impl RegionSet {
    /// Reads a GeoJSON file and builds the region set.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::GeometryIo`] if the file cannot be read.
    /// - [`ScraperError::Geometry`] if it is not a usable `FeatureCollection`.
    pub fn load(path: &Path, name_property: &str) -> Result<Self, ScraperError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScraperError::GeometryIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_geojson_str(&content, name_property)
    }

    /// Builds the region set from GeoJSON text.
    ///
    /// `Polygon` and `MultiPolygon` features are kept; any other geometry is
    /// skipped with a warning. Altitude values in positions are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Geometry`] if the text is not a
    /// `FeatureCollection`, a polygon feature lacks a string `name_property`,
    /// or a ring is malformed.
    pub fn from_geojson_str(content: &str, name_property: &str) -> Result<Self, ScraperError> {
        let collection: FeatureCollection =
            serde_json::from_str(content).map_err(|e| ScraperError::Geometry {
                reason: format!("not a GeoJSON FeatureCollection: {e}"),
            })?;

        let mut polygons = Vec::with_capacity(collection.features.len());
        for (idx, feature) in collection.features.into_iter().enumerate() {
            let geometry = match feature.geometry {
                Some(Geometry::Polygon { coordinates }) => {
                    MultiPolygon::new(vec![to_polygon(&coordinates, idx)?])
                }
                Some(Geometry::MultiPolygon { coordinates }) => MultiPolygon::new(
                    coordinates
                        .iter()
                        .map(|rings| to_polygon(rings, idx))
                        .collect::<Result<Vec<_>, _>>()?,
                ),
                Some(Geometry::Other) | None => {
                    tracing::warn!(idx, "skipping feature without polygon geometry");
                    continue;
                }
            };

            let name = feature
                .properties
                .as_ref()
                .and_then(|props| props.get(name_property))
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| ScraperError::Geometry {
                    reason: format!("feature #{idx} has no string property \"{name_property}\""),
                })?
                .to_owned();

            polygons.push(RegionPolygon { name, geometry });
        }

        if polygons.is_empty() {
            return Err(ScraperError::Geometry {
                reason: "no polygon features found".to_owned(),
            });
        }

        Ok(Self { polygons })
    }

    #[must_use]
    pub fn polygons(&self) -> &[RegionPolygon] {
        &self.polygons
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Name of the first polygon, in load order, containing the record's posted
/// coordinates, or [`NO_REGION`].
#[must_use]
pub fn resolve_region(record: &CacheRecord, polygons: &[RegionPolygon]) -> String {
    polygons
        .iter()
        .find(|p| p.contains(record.longitude, record.latitude))
        .map_or_else(|| NO_REGION.to_owned(), |p| p.name.clone())
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

/// GeoJSON positions are `[lon, lat]` or `[lon, lat, alt]`.
type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    #[serde(other)]
    Other,
}

fn to_polygon(rings: &[Vec<Position>], idx: usize) -> Result<Polygon<f64>, ScraperError> {
    let mut rings = rings.iter().map(|ring| to_ring(ring, idx));
    let exterior = rings.next().ok_or_else(|| ScraperError::Geometry {
        reason: format!("feature #{idx} has a polygon with no rings"),
    })??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn to_ring(ring: &[Position], idx: usize) -> Result<LineString<f64>, ScraperError> {
    if ring.len() < 4 {
        return Err(ScraperError::Geometry {
            reason: format!(
                "feature #{idx} has a ring with {} positions, expected at least 4",
                ring.len()
            ),
        });
    }
    ring.iter()
        .map(|pos| match pos.as_slice() {
            [lon, lat, ..] => Ok((*lon, *lat)),
            _ => Err(ScraperError::Geometry {
                reason: format!("feature #{idx} has a position with fewer than 2 values"),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::from)
}

#[cfg(test)]
#[path = "region_test.rs"]
mod tests;
