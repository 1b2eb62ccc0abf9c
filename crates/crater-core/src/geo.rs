//! Pixel to latitude/longitude projection.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::consts::{PLACEHOLDER_LATITUDE_RANGE, PLACEHOLDER_LONGITUDE_RANGE};
use crate::error::{CraterError, Result};
use crate::frame::ImageMetadata;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Maps a pixel of an analyzed image to planetary coordinates.
pub trait GeoProjector: Send + Sync {
    fn pixel_to_geo(&self, meta: &ImageMetadata, x: f64, y: f64) -> GeoPoint;
}

/// Uniformly random coordinates, independent of the pixel.
///
/// Stands in until real image footprints are available. With a seed, the
/// output for a given image id and pixel is reproducible.
#[derive(Clone, Debug, Default)]
pub struct PlaceholderProjector {
    pub seed: Option<u64>,
}

impl GeoProjector for PlaceholderProjector {
    fn pixel_to_geo(&self, meta: &ImageMetadata, x: f64, y: f64) -> GeoPoint {
        let (lat_lo, lat_hi) = PLACEHOLDER_LATITUDE_RANGE;
        let (lon_lo, lon_hi) = PLACEHOLDER_LONGITUDE_RANGE;
        match self.seed {
            Some(seed) => {
                let mut hasher = DefaultHasher::new();
                seed.hash(&mut hasher);
                meta.image_id.hash(&mut hasher);
                x.to_bits().hash(&mut hasher);
                y.to_bits().hash(&mut hasher);
                let mut rng = StdRng::seed_from_u64(hasher.finish());
                GeoPoint {
                    latitude: rng.random_range(lat_lo..=lat_hi),
                    longitude: rng.random_range(lon_lo..=lon_hi),
                }
            }
            None => {
                let mut rng = rand::rng();
                GeoPoint {
                    latitude: rng.random_range(lat_lo..=lat_hi),
                    longitude: rng.random_range(lon_lo..=lon_hi),
                }
            }
        }
    }
}

/// Linear mapping onto a known rectangular footprint.
///
/// Pixel (0, 0) is the north-west corner; the far edge of the last pixel is
/// the south-east corner.
#[derive(Clone, Copy, Debug)]
pub struct BoundsProjector {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl GeoProjector for BoundsProjector {
    fn pixel_to_geo(&self, meta: &ImageMetadata, x: f64, y: f64) -> GeoPoint {
        let fx = if meta.width > 0 { x / meta.width as f64 } else { 0.0 };
        let fy = if meta.height > 0 { y / meta.height as f64 } else { 0.0 };
        GeoPoint {
            latitude: self.north + (self.south - self.north) * fy,
            longitude: self.west + (self.east - self.west) * fx,
        }
    }
}

/// Serializable choice of projector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GeolocationConfig {
    Placeholder {
        #[serde(default)]
        seed: Option<u64>,
    },
    Bounds {
        north: f64,
        south: f64,
        west: f64,
        east: f64,
    },
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self::Placeholder { seed: None }
    }
}

impl std::fmt::Display for GeolocationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Placeholder { seed: None } => write!(f, "Placeholder (random)"),
            Self::Placeholder { seed: Some(s) } => write!(f, "Placeholder (seed {s})"),
            Self::Bounds {
                north,
                south,
                west,
                east,
            } => write!(f, "Bounds (N {north}, S {south}, W {west}, E {east})"),
        }
    }
}

impl GeolocationConfig {
    pub fn build(&self) -> Result<Box<dyn GeoProjector>> {
        match *self {
            Self::Placeholder { seed } => Ok(Box::new(PlaceholderProjector { seed })),
            Self::Bounds {
                north,
                south,
                west,
                east,
            } => {
                let valid_lat = |v: f64| (-90.0..=90.0).contains(&v);
                let valid_lon = |v: f64| (-180.0..=180.0).contains(&v);
                if !(valid_lat(north) && valid_lat(south) && valid_lon(west) && valid_lon(east)) {
                    return Err(CraterError::InvalidParameter(format!(
                        "footprint bounds out of range: N {north} S {south} W {west} E {east}"
                    )));
                }
                Ok(Box::new(BoundsProjector {
                    north,
                    south,
                    west,
                    east,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn meta() -> ImageMetadata {
        ImageMetadata {
            image_id: "moon.png".into(),
            width: 100,
            height: 50,
        }
    }

    #[test]
    fn test_placeholder_in_range() {
        let projector = PlaceholderProjector::default();
        for i in 0..50 {
            let p = projector.pixel_to_geo(&meta(), i as f64, 0.0);
            assert!((-90.0..=90.0).contains(&p.latitude));
            assert!((-180.0..=180.0).contains(&p.longitude));
        }
    }

    #[test]
    fn test_seeded_placeholder_is_reproducible() {
        let projector = PlaceholderProjector { seed: Some(42) };
        let a = projector.pixel_to_geo(&meta(), 10.0, 20.0);
        let b = projector.pixel_to_geo(&meta(), 10.0, 20.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounds_corners() {
        let projector = BoundsProjector {
            north: 10.0,
            south: -10.0,
            west: 100.0,
            east: 120.0,
        };
        let nw = projector.pixel_to_geo(&meta(), 0.0, 0.0);
        assert_relative_eq!(nw.latitude, 10.0);
        assert_relative_eq!(nw.longitude, 100.0);
        let mid = projector.pixel_to_geo(&meta(), 50.0, 25.0);
        assert_relative_eq!(mid.latitude, 0.0);
        assert_relative_eq!(mid.longitude, 110.0);
    }

    #[test]
    fn test_out_of_range_bounds_rejected() {
        let config = GeolocationConfig::Bounds {
            north: 95.0,
            south: 0.0,
            west: 0.0,
            east: 10.0,
        };
        assert!(config.build().is_err());
    }
}
