use measurements::{Length, Volume};
use thiserror::Error;

use crate::tank::Tank;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
  #[error("reference level must be a positive length, got {0} mm")]
  InvalidLevel(f64),
  #[error("reference volume must be a positive volume, got {0} m³")]
  InvalidVolume(f64),
}

/// Conversion between fill height and contained volume of a single tank,
/// derived from one known (level, volume) reference pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
  reference_level: Length,
  reference_volume: Volume,
}

impl Calibration {
  pub fn new(reference_level: Length, reference_volume: Volume) -> Result<Self, CalibrationError> {
    let millimeters = reference_level.as_millimeters();
    if !millimeters.is_finite() || millimeters <= 0.0 {
      return Err(CalibrationError::InvalidLevel(millimeters))
    }

    let cubic_meters = reference_volume.as_cubic_meters();
    if !cubic_meters.is_finite() || cubic_meters <= 0.0 {
      return Err(CalibrationError::InvalidVolume(cubic_meters))
    }

    Ok(Self { reference_level, reference_volume })
  }

  /// Uses the full tank as the reference pair.
  pub fn from_tank<T: Tank>(tank: &T) -> Result<Self, CalibrationError> {
    Self::new(tank.height(), tank.volume())
  }

  pub fn reference_level(&self) -> Length {
    self.reference_level
  }

  pub fn reference_volume(&self) -> Volume {
    self.reference_volume
  }

  /// Millimeters of level per cubic meter of volume.
  pub fn ratio(&self) -> f64 {
    self.reference_level.as_millimeters() / self.reference_volume.as_cubic_meters()
  }
}

/// A named tank calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct TankProfile {
  pub name: String,
  pub calibration: Calibration,
}

impl TankProfile {
  pub fn new(name: impl Into<String>, calibration: Calibration) -> Self {
    Self { name: name.into(), calibration }
  }
}
