use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use measurements::{Length, Volume};
use serde::Deserialize;
use vessel::{Calibration, CuboidTank, TankProfile};

lazy_static! {
  static ref DEFAULT_TANKS: Vec<TankConfig> = vec![
    TankConfig {
      name: "large".to_owned(),
      geometry: Geometry::Reference { level_mm: 1603.0, volume_m3: 2608.214 },
    },
    TankConfig {
      name: "small".to_owned(),
      geometry: Geometry::Reference { level_mm: 10487.0, volume_m3: 6663.0 },
    },
  ];
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
  Reference { level_mm: f64, volume_m3: f64 },
  Cuboid { length_cm: f64, width_cm: f64, height_cm: f64 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TankConfig {
  pub name: String,
  #[serde(flatten)]
  pub geometry: Geometry,
}

impl TankConfig {
  pub fn profile(&self) -> Result<TankProfile> {
    let calibration = match self.geometry {
      Geometry::Reference { level_mm, volume_m3 } => {
        Calibration::new(Length::from_millimeters(level_mm), Volume::from_cubic_meters(volume_m3))
      },
      Geometry::Cuboid { length_cm, width_cm, height_cm } => {
        let tank = CuboidTank::new(
          Length::from_centimeters(length_cm),
          Length::from_centimeters(width_cm),
          Length::from_centimeters(height_cm),
        );
        Calibration::from_tank(&tank)
      },
    }
    .with_context(|| format!("Invalid calibration for tank '{}'", self.name))?;

    Ok(TankProfile::new(self.name.clone(), calibration))
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub tanks: Vec<TankConfig>,
}

impl Default for Config {
  fn default() -> Self {
    Self { tanks: DEFAULT_TANKS.clone() }
  }
}

impl Config {
  pub fn load(path: &Path) -> Result<Self> {
    log::info!("Loading configuration from '{}' …", path.display());

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    log::debug!("Loaded {} tank(s).", config.tanks.len());

    Ok(config)
  }

  pub fn parse(content: &str) -> Result<Self> {
    let config: Config = serde_yaml::from_str(content)?;

    if config.tanks.is_empty() {
      bail!("no tanks configured")
    }

    let mut names = HashSet::new();
    if let Some(duplicate) = config.tanks.iter().find(|tank| !names.insert(tank.name.as_str())) {
      bail!("tank '{}' is configured more than once", duplicate.name)
    }

    Ok(config)
  }

  /// Builds the profiles of the selected tanks, or of all tanks if `names` is empty.
  pub fn profiles(&self, names: &[String]) -> Result<Vec<TankProfile>> {
    if let Some(unknown) = names.iter().find(|name| !self.tanks.iter().any(|tank| &tank.name == *name)) {
      bail!("unknown tank '{}'", unknown)
    }

    self
      .tanks
      .iter()
      .filter(|tank| names.is_empty() || names.contains(&tank.name))
      .map(TankConfig::profile)
      .collect()
  }
}
