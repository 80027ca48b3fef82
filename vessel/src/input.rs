use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  CurrentLevel,
  InflowRate,
  TargetLevel,
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Field::CurrentLevel => "current level",
      Field::InflowRate => "inflow rate",
      Field::TargetLevel => "target level",
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} is required")]
  MissingField(Field),
  #[error("target level must be above the current level")]
  InvalidTarget,
  #[error("inflow rate must be positive")]
  InvalidRate,
}

/// Field values as entered, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
  pub current_level: Option<String>,
  pub inflow_rate: Option<String>,
  pub target_level: Option<String>,
}

impl RawInput {
  pub fn new(current_level: &str, inflow_rate: &str, target_level: &str) -> Self {
    Self {
      current_level: Some(current_level.to_owned()),
      inflow_rate: Some(inflow_rate.to_owned()),
      target_level: Some(target_level.to_owned()),
    }
  }

  /// Whether no field carries any text at all.
  pub fn is_blank(&self) -> bool {
    [&self.current_level, &self.inflow_rate, &self.target_level]
      .iter()
      .all(|field| field.as_deref().map_or(true, |s| s.trim().is_empty()))
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedInput {
  current_level: f64,
  inflow_rate: f64,
  target_level: f64,
}

impl ValidatedInput {
  /// Level in millimeters.
  pub fn current_level(&self) -> f64 {
    self.current_level
  }

  /// Rate in cubic meters per hour.
  pub fn inflow_rate(&self) -> f64 {
    self.inflow_rate
  }

  /// Level in millimeters.
  pub fn target_level(&self) -> f64 {
    self.target_level
  }
}

fn parse_field(value: Option<&str>, field: Field) -> Result<f64, ValidationError> {
  value
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .and_then(|s| s.parse::<f64>().ok())
    .filter(|n| n.is_finite())
    .ok_or(ValidationError::MissingField(field))
}

pub fn validate(input: &RawInput) -> Result<ValidatedInput, ValidationError> {
  let current_level = parse_field(input.current_level.as_deref(), Field::CurrentLevel)?;
  let inflow_rate = parse_field(input.inflow_rate.as_deref(), Field::InflowRate)?;
  let target_level = parse_field(input.target_level.as_deref(), Field::TargetLevel)?;

  if target_level <= current_level {
    return Err(ValidationError::InvalidTarget)
  }

  if inflow_rate <= 0.0 {
    return Err(ValidationError::InvalidRate)
  }

  Ok(ValidatedInput { current_level, inflow_rate, target_level })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid() {
    let input = validate(&RawInput::new("1603", " 335 ", "1800.5")).unwrap();
    assert_eq!(input.current_level(), 1603.0);
    assert_eq!(input.inflow_rate(), 335.0);
    assert_eq!(input.target_level(), 1800.5);
  }

  #[test]
  fn missing_field_wins_over_other_checks() {
    let input = RawInput { current_level: Some("1800".into()), inflow_rate: Some("-1".into()), target_level: None };
    assert_eq!(validate(&input), Err(ValidationError::MissingField(Field::TargetLevel)));

    assert_eq!(validate(&RawInput::new("", "0", "10")), Err(ValidationError::MissingField(Field::CurrentLevel)));
    assert_eq!(validate(&RawInput::new("5", "  ", "1")), Err(ValidationError::MissingField(Field::InflowRate)));
  }

  #[test]
  fn unparseable_is_missing() {
    assert_eq!(validate(&RawInput::new("abc", "1", "10")), Err(ValidationError::MissingField(Field::CurrentLevel)));
    assert_eq!(validate(&RawInput::new("1", "inf", "10")), Err(ValidationError::MissingField(Field::InflowRate)));
    assert_eq!(validate(&RawInput::new("1", "1", "NaN")), Err(ValidationError::MissingField(Field::TargetLevel)));
  }

  #[test]
  fn target_not_above_current() {
    assert_eq!(validate(&RawInput::new("1800", "335", "1800")), Err(ValidationError::InvalidTarget));
    assert_eq!(validate(&RawInput::new("1800", "335", "1700")), Err(ValidationError::InvalidTarget));
    assert_eq!(validate(&RawInput::new("1800", "-5", "1700")), Err(ValidationError::InvalidTarget));
  }

  #[test]
  fn non_positive_rate() {
    assert_eq!(validate(&RawInput::new("1603", "0", "1800")), Err(ValidationError::InvalidRate));
    assert_eq!(validate(&RawInput::new("1603", "-335", "1800")), Err(ValidationError::InvalidRate));
  }

  #[test]
  fn blank() {
    assert!(RawInput::default().is_blank());
    assert!(RawInput::new("", " ", "").is_blank());
    assert!(!RawInput::new("", "1", "").is_blank());
  }

  #[test]
  fn messages() {
    assert_eq!(ValidationError::MissingField(Field::InflowRate).to_string(), "inflow rate is required");
    assert_eq!(ValidationError::InvalidTarget.to_string(), "target level must be above the current level");
  }
}
