use chrono::{DateTime, Duration, FixedOffset};
use measurements::Volume;

use crate::calibration::{Calibration, TankProfile};
use crate::input::ValidatedInput;

const MILLISECONDS_PER_HOUR: f64 = 3_600_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEstimate {
  target_level: f64,
  level_delta: f64,
  volume_delta: Volume,
  hours_needed: f64,
  completion: Option<DateTime<FixedOffset>>,
}

impl CompletionEstimate {
  /// Level in millimeters the estimate is for.
  pub fn target_level(&self) -> f64 {
    self.target_level
  }

  /// Remaining level in millimeters.
  pub fn level_delta(&self) -> f64 {
    self.level_delta
  }

  pub fn volume_delta(&self) -> Volume {
    self.volume_delta
  }

  pub fn hours_needed(&self) -> f64 {
    self.hours_needed
  }

  /// `None` if the instant lies outside the representable date range.
  pub fn completion(&self) -> Option<DateTime<FixedOffset>> {
    self.completion
  }

  /// Remaining time as `H:MM`, rounded to the nearest minute, or `--:--` if it does not fit.
  pub fn duration_string(&self) -> String {
    format_hours(self.hours_needed)
  }

  /// Wall-clock time of completion as `HH:MM`.
  pub fn clock_string(&self) -> String {
    match self.completion {
      Some(completion) => completion.format("%H:%M").to_string(),
      None => "--:--".to_owned(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TankEstimate {
  pub tank: String,
  pub estimate: CompletionEstimate,
}

pub fn format_hours(hours: f64) -> String {
  let minutes = (hours * 60.0).round();
  if !minutes.is_finite() || minutes < 0.0 || minutes >= i64::MAX as f64 {
    return "--:--".to_owned()
  }

  let minutes = minutes as i64;
  format!("{}:{:02}", minutes / 60, minutes % 60)
}

pub fn estimate(input: &ValidatedInput, calibration: &Calibration, now: DateTime<FixedOffset>) -> CompletionEstimate {
  let level_delta = input.target_level() - input.current_level();
  let volume_delta = level_delta / calibration.ratio();
  let hours_needed = volume_delta / input.inflow_rate();

  let completion = Duration::try_milliseconds((hours_needed * MILLISECONDS_PER_HOUR).round() as i64)
    .and_then(|delta| now.checked_add_signed(delta));

  if completion.is_none() {
    log::warn!("Completion after {} h is out of range.", hours_needed);
  }

  CompletionEstimate {
    target_level: input.target_level(),
    level_delta,
    volume_delta: Volume::from_cubic_meters(volume_delta),
    hours_needed,
    completion,
  }
}

/// Evaluates the same input against every tank, one estimate per profile.
pub fn estimate_all(input: &ValidatedInput, profiles: &[TankProfile], now: DateTime<FixedOffset>) -> Vec<TankEstimate> {
  profiles
    .iter()
    .map(|profile| TankEstimate { tank: profile.name.clone(), estimate: estimate(input, &profile.calibration, now) })
    .collect()
}
