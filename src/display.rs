use serde_json::{json, Value};
use vessel::{State, TankEstimate, TankProfile};

fn round_1(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

pub fn estimate_line(estimate: &TankEstimate) -> String {
  let TankEstimate { tank, estimate } = estimate;

  format!(
    "{}: {} mm at {} (in {}, +{:.1} m³)",
    tank,
    estimate.target_level(),
    estimate.clock_string(),
    estimate.duration_string(),
    round_1(estimate.volume_delta().as_cubic_meters()),
  )
}

pub fn tank_line(profile: &TankProfile) -> String {
  let calibration = &profile.calibration;

  format!(
    "{}: {:.6} mm/m³ ({} mm at {:.1} m³)",
    profile.name,
    calibration.ratio(),
    round_1(calibration.reference_level().as_millimeters()),
    round_1(calibration.reference_volume().as_cubic_meters()),
  )
}

pub fn estimates_json(estimates: &[TankEstimate]) -> Value {
  Value::Array(
    estimates
      .iter()
      .map(|TankEstimate { tank, estimate }| {
        json!({
          "tank": tank,
          "target_level_mm": estimate.target_level(),
          "level_delta_mm": estimate.level_delta(),
          "volume_delta_m3": estimate.volume_delta().as_cubic_meters(),
          "hours_needed": estimate.hours_needed(),
          "completion": estimate.completion().map(|completion| completion.to_rfc3339()),
          "clock": estimate.clock_string(),
          "duration": estimate.duration_string(),
        })
      })
      .collect(),
  )
}

pub fn state_lines(state: &State) -> Vec<String> {
  match state {
    State::Idle => vec!["waiting for input".to_owned()],
    State::Computed(estimates) => estimates.iter().map(estimate_line).collect(),
    State::Failed(err) => vec![format!("error: {}", err)],
  }
}
