use chrono::{DateTime, FixedOffset};

use crate::calibration::TankProfile;
use crate::estimate::{estimate_all, TankEstimate};
use crate::input::{validate, RawInput, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub enum State {
  Idle,
  Computed(Vec<TankEstimate>),
  Failed(ValidationError),
}

/// Holds the latest result for a set of tanks, recomputed on every input change.
#[derive(Debug)]
pub struct Session {
  profiles: Vec<TankProfile>,
  state: State,
}

impl Session {
  pub fn new(profiles: Vec<TankProfile>) -> Self {
    Self { profiles, state: State::Idle }
  }

  pub fn profiles(&self) -> &[TankProfile] {
    &self.profiles
  }

  pub fn state(&self) -> &State {
    &self.state
  }

  pub fn update(&mut self, input: &RawInput, now: DateTime<FixedOffset>) -> &State {
    self.state = if input.is_blank() {
      State::Idle
    } else {
      match validate(input) {
        Ok(input) => State::Computed(estimate_all(&input, &self.profiles, now)),
        Err(err) => State::Failed(err),
      }
    };

    log::debug!("Session state: {:?}", self.state);

    &self.state
  }

  /// Drops any previous result.
  pub fn reset(&mut self) {
    self.state = State::Idle;
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use measurements::{Length, Volume};

  use super::*;
  use crate::calibration::Calibration;
  use crate::input::Field;

  fn session() -> Session {
    let calibration = Calibration::new(Length::from_millimeters(1603.0), Volume::from_cubic_meters(2608.214)).unwrap();
    Session::new(vec![TankProfile::new("large", calibration)])
  }

  fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
  }

  #[test]
  fn starts_idle() {
    assert_eq!(session().state(), &State::Idle);
  }

  #[test]
  fn computes_on_valid_input() {
    let mut session = session();

    match session.update(&RawInput::new("1603", "335", "1800"), now()) {
      State::Computed(estimates) => {
        assert_eq!(estimates.len(), 1);
        assert_eq!(estimates[0].estimate.duration_string(), "0:57");
      },
      state => panic!("unexpected state {:?}", state),
    }
  }

  #[test]
  fn failure_clears_previous_result() {
    let mut session = session();
    session.update(&RawInput::new("1603", "335", "1800"), now());

    assert_eq!(session.update(&RawInput::new("1603", "0", "1800"), now()), &State::Failed(ValidationError::InvalidRate));
    assert_eq!(
      session.update(&RawInput::new("1603", "335", ""), now()),
      &State::Failed(ValidationError::MissingField(Field::TargetLevel)),
    );
  }

  #[test]
  fn reset_drops_result() {
    let mut session = session();
    session.update(&RawInput::new("1603", "335", "1800"), now());
    session.reset();

    assert_eq!(session.state(), &State::Idle);
    assert_eq!(session.profiles().len(), 1);
  }

  #[test]
  fn blank_input_returns_to_idle() {
    let mut session = session();
    session.update(&RawInput::new("1603", "335", "1800"), now());

    assert_eq!(session.update(&RawInput::default(), now()), &State::Idle);
  }
}
