mod calibration;
mod cuboid_tank;
mod estimate;
mod input;
mod session;
mod tank;

pub use calibration::{Calibration, CalibrationError, TankProfile};
pub use cuboid_tank::CuboidTank;
pub use estimate::{estimate, estimate_all, format_hours, CompletionEstimate, TankEstimate};
pub use input::{validate, Field, RawInput, ValidatedInput, ValidationError};
pub use session::{Session, State};
pub use tank::Tank;
