use measurements::Length;
use measurements::Volume;

use crate::tank::Tank;

#[derive(Debug, Clone, Copy)]
pub struct CuboidTank {
  length: Length,
  width: Length,
  height: Length,
}

impl CuboidTank {
  pub fn new(length: Length, width: Length, height: Length) -> Self {
    Self { length, width, height }
  }
}

impl Tank for CuboidTank {
  fn height(&self) -> Length {
    self.height
  }

  fn volume(&self) -> Volume {
    Volume::from_liters(self.length.as_decimeters() * self.width.as_decimeters() * self.height.as_decimeters())
  }
}
