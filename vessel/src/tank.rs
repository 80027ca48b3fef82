use measurements::{Length, Volume};

pub trait Tank {
  fn height(&self) -> Length;
  fn volume(&self) -> Volume;
}
