mod pattern;

pub use pattern::{Direction, Pattern};
