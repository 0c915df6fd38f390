pub mod classifier;

pub use classifier::{GestureClassifier, GestureEvent, TouchSession};
