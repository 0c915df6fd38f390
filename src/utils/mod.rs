pub mod logging;
pub mod time;

pub use time::{elapsed, local_hour, Millis};
