pub mod console;
pub mod controller;
pub mod loop_worker;

pub use console::{run_console, ConsoleCommand};
pub use controller::DeviceController;
pub use loop_worker::{DeviceInputs, LoopSettings, TICK_INTERVAL_MS};
