pub mod behavior;
pub mod effects;
pub mod feedback;
pub mod snapshot;
pub mod tick;

pub use behavior::DeviceBehaviorEngine;
pub use effects::{EffectDispatcher, FaceSink, LogFace};
pub use feedback::{feed_reaction, touch_reaction, Reaction};
pub use snapshot::DeviceSnapshot;
pub use tick::{TickInput, TickOutput};
