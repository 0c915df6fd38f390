pub mod model;

pub use model::{FeedOutcome, HungerTier, NeedsModel, NEED_MAX};
