mod engine;
mod ticker;
mod playback;

pub use engine::{Engine, RANDOM_ALIVE_PROBABILITY};
pub use ticker::Ticker;
pub use playback::{Observer, Playback, SubscriptionId};
