pub mod types;
pub mod window;

pub use types::{ChannelId, Sample, CHANNEL_COUNT};
pub use window::{split_sessions, Session, TimeWindow};
