mod clock;
mod provider;
mod sink;

pub use clock::{Clock, SystemClock};
pub use provider::CompletionProvider;
pub use sink::MinutesSink;
