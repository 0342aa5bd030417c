mod compaction_error;
mod extraction_error;
mod minutes_error;
mod provider_error;

pub use compaction_error::{CompactionError, CompactionLevel};
pub use extraction_error::ExtractionError;
pub use minutes_error::{MinutesError, MinutesResult};
pub use provider_error::ProviderError;
