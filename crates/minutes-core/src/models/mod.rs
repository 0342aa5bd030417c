mod action_item;
mod decision;
mod degradation_event;
mod meeting_stats;
mod micro_summary;
mod minutes_record;
mod provider_kind;
mod provider_response;
mod session_status;
mod summary_request;
mod transcript_chunk;

pub use action_item::ActionItem;
pub use decision::Decision;
pub use degradation_event::DegradationEvent;
pub use meeting_stats::MeetingStats;
pub use micro_summary::MicroSummary;
pub use minutes_record::{MinutesRecord, SummarySource};
pub use provider_kind::ProviderKind;
pub use provider_response::{ProviderResponse, ResponseFailure};
pub use session_status::SessionStatus;
pub use summary_request::{SummaryRequest, SummaryType};
pub use transcript_chunk::TranscriptChunk;
