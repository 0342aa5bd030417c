use async_trait::async_trait;

use crate::errors::MinutesResult;
use crate::models::{ProviderKind, ProviderResponse, SummaryRequest};

/// One external text-generation service.
///
/// Each implementation owns its prompt templating and response shape and
/// reports back only the uniform [`ProviderResponse`] / summary text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Which backend this is. Providers are keyed by kind in the orchestrator.
    fn kind(&self) -> ProviderKind;

    /// Human-readable provider name.
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Answer a free-form question against the supplied session context.
    async fn answer_question(&self, question: &str, context: &str)
        -> MinutesResult<ProviderResponse>;

    /// Generate text for a typed summary request.
    ///
    /// A result starting with [`crate::constants::ERROR_PREFIX`] is treated as
    /// a failure by the orchestrator.
    async fn generate_summary(&self, request: &SummaryRequest) -> MinutesResult<String>;
}
