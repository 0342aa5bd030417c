//! MinutesGenerator: turns an ended session into a [`MinutesRecord`].

use std::sync::Arc;

use tracing::{debug, warn, Instrument};

use minutes_context::render::condensed_context;
use minutes_context::{CondensedLimits, MeetingContext};
use minutes_core::config::GeneratorConfig;
use minutes_core::errors::{ExtractionError, MinutesError};
use minutes_core::models::{ActionItem, Decision, MinutesRecord, SummaryRequest, SummarySource};
use minutes_observability::minutes_span;
use minutes_observability::tracing_setup::events;
use minutes_providers::{ProviderOrchestrator, SummaryOutcome};

use crate::extraction::{
    merge_action_items, merge_decisions, parse_action_items, parse_decisions, scan_chunks,
};
use crate::summary::{short_session_summary, template_summary};

pub struct MinutesGenerator {
    orchestrator: Arc<ProviderOrchestrator>,
    config: GeneratorConfig,
    limits: CondensedLimits,
}

impl MinutesGenerator {
    pub fn new(
        orchestrator: Arc<ProviderOrchestrator>,
        config: GeneratorConfig,
        limits: CondensedLimits,
    ) -> Self {
        Self {
            orchestrator,
            config,
            limits,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the record for a session that ended at `ended_at` (epoch ms).
    ///
    /// Never fails: provider problems degrade to the templated summary and to
    /// heuristic-only extraction.
    pub async fn generate(&self, ctx: &MeetingContext, ended_at: i64) -> MinutesRecord {
        self.generate_inner(ctx, ended_at)
            .instrument(minutes_span!(ctx.session_id.as_str()))
            .await
    }

    async fn generate_inner(&self, ctx: &MeetingContext, ended_at: i64) -> MinutesRecord {
        let mut ctx = ctx.clone();
        ctx.refresh_duration(ended_at);
        let duration = ctx.duration_minutes();

        let (summary, summary_source, provider_decisions, provider_actions) =
            if duration < self.config.short_session_minutes {
                debug!(duration, "short session, skipping providers");
                let summary =
                    short_session_summary(&ctx.subject_name, &ctx.recent_chunks, self.config.intro_chunks);
                (summary, SummarySource::ShortSession, Vec::new(), Vec::new())
            } else {
                let content = condensed_context(&ctx, self.limits);
                let ((summary, source), (decisions, actions)) = tokio::join!(
                    self.final_summary(&ctx, &content),
                    self.structured_extraction(&content, ended_at),
                );
                (summary, source, decisions, actions)
            };

        let (heuristic_decisions, heuristic_actions) =
            scan_chunks(&ctx.recent_chunks, &ctx.subject_name);
        let decisions = merge_decisions([
            std::mem::take(&mut ctx.decisions),
            provider_decisions,
            heuristic_decisions,
        ]);
        let action_items = merge_action_items([
            std::mem::take(&mut ctx.action_items),
            provider_actions,
            heuristic_actions,
        ]);

        let source_label = match summary_source {
            SummarySource::ShortSession => "short_session",
            SummarySource::Provider { provider } => provider.as_str(),
            SummarySource::Template => "template",
        };
        events::minutes_generated(&ctx.session_id, source_label, decisions.len(), action_items.len());

        MinutesRecord {
            session_id: ctx.session_id,
            subject_name: ctx.subject_name,
            started_at: ctx.start_time,
            ended_at,
            duration_minutes: duration,
            summary,
            summary_source,
            decisions: decisions.iter().map(ToString::to_string).collect(),
            action_items: action_items.iter().map(ToString::to_string).collect(),
            transcript_count: ctx.transcript_count,
            section_count: ctx.section_summaries.len(),
        }
    }

    async fn final_summary(&self, ctx: &MeetingContext, content: &str) -> (String, SummarySource) {
        match self
            .orchestrator
            .try_generate_summary(&SummaryRequest::final_summary(content))
            .await
        {
            Ok(outcome) => (
                outcome.text.trim().to_string(),
                SummarySource::Provider {
                    provider: outcome.provider,
                },
            ),
            Err(e) => {
                warn!(error = %e, "final summary unavailable, using template");
                let summary = template_summary(
                    ctx.duration_minutes(),
                    ctx.transcript_count,
                    &ctx.recent_chunks,
                    self.config.fallback_sample_chars,
                );
                (summary, SummarySource::Template)
            }
        }
    }

    /// Provider-extracted decisions and action items. Empty when disabled,
    /// unconfigured, or the output cannot be parsed.
    async fn structured_extraction(
        &self,
        content: &str,
        timestamp: i64,
    ) -> (Vec<Decision>, Vec<ActionItem>) {
        if !self.config.structured_extraction || !self.orchestrator.is_configured() {
            return (Vec::new(), Vec::new());
        }
        let decision_request = SummaryRequest::decisions(content);
        let action_request = SummaryRequest::action_items(content);
        let (decisions, actions) = tokio::join!(
            self.orchestrator.try_generate_summary(&decision_request),
            self.orchestrator.try_generate_summary(&action_request),
        );
        let decisions = recover(decisions, |text| parse_decisions(text, timestamp));
        let actions = recover(actions, |text| parse_action_items(text, timestamp));
        (decisions, actions)
    }
}

fn recover<T>(
    result: Result<SummaryOutcome, MinutesError>,
    parse: impl FnOnce(&str) -> Result<Vec<T>, ExtractionError>,
) -> Vec<T> {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            debug!(error = %e, "structured extraction unavailable");
            return Vec::new();
        }
    };
    parse(&outcome.text).unwrap_or_else(|e| {
        warn!(provider = %outcome.provider, error = %e, "discarding provider extraction output");
        Vec::new()
    })
}
