//! Record formatting.

use std::fmt::Write;

use chrono::{TimeZone, Utc};

use minutes_core::models::{MinutesRecord, SummarySource};

/// Render a record as Markdown for display or export.
pub fn render_markdown(record: &MinutesRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Minutes: {}", record.subject_name);
    let _ = writeln!(
        out,
        "\n{} to {} ({} minutes, {} transcript segments)",
        format_epoch(record.started_at),
        format_epoch(record.ended_at),
        record.duration_minutes,
        record.transcript_count
    );

    out.push_str("\n## Summary\n\n");
    out.push_str(record.summary.trim());
    out.push('\n');
    if let SummarySource::Template = record.summary_source {
        out.push_str("\n_Generated locally; no provider was available._\n");
    }

    if !record.decisions.is_empty() {
        out.push_str("\n## Decisions\n\n");
        for decision in &record.decisions {
            let _ = writeln!(out, "- {decision}");
        }
    }

    if !record.action_items.is_empty() {
        out.push_str("\n## Action items\n\n");
        for item in &record.action_items {
            let _ = writeln!(out, "- [ ] {item}");
        }
    }

    out
}

/// UTC `YYYY-MM-DD HH:MM`, or the raw value if out of range.
fn format_epoch(ms: i64) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => ms.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: SummarySource) -> MinutesRecord {
        MinutesRecord {
            session_id: "s1".into(),
            subject_name: "Alice".into(),
            started_at: 0,
            ended_at: 30 * 60_000,
            duration_minutes: 30,
            summary: "We planned the release.".into(),
            summary_source: source,
            decisions: vec!["Ship Monday [release]".into()],
            action_items: vec!["Write notes (owner: Bob)".into()],
            transcript_count: 42,
            section_count: 1,
        }
    }

    #[test]
    fn renders_all_sections() {
        let md = render_markdown(&record(SummarySource::ShortSession));
        assert!(md.starts_with("# Minutes: Alice\n"));
        assert!(md.contains("1970-01-01 00:00 UTC to 1970-01-01 00:30 UTC (30 minutes, 42 transcript segments)"));
        assert!(md.contains("## Decisions\n\n- Ship Monday [release]\n"));
        assert!(md.contains("- [ ] Write notes (owner: Bob)"));
        assert!(!md.contains("Generated locally"));
    }

    #[test]
    fn template_summaries_are_flagged() {
        let md = render_markdown(&record(SummarySource::Template));
        assert!(md.contains("Generated locally"));
    }
}
