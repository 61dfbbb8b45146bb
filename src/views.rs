//! Render-ready view models for the webview.
//!
//! Pure builders over already-resolved data: no I/O and no state. The
//! webview renders these verbatim; any logic beyond layout lives here.

use serde::Serialize;

use crate::analytics::{ranked_tags, sentiment_bars, RankedTag, SentimentBar};
use crate::tags::TagEditorView;
use crate::types::{AnalyticsSnapshot, CallRecord, SentimentTone};
use crate::upload::UploadView;

/// Tags shown on a card before collapsing into a "+N" overflow marker.
const CARD_TAG_LIMIT: usize = 3;

/// One entry of the dashboard call list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCardView {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: String,
    pub sentiment_label: String,
    /// Colored by numeric score on the card (the label may still be absent
    /// while analysis runs).
    pub sentiment_tone: SentimentTone,
    pub summary: String,
    pub intent: String,
    /// System tags first, then custom tags; duplicates across the two sets
    /// are tolerated and simply both rendered.
    pub visible_tags: Vec<String>,
    pub overflow_tags: usize,
}

pub fn call_card(record: &CallRecord) -> CallCardView {
    let merged: Vec<String> = record
        .tags
        .iter()
        .chain(record.custom_tags.iter())
        .cloned()
        .collect();
    let overflow = merged.len().saturating_sub(CARD_TAG_LIMIT);
    CallCardView {
        id: record.id,
        filename: record.filename.clone(),
        uploaded_at: record.card_date(),
        sentiment_label: record.sentiment_label().to_string(),
        sentiment_tone: record.sentiment_tone(),
        summary: record.summary_or_placeholder().to_string(),
        intent: record
            .analysis_json
            .intent
            .clone()
            .unwrap_or_else(|| "Unknown Intent".to_string()),
        visible_tags: merged.into_iter().take(CARD_TAG_LIMIT).collect(),
        overflow_tags: overflow,
    }
}

/// The full detail page for one call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDetailView {
    pub id: i64,
    pub filename: String,
    pub uploaded_at: String,
    pub file_size_mb: String,
    pub export_url: String,
    pub sentiment_label: String,
    pub sentiment_score: Option<f64>,
    /// Colored by label on the stats grid.
    pub sentiment_tone: SentimentTone,
    pub intent: String,
    pub speaker_roles: Vec<String>,
    pub summary: String,
    pub key_insights: Vec<String>,
    pub transcript: String,
    pub system_tags: Vec<String>,
    pub custom_tags: Vec<String>,
    pub tag_editor: TagEditorView,
}

pub fn call_detail(
    record: &CallRecord,
    export_url: String,
    tag_editor: TagEditorView,
) -> CallDetailView {
    CallDetailView {
        id: record.id,
        filename: record.filename.clone(),
        uploaded_at: record.detail_date(),
        file_size_mb: record.file_size_mb(),
        export_url,
        sentiment_label: record.sentiment_label().to_string(),
        sentiment_score: record.analysis_json.sentiment_score,
        sentiment_tone: SentimentTone::from_label(record.sentiment_label()),
        intent: record
            .analysis_json
            .intent
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        speaker_roles: record.analysis_json.speaker_roles.clone().unwrap_or_default(),
        summary: record.summary_or_placeholder().to_string(),
        key_insights: record.analysis_json.key_insights.clone().unwrap_or_default(),
        transcript: record.transcript.clone().unwrap_or_default(),
        system_tags: record.tags.clone(),
        custom_tags: record.custom_tags.clone(),
        tag_editor,
    }
}

/// The aggregate analytics section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub total_calls: u64,
    pub avg_sentiment: f64,
    /// Display form with an explicit sign for positive averages, e.g. "+0.45".
    pub avg_sentiment_display: String,
    pub sentiment_bars: Vec<SentimentBar>,
    pub ranked_tags: Vec<RankedTag>,
    /// Explicit emptiness signals so the renderer shows "no data yet"
    /// instead of an empty chart.
    pub has_sentiment_data: bool,
    pub has_tag_data: bool,
}

pub fn analytics_view(snapshot: &AnalyticsSnapshot) -> AnalyticsView {
    let bars = sentiment_bars(&snapshot.sentiment_distribution);
    let tags = ranked_tags(&snapshot.top_tags);
    let display = if snapshot.avg_sentiment > 0.0 {
        format!("+{}", snapshot.avg_sentiment)
    } else {
        snapshot.avg_sentiment.to_string()
    };
    AnalyticsView {
        total_calls: snapshot.total_calls,
        avg_sentiment: snapshot.avg_sentiment,
        avg_sentiment_display: display,
        has_sentiment_data: !bars.is_empty(),
        has_tag_data: !tags.is_empty(),
        sentiment_bars: bars,
        ranked_tags: tags,
    }
}

/// Everything the dashboard shell needs on load. `analytics` is `None` when
/// the analytics fetch failed; the section is omitted rather than broken.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub calls: Vec<CallCardView>,
    pub analytics: Option<AnalyticsView>,
    pub upload: UploadView,
}
