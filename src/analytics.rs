//! Pure transforms from backend aggregate maps to render-ready sequences.
//!
//! The backend defines the iteration order of both maps (ranking is
//! positional); nothing here re-sorts. Empty or non-object input produces an
//! empty sequence, which the consuming view renders as an explicit
//! "no data yet" state rather than an empty chart.

use serde::Serialize;
use serde_json::Value;

use crate::types::SentimentTone;

/// One bar of the sentiment distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentBar {
    pub label: String,
    pub count: u64,
    pub color_tag: SentimentTone,
}

/// One row of the ranked tag list. `rank` is the 1-based position in the
/// backend's iteration order, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTag {
    pub tag: String,
    pub count: u64,
    pub rank: usize,
}

/// Transform `sentiment_distribution` (label -> count) into an ordered bar
/// series, colored by label equality.
pub fn sentiment_bars(distribution: &Value) -> Vec<SentimentBar> {
    let Some(map) = distribution.as_object() else {
        return Vec::new();
    };
    map.iter()
        .map(|(label, count)| SentimentBar {
            label: label.clone(),
            count: count.as_u64().unwrap_or(0),
            color_tag: SentimentTone::from_label(label),
        })
        .collect()
}

/// Transform `top_tags` (tag -> count) into a positionally ranked list.
pub fn ranked_tags(top_tags: &Value) -> Vec<RankedTag> {
    let Some(map) = top_tags.as_object() else {
        return Vec::new();
    };
    map.iter()
        .enumerate()
        .map(|(index, (tag, count))| RankedTag {
            tag: tag.clone(),
            count: count.as_u64().unwrap_or(0),
            rank: index + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentiment_bars_preserve_backend_order_and_colors() {
        // Deliberately not alphabetical; order must pass through as given.
        let distribution = json!({"Neutral": 4, "Positive": 9, "Negative": 2});
        let bars = sentiment_bars(&distribution);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].label, "Neutral");
        assert_eq!(bars[0].color_tag, SentimentTone::Neutral);
        assert_eq!(bars[1].label, "Positive");
        assert_eq!(bars[1].count, 9);
        assert_eq!(bars[1].color_tag, SentimentTone::Positive);
        assert_eq!(bars[2].color_tag, SentimentTone::Negative);
    }

    #[test]
    fn test_unknown_label_renders_neutral() {
        let bars = sentiment_bars(&json!({"Mixed": 1}));
        assert_eq!(bars[0].color_tag, SentimentTone::Neutral);
    }

    #[test]
    fn test_ranked_tags_are_positional_not_count_sorted() {
        // Backend order is trusted as-is, even when counts disagree with it.
        let top_tags = json!({"pricing": 3, "sales": 11, "urgent": 7});
        let ranked = ranked_tags(&top_tags);
        assert_eq!(ranked.len(), 3);
        assert_eq!((ranked[0].tag.as_str(), ranked[0].rank), ("pricing", 1));
        assert_eq!((ranked[1].tag.as_str(), ranked[1].rank), ("sales", 2));
        assert_eq!((ranked[2].tag.as_str(), ranked[2].rank), ("urgent", 3));
        assert_eq!(ranked[1].count, 11);
    }

    #[test]
    fn test_empty_maps_produce_empty_sequences() {
        assert!(sentiment_bars(&json!({})).is_empty());
        assert!(ranked_tags(&json!({})).is_empty());
    }

    #[test]
    fn test_non_object_input_produces_empty_sequences() {
        // The empty-database analytics payload ships top_tags as [].
        assert!(ranked_tags(&json!([])).is_empty());
        assert!(sentiment_bars(&Value::Null).is_empty());
    }
}
