//! Session aggregates derived from the history store.
//!
//! Everything here is recomputed from scratch on each call; nothing is cached.

use crate::history::HistoryStore;
use crate::models::{HistoryItem, Sentiment};

/// Number of most recent items shown in the trend chart
pub const TREND_WINDOW: usize = 10;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn from_history(history: &HistoryStore) -> Self {
        let mut counts = Self::default();
        for item in history.iter() {
            match item.result.sentiment() {
                Sentiment::Positive => counts.positive += 1,
                Sentiment::Neutral => counts.neutral += 1,
                Sentiment::Negative => counts.negative += 1,
            }
        }
        counts
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Fraction of the total held by `sentiment` (0.0 when empty)
    pub fn share(&self, sentiment: Sentiment) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(sentiment) as f64 / total as f64,
        }
    }
}

/// The most recent [`TREND_WINDOW`] items, oldest first.
pub fn recency_trend(history: &HistoryStore) -> Vec<&HistoryItem> {
    let mut recent: Vec<&HistoryItem> = history.iter().take(TREND_WINDOW).collect();
    recent.reverse();
    recent
}

/// Everything the overview panel draws.
#[derive(Debug)]
pub struct SessionOverview<'a> {
    pub counts: SentimentCounts,
    pub trend: Vec<&'a HistoryItem>,
}

/// `None` for an empty history: there is nothing to chart.
pub fn overview(history: &HistoryStore) -> Option<SessionOverview<'_>> {
    if history.is_empty() {
        return None;
    }
    Some(SessionOverview {
        counts: SentimentCounts::from_history(history),
        trend: recency_trend(history),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;

    fn store_with(sentiments: &[Sentiment]) -> HistoryStore {
        let mut store = HistoryStore::new();
        for (i, sentiment) in sentiments.iter().enumerate() {
            let result =
                AnalysisResult::new(*sentiment, (i * 7 % 101) as i64, "r", vec![], vec![]).unwrap();
            store.append(HistoryItem::new(result, format!("item {}", i)));
        }
        store
    }

    #[test]
    fn test_counts_sum_to_length() {
        use Sentiment::*;
        let store = store_with(&[Positive, Negative, Positive, Neutral, Positive]);
        let counts = SentimentCounts::from_history(&store);

        assert_eq!(counts, SentimentCounts { positive: 3, neutral: 1, negative: 1 });
        assert_eq!(counts.total(), store.len());
    }

    #[test]
    fn test_counts_empty() {
        let counts = SentimentCounts::from_history(&HistoryStore::new());
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.share(Sentiment::Positive), 0.0);
    }

    #[test]
    fn test_shares() {
        use Sentiment::*;
        let counts = SentimentCounts::from_history(&store_with(&[Positive, Positive, Negative, Neutral]));
        assert_eq!(counts.share(Positive), 0.5);
        assert_eq!(counts.share(Negative), 0.25);
        let sum: f64 = Sentiment::ALL.iter().map(|s| counts.share(*s)).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_fewer_than_window() {
        let store = store_with(&[Sentiment::Positive; 4]);
        let texts: Vec<&str> = recency_trend(&store).iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, ["item 0", "item 1", "item 2", "item 3"]);
    }

    #[test]
    fn test_trend_caps_at_window_oldest_first() {
        let store = store_with(&[Sentiment::Neutral; 15]);
        let trend = recency_trend(&store);

        assert_eq!(trend.len(), TREND_WINDOW);
        let texts: Vec<String> = trend.iter().map(|i| i.text.clone()).collect();
        let expected: Vec<String> = (5..15).map(|i| format!("item {}", i)).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_trend_exactly_window() {
        let store = store_with(&[Sentiment::Negative; TREND_WINDOW]);
        let trend = recency_trend(&store);
        assert_eq!(trend.len(), TREND_WINDOW);
        assert_eq!(trend[0].text, "item 0");
        assert_eq!(trend[TREND_WINDOW - 1].text, "item 9");
    }

    #[test]
    fn test_overview_empty_is_none() {
        assert!(overview(&HistoryStore::new()).is_none());
    }

    #[test]
    fn test_overview_recomputes_after_append() {
        let mut store = store_with(&[Sentiment::Positive]);
        assert_eq!(overview(&store).unwrap().counts.positive, 1);

        let result = AnalysisResult::new(Sentiment::Negative, 60, "r", vec![], vec![]).unwrap();
        store.append(HistoryItem::new(result, "late"));

        let view = overview(&store).unwrap();
        assert_eq!(view.counts.negative, 1);
        assert_eq!(view.trend.last().unwrap().text, "late");
    }
}
