//! Historical/forecast partitioning of a series snapshot.
//!
//! The two halves deliberately overlap by one sample so the rendered lines
//! join without a visual gap: the forecast line starts on the last
//! historical point.

use crate::series::Sample;

pub const DEFAULT_SPLIT_RATIO: f64 = 0.7;

/// Split of a snapshot into a historical prefix (read via `value`) and an
/// overlapping forecast suffix (read via `predicted`).
#[derive(Debug, Clone, Default)]
pub struct Partition {
    pub historical: Vec<Sample>,
    pub forecast: Vec<Sample>,
}

/// Pure split at `floor(len * split_ratio)`.
///
/// Edge cases: an empty snapshot yields two empty halves; a single sample
/// is all history (no index to overlap from); a split index of zero clamps
/// the forecast start to the front of the snapshot.
pub fn partition(snapshot: &[Sample], split_ratio: f64) -> Partition {
    let len = snapshot.len();
    if len == 0 {
        return Partition::default();
    }
    if len == 1 {
        return Partition {
            historical: snapshot.to_vec(),
            forecast: Vec::new(),
        };
    }
    let split = ((len as f64) * split_ratio).floor() as usize;
    let split = split.min(len);
    let forecast_start = split.saturating_sub(1);
    Partition {
        historical: snapshot[..split].to_vec(),
        forecast: snapshot[forecast_start..].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(len: usize) -> Vec<Sample> {
        (0..len)
            .map(|i| Sample {
                ts: i as u64,
                value: i as f64,
                predicted: i as f64 + 0.5,
            })
            .collect()
    }

    #[test]
    fn test_empty_snapshot() {
        let p = partition(&[], DEFAULT_SPLIT_RATIO);
        assert!(p.historical.is_empty());
        assert!(p.forecast.is_empty());
    }

    #[test]
    fn test_single_sample_is_all_history() {
        let p = partition(&snapshot(1), DEFAULT_SPLIT_RATIO);
        assert_eq!(p.historical.len(), 1);
        assert!(p.forecast.is_empty());
    }

    #[test]
    fn test_overlap_is_exactly_one_sample() {
        for len in 2..=50 {
            let p = partition(&snapshot(len), DEFAULT_SPLIT_RATIO);
            let last_hist = p.historical.last().unwrap();
            let first_fc = p.forecast.first().unwrap();
            assert_eq!(last_hist.ts, first_fc.ts, "len={}", len);
            assert_eq!(
                p.historical.len() + p.forecast.len(),
                len + 1,
                "len={}",
                len
            );
        }
    }

    #[test]
    fn test_split_index_matches_ratio() {
        let p = partition(&snapshot(168), 0.7);
        assert_eq!(p.historical.len(), 117); // floor(168 * 0.7)
        assert_eq!(p.forecast.first().unwrap().ts, 116);
        assert_eq!(p.forecast.last().unwrap().ts, 167);
    }

    #[test]
    fn test_zero_ratio_clamps_forecast_to_front() {
        let p = partition(&snapshot(10), 0.0);
        assert!(p.historical.is_empty());
        assert_eq!(p.forecast.len(), 10);
        assert_eq!(p.forecast[0].ts, 0);
    }

    #[test]
    fn test_full_ratio_leaves_one_forecast_sample() {
        let p = partition(&snapshot(10), 1.0);
        assert_eq!(p.historical.len(), 10);
        assert_eq!(p.forecast.len(), 1);
        assert_eq!(p.forecast[0].ts, 9);
    }
}
