use crate::domain::ports::UsageCounter;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// 行程內的每日計數器；不做持久化
#[derive(Debug, Default)]
pub struct InMemoryUsageCounter {
    counts: Mutex<BTreeMap<NaiveDate, u64>>,
}

impl InMemoryUsageCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UsageCounter for InMemoryUsageCounter {
    fn increment(&self, date: NaiveDate) {
        let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        *counts.entry(date).or_insert(0) += 1;
    }

    fn counts(&self, from: NaiveDate, to: NaiveDate) -> BTreeMap<NaiveDate, u64> {
        if from > to {
            return BTreeMap::new();
        }
        let counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        counts
            .range(from..=to)
            .map(|(date, count)| (*date, *count))
            .collect()
    }
}
