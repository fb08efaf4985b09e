use crate::domain::ports::UsageCounter;
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsagePeriod {
    Week,
    Month,
    Year,
}

impl UsagePeriod {
    pub fn days(&self) -> u64 {
        match self {
            UsagePeriod::Week => 7,
            UsagePeriod::Month => 30,
            UsagePeriod::Year => 365,
        }
    }
}

impl FromStr for UsagePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Ok(UsagePeriod::Week),
            "month" => Ok(UsagePeriod::Month),
            "year" => Ok(UsagePeriod::Year),
            other => Err(format!("unknown usage period: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyUsage {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub period: UsagePeriod,
    pub daily: Vec<DailyUsage>,
    pub total: u64,
}

/// 以今天為最後一天，補零後的每日查詢次數
pub fn usage_report<U: UsageCounter + ?Sized>(
    counter: &U,
    period: UsagePeriod,
    today: NaiveDate,
) -> UsageReport {
    let start = today
        .checked_sub_days(Days::new(period.days() - 1))
        .unwrap_or(NaiveDate::MIN);
    let counts = counter.counts(start, today);

    let daily: Vec<DailyUsage> = start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| DailyUsage {
            date,
            count: counts.get(&date).copied().unwrap_or(0),
        })
        .collect();
    let total = daily.iter().map(|d| d.count).sum();

    UsageReport {
        period,
        daily,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::usage::InMemoryUsageCounter;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_report_is_zero_filled() {
        let counter = InMemoryUsageCounter::new();
        counter.increment(date(2026, 10, 18));
        counter.increment(date(2026, 10, 18));
        counter.increment(date(2026, 10, 14));
        // 超出區間
        counter.increment(date(2026, 10, 1));

        let report = usage_report(&counter, UsagePeriod::Week, date(2026, 10, 18));

        assert_eq!(report.daily.len(), 7);
        assert_eq!(report.daily[0].date, date(2026, 10, 12));
        assert_eq!(report.daily[6].date, date(2026, 10, 18));
        assert_eq!(report.daily[6].count, 2);
        assert_eq!(report.daily[2].count, 1);
        assert_eq!(report.total, 3);
    }

    #[test]
    fn test_period_lengths() {
        let counter = InMemoryUsageCounter::new();
        let today = date(2026, 3, 1);
        assert_eq!(usage_report(&counter, UsagePeriod::Month, today).daily.len(), 30);
        assert_eq!(usage_report(&counter, UsagePeriod::Year, today).daily.len(), 365);
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("Week".parse::<UsagePeriod>(), Ok(UsagePeriod::Week));
        assert_eq!("year".parse::<UsagePeriod>(), Ok(UsagePeriod::Year));
        assert!("decade".parse::<UsagePeriod>().is_err());
    }
}
