use chrono::{Local, NaiveDate};

use crate::engine::constants::INTERSTITIAL_PICK_THRESHOLD;

/// Counts picks for ad gating. Never consulted by the selection logic.
pub trait PickCounter {
    /// Record one pick and return the running count.
    fn increment(&mut self) -> u32;

    fn count(&self) -> u32;
}

/// Pick counter that starts over whenever the calendar day changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPickCounter {
    day: NaiveDate,
    count: u32,
}

impl DailyPickCounter {
    pub fn new(day: NaiveDate) -> Self {
        Self { day, count: 0 }
    }

    /// Resume a persisted count; a count from an earlier day is dropped.
    pub fn restore(day: NaiveDate, count: u32, today: NaiveDate) -> Self {
        if day == today {
            Self { day, count }
        } else {
            Self::new(today)
        }
    }

    /// Record a pick made on `today`.
    pub fn increment_on(&mut self, today: NaiveDate) -> u32 {
        if today != self.day {
            self.day = today;
            self.count = 0;
        }
        self.count += 1;
        self.count
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

impl Default for DailyPickCounter {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl PickCounter for DailyPickCounter {
    fn increment(&mut self) -> u32 {
        self.increment_on(Local::now().date_naive())
    }

    fn count(&self) -> u32 {
        self.count
    }
}

/// When to show an interstitial between picks.
#[derive(Debug, Clone)]
pub struct InterstitialPolicy {
    pub enabled: bool,
    pub threshold: u32,
}

impl Default for InterstitialPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: INTERSTITIAL_PICK_THRESHOLD,
        }
    }
}

impl InterstitialPolicy {
    /// True on every `threshold`-th pick.
    pub fn should_show(&self, pick_count: u32) -> bool {
        self.enabled && self.threshold > 0 && pick_count > 0 && pick_count % self.threshold == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_counter_increments_within_day() {
        let mut counter = DailyPickCounter::new(day(1));
        assert_eq!(counter.increment_on(day(1)), 1);
        assert_eq!(counter.increment_on(day(1)), 2);
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_counter_resets_on_new_day() {
        let mut counter = DailyPickCounter::new(day(1));
        counter.increment_on(day(1));
        counter.increment_on(day(1));

        assert_eq!(counter.increment_on(day(2)), 1);
        assert_eq!(counter.day(), day(2));
    }

    #[test]
    fn test_restore_drops_stale_count() {
        assert_eq!(DailyPickCounter::restore(day(1), 4, day(1)).count(), 4);
        assert_eq!(DailyPickCounter::restore(day(1), 4, day(2)).count(), 0);
    }

    #[test]
    fn test_interstitial_every_third_pick() {
        let policy = InterstitialPolicy::default();
        let shown: Vec<u32> = (0..=9).filter(|&n| policy.should_show(n)).collect();
        assert_eq!(shown, vec![3, 6, 9]);

        let disabled = InterstitialPolicy {
            enabled: false,
            ..Default::default()
        };
        assert!(!disabled.should_show(3));
    }
}
