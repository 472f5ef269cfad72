//! Generation of the `HH:MM` option labels shown by the time picker.
//!
//! For every hour `00..=23`, minutes start at `0` and step by the interval
//! while below `60`. Intervals that do not divide 60 still work but give an
//! uneven grid (`45` yields `:00` and `:45` each hour). An interval of zero
//! yields nothing.

use std::iter::FusedIterator;

/// Minutes between generated options when none is configured.
pub const DEFAULT_INTERVAL: u32 = 30;

/// Lazy iterator over the day's time labels at a fixed minute interval.
///
/// Cheap to create and restartable: every call to [`TimeSlots::new`] starts
/// again from `00:00`.
#[derive(Debug, Clone)]
pub struct TimeSlots {
    interval: u32,
    hour: u32,
    minute: u32,
}

impl TimeSlots {
    /// Start a sequence at `00:00` stepping by `interval` minutes.
    pub fn new(interval: u32) -> Self {
        Self {
            interval,
            hour: 0,
            minute: 0,
        }
    }

    fn per_hour(&self) -> usize {
        (59 / self.interval) as usize + 1
    }

    fn remaining(&self) -> usize {
        if self.interval == 0 || self.hour >= 24 {
            return 0;
        }
        let this_hour = ((59 - self.minute) / self.interval) as usize + 1;
        let later_hours = (23 - self.hour) as usize;
        this_hour + later_hours * self.per_hour()
    }
}

impl Iterator for TimeSlots {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.interval == 0 || self.hour >= 24 {
            return None;
        }
        let label = format!("{:02}:{:02}", self.hour, self.minute);
        self.minute = self.minute.saturating_add(self.interval);
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
        }
        Some(label)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for TimeSlots {}

impl FusedIterator for TimeSlots {}

/// Materialize the full day at `interval`-minute steps.
pub fn time_slots(interval: u32) -> Vec<String> {
    TimeSlots::new(interval).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIVISORS_OF_60: [u32; 12] = [1, 2, 3, 4, 5, 6, 10, 12, 15, 20, 30, 60];

    #[test]
    fn default_interval_gives_48_half_hours() {
        let slots = time_slots(DEFAULT_INTERVAL);
        assert_eq!(slots.len(), 48);
        assert_eq!(slots[0], "00:00");
        assert_eq!(slots[1], "00:30");
        assert_eq!(slots[19], "09:30");
        assert_eq!(slots[47], "23:30");
    }

    #[test]
    fn count_and_bounds_for_every_divisor() {
        for interval in DIVISORS_OF_60 {
            let slots = time_slots(interval);
            assert_eq!(slots.len(), (24 * 60 / interval) as usize, "interval {interval}");
            assert_eq!(slots.first().map(String::as_str), Some("00:00"));
            let last = format!("23:{:02}", (60 - interval) % 60);
            assert_eq!(slots.last(), Some(&last), "interval {interval}");
        }
    }

    #[test]
    fn labels_are_strictly_increasing() {
        for interval in DIVISORS_OF_60 {
            let slots = time_slots(interval);
            assert!(
                slots.windows(2).all(|pair| pair[0] < pair[1]),
                "interval {interval}"
            );
        }
    }

    #[test]
    fn generation_is_idempotent() {
        assert_eq!(time_slots(15), time_slots(15));
        assert_eq!(
            TimeSlots::new(20).collect::<Vec<_>>(),
            TimeSlots::new(20).collect::<Vec<_>>()
        );
    }

    #[test]
    fn size_hint_is_exact() {
        for interval in [1, 7, 15, 30, 45, 60, 90] {
            let mut it = TimeSlots::new(interval);
            let total = it.len();
            assert_eq!(total, time_slots(interval).len(), "interval {interval}");
            it.next();
            it.next();
            assert_eq!(it.len(), total - 2);
        }
    }

    #[test]
    fn uneven_interval_restarts_each_hour() {
        let slots = time_slots(45);
        assert_eq!(&slots[..4], ["00:00", "00:45", "01:00", "01:45"]);
        assert_eq!(slots.len(), 48);
    }

    #[test]
    fn interval_longer_than_an_hour_gives_whole_hours() {
        let slots = time_slots(90);
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[23], "23:00");
    }

    #[test]
    fn zero_interval_is_empty() {
        assert!(time_slots(0).is_empty());
        assert_eq!(TimeSlots::new(0).len(), 0);
    }

    #[test]
    fn iterator_is_fused() {
        let mut it = TimeSlots::new(60);
        for _ in 0..24 {
            assert!(it.next().is_some());
        }
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
