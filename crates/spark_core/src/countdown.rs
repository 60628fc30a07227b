use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Time left until the festival, split into display units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    /// Remaining time from `now` to `target`; all zeros once the target has passed
    pub fn until(target: SystemTime, now: SystemTime) -> Self {
        let left = target.duration_since(now).unwrap_or(Duration::ZERO);
        Self::from_duration(left)
    }

    pub fn from_duration(left: Duration) -> Self {
        let total = left.as_secs();
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    pub fn is_over(&self) -> bool {
        *self == Self::default()
    }
}

/// Festival start, `offset_days` after `launch`
pub fn festival_date(launch: SystemTime, offset_days: u32) -> SystemTime {
    launch + Duration::from_secs(offset_days as u64 * SECS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_units() {
        let left = Duration::from_secs(2 * SECS_PER_DAY + 3 * SECS_PER_HOUR + 4 * 60 + 5);
        let c = Countdown::from_duration(left);
        assert_eq!(
            c,
            Countdown {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            }
        );
    }

    #[test]
    fn test_sub_second_remainder_truncates() {
        let c = Countdown::from_duration(Duration::from_millis(59_999));
        assert_eq!(c.seconds, 59);
        assert_eq!(c.minutes, 0);
    }

    #[test]
    fn test_past_target_saturates() {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let target = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        let c = Countdown::until(target, now);
        assert!(c.is_over());
    }

    #[test]
    fn test_festival_date_offset() {
        let launch = SystemTime::UNIX_EPOCH;
        let fest = festival_date(launch, 30);
        let c = Countdown::until(fest, launch);
        assert_eq!(c.days, 30);
        assert_eq!(c.hours, 0);
    }
}
