use serde::{Deserialize, Serialize};
use std::ops::Sub;

#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Serialize, Deserialize, PartialOrd, Hash)]
pub struct Time(pub u64);

impl Time {
    pub const END_OF_DAY: Time = Time(1440);

    /// Half-open overlap: windows that only touch at an endpoint do not overlap.
    pub(crate) fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }

    pub fn is_within_day(self) -> bool {
        self <= Self::END_OF_DAY
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.0 / 60;
        let mins = self.0 % 60;
        write!(f, "{:02}:{:02}", hours, mins)
    }
}

impl Sub<Time> for Time {
    type Output = u64;

    fn sub(self, rhs: Time) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_windows_do_not_overlap() {
        assert!(!Time::is_overlapping(&(Time(480), Time(660)), &(Time(660), Time(900))));
        assert!(!Time::is_overlapping(&(Time(660), Time(900)), &(Time(480), Time(660))));
    }

    #[test]
    fn test_overlapping_windows() {
        assert!(Time::is_overlapping(&(Time(480), Time(660)), &(Time(659), Time(900))));
        assert!(Time::is_overlapping(&(Time(500), Time(600)), &(Time(480), Time(660))));
        assert!(Time::is_overlapping(&(Time(480), Time(660)), &(Time(480), Time(660))));
    }

    #[test]
    fn test_display() {
        assert_eq!("08:00", Time(480).to_string());
        assert_eq!("00:05", Time(5).to_string());
        assert_eq!("24:00", Time::END_OF_DAY.to_string());
    }

    #[test]
    fn test_duration() {
        assert_eq!(180, Time(660) - Time(480));
        assert_eq!(0, Time(100) - Time(200));
    }
}
