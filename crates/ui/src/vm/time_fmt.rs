/// At or below this many seconds the countdown is shown as a warning.
pub const WARNING_SECONDS: u32 = 5 * 60;
/// At or below this many seconds the countdown is shown as critical.
pub const CRITICAL_SECONDS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeUrgency {
    Normal,
    Warning,
    Critical,
}

impl TimeUrgency {
    #[must_use]
    pub fn from_remaining(seconds: u32) -> Self {
        if seconds <= CRITICAL_SECONDS {
            Self::Critical
        } else if seconds <= WARNING_SECONDS {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// `MM:SS`, or `H:MM:SS` once an hour or more is left.
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// Human-readable elapsed time, e.g. `4m 05s`.
#[must_use]
pub fn format_duration(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    match (hours, minutes) {
        (0, 0) => format!("{secs}s"),
        (0, _) => format!("{minutes}m {secs:02}s"),
        _ => format!("{hours}h {minutes:02}m {secs:02}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_switches_to_hours() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(65), "01:05");
        assert_eq!(format_countdown(3599), "59:59");
        assert_eq!(format_countdown(3600), "1:00:00");
        assert_eq!(format_countdown(7325), "2:02:05");
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(TimeUrgency::from_remaining(301), TimeUrgency::Normal);
        assert_eq!(TimeUrgency::from_remaining(300), TimeUrgency::Warning);
        assert_eq!(TimeUrgency::from_remaining(61), TimeUrgency::Warning);
        assert_eq!(TimeUrgency::from_remaining(60), TimeUrgency::Critical);
        assert_eq!(TimeUrgency::from_remaining(0), TimeUrgency::Critical);
    }

    #[test]
    fn duration_labels() {
        assert_eq!(format_duration(9), "9s");
        assert_eq!(format_duration(245), "4m 05s");
        assert_eq!(format_duration(3723), "1h 02m 03s");
    }
}
