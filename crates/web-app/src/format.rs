//! Display formatting of measured values.

use gymlog_domain::Seconds;

/// Weight with one decimal, e.g. `45.5`.
#[must_use]
pub fn weight(value: f32) -> String {
    format!("{value:.1}")
}

/// Volume rounded to whole kilograms.
#[must_use]
pub fn volume(value: f32) -> String {
    format!("{value:.0}")
}

/// Duration as `MM:SS`.
#[must_use]
pub fn clock(seconds: Seconds) -> String {
    let seconds = u32::from(seconds);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Duration like `2min 30s`, `45s` or `2min`.
#[must_use]
pub fn duration(seconds: Seconds) -> String {
    let seconds = u32::from(seconds);
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    match (minutes, seconds) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}min"),
        (m, s) => format!("{m}min {s}s"),
    }
}

/// Approximate duration like `~1h 5min` or `~45 min`.
#[must_use]
pub fn estimated_duration(seconds: Seconds) -> Option<String> {
    let seconds = u32::from(seconds);
    if seconds == 0 {
        return None;
    }
    let (hours, minutes) = (seconds / 3600, seconds % 3600 / 60);
    Some(if hours > 0 {
        format!("~{hours}h {minutes}min")
    } else {
        format!("~{minutes} min")
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn s(value: u32) -> Seconds {
        Seconds::new(value).unwrap()
    }

    #[rstest]
    #[case(45.5, "45.5")]
    #[case(80.0, "80.0")]
    #[case(0.0, "0.0")]
    fn test_weight(#[case] value: f32, #[case] expected: &str) {
        assert_eq!(weight(value), expected);
    }

    #[rstest]
    #[case(1067.6, "1068")]
    #[case(0.0, "0")]
    fn test_volume(#[case] value: f32, #[case] expected: &str) {
        assert_eq!(volume(value), expected);
    }

    #[rstest]
    #[case(0, "00:00")]
    #[case(150, "02:30")]
    #[case(4500, "75:00")]
    fn test_clock(#[case] seconds: u32, #[case] expected: &str) {
        assert_eq!(clock(s(seconds)), expected);
    }

    #[rstest]
    #[case(0, "0s")]
    #[case(45, "45s")]
    #[case(120, "2min")]
    #[case(150, "2min 30s")]
    fn test_duration(#[case] seconds: u32, #[case] expected: &str) {
        assert_eq!(duration(s(seconds)), expected);
    }

    #[rstest]
    #[case(0, None)]
    #[case(2700, Some("~45 min"))]
    #[case(3900, Some("~1h 5min"))]
    fn test_estimated_duration(#[case] seconds: u32, #[case] expected: Option<&str>) {
        assert_eq!(
            estimated_duration(s(seconds)),
            expected.map(ToString::to_string)
        );
    }
}
