use std::ops::Mul;

use derive_more::{Display, Into};

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..100).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 99")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

impl Mul<Weight> for Reps {
    type Output = f32;

    #[allow(clippy::cast_precision_loss)]
    fn mul(self, rhs: Weight) -> Self::Output {
        self.0 as f32 * rhs.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if ((value * 10.0).round() - value * 10.0).abs() > 0.001 {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().replace(',', ".").parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

impl Mul<Reps> for Weight {
    type Output = f32;

    fn mul(self, rhs: Reps) -> Self::Output {
        rhs * self
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// A duration in whole seconds, bounded by one day.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seconds(u32);

impl Seconds {
    pub const MAX: u32 = 86_400;

    pub fn new(value: u32) -> Result<Self, SecondsError> {
        if value > Self::MAX {
            return Err(SecondsError::OutOfRange);
        }

        Ok(Self(value))
    }

    /// Saturates at the upper bound instead of failing.
    #[must_use]
    pub fn saturating(value: i64) -> Self {
        Self(u32::try_from(value.clamp(0, i64::from(Self::MAX))).unwrap_or(Self::MAX))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<Seconds> for i64 {
    fn from(value: Seconds) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<&str> for Seconds {
    type Error = SecondsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Seconds::new(parsed_value),
            Err(_) => Err(SecondsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SecondsError {
    #[error("Time must be in the range 0 to 86400 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Err(SetsError::OutOfRange))]
    #[case(1, Ok(Sets(1)))]
    #[case(99, Ok(Sets(99)))]
    #[case(100, Err(SetsError::OutOfRange))]
    fn test_sets_new(#[case] input: u32, #[case] expected: Result<Sets, SetsError>) {
        assert_eq!(Sets::new(input), expected);
    }

    #[rstest]
    #[case("4", Ok(Sets(4)))]
    #[case(" 3 ", Ok(Sets(3)))]
    #[case("", Err(SetsError::ParseError))]
    #[case("2.5", Err(SetsError::ParseError))]
    fn test_sets_from_str(#[case] input: &str, #[case] expected: Result<Sets, SetsError>) {
        assert_eq!(Sets::try_from(input), expected);
    }

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] input: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(input), expected);
    }

    #[rstest]
    #[case("0", Ok(Reps(0)))]
    #[case("12", Ok(Reps(12)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("4.", Err(RepsError::ParseError))]
    #[case("-1", Err(RepsError::ParseError))]
    #[case("", Err(RepsError::ParseError))]
    fn test_reps_from_str(#[case] input: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(input), expected);
    }

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(22.5, Ok(Weight(22.5)))]
    #[case(80.3, Ok(Weight(80.3)))]
    #[case(999.9, Ok(Weight(999.9)))]
    #[case(1000.0, Err(WeightError::OutOfRange))]
    #[case(-2.5, Err(WeightError::OutOfRange))]
    #[case(1.23, Err(WeightError::InvalidResolution))]
    fn test_weight_new(#[case] input: f32, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(input), expected);
    }

    #[rstest]
    #[case("2.0", Ok(Weight(2.0)))]
    #[case("17,5", Ok(Weight(17.5)))]
    #[case("8", Ok(Weight(8.0)))]
    #[case("1000", Err(WeightError::OutOfRange))]
    #[case("", Err(WeightError::ParseError))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_from_str(#[case] input: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(input), expected);
    }

    #[rstest]
    #[case(Weight(2.0), "2")]
    #[case(Weight(8.4), "8.4")]
    fn test_weight_display(#[case] input: Weight, #[case] expected: &str) {
        assert_eq!(input.to_string(), expected);
    }

    #[test]
    fn test_weight_mul_reps() {
        assert_approx_eq!(Weight(22.5) * Reps(8), 180.0);
        assert_approx_eq!(Reps(10) * Weight(0.0), 0.0);
    }

    #[rstest]
    #[case(0, Ok(Seconds(0)))]
    #[case(86_400, Ok(Seconds(86_400)))]
    #[case(86_401, Err(SecondsError::OutOfRange))]
    fn test_seconds_new(#[case] input: u32, #[case] expected: Result<Seconds, SecondsError>) {
        assert_eq!(Seconds::new(input), expected);
    }

    #[rstest]
    #[case("90", Ok(Seconds(90)))]
    #[case("", Err(SecondsError::ParseError))]
    #[case("1:30", Err(SecondsError::ParseError))]
    fn test_seconds_from_str(#[case] input: &str, #[case] expected: Result<Seconds, SecondsError>) {
        assert_eq!(Seconds::try_from(input), expected);
    }

    #[rstest]
    #[case(-5, Seconds(0))]
    #[case(3600, Seconds(3600))]
    #[case(100_000, Seconds(86_400))]
    fn test_seconds_saturating(#[case] input: i64, #[case] expected: Seconds) {
        assert_eq!(Seconds::saturating(input), expected);
    }
}
