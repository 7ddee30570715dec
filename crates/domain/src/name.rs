use derive_more::{AsRef, Display};

const MAX_CHARS: usize = 64;

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> Result<Self, NameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(NameError::Empty);
        }

        let chars = trimmed_name.chars().count();

        if chars > MAX_CHARS {
            return Err(NameError::TooLong(chars));
        }

        Ok(Name(trimmed_name.to_string()))
    }

    /// Exercise names are compared without regard to case or surrounding whitespace.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        names_match(&self.0, other)
    }
}

impl TryFrom<&str> for Name {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Name::new(value)
    }
}

#[must_use]
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be {MAX_CHARS} characters or fewer ({0} > {MAX_CHARS})")]
    TooLong(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Bench Press", Ok(Name("Bench Press".to_string())))]
    #[case("  Squat  ", Ok(Name("Squat".to_string())))]
    #[case("Press inclinado con mancuernas", Ok(Name("Press inclinado con mancuernas".to_string())))]
    #[case("", Err(NameError::Empty))]
    #[case("   ", Err(NameError::Empty))]
    #[case(
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        Err(NameError::TooLong(65))
    )]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }

    #[test]
    fn test_name_counts_characters() {
        assert!(Name::new(&"ö".repeat(64)).is_ok());
    }

    #[rstest]
    #[case("Bench Press", "bench press", true)]
    #[case("Bench Press", " BENCH PRESS ", true)]
    #[case("Bench Press", "Bench", false)]
    fn test_name_matches(#[case] name: &str, #[case] other: &str, #[case] expected: bool) {
        assert_eq!(Name::new(name).unwrap().matches(other), expected);
    }
}
