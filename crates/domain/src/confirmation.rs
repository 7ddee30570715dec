//! Destructive operations.
//!
//! Every operation that deletes data without the possibility of undo requires a
//! [`Confirmed`] action. A [`Confirmed`] value can only be obtained from a
//! [`Pending`] action, either by a plain confirmation or, for operations that
//! wipe everything, by typing a confirmation phrase. Dropping a [`Pending`]
//! action cancels it.

use crate::{Name, RoutineID, WorkoutSessionID};

pub trait Action: private::Sealed {}

/// Actions that are confirmed by a single acknowledgement.
pub trait Acknowledge: Action {}

/// Actions that are confirmed by typing a phrase.
pub trait Phrase: Action {
    const PHRASE: &'static str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRoutine(pub RoutineID);

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteWorkoutSession(pub WorkoutSessionID);

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteExerciseHistory(pub Name);

#[derive(Debug, Clone, PartialEq)]
pub struct WipeAllData;

impl Action for DeleteRoutine {}
impl Action for DeleteWorkoutSession {}
impl Action for DeleteExerciseHistory {}
impl Action for WipeAllData {}

impl Acknowledge for DeleteRoutine {}
impl Acknowledge for DeleteWorkoutSession {}
impl Acknowledge for DeleteExerciseHistory {}

impl Phrase for WipeAllData {
    const PHRASE: &'static str = "DELETE ALL";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pending<A: Action>(A);

impl<A: Action> Pending<A> {
    #[must_use]
    pub fn new(action: A) -> Self {
        Self(action)
    }

    #[must_use]
    pub fn action(&self) -> &A {
        &self.0
    }
}

impl<A: Acknowledge> Pending<A> {
    #[must_use]
    pub fn confirm(self) -> Confirmed<A> {
        Confirmed(self.0)
    }
}

impl<A: Phrase> Pending<A> {
    pub fn confirm_with(self, input: &str) -> Result<Confirmed<A>, ConfirmationError> {
        if input.trim() == A::PHRASE {
            Ok(Confirmed(self.0))
        } else {
            Err(ConfirmationError::PhraseMismatch(A::PHRASE))
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Confirmed<A: Action>(A);

impl<A: Action> Confirmed<A> {
    #[must_use]
    pub fn action(&self) -> &A {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> A {
        self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfirmationError {
    #[error("Type \"{0}\" to confirm")]
    PhraseMismatch(&'static str),
}

mod private {
    pub trait Sealed {}

    impl Sealed for super::DeleteRoutine {}
    impl Sealed for super::DeleteWorkoutSession {}
    impl Sealed for super::DeleteExerciseHistory {}
    impl Sealed for super::WipeAllData {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_confirm() {
        let pending = Pending::new(DeleteRoutine(1.into()));
        assert_eq!(pending.action(), &DeleteRoutine(1.into()));
        assert_eq!(pending.confirm().into_inner(), DeleteRoutine(1.into()));
    }

    #[rstest]
    #[case("DELETE ALL", Ok(()))]
    #[case("  DELETE ALL ", Ok(()))]
    #[case("delete all", Err(ConfirmationError::PhraseMismatch("DELETE ALL")))]
    #[case("", Err(ConfirmationError::PhraseMismatch("DELETE ALL")))]
    fn test_confirm_with(#[case] input: &str, #[case] expected: Result<(), ConfirmationError>) {
        assert_eq!(
            Pending::new(WipeAllData).confirm_with(input).map(|_| ()),
            expected
        );
    }
}
