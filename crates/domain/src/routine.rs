use std::{fmt, str::FromStr};

use derive_more::Deref;
use uuid::Uuid;

use crate::{
    Confirmed, CreateError, DeleteError, DeleteRoutine, Name, NameError, ReadError, Reps,
    RepsError, Seconds, SecondsError, Sets, SetsError, UpdateError,
};

#[allow(async_fn_in_trait)]
pub trait RoutineService {
    async fn get_routines(&self) -> Result<Vec<Routine>, ReadError>;
    async fn get_routine(&self, id: RoutineID) -> Result<Routine, ReadError> {
        self.get_routines()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(ReadError::NotFound)
    }
    async fn create_routine(
        &self,
        name: Name,
        exercises: Vec<ExerciseTemplate>,
    ) -> Result<Routine, CreateError>;
    async fn replace_routine(&self, routine: Routine) -> Result<Routine, UpdateError>;
    /// Delete a routine and remove it from the calendar.
    async fn delete_routine(
        &self,
        action: Confirmed<DeleteRoutine>,
    ) -> Result<RoutineID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait RoutineRepository {
    async fn read_routines(&self) -> Result<Vec<Routine>, ReadError>;
    async fn create_routine(
        &self,
        name: Name,
        exercises: Vec<ExerciseTemplate>,
    ) -> Result<Routine, CreateError>;
    async fn replace_routine(&self, routine: Routine) -> Result<Routine, UpdateError>;
    async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: RoutineID,
    pub name: Name,
    pub exercises: Vec<ExerciseTemplate>,
}

impl Routine {
    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().map(|e| u32::from(e.sets)).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseTemplate {
    pub name: Name,
    pub sets: Sets,
    pub reps: Reps,
    pub rest: Seconds,
}

impl ExerciseTemplate {
    pub const DEFAULT_REST: u32 = 60;
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoutineID(Uuid);

impl RoutineID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl fmt::Display for RoutineID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for RoutineID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Raw input of one exercise row in the routine form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseInput {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub rest: String,
}

impl ExerciseInput {
    fn is_incomplete(&self) -> bool {
        self.name.trim().is_empty() || self.sets.trim().is_empty() || self.reps.trim().is_empty()
    }
}

impl From<&ExerciseTemplate> for ExerciseInput {
    fn from(value: &ExerciseTemplate) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets.to_string(),
            reps: value.reps.to_string(),
            rest: value.rest.to_string(),
        }
    }
}

/// Validate the input of the routine form.
///
/// Rows missing a name, a number of sets or a number of reps are skipped. A blank rest
/// defaults to [`ExerciseTemplate::DEFAULT_REST`]. At least one exercise must remain.
pub fn validate_routine(
    name: &str,
    rows: &[ExerciseInput],
) -> Result<(Name, Vec<ExerciseTemplate>), RoutineError> {
    let name = Name::new(name)?;
    let mut exercises = vec![];

    for (i, row) in rows.iter().enumerate() {
        if row.is_incomplete() {
            continue;
        }
        let row_number = i + 1;
        let rest = if row.rest.trim().is_empty() {
            Seconds::new(ExerciseTemplate::DEFAULT_REST)
        } else {
            Seconds::try_from(row.rest.as_str())
        };
        exercises.push(ExerciseTemplate {
            name: Name::new(&row.name).map_err(|err| RoutineError::ExerciseName(row_number, err))?,
            sets: Sets::try_from(row.sets.as_str())
                .map_err(|err| RoutineError::Sets(row_number, err))?,
            reps: Reps::try_from(row.reps.as_str())
                .map_err(|err| RoutineError::Reps(row_number, err))?,
            rest: rest.map_err(|err| RoutineError::Rest(row_number, err))?,
        });
    }

    if exercises.is_empty() {
        return Err(RoutineError::NoExercises);
    }

    Ok((name, exercises))
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RoutineError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("Add at least one exercise with name, sets and reps")]
    NoExercises,
    #[error("Exercise {0}: {1}")]
    ExerciseName(usize, NameError),
    #[error("Exercise {0}: {1}")]
    Sets(usize, SetsError),
    #[error("Exercise {0}: {1}")]
    Reps(usize, RepsError),
    #[error("Exercise {0}: {1}")]
    Rest(usize, SecondsError),
}
