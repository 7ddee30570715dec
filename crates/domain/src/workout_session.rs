use chrono::{NaiveDate, NaiveDateTime};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    Confirmed, CreateError, DeleteError, DeleteExerciseHistory, DeleteWorkoutSession, ReadError,
    Reps, RoutineID, Seconds, Weight, names_match,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutSessionService {
    async fn get_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    async fn create_workout_session(
        &self,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError>;
    async fn delete_workout_session(
        &self,
        action: Confirmed<DeleteWorkoutSession>,
    ) -> Result<WorkoutSessionID, DeleteError>;
    /// Delete all sessions containing the exercise.
    async fn delete_exercise_history(
        &self,
        action: Confirmed<DeleteExerciseHistory>,
    ) -> Result<Vec<WorkoutSessionID>, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutSessionRepository {
    async fn read_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    async fn create_workout_session(
        &self,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError>;
    async fn delete_workout_sessions(
        &self,
        ids: &[WorkoutSessionID],
    ) -> Result<Vec<WorkoutSessionID>, DeleteError>;
}

/// A completed workout.
///
/// Exercises are stored by name, so that a session stays meaningful after the routine
/// it was based on has been changed or deleted. A session is never modified after its
/// creation.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: WorkoutSessionID,
    pub timestamp: NaiveDateTime,
    pub routine: SessionRoutine,
    pub routine_name: String,
    pub exercises: Vec<ExerciseRecord>,
    pub total_time: Seconds,
}

impl WorkoutSession {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises.iter().map(ExerciseRecord::volume).sum()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn exercise(&self, name: &str) -> Option<&ExerciseRecord> {
        self.exercises.iter().find(|e| names_match(&e.name, name))
    }

    #[must_use]
    pub fn routine_id(&self) -> Option<RoutineID> {
        match self.routine {
            SessionRoutine::Routine(id) => Some(id),
            SessionRoutine::Manual => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRoutine {
    Routine(RoutineID),
    Manual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub name: String,
    pub sets: Vec<Set>,
}

impl ExerciseRecord {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(Set::volume).sum()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Set {
    pub weight: Weight,
    pub reps: Reps,
    pub time: Seconds,
    pub drop_sets: Vec<DropSet>,
}

impl Set {
    /// Weight times reps of the set itself and all its drop sets.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.weight * self.reps + self.drop_sets.iter().map(DropSet::volume).sum::<f32>()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DropSet {
    pub weight: Weight,
    pub reps: Reps,
}

impl DropSet {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.weight * self.reps
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutSessionID(Uuid);

impl WorkoutSessionID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
