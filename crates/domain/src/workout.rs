//! Guided execution of a routine.
//!
//! A [`Workout`] walks linearly through the exercises of a routine. For each exercise the
//! planned number of sets is logged, separated by rests. After the last set of the last
//! exercise the workout is finished and can be turned into a [`WorkoutSession`].
//! Dropping a workout discards it.

use chrono::NaiveDateTime;

use crate::{
    Countdown, DropSet, ExerciseRecord, Reps, RepsError, Routine, RoutineID, Seconds,
    SessionRoutine, Set, Sets, Stopwatch, Weight, WeightError, WorkoutSession, WorkoutSessionID,
    last_performance,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    routine_id: RoutineID,
    routine_name: String,
    started_at: NaiveDateTime,
    exercises: Vec<WorkoutExercise>,
    current: usize,
    phase: Phase,
    stopwatch: Stopwatch,
    last_set: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub name: String,
    pub planned_sets: Sets,
    pub planned_reps: Reps,
    pub rest: Seconds,
    pub last_performance: Option<ExerciseRecord>,
    pub sets: Vec<Set>,
}

impl WorkoutExercise {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sets.len() >= usize::try_from(u32::from(self.planned_sets)).unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Exercise,
    Rest(Countdown),
    Finished,
}

impl Workout {
    /// Start a workout of a routine.
    ///
    /// Each exercise is annotated with its performance in the last session of the same
    /// routine.
    pub fn start(
        routine: &Routine,
        sessions: &[WorkoutSession],
        now: NaiveDateTime,
    ) -> Result<Self, WorkoutError> {
        if routine.exercises.is_empty() {
            return Err(WorkoutError::EmptyRoutine);
        }

        Ok(Self {
            routine_id: routine.id,
            routine_name: routine.name.to_string(),
            started_at: now,
            exercises: routine
                .exercises
                .iter()
                .map(|e| WorkoutExercise {
                    name: e.name.to_string(),
                    planned_sets: e.sets,
                    planned_reps: e.reps,
                    rest: e.rest,
                    last_performance: last_performance(sessions, routine.id, e.name.as_ref())
                        .cloned(),
                    sets: vec![],
                })
                .collect(),
            current: 0,
            phase: Phase::Exercise,
            stopwatch: Stopwatch::default(),
            last_set: None,
        })
    }

    #[must_use]
    pub fn routine_id(&self) -> RoutineID {
        self.routine_id
    }

    #[must_use]
    pub fn routine_name(&self) -> &str {
        &self.routine_name
    }

    #[must_use]
    pub fn started_at(&self) -> NaiveDateTime {
        self.started_at
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn exercises(&self) -> &[WorkoutExercise] {
        &self.exercises
    }

    /// Index of the current exercise.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&WorkoutExercise> {
        match self.phase {
            Phase::Finished => None,
            Phase::Exercise | Phase::Rest(_) => self.exercises.get(self.current),
        }
    }

    #[must_use]
    pub fn stopwatch(&self) -> Stopwatch {
        self.stopwatch
    }

    #[must_use]
    pub fn last_set(&self) -> Option<&Set> {
        self.last_set
            .and_then(|(e, s)| self.exercises.get(e).and_then(|e| e.sets.get(s)))
    }

    pub fn start_pause_stopwatch(&mut self) {
        if self.phase == Phase::Exercise {
            self.stopwatch.start_pause();
        }
    }

    pub fn start_pause_rest(&mut self) {
        if let Phase::Rest(ref mut countdown) = self.phase {
            countdown.start_pause();
        }
    }

    pub fn reset_rest(&mut self) {
        if let Phase::Rest(ref mut countdown) = self.phase {
            countdown.reset();
        }
    }

    /// Advance the running timer by one second.
    ///
    /// A rest ends when its countdown reaches zero.
    pub fn tick(&mut self) {
        match self.phase {
            Phase::Exercise => self.stopwatch.tick(),
            Phase::Rest(ref mut countdown) => {
                countdown.tick();
                if countdown.is_finished() {
                    self.phase = Phase::Exercise;
                }
            }
            Phase::Finished => {}
        }
    }

    pub fn skip_rest(&mut self) {
        if let Phase::Rest(_) = self.phase {
            self.phase = Phase::Exercise;
        }
    }

    /// Log a set of the current exercise.
    ///
    /// The time of the set is taken from the stopwatch. If planned sets of the exercise
    /// remain, a rest follows unless the exercise has no rest time. Otherwise the workout
    /// advances to the next exercise or is finished after the last one. No set can be
    /// logged while resting.
    pub fn log_set(&mut self, weight: &str, reps: &str) -> Result<Phase, WorkoutError> {
        match self.phase {
            Phase::Exercise => {}
            Phase::Rest(_) => return Err(WorkoutError::Resting),
            Phase::Finished => return Err(WorkoutError::Finished),
        }
        let (weight, reps) = parse_inputs(weight, reps)?;
        let time = self.stopwatch.stop();
        let current = self.current;
        let Some(exercise) = self.exercises.get_mut(current) else {
            return Err(WorkoutError::Finished);
        };

        exercise.sets.push(Set {
            weight,
            reps,
            time,
            drop_sets: vec![],
        });
        self.last_set = Some((current, exercise.sets.len() - 1));

        self.phase = if !exercise.is_complete() {
            if exercise.rest.is_zero() {
                Phase::Exercise
            } else {
                Phase::Rest(Countdown::new(exercise.rest))
            }
        } else if current + 1 < self.exercises.len() {
            self.current += 1;
            Phase::Exercise
        } else {
            Phase::Finished
        };

        Ok(self.phase)
    }

    /// Attach a drop set to the most recently logged set.
    pub fn log_drop_set(&mut self, weight: &str, reps: &str) -> Result<(), WorkoutError> {
        let (weight, reps) = parse_inputs(weight, reps)?;
        let Some(set) = self
            .last_set
            .and_then(|(e, s)| self.exercises.get_mut(e).and_then(|e| e.sets.get_mut(s)))
        else {
            return Err(WorkoutError::NoSet);
        };
        set.drop_sets.push(DropSet { weight, reps });
        Ok(())
    }

    /// Turn a finished workout into a session.
    pub fn finish(self, now: NaiveDateTime) -> Result<WorkoutSession, WorkoutError> {
        if self.phase != Phase::Finished {
            return Err(WorkoutError::NotFinished);
        }

        Ok(WorkoutSession {
            id: WorkoutSessionID::new(),
            timestamp: self.started_at,
            routine: SessionRoutine::Routine(self.routine_id),
            routine_name: self.routine_name,
            exercises: self
                .exercises
                .into_iter()
                .map(|e| ExerciseRecord {
                    name: e.name,
                    sets: e.sets,
                })
                .collect(),
            total_time: Seconds::saturating((now - self.started_at).num_seconds()),
        })
    }
}

fn parse_inputs(weight: &str, reps: &str) -> Result<(Weight, Reps), WorkoutError> {
    if weight.trim().is_empty() || reps.trim().is_empty() {
        return Err(WorkoutError::MissingInput);
    }
    Ok((Weight::try_from(weight)?, Reps::try_from(reps)?))
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutError {
    #[error("Routine has no exercises")]
    EmptyRoutine,
    #[error("Enter weight and reps")]
    MissingInput,
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error(transparent)]
    Reps(#[from] RepsError),
    #[error("No set logged")]
    NoSet,
    #[error("Workout is not finished")]
    NotFinished,
    #[error("Workout is already finished")]
    Finished,
    #[error("Rest in progress")]
    Resting,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use pretty_assertions::assert_eq;

    use crate::{ExerciseTemplate, Name};

    use super::*;

    static START: std::sync::LazyLock<NaiveDateTime> = std::sync::LazyLock::new(|| {
        NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    });

    fn routine() -> Routine {
        Routine {
            id: 1.into(),
            name: Name::new("Legs").unwrap(),
            exercises: vec![
                ExerciseTemplate {
                    name: Name::new("Squat").unwrap(),
                    sets: Sets::new(2).unwrap(),
                    reps: Reps::new(5).unwrap(),
                    rest: Seconds::new(3).unwrap(),
                },
                ExerciseTemplate {
                    name: Name::new("Calf Raise").unwrap(),
                    sets: Sets::new(1).unwrap(),
                    reps: Reps::new(15).unwrap(),
                    rest: Seconds::new(60).unwrap(),
                },
            ],
        }
    }

    fn previous_session() -> WorkoutSession {
        WorkoutSession {
            id: 7.into(),
            timestamp: *START - Duration::days(3),
            routine: SessionRoutine::Routine(1.into()),
            routine_name: "Legs".to_string(),
            exercises: vec![ExerciseRecord {
                name: "squat".to_string(),
                sets: vec![Set {
                    weight: Weight::new(90.0).unwrap(),
                    reps: Reps::new(5).unwrap(),
                    time: Seconds::new(20).unwrap(),
                    drop_sets: vec![],
                }],
            }],
            total_time: Seconds::new(1200).unwrap(),
        }
    }

    #[test]
    fn test_start() {
        let workout = Workout::start(&routine(), &[previous_session()], *START).unwrap();

        assert_eq!(workout.phase(), Phase::Exercise);
        assert_eq!(workout.position(), 0);
        assert_eq!(workout.routine_name(), "Legs");
        assert_eq!(
            workout.exercises()[0].last_performance,
            Some(previous_session().exercises[0].clone())
        );
        assert_eq!(workout.exercises()[1].last_performance, None);
    }

    #[test]
    fn test_start_empty_routine() {
        let mut routine = routine();
        routine.exercises.clear();
        assert_eq!(
            Workout::start(&routine, &[], *START),
            Err(WorkoutError::EmptyRoutine)
        );
    }

    #[test]
    fn test_complete_workout() {
        let mut workout = Workout::start(&routine(), &[], *START).unwrap();

        workout.start_pause_stopwatch();
        workout.tick();
        workout.tick();
        assert_eq!(
            workout.log_set("100", "5"),
            Ok(Phase::Rest(Countdown::new(Seconds::new(3).unwrap())))
        );
        assert_eq!(workout.exercises()[0].sets[0].time, Seconds::new(2).unwrap());
        assert!(!workout.stopwatch().is_running());

        workout.tick();
        workout.tick();
        workout.tick();
        assert_eq!(workout.phase(), Phase::Exercise);

        assert_eq!(workout.log_set("100", "4"), Ok(Phase::Exercise));
        assert_eq!(workout.position(), 1);
        workout.log_drop_set("70", "6").unwrap();

        assert_eq!(workout.log_set("40", "15"), Ok(Phase::Finished));
        assert_eq!(workout.current_exercise(), None);
        assert_eq!(workout.log_set("40", "15"), Err(WorkoutError::Finished));

        let session = workout.finish(*START + Duration::minutes(45)).unwrap();

        assert_eq!(session.timestamp, *START);
        assert_eq!(session.routine, SessionRoutine::Routine(1.into()));
        assert_eq!(session.routine_name, "Legs");
        assert_eq!(session.total_time, Seconds::new(2700).unwrap());
        assert_eq!(
            session
                .exercises
                .iter()
                .map(|e| (e.name.as_str(), e.sets.len()))
                .collect::<Vec<_>>(),
            vec![("Squat", 2), ("Calf Raise", 1)]
        );
        assert_eq!(
            session.exercises[0].sets[1].drop_sets,
            vec![DropSet {
                weight: Weight::new(70.0).unwrap(),
                reps: Reps::new(6).unwrap()
            }]
        );
    }

    #[test]
    fn test_skip_rest() {
        let mut workout = Workout::start(&routine(), &[], *START).unwrap();
        workout.log_set("100", "5").unwrap();
        workout.start_pause_rest();
        workout.tick();
        assert!(matches!(workout.phase(), Phase::Rest(c) if c.remaining() == Seconds::new(3).unwrap()));

        workout.skip_rest();
        assert_eq!(workout.phase(), Phase::Exercise);
        assert_eq!(workout.position(), 0);
    }

    #[test]
    fn test_log_set_while_resting() {
        let mut workout = Workout::start(&routine(), &[], *START).unwrap();
        workout.log_set("100", "5").unwrap();

        assert_eq!(workout.log_set("100", "5"), Err(WorkoutError::Resting));
        assert_eq!(workout.exercises()[0].sets.len(), 1);
        assert!(matches!(workout.phase(), Phase::Rest(c) if c.remaining() == Seconds::new(3).unwrap()));

        workout.skip_rest();
        assert_eq!(workout.log_set("100", "5"), Ok(Phase::Exercise));
        assert_eq!(workout.exercises()[0].sets.len(), 2);
    }

    #[test]
    fn test_log_set_without_rest() {
        let mut routine = routine();
        routine.exercises[0].rest = Seconds::default();
        let mut workout = Workout::start(&routine, &[], *START).unwrap();

        assert_eq!(workout.log_set("100", "5"), Ok(Phase::Exercise));
        assert_eq!(workout.position(), 0);
        assert_eq!(workout.log_set("100", "5"), Ok(Phase::Exercise));
        assert_eq!(workout.position(), 1);
    }

    #[test]
    fn test_log_set_missing_input() {
        let mut workout = Workout::start(&routine(), &[], *START).unwrap();
        assert_eq!(workout.log_set("", "5"), Err(WorkoutError::MissingInput));
        assert_eq!(workout.log_set("100", " "), Err(WorkoutError::MissingInput));
        assert_eq!(
            workout.log_set("100", "five"),
            Err(WorkoutError::Reps(RepsError::ParseError))
        );
        assert!(workout.exercises()[0].sets.is_empty());
    }

    #[test]
    fn test_log_drop_set_without_set() {
        let mut workout = Workout::start(&routine(), &[], *START).unwrap();
        assert_eq!(workout.log_drop_set("50", "8"), Err(WorkoutError::NoSet));
    }

    #[test]
    fn test_finish_unfinished_workout() {
        let workout = Workout::start(&routine(), &[], *START).unwrap();
        assert_eq!(workout.finish(*START), Err(WorkoutError::NotFinished));
    }
}
