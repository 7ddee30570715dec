use chrono::{NaiveDate, NaiveTime};

use crate::{
    ExerciseRecord, Name, NameError, Reps, RepsError, Routine, RoutineID, Seconds, SecondsError,
    SessionRoutine, Set, Weight, WeightError, WorkoutSession, WorkoutSessionID,
};

/// Form model for entering a past workout.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntry {
    pub routine_id: Option<RoutineID>,
    pub name: String,
    pub date: String,
    pub time: String,
    pub total_time: String,
    pub exercises: Vec<ManualExercise>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ManualExercise {
    pub name: String,
    pub sets: Vec<ManualSet>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ManualSet {
    pub weight: String,
    pub reps: String,
    pub time: String,
}

impl Default for ManualEntry {
    fn default() -> Self {
        Self {
            routine_id: None,
            name: String::new(),
            date: String::new(),
            time: String::new(),
            total_time: String::new(),
            exercises: vec![ManualExercise::blank()],
        }
    }
}

impl ManualExercise {
    fn blank() -> Self {
        Self {
            name: String::new(),
            sets: vec![ManualSet::default()],
        }
    }
}

impl ManualEntry {
    /// Select the routine the session was based on.
    ///
    /// The exercises are replaced by the exercises of the routine with one blank row per
    /// planned set. Deselecting the routine resets the exercises.
    pub fn select_routine(&mut self, routine: Option<&Routine>) {
        self.routine_id = routine.map(|r| r.id);
        self.exercises = match routine {
            Some(routine) => routine
                .exercises
                .iter()
                .map(|e| ManualExercise {
                    name: e.name.to_string(),
                    sets: (0..u32::from(e.sets))
                        .map(|_| ManualSet::default())
                        .collect(),
                })
                .collect(),
            None => vec![ManualExercise::blank()],
        };
    }

    pub fn add_exercise(&mut self) {
        self.exercises.push(ManualExercise::blank());
    }

    /// Remove an exercise. The last remaining exercise is kept.
    pub fn remove_exercise(&mut self, index: usize) {
        if self.exercises.len() > 1 && index < self.exercises.len() {
            self.exercises.remove(index);
        }
    }

    pub fn add_set(&mut self, exercise: usize) {
        if let Some(exercise) = self.exercises.get_mut(exercise) {
            exercise.sets.push(ManualSet::default());
        }
    }

    pub fn remove_set(&mut self, exercise: usize, set: usize) {
        if let Some(exercise) = self.exercises.get_mut(exercise) {
            if set < exercise.sets.len() {
                exercise.sets.remove(set);
            }
        }
    }

    /// Validate the form and create a session from it.
    pub fn validate(&self, routines: &[Routine]) -> Result<WorkoutSession, ManualEntryError> {
        if self.date.trim().is_empty() || self.time.trim().is_empty() {
            return Err(ManualEntryError::MissingDateTime);
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ManualEntryError::InvalidDate)?;
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(self.time.trim(), "%H:%M:%S"))
            .map_err(|_| ManualEntryError::InvalidTime)?;

        let (routine, routine_name) = match self.routine_id {
            Some(id) => {
                let routine = routines
                    .iter()
                    .find(|r| r.id == id)
                    .ok_or(ManualEntryError::UnknownRoutine)?;
                (SessionRoutine::Routine(id), routine.name.to_string())
            }
            None => {
                if self.name.trim().is_empty() {
                    return Err(ManualEntryError::MissingName);
                }
                (SessionRoutine::Manual, Name::new(&self.name)?.to_string())
            }
        };

        if self.exercises.is_empty() {
            return Err(ManualEntryError::NoExercises);
        }

        let exercises = self
            .exercises
            .iter()
            .enumerate()
            .map(|(i, exercise)| exercise.validate(i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let total_time = if self.total_time.trim().is_empty() {
            Seconds::default()
        } else {
            Seconds::try_from(self.total_time.as_str())
                .map_err(ManualEntryError::TotalTime)?
        };

        Ok(WorkoutSession {
            id: WorkoutSessionID::new(),
            timestamp: date.and_time(time),
            routine,
            routine_name,
            exercises,
            total_time,
        })
    }
}

impl ManualExercise {
    fn validate(&self, exercise: usize) -> Result<ExerciseRecord, ManualEntryError> {
        let name = Name::new(&self.name)
            .map_err(|err| ManualEntryError::ExerciseName(exercise, err))?;
        let sets = self
            .sets
            .iter()
            .enumerate()
            .map(|(i, set)| set.validate(exercise, i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ExerciseRecord {
            name: name.to_string(),
            sets,
        })
    }
}

impl ManualSet {
    fn validate(&self, exercise: usize, set: usize) -> Result<Set, ManualEntryError> {
        if self.weight.trim().is_empty() || self.reps.trim().is_empty() {
            return Err(ManualEntryError::IncompleteSet(exercise, set));
        }
        Ok(Set {
            weight: Weight::try_from(self.weight.as_str())
                .map_err(|err| ManualEntryError::Weight(exercise, set, err))?,
            reps: Reps::try_from(self.reps.as_str())
                .map_err(|err| ManualEntryError::Reps(exercise, set, err))?,
            time: if self.time.trim().is_empty() {
                Seconds::default()
            } else {
                Seconds::try_from(self.time.as_str())
                    .map_err(|err| ManualEntryError::Time(exercise, set, err))?
            },
            drop_sets: vec![],
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ManualEntryError {
    #[error("Enter date and time of the workout")]
    MissingDateTime,
    #[error("Invalid date")]
    InvalidDate,
    #[error("Invalid time")]
    InvalidTime,
    #[error("Select a routine or enter a name")]
    MissingName,
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("Routine does not exist")]
    UnknownRoutine,
    #[error("Add at least one exercise")]
    NoExercises,
    #[error("Exercise {0}: {1}")]
    ExerciseName(usize, NameError),
    #[error("Exercise {0}, set {1}: Enter weight and reps")]
    IncompleteSet(usize, usize),
    #[error("Exercise {0}, set {1}: {2}")]
    Weight(usize, usize, WeightError),
    #[error("Exercise {0}, set {1}: {2}")]
    Reps(usize, usize, RepsError),
    #[error("Exercise {0}, set {1}: {2}")]
    Time(usize, usize, SecondsError),
    #[error("Total time: {0}")]
    TotalTime(SecondsError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ExerciseTemplate, Sets};

    use super::*;

    fn routine() -> Routine {
        Routine {
            id: 1.into(),
            name: Name::new("Pull").unwrap(),
            exercises: vec![ExerciseTemplate {
                name: Name::new("Row").unwrap(),
                sets: Sets::new(3).unwrap(),
                reps: Reps::new(10).unwrap(),
                rest: Seconds::new(60).unwrap(),
            }],
        }
    }

    fn set(weight: &str, reps: &str, time: &str) -> ManualSet {
        ManualSet {
            weight: weight.to_string(),
            reps: reps.to_string(),
            time: time.to_string(),
        }
    }

    fn entry() -> ManualEntry {
        ManualEntry {
            routine_id: None,
            name: "Home workout".to_string(),
            date: "2024-06-10".to_string(),
            time: "07:30".to_string(),
            total_time: String::new(),
            exercises: vec![ManualExercise {
                name: "Push-up".to_string(),
                sets: vec![set("0", "20", ""), set("0", "15", "45")],
            }],
        }
    }

    #[test]
    fn test_select_routine() {
        let mut entry = ManualEntry::default();
        entry.select_routine(Some(&routine()));

        assert_eq!(entry.routine_id, Some(1.into()));
        assert_eq!(
            entry.exercises,
            vec![ManualExercise {
                name: "Row".to_string(),
                sets: vec![ManualSet::default(); 3],
            }]
        );

        entry.select_routine(None);
        assert_eq!(entry.routine_id, None);
        assert_eq!(entry.exercises, ManualEntry::default().exercises);
    }

    #[test]
    fn test_add_remove() {
        let mut entry = ManualEntry::default();
        entry.remove_exercise(0);
        assert_eq!(entry.exercises.len(), 1);

        entry.add_exercise();
        entry.add_set(1);
        assert_eq!(entry.exercises[1].sets.len(), 2);

        entry.remove_set(1, 0);
        entry.remove_exercise(0);
        assert_eq!(entry.exercises.len(), 1);
        assert_eq!(entry.exercises[0].sets.len(), 1);
    }

    #[test]
    fn test_validate_manual_session() {
        let session = entry().validate(&[]).unwrap();

        assert_eq!(
            session.timestamp,
            NaiveDate::from_ymd_opt(2024, 6, 10)
                .unwrap()
                .and_hms_opt(7, 30, 0)
                .unwrap()
        );
        assert_eq!(session.routine, SessionRoutine::Manual);
        assert_eq!(session.routine_name, "Home workout");
        assert_eq!(session.total_time, Seconds::default());
        assert_eq!(
            session.exercises[0]
                .sets
                .iter()
                .map(|s| (u32::from(s.reps), u32::from(s.time)))
                .collect::<Vec<_>>(),
            vec![(20, 0), (15, 45)]
        );
    }

    #[test]
    fn test_validate_routine_session() {
        let mut entry = entry();
        entry.select_routine(Some(&routine()));
        for set in &mut entry.exercises[0].sets {
            *set = ManualSet {
                weight: "50".to_string(),
                reps: "10".to_string(),
                time: String::new(),
            };
        }
        entry.total_time = "2400".to_string();

        let session = entry.validate(&[routine()]).unwrap();

        assert_eq!(session.routine, SessionRoutine::Routine(1.into()));
        assert_eq!(session.routine_name, "Pull");
        assert_eq!(session.num_sets(), 3);
        assert_eq!(session.total_time, Seconds::new(2400).unwrap());
    }

    #[rstest]
    #[case::missing_date(|e: &mut ManualEntry| e.date.clear(), ManualEntryError::MissingDateTime)]
    #[case::missing_time(|e: &mut ManualEntry| e.time.clear(), ManualEntryError::MissingDateTime)]
    #[case::invalid_date(|e: &mut ManualEntry| e.date = "10.06.2024".to_string(), ManualEntryError::InvalidDate)]
    #[case::missing_name(|e: &mut ManualEntry| e.name = " ".to_string(), ManualEntryError::MissingName)]
    #[case::unknown_routine(|e: &mut ManualEntry| e.routine_id = Some(9.into()), ManualEntryError::UnknownRoutine)]
    #[case::no_exercises(|e: &mut ManualEntry| e.exercises.clear(), ManualEntryError::NoExercises)]
    #[case::missing_exercise_name(
        |e: &mut ManualEntry| e.exercises[0].name.clear(),
        ManualEntryError::ExerciseName(1, NameError::Empty)
    )]
    #[case::incomplete_set(
        |e: &mut ManualEntry| e.exercises[0].sets[1].reps.clear(),
        ManualEntryError::IncompleteSet(1, 2)
    )]
    #[case::invalid_weight(
        |e: &mut ManualEntry| e.exercises[0].sets[0].weight = "1.25".to_string(),
        ManualEntryError::Weight(1, 1, WeightError::InvalidResolution)
    )]
    #[case::invalid_total_time(
        |e: &mut ManualEntry| e.total_time = "1h".to_string(),
        ManualEntryError::TotalTime(SecondsError::ParseError)
    )]
    fn test_validate_error(
        #[case] modify: fn(&mut ManualEntry),
        #[case] expected: ManualEntryError,
    ) {
        let mut entry = entry();
        modify(&mut entry);
        assert_eq!(entry.validate(&[routine()]), Err(expected));
    }
}
