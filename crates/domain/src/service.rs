use chrono::NaiveDate;
use log::{error, info, warn};

use crate::{
    Calendar, CalendarRepository, CalendarService, Confirmed, CreateError, DataRepository,
    DataService, DeleteError, DeleteExerciseHistory, DeleteRoutine, DeleteWorkoutSession,
    ExerciseTemplate, Name, ReadError, Routine, RoutineID, RoutineRepository, RoutineService,
    UpdateError, WipeAllData, WorkoutSession, WorkoutSessionID, WorkoutSessionRepository,
    WorkoutSessionService,
};

/// Typed access to all persisted data.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable) => {
                    warn!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: RoutineRepository + CalendarRepository> RoutineService for Service<R> {
    async fn get_routines(&self) -> Result<Vec<Routine>, ReadError> {
        log_on_error!(
            self.repository.read_routines(),
            ReadError,
            "get",
            "routines"
        )
    }

    async fn create_routine(
        &self,
        name: Name,
        exercises: Vec<ExerciseTemplate>,
    ) -> Result<Routine, CreateError> {
        log_on_error!(
            self.repository.create_routine(name, exercises),
            CreateError,
            "create",
            "routine"
        )
    }

    async fn replace_routine(&self, routine: Routine) -> Result<Routine, UpdateError> {
        log_on_error!(
            self.repository.replace_routine(routine),
            UpdateError,
            "replace",
            "routine"
        )
    }

    async fn delete_routine(
        &self,
        action: Confirmed<DeleteRoutine>,
    ) -> Result<RoutineID, DeleteError> {
        let DeleteRoutine(id) = action.into_inner();
        if !self.get_routines().await?.iter().any(|r| r.id == id) {
            return Err(DeleteError::NotFound);
        }
        let mut calendar = self.get_calendar().await?;
        let assignments = calendar.len();
        calendar.remove_routine(id);
        // No assignment may outlive its routine.
        if calendar.len() != assignments {
            info!(
                "removing {} calendar assignments of deleted routine",
                assignments - calendar.len()
            );
            log_on_error!(
                self.repository.replace_calendar(calendar),
                UpdateError,
                "replace",
                "calendar"
            )?;
        }
        log_on_error!(
            self.repository.delete_routine(id),
            DeleteError,
            "delete",
            "routine"
        )
    }
}

impl<R: CalendarRepository + RoutineRepository> CalendarService for Service<R> {
    async fn get_calendar(&self) -> Result<Calendar, ReadError> {
        log_on_error!(
            self.repository.read_calendar(),
            ReadError,
            "get",
            "calendar"
        )
    }

    async fn assign_routine(
        &self,
        date: NaiveDate,
        routine_id: RoutineID,
    ) -> Result<Calendar, UpdateError> {
        if !self
            .get_routines()
            .await?
            .iter()
            .any(|r| r.id == routine_id)
        {
            return Err(UpdateError::NotFound);
        }
        let mut calendar = self.get_calendar().await?;
        calendar.assign(date, routine_id);
        log_on_error!(
            self.repository.replace_calendar(calendar),
            UpdateError,
            "replace",
            "calendar"
        )
    }

    async fn unassign_routine(&self, date: NaiveDate) -> Result<Calendar, UpdateError> {
        let mut calendar = self.get_calendar().await?;
        if calendar.unassign(date).is_none() {
            return Ok(calendar);
        }
        log_on_error!(
            self.repository.replace_calendar(calendar),
            UpdateError,
            "replace",
            "calendar"
        )
    }
}

impl<R: WorkoutSessionRepository> WorkoutSessionService for Service<R> {
    async fn get_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.read_workout_sessions(),
            ReadError,
            "get",
            "workout sessions"
        )
    }

    async fn create_workout_session(
        &self,
        session: WorkoutSession,
    ) -> Result<WorkoutSession, CreateError> {
        log_on_error!(
            self.repository.create_workout_session(session),
            CreateError,
            "create",
            "workout session"
        )
    }

    async fn delete_workout_session(
        &self,
        action: Confirmed<DeleteWorkoutSession>,
    ) -> Result<WorkoutSessionID, DeleteError> {
        let DeleteWorkoutSession(id) = action.into_inner();
        let deleted = log_on_error!(
            self.repository.delete_workout_sessions(&[id]),
            DeleteError,
            "delete",
            "workout session"
        )?;
        deleted.into_iter().next().ok_or(DeleteError::NotFound)
    }

    async fn delete_exercise_history(
        &self,
        action: Confirmed<DeleteExerciseHistory>,
    ) -> Result<Vec<WorkoutSessionID>, DeleteError> {
        let DeleteExerciseHistory(name) = action.into_inner();
        let ids = self
            .get_workout_sessions()
            .await?
            .iter()
            .filter(|s| s.exercise(name.as_ref()).is_some())
            .map(|s| s.id)
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Ok(ids);
        }
        info!("deleting {} workout sessions containing {name}", ids.len());
        log_on_error!(
            self.repository.delete_workout_sessions(&ids),
            DeleteError,
            "delete",
            "exercise history"
        )
    }
}

impl<R: DataRepository> DataService for Service<R> {
    async fn wipe_all_data(&self, _: Confirmed<WipeAllData>) -> Result<(), DeleteError> {
        info!("deleting all data");
        log_on_error!(
            self.repository.clear_all(),
            DeleteError,
            "delete",
            "all data"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use crate::{
        ExerciseRecord, Pending, Reps, Seconds, SessionRoutine, Set, Sets, StorageError, Weight,
    };

    use super::*;

    #[derive(Default)]
    struct MemoryRepository {
        routines: RefCell<Vec<Routine>>,
        calendar: RefCell<Calendar>,
        sessions: RefCell<Vec<WorkoutSession>>,
        unavailable: bool,
        calendar_read_only: bool,
    }

    impl MemoryRepository {
        fn check(&self) -> Result<(), StorageError> {
            if self.unavailable {
                Err(StorageError::Unavailable)
            } else {
                Ok(())
            }
        }
    }

    impl RoutineRepository for MemoryRepository {
        async fn read_routines(&self) -> Result<Vec<Routine>, ReadError> {
            self.check()?;
            Ok(self.routines.borrow().clone())
        }

        async fn create_routine(
            &self,
            name: Name,
            exercises: Vec<ExerciseTemplate>,
        ) -> Result<Routine, CreateError> {
            let routine = Routine {
                id: Uuid::new_v4().into(),
                name,
                exercises,
            };
            self.routines.borrow_mut().push(routine.clone());
            Ok(routine)
        }

        async fn replace_routine(&self, routine: Routine) -> Result<Routine, UpdateError> {
            let mut routines = self.routines.borrow_mut();
            let r = routines
                .iter_mut()
                .find(|r| r.id == routine.id)
                .ok_or(UpdateError::NotFound)?;
            *r = routine.clone();
            Ok(routine)
        }

        async fn delete_routine(&self, id: RoutineID) -> Result<RoutineID, DeleteError> {
            let mut routines = self.routines.borrow_mut();
            let len = routines.len();
            routines.retain(|r| r.id != id);
            if routines.len() == len {
                return Err(DeleteError::NotFound);
            }
            Ok(id)
        }
    }

    impl CalendarRepository for MemoryRepository {
        async fn read_calendar(&self) -> Result<Calendar, ReadError> {
            self.check()?;
            Ok(self.calendar.borrow().clone())
        }

        async fn replace_calendar(&self, calendar: Calendar) -> Result<Calendar, UpdateError> {
            if self.calendar_read_only {
                return Err(UpdateError::Storage(StorageError::Other(
                    "quota exceeded".into(),
                )));
            }
            *self.calendar.borrow_mut() = calendar.clone();
            Ok(calendar)
        }
    }

    impl WorkoutSessionRepository for MemoryRepository {
        async fn read_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError> {
            self.check()?;
            Ok(self.sessions.borrow().clone())
        }

        async fn create_workout_session(
            &self,
            session: WorkoutSession,
        ) -> Result<WorkoutSession, CreateError> {
            self.sessions.borrow_mut().push(session.clone());
            Ok(session)
        }

        async fn delete_workout_sessions(
            &self,
            ids: &[WorkoutSessionID],
        ) -> Result<Vec<WorkoutSessionID>, DeleteError> {
            let mut sessions = self.sessions.borrow_mut();
            let deleted = sessions
                .iter()
                .filter(|s| ids.contains(&s.id))
                .map(|s| s.id)
                .collect::<Vec<_>>();
            sessions.retain(|s| !ids.contains(&s.id));
            Ok(deleted)
        }
    }

    impl DataRepository for MemoryRepository {
        async fn clear_all(&self) -> Result<(), DeleteError> {
            self.routines.borrow_mut().clear();
            *self.calendar.borrow_mut() = Calendar::default();
            self.sessions.borrow_mut().clear();
            Ok(())
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn timestamp(day: u32) -> NaiveDateTime {
        date(day).and_hms_opt(18, 0, 0).unwrap()
    }

    fn template(name: &str) -> ExerciseTemplate {
        ExerciseTemplate {
            name: Name::new(name).unwrap(),
            sets: Sets::new(3).unwrap(),
            reps: Reps::new(10).unwrap(),
            rest: Seconds::new(60).unwrap(),
        }
    }

    fn session(id: u128, day: u32, exercises: &[&str]) -> WorkoutSession {
        WorkoutSession {
            id: id.into(),
            timestamp: timestamp(day),
            routine: SessionRoutine::Manual,
            routine_name: "Manual".to_string(),
            exercises: exercises
                .iter()
                .map(|name| ExerciseRecord {
                    name: (*name).to_string(),
                    sets: vec![Set {
                        weight: Weight::new(20.0).unwrap(),
                        reps: Reps::new(10).unwrap(),
                        time: Seconds::default(),
                        drop_sets: vec![],
                    }],
                })
                .collect(),
            total_time: Seconds::default(),
        }
    }

    async fn service_with_routines() -> (Service<MemoryRepository>, Routine, Routine) {
        let service = Service::new(MemoryRepository::default());
        let push = service
            .create_routine(Name::new("Push").unwrap(), vec![template("Bench Press")])
            .await
            .unwrap();
        let pull = service
            .create_routine(Name::new("Pull").unwrap(), vec![template("Row")])
            .await
            .unwrap();
        (service, push, pull)
    }

    #[tokio::test]
    async fn test_create_and_replace_routine() {
        let (service, mut push, pull) = service_with_routines().await;

        push.exercises.push(template("Dips"));
        service.replace_routine(push.clone()).await.unwrap();

        assert_eq!(service.get_routines().await.unwrap(), vec![push.clone(), pull]);
        assert_eq!(service.get_routine(push.id).await.unwrap(), push);
        assert!(matches!(
            service.get_routine(RoutineID::nil()).await,
            Err(ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_routine_removes_calendar_assignments() {
        let (service, push, pull) = service_with_routines().await;
        service.assign_routine(date(3), push.id).await.unwrap();
        service.assign_routine(date(4), pull.id).await.unwrap();
        service.assign_routine(date(5), push.id).await.unwrap();

        let deleted = service
            .delete_routine(Pending::new(DeleteRoutine(push.id)).confirm())
            .await
            .unwrap();

        assert_eq!(deleted, push.id);
        assert_eq!(service.get_routines().await.unwrap(), vec![pull.clone()]);
        let calendar = service.get_calendar().await.unwrap();
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar.routine_on(date(4)), Some(pull.id));
    }

    #[tokio::test]
    async fn test_delete_unknown_routine() {
        let (service, push, _) = service_with_routines().await;
        service.assign_routine(date(3), push.id).await.unwrap();
        assert!(matches!(
            service
                .delete_routine(Pending::new(DeleteRoutine(RoutineID::nil())).confirm())
                .await,
            Err(DeleteError::NotFound)
        ));
        assert_eq!(service.get_calendar().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assign_routine_replaces_assignment() {
        let (service, push, pull) = service_with_routines().await;
        service.assign_routine(date(3), push.id).await.unwrap();
        let calendar = service.assign_routine(date(3), pull.id).await.unwrap();

        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar.routine_on(date(3)), Some(pull.id));
    }

    #[tokio::test]
    async fn test_assign_unknown_routine() {
        let (service, _, _) = service_with_routines().await;
        assert!(matches!(
            service.assign_routine(date(3), RoutineID::nil()).await,
            Err(UpdateError::NotFound)
        ));
        assert!(service.get_calendar().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unassign_routine() {
        let (service, push, _) = service_with_routines().await;
        service.assign_routine(date(3), push.id).await.unwrap();

        assert!(service.unassign_routine(date(3)).await.unwrap().is_empty());
        assert!(service.unassign_routine(date(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_workout_session() {
        let service = Service::new(MemoryRepository::default());
        service
            .create_workout_session(session(1, 3, &["Squat"]))
            .await
            .unwrap();
        service
            .create_workout_session(session(2, 4, &["Squat"]))
            .await
            .unwrap();

        assert_eq!(
            service
                .delete_workout_session(Pending::new(DeleteWorkoutSession(1.into())).confirm())
                .await
                .unwrap(),
            1.into()
        );
        assert_eq!(
            service.get_workout_sessions().await.unwrap(),
            vec![session(2, 4, &["Squat"])]
        );
        assert!(matches!(
            service
                .delete_workout_session(Pending::new(DeleteWorkoutSession(1.into())).confirm())
                .await,
            Err(DeleteError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_exercise_history() {
        let service = Service::new(MemoryRepository::default());
        for s in [
            session(1, 3, &["Squat", "Lunge"]),
            session(2, 4, &["Bench Press"]),
            session(3, 5, &["squat"]),
        ] {
            service.create_workout_session(s).await.unwrap();
        }

        let deleted = service
            .delete_exercise_history(
                Pending::new(DeleteExerciseHistory(Name::new("SQUAT").unwrap())).confirm(),
            )
            .await
            .unwrap();

        assert_eq!(deleted, vec![1.into(), 3.into()]);
        assert_eq!(
            service.get_workout_sessions().await.unwrap(),
            vec![session(2, 4, &["Bench Press"])]
        );
    }

    #[tokio::test]
    async fn test_wipe_all_data() {
        let (service, push, _) = service_with_routines().await;
        service.assign_routine(date(3), push.id).await.unwrap();
        service
            .create_workout_session(session(1, 3, &["Squat"]))
            .await
            .unwrap();

        service
            .wipe_all_data(Pending::new(WipeAllData).confirm_with("DELETE ALL").unwrap())
            .await
            .unwrap();

        assert!(service.get_routines().await.unwrap().is_empty());
        assert!(service.get_calendar().await.unwrap().is_empty());
        assert!(service.get_workout_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_routine_keeps_routine_if_calendar_update_fails() {
        let (mut service, push, pull) = service_with_routines().await;
        service.assign_routine(date(3), push.id).await.unwrap();
        service.repository.calendar_read_only = true;

        assert!(matches!(
            service
                .delete_routine(Pending::new(DeleteRoutine(push.id)).confirm())
                .await,
            Err(DeleteError::Storage(StorageError::Other(_)))
        ));
        assert_eq!(
            service.get_routines().await.unwrap(),
            vec![push.clone(), pull]
        );
        assert_eq!(
            service.get_calendar().await.unwrap().routine_on(date(3)),
            Some(push.id)
        );
    }

    #[tokio::test]
    async fn test_storage_unavailable() {
        let service = Service::new(MemoryRepository {
            unavailable: true,
            ..MemoryRepository::default()
        });
        assert!(matches!(
            service.get_routines().await,
            Err(ReadError::Storage(StorageError::Unavailable))
        ));
        assert!(matches!(
            service.unassign_routine(date(3)).await,
            Err(UpdateError::Storage(StorageError::Unavailable))
        ));
    }
}
