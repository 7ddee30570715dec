use std::{
    collections::{BTreeMap, VecDeque},
    sync::Mutex,
};

use chrono::{NaiveDate, NaiveDateTime};
use gloo_storage::Storage as _;
use gymlog_domain as domain;
use gymlog_web_app as web_app;
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;
use uuid::Uuid;

/// Key-value storage holding JSON documents.
pub trait Backend {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BackendError>;
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), BackendError>;
    fn delete(&self, key: &str) -> Result<(), BackendError>;
}

/// The local storage of the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct Browser;

impl Backend for Browser {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BackendError> {
        match gloo_storage::LocalStorage::get(key) {
            Ok(value) => Ok(Some(value)),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), BackendError> {
        Ok(gloo_storage::LocalStorage::set(key, value)?)
    }

    fn delete(&self, key: &str) -> Result<(), BackendError> {
        gloo_storage::LocalStorage::delete(key);
        Ok(())
    }
}

/// Volatile storage kept in memory.
#[derive(Debug, Default)]
pub struct Memory {
    entries: Mutex<BTreeMap<String, String>>,
}

impl Backend for Memory {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, BackendError> {
        let entries = self.entries.lock().map_err(|_| BackendError::Poisoned)?;
        Ok(entries
            .get(key)
            .map(|value| serde_json::from_str(value))
            .transpose()?)
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), BackendError> {
        let value = serde_json::to_string(value)?;
        self.entries
            .lock()
            .map_err(|_| BackendError::Poisoned)?
            .insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), BackendError> {
        self.entries
            .lock()
            .map_err(|_| BackendError::Poisoned)?
            .remove(key);
        Ok(())
    }
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    #[strum(serialize = "routines")]
    Routines,
    #[strum(serialize = "calendar")]
    Calendar,
    #[strum(serialize = "workout_sessions")]
    WorkoutSessions,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

impl Store {
    /// Stores holding user data, in contrast to preferences and diagnostics.
    pub const DATA: [Store; 3] = [Store::Routines, Store::Calendar, Store::WorkoutSessions];
}

#[derive(Debug, Default)]
pub struct LocalStorage<B = Browser> {
    backend: B,
}

impl<B: Backend> LocalStorage<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn read<V: DeserializeOwned + Default>(&self, store: Store) -> Result<V, BackendError> {
        Ok(self.backend.get(store.as_ref())?.unwrap_or_default())
    }

    fn write<V: Serialize>(&self, store: Store, value: &V) -> Result<(), BackendError> {
        self.backend.set(store.as_ref(), value)
    }

    fn read_all<R, V>(&self, store: Store) -> Result<Vec<R>, BackendError>
    where
        R: TryFrom<V, Error = RecordError>,
        V: DeserializeOwned,
    {
        self.read::<Vec<V>>(store)?
            .into_iter()
            .map(|value| R::try_from(value).map_err(BackendError::from))
            .collect()
    }

    fn write_all<'a, V, R>(&self, store: Store, values: &'a [R]) -> Result<(), BackendError>
    where
        V: From<&'a R> + Serialize,
    {
        self.write(store, &values.iter().map(V::from).collect::<Vec<_>>())
    }
}

impl<B: Backend> domain::RoutineRepository for LocalStorage<B> {
    async fn read_routines(&self) -> Result<Vec<domain::Routine>, domain::ReadError> {
        Ok(self.read_all::<domain::Routine, Routine>(Store::Routines)?)
    }

    async fn create_routine(
        &self,
        name: domain::Name,
        exercises: Vec<domain::ExerciseTemplate>,
    ) -> Result<domain::Routine, domain::CreateError> {
        let mut routines = self.read_all::<domain::Routine, Routine>(Store::Routines)?;
        let mut id = Uuid::new_v4();
        while routines.iter().any(|r| *r.id == id) {
            id = Uuid::new_v4();
        }
        let routine = domain::Routine {
            id: id.into(),
            name,
            exercises,
        };
        routines.push(routine.clone());
        self.write_all::<Routine, _>(Store::Routines, &routines)?;
        debug!("created routine {}", routine.id.as_hyphenated());
        Ok(routine)
    }

    async fn replace_routine(
        &self,
        routine: domain::Routine,
    ) -> Result<domain::Routine, domain::UpdateError> {
        let mut routines = self.read_all::<domain::Routine, Routine>(Store::Routines)?;
        let Some(r) = routines.iter_mut().find(|r| r.id == routine.id) else {
            return Err(domain::UpdateError::NotFound);
        };
        *r = routine.clone();
        self.write_all::<Routine, _>(Store::Routines, &routines)?;
        Ok(routine)
    }

    async fn delete_routine(
        &self,
        id: domain::RoutineID,
    ) -> Result<domain::RoutineID, domain::DeleteError> {
        let mut routines = self.read_all::<domain::Routine, Routine>(Store::Routines)?;
        let len = routines.len();
        routines.retain(|r| r.id != id);
        if routines.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        self.write_all::<Routine, _>(Store::Routines, &routines)?;
        Ok(id)
    }
}

impl<B: Backend> domain::CalendarRepository for LocalStorage<B> {
    async fn read_calendar(&self) -> Result<domain::Calendar, domain::ReadError> {
        Ok(self
            .read::<Vec<CalendarAssignment>>(Store::Calendar)?
            .into_iter()
            .map(domain::CalendarAssignment::from)
            .collect())
    }

    async fn replace_calendar(
        &self,
        calendar: domain::Calendar,
    ) -> Result<domain::Calendar, domain::UpdateError> {
        self.write(
            Store::Calendar,
            &calendar
                .assignments()
                .map(CalendarAssignment::from)
                .collect::<Vec<_>>(),
        )?;
        Ok(calendar)
    }
}

impl<B: Backend> domain::WorkoutSessionRepository for LocalStorage<B> {
    async fn read_workout_sessions(
        &self,
    ) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        Ok(self.read_all::<domain::WorkoutSession, WorkoutSession>(Store::WorkoutSessions)?)
    }

    async fn create_workout_session(
        &self,
        session: domain::WorkoutSession,
    ) -> Result<domain::WorkoutSession, domain::CreateError> {
        let mut sessions =
            self.read_all::<domain::WorkoutSession, WorkoutSession>(Store::WorkoutSessions)?;
        if sessions.iter().any(|s| s.id == session.id) {
            return Err(domain::CreateError::Conflict);
        }
        sessions.push(session.clone());
        self.write_all::<WorkoutSession, _>(Store::WorkoutSessions, &sessions)?;
        Ok(session)
    }

    async fn delete_workout_sessions(
        &self,
        ids: &[domain::WorkoutSessionID],
    ) -> Result<Vec<domain::WorkoutSessionID>, domain::DeleteError> {
        let mut sessions =
            self.read_all::<domain::WorkoutSession, WorkoutSession>(Store::WorkoutSessions)?;
        let deleted = sessions
            .iter()
            .filter(|s| ids.contains(&s.id))
            .map(|s| s.id)
            .collect::<Vec<_>>();
        if !deleted.is_empty() {
            sessions.retain(|s| !ids.contains(&s.id));
            self.write_all::<WorkoutSession, _>(Store::WorkoutSessions, &sessions)?;
        }
        Ok(deleted)
    }
}

impl<B: Backend> domain::DataRepository for LocalStorage<B> {
    async fn clear_all(&self) -> Result<(), domain::DeleteError> {
        for store in Store::DATA {
            self.backend.delete(store.as_ref())?;
        }
        Ok(())
    }
}

impl<B: Backend> web_app::SettingsRepository for LocalStorage<B> {
    async fn read_settings(&self) -> Result<web_app::Settings, String> {
        self.read(Store::Settings).map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: web_app::Settings) -> Result<(), String> {
        self.write(Store::Settings, &settings)
            .map_err(|err| err.to_string())
    }
}

impl<B: Backend + Send + Sync + 'static> web_app::log::Repository for LocalStorage<B> {
    fn read_entries(&self) -> Result<VecDeque<web_app::log::Entry>, web_app::log::Error> {
        self.read(Store::Log)
            .map_err(|err| web_app::log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: web_app::log::Entry) -> Result<(), web_app::log::Error> {
        let mut entries = self.read_entries()?;
        web_app::log::append(&mut entries, entry);
        self.write(Store::Log, &entries)
            .map_err(|err| web_app::log::Error::Unknown(err.to_string()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error(transparent)]
    Browser(#[from] gloo_storage::errors::StorageError),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("invalid record: {0}")]
    Record(#[from] RecordError),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl From<BackendError> for domain::StorageError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Browser(gloo_storage::errors::StorageError::JsError(err)) => {
                debug!("local storage unavailable: {err}");
                domain::StorageError::Unavailable
            }
            err => domain::StorageError::Other(Box::new(err)),
        }
    }
}

impl From<BackendError> for domain::ReadError {
    fn from(value: BackendError) -> Self {
        domain::ReadError::Storage(value.into())
    }
}

impl From<BackendError> for domain::CreateError {
    fn from(value: BackendError) -> Self {
        domain::CreateError::Storage(value.into())
    }
}

impl From<BackendError> for domain::UpdateError {
    fn from(value: BackendError) -> Self {
        domain::UpdateError::Storage(value.into())
    }
}

impl From<BackendError> for domain::DeleteError {
    fn from(value: BackendError) -> Self {
        domain::DeleteError::Storage(value.into())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Sets(#[from] domain::SetsError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Seconds(#[from] domain::SecondsError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: Uuid,
    pub name: String,
    pub exercises: Vec<ExerciseTemplate>,
}

impl From<&domain::Routine> for Routine {
    fn from(value: &domain::Routine) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            exercises: value.exercises.iter().map(ExerciseTemplate::from).collect(),
        }
    }
}

impl TryFrom<Routine> for domain::Routine {
    type Error = RecordError;

    fn try_from(value: Routine) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseTemplate::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default = "default_rest")]
    pub rest: u32,
}

fn default_rest() -> u32 {
    domain::ExerciseTemplate::DEFAULT_REST
}

impl From<&domain::ExerciseTemplate> for ExerciseTemplate {
    fn from(value: &domain::ExerciseTemplate) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets.into(),
            reps: value.reps.into(),
            rest: value.rest.into(),
        }
    }
}

impl TryFrom<ExerciseTemplate> for domain::ExerciseTemplate {
    type Error = RecordError;

    fn try_from(value: ExerciseTemplate) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            sets: domain::Sets::new(value.sets)?,
            reps: domain::Reps::new(value.reps)?,
            rest: domain::Seconds::new(value.rest)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CalendarAssignment {
    pub date: NaiveDate,
    pub routine_id: Uuid,
}

impl From<domain::CalendarAssignment> for CalendarAssignment {
    fn from(value: domain::CalendarAssignment) -> Self {
        Self {
            date: value.date,
            routine_id: *value.routine_id,
        }
    }
}

impl From<CalendarAssignment> for domain::CalendarAssignment {
    fn from(value: CalendarAssignment) -> Self {
        Self {
            date: value.date,
            routine_id: value.routine_id.into(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub timestamp: NaiveDateTime,
    /// Missing for manually entered sessions.
    pub routine_id: Option<Uuid>,
    pub routine_name: String,
    pub exercises: Vec<ExerciseRecord>,
    pub total_time: u32,
}

impl From<&domain::WorkoutSession> for WorkoutSession {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self {
            id: *value.id,
            timestamp: value.timestamp,
            routine_id: value.routine_id().map(|id| *id),
            routine_name: value.routine_name.clone(),
            exercises: value.exercises.iter().map(ExerciseRecord::from).collect(),
            total_time: value.total_time.into(),
        }
    }
}

impl TryFrom<WorkoutSession> for domain::WorkoutSession {
    type Error = RecordError;

    fn try_from(value: WorkoutSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            timestamp: value.timestamp,
            routine: value
                .routine_id
                .map_or(domain::SessionRoutine::Manual, |id| {
                    domain::SessionRoutine::Routine(id.into())
                }),
            routine_name: value.routine_name,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseRecord::try_from)
                .collect::<Result<_, _>>()?,
            total_time: domain::Seconds::new(value.total_time)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub name: String,
    pub sets: Vec<Set>,
}

impl From<&domain::ExerciseRecord> for ExerciseRecord {
    fn from(value: &domain::ExerciseRecord) -> Self {
        Self {
            name: value.name.clone(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<ExerciseRecord> for domain::ExerciseRecord {
    type Error = RecordError;

    fn try_from(value: ExerciseRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            sets: value
                .sets
                .into_iter()
                .map(domain::Set::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Set {
    pub weight: f32,
    pub reps: u32,
    pub time: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drop_sets: Vec<DropSet>,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            weight: value.weight.into(),
            reps: value.reps.into(),
            time: value.time.into(),
            drop_sets: value.drop_sets.iter().map(DropSet::from).collect(),
        }
    }
}

impl TryFrom<Set> for domain::Set {
    type Error = RecordError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps)?,
            time: domain::Seconds::new(value.time)?,
            drop_sets: value
                .drop_sets
                .into_iter()
                .map(domain::DropSet::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct DropSet {
    pub weight: f32,
    pub reps: u32,
}

impl From<&domain::DropSet> for DropSet {
    fn from(value: &domain::DropSet) -> Self {
        Self {
            weight: value.weight.into(),
            reps: value.reps.into(),
        }
    }
}

impl TryFrom<DropSet> for domain::DropSet {
    type Error = RecordError;

    fn try_from(value: DropSet) -> Result<Self, Self::Error> {
        Ok(Self {
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use domain::{
        CalendarRepository, DataRepository, RoutineRepository, WorkoutSessionRepository,
    };
    use web_app::{SettingsRepository, log::Repository as _};

    use crate::tests::data::{
        CALENDAR, ROUTINE, ROUTINES, WORKOUT_SESSION, WORKOUT_SESSION_2,
        WORKOUT_SESSIONS,
    };

    use super::*;

    fn storage() -> LocalStorage<Memory> {
        LocalStorage::new(Memory::default())
    }

    #[test]
    fn test_routine_try_from() {
        assert_eq!(
            domain::Routine::try_from(Routine::from(&*ROUTINE)),
            Ok(ROUTINE.clone())
        );
    }

    #[test]
    fn test_routine_deserialize_without_rest() {
        let routine: Routine = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "name": "Push",
            "exercises": [{ "name": "Bench Press", "sets": 3, "reps": 10 }]
        }))
        .unwrap();
        assert_eq!(routine.exercises[0].rest, 60);
    }

    #[rstest]
    #[case::empty_name(json!({ "name": "", "sets": 3, "reps": 10, "rest": 60 }))]
    #[case::zero_sets(json!({ "name": "Squat", "sets": 0, "reps": 10, "rest": 60 }))]
    #[case::too_many_reps(json!({ "name": "Squat", "sets": 3, "reps": 1000, "rest": 60 }))]
    fn test_exercise_template_try_from_invalid(#[case] value: serde_json::Value) {
        let template: ExerciseTemplate = serde_json::from_value(value).unwrap();
        assert!(domain::ExerciseTemplate::try_from(template).is_err());
    }

    #[test]
    fn test_workout_session_try_from() {
        for session in WORKOUT_SESSIONS.iter() {
            assert_eq!(
                domain::WorkoutSession::try_from(WorkoutSession::from(session)),
                Ok(session.clone())
            );
        }
    }

    #[test]
    fn test_set_serialize_without_drop_sets() {
        let set = Set {
            weight: 20.5,
            reps: 8,
            time: 40,
            drop_sets: vec![],
        };
        assert_eq!(
            json!(set),
            json!({ "weight": 20.5, "reps": 8, "time": 40 })
        );
    }

    #[test]
    fn test_memory_backend() {
        let memory = Memory::default();
        assert_eq!(memory.get::<u32>("a").unwrap(), None);
        memory.set("a", &42).unwrap();
        assert_eq!(memory.get::<u32>("a").unwrap(), Some(42));
        memory.delete("a").unwrap();
        assert_eq!(memory.get::<u32>("a").unwrap(), None);
    }

    #[test]
    fn test_memory_backend_invalid_json() {
        let memory = Memory::default();
        memory.set("a", &"text").unwrap();
        assert!(matches!(
            memory.get::<u32>("a"),
            Err(BackendError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn test_routines() {
        let storage = storage();
        assert_eq!(storage.read_routines().await.unwrap(), vec![]);

        let routine = storage
            .create_routine(ROUTINE.name.clone(), ROUTINE.exercises.clone())
            .await
            .unwrap();
        assert!(!routine.id.is_nil());
        assert_eq!(storage.read_routines().await.unwrap(), vec![routine.clone()]);

        let replaced = domain::Routine {
            name: domain::Name::new("Upper").unwrap(),
            ..routine.clone()
        };
        assert_eq!(
            storage.replace_routine(replaced.clone()).await.unwrap(),
            replaced
        );
        assert_eq!(storage.read_routines().await.unwrap(), vec![replaced]);

        assert_eq!(storage.delete_routine(routine.id).await.unwrap(), routine.id);
        assert_eq!(storage.read_routines().await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_routines_not_found() {
        let storage = storage();
        assert!(matches!(
            storage.replace_routine(ROUTINE.clone()).await,
            Err(domain::UpdateError::NotFound)
        ));
        assert!(matches!(
            storage.delete_routine(ROUTINE.id).await,
            Err(domain::DeleteError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_routines_invalid_data() {
        let storage = storage();
        storage
            .backend
            .set(
                Store::Routines.as_ref(),
                &json!([{ "id": Uuid::nil(), "name": "", "exercises": [] }]),
            )
            .unwrap();
        assert!(matches!(
            storage.read_routines().await,
            Err(domain::ReadError::Storage(domain::StorageError::Other(_)))
        ));
    }

    #[tokio::test]
    async fn test_calendar() {
        let storage = storage();
        assert_eq!(
            storage.read_calendar().await.unwrap(),
            domain::Calendar::default()
        );
        assert_eq!(
            storage.replace_calendar(CALENDAR.clone()).await.unwrap(),
            *CALENDAR
        );
        assert_eq!(storage.read_calendar().await.unwrap(), *CALENDAR);
    }

    #[tokio::test]
    async fn test_workout_sessions() {
        let storage = storage();
        for session in WORKOUT_SESSIONS.iter() {
            storage
                .create_workout_session(session.clone())
                .await
                .unwrap();
        }
        assert_eq!(
            storage.read_workout_sessions().await.unwrap(),
            *WORKOUT_SESSIONS
        );
        assert!(matches!(
            storage.create_workout_session(WORKOUT_SESSION.clone()).await,
            Err(domain::CreateError::Conflict)
        ));

        assert_eq!(
            storage
                .delete_workout_sessions(&[WORKOUT_SESSION.id, domain::WorkoutSessionID::nil()])
                .await
                .unwrap(),
            vec![WORKOUT_SESSION.id]
        );
        assert_eq!(
            storage.read_workout_sessions().await.unwrap(),
            vec![WORKOUT_SESSION_2.clone()]
        );
    }

    #[tokio::test]
    async fn test_clear_all_keeps_settings() {
        let storage = storage();
        for routine in ROUTINES.iter() {
            storage
                .create_routine(routine.name.clone(), routine.exercises.clone())
                .await
                .unwrap();
        }
        storage.replace_calendar(CALENDAR.clone()).await.unwrap();
        storage
            .create_workout_session(WORKOUT_SESSION.clone())
            .await
            .unwrap();
        let settings = web_app::Settings {
            beep_volume: 20,
            theme: web_app::Theme::Dark,
        };
        storage.write_settings(settings).await.unwrap();

        storage.clear_all().await.unwrap();

        assert_eq!(storage.read_routines().await.unwrap(), vec![]);
        assert_eq!(
            storage.read_calendar().await.unwrap(),
            domain::Calendar::default()
        );
        assert_eq!(storage.read_workout_sessions().await.unwrap(), vec![]);
        assert_eq!(storage.read_settings().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_settings_default() {
        assert_eq!(
            storage().read_settings().await.unwrap(),
            web_app::Settings::default()
        );
    }

    #[test]
    fn test_log_entries() {
        let storage = storage();
        assert!(storage.read_entries().unwrap().is_empty());
        for i in 0..=web_app::log::MAX_ENTRIES {
            storage
                .write_entry(web_app::log::Entry {
                    time: String::new(),
                    level: log::Level::Info,
                    message: i.to_string(),
                })
                .unwrap();
        }
        let entries = storage.read_entries().unwrap();
        assert_eq!(entries.len(), web_app::log::MAX_ENTRIES);
        assert_eq!(
            entries.front().map(|e| e.message.clone()),
            Some(web_app::log::MAX_ENTRIES.to_string())
        );
    }

    #[test]
    fn test_store_keys() {
        assert_eq!(
            Store::DATA.map(|s| s.as_ref().to_string()),
            ["routines", "calendar", "workout_sessions"]
        );
    }
}
