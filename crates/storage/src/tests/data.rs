use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use gymlog_domain as domain;

fn template(name: &str, sets: u32, reps: u32, rest: u32) -> domain::ExerciseTemplate {
    domain::ExerciseTemplate {
        name: domain::Name::new(name).unwrap(),
        sets: domain::Sets::new(sets).unwrap(),
        reps: domain::Reps::new(reps).unwrap(),
        rest: domain::Seconds::new(rest).unwrap(),
    }
}

fn set(weight: f32, reps: u32, time: u32) -> domain::Set {
    domain::Set {
        weight: domain::Weight::new(weight).unwrap(),
        reps: domain::Reps::new(reps).unwrap(),
        time: domain::Seconds::new(time).unwrap(),
        drop_sets: vec![],
    }
}

fn timestamp(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDateTime::new(
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
    )
}

pub static ROUTINES: LazyLock<Vec<domain::Routine>> =
    LazyLock::new(|| vec![ROUTINE.clone(), ROUTINE_2.clone()]);

pub static ROUTINE: LazyLock<domain::Routine> = LazyLock::new(|| domain::Routine {
    id: 1.into(),
    name: domain::Name::new("Push").unwrap(),
    exercises: vec![
        template("Bench Press", 4, 8, 120),
        template("Overhead Press", 3, 10, 90),
    ],
});

pub static ROUTINE_2: LazyLock<domain::Routine> = LazyLock::new(|| domain::Routine {
    id: 2.into(),
    name: domain::Name::new("Legs").unwrap(),
    exercises: vec![template("Squat", 5, 5, 180)],
});

pub static CALENDAR: LazyLock<domain::Calendar> = LazyLock::new(|| {
    [
        (NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(), ROUTINE.id),
        (NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(), ROUTINE_2.id),
    ]
    .into_iter()
    .map(|(date, routine_id)| domain::CalendarAssignment { date, routine_id })
    .collect()
});

pub static WORKOUT_SESSIONS: LazyLock<Vec<domain::WorkoutSession>> =
    LazyLock::new(|| vec![WORKOUT_SESSION.clone(), WORKOUT_SESSION_2.clone()]);

pub static WORKOUT_SESSION: LazyLock<domain::WorkoutSession> =
    LazyLock::new(|| domain::WorkoutSession {
        id: 1.into(),
        timestamp: timestamp(10, 18),
        routine: domain::SessionRoutine::Routine(ROUTINE.id),
        routine_name: ROUTINE.name.to_string(),
        exercises: vec![
            domain::ExerciseRecord {
                name: "Bench Press".to_string(),
                sets: vec![
                    set(60.0, 8, 35),
                    domain::Set {
                        drop_sets: vec![domain::DropSet {
                            weight: domain::Weight::new(42.5).unwrap(),
                            reps: domain::Reps::new(6).unwrap(),
                        }],
                        ..set(60.0, 7, 32)
                    },
                ],
            },
            domain::ExerciseRecord {
                name: "Overhead Press".to_string(),
                sets: vec![set(37.5, 10, 40)],
            },
        ],
        total_time: domain::Seconds::new(2700).unwrap(),
    });

pub static WORKOUT_SESSION_2: LazyLock<domain::WorkoutSession> =
    LazyLock::new(|| domain::WorkoutSession {
        id: 2.into(),
        timestamp: timestamp(11, 7),
        routine: domain::SessionRoutine::Manual,
        routine_name: "Morning Run Warmup".to_string(),
        exercises: vec![domain::ExerciseRecord {
            name: "Squat".to_string(),
            sets: vec![set(0.0, 20, 0)],
        }],
        total_time: domain::Seconds::default(),
    });
