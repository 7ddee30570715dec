//! Metrics derived from the recorded workout sessions.
//!
//! All functions are pure and recompute their result from the given sessions. The
//! current date is passed explicitly.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime};

use crate::{
    DropSet, ExerciseRecord, Reps, RoutineID, Seconds, Weight, WorkoutSession, WorkoutSessionID,
    names_match, week_start,
};

pub const WEEKLY_GOAL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyProgress {
    pub completed: u32,
    pub goal: u32,
    pub percentage: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyTime {
    pub hours: u32,
    pub minutes: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub session: WorkoutSessionID,
    pub timestamp: NaiveDateTime,
    pub set: usize,
    pub weight: Weight,
    pub reps: Reps,
    pub time: Seconds,
    pub drop_sets: Vec<DropSet>,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseStats {
    pub max_weight: Weight,
    pub max_reps: Reps,
    pub total_volume: f32,
    pub avg_reps: f32,
    pub total_sets: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
}

fn in_month_of(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// Total volume of all sessions in the current month, rounded to whole kilograms.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn monthly_volume(sessions: &[WorkoutSession], today: NaiveDate) -> u32 {
    sessions
        .iter()
        .filter(|s| in_month_of(s.date(), today))
        .map(WorkoutSession::volume)
        .sum::<f32>()
        .round() as u32
}

/// Number of consecutive days with at least one session, counted backwards from today.
#[must_use]
pub fn current_streak(sessions: &[WorkoutSession], today: NaiveDate) -> u32 {
    let dates = sessions
        .iter()
        .map(WorkoutSession::date)
        .collect::<BTreeSet<_>>();
    let mut streak = 0;
    let mut day = Some(today);

    while let Some(d) = day {
        if !dates.contains(&d) {
            break;
        }
        streak += 1;
        day = d.pred_opt();
    }

    streak
}

#[must_use]
pub fn weekly_progress(sessions: &[WorkoutSession], today: NaiveDate) -> WeeklyProgress {
    let first = week_start(today);
    let last = first.checked_add_days(Days::new(6)).unwrap_or(first);
    let completed = u32::try_from(
        sessions
            .iter()
            .map(WorkoutSession::date)
            .filter(|d| (first..=last).contains(d))
            .collect::<BTreeSet<_>>()
            .len(),
    )
    .unwrap_or(u32::MAX);

    WeeklyProgress {
        completed,
        goal: WEEKLY_GOAL,
        percentage: (completed.saturating_mul(100) / WEEKLY_GOAL).min(100),
    }
}

#[must_use]
pub fn monthly_time(sessions: &[WorkoutSession], today: NaiveDate) -> MonthlyTime {
    let total = sessions
        .iter()
        .filter(|s| in_month_of(s.date(), today))
        .map(|s| u32::from(s.total_time))
        .sum::<u32>();

    MonthlyTime {
        hours: total / 3600,
        minutes: total % 3600 / 60,
        total,
    }
}

/// The exercise as performed in the most recent session of the routine that contains it.
#[must_use]
pub fn last_performance<'a>(
    sessions: &'a [WorkoutSession],
    routine_id: RoutineID,
    exercise_name: &str,
) -> Option<&'a ExerciseRecord> {
    sessions
        .iter()
        .filter(|s| s.routine_id() == Some(routine_id))
        .filter_map(|s| s.exercise(exercise_name).map(|e| (s.timestamp, e)))
        .max_by_key(|(timestamp, _)| *timestamp)
        .map(|(_, e)| e)
}

/// All sets of an exercise in chronological order.
#[must_use]
pub fn exercise_history(sessions: &[WorkoutSession], exercise_name: &str) -> Vec<HistoryEntry> {
    let mut history = sessions
        .iter()
        .flat_map(|s| {
            s.exercises
                .iter()
                .filter(|e| names_match(&e.name, exercise_name))
                .flat_map(|e| {
                    e.sets.iter().enumerate().map(|(i, set)| HistoryEntry {
                        session: s.id,
                        timestamp: s.timestamp,
                        set: i + 1,
                        weight: set.weight,
                        reps: set.reps,
                        time: set.time,
                        drop_sets: set.drop_sets.clone(),
                        volume: set.volume(),
                    })
                })
        })
        .collect::<Vec<_>>();
    history.sort_by_key(|e| (e.timestamp, e.session, e.set));
    history
}

/// Distinct exercise names of all sessions, sorted alphabetically.
///
/// Names differing only in case are merged. The spelling of the first occurrence is kept.
#[must_use]
pub fn exercise_names(sessions: &[WorkoutSession]) -> Vec<String> {
    let mut names: BTreeMap<String, String> = BTreeMap::new();
    for exercise in sessions.iter().flat_map(|s| &s.exercises) {
        names
            .entry(exercise.name.trim().to_lowercase())
            .or_insert_with(|| exercise.name.trim().to_string());
    }
    names.into_values().collect()
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn exercise_stats(history: &[HistoryEntry]) -> Option<ExerciseStats> {
    if history.is_empty() {
        return None;
    }

    let total_reps = history.iter().map(|e| u32::from(e.reps)).sum::<u32>();

    Some(ExerciseStats {
        max_weight: history
            .iter()
            .map(|e| e.weight)
            .fold(Weight::default(), |a, b| if b > a { b } else { a }),
        max_reps: history.iter().map(|e| e.reps).max().unwrap_or_default(),
        total_volume: history.iter().map(|e| e.volume).sum(),
        avg_reps: (total_reps as f32 / history.len() as f32 * 10.0).round() / 10.0,
        total_sets: history.len(),
    })
}

/// Average duration of the sessions of a routine.
///
/// Sessions without a recorded duration are deliberately excluded. Manually entered
/// sessions often lack one and would pull the estimate toward zero.
#[must_use]
pub fn average_duration(sessions: &[WorkoutSession], routine_id: RoutineID) -> Option<Seconds> {
    let durations = sessions
        .iter()
        .filter(|s| s.routine_id() == Some(routine_id) && !s.total_time.is_zero())
        .map(|s| i64::from(s.total_time))
        .collect::<Vec<_>>();

    if durations.is_empty() {
        return None;
    }

    Some(Seconds::saturating(
        durations.iter().sum::<i64>() / i64::try_from(durations.len()).unwrap_or(i64::MAX),
    ))
}

/// Volume per session of an exercise history in chronological order.
///
/// Sessions sharing a timestamp are kept apart.
#[must_use]
pub fn volume_per_session(history: &[HistoryEntry]) -> Vec<(NaiveDateTime, f32)> {
    let mut volumes: BTreeMap<(NaiveDateTime, WorkoutSessionID), f32> = BTreeMap::new();
    for entry in history {
        *volumes
            .entry((entry.timestamp, entry.session))
            .or_default() += entry.volume;
    }
    volumes
        .into_iter()
        .map(|((timestamp, _), volume)| (timestamp, volume))
        .collect()
}

/// Direction of the volume of an exercise over its sessions.
///
/// The slope of a least-squares fit of the session volumes is normalized by the mean
/// volume. A change of more than 2 % per session is considered a trend.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn overload_trend(history: &[HistoryEntry]) -> Option<Trend> {
    const THRESHOLD: f32 = 0.02;

    let volumes = volume_per_session(history)
        .into_iter()
        .map(|(_, v)| v)
        .collect::<Vec<_>>();

    if volumes.len() < 2 {
        return None;
    }

    let n = volumes.len() as f32;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = volumes.iter().sum::<f32>() / n;

    if mean_y <= 0.0 {
        return Some(Trend::Stable);
    }

    let (covariance, variance) = volumes.iter().enumerate().fold(
        (0.0, 0.0),
        |(covariance, variance), (i, y)| {
            let dx = i as f32 - mean_x;
            (covariance + dx * (y - mean_y), variance + dx * dx)
        },
    );
    let slope = covariance / variance / mean_y;

    Some(if slope > THRESHOLD {
        Trend::Increasing
    } else if slope < -THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultInterval {
    All,
    _1Y = 365,
    _6M = 182,
    _3M = 91,
    _1M = 30,
}

/// Initial interval of a chart, ending today.
#[must_use]
pub fn init_interval(
    dates: &[NaiveDate],
    default_interval: DefaultInterval,
    today: NaiveDate,
) -> Interval {
    let mut first = dates.iter().copied().min().unwrap_or(today);
    let last = dates.iter().copied().max().unwrap_or(today);

    if default_interval != DefaultInterval::All
        && last >= today - Duration::days(default_interval as i64)
    {
        first = today - Duration::days(default_interval as i64);
    }

    Interval { first, last: today }
}
