use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::{ReadError, RoutineID, UpdateError};

#[allow(async_fn_in_trait)]
pub trait CalendarService {
    async fn get_calendar(&self) -> Result<Calendar, ReadError>;
    async fn assign_routine(
        &self,
        date: NaiveDate,
        routine_id: RoutineID,
    ) -> Result<Calendar, UpdateError>;
    async fn unassign_routine(&self, date: NaiveDate) -> Result<Calendar, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait CalendarRepository {
    async fn read_calendar(&self) -> Result<Calendar, ReadError>;
    async fn replace_calendar(&self, calendar: Calendar) -> Result<Calendar, UpdateError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarAssignment {
    pub date: NaiveDate,
    pub routine_id: RoutineID,
}

/// Routines scheduled on dates. Each date holds at most one routine.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Calendar(BTreeMap<NaiveDate, RoutineID>);

impl Calendar {
    /// Assign a routine to a date, replacing any previous assignment of that date.
    pub fn assign(&mut self, date: NaiveDate, routine_id: RoutineID) {
        self.0.insert(date, routine_id);
    }

    pub fn unassign(&mut self, date: NaiveDate) -> Option<RoutineID> {
        self.0.remove(&date)
    }

    /// Remove all assignments of a routine.
    pub fn remove_routine(&mut self, routine_id: RoutineID) {
        self.0.retain(|_, id| *id != routine_id);
    }

    #[must_use]
    pub fn routine_on(&self, date: NaiveDate) -> Option<RoutineID> {
        self.0.get(&date).copied()
    }

    pub fn assignments(&self) -> impl Iterator<Item = CalendarAssignment> + '_ {
        self.0
            .iter()
            .map(|(date, routine_id)| CalendarAssignment {
                date: *date,
                routine_id: *routine_id,
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CalendarAssignment> for Calendar {
    fn from_iter<T: IntoIterator<Item = CalendarAssignment>>(iter: T) -> Self {
        let mut calendar = Calendar::default();
        for assignment in iter {
            calendar.assign(assignment.date, assignment.routine_id);
        }
        calendar
    }
}

/// The Monday of the week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        .unwrap_or(date)
}

/// The days from Monday to Sunday of the week containing `date`.
#[must_use]
pub fn week_of(date: NaiveDate) -> Vec<NaiveDate> {
    week_start(date).iter_days().take(7).collect()
}
