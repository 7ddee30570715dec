use chrono::{Days, Local, NaiveDate};
use dioxus::prelude::*;

use gymlog_domain::{self as domain, CalendarService, RoutineService, WorkoutSessionService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route,
    component::{
        element::{ErrorMessage, Icon, LoadingPage, NoData, WEEKDAYS},
        form::{SelectField, SelectOption},
    },
    signal_changed_data,
};

#[component]
pub fn Calendar() -> Element {
    let routines = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_routines().await
    });
    let calendar = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_calendar().await
    });
    let workout_sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workout_sessions().await
    });
    let week = use_signal(|| domain::week_start(Local::now().date_naive()));

    match (
        &*routines.read(),
        &*calendar.read(),
        &*workout_sessions.read(),
    ) {
        (Some(Ok(routines)), Some(Ok(calendar)), Some(Ok(workout_sessions))) => rsx! {
            {view_week_navigation(week)}
            if routines.is_empty() {
                NoData { text: "Create a routine to plan your week" }
            }
            {view_week(routines, calendar, workout_sessions, week())}
        },
        (Some(Err(err)), _, _) | (_, Some(Err(err)), _) | (_, _, Some(Err(err))) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        (None, _, _) | (_, None, _) | (_, _, None) => rsx! { LoadingPage {} },
    }
}

fn view_week_navigation(mut week: Signal<NaiveDate>) -> Element {
    let first = week();
    let last = first.checked_add_days(Days::new(6)).unwrap_or(first);
    let current_week = domain::week_start(Local::now().date_naive());

    rsx! {
        div {
            class: "field has-addons has-addons-centered mt-3",
            p {
                class: "control",
                a {
                    class: "button is-small",
                    onclick: move |_| {
                        let previous = week().checked_sub_days(Days::new(7)).unwrap_or(week());
                        week.set(previous);
                    },
                    Icon { name: "chevron-left", is_small: true }
                }
            }
            p {
                class: "control",
                a {
                    class: "button is-small",
                    class: if first == current_week { "is-link" },
                    onclick: move |_| week.set(current_week),
                    "This week"
                }
            }
            p {
                class: "control",
                a {
                    class: "button is-small",
                    onclick: move |_| {
                        let next = week().checked_add_days(Days::new(7)).unwrap_or(week());
                        week.set(next);
                    },
                    Icon { name: "chevron-right", is_small: true }
                }
            }
        }
        div {
            class: "mb-4 is-size-6 has-text-centered",
            "{first} – {last}"
        }
    }
}

fn view_week(
    routines: &[domain::Routine],
    calendar: &domain::Calendar,
    workout_sessions: &[domain::WorkoutSession],
    week: NaiveDate,
) -> Element {
    let today = Local::now().date_naive();

    rsx! {
        for (i, date) in domain::week_of(week).into_iter().enumerate() {
            {view_day(routines, calendar.routine_on(date), workout_sessions, date, WEEKDAYS[i], date == today)}
        }
    }
}

fn view_day(
    routines: &[domain::Routine],
    assigned: Option<domain::RoutineID>,
    workout_sessions: &[domain::WorkoutSession],
    date: NaiveDate,
    weekday: &str,
    is_today: bool,
) -> Element {
    let label = format!("{weekday} {}", date.format("%d.%m."));
    let logged = workout_sessions
        .iter()
        .filter(|s| s.date() == date)
        .map(|s| s.routine_name.clone())
        .collect::<Vec<_>>()
        .join(", ");
    let assigned_routine = assigned.and_then(|id| routines.iter().find(|r| r.id == id));
    let is_done = assigned.is_some_and(|id| {
        workout_sessions
            .iter()
            .any(|s| s.date() == date && s.routine_id() == Some(id))
    });

    let mut options = vec![rsx! {
        SelectOption {
            text: "Rest day".to_string(),
            value: String::new(),
            selected: assigned_routine.is_none(),
        }
    }];
    options.extend(routines.iter().map(|r| {
        rsx! {
            SelectOption {
                text: r.name.to_string(),
                value: r.id.to_string(),
                selected: assigned == Some(r.id),
            }
        }
    }));

    rsx! {
        div {
            class: "box mx-2 p-3",
            class: if is_today { "has-background-link-light" },
            div {
                class: "is-flex is-justify-content-space-between is-align-items-center mb-2",
                span {
                    class: "has-text-weight-bold",
                    "{label}"
                }
                if is_done {
                    span { class: "tag is-success", "Done" }
                } else if let Some(routine) = assigned_routine {
                    if is_today {
                        Link {
                            class: "button is-small is-link",
                            to: Route::Workout { routine: routine.id },
                            "Start"
                        }
                    }
                }
            }
            SelectField {
                options,
                has_changed: false,
                onchange: move |event: FormEvent| {
                    async move {
                        let value = event.value();
                        let result = if value.is_empty() {
                            DOMAIN_SERVICE.read().unassign_routine(date).await
                        } else {
                            match value.parse::<domain::RoutineID>() {
                                Ok(id) => DOMAIN_SERVICE.read().assign_routine(date, id).await,
                                Err(_) => return,
                            }
                        };
                        match result {
                            Ok(_) => signal_changed_data(),
                            Err(err) => NOTIFICATIONS
                                .write()
                                .push(format!("Failed to update calendar: {err}")),
                        }
                    }
                },
            }
            if !logged.is_empty() {
                p {
                    class: "is-size-7 has-text-grey",
                    "Logged: {logged}"
                }
            }
        }
    }
}
