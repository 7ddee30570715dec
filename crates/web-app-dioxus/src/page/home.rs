use chrono::{Days, Local, NaiveDate};
use dioxus::prelude::*;

use gymlog_domain::{self as domain, CalendarService, RoutineService, WorkoutSessionService};
use gymlog_web_app as web_app;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, Route,
    component::element::{
        Calendar, CenteredBlock, DataBox, ErrorMessage, LoadingPage, NoData, Table, Title,
    },
};

const RECENT_SESSIONS: usize = 5;
const ACTIVITY_WEEKS: u64 = 8;

#[component]
pub fn Home() -> Element {
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

    let today = Local::now().date_naive();

    match (
        &*routines.read(),
        &*calendar.read(),
        &*workout_sessions.read(),
    ) {
        (Some(Ok(routines)), Some(Ok(calendar)), Some(Ok(workout_sessions))) => rsx! {
            {view_stats(workout_sessions, today)}
            {view_today(routines, calendar, workout_sessions, today)}
            {view_activity(workout_sessions, today)}
            {view_recent_sessions(workout_sessions)}
        },
        (Some(Err(err)), _, _) | (_, Some(Err(err)), _) | (_, _, Some(Err(err))) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        (None, _, _) | (_, None, _) | (_, _, None) => rsx! { LoadingPage {} },
    }
}

fn view_stats(workout_sessions: &[domain::WorkoutSession], today: NaiveDate) -> Element {
    let streak = domain::current_streak(workout_sessions, today);
    let weekly_progress = domain::weekly_progress(workout_sessions, today);
    let monthly_volume = domain::monthly_volume(workout_sessions, today);
    let monthly_time = domain::monthly_time(workout_sessions, today);

    rsx! {
        div {
            class: "columns is-mobile is-multiline is-gapless mt-3",
            div {
                class: "column is-half",
                DataBox {
                    title: "Streak",
                    strong { "{streak}" }
                    if streak == 1 { " day" } else { " days" }
                }
            }
            div {
                class: "column is-half",
                DataBox {
                    title: "This week",
                    strong { "{weekly_progress.completed}" }
                    " / {weekly_progress.goal}"
                    progress {
                        class: "progress is-small is-link mt-2",
                        max: "100",
                        value: "{weekly_progress.percentage}",
                    }
                }
            }
            div {
                class: "column is-half",
                DataBox {
                    title: "Volume this month",
                    strong { "{monthly_volume}" }
                    " kg"
                }
            }
            div {
                class: "column is-half",
                DataBox {
                    title: "Time this month",
                    strong { "{monthly_time.hours}" }
                    " h "
                    strong { "{monthly_time.minutes}" }
                    " min"
                }
            }
        }
    }
}

fn view_today(
    routines: &[domain::Routine],
    calendar: &domain::Calendar,
    workout_sessions: &[domain::WorkoutSession],
    today: NaiveDate,
) -> Element {
    let routine = calendar
        .routine_on(today)
        .and_then(|id| routines.iter().find(|r| r.id == id));
    let completed = workout_sessions.iter().any(|s| {
        s.date() == today && routine.is_some_and(|r| s.routine_id() == Some(r.id))
    });

    rsx! {
        Title { title: "Today" }
        if let Some(routine) = routine {
            div {
                class: "box mx-2",
                p {
                    class: "title is-5",
                    "{routine.name}"
                }
                p {
                    class: "subtitle is-6",
                    "{routine.exercises.len()} exercises, {routine.num_sets()} sets"
                    if let Some(duration) = domain::average_duration(workout_sessions, routine.id)
                        .and_then(web_app::format::estimated_duration)
                    {
                        ", {duration}"
                    }
                }
                if completed {
                    p {
                        class: "has-text-success has-text-weight-bold",
                        "Completed"
                    }
                } else {
                    Link {
                        class: "button is-link",
                        to: Route::Workout { routine: routine.id },
                        "Start workout"
                    }
                }
            }
        } else {
            CenteredBlock {
                p { class: "mb-2", "No routine scheduled for today." }
                Link { to: Route::Calendar {}, "Plan your week" }
            }
        }
    }
}

fn view_activity(workout_sessions: &[domain::WorkoutSession], today: NaiveDate) -> Element {
    let interval = domain::Interval {
        first: today
            .checked_sub_days(Days::new(ACTIVITY_WEEKS * 7 - 1))
            .unwrap_or(today),
        last: today,
    };
    let volumes = workout_sessions
        .iter()
        .filter(|s| (interval.first..=interval.last).contains(&s.date()))
        .fold(
            std::collections::BTreeMap::<NaiveDate, f32>::new(),
            |mut volumes, s| {
                *volumes.entry(s.date()).or_default() += s.volume();
                volumes
            },
        );
    let max = volumes.values().copied().fold(0.0, f32::max);
    let entries = volumes
        .into_iter()
        .map(|(date, volume)| {
            (
                date,
                web_app::chart::COLOR_VOLUME,
                if max > 0.0 {
                    f64::from(0.3 + 0.7 * volume / max)
                } else {
                    0.3
                },
            )
        })
        .collect::<Vec<_>>();

    rsx! {
        Title { title: "Activity" }
        Calendar { entries, interval }
    }
}

fn view_recent_sessions(workout_sessions: &[domain::WorkoutSession]) -> Element {
    let mut sessions = workout_sessions.iter().collect::<Vec<_>>();
    sessions.sort_by_key(|s| std::cmp::Reverse(s.timestamp));

    let body = sessions
        .into_iter()
        .take(RECENT_SESSIONS)
        .map(|s| {
            let date = s.timestamp.format("%Y-%m-%d").to_string();
            let volume = web_app::format::volume(s.volume());
            let duration = web_app::format::duration(s.total_time);
            vec![
                rsx! { "{date}" },
                rsx! { "{s.routine_name}" },
                rsx! { "{volume} kg" },
                rsx! { "{duration}" },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Title { title: "Recent workouts" }
        if body.is_empty() {
            NoData { text: "No workouts yet" }
        } else {
            Table {
                head: vec![
                    rsx! { "Date" },
                    rsx! { "Workout" },
                    rsx! { "Volume" },
                    rsx! { "Duration" },
                ],
                body,
            }
        }
    }
}
