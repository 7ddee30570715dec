use chrono::Local;
use dioxus::prelude::*;

use gymlog_domain::{self as domain, WorkoutSessionService};
use gymlog_web_app::{self as web_app, SettingsService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route, WEB_APP_SERVICE,
    component::{
        element::{
            Chart, ChartLabel, DataBox, DeleteConfirmationDialog, ErrorMessage, Icon,
            IntervalControl, LoadingPage, NoData, Table, Title,
        },
        form::{SelectField, SelectOption},
    },
    signal_changed_data,
};

/// Statistics and charts of a single exercise across all recorded workouts.
#[component]
pub fn Progress(exercise: String) -> Element {
    let workout_sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workout_sessions().await
    });
    let settings = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        WEB_APP_SERVICE.read().get_settings().await
    });
    let today = Local::now().date_naive();
    let mut interval = use_signal(|| domain::Interval {
        first: today,
        last: today,
    });
    let dialog = use_signal(|| None::<domain::Pending<domain::DeleteExerciseHistory>>);
    let is_loading = use_signal(|| false);

    {
        let exercise = exercise.clone();
        use_effect(use_reactive!(|(exercise,)| {
            if let Some(Ok(workout_sessions)) = &*workout_sessions.read() {
                let dates = domain::exercise_history(workout_sessions, &exercise)
                    .iter()
                    .map(|e| e.timestamp.date())
                    .collect::<Vec<_>>();
                interval.set(domain::init_interval(
                    &dates,
                    domain::DefaultInterval::_3M,
                    Local::now().date_naive(),
                ));
            }
        }));
    }

    match &*workout_sessions.read() {
        Some(Ok(workout_sessions)) => {
            let names = domain::exercise_names(workout_sessions);
            if names.is_empty() {
                return rsx! {
                    Title { title: "Progress" }
                    NoData { text: "Log a workout to see your progress" }
                };
            }
            let theme = match &*settings.read() {
                Some(Ok(settings)) => settings.current_theme(),
                _ => web_app::Theme::Light,
            };
            let history = domain::exercise_history(workout_sessions, &exercise);
            rsx! {
                {view_exercise_selection(&names, &exercise)}
                if exercise.trim().is_empty() {
                    NoData { text: "Select an exercise" }
                } else if history.is_empty() {
                    NoData { text: "No sets recorded for this exercise" }
                } else {
                    {view_stats(&history)}
                    {view_charts(&history, interval, theme)}
                    {view_history(&history, interval(), &exercise, dialog)}
                }
                {view_dialog(dialog, is_loading)}
            }
        }
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        None => rsx! { LoadingPage {} },
    }
}

fn view_exercise_selection(names: &[String], exercise: &str) -> Element {
    let is_known = names.iter().any(|n| domain::names_match(n, exercise));
    let mut options = vec![rsx! {
        SelectOption {
            text: "Select exercise".to_string(),
            value: String::new(),
            selected: !is_known,
        }
    }];
    options.extend(names.iter().map(|name| {
        rsx! {
            SelectOption {
                text: name.clone(),
                value: name.clone(),
                selected: domain::names_match(name, exercise),
            }
        }
    }));

    rsx! {
        div {
            class: "px-3 mt-3",
            SelectField {
                options,
                has_changed: false,
                onchange: move |event: FormEvent| {
                    navigator().replace(Route::Progress { exercise: event.value() });
                },
            }
        }
    }
}

fn view_stats(history: &[domain::HistoryEntry]) -> Element {
    let Some(stats) = domain::exercise_stats(history) else {
        return rsx! {};
    };
    let max_weight = web_app::format::weight(f32::from(stats.max_weight));
    let total_volume = web_app::format::volume(stats.total_volume);
    let (trend_icon, trend_text) = match domain::overload_trend(history) {
        Some(domain::Trend::Increasing) => ("arrow-trend-up", "Increasing"),
        Some(domain::Trend::Stable) => ("arrow-right", "Stable"),
        Some(domain::Trend::Decreasing) => ("arrow-trend-down", "Decreasing"),
        None => ("minus", "Not enough data"),
    };

    rsx! {
        div {
            class: "columns is-mobile is-multiline is-gapless",
            div {
                class: "column is-half",
                DataBox {
                    title: "Max weight",
                    strong { "{max_weight}" }
                    " kg"
                }
            }
            div {
                class: "column is-half",
                DataBox {
                    title: "Max reps",
                    strong { "{stats.max_reps}" }
                }
            }
            div {
                class: "column is-half",
                DataBox {
                    title: "Total volume",
                    strong { "{total_volume}" }
                    " kg"
                }
            }
            div {
                class: "column is-half",
                DataBox {
                    title: "Sets",
                    strong { "{stats.total_sets}" }
                    " (⌀ {stats.avg_reps} reps)"
                }
            }
            div {
                class: "column is-full",
                DataBox {
                    title: "Progressive overload",
                    Icon { name: "{trend_icon}" }
                    strong { "{trend_text}" }
                }
            }
        }
    }
}

fn view_charts(
    history: &[domain::HistoryEntry],
    interval: Signal<domain::Interval>,
    theme: web_app::Theme,
) -> Element {
    let dates = history
        .iter()
        .map(|e| e.timestamp.date())
        .collect::<Vec<_>>();
    let all = domain::init_interval(
        &dates,
        domain::DefaultInterval::All,
        Local::now().date_naive(),
    );
    let current = interval();
    let width = web_app::chart::chart_width();

    rsx! {
        IntervalControl { current_interval: interval, all }
        Chart {
            labels: vec![ChartLabel {
                name: "Weight (kg)".to_string(),
                color: web_app::chart::COLOR_WEIGHT,
                opacity: web_app::chart::OPACITY_LINE,
            }],
            chart: web_app::chart::plot_weight(history, &current, theme, width)
                .map_err(|err| err.to_string()),
            no_data_label: true,
        }
        Chart {
            labels: vec![ChartLabel {
                name: "Reps".to_string(),
                color: web_app::chart::COLOR_REPS,
                opacity: web_app::chart::OPACITY_LINE,
            }],
            chart: web_app::chart::plot_reps(history, &current, theme, width)
                .map_err(|err| err.to_string()),
            no_data_label: false,
        }
        Chart {
            labels: vec![ChartLabel {
                name: "Volume (kg)".to_string(),
                color: web_app::chart::COLOR_VOLUME,
                opacity: web_app::chart::OPACITY_BAR,
            }],
            chart: web_app::chart::plot_volume(history, &current, theme, width)
                .map_err(|err| err.to_string()),
            no_data_label: false,
        }
    }
}

fn view_history(
    history: &[domain::HistoryEntry],
    interval: domain::Interval,
    exercise: &str,
    mut dialog: Signal<Option<domain::Pending<domain::DeleteExerciseHistory>>>,
) -> Element {
    let mut entries = history
        .iter()
        .filter(|e| (interval.first..=interval.last).contains(&e.timestamp.date()))
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(a.set.cmp(&b.set)));

    let body = entries
        .into_iter()
        .map(|e| {
            let date = e.timestamp.format("%Y-%m-%d").to_string();
            let weight = web_app::format::weight(f32::from(e.weight));
            let volume = web_app::format::volume(e.volume);
            let drop_sets = e
                .drop_sets
                .iter()
                .map(|d| {
                    format!(
                        "{} × {}",
                        web_app::format::weight(f32::from(d.weight)),
                        d.reps
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                rsx! { "{date}" },
                rsx! { "{e.set}" },
                rsx! {
                    "{weight} kg × {e.reps}"
                    if !drop_sets.is_empty() {
                        br {}
                        span { class: "is-size-7 has-text-grey", "{drop_sets}" }
                    }
                },
                rsx! { "{volume} kg" },
            ]
        })
        .collect::<Vec<_>>();
    let name = domain::Name::new(exercise).ok();

    rsx! {
        Title { title: "History" }
        Table {
            head: vec![
                rsx! { "Date" },
                rsx! { "Set" },
                rsx! { "Weight × reps" },
                rsx! { "Volume" },
            ],
            body,
        }
        if let Some(name) = name {
            div {
                class: "block has-text-centered",
                button {
                    class: "button is-small is-danger is-outlined",
                    onclick: move |_| {
                        *dialog.write() = Some(domain::Pending::new(
                            domain::DeleteExerciseHistory(name.clone()),
                        ));
                    },
                    Icon { name: "trash", is_small: true }
                    span { "Delete exercise history" }
                }
            }
        }
    }
}

fn view_dialog(
    mut dialog: Signal<Option<domain::Pending<domain::DeleteExerciseHistory>>>,
    mut is_loading: Signal<bool>,
) -> Element {
    let Some(name) = dialog.read().as_ref().map(|d| d.action().0.to_string()) else {
        return rsx! {};
    };

    rsx! {
        DeleteConfirmationDialog {
            element_type: "exercise history".to_string(),
            element_name: rsx! { "of {name}" },
            description: "All workouts containing this exercise will be permanently deleted.".to_string(),
            delete_event: move |_| {
                async move {
                    let Some(action) = dialog.write().take() else {
                        return;
                    };
                    *is_loading.write() = true;
                    match DOMAIN_SERVICE
                        .read()
                        .delete_exercise_history(action.confirm())
                        .await
                    {
                        Ok(_) => {
                            signal_changed_data();
                            navigator().replace(Route::Progress { exercise: String::new() });
                        }
                        Err(err) => NOTIFICATIONS
                            .write()
                            .push(format!("Failed to delete exercise history: {err}")),
                    }
                    *is_loading.write() = false;
                }
            },
            cancel_event: move |_| *dialog.write() = None,
            is_loading: is_loading(),
        }
    }
}
