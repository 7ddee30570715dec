use dioxus::prelude::*;
use log::Level;

use gymlog_domain::{self as domain, DataService, WorkoutSessionService};
use gymlog_web_app::{self as web_app, log::Service as _};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, WEB_APP_SERVICE,
    component::{
        element::{
            Color, DeleteConfirmationDialog, Dialog, ErrorMessage, Icon, LoadingPage, NoData,
            Table, Title,
        },
        form::InputField,
    },
    signal_changed_data,
};

/// Management of recorded workouts and the application log.
#[component]
pub fn Data() -> Element {
    let workout_sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workout_sessions().await
    });
    let log_entries = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        WEB_APP_SERVICE.read().get_log_entries()
    });
    let session_dialog = use_signal(|| None::<SessionDialog>);
    let wipe_dialog = use_signal(|| None::<WipeDialog>);
    let is_loading = use_signal(|| false);

    let sessions = match &*workout_sessions.read() {
        Some(Ok(workout_sessions)) => view_sessions(workout_sessions, session_dialog),
        Some(Err(err)) => rsx! { ErrorMessage { message: "{err}" } },
        None => rsx! { LoadingPage {} },
    };
    let log = match &*log_entries.read() {
        Some(Ok(entries)) => view_log(entries.iter().cloned().collect()),
        Some(Err(err)) => rsx! { ErrorMessage { message: "{err}" } },
        None => rsx! { LoadingPage {} },
    };

    rsx! {
        {sessions}
        {view_wipe(wipe_dialog)}
        {log}
        {view_session_dialog(session_dialog, is_loading)}
        {view_wipe_dialog(wipe_dialog, is_loading)}
    }
}

fn view_sessions(
    workout_sessions: &[domain::WorkoutSession],
    mut dialog: Signal<Option<SessionDialog>>,
) -> Element {
    let mut sessions = workout_sessions.iter().collect::<Vec<_>>();
    sessions.sort_by_key(|s| std::cmp::Reverse(s.timestamp));

    let body = sessions
        .into_iter()
        .map(|s| {
            let id = s.id;
            let date = s.timestamp.format("%Y-%m-%d %H:%M").to_string();
            let name = s.routine_name.clone();
            let num_sets = s.num_sets();
            let volume = web_app::format::volume(s.volume());
            vec![
                rsx! { "{date}" },
                rsx! {
                    "{name}"
                    if s.routine_id().is_none() {
                        span { class: "tag is-light ml-2", "manual" }
                    }
                },
                rsx! { "{num_sets} sets, {volume} kg" },
                rsx! {
                    div {
                        class: "has-text-right",
                        a {
                            onclick: move |_| {
                                *dialog.write() = Some(SessionDialog {
                                    action: domain::Pending::new(domain::DeleteWorkoutSession(id)),
                                    description: format!("{name} on {date}"),
                                });
                            },
                            Icon { name: "trash" }
                        }
                    }
                },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Title { title: "Workouts" }
        if body.is_empty() {
            NoData { text: "No workouts yet" }
        } else {
            Table { body }
        }
    }
}

fn view_wipe(mut dialog: Signal<Option<WipeDialog>>) -> Element {
    rsx! {
        Title { title: "Reset" }
        div {
            class: "block has-text-centered",
            p {
                class: "is-size-7 mb-3",
                "Delete all routines, calendar entries and workouts. Settings and the log are kept."
            }
            button {
                class: "button is-danger",
                onclick: move |_| *dialog.write() = Some(WipeDialog::default()),
                Icon { name: "triangle-exclamation" }
                span { "Delete all data" }
            }
        }
    }
}

fn view_log(entries: Vec<web_app::log::Entry>) -> Element {
    let body = entries
        .into_iter()
        .map(|entry| {
            let color = match entry.level {
                Level::Error => Color::Danger,
                Level::Warn => Color::Warning,
                Level::Info => Color::Info,
                Level::Debug | Level::Trace => Color::Text,
            };
            vec![
                rsx! {
                    span {
                        class: "is-size-7 is-family-monospace has-text-{color}",
                        "{entry.time}"
                    }
                },
                rsx! {
                    span {
                        class: "is-size-7 has-text-{color}",
                        "{entry.message}"
                    }
                },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Title { title: "Log" }
        if body.is_empty() {
            NoData { text: "No log entries" }
        } else {
            Table { body }
        }
    }
}

fn view_session_dialog(
    mut dialog: Signal<Option<SessionDialog>>,
    mut is_loading: Signal<bool>,
) -> Element {
    let Some(description) = dialog.read().as_ref().map(|d| d.description.clone()) else {
        return rsx! {};
    };

    rsx! {
        DeleteConfirmationDialog {
            element_type: "workout".to_string(),
            element_name: rsx! { "{description}" },
            delete_event: move |_| {
                async move {
                    let Some(SessionDialog { action, .. }) = dialog.write().take() else {
                        return;
                    };
                    *is_loading.write() = true;
                    match DOMAIN_SERVICE
                        .read()
                        .delete_workout_session(action.confirm())
                        .await
                    {
                        Ok(_) => signal_changed_data(),
                        Err(err) => NOTIFICATIONS
                            .write()
                            .push(format!("Failed to delete workout: {err}")),
                    }
                    *is_loading.write() = false;
                }
            },
            cancel_event: move |_| *dialog.write() = None,
            is_loading: is_loading(),
        }
    }
}

fn view_wipe_dialog(
    mut dialog: Signal<Option<WipeDialog>>,
    mut is_loading: Signal<bool>,
) -> Element {
    let Some(WipeDialog { input, error }) = dialog() else {
        return rsx! {};
    };
    let phrase = <domain::WipeAllData as domain::Phrase>::PHRASE;

    rsx! {
        Dialog {
            color: Color::Danger,
            title: rsx! { "Delete all data?" },
            close_event: move |_| *dialog.write() = None,
            div {
                class: "block",
                "All routines, calendar entries and workouts will be permanently deleted. "
                "Type "
                strong { "{phrase}" }
                " to confirm."
            }
            InputField {
                value: input,
                error,
                has_changed: false,
                oninput: move |event: FormEvent| {
                    if let Some(dialog) = dialog.write().as_mut() {
                        dialog.input = event.value();
                        dialog.error = None;
                    }
                },
            }
            div {
                class: "field is-grouped is-grouped-centered",
                div {
                    class: "control",
                    button {
                        class: "button is-light is-soft",
                        onclick: move |_| *dialog.write() = None,
                        "No"
                    }
                }
                div {
                    class: "control",
                    button {
                        class: "button is-danger",
                        class: if is_loading() { "is-loading" },
                        onclick: move |_| {
                            async move {
                                let Some(input) = dialog.read().as_ref().map(|d| d.input.clone()) else {
                                    return;
                                };
                                let confirmed = match domain::Pending::new(domain::WipeAllData)
                                    .confirm_with(&input)
                                {
                                    Ok(confirmed) => confirmed,
                                    Err(err) => {
                                        if let Some(dialog) = dialog.write().as_mut() {
                                            dialog.error = Some(err.to_string());
                                        }
                                        return;
                                    }
                                };
                                *is_loading.write() = true;
                                match DOMAIN_SERVICE.read().wipe_all_data(confirmed).await {
                                    Ok(()) => {
                                        *dialog.write() = None;
                                        signal_changed_data();
                                    }
                                    Err(err) => NOTIFICATIONS
                                        .write()
                                        .push(format!("Failed to delete all data: {err}")),
                                }
                                *is_loading.write() = false;
                            }
                        },
                        "Yes, delete everything"
                    }
                }
            }
        }
    }
}

struct SessionDialog {
    action: domain::Pending<domain::DeleteWorkoutSession>,
    description: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct WipeDialog {
    input: String,
    error: Option<String>,
}
