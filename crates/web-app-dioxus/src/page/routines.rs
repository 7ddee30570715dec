use dioxus::prelude::*;

use gymlog_domain::{self as domain, RoutineService, WorkoutSessionService};
use gymlog_web_app as web_app;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route,
    component::element::{
        DeleteConfirmationDialog, ErrorMessage, FloatingActionButton, Icon, LoadingPage, NoData,
        Table,
    },
    signal_changed_data,
};

#[component]
pub fn Routines() -> Element {
    let routines = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_routines().await
    });
    let workout_sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workout_sessions().await
    });
    let dialog = use_signal(|| None::<DeleteDialog>);
    let is_loading = use_signal(|| false);

    match (&*routines.read(), &*workout_sessions.read()) {
        (Some(Ok(routines)), Some(Ok(workout_sessions))) => rsx! {
            {view_list(routines, workout_sessions, dialog)}
            {view_dialog(dialog, is_loading)}
            FloatingActionButton {
                icon: "plus".to_string(),
                onclick: move |_| {
                    navigator().push(Route::Routine { id: domain::RoutineID::nil() });
                },
            }
        },
        (Some(Err(err)), _) | (_, Some(Err(err))) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        (None, _) | (_, None) => rsx! { LoadingPage {} },
    }
}

fn view_list(
    routines: &[domain::Routine],
    workout_sessions: &[domain::WorkoutSession],
    mut dialog: Signal<Option<DeleteDialog>>,
) -> Element {
    if routines.is_empty() {
        return rsx! { NoData { text: "No routines yet" } };
    }

    let mut routines = routines.to_vec();
    routines.sort_by_key(|r| r.name.to_string().to_lowercase());

    let body = routines
        .into_iter()
        .map(|r| {
            let duration = domain::average_duration(workout_sessions, r.id)
                .and_then(web_app::format::estimated_duration)
                .unwrap_or_default();
            let num_exercises = r.exercises.len();
            let id = r.id;
            let name = r.name.to_string();
            vec![
                rsx! {
                    Link {
                        to: Route::Routine { id },
                        "{name}"
                    }
                },
                rsx! {
                    span {
                        class: "is-size-7",
                        "{num_exercises} exercises"
                        br {}
                        "{duration}"
                    }
                },
                rsx! {
                    div {
                        class: "has-text-right is-flex-wrap-nowrap",
                        Link {
                            class: "mx-2",
                            to: Route::Workout { routine: id },
                            Icon { name: "play" }
                        }
                        a {
                            class: "mx-2",
                            onclick: move |_| {
                                *dialog.write() = Some(DeleteDialog {
                                    action: domain::Pending::new(domain::DeleteRoutine(id)),
                                    name: name.clone(),
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
        Table { body }
    }
}

fn view_dialog(
    mut dialog: Signal<Option<DeleteDialog>>,
    mut is_loading: Signal<bool>,
) -> Element {
    let Some(name) = dialog.read().as_ref().map(|d| d.name.clone()) else {
        return rsx! {};
    };

    rsx! {
        DeleteConfirmationDialog {
            element_type: "routine".to_string(),
            element_name: rsx! { "{name}" },
            description: "The routine will be removed from the calendar. Recorded workouts are kept.".to_string(),
            delete_event: move |_| {
                async move {
                    let Some(DeleteDialog { action, .. }) = dialog.write().take() else {
                        return;
                    };
                    *is_loading.write() = true;
                    match DOMAIN_SERVICE.read().delete_routine(action.confirm()).await {
                        Ok(_) => signal_changed_data(),
                        Err(err) => NOTIFICATIONS
                            .write()
                            .push(format!("Failed to delete routine: {err}")),
                    }
                    *is_loading.write() = false;
                }
            },
            cancel_event: move |_| *dialog.write() = None,
            is_loading: is_loading(),
        }
    }
}

struct DeleteDialog {
    action: domain::Pending<domain::DeleteRoutine>,
    name: String,
}
