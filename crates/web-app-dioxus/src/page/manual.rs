use chrono::Local;
use dioxus::prelude::*;

use gymlog_domain::{self as domain, RoutineService, WorkoutSessionService};

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route,
    component::{
        element::{Color, ErrorMessage, Icon, LoadingPage, Message, Title},
        form::{InputField, SelectField, SelectOption},
    },
    signal_changed_data,
};

/// Recording of a workout done without the guided workout.
#[component]
pub fn Manual() -> Element {
    let routines = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_routines().await
    });
    let mut entry = use_signal(|| {
        let now = Local::now();
        domain::ManualEntry {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M").to_string(),
            ..domain::ManualEntry::default()
        }
    });
    let mut error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    let save = move |_: MouseEvent| async move {
        let known_routines = match &*routines.read() {
            Some(Ok(routines)) => routines.clone(),
            _ => return,
        };
        let session = match entry.read().validate(&known_routines) {
            Ok(session) => session,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        is_loading.set(true);
        let result = DOMAIN_SERVICE.read().create_workout_session(session).await;
        is_loading.set(false);
        match result {
            Ok(_) => {
                signal_changed_data();
                navigator().push(Route::Home {});
            }
            Err(err) => NOTIFICATIONS
                .write()
                .push(format!("Failed to save workout: {err}")),
        }
    };

    match &*routines.read() {
        Some(Ok(routines)) => {
            let current = entry();
            let routines = routines.clone();
            let options = std::iter::once(rsx! {
                SelectOption {
                    text: "Custom workout".to_string(),
                    value: String::new(),
                    selected: current.routine_id.is_none(),
                }
            })
            .chain(routines.iter().map(|r| {
                rsx! {
                    SelectOption {
                        text: r.name.to_string(),
                        value: r.id.to_string(),
                        selected: current.routine_id == Some(r.id),
                    }
                }
            }))
            .collect::<Vec<_>>();

            rsx! {
                Title { title: "Log a past workout" }
                div {
                    class: "px-3",
                    SelectField {
                        label: "Routine".to_string(),
                        options,
                        has_changed: false,
                        onchange: move |event: FormEvent| {
                            let id = event.value().parse::<domain::RoutineID>().ok();
                            let routine = id.and_then(|id| routines.iter().find(|r| r.id == id));
                            entry.write().select_routine(routine);
                        },
                    }
                    if current.routine_id.is_none() {
                        InputField {
                            label: "Name".to_string(),
                            value: current.name.clone(),
                            has_changed: false,
                            oninput: move |event: FormEvent| entry.write().name = event.value(),
                        }
                    }
                    div {
                        class: "columns is-mobile is-gapless mb-0",
                        div {
                            class: "column mr-2",
                            InputField {
                                label: "Date".to_string(),
                                r#type: "date".to_string(),
                                value: current.date.clone(),
                                has_changed: false,
                                oninput: move |event: FormEvent| entry.write().date = event.value(),
                            }
                        }
                        div {
                            class: "column mr-2",
                            InputField {
                                label: "Time".to_string(),
                                r#type: "time".to_string(),
                                value: current.time.clone(),
                                has_changed: false,
                                oninput: move |event: FormEvent| entry.write().time = event.value(),
                            }
                        }
                        div {
                            class: "column",
                            InputField {
                                label: "Duration (s)".to_string(),
                                inputmode: "numeric".to_string(),
                                placeholder: "optional".to_string(),
                                value: current.total_time.clone(),
                                has_changed: false,
                                oninput: move |event: FormEvent| entry.write().total_time = event.value(),
                            }
                        }
                    }
                    label { class: "label", "Exercises" }
                    for (i, exercise) in current.exercises.iter().enumerate() {
                        {view_exercise(i, exercise, entry)}
                    }
                    div {
                        class: "block",
                        button {
                            class: "button is-small",
                            onclick: move |_| entry.write().add_exercise(),
                            Icon { name: "plus", is_small: true }
                            span { "Add exercise" }
                        }
                    }
                    if let Some(error) = error() {
                        Message { color: Color::Danger, "{error}" }
                    }
                    div {
                        class: "field is-grouped is-grouped-centered mt-5",
                        div {
                            class: "control",
                            Link {
                                class: "button is-light is-soft",
                                to: Route::Home {},
                                "Cancel"
                            }
                        }
                        div {
                            class: "control",
                            button {
                                class: "button is-primary",
                                class: if is_loading() { "is-loading" },
                                onclick: save,
                                "Save"
                            }
                        }
                    }
                }
            }
        }
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        None => rsx! { LoadingPage {} },
    }
}

fn view_exercise(
    index: usize,
    exercise: &domain::ManualExercise,
    mut entry: Signal<domain::ManualEntry>,
) -> Element {
    rsx! {
        div {
            class: "box p-3 mb-3",
            div {
                class: "is-flex is-align-items-flex-start",
                div {
                    class: "is-flex-grow-1",
                    InputField {
                        placeholder: "Exercise".to_string(),
                        value: exercise.name.clone(),
                        has_changed: false,
                        oninput: move |event: FormEvent| {
                            if let Some(exercise) = entry.write().exercises.get_mut(index) {
                                exercise.name = event.value();
                            }
                        },
                    }
                }
                a {
                    class: "ml-2 mt-2",
                    onclick: move |_| entry.write().remove_exercise(index),
                    Icon { name: "xmark" }
                }
            }
            for (j, set) in exercise.sets.iter().enumerate() {
                {view_set(index, j, set, entry)}
            }
            button {
                class: "button is-small is-light",
                onclick: move |_| entry.write().add_set(index),
                Icon { name: "plus", is_small: true }
                span { "Add set" }
            }
        }
    }
}

fn view_set(
    exercise: usize,
    index: usize,
    set: &domain::ManualSet,
    mut entry: Signal<domain::ManualEntry>,
) -> Element {
    let mut update = move |f: fn(&mut domain::ManualSet, String), value: String| {
        if let Some(set) = entry
            .write()
            .exercises
            .get_mut(exercise)
            .and_then(|e| e.sets.get_mut(index))
        {
            f(set, value);
        }
    };
    let number = index + 1;

    rsx! {
        div {
            class: "columns is-mobile is-gapless is-vcentered mb-0",
            div {
                class: "column is-narrow mr-2 is-size-7",
                "{number}."
            }
            div {
                class: "column mr-2",
                InputField {
                    placeholder: "kg".to_string(),
                    inputmode: "decimal".to_string(),
                    value: set.weight.clone(),
                    has_changed: false,
                    oninput: move |event: FormEvent| update(|set, value| set.weight = value, event.value()),
                }
            }
            div {
                class: "column mr-2",
                InputField {
                    placeholder: "reps".to_string(),
                    inputmode: "numeric".to_string(),
                    value: set.reps.clone(),
                    has_changed: false,
                    oninput: move |event: FormEvent| update(|set, value| set.reps = value, event.value()),
                }
            }
            div {
                class: "column mr-2",
                InputField {
                    placeholder: "s".to_string(),
                    inputmode: "numeric".to_string(),
                    value: set.time.clone(),
                    has_changed: false,
                    oninput: move |event: FormEvent| update(|set, value| set.time = value, event.value()),
                }
            }
            div {
                class: "column is-narrow",
                a {
                    onclick: move |_| entry.write().remove_set(exercise, index),
                    Icon { name: "xmark", is_small: true }
                }
            }
        }
    }
}
