use dioxus::prelude::*;

use gymlog_domain::{self as domain, RoutineService, WorkoutSessionService};
use gymlog_web_app as web_app;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route,
    component::{
        element::{Color, ErrorMessage, Icon, LoadingPage, Message, NotFound, Title},
        form::InputField,
    },
    signal_changed_data,
};

/// Editor of a routine. A nil ID creates a new routine.
#[component]
pub fn Routine(id: domain::RoutineID) -> Element {
    let routine = use_resource(move || async move {
        let _ = DATA_CHANGED.read();
        if id.is_nil() {
            return Ok(None);
        }
        DOMAIN_SERVICE.read().get_routine(id).await.map(Some)
    });
    let workout_sessions = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        DOMAIN_SERVICE.read().get_workout_sessions().await
    });
    let mut form = use_signal(|| None::<RoutineForm>);
    let mut error = use_signal(|| None::<String>);
    let mut is_loading = use_signal(|| false);

    use_effect(move || match &*routine.read() {
        Some(Ok(Some(routine))) => form.set(Some(RoutineForm::from(routine))),
        Some(Ok(None)) => form.set(Some(RoutineForm::default())),
        Some(Err(_)) | None => {}
    });

    let save = move |_: MouseEvent| async move {
        let Some(RoutineForm { name, exercises }) = form.read().clone() else {
            return;
        };
        let (name, exercises) = match domain::validate_routine(&name, &exercises) {
            Ok(validated) => validated,
            Err(err) => {
                *error.write() = Some(err.to_string());
                return;
            }
        };
        *error.write() = None;
        *is_loading.write() = true;
        let result = if id.is_nil() {
            DOMAIN_SERVICE
                .read()
                .create_routine(name, exercises)
                .await
                .map_err(|err| err.to_string())
        } else {
            DOMAIN_SERVICE
                .read()
                .replace_routine(domain::Routine {
                    id,
                    name,
                    exercises,
                })
                .await
                .map_err(|err| err.to_string())
        };
        *is_loading.write() = false;
        match result {
            Ok(_) => {
                signal_changed_data();
                navigator().push(Route::Routines {});
            }
            Err(err) => NOTIFICATIONS
                .write()
                .push(format!("Failed to save routine: {err}")),
        }
    };

    match (&*routine.read(), &*workout_sessions.read()) {
        (Some(Ok(routine)), Some(Ok(workout_sessions))) => {
            let Some(current) = form.read().clone() else {
                return rsx! { LoadingPage {} };
            };
            rsx! {
                if let Some(routine) = routine {
                    {view_summary(routine, workout_sessions)}
                } else {
                    Title { title: "New routine" }
                }
                div {
                    class: "px-3",
                    InputField {
                        label: "Name".to_string(),
                        value: current.name.clone(),
                        has_changed: false,
                        oninput: move |event: FormEvent| {
                            if let Some(form) = form.write().as_mut() {
                                form.name = event.value();
                            }
                        }
                    }
                    label { class: "label", "Exercises" }
                    for (i, row) in current.exercises.iter().enumerate() {
                        {view_exercise_row(i, row, form)}
                    }
                    div {
                        class: "block",
                        button {
                            class: "button is-small",
                            onclick: move |_| {
                                if let Some(form) = form.write().as_mut() {
                                    form.exercises.push(domain::ExerciseInput::default());
                                }
                            },
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
                                to: Route::Routines {},
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
        (Some(Err(domain::ReadError::NotFound)), _) => rsx! {
            NotFound { element: "Routine".to_string() }
        },
        (Some(Err(err)), _) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        (_, Some(Err(err))) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        (None, _) | (_, None) => rsx! { LoadingPage {} },
    }
}

fn view_summary(
    routine: &domain::Routine,
    workout_sessions: &[domain::WorkoutSession],
) -> Element {
    let num_sessions = workout_sessions
        .iter()
        .filter(|s| s.routine_id() == Some(routine.id))
        .count();
    let duration = domain::average_duration(workout_sessions, routine.id)
        .and_then(web_app::format::estimated_duration);

    rsx! {
        Title { title: "{routine.name}" }
        div {
            class: "block has-text-centered is-size-7",
            "{num_sessions} workouts"
            if let Some(duration) = duration {
                ", {duration} on average"
            }
        }
    }
}

fn view_exercise_row(
    index: usize,
    row: &domain::ExerciseInput,
    mut form: Signal<Option<RoutineForm>>,
) -> Element {
    let mut update = move |f: fn(&mut domain::ExerciseInput, String), value: String| {
        if let Some(row) = form
            .write()
            .as_mut()
            .and_then(|form| form.exercises.get_mut(index))
        {
            f(row, value);
        }
    };

    rsx! {
        div {
            class: "box p-3 mb-3",
            div {
                class: "is-flex is-align-items-flex-start",
                div {
                    class: "is-flex-grow-1",
                    InputField {
                        placeholder: "Exercise".to_string(),
                        value: row.name.clone(),
                        has_changed: false,
                        oninput: move |event: FormEvent| update(|row, value| row.name = value, event.value()),
                    }
                }
                a {
                    class: "ml-2 mt-2",
                    onclick: move |_| {
                        if let Some(form) = form.write().as_mut() {
                            if index < form.exercises.len() {
                                form.exercises.remove(index);
                            }
                        }
                    },
                    Icon { name: "xmark" }
                }
            }
            div {
                class: "columns is-mobile is-gapless",
                div {
                    class: "column mr-2",
                    InputField {
                        label: "Sets".to_string(),
                        inputmode: "numeric".to_string(),
                        value: row.sets.clone(),
                        has_changed: false,
                        oninput: move |event: FormEvent| update(|row, value| row.sets = value, event.value()),
                    }
                }
                div {
                    class: "column mr-2",
                    InputField {
                        label: "Reps".to_string(),
                        inputmode: "numeric".to_string(),
                        value: row.reps.clone(),
                        has_changed: false,
                        oninput: move |event: FormEvent| update(|row, value| row.reps = value, event.value()),
                    }
                }
                div {
                    class: "column",
                    InputField {
                        label: "Rest (s)".to_string(),
                        inputmode: "numeric".to_string(),
                        placeholder: domain::ExerciseTemplate::DEFAULT_REST.to_string(),
                        value: row.rest.clone(),
                        has_changed: false,
                        oninput: move |event: FormEvent| update(|row, value| row.rest = value, event.value()),
                    }
                }
            }
        }
    }
}

#[derive(Clone, PartialEq)]
struct RoutineForm {
    name: String,
    exercises: Vec<domain::ExerciseInput>,
}

impl Default for RoutineForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            exercises: vec![domain::ExerciseInput::default()],
        }
    }
}

impl From<&domain::Routine> for RoutineForm {
    fn from(routine: &domain::Routine) -> Self {
        Self {
            name: routine.name.to_string(),
            exercises: routine
                .exercises
                .iter()
                .map(domain::ExerciseInput::from)
                .collect(),
        }
    }
}
