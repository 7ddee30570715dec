use chrono::Local;
use dioxus::prelude::*;

use gymlog_domain::{self as domain, CalendarService, RoutineService, WorkoutSessionService};
use gymlog_web_app as web_app;

use crate::{
    DATA_CHANGED, DOMAIN_SERVICE, NOTIFICATIONS, Route, WORKOUT_ACTIVE,
    component::{
        component::{LeaveGuard, Timer},
        element::{
            Color, Dialog, ErrorMessage, Icon, LoadingPage, Message, NoData, NotFound, Table, Title,
        },
        form::InputField,
    },
    signal_changed_data,
};

/// Guided workout of a routine. A nil routine shows the routine selection.
#[component]
pub fn Workout(routine: domain::RoutineID) -> Element {
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
    let state = WorkoutState {
        workout: use_signal(|| None),
        leave_guard: use_signal(|| None),
        form: use_signal(SetForm::default),
        error: use_signal(|| None),
        cancel_dialog: use_signal(|| false),
        is_saving: use_signal(|| false),
    };
    let WorkoutState {
        mut workout,
        mut leave_guard,
        mut error,
        ..
    } = state;

    use_effect(use_reactive!(|(routine,)| {
        if routine.is_nil() || workout.peek().is_some() {
            return;
        }
        if let (Some(Ok(routines)), Some(Ok(workout_sessions))) =
            (&*routines.read(), &*workout_sessions.read())
        {
            let Some(routine) = routines.iter().find(|r| r.id == routine) else {
                return;
            };
            match domain::Workout::start(routine, workout_sessions, Local::now().naive_local()) {
                Ok(w) => {
                    error.set(None);
                    workout.set(Some(w));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        }
    }));

    use_effect(move || {
        let active = workout.read().is_some();
        if *WORKOUT_ACTIVE.peek() != active {
            *WORKOUT_ACTIVE.write() = active;
        }
        if active && leave_guard.peek().is_none() {
            leave_guard.set(LeaveGuard::new());
        } else if !active && leave_guard.peek().is_some() {
            leave_guard.set(None);
        }
    });

    use_drop(|| {
        *WORKOUT_ACTIVE.write() = false;
    });

    if workout.read().is_some() {
        return rsx! {
            Timer { workout }
            {view_workout(state)}
        };
    }

    match (
        &*routines.read(),
        &*calendar.read(),
        &*workout_sessions.read(),
    ) {
        (Some(Ok(routines)), Some(Ok(calendar)), Some(Ok(workout_sessions))) => {
            if routine.is_nil() {
                view_routine_selection(routines, calendar, workout_sessions)
            } else if !routines.iter().any(|r| r.id == routine) {
                rsx! { NotFound { element: "Routine".to_string() } }
            } else if let Some(error) = error() {
                rsx! { ErrorMessage { message: "{error}" } }
            } else {
                rsx! { LoadingPage {} }
            }
        }
        (Some(Err(err)), _, _) | (_, Some(Err(err)), _) | (_, _, Some(Err(err))) => rsx! {
            ErrorMessage { message: "{err}" }
        },
        (None, _, _) | (_, None, _) | (_, _, None) => rsx! { LoadingPage {} },
    }
}

fn view_routine_selection(
    routines: &[domain::Routine],
    calendar: &domain::Calendar,
    workout_sessions: &[domain::WorkoutSession],
) -> Element {
    if routines.is_empty() {
        return rsx! {
            NoData { text: "Create a routine to start a workout" }
            div {
                class: "block has-text-centered",
                Link { class: "button is-link", to: Route::Routines {}, "Go to routines" }
            }
        };
    }

    let scheduled = calendar.routine_on(Local::now().date_naive());
    let mut routines = routines.to_vec();
    routines.sort_by_key(|r| (Some(r.id) != scheduled, r.name.to_string().to_lowercase()));

    let body = routines
        .into_iter()
        .map(|r| {
            let id = r.id;
            let num_exercises = r.exercises.len();
            let duration = domain::average_duration(workout_sessions, r.id)
                .and_then(web_app::format::estimated_duration)
                .unwrap_or_default();
            vec![
                rsx! {
                    span {
                        class: "has-text-weight-bold",
                        "{r.name}"
                    }
                    if Some(id) == scheduled {
                        span { class: "tag is-link ml-2", "Today" }
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
                        class: "has-text-right",
                        Link {
                            class: "button is-small is-link",
                            to: Route::Workout { routine: id },
                            Icon { name: "play", is_small: true }
                            span { "Start" }
                        }
                    }
                },
            ]
        })
        .collect::<Vec<_>>();

    rsx! {
        Title { title: "Choose a routine" }
        Table { body }
    }
}

fn view_workout(state: WorkoutState) -> Element {
    let WorkoutState {
        workout,
        mut form,
        mut error,
        mut cancel_dialog,
        mut is_saving,
        ..
    } = state;

    let Some(current) = workout.read().clone() else {
        return rsx! {};
    };
    let input = form();

    let log_set = move |_: MouseEvent| {
        let SetForm { weight, reps, .. } = form();
        let mut workout = state.workout;
        let result = workout
            .write()
            .as_mut()
            .map(|w| w.log_set(&weight, &reps));
        match result {
            Some(Ok(_)) => {
                error.set(None);
                let mut form = form.write();
                form.reps.clear();
                form.show_drop_set = false;
            }
            Some(Err(err)) => error.set(Some(err.to_string())),
            None => {}
        }
    };

    let log_drop_set = move |_: MouseEvent| {
        let SetForm {
            drop_weight,
            drop_reps,
            ..
        } = form();
        let mut workout = state.workout;
        let result = workout
            .write()
            .as_mut()
            .map(|w| w.log_drop_set(&drop_weight, &drop_reps));
        match result {
            Some(Ok(())) => {
                error.set(None);
                form.write().drop_reps.clear();
            }
            Some(Err(err)) => error.set(Some(err.to_string())),
            None => {}
        }
    };

    let save = move |_: MouseEvent| async move {
        let Some(w) = state.workout.read().clone() else {
            return;
        };
        let session = match w.finish(Local::now().naive_local()) {
            Ok(session) => session,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        is_saving.set(true);
        let result = DOMAIN_SERVICE.read().create_workout_session(session).await;
        is_saving.set(false);
        match result {
            Ok(_) => {
                end_workout(state);
                signal_changed_data();
                navigator().push(Route::Home {});
            }
            Err(err) => NOTIFICATIONS
                .write()
                .push(format!("Failed to save workout: {err}")),
        }
    };

    let started_at = current.started_at().format("%H:%M").to_string();
    let is_resting = matches!(current.phase(), domain::Phase::Rest(_));
    let num_exercises = current.exercises().len();
    let position = (current.position() + 1).min(num_exercises);
    let last_set = current.last_set().map(format_set);
    let num_sets = current
        .exercises()
        .iter()
        .map(|e| e.sets.len())
        .sum::<usize>();
    let volume = web_app::format::volume(
        current
            .exercises()
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(domain::Set::volume)
            .sum::<f32>(),
    );

    rsx! {
        Title { title: "{current.routine_name()}" }
        div {
            class: "block has-text-centered is-size-7",
            "Started at {started_at}"
        }
        {view_exercise_overview(&current)}
        if let Some(exercise) = current.current_exercise() {
            {view_current_exercise(exercise, position, num_exercises, is_resting, &input, form, log_set)}
        } else {
            div {
                class: "box mx-2 has-text-centered",
                p { class: "title is-5", "Workout complete" }
                p {
                    class: "subtitle is-6",
                    "{num_sets} sets, {volume} kg"
                }
                button {
                    class: "button is-success",
                    class: if is_saving() { "is-loading" },
                    onclick: save,
                    Icon { name: "floppy-disk" }
                    span { "Save workout" }
                }
            }
        }
        if let Some(last_set) = last_set {
            div {
                class: "block mx-2",
                p {
                    class: "is-size-7",
                    "Last set: {last_set}"
                    a {
                        class: "ml-2",
                        onclick: move |_| {
                            let mut form = form.write();
                            form.show_drop_set = !form.show_drop_set;
                        },
                        if input.show_drop_set { "Hide drop set" } else { "Add drop set" }
                    }
                }
                if input.show_drop_set {
                    div {
                        class: "columns is-mobile is-gapless mt-2 mb-0",
                        div {
                            class: "column mr-2",
                            InputField {
                                placeholder: "Weight (kg)".to_string(),
                                inputmode: "decimal".to_string(),
                                value: input.drop_weight.clone(),
                                has_changed: false,
                                oninput: move |event: FormEvent| form.write().drop_weight = event.value(),
                            }
                        }
                        div {
                            class: "column mr-2",
                            InputField {
                                placeholder: "Reps".to_string(),
                                inputmode: "numeric".to_string(),
                                value: input.drop_reps.clone(),
                                has_changed: false,
                                oninput: move |event: FormEvent| form.write().drop_reps = event.value(),
                            }
                        }
                        div {
                            class: "column is-narrow",
                            button {
                                class: "button is-link is-outlined",
                                onclick: log_drop_set,
                                Icon { name: "plus" }
                            }
                        }
                    }
                }
            }
        }
        if let Some(error) = error() {
            div {
                class: "mx-2",
                Message { color: Color::Danger, "{error}" }
            }
        }
        div {
            class: "block has-text-centered mt-5",
            button {
                class: "button is-danger is-outlined",
                onclick: move |_| cancel_dialog.set(true),
                "Cancel workout"
            }
        }
        if cancel_dialog() {
            Dialog {
                color: Color::Danger,
                title: rsx! { "Cancel the workout?" },
                close_event: move |_| cancel_dialog.set(false),
                div {
                    class: "block",
                    "All logged sets of this workout will be discarded."
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-light is-soft",
                            onclick: move |_| cancel_dialog.set(false),
                            "Continue workout"
                        }
                    }
                    div {
                        class: "control",
                        button {
                            class: "button is-danger",
                            onclick: move |_| {
                                cancel_dialog.set(false);
                                end_workout(state);
                                navigator().push(Route::Home {});
                            },
                            "Discard workout"
                        }
                    }
                }
            }
        }
    }
}

fn view_current_exercise(
    exercise: &domain::WorkoutExercise,
    position: usize,
    num_exercises: usize,
    is_resting: bool,
    input: &SetForm,
    mut form: Signal<SetForm>,
    log_set: impl FnMut(MouseEvent) + 'static,
) -> Element {
    let set_number = exercise.sets.len() + 1;
    let last_performance = exercise
        .last_performance
        .as_ref()
        .map(|record| format_sets(&record.sets));
    let weight_placeholder = exercise
        .last_performance
        .as_ref()
        .and_then(|record| record.sets.get(exercise.sets.len()))
        .map(|set| web_app::format::weight(f32::from(set.weight)));

    rsx! {
        div {
            class: "box mx-2",
            p {
                class: "title is-5 mb-2",
                "{exercise.name}"
            }
            p {
                class: "subtitle is-6 mb-2",
                "Exercise {position} of {num_exercises}, set {set_number} of {exercise.planned_sets}, {exercise.planned_reps} reps"
            }
            if let Some(last_performance) = last_performance {
                p {
                    class: "is-size-7 has-text-grey mb-3",
                    "Last time: {last_performance}"
                }
            }
            if is_resting {
                p {
                    class: "has-text-centered has-text-grey",
                    "Rest before the next set"
                }
            } else {
                div {
                    class: "columns is-mobile is-gapless mb-0",
                    div {
                        class: "column mr-2",
                        InputField {
                            label: "Weight (kg)".to_string(),
                            inputmode: "decimal".to_string(),
                            placeholder: weight_placeholder,
                            value: input.weight.clone(),
                            has_changed: false,
                            oninput: move |event: FormEvent| form.write().weight = event.value(),
                        }
                    }
                    div {
                        class: "column",
                        InputField {
                            label: "Reps".to_string(),
                            inputmode: "numeric".to_string(),
                            placeholder: exercise.planned_reps.to_string(),
                            value: input.reps.clone(),
                            has_changed: false,
                            oninput: move |event: FormEvent| form.write().reps = event.value(),
                        }
                    }
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-link",
                            onclick: log_set,
                            Icon { name: "check" }
                            span { "Log set" }
                        }
                    }
                }
            }
        }
    }
}

fn view_exercise_overview(workout: &domain::Workout) -> Element {
    let position = workout.position();
    let is_finished = workout.phase() == domain::Phase::Finished;

    rsx! {
        div {
            class: "tags is-centered mx-2",
            for (i, exercise) in workout.exercises().iter().enumerate() {
                span {
                    class: "tag",
                    class: if exercise.is_complete() { "is-success" },
                    class: if i == position && !is_finished { "is-link" },
                    "{exercise.name} {exercise.sets.len()}/{exercise.planned_sets}"
                }
            }
        }
    }
}

fn end_workout(state: WorkoutState) {
    let WorkoutState {
        mut workout,
        mut leave_guard,
        mut form,
        ..
    } = state;
    workout.set(None);
    leave_guard.set(None);
    form.set(SetForm::default());
    *WORKOUT_ACTIVE.write() = false;
}

fn format_set(set: &domain::Set) -> String {
    let mut text = format!(
        "{} kg × {}",
        web_app::format::weight(f32::from(set.weight)),
        set.reps
    );
    for drop_set in &set.drop_sets {
        text.push_str(&format!(
            " → {} kg × {}",
            web_app::format::weight(f32::from(drop_set.weight)),
            drop_set.reps
        ));
    }
    text
}

fn format_sets(sets: &[domain::Set]) -> String {
    sets.iter().map(format_set).collect::<Vec<_>>().join(", ")
}

#[derive(Clone, Copy)]
struct WorkoutState {
    workout: Signal<Option<domain::Workout>>,
    leave_guard: Signal<Option<LeaveGuard>>,
    form: Signal<SetForm>,
    error: Signal<Option<String>>,
    cancel_dialog: Signal<bool>,
    is_saving: Signal<bool>,
}

#[derive(Debug, Default, Clone, PartialEq)]
struct SetForm {
    weight: String,
    reps: String,
    drop_weight: String,
    drop_reps: String,
    show_drop_set: bool,
}
