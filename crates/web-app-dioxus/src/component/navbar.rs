use dioxus::prelude::*;

use gymlog_web_app as web_app;
use gymlog_web_app::SettingsService;

use crate::{
    DATA_CHANGED, Route, WEB_APP_SERVICE, WORKOUT_ACTIVE,
    component::element::{Color, Dialog, ErrorMessage, Icon, LoadingPage},
    signal_changed_data,
};

#[component]
pub fn Navbar() -> Element {
    let mut menu_visible = use_signal(|| false);
    let mut settings_visible = use_signal(|| false);
    let mut leave_target = use_signal(|| None::<Route>);
    let settings = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        WEB_APP_SERVICE.read().get_settings().await
    });
    let navigator = use_navigator();

    let route = use_route::<Route>();
    let page_title = match route {
        Route::Home {} => "GymLog",
        Route::Routines {} => "Routines",
        Route::Routine { .. } => "Routine",
        Route::Calendar {} => "Calendar",
        Route::Workout { .. } => "Workout",
        Route::Manual {} => "Manual entry",
        Route::Progress { .. } => "Progress",
        Route::Data {} => "Data",
        Route::NotFound { .. } => "",
    };
    let go_up_target = match route {
        Route::Home {} => None,
        Route::Routine { .. } => Some(Route::Routines {}),
        Route::Routines {}
        | Route::Calendar {}
        | Route::Workout { .. }
        | Route::Manual {}
        | Route::Progress { .. }
        | Route::Data {}
        | Route::NotFound { .. } => Some(Route::Home {}),
    };

    let mut go_to = move |target: Route| {
        *menu_visible.write() = false;
        if WORKOUT_ACTIVE() {
            *leave_target.write() = Some(target);
        } else {
            navigator.push(target);
        }
    };

    let menu_items = [
        ("house", "Home", Route::Home {}),
        ("list", "Routines", Route::Routines {}),
        ("calendar-days", "Calendar", Route::Calendar {}),
        (
            "dumbbell",
            "Workout",
            Route::Workout {
                routine: gymlog_domain::RoutineID::nil(),
            },
        ),
        ("pen-to-square", "Manual entry", Route::Manual {}),
        (
            "chart-line",
            "Progress",
            Route::Progress {
                exercise: String::new(),
            },
        ),
        ("database", "Data", Route::Data {}),
    ];

    rsx! {
        nav {
            class: "navbar is-fixed-top is-primary has-shadow has-text-weight-bold",
            div {
                class: "container",
                div {
                    class: "navbar-brand is-flex-grow-1",
                    a {
                        class: "navbar-item is-size-5",
                        class: if go_up_target.is_none() { "has-text-primary" },
                        Icon {
                            name: "chevron-left",
                            onclick: {
                                let go_up_target = go_up_target.clone();
                                move |_| {
                                    if let Some(go_up_target) = &go_up_target {
                                        go_to(go_up_target.clone());
                                    }
                                }
                            },
                        }
                    }
                    div { class: "navbar-item is-size-5", "{page_title}" }
                    div { class: "mx-auto" }
                    a {
                        aria_expanded: menu_visible(),
                        aria_label: "menu",
                        class: "navbar-burger ml-0",
                        class: if menu_visible() { "is-active" },
                        role: "button",
                        onclick: move |_| { *menu_visible.write() = !menu_visible() },
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                        span { aria_hidden: "true" }
                    }
                }
                div {
                    class: "navbar-menu is-flex-grow-0",
                    class: if menu_visible() { "is-active" },
                    div {
                        class: "navbar-end",
                        for (icon, text, target) in menu_items {
                            a {
                                class: "navbar-item",
                                onclick: move |_| go_to(target.clone()),
                                Icon { name: "{icon}", px: 5 }
                                "{text}"
                            }
                        }
                        a {
                            class: "navbar-item",
                            onclick: move |_| {
                                *settings_visible.write() = true;
                                *menu_visible.write() = false;
                            },
                            Icon { name: "gear", px: 5 }
                            "Settings"
                        }
                    }
                }
            }
        }

        if *settings_visible.read() {
            Settings { settings, settings_visible }
        }

        if let Some(target) = leave_target() {
            Dialog {
                color: Color::Danger,
                title: rsx! { "Leave the workout?" },
                close_event: move |_| *leave_target.write() = None,
                div {
                    class: "block",
                    "The current workout has not been saved and will be lost."
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-light is-soft",
                            onclick: move |_| *leave_target.write() = None,
                            "Stay"
                        }
                    }
                    div {
                        class: "control",
                        button {
                            class: "button is-danger",
                            onclick: move |_| {
                                *WORKOUT_ACTIVE.write() = false;
                                *leave_target.write() = None;
                                navigator.push(target.clone());
                            },
                            "Leave"
                        }
                    }
                }
            }
        }

        Outlet::<Route> {}
    }
}

#[component]
fn Settings(
    settings: Resource<Result<web_app::Settings, String>>,
    settings_visible: Signal<bool>,
) -> Element {
    let themes = [
        ("sun", "Light", web_app::Theme::Light),
        ("moon", "Dark", web_app::Theme::Dark),
        ("desktop", "System", web_app::Theme::System),
    ];

    match settings.read().clone() {
        Some(Ok(settings)) => rsx! {
            Dialog {
                color: Color::Primary,
                title: rsx! { "Settings" },
                close_event: move |_| *settings_visible.write() = false,
                p {
                    class: "mb-5",
                    h1 { class: "subtitle", "Beep volume" }
                    input {
                        class: "slider is-fullwidth is-info",
                        max: "100",
                        min: "0",
                        r#type: "range",
                        step: "10",
                        value: settings.beep_volume,
                        oninput: move |event| {
                            let mut settings = settings;
                            settings.beep_volume = event.value().parse().unwrap_or(100);
                            async move {
                                if WEB_APP_SERVICE.read().set_settings(settings).await.is_ok() {
                                    signal_changed_data();
                                }
                            }
                        },
                    }
                }
                p {
                    class: "mb-5",
                    h1 { class: "subtitle", "Theme" }
                    div {
                        class: "field has-addons",
                        for (icon, text, theme) in themes {
                            p {
                                class: "control",
                                button {
                                    class: "button",
                                    class: if settings.theme == theme { "is-link" },
                                    onclick: move |_| {
                                        let mut settings = settings;
                                        settings.theme = theme;
                                        async move {
                                            if WEB_APP_SERVICE.read().set_settings(settings).await.is_ok() {
                                                signal_changed_data();
                                            }
                                        }
                                    },
                                    Icon { name: "{icon}", is_small: true }
                                    span { "{text}" }
                                }
                            }
                        }
                    }
                }
            }
        },
        Some(Err(err)) => rsx! {
            ErrorMessage { message: "Failed to get settings: {err}" }
        },
        None => rsx! { LoadingPage {} },
    }
}
