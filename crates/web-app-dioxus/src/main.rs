#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

use std::sync::Arc;

use dioxus::prelude::*;
use log::error;

use gymlog_domain as domain;
use gymlog_storage as storage;
use gymlog_web_app as web_app;
use gymlog_web_app::SettingsService;

use component::{
    element::{Color, Dialog},
    navbar::Navbar,
};
use page::{
    calendar::Calendar, data::Data, home::Home, manual::Manual, not_found::NotFound,
    progress::Progress, routine::Routine, routines::Routines, workout::Workout,
};

mod component;
mod page;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
    #[route("/")]
    Home {},
    #[route("/routines")]
    Routines {},
    #[route("/routine#:id")]
    Routine { id: domain::RoutineID },
    #[route("/calendar")]
    Calendar {},
    #[route("/workout?:routine")]
    Workout { routine: domain::RoutineID },
    #[route("/manual")]
    Manual {},
    #[route("/progress?:exercise")]
    Progress { exercise: String },
    #[route("/data")]
    Data {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

static DOMAIN_SERVICE: GlobalSignal<domain::Service<storage::LocalStorage>> =
    Signal::global(|| domain::Service::new(storage::LocalStorage::default()));
static WEB_APP_SERVICE: GlobalSignal<web_app::Service<storage::LocalStorage>> =
    Signal::global(|| web_app::Service::new(storage::LocalStorage::default()));
static NOTIFICATIONS: GlobalSignal<Vec<String>> = Signal::global(Vec::new);
static DATA_CHANGED: GlobalSignal<usize> = Signal::global(|| 0);
static WORKOUT_ACTIVE: GlobalSignal<bool> = Signal::global(|| false);

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    let _ = web_app::log::init(
        Arc::new(storage::LocalStorage::<storage::Browser>::default()),
        log::LevelFilter::Debug,
    );
}

#[component]
fn App() -> Element {
    std::panic::set_hook(Box::new(|info| {
        error!("{info}");
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("main"))
            .map(|el| {
                el.set_inner_html(&format!("
                    <section class=\"section\">
                        <div class=\"container\">
                            <div class=\"message is-danger\">
                                <div class=\"message-header\">
                                    <p>Something went wrong</p>
                                </div>
                                <div class=\"message-body\">
                                    <div class=\"block\">
                                        An unexpected error occurred and the application cannot continue.
                                    </div>
                                    <div class=\"block\">
                                        <pre>{info}</pre>
                                    </div>
                                    <div class=\"block field is-grouped is-grouped-centered\">
                                        <button class=\"button\" onclick=\"location.reload()\">
                                            <span class=\"icon\">
                                                <i class=\"fa fa-arrow-rotate-right\"></i>
                                            </span>
                                            <span>Reload page</span>
                                        </button>
                                    </div>
                                </div>
                            </div>
                        </div>
                    </section>
                "));
                Some(())
            });
    }));

    let settings = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        WEB_APP_SERVICE.read().get_settings().await
    });
    let theme = match &*settings.read() {
        Some(Ok(settings)) => settings.current_theme(),
        _ => web_app::Theme::Light,
    };

    let theme_class = match theme {
        web_app::Theme::Dark => "theme-dark",
        web_app::Theme::System | web_app::Theme::Light => "theme-light",
    };

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div {
            class: "container is-max-desktop py-4 {theme_class}",
            Router::<Route> {},
            Notification {}
        }
    }
}

#[component]
fn Notification() -> Element {
    let notification = NOTIFICATIONS.read().last().cloned();

    rsx! {
        if let Some(message) = notification {
            Dialog {
                color: Color::Danger,
                title: rsx! { "Error" },
                close_event: move |_| { let _ = NOTIFICATIONS.write().pop(); },
                div {
                    class: "block",
                    "{message}"
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    div {
                        class: "control",
                        button {
                            class: "button is-danger",
                            onclick: move |_| { let _ = NOTIFICATIONS.write().pop(); },
                            "Close"
                        }
                    }
                }
            }
        }
    }
}

fn signal_changed_data() {
    *DATA_CHANGED.write() += 1;
}
