use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use dioxus::prelude::*;
use strum::Display;

use gymlog_domain as domain;
use gymlog_web_app as web_app;

#[allow(dead_code)]
#[derive(Display, Clone, Copy, PartialEq)]
pub enum Color {
    #[strum(to_string = "text")]
    Text,
    #[strum(to_string = "link")]
    Link,
    #[strum(to_string = "primary")]
    Primary,
    #[strum(to_string = "info")]
    Info,
    #[strum(to_string = "success")]
    Success,
    #[strum(to_string = "warning")]
    Warning,
    #[strum(to_string = "danger")]
    Danger,
    #[strum(to_string = "dark")]
    Dark,
}

#[component]
pub fn CenteredBlock(children: Element) -> Element {
    rsx! {
        div { class: "block has-text-centered", {children} }
    }
}

#[component]
pub fn DataBox(children: Element, title: String) -> Element {
    rsx! {
        div {
            class: "box has-text-centered mx-2 p-3",
            p {
                class: "is-size-6",
                {title}
            }
            p {
                class: "is-size-5",
                {children}
            }
        }
    }
}

#[component]
pub fn LoadingPage() -> Element {
    rsx! {
        div {
            class: "is-size-2 has-text-centered m-6",
            i { class: "fas fa-spinner fa-pulse" }
        }
    }
}

#[component]
pub fn Message(children: Element, color: Color) -> Element {
    rsx! {
        div {
            class: "message my-1 is-{color}",
            div {
                class: "message-body p-2",
                {children}
            }
        }
    }
}

#[component]
pub fn Error(message: String) -> Element {
    rsx! {
        IconText { icon: "triangle-exclamation", text: message, color: Color::Danger }
    }
}

#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div {
            class: "message is-danger mx-2",
            div {
                class: "message-body has-text-dark",
                div {
                    class: "title has-text-danger is-size-4",
                    "{message}"
                }
            }
        }
    }
}

#[component]
pub fn NotFound(element: String) -> Element {
    rsx! {
        ErrorMessage { message: "{element} not found" }
    }
}

#[component]
pub fn NoData(text: Option<String>) -> Element {
    rsx! {
        div {
            class: "block is-size-7 has-text-centered has-text-grey-light mb-6",
            if let Some(text) = text { "{text}" } else { "No data" }
        }
    }
}

#[component]
pub fn Icon(
    name: String,
    is_small: Option<bool>,
    px: Option<u8>,
    onclick: Option<EventHandler<MouseEvent>>,
) -> Element {
    rsx! {
        span {
            class: "icon",
            class: if is_small.unwrap_or_default() { "is-small" },
            class: if let Some(px) = px { "px-{px}" },
            onclick: move |evt| {
                if let Some(event_handler) = onclick {
                    event_handler.call(evt);
                }
            },
            i { class: "fas fa-{name}" }
        }
    }
}

#[component]
pub fn IconText(
    icon: String,
    text: String,
    color: Option<Color>,
    onclick: Option<EventHandler<MouseEvent>>,
) -> Element {
    rsx! {
        span {
            class: "icon-text",
            class: if let Some(color) = color { "has-text-{color}" },
            onclick: move |evt| {
                if let Some(event_handler) = onclick {
                    event_handler.call(evt);
                }
            },
            Icon { name: icon }
            span { {text} }
        }
    }
}

#[component]
pub fn FloatingActionButton(icon: String, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        button {
            class: "button is-fab is-medium is-link",
            onclick,
            Icon { name: icon }
        }
    }
}

#[component]
pub fn Dialog(
    children: Element,
    title: Option<Element>,
    close_event: EventHandler<MouseEvent>,
    color: Option<Color>,
) -> Element {
    let color = color.unwrap_or(Color::Primary);
    rsx! {
        div {
            class: "modal is-active",
            div {
                class: "modal-background",
                onclick: close_event
            }
            div {
                class: "modal-content",
                div {
                    class: "message is-{color} mx-2",
                    div {
                        class: "message-body has-text-text-bold has-background-scheme-main",
                        if let Some(title) = title {
                            div {
                                class: "title has-text-{color}",
                                {title}
                            }
                        }
                        {children}
                    }
                }
            }
            button {
                aria_label: "close",
                class: "modal-close",
                onclick: close_event,
            }
        }
    }
}

/// Dialog asking to confirm an irreversible deletion.
#[component]
pub fn DeleteConfirmationDialog(
    element_type: String,
    element_name: Element,
    description: Option<String>,
    delete_event: EventHandler<MouseEvent>,
    cancel_event: EventHandler<MouseEvent>,
    is_loading: bool,
) -> Element {
    rsx! {
        Dialog {
            title: rsx! {
                span {
                    "Delete the {element_type} "
                    {element_name}
                    "?"
                }
            },
            close_event: move |evt| cancel_event.call(evt),
            color: Color::Danger,
            div {
                class: "block",
                if let Some(description) = description {
                    "{description}"
                } else {
                    "The {element_type} will be permanently deleted."
                }
            }
            div {
                class: "field is-grouped is-grouped-centered",
                div {
                    class: "control",
                    onclick: move |evt| cancel_event.call(evt),
                    button {
                        class: "button is-light is-soft",
                        "No"
                    }
                }
                div {
                    class: "control",
                    onclick: move |evt| delete_event.call(evt),
                    button {
                        class: "button is-danger",
                        class: if is_loading { "is-loading" },
                        "Yes, delete {element_type}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn Title(title: String, class: Option<String>) -> Element {
    rsx! {
        CenteredBlock {
            div {
                class: "container",
                h1 {
                    class: "title is-5",
                    class: if let Some(c) = &class { "{c}" },
                    "{title}"
                }
            }
        }
    }
}

#[component]
pub fn Table(head: Option<Vec<Element>>, body: Vec<Vec<Element>>) -> Element {
    rsx! {
        div {
            class: "table-container mt-4",
            table {
                class: "table is-fullwidth is-hoverable",
                if let Some(head) = head {
                    thead {
                        tr {
                            for element in head {
                                th {
                                    {element}
                                }
                            }
                        }
                    }
                }
                tbody {
                    for row in body {
                        tr {
                            for element in row {
                                td {
                                    {element}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn IntervalControl(
    current_interval: Signal<domain::Interval>,
    all: domain::Interval,
) -> Element {
    let current = current_interval.read();
    let today = Local::now().date_naive();
    let duration = current.last - current.first + Duration::days(1);
    let last_days = |interval: domain::DefaultInterval| {
        let days = interval as i64;
        (
            today - Duration::days(days),
            today,
            current.last == today && duration == Duration::days(days + 1),
        )
    };
    let mut intervals = vec![(
        "ALL",
        all.first,
        all.last,
        all.first == current.first && all.last == current.last,
    )];
    for (name, interval) in [
        ("1Y", domain::DefaultInterval::_1Y),
        ("6M", domain::DefaultInterval::_6M),
        ("3M", domain::DefaultInterval::_3M),
        ("1M", domain::DefaultInterval::_1M),
    ] {
        let (first, last, is_active) = last_days(interval);
        intervals.push((name, first, last, is_active));
    }
    intervals.extend([
        (
            "<",
            if current.first - duration / 4 > all.first {
                current.first - duration / 4
            } else {
                all.first
            },
            if current.first - duration / 4 > all.first {
                current.last - duration / 4
            } else {
                all.first + duration - Duration::days(1)
            },
            false,
        ),
        (
            ">",
            if current.last + duration / 4 < today {
                current.first + duration / 4
            } else {
                today - duration + Duration::days(1)
            },
            if current.last + duration / 4 < today {
                current.last + duration / 4
            } else {
                today
            },
            false,
        ),
    ]);

    rsx! {
        div {
            div {
                class: "field has-addons has-addons-centered",
                for (name, first, last, is_active) in intervals {
                    p {
                        class: "control",
                        a {
                            class: "button is-small",
                            class: if is_active { "is-link" },
                            onclick: move |_| { *current_interval.write() = domain::Interval { first, last } },
                            "{name}"
                        }
                    }
                }
            }
            div {
                class: "mb-4 is-size-6 has-text-centered",
                "{current.first} – {current.last}"
            }
        }
    }
}

#[component]
pub fn Chart(
    labels: Vec<ChartLabel>,
    chart: Result<Option<String>, String>,
    no_data_label: bool,
) -> Element {
    match chart {
        Ok(None) => {
            if no_data_label {
                rsx! { NoData {} }
            } else {
                rsx! {}
            }
        }
        Ok(Some(value)) => rsx! {
            div {
                class: "container has-text-centered mb-4",
                h1 {
                    class: "is-size-6 has-text-weight-bold",
                    for (color, name) in labels.into_iter().map(|l| (web_app::chart::legend_color(l.color, l.opacity), l.name)) {
                        span {
                            class: "icon-text mx-1",
                            span {
                                class: "icon",
                                style: "color:{color}",
                                i { class: "fas fa-square" }
                            }
                            span { "{name}" }
                        }
                    }
                }
                div {
                    dangerous_inner_html: value,
                }
            }
        },
        Err(err) => rsx! { Error { message: err } },
    }
}

#[derive(Clone, PartialEq)]
pub struct ChartLabel {
    pub name: String,
    pub color: usize,
    pub opacity: f64,
}

/// Heatmap of the days in the interval, one column per week.
#[component]
pub fn Calendar(entries: Vec<(NaiveDate, usize, f64)>, interval: domain::Interval) -> Element {
    let mut calendar: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();

    let mut day = interval.first.week(Weekday::Mon).first_day();
    while day <= interval.last.week(Weekday::Mon).last_day() {
        calendar.insert(day, (0, 0.));
        day += Duration::days(1);
    }

    for (date, color, opacity) in entries {
        calendar.entry(date).and_modify(|e| *e = (color, opacity));
    }

    let mut weekdays: [Vec<(NaiveDate, Option<String>)>; 7] = Default::default();
    for (i, (date, (color, opacity))) in calendar.iter().enumerate() {
        let background = if *opacity > 0. {
            Some(web_app::chart::legend_color(*color, *opacity))
        } else if *date < interval.first || *date > interval.last {
            Some("var(--bulma-scheme-main)".to_string())
        } else {
            None
        };
        weekdays[i % 7].push((*date, background));
    }
    let today = Local::now().date_naive();

    rsx! {
        div {
            class: "table-container is-calendar py-2",
            table {
                class: "table is-size-7 mx-auto",
                tbody {
                    for (weekday, days) in weekdays.into_iter().enumerate() {
                        tr {
                            for (date, background) in days {
                                td {
                                    class: if date == today { "has-text-weight-bold" },
                                    style: if let Some(background) = background { "background-color:{background}" },
                                    div { "{date.day()}" }
                                }
                            }
                            td {
                                class: "is-calendar-label",
                                {WEEKDAYS[weekday]}
                            }
                        }
                    }
                }
            }
        }
    }
}

pub const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
