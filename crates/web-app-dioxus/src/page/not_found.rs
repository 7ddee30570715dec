use dioxus::prelude::*;

use crate::{Route, component::element::ErrorMessage};

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        ErrorMessage { message: "Page not found: /{path}" }
        div {
            class: "block has-text-centered",
            Link { to: Route::Home {}, class: "button is-link", "Go to home page" }
        }
    }
}
