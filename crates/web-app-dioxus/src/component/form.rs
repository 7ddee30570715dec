use dioxus::prelude::*;

#[component]
pub fn InputField(
    label: Option<String>,
    help: Option<String>,
    placeholder: Option<String>,
    r#type: Option<String>,
    inputmode: Option<String>,
    size: Option<usize>,
    min: Option<String>,
    max: Option<String>,
    step: Option<String>,
    value: String,
    error: Option<String>,
    has_changed: bool,
    has_text_right: Option<bool>,
    is_disabled: Option<bool>,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let error = error.and_then(|error| if error.is_empty() { None } else { Some(error) });
    let has_error = error.is_some();
    rsx! {
        div {
            class: "field",
            if let Some(label) = label { label { class: "label", "{label}" } }
            div {
                class: "control",
                input {
                    class: "input",
                    class: if has_error { "is-danger" },
                    class: if has_changed { "is-info" },
                    class: if has_text_right.unwrap_or_default() { "has-text-right" },
                    disabled: if let Some(is_disabled) = is_disabled { is_disabled },
                    r#type: if let Some(r#type) = r#type { r#type } else { "text" },
                    inputmode: if let Some(inputmode) = inputmode { inputmode },
                    placeholder: if let Some(placeholder) = placeholder { placeholder },
                    size: if let Some(size) = size { size },
                    min: if let Some(min) = min { min },
                    max: if let Some(max) = max { max },
                    step: if let Some(step) = step { step },
                    value: "{value}",
                    oninput: move |evt| oninput.call(evt),
                }
            }
            if let Some(ref error) = error {
                p { class: "help is-danger", "{error}" }
            } else if let Some(ref help) = help {
                p { class: "help", "{help}" }
            }
        }
    }
}

#[component]
pub fn SelectField(
    label: Option<String>,
    options: Vec<Element>,
    has_changed: bool,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        div {
            class: "field",
            if let Some(label) = label { label { class: "label", "{label}" } }
            div {
                class: "control",
                div {
                    class: "select is-fullwidth",
                    select {
                        class: if has_changed { "has-text-info" },
                        onchange,
                        for option in options {
                            {option}
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SelectOption(text: String, value: String, selected: bool) -> Element {
    rsx! {
        option {
            selected,
            value,
            "{text}"
        }
    }
}
