use dioxus::prelude::*;
use futures_util::StreamExt;
use gloo_timers::future::IntervalStream;
use log::error;
use web_sys::wasm_bindgen::{JsCast, JsValue, closure::Closure};

use gymlog_domain as domain;
use gymlog_web_app as web_app;
use gymlog_web_app::SettingsService;

use crate::{DATA_CHANGED, WEB_APP_SERVICE, component::element::Icon};

/// Stopwatch of the current set or countdown of the current rest.
///
/// The running timer of the workout is advanced every second.
#[component]
pub fn Timer(workout: Signal<Option<domain::Workout>>) -> Element {
    let settings = use_resource(|| async {
        let _ = DATA_CHANGED.read();
        WEB_APP_SERVICE.read().get_settings().await
    });
    let mut beeper = use_signal(Beeper::new);
    use_effect(move || {
        if let Some(Ok(settings)) = &*settings.read() {
            beeper.write().volume = settings.beep_volume;
        }
    });

    use_coroutine(move |_: UnboundedReceiver<()>| async move {
        let mut interval = IntervalStream::new(1000);
        loop {
            interval.next().await;
            let (rest, stopwatch) = match &*workout.peek() {
                Some(w) => (
                    match w.phase() {
                        domain::Phase::Rest(countdown) if countdown.is_running() => {
                            Some(u32::from(countdown.remaining()))
                        }
                        _ => None,
                    },
                    w.stopwatch().is_running(),
                ),
                None => (None, false),
            };
            if rest.is_none() && !stopwatch {
                continue;
            }
            if let Some(w) = workout.write().as_mut() {
                w.tick();
            }
            if let Some(remaining) = rest {
                beeper.write().beep(remaining.saturating_sub(1));
            }
        }
    });

    let Some(phase) = workout.read().as_ref().map(domain::Workout::phase) else {
        return rsx! {};
    };
    let stopwatch = workout
        .read()
        .as_ref()
        .map(domain::Workout::stopwatch)
        .unwrap_or_default();

    match phase {
        domain::Phase::Exercise => rsx! {
            div {
                class: "block has-text-centered",
                div {
                    class: "is-size-1 has-text-weight-bold is-clickable",
                    class: if !stopwatch.is_running() { "is-blinking" },
                    onclick: move |_| {
                        if let Some(w) = workout.write().as_mut() {
                            w.start_pause_stopwatch();
                        }
                    },
                    "{web_app::format::clock(stopwatch.elapsed())}"
                }
                p {
                    class: "is-size-7 has-text-grey",
                    if stopwatch.is_running() { "Tap to pause" } else { "Tap to start the set timer" }
                }
            }
        },
        domain::Phase::Rest(countdown) => rsx! {
            div {
                class: "block has-text-centered",
                p { class: "is-size-6 has-text-weight-bold", "Rest" }
                div {
                    class: "is-size-1 has-text-weight-bold has-text-info is-clickable",
                    class: if !countdown.is_running() { "is-blinking" },
                    onclick: move |_| {
                        if let Some(w) = workout.write().as_mut() {
                            w.start_pause_rest();
                        }
                    },
                    "{web_app::format::clock(countdown.remaining())}"
                }
                div {
                    class: "field is-grouped is-grouped-centered",
                    p {
                        class: "control",
                        button {
                            class: "button is-small",
                            onclick: move |_| {
                                if let Some(w) = workout.write().as_mut() {
                                    w.start_pause_rest();
                                }
                            },
                            if countdown.is_running() {
                                Icon { name: "pause", is_small: true }
                            } else {
                                Icon { name: "play", is_small: true }
                            }
                        }
                    }
                    p {
                        class: "control",
                        button {
                            class: "button is-small",
                            onclick: move |_| {
                                if let Some(w) = workout.write().as_mut() {
                                    w.reset_rest();
                                }
                            },
                            Icon { name: "rotate-left", is_small: true }
                        }
                    }
                    p {
                        class: "control",
                        button {
                            class: "button is-small is-link",
                            onclick: move |_| {
                                if let Some(w) = workout.write().as_mut() {
                                    w.skip_rest();
                                }
                            },
                            "Skip rest"
                        }
                    }
                }
            }
        },
        domain::Phase::Finished => rsx! {},
    }
}

/// Short beeps announcing the end of a rest.
struct Beeper {
    audio_context: Option<web_sys::AudioContext>,
    beep_time: f64,
    volume: u8,
}

impl Beeper {
    fn new() -> Self {
        Self {
            audio_context: match web_sys::AudioContext::new() {
                Ok(audio_context) => Some(audio_context),
                Err(err) => {
                    error!("failed to create audio context: {err:?}");
                    None
                }
            },
            beep_time: 0.,
            volume: web_app::Settings::default().beep_volume,
        }
    }

    /// Two beeps ten seconds before the end of the rest and one beep in each of the last
    /// three seconds.
    fn beep(&mut self, remaining_seconds: u32) {
        let Some(audio_context) = &self.audio_context else {
            return;
        };
        let now = audio_context.current_time();
        let beeps = match remaining_seconds {
            10 => {
                self.beep_time = now + 0.18;
                vec![(now + 0.01, 0.1), (now + 0.18, 0.1)]
            }
            2 => {
                self.beep_time = now + 0.01;
                vec![(self.beep_time, 0.15)]
            }
            1 | 0 => {
                self.beep_time = f64::max(self.beep_time + 1., now + 0.01);
                vec![(self.beep_time, if remaining_seconds == 0 { 0.5 } else { 0.15 })]
            }
            _ => vec![],
        };
        for (start, length) in beeps {
            if let Err(err) = play_beep(audio_context, 2000., start, length, self.volume) {
                error!("failed to play beep: {err:?}");
            }
        }
    }
}

fn play_beep(
    audio_context: &web_sys::AudioContext,
    frequency: f32,
    start: f64,
    length: f64,
    volume: u8,
) -> Result<(), JsValue> {
    let oscillator = audio_context.create_oscillator()?;
    let gain = audio_context.create_gain()?;
    gain.gain().set_value(f32::from(volume) / 100.);
    gain.connect_with_audio_node(&audio_context.destination())?;
    oscillator.connect_with_audio_node(&gain)?;
    oscillator.frequency().set_value(frequency);
    oscillator.start_with_when(start)?;
    oscillator.stop_with_when(start + length)?;
    Ok(())
}

/// Asks the browser to confirm reloading or closing the page while alive.
pub struct LeaveGuard {
    listener: Closure<dyn FnMut(web_sys::BeforeUnloadEvent)>,
}

impl LeaveGuard {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let listener = Closure::<dyn FnMut(web_sys::BeforeUnloadEvent)>::new(
            |event: web_sys::BeforeUnloadEvent| {
                event.prevent_default();
                event.set_return_value("");
            },
        );
        if let Err(err) = window
            .add_event_listener_with_callback("beforeunload", listener.as_ref().unchecked_ref())
        {
            error!("failed to add beforeunload listener: {err:?}");
            return None;
        }
        Some(Self { listener })
    }
}

impl Drop for LeaveGuard {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "beforeunload",
                self.listener.as_ref().unchecked_ref(),
            );
        }
    }
}
