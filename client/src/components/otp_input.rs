//! Segmented one-time-code input.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the verification page. Owns an `OtpEntry` and mirrors it into
//! one `<input>` per slot; every keystroke, backspace and paste goes through
//! the entry so focus movement and completion follow the same rules natively
//! and in the browser.
//!
//! `on_complete` fires once per transition that fills the last empty slot.
//! Toggling `reset` clears every slot and focuses the first one. Pasted text
//! is handed to the entry untrimmed, so surrounding whitespace rejects it.

use leptos::html;
use leptos::prelude::*;

use crate::state::otp::{DEFAULT_OTP_LENGTH, EntryOutcome, OtpEntry};

#[component]
pub fn OtpInput(
    #[prop(default = DEFAULT_OTP_LENGTH)] length: usize,
    on_complete: Callback<String>,
    #[prop(into)] reset: Signal<bool>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let length = length.max(1);
    let entry = RwSignal::new(OtpEntry::new(length));
    let refs = StoredValue::new((0..length).map(|_| NodeRef::<html::Input>::new()).collect::<Vec<_>>());

    let focus_slot = move |index: usize| {
        #[cfg(feature = "hydrate")]
        if let Some(input) = refs.with_value(|r| r.get(index).and_then(|n| n.get_untracked())) {
            let _ = input.focus();
            input.select();
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = index;
    };

    // Rejected keystrokes leave the typed character in the DOM; put the slot
    // values back.
    let sync_dom = move || {
        #[cfg(feature = "hydrate")]
        refs.with_value(|r| {
            entry.with_untracked(|e| {
                for (index, node) in r.iter().enumerate() {
                    if let Some(input) = node.get_untracked() {
                        input.set_value(&e.slot(index).map(String::from).unwrap_or_default());
                    }
                }
            });
        });
    };

    let apply = move |outcome: EntryOutcome| {
        sync_dom();
        if !outcome.accepted {
            return;
        }
        focus_slot(entry.with_untracked(OtpEntry::focus));
        if let Some(code) = outcome.completed {
            on_complete.run(code);
        }
    };

    Effect::new(move |previous: Option<bool>| {
        let current = reset.get();
        if reset_on_toggle(entry, previous, current) {
            sync_dom();
            focus_slot(0);
        }
        current
    });

    Effect::new(move || focus_slot(0));

    let slots = (0..length)
        .map(|index| {
            let node_ref = refs.with_value(|r| r[index]);
            view! {
                <input
                    node_ref=node_ref
                    class=move || {
                        if entry.with(|e| e.slot(index).is_some()) {
                            "otp-input__slot otp-input__slot--filled"
                        } else {
                            "otp-input__slot"
                        }
                    }
                    type="text"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    maxlength="1"
                    aria-label=format!("Digit {}", index + 1)
                    disabled=move || disabled.get()
                    prop:value=move || entry.with(|e| e.slot(index).map(String::from).unwrap_or_default())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        let outcome = entry.try_update(|e| e.input(index, &value)).unwrap_or_default();
                        apply(outcome);
                    }
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        #[cfg(feature = "hydrate")]
                        if ev.key() == "Backspace" {
                            ev.prevent_default();
                            let outcome = entry.try_update(|e| e.backspace(index)).unwrap_or_default();
                            apply(outcome);
                        }
                        #[cfg(not(feature = "hydrate"))]
                        let _ = ev;
                    }
                    on:paste=move |ev: leptos::ev::ClipboardEvent| {
                        ev.prevent_default();
                        #[cfg(feature = "hydrate")]
                        {
                            let text = ev
                                .clipboard_data()
                                .and_then(|data| data.get_data("text").ok())
                                .unwrap_or_default();
                            apply(paste_text(entry, &text));
                        }
                    }
                />
            }
        })
        .collect_view();

    view! { <div class="otp-input" role="group" aria-label="Verification code">{slots}</div> }
}

/// Clears the entry when `reset` changed since the last run. The first run
/// only records the value.
fn reset_on_toggle(entry: RwSignal<OtpEntry>, previous: Option<bool>, current: bool) -> bool {
    if previous.is_none_or(|p| p == current) {
        return false;
    }
    entry.update(OtpEntry::reset);
    true
}

#[cfg(any(test, feature = "hydrate"))]
fn paste_text(entry: RwSignal<OtpEntry>, text: &str) -> EntryOutcome {
    entry.try_update(|e| e.paste(text)).unwrap_or_default()
}

#[cfg(test)]
#[path = "otp_input_test.rs"]
mod otp_input_test;
