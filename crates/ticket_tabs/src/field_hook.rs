//! Re-triggers resolution when the category or form-type field is edited.
//!
//! The host form controller announces edits by dispatching a
//! `helpdesk:fields-changed` CustomEvent on `document`, with the changed field
//! names as the detail. This is the primary trigger for user-driven edits;
//! the mutation watcher covers initial and server-driven renders.

use crate::surface::DomSurface;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CustomEvent, EventTarget};

pub const FIELD_CHANGE_EVENT: &str = "helpdesk:fields-changed";
pub const CATEGORY_FIELD: &str = "request_category_id";
pub const FORM_TYPE_FIELD: &str = "form_type";

/// Wait before resolving, so dependent-field recomputation triggered by the
/// edit has finished.
pub const FIELD_CHANGE_SETTLE_MS: u32 = 150;

/// Whether a changed-field set warrants a new resolution pass.
pub fn is_relevant_change(changed: &[String]) -> bool {
    changed
        .iter()
        .any(|f| f == CATEGORY_FIELD || f == FORM_TYPE_FIELD)
}

/// Owned listener on the host's field-change notification path.
///
/// Dropping the hook removes the listener.
pub struct FieldChangeHook {
    target: EventTarget,
    listener: Closure<dyn FnMut(web_sys::Event)>,
}

impl FieldChangeHook {
    pub fn install(trigger: Rc<dyn Fn(DomSurface)>) -> Option<Self> {
        let document = web_sys::window()?.document()?;

        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Some(custom) = event.dyn_ref::<CustomEvent>() else {
                return;
            };
            let changed: Vec<String> = match serde_wasm_bindgen::from_value(custom.detail()) {
                Ok(fields) => fields,
                Err(err) => {
                    log::debug!("unreadable field-change detail: {}", err);
                    return;
                }
            };
            if !is_relevant_change(&changed) {
                return;
            }
            let trigger = trigger.clone();
            spawn_local(async move {
                TimeoutFuture::new(FIELD_CHANGE_SETTLE_MS).await;
                if let Some(surface) = DomSurface::from_document() {
                    trigger(surface);
                }
            });
        });

        document
            .add_event_listener_with_callback(FIELD_CHANGE_EVENT, listener.as_ref().unchecked_ref())
            .ok()?;

        Some(Self {
            target: document.into(),
            listener,
        })
    }
}

impl Drop for FieldChangeHook {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            FIELD_CHANGE_EVENT,
            self.listener.as_ref().unchecked_ref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_category_change_is_relevant() {
        assert!(is_relevant_change(&fields(&[
            "name",
            "request_category_id"
        ])));
    }

    #[test]
    fn test_form_type_change_is_relevant() {
        assert!(is_relevant_change(&fields(&["form_type"])));
    }

    #[test]
    fn test_unrelated_changes_are_ignored() {
        assert!(!is_relevant_change(&fields(&["name", "stage_id"])));
        assert!(!is_relevant_change(&fields(&[])));
    }
}
