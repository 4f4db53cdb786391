//! Detects when the ticket form (re)appears or its form-type display changes.
//!
//! Two observers:
//! - a broad one on `document.body` watching for added subtrees that are, or
//!   contain, the form-view container;
//! - a narrow one attached later to the form-type display element, catching
//!   recomputations the host performs without a field-change notification.
//!
//! Both observers and their closures are owned by the watcher; dropping it
//! disconnects them. Settle-delay tasks spawned here call back into the
//! opener's trigger, which is a no-op once the opener is detached.

use crate::retry::TeardownFlag;
use crate::surface::DomSurface;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, MutationObserver, MutationObserverInit, MutationRecord};

/// Wait after the container appears, so field widgets finish mounting.
pub const SURFACE_SETTLE_MS: u32 = 50;
/// One unconditional pass after installation, for a form already on screen.
pub const INITIAL_PASS_DELAY_MS: u32 = 200;
/// When to look for the form-type element and attach the narrow observer.
pub const FIELD_OBSERVER_DELAY_MS: u32 = 300;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, MutationObserver)>;

pub struct SurfaceWatcher {
    surface_observer: MutationObserver,
    _surface_cb: ObserverCallback,
    field_observer: MutationObserver,
    _field_cb: ObserverCallback,
}

impl SurfaceWatcher {
    /// Install both observers and schedule the initial pass. `trigger` starts
    /// one resolution cycle scoped to the surface it is given; `alive` is the
    /// opener's teardown flag, checked by the delayed observer attach.
    pub fn install(alive: TeardownFlag, trigger: Rc<dyn Fn(DomSurface)>) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let body = document.body()?;

        // Narrow observer: any mutation of the form-type display re-resolves.
        let field_cb: ObserverCallback = Closure::new({
            let trigger = trigger.clone();
            move |_mutations: js_sys::Array, _obs: MutationObserver| {
                if let Some(surface) = DomSurface::from_document() {
                    trigger(surface);
                }
            }
        });
        let field_observer = MutationObserver::new(field_cb.as_ref().unchecked_ref()).ok()?;

        // Broad observer: added subtrees containing the form view.
        let surface_cb: ObserverCallback = Closure::new({
            let trigger = trigger.clone();
            move |mutations: js_sys::Array, _obs: MutationObserver| {
                for m in mutations.iter() {
                    let Ok(record) = m.dyn_into::<MutationRecord>() else {
                        continue;
                    };
                    let added = record.added_nodes();
                    for i in 0..added.length() {
                        let Some(node) = added.get(i) else { continue };
                        let Ok(el) = node.dyn_into::<Element>() else {
                            continue;
                        };
                        if !DomSurface::contains_form_view(&el) {
                            continue;
                        }
                        let trigger = trigger.clone();
                        spawn_local(async move {
                            TimeoutFuture::new(SURFACE_SETTLE_MS).await;
                            trigger(DomSurface::new(el));
                        });
                    }
                }
            }
        });
        let surface_observer = MutationObserver::new(surface_cb.as_ref().unchecked_ref()).ok()?;

        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        surface_observer.observe_with_options(&body, &init).ok()?;

        // The form may already be present before observation began.
        {
            let trigger = trigger.clone();
            spawn_local(async move {
                TimeoutFuture::new(INITIAL_PASS_DELAY_MS).await;
                if let Some(surface) = DomSurface::from_document() {
                    trigger(surface);
                }
            });
        }

        // Attach the narrow observer once the form-type element can be found.
        // If it is not there yet, the broad observer still covers re-renders.
        {
            let field_observer = field_observer.clone();
            spawn_local(async move {
                TimeoutFuture::new(FIELD_OBSERVER_DELAY_MS).await;
                // Detached in the meantime: the observer is disconnected and
                // its closure dropped, so it must not be re-armed.
                if !alive.is_up() {
                    return;
                }
                let Some(surface) = DomSurface::from_document() else {
                    return;
                };
                let Some(el) = surface.form_type_element() else {
                    return;
                };
                let init = MutationObserverInit::new();
                init.set_child_list(true);
                init.set_character_data(true);
                init.set_subtree(true);
                if field_observer.observe_with_options(&el, &init).is_err() {
                    log::debug!("could not observe the form-type display element");
                }
            });
        }

        Some(Self {
            surface_observer,
            _surface_cb: surface_cb,
            field_observer,
            _field_cb: field_cb,
        })
    }
}

impl Drop for SurfaceWatcher {
    fn drop(&mut self) {
        self.surface_observer.disconnect();
        self.field_observer.disconnect();
    }
}
