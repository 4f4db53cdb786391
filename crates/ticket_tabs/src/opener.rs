//! The per-view component instance tying everything together.
//!
//! One `TabAutoOpener` is attached per document. It owns the generation
//! counter, the mutation watcher and the field-change hook; detaching
//! invalidates all in-flight cycles and releases every observer and listener.

use crate::api;
use crate::field_hook::FieldChangeHook;
use crate::resolver::resolve_target_label;
use crate::retry::{retry_activation, CycleToken, Generation, RetryOutcome, RetryPolicy, TeardownFlag};
use crate::surface::{DomSurface, TicketSurface};
use crate::watcher::SurfaceWatcher;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub struct TabAutoOpener {
    generation: Generation,
    alive: TeardownFlag,
    watcher: Option<SurfaceWatcher>,
    hook: Option<FieldChangeHook>,
}

impl TabAutoOpener {
    /// Install the watcher and the field-change hook on the current document.
    pub fn attach() -> Self {
        let generation = Generation::default();
        let alive = TeardownFlag::new();

        // Every trigger supersedes whatever cycle was running before it.
        // Settle-delay tasks that fire after detach land here and do nothing.
        let trigger: Rc<dyn Fn(DomSurface)> = Rc::new({
            let generation = generation.clone();
            let alive = alive.clone();
            move |surface| {
                if !alive.is_up() {
                    return;
                }
                let token = generation.begin_cycle();
                spawn_local(run_cycle(surface, token));
            }
        });

        let watcher = SurfaceWatcher::install(alive.clone(), trigger.clone());
        if watcher.is_none() {
            log::warn!("ticket tabs: no document body, surface watcher not installed");
        }
        let hook = FieldChangeHook::install(trigger);
        if hook.is_none() {
            log::warn!("ticket tabs: field-change hook not installed");
        }

        Self {
            generation,
            alive,
            watcher,
            hook,
        }
    }

    /// Tear down: cancel in-flight cycles, disconnect observers, remove the
    /// field-change listener.
    pub fn detach(&mut self) {
        self.alive.lower();
        self.generation.invalidate_all();
        self.watcher.take();
        self.hook.take();
    }
}

/// One resolution cycle: resolve the target label, then drive activation
/// until it lands, the budget runs out, or a newer cycle takes over.
async fn run_cycle(surface: DomSurface, token: CycleToken) {
    let Some(label) = resolve_target_label(&surface, api::read_category_form_type).await else {
        log::debug!("no target tab for the current record");
        return;
    };
    if !token.is_current() {
        log::debug!("cycle for '{}' superseded during resolution", label);
        return;
    }
    let outcome = retry_activation(
        RetryPolicy::default(),
        &token,
        || surface.activate_tab(label),
        |ms| TimeoutFuture::new(ms),
    )
    .await;
    match outcome {
        RetryOutcome::Activated => log::debug!("activated tab '{}'", label),
        RetryOutcome::Exhausted => log::debug!("tab '{}' never mounted, giving up", label),
        RetryOutcome::Superseded => log::debug!("cycle for '{}' superseded", label),
    }
}
