//! Auto-opens the category-specific tab on the helpdesk ticket form.
//!
//! When the displayed ticket's category implies a particular sub-form, the
//! matching notebook tab is brought to the foreground without a click. The
//! module observes the host-rendered form, resolves the category's form type
//! (remote read with a displayed-text fallback) and retries activation until
//! the tab has mounted.

pub mod api;
pub mod field_hook;
pub mod labels;
pub mod opener;
pub mod resolver;
pub mod retry;
pub mod surface;
pub mod watcher;

use opener::TabAutoOpener;
use std::cell::RefCell;
use wasm_bindgen::prelude::wasm_bindgen;

thread_local! {
    static OPENER: RefCell<Option<TabAutoOpener>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

/// Enable the enhancement on the current document.
///
/// Calling it again tears down the previous instance first.
#[wasm_bindgen]
pub fn attach() {
    OPENER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(mut previous) = slot.take() {
            previous.detach();
        }
        *slot = Some(TabAutoOpener::attach());
    });
}

/// Disable the enhancement and release all observers and listeners.
#[wasm_bindgen]
pub fn detach() {
    OPENER.with(|slot| {
        if let Some(mut opener) = slot.borrow_mut().take() {
            opener.detach();
        }
    });
}
