//! Read-only view of the rendered ticket form.
//!
//! `TicketSurface` is the seam between the resolution logic and the host DOM:
//! the resolver and cycle driver only ever see this trait, so they can be
//! tested against a mock while `DomSurface` does the actual web-sys querying.
//!
//! Host markup contract: the form container carries `.o_form_view`; the
//! category many2one exposes its id via `data-id`/`data-value` or an input
//! value; the form-type field renders its display text under
//! `[name="form_type"]`; notebook tabs are `.nav-tabs .nav-link` elements.

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement};

pub const FORM_VIEW_SELECTOR: &str = ".o_form_view";
pub const CATEGORY_FIELD_SELECTOR: &str = ".o_form_view [name=\"request_category_id\"]";
pub const FORM_TYPE_FIELD_SELECTOR: &str = ".o_form_view [name=\"form_type\"], .o_form_view div[name=\"form_type\"], .o_form_view span[name=\"form_type\"]";
pub const TAB_LINK_SELECTOR: &str = ".o_form_view .o_notebook .nav-tabs .nav-link";

/// What the resolution logic needs from the rendered form.
pub trait TicketSurface {
    /// Id referenced by the category selection control, if present and
    /// parseable.
    fn category_ref_id(&self) -> Option<i64>;

    /// Currently displayed form-type text (trimmed, lowercased), if any.
    /// May be stale relative to the category record.
    fn displayed_form_type(&self) -> Option<String>;

    /// Find the tab whose caption equals `label` and activate it. Returns
    /// `false` when no such tab is mounted yet.
    fn activate_tab(&self, label: &str) -> bool;
}

/// Live-DOM implementation scoped to one container element.
///
/// Nothing is cached: every call re-queries the container, so a surface value
/// stays valid across re-renders of the form.
pub struct DomSurface {
    root: Element,
}

impl DomSurface {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Surface spanning the whole document.
    pub fn from_document() -> Option<Self> {
        let root = web_sys::window()?.document()?.document_element()?;
        Some(Self { root })
    }

    /// Whether `el` is, or contains, a form-view container.
    pub fn contains_form_view(el: &Element) -> bool {
        if el.matches(FORM_VIEW_SELECTOR).unwrap_or(false) {
            return true;
        }
        el.query_selector(FORM_VIEW_SELECTOR)
            .ok()
            .flatten()
            .is_some()
    }

    /// The form-type display element, used to attach the narrow observer.
    pub fn form_type_element(&self) -> Option<Element> {
        self.root
            .query_selector(FORM_TYPE_FIELD_SELECTOR)
            .ok()
            .flatten()
    }
}

impl TicketSurface for DomSurface {
    fn category_ref_id(&self) -> Option<i64> {
        let el = self
            .root
            .query_selector(CATEGORY_FIELD_SELECTOR)
            .ok()
            .flatten()?;
        // The many2one widget stores the id in data-id or data-value;
        // editable variants keep it as the input value.
        let raw = el
            .get_attribute("data-id")
            .or_else(|| el.get_attribute("data-value"))
            .or_else(|| el.dyn_ref::<HtmlInputElement>().map(|input| input.value()))?;
        raw.trim().parse::<i64>().ok()
    }

    fn displayed_form_type(&self) -> Option<String> {
        let el = self
            .root
            .query_selector(FORM_TYPE_FIELD_SELECTOR)
            .ok()
            .flatten()?;
        let text = el.text_content()?;
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn activate_tab(&self, label: &str) -> bool {
        let Ok(tabs) = self.root.query_selector_all(TAB_LINK_SELECTOR) else {
            return false;
        };
        for i in 0..tabs.length() {
            let Some(node) = tabs.get(i) else { continue };
            let Some(tab) = node.dyn_ref::<HtmlElement>() else {
                continue;
            };
            let text = tab.text_content().unwrap_or_default();
            if text.trim() == label {
                tab.click();
                return true;
            }
        }
        false
    }
}
