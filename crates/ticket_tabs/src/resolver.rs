//! Decides which tab caption to activate for the record currently shown.
//!
//! The category record is authoritative for the form type but needs a remote
//! read that can fail or lag; the text already rendered on the form is always
//! available but may be stale after a category change that is not yet saved.
//! Both paths go through the same label mapping, so they can only disagree on
//! staleness, never on format.

use crate::labels::tab_label_for;
use crate::surface::TicketSurface;
use std::future::Future;

/// Resolve the target tab caption for `surface`.
///
/// Prefers the remote read of the referenced category; falls back to the
/// displayed form-type text when no category id is present, the read fails,
/// or the record carries no code. An authoritative non-empty code that maps
/// to nothing means "no tab to open" and does not fall back.
pub async fn resolve_target_label<S, G, Fut>(surface: &S, read_form_type: G) -> Option<&'static str>
where
    S: TicketSurface,
    G: FnOnce(i64) -> Fut,
    Fut: Future<Output = Result<Option<String>, String>>,
{
    if let Some(id) = surface.category_ref_id() {
        match read_form_type(id).await {
            Ok(Some(code)) if !code.trim().is_empty() => {
                return tab_label_for(Some(&code));
            }
            Ok(_) => {}
            Err(err) => {
                log::debug!(
                    "category {} read failed, using displayed form type: {}",
                    id,
                    err
                );
            }
        }
    }
    tab_label_for(surface.displayed_form_type().as_deref())
}
