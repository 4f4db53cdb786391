//! Maps a raw form-type value to the caption of the tab that should open.

use contracts::enums::form_type::FormType;

/// Resolve the tab caption for a raw form-type value.
///
/// Input may come from a remote read (clean code) or from text already
/// rendered on the form (arbitrary case, surrounding whitespace). Unknown or
/// empty values yield `None`, which callers treat as "do nothing".
pub fn tab_label_for(raw: Option<&str>) -> Option<&'static str> {
    let code = raw?.trim().to_lowercase();
    if code.is_empty() {
        return None;
    }
    FormType::from_code(&code).map(|ft| ft.tab_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(tab_label_for(Some("complaint")), Some("Complaint Details"));
        assert_eq!(tab_label_for(Some("marketing")), Some("Marketing Details"));
        assert_eq!(tab_label_for(Some("security")), Some("Security Details"));
        assert_eq!(tab_label_for(Some("vvip_lift")), Some("Lift Booking Details"));
        assert_eq!(
            tab_label_for(Some("regular_lift")),
            Some("Lift Booking Details")
        );
        assert_eq!(
            tab_label_for(Some("procurement")),
            Some("Procurement Details")
        );
        assert_eq!(tab_label_for(Some("hr")), Some("HR Details"));
        assert_eq!(
            tab_label_for(Some("announcement")),
            Some("Announcement Details")
        );
        assert_eq!(tab_label_for(Some("maximo")), Some("Maximo Details"));
    }

    #[test]
    fn test_rendered_text_is_normalized() {
        // Readonly widgets render the display value, not the code
        assert_eq!(tab_label_for(Some("Marketing")), Some("Marketing Details"));
        assert_eq!(tab_label_for(Some("  SECURITY ")), Some("Security Details"));
    }

    #[test]
    fn test_unknown_or_empty() {
        assert_eq!(tab_label_for(Some("unknown_x")), None);
        assert_eq!(tab_label_for(Some("")), None);
        assert_eq!(tab_label_for(Some("   ")), None);
        assert_eq!(tab_label_for(None), None);
    }
}
