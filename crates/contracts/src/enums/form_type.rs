use serde::{Deserialize, Serialize};

/// Sub-form kinds a helpdesk category can map to.
///
/// The code strings are the selection values stored on the category record;
/// `tab_label` is the visible caption of the notebook tab that hosts the
/// matching sub-form. Both lift variants share one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Complaint,
    Marketing,
    Security,
    VvipLift,
    RegularLift,
    Procurement,
    Hr,
    Announcement,
    Maximo,
}

impl FormType {
    /// Selection code as stored on the category record.
    pub fn code(&self) -> &'static str {
        match self {
            FormType::Complaint => "complaint",
            FormType::Marketing => "marketing",
            FormType::Security => "security",
            FormType::VvipLift => "vvip_lift",
            FormType::RegularLift => "regular_lift",
            FormType::Procurement => "procurement",
            FormType::Hr => "hr",
            FormType::Announcement => "announcement",
            FormType::Maximo => "maximo",
        }
    }

    /// Caption of the notebook tab hosting this kind's sub-form.
    pub fn tab_label(&self) -> &'static str {
        match self {
            FormType::Complaint => "Complaint Details",
            FormType::Marketing => "Marketing Details",
            FormType::Security => "Security Details",
            FormType::VvipLift | FormType::RegularLift => "Lift Booking Details",
            FormType::Procurement => "Procurement Details",
            FormType::Hr => "HR Details",
            FormType::Announcement => "Announcement Details",
            FormType::Maximo => "Maximo Details",
        }
    }

    /// Parse a selection code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "complaint" => Some(FormType::Complaint),
            "marketing" => Some(FormType::Marketing),
            "security" => Some(FormType::Security),
            "vvip_lift" => Some(FormType::VvipLift),
            "regular_lift" => Some(FormType::RegularLift),
            "procurement" => Some(FormType::Procurement),
            "hr" => Some(FormType::Hr),
            "announcement" => Some(FormType::Announcement),
            "maximo" => Some(FormType::Maximo),
            _ => None,
        }
    }

    /// All known kinds.
    pub fn all() -> Vec<FormType> {
        vec![
            FormType::Complaint,
            FormType::Marketing,
            FormType::Security,
            FormType::VvipLift,
            FormType::RegularLift,
            FormType::Procurement,
            FormType::Hr,
            FormType::Announcement,
            FormType::Maximo,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for ft in FormType::all() {
            assert_eq!(FormType::from_code(ft.code()), Some(ft));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(FormType::from_code("unknown_x"), None);
        assert_eq!(FormType::from_code(""), None);
        // Codes are stored lowercase; parsing is exact
        assert_eq!(FormType::from_code("Complaint"), None);
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&FormType::VvipLift).unwrap(),
            "\"vvip_lift\""
        );
        assert_eq!(
            serde_json::from_str::<FormType>("\"regular_lift\"").unwrap(),
            FormType::RegularLift
        );
    }
}
