//! Farm registration form: the crop and sowing date behind later predictions
//! and alerts.

use chrono::NaiveDate;
use serde::Serialize;

use crate::errors::FlowError;
use crate::predict::MSG_LOGIN_FIRST;

pub const MSG_FARM_FIELDS_REQUIRED: &str = "Crop type and sow date required";
pub const MSG_SOW_DATE_FORMAT: &str = "Sow date must be YYYY-MM-DD";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FarmForm {
    pub crop_type: String,
    pub sow_date: String,
    pub location: String,
}

/// JSON body of `POST /api/addFarm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmRequest {
    pub email: String,
    pub crop_type: String,
    pub sow_date: String,
    pub location: String,
}

/// Validate the farm form against the session email and build the request.
///
/// Location is optional; the backend rejects the other three fields when
/// blank.
///
/// # Errors
///
/// Returns [`FlowError::Validation`] when the session has no email, a
/// required field is blank, or the sow date is not a calendar date.
pub fn validate(session_email: Option<&str>, form: FarmForm) -> Result<FarmRequest, FlowError> {
    let email = session_email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| FlowError::validation(MSG_LOGIN_FIRST))?;

    let crop_type = form.crop_type.trim();
    let sow_date = form.sow_date.trim();
    if crop_type.is_empty() || sow_date.is_empty() {
        return Err(FlowError::validation(MSG_FARM_FIELDS_REQUIRED));
    }
    NaiveDate::parse_from_str(sow_date, "%Y-%m-%d")
        .map_err(|_| FlowError::validation(MSG_SOW_DATE_FORMAT))?;

    Ok(FarmRequest {
        email: email.to_string(),
        crop_type: crop_type.to_string(),
        sow_date: sow_date.to_string(),
        location: form.location.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn form(crop_type: &str, sow_date: &str) -> FarmForm {
        FarmForm {
            crop_type: crop_type.into(),
            sow_date: sow_date.into(),
            location: " Nashik ".into(),
        }
    }

    #[test]
    fn builds_trimmed_request_from_session_email() {
        let request = validate(Some(" a@b.c "), form(" Tomato ", "2026-06-01")).unwrap();
        assert_eq!(
            request,
            FarmRequest {
                email: "a@b.c".into(),
                crop_type: "Tomato".into(),
                sow_date: "2026-06-01".into(),
                location: "Nashik".into(),
            }
        );
    }

    #[test]
    fn requires_a_session_email() {
        let err = validate(Some("  "), form("Tomato", "2026-06-01")).unwrap_err();
        assert_eq!(err.user_message(), MSG_LOGIN_FIRST);
        assert!(validate(None, form("Tomato", "2026-06-01")).is_err());
    }

    #[rstest]
    #[case("", "2026-06-01", MSG_FARM_FIELDS_REQUIRED)]
    #[case("Tomato", " ", MSG_FARM_FIELDS_REQUIRED)]
    #[case("Tomato", "01/06/2026", MSG_SOW_DATE_FORMAT)]
    #[case("Tomato", "2026-02-30", MSG_SOW_DATE_FORMAT)]
    fn rejects_bad_fields(#[case] crop: &str, #[case] sow: &str, #[case] message: &str) {
        let err = validate(Some("a@b.c"), form(crop, sow)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), message);
    }

    #[test]
    fn location_may_be_blank() {
        let mut blank = form("Rice", "2026-07-15");
        blank.location.clear();
        assert_eq!(validate(Some("a@b.c"), blank).unwrap().location, "");
    }
}
