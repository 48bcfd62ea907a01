//! Prefill overlay decoding.
//!
//! An external link can carry a base64-encoded JSON overlay (`--prefill` /
//! `INTERVUE_PREFILL`) that is shallow-merged into the default snapshot
//! before the form first mounts, pre-populating the company step. Decode or
//! parse failures are silently ignored and the form falls back to defaults,
//! matching the fail-soft handling of the config loader.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

use super::types::ExperienceForm;

/// The subset of company-step fields an external link may pre-populate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PrefillOverlay {
    pub company_name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub internship_type: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
}

/// Decode a base64 JSON overlay. Returns `None` on any failure.
pub fn decode(encoded: &str) -> Option<PrefillOverlay> {
    let bytes = STANDARD.decode(encoded.trim().as_bytes()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Shallow-merge a prefill overlay into the snapshot: only fields present
/// in the overlay are replaced. Invalid input leaves the form untouched.
pub fn apply(form: &mut ExperienceForm, encoded: &str) {
    let Some(overlay) = decode(encoded) else {
        tracing::debug!("ignoring unparseable prefill payload");
        return;
    };

    let company = &mut form.company;
    if let Some(value) = overlay.company_name {
        company.company_name = value;
    }
    if let Some(value) = overlay.role {
        company.role = value;
    }
    if let Some(value) = overlay.department {
        company.department = value;
    }
    if let Some(value) = overlay.internship_type {
        company.internship_type = value;
    }
    if let Some(value) = overlay.duration {
        company.duration = value;
    }
    if let Some(value) = overlay.location {
        company.location = value;
    }
    if overlay.city.is_some() {
        company.city = overlay.city;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    #[test]
    fn test_apply_merges_present_fields_only() {
        let encoded =
            STANDARD.encode(r#"{"company_name":"Acme","role":"SDE Intern"}"#.as_bytes());
        let mut form = ExperienceForm::default();
        form.company.location = "Pune".into();

        apply(&mut form, &encoded);

        assert_eq!(form.company.company_name, "Acme");
        assert_eq!(form.company.role, "SDE Intern");
        // Untouched by the overlay.
        assert_eq!(form.company.location, "Pune");
    }

    #[test]
    fn test_bad_base64_is_silently_ignored() {
        let mut form = ExperienceForm::default();
        apply(&mut form, "%%%not-base64%%%");
        assert_eq!(form, ExperienceForm::default());
    }

    #[test]
    fn test_bad_json_is_silently_ignored() {
        let encoded = STANDARD.encode(b"{not json");
        let mut form = ExperienceForm::default();
        apply(&mut form, &encoded);
        assert_eq!(form, ExperienceForm::default());
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let encoded = STANDARD.encode(r#"{"company_name":"Acme","campus":"north"}"#.as_bytes());
        let overlay = decode(&encoded).unwrap();
        assert_eq!(overlay.company_name.as_deref(), Some("Acme"));
    }
}
