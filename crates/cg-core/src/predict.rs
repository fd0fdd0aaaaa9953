//! Predict form, request, and the diagnosis returned by the backend.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::control::SubmitControl;
use crate::endpoint::ResponseSchema;
use crate::errors::FlowError;
use crate::recent::RecentResults;

pub const MSG_LOGIN_FIRST: &str = "Login first";
pub const MSG_CHOOSE_IMAGE: &str = "Choose an image";

// ---------------------------------------------------------------------------
// ImageFile
// ---------------------------------------------------------------------------

/// An image selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let mime_type = mime_for(&path);
        Self {
            path,
            mime_type,
            bytes,
        }
    }

    /// File name sent in the multipart part.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned())
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("path", &self.path)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// MIME type guessed from the file extension.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reference", rename_all = "snake_case")]
pub enum PreviewState {
    Hidden,
    /// A displayable reference to the selected file.
    Shown(String),
}

/// Preview for the current file selection. No network involved.
#[must_use]
pub fn preview_image(image: Option<&ImageFile>) -> PreviewState {
    image.map_or(PreviewState::Hidden, |image| {
        let path = image.path.to_string_lossy();
        let path = path.trim_start_matches('/');
        PreviewState::Shown(format!("file:///{path}"))
    })
}

// ---------------------------------------------------------------------------
// Form and request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictForm {
    /// Email typed into the form; used only when the session has none.
    pub email: String,
    pub crop_type: String,
    pub location: String,
    pub image: Option<ImageFile>,
}

/// Multipart fields: `email`, `crop_type`, `location`, `image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub email: String,
    pub crop_type: String,
    pub location: String,
    pub image: ImageFile,
}

/// Validate the predict form and build the request.
///
/// The email comes from the session when present, else from the form.
///
/// # Errors
///
/// Returns [`FlowError::Validation`] with "Login first" when no email is
/// resolvable, or "Choose an image" when no file is selected.
pub fn validate(session_email: Option<&str>, form: PredictForm) -> Result<PredictRequest, FlowError> {
    let email = session_email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .or_else(|| Some(form.email.trim()).filter(|e| !e.is_empty()))
        .ok_or_else(|| FlowError::validation(MSG_LOGIN_FIRST))?
        .to_string();

    let image = form
        .image
        .ok_or_else(|| FlowError::validation(MSG_CHOOSE_IMAGE))?;

    Ok(PredictRequest {
        email,
        crop_type: form.crop_type.trim().to_string(),
        location: form.location.trim().to_string(),
        image,
    })
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity label. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Other(String),
}

impl Severity {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = de_text(deserializer)?;
        Ok(Self::parse(&text))
    }
}

// ---------------------------------------------------------------------------
// Diagnosis
// ---------------------------------------------------------------------------

/// `{disease, confidence, severity, recommendation, explanation}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardDiagnosis {
    #[serde(deserialize_with = "de_text")]
    pub disease: String,
    #[serde(deserialize_with = "de_confidence")]
    pub confidence: f64,
    pub severity: Severity,
    #[serde(default, deserialize_with = "de_text")]
    pub recommendation: String,
    #[serde(default, deserialize_with = "de_text")]
    pub explanation: String,
}

/// `{disease, confidence, advisory, alert}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryDiagnosis {
    #[serde(deserialize_with = "de_text")]
    pub disease: String,
    #[serde(deserialize_with = "de_confidence")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "de_text")]
    pub advisory: String,
    #[serde(default, deserialize_with = "de_text")]
    pub alert: String,
}

/// A decoded predict response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diagnosis {
    Standard(StandardDiagnosis),
    Advisory(AdvisoryDiagnosis),
}

impl Diagnosis {
    /// Decode a response body according to the deployment's schema.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body does not match `schema`.
    pub fn decode(schema: ResponseSchema, body: &[u8]) -> Result<Self, serde_json::Error> {
        match schema {
            ResponseSchema::Standard => serde_json::from_slice(body).map(Self::Standard),
            ResponseSchema::Advisory => serde_json::from_slice(body).map(Self::Advisory),
        }
    }

    #[must_use]
    pub fn disease(&self) -> &str {
        match self {
            Self::Standard(d) => &d.disease,
            Self::Advisory(d) => &d.disease,
        }
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        match self {
            Self::Standard(d) => d.confidence,
            Self::Advisory(d) => d.confidence,
        }
    }

    #[must_use]
    pub const fn severity(&self) -> Option<&Severity> {
        match self {
            Self::Standard(d) => Some(&d.severity),
            Self::Advisory(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PredictPanel
// ---------------------------------------------------------------------------

/// Dashboard state: preview, submit control, last result, recent list.
#[derive(Debug)]
pub struct PredictPanel {
    control: SubmitControl,
    preview: PreviewState,
    error: Option<String>,
    result: Option<Diagnosis>,
    recent: RecentResults,
}

impl Default for PredictPanel {
    fn default() -> Self {
        Self::new(RecentResults::default())
    }
}

impl PredictPanel {
    pub const IDLE_LABEL: &'static str = "Submit";
    pub const BUSY_LABEL: &'static str = "Analyzing...";

    #[must_use]
    pub const fn new(recent: RecentResults) -> Self {
        Self {
            control: SubmitControl::new(Self::IDLE_LABEL, Self::BUSY_LABEL),
            preview: PreviewState::Hidden,
            error: None,
            result: None,
            recent,
        }
    }

    /// File input changed.
    pub fn select_image(&mut self, image: Option<&ImageFile>) {
        self.preview = preview_image(image);
    }

    #[must_use]
    pub const fn preview(&self) -> &PreviewState {
        &self.preview
    }

    #[must_use]
    pub const fn control(&self) -> &SubmitControl {
        &self.control
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show_error(&mut self, error: &FlowError) {
        self.error = Some(error.user_message().to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Render a new diagnosis and prepend it to the recent list.
    pub fn show_result(&mut self, diagnosis: Diagnosis, at: DateTime<Utc>) {
        self.recent.record(&diagnosis, at);
        self.result = Some(diagnosis);
    }

    #[must_use]
    pub const fn result(&self) -> Option<&Diagnosis> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn recent(&self) -> &RecentResults {
        &self.recent
    }
}

/// Accept strings, numbers, booleans, and null for free-text fields.
fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accept a number or a numeric string, optionally suffixed with `%`.
fn de_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    match &value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("confidence out of range")),
        serde_json::Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|e| de::Error::custom(format!("invalid confidence '{s}': {e}"))),
        other => Err(de::Error::custom(format!("invalid confidence: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf() -> ImageFile {
        ImageFile::new("/tmp/leaf.JPG", vec![0xFF, 0xD8, 0xFF])
    }

    #[test]
    fn missing_image_fails_with_choose_an_image() {
        let err = validate(Some("a@b.c"), PredictForm::default()).unwrap_err();
        assert_eq!(err, FlowError::validation(MSG_CHOOSE_IMAGE));
    }

    #[test]
    fn missing_email_fails_with_login_first() {
        let form = PredictForm {
            image: Some(leaf()),
            ..PredictForm::default()
        };
        let err = validate(None, form).unwrap_err();
        assert_eq!(err.user_message(), MSG_LOGIN_FIRST);
    }

    #[test]
    fn session_email_wins_over_form_email() {
        let form = PredictForm {
            email: "typed@b.c".into(),
            image: Some(leaf()),
            ..PredictForm::default()
        };
        let request = validate(Some("session@b.c"), form).unwrap();
        assert_eq!(request.email, "session@b.c");
    }

    #[test]
    fn form_email_used_without_session() {
        let form = PredictForm {
            email: " typed@b.c ".into(),
            crop_type: " Tomato ".into(),
            location: "  ".into(),
            image: Some(leaf()),
        };
        let request = validate(None, form).unwrap();
        assert_eq!(request.email, "typed@b.c");
        assert_eq!(request.crop_type, "Tomato");
        assert_eq!(request.location, "");
    }

    #[test]
    fn mime_is_guessed_from_extension() {
        assert_eq!(leaf().mime_type, "image/jpeg");
        assert_eq!(mime_for(Path::new("x.png")), "image/png");
        assert_eq!(mime_for(Path::new("x")), "application/octet-stream");
        assert_eq!(leaf().file_name(), "leaf.JPG");
    }

    #[test]
    fn preview_follows_selection() {
        assert_eq!(preview_image(None), PreviewState::Hidden);
        assert_eq!(
            preview_image(Some(&leaf())),
            PreviewState::Shown("file:///tmp/leaf.JPG".into())
        );
    }

    #[test]
    fn decodes_standard_diagnosis() {
        let body = br#"{"disease":"Blight","confidence":92,"severity":"High",
            "recommendation":"R","explanation":"E","image":"abc.jpg"}"#;
        let diagnosis = Diagnosis::decode(ResponseSchema::Standard, body).unwrap();
        assert_eq!(diagnosis.disease(), "Blight");
        assert!((diagnosis.confidence() - 92.0).abs() < f64::EPSILON);
        assert_eq!(diagnosis.severity(), Some(&Severity::High));
    }

    #[test]
    fn decodes_advisory_diagnosis_with_loose_types() {
        let body = br#"{"disease":"Rust","confidence":"81.5%","advisory":"Spray","alert":true}"#;
        let diagnosis = Diagnosis::decode(ResponseSchema::Advisory, body).unwrap();
        let Diagnosis::Advisory(d) = diagnosis else {
            panic!("expected advisory diagnosis");
        };
        assert!((d.confidence - 81.5).abs() < f64::EPSILON);
        assert_eq!(d.alert, "true");
        assert_eq!(d.advisory, "Spray");
    }

    #[test]
    fn unknown_severity_is_kept_verbatim() {
        assert_eq!(Severity::parse("critical"), Severity::Other("critical".into()));
        assert_eq!(Severity::parse(" MEDIUM "), Severity::Medium);
    }

    #[test]
    fn standard_schema_rejects_missing_disease() {
        let body = br#"{"confidence":92,"severity":"High"}"#;
        assert!(Diagnosis::decode(ResponseSchema::Standard, body).is_err());
    }

    #[test]
    fn panel_tracks_preview_result_and_recent() {
        let mut panel = PredictPanel::default();
        assert_eq!(panel.preview(), &PreviewState::Hidden);

        panel.select_image(Some(&leaf()));
        assert!(matches!(panel.preview(), PreviewState::Shown(_)));
        panel.select_image(None);
        assert_eq!(panel.preview(), &PreviewState::Hidden);

        let body = br#"{"disease":"Blight","confidence":92,"severity":"High",
            "recommendation":"R","explanation":"E"}"#;
        let diagnosis = Diagnosis::decode(ResponseSchema::Standard, body).unwrap();
        panel.show_result(diagnosis, Utc::now());
        assert_eq!(panel.result().map(Diagnosis::disease), Some("Blight"));
        assert_eq!(panel.recent().len(), 1);
        assert_eq!(panel.control().label(), "Submit");
    }

    #[test]
    fn diagnosis_serializes_without_tag() {
        let body = br#"{"disease":"Blight","confidence":92,"severity":"high",
            "recommendation":"R","explanation":"E"}"#;
        let diagnosis = Diagnosis::decode(ResponseSchema::Standard, body).unwrap();
        let json = serde_json::to_value(&diagnosis).unwrap();
        assert_eq!(json["disease"], "Blight");
        assert_eq!(json["severity"], "High");
    }
}
