//! The image upload and diagnosis flow.

use std::path::Path;

use chrono::Utc;

use cg_core::predict::{self, PredictPanel};
use cg_core::{Diagnosis, FlowError, ImageFile, PredictForm, SubmitControl};

use crate::CropGuardClient;
use crate::auth_panel::MSG_IN_PROGRESS;

/// Read an image file for upload.
///
/// # Errors
///
/// Returns the I/O error if the file cannot be read.
pub fn load_image(path: &Path) -> std::io::Result<ImageFile> {
    let bytes = std::fs::read(path)?;
    Ok(ImageFile::new(path, bytes))
}

pub struct PredictFlow<'a> {
    client: &'a CropGuardClient,
}

impl<'a> PredictFlow<'a> {
    #[must_use]
    pub const fn new(client: &'a CropGuardClient) -> Self {
        Self { client }
    }

    /// Submit the predict form.
    ///
    /// `session_email` is the email from the session markers, if any. On
    /// success the diagnosis is rendered into the panel and prepended to its
    /// recent list. On failure the panel shows the error and keeps its
    /// previous result and recent list.
    ///
    /// # Errors
    ///
    /// Returns the [`FlowError`] that is also displayed in the panel.
    pub async fn submit(
        &self,
        panel: &mut PredictPanel,
        session_email: Option<&str>,
        form: PredictForm,
    ) -> Result<Diagnosis, FlowError> {
        panel.clear_error();
        match self.run(panel.control(), session_email, form).await {
            Ok(diagnosis) => {
                panel.show_result(diagnosis.clone(), Utc::now());
                Ok(diagnosis)
            }
            Err(error) => {
                tracing::debug!(%error, "predict submit failed");
                panel.show_error(&error);
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        control: &SubmitControl,
        session_email: Option<&str>,
        form: PredictForm,
    ) -> Result<Diagnosis, FlowError> {
        let request = predict::validate(session_email, form)?;
        let _busy = control
            .try_begin()
            .ok_or_else(|| FlowError::validation(MSG_IN_PROGRESS))?;

        let diagnosis = self.client.predict(&request).await?;
        tracing::info!(
            disease = %diagnosis.disease(),
            confidence = diagnosis.confidence(),
            "diagnosis received"
        );
        Ok(diagnosis)
    }
}
