//! Photo upload that adds recognized ingredients to the pantry.
//!
//! Unlike the bindings, this flow reports progress and never returns an
//! error: every outcome ends up as status text.

use std::cell::{Cell, RefCell};

use crate::binding::{Binding, InFlight, Submission};
use crate::error::ApiError;
use crate::http::HttpHost;
use crate::resources::Pantry;
use crate::transport::Transport;
use crate::types::{ImageFile, RecognitionResult};

pub const STATUS_ANALYZING: &str = "Analyzing…";
pub const STATUS_RECOGNIZED: &str = "Ingredients added from photo!";

#[derive(Debug, Default)]
pub struct RecognitionFlow {
    file: RefCell<Option<ImageFile>>,
    status: RefCell<Option<String>>,
    submitting: Cell<bool>,
}

impl RecognitionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick (or clear) the image for the next submission.
    pub fn select_file(&self, file: Option<ImageFile>) {
        self.file.replace(file);
    }

    pub fn selected_file(&self) -> Option<ImageFile> {
        self.file.borrow().clone()
    }

    /// Status line text; `None` until the first submission.
    pub fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Upload the selected image. Without a file this is a no-op. On
    /// success the file is cleared and the pantry refreshed; on failure the
    /// file is kept so the user can retry.
    pub async fn recognize<H: HttpHost>(&self, transport: &Transport<H>, pantry: &Binding<Pantry>) -> Submission {
        let Some(_in_flight) = InFlight::begin(&self.submitting) else {
            return Submission::Skipped;
        };
        let Some(file) = self.selected_file() else {
            return Submission::Skipped;
        };
        self.set_status(STATUS_ANALYZING);

        match self.upload(transport, &file).await {
            Ok(result) => {
                tracing::info!(items = result.items.len(), "ingredients recognized from photo");
                self.set_status(STATUS_RECOGNIZED);
                self.file.replace(None);
                if let Err(err) = pantry.refresh(transport).await {
                    tracing::warn!(error = %err, "pantry refresh after recognition failed");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "recognition failed");
                self.set_status(err.to_string());
            }
        }
        Submission::Submitted
    }

    // Multipart, so it skips the JSON request path.
    async fn upload<H: HttpHost>(&self, transport: &Transport<H>, file: &ImageFile) -> Result<RecognitionResult, ApiError> {
        let response = transport.execute(transport.client().build_recognize(file)).await?;
        transport.client().parse_recognize(response)
    }

    fn set_status(&self, text: impl Into<String>) {
        self.status.replace(Some(text.into()));
    }
}
