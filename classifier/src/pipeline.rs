//! Submission-to-predictions pipeline

use async_trait::async_trait;
use std::sync::Arc;

use shared::{session_debug, CategoryCatalog, PredictionList, TOP_K};

use crate::archive::ImageArchive;
use crate::envelope::{validate, ImageLimits, ValidatedImage};
use crate::error::{ClassifyError, ClassifyResult};
use crate::imageops::{encode_png_gray, normalize};
use crate::ranking::rank;
use crate::traits::{ClassificationRequest, Classifier, Recognizer};

/// Production [`Classifier`] over any [`Recognizer`]
pub struct ClassificationPipeline<R: Recognizer> {
    recognizer: R,
    catalog: Arc<CategoryCatalog>,
    limits: ImageLimits,
    archive: Option<ImageArchive>,
    top_k: usize,
}

impl<R: Recognizer> ClassificationPipeline<R> {
    pub fn new(recognizer: R, catalog: Arc<CategoryCatalog>, limits: ImageLimits) -> Self {
        Self {
            recognizer,
            catalog,
            limits,
            archive: None,
            top_k: TOP_K,
        }
    }

    /// Archive every validated submission under `archive`
    pub fn with_archive(mut self, archive: ImageArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Decode, normalize and re-encode off the async runtime
    async fn prepare(image: ValidatedImage) -> ClassifyResult<Vec<u8>> {
        tokio::task::spawn_blocking(move || {
            let decoded = image.decode()?;
            encode_png_gray(&normalize(&decoded))
        })
        .await
        .map_err(|e| ClassifyError::Internal {
            message: format!("normalization task failed: {e}"),
        })?
    }
}

#[async_trait]
impl<R: Recognizer> Classifier for ClassificationPipeline<R> {
    async fn classify(&self, request: ClassificationRequest) -> ClassifyResult<PredictionList> {
        let session = request
            .session
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());

        let image = validate(&request.envelope, self.limits)?;
        session_debug!(
            session,
            "Validated {}x{} submission ({} bytes)",
            image.width,
            image.height,
            image.bytes.len()
        );

        if let Some(archive) = &self.archive {
            archive.spawn_store(image.bytes.clone(), request.expected_category.clone(), request.session);
        }

        let png = Self::prepare(image).await?;
        let scores = self.recognizer.classify(&png).await?;
        let predictions = rank(&scores, &self.catalog, self.top_k)?;

        session_debug!(session, "Recognizer answered: {}", predictions.describe());
        Ok(predictions)
    }
}
