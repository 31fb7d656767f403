use std::sync::Arc;

use tokio::task;

use crate::{
    config::AppConfig,
    error::ServiceError,
    model::{GeneratedText, ModelMetadata, TextGenerationPipeline},
    sampling::SamplingParams,
};

/// Owns the process-wide generation pipeline.
pub struct ModelRegistry {
    pipeline: Arc<dyn TextGenerationPipeline>,
}

impl ModelRegistry {
    #[cfg(feature = "tch-backend")]
    pub fn initialize(config: &AppConfig) -> Result<Self, ServiceError> {
        let pipeline = crate::model::TorchPipeline::load(config)?;
        Ok(Self::from_pipeline(Arc::new(pipeline)))
    }

    #[cfg(not(feature = "tch-backend"))]
    pub fn initialize(config: &AppConfig) -> Result<Self, ServiceError> {
        Err(ServiceError::Other(format!(
            "no inference backend compiled in; cannot load {}",
            config.model_id
        )))
    }

    pub fn from_pipeline(pipeline: Arc<dyn TextGenerationPipeline>) -> Self {
        Self { pipeline }
    }

    pub fn metadata(&self) -> ModelMetadata {
        self.pipeline.metadata()
    }

    pub async fn generate(
        &self,
        prompt: String,
        params: SamplingParams,
    ) -> Result<Vec<GeneratedText>, ServiceError> {
        let pipeline = self.pipeline.clone();
        task::spawn_blocking(move || pipeline.generate(&prompt, &params))
            .await
            .map_err(|err| ServiceError::Inference(format!("inference task failed: {err}")))?
    }
}
