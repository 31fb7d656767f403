use crate::{
    error::ServiceError,
    model::{GeneratedText, ModelMetadata},
    sampling::SamplingParams,
};

/// A loaded text-generation model.
///
/// Implementations return every candidate with the full text, i.e. the
/// prompt followed by the completion. Calls block; the registry moves them
/// onto the blocking pool.
pub trait TextGenerationPipeline: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<Vec<GeneratedText>, ServiceError>;

    fn metadata(&self) -> ModelMetadata;
}
