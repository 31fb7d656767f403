use std::time::Instant;

use tracing::info;

use crate::{
    error::ServiceError,
    model::ModelRegistry,
    prompt::{final_prompt, strip_echo},
    sampling::SamplingParams,
};

/// Generates blog content for `user_prompt`.
///
/// Only the first candidate is used; a leading echo of the final prompt is
/// removed and the result trimmed.
pub async fn write_blog(
    registry: &ModelRegistry,
    params: &SamplingParams,
    user_prompt: &str,
) -> Result<String, ServiceError> {
    let final_prompt = final_prompt(user_prompt);
    let start = Instant::now();

    let candidates = registry
        .generate(final_prompt.clone(), params.clone())
        .await?;
    let first = candidates
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::Inference("pipeline returned no candidates".into()))?;

    let content = strip_echo(&first.generated_text, &final_prompt);
    info!(
        prompt_chars = user_prompt.len(),
        content_chars = content.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "blog generated"
    );
    Ok(content)
}
