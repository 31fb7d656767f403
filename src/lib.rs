pub mod blog;
pub mod config;
pub mod error;
pub mod model;
pub mod prompt;
pub mod sampling;
pub mod server;

#[cfg(test)]
mod test_support;

pub use config::AppConfig;
pub use model::{BlogRequest, BlogResponse, ModelRegistry, TextGenerationPipeline};
pub use sampling::SamplingParams;
pub use server::build_router;
