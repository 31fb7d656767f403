mod pipeline;
mod registry;
mod types;

#[cfg(feature = "tch-backend")]
mod loader;

#[cfg(feature = "tch-backend")]
pub use loader::TorchPipeline;
pub use pipeline::TextGenerationPipeline;
pub use registry::ModelRegistry;
pub use types::{
    BlogBriefRequest, BlogRequest, BlogResponse, GeneratedText, ModelMetadata, TripRequest,
};
