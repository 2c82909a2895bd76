pub mod inference_cache;
pub mod pipeline;

pub use inference_cache::InferenceCache;
pub use pipeline::{EnhancementPipeline, EnhancementReport};
