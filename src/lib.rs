pub mod beam_pipeline;
pub mod logger;
