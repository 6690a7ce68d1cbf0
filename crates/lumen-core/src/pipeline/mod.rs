//! The question-to-answer pipeline.
//!
//! One search call, one answer completion, and optionally one follow-up
//! completion per question. Errors are typed here; [`fallback`] turns them
//! into displayable output for UI adapters.

mod config;
pub mod fallback;
pub mod follow_ups;
pub mod prompts;
mod result;
mod runner;

pub use config::{Mode, PipelineConfig, ValidationError};
pub use result::{AnswerResult, Source, ERROR_PREFIX};
pub use runner::{
    ask_with_settings, build_context, collect_sources, PipelineError, QueryPipeline, Stage,
};
