//! Meal analysis core
//!
//! Pure, synchronous estimation logic: the fallback estimator used when no
//! vision model is reachable, and the normalizer that turns raw model output
//! into validated domain data. Both entry points are total functions and
//! always produce an `AnalysisResult`.

pub mod estimator;
pub mod normalizer;

pub use estimator::{
    fallback_estimate, AssumedServing, EstimateOptions, DEFAULT_PROTEIN_DENSITY,
    DEFAULT_SUGGESTIONS,
};
pub use normalizer::parse_ai_response;
