pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use factors::{Evaluation, EvaluationFunction, LinearEvaluation};
pub use engine::{EvaluationParameter, ParameterContribution, ScoreResult, Scorer};
pub use validation::validate_scoring;
