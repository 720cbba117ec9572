//! Error taxonomy for pipeline and analysis stages.

use crate::prompts::PromptError;
use crate::provider::ProviderError;
use thiserror::Error;

/// The provider answered, but the answer was unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Response is not valid JSON for the expected shape: {0}")]
    InvalidJson(String),
    #[error("Response was empty after removing code fences")]
    EmptyScript,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

pub type StageResult<T> = Result<T, StageError>;
