use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("agent index {index} out of range for population {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type AgentResult<T> = Result<T, AgentError>;
