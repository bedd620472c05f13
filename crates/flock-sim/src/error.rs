use flock_agent::AgentError;
use flock_core::FlockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] FlockError),

    #[error("population change rejected: {0}")]
    Agent(#[from] AgentError),

    #[error("could not build stage thread pool: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;
