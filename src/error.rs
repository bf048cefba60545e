use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("host unavailable: {0}")]
    HostUnavailable(&'static str),

    #[error("engine was already mounted")]
    AlreadyMounted,

    #[error("engine was stopped; mount is once per instance")]
    Stopped,

    #[error("could not schedule a frame: {0}")]
    Schedule(String),

    #[error("draw call failed: {0}")]
    Draw(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
