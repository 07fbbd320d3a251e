use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemsimError {
    #[error("allocation failed: no free segment can hold {requested} units")]
    AllocationFailed { requested: u64 },

    #[error("free failed: no used segment with id {0}")]
    FreeNotFound(u32),

    #[error("invalid capacity: {0} (must be nonzero)")]
    InvalidCapacity(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MemsimError>;
