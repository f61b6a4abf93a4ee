use derive_more::{Display, From};

/// Root error type for the chart application.
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum AppError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(NetworkError),
    #[display(fmt = "Storage Error: {}", _0)]
    Storage(StorageError),
    #[display(fmt = "UI Error: {}", _0)]
    #[from(ignore)]
    Ui(String),
}

/// Failures of the series source.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum NetworkError {
    #[display(fmt = "request failed: {}", _0)]
    RequestFailed(String),
    #[display(fmt = "HTTP {}: {}", status, message)]
    Status { status: u16, message: String },
    #[display(fmt = "invalid response: {}", _0)]
    InvalidResponse(String),
}

/// Failures of the durable chart-state storage.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum StorageError {
    #[display(fmt = "storage unavailable: {}", _0)]
    Unavailable(String),
    #[display(fmt = "serialization failed: {}", _0)]
    Serialization(String),
    #[display(fmt = "stored version {} does not match expected {}", found, expected)]
    VersionMismatch { found: u32, expected: u32 },
}

impl std::error::Error for AppError {}
impl std::error::Error for NetworkError {}
impl std::error::Error for StorageError {}

pub type NetworkResult<T> = Result<T, NetworkError>;
pub type StorageResult<T> = Result<T, StorageError>;
