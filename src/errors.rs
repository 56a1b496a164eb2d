use chrono::NaiveDateTime;
use thiserror::Error;
use crate::manager_bmkg::errors::BmkgError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ConfigError::Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("ConfigError::Toml: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum InitError {
    #[error("InitError::Config: {0}")]
    Config(#[from] ConfigError),
    #[error("InitError::LogFile: {0}")]
    LogFile(#[from] std::io::Error),
    #[error("InitError::LogConfig: {0}")]
    LogConfig(#[from] log4rs::config::runtime::ConfigErrors),
    #[error("InitError::Logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// A forecast point inside the decision window lacks a value needed for aggregation
#[derive(Error, Debug)]
pub enum DecisionError {
    #[error("DecisionError::MissingValue: no {field} for forecast at {local_time}")]
    MissingValue {
        field: &'static str,
        local_time: NaiveDateTime,
    },
}

#[derive(Error, Debug)]
#[error("StorageError: {0}")]
pub struct StorageError(#[from] pub rusqlite::Error);

/// Errors that abort a job run
#[derive(Error, Debug)]
pub enum JobError {
    #[error("JobError::Fetch: {0}")]
    Fetch(#[from] BmkgError),
    #[error("JobError::Decision: {0}")]
    Decision(#[from] DecisionError),
    #[error("JobError::Storage: {0}")]
    Storage(#[from] StorageError),
}
