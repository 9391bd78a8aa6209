// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// A subscription was requested with an unusable event name.
    InvalidSubscription(String),
    Dispatch(DispatchError),
}

/// Failure reported by a single subscriber callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberError {
    message: String,
}

impl SubscriberError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SubscriberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SubscriberError {}

/// Summary of a publish call in which at least one subscriber failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    /// Event name that was being published.
    pub event: String,
    /// Number of callbacks that completed successfully before the error was returned.
    pub delivered: usize,
    /// Failures in the order they occurred.
    pub failures: Vec<SubscriberError>,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} subscriber(s) failed on '{}' ({} delivered)",
            self.failures.len(),
            self.event,
            self.delivered
        )?;
        if let Some(first) = self.failures.first() {
            write!(f, ": {first}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::InvalidSubscription(e) => write!(f, "Invalid Subscription: {}", e),
            Error::Dispatch(e) => write!(f, "Dispatch Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<DispatchError> for Error {
    fn from(err: DispatchError) -> Self {
        Error::Dispatch(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
