//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ReleaseError: Issues with fetching or reading the Node.js release index
//! - VersionError: Version text that cannot be read as semver
//! - ProcessError: Subprocess spawn failures and non-zero exits
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when a failure carries no usable subprocess code
pub const FALLBACK_EXIT_CODE: u8 = 1;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Release index related errors
    #[error(transparent)]
    Release(#[from] ReleaseError),

    /// Version parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Subprocess related errors
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Process exit code to terminate with when this error reaches the top level
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Process(e) => e.code().map_or(FALLBACK_EXIT_CODE, to_exit_code),
            _ => FALLBACK_EXIT_CODE,
        }
    }
}

/// Convert a raw subprocess status code into a process exit code.
///
/// Codes outside 1..=255 cannot be reported as-is and map to the fallback.
pub fn to_exit_code(code: i32) -> u8 {
    u8::try_from(code)
        .ok()
        .filter(|c| *c != 0)
        .unwrap_or(FALLBACK_EXIT_CODE)
}

/// Errors related to the Node.js release index
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Network request failed
    #[error("failed to fetch release index from {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {url}")]
    RateLimitExceeded { url: String },

    /// Timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },

    /// Invalid response body
    #[error("invalid release index from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// The index contained no release matching the request
    #[error("no Node.js release matches '{spec}'")]
    NoMatchingRelease { spec: String },
}

/// Errors related to version text
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionError {
    /// Text is not a semantic version
    #[error("invalid Node.js version '{input}': {message}")]
    Invalid { input: String, message: String },

    /// Command output did not contain a version
    #[error("could not find a Node.js version in output of `{command}`: '{output}'")]
    NotFound { command: String, output: String },
}

/// Errors related to running external commands
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The shell could not be started
    #[error("failed to start `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading output or waiting for exit failed
    #[error("I/O error while running `{command}`: {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited unsuccessfully
    #[error("`{command}` failed with {}", describe_code(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        output: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid target specification
    #[error("invalid target '{value}': expected 'latest', 'lts', a major or major.minor line, or a full version")]
    InvalidTarget { value: String },

    /// Invalid path
    #[error("invalid path '{}': {message}", .path.display())]
    InvalidPath { path: PathBuf, message: String },

    /// Empty script name
    #[error("{option} script name must not be empty")]
    EmptyScript { option: &'static str },
}

impl ReleaseError {
    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        ReleaseError::Timeout { url: url.into() }
    }

    /// Creates a new NoMatchingRelease error
    pub fn no_matching_release(spec: impl Into<String>) -> Self {
        ReleaseError::NoMatchingRelease { spec: spec.into() }
    }
}

impl VersionError {
    /// Creates a new Invalid error
    pub fn invalid(input: impl Into<String>, message: impl Into<String>) -> Self {
        VersionError::Invalid {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates a new NotFound error
    pub fn not_found(command: impl Into<String>, output: impl Into<String>) -> Self {
        VersionError::NotFound {
            command: command.into(),
            output: output.into(),
        }
    }
}

impl ProcessError {
    /// Creates a new Failed error
    pub fn failed(command: impl Into<String>, code: Option<i32>, output: impl Into<String>) -> Self {
        ProcessError::Failed {
            command: command.into(),
            code,
            output: output.into(),
        }
    }

    /// Exit code of the failed command, if it exited normally
    pub fn code(&self) -> Option<i32> {
        match self {
            ProcessError::SpawnFailed { .. } | ProcessError::WaitFailed { .. } => None,
            ProcessError::Failed { code, .. } => *code,
        }
    }
}
