use std::fmt;

use simbridge_transport::TransportError;

pub const SUCCESS: i32 = 0;
pub const TRANSPORT_ERROR: i32 = 3;
pub const HEALTH_CHECK_FAILED: i32 = 30;

pub type CliResult<T> = Result<T, CliError>;

/// A failure the CLI maps to a process exit code.
///
/// Only bootstrap can fail this way; once the supervisor owns the process
/// the sole exit is the watchdog's kill, which carries no code at all.
#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    CliError::new(TRANSPORT_ERROR, format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_map_to_transport_code() {
        let err = transport_error(
            "command channel",
            TransportError::BadDescriptor {
                fd: 3,
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
        );

        assert_eq!(err.code, TRANSPORT_ERROR);
        assert!(err.message.contains("command channel"));
        assert!(err.message.contains('3'));
    }
}
