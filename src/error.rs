use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    InvalidParameter,
    NoSinkAvailable,
    TransportWriteError,
    UserCommandUnknown,
    UserCommandInvalidRequest,
    ConfigError,
    RuntimeError,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub error_type: ErrorType,
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}; {}", self.error_type, self.message)
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn new(error_type: ErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
        }
    }

    pub fn invalid_parameter(message: String) -> Self {
        Self {
            error_type: ErrorType::InvalidParameter,
            message,
        }
    }

    pub fn no_sink() -> Self {
        Self {
            error_type: ErrorType::NoSinkAvailable,
            message: "no midi socket".to_string(),
        }
    }

    pub fn transport(message: &str) -> Self {
        Self {
            error_type: ErrorType::TransportWriteError,
            message: message.to_string(),
        }
    }

    pub fn runtime(message: &str) -> Self {
        Self {
            error_type: ErrorType::RuntimeError,
            message: message.to_string(),
        }
    }
}
