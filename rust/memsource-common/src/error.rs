use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn out_of_bounds(offset: u64, length: u64, bound: u64) -> Error {
        Error(
            ErrorKind::OutOfBounds {
                offset,
                length,
                bound,
            }
            .into(),
        )
    }

    pub fn invalid_state(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidState {
                message: message.into(),
            }
            .into(),
        )
    }

    /// The error raised by any access attempted after the source was released.
    pub fn released() -> Error {
        Error::invalid_state("source has been released")
    }

    pub fn permission(access: Access) -> Error {
        Error(ErrorKind::Permission { access }.into())
    }

    pub fn unsupported(operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::UnsupportedOperation {
                operation: operation.into(),
            }
            .into(),
        )
    }

    /// The error raised by a mutation attempted through a read-only view.
    pub fn read_only(operation: &str) -> Error {
        Error::unsupported(format!("{operation} on a read-only source"))
    }

    /// Wraps a failed OS or raw-memory call, capturing the OS error code when
    /// one is available.
    pub fn native(operation: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::NativeOperation {
                operation: operation.into(),
                code: source.raw_os_error().unwrap_or(-1),
                message: source.to_string(),
            }
            .into(),
        )
    }

    pub fn capacity_exceeded(requested: u64, available: u64) -> Error {
        Error(
            ErrorKind::CapacityExceeded {
                requested,
                available,
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfBounds { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidState { .. })
    }

    pub fn is_permission(&self) -> bool {
        matches!(self.kind(), ErrorKind::Permission { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnsupportedOperation { .. })
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind(), ErrorKind::NativeOperation { .. })
    }

    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self.kind(), ErrorKind::CapacityExceeded { .. })
    }
}

/// Direction of a memory access, as checked against a permission mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Access::Read => f.write_str("read"),
            Access::Write => f.write_str("write"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("range [{offset}, {offset} + {length}) is outside of [0, {bound}]")]
    OutOfBounds { offset: u64, length: u64, bound: u64 },

    #[error("invalid state: {message}")]
    InvalidState { message: String },

    #[error("{access} access is not permitted")]
    Permission { access: Access },

    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    #[error("native operation '{operation}' failed (code {code}): {message}")]
    NativeOperation {
        operation: String,
        code: i32,
        message: String,
    },

    #[error("requested {requested} bytes, only {available} available")]
    CapacityExceeded { requested: u64, available: u64 },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        let kind = match e.kind() {
            ErrorKind::OutOfBounds { .. } | ErrorKind::InvalidArgument { .. } => {
                std::io::ErrorKind::InvalidInput
            }
            ErrorKind::CapacityExceeded { .. } => std::io::ErrorKind::WriteZero,
            ErrorKind::Permission { .. } | ErrorKind::UnsupportedOperation { .. } => {
                std::io::ErrorKind::PermissionDenied
            }
            ErrorKind::InvalidState { .. } | ErrorKind::NativeOperation { .. } => {
                std::io::ErrorKind::Other
            }
        };
        std::io::Error::new(kind, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_error_captures_os_code() {
        let err = Error::native("shmget", std::io::Error::from_raw_os_error(2));
        match err.kind() {
            ErrorKind::NativeOperation {
                operation, code, ..
            } => {
                assert_eq!(operation, "shmget");
                assert_eq!(*code, 2);
            }
            other => panic!("unexpected kind {other:?}"),
        }
        assert!(err.is_native());
    }

    #[test]
    fn test_native_error_without_os_code() {
        let err = Error::native("attach", std::io::Error::other("boom"));
        match err.into_kind() {
            ErrorKind::NativeOperation { code, message, .. } => {
                assert_eq!(code, -1);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io: std::io::Error = Error::capacity_exceeded(10, 4).into();
        assert_eq!(io.kind(), std::io::ErrorKind::WriteZero);

        let io: std::io::Error = Error::out_of_bounds(5, 10, 8).into();
        assert_eq!(io.kind(), std::io::ErrorKind::InvalidInput);

        let io: std::io::Error = Error::permission(Access::Write).into();
        assert_eq!(io.kind(), std::io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::out_of_bounds(4, 8, 10).to_string(),
            "range [4, 4 + 8) is outside of [0, 10]"
        );
        assert_eq!(
            Error::permission(Access::Read).to_string(),
            "read access is not permitted"
        );
        assert!(Error::released().is_invalid_state());
        assert!(Error::read_only("put").is_unsupported());
    }
}
