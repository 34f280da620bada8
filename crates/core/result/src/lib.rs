#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;

use std::fmt;

/// Result type with custom Error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error information
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Error {
    /// Type of error and additional information
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub error_type: ErrorType,

    /// Where this error occurred
    pub location: String,
}

/// Possible error types
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    // ? Configuration errors
    MissingConfiguration {
        key: String,
    },

    // ? Booking related errors
    UnknownEvent,

    // ? Infrastructure errors
    ConnectionFailed {
        reason: String,
    },
    DatabaseError {
        operation: String,
        collection: String,
    },

    // ? General errors
    NotFound,
    FailedValidation {
        error: String,
    },
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::MissingConfiguration { key } => {
                write!(f, "missing required configuration value `{key}`")
            }
            ErrorType::UnknownEvent => write!(f, "referenced event does not exist"),
            ErrorType::ConnectionFailed { reason } => {
                write!(f, "failed to connect to the database: {reason}")
            }
            ErrorType::DatabaseError {
                operation,
                collection,
            } => write!(f, "database operation `{operation}` failed on `{collection}`"),
            ErrorType::NotFound => write!(f, "not found"),
            ErrorType::FailedValidation { error } => write!(f, "{error}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.error_type, self.location)
    }
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! create_error {
    ( $error: ident $( $tt:tt )? ) => {
        $crate::Error {
            error_type: $crate::ErrorType::$error $( $tt )?,
            location: format!("{}:{}:{}", file!(), line!(), column!()),
        }
    };
}

#[macro_export]
macro_rules! create_database_error {
    ( $operation: expr, $collection: expr ) => {
        $crate::create_error!(DatabaseError {
            operation: $operation.to_string(),
            collection: $collection.to_string()
        })
    };
}

/// Shorthand for a failed validation with a human readable message
#[macro_export]
macro_rules! create_validation_error {
    ( $message: expr ) => {
        $crate::create_error!(FailedValidation {
            error: $message.to_string()
        })
    };
}

/// Run a driver helper and map its error into a database error for the collection
#[macro_export]
macro_rules! query {
    ( $self: ident, $type: ident, $collection: expr, $($rest:expr),+ ) => {
        $self.$type($collection, $($rest),+).await
            .map_err(|_| $crate::create_database_error!(stringify!($type), $collection))
    };
}
