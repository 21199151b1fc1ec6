//! types.rs
//! Native status codes and the crate-wide error type.
//!
//! Every fallible call in this crate returns `CompressionError`: a native
//! status code plus a human-readable message. Failures detected while
//! launching work are returned by the launching call; failures raised by
//! queued work surface from `Stream::synchronize`.
use std::fmt;
use num_enum::TryFromPrimitive;

use crate::constants::status_codes;
use crate::utils::enum_name_or_hex;

/// Status codes reported by the native layer.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum Status {
    Success          = status_codes::SUCCESS,
    InvalidValue     = status_codes::INVALID_VALUE,
    NotSupported     = status_codes::NOT_SUPPORTED,
    CannotDecompress = status_codes::CANNOT_DECOMPRESS,
    DeviceError      = status_codes::DEVICE_ERROR,
    Internal         = status_codes::INTERNAL,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Error raised by every compression, decompression and device call.
///
/// Immutable once built. `Display` renders the original message followed by
/// the numeric code, e.g. `bad size : code=7.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionError {
    code: i32,
    msg: String,
}

impl CompressionError {
    /// Build from a raw native code. Codes outside `Status` are kept verbatim.
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        Self { code, msg: msg.into() }
    }

    pub fn from_status(status: Status, msg: impl Into<String>) -> Self {
        Self::new(status.code(), msg)
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::from_status(Status::InvalidValue, msg)
    }

    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::from_status(Status::NotSupported, msg)
    }

    pub fn cannot_decompress(msg: impl Into<String>) -> Self {
        Self::from_status(Status::CannotDecompress, msg)
    }

    pub fn device(msg: impl Into<String>) -> Self {
        Self::from_status(Status::DeviceError, msg)
    }

    /// The native code passed at construction.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// The code as a known `Status`, if it is one.
    pub fn status(&self) -> Option<Status> {
        Status::try_from_primitive(self.code).ok()
    }

    /// The message without the code suffix.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Code rendered as its `Status` name, or hex when unknown.
    pub fn status_name(&self) -> String {
        enum_name_or_hex::<Status>(self.code)
    }
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : code={}.", self.msg, self.code)
    }
}

impl std::error::Error for CompressionError {}

/// Turn a native status code into a `Result`.
///
/// `Success` yields `Ok(())`; anything else becomes a `CompressionError`
/// carrying `msg`.
pub fn check_status(code: i32, msg: &str) -> Result<(), CompressionError> {
    if code == Status::Success.code() {
        Ok(())
    } else {
        Err(CompressionError::new(code, msg))
    }
}
