//! Unified error codes for the salon core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Membership errors
//! - 2xxx: Catalog errors
//! - 3xxx: Visit errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so dashboards can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Membership ====================
    /// Member not found
    MemberNotFound = 1001,
    /// Tier table violates ordering or threshold rules
    InvalidTierTable = 1002,

    // ==================== 2xxx: Catalog ====================
    /// Service not found in catalog
    ServiceNotFound = 2001,
    /// Service is inactive
    ServiceInactive = 2002,
    /// Same service selected more than once
    DuplicateService = 2003,

    // ==================== 3xxx: Visit ====================
    /// Selected services conflict with each other
    ServiceCombinationConflict = 3001,
    /// Discount outside the 0-100 range
    InvalidDiscount = 3002,
    /// Visit could not be recorded
    VisitRecordFailed = 3003,

    // ==================== 9xxx: System ====================
    /// Storage collaborator failed
    StorageError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Membership
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::InvalidTierTable => "Tier table is invalid",

            // Catalog
            ErrorCode::ServiceNotFound => "Service not found",
            ErrorCode::ServiceInactive => "Service is not active",
            ErrorCode::DuplicateService => "Service selected more than once",

            // Visit
            ErrorCode::ServiceCombinationConflict => "Selected services conflict",
            ErrorCode::InvalidDiscount => "Discount must be between 0 and 100",
            ErrorCode::VisitRecordFailed => "Failed to record visit",

            // System
            ErrorCode::StorageError => "Storage error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Membership
            1001 => Ok(ErrorCode::MemberNotFound),
            1002 => Ok(ErrorCode::InvalidTierTable),

            // Catalog
            2001 => Ok(ErrorCode::ServiceNotFound),
            2002 => Ok(ErrorCode::ServiceInactive),
            2003 => Ok(ErrorCode::DuplicateService),

            // Visit
            3001 => Ok(ErrorCode::ServiceCombinationConflict),
            3002 => Ok(ErrorCode::InvalidDiscount),
            3003 => Ok(ErrorCode::VisitRecordFailed),

            // System
            9002 => Ok(ErrorCode::StorageError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
