//! Storage API error codes.

/// Failure statuses returned by the storage API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Malformed request or invalid arguments
    BadRequest = 400,
    /// Missing or invalid site token
    Unauthorized = 401,
    /// Token lacks access to the resource
    Forbidden = 403,
    /// Resource does not exist
    NotFound = 404,
    /// Method not allowed on this resource
    MethodNotAllowed = 405,
    /// Resource already exists or is in use
    Conflict = 409,
    /// Upload too large
    PayloadTooLarge = 413,
    /// Rate limit exceeded
    TooManyRequests = 429,
    /// Internal server error
    Internal = 500,
    /// Service temporarily unavailable
    Unavailable = 503,
    /// Unknown error
    Unknown = 0,
}

impl From<u16> for ApiErrorCode {
    fn from(status: u16) -> Self {
        match status {
            400 => ApiErrorCode::BadRequest,
            401 => ApiErrorCode::Unauthorized,
            403 => ApiErrorCode::Forbidden,
            404 => ApiErrorCode::NotFound,
            405 => ApiErrorCode::MethodNotAllowed,
            409 => ApiErrorCode::Conflict,
            413 => ApiErrorCode::PayloadTooLarge,
            429 => ApiErrorCode::TooManyRequests,
            500 => ApiErrorCode::Internal,
            503 => ApiErrorCode::Unavailable,
            _ => ApiErrorCode::Unknown,
        }
    }
}

impl ApiErrorCode {
    /// Get human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ApiErrorCode::BadRequest => "Invalid arguments",
            ApiErrorCode::Unauthorized => "Invalid or missing site token",
            ApiErrorCode::Forbidden => "Access denied",
            ApiErrorCode::NotFound => "Resource does not exist",
            ApiErrorCode::MethodNotAllowed => "Operation not allowed",
            ApiErrorCode::Conflict => "Resource already exists",
            ApiErrorCode::PayloadTooLarge => "Content too large",
            ApiErrorCode::TooManyRequests => "Rate limit exceeded",
            ApiErrorCode::Internal => "Internal error",
            ApiErrorCode::Unavailable => "Temporarily unavailable",
            ApiErrorCode::Unknown => "Unknown error",
        }
    }
}
