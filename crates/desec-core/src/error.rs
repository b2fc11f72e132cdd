use thiserror::Error;

/// Result type alias for deSEC operations
pub type Result<T> = std::result::Result<T, DesecError>;

/// Errors that can occur while loading, normalizing or applying records
#[derive(Error, Debug)]
pub enum DesecError {
    /// A record document is malformed or missing required fields
    #[error("invalid record document {file}: {message}")]
    InvalidDocument {
        /// File (or other origin) the document came from
        file: String,
        /// What is wrong with it
        message: String,
    },

    /// Record type is not accepted by the remote API
    #[error("record type \"{0}\" is not supported by deSEC")]
    UnsupportedType(String),

    /// Subname cannot address a single RRset
    #[error("invalid subname \"{subname}\": {reason}")]
    InvalidSubname {
        /// Offending subname
        subname: String,
        /// Why it was rejected
        reason: String,
    },

    /// Every value supplied for a record type was blank
    #[error("no values left for {record_type} record of \"{subname}\" after dropping blanks")]
    EmptyValues {
        /// Subname the record group belongs to
        subname: String,
        /// Record type of the group
        record_type: String,
    },

    /// Authentication failed - invalid or missing token
    #[error("authentication failed: invalid API token")]
    Unauthorized {
        /// Raw response body
        body: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
        /// Raw response body
        body: String,
    },

    /// Resource not found
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that wasn't found
        resource: String,
    },

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Raw response body
        message: String,
    },

    /// Neither the replace nor the create request was accepted
    #[error("failed to apply {record_type} record for {fqdn} (HTTP {status})\nserver response:\n{body}")]
    ApplyFailed {
        /// Record type of the failed group
        record_type: String,
        /// Fully qualified name of the failed group
        fqdn: String,
        /// Status of the last request
        status: u16,
        /// Raw body of the last response
        body: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Reading a record document failed
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that could not be read
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl DesecError {
    /// Returns true if the remote API answered 404
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the error comes from the record documents rather than the API
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDocument { .. }
                | Self::InvalidSubname { .. }
                | Self::UnsupportedType(_)
                | Self::EmptyValues { .. }
        )
    }

    /// Raw response body of a status-carrying error
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { body }
            | Self::RateLimited { body, .. }
            | Self::ApplyFailed { body, .. } => Some(body.as_str()),
            Self::NotFound { resource } => Some(resource.as_str()),
            Self::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            Self::ApplyFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
