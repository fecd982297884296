// ABOUTME: Unified error taxonomy for recipe search, storage, and catalog operations
// ABOUTME: Defines ErrorCode classes and the RecipeError enum with retry classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Every failure that crosses a component boundary is a [`RecipeError`].
//! Each variant maps onto one [`ErrorCode`] class so callers can branch on
//! the class (retryable or not, user error or backend error) without
//! matching on message text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transport failure or upstream 5xx
    NetworkError,
    /// Upstream answered 429
    RateLimited,
    /// Malformed or unexpected response, or a request the upstream rejected
    DecodeError,
    /// Caller supplied invalid write data
    ValidationError,
    /// Backend-of-record failure
    StorageError,
    /// Valid request, no such entity
    NotFound,
    /// Caller supplied a malformed query
    InvalidQuery,
    /// Missing or invalid configuration
    ConfigError,
}

impl ErrorCode {
    /// Get the HTTP status code conventionally associated with this class
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationError | Self::InvalidQuery => 400,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::NetworkError | Self::DecodeError => 502,
            Self::StorageError | Self::ConfigError => 500,
        }
    }

    /// Whether an operation failing with this class may succeed on retry
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::NetworkError | Self::RateLimited)
    }

    /// Get a user-friendly description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NetworkError => "The recipe service could not be reached",
            Self::RateLimited => "The recipe service is rate limiting requests",
            Self::DecodeError => "The recipe service returned an unusable response",
            Self::ValidationError => "The recipe is missing required information",
            Self::StorageError => "Recipe storage operation failed",
            Self::NotFound => "The requested recipe was not found",
            Self::InvalidQuery => "The search query is invalid",
            Self::ConfigError => "Recipe catalog configuration is invalid",
        }
    }
}

/// Errors produced by the recipe search client, store, and catalog
///
/// The enum is `Clone` so that one fetch outcome can be handed to every
/// caller waiting on the same in-flight request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    /// Connection failure, timeout, or upstream 5xx
    #[error("{service} unavailable: {message}")]
    Network {
        /// Upstream service name
        service: String,
        /// Failure details
        message: String,
    },
    /// Upstream answered HTTP 429
    #[error("{service} rate limit exceeded")]
    RateLimited {
        /// Upstream service name
        service: String,
        /// Seconds suggested by a `Retry-After` header, if any
        retry_after_secs: Option<u64>,
    },
    /// Response body could not be decoded into the expected shape
    #[error("{service} returned a malformed response: {message}")]
    Decode {
        /// Upstream service name
        service: String,
        /// Decoder details
        message: String,
    },
    /// Upstream rejected the request itself (4xx other than 429)
    #[error("{service} rejected the request with HTTP {status}: {message}")]
    RequestRejected {
        /// Upstream service name
        service: String,
        /// HTTP status returned
        status: u16,
        /// Response body excerpt
        message: String,
    },
    /// Caller supplied invalid write data
    #[error("invalid recipe field '{field}': {reason}")]
    Validation {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
    /// Document store failure
    #[error("recipe storage failed during {operation}: {message}")]
    Storage {
        /// Store operation that failed
        operation: String,
        /// Failure details
        message: String,
    },
    /// No entity exists for a valid request
    #[error("{resource} not found")]
    NotFound {
        /// Description of the missing entity
        resource: String,
    },
    /// Caller supplied a malformed query
    #[error("invalid query: {reason}")]
    InvalidQuery {
        /// Why the query was rejected
        reason: String,
    },
    /// Missing or invalid configuration
    #[error("configuration error: {message}")]
    Config {
        /// Details
        message: String,
    },
}

impl RecipeError {
    /// Create a network error
    #[must_use]
    pub fn network(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a rate limit error
    #[must_use]
    pub fn rate_limited(service: impl Into<String>, retry_after_secs: Option<u64>) -> Self {
        Self::RateLimited {
            service: service.into(),
            retry_after_secs,
        }
    }

    /// Create a decode error
    #[must_use]
    pub fn decode(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a rejected-request error
    #[must_use]
    pub fn request_rejected(
        service: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::RequestRejected {
            service: service.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error
    #[must_use]
    pub fn storage(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid-query error
    #[must_use]
    pub fn invalid_query(reason: impl Into<String>) -> Self {
        Self::InvalidQuery {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Error class of this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Network { .. } => ErrorCode::NetworkError,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::Decode { .. } | Self::RequestRejected { .. } => ErrorCode::DecodeError,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::Storage { .. } => ErrorCode::StorageError,
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidQuery { .. } => ErrorCode::InvalidQuery,
            Self::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Whether retrying the same request may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }

    /// Server-suggested wait before retrying, when one was provided
    #[must_use]
    pub const fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::RateLimited {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type RecipeResult<T> = Result<T, RecipeError>;
