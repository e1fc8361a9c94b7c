use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to retrieve comments: {0}")]
    RetrievalFailed(#[source] RedditApiError),

    #[error("Interest extraction failed: {0}")]
    InterestExtractionFailed(#[source] LlmError),

    #[error("Summary generation failed: {0}")]
    SummaryGenerationFailed(#[source] LlmError),

    #[error("Analysis timed out after {budget:?}")]
    Timeout { budget: Duration },

    #[error("Analysis cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RedditApiError {
    #[error("Invalid username for listing request: {username}")]
    InvalidUsername { username: String },

    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Unexpected status {status_code} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status_code: u16 },

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    #[error("API key invalid or missing for {provider}")]
    InvalidApiKey { provider: String },

    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    #[error("{provider} returned status {status_code}: {message}")]
    ApiError {
        provider: String,
        status_code: u16,
        message: String,
    },

    #[error("Request to {provider} failed: {reason}")]
    Transport { provider: String, reason: String },

    #[error("Request timeout for {provider}")]
    RequestTimeout { provider: String },

    #[error("Invalid response format from {provider}: {details}")]
    InvalidResponseFormat { provider: String, details: String },

    #[error("no response choices returned")]
    EmptyResponse,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
