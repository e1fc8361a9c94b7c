use crate::error::*;
use tracing::{error, info};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::RetrievalFailed(e) => {
                error!("Comment retrieval error details: {:?}", e);
            }
            CoreError::InterestExtractionFailed(e) | CoreError::SummaryGenerationFailed(e) => {
                error!("LLM error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RetrievalFailed(e) => e.user_friendly_message(),
            CoreError::InterestExtractionFailed(e) => {
                format!("Could not extract interests. {}", e.user_friendly_message())
            }
            CoreError::SummaryGenerationFailed(e) => {
                format!("Could not generate a summary. {}", e.user_friendly_message())
            }
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Timeout { .. } => {
                "The analysis took too long to complete. Try again or raise the timeout."
                    .to_string()
            }
            CoreError::Cancelled => "The analysis was cancelled.".to_string(),
            CoreError::InvalidInput { message } => format!("Invalid input: {}", message),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::RetrievalFailed(_) => "RETRIEVAL_FAILED".to_string(),
            CoreError::InterestExtractionFailed(_) => "INTEREST_EXTRACTION_FAILED".to_string(),
            CoreError::SummaryGenerationFailed(_) => "SUMMARY_GENERATION_FAILED".to_string(),
            CoreError::Timeout { .. } => "TIMEOUT".to_string(),
            CoreError::Cancelled => "CANCELLED".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
        }
    }
}

impl ErrorExt for RedditApiError {
    fn log_error(&self) -> &Self {
        error!("RedditApiError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::InvalidUsername { username } => {
                format!("'{}' is not a usable Reddit username.", username)
            }
            RedditApiError::Transport { .. } => {
                "Could not reach Reddit. Please check your internet connection.".to_string()
            }
            RedditApiError::RequestTimeout => {
                "Request to Reddit timed out. Please try again.".to_string()
            }
            RedditApiError::UnexpectedStatus { status_code, .. } => format!(
                "Reddit answered with status {}. The user may not exist or their history is hidden.",
                status_code
            ),
            RedditApiError::InvalidResponse { .. } => {
                "Reddit returned data that could not be read.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            RedditApiError::InvalidUsername { .. } => "REDDIT_INVALID_USERNAME".to_string(),
            RedditApiError::Transport { .. } => "REDDIT_TRANSPORT".to_string(),
            RedditApiError::RequestTimeout => "REDDIT_TIMEOUT".to_string(),
            RedditApiError::UnexpectedStatus { .. } => "REDDIT_UNEXPECTED_STATUS".to_string(),
            RedditApiError::InvalidResponse { .. } => "REDDIT_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for LlmError {
    fn log_error(&self) -> &Self {
        error!("LlmError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            LlmError::InvalidApiKey { provider } => {
                format!("The API key for {} is invalid or missing.", provider)
            }
            LlmError::RateLimitExceeded { provider } => {
                format!("{} is rate limiting requests. Please wait and try again.", provider)
            }
            LlmError::ApiError { provider, .. } => {
                format!("{} rejected the request.", provider)
            }
            LlmError::Transport { provider, .. } => format!("Could not reach {}.", provider),
            LlmError::RequestTimeout { provider } => {
                format!("Request to {} timed out.", provider)
            }
            LlmError::InvalidResponseFormat { provider, .. } => {
                format!("{} returned a response that could not be read.", provider)
            }
            LlmError::EmptyResponse => "The model returned no answer.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            LlmError::InvalidApiKey { .. } => "LLM_INVALID_API_KEY".to_string(),
            LlmError::RateLimitExceeded { .. } => "LLM_RATE_LIMIT".to_string(),
            LlmError::ApiError { .. } => "LLM_API_ERROR".to_string(),
            LlmError::Transport { .. } => "LLM_TRANSPORT".to_string(),
            LlmError::RequestTimeout { .. } => "LLM_TIMEOUT".to_string(),
            LlmError::InvalidResponseFormat { .. } => "LLM_INVALID_RESPONSE".to_string(),
            LlmError::EmptyResponse => "LLM_EMPTY_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' was not found.", path)
            }
            ConfigError::MissingField { field } => {
                format!("Required setting '{}' is missing.", field)
            }
            ConfigError::InvalidValue { field, value } => {
                format!("Setting '{}' has an invalid value: {}", field, value)
            }
            ConfigError::Parse(_) => "The configuration file is not valid TOML.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::MissingField { .. } => "CONFIG_MISSING_FIELD".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE".to_string(),
        }
    }
}

/// Logs an error together with its stable code and the text shown to users.
#[derive(Debug, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_error(&self, error: &CoreError) {
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!("User message: {}", error.user_friendly_message());
    }
}
