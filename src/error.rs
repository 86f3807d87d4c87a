//! Error types for the content pipeline

/// Custom error type for maqala operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error
{   /// Request rejected before any network activity
    #[error("Validation error: {0}")]
    Validation(String)
  , /// HTTP transport failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    HttpError(String)
  , /// API answered with a non-success status
    #[error("API error ({status}): {body}")]
    ApiError
    {   status: u16
      , body: String
    }
  , /// Response body was not the JSON we expect
    #[error("Parse error: {0}")]
    ParseError(String)
  , /// Response parsed but `content[0].text` was absent
    #[error("API response contained no text content")]
    MissingContent
  , /// Run was cancelled at a suspension point
    #[error("Generation cancelled")]
    Cancelled
  , /// A generation is already in flight
    #[error("A generation is already in progress")]
    Busy
  , /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String)
  , /// Generic error
    #[error("Error: {0}")]
    Other(String)
}

/// Coarse classification used when reporting a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{   Validation
  , Network
  , ResponseShape
  , Rejected
  , Configuration
  , Other
}

impl Error
{   pub fn kind(&self) -> ErrorKind
    {   match self
        {   Error::Validation(_) => ErrorKind::Validation
          , Error::HttpError(_)
          | Error::ApiError { .. } => ErrorKind::Network
          , Error::ParseError(_)
          | Error::MissingContent => ErrorKind::ResponseShape
          , Error::Cancelled
          | Error::Busy => ErrorKind::Rejected
          , Error::InvalidConfiguration(_) => {
              ErrorKind::Configuration
            }
          , Error::Other(_) => ErrorKind::Other
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn kinds_group_transport_and_status_failures()
    {   assert_eq!(
          Error::HttpError("reset".into()).kind()
        , ErrorKind::Network
        );
        assert_eq!(
          Error::ApiError { status: 529, body: String::new() }.kind()
        , ErrorKind::Network
        );
        assert_eq!(Error::MissingContent.kind(), ErrorKind::ResponseShape);
        assert_eq!(Error::Busy.kind(), ErrorKind::Rejected);
    }

    #[test]
    fn api_error_display_carries_status()
    {   let e = Error::ApiError
        {   status: 401
          , body: "invalid x-api-key".to_string()
        };
        assert_eq!(e.to_string(), "API error (401): invalid x-api-key");
    }
}
