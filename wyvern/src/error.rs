use alloy_primitives::U256;
use thiserror::Error;

/// Every way a single invocation can fail. All variants are terminal: the
/// pipeline never retries, the CLI prints the message and exits non-zero.
#[derive(Debug, Error)]
pub enum FlagError {
    /// The hex blob is empty, misaligned or contains non-hex characters.
    #[error("invalid encoded token ids: {0}")]
    InvalidInput(String),

    /// Transport failure or a non-success HTTP status from the asset API.
    #[error("asset API request failed: {0}")]
    Network(String),

    /// The response body is not the expected JSON document.
    #[error("could not parse asset API response: {0}")]
    Parse(String),

    /// An asset record carries a non-boolean supports_wyvern value.
    #[error("supports_wyvern should be a bool but got {0}")]
    Format(serde_json::Value),

    /// A requested token id has no record in the fetched document.
    #[error("no asset record found for token id {0}")]
    Lookup(U256),
}
