//! Error types for morphological analysis

/// Result type used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that abort an analysis request.
///
/// Malformed lines in tagger output are not represented here: the parser
/// drops them instead of failing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tagger could not be constructed under any dictionary configuration
    #[error("failed to initialize tagger: {0}")]
    Initialization(String),

    /// The tagger failed while analyzing a text
    #[error("tagging failed: {0}")]
    Tagging(String),

    /// The configuration file could not be read or parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}
