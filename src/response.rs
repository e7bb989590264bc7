//! JSON response shapes for front ends exposing the analyzer over HTTP
//!
//! No server lives here; these types fix the wire shape and the mapping of
//! failures to HTTP-equivalent statuses.

use serde::{Deserialize, Serialize};

use crate::analyzer::{Analysis, MorphologicalAnalyzer};
use crate::config::InputConfig;
use crate::error::Error;
use crate::morpheme::Morpheme;
use crate::summary::PosSummary;
use crate::tagger::Tagger;

/// Successful analysis payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub original_text: String,
    pub morphemes: Vec<Morpheme>,
    pub pos_summary: PosSummary,
    pub total_morphemes: usize,
}

impl From<Analysis> for AnalysisResponse {
    fn from(analysis: Analysis) -> Self {
        Self {
            success: true,
            total_morphemes: analysis.morphemes.len(),
            original_text: analysis.original_text,
            morphemes: analysis.morphemes,
            pos_summary: analysis.pos_summary,
        }
    }
}

/// Failure category, mapped to an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// Input rejected before analysis (empty or over-long text)
    BadRequest,
    /// Only POST is accepted
    MethodNotAllowed,
    /// Tagger initialization or tagging failed
    InternalError,
}

impl ResponseStatus {
    pub fn code(self) -> u16 {
        match self {
            ResponseStatus::BadRequest => 400,
            ResponseStatus::MethodNotAllowed => 405,
            ResponseStatus::InternalError => 500,
        }
    }
}

/// Failure payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip)]
    status: Option<ResponseStatus>,
}

impl ErrorResponse {
    fn new(status: ResponseStatus, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: Some(status),
        }
    }

    pub fn empty_text() -> Self {
        Self::new(ResponseStatus::BadRequest, "no text was provided")
    }

    pub fn text_too_long(max_chars: usize) -> Self {
        Self::new(
            ResponseStatus::BadRequest,
            format!("text must be at most {} characters", max_chars),
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::new(ResponseStatus::MethodNotAllowed, "only POST is supported")
    }

    pub fn analysis_failed(err: &Error) -> Self {
        Self::new(
            ResponseStatus::InternalError,
            format!("morphological analysis failed: {}", err),
        )
    }

    /// Status of the failure; a deserialized payload is treated as internal
    pub fn status(&self) -> ResponseStatus {
        self.status.unwrap_or(ResponseStatus::InternalError)
    }
}

/// Reject text that is empty or longer than `limits.max_chars` characters
pub fn validate_text(text: &str, limits: &InputConfig) -> Result<(), ErrorResponse> {
    if text.trim().is_empty() {
        return Err(ErrorResponse::empty_text());
    }
    if text.chars().count() > limits.max_chars {
        return Err(ErrorResponse::text_too_long(limits.max_chars));
    }
    Ok(())
}

/// Analyze `text` and shape the outcome for a JSON front end.
///
/// Unlike [`MorphologicalAnalyzer::analyze`], empty or over-long text is
/// rejected here.
pub fn respond<T: Tagger>(
    analyzer: &MorphologicalAnalyzer<T>,
    text: &str,
    limits: &InputConfig,
) -> Result<AnalysisResponse, ErrorResponse> {
    validate_text(text, limits)?;

    analyzer
        .analyze_full(text)
        .map(AnalysisResponse::from)
        .map_err(|e| {
            tracing::error!("Analysis failed: {}", e);
            ErrorResponse::analysis_failed(&e)
        })
}
