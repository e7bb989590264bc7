//! morpholyzer - Japanese morphological analysis
//!
//! Parses MeCab-style tagger output into fixed-shape morpheme records and
//! summarizes them by part of speech.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod morpheme;
pub mod response;
pub mod summary;
pub mod tagger;

pub use analyzer::{Analysis, MorphologicalAnalyzer};
pub use error::{Error, Result};
pub use morpheme::{parse, parse_with_stats, Morpheme, ParseOutcome};
pub use summary::{summarize, PosSummary};
pub use tagger::{LinderaTagger, Tagger};
