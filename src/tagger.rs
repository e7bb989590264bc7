//! Tagger adapters producing MeCab-style output
//!
//! The parser only sees the textual output of a [`Tagger`], one
//! `surface<TAB>features` line per token followed by `EOS`. [`LinderaTagger`]
//! renders lindera's IPADIC tokens into that format.

use lindera::dictionary::load_dictionary;
use lindera::mode::{Mode, Penalty};
use lindera::segmenter::Segmenter;
use lindera::tokenizer::Tokenizer;

use crate::config::TaggerConfig;
use crate::error::{Error, Result};
use crate::morpheme::EOS;

/// Capability that turns text into raw tagger output.
///
/// Implementations are shared between threads, so `tag` must only need
/// shared access.
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<String>;
}

/// Tagger backed by lindera
pub struct LinderaTagger {
    tokenizer: Tokenizer,
    dictionary: String,
}

impl LinderaTagger {
    /// Create a tagger using the embedded IPADIC dictionary
    pub fn new() -> Result<Self> {
        Self::from_config(&TaggerConfig::default())
    }

    /// Create a tagger from the primary dictionary, falling back to the secondary one
    pub fn from_config(config: &TaggerConfig) -> Result<Self> {
        init_with_fallback(&config.dictionary, &config.fallback_dictionary, |dictionary| {
            Self::load(dictionary, &config.mode)
        })
    }

    fn load(dictionary: &str, mode: &str) -> std::result::Result<Self, String> {
        let mode = parse_mode(mode)?;
        let loaded = load_dictionary(dictionary).map_err(|e| e.to_string())?;
        let segmenter = Segmenter::new(mode, loaded, None);
        let tokenizer = Tokenizer::new(segmenter);

        tracing::info!("Loaded dictionary {}", dictionary);
        Ok(Self {
            tokenizer,
            dictionary: dictionary.to_string(),
        })
    }

    /// Dictionary the tagger was actually built from
    pub fn dictionary(&self) -> &str {
        &self.dictionary
    }
}

impl Tagger for LinderaTagger {
    fn tag(&self, text: &str) -> Result<String> {
        let mut output = String::new();

        if !text.trim().is_empty() {
            let mut tokens = self
                .tokenizer
                .tokenize(text)
                .map_err(|e| Error::Tagging(e.to_string()))?;

            for token in tokens.iter_mut() {
                let surface = token.surface.as_ref().to_string();
                // MeCab does not emit whitespace as tokens
                if surface.trim().is_empty() {
                    continue;
                }

                let details = token.details();
                output.push_str(&surface);
                output.push('\t');
                output.push_str(&details.join(","));
                output.push('\n');
            }
        }

        output.push_str(EOS);
        output.push('\n');
        Ok(output)
    }
}

/// Run `init` on the primary configuration, then on the fallback.
///
/// Only when both fail is a single [`Error::Initialization`] returned,
/// carrying the primary failure.
pub fn init_with_fallback<T, F>(primary: &str, fallback: &str, mut init: F) -> Result<T>
where
    F: FnMut(&str) -> std::result::Result<T, String>,
{
    let primary_err = match init(primary) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };
    tracing::warn!("Failed to load dictionary {}: {}", primary, primary_err);

    init(fallback).map_err(|fallback_err| {
        tracing::warn!("Failed to load fallback dictionary {}: {}", fallback, fallback_err);
        Error::Initialization(format!("{}: {}", primary, primary_err))
    })
}

fn parse_mode(mode: &str) -> std::result::Result<Mode, String> {
    match mode {
        "normal" => Ok(Mode::Normal),
        "decompose" => Ok(Mode::Decompose(Penalty::default())),
        other => Err(format!("unknown segmentation mode '{}'", other)),
    }
}
