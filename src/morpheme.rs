//! Morpheme records and the parser for MeCab-style tagger output
//!
//! Tagger output is a sequence of `surface<TAB>f0,f1,...,fN` lines terminated
//! by an `EOS` line. Each accepted line becomes a [`Morpheme`] with exactly
//! ten fields; features the tagger does not supply default to `"*"`.

use serde::{Deserialize, Serialize};

/// Placeholder for an absent or inapplicable feature
pub const SENTINEL: &str = "*";

/// End-of-sequence marker emitted after the last token
pub const EOS: &str = "EOS";

/// Number of features mapped onto a [`Morpheme`] (everything but the surface)
pub const FEATURE_COUNT: usize = 9;

/// One analyzed token.
///
/// Field order matches the tagger's emission order and is the order used
/// when serializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Morpheme {
    /// Surface form (表層形)
    surface: String,
    /// Part of speech (品詞)
    pos: String,
    /// Part of speech subcategory 1 (品詞細分類1)
    pos_detail1: String,
    /// Part of speech subcategory 2 (品詞細分類2)
    pos_detail2: String,
    /// Part of speech subcategory 3 (品詞細分類3)
    pos_detail3: String,
    /// Inflection type (活用型)
    inflection_type: String,
    /// Inflection form (活用形)
    inflection_form: String,
    /// Base form (原形)
    base_form: String,
    /// Reading (読み)
    reading: String,
    /// Pronunciation (発音)
    pronunciation: String,
}

impl Morpheme {
    /// Build a record from a surface form and its raw feature list.
    ///
    /// Missing features become `"*"`; features past the ninth are ignored.
    pub fn from_features(surface: &str, features: &[&str]) -> Self {
        let mut fields = pad_features(features.iter().map(|f| f.to_string()).collect()).into_iter();
        let mut next = || fields.next().unwrap_or_else(|| SENTINEL.to_string());

        Self {
            surface: surface.to_string(),
            pos: next(),
            pos_detail1: next(),
            pos_detail2: next(),
            pos_detail3: next(),
            inflection_type: next(),
            inflection_form: next(),
            base_form: next(),
            reading: next(),
            pronunciation: next(),
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn pos(&self) -> &str {
        &self.pos
    }

    pub fn pos_detail1(&self) -> &str {
        &self.pos_detail1
    }

    pub fn pos_detail2(&self) -> &str {
        &self.pos_detail2
    }

    pub fn pos_detail3(&self) -> &str {
        &self.pos_detail3
    }

    pub fn inflection_type(&self) -> &str {
        &self.inflection_type
    }

    pub fn inflection_form(&self) -> &str {
        &self.inflection_form
    }

    pub fn base_form(&self) -> &str {
        &self.base_form
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    pub fn pronunciation(&self) -> &str {
        &self.pronunciation
    }

    /// The nine features in emission order
    pub fn features(&self) -> [&str; FEATURE_COUNT] {
        [
            &self.pos,
            &self.pos_detail1,
            &self.pos_detail2,
            &self.pos_detail3,
            &self.inflection_type,
            &self.inflection_form,
            &self.base_form,
            &self.reading,
            &self.pronunciation,
        ]
    }

    /// Render the record back into a single tagger output line
    pub fn to_mecab_line(&self) -> String {
        format!("{}\t{}", self.surface, self.features().join(","))
    }
}

/// Records parsed from one tagger output, plus the lines that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub morphemes: Vec<Morpheme>,
    /// Lines before `EOS` that did not split into surface and features
    pub dropped_lines: usize,
}

/// Parse raw tagger output into morphemes.
///
/// Malformed lines are skipped; use [`parse_with_stats`] to learn how many.
pub fn parse(raw_output: &str) -> Vec<Morpheme> {
    parse_with_stats(raw_output).morphemes
}

/// Parse raw tagger output, counting the lines that had to be dropped
pub fn parse_with_stats(raw_output: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    let trimmed = raw_output.trim();
    if trimmed.is_empty() {
        return outcome;
    }

    for line in trimmed.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line == EOS {
            break;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        let [surface, features] = parts.as_slice() else {
            tracing::debug!("Skipping malformed tagger line: {:?}", line);
            outcome.dropped_lines += 1;
            continue;
        };

        let features: Vec<&str> = features.split(',').collect();
        outcome.morphemes.push(Morpheme::from_features(surface, &features));
    }

    outcome
}

/// Pad a feature list with `"*"` until it holds at least [`FEATURE_COUNT`] entries
fn pad_features(mut features: Vec<String>) -> Vec<String> {
    if features.len() < FEATURE_COUNT {
        features.resize(FEATURE_COUNT, SENTINEL.to_string());
    }
    features
}
