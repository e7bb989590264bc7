use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::morpheme::{parse_with_stats, Morpheme};
use crate::summary::{summarize, PosSummary};
use crate::tagger::{LinderaTagger, Tagger};

/// Result of analyzing one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub original_text: String,
    pub morphemes: Vec<Morpheme>,
    pub pos_summary: PosSummary,
}

/// Morphological analyzer: tagger output parsed into morphemes
pub struct MorphologicalAnalyzer<T: Tagger = LinderaTagger> {
    tagger: T,
}

impl MorphologicalAnalyzer<LinderaTagger> {
    pub fn new() -> Result<Self> {
        Ok(Self::with_tagger(LinderaTagger::new()?))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_tagger(LinderaTagger::from_config(&config.tagger)?))
    }
}

impl<T: Tagger> MorphologicalAnalyzer<T> {
    pub fn with_tagger(tagger: T) -> Self {
        Self { tagger }
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    /// Analyze text into morphemes, in the order they occur.
    ///
    /// Empty or whitespace-only text yields no morphemes without invoking the tagger.
    pub fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.tagger.tag(text)?;
        let outcome = parse_with_stats(&raw);

        if outcome.dropped_lines > 0 {
            tracing::warn!(
                "Dropped {} malformed line(s) from tagger output",
                outcome.dropped_lines
            );
        }
        tracing::debug!(
            "Analyzed {} chars into {} morphemes",
            text.chars().count(),
            outcome.morphemes.len()
        );

        Ok(outcome.morphemes)
    }

    /// Count morphemes by part of speech
    pub fn pos_summary(&self, morphemes: &[Morpheme]) -> PosSummary {
        summarize(morphemes)
    }

    /// Analyze text and summarize it in one call
    pub fn analyze_full(&self, text: &str) -> Result<Analysis> {
        let morphemes = self.analyze(text)?;
        let pos_summary = self.pos_summary(&morphemes);

        Ok(Analysis {
            original_text: text.to_string(),
            morphemes,
            pos_summary,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Tagger returning canned output and counting its invocations
    pub(crate) struct FakeTagger {
        pub output: String,
        pub calls: AtomicUsize,
    }

    impl FakeTagger {
        pub(crate) fn new(output: &str) -> Self {
            Self {
                output: output.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Tagger for FakeTagger {
        fn tag(&self, _text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
    }

    /// Tagger that always fails
    pub(crate) struct FailingTagger;

    impl Tagger for FailingTagger {
        fn tag(&self, _text: &str) -> Result<String> {
            Err(Error::Tagging("engine crashed".to_string()))
        }
    }

    const CANNED: &str = "私\t名詞,代名詞,一般,*,*,*,私,ワタシ,ワタシ
は\t助詞,係助詞,*,*,*,*,は,ハ,ワ
学生\t名詞,一般,*,*,*,*,学生,ガクセイ,ガクセー
です\t助動詞,*,*,*,特殊・デス,基本形,です,デス,デス
。\t記号,句点,*,*,*,*,。,。,。
EOS
";

    #[test]
    fn test_basic_analysis() {
        let analyzer = MorphologicalAnalyzer::new().unwrap();
        let morphemes = analyzer.analyze("これは日本語のテストです。").unwrap();

        assert!(!morphemes.is_empty());
        assert_eq!(morphemes[0].surface(), "これ");
        assert_eq!(morphemes[0].pos(), "名詞");
    }

    #[test]
    fn test_empty_text_analysis() {
        let analyzer = MorphologicalAnalyzer::new().unwrap();

        assert!(analyzer.analyze("").unwrap().is_empty());
        assert!(analyzer.analyze("   ").unwrap().is_empty());
    }

    #[test]
    fn test_pos_summary_end_to_end() {
        let analyzer = MorphologicalAnalyzer::new().unwrap();
        let morphemes = analyzer.analyze("私は学生です。").unwrap();
        let summary = analyzer.pos_summary(&morphemes);

        assert!(summary.get("名詞") >= 1);
        assert_eq!(summary.total(), morphemes.len());
    }

    #[test]
    fn test_special_characters() {
        let analyzer = MorphologicalAnalyzer::new().unwrap();
        let morphemes = analyzer.analyze("Hello、世界！123").unwrap();

        assert!(!morphemes.is_empty());
        assert!(morphemes.iter().all(|m| m.features().len() == 9));
    }

    #[test]
    fn test_fake_tagger_analysis() {
        let analyzer = MorphologicalAnalyzer::with_tagger(FakeTagger::new(CANNED));
        let analysis = analyzer.analyze_full("私は学生です。").unwrap();

        assert_eq!(analysis.original_text, "私は学生です。");
        assert_eq!(analysis.morphemes.len(), 5);
        assert_eq!(analysis.morphemes[2].surface(), "学生");
        assert_eq!(analysis.morphemes[2].pronunciation(), "ガクセー");
        assert_eq!(analysis.pos_summary.get("名詞"), 2);
        assert_eq!(analysis.pos_summary.get("記号"), 1);
    }

    #[test]
    fn test_empty_text_skips_tagger() {
        let analyzer = MorphologicalAnalyzer::with_tagger(FakeTagger::new(CANNED));

        assert!(analyzer.analyze(" \n ").unwrap().is_empty());
        assert_eq!(analyzer.tagger().calls.load(Ordering::SeqCst), 0);

        analyzer.analyze("私").unwrap();
        assert_eq!(analyzer.tagger().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_tagging_error_propagates() {
        let analyzer = MorphologicalAnalyzer::with_tagger(FailingTagger);

        assert!(matches!(analyzer.analyze("私"), Err(Error::Tagging(_))));
        assert!(analyzer.analyze_full("私").is_err());
    }

    #[test]
    fn test_malformed_tagger_output_is_tolerated() {
        let analyzer = MorphologicalAnalyzer::with_tagger(FakeTagger::new(
            "garbage\n私\t名詞\nbroken\tline\there\nEOS\n",
        ));
        let morphemes = analyzer.analyze("私").unwrap();

        assert_eq!(morphemes.len(), 1);
        assert_eq!(morphemes[0].reading(), "*");
    }

    #[test]
    fn test_repeated_analysis_is_stable() {
        let analyzer = MorphologicalAnalyzer::new().unwrap();
        let text = "すもももももももものうち";

        assert_eq!(analyzer.analyze(text).unwrap(), analyzer.analyze(text).unwrap());
    }

    #[test]
    fn test_shared_across_threads() {
        let analyzer = Arc::new(MorphologicalAnalyzer::new().unwrap());
        let handles: Vec<_> = ["私は学生です。", "猫が鳴く。"]
            .into_iter()
            .map(|text| {
                let analyzer = Arc::clone(&analyzer);
                std::thread::spawn(move || analyzer.analyze(text).unwrap())
            })
            .collect();

        for handle in handles {
            assert!(!handle.join().unwrap().is_empty());
        }
    }
}
