//! Part-of-speech frequency aggregation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::morpheme::Morpheme;

/// Occurrence count per part-of-speech label.
///
/// Backed by an ordered map so serialized output is stable; the ordering
/// itself carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosSummary {
    counts: BTreeMap<String, usize>,
}

impl PosSummary {
    /// Count of a part of speech, zero if it never occurred
    pub fn get(&self, pos: &str) -> usize {
        self.counts.get(pos).copied().unwrap_or(0)
    }

    pub fn contains(&self, pos: &str) -> bool {
        self.counts.contains_key(pos)
    }

    /// Number of distinct parts of speech
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the number of summarized morphemes
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(pos, count)| (pos.as_str(), *count))
    }

    /// Entries by descending count; ties keep label order
    pub fn most_common(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

/// Count morphemes by their part of speech
pub fn summarize(morphemes: &[Morpheme]) -> PosSummary {
    let mut counts = BTreeMap::new();
    for morpheme in morphemes {
        *counts.entry(morpheme.pos().to_string()).or_insert(0) += 1;
    }
    PosSummary { counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn morpheme(surface: &str, pos: &str) -> Morpheme {
        Morpheme::from_features(surface, &[pos])
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);

        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
        assert_eq!(serde_json::to_string(&summary).unwrap(), "{}");
    }

    #[test]
    fn test_summarize_single_pos() {
        let morphemes: Vec<_> = ["猫", "犬", "鳥"].iter().map(|s| morpheme(s, "名詞")).collect();
        let summary = summarize(&morphemes);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get("名詞"), 3);
    }

    #[test]
    fn test_summarize_mixed() {
        let morphemes = vec![
            morpheme("私", "名詞"),
            morpheme("は", "助詞"),
            morpheme("学生", "名詞"),
            morpheme("です", "助動詞"),
            morpheme("。", "記号"),
        ];
        let summary = summarize(&morphemes);

        assert_eq!(summary.get("名詞"), 2);
        assert_eq!(summary.get("助詞"), 1);
        assert_eq!(summary.get("動詞"), 0);
        assert!(!summary.contains("動詞"));
        assert_eq!(summary.total(), morphemes.len());
        assert_eq!(summary.most_common()[0], ("名詞", 2));
    }

    #[test]
    fn test_summarize_ignores_order() {
        let mut morphemes = vec![
            morpheme("走る", "動詞"),
            morpheme("猫", "名詞"),
            morpheme("が", "助詞"),
            morpheme("犬", "名詞"),
        ];
        let forward = summarize(&morphemes);
        morphemes.reverse();

        assert_eq!(summarize(&morphemes), forward);
    }

    #[test]
    fn test_summary_serializes_as_object() {
        let summary = summarize(&[morpheme("猫", "名詞"), morpheme("が", "助詞")]);
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value, serde_json::json!({"名詞": 1, "助詞": 1}));
    }
}
