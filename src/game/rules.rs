//! Chain Rules
//!
//! Decides whether a word legally continues the previous one.
//!
//! Two rule-set versions exist. `Classic` only folds small tsu and small
//! ya/yu/yo. `Revised` also folds small vowels and rejects words that end
//! in a doubled long-vowel mark.

use serde::{Serialize, Deserialize};

use crate::core::kana::{full_consonant_kana, full_vowel, LONG_VOWEL_MARK, TERMINAL_N};

/// Versioned chaining rule set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSet {
    /// First rule set: small tsu/ya/yu/yo and single elongation lookback.
    Classic,
    /// Adds small-vowel folding and double-elongation rejection.
    #[default]
    Revised,
}

impl RuleSet {
    /// Does this rule set fold small vowels (ぁぃぅぇぉ)?
    pub fn folds_small_vowels(self) -> bool {
        matches!(self, RuleSet::Revised)
    }

    /// Does this rule set reject words ending in `ーー`?
    pub fn rejects_double_elongation(self) -> bool {
        matches!(self, RuleSet::Revised)
    }

    /// Stable tag for hashing.
    pub fn tag(self) -> u8 {
        match self {
            RuleSet::Classic => 0,
            RuleSet::Revised => 1,
        }
    }

    /// Fold a small kana to the full kana a following word must start with.
    ///
    /// Characters outside this rule set's table are returned unchanged.
    pub fn fold(self, c: char) -> char {
        if let Some(full) = full_consonant_kana(c) {
            return full;
        }
        if self.folds_small_vowels() {
            if let Some(full) = full_vowel(c) {
                return full;
            }
        }
        c
    }

    /// Character the next word must start with, or `None` if nothing can follow.
    ///
    /// A trailing `ー` looks back exactly one character; that character is
    /// folded but never resolved through another mark.
    pub fn required_initial(self, before: &str) -> Option<char> {
        let mut rev = before.chars().rev();
        let last = rev.next()?;

        if last == LONG_VOWEL_MARK {
            let echoed = rev.next()?;
            if echoed == LONG_VOWEL_MARK {
                return Some(echoed);
            }
            return Some(self.fold(echoed));
        }

        Some(self.fold(last))
    }

    /// Check whether `current` legally continues `before`.
    pub fn is_chained(self, before: &str, current: &str) -> bool {
        if before.is_empty() || current.is_empty() {
            return false;
        }

        if current.ends_with(TERMINAL_N) {
            return false;
        }

        if self.rejects_double_elongation() && ends_with_double_elongation(current) {
            return false;
        }

        let Some(required) = self.required_initial(before) else {
            return false;
        };

        #[cfg(feature = "debug-tracing")]
        tracing::debug!(before, current, %required, rule_set = ?self, "resolved required initial");

        current.chars().next() == Some(required)
    }
}

/// Check whether `current` legally continues `before` under `rule_set`.
pub fn is_chained(before: &str, current: &str, rule_set: RuleSet) -> bool {
    rule_set.is_chained(before, current)
}

fn ends_with_double_elongation(word: &str) -> bool {
    let mut rev = word.chars().rev();
    rev.next() == Some(LONG_VOWEL_MARK) && rev.next() == Some(LONG_VOWEL_MARK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOTH: [RuleSet; 2] = [RuleSet::Classic, RuleSet::Revised];

    #[test]
    fn test_plain_chain() {
        for rules in BOTH {
            assert!(rules.is_chained("しりとり", "りんご"));
            assert!(rules.is_chained("りんご", "ごりら"));
            assert!(!rules.is_chained("りんご", "らっぱ"));
        }
    }

    #[test]
    fn test_empty_words() {
        for rules in BOTH {
            assert!(!rules.is_chained("", "りんご"));
            assert!(!rules.is_chained("しりとり", ""));
            assert!(!rules.is_chained("", ""));
        }
    }

    #[test]
    fn test_terminal_n_rejected() {
        for rules in BOTH {
            assert!(!rules.is_chained("しりとり", "りょかん"));
            assert!(!rules.is_chained("ぱん", "ん"));
        }
    }

    #[test]
    fn test_small_consonant_kana_table() {
        for rules in BOTH {
            assert!(rules.is_chained("きっ", "つみき"));
            assert!(!rules.is_chained("きっ", "っぽ"));
            assert!(rules.is_chained("おもちゃ", "やま"));
            assert!(rules.is_chained("きゅ", "ゆき"));
            assert!(rules.is_chained("きんぎょ", "よる"));
            assert!(!rules.is_chained("きんぎょ", "ょる"));
        }
    }

    #[test]
    fn test_small_vowels_only_in_revised() {
        let pairs = [('ぁ', 'あ'), ('ぃ', 'い'), ('ぅ', 'う'), ('ぇ', 'え'), ('ぉ', 'お')];
        for (small, full) in pairs {
            let before = format!("ふ{small}");
            let current = format!("{full}め");
            assert!(RuleSet::Revised.is_chained(&before, &current));
            assert!(!RuleSet::Classic.is_chained(&before, &current));

            // Classic compares the small vowel literally
            let literal = format!("{small}め");
            assert!(RuleSet::Classic.is_chained(&before, &literal));
            assert!(!RuleSet::Revised.is_chained(&before, &literal));
        }
    }

    #[test]
    fn test_elongation_echoes_previous_char() {
        for rules in BOTH {
            assert!(rules.is_chained("とー", "とうふ"));
            assert!(!rules.is_chained("とー", "うし"));
            assert!(!rules.is_chained("とー", "ーと"));
            assert!(rules.is_chained("こーひー", "ひつじ"));
        }
    }

    #[test]
    fn test_elongation_lookback_is_folded() {
        for rules in BOTH {
            assert!(!rules.is_chained("しゃー", "やかん"));
            assert!(rules.is_chained("しゃー", "やさい"));
        }
        assert!(RuleSet::Revised.is_chained("ふぁー", "あめ"));
        assert!(RuleSet::Classic.is_chained("ふぁー", "ぁめ"));
    }

    #[test]
    fn test_elongation_does_not_cascade() {
        for rules in BOTH {
            assert_eq!(rules.required_initial("すーー"), Some('ー'));
            assert!(!rules.is_chained("すーー", "すし"));
        }
    }

    #[test]
    fn test_lone_elongation_has_no_successor() {
        for rules in BOTH {
            assert_eq!(rules.required_initial("ー"), None);
            assert!(!rules.is_chained("ー", "あめ"));
        }
    }

    #[test]
    fn test_double_elongation_only_rejected_in_revised() {
        assert!(!RuleSet::Revised.is_chained("しりとり", "りーー"));
        assert!(RuleSet::Classic.is_chained("しりとり", "りーー"));
        assert!(RuleSet::Revised.is_chained("しりとり", "りー"));
    }

    #[test]
    fn test_free_function_matches_method() {
        assert!(is_chained("しりとり", "りす", RuleSet::Classic));
        assert!(!is_chained("しりとり", "りょかん", RuleSet::Revised));
    }

    proptest! {
        #[test]
        fn prop_ending_in_n_never_chains(before in "[ぁ-ゖー]{1,6}", stem in "[ぁ-ゖ]{0,5}") {
            let current = format!("{stem}ん");
            for rules in BOTH {
                prop_assert!(!rules.is_chained(&before, &current));
            }
        }

        #[test]
        fn prop_plain_last_char_chains(stem in "[ぁ-ゖ]{0,5}", last in "[かきくけこさしすせそたちてとなにぬねの]", tail in "[あ-ゔ]{0,4}") {
            let before = format!("{stem}{last}");
            let current = format!("{last}{tail}");
            prop_assume!(!current.ends_with('ん'));
            for rules in BOTH {
                prop_assert!(rules.is_chained(&before, &current));
            }
        }
    }
}
