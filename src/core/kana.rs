//! Hiragana Script Validation
//!
//! Character-level primitives shared by the chain rules:
//! - Script check for submitted words
//! - Small-kana to full-kana equivalence
//! - The fixed syllabary rendered on the history board

/// Long-vowel mark. Tolerated anywhere in a word and echoes the previous sound.
pub const LONG_VOWEL_MARK: char = 'ー';

/// Terminal mora that may never end a submitted word.
pub const TERMINAL_N: char = 'ん';

/// First code point of the Unicode hiragana block.
pub const HIRAGANA_START: char = '\u{3040}';

/// Last code point of the Unicode hiragana block.
pub const HIRAGANA_END: char = '\u{309F}';

/// Syllables shown on the history board, in display order.
pub const SYLLABARY: &str = "あいうえおかきくけこがぎぐげごさしすせそざじずぜぞたちつってとだぢづでどなにぬねのはひふへほばびぶべぼぱぴぷぺぽまみむめもやゆよゃゅょらりるれろわーん";

/// Small vowels and their full-size counterparts.
pub const SMALL_VOWELS: [(char, char); 5] = [
    ('ぁ', 'あ'),
    ('ぃ', 'い'),
    ('ぅ', 'う'),
    ('ぇ', 'え'),
    ('ぉ', 'お'),
];

/// Small tsu and small ya/yu/yo with their full-size counterparts.
pub const SMALL_CONSONANT_KANA: [(char, char); 4] = [
    ('っ', 'つ'),
    ('ゃ', 'や'),
    ('ゅ', 'ゆ'),
    ('ょ', 'よ'),
];

/// Check whether a single character lies in the hiragana block.
#[inline]
pub fn is_hiragana_char(c: char) -> bool {
    (HIRAGANA_START..=HIRAGANA_END).contains(&c)
}

/// Check whether a word is written entirely in hiragana.
///
/// Long-vowel marks are stripped first. A word made only of marks (or an
/// empty word) has nothing left to check and is rejected.
pub fn is_hiragana(word: &str) -> bool {
    let mut remainder = word.chars().filter(|&c| c != LONG_VOWEL_MARK).peekable();
    remainder.peek().is_some() && remainder.all(is_hiragana_char)
}

/// Map a small vowel to its full-size vowel.
pub fn full_vowel(c: char) -> Option<char> {
    lookup(&SMALL_VOWELS, c)
}

/// Map small tsu / ya / yu / yo to their full-size kana.
pub fn full_consonant_kana(c: char) -> Option<char> {
    lookup(&SMALL_CONSONANT_KANA, c)
}

/// Iterate the board syllables in display order.
pub fn syllables() -> impl Iterator<Item = char> {
    SYLLABARY.chars()
}

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table
        .iter()
        .find(|(small, _)| *small == c)
        .map(|(_, full)| *full)
}
