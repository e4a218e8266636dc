//! Glyph sets the rain draws from.

use rand::Rng;

/// Katakana used by the classic look.
const JAPANESE: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン";

const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?/~`";

const BINARY: &str = "01";

/// Half-width katakana plus latin and a few symbols.
const EXTENDED: &str = "ｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜｦﾝABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*";

/// Named glyph set selected by the `characterSet` label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CharacterSet {
    Japanese,
    Alphanumeric,
    Symbols,
    Binary,
    Extended,
    #[default]
    Mixed,
}

impl CharacterSet {
    /// Resolve a config label; unknown labels fall back to [`CharacterSet::Mixed`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "japanese" => CharacterSet::Japanese,
            "alphanumeric" => CharacterSet::Alphanumeric,
            "symbols" => CharacterSet::Symbols,
            "matrix" => CharacterSet::Binary,
            "extended" => CharacterSet::Extended,
            _ => CharacterSet::Mixed,
        }
    }

    /// The config label for this set.
    pub fn label(self) -> &'static str {
        match self {
            CharacterSet::Japanese => "japanese",
            CharacterSet::Alphanumeric => "alphanumeric",
            CharacterSet::Symbols => "symbols",
            CharacterSet::Binary => "matrix",
            CharacterSet::Extended => "extended",
            CharacterSet::Mixed => "mixed",
        }
    }

    fn parts(self) -> &'static [&'static str] {
        match self {
            CharacterSet::Japanese => &[JAPANESE],
            CharacterSet::Alphanumeric => &[ALPHANUMERIC],
            CharacterSet::Symbols => &[SYMBOLS],
            CharacterSet::Binary => &[BINARY],
            CharacterSet::Extended => &[EXTENDED],
            CharacterSet::Mixed => &[JAPANESE, ALPHANUMERIC, SYMBOLS],
        }
    }
}

/// Candidate glyphs for a drop, indexed by `char` rather than byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSource {
    set: CharacterSet,
    glyphs: Vec<char>,
}

impl Default for CharacterSource {
    fn default() -> Self {
        Self::new(CharacterSet::default())
    }
}

impl CharacterSource {
    pub fn new(set: CharacterSet) -> Self {
        let glyphs = set.parts().iter().flat_map(|s| s.chars()).collect();
        Self { set, glyphs }
    }

    /// Build the source for a config label.
    pub fn from_label(label: &str) -> Self {
        Self::new(CharacterSet::from_label(label))
    }

    pub fn set(&self) -> CharacterSet {
        self.set
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Pick a glyph uniformly at random.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.glyphs[rng.gen_range(0..self.glyphs.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_mixed_is_concatenation() {
        let mixed = CharacterSource::default();
        let expected = JAPANESE.chars().count()
            + ALPHANUMERIC.chars().count()
            + SYMBOLS.chars().count();
        assert_eq!(mixed.glyphs().len(), expected);
        assert_eq!(mixed.glyphs()[0], 'ア');
        assert_eq!(*mixed.glyphs().last().unwrap(), '`');
    }

    #[test]
    fn test_label_round_trip() {
        for set in [
            CharacterSet::Japanese,
            CharacterSet::Alphanumeric,
            CharacterSet::Symbols,
            CharacterSet::Binary,
            CharacterSet::Extended,
            CharacterSet::Mixed,
        ] {
            assert_eq!(CharacterSet::from_label(set.label()), set);
        }
        assert_eq!(CharacterSet::from_label("klingon"), CharacterSet::Mixed);
    }

    #[test]
    fn test_random_draws_from_set() {
        let source = CharacterSource::new(CharacterSet::Binary);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let ch = source.random(&mut rng);
            assert!(ch == '0' || ch == '1');
        }
    }
}
