//! Letters that may appear in a grid.
//!
//! Words are normalized to uppercase ASCII before they reach the solver, so a
//! rune is simply an uppercase `char` in `A..=Z`.

use std::ops::RangeInclusive;

// Character-set constants
pub(crate) const ALPHABET_SIZE: usize = 26;
pub(crate) const RUNE_ALPHABET: RangeInclusive<char> = 'A'..='Z';

/// Filler shown in unused cells when a grid is rendered.
pub const DEFAULT_FILLER: char = '.';

pub(crate) trait RuneChar {
    /// Is this character usable as a grid letter once normalized?
    fn is_rune(&self) -> bool;
    /// Uppercase form of this character, if it is a letter.
    fn to_rune(&self) -> Option<char>;
}

impl RuneChar for char {
    fn is_rune(&self) -> bool {
        RUNE_ALPHABET.contains(self)
    }
    fn to_rune(&self) -> Option<char> {
        let upper = self.to_ascii_uppercase();
        upper.is_rune().then_some(upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rune() {
        assert!('A'.is_rune());
        assert!('Z'.is_rune());
        assert!(!'a'.is_rune());
        assert!(!'1'.is_rune());
        assert!(!'-'.is_rune());
    }

    #[test]
    fn test_to_rune() {
        assert_eq!('a'.to_rune(), Some('A'));
        assert_eq!('Q'.to_rune(), Some('Q'));
        assert_eq!('é'.to_rune(), None);
        assert_eq!(' '.to_rune(), None);
        assert_eq!('7'.to_rune(), None);
    }

    #[test]
    fn test_to_rune_only_yields_alphabet_letters() {
        // non-ASCII letters have no ASCII uppercase and stay outside the alphabet
        for c in ['ß', 'ñ', 'Ω', '\u{212A}'] {
            assert_eq!(c.to_rune(), None, "{c}");
        }
        for c in RUNE_ALPHABET.chain('a'..='z') {
            let rune = c.to_rune().unwrap();
            assert!(rune.is_rune());
            assert!(RUNE_ALPHABET.contains(&rune));
        }
    }

    #[test]
    fn test_alphabet_constants() {
        assert_eq!(RUNE_ALPHABET.count(), ALPHABET_SIZE);
        for c in RUNE_ALPHABET {
            assert!(c.is_rune());
            assert_eq!(c.to_rune(), Some(c));
        }
    }
}
