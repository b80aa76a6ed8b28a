//! Guess scoring
//!
//! A verdict is the per-position feedback for one guess against one secret:
//! - Absent (letter not in the secret, or every occurrence already used)
//! - Present (letter in the secret, wrong position)
//! - Correct (letter in the right position)
//!
//! Verdicts can also be packed into a single base-3 byte (0-242), where each
//! position contributes digit × 3^position to the total.

use super::word::{WORD_LEN, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Feedback for a single letter position
///
/// Ordered by how much it reveals, so `max` is the upgrade rule used by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Absent,
    Present,
    Correct,
}

impl Tag {
    /// Base-3 digit for this tag
    #[inline]
    #[must_use]
    pub const fn digit(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }

    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Absent => '⬜',
            Self::Present => '🟨',
            Self::Correct => '🟩',
        }
    }
}

/// Scored feedback for one guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verdict([Tag; WORD_LEN]);

impl Verdict {
    /// All letters correct
    pub const SOLVED: Self = Self([Tag::Correct; WORD_LEN]);

    #[inline]
    #[must_use]
    pub const fn tags(&self) -> &[Tag; WORD_LEN] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub const fn tag_at(&self, position: usize) -> Tag {
        self.0[position]
    }

    /// Check if every position is correct
    #[inline]
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&tag| tag == Tag::Correct)
    }

    /// Score `guess` against `secret`
    ///
    /// Duplicate letters are handled by consuming secret letters as they are matched.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches correct and remove them from the pool
    /// 2. Second pass: mark remaining letters present while the pool still holds
    ///    that letter, consuming one occurrence each time
    ///
    /// Running the passes in the other order would let an early present claim a
    /// letter that a later position needs for a correct match.
    ///
    /// # Examples
    /// ```
    /// use wordle_duel::core::{Tag, Verdict, Word};
    ///
    /// let secret = Word::new("alloy").unwrap();
    /// let guess = Word::new("llama").unwrap();
    /// let verdict = Verdict::evaluate(&secret, &guess);
    ///
    /// // L(present) L(correct) A(present) M(absent) A(absent)
    /// assert_eq!(verdict.to_emoji(), "🟨🟩🟨⬜⬜");
    /// assert_eq!(verdict.tag_at(4), Tag::Absent);
    /// ```
    #[must_use]
    pub fn evaluate(secret: &Word, guess: &Word) -> Self {
        let mut result = [Tag::Absent; WORD_LEN];
        let mut pool = secret.char_counts();

        // First pass: exact position matches
        // Allow: Index needed to access guess[i], secret[i], and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LEN {
            if guess.chars()[i] == secret.chars()[i] {
                result[i] = Tag::Correct;

                let letter = guess.chars()[i];
                if let Some(count) = pool.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: letters elsewhere in what is left of the secret
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LEN {
            if result[i] == Tag::Correct {
                continue;
            }
            let letter = guess.chars()[i];
            if let Some(count) = pool.get_mut(&letter)
                && *count > 0
            {
                result[i] = Tag::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Packed base-3 value (0-242)
    #[must_use]
    pub fn code(&self) -> u8 {
        let mut code = 0u8;
        let mut multiplier = 1u8;
        for tag in &self.0 {
            code += tag.digit() * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }
        code
    }

    /// Count the number of correct positions
    #[must_use]
    pub fn count_correct(&self) -> usize {
        self.0.iter().filter(|&&tag| tag == Tag::Correct).count()
    }

    /// Count the number of present positions
    #[must_use]
    pub fn count_present(&self) -> usize {
        self.0.iter().filter(|&&tag| tag == Tag::Present).count()
    }

    /// Parse a verdict from a string like "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'G'/'g'/🟩 for correct
    /// - 'Y'/'y'/🟨 for present
    /// - '-'/'_'/⬜ for absent
    ///
    /// # Examples
    /// ```
    /// use wordle_duel::core::Verdict;
    ///
    /// let v1 = Verdict::parse("GY-GY").unwrap();
    /// let v2 = Verdict::parse("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(v1, v2);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<char> = s.chars().collect();

        if chars.len() != WORD_LEN {
            return None;
        }

        let mut tags = [Tag::Absent; WORD_LEN];
        for (slot, ch) in tags.iter_mut().zip(chars) {
            *slot = match ch {
                'G' | 'g' | '🟩' => Tag::Correct,
                'Y' | 'y' | '🟨' => Tag::Present,
                '-' | '_' | '⬜' => Tag::Absent,
                _ => return None,
            };
        }

        Some(Self(tags))
    }

    /// Convert verdict to emoji string
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|tag| tag.emoji()).collect()
    }
}

/// Formats as `G`/`Y`/`-`, the same notation [`Verdict::parse`] reads
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in self.0 {
            let ch = match tag {
                Tag::Correct => 'G',
                Tag::Present => 'Y',
                Tag::Absent => '-',
            };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid verdict string: {s}"))
    }
}
