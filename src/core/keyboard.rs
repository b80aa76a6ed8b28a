//! Per-letter knowledge accumulated from a participant's own verdicts

use super::history::GuessHistory;
use super::verdict::{Tag, Verdict};
use super::word::Word;

/// On-screen keyboard rows, top to bottom
pub const QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Best-known tag for each letter
///
/// Tags only ever move up (absent → present → correct). A letter that has been
/// seen correct somewhere stays correct even if a later guess puts it in a
/// position where it scores absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    letters: [Option<Tag>; 26],
}

impl Keyboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the keyboard from a full history
    #[must_use]
    pub fn from_history(history: &GuessHistory) -> Self {
        let mut keyboard = Self::new();
        for entry in history.entries() {
            keyboard.record(&entry.guess, &entry.verdict);
        }
        keyboard
    }

    /// Fold one scored guess into the keyboard
    pub fn record(&mut self, guess: &Word, verdict: &Verdict) {
        for (&letter, &tag) in guess.chars().iter().zip(verdict.tags()) {
            let slot = &mut self.letters[usize::from(letter - b'a')];
            *slot = Some(slot.map_or(tag, |known| known.max(tag)));
        }
    }

    /// Best-known tag for a letter, `None` if it has never been guessed
    ///
    /// Accepts either case; anything that is not an ASCII letter is unknown.
    #[must_use]
    pub fn state(&self, letter: char) -> Option<Tag> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let index = (letter.to_ascii_lowercase() as u8 - b'a') as usize;
        self.letters[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(secret: &str, guess: &str) -> (Word, Verdict) {
        let secret = Word::new(secret).unwrap();
        let guess = Word::new(guess).unwrap();
        let verdict = Verdict::evaluate(&secret, &guess);
        (guess, verdict)
    }

    #[test]
    fn unguessed_letters_are_unknown() {
        let keyboard = Keyboard::new();
        assert_eq!(keyboard.state('a'), None);
        assert_eq!(keyboard.state('1'), None);
    }

    #[test]
    fn record_sets_tags_per_letter() {
        let mut keyboard = Keyboard::new();
        let (guess, verdict) = scored("slate", "crane");
        keyboard.record(&guess, &verdict);

        assert_eq!(keyboard.state('a'), Some(Tag::Correct));
        assert_eq!(keyboard.state('E'), Some(Tag::Correct));
        assert_eq!(keyboard.state('c'), Some(Tag::Absent));
        assert_eq!(keyboard.state('s'), None);
    }

    #[test]
    fn correct_is_never_downgraded() {
        let mut keyboard = Keyboard::new();

        // E correct at the end of SLATE
        let (guess, verdict) = scored("slate", "crane");
        keyboard.record(&guess, &verdict);
        assert_eq!(keyboard.state('e'), Some(Tag::Correct));

        // EERIE: the leading E's score absent, the last E correct again
        let (guess, verdict) = scored("slate", "eerie");
        keyboard.record(&guess, &verdict);
        assert_eq!(keyboard.state('e'), Some(Tag::Correct));

        // FEVER scores one E present and one absent; still correct
        let (guess, verdict) = scored("slate", "fever");
        assert_eq!(verdict.tag_at(1), Tag::Present);
        keyboard.record(&guess, &verdict);
        assert_eq!(keyboard.state('e'), Some(Tag::Correct));
    }

    #[test]
    fn present_upgrades_absent_within_one_guess() {
        // LLAMA against ALLOY: the second A is absent but the first is present
        let mut keyboard = Keyboard::new();
        let (guess, verdict) = scored("alloy", "llama");
        keyboard.record(&guess, &verdict);

        assert_eq!(keyboard.state('a'), Some(Tag::Present));
        assert_eq!(keyboard.state('l'), Some(Tag::Correct));
        assert_eq!(keyboard.state('m'), Some(Tag::Absent));
    }

    #[test]
    fn from_history_matches_incremental_recording() {
        let mut history = GuessHistory::new();
        let mut keyboard = Keyboard::new();
        for guess in ["crane", "plant", "slate"] {
            let (guess, verdict) = scored("slate", guess);
            keyboard.record(&guess, &verdict);
            history.push(guess, verdict);
        }

        assert_eq!(Keyboard::from_history(&history), keyboard);
    }

    #[test]
    fn qwerty_rows_cover_alphabet() {
        let mut letters: Vec<char> = QWERTY_ROWS.iter().flat_map(|row| row.chars()).collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), 26);
    }
}
