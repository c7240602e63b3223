use std::time::Duration;

pub const DEFAULT_PHRASES: [&str; 3] = [
    "Create stunning karaoke videos.",
    "For Hindi & Marathi songs.",
    "Powered by AI.",
];

const TYPE_DELAY: Duration = Duration::from_millis(150);
const DELETE_DELAY: Duration = Duration::from_millis(75);
const HOLD_DELAY: Duration = Duration::from_millis(2000);
const NEXT_PHRASE_DELAY: Duration = Duration::from_millis(500);

/// Typewriter effect for the landing page hero text.
///
/// Each `step` types or erases one character and returns how long to wait
/// before the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingAnimation {
    phrases: Vec<Vec<char>>,
    phrase_index: usize,
    letter_index: usize,
    deleting: bool,
}

impl Default for TypingAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_PHRASES)
    }
}

impl TypingAnimation {
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = phrases
            .into_iter()
            .map(|phrase| phrase.as_ref().chars().collect::<Vec<_>>())
            .filter(|chars| !chars.is_empty())
            .collect();
        Self {
            phrases,
            phrase_index: 0,
            letter_index: 0,
            deleting: false,
        }
    }

    pub fn text(&self) -> String {
        match self.phrases.get(self.phrase_index) {
            Some(phrase) => phrase[..self.letter_index].iter().collect(),
            None => String::new(),
        }
    }

    pub fn step(&mut self) -> Duration {
        let Some(phrase_len) = self.phrases.get(self.phrase_index).map(Vec::len) else {
            return HOLD_DELAY;
        };

        if self.deleting {
            self.letter_index = self.letter_index.saturating_sub(1);
        } else {
            self.letter_index = (self.letter_index + 1).min(phrase_len);
        }

        if !self.deleting && self.letter_index == phrase_len {
            self.deleting = true;
            HOLD_DELAY
        } else if self.deleting && self.letter_index == 0 {
            self.deleting = false;
            self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
            NEXT_PHRASE_DELAY
        } else if self.deleting {
            DELETE_DELAY
        } else {
            TYPE_DELAY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_holds_deletes_and_moves_on() {
        let mut typing = TypingAnimation::new(["ab", "c"]);

        assert_eq!(typing.step(), TYPE_DELAY);
        assert_eq!(typing.text(), "a");
        assert_eq!(typing.step(), HOLD_DELAY);
        assert_eq!(typing.text(), "ab");
        assert_eq!(typing.step(), DELETE_DELAY);
        assert_eq!(typing.text(), "a");
        assert_eq!(typing.step(), NEXT_PHRASE_DELAY);
        assert_eq!(typing.text(), "");

        assert_eq!(typing.step(), HOLD_DELAY);
        assert_eq!(typing.text(), "c");
        assert_eq!(typing.step(), NEXT_PHRASE_DELAY);
        // Wraps back to the first phrase.
        assert_eq!(typing.step(), TYPE_DELAY);
        assert_eq!(typing.text(), "a");
    }

    #[test]
    fn handles_multibyte_phrases() {
        let mut typing = TypingAnimation::new(["गा"]);
        typing.step();
        assert_eq!(typing.text(), "ग");
    }

    #[test]
    fn empty_phrase_list_is_inert() {
        let mut typing = TypingAnimation::new(Vec::<String>::new());
        assert_eq!(typing.step(), HOLD_DELAY);
        assert_eq!(typing.text(), "");
    }
}
