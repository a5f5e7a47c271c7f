//! Per-word display durations.

use crate::content::{PunctuationType, Word};

const LONG_WORD_CHARS: usize = 8;
const LONG_WORD_BONUS: f64 = 0.3;
const PERIOD_BONUS: f64 = 1.0;
const COMMA_BONUS: f64 = 0.5;
const OTHER_PUNCTUATION_BONUS: f64 = 0.2;
const DIGIT_BONUS: f64 = 0.4;

/// Milliseconds per word at `wpm`, before any adjustment.
pub fn base_delay_ms(wpm: f64) -> f64 {
    60_000.0 / wpm
}

/// Display duration for `word` in milliseconds.
///
/// With `dynamic_pacing` off every word gets the base delay. With it on, long
/// words, trailing punctuation and digits each add an independent share of the
/// base delay. Paragraph pauses are added by the caller.
pub fn word_delay_ms(word: &Word, base_wpm: f64, dynamic_pacing: bool) -> u32 {
    let base = base_delay_ms(base_wpm);
    if !dynamic_pacing {
        return round_ms(base);
    }

    round_ms(base * delay_multiplier(word))
}

fn delay_multiplier(word: &Word) -> f64 {
    let stripped = word.stripped();
    let mut multiplier = 1.0;

    if stripped.chars().count() >= LONG_WORD_CHARS {
        multiplier += LONG_WORD_BONUS;
    }

    multiplier += match word.punctuation_type {
        PunctuationType::Period => PERIOD_BONUS,
        PunctuationType::Comma => COMMA_BONUS,
        PunctuationType::Other => OTHER_PUNCTUATION_BONUS,
        PunctuationType::None => 0.0,
    };

    if stripped.bytes().any(|b| b.is_ascii_digit()) {
        multiplier += DIGIT_BONUS;
    }

    multiplier
}

// Half-up rounding; `as` saturates out-of-range values and maps NaN to 0.
fn round_ms(value: f64) -> u32 {
    ((value + 0.5) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::content::tokenize;

    fn word(text: &str) -> Word {
        tokenize(text)[0].clone()
    }

    #[test]
    fn static_pacing_uses_base_delay() {
        assert_eq!(word_delay_ms(&word("hello"), 250.0, false), 240);
        assert_eq!(word_delay_ms(&word("sentence."), 250.0, false), 240);
        assert_eq!(word_delay_ms(&word("1984,"), 250.0, false), 240);
    }

    #[test]
    fn period_doubles_the_delay() {
        assert_eq!(word_delay_ms(&word("end."), 250.0, true), 480);
        assert_eq!(word_delay_ms(&word("why?"), 250.0, true), 480);
    }

    #[test]
    fn bonuses_add_instead_of_compounding() {
        assert_eq!(word_delay_ms(&word("plain"), 250.0, true), 240);
        assert_eq!(word_delay_ms(&word("pause,"), 250.0, true), 360);
        assert_eq!(word_delay_ms(&word("aside;"), 250.0, true), 288);
        // long + period + digit: 1.0 + 0.3 + 1.0 + 0.4
        assert_eq!(word_delay_ms(&word("abcdefg12."), 250.0, true), 648);
    }

    #[test]
    fn braking_speed_doubles_base_delay() {
        assert_eq!(word_delay_ms(&word("hello"), 125.0, true), 480);
        assert_eq!(word_delay_ms(&word("hello"), 300.0 * 0.5, false), 400);
    }

    #[test]
    fn delay_is_never_zero() {
        assert_eq!(word_delay_ms(&word("a"), 1_000_000.0, false), 1);
    }

    proptest! {
        #[test]
        fn delay_never_grows_with_speed(
            text in "[a-z0-9]{1,16}[.,;!?]?",
            wpm in 100u16..900,
            dynamic in any::<bool>(),
        ) {
            let word = word(&text);
            let slower = word_delay_ms(&word, wpm as f64, dynamic);
            let faster = word_delay_ms(&word, (wpm + 1) as f64, dynamic);
            prop_assert!(faster <= slower);
        }

        #[test]
        fn static_pacing_ignores_the_word(
            left in "[a-zA-Z0-9]{1,20}[.,!?;:-]?",
            right in "[a-zA-Z0-9]{1,20}[.,!?;:-]?",
            wpm in 100u16..900,
        ) {
            prop_assert_eq!(
                word_delay_ms(&word(&left), wpm as f64, false),
                word_delay_ms(&word(&right), wpm as f64, false)
            );
        }
    }
}
