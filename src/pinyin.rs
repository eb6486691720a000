//! Pinyin derivation for phrase cards.
//!
//! Config-supplied phrases may omit `py`; we derive it per character with the
//! `pinyin` crate. No word segmentation, so polyphonic characters take their
//! default reading — acceptable for short travel phrases.

use pinyin::ToPinyin;

/// Tone-diacritic pinyin for `text`, syllables space-separated.
/// Characters without a reading (kana, ASCII, punctuation) are copied through
/// verbatim and break the syllable run.
pub fn phrase_pinyin(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut prev_syllable = false;

    for ch in text.chars() {
        match ch.to_pinyin() {
            Some(py) => {
                if prev_syllable {
                    out.push(' ');
                }
                out.push_str(py.with_tone());
                prev_syllable = true;
            }
            None => {
                out.push(ch);
                prev_syllable = false;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_between_syllables_only() {
        assert_eq!(phrase_pinyin("你好"), "nǐ hǎo");
        assert_eq!(phrase_pinyin("太貴了"), "tài guì le");
    }

    #[test]
    fn non_hanzi_copied_through() {
        assert_eq!(phrase_pinyin("OK"), "OK");
        assert_eq!(phrase_pinyin(""), "");
    }
}
