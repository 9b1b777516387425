use unicode_segmentation::UnicodeSegmentation;

/// Splits text into word-like units without relying on whitespace.
pub trait Segmenter {
    fn segment(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Other,
}

fn script_of(c: char) -> Script {
    match c {
        '\u{3005}'..='\u{3007}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FA1F}' => Script::Kanji,
        '\u{3041}'..='\u{309F}' => Script::Hiragana,
        '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
            Script::Katakana
        }
        _ => Script::Other,
    }
}

/// Word-boundary segmenter for Japanese text.
///
/// Starts from UAX #29 word boundaries, which split ideographs and kana
/// character by character, then joins neighbouring segments written in the
/// same script. `猫が好きです` becomes `猫`, `が`, `好`, `きです`.
/// Whitespace-only segments are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptSegmenter;

impl Segmenter for ScriptSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let mut last = Script::Other;

        for piece in text.split_word_bounds() {
            if piece.trim().is_empty() {
                last = Script::Other;
                continue;
            }
            let script = piece.chars().next().map_or(Script::Other, script_of);
            match tokens.last_mut() {
                Some(previous) if script != Script::Other && script == last => {
                    previous.push_str(piece);
                }
                _ => tokens.push(piece.to_string()),
            }
            last = script;
        }
        tokens
    }
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn segment(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_japanese_without_spaces() {
        let tokens = ScriptSegmenter.segment("私の名前は中野です");
        assert!(tokens.len() > 1);
        assert_eq!(tokens.concat(), "私の名前は中野です");
        assert_eq!(tokens, vec!["私", "の", "名前", "は", "中野", "です"]);
    }

    #[test]
    fn splits_at_script_changes() {
        let tokens = ScriptSegmenter.segment("猫が好きです");
        assert_eq!(tokens, vec!["猫", "が", "好", "きです"]);
    }

    #[test]
    fn keeps_katakana_and_latin_words_whole() {
        let tokens = ScriptSegmenter.segment("コーヒーとRust 2024");
        assert_eq!(tokens, vec!["コーヒー", "と", "Rust", "2024"]);
    }

    #[test]
    fn punctuation_stands_alone() {
        let tokens = ScriptSegmenter.segment("猫。犬、");
        assert_eq!(tokens, vec!["猫", "。", "犬", "、"]);
    }

    #[test]
    fn closures_act_as_segmenters() {
        let whitespace = |text: &str| -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        };
        assert_eq!(whitespace.segment("a b"), vec!["a", "b"]);
    }
}
