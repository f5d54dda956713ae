// ABOUTME: Locale-sensitive case mapping and string folding
// ABOUTME: Handles Turkic dotted/dotless i and Unicode width and diacritic folding

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::FoldOptions;

fn push_upper(output: &mut String, ch: char, turkic: bool) {
    match ch {
        'i' if turkic => output.push('İ'),
        'ı' if turkic => output.push('I'),
        _ => output.extend(ch.to_uppercase()),
    }
}

fn push_lower(output: &mut String, ch: char, turkic: bool) {
    match ch {
        'I' if turkic => output.push('ı'),
        'İ' if turkic => output.push('i'),
        _ => output.extend(ch.to_lowercase()),
    }
}

pub(super) fn uppercase(text: &str, turkic: bool) -> String {
    if !turkic {
        return text.to_uppercase();
    }
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        push_upper(&mut output, ch, turkic);
    }
    output
}

pub(super) fn lowercase(text: &str, turkic: bool) -> String {
    if !turkic {
        return text.to_lowercase();
    }
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        push_lower(&mut output, ch, turkic);
    }
    output
}

/// Upper-case the first letter of each whitespace-delimited word, lower-case the rest.
pub(super) fn capitalize(text: &str, turkic: bool) -> String {
    let mut output = String::with_capacity(text.len());
    let mut word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            output.push(ch);
            word_start = true;
        } else if word_start {
            push_upper(&mut output, ch, turkic);
            word_start = false;
        } else {
            push_lower(&mut output, ch, turkic);
        }
    }
    output
}

fn is_wide_form(ch: char) -> bool {
    ch == '\u{3000}' || ('\u{FF01}'..='\u{FFEF}').contains(&ch)
}

fn fold_width(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        if is_wide_form(ch) {
            output.extend(std::iter::once(ch).nfkc());
        } else {
            output.push(ch);
        }
    }
    output
}

fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|&ch| !is_combining_mark(ch))
        .nfc()
        .collect()
}

pub(super) fn fold(text: &str, options: FoldOptions, turkic: bool) -> String {
    let mut folded = text.to_string();
    if options.width {
        folded = fold_width(&folded);
    }
    if options.diacritics {
        folded = strip_diacritics(&folded);
    }
    if options.case {
        folded = lowercase(&folded, turkic);
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkic_casing() {
        assert_eq!(uppercase("istanbul", true), "İSTANBUL");
        assert_eq!(uppercase("istanbul", false), "ISTANBUL");
        assert_eq!(lowercase("DİYARBAKIR", true), "diyarbakır");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize("hello wORLD  again", false), "Hello World  Again");
        assert_eq!(capitalize("izmir", true), "İzmir");
        assert_eq!(capitalize("", false), "");
    }

    #[test]
    fn test_fold_diacritics() {
        let options = FoldOptions {
            diacritics: true,
            ..FoldOptions::default()
        };
        assert_eq!(fold("Crème Brûlée", options, false), "Creme Brulee");
    }

    #[test]
    fn test_fold_width_and_case() {
        let options = FoldOptions {
            case: true,
            width: true,
            diacritics: false,
        };
        assert_eq!(fold("ＡＢＣ\u{3000}１２３", options, false), "abc 123");
        assert_eq!(fold("ｶ", options, false), "カ");
    }

    #[test]
    fn test_fold_nothing() {
        assert_eq!(fold("Ünïcode", FoldOptions::default(), false), "Ünïcode");
    }
}
