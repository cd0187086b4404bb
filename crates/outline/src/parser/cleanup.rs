use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Clean up span text as delivered by the layout engine.
///
/// Applies unicode NFC normalization, ligature replacement and removal of the
/// Unicode replacement character. Running it twice yields the same text.
pub fn clean_text(text: &str) -> String {
    // 1. Unicode NFC normalization.
    let mut result: String = text.nfc().collect();

    // 2. Fix ligatures (ff, fi, fl, ffi, ffl).
    let ligatures = [
        ("\u{FB00}", "ff"),
        ("\u{FB01}", "fi"),
        ("\u{FB02}", "fl"),
        ("\u{FB03}", "ffi"),
        ("\u{FB04}", "ffl"),
    ];
    for (lig, replacement) in &ligatures {
        if result.contains(lig) {
            result = result.replace(lig, replacement);
        }
    }

    // 3. Remove Unicode replacement character.
    if result.contains('\u{FFFD}') {
        result = result.replace('\u{FFFD}', "");
    }

    result
}

/// Undo line-wrap hyphenation: `"inter- pret"` becomes `"interpret"`.
///
/// Only a hyphen followed by whitespace and sitting between two word runs is
/// removed. Text without such a break is returned borrowed and unchanged.
pub fn repair_hyphenation(text: &str) -> Cow<'_, str> {
    static RE_HYPHEN: OnceLock<Regex> = OnceLock::new();
    let re_hyphen = RE_HYPHEN.get_or_init(|| Regex::new(r"(\w+)-\s+(\w+)").unwrap());
    re_hyphen.replace_all(text, "$1$2")
}
