//! Languages supported by the Google Translate TTS backend.

/// `(code, name)` pairs, codes in the casing the backend expects.
const SUPPORTED: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("fr-CA", "French (Canada)"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("ha", "Hausa"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("iw", "Hebrew"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pa", "Punjabi (Gurmukhi)"),
    ("pl", "Polish"),
    ("pt", "Portuguese (Brazil)"),
    ("pt-PT", "Portuguese (Portugal)"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("yue", "Cantonese"),
    ("zh", "Chinese (Mandarin)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Mandarin/Taiwan)"),
];

/// Regional codes the backend no longer serves, and their replacement.
const DEPRECATED: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "en-us", "en-ca", "en-uk", "en-gb", "en-au", "en-gh", "en-in", "en-ie", "en-nz",
            "en-ng", "en-ph", "en-za", "en-tz",
        ],
    ),
    ("fr", &["fr-fr"]),
    ("pt", &["pt-br"]),
    ("es", &["es-es", "es-us"]),
];

/// All supported `(code, name)` pairs.
pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    SUPPORTED
}

pub(crate) fn canonical_code(code: &str) -> Option<&'static str> {
    if let Some((canonical, _)) = SUPPORTED
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
    {
        return Some(*canonical);
    }
    let lower = code.to_ascii_lowercase();
    DEPRECATED
        .iter()
        .find(|(_, old)| old.iter().any(|o| *o == lower))
        .map(|(replacement, _)| *replacement)
}

pub(crate) fn language_name(code: &str) -> Option<&'static str> {
    SUPPORTED
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_codes_are_unique() {
        let mut codes: Vec<String> = SUPPORTED.iter().map(|(c, _)| c.to_lowercase()).collect();
        let before = codes.len();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), before);
    }

    #[test]
    fn test_deprecated_codes_resolve_to_supported() {
        for (replacement, _) in DEPRECATED {
            assert!(language_name(replacement).is_some(), "{}", replacement);
        }
    }
}
