//! Locale plural rules for numerus messages.
//!
//! Each supported language maps to one plural family. A family knows how many
//! numerus forms a translation must provide and which form a quantity selects.
//! The families and their language lists follow the Qt Linguist numerus table.

use std::fmt;

/// Plural family of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralRule {
    /// No plural distinction (ja, zh, ko, ...).
    Single,
    /// Singular for exactly 1 (en, it, de, ...).
    EnglishStyle,
    /// Singular for 0 and 1 (fr, pt_BR, ...).
    FrenchStyle,
    Latvian,
    Irish,
    Romanian,
    Lithuanian,
    /// ru, uk, be, sr, hr, bs.
    RussianStyle,
    /// Counts by the last two digits, so 101 is singular.
    Czech,
    Slovak,
    Polish,
    Slovenian,
    Maltese,
    Welsh,
    Arabic,
    Macedonian,
    Icelandic,
    ScottishGaelic,
}

const SINGLE_LANGUAGES: &[&str] = &[
    "bi", "my", "zh", "dz", "fj", "gn", "hu", "id", "ja", "jv", "ko", "ms", "na", "om", "fa",
    "su", "tt", "th", "bo", "tr", "vi", "yo", "za",
];

const ENGLISH_STYLE_LANGUAGES: &[&str] = &[
    "ab", "aa", "af", "sq", "am", "as", "ay", "az", "eu", "bn", "bg", "ca", "da", "nl", "en",
    "eo", "et", "fo", "fi", "fy", "gl", "ka", "de", "el", "kl", "gu", "ha", "he", "hi", "ia",
    "ie", "it", "kn", "ks", "kk", "km", "rw", "ky", "ku", "lo", "la", "lb", "ml", "mr", "mo",
    "mn", "ne", "nb", "nn", "no", "or", "ps", "pt", "pa", "rm", "sa", "sd", "si", "so",
    "es", "sw", "sv", "tl", "ta", "te", "to", "ts", "tk", "ug", "ur", "uz", "vo", "wo", "xh",
    "yi", "zu",
];

const FRENCH_STYLE_LANGUAGES: &[&str] = &[
    "fr", "hy", "br", "fil", "gun", "ln", "mg", "oc", "tg", "ti", "wa",
];

const RUSSIAN_STYLE_LANGUAGES: &[&str] = &["ru", "uk", "be", "sr", "hr", "bs"];

/// Split a locale code like `it_IT`, `pt-BR` or `zh_Hans_CN` into a
/// lowercase language and an optional territory.
fn split_locale(code: &str) -> (String, Option<String>) {
    let mut parts = code.split(['_', '-', '.', '@']);
    let language = parts.next().unwrap_or("").to_ascii_lowercase();
    let territory = parts
        .find(|p| {
            (p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
                || (p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()))
        })
        .map(|p| p.to_ascii_uppercase());
    (language, territory)
}

impl PluralRule {
    /// Plural rule for a locale code, `None` when the language is unknown.
    pub fn for_language(code: &str) -> Option<Self> {
        let (language, territory) = split_locale(code.trim());
        let language = language.as_str();

        // Brazilian Portuguese treats zero as singular.
        if language == "pt" && territory.as_deref() == Some("BR") {
            return Some(PluralRule::FrenchStyle);
        }

        let rule = match language {
            "lv" => PluralRule::Latvian,
            "ga" => PluralRule::Irish,
            "ro" => PluralRule::Romanian,
            "lt" => PluralRule::Lithuanian,
            "cs" => PluralRule::Czech,
            "sk" => PluralRule::Slovak,
            "pl" => PluralRule::Polish,
            "sl" => PluralRule::Slovenian,
            "mt" => PluralRule::Maltese,
            "cy" => PluralRule::Welsh,
            "ar" => PluralRule::Arabic,
            "mk" => PluralRule::Macedonian,
            "is" => PluralRule::Icelandic,
            "gd" => PluralRule::ScottishGaelic,
            l if RUSSIAN_STYLE_LANGUAGES.contains(&l) => PluralRule::RussianStyle,
            l if SINGLE_LANGUAGES.contains(&l) => PluralRule::Single,
            l if FRENCH_STYLE_LANGUAGES.contains(&l) => PluralRule::FrenchStyle,
            l if ENGLISH_STYLE_LANGUAGES.contains(&l) => PluralRule::EnglishStyle,
            _ => return None,
        };
        Some(rule)
    }

    /// Number of numerus forms a translation for this rule must provide.
    pub fn form_count(self) -> usize {
        match self {
            PluralRule::Single => 1,
            PluralRule::EnglishStyle | PluralRule::FrenchStyle | PluralRule::Icelandic => 2,
            PluralRule::Latvian
            | PluralRule::Irish
            | PluralRule::Romanian
            | PluralRule::Lithuanian
            | PluralRule::RussianStyle
            | PluralRule::Czech
            | PluralRule::Slovak
            | PluralRule::Polish
            | PluralRule::Macedonian => 3,
            PluralRule::Slovenian
            | PluralRule::Maltese
            | PluralRule::Welsh
            | PluralRule::ScottishGaelic => 4,
            PluralRule::Arabic => 6,
        }
    }

    /// Index of the numerus form selected by `n`.
    ///
    /// Always lower than [`PluralRule::form_count`].
    pub fn form_index(self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            PluralRule::Single => 0,
            PluralRule::EnglishStyle => usize::from(n != 1),
            PluralRule::FrenchStyle => usize::from(n > 1),
            PluralRule::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            PluralRule::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            PluralRule::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..20).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::RussianStyle => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Czech => match n100 {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            PluralRule::Slovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            PluralRule::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            PluralRule::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            PluralRule::Maltese => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=10).contains(&n100) {
                    1
                } else if (11..=19).contains(&n100) {
                    2
                } else {
                    3
                }
            }
            PluralRule::Welsh => match n {
                1 => 0,
                2 => 1,
                8 | 11 => 2,
                _ => 3,
            },
            PluralRule::Arabic => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if (3..=10).contains(&n100) {
                    3
                } else if n100 >= 11 {
                    4
                } else {
                    5
                }
            }
            PluralRule::Macedonian => match n10 {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            PluralRule::Icelandic => usize::from(!(n10 == 1 && n100 != 11)),
            PluralRule::ScottishGaelic => match n {
                1 | 11 => 0,
                2 | 12 => 1,
                3..=10 | 13..=19 => 2,
                _ => 3,
            },
        }
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PluralRule::Single => "single",
            PluralRule::EnglishStyle => "english",
            PluralRule::FrenchStyle => "french",
            PluralRule::Latvian => "latvian",
            PluralRule::Irish => "irish",
            PluralRule::Romanian => "romanian",
            PluralRule::Lithuanian => "lithuanian",
            PluralRule::RussianStyle => "russian",
            PluralRule::Czech => "czech",
            PluralRule::Slovak => "slovak",
            PluralRule::Polish => "polish",
            PluralRule::Slovenian => "slovenian",
            PluralRule::Maltese => "maltese",
            PluralRule::Welsh => "welsh",
            PluralRule::Arabic => "arabic",
            PluralRule::Macedonian => "macedonian",
            PluralRule::Icelandic => "icelandic",
            PluralRule::ScottishGaelic => "scottish-gaelic",
        };
        write!(f, "{}", name)
    }
}
