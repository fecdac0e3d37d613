//! Offline language detection for free-text farmer input.
//!
//! Native script wins over romanized keywords; keywords only match whole
//! words. Anything unrecognised is English.

use regex::Regex;

use crate::{KisanflowError, Result};

struct Rule {
    code: &'static str,
    script: Regex,
    words: Regex,
}

const DEVANAGARI: &str = r"[\x{0900}-\x{097F}]";
const MARATHI_WORDS: &[&str] = &["मी", "तुम्ही", "आहे", "आहेत", "करीन", "केली", "होती"];
const HINDI_WORDS: &[&str] = &["मैं", "तुम", "हूँ", "हो", "करता", "किया", "थी"];

const RULES: &[(&str, &str, &[&str])] = &[
    (
        "te",
        r"[\x{0C00}-\x{0C7F}]",
        &[
            "oka", "cheppa", "cheppu", "nenu", "meeru", "ela", "baba", "kshaminchandi", "vyavasaya", "sahayakudu", "neti", "avsaralalo", "sahayam", "cheyagalnu", "entha", "undi", "eroju", "inka", "kani",
            "kada", "ledu", "emundi", "elaundi",
        ],
    ),
    ("ta", r"[\x{0B80}-\x{0BFF}]", &["neenga", "epdi", "sollunga", "velanmai", "indru", "enakku", "theliva"]),
    ("kn", r"[\x{0C80}-\x{0CFF}]", &["nanu", "ninu", "hege", "heli", "indu", "nann", "gottu"]),
    ("ml", r"[\x{0D00}-\x{0D7F}]", &["ningal", "eppol", "paray", "parayuka", "indhu", "ariya"]),
    ("ur", r"[\x{0600}-\x{06FF}]", &["aap", "kya", "kaise", "madad", "aaj", "meri", "samajh"]),
];

pub struct LanguageDetector {
    devanagari: Regex,
    rules: Vec<Rule>,
}

impl LanguageDetector {
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| Regex::new(pattern).map_err(|e| KisanflowError::Config(format!("language detector: {}", e)));

        let mut rules = Vec::with_capacity(RULES.len());
        for &(code, script, words) in RULES {
            rules.push(Rule {
                code,
                script: compile(script)?,
                words: compile(&format!(r"(?i)\b(?:{})\b", words.join("|")))?,
            });
        }

        Ok(Self {
            devanagari: compile(DEVANAGARI)?,
            rules,
        })
    }

    /// Best-guess language code of `text`.
    pub fn detect(
        &self,
        text: &str,
    ) -> &'static str {
        if let Some(rule) = self.rules.iter().find(|r| r.script.is_match(text)) {
            return rule.code;
        }
        if self.devanagari.is_match(text) {
            let marathi = MARATHI_WORDS.iter().filter(|w| text.contains(*w)).count();
            let hindi = HINDI_WORDS.iter().filter(|w| text.contains(*w)).count();
            return if marathi > hindi { "mr" } else { "hi" };
        }
        if let Some(rule) = self.rules.iter().find(|r| r.words.is_match(text)) {
            return rule.code;
        }
        "en"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_script() {
        let detector = LanguageDetector::new().unwrap();
        assert_eq!(detector.detect("నమస్కారం"), "te");
        assert_eq!(detector.detect("வணக்கம்"), "ta");
        assert_eq!(detector.detect("ನಮಸ್ಕಾರ"), "kn");
        assert_eq!(detector.detect("നമസ്കാരം"), "ml");
        assert_eq!(detector.detect("آپ کیسے ہیں"), "ur");
    }

    #[test]
    fn test_devanagari_hindi_or_marathi() {
        let detector = LanguageDetector::new().unwrap();
        assert_eq!(detector.detect("मैं किसान हूँ"), "hi");
        assert_eq!(detector.detect("मी शेतकरी आहे"), "mr");
    }

    #[test]
    fn test_romanized_keywords() {
        let detector = LanguageDetector::new().unwrap();
        assert_eq!(detector.detect("nenu oka raitu"), "te");
        assert_eq!(detector.detect("Aap kaise ho"), "ur");
    }

    #[test]
    fn test_default_is_english() {
        let detector = LanguageDetector::new().unwrap();
        assert_eq!(detector.detect("Show me the AI assistant"), "en");
        assert_eq!(detector.detect("tomato prices today"), "en");
        assert_eq!(detector.detect(""), "en");
    }
}
