use serde::Serialize;

/// A language the portal UI can be switched to.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
    pub flag: &'static str,
}

pub const ENGLISH: Language = Language {
    code: "en",
    name: "English",
    native_name: "English",
    flag: "🇺🇸",
};

pub const LANGUAGES: &[Language] = &[
    ENGLISH,
    Language {
        code: "kn",
        name: "Kannada",
        native_name: "ಕನ್ನಡ",
        flag: "🇮🇳",
    },
    Language {
        code: "hi",
        name: "Hindi",
        native_name: "हिंदी",
        flag: "🇮🇳",
    },
    Language {
        code: "te",
        name: "Telugu",
        native_name: "తెలుగు",
        flag: "🇮🇳",
    },
    Language {
        code: "ta",
        name: "Tamil",
        native_name: "தமிழ்",
        flag: "🇮🇳",
    },
];

impl Language {
    pub fn find(code: &str) -> Option<Language> {
        LANGUAGES.iter().find(|l| l.code == code).copied()
    }

    pub fn is_english(&self) -> bool {
        self.code == ENGLISH.code
    }
}

impl Default for Language {
    fn default() -> Self {
        ENGLISH
    }
}

const LABELS: &[(&str, &[(&str, &str)])] = &[
    (
        "en",
        &[
            ("welcome", "Welcome"),
            ("crop_monitor", "Crop Monitor"),
            ("disease_check", "Disease Check"),
            ("market_price", "Market Price"),
            ("gov_schemes", "Gov Schemes"),
            ("weather_forecast", "Weather Daily Forecast"),
            ("temperature", "Temperature"),
            ("humidity", "Humidity"),
            ("light_intensity", "Light Intensity"),
            ("weather", "Weather"),
            ("notifications", "Notifications"),
            ("settings", "Settings"),
            ("sign_out", "Sign Out"),
            ("language", "Language"),
        ],
    ),
    (
        "kn",
        &[
            ("welcome", "ನಮಸ್ಕಾರ"),
            ("crop_monitor", "ಬೆಳೆ ಮೇಲ್ವಿಚಾರಣೆ"),
            ("disease_check", "ರೋಗ ಪರೀಕ್ಷೆ"),
            ("market_price", "ಮಾರುಕಟ್ಟೆ ಬೆಲೆ"),
            ("gov_schemes", "ಸರ್ಕಾರಿ ಯೋಜನೆಗಳು"),
            ("weather_forecast", "ಹವಾಮಾನ ಮುನ್ನೋಟ"),
            ("temperature", "ತಾಪಮಾನ"),
            ("humidity", "ಆರ್ದ್ರತೆ"),
            ("light_intensity", "ಬೆಳಕಿನ ತೀವ್ರತೆ"),
            ("weather", "ಹವಾಮಾನ"),
            ("notifications", "ಸೂಚನೆಗಳು"),
            ("settings", "ಸೆಟ್ಟಿಂಗ್ಗಳು"),
            ("sign_out", "ಸೈನ್ ಔಟ್"),
            ("language", "ಭಾಷೆ"),
        ],
    ),
    (
        "hi",
        &[
            ("welcome", "स्वागत"),
            ("crop_monitor", "फसल मॉनिटर"),
            ("disease_check", "रोग जांच"),
            ("market_price", "बाजार मूल्य"),
            ("gov_schemes", "सरकारी योजनाएं"),
            ("weather_forecast", "मौसम पूर्वानुमान"),
            ("temperature", "तापमान"),
            ("humidity", "नमी"),
            ("light_intensity", "प्रकाश तीव्रता"),
            ("weather", "मौसम"),
            ("notifications", "सूचनाएं"),
            ("settings", "सेटिंग्स"),
            ("sign_out", "साइन आउट"),
            ("language", "भाषा"),
        ],
    ),
];

fn lookup(
    code: &str,
    key: &str,
) -> Option<&'static str> {
    LABELS.iter().find(|(c, _)| *c == code).and_then(|(_, entries)| entries.iter().find(|(k, _)| *k == key)).map(|(_, v)| *v)
}

/// UI label for `key` in `code`, falling back to English and then to the key itself.
pub fn label<'a>(
    code: &str,
    key: &'a str,
) -> &'a str {
    lookup(code, key).or_else(|| lookup(ENGLISH.code, key)).unwrap_or(key)
}
