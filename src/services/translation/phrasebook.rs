//! Pre-translated agent replies, consulted before any remote call.

type Entry = (&'static str, &'static [(&'static str, &'static str)]);

const PHRASES: &[Entry] = &[
    (
        "I've opened the market trends page for tomato. Please select your location to see current prices.",
        &[
            ("te", "టొమాటో కోసం మార్కెట్ ట్రెండ్స్ పేజీని తెరిచాను. ప్రస్తుత ధరలను చూడటానికి దయచేసి మీ స్థానాన్ని ఎంచుకోండి."),
            ("hi", "टमाटर के लिए बाजार प्रवृत्ति पृष्ठ खोला है। वर्तमान कीमतें देखने के लिए कृपया अपना स्थान चुनें।"),
            ("ta", "தக்காளிக்கு சந்தை போக்குகள் பக்கத்தை திறந்துள்ளேன். தற்போதைய விலைகளைப் பார்க்க உங்கள் இடத்தைத் தேர்ந்தெடுக்கவும்."),
            ("kn", "ಟೊಮೆಟೊಗಾಗಿ ಮಾರುಕಟ್ಟೆ ಪ್ರವೃತ್ತಿಗಳ ಪುಟವನ್ನು ತೆರೆದಿದ್ದೇನೆ. ಪ್ರಸ್ತುತ ಬೆಲೆಗಳನ್ನು ನೋಡಲು ದಯವಿಟ್ಟು ನಿಮ್ಮ ಸ್ಥಳವನ್ನು ಆಯ್ಕೆ ಮಾಡಿ."),
        ],
    ),
    (
        "I've opened the market trends page for potato. Please select your location to see current prices.",
        &[
            ("te", "బంగాళాదుంప కోసం మార్కెట్ ట్రెండ్స్ పేజీని తెరిచాను. ప్రస్తుత ధరలను చూడటానికి దయచేసి మీ స్థానాన్ని ఎంచుకోండి."),
            ("hi", "आलू के लिए बाजार प्रवृत्ति पृष्ठ खोला है। वर्तमान कीमतें देखने के लिए कृपया अपना स्थान चुनें।"),
            ("ta", "உருளைக்கிழங்குக்கு சந்தை போக்குகள் பக்கத்தை திறந்துள்ளேன். தற்போதைய விலைகளைப் பார்க்க உங்கள் இடத்தைத் தேர்ந்தெடுக்கவும்."),
            ("kn", "ಆಲೂಗಡ್ಡೆಗಾಗಿ ಮಾರುಕಟ್ಟೆ ಪ್ರವೃತ್ತಿಗಳ ಪುಟವನ್ನು ತೆರೆದಿದ್ದೇನೆ. ಪ್ರಸ್ತುತ ಬೆಲೆಗಳನ್ನು ನೋಡಲು ದಯವಿಟ್ಟು ನಿಮ್ಮ ಸ್ಥಳವನ್ನು ಆಯ್ಕೆ ಮಾಡಿ."),
        ],
    ),
    (
        "I've opened the market trends page for onion. Please select your location to see current prices.",
        &[
            ("te", "ఉల్లిపాయ కోసం మార్కెట్ ట్రెండ్స్ పేజీని తెరిచాను. ప్రస్తుత ధరలను చూడటానికి దయచేసి మీ స్థానాన్ని ఎంచుకోండి."),
            ("hi", "प्याज के लिए बाजार प्रवृत्ति पृष्ठ खोला है। वर्तमान कीमतें देखने के लिए कृपया अपना स्थान चुनें।"),
            ("ta", "வெங்காயத்துக்கு சந்தை போக்குகள் பக்கத்தை திறந்துள்ளேன். தற்போதைய விலைகளைப் பார்க்க உங்கள் இடத்தைத் தேர்ந்தெடுக்கவும்."),
            ("kn", "ಈರುಳ್ಳಿಗಾಗಿ ಮಾರುಕಟ್ಟೆ ಪ್ರವೃತ್ತಿಗಳ ಪುಟವನ್ನು ತೆರೆದಿದ್ದೇನೆ. ಪ್ರಸ್ತುತ ಬೆಲೆಗಳನ್ನು ನೋಡಲು ದಯವಿಟ್ಟು ನಿಮ್ಮ ಸ್ಥಳವನ್ನು ಆಯ್ಕೆ ಮಾಡಿ."),
        ],
    ),
    (
        "I've opened the market trends page for wheat. Please select your location to see current prices.",
        &[
            ("te", "గోధుమల కోసం మార్కెట్ ట్రెండ్స్ పేజీని తెరిచాను. ప్రస్తుత ధరలను చూడటానికి దయచేసి మీ స్థానాన్ని ఎంచుకోండి."),
            ("hi", "गेहूं के लिए बाजार प्रवृत्ति पृष्ठ खोला है। वर्तमान कीमतें देखने के लिए कृपया अपना स्थान चुनें।"),
            ("ta", "கோதுமைக்கு சந்தை போக்குகள் பக்கத்தை திறந்துள்ளேன். தற்போதைய விலைகளைப் பார்க்க உங்கள் இடத்தைத் தேர்ந்தெடுக்கவும்."),
            ("kn", "ಗೋಧಿ ಬೀಜಕ್ಕಾಗಿ ಮಾರುಕಟ್ಟೆ ಪ್ರವೃತ್ತಿಗಳ ಪುಟವನ್ನು ತೆರೆದಿದ್ದೇನೆ. ಪ್ರಸ್ತುತ ಬೆಲೆಗಳನ್ನು ನೋಡಲು ದಯವಿಟ್ಟು ನಿಮ್ಮ ಸ್ಥಳವನ್ನು ಆಯ್ಕೆ ಮಾಡಿ."),
        ],
    ),
    (
        "I've opened the market trends page for rice. Please select your location to see current prices.",
        &[
            ("te", "వరిగా కోసం మార్కెట్ ట్రెండ్స్ పేజీని తెరిచాను. ప్రస్తుత ధరలను చూడటానికి దయచేసి మీ స్థానాన్ని ఎంచుకోండి."),
            ("hi", "चावल के लिए बाजार प्रवृत्ति पृष्ठ खोला है। वर्तमान कीमतें देखने के लिए कृपया अपना स्थान चुनें।"),
            ("ta", "அரிசிக்கு சந்தை போக்குகள் பக்கத்தை திறந்துள்ளேன். தற்போதைய விலைகளைப் பார்க்க உங்கள் இடத்தைத் தேர்ந்தெடுக்கவும்."),
            ("kn", "ಅಕ್ಕಿಗಾಗಿ ಮಾರುಕಟ್ಟೆ ಪ್ರವೃತ್ತಿಗಳ ಪುಟವನ್ನು ತೆರೆದಿದ್ದೇನೆ. ಪ್ರಸ್ತುತ ಬೆಲೆಗಳನ್ನು ನೋಡಲು ದಯವಿಟ್ಟು ನಿಮ್ಮ ಸ್ಥಳವನ್ನು ಆಯ್ಕೆ ಮಾಡಿ."),
        ],
    ),
    (
        "I've opened the market trends page for beans. Please select your location to see current prices.",
        &[
            ("te", "బీన్స్ కోసం మార్కెట్ ట్రెండ్స్ పేజీని తెరిచాను. ప్రస్తుత ధరలను చూడటానికి దయచేసి మీ స్థానాన్ని ఎంచుకోండి."),
            ("hi", "बीन के लिए बाजार प्रवृत्ति पृष्ठ खोला है। वर्तमान कीमतें देखने के लिए कृपया अपना स्थान चुनें।"),
            ("ta", "பீன்ஸுக்கு சந்தை போக்குகள் பக்கத்தை திறந்துள்ளேன். தற்போதைய விலைகளைப் பார்க்க உங்கள் இடத்தைத் தேர்ந்தெடுக்கவும்."),
            ("kn", "ಹುರಳಿಗಾಗಿ ಮಾರುಕಟ್ಟೆ ಪ್ರವೃತ್ತಿಗಳ ಪುಟವನ್ನು ತೆರೆದಿದ್ದೇನೆ. ಪ್ರಸ್ತುತ ಬೆಲೆಗಳನ್ನು ನೋಡಲು ದಯವಿಟ್ಟು ನಿಮ್ಮ ಸ್ಥಳವನ್ನು ಆಯ್ಕೆ ಮಾಡಿ."),
        ],
    ),
    (
        "I've opened the market trends page for cabbage. Please select your location to see current prices.",
        &[
            ("te", "కోసు కోసం మార్కెట్ ట్రెండ్స్ పేజీని తెరిచాను. ప్రస్తుత ధరలను చూడటానికి దయచేసి మీ స్థానాన్ని ఎంచుకోండి."),
            ("hi", "पत्तागोभी के लिए बाजार प्रवृत्ति पृष्ठ खोला है। वर्तमान कीमतें देखने के लिए कृपया अपना स्थान चुनें।"),
            ("ta", "முட்டைக்கோசுக்கு சந்தை போக்குகள் பக்கத்தை திறந்துள்ளேன். தற்போதைய விலைகளைப் பார்க்க உங்கள் இடத்தைத் தேர்ந்தெடுக்கவும்."),
            ("kn", "ಕೋಸುಗಾಗಿ ಮಾರುಕಟ್ಟೆ ಪ್ರವೃತ್ತಿಗಳ ಪುಟವನ್ನು ತೆರೆದಿದ್ದೇನೆ. ಪ್ರಸ್ತುತ ಬೆಲೆಗಳನ್ನು ನೋಡಲು ದಯವಿಟ್ಟು ನಿಮ್ಮ ಸ್ಥಳವನ್ನು ಆಯ್ಕೆ ಮಾಡಿ."),
        ],
    ),
];

/// Stored translation of `text` into `target`, if any.
pub fn lookup(
    text: &str,
    target: &str,
) -> Option<&'static str> {
    PHRASES.iter().find(|(source, _)| *source == text).and_then(|(_, translations)| translations.iter().find(|(code, _)| *code == target)).map(|(_, t)| *t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let text = "I've opened the market trends page for onion. Please select your location to see current prices.";
        assert!(lookup(text, "hi").unwrap().starts_with("प्याज"));
        assert_eq!(lookup(text, "fr"), None);
        assert_eq!(lookup("something else", "hi"), None);
    }

    #[test]
    fn test_every_reply_covers_every_ui_language() {
        let crops = ["tomato", "potato", "onion", "wheat", "rice", "beans", "cabbage"];
        assert_eq!(PHRASES.len(), crops.len());
        for crop in crops {
            let text = format!("I've opened the market trends page for {}. Please select your location to see current prices.", crop);
            for language in crate::services::translation::LANGUAGES.iter().filter(|l| !l.is_english()) {
                assert!(lookup(&text, language.code).is_some(), "{} has no {} reply", crop, language.code);
            }
        }
    }
}
