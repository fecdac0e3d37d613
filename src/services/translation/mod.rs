//! UI and agent-reply translation.
//!
//! The [`Translator`] owns the active language and a cache of strings already
//! translated into it. Lookups go cache → phrasebook → remote API; any remote
//! failure yields the original text. Switching language clears the cache.

mod detect;
mod language;
mod phrasebook;

use std::sync::{Arc, PoisonError, RwLock};

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    KisanflowError, Result, ShareLock,
    common::MemCache,
    config::{TranslationConfig, usable_key},
};

pub use detect::LanguageDetector;
pub use language::{ENGLISH, LANGUAGES, Language, label};

const SOURCE_LANGUAGE: &str = "en";

/// English text → translation in the active language.
type TranslationCache = MemCache<String, String>;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

pub struct Translator {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    cache: TranslationCache,
    language: ShareLock<Language>,
    detector: LanguageDetector,
}

impl Translator {
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            url: config.url.clone(),
            api_key: usable_key(&config.api_key).map(str::to_string),
            cache: TranslationCache::new(),
            language: Arc::new(RwLock::new(Language::default())),
            detector: LanguageDetector::new()?,
        })
    }

    pub fn language(&self) -> Language {
        *self.language.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switches the active language; the cache is dropped when the language changes.
    pub fn set_language(
        &self,
        code: &str,
    ) -> Result<Language> {
        let next = Language::find(code).ok_or_else(|| KisanflowError::Validation(format!("unsupported language '{}'", code)))?;

        let mut current = self.language.write().unwrap_or_else(PoisonError::into_inner);
        if *current != next {
            debug!("translation: language {} -> {}, clearing {} cached entries", current.code, next.code, self.cache.len());
            *current = next;
            self.cache.clear();
        }
        Ok(next)
    }

    /// Fixed UI label in the active language.
    pub fn label<'a>(
        &self,
        key: &'a str,
    ) -> &'a str {
        label(self.language().code, key)
    }

    /// Best answer available without a network round trip.
    pub fn translate_sync(
        &self,
        text: &str,
    ) -> String {
        let language = self.language();
        if language.is_english() {
            return text.to_string();
        }
        self.local(text, &language).unwrap_or_else(|| text.to_string())
    }

    fn local(
        &self,
        text: &str,
        language: &Language,
    ) -> Option<String> {
        self.cache.get(&text.to_string()).or_else(|| phrasebook::lookup(text, language.code).map(str::to_string))
    }

    /// Translates into the active language; never fails, the original text is the fallback.
    pub async fn translate(
        &self,
        text: &str,
    ) -> String {
        let language = self.language();
        if language.is_english() || text.trim().is_empty() {
            return text.to_string();
        }
        if let Some(hit) = self.local(text, &language) {
            return hit;
        }
        let Some(key) = self.api_key.as_deref() else {
            return text.to_string();
        };

        match self.request(text, language.code, key).await {
            Ok(translated) => {
                self.remember(&language, text, &translated);
                translated
            }
            Err(e) => {
                warn!("translation: falling back to original text: {}", e);
                text.to_string()
            }
        }
    }

    /// Caches `translated` only while `language` is still active; the read
    /// guard spans the check and the insert.
    fn remember(
        &self,
        language: &Language,
        text: &str,
        translated: &str,
    ) -> bool {
        let current = self.language.read().unwrap_or_else(PoisonError::into_inner);
        if *current != *language {
            debug!("translation: dropping stale {} result for '{}'", language.code, text);
            return false;
        }
        self.cache.set(text.to_string(), translated.to_string());
        true
    }

    /// Translates each item independently; a failed item keeps its original text.
    pub async fn translate_many(
        &self,
        texts: &[String],
    ) -> Vec<String> {
        join_all(texts.iter().map(|text| self.translate(text))).await
    }

    async fn request(
        &self,
        text: &str,
        target: &str,
        key: &str,
    ) -> Result<String> {
        let body = TranslateRequest {
            q: text,
            source: SOURCE_LANGUAGE,
            target,
            format: "text",
        };
        let response = self.client.post(&self.url).query(&[("key", key)]).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(KisanflowError::NetworkFailure(format!("translation service answered {}", response.status())));
        }

        let parsed = response.json::<TranslateResponse>().await?;
        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| KisanflowError::Convert("translation response had no translations".to_string()))
    }

    /// Language code guessed from the script and keywords of `text`.
    ///
    /// The detector knows more codes than the UI offers (`mr`, `ml`, `ur`);
    /// use [`Translator::detect_ui_language`] to get something `set_language` accepts.
    pub fn detect_language(
        &self,
        text: &str,
    ) -> &'static str {
        self.detector.detect(text)
    }

    /// Closest selectable UI language for `text`. Marathi maps to Hindi,
    /// which shares its script; other unsupported codes map to English.
    pub fn detect_ui_language(
        &self,
        text: &str,
    ) -> Language {
        let code = match self.detect_language(text) {
            "mr" => "hi",
            code => code,
        };
        Language::find(code).unwrap_or(ENGLISH)
    }

    pub fn cached(&self) -> u64 {
        self.cache.len()
    }
}
