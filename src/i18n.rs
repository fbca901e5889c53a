// src/i18n.rs

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

pub const SUPPORTED_LOCALES: [&str; 2] = ["de", "en"];
const FALLBACK_LOCALE: &str = "de";

static EMBEDDED_LOCALES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("de", include_str!("../locales/de.json")),
        ("en", include_str!("../locales/en.json")),
    ])
});

pub struct I18nManager {
    translations: HashMap<String, String>,
}

impl I18nManager {
    pub fn new(locale: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let data = EMBEDDED_LOCALES
            .get(locale)
            .or_else(|| EMBEDDED_LOCALES.get(FALLBACK_LOCALE))
            .ok_or("no embedded translations")?;
        Self::from_json(data)
    }

    pub fn from_json(data: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let parsed: Value = serde_json::from_str(data)?;

        let mut translations = HashMap::new();
        if let Value::Object(map) = parsed {
            for (key, value) in map {
                if let Value::String(s) = value {
                    translations.insert(key, s);
                }
            }
        }

        Ok(I18nManager { translations })
    }

    /// Unknown keys render as the key itself.
    pub fn get_text(&self, key: &str) -> String {
        match self.translations.get(key) {
            Some(text) => text.clone(),
            None => {
                warn!("Missing translation for '{}'", key);
                key.to_string()
            }
        }
    }

    pub fn get_text_with_param(&self, key: &str, param_key: &str, param_value: &str) -> String {
        self.get_text_with_params(key, &[(param_key, param_value)])
    }

    pub fn get_text_with_params(&self, key: &str, params: &[(&str, &str)]) -> String {
        params.iter().fold(self.get_text(key), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

/// Configured language wins; otherwise German for a German system locale,
/// English for everything else.
pub fn resolve_locale(configured: Option<&str>, system: Option<&str>) -> &'static str {
    if let Some(lang) = configured {
        let lang = lang.to_lowercase();
        if let Some(found) = SUPPORTED_LOCALES
            .iter()
            .copied()
            .find(|l| lang.starts_with(l))
        {
            return found;
        }
        warn!("Unsupported language '{}' in config, detecting from system", lang);
    }
    match system {
        Some(sys) if sys.to_lowercase().starts_with("de") => "de",
        _ => "en",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_locales_have_the_same_keys() {
        let de: Value = serde_json::from_str(EMBEDDED_LOCALES["de"]).unwrap();
        let en: Value = serde_json::from_str(EMBEDDED_LOCALES["en"]).unwrap();
        let mut de_keys: Vec<_> = de.as_object().unwrap().keys().collect();
        let mut en_keys: Vec<_> = en.as_object().unwrap().keys().collect();
        de_keys.sort();
        en_keys.sort();
        assert_eq!(de_keys, en_keys);
    }

    #[test]
    fn params_are_substituted() {
        let i18n = I18nManager::from_json(r#"{ "rate": "Rate {rate} of {max}" }"#).unwrap();
        assert_eq!(
            i18n.get_text_with_params("rate", &[("rate", "160"), ("max", "400")]),
            "Rate 160 of 400"
        );
        assert_eq!(i18n.get_text_with_param("rate", "rate", "50"), "Rate 50 of {max}");
    }

    #[test]
    fn unknown_key_renders_as_key() {
        let i18n = I18nManager::new("de").unwrap();
        assert_eq!(i18n.get_text("no_such_key"), "no_such_key");
    }

    #[test]
    fn unknown_locale_falls_back() {
        let i18n = I18nManager::new("fr").unwrap();
        assert_eq!(i18n.get_text("menu_exit"), "Beenden");
    }

    #[test]
    fn locale_resolution() {
        assert_eq!(resolve_locale(Some("en"), Some("de-DE")), "en");
        assert_eq!(resolve_locale(Some("DE"), None), "de");
        assert_eq!(resolve_locale(None, Some("de-AT")), "de");
        assert_eq!(resolve_locale(None, Some("ja-JP")), "en");
        assert_eq!(resolve_locale(Some("fr"), Some("de-CH")), "de");
        assert_eq!(resolve_locale(None, None), "en");
    }
}
