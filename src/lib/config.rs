//! Build-time configuration for the API base URL, UI locale and log level with an
//! optional runtime override. The runtime config is read from
//! `window.PASSKEY_CONFIG` (if present) so static deployments can point at another
//! backend without rebuilding. Configuration values are public; do not store secrets
//! here.

use super::i18n::Locale;

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Empty means same origin; requests then use relative paths.
    pub api_base_url: String,
    pub locale: Option<Locale>,
    pub log_level: String,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    #[must_use]
    pub fn load() -> Self {
        let api_base_url = option_env!("PASSKEY_API_BASE_URL").unwrap_or("");
        let locale = option_env!("PASSKEY_LOCALE").and_then(Locale::from_tag);
        let log_level = option_env!("PASSKEY_LOG_LEVEL").unwrap_or("info");

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            locale,
            log_level: log_level.to_string(),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    /// Resolves the UI locale: explicit config first, then the browser language.
    #[must_use]
    pub fn resolve_locale(&self, browser_language: Option<&str>) -> Locale {
        self.locale
            .or_else(|| browser_language.and_then(Locale::from_tag))
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    locale: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(locale) = runtime.locale.as_deref().and_then(Locale::from_tag) {
        config.locale = Some(locale);
    }
    if let Some(value) = runtime.log_level {
        config.log_level = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("PASSKEY_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        locale: read_runtime_value(&object, "locale"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

#[cfg(any(target_arch = "wasm32", test))]
fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
