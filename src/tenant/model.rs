//! Per-site configuration schema (`config.json`).
//!
//! All types derive Serde traits; field names follow the camelCase keys of
//! the on-disk document. Presence checks happen once, in [`TenantConfig::parse`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Configuration of one hosted site.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantConfig {
    /// Display name of the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// Locale served when the path carries no recognized prefix.
    pub default_language: String,

    /// CRM integration settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crm: Option<CrmConfig>,

    /// Campaigns keyed by locale code; the keys are the site's extra locales.
    #[serde(default)]
    pub campaigns: BTreeMap<String, Campaign>,
}

/// CRM provider credentials.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmConfig {
    pub provider: CrmProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CrmProvider {
    CheckoutChamp,
    Stripe,
}

/// Campaign identifiers for one locale.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(deserialize_with = "string_or_number")]
    pub campaign_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub gateway_id: String,
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_id: Option<String>,
}

impl TenantConfig {
    /// Parse and validate a `config.json` document.
    ///
    /// Locale codes are lowercased, matching how request prefixes are read.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut config: TenantConfig = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        config.validate()?;
        config.default_language = config.default_language.to_ascii_lowercase();
        config.campaigns = std::mem::take(&mut config.campaigns)
            .into_iter()
            .map(|(code, campaign)| (code.to_ascii_lowercase(), campaign))
            .collect();
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.default_language.trim().is_empty() {
            return Err("defaultLanguage must not be empty".to_string());
        }
        Ok(())
    }

    /// True if `code` is the default language or a configured campaign locale.
    pub fn supports_locale(&self, code: &str) -> bool {
        code == self.default_language || self.campaigns.contains_key(code)
    }

    /// Site name, or `"Unknown"` when the config has none.
    pub fn display_name(&self) -> &str {
        self.site_name.as_deref().unwrap_or("Unknown")
    }
}

/// Campaign identifiers are often written as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}
