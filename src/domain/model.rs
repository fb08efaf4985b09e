use crate::utils::serde_helpers::{
    deserialize_lenient_flag, deserialize_opt_lenient_number, deserialize_opt_lenient_string,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 已驗證的查詢。只能經由 `core::validator::validate` 建立，
/// postcode 一定是大寫、無空白的 `DDDDLL`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    postcode: String,
    house_number: u32,
    suffix: Option<String>,
}

impl Query {
    pub(crate) fn new(postcode: String, house_number: u32, suffix: Option<String>) -> Self {
        Self {
            postcode,
            house_number,
            suffix,
        }
    }

    pub fn postcode(&self) -> &str {
        &self.postcode
    }

    pub fn house_number(&self) -> u32 {
        self.house_number
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.postcode, self.house_number)?;
        if let Some(suffix) = &self.suffix {
            write!(f, " {}", suffix)?;
        }
        Ok(())
    }
}

/// 表單原始輸入（未信任）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupForm {
    #[serde(default)]
    pub postcode: String,
    #[serde(default, rename = "huisnummer", deserialize_with = "deserialize_form_text")]
    pub house_number: String,
    #[serde(default, rename = "toevoeging")]
    pub suffix: String,
    /// anti-forgery token, 由 RequestGuard 驗證
    #[serde(default, rename = "nonce", skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LookupForm {
    pub fn new(
        postcode: impl Into<String>,
        house_number: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            postcode: postcode.into(),
            house_number: house_number.into(),
            suffix: suffix.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

// 前端可能把 huisnummer 當數字送出
fn deserialize_form_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(deserialize_opt_lenient_string(deserializer)?.unwrap_or_default())
}

/// EP-Online `PandEnergielabel/Adres` 回應中的單筆記錄
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLabelRecord {
    #[serde(rename = "Energieklasse", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub energy_class: Option<String>,
    #[serde(rename = "Geldig_tot", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub valid_until: Option<String>,
    #[serde(rename = "Postcode", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub postcode: Option<String>,
    #[serde(rename = "Huisnummer", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub house_number: Option<String>,
    #[serde(rename = "Bouwjaar", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub construction_year: Option<String>,
    #[serde(rename = "Gebouwtype", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub building_type: Option<String>,
    #[serde(rename = "Gebouwsubtype", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub building_subtype: Option<String>,
    #[serde(rename = "Gebouwklasse", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub building_class: Option<String>,
    #[serde(rename = "BerekendeCO2Emissie", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub co2_emission: Option<f64>,
    #[serde(rename = "BerekendeEnergieverbruik", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub energy_consumption: Option<f64>,
    #[serde(rename = "Registratiedatum", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub registration_date: Option<String>,
    #[serde(rename = "Opnamedatum", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub inspection_date: Option<String>,
    #[serde(rename = "Certificaathouder", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub certificate_holder: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub status: Option<String>,
    // NTA 8800
    #[serde(rename = "EnergieIndex", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub energy_index: Option<f64>,
    #[serde(rename = "PrimaireFossieleEnergie", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub primary_fossil_energy: Option<f64>,
    #[serde(rename = "Energiebehoefte", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub energy_demand: Option<f64>,
    #[serde(rename = "Aandeel_hernieuwbare_energie", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub renewable_share: Option<f64>,
    #[serde(rename = "Gebruiksoppervlakte_thermische_zone", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub usable_area: Option<f64>,
    #[serde(rename = "Compactheid", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub compactness: Option<f64>,
    #[serde(rename = "Temperatuuroverschrijding", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub temperature_exceedance: Option<f64>,
    #[serde(rename = "Warmtebehoefte", default, deserialize_with = "deserialize_opt_lenient_number")]
    pub heat_demand: Option<f64>,
    #[serde(rename = "Soort_opname", default, deserialize_with = "deserialize_opt_lenient_string")]
    pub inspection_type: Option<String>,
    #[serde(rename = "IsVereenvoudigdLabel", default, deserialize_with = "deserialize_lenient_flag")]
    pub is_simplified_label: bool,
}

/// 可直接呈現的查詢結果。序列化鍵名沿用表單前端使用的荷蘭文鍵名。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    #[serde(rename = "energielabel")]
    pub energy_class: String,
    #[serde(rename = "adres")]
    pub address: String,
    #[serde(rename = "bouwjaar", skip_serializing_if = "Option::is_none")]
    pub construction_year: Option<String>,
    #[serde(rename = "gebouwtype", skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    #[serde(rename = "gebouwsubtype", skip_serializing_if = "Option::is_none")]
    pub building_subtype: Option<String>,
    #[serde(rename = "gebouwklasse", skip_serializing_if = "Option::is_none")]
    pub building_class: Option<String>,

    #[serde(rename = "energieverbruik", skip_serializing_if = "Option::is_none")]
    pub energy_consumption: Option<String>,
    #[serde(rename = "energieverbruik_is_valid")]
    pub energy_consumption_is_valid: bool,
    #[serde(rename = "energieverbruik_is_extreme")]
    pub energy_consumption_is_extreme: bool,
    #[serde(rename = "co2_uitstoot", skip_serializing_if = "Option::is_none")]
    pub co2_emission: Option<String>,
    #[serde(rename = "co2_is_valid")]
    pub co2_is_valid: bool,

    #[serde(rename = "certificaathouder", skip_serializing_if = "Option::is_none")]
    pub certificate_holder: Option<String>,
    #[serde(skip)]
    pub valid_until: DateTime<Utc>,
    #[serde(rename = "geldig_tot")]
    pub valid_until_display: String,
    #[serde(rename = "registratiedatum", skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(rename = "opnamedatum", skip_serializing_if = "Option::is_none")]
    pub inspection_date: Option<String>,
    #[serde(rename = "status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "status_display")]
    pub status_display: String,

    #[serde(rename = "energieindex", skip_serializing_if = "Option::is_none")]
    pub energy_index: Option<String>,
    #[serde(rename = "primaire_fossiele_energie", skip_serializing_if = "Option::is_none")]
    pub primary_fossil_energy: Option<String>,
    #[serde(rename = "energiebehoefte", skip_serializing_if = "Option::is_none")]
    pub energy_demand: Option<String>,
    #[serde(rename = "aandeel_hernieuwbare_energie", skip_serializing_if = "Option::is_none")]
    pub renewable_share: Option<String>,
    #[serde(rename = "gebruiksoppervlakte", skip_serializing_if = "Option::is_none")]
    pub usable_area: Option<String>,
    #[serde(rename = "compactheid", skip_serializing_if = "Option::is_none")]
    pub compactness: Option<String>,
    #[serde(rename = "temperatuuroverschrijding", skip_serializing_if = "Option::is_none")]
    pub temperature_exceedance: Option<String>,
    #[serde(rename = "warmtebehoefte", skip_serializing_if = "Option::is_none")]
    pub heat_demand: Option<String>,
    #[serde(rename = "soort_opname", skip_serializing_if = "Option::is_none")]
    pub inspection_type: Option<String>,
    #[serde(rename = "is_vereenvoudigd")]
    pub is_simplified_label: bool,

    #[serde(rename = "is_verlopen")]
    pub is_expired: bool,
    #[serde(rename = "is_near_expiry")]
    pub is_near_expiry: bool,
    #[serde(rename = "days_until_expiry")]
    pub days_until_expiry: i64,
}
