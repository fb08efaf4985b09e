//! Presentation helpers shared by the CLI and the Lambda handler.

use crate::domain::model::LookupResult;
use crate::utils::error::{LabelError, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

pub const INDICATIVE_MARKER: &str = "(Indicatief - EP-Online)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusBadge {
    Active(String),
    Expired,
    Revoked,
}

impl StatusBadge {
    pub fn for_result(result: &LookupResult) -> Self {
        if result.is_expired {
            return StatusBadge::Expired;
        }
        match result.status_display.to_lowercase().as_str() {
            "ingetrokken" | "intrekking" => StatusBadge::Revoked,
            _ => StatusBadge::Active(result.status_display.clone()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatusBadge::Active(display) => display,
            StatusBadge::Expired => "Verlopen",
            StatusBadge::Revoked => "Ingetrokken",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    Expired,
    NearExpiry,
    Simplified,
    Improve,
}

impl Advice {
    pub fn text(&self) -> &'static str {
        match self {
            Advice::Expired => {
                "Dit energielabel is verlopen. Voor verkoop/verhuur heb je meestal een geldig label nodig. Vraag een nieuwe opname aan."
            }
            Advice::NearExpiry => {
                "Dit label verloopt binnenkort. Overweeg tijdig een nieuwe opname te plannen."
            }
            Advice::Simplified => {
                "Dit is een vereenvoudigd/basislabel. Voor een nauwkeuriger label en verbeteradvies is een volledige opname aan te raden."
            }
            Advice::Improve => {
                "Wil je een beter energielabel? Een adviseur kan verbeterkansen inzichtelijk maken en een nieuwe opname verzorgen."
            }
        }
    }
}

/// 優先順序：已過期 > 即將過期 > 簡化標籤 > 預設
pub fn advice(result: &LookupResult) -> Advice {
    let status = result.status_display.to_lowercase();
    if result.is_expired || status == "verlopen" || status == "expired" {
        return Advice::Expired;
    }
    if result.is_near_expiry {
        return Advice::NearExpiry;
    }

    let simplified_inspection = result
        .inspection_type
        .as_deref()
        .map(str::to_lowercase)
        .map(|kind| kind.contains("vereenvoudigd") || kind.contains("basis"))
        .unwrap_or(false);
    if result.is_simplified_label || simplified_inspection {
        return Advice::Simplified;
    }

    Advice::Improve
}

/// CLI 的純文字輸出
pub fn render_text(result: &LookupResult) -> String {
    let mut out = String::new();
    let badge = StatusBadge::for_result(result);

    let _ = writeln!(out, "Energielabel {} [{}]", result.energy_class, badge.label());
    let _ = writeln!(out, "Geldig t/m {}", result.valid_until_display);
    let _ = writeln!(out, "Adres: {}", result.address);

    if let Some(building_type) = &result.building_type {
        let mut building = building_type.clone();
        if let Some(subtype) = &result.building_subtype {
            let _ = write!(building, " ({})", subtype);
        }
        if let Some(year) = &result.construction_year {
            let _ = write!(building, ", bouwjaar {}", year);
        }
        let _ = writeln!(out, "Gebouw: {}", building);
    } else if let Some(year) = &result.construction_year {
        let _ = writeln!(out, "Bouwjaar: {}", year);
    }

    let _ = writeln!(
        out,
        "Vereenvoudigd: {}",
        if result.is_simplified_label { "Ja" } else { "Nee" }
    );
    if let Some(date) = result
        .inspection_date
        .as_ref()
        .or(result.registration_date.as_ref())
    {
        let _ = writeln!(out, "Opnamedatum: {}", date);
    }

    let consumption = result
        .energy_consumption
        .as_ref()
        .filter(|_| result.energy_consumption_is_valid);
    let co2 = result.co2_emission.as_ref().filter(|_| result.co2_is_valid);

    // (label, value, 是否標示為指示性數值)
    let details = [
        ("Energieverbruik", consumption, result.energy_consumption_is_extreme),
        ("CO2-uitstoot", co2, false),
        ("EnergieIndex", result.energy_index.as_ref(), false),
        ("Primaire fossiele energie", result.primary_fossil_energy.as_ref(), true),
        ("Energiebehoefte", result.energy_demand.as_ref(), false),
        ("Aandeel hernieuwbare energie", result.renewable_share.as_ref(), true),
        ("Gebruiksoppervlakte", result.usable_area.as_ref(), false),
        ("Compactheid", result.compactness.as_ref(), false),
        ("Temperatuuroverschrijding", result.temperature_exceedance.as_ref(), false),
        ("Warmtebehoefte", result.heat_demand.as_ref(), false),
        ("Soort opname", result.inspection_type.as_ref(), false),
        ("Certificaathouder", result.certificate_holder.as_ref(), false),
    ];
    for (label, value, indicative) in details {
        if let Some(value) = value {
            if indicative {
                let _ = writeln!(out, "{}: {} {}", label, value, INDICATIVE_MARKER);
            } else {
                let _ = writeln!(out, "{}: {}", label, value);
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Advies: {}", advice(result).text());
    out
}

/// `{ "success": bool, "data": ... }`，所有字串都經過 HTML escape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonEnvelope {
    pub success: bool,
    pub data: Value,
}

impl JsonEnvelope {
    pub fn success(result: &LookupResult) -> Result<Self> {
        let data = serde_json::to_value(result)?;
        Ok(Self {
            success: true,
            data: escape_value(data),
        })
    }

    pub fn failure(error: &LabelError) -> Self {
        Self {
            success: false,
            data: Value::String(escape_html(&error.user_friendly_message())),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn escape_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(escape_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, escape_value(v)))
                .collect(),
        ),
        other => other,
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
