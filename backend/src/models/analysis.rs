//! # models::analysis
//!
//! Defines [`AnalysisRecord`] — the four free-text fields the user entered for
//! one coin, as the desk client posts them to the report endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder written in the `coin` column when a record carries no usable
/// coin label at all.
pub const UNKNOWN_COIN_LABEL: &str = "Unknown coin";

/// Coin as it arrives inside a report payload.
///
/// Every field is optional here: the report must still render a row for a
/// record whose coin was stored by an older client with fields missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRef {
    #[serde(default)]
    pub id:     Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name:   Option<String>,
}

impl CoinRef {
    /// `name`, else `symbol`, else `id`, else [`UNKNOWN_COIN_LABEL`].
    /// Empty strings count as absent.
    pub fn label(&self) -> &str {
        [&self.name, &self.symbol, &self.id]
            .into_iter()
            .filter_map(|f| f.as_deref())
            .find(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_COIN_LABEL)
    }
}

/// Missing and `null` fields both read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub coin:                 CoinRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_position_notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_analysis:       String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_position_notes:  String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub long_analysis:        String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: Option<&str>, symbol: Option<&str>, name: Option<&str>) -> CoinRef {
        CoinRef {
            id:     id.map(str::to_string),
            symbol: symbol.map(str::to_string),
            name:   name.map(str::to_string),
        }
    }

    #[test]
    fn label_falls_back_in_order() {
        assert_eq!(coin(Some("btc"), Some("btc"), Some("BTC")).label(), "BTC");
        assert_eq!(coin(Some("btc"), Some("btc"), Some("")).label(), "btc");
        assert_eq!(coin(Some("btc-id"), None, None).label(), "btc-id");
        assert_eq!(coin(None, None, None).label(), UNKNOWN_COIN_LABEL);
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{ "coin": { "id": "eth" }, "shortAnalysis": "sell" }"#,
        )
        .unwrap();
        assert_eq!(record.short_analysis, "sell");
        assert_eq!(record.long_analysis, "");
        assert_eq!(record.coin.label(), "eth");
    }

    #[test]
    fn null_fields_read_as_empty() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{ "coin": null, "shortPositionNotes": null, "shortAnalysis": "sell", "longAnalysis": null }"#,
        )
        .unwrap();
        assert_eq!(record.short_position_notes, "");
        assert_eq!(record.short_analysis, "sell");
        assert_eq!(record.long_analysis, "");
        assert_eq!(record.coin.label(), UNKNOWN_COIN_LABEL);
    }
}
