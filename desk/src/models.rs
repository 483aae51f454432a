//! Wire/disk types shared by the store, the cursor and the backend client.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub id:     String,
    pub symbol: String,
    pub name:   String,
}

/// One saved analysis. Serialized camelCase, the same shape the backend's
/// report endpoints accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub coin: Coin,
    #[serde(default)]
    pub short_position_notes: String,
    #[serde(default)]
    pub short_analysis: String,
    #[serde(default)]
    pub long_position_notes: String,
    #[serde(default)]
    pub long_analysis: String,
}

/// The four editable text fields of an [`AnalysisRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisField {
    ShortPositionNotes,
    ShortAnalysis,
    LongPositionNotes,
    LongAnalysis,
}

impl AnalysisField {
    pub const ALL: [AnalysisField; 4] = [
        AnalysisField::ShortPositionNotes,
        AnalysisField::ShortAnalysis,
        AnalysisField::LongPositionNotes,
        AnalysisField::LongAnalysis,
    ];

    /// Accepts the short command names (`short-notes`) and the record's own
    /// field names (`shortPositionNotes`), case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "short-notes" | "shortpositionnotes" => Some(AnalysisField::ShortPositionNotes),
            "short-analysis" | "shortanalysis" => Some(AnalysisField::ShortAnalysis),
            "long-notes" | "longpositionnotes" => Some(AnalysisField::LongPositionNotes),
            "long-analysis" | "longanalysis" => Some(AnalysisField::LongAnalysis),
            _ => None,
        }
    }

    pub fn command_name(self) -> &'static str {
        match self {
            AnalysisField::ShortPositionNotes => "short-notes",
            AnalysisField::ShortAnalysis => "short-analysis",
            AnalysisField::LongPositionNotes => "long-notes",
            AnalysisField::LongAnalysis => "long-analysis",
        }
    }
}

/// Unsaved edit buffer for the selected coin. Unset fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub short_position_notes: String,
    pub short_analysis: String,
    pub long_position_notes: String,
    pub long_analysis: String,
}

impl Draft {
    pub fn from_record(record: &AnalysisRecord) -> Self {
        Self {
            short_position_notes: record.short_position_notes.clone(),
            short_analysis: record.short_analysis.clone(),
            long_position_notes: record.long_position_notes.clone(),
            long_analysis: record.long_analysis.clone(),
        }
    }

    pub fn get(&self, field: AnalysisField) -> &str {
        match field {
            AnalysisField::ShortPositionNotes => &self.short_position_notes,
            AnalysisField::ShortAnalysis => &self.short_analysis,
            AnalysisField::LongPositionNotes => &self.long_position_notes,
            AnalysisField::LongAnalysis => &self.long_analysis,
        }
    }

    pub fn set(&mut self, field: AnalysisField, value: String) {
        let slot = match field {
            AnalysisField::ShortPositionNotes => &mut self.short_position_notes,
            AnalysisField::ShortAnalysis => &mut self.short_analysis,
            AnalysisField::LongPositionNotes => &mut self.long_position_notes,
            AnalysisField::LongAnalysis => &mut self.long_analysis,
        };
        *slot = value;
    }

    pub fn to_record(&self, coin: &Coin) -> AnalysisRecord {
        AnalysisRecord {
            coin: coin.clone(),
            short_position_notes: self.short_position_notes.clone(),
            short_analysis: self.short_analysis.clone(),
            long_position_notes: self.long_position_notes.clone(),
            long_analysis: self.long_analysis.clone(),
        }
    }
}
