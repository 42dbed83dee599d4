use serde::{Deserialize, Serialize};

/// Placeholder item number that is never emitted as a standardized item.
pub const UNKNOWN_ITEM_NUMBER: &str = "Unknown";

/// A single positioned glyph run on a PDF page.
///
/// Coordinates use the PDF convention: origin bottom-left, `y` increasing upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        TextFragment {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Raw item fields read from one table row, before standardization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateItem {
    pub item_number: String,
    pub description: String,
    pub quantity: String,
    pub unit: String,
}

/// A bid item in the standardized schema handed to matching and rendering.
///
/// `item_number` is trimmed, never empty and never the bare `"Unknown"` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_number: String,
    pub description: String,
    pub quantity: String,
    pub unit: String,
}

impl Item {
    /// Trim every field and reject candidates without a usable item number.
    pub fn standardize(candidate: CandidateItem) -> Option<Item> {
        let item_number = candidate.item_number.trim();
        if item_number.is_empty() || item_number == UNKNOWN_ITEM_NUMBER {
            return None;
        }

        Some(Item {
            item_number: item_number.to_string(),
            description: candidate.description.trim().to_string(),
            quantity: candidate.quantity.trim().to_string(),
            unit: candidate.unit.trim().to_string(),
        })
    }
}
