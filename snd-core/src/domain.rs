use serde::{Deserialize, Serialize};

use crate::error::{Diagnostic, Payload};

/// One sound as printed by listings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundRow {
    pub index: usize,
    pub group: i32,
    pub item: i32,
    pub blob: usize,
    pub byte_size: u32,
    pub channels: u16,
    pub hz: u32,
    pub bits: u16,
    pub duration_secs: f64,
    /// BLAKE3 of the WAVE bytes, hex.
    pub digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One collected diagnostic in a machine-readable form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRow {
    pub id: i32,
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<&Diagnostic> for DiagnosticRow {
    fn from(d: &Diagnostic) -> Self {
        let value = match d.payload {
            Payload::None => None,
            Payload::Value(v) => Some(v.to_string()),
            Payload::Sound { group, item } => Some(format!("{group}-{item}")),
        };
        Self {
            id: d.kind.id(),
            name: d.kind.name().to_string(),
            message: d.kind.message().to_string(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn diagnostic_row_carries_payload() {
        let d = Diagnostic::with_sound(ErrorKind::WarningDuplicateSoundNumber, 4, -1);
        let row = DiagnosticRow::from(&d);
        assert_eq!(row.id, 22);
        assert_eq!(row.name, "Warning_DuplicateSoundNumber");
        assert_eq!(row.value.as_deref(), Some("4--1"));
        let plain = DiagnosticRow::from(&Diagnostic::new(ErrorKind::CorruptedSndFile));
        assert_eq!(plain.value, None);
    }
}
