//! Serde-Records des Datei-Formats und die Umrechnung in Core-Linien.

use anyhow::{bail, Result};
use glam::DVec2;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::{Extension, Line, LineKind};

/// Formatversion, die beim Schreiben eingetragen wird.
pub const TRACK_FILE_VERSION: &str = "6.2";

/// Startposition des Fahrers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartPosition {
    pub x: f64,
    pub y: f64,
}

/// Gesamte Strecken-Datei.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackFile {
    /// Anzeigename der Strecke
    #[serde(default)]
    pub label: String,
    /// Formatversion
    #[serde(default = "default_version")]
    pub version: String,
    /// Optionale Startposition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<StartPosition>,
    /// Alle Linien
    #[serde(default)]
    pub lines: Vec<LineRecord>,
}

fn default_version() -> String {
    TRACK_FILE_VERSION.to_string()
}

/// Eine Linie im Datei-Format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub id: u64,
    /// 0 = Standard, 1 = Beschleunigung, 2 = Deko
    #[serde(rename = "type")]
    pub kind: u8,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Bitfeld: 1 = links, 2 = rechts
    #[serde(default)]
    pub extended: u8,
    #[serde(default, deserialize_with = "flexible_flag")]
    pub flipped: bool,
    #[serde(default, deserialize_with = "flexible_flag")]
    pub left_extended: bool,
    #[serde(default, deserialize_with = "flexible_flag")]
    pub right_extended: bool,
}

/// Akzeptiert `true`/`false`, Zahlen (≠ 0 = wahr) und `null` (= falsch).
fn flexible_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(false),
        Some(serde_json::Value::Bool(value)) => Ok(value),
        Some(serde_json::Value::Number(number)) => number
            .as_f64()
            .map(|value| value != 0.0)
            .ok_or_else(|| D::Error::custom(format!("Flag-Zahl nicht darstellbar: {}", number))),
        Some(other) => Err(D::Error::custom(format!(
            "Flag erwartet Bool oder Zahl, gefunden: {}",
            other
        ))),
    }
}

fn kind_from_code(code: u8) -> Option<LineKind> {
    match code {
        0 => Some(LineKind::Standard),
        1 => Some(LineKind::Accelerator),
        2 => Some(LineKind::Scenery),
        _ => None,
    }
}

fn kind_code(kind: LineKind) -> u8 {
    match kind {
        LineKind::Standard => 0,
        LineKind::Accelerator => 1,
        LineKind::Scenery => 2,
    }
}

impl LineRecord {
    /// Baut den Record einer Core-Linie.
    pub fn from_line(line: &Line) -> Self {
        Self {
            id: line.id,
            kind: kind_code(line.kind),
            x1: line.p1().x,
            y1: line.p1().y,
            x2: line.p2().x,
            y2: line.p2().y,
            extended: line.extension.bits(),
            flipped: line.flipped(),
            left_extended: line.extension.left(),
            right_extended: line.extension.right(),
        }
    }

    /// Wandelt den Record in eine Core-Linie um.
    ///
    /// Die Verlängerung ist die Vereinigung aus Bitfeld und Einzel-Flags.
    pub fn to_line(&self) -> Result<Line> {
        let Some(kind) = kind_from_code(self.kind) else {
            bail!("Linie {}: unbekannter Linientyp {}", self.id, self.kind);
        };
        let bits = Extension::from_bits(self.extended);
        let extension = Extension::from_flags(
            bits.left() || self.left_extended,
            bits.right() || self.right_extended,
        );
        Ok(Line::new(
            self.id,
            kind,
            DVec2::new(self.x1, self.y1),
            DVec2::new(self.x2, self.y2),
            self.flipped,
        )
        .with_extension(extension))
    }
}
