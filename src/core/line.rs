//! Repräsentiert ein gezeichnetes Liniensegment der Strecke.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Art der Linie, steuert Physik-Interaktion und Darstellung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineKind {
    /// Normale Fahrlinie
    #[default]
    Standard,
    /// Beschleunigungslinie
    Accelerator,
    /// Reine Deko-Linie ohne Physik
    Scenery,
}

impl LineKind {
    /// Gibt `true` zurück, wenn die Linie an der Physik teilnimmt.
    pub fn is_physics(self) -> bool {
        !matches!(self, LineKind::Scenery)
    }
}

/// Welches Ende einer Linie gemeint ist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnd {
    /// Startpunkt (`p1`, "links")
    Start,
    /// Endpunkt (`p2`, "rechts")
    End,
}

/// Verlängerungszustand der Linienenden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Extension {
    /// Kein Ende verlängert
    #[default]
    None,
    /// Nur `p1` verlängert
    Left,
    /// Nur `p2` verlängert
    Right,
    /// Beide Enden verlängert
    Both,
}

impl Extension {
    /// Baut den Zustand aus den Einzel-Flags auf.
    pub fn from_flags(left: bool, right: bool) -> Self {
        match (left, right) {
            (false, false) => Extension::None,
            (true, false) => Extension::Left,
            (false, true) => Extension::Right,
            (true, true) => Extension::Both,
        }
    }

    /// Bitfeld-Darstellung (1 = links, 2 = rechts).
    pub fn bits(self) -> u8 {
        u8::from(self.left()) | (u8::from(self.right()) << 1)
    }

    /// Umkehrung von [`Extension::bits`]; unbekannte Bits werden ignoriert.
    pub fn from_bits(bits: u8) -> Self {
        Self::from_flags(bits & 1 != 0, bits & 2 != 0)
    }

    /// Ist `p1` verlängert?
    pub fn left(self) -> bool {
        matches!(self, Extension::Left | Extension::Both)
    }

    /// Ist `p2` verlängert?
    pub fn right(self) -> bool {
        matches!(self, Extension::Right | Extension::Both)
    }

    /// Gibt den Zustand mit zusätzlich verlängertem `end` zurück.
    pub fn with(self, end: LineEnd) -> Self {
        match end {
            LineEnd::Start => Self::from_flags(true, self.right()),
            LineEnd::End => Self::from_flags(self.left(), true),
        }
    }
}

/// Gecachte, aus den Endpunkten abgeleitete Konstanten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineConstants {
    /// `p2 - p1`
    pub diff: DVec2,
    /// Länge des Segments
    pub length: f64,
    /// Kehrwert der Länge (0.0 bei entartetem Segment)
    pub inv_length: f64,
    /// Steigung `dy/dx` (unendlich bei senkrechter Linie, 0.0 bei entartetem Segment)
    pub slope: f64,
    /// Einheits-Normale, bei Physik-Flip invertiert
    pub normal: DVec2,
}

impl LineConstants {
    fn compute(p1: DVec2, p2: DVec2, flipped: bool) -> Self {
        let diff = p2 - p1;
        let length = diff.length();
        let inv_length = if length > 0.0 { 1.0 / length } else { 0.0 };
        let slope = if length > 0.0 { diff.y / diff.x } else { 0.0 };
        let mut normal = DVec2::new(diff.y, -diff.x) * inv_length;
        if flipped {
            normal = -normal;
        }
        Self {
            diff,
            length,
            inv_length,
            slope,
            normal,
        }
    }
}

/// Ein Liniensegment der Strecke.
///
/// Endpunkte und `flipped` sind nur über Methoden änderbar, damit die
/// abgeleiteten Konstanten immer zu den aktuellen Endpunkten passen.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Stabile ID, wird beim Einfügen vergeben
    pub id: u64,
    /// Linienart
    pub kind: LineKind,
    /// Verlängerungszustand der Enden
    pub extension: Extension,
    p1: DVec2,
    p2: DVec2,
    flipped: bool,
    constants: LineConstants,
}

impl Line {
    /// Erstellt eine neue Linie und berechnet die Konstanten.
    pub fn new(id: u64, kind: LineKind, p1: DVec2, p2: DVec2, flipped: bool) -> Self {
        Self {
            id,
            kind,
            extension: Extension::None,
            p1,
            p2,
            flipped,
            constants: LineConstants::compute(p1, p2, flipped && kind.is_physics()),
        }
    }

    /// Setzt den Verlängerungszustand (Builder-Stil, z.B. beim Laden).
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension = extension;
        self
    }

    /// Startpunkt
    pub fn p1(&self) -> DVec2 {
        self.p1
    }

    /// Endpunkt
    pub fn p2(&self) -> DVec2 {
        self.p2
    }

    /// Position des angegebenen Endes.
    pub fn endpoint(&self, end: LineEnd) -> DVec2 {
        match end {
            LineEnd::Start => self.p1,
            LineEnd::End => self.p2,
        }
    }

    /// Gespeichertes Flip-Flag (bleibt auch bei Deko-Linien erhalten)
    pub fn flipped(&self) -> bool {
        self.flipped
    }

    /// Wirksame Orientierung für die Physik; Deko-Linien sind nie geflippt.
    pub fn physics_flipped(&self) -> bool {
        self.flipped && self.kind.is_physics()
    }

    /// Gecachte Konstanten
    pub fn constants(&self) -> &LineConstants {
        &self.constants
    }

    /// Länge des Segments (gecacht).
    pub fn length(&self) -> f64 {
        self.constants.length
    }

    /// Mittelpunkt des Segments.
    pub fn midpoint(&self) -> DVec2 {
        (self.p1 + self.p2) * 0.5
    }

    /// Setzt neue Endpunkte und berechnet die Konstanten neu.
    pub fn set_endpoints(&mut self, p1: DVec2, p2: DVec2) {
        self.p1 = p1;
        self.p2 = p2;
        self.recompute();
    }

    /// Setzt die Orientierung und berechnet die Normale neu.
    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
        self.recompute();
    }

    /// Prüft, ob die gecachten Konstanten zu den Endpunkten passen.
    pub fn constants_consistent(&self) -> bool {
        let fresh = LineConstants::compute(self.p1, self.p2, self.physics_flipped());
        // slope kann für senkrechte Linien unendlich sein, PartialEq deckt das ab
        fresh == self.constants
    }

    fn recompute(&mut self) {
        self.constants = LineConstants::compute(self.p1, self.p2, self.physics_flipped());
    }
}
