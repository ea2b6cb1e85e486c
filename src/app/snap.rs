//! SnapEngine: reine Abfrage-Schicht für Punkt- und Winkel-Snapping.

use glam::DVec2;

use crate::core::{LineEnd, LineKind, TrackStore};
use crate::shared::EditorOptions;

/// Worauf ein Punkt eingerastet ist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHit {
    /// Eingerastete Weltposition
    pub point: DVec2,
    /// Linie, die den Punkt geliefert hat
    pub line_id: u64,
    /// Gesetzt, wenn exakt ein Endpunkt der Linie getroffen wurde
    pub endpoint: Option<LineEnd>,
    /// Art der getroffenen Linie
    pub kind: LineKind,
    /// Abstand vom Suchpunkt
    pub distance: f64,
}

/// Ergebnis eines Snap-Versuchs: Treffer oder unveränderter Rohpunkt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapResult {
    /// Auf bestehende Geometrie eingerastet
    Snapped(SnapHit),
    /// Kein Kandidat im Radius, Rohpunkt verwenden
    Free(DVec2),
}

impl SnapResult {
    /// Gibt die Welt-Position des Ergebnisses zurück.
    pub fn position(&self) -> DVec2 {
        match self {
            SnapResult::Snapped(hit) => hit.point,
            SnapResult::Free(pos) => *pos,
        }
    }

    /// Treffer, falls eingerastet.
    pub fn hit(&self) -> Option<&SnapHit> {
        match self {
            SnapResult::Snapped(hit) => Some(hit),
            SnapResult::Free(_) => None,
        }
    }
}

/// Snap-Konfiguration, abgeleitet aus den Editor-Optionen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapEngine {
    /// Suchradius in Screen-Pixeln
    pub radius_px: f64,
    /// Winkel-Raster in Grad
    pub angle_increment_deg: f64,
}

impl SnapEngine {
    /// Erstellt eine Engine mit den Werten aus `options`.
    pub fn from_options(options: &EditorOptions) -> Self {
        Self {
            radius_px: options.snap_radius_px,
            angle_increment_deg: options.angle_snap_degrees,
        }
    }

    /// Rechnet den Pixel-Radius bei gegebenem Zoom in Welteinheiten um.
    pub fn radius_world(&self, zoom: f64) -> f64 {
        self.radius_px / zoom.max(f64::EPSILON)
    }

    /// Sucht den besten Einrast-Punkt auf bestehender Geometrie.
    ///
    /// Kandidat ist der nächste Punkt jedes Segments (geclampte Projektion).
    /// Rangfolge: kleinster Abstand, bei Gleichstand die kleinere Linien-ID.
    pub fn snap_point(&self, track: &TrackStore, query: DVec2, zoom: f64) -> SnapResult {
        let radius = self.radius_world(zoom);
        let best = track
            .query_near(query, radius)
            .into_iter()
            .min_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then(a.line_id.cmp(&b.line_id))
            });

        match best {
            Some(near) if near.distance <= radius => {
                log::debug!(
                    "Snap auf Linie {} bei ({:.3}, {:.3})",
                    near.line_id,
                    near.point.x,
                    near.point.y
                );
                SnapResult::Snapped(SnapHit {
                    point: near.point,
                    line_id: near.line_id,
                    endpoint: near.endpoint,
                    kind: near.kind,
                    distance: near.distance,
                })
            }
            _ => SnapResult::Free(query),
        }
    }

    /// Rastet die Richtung `start → end` auf das konfigurierte Winkel-Raster.
    pub fn snap_to_degrees(&self, start: DVec2, end: DVec2) -> DVec2 {
        snap_to_degrees(start, end, self.angle_increment_deg)
    }
}

/// Rundet die Richtung `start → end` auf das nächste Vielfache von `increment_deg`.
///
/// Der Abstand zu `start` bleibt erhalten. Bei `start == end` oder
/// ungültigem Raster wird `end` unverändert zurückgegeben.
pub fn snap_to_degrees(start: DVec2, end: DVec2, increment_deg: f64) -> DVec2 {
    let diff = end - start;
    let length = diff.length();
    if length <= 0.0 || increment_deg.is_nan() || increment_deg <= 0.0 {
        return end;
    }

    let increment = increment_deg.to_radians();
    let angle = diff.y.atan2(diff.x);
    let snapped = (angle / increment).round() * increment;
    start + DVec2::new(snapped.cos(), snapped.sin()) * length
}
