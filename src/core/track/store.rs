//! TrackStore: geordneter Container aller Linien plus Spatial-Index.

use std::collections::BTreeMap;

use glam::DVec2;

use super::super::geometry::project_onto_segment;
use super::super::{Line, LineEnd, LineKind, SpatialIndex, TrackError};

/// Treffer einer Umkreis-Abfrage gegen die Strecke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearLine {
    /// ID der getroffenen Linie
    pub line_id: u64,
    /// Nächster Punkt auf dem Segment
    pub point: DVec2,
    /// Euklidischer Abstand zum Suchpunkt
    pub distance: f64,
    /// Gesetzt, wenn der nächste Punkt exakt ein Endpunkt der Linie ist
    pub endpoint: Option<LineEnd>,
    /// Art der getroffenen Linie
    pub kind: LineKind,
}

/// Einzige Quelle der Wahrheit für die Strecken-Geometrie.
///
/// Linien sind nach ID sortiert gespeichert (deterministische Iteration).
/// Mutationen sind crate-intern; von außen wird ausschließlich über
/// [`TrackWriter`](super::TrackWriter) geschrieben.
#[derive(Debug, Clone)]
pub struct TrackStore {
    lines: BTreeMap<u64, Line>,
    next_id: u64,
    spatial_index: SpatialIndex,
    index_dirty: bool,
}

impl Default for TrackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackStore {
    /// Erstellt einen leeren Store.
    pub fn new() -> Self {
        Self {
            lines: BTreeMap::new(),
            next_id: 1,
            spatial_index: SpatialIndex::empty(),
            index_dirty: false,
        }
    }

    /// Baut einen Store aus bereits vorhandenen Linien (z.B. aus einer Datei).
    pub fn from_lines(lines: impl IntoIterator<Item = Line>) -> Result<Self, TrackError> {
        let mut store = Self::new();
        for line in lines {
            store.insert_existing(line)?;
        }
        store.ensure_spatial_index();
        Ok(store)
    }

    /// Gibt die Anzahl der Linien zurück
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Gibt `true` zurück, wenn die Strecke leer ist.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Findet eine Linie per ID
    pub fn line(&self, id: u64) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Prüft ob eine Linie existiert
    pub fn contains(&self, id: u64) -> bool {
        self.lines.contains_key(&id)
    }

    /// Iterator über alle Linien in ID-Reihenfolge.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// ID, die die nächste eingefügte Linie erhält.
    pub fn next_line_id(&self) -> u64 {
        self.next_id
    }

    /// Findet alle Linien, deren Segment höchstens `radius` von `point` entfernt ist.
    ///
    /// Ergebnis in ID-Reihenfolge; mutiert nichts. Während einer offenen
    /// Schreib-Transaktion (Index veraltet) wird linear gesucht.
    pub fn query_near(&self, point: DVec2, radius: f64) -> Vec<NearLine> {
        if radius.is_sign_negative() {
            return Vec::new();
        }

        let hit = |line: &Line| -> Option<NearLine> {
            let projection = project_onto_segment(point, line.p1(), line.p2());
            let distance = point.distance(projection.point);
            if distance > radius {
                return None;
            }
            let endpoint = if projection.point == line.p1() {
                Some(LineEnd::Start)
            } else if projection.point == line.p2() {
                Some(LineEnd::End)
            } else {
                None
            };
            Some(NearLine {
                line_id: line.id,
                point: projection.point,
                distance,
                endpoint,
                kind: line.kind,
            })
        };

        if self.index_dirty {
            self.lines.values().filter_map(hit).collect()
        } else {
            self.spatial_index
                .candidates(point, radius)
                .into_iter()
                .filter_map(|id| self.lines.get(&id))
                .filter_map(hit)
                .collect()
        }
    }

    /// Fügt eine neue Linie mit frischer ID ein.
    pub(crate) fn insert_new(
        &mut self,
        kind: LineKind,
        p1: DVec2,
        p2: DVec2,
        flipped: bool,
    ) -> Result<Line, TrackError> {
        let id = self.next_id;
        if self.lines.contains_key(&id) {
            return Err(TrackError::DuplicateLineId(id));
        }
        self.next_id = id.checked_add(1).ok_or(TrackError::IdOverflow(id))?;
        // Deko-Linien haben keine Physik-Orientierung
        let flipped = flipped && kind.is_physics();
        let line = Line::new(id, kind, p1, p2, flipped);
        self.lines.insert(id, line.clone());
        self.index_dirty = true;
        Ok(line)
    }

    /// Fügt eine Linie mit ihrer bestehenden ID wieder ein.
    pub(crate) fn insert_existing(&mut self, line: Line) -> Result<(), TrackError> {
        if self.lines.contains_key(&line.id) {
            return Err(TrackError::DuplicateLineId(line.id));
        }
        // IDs werden nie wiederverwendet
        let following = line.id.checked_add(1).ok_or(TrackError::IdOverflow(line.id))?;
        self.next_id = self.next_id.max(following);
        self.lines.insert(line.id, line);
        self.index_dirty = true;
        Ok(())
    }

    /// Entfernt eine Linie.
    pub(crate) fn remove(&mut self, id: u64) -> Result<Line, TrackError> {
        let removed = self.lines.remove(&id).ok_or(TrackError::LineNotFound(id))?;
        self.index_dirty = true;
        Ok(removed)
    }

    /// Ersetzt eine bestehende Linie (gleiche ID), gibt die alte zurück.
    pub(crate) fn replace(&mut self, line: Line) -> Result<Line, TrackError> {
        let slot = self
            .lines
            .get_mut(&line.id)
            .ok_or(TrackError::LineNotFound(line.id))?;
        let before = std::mem::replace(slot, line);
        self.index_dirty = true;
        Ok(before)
    }

    /// Baut den Spatial-Index neu auf, falls seit dem letzten Aufbau geschrieben wurde.
    pub(crate) fn ensure_spatial_index(&mut self) {
        if self.index_dirty {
            self.spatial_index = SpatialIndex::from_lines(&self.lines);
            self.index_dirty = false;
        }
    }

    /// Ist der Spatial-Index veraltet?
    pub fn index_dirty(&self) -> bool {
        self.index_dirty
    }
}
