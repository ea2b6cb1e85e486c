//! Spatial-Index (KD-Tree) für schnelle Linien-Abfragen.

use std::collections::BTreeMap;

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::Line;

/// Read-only Spatial-Index über den Mittelpunkten aller Linien.
///
/// Ein Segment mit Abstand `r` zum Suchpunkt hat seinen Mittelpunkt höchstens
/// `r + halbe Länge` entfernt. Die Abfrage wird daher um die größte halbe
/// Linienlänge erweitert und liefert eine Obermenge der Kandidaten.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    line_ids: Vec<u64>,
    max_half_length: f64,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            line_ids: Vec::new(),
            max_half_length: 0.0,
        }
    }

    /// Baut einen neuen Index aus den übergebenen Linien.
    pub fn from_lines(lines: &BTreeMap<u64, Line>) -> Self {
        let mut line_ids = Vec::with_capacity(lines.len());
        let mut entries = Vec::with_capacity(lines.len());
        let mut max_half_length: f64 = 0.0;

        for (id, line) in lines {
            let mid = line.midpoint();
            line_ids.push(*id);
            entries.push([mid.x, mid.y]);
            max_half_length = max_half_length.max(line.length() * 0.5);
        }

        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            line_ids,
            max_half_length,
        }
    }

    /// Gibt die Anzahl indexierter Linien zurück.
    pub fn len(&self) -> usize {
        self.line_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Linien im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.line_ids.is_empty()
    }

    /// Liefert die IDs aller Linien, die den Kreis um `query` berühren könnten.
    ///
    /// Das Ergebnis ist aufsteigend nach ID sortiert und muss vom Aufrufer
    /// exakt nachgefiltert werden.
    pub fn candidates(&self, query: DVec2, radius: f64) -> Vec<u64> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let reach = radius + self.max_half_length;
        let mut ids = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], reach * reach)
            .into_iter()
            .filter_map(|entry| self.line_ids.get(entry.item as usize).copied())
            .collect::<Vec<_>>();

        ids.sort_unstable();
        ids
    }
}
