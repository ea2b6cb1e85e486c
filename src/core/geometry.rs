//! Geometrie-Grundfunktionen für Liniensegmente (Abstand, Projektion, Schnitt).

use glam::DVec2;

/// Ergebnis einer Projektion auf ein Segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Nächster Punkt auf dem Segment (geclampt, nicht die unendliche Gerade)
    pub point: DVec2,
    /// Segment-Parameter im Bereich `0.0..=1.0` (0 = p1, 1 = p2)
    pub t: f64,
}

/// Projiziert `query` auf das Segment `p1..p2`.
///
/// Liegt die Projektion vor `p1` bzw. hinter `p2`, wird exakt der Endpunkt
/// zurückgegeben. Bei entartetem Segment (p1 == p2) ist das Ergebnis `p1`.
pub fn project_onto_segment(query: DVec2, p1: DVec2, p2: DVec2) -> SegmentProjection {
    let diff = p2 - p1;
    let len_sq = diff.length_squared();
    if len_sq <= f64::EPSILON {
        return SegmentProjection { point: p1, t: 0.0 };
    }

    let t = (query - p1).dot(diff) / len_sq;
    if t <= 0.0 {
        SegmentProjection { point: p1, t: 0.0 }
    } else if t >= 1.0 {
        SegmentProjection { point: p2, t: 1.0 }
    } else {
        SegmentProjection {
            point: p1 + diff * t,
            t,
        }
    }
}

/// Euklidischer Abstand von `query` zum Segment `p1..p2`.
pub fn distance_to_segment(query: DVec2, p1: DVec2, p2: DVec2) -> f64 {
    query.distance(project_onto_segment(query, p1, p2).point)
}

/// Schnittpunkt zweier Segmente, falls vorhanden (parallele Segmente → `None`).
pub fn segment_intersection(a1: DVec2, a2: DVec2, b1: DVec2, b2: DVec2) -> Option<DVec2> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.perp_dot(s);
    if denom.abs() <= f64::EPSILON {
        return None;
    }

    let qp = b1 - a1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1 + r * t)
    } else {
        None
    }
}

/// Manhattan-Länge eines Vektors (`|x| + |y|`), genutzt für die Mindestlängen-Prüfung.
pub fn manhattan_length(v: DVec2) -> f64 {
    v.x.abs() + v.y.abs()
}
