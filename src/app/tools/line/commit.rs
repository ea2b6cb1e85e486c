//! Commit eines Drags: Linie anlegen und Gelenke verlängern.

use super::state::{DragSession, LineTool};
use crate::app::ToolContext;
use crate::core::{Extension, Line, LineEnd, TrackError, TrackWriter};

impl LineTool {
    /// Schreibt die Linie als eine Undo-Aktion in die Strecke.
    ///
    /// Gibt die IDs aller geänderten Linien zurück (neue Linie zuerst).
    /// Schlägt der Writer fehl, bleibt die Strecke unverändert; eine halb
    /// geschriebene Aktion wird beim Drop des Writers zurückgerollt.
    pub(crate) fn commit(
        &self,
        ctx: &ToolContext<'_>,
        session: &DragSession,
    ) -> Result<Vec<u64>, TrackError> {
        let mut writer = ctx.track.create_writer()?;
        writer.begin_action()?;

        let line = writer.insert_line(session.kind, session.start, session.end, session.flipped)?;
        let mut touched = vec![line.id];
        if line.kind.is_physics() {
            touched.extend(join_ends(&mut writer, &line, session)?);
        }

        writer.end_action()?;
        log::info!(
            "Linie {} erstellt ({:?}, {:.3} lang, flipped={})",
            line.id,
            line.kind,
            line.length(),
            line.flipped()
        );
        Ok(touched)
    }
}

/// Verlängert Gelenke zu Physik-Linien, deren Endpunkt exakt getroffen wurde.
///
/// Gibt die IDs der geänderten Nachbarn zurück.
fn join_ends(
    writer: &mut TrackWriter<'_>,
    line: &Line,
    session: &DragSession,
) -> Result<Vec<u64>, TrackError> {
    let mut own = Extension::None;
    let mut neighbours = Vec::new();

    for (end, hit) in [
        (LineEnd::Start, session.start_hit),
        (LineEnd::End, session.end_hit),
    ] {
        let Some(hit) = hit else { continue };
        let Some(neighbour_end) = hit.endpoint else {
            continue;
        };
        if !hit.kind.is_physics() {
            continue;
        }
        // Nachbar kann seit dem Snap entfernt oder verschoben worden sein
        let Some(neighbour) = writer.line(hit.line_id).cloned() else {
            continue;
        };
        if neighbour.endpoint(neighbour_end) != line.endpoint(end) {
            continue;
        }

        writer.set_extension(neighbour.id, neighbour.extension.with(neighbour_end))?;
        own = own.with(end);
        if !neighbours.contains(&neighbour.id) {
            neighbours.push(neighbour.id);
        }
    }

    if own != Extension::None {
        writer.set_extension(line.id, own)?;
        log::debug!("Linie {} verlängert: {:?}", line.id, own);
    }
    Ok(neighbours)
}
