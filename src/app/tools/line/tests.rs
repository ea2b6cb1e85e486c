use glam::DVec2;

use super::super::{Tool, ToolKey, ToolOutcome};
use super::state::LineTool;
use crate::app::{InputState, RenderSignal, ToolContext};
use crate::core::{Extension, LineKind, Track, TrackError, WriterPolicy};
use crate::shared::EditorOptions;

struct Fixture {
    track: Track,
    options: EditorOptions,
    render: RenderSignal,
    input: InputState,
    kind: LineKind,
}

impl Fixture {
    fn new() -> Self {
        Self::with_track(Track::default())
    }

    fn with_track(track: Track) -> Self {
        Self {
            track,
            options: EditorOptions {
                snap_radius_px: 0.5,
                ..EditorOptions::default()
            },
            render: RenderSignal::default(),
            input: InputState::default(),
            kind: LineKind::Standard,
        }
    }

    fn ctx(&self) -> ToolContext<'_> {
        ToolContext {
            track: &self.track,
            options: &self.options,
            input: self.input,
            zoom: 1.0,
            line_kind: self.kind,
            render: &self.render,
        }
    }

    fn drag(&self, tool: &mut LineTool, from: DVec2, to: DVec2) -> ToolOutcome {
        let ctx = self.ctx();
        tool.on_pointer_down(&ctx, from);
        tool.on_pointer_move(&ctx, to);
        tool.on_pointer_up(&ctx, to)
    }
}

#[test]
fn test_tiny_drag_creates_nothing() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();

    let outcome = fx.drag(&mut tool, DVec2::ZERO, DVec2::new(0.005, 0.004));
    assert_eq!(outcome, ToolOutcome::Discarded);
    assert_eq!(fx.track.line_count(), 0);
    assert_eq!(fx.track.undo_len(), 0);
    assert!(!tool.is_active());
}

#[test]
fn test_release_without_move_is_discarded() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();
    let ctx = fx.ctx();

    tool.on_pointer_down(&ctx, DVec2::ZERO);
    assert_eq!(tool.on_pointer_up(&ctx, DVec2::new(10.0, 0.0)), ToolOutcome::Discarded);
    assert_eq!(fx.track.line_count(), 0);
    assert_eq!(fx.track.undo_len(), 0);
    assert!(!tool.is_active());
}

#[test]
fn test_release_far_away_after_tiny_move_is_discarded() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();
    let ctx = fx.ctx();

    tool.on_pointer_down(&ctx, DVec2::ZERO);
    tool.on_pointer_move(&ctx, DVec2::new(0.005, 0.005));
    assert_eq!(tool.on_pointer_up(&ctx, DVec2::new(10.0, 0.0)), ToolOutcome::Discarded);
    assert_eq!(fx.track.line_count(), 0);
    assert_eq!(fx.track.undo_len(), 0);
}

#[test]
fn test_line_ends_at_last_moved_position() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();
    let ctx = fx.ctx();

    tool.on_pointer_down(&ctx, DVec2::ZERO);
    tool.on_pointer_move(&ctx, DVec2::new(6.0, 2.0));
    let outcome = tool.on_pointer_up(&ctx, DVec2::new(30.0, -9.0));
    assert_eq!(outcome, ToolOutcome::Committed(vec![1]));

    let reader = fx.track.create_reader();
    assert_eq!(reader.line(1).map(|l| l.p2()), Some(DVec2::new(6.0, 2.0)));
}

#[test]
fn test_start_snapped_only_when_point_moved() {
    let fx = Fixture::new();
    {
        let mut writer = fx.track.create_writer().expect("Writer");
        writer
            .insert_line(LineKind::Standard, DVec2::new(10.0, 0.0), DVec2::new(20.0, 5.0), false)
            .expect("Linie einfügen");
    }
    let mut tool = LineTool::new();
    let ctx = fx.ctx();

    // Exakt auf dem Endpunkt: Position bleibt gleich
    tool.on_pointer_down(&ctx, DVec2::new(10.0, 0.0));
    assert!(!tool.start_snapped());
    tool.stop();

    tool.on_pointer_down(&ctx, DVec2::new(10.0, 0.2));
    assert!(tool.start_snapped());
    tool.stop();

    tool.on_pointer_down(&ctx, DVec2::new(0.0, -30.0));
    assert!(!tool.start_snapped());
}

#[test]
fn test_drag_creates_unflipped_line() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();

    let outcome = fx.drag(&mut tool, DVec2::ZERO, DVec2::new(10.0, 0.0));
    assert_eq!(outcome, ToolOutcome::Committed(vec![1]));

    let reader = fx.track.create_reader();
    let line = reader.line(1).expect("Linie 1 vorhanden");
    assert_eq!(line.kind, LineKind::Standard);
    assert!(!line.flipped());
    assert_eq!(line.p1(), DVec2::ZERO);
    assert_eq!(line.p2(), DVec2::new(10.0, 0.0));
    drop(reader);
    assert_eq!(fx.track.undo_len(), 1);
}

#[test]
fn test_end_snaps_to_existing_endpoint() {
    let fx = Fixture::new();
    {
        let mut writer = fx.track.create_writer().expect("Writer");
        writer
            .insert_line(
                LineKind::Standard,
                DVec2::new(10.0, 0.02),
                DVec2::new(20.0, 5.0),
                false,
            )
            .expect("Linie einfügen");
    }
    let mut tool = LineTool::new();

    fx.drag(&mut tool, DVec2::new(-5.0, 0.0), DVec2::new(10.0, 0.0));

    let reader = fx.track.create_reader();
    let line = reader.line(2).expect("neue Linie");
    assert_eq!(line.p2(), DVec2::new(10.0, 0.02));
}

#[test]
fn test_snapping_disabled_keeps_raw_points() {
    let mut fx = Fixture::new();
    fx.options.snap_enabled = false;
    {
        let mut writer = fx.track.create_writer().expect("Writer");
        writer
            .insert_line(LineKind::Standard, DVec2::new(10.0, 0.02), DVec2::new(20.0, 5.0), false)
            .expect("Linie einfügen");
    }
    let mut tool = LineTool::new();

    fx.drag(&mut tool, DVec2::new(-5.0, 0.0), DVec2::new(10.0, 0.0));
    let reader = fx.track.create_reader();
    assert_eq!(reader.line(2).map(|l| l.p2()), Some(DVec2::new(10.0, 0.0)));
}

#[test]
fn test_flip_key_applies_to_next_line_only() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();

    assert!(tool.on_key_down(&fx.ctx(), ToolKey::FlipLine));
    assert!(tool.flip_pending());
    fx.drag(&mut tool, DVec2::ZERO, DVec2::new(5.0, 0.0));
    assert!(!tool.flip_pending());
    fx.drag(&mut tool, DVec2::new(0.0, 10.0), DVec2::new(5.0, 10.0));

    let reader = fx.track.create_reader();
    assert_eq!(reader.line(1).map(|l| l.flipped()), Some(true));
    assert_eq!(reader.line(2).map(|l| l.flipped()), Some(false));
}

#[test]
fn test_flip_key_pressed_twice_cancels() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();

    tool.on_key_down(&fx.ctx(), ToolKey::FlipLine);
    tool.on_key_down(&fx.ctx(), ToolKey::FlipLine);
    assert!(!tool.flip_pending());
}

#[test]
fn test_flip_modifier_combines_with_pending_flip() {
    let mut fx = Fixture::new();
    fx.input.flip_line = true;
    let mut tool = LineTool::new();

    fx.drag(&mut tool, DVec2::ZERO, DVec2::new(5.0, 0.0));
    tool.on_key_down(&fx.ctx(), ToolKey::FlipLine);
    fx.drag(&mut tool, DVec2::new(0.0, 10.0), DVec2::new(5.0, 10.0));

    let reader = fx.track.create_reader();
    assert_eq!(reader.line(1).map(|l| l.flipped()), Some(true));
    assert_eq!(reader.line(2).map(|l| l.flipped()), Some(false));
}

#[test]
fn test_scenery_line_is_never_flipped() {
    let mut fx = Fixture::new();
    fx.kind = LineKind::Scenery;
    fx.input.flip_line = true;
    let mut tool = LineTool::new();

    fx.drag(&mut tool, DVec2::ZERO, DVec2::new(5.0, 0.0));
    let reader = fx.track.create_reader();
    assert_eq!(reader.line(1).map(|l| l.flipped()), Some(false));
}

#[test]
fn test_angle_modifier_snaps_direction() {
    let mut fx = Fixture::new();
    fx.input.angle_snap = true;
    let mut tool = LineTool::new();

    fx.drag(&mut tool, DVec2::ZERO, DVec2::new(10.0, 1.0));
    let reader = fx.track.create_reader();
    let line = reader.line(1).expect("Linie 1");
    assert!(line.p2().y.abs() < 1e-9);
    assert!((line.length() - 10.0f64.hypot(1.0)).abs() < 1e-9);
}

#[test]
fn test_preview_follows_pointer() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();
    let ctx = fx.ctx();

    assert!(tool.preview(&fx.options).is_none());
    tool.on_pointer_down(&ctx, DVec2::ZERO);
    let preview = tool.preview(&fx.options).expect("Vorschau");
    assert!(preview.too_short);

    tool.on_pointer_move(&ctx, DVec2::new(3.0, 4.0));
    let preview = tool.preview(&fx.options).expect("Vorschau");
    assert_eq!(preview.end, DVec2::new(3.0, 4.0));
    assert!(!preview.too_short);
    assert!(fx.render.take());
}

#[test]
fn test_escape_cancels_drag() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();
    let ctx = fx.ctx();

    tool.on_pointer_down(&ctx, DVec2::ZERO);
    assert!(tool.on_key_down(&ctx, ToolKey::Escape));
    assert_eq!(tool.on_pointer_up(&ctx, DVec2::new(10.0, 0.0)), ToolOutcome::Idle);
    assert_eq!(fx.track.line_count(), 0);

    // Ohne Drag wird Escape nicht verarbeitet
    assert!(!tool.on_key_down(&ctx, ToolKey::Escape));
    assert!(!tool.on_key_down(&ctx, ToolKey::Left));
}

#[test]
fn test_contended_writer_aborts_and_resets() {
    let fx = Fixture::with_track(Track::new(WriterPolicy::FailOnContention));
    let mut tool = LineTool::new();
    let ctx = fx.ctx();

    tool.on_pointer_down(&ctx, DVec2::ZERO);
    tool.on_pointer_move(&ctx, DVec2::new(10.0, 0.0));
    let reader = fx.track.create_reader();
    let outcome = tool.on_pointer_up(&ctx, DVec2::new(10.0, 0.0));
    drop(reader);

    assert_eq!(outcome, ToolOutcome::Aborted(TrackError::WriterContended));
    assert!(!tool.is_active());
    assert_eq!(fx.track.line_count(), 0);
    assert_eq!(fx.track.undo_len(), 0);
}

#[test]
fn test_joint_extends_both_lines_in_one_action() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();

    fx.drag(&mut tool, DVec2::ZERO, DVec2::new(10.0, 0.0));
    let outcome = fx.drag(&mut tool, DVec2::new(10.0, 0.0), DVec2::new(20.0, 5.0));
    assert_eq!(outcome, ToolOutcome::Committed(vec![2, 1]));

    {
        let reader = fx.track.create_reader();
        assert_eq!(reader.line(1).map(|l| l.extension), Some(Extension::Right));
        assert_eq!(reader.line(2).map(|l| l.extension), Some(Extension::Left));
    }
    assert_eq!(fx.track.undo_len(), 2);

    assert!(fx.track.undo().expect("Undo"));
    let reader = fx.track.create_reader();
    assert_eq!(reader.line_count(), 1);
    assert_eq!(reader.line(1).map(|l| l.extension), Some(Extension::None));
}

#[test]
fn test_scenery_neighbour_is_not_joined() {
    let mut fx = Fixture::new();
    {
        let mut writer = fx.track.create_writer().expect("Writer");
        writer
            .insert_line(LineKind::Scenery, DVec2::ZERO, DVec2::new(10.0, 0.0), false)
            .expect("Linie einfügen");
    }
    fx.kind = LineKind::Standard;
    let mut tool = LineTool::new();

    fx.drag(&mut tool, DVec2::new(10.0, 0.0), DVec2::new(20.0, 5.0));
    let reader = fx.track.create_reader();
    assert_eq!(reader.line(1).map(|l| l.extension), Some(Extension::None));
    assert_eq!(reader.line(2).map(|l| l.extension), Some(Extension::None));
}

#[test]
fn test_end_never_snaps_onto_start() {
    let fx = Fixture::new();
    let mut tool = LineTool::new();
    fx.drag(&mut tool, DVec2::ZERO, DVec2::new(10.0, 0.0));

    // Start rastet auf (10,0); Ende nahe daran darf nicht auf den Start fallen
    let outcome = fx.drag(&mut tool, DVec2::new(10.0, 0.0), DVec2::new(10.0, 0.3));
    assert!(matches!(outcome, ToolOutcome::Committed(_)));
    let reader = fx.track.create_reader();
    assert_eq!(reader.line(2).map(|l| l.p2()), Some(DVec2::new(10.0, 0.3)));
}
