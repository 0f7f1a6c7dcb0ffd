#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// OUTLINE
// =============================================================

#[test]
fn outline_of_fewer_than_two_points_is_empty() {
    assert!(stroke_outline(&[], 4.0).is_empty());
    assert!(stroke_outline(&[pt(3.0, 3.0)], 4.0).is_empty());
}

#[test]
fn outline_has_two_points_per_sample() {
    let samples = [pt(0.0, 0.0), pt(10.0, 0.0), pt(20.0, 0.0)];
    let outline = stroke_outline(&samples, 4.0);
    assert_eq!(outline.len(), 6);
}

#[test]
fn horizontal_stroke_offsets_perpendicular_at_half_size() {
    // Travel along +x; perpendicular is (0, 1), half-size 2.
    let samples = [pt(0.0, 0.0), pt(10.0, 0.0)];
    let outline = stroke_outline(&samples, 4.0);
    assert_eq!(outline[0], pt(0.0, 2.0));
    assert_eq!(outline[1], pt(10.0, 2.0));
    // Return side, reversed.
    assert_eq!(outline[2], pt(10.0, -2.0));
    assert_eq!(outline[3], pt(0.0, -2.0));
}

#[test]
fn coincident_samples_reuse_previous_direction() {
    let samples = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 0.0)];
    let outline = stroke_outline(&samples, 4.0);
    // The repeated sample keeps the (0, 1) perpendicular from the first leg.
    assert_eq!(outline[1], pt(10.0, 2.0));
    assert_eq!(outline[2], pt(10.0, 2.0));
}

// =============================================================
// PATH SMOOTHING
// =============================================================

#[test]
fn short_outline_yields_empty_path() {
    assert!(outline_path(&[]).is_empty());
    assert!(outline_path(&[pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)]).is_empty());
}

#[test]
fn path_starts_at_first_point_and_closes() {
    let outline = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
    let path = outline_path(&outline);
    assert_eq!(path.first(), Some(&PathCommand::MoveTo(pt(0.0, 0.0))));
    assert_eq!(path.last(), Some(&PathCommand::Close));
}

#[test]
fn quadratic_segments_end_at_midpoints() {
    let outline = [pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)];
    let path = outline_path(&outline);
    assert_eq!(
        path[1],
        PathCommand::QuadTo { ctrl: pt(10.0, 0.0), to: pt(10.0, 5.0) }
    );
    assert_eq!(
        path[2],
        PathCommand::QuadTo { ctrl: pt(10.0, 10.0), to: pt(5.0, 10.0) }
    );
}

#[test]
fn path_command_count_tracks_outline_length() {
    // MoveTo + one QuadTo per interior point + Close.
    let outline: Vec<Point> = (0..8).map(|i| pt(f64::from(i), 0.0)).collect();
    let path = outline_path(&outline);
    assert_eq!(path.len(), 8);
}

#[test]
fn smooth_stroke_of_a_dot_is_empty() {
    // One sample gives no outline, hence no path. Rendering falls back to
    // nothing for a stationary tap.
    assert!(smooth_stroke(&[pt(5.0, 5.0)], 4.0).is_empty());
}

// =============================================================
// SVG SERIALIZATION
// =============================================================

#[test]
fn svg_path_data_formats_with_two_decimals() {
    let commands = [
        PathCommand::MoveTo(pt(1.0, 2.5)),
        PathCommand::QuadTo { ctrl: pt(3.25, 4.0), to: pt(5.0, 6.75) },
        PathCommand::Close,
    ];
    assert_eq!(svg_path_data(&commands), "M1.00,2.50 Q3.25,4.00 5.00,6.75 Z");
}

#[test]
fn svg_path_data_of_empty_path_is_empty() {
    assert_eq!(svg_path_data(&[]), "");
}
