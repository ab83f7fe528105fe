// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Knob drags fed through the clamp pipeline, the way a card consumes them.

use ideaboard_geometry::{CanvasFrame, GeometryClamp, Telemetry};
use ideaboard_gesture::knob::{KnobPosition, ResizeKnob};
use ideaboard_gesture::session::{PointerEvent, PointerId};
use kurbo::{Point, Rect};

fn frame() -> CanvasFrame {
    CanvasFrame::new(Rect::new(0.0, 0.0, 1000.0, 500.0))
}

/// Drives `knob` from `from` to each point in `path` and returns the final
/// telemetry, dropping rejected steps.
fn drag(
    knob: KnobPosition,
    card: Telemetry,
    from: Point,
    path: &[Point],
    shift: bool,
) -> Telemetry {
    let frame = frame();
    let clamp = GeometryClamp::default();
    let pointer = PointerId(1);
    let mut knob = ResizeKnob::new(knob);
    knob.pointer_down(
        PointerEvent::new(pointer, from),
        frame.telemetry_to_rect(&card).size(),
    );

    let mut card = card;
    for &p in path {
        let step = knob
            .pointer_move(PointerEvent::new(pointer, p), &frame, shift)
            .unwrap();
        if let Ok(next) = clamp.apply_pixel_delta(&card, step.delta, &frame, step.intent()) {
            card = next;
        }
    }
    assert!(knob.pointer_up(pointer));
    card
}

#[test]
fn shift_drag_of_top_left_knob_keeps_bottom_right_corner() {
    let card = Telemetry::new(10.0, 10.0, 20.0, 20.0);
    let before = frame().telemetry_to_rect(&card);

    let out = drag(
        KnobPosition::TopLeft,
        card,
        Point::new(100.0, 50.0),
        &[Point::new(120.0, 60.0), Point::new(150.0, 75.0)],
        true,
    );
    let after = frame().telemetry_to_rect(&out);

    assert!((after.x1 - before.x1).abs() < 1e-6, "{after:?}");
    assert!((after.y1 - before.y1).abs() < 1e-6, "{after:?}");
    assert!(
        (after.width() / after.height() - 2.0).abs() < 1e-9,
        "{after:?}"
    );
    assert!(after.width() < before.width());
}

#[test]
fn free_drag_of_bottom_knob_only_changes_height() {
    let card = Telemetry::new(10.0, 10.0, 20.0, 20.0);
    let out = drag(
        KnobPosition::Bottom,
        card,
        Point::new(200.0, 150.0),
        &[Point::new(260.0, 200.0)],
        false,
    );
    assert_eq!(out.x, 10.0);
    assert_eq!(out.y, 10.0);
    assert_eq!(out.width, 20.0);
    assert!((out.height - 30.0).abs() < 1e-9, "{out:?}");
}

#[test]
fn too_small_steps_are_dropped_but_later_steps_apply() {
    let card = Telemetry::new(10.0, 10.0, 10.0, 20.0);
    // 100px wide: dragging the right knob 60px left would leave 40px.
    let out = drag(
        KnobPosition::Right,
        card,
        Point::new(200.0, 100.0),
        &[Point::new(140.0, 100.0), Point::new(160.0, 100.0)],
        false,
    );
    // First step rejected; second step is +20px from the recorded position.
    assert!((out.width - 12.0).abs() < 1e-9, "{out:?}");
}
