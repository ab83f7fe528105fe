// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ideaboard_geometry::{
    AspectLock, CanvasFrame, GeometryClamp, Intent, PixelDelta, Telemetry, TelemetryPatch,
};
use ideaboard_gesture::knob::{KnobPosition, ResizeKnob};
use ideaboard_gesture::session::{PointerEvent, PointerId};
use kurbo::{Point, Rect, Size};

fn frame() -> CanvasFrame {
    CanvasFrame::new(Rect::new(0.0, 0.0, 1920.0, 1080.0))
}

fn bench_apply_pixel_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("clamp/apply_pixel_delta");
    let clamp = GeometryClamp::default();
    let frame = frame();
    let card = Telemetry::new(40.0, 40.0, 20.0, 20.0);
    let lock = AspectLock::new(1.5);

    let cases = [
        ("move", PixelDelta::translate(kurbo::Vec2::new(12.0, -7.0)), Intent::Move),
        ("move_overflow", PixelDelta::translate(kurbo::Vec2::new(5_000.0, 0.0)), Intent::Move),
        ("resize", PixelDelta::grow(30.0, 10.0), Intent::resize()),
        (
            "resize_locked_top_left",
            PixelDelta { x: -30.0, y: -20.0, width: 30.0, height: 20.0 },
            Intent::Resize { aspect: lock },
        ),
        ("resize_rejected", PixelDelta::grow(-1_000.0, 0.0), Intent::resize()),
    ];

    for (name, delta, intent) in cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), &delta, |b, delta| {
            b.iter(|| {
                let result = clamp.apply_pixel_delta(
                    black_box(&card),
                    black_box(*delta),
                    &frame,
                    intent,
                );
                black_box(result)
            });
        });
    }
    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let clamp = GeometryClamp::default();
    let frame = frame();
    let card = Telemetry::new(40.0, 40.0, 20.0, 20.0);
    let patch = TelemetryPatch::default()
        .with_position(95.0, -3.0)
        .with_size(f64::NAN, 140.0);

    c.bench_function("clamp/sanitize_place", |b| {
        b.iter(|| clamp.sanitize(black_box(&card), black_box(patch), &frame, Intent::Place));
    });
}

fn bench_knob_drag(c: &mut Criterion) {
    let clamp = GeometryClamp::default();
    let frame = frame();

    c.bench_function("clamp/knob_drag_100_steps", |b| {
        b.iter(|| {
            let mut card = Telemetry::new(20.0, 20.0, 30.0, 30.0);
            let mut knob = ResizeKnob::new(KnobPosition::TopLeft);
            let start = Point::new(384.0, 216.0);
            knob.pointer_down(PointerEvent::new(PointerId(1), start), Size::new(576.0, 324.0));
            for i in 1..=100 {
                let offset = f64::from(i);
                let event = PointerEvent::new(PointerId(1), start - kurbo::Vec2::new(offset, offset));
                if let Some(step) = knob.pointer_move(event, &frame, i % 2 == 0)
                    && let Ok(next) = clamp.apply_pixel_delta(&card, step.delta, &frame, step.intent())
                {
                    card = next;
                }
            }
            black_box(card)
        });
    });
}

criterion_group!(benches, bench_apply_pixel_delta, bench_sanitize, bench_knob_drag);
criterion_main!(benches);
