// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use ideaboard_canvas::{
    Canvas, CanvasHost, ElementId, ElementSpec, EventTarget, InputSource, Key, MenuAction, Mode,
    PointerEvent, PointerId, Telemetry,
};
use kurbo::{Point, Rect};

struct Board;

impl CanvasHost for Board {
    type Surface = u32;

    fn canvas_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, 1920.0, 1080.0)
    }

    fn now_ms(&self) -> u64 {
        0
    }
}

fn board(len: u32) -> (Canvas<u32>, Vec<ElementId>) {
    let mut canvas = Canvas::default();
    let ids = (0..len)
        .map(|i| {
            let spec = ElementSpec::new(i)
                .with_id(format!("card-{i}"))
                .with_telemetry(Telemetry::new(f64::from(i % 70), 10.0, 20.0, 20.0));
            canvas.add_element(&mut Board, spec).unwrap()
        })
        .collect();
    (canvas, ids)
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas/reorder");
    for len in [16_u32, 128, 1_024] {
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(BenchmarkId::new("alternate_front_back", len), &len, |b, &len| {
            b.iter_batched(
                || board(len),
                |(mut canvas, ids)| {
                    for (i, id) in ids.iter().enumerate() {
                        if i % 2 == 0 {
                            canvas.bring_to_front(&mut Board, id, None);
                        } else {
                            canvas.send_to_back(&mut Board, id, None);
                        }
                    }
                    black_box(canvas);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_pointer_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas/pointer_drag");
    for len in [16_u32, 1_024] {
        group.bench_with_input(BenchmarkId::new("top_card_100_moves", len), &len, |b, &len| {
            b.iter_batched(
                || board(len),
                |(mut canvas, ids)| {
                    let Some(id) = ids.last() else { return };
                    let start = Point::new(200.0, 200.0);
                    canvas.pointer_down(
                        &mut Board,
                        id,
                        EventTarget::Root,
                        PointerEvent::new(PointerId(1), start),
                    );
                    for i in 1..=100 {
                        let position = start + kurbo::Vec2::new(f64::from(i) * 3.0, f64::from(i));
                        canvas.pointer_move(&mut Board, id, PointerEvent::new(PointerId(1), position));
                    }
                    black_box(canvas.telemetry(id));
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_keyboard_nudge(c: &mut Criterion) {
    c.bench_function("canvas/keyboard_nudge_64_steps", |b| {
        b.iter_batched(
            || board(8),
            |(mut canvas, ids)| {
                let id = &ids[0];
                canvas.menu_press(&mut Board, id, MenuAction::Move, InputSource::Keyboard);
                for _ in 0..64 {
                    canvas.menu_key_down(&mut Board, id, MenuAction::Move, Key::ArrowRight);
                }
                canvas.menu_key_up(&mut Board, id, MenuAction::Move, Key::ArrowRight);
                black_box(canvas.telemetry(id));
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_dismiss(c: &mut Criterion) {
    c.bench_function("canvas/dismiss_click_256_editing", |b| {
        b.iter_batched(
            || {
                let (mut canvas, ids) = board(256);
                for id in &ids {
                    canvas.set_mode(&mut Board, id, Mode::Interact);
                }
                (canvas, ids)
            },
            |(mut canvas, ids)| {
                canvas.dismiss_click(&mut Board, ids.first());
                black_box(canvas.is_dismiss_registered());
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_reorder,
    bench_pointer_drag,
    bench_keyboard_nudge,
    bench_dismiss
);
criterion_main!(benches);
