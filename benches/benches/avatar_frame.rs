// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat};
use std::time::Duration;
use understory_avatar::{
    AvatarAttributes, CircularAvatar, Dimension, FitInputs, Viewport, center_crop,
    format_placeholder_text,
};
use understory_avatar_ref::{ManualAnimator, RecordingSurface};

fn image(width: u32, height: u32) -> ImageData {
    ImageData {
        data: Blob::from(vec![0x80_u8; (width * height * 4) as usize]),
        format: ImageFormat::Rgba8,
        alpha_type: ImageAlphaType::Alpha,
        width,
        height,
    }
}

fn avatar() -> CircularAvatar {
    let mut avatar = CircularAvatar::new(&AvatarAttributes::default());
    avatar.on_bounds_changed(96, 96);
    avatar.set_border_width(Dimension::px(3.0)).unwrap();
    avatar.set_shadow_radius(2.0).unwrap();
    avatar.set_placeholder("ada lovelace");
    avatar.set_placeholder_text_size(Dimension::px(28.0)).unwrap();
    avatar
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("avatar/frame");

    let mut placeholder = avatar();
    group.bench_function("placeholder", |b| {
        let mut surface = RecordingSurface::default();
        b.iter(|| {
            surface.clear_events();
            placeholder.draw(&mut surface);
            black_box(surface.events().len());
        });
    });

    let mut with_image = avatar();
    with_image.on_image_changed(Some(image(64, 48)));
    group.bench_function("image", |b| {
        let mut surface = RecordingSurface::default();
        b.iter(|| {
            surface.clear_events();
            with_image.draw(&mut surface);
            black_box(surface.events().len());
        });
    });

    let mut checked = avatar();
    checked.set_allow_check_animation(false);
    checked.set_checked(true, &mut ManualAnimator::default());
    group.bench_function("checked", |b| {
        let mut surface = RecordingSurface::default();
        b.iter(|| {
            surface.clear_events();
            checked.draw(&mut surface);
            black_box(surface.events().len());
        });
    });

    // Every frame invalidates the paints and the image transform.
    let mut invalidated = avatar();
    invalidated.on_image_changed(Some(image(64, 48)));
    group.bench_function("image_after_resize", |b| {
        let mut surface = RecordingSurface::default();
        let mut size = 96;
        b.iter(|| {
            size = if size == 96 { 97 } else { 96 };
            invalidated.on_bounds_changed(size, size);
            invalidated.set_image_alpha(i32::try_from(size).unwrap_or(0xFF));
            surface.clear_events();
            invalidated.draw(&mut surface);
            black_box(surface.events().len());
        });
    });

    group.finish();
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("avatar/center_crop");
    for (w, h) in [(64_u32, 48_u32), (1_024, 768), (4_000, 3_000)] {
        let inputs = FitInputs {
            image_width: w,
            image_height: h,
            viewport: Viewport::new(96, 96),
            border_width_px: 3,
            shadow_radius: 2.0,
            draw_border: true,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{w}x{h}")),
            &inputs,
            |b, inputs| b.iter(|| black_box(center_crop(black_box(*inputs)))),
        );
    }
    group.finish();
}

fn bench_placeholder(c: &mut Criterion) {
    let mut group = c.benchmark_group("avatar/placeholder");
    for raw in ["a", "  jane doe  ", "straße", "\u{1F600}\u{1F601}"] {
        group.bench_with_input(BenchmarkId::from_parameter(raw.trim()), raw, |b, raw| {
            b.iter(|| black_box(format_placeholder_text(black_box(raw))));
        });
    }
    group.finish();
}

fn bench_toggle_cycle(c: &mut Criterion) {
    c.bench_function("avatar/toggle_cycle", |b| {
        let mut avatar = avatar();
        let mut animator = ManualAnimator::default();
        b.iter(|| {
            avatar.toggle(&mut animator);
            animator.drive(&mut avatar, 300);
            black_box(avatar.is_checked());
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2));
    targets = bench_frame, bench_fit, bench_placeholder, bench_toggle_cycle
}
criterion_main!(benches);
