use chromatch::{edge_map, match_multi_scale, EdgeConfig, Mask, Rgb, RgbImage, ScaleRange};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn make_edge_field(width: usize, height: usize) -> Mask {
    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            if (x * 13 ^ y * 7) % 11 == 0 {
                data[y * width + x] = 255;
            }
        }
    }
    Mask::from_raw(data, width, height).unwrap()
}

fn extract_patch(field: &Mask, x0: usize, y0: usize, size: usize) -> Mask {
    let mut data = vec![0u8; size * size];
    for y in 0..size {
        for x in 0..size {
            if field.is_set(x0 + x, y0 + y) {
                data[y * size + x] = 255;
            }
        }
    }
    Mask::from_raw(data, size, size).unwrap()
}

fn make_color_image(width: usize, height: usize) -> RgbImage {
    let mut img = RgbImage::zeros(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 13) ^ (y * 7) ^ (x * y)) as u8;
            img.set_pixel(x, y, Rgb([v, v.wrapping_mul(3), v.wrapping_add(40)]));
        }
    }
    img
}

fn bench_multi_scale(c: &mut Criterion) {
    let field = make_edge_field(160, 120);
    let template = extract_patch(&field, 60, 40, 32);
    let range = ScaleRange::default();

    c.bench_function("multi_scale_match_160x120_tpl32", |b| {
        b.iter(|| {
            let result =
                match_multi_scale(black_box(&field), black_box(&template), &range).unwrap();
            black_box(result)
        })
    });
}

fn bench_edge_map(c: &mut Criterion) {
    let img = make_color_image(320, 240);
    let cfg = EdgeConfig::recommended();

    c.bench_function("edge_map_320x240_bilateral", |b| {
        b.iter(|| {
            let edges = edge_map(black_box(&img), &cfg).unwrap();
            black_box(edges)
        })
    });
}

criterion_group!(benches, bench_multi_scale, bench_edge_map);
criterion_main!(benches);
