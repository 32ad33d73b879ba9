use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rastrum::colors;
use rastrum::framebuffer::FrameBuffer;
use rastrum::math::Vec4;
use rastrum::rasterizer::{draw_filled_triangle, draw_textured_triangle, Triangle};
use rastrum::texture::{Tex2, Texture};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn triangle(points: [(f32, f32); 3], w: f32) -> Triangle {
    Triangle::new(
        [
            Vec4::new(points[0].0, points[0].1, 0.5, w),
            Vec4::new(points[1].0, points[1].1, 0.5, w),
            Vec4::new(points[2].0, points[2].1, 0.5, w),
        ],
        [
            Tex2::new(0.0, 0.0),
            Tex2::new(1.0, 0.0),
            Tex2::new(0.5, 1.0),
        ],
        colors::RED,
    )
}

fn small_triangle() -> Triangle {
    triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)], 2.0)
}

fn medium_triangle() -> Triangle {
    triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)], 2.0)
}

fn large_triangle() -> Triangle {
    triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)], 2.0)
}

fn checker_texture() -> Texture {
    let texels = (0..64 * 64)
        .map(|i| {
            let (x, y) = (i % 64, i / 64);
            if (x / 8 + y / 8) % 2 == 0 {
                colors::WHITE
            } else {
                colors::BLACK
            }
        })
        .collect();
    Texture::from_texels(64, 64, texels)
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let texture = checker_texture();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("solid", name), &triangle, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear_depth();
                draw_filled_triangle(&mut fb, black_box(tri));
            });
        });

        group.bench_with_input(BenchmarkId::new("textured", name), &triangle, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear_depth();
                draw_textured_triangle(&mut fb, black_box(tri), &texture);
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    // A grid of small triangles across the whole buffer
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)], 2.0)
            })
        })
        .collect();

    group.bench_function("solid_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear_depth();
            for tri in &triangles {
                draw_filled_triangle(&mut fb, black_box(tri));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);
