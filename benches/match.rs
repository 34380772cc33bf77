use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use routeglyph::Router;

fn build_router(routes: usize) -> Router<u32> {
    let mut router = Router::create("");
    router.add(b"/", 0).unwrap();
    router.add(b"/users/:id", 1).unwrap();
    router.add(b"/users/:id/posts/:post_id", 2).unwrap();
    router.add(b"/assets/*", 3).unwrap();
    for i in 0..routes {
        router
            .add(format!("/generated/{i}/:param").as_bytes(), 4)
            .unwrap();
    }
    router.rebuild();
    router
}

pub fn criterion_benchmark(c: &mut Criterion) {
    {
        let mut router = build_router(0);
        assert!(router.match_path(b"/users/42", |_, _, _| true));
        c.bench_function("match_literal_root", |b| {
            b.iter(|| router.match_path(black_box(b"/"), |_, _, _| true))
        });
        c.bench_function("match_single_placeholder", |b| {
            b.iter(|| router.match_path(black_box(b"/users/42"), |_, _, _| true))
        });
        c.bench_function("match_two_placeholders", |b| {
            b.iter(|| {
                router.match_path(black_box(b"/users/42/posts/1337"), |_, _, _| true)
            })
        });
        c.bench_function("match_wildcard", |b| {
            b.iter(|| {
                router.match_path(black_box(b"/assets/css/app.css"), |_, _, _| true)
            })
        });
        c.bench_function("match_miss", |b| {
            b.iter(|| router.match_path(black_box(b"/no/such/route"), |_, _, _| true))
        });
    }

    {
        // A much larger route set stresses the determinized automaton's
        // shared prefixes rather than any one pattern's self-loop.
        let mut router = build_router(500);
        assert!(router.match_path(b"/generated/250/42", |_, _, _| true));
        c.bench_function("match_in_large_route_set", |b| {
            b.iter(|| router.match_path(black_box(b"/generated/250/42"), |_, _, _| true))
        });
    }

    {
        c.bench_function("rebuild_500_routes", |b| {
            b.iter_batched(
                || {
                    let mut r: Router<u32> = Router::create("");
                    for i in 0..500 {
                        r.add(format!("/generated/{i}/:param").as_bytes(), i as u32)
                            .unwrap();
                    }
                    r
                },
                |mut r| r.rebuild(),
                criterion::BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
