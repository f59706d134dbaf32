//! Benchmarks for candidate selection and ranking
//!
//! Run with: cargo bench --package recommender

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Catalog, Interactions, Movie, Rating};
use recommender::{rank, select_candidates, ScoredCandidate};

/// Synthetic stores sized like the production dataset: ~10k movies, one
/// heavy user with 2k ratings.
fn build_stores() -> (Catalog, Interactions) {
    let mut catalog = Catalog::new();
    for id in 1..=10_000u32 {
        catalog.insert(Movie {
            id,
            title: format!("Movie {id}"),
            poster_url: format!("/posters/{id}.jpg"),
            overview: String::new(),
        });
    }

    let mut interactions = Interactions::new();
    for movie_id in (1..=10_000u32).step_by(5).take(2_000) {
        interactions.insert(Rating {
            user_id: 1,
            movie_id,
            rating: (movie_id % 5) as f32 + 0.5,
        });
    }

    (catalog, interactions)
}

fn bench_select_candidates(c: &mut Criterion) {
    let (catalog, interactions) = build_stores();

    c.bench_function("select_candidates", |b| {
        b.iter(|| {
            let candidates = select_candidates(&catalog, &interactions, black_box(1));
            black_box(candidates)
        })
    });
}

fn bench_rank(c: &mut Criterion) {
    let scored: Vec<ScoredCandidate> = (1..=10_000u32)
        .map(|movie_id| ScoredCandidate {
            movie_id,
            score: ((movie_id * 2_654_435_761) % 1_000) as f32 / 1_000.0,
        })
        .collect();

    c.bench_function("rank_top_10", |b| {
        b.iter(|| {
            let ranked = rank(black_box(scored.clone()), black_box(10));
            black_box(ranked)
        })
    });
}

criterion_group!(benches, bench_select_candidates, bench_rank);
criterion_main!(benches);
