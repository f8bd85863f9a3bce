use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use semejar::catalog::{CatalogEntry, ContentRating, TagRef};
use semejar::engine::{EngineConfig, SimilarityEngine};
use semejar::sink::MemorySink;

fn generate_catalog(n: usize) -> Vec<CatalogEntry> {
    let settings = [
        "frontier", "archive", "harbor", "monastery", "academy", "wasteland", "capital", "island",
        "colony", "underworld",
    ];
    let professions = [
        "cartographer",
        "swordsman",
        "alchemist",
        "courier",
        "archivist",
        "smuggler",
        "falconer",
        "surgeon",
        "diplomat",
        "stowaway",
    ];
    let goals = [
        "recover a stolen ledger",
        "break a family curse",
        "outrun a collapsing empire",
        "decode a dead language",
        "repay an impossible debt",
        "expose a forged treaty",
        "survive a rigged tournament",
        "find a vanished mentor",
        "smuggle a living relic",
        "end a hundred year siege",
    ];
    let tags = [
        "Action",
        "Adventure",
        "Drama",
        "Fantasy",
        "Mystery",
        "Romance",
        "Thriller",
        "Historical",
        "Isekai",
        "Horror",
    ];

    (0..n)
        .map(|i| {
            let setting = settings[i % settings.len()];
            let profession = professions[(i / 10) % professions.len()];
            let goal = goals[(i / 100) % goals.len()];
            let description = format!(
                "in the {setting} a young {profession} must {goal} before the \
                 winter council convenes and the old alliances finally come apart"
            );
            CatalogEntry::new(format!("entry-{i}"))
                .with_title("en", &format!("Chronicle {i}"))
                .with_description("en", &description)
                .with_language("en")
                .with_rating(ContentRating::Safe)
                .with_tag(TagRef::new(
                    format!("tag-{}", i % tags.len()),
                    "en",
                    tags[i % tags.len()],
                ))
                .with_tag(TagRef::new(
                    format!("tag-{}", (i / 10) % tags.len()),
                    "en",
                    tags[(i / 10) % tags.len()],
                ))
        })
        .collect()
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");

    for size in [100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let engine = SimilarityEngine::new(EngineConfig::new());
            b.iter(|| {
                let catalog = generate_catalog(size);
                engine.build_index(black_box(catalog)).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(10);

    for size in [100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let engine = SimilarityEngine::new(EngineConfig::new().with_threads(1));
            let index = engine.build_index(generate_catalog(size)).unwrap();
            b.iter(|| {
                let sink = MemorySink::new();
                engine.run(black_box(&index), &sink).unwrap();
                sink
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_index, bench_full_run);
criterion_main!(benches);
