/// Benchmarks for table queries.
use chartstats::models::{Pagination, Song};
use chartstats::operation::Operation;
use chartstats::operations;
use chartstats::table::Table;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn get_test_table(songs: usize) -> Table {
    Table::from_songs(
        (0..songs)
            .map(|i| {
                let i_u64 = i as u64;
                Song::new(
                    &format!("Song {}", i),
                    &format!("Channel {}", i % 97),
                    &format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1),
                    1_000 + (i_u64 * 7_919) % 100_000,
                    (i_u64 * 31) % 5_000,
                    i_u64 % 700,
                )
            })
            .collect(),
    )
}

fn criterion_benchmark(c: &mut Criterion) {
    for size in [100, 10_000, 1_000_000] {
        let table = get_test_table(size);
        c.bench_function(&format!("summary({})", size), |b| {
            b.iter(|| operations::Summary::execute(black_box(&table), ()).unwrap())
        });
        c.bench_function(&format!("top_n({})", size), |b| {
            b.iter(|| operations::TopN::execute(black_box(&table), 100).unwrap())
        });
        c.bench_function(&format!("artist_stats({})", size), |b| {
            b.iter(|| {
                operations::ArtistStats::execute(black_box(&table), "channel 4".to_string())
                    .unwrap()
            })
        });
        c.bench_function(&format!("engagement({})", size), |b| {
            b.iter(|| operations::Engagement::execute(black_box(&table), ()).unwrap())
        });
        c.bench_function(&format!("list_songs({})", size), |b| {
            b.iter(|| {
                let pagination = Pagination {
                    page: 3,
                    per_page: 100,
                };
                operations::ListSongs::execute(black_box(&table), pagination).unwrap()
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
