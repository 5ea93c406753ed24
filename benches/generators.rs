use criterion::{criterion_group, criterion_main, Criterion};
use mazegen::{
    generators,
    grid::Grid,
    units::{ColumnsCount, RowsCount},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_recursive_backtracker_32(c: &mut Criterion) {
    let mut grid = Grid::new(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    c.bench_function("recursive_backtracker_32", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut grid, &mut rng))
    });
}

fn bench_prim_32(c: &mut Criterion) {
    let mut grid = Grid::new(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    c.bench_function("prim_32", move |b| {
        b.iter(|| generators::prim(&mut grid, &mut rng))
    });
}

fn bench_kruskal_32(c: &mut Criterion) {
    let mut grid = Grid::new(RowsCount(32), ColumnsCount(32)).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    c.bench_function("kruskal_32", move |b| {
        b.iter(|| generators::kruskal(&mut grid, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_32,
    bench_prim_32,
    bench_kruskal_32
);
criterion_main!(benches);
