use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha20Rng;

use rb_map::Tree;

fn shuffled(n: u32) -> Vec<u32> {
    let mut keys: Vec<u32> = (0..n).collect();
    keys.shuffle(&mut ChaCha20Rng::from_seed([0; 32]));
    keys
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in [1000, 10_000] {
        let keys = shuffled(n);
        group.bench_function(format!("shuffled/{n}"), |b| {
            b.iter(|| {
                let mut tree = Tree::new();
                for &k in &keys {
                    tree.insert(black_box(k), k);
                }
                tree
            })
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for n in [1000, 10_000] {
        let keys = shuffled(n);
        let tree: Tree<_, _> = keys.iter().map(|&k| (k, k)).collect();
        group.bench_function(format!("hit/{n}"), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(tree.get(black_box(k)));
                }
            })
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    for n in [1000, 10_000] {
        let keys = shuffled(n);
        group.bench_function(format!("all/{n}"), |b| {
            b.iter_with_setup(
                || keys.iter().map(|&k| (k, k)).collect::<Tree<_, _>>(),
                |mut tree| {
                    for k in &keys {
                        black_box(tree.remove(black_box(k)));
                    }
                    tree
                },
            )
        });
    }
    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("iter");
    for n in [1000, 10_000] {
        let tree: Tree<_, _> = shuffled(n).into_iter().map(|k| (k, k)).collect();
        group.bench_function(format!("full/{n}"), |b| {
            b.iter(|| tree.iter().map(|(&k, _)| k as u64).sum::<u64>())
        });
        group.bench_function(format!("range-tenth/{n}"), |b| {
            let (lo, hi) = (n / 2, n / 2 + n / 10);
            b.iter(|| tree.range(lo..hi).count())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_get, bench_remove, bench_iter);
criterion_main!(benches);
