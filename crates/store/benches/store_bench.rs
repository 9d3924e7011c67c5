use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use store::{Store, Value};
use tempfile::tempdir;

const N: usize = 1_000;
const VAL_SIZE: usize = 100;

fn store_set_buffered(c: &mut Criterion) {
    c.bench_function("store_set_buffered_1k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let store = Store::open(dir.path().join("datastore"), false).unwrap();
                (dir, store)
            },
            |(_dir, mut store)| {
                for i in 0..N {
                    store
                        .set(format!("k{:06}", i), Value::Bytes(vec![b'x'; VAL_SIZE]))
                        .unwrap();
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn store_get_hit(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let mut store = Store::open(dir.path().join("datastore"), false).unwrap();
    for i in 0..N {
        store
            .set(format!("k{:06}", i), Value::Bytes(vec![b'x'; VAL_SIZE]))
            .unwrap();
    }

    c.bench_function("store_get_hit_1k", |b| {
        b.iter(|| {
            for i in 0..N {
                let key = format!("k{:06}", i);
                criterion::black_box(store.get(&key).unwrap());
            }
        });
    });
}

fn store_flush(c: &mut Criterion) {
    c.bench_function("store_flush_1k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let mut store = Store::open(dir.path().join("datastore"), false).unwrap();
                for i in 0..N {
                    store
                        .set(format!("k{:06}", i), Value::Bytes(vec![b'x'; VAL_SIZE]))
                        .unwrap();
                }
                (dir, store)
            },
            |(_dir, store)| {
                store.flush().unwrap();
            },
            BatchSize::SmallInput,
        );
    });
}

fn store_reopen(c: &mut Criterion) {
    c.bench_function("store_reopen_1k", |b| {
        b.iter_batched(
            || {
                let dir = tempdir().unwrap();
                let path = dir.path().join("datastore");
                let mut store = Store::open(&path, false).unwrap();
                for i in 0..N {
                    store
                        .set(format!("k{:06}", i), Value::Bytes(vec![b'x'; VAL_SIZE]))
                        .unwrap();
                }
                store.flush().unwrap();
                (dir, path)
            },
            |(_dir, path)| {
                let store = Store::open(&path, false).unwrap();
                assert_eq!(store.len(), N);
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    store_set_buffered,
    store_get_hit,
    store_flush,
    store_reopen,
);

criterion_main!(benches);
