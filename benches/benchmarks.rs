use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use roost::stores::NewNotification;
use roost::{Config, MemoryStorage, Store, Stores};

fn runtime() -> tokio::runtime::Runtime {
    // Worker thread drains the persistence queue while the bench loop runs
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("benchmark runtime")
}

fn store_update_benchmark(c: &mut Criterion) {
    let store: Store<u64> = Store::new(0);

    c.bench_function("store_update", |b| {
        b.iter(|| {
            store.update(|n| *n = black_box(*n + 1));
        });
    });
}

fn store_notify_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_notify");

    for subscribers in [1usize, 10, 100] {
        let store: Store<u64> = Store::new(0);
        let guards: Vec<_> = (0..subscribers)
            .map(|_| {
                store.subscribe(|n| {
                    black_box(*n);
                })
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| {
                b.iter(|| store.update(|n| *n += 1));
            },
        );
        drop(guards);
    }

    group.finish();
}

fn favorites_toggle_benchmark(c: &mut Criterion) {
    let rt = runtime();
    let _guard = rt.enter();
    let stores = Stores::new(Arc::new(MemoryStorage::new()), &Config::default());
    for i in 0..200 {
        stores.favorites.add_favorite(&format!("listing-{i}"));
    }

    c.bench_function("favorites_toggle", |b| {
        b.iter(|| stores.favorites.toggle_favorite(black_box("listing-100")));
    });
}

fn notifications_at_capacity_benchmark(c: &mut Criterion) {
    let rt = runtime();
    let _guard = rt.enter();
    let stores = Stores::new(Arc::new(MemoryStorage::new()), &Config::default());
    for i in 0..stores.notifications.capacity() {
        stores
            .notifications
            .add_notification(NewNotification::new(format!("n{i}"), "body"));
    }

    c.bench_function("notifications_add_at_capacity", |b| {
        b.iter(|| {
            stores
                .notifications
                .add_notification(NewNotification::new("Offer", "New offer received"))
        });
    });

    c.bench_function("notifications_unread_count", |b| {
        b.iter(|| black_box(stores.notifications.unread_count()));
    });
}

criterion_group!(
    benches,
    store_update_benchmark,
    store_notify_benchmark,
    favorites_toggle_benchmark,
    notifications_at_capacity_benchmark
);
criterion_main!(benches);
