use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use larder_core::{ConsumptionId, ProductId, StockItemId};
use larder_infra::{InMemoryStockStore, StockDepletionProcessor, StockStore, telemetry};
use larder_stock::{DepletionOrder, PendingConsumption, StockItem, plan_depletion};

fn items_for(product: ProductId, count: usize) -> Vec<StockItem> {
    (0..count)
        .map(|i| {
            StockItem::new(StockItemId::new(), product, (i % 7) as f64, None).unwrap()
        })
        .collect()
}

fn bench_plan_depletion(c: &mut Criterion) {
    telemetry::init();

    let product = ProductId::new();
    let items = items_for(product, 1_000);

    c.bench_function("plan_depletion/1k_items_storage_order", |b| {
        b.iter(|| {
            plan_depletion(black_box(&items), black_box(1_500.0), DepletionOrder::Storage)
        })
    });

    c.bench_function("plan_depletion/1k_items_expires_first", |b| {
        b.iter(|| {
            plan_depletion(
                black_box(&items),
                black_box(1_500.0),
                DepletionOrder::ExpiresFirst,
            )
        })
    });
}

fn bench_clear_all(c: &mut Criterion) {
    telemetry::init();

    let setup = || {
        let store = Arc::new(InMemoryStockStore::new());
        let mut pending = Vec::new();
        for _ in 0..100 {
            let product = ProductId::new();
            for item in items_for(product, 5) {
                store.insert(item).unwrap();
            }
            pending.push(PendingConsumption::new(ConsumptionId::new(), product, 10.0).unwrap());
        }
        (StockDepletionProcessor::new(store), pending)
    };

    c.bench_function("processor/clear_all_100_products", |b| {
        b.iter_batched(
            setup,
            |(processor, pending)| processor.clear_all(pending),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_plan_depletion, bench_clear_all);
criterion_main!(benches);
