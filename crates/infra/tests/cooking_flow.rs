//! End-to-end cooking flow: queue → depletion → report → persisted stock.

use std::sync::Arc;

use chrono::NaiveDate;

use larder_core::{ConsumptionId, ProductId, StockItemId};
use larder_infra::{
    ConsumptionQueue, CookingWorkflow, DepletedStockSweep, InMemoryConsumptionQueue,
    InMemoryStockStore, NoCleanup, StockDepletionProcessor, StockStore, telemetry,
};
use larder_stock::{PendingConsumption, StockItem};

fn setup() -> (Arc<InMemoryStockStore>, Arc<InMemoryConsumptionQueue>) {
    telemetry::init();
    (
        Arc::new(InMemoryStockStore::new()),
        Arc::new(InMemoryConsumptionQueue::new()),
    )
}

#[test]
fn cooking_one_queued_product_clears_its_stock_and_reports_it() {
    let (store, queue) = setup();

    let product = ProductId::new();
    let item = StockItem::new(
        StockItemId::new(),
        product,
        2.0,
        NaiveDate::from_ymd_opt(2024, 1, 1),
    )
    .unwrap();
    store.insert(item.clone()).unwrap();

    let consumption = PendingConsumption::new(ConsumptionId::new(), product, 2.0).unwrap();
    queue.push(consumption.clone()).unwrap();

    let workflow = CookingWorkflow::new(
        StockDepletionProcessor::new(store.clone()),
        queue.clone(),
        NoCleanup,
    );
    let report = workflow.clear_pending().unwrap();

    let cleared = &report.consumptions[&consumption.id];
    assert_eq!(cleared.product_id, product);
    assert_eq!(cleared.amount_unmet, 0.0);
    assert_eq!(cleared.cleared_stock_items.len(), 1);

    let entry = &cleared.cleared_stock_items[0];
    assert_eq!(entry.stock_item_id, item.id);
    assert_eq!(entry.amount_before, 2.0);
    assert_eq!(entry.amount_cleared, 2.0);
    assert_eq!(entry.amount_remaining, 0.0);

    // The item's persisted amount went to zero; the record itself survives
    // because no cleanup pass ran.
    assert_eq!(store.get(item.id).unwrap().amount, 0.0);
    assert!(queue.list().unwrap().is_empty());
}

#[test]
fn the_report_serializes_to_the_wire_payload() {
    let (store, queue) = setup();

    let product = ProductId::new();
    let item = StockItem::new(StockItemId::new(), product, 2.0, None).unwrap();
    store.insert(item.clone()).unwrap();

    let consumption = PendingConsumption::new(ConsumptionId::new(), product, 2.0).unwrap();
    queue.push(consumption.clone()).unwrap();

    let workflow = CookingWorkflow::new(
        StockDepletionProcessor::new(store.clone()),
        queue,
        NoCleanup,
    );
    let report = workflow.clear_pending().unwrap();

    let json = serde_json::to_value(&report).unwrap();
    let per_consumption = &json[consumption.id.to_string()];

    assert_eq!(
        per_consumption["product_id"],
        serde_json::json!(product.to_string())
    );
    assert_eq!(per_consumption["amount_unmet"], serde_json::json!(0.0));

    let cleared = &per_consumption["cleared_stock_items"][0];
    assert_eq!(cleared["id"], serde_json::json!(item.id.to_string()));
    assert_eq!(cleared["amount_before"], serde_json::json!(2.0));
    assert_eq!(cleared["amount_cleared"], serde_json::json!(2.0));
    assert_eq!(cleared["amount_remaining"], serde_json::json!(0.0));
}

#[test]
fn cooking_leaves_unrelated_products_alone_and_sweeps_empties() {
    let (store, queue) = setup();

    let cooked = ProductId::new();
    let bystander_product = ProductId::new();
    let cooked_item = StockItem::new(StockItemId::new(), cooked, 3.0, None).unwrap();
    let bystander = StockItem::new(StockItemId::new(), bystander_product, 5.0, None).unwrap();
    store.insert(cooked_item.clone()).unwrap();
    store.insert(bystander.clone()).unwrap();

    queue
        .push(PendingConsumption::new(ConsumptionId::new(), cooked, 3.0).unwrap())
        .unwrap();

    let workflow = CookingWorkflow::new(
        StockDepletionProcessor::new(store.clone()),
        queue,
        DepletedStockSweep::new(store.clone()),
    );
    workflow.clear_pending().unwrap();

    // The emptied item was swept; the unreferenced product was not touched.
    assert!(store.get(cooked_item.id).is_err());
    assert_eq!(store.get(bystander.id).unwrap().amount, 5.0);
}

#[test]
fn insufficient_stock_under_clears_and_reports_the_shortfall() {
    let (store, queue) = setup();

    let product = ProductId::new();
    let item = StockItem::new(StockItemId::new(), product, 1.5, None).unwrap();
    store.insert(item.clone()).unwrap();

    let consumption = PendingConsumption::new(ConsumptionId::new(), product, 4.0).unwrap();
    queue.push(consumption.clone()).unwrap();

    let workflow = CookingWorkflow::new(
        StockDepletionProcessor::new(store.clone()),
        queue,
        NoCleanup,
    );
    let report = workflow.clear_pending().unwrap();

    let cleared = &report.consumptions[&consumption.id];
    assert_eq!(cleared.amount_unmet, 2.5);
    assert_eq!(store.get(item.id).unwrap().amount, 0.0);
}
