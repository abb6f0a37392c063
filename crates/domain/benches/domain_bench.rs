use std::sync::Arc;

use chrono::Utc;
use common::RecordId;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use domain::{
    LineItem, NewQuotation, Quotation, QuotationService, QuotationStatus, RecordingFaultReporter,
    SearchField, SequenceNumber, ServiceConfig, calculate_total, filter, summarize,
};
use mirror::StateContext;
use record_store::InMemoryRecordStore;

fn make_collection(size: usize) -> Vec<Quotation> {
    (0..size)
        .map(|i| {
            let status = QuotationStatus::ALL[i % QuotationStatus::ALL.len()];
            let new = NewQuotation::new(format!("PC-{}", i % 50), "PL-1")
                .with_status(status)
                .with_customer(format!("Customer {i}"))
                .with_items(vec![LineItem::new(i as u32 % 7, "12.5"), LineItem::new(1, 3)]);
            let number = SequenceNumber::new((1001 + i).to_string());
            Quotation::from_new(RecordId::new(), number, new, Utc::now())
        })
        .collect()
}

fn bench_calculate_total(c: &mut Criterion) {
    let items: Vec<LineItem> = (0..100)
        .map(|i| match i % 3 {
            0 => LineItem::new(i, 9.99),
            1 => LineItem::new(i.to_string(), "4.5"),
            _ => LineItem::new(i, "n/a"),
        })
        .collect();

    c.bench_function("domain/calculate_total_100_items", |b| {
        b.iter(|| calculate_total(&items));
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain/search");

    for size in [100, 1000] {
        let collection = make_collection(size);
        group.bench_with_input(BenchmarkId::new("all_fields", size), &collection, |b, col| {
            b.iter(|| filter(col, "customer 42", &SearchField::All));
        });
        group.bench_with_input(BenchmarkId::new("one_field", size), &collection, |b, col| {
            b.iter(|| filter(col, "pc-7", &SearchField::parse("parent_ref")));
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let collection = make_collection(1000);

    c.bench_function("domain/summarize_1000", |b| {
        b.iter(|| summarize(&collection));
    });
}

fn bench_create(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = QuotationService::new(
        InMemoryRecordStore::new(),
        Arc::new(StateContext::new()),
        Arc::new(RecordingFaultReporter::new()),
        ServiceConfig::default(),
    );

    c.bench_function("domain/create_and_publish", |b| {
        b.iter(|| {
            rt.block_on(async {
                service
                    .create(NewQuotation::new("PC-1", "PL-1"))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_calculate_total,
    bench_search,
    bench_statistics,
    bench_create,
);
criterion_main!(benches);
