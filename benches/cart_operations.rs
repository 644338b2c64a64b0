use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::runtime::Runtime;

use pizzeria_rs::models::{Cart, CheckoutDraft, MenuItem};
use pizzeria_rs::services::{CartCheckout, SimulatedOrderService};

fn test_catalog(size: usize) -> Vec<MenuItem> {
    (0..size)
        .map(|i| {
            MenuItem::new(
                format!("P{:04}", i),
                format!("Benchmark Pizza {}", i),
                format!("Description for benchmark pizza {}", i),
                Decimal::new(950 + i as i64, 2),
            )
        })
        .collect()
}

fn bench_cart_mutations(c: &mut Criterion) {
    let catalog = test_catalog(50);

    c.bench_function("cart_add_items", |b| {
        b.iter(|| {
            let mut cart = Cart::new();
            for item in &catalog {
                cart.add_item(black_box(item));
            }
            black_box(cart.total_items())
        })
    });

    c.bench_function("cart_merge_existing_line", |b| {
        let item = &catalog[0];
        b.iter(|| {
            let mut cart = Cart::new();
            for _ in 0..100 {
                cart.add_item(black_box(item));
            }
            black_box(cart.line_quantity(&item.id))
        })
    });
}

fn bench_subtotal(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart_subtotal");

    for size in [10usize, 100, 1000] {
        let catalog = test_catalog(size);
        let mut cart = Cart::new();
        for item in &catalog {
            cart.add_item(item);
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &cart, |b, cart| {
            b.iter(|| black_box(cart.subtotal()))
        });
    }

    group.finish();
}

fn bench_checkout_submit(c: &mut Criterion) {
    let rt = Runtime::new().expect("Failed to create runtime");
    let catalog = test_catalog(5);

    c.bench_function("checkout_submit", |b| {
        let checkout = CartCheckout::new(Arc::new(SimulatedOrderService::reliable()));
        let draft = CheckoutDraft::new("Benchmark Customer", "1 Benchmark Street");

        b.iter(|| {
            rt.block_on(async {
                for item in &catalog {
                    checkout.add_item(item).await;
                }
                let confirmation = checkout.submit(&draft).await.expect("submit failed");
                checkout.start_new_order().await.expect("reset failed");
                black_box(confirmation.order_id)
            })
        })
    });
}

criterion_group!(
    benches,
    bench_cart_mutations,
    bench_subtotal,
    bench_checkout_submit
);
criterion_main!(benches);
