//! Latency benchmarks for wallet signing paths.
//!
//! Run with: `cargo bench --bench latency`

use alloy_primitives::{Address, B256, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use exchange_wallet::core::{personal_message_hash, verify, Order, Signable, Trade};
use exchange_wallet::wallet::Wallet;

// Well-known development key (DO NOT USE IN PRODUCTION)
const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn test_wallet() -> Wallet {
    Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap()
}

fn sample_order(maker: Address, nonce: u64) -> Order {
    Order::new(
        Address::repeat_byte(0xee),
        maker,
        Address::repeat_byte(0x01),
        U256::from(1_000_000u64),
        Address::repeat_byte(0x02),
        U256::from(250_000u64),
    )
    .with_nonce(U256::from(nonce))
}

/// Benchmark key import and generation.
fn bench_key_lifecycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_lifecycle");

    group.bench_function("from_private_key", |b| {
        b.iter(|| black_box(Wallet::from_private_key(black_box(TEST_PRIVATE_KEY))))
    });

    group.bench_function("generate", |b| b.iter(|| black_box(Wallet::new())));

    group.finish();
}

/// Benchmark the personal-message hash and raw digest signing.
fn bench_sign_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign_hash");
    let wallet = test_wallet();
    let digest = B256::repeat_byte(0xaa);

    group.throughput(Throughput::Elements(1));
    group.bench_function("personal_message_hash", |b| {
        b.iter(|| black_box(personal_message_hash(black_box(digest))))
    });

    group.bench_function("sign", |b| {
        b.iter(|| black_box(wallet.sign_hash(black_box(digest))))
    });

    let signature = wallet.sign_hash(digest).unwrap();
    group.bench_function("verify", |b| {
        b.iter(|| black_box(verify(black_box(wallet.address()), black_box(digest), &signature)))
    });

    group.finish();
}

/// Benchmark order and trade signing end to end.
fn bench_domain_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain_signing");
    let wallet = test_wallet();

    for batch in [1usize, 10, 100].iter() {
        let orders: Vec<Order> = (0..*batch as u64)
            .map(|n| sample_order(wallet.address(), n))
            .collect();

        group.throughput(Throughput::Elements(*batch as u64));
        group.bench_with_input(BenchmarkId::new("sign_orders", batch), &orders, |b, orders| {
            b.iter(|| {
                let mut orders = orders.clone();
                for order in orders.iter_mut() {
                    wallet.sign_order(order).unwrap();
                }
                black_box(orders)
            })
        });
    }

    let mut order = sample_order(wallet.address(), 1);
    wallet.sign_order(&mut order).unwrap();
    let trade = Trade::for_order(&order, U256::from(500u64), U256::ZERO, wallet.address());

    group.bench_function("sign_trade", |b| {
        b.iter(|| {
            let mut trade = trade.clone();
            wallet.sign_trade(&mut trade).unwrap();
            black_box(trade)
        })
    });

    group.bench_function("order_compute_hash", |b| {
        b.iter(|| black_box(order.compute_hash()))
    });

    group.finish();
}

/// Benchmark the storage record codec.
fn bench_record_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_codec");
    let wallet = test_wallet().with_roles(true, true);
    let record = wallet.to_record();

    group.bench_function("to_record", |b| b.iter(|| black_box(wallet.to_record())));

    group.bench_function("from_record", |b| {
        b.iter(|| black_box(Wallet::from_record(black_box(&record))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_key_lifecycle,
    bench_sign_hash,
    bench_domain_signing,
    bench_record_codec,
);

criterion_main!(benches);
