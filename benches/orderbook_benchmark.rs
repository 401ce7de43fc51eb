use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dex_engine::domain::{Order, OrderBook, Side};
use dex_engine::{AccountId, Ticker};

fn populated_book(levels: u64) -> OrderBook {
    let ticker = Ticker::new("USDT");
    let mut book = OrderBook::new(Side::Buy);
    for i in 0..levels {
        book.insert(Order::new(
            i + 1,
            AccountId(i + 1),
            ticker,
            Side::Buy,
            1 + i,
            10,
        ));
    }
    book
}

fn book_insert_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook insert");
    let master = populated_book(1000);
    let ticker = Ticker::new("USDT");

    group.bench_function("insert into book with 1000 levels", |b| {
        b.iter_batched(
            || {
                let book = master.clone();
                let order = Order::new(0, AccountId(0), ticker, Side::Buy, 500, 10);
                (book, order)
            },
            |(mut book, order)| {
                book.insert(black_box(order));
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn book_sweep_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook sweep");
    let master = populated_book(1000);

    group.bench_function("consume 16 best orders from 1000 levels", |b| {
        b.iter_batched(
            || master.clone(),
            |mut book| {
                for _ in 0..16 {
                    let Some(best) = book.peek_best() else { break };
                    let (id, fill) = (best.id, best.remaining());
                    book.reduce_or_remove(black_box(id), fill);
                }
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, book_insert_benchmark, book_sweep_benchmark);
criterion_main!(benches);
