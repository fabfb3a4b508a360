//! Mailbox throughput benchmarks.

#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion};

use cadre_rt::mailbox::{Mailbox, MailboxConfig, OverflowStrategy};

fn bench_enqueue_dequeue(c: &mut Criterion) {
    let mailbox: Mailbox<u64> = Mailbox::new(MailboxConfig::bounded(1024));
    c.bench_function("mailbox_enqueue_dequeue", |b| {
        b.iter(|| {
            mailbox.enqueue(1).unwrap();
            mailbox.dequeue().unwrap();
        })
    });
}

fn bench_overflow_drop_newest(c: &mut Criterion) {
    let mailbox: Mailbox<u64> =
        Mailbox::new(MailboxConfig::bounded(1).with_strategy(OverflowStrategy::DropNewest));
    mailbox.enqueue(0).unwrap();
    c.bench_function("mailbox_overflow_drop_newest", |b| {
        b.iter(|| mailbox.enqueue(1).unwrap())
    });
}

criterion_group!(benches, bench_enqueue_dequeue, bench_overflow_drop_newest);
criterion_main!(benches);
