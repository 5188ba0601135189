//! Benchmarks for the single-slot mailbox
//!
//! Run with: cargo bench mailbox

use std::sync::{Arc, Barrier};
use std::thread;

use ite::{Mailbox, TaskKind, TaskMessage};

fn main() {
    divan::main();
}

fn message(len: usize) -> TaskMessage {
    TaskMessage {
        kind: TaskKind::Build,
        text: "x".repeat(len),
        succeeded: true,
    }
}

#[divan::bench]
fn try_take_empty(bencher: divan::Bencher) {
    let mailbox: Mailbox<TaskMessage> = Mailbox::new();
    bencher.bench_local(|| divan::black_box(mailbox.try_take()));
}

#[divan::bench(args = [16, 4_096, 1_048_576])]
fn offer_then_take(bencher: divan::Bencher, len: usize) {
    let mailbox = Mailbox::new();
    bencher
        .with_inputs(|| message(len))
        .bench_local_values(|msg| {
            mailbox.offer(msg);
            divan::black_box(mailbox.try_take())
        });
}

#[divan::bench]
fn offer_into_full_slot(bencher: divan::Bencher) {
    let mailbox = Mailbox::new();
    mailbox.offer(message(16));
    bencher
        .with_inputs(|| message(16))
        .bench_local_values(|msg| divan::black_box(mailbox.offer(msg)));
}

#[divan::bench(args = [2, 8])]
fn take_while_writers_offer(bencher: divan::Bencher, writers: usize) {
    let mailbox = Mailbox::new();
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let ready = Arc::new(Barrier::new(writers + 1));

    let handles: Vec<_> = (0..writers)
        .map(|_| {
            let mailbox = mailbox.clone();
            let stop = Arc::clone(&stop);
            let ready = Arc::clone(&ready);
            thread::spawn(move || {
                ready.wait();
                while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                    mailbox.offer(message(16));
                }
            })
        })
        .collect();

    ready.wait();
    bencher.bench_local(|| divan::black_box(mailbox.try_take()));

    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    for handle in handles {
        let _ = handle.join();
    }
}
