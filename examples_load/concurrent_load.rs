use std::sync::Arc;
use std::thread;
use std::time::Instant;

use gelf_logger::noop_sink::NoopSink;
use gelf_logger::{fields, LoggerConfig};

fn main() {
    let logger = LoggerConfig::default().build(Arc::new(NoopSink));
    let base = logger.with_fields(fields! { "service" => "load-test", "region" => "eu-west-1" });

    let threads: u64 = 8;
    let per_thread: u64 = 100_000;
    let start = Instant::now();

    thread::scope(|scope| {
        for t in 0..threads {
            let entry = base.with_field("thread", t);
            scope.spawn(move || {
                for i in 0..per_thread {
                    entry.infof(format_args!("load test record {i}"));
                }
            });
        }
    });

    let n = threads * per_thread;
    let elapsed = start.elapsed();
    println!(
        "formatted {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
