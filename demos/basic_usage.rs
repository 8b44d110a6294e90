// ============================================================================
// Basic Usage Example
// ============================================================================

use compressed_decimal::prelude::*;

fn main() {
    println!("=== Compressed Decimal Example ===\n");

    let config = AccumulatorConfig::currency();
    println!(
        "Accumulator: {} limbs at scale {} ({} bytes of state)\n",
        config.size,
        config.scale,
        config.state_size()
    );

    let rows: Vec<ExternalValue> = vec![
        19.99f64.into(),
        "5.01".into(),
        120i64.into(),
        ExternalValue::Null,
        rust_decimal::Decimal::new(-250, 2).into(),
        "not a number".into(),
    ];

    // Heap sum for one bucket
    println!("Heap sum...");
    let mut heap = SumAggregator::new(config.clone()).unwrap();
    for row in rows.iter().cloned() {
        heap.aggregate(row).unwrap();
    }
    println!("  total = {}", heap.get());

    // The same rows, two buckets side by side in one aggregation buffer
    println!("\nBuffer sum...");
    let buffered = BufferSumAggregator::new(config).unwrap();
    let state = buffered.state_size();
    let mut buf = vec![0u8; 2 * state];
    buffered.init(&mut buf, 0).unwrap();
    buffered.init(&mut buf, state).unwrap();

    for (i, row) in rows.into_iter().enumerate() {
        let position = (i % 2) * state;
        buffered.aggregate(&mut buf, position, row).unwrap();
    }

    let even = buffered.get(&buf, 0).unwrap();
    let odd = buffered.get(&buf, state).unwrap();
    println!("  bucket 0 = {}", even);
    println!("  bucket 1 = {}", odd);

    // Merge the buffer buckets into a fresh heap sum
    let mut merged = SumAggregator::new(buffered.config().clone()).unwrap();
    merged.combine(&even).unwrap();
    merged.combine(&odd).unwrap();
    println!("  merged   = {}", merged.get());

    // Digits below the configured scale are reported, never rounded
    println!("\nPrecision check...");
    match heap.aggregate("0.001".into()) {
        Ok(()) => println!("  accepted"),
        Err(err) => println!("  rejected: {}", err),
    }

    println!("\n=== Example Complete ===");
}
