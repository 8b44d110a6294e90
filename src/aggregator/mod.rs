// ============================================================================
// Aggregator Module
// Decimal sum aggregators driven by an analytics engine
// ============================================================================

mod config;
mod sum;

pub use config::{AccumulatorConfig, MAX_SCALE, MAX_SIZE};
pub use sum::{BufferSumAggregator, SumAggregator};
