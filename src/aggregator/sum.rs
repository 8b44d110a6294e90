// ============================================================================
// Sum Aggregators
// Heap-backed and buffer-backed decimal sums over coerced row values
// ============================================================================

use super::config::AccumulatorConfig;
use crate::numeric::{
    accumulate_buffer, read_region, to_fixed_width, ArrayDecimal, BufferDecimal,
    DecimalError, DecimalResult, ExternalValue, FixedWidthDecimal,
};

/// Coerce a row value and align it exactly to the configured scale.
///
/// `Ok(None)` means the row contributes nothing: it was null, or it was
/// unparseable and parsing is lenient. Digits below the configured scale
/// are a `PrecisionLoss` error in either parsing mode.
fn prepare_operand(
    value: ExternalValue,
    config: &AccumulatorConfig,
) -> DecimalResult<Option<ArrayDecimal>> {
    let operand = match to_fixed_width(value) {
        Ok(Some(operand)) => operand,
        Ok(None) => return Ok(None),
        Err(err @ (DecimalError::InvalidInput(_) | DecimalError::NonFinite))
            if !config.strict_number_parsing =>
        {
            tracing::warn!(error = %err, "skipping unparseable value");
            return Ok(None);
        },
        Err(err) => return Err(err),
    };

    align(operand, config.scale).map(Some)
}

fn align(operand: ArrayDecimal, scale: u32) -> DecimalResult<ArrayDecimal> {
    if operand.scale() == scale {
        Ok(operand)
    } else {
        ArrayDecimal::from_rescaled(&operand.to_decimal(), scale)
    }
}

// ============================================================================
// Heap Sum
// ============================================================================

/// Running sum for one aggregation bucket.
///
/// Operands wider than the configured size wrap, like any fixed-width sum.
#[derive(Debug, Clone)]
pub struct SumAggregator {
    config: AccumulatorConfig,
    sum: ArrayDecimal,
}

impl SumAggregator {
    /// Create an empty sum.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: AccumulatorConfig) -> DecimalResult<Self> {
        config.validate()?;
        let sum = ArrayDecimal::zero(config.size, config.scale);
        Ok(Self { config, sum })
    }

    /// Add one row value.
    ///
    /// Nulls are skipped. Values at another scale are rescaled exactly.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if the value has nonzero digits below the
    /// configured scale; the sum is unchanged.
    pub fn aggregate(&mut self, value: ExternalValue) -> DecimalResult<()> {
        if let Some(operand) = prepare_operand(value, &self.config)? {
            tracing::trace!(operand = %operand, "aggregating");
            self.sum.accumulate(&operand)?;
        }
        Ok(())
    }

    /// Merge another partial sum into this one.
    ///
    /// # Errors
    /// Returns `PrecisionLoss` if `other` cannot be rescaled exactly.
    pub fn combine<D: FixedWidthDecimal + ?Sized>(&mut self, other: &D) -> DecimalResult<()> {
        if other.scale() == self.config.scale {
            self.sum.accumulate(other)?;
        } else {
            let aligned = ArrayDecimal::from_rescaled(&other.to_decimal(), self.config.scale)?;
            self.sum.accumulate(&aligned)?;
        }
        Ok(())
    }

    /// Current total.
    pub fn get(&self) -> ArrayDecimal {
        self.sum.clone()
    }

    /// Borrow the current total.
    pub fn sum(&self) -> &ArrayDecimal {
        &self.sum
    }

    /// Back to zero, keeping the configuration.
    pub fn reset(&mut self) {
        self.sum.reset();
    }

    /// Configuration in use.
    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }
}

// ============================================================================
// Buffer Sum
// ============================================================================

/// Sum whose state lives in a caller-managed aggregation buffer.
///
/// Holds only configuration; each call addresses `state_size()` bytes at a
/// caller-given position.
#[derive(Debug, Clone)]
pub struct BufferSumAggregator {
    config: AccumulatorConfig,
}

impl BufferSumAggregator {
    /// # Errors
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: AccumulatorConfig) -> DecimalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Bytes of buffer state per bucket.
    pub fn state_size(&self) -> usize {
        self.config.state_size()
    }

    /// Zero the state at `position`.
    pub fn init(&self, buf: &mut [u8], position: usize) -> DecimalResult<()> {
        BufferDecimal::new(buf, position, self.config.size, self.config.scale)?.reset();
        Ok(())
    }

    /// Add one row value into the state at `position`.
    ///
    /// # Errors
    /// - `ArgumentSize` if the value needs more limbs than configured
    /// - `PrecisionLoss` if the value has digits below the configured scale
    ///
    /// The state is unchanged on error.
    pub fn aggregate(
        &self,
        buf: &mut [u8],
        position: usize,
        value: ExternalValue,
    ) -> DecimalResult<()> {
        match prepare_operand(value, &self.config)? {
            Some(operand) => accumulate_buffer(
                buf,
                position,
                self.config.size,
                self.config.scale,
                &operand,
            ),
            None => Ok(()),
        }
    }

    /// Materialize the state at `position`.
    pub fn get(&self, buf: &[u8], position: usize) -> DecimalResult<ArrayDecimal> {
        read_region(buf, position, self.config.size, self.config.scale)
    }

    /// Configuration in use.
    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_mixed_inputs() {
        let mut agg = SumAggregator::new(AccumulatorConfig::currency()).unwrap();
        agg.aggregate(10i64.into()).unwrap();
        agg.aggregate("2.50".into()).unwrap();
        agg.aggregate(0.25f64.into()).unwrap();
        agg.aggregate(ExternalValue::Null).unwrap();
        agg.aggregate(rust_decimal::Decimal::new(-75, 2).into()).unwrap();
        assert_eq!(agg.get().to_string(), "12.00");
    }

    #[test]
    fn test_sum_rejects_digits_below_scale() {
        let mut agg = SumAggregator::new(AccumulatorConfig::currency()).unwrap();
        agg.aggregate("1.25".into()).unwrap();

        assert_eq!(
            agg.aggregate("0.001".into()),
            Err(DecimalError::PrecisionLoss {
                from_scale: 3,
                to_scale: 2
            })
        );
        // trailing zeros below the scale are fine
        agg.aggregate("1.000".into()).unwrap();
        assert_eq!(agg.get().to_string(), "2.25");
    }

    #[test]
    fn test_precision_loss_is_reported_even_when_lenient() {
        let config = AccumulatorConfig::currency().with_strict_number_parsing(false);
        let agg = BufferSumAggregator::new(config).unwrap();
        let mut buf = vec![0u8; agg.state_size()];
        agg.init(&mut buf, 0).unwrap();

        assert!(matches!(
            agg.aggregate(&mut buf, 0, 0.125f64.into()),
            Err(DecimalError::PrecisionLoss { .. })
        ));
        assert!(agg.get(&buf, 0).unwrap().is_zero());
    }

    #[test]
    fn test_lenient_parsing_skips_garbage() {
        let mut agg = SumAggregator::new(AccumulatorConfig::currency()).unwrap();
        agg.aggregate("garbage".into()).unwrap();
        agg.aggregate(f64::INFINITY.into()).unwrap();
        agg.aggregate(1i32.into()).unwrap();
        assert_eq!(agg.get().to_string(), "1.00");
    }

    #[test]
    fn test_strict_parsing_reports_garbage() {
        let config = AccumulatorConfig::currency().with_strict_number_parsing(true);
        let mut agg = SumAggregator::new(config).unwrap();
        assert_eq!(
            agg.aggregate("garbage".into()),
            Err(DecimalError::InvalidInput("garbage".to_string()))
        );
    }

    #[test]
    fn test_unsupported_type_is_always_an_error() {
        let mut agg = SumAggregator::new(AccumulatorConfig::currency()).unwrap();
        assert_eq!(
            agg.aggregate(true.into()),
            Err(DecimalError::UnsupportedType("bool"))
        );
    }

    #[test]
    fn test_combine_and_reset() {
        let mut left = SumAggregator::new(AccumulatorConfig::currency()).unwrap();
        let mut right = SumAggregator::new(AccumulatorConfig::currency()).unwrap();
        left.aggregate(5i64.into()).unwrap();
        right.aggregate("0.5".into()).unwrap();

        left.combine(right.sum()).unwrap();
        assert_eq!(left.get().to_string(), "5.50");

        left.combine(&ArrayDecimal::from_i64(25, 1)).unwrap();
        assert_eq!(left.get().to_string(), "8.00");

        assert!(matches!(
            left.combine(&ArrayDecimal::from_i64(1, 3)),
            Err(DecimalError::PrecisionLoss { .. })
        ));
        assert_eq!(left.get().to_string(), "8.00");

        left.reset();
        assert!(left.sum().is_zero());
        assert_eq!(left.sum().size(), 4);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(SumAggregator::new(AccumulatorConfig::new(0, 2)).is_err());
        assert!(BufferSumAggregator::new(AccumulatorConfig::new(0, 2)).is_err());
    }

    #[test]
    fn test_buffer_sum_lifecycle() {
        let agg = BufferSumAggregator::new(AccumulatorConfig::currency()).unwrap();
        let position = 16;
        let mut buf = vec![0xABu8; position + agg.state_size()];

        agg.init(&mut buf, position).unwrap();
        assert!(agg.get(&buf, position).unwrap().is_zero());

        agg.aggregate(&mut buf, position, "19.99".into()).unwrap();
        agg.aggregate(&mut buf, position, 1i64.into()).unwrap();
        agg.aggregate(&mut buf, position, ExternalValue::Null).unwrap();
        assert_eq!(agg.get(&buf, position).unwrap().to_string(), "20.99");

        // bytes before the state are untouched
        assert!(buf[..position].iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn test_buffer_sum_rejects_value_wider_than_state() {
        let agg = BufferSumAggregator::new(AccumulatorConfig::long_compatible(0)).unwrap();
        let mut buf = vec![0u8; agg.state_size()];
        agg.init(&mut buf, 0).unwrap();

        let huge = ExternalValue::Text("1".repeat(30));
        assert!(matches!(
            agg.aggregate(&mut buf, 0, huge),
            Err(DecimalError::ArgumentSize { lhs: 2, .. })
        ));
        assert!(agg.get(&buf, 0).unwrap().is_zero());
    }
}
