// ============================================================================
// Property Tests
// Algebraic laws of fixed-width accumulation
// ============================================================================

use super::*;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use proptest::prelude::*;

fn sum_into(size: usize, scale: u32, values: &[i64]) -> ArrayDecimal {
    let mut total = ArrayDecimal::zero(size, scale);
    for &v in values {
        accumulate_i64(&mut total, v, scale).unwrap();
    }
    total
}

proptest! {
    #[test]
    fn accumulation_order_does_not_matter(
        values in prop::collection::vec(any::<i32>(), 0..40),
        scale in 0u32..6,
    ) {
        let values: Vec<i64> = values.into_iter().map(i64::from).collect();
        let mut reversed = values.clone();
        reversed.reverse();
        let mut sorted = values.clone();
        sorted.sort_unstable();

        let forward = sum_into(3, scale, &values);
        prop_assert_eq!(&forward, &sum_into(3, scale, &reversed));
        prop_assert_eq!(&forward, &sum_into(3, scale, &sorted));

        let expected: i64 = values.iter().sum();
        prop_assert_eq!(forward.unscaled(), BigInt::from(expected));
    }

    #[test]
    fn single_limb_sum_wraps_modulo_2_pow_32(
        values in prop::collection::vec(any::<i64>(), 1..20),
    ) {
        let total = sum_into(1, 0, &values);
        let expected = values.iter().fold(0i32, |acc, &v| acc.wrapping_add(v as i32));
        prop_assert_eq!(total.limbs(), &[expected][..]);
    }

    #[test]
    fn literal_roundtrips_through_limbs(
        unscaled in any::<i64>(),
        scale in 0u32..18,
        extra_limbs in 0usize..3,
    ) {
        let literal = BigDecimal::new(BigInt::from(unscaled), i64::from(scale));
        let value = ArrayDecimal::with_size(&literal, 2 + extra_limbs, scale).unwrap();
        prop_assert_eq!(value.to_decimal(), literal);
        prop_assert_eq!(value.size(), 2 + extra_limbs);
    }

    #[test]
    fn raising_scale_preserves_value(
        unscaled in any::<i64>(),
        scale in 0u32..9,
        raise in 0u32..9,
    ) {
        let value = ArrayDecimal::from_i64(unscaled, scale);
        let raised = scale_up_to(&value, scale + raise).unwrap();
        prop_assert_eq!(raised.scale(), scale + raise);
        prop_assert_eq!(raised.to_decimal(), value.to_decimal());
    }

    #[test]
    fn lowering_scale_rounds_away_from_zero(
        unscaled in any::<i64>(),
        scale in 1u32..12,
        drop in 1u32..6,
    ) {
        let target = scale.saturating_sub(drop);
        let value = ArrayDecimal::from_i64(unscaled, scale);

        let divisor = 10i128.pow(scale - target);
        let wide = i128::from(unscaled);
        let mut expected = wide / divisor;
        if wide % divisor != 0 {
            expected += wide.signum();
        }

        prop_assert_eq!(scale_up_to(&value, target).unwrap().unscaled(), BigInt::from(expected));
    }

    #[test]
    fn buffer_and_heap_destinations_agree(
        values in prop::collection::vec(any::<i64>(), 0..20),
        position in 0usize..4,
    ) {
        let size = 3;
        let offset = position * LIMB_BYTES;
        let mut buf = vec![0u8; offset + size * LIMB_BYTES];
        let mut heap = ArrayDecimal::zero(size, 0);

        for &v in &values {
            let operand = ArrayDecimal::from_i64(v, 0);
            accumulate_buffer(&mut buf, offset, size, 0, &operand).unwrap();
            heap.accumulate(&operand).unwrap();
        }

        prop_assert_eq!(read_region(&buf, offset, size, 0).unwrap(), heap);
    }
}
