//! Space distribution.
//!
//! Every container in this crate ends up with the same question: given a
//! handful of sizes and some signed slack, how much does each size move?
//! [`distribute`] answers it. Growth always goes to the smallest values
//! first so that equal values move together and the result does not depend
//! on iteration order.

use smallvec::SmallVec;
use trellis_core::MAX_SIZE;

type Order = SmallVec<[usize; 16]>;

/// Distribute `amount` over `values`, bounded per element by `ceilings`.
///
/// A positive `amount` grows values toward their ceilings, smallest first.
/// A negative `amount` shrinks values toward the floors given in `ceilings`.
/// Returns the part of `amount` that could not be placed; it carries the
/// sign of `amount`.
///
/// Extra elements in the longer of the two slices are ignored.
pub fn distribute(amount: i32, values: &mut [i32], ceilings: &[i32]) -> i32 {
    let len = values.len().min(ceilings.len());
    if amount == 0 || len == 0 {
        return amount;
    }

    let mut wide: SmallVec<[i64; 16]> = values[..len].iter().map(|&v| i64::from(v)).collect();
    let limits: SmallVec<[i64; 16]> = ceilings[..len].iter().map(|&c| i64::from(c)).collect();

    let leftover = if amount > 0 {
        grow(i64::from(amount), &mut wide, &limits)
    } else {
        -shrink(-i64::from(amount), &mut wide, &limits)
    };

    for (value, new) in values.iter_mut().zip(&wide) {
        *value = narrow(*new);
    }
    narrow(leftover)
}

/// Add `amount` evenly to every slot, remainder on the first slots.
pub fn spread(amount: i32, slots: &mut [i32]) {
    if amount <= 0 || slots.is_empty() {
        return;
    }
    let count = slots.len() as i32;
    let share = amount / count;
    let remainder = (amount % count) as usize;
    for (i, slot) in slots.iter_mut().enumerate() {
        *slot += share + i32::from(i < remainder);
    }
}

/// Add `amount` to every value in equal shares, remainder on the last.
///
/// Unlike [`distribute`] this ignores ceilings, so nothing is ever left over.
pub fn force_grow(amount: i32, values: &mut [i32]) {
    if amount <= 0 || values.is_empty() {
        return;
    }
    let count = values.len() as i32;
    let share = amount / count;
    for value in values.iter_mut() {
        *value += share;
    }
    if let Some(last) = values.last_mut() {
        *last += amount % count;
    }
}

fn narrow(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn grow(amount: i64, values: &mut [i64], ceilings: &[i64]) -> i64 {
    let mut order: Order = (0..values.len()).collect();
    order.sort_by_key(|&i| (values[i], i));

    let mut thresholds: SmallVec<[i64; 16]> = order.iter().map(|&i| values[i]).collect();
    thresholds.dedup();

    let sentinel = ceilings
        .iter()
        .copied()
        .fold(i64::from(MAX_SIZE), i64::max);

    let mut remaining = amount;
    for up_to in thresholds.into_iter().skip(1).chain(std::iter::once(sentinel)) {
        remaining = fill(remaining, up_to, values, ceilings, &order);
        if remaining == 0 {
            break;
        }
    }
    remaining
}

/// Raise every element below `up_to` toward `min(up_to, ceiling)`.
fn fill(mut amount: i64, up_to: i64, values: &mut [i64], ceilings: &[i64], order: &[usize]) -> i64 {
    let target = |i: usize| up_to.min(ceilings[i]);

    let total: i64 = order
        .iter()
        .filter(|&&i| values[i] < target(i))
        .map(|&i| target(i) - values[i])
        .sum();
    if total == 0 {
        return amount;
    }
    if total <= amount {
        for &i in order {
            values[i] = values[i].max(target(i));
        }
        return amount - total;
    }

    // Not enough to reach the threshold: hand out equal portions, at least
    // one pixel each, so every pass consumes something.
    while amount > 0 {
        let count = order.iter().filter(|&&i| values[i] < target(i)).count() as i64;
        if count == 0 {
            break;
        }
        let portion = (amount / count).max(1);
        for &i in order {
            if amount == 0 {
                break;
            }
            let room = target(i) - values[i];
            if room > 0 {
                let step = portion.min(room).min(amount);
                values[i] += step;
                amount -= step;
            }
        }
    }
    amount
}

/// Shrink by reflecting each value around its original: the originals grow
/// against mirrored ceilings `2 * value - floor`, and `2 * value - grown` is
/// the shrunk result.
fn shrink(amount: i64, values: &mut [i64], floors: &[i64]) -> i64 {
    let originals: SmallVec<[i64; 16]> = values.iter().copied().collect();
    let mirrored: SmallVec<[i64; 16]> = originals
        .iter()
        .zip(floors)
        .map(|(&value, &floor)| 2 * value - floor)
        .collect();

    let leftover = grow(amount, values, &mirrored);
    for (value, original) in values.iter_mut().zip(&originals) {
        *value = 2 * original - *value;
    }
    leftover
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_equalizes_smallest_first() {
        let mut values = [10, 30, 20];
        let leftover = distribute(15, &mut values, &[MAX_SIZE; 3]);
        assert_eq!(leftover, 0);
        assert_eq!(values, [23, 30, 22]);
    }

    #[test]
    fn test_grow_even_split() {
        let mut values = [50, 50, 50];
        assert_eq!(distribute(30, &mut values, &[MAX_SIZE; 3]), 0);
        assert_eq!(values, [60, 60, 60]);
    }

    #[test]
    fn test_grow_stops_at_ceilings() {
        let mut values = [10, 10];
        let leftover = distribute(50, &mut values, &[20, 25]);
        assert_eq!(values, [20, 25]);
        assert_eq!(leftover, 25);
    }

    #[test]
    fn test_value_above_ceiling_untouched() {
        let mut values = [40, 10];
        let leftover = distribute(10, &mut values, &[30, MAX_SIZE]);
        assert_eq!(values, [40, 20]);
        assert_eq!(leftover, 0);
    }

    #[test]
    fn test_shrink_respects_floors() {
        let mut values = [40, 200];
        let leftover = distribute(-140, &mut values, &[10, 10]);
        assert_eq!(leftover, 0);
        assert_eq!(values, [10, 90]);
    }

    #[test]
    fn test_shrink_reports_shortfall() {
        let mut values = [40, 30];
        let leftover = distribute(-100, &mut values, &[10, 20]);
        assert_eq!(values, [10, 20]);
        assert_eq!(leftover, -60);
    }

    #[test]
    fn test_empty_and_zero() {
        let mut empty: [i32; 0] = [];
        assert_eq!(distribute(10, &mut empty, &[]), 10);

        let mut values = [5];
        assert_eq!(distribute(0, &mut values, &[MAX_SIZE]), 0);
        assert_eq!(values, [5]);
    }

    #[test]
    fn test_spread_remainder_first() {
        let mut gaps = [0, 0, 0];
        spread(8, &mut gaps);
        assert_eq!(gaps, [3, 3, 2]);
    }

    #[test]
    fn test_force_grow_remainder_last() {
        let mut values = [30, 30];
        force_grow(61, &mut values);
        assert_eq!(values, [60, 61]);
    }
}
