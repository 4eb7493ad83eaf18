//! Property-based tests for dimension merging and constant reduction.

#[cfg(test)]
mod tests {
    use dashu_int::UBig;
    use proptest::prelude::*;

    use crate::{merge, reduce, Coefficient, DimList, UnitId};

    // Strategy for generating valid dimension vectors over a small id space
    fn dim_list() -> impl Strategy<Value = DimList> {
        prop::collection::vec((0u32..12, -4i32..=4), 0..8)
            .prop_map(|pairs| DimList::from_entries(pairs.into_iter().map(|(u, e)| (UnitId(u), e))).unwrap())
    }

    fn positive() -> impl Strategy<Value = u64> {
        1u64..1_000_000
    }

    fn is_valid(list: &DimList) -> bool {
        let entries = list.entries();
        entries.iter().all(|&(_, e)| e != 0)
            && entries.windows(2).all(|w| w[0].0 > w[1].0)
    }

    fn gcd(mut a: u64, mut b: u64) -> u64 {
        while b != 0 {
            let t = a % b;
            a = b;
            b = t;
        }
        a
    }

    proptest! {
        #[test]
        fn merge_with_empty_is_identity(list in dim_list()) {
            prop_assert_eq!(merge(&list, &DimList::empty(), 1).unwrap(), list);
        }

        #[test]
        fn merge_with_self_cancels(list in dim_list()) {
            prop_assert!(merge(&list, &list, -1).unwrap().is_empty());
        }

        #[test]
        fn merge_output_is_sorted_and_zero_free(
            a in dim_list(),
            b in dim_list(),
            k in prop_oneof![Just(1), Just(-1), -3i32..=3],
        ) {
            prop_assert!(is_valid(&merge(&a, &b, k).unwrap()));
        }

        #[test]
        fn merge_matches_exponent_sums(a in dim_list(), b in dim_list(), k in -3i32..=3) {
            let merged = merge(&a, &b, k).unwrap();
            for u in 0..12 {
                let id = UnitId(u);
                prop_assert_eq!(merged.exponent_of(id), a.exponent_of(id) + k * b.exponent_of(id));
            }
        }

        #[test]
        fn scaled_never_wraps(e in any::<i32>(), k in any::<i32>()) {
            let list = DimList::single(UnitId(0), e);
            match (e.checked_mul(k), list.scaled(k)) {
                (Some(0), Ok(scaled)) => prop_assert!(scaled.is_empty()),
                (Some(p), Ok(scaled)) => prop_assert_eq!(scaled.exponent_of(UnitId(0)), p),
                (None, Err(err)) => prop_assert_eq!(err.code(), "EXPONENT_OVERFLOW"),
                (expected, got) => prop_assert!(false, "{:?} vs {:?}", expected, got),
            }
        }

        #[test]
        fn reduce_gives_coprime_pair_with_same_ratio(n in positive(), d in positive()) {
            let (top, bottom) = reduce(Coefficient::from_u64(n), Coefficient::from_u64(d));
            let top = top.to_u64().unwrap();
            let bottom = bottom.to_u64().unwrap();
            prop_assert_eq!(gcd(top, bottom), 1);
            prop_assert_eq!(
                UBig::from(top) * UBig::from(d),
                UBig::from(bottom) * UBig::from(n)
            );
        }

        #[test]
        fn reduce_leaves_approx_untouched(x in 0.001f64..1e6, d in positive()) {
            let (top, bottom) = reduce(Coefficient::Approx(x), Coefficient::from_u64(d));
            prop_assert_eq!(top, Coefficient::Approx(x));
            prop_assert_eq!(bottom, Coefficient::from_u64(d));
        }
    }
}
