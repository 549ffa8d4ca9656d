use hazprop_core::model::Pmf;
use hazprop_hist::convolve;
use proptest::prelude::*;

/// A random valid PMF: a handful of decades somewhere in the AfE range,
/// bins normalized to unit mass.
fn arb_pmf() -> impl Strategy<Value = Pmf> {
    (
        -8i32..-1,
        1usize..3,
        2usize..6,
        proptest::collection::vec(0.01f64..1.0, 2 * 6),
    )
        .prop_map(|(min_power, num_powers, resolution, raw)| {
            let n = num_powers * resolution;
            let total: f64 = raw[..n].iter().sum();
            let bins = raw[..n].iter().map(|v| v / total).collect();
            Pmf::new(min_power, num_powers, resolution, bins)
        })
}

proptest! {
    #[test]
    fn convolution_is_commutative(a in arb_pmf(), b in arb_pmf()) {
        let ab = convolve(&a, &b, None).unwrap();
        let ba = convolve(&b, &a, None).unwrap();
        prop_assert_eq!(ab.min_power, ba.min_power);
        prop_assert_eq!(ab.num_powers, ba.num_powers);
        prop_assert_eq!(ab.bins.len(), ba.bins.len());
        for (x, y) in ab.bins.iter().zip(&ba.bins) {
            prop_assert!((x - y).abs() < 1e-12);
        }
    }
}

proptest! {
    #[test]
    fn output_satisfies_the_pmf_invariants(a in arb_pmf(), b in arb_pmf()) {
        let out = convolve(&a, &b, None).unwrap();
        prop_assert_eq!(out.bins.len(), out.resolution * out.num_powers);
        prop_assert!((out.mass() - 1.0).abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn output_range_brackets_the_summed_endpoints(a in arb_pmf(), b in arb_pmf()) {
        let out = convolve(&a, &b, None).unwrap();
        let lo_sum = 10f64.powi(a.min_power) + 10f64.powi(b.min_power);
        let hi_sum = 10f64.powi(a.max_power()) + 10f64.powi(b.max_power());
        prop_assert!(10f64.powi(out.min_power) <= lo_sum);
        prop_assert!(lo_sum < 10f64.powi(out.min_power + 1));
        prop_assert!(10f64.powi(out.max_power()) >= hi_sum);
    }
}
