#[macro_export]
macro_rules! assert_approx_eq {
    ($expected:expr, $actual:expr) => {
        $crate::assert_approx_eq!($expected, $actual, 1e-10)
    };
    ($expected:expr, $actual:expr, $eps:expr) => {{
        let expected: f64 = $expected;
        let actual: f64 = $actual;
        assert!(
            (expected - actual).abs() < $eps,
            "Expected {} (within {}), but got {}",
            expected,
            $eps,
            actual
        );
    }};
}
