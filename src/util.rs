pub fn sum_points<'a>(points: impl IntoIterator<Item = &'a f64>) -> f64 {
    let mut sum = 0.0;
    for p in points { sum += p }
    sum
}

// Rounded to two decimals, printed without trailing zeros
pub fn format_points(points: f64) -> String {
    // Adding 0.0 turns -0.0 into 0.0
    let rounded = (points * 100.0).round() / 100.0 + 0.0;

    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        let formatted = format!("{rounded:.2}");
        formatted.trim_end_matches('0').to_string()
    }
}

// Relative comparison, sums of floats don't come out exact
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * f64::max(1.0, f64::max(a.abs(), b.abs()))
}
