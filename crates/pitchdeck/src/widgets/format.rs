//! Number formatting shared by the calculators and live feeds.

/// Placeholder shown for results that have no finite value.
pub const DASH: &str = "\u{2014}";

/// Group an integer with thousands separators: `1234567` → `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn rounded_non_negative(n: f64) -> u64 {
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    n.round() as u64
}

/// Whole dollars, negatives clamped to zero: `$2,000`.
pub fn currency(n: f64) -> String {
    format!("${}", group_thousands(rounded_non_negative(n)))
}

/// Whole number with separators, negatives clamped to zero.
pub fn integer(n: f64) -> String {
    group_thousands(rounded_non_negative(n))
}

/// Two-decimal multiplier: `2.00x`.
pub fn ratio(n: f64) -> String {
    let v = (n * 100.0).round() / 100.0;
    format!("{v:.2}x")
}

/// Apply `f` to finite values, otherwise show a dash.
pub fn or_dash(n: f64, f: impl Fn(f64) -> String) -> String {
    if n.is_finite() { f(n) } else { DASH.to_string() }
}
