// Number formatting shared by the slider labels and the verdict panels.
//
// Digits come from the exact binary value, so 1.45 (stored as 1.4499...)
// prints "1.4". Rust's `{:.N}` settles exact halves to even (8.25 -> "8.2");
// displayed values settle them away from zero instead (8.25 -> "8.3").

/// True when `value` lies exactly halfway between two `decimals`-place
/// numbers, i.e. `value * 2 * 10^decimals` is an odd integer.
fn is_exact_half(value: f64, decimals: u32) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }
    let bits = value.to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exp_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exp_bits - 1075)
    };
    // value = mantissa * 2^exponent and 5^decimals is odd, so the scaled
    // value is an odd integer iff the powers of two cancel exactly.
    mantissa.trailing_zeros() as i64 + exponent + 1 + decimals as i64 == 0
}

/// Format `value` with exactly `decimals` fractional digits, exact halves
/// away from zero.
pub fn fixed(value: f64, decimals: u32) -> String {
    let places = decimals as usize;
    if is_exact_half(value, decimals) {
        // An exact half scales without error.
        let factor = 10f64.powi(decimals as i32);
        return format!("{:.*}", places, (value * factor).round() / factor);
    }
    format!("{:.*}", places, value)
}

/// `"$"` followed by the amount to two decimals.
pub fn money(value: f64) -> String {
    format!("${}", fixed(value, 2))
}

/// Slider label text.
pub fn one_decimal(value: f64) -> String {
    fixed(value, 1)
}

/// A probability in [0, 1] as a whole percentage, without the `%` sign.
pub fn whole_percent(probability: f64) -> String {
    fixed(probability * 100.0, 0)
}
