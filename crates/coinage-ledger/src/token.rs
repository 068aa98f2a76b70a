// crates/coinage-ledger/src/token.rs
//
// Display scaling for token amounts.
//
// Every balance and supply figure in the ledger is an unscaled amount in the
// token's smallest unit. The scaling factor is a fixed-point multiplier with
// a 10^12 denominator that converts an unscaled amount into the rebased
// display value. Scaling is read-only: it never feeds back into accounting.

/// Unscaled token amount (smallest indivisible unit).
pub type Amount = u64;

/// Fixed-point denominator for scaling factors: 10^12.
pub const SCALING_FACTOR_DENOMINATOR: u64 = 1_000_000_000_000;

/// The identity scaling factor. `scale(x, IDENTITY_SCALING_FACTOR) == x`.
pub const IDENTITY_SCALING_FACTOR: u64 = SCALING_FACTOR_DENOMINATOR;

/// Apply a scaling factor to an unscaled amount.
///
/// Computes `floor(unscaled * scaling_factor / 10^12)` in `u128`. The product
/// of two `u64` values always fits in `u128`, and the quotient is returned
/// as `u128` because a factor above 10^12 can push the result past `u64::MAX`.
pub fn scale(unscaled: Amount, scaling_factor: u64) -> u128 {
    (unscaled as u128 * scaling_factor as u128) / SCALING_FACTOR_DENOMINATOR as u128
}

/// Render an amount with the given number of decimal places.
///
/// Trailing fractional zeros are trimmed, so `format_amount(1_500_000, 6)`
/// is `"1.5"` and `format_amount(2_000_000, 6)` is `"2"`.
pub fn format_amount(amount: u128, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    // 10^38 is the largest power of ten that fits in u128.
    let Some(base) = 10u128.checked_pow(decimals as u32) else {
        let digits = amount.to_string();
        let width = decimals as usize;
        let padded = format!("{:0>width$}", digits, width = width + 1);
        let (whole, frac) = padded.split_at(padded.len() - width);
        let trimmed = frac.trim_end_matches('0');
        return if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, trimmed)
        };
    };
    let whole = amount / base;
    let frac = amount % base;
    if frac == 0 {
        whole.to_string()
    } else {
        let frac_str = format!("{:0width$}", frac, width = decimals as usize);
        format!("{}.{}", whole, frac_str.trim_end_matches('0'))
    }
}
