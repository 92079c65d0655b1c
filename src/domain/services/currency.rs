//! USD to FCFA conversion and price formatting.

/// Fixed exchange rate, FCFA per USD.
pub const USD_TO_FCFA: f64 = 661.28;

const FCFA_GROUP_SEPARATOR: char = ' ';
const FCFA_DECIMAL_SEPARATOR: char = ',';
const FCFA_MAX_FRACTION_DIGITS: u32 = 3;

/// Rounds to the nearest integer, halves going towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Rounds and narrows to whole FCFA.
pub fn to_whole_fcfa(value: f64) -> i64 { round_half_up(value) as i64 }

/// Converts a USD amount to whole FCFA. Negative and zero amounts go
/// through the same formula.
pub fn convert_to_fcfa(usd: f64) -> i64 { to_whole_fcfa(usd * USD_TO_FCFA) }

/// Storefront price in FCFA for a USD catalog price.
///
/// Currently the plain conversion. Cart pages once applied
/// `((usd * rate) + 70) * 1.10`; whether that markup belongs here is a
/// product decision and is deliberately not applied.
pub fn calculate_product_price(usd: f64) -> i64 { to_whole_fcfa(usd * USD_TO_FCFA) }

/// Formats an amount with French digit grouping, e.g. `66 128 FCFA`.
///
/// Up to three fraction digits are kept, trailing zeros dropped.
pub fn format_fcfa(amount: f64) -> String {
    let scale = 10_u64.pow(FCFA_MAX_FRACTION_DIGITS);
    let scaled = round_half_up(amount.abs() * scale as f64) as u64;
    let (whole, fraction) = (scaled / scale, scaled % scale);

    let mut out = String::new();
    if amount < 0.0 && scaled != 0 {
        out.push('-');
    }
    out.push_str(&group_thousands(whole, FCFA_GROUP_SEPARATOR));
    if fraction != 0 {
        let digits = format!("{:0width$}", fraction, width = FCFA_MAX_FRACTION_DIGITS as usize);
        out.push(FCFA_DECIMAL_SEPARATOR);
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push_str(" FCFA");
    out
}

/// Formats a USD amount with two decimals, e.g. `$20.00`.
///
/// Cents are rounded half away from zero, so `0.125` shows as `$0.13`.
pub fn format_usd(amount: f64) -> String {
    let cents = round_half_up(amount.abs() * 100.0).copysign(amount);
    format!("${:.2}", cents / 100.0)
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
