//! Display formatting for prices and clamping for user-entered quantities.

use rust_decimal::{Decimal, RoundingStrategy};

/// Currency symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "₱";

/// Smallest quantity a cart line may hold.
pub const MIN_QUANTITY: u32 = 1;

/// Maximum fraction digits shown by [`money`].
const MONEY_MAX_FRACTION_DIGITS: u32 = 3;

/// Format an amount as a peso display string with en-US digit grouping.
///
/// At most three fraction digits are kept (rounded half away from zero) and
/// trailing zeros are dropped, so `1234.50` renders as `"₱1,234.5"`.
#[must_use]
pub fn money(amount: Decimal) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_thousands(amount))
}

fn group_thousands(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(
            MONEY_MAX_FRACTION_DIGITS,
            RoundingStrategy::MidpointAwayFromZero,
        )
        .normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let text = rounded.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3 + 1);
    out.push_str(sign);
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Parse the leading integer of `input`, ignoring leading whitespace and any
/// trailing garbage (`"3abc"` → 3, `"2.9"` → 2). Returns `None` when no digit
/// follows the optional sign.
#[must_use]
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = if let Some(rest) = trimmed.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (false, rest)
    } else {
        (false, trimmed)
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = rest.get(..end)?;
    if digits.is_empty() {
        return None;
    }

    // Overflowing digit runs saturate rather than fail.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Clamp free-form text to an integer no smaller than `min`.
///
/// Non-numeric input yields `min`.
#[must_use]
pub fn clamp_int(input: &str, min: u32) -> u32 {
    parse_leading_int(input).map_or(min, |n| clamp_count(n, min))
}

/// Clamp a signed count to the `[min, u32::MAX]` range.
#[must_use]
pub fn clamp_count(n: i64, min: u32) -> u32 {
    let floored = n.max(i64::from(min));
    u32::try_from(floored).unwrap_or(u32::MAX)
}

/// Conversion of raw quantity input into a clamped cart quantity (≥ 1).
pub trait IntoQuantity {
    fn into_quantity(self) -> u32;
}

impl IntoQuantity for &str {
    fn into_quantity(self) -> u32 {
        clamp_int(self, MIN_QUANTITY)
    }
}

impl IntoQuantity for String {
    fn into_quantity(self) -> u32 {
        clamp_int(&self, MIN_QUANTITY)
    }
}

impl IntoQuantity for &String {
    fn into_quantity(self) -> u32 {
        clamp_int(self, MIN_QUANTITY)
    }
}

impl IntoQuantity for i64 {
    fn into_quantity(self) -> u32 {
        clamp_count(self, MIN_QUANTITY)
    }
}

impl IntoQuantity for i32 {
    fn into_quantity(self) -> u32 {
        clamp_count(i64::from(self), MIN_QUANTITY)
    }
}

impl IntoQuantity for u32 {
    fn into_quantity(self) -> u32 {
        self.max(MIN_QUANTITY)
    }
}

impl IntoQuantity for f64 {
    fn into_quantity(self) -> u32 {
        if !self.is_finite() {
            return MIN_QUANTITY;
        }
        // `as` saturates for out-of-range floats.
        #[allow(clippy::cast_possible_truncation)]
        let whole = self.trunc() as i64;
        clamp_count(whole, MIN_QUANTITY)
    }
}
