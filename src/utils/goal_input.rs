use serde_json::Value;

/// Read a goal count from a raw form value.
///
/// Strings are read like a lenient integer parse: leading whitespace, an
/// optional sign, then as many digits as follow. Anything missing, empty or
/// non-numeric is 0, and negative counts clamp to 0.
pub fn parse_goal_input(value: Option<&Value>) -> i32 {
    let goals = match value {
        Some(Value::Number(number)) => {
            if let Some(n) = number.as_i64() {
                n
            } else if let Some(f) = number.as_f64() {
                f.trunc() as i64
            } else {
                0
            }
        }
        Some(Value::String(text)) => leading_integer(text).unwrap_or(0),
        _ => 0,
    };
    goals.clamp(0, i32::MAX as i64) as i32
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else { break };
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(digit as i64);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}
