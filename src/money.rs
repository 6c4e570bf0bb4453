// 💰 Money helpers - cents rounding and display formatting

/// Round to 2 decimal places (half away from zero)
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Balance-style formatting: "245,678.50"
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, cents % 100)
}
