/// Compact row count: `1.2K`, `3.4M`, `2.7B`.
pub fn format_numbers(n: usize) -> String {
    match n {
        n if n >= 1_000_000_000 => format!("{:0.1}B", n as f64 / 1_000_000_000.0),
        n if n >= 1_000_000 => format!("{:0.1}M", n as f64 / 1_000_000.0),
        n if n >= 10_000 => format!("{:0.1}K", n as f64 / 1_000.0),
        _ => n.to_string(),
    }
}

/// Percentage with two decimals and a `%` sign.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}
