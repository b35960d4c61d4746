//! Number formatting for the earnings table: abbreviated money, exp,
//! reputation and percentages.

const SUFFIXES: [&str; 9] = ["", "k", "m", "b", "t", "q", "Q", "s", "S"];

/// Three decimals with a thousands suffix: `1532.7` → `"1.533k"`.
pub fn abbreviate(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let mut magnitude = round3(value.abs());
    let mut tier = 0;
    // Round before comparing so 999.9996 lands in the next tier.
    while magnitude >= 1000.0 && tier < SUFFIXES.len() - 1 {
        magnitude = round3(magnitude / 1000.0);
        tier += 1;
    }
    format!("{sign}{magnitude:.3}{}", SUFFIXES[tier])
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn exp(value: f64) -> String {
    abbreviate(value)
}

pub fn reputation(value: f64) -> String {
    abbreviate(value)
}

pub fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", abbreviate(-value))
    } else {
        format!("${}", abbreviate(value))
    }
}

/// Fraction as a percentage with two decimals: `0.5` → `"50.00%"`.
pub fn percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
