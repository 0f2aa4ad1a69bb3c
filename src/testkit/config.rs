//! Canonical scenario files.
//!
//! Single source of truth for TOML used across config and CLI tests.

/// Two loans with a comfortable budget and a fixed start month.
pub const TWO_LOANS: &str = r#"
budget = 600.0
start = "2026-11"

[[loans]]
name = "Card"
balance = 2400.0
apr = 0.2199
min_payment = 60.0

[[loans]]
name = "Student"
balance = 4000.0
apr = 0.045
min_payment = 45.0
deferment_months = 3

[logging]
level = "warn"
format = "pretty"
"#;

/// A budget that cannot cover the minimum payment.
pub const UNDERFUNDED: &str = r#"
budget = 0
start = "2026-11"

[[loans]]
name = "Card"
balance = 1200.0
apr = 0.12
min_payment = 50.0
"#;

/// A scenario whose single loan is invalid (APR expressed as a percent).
pub const PERCENT_APR: &str = r#"
budget = 300
start = "2026-11"

[[loans]]
name = "Auto"
balance = 9000
apr = 6.9
min_payment = 180
"#;

/// A nearly paid loan whose minimum payment exceeds what it owes.
pub const MIN_ABOVE_BALANCE: &str = r#"
budget = 500
start = "2026-11"

[[loans]]
name = "Card"
balance = 1500
apr = 0.2
min_payment = 45

[[loans]]
name = "Dental"
balance = 30
apr = 0.0
min_payment = 75
"#;
