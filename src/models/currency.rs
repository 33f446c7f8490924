//! Display currency and theme preferences
//!
//! Amounts are stored without a currency; the user's preferred currency only
//! decides the symbol used when rendering them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Supported display currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Inr,
}

impl Currency {
    pub fn all() -> &'static [Currency] {
        &[
            Currency::Usd,
            Currency::Eur,
            Currency::Gbp,
            Currency::Jpy,
            Currency::Inr,
        ]
    }

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Inr => "INR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
            Self::Inr => "₹",
        }
    }

    /// Full format: symbol, thousands separators, two decimals
    pub fn format(&self, amount: Money) -> String {
        amount.format_grouped(self.symbol())
    }

    /// Compact format for chart axes and cards ("$1.2k", "$3.4m")
    pub fn format_short(&self, amount: Money) -> String {
        let value = amount.as_f64();
        let sign = if value < 0.0 { "-" } else { "" };
        let magnitude = value.abs();

        if magnitude >= 1_000_000.0 {
            format!("{}{}{:.1}m", sign, self.symbol(), magnitude / 1_000_000.0)
        } else if magnitude >= 1_000.0 {
            format!("{}{}{:.1}k", sign, self.symbol(), magnitude / 1_000.0)
        } else {
            self.format(amount)
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unsupported currency '{}' (expected one of USD, EUR, GBP, JPY, INR)",
                    s
                )
            })
    }
}

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" | "system" => Ok(Self::Auto),
            other => Err(format!(
                "Unknown theme '{}' (expected light, dark or auto)",
                other
            )),
        }
    }
}
