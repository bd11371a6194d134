//! Fuel cost calculators for the vehicle module
//!
//! Two pieces: a cost-per-km comparison between a liquid fuel and natural gas,
//! and average unit-price statistics over recorded refuels.

use crate::core::csv::parse_csv_line;
use crate::core::grading::parse_score;
use crate::warn;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Kind of fuel a refuel used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelKind {
    /// Gasoline or ethanol, sold per liter
    Liquid,
    /// Compressed natural gas, sold per cubic meter
    Gnv,
}

impl FuelKind {
    /// Unit the fuel is sold in
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Liquid => "L",
            Self::Gnv => "m³",
        }
    }
}

impl FromStr for FuelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "liquid" | "gasoline" | "gas" | "ethanol" => Ok(Self::Liquid),
            "gnv" | "cng" => Ok(Self::Gnv),
            _ => Err(format!("Unknown fuel kind: '{s}'")),
        }
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Liquid => write!(f, "liquid"),
            Self::Gnv => write!(f, "gnv"),
        }
    }
}

/// Price and efficiency of one fuel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelQuote {
    /// Price per liter or per cubic meter
    pub price_per_unit: f64,
    /// Kilometers driven per liter or per cubic meter
    pub km_per_unit: f64,
}

impl FuelQuote {
    /// Create a quote
    #[must_use]
    pub const fn new(price_per_unit: f64, km_per_unit: f64) -> Self {
        Self {
            price_per_unit,
            km_per_unit,
        }
    }

    fn is_usable(&self) -> bool {
        [self.price_per_unit, self.km_per_unit]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Cost of driving one kilometer
    #[must_use]
    pub fn cost_per_km(&self) -> f64 {
        self.price_per_unit / self.km_per_unit
    }
}

/// Result of comparing a baseline fuel against an alternative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelComparison {
    /// Cost per km of the baseline fuel
    pub baseline_cost_per_km: f64,
    /// Cost per km of the alternative fuel
    pub alternative_cost_per_km: f64,
    /// `(baseline - alternative) / baseline * 100`; positive when the alternative is cheaper
    pub savings_percent: f64,
}

impl FuelComparison {
    /// Whether the alternative fuel is the cheaper one to drive on
    #[must_use]
    pub fn alternative_is_cheaper(&self) -> bool {
        self.savings_percent > 0.0
    }

    /// Money saved per kilometer by the alternative (negative when it costs more)
    #[must_use]
    pub fn savings_per_km(&self) -> f64 {
        self.baseline_cost_per_km - self.alternative_cost_per_km
    }
}

/// Compare two fuels by cost per kilometer.
///
/// Returns `None` when any price or efficiency is zero, negative or not finite.
#[must_use]
pub fn compare_fuels(baseline: FuelQuote, alternative: FuelQuote) -> Option<FuelComparison> {
    if !baseline.is_usable() || !alternative.is_usable() {
        return None;
    }
    let baseline_cost_per_km = baseline.cost_per_km();
    let alternative_cost_per_km = alternative.cost_per_km();
    let savings_percent =
        (baseline_cost_per_km - alternative_cost_per_km) / baseline_cost_per_km * 100.0;

    Some(FuelComparison {
        baseline_cost_per_km,
        alternative_cost_per_km,
        savings_percent,
    })
}

/// One recorded refuel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefuelRecord {
    /// Fuel used
    pub fuel: FuelKind,
    /// Liters or cubic meters bought
    pub quantity: f64,
    /// Amount paid
    pub total_cost: f64,
}

impl RefuelRecord {
    /// Total to record for a refuel form.
    ///
    /// An explicit non-zero total wins; otherwise it is `price * quantity`
    /// when both are given.
    #[must_use]
    pub fn resolve_total(total: Option<f64>, price: Option<f64>, quantity: Option<f64>) -> f64 {
        match (total, price, quantity) {
            (Some(total), _, _) if total.abs() > 0.0 => total,
            (_, Some(price), Some(quantity)) => price * quantity,
            (total, _, _) => total.unwrap_or(0.0),
        }
    }
}

/// Spending statistics for one fuel kind
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RefuelStats {
    /// Number of refuels counted
    pub count: usize,
    /// Sum of totals paid
    pub total_spent: f64,
    /// Sum of quantities bought
    pub total_quantity: f64,
    /// `total_spent / total_quantity`
    pub average_unit_price: f64,
}

impl RefuelStats {
    /// Minimum refuels of a kind before statistics are reported
    pub const MIN_RECORDS: usize = 2;

    /// Aggregate the records of one fuel kind.
    ///
    /// Fewer than [`MIN_RECORDS`](Self::MIN_RECORDS) matching records give all-zero stats.
    #[must_use]
    pub fn from_records(records: &[RefuelRecord], fuel: FuelKind) -> Self {
        let matching: Vec<&RefuelRecord> = records.iter().filter(|r| r.fuel == fuel).collect();
        if matching.len() < Self::MIN_RECORDS {
            return Self::default();
        }

        let total_spent: f64 = matching.iter().map(|r| r.total_cost).sum();
        let total_quantity: f64 = matching.iter().map(|r| r.quantity).sum();
        let average_unit_price = if total_quantity > 0.0 {
            total_spent / total_quantity
        } else {
            0.0
        };

        Self {
            count: matching.len(),
            total_spent,
            total_quantity,
            average_unit_price,
        }
    }
}

/// Read a refuel log CSV file
///
/// # Errors
/// Returns an error if the file cannot be read or has no `Fuel` and `Quantity` columns
pub fn parse_refuel_log<P: AsRef<Path>>(path: P) -> Result<Vec<RefuelRecord>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_refuel_log_str(&content)
}

/// Parse refuel log content.
///
/// The first non-empty line is the header; columns are looked up by name
/// and cells may be double-quoted (`"5,89"`)
/// (`Fuel`, `Quantity`, `Price`, `Total`). The total of each row goes
/// through [`RefuelRecord::resolve_total`]. Rows with an unknown fuel or no
/// quantity are skipped with a warning.
///
/// # Errors
/// Returns an error if the header lacks a `Fuel` or `Quantity` column
pub fn parse_refuel_log_str(content: &str) -> Result<Vec<RefuelRecord>, Box<dyn Error>> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or("Empty refuel log")?;
    let headers: Vec<String> = parse_csv_line(header_line)
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let fuel_col = column("fuel").ok_or("Refuel log has no 'Fuel' column")?;
    let quantity_col = column("quantity").ok_or("Refuel log has no 'Quantity' column")?;
    let price_col = column("price");
    let total_col = column("total");

    let mut records = Vec::new();
    for (idx, line) in lines {
        let fields = parse_csv_line(line);
        let cell = |col: Option<usize>| {
            col.and_then(|c| fields.get(c))
                .and_then(|v| parse_score(v))
        };

        let fuel = match fields.get(fuel_col).map(|v| v.parse::<FuelKind>()) {
            Some(Ok(fuel)) => fuel,
            Some(Err(e)) => {
                warn!("Line {}: {e}", idx + 1);
                continue;
            }
            None => {
                warn!("Line {}: missing fuel kind", idx + 1);
                continue;
            }
        };
        let Some(quantity) = cell(Some(quantity_col)) else {
            warn!("Line {}: missing quantity", idx + 1);
            continue;
        };

        records.push(RefuelRecord {
            fuel,
            quantity,
            total_cost: RefuelRecord::resolve_total(cell(total_col), cell(price_col), Some(quantity)),
        });
    }

    Ok(records)
}
