//! Fuel command handler

use pdash::error;
use pdash::fuel::{
    compare_fuels, parse_refuel_log, FuelKind, FuelQuote, RefuelRecord, RefuelStats,
};
use std::path::Path;

/// Compare gasoline (baseline) against GNV and optionally summarize a refuel log
pub fn run(gasoline: FuelQuote, gnv: FuelQuote, refuels: Option<&Path>) {
    match comparison_lines(gasoline, gnv) {
        Some(lines) => lines.iter().for_each(|line| println!("{line}")),
        None => eprintln!("✗ Prices and efficiencies must all be positive numbers"),
    }

    let Some(path) = refuels else {
        return;
    };
    match parse_refuel_log(path) {
        Ok(records) => {
            println!("\n=== Refuels ({}) ===", path.display());
            for line in refuel_lines(&records) {
                println!("{line}");
            }
        }
        Err(e) => {
            error!("Failed to read refuel log {}: {e}", path.display());
            eprintln!("✗ Failed to read {}: {e}", path.display());
        }
    }
}

fn comparison_lines(gasoline: FuelQuote, gnv: FuelQuote) -> Option<Vec<String>> {
    let cmp = compare_fuels(gasoline, gnv)?;
    let verdict = if cmp.alternative_is_cheaper() {
        format!(
            "✓ GNV is {:.1}% cheaper ({:.3} less per km)",
            cmp.savings_percent,
            cmp.savings_per_km()
        )
    } else {
        format!(
            "✗ Gasoline is cheaper; GNV costs {:.1}% more per km",
            -cmp.savings_percent
        )
    };

    Some(vec![
        format!("Gasoline: {:.3} per km", cmp.baseline_cost_per_km),
        format!("GNV:      {:.3} per km", cmp.alternative_cost_per_km),
        verdict,
    ])
}

fn refuel_lines(records: &[RefuelRecord]) -> Vec<String> {
    [FuelKind::Liquid, FuelKind::Gnv]
        .into_iter()
        .map(|fuel| {
            let stats = RefuelStats::from_records(records, fuel);
            if stats.count == 0 {
                return format!(
                    "{fuel}: fewer than {} refuels recorded",
                    RefuelStats::MIN_RECORDS
                );
            }
            let unit = fuel.unit();
            format!(
                "{fuel}: {} refuels, {:.2} spent on {:.2} {unit}, average {:.3} per {unit}",
                stats.count, stats.total_spent, stats.total_quantity, stats.average_unit_price
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "samples/refuels/car.csv";

    #[test]
    fn test_gnv_cheaper_comparison() {
        let lines =
            comparison_lines(FuelQuote::new(5.89, 10.0), FuelQuote::new(4.49, 13.0)).unwrap();
        assert_eq!(
            lines,
            vec![
                "Gasoline: 0.589 per km",
                "GNV:      0.345 per km",
                "✓ GNV is 41.4% cheaper (0.244 less per km)",
            ]
        );
    }

    #[test]
    fn test_gasoline_cheaper_comparison() {
        let lines =
            comparison_lines(FuelQuote::new(5.0, 10.0), FuelQuote::new(8.0, 10.0)).unwrap();
        assert_eq!(lines[2], "✗ Gasoline is cheaper; GNV costs 60.0% more per km");
    }

    #[test]
    fn test_unusable_quote_gives_no_lines() {
        assert!(comparison_lines(FuelQuote::new(0.0, 10.0), FuelQuote::new(4.0, 13.0)).is_none());
    }

    #[test]
    fn test_sample_refuel_log_stats() {
        let records = parse_refuel_log(SAMPLE_LOG).unwrap();
        assert_eq!(records.len(), 5);

        let lines = refuel_lines(&records);
        assert_eq!(
            lines,
            vec![
                "liquid: 3 refuels, 545.43 spent on 105.20 L, average 5.185 per L",
                "gnv: 2 refuels, 131.39 spent on 29.60 m³, average 4.439 per m³",
            ]
        );
    }

    #[test]
    fn test_single_refuel_is_not_enough() {
        let records = [RefuelRecord {
            fuel: FuelKind::Gnv,
            quantity: 12.0,
            total_cost: 54.0,
        }];
        let lines = refuel_lines(&records);
        assert_eq!(lines[0], "liquid: fewer than 2 refuels recorded");
        assert_eq!(lines[1], "gnv: fewer than 2 refuels recorded");
    }
}
