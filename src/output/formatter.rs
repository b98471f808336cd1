use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::scoring::ScoreResult;
use crate::throughput::Measurement;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// The score line, e.g. "Catalog Score: 0.56"
pub fn format_score(score: f64) -> String {
    format!("Catalog Score: {}", score)
}

/// The throughput line, e.g. "Throughput: 125000.5 catalogs per second"
pub fn format_throughput(measurement: &Measurement) -> String {
    format!("Throughput: {} catalogs per second", measurement.throughput)
}

/// One line per parameter: name, weight, raw sub-score and weighted contribution.
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let name_width = result
        .breakdown
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);

    result
        .breakdown
        .iter()
        .map(|c| {
            let name = format!("{:<width$}", c.name, width = name_width);
            let contribution = format!("{:+.4}", c.weighted);
            if use_colors {
                format!(
                    "  {}  x{:<6} raw {:.4}  {}",
                    name.bold(),
                    c.weight,
                    c.raw,
                    contribution.cyan()
                )
            } else {
                format!("  {}  x{:<6} raw {:.4}  {}", name, c.weight, c.raw, contribution)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Detail line for verbose mode: units, workers and elapsed time.
pub fn format_measurement_detail(measurement: &Measurement, use_colors: bool) -> String {
    let elapsed = humantime::format_duration(measurement.elapsed).to_string();
    let units = format!("{}/{}", measurement.completed, measurement.iterations);
    if use_colors {
        format!(
            "  {} units on {} workers in {}",
            units.bold(),
            measurement.workers.yellow(),
            elapsed.dimmed()
        )
    } else {
        format!(
            "  {} units on {} workers in {}",
            units, measurement.workers, elapsed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRecord;
    use crate::scoring::Scorer;
    use std::time::Duration;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.5), "Catalog Score: 0.5");
        assert_eq!(format_score(0.0), "Catalog Score: 0");
    }

    #[test]
    fn test_format_throughput() {
        let m = Measurement::new(1000, 1000, 4, Duration::from_millis(500));
        assert_eq!(format_throughput(&m), "Throughput: 2000 catalogs per second");
    }

    #[test]
    fn test_format_breakdown_plain() {
        let catalog = CatalogRecord::new().with("branding_authenticity", 1.0);
        let result = Scorer::reference().score_with_breakdown(&catalog);
        let output = format_breakdown(&result, false);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  Compliance  "));
        assert!(lines[1].contains("raw 0.4000"));
        assert!(lines[1].ends_with("+0.1600"));
    }

    #[test]
    fn test_format_measurement_detail_plain() {
        let m = Measurement::new(100, 100, 8, Duration::from_millis(3));
        assert_eq!(
            format_measurement_detail(&m, false),
            "  100/100 units on 8 workers in 3ms"
        );
    }
}
