use std::fmt;

use crate::denomination::{CountTable, Denomination};

/// One reconciled row of the tally: raw detections minus the expected
/// reference markers for that size class, floored at zero.
#[derive(Debug, Clone, Copy)]
pub struct TallyLine {
    pub denomination: Denomination,
    pub raw: u32,
    pub real: u32,
}

/// Per-denomination breakdown plus the grand total, in the print order
/// {10, 5, 2, 1}.
#[derive(Debug, Clone)]
pub struct TallyReport {
    pub lines: Vec<TallyLine>,
    pub refs_per_class: u32,
    pub total: u32,
}

impl TallyReport {
    pub fn reconcile(counts: &CountTable, refs_per_class: u32) -> Self {
        let mut lines = Vec::with_capacity(4);
        let mut total = 0u32;

        for denomination in Denomination::descending() {
            let raw = counts.raw(denomination);
            let real = raw.saturating_sub(refs_per_class);
            total += denomination.value() * real;
            lines.push(TallyLine {
                denomination,
                raw,
                real,
            });
        }

        Self {
            lines,
            refs_per_class,
            total,
        }
    }
}

impl fmt::Display for TallyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Resultado del Conteo (Excluyendo referencias) ---")?;
        for line in &self.lines {
            writeln!(
                f,
                "Monedas de ${}: {} detectadas (Total detectado {} - {} ref)",
                line.denomination.value(),
                line.real,
                line.raw,
                self.refs_per_class
            )?;
        }
        writeln!(f, "-----------------------------------------------------")?;
        write!(f, "DINERO TOTAL: ${}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(tens: u32, fives: u32, twos: u32, ones: u32) -> CountTable {
        let mut counts = CountTable::default();
        for _ in 0..tens {
            counts.increment(Denomination::Ten);
        }
        for _ in 0..fives {
            counts.increment(Denomination::Five);
        }
        for _ in 0..twos {
            counts.increment(Denomination::Two);
        }
        for _ in 0..ones {
            counts.increment(Denomination::One);
        }
        counts
    }

    #[test]
    fn markers_only_tally_to_zero() {
        let report = TallyReport::reconcile(&table(1, 1, 1, 1), 1);
        assert_eq!(report.total, 0);
        assert!(report.lines.iter().all(|l| l.real == 0));
    }

    #[test]
    fn counts_never_go_negative() {
        let report = TallyReport::reconcile(&table(0, 0, 0, 0), 1);
        assert_eq!(report.total, 0);
        assert!(report.lines.iter().all(|l| l.real == 0 && l.raw == 0));
    }

    #[test]
    fn marker_plus_two_coins_counts_two() {
        // One size class holds the marker and two coins: raw 3, real 2.
        let report = TallyReport::reconcile(&table(3, 1, 1, 1), 1);
        let ten = report
            .lines
            .iter()
            .find(|l| l.denomination == Denomination::Ten)
            .unwrap();
        assert_eq!(ten.raw, 3);
        assert_eq!(ten.real, 2);
        assert_eq!(report.total, 20);
    }

    #[test]
    fn injectable_marker_count_is_honored() {
        let report = TallyReport::reconcile(&table(4, 2, 2, 2), 2);
        assert_eq!(report.total, 10 * 2);
    }

    #[test]
    fn prints_descending_with_banner_and_total() {
        let report = TallyReport::reconcile(&table(2, 1, 1, 5), 1);
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "--- Resultado del Conteo (Excluyendo referencias) ---");
        assert_eq!(
            lines[2],
            "Monedas de $10: 1 detectadas (Total detectado 2 - 1 ref)"
        );
        assert_eq!(
            lines[5],
            "Monedas de $1: 4 detectadas (Total detectado 5 - 1 ref)"
        );
        assert_eq!(lines[7], "DINERO TOTAL: $14");
    }
}
