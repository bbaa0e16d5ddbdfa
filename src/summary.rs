//! Donation summary accumulated while charging.

use crate::amount::Amount;
use crate::donation::Donation;
use std::io::Write;

/// Totals over every processed donation.
///
/// # Invariants
///
/// - `total_received == successfully_donated + faulty_donation`
/// - `donors` holds exactly the successful donations
#[derive(Debug, Default)]
pub struct Summary {
    pub total_received: Amount,
    pub successfully_donated: Amount,
    pub faulty_donation: Amount,
    donors: Vec<Donation>,
    failures: usize,
}

impl Summary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a charged donation and keeps it as a donor.
    pub fn record_success(&mut self, donation: Donation) {
        self.total_received += donation.amount;
        self.successfully_donated += donation.amount;
        self.donors.push(donation);
    }

    /// Counts a donation the gateway refused.
    pub fn record_failure(&mut self, donation: &Donation) {
        self.total_received += donation.amount;
        self.faulty_donation += donation.amount;
        self.failures += 1;
    }

    /// Returns the successful donations in file order.
    pub fn donors(&self) -> &[Donation] {
        &self.donors
    }

    /// Number of donations the gateway refused.
    pub fn failure_count(&self) -> usize {
        self.failures
    }

    /// Average successful donation, `None` when nobody donated.
    pub fn average_per_person(&self) -> Option<rust_decimal::Decimal> {
        self.successfully_donated.average(self.donors.len())
    }

    /// The `n` largest donors, biggest first. Ties keep file order.
    pub fn top_donors(&self, n: usize) -> Vec<&Donation> {
        let mut ranked: Vec<&Donation> = self.donors.iter().collect();
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranked.truncate(n);
        ranked
    }

    /// Writes the human-readable report.
    pub fn write_report<W: Write>(
        &self,
        mut writer: W,
        currency: &str,
        top_n: usize,
    ) -> std::io::Result<()> {
        let currency = currency.to_uppercase();
        let line = |label: &str, value: String| {
            format!("{:>22}: {} {:>12}", label, currency, value)
        };

        let totals = [
            ("total received", self.total_received),
            ("successfully donated", self.successfully_donated),
            ("faulty donation", self.faulty_donation),
        ];
        for (label, amount) in totals {
            writeln!(writer, "{}", line(label, amount.to_string()))?;
        }

        if let Some(average) = self.average_per_person() {
            writeln!(writer)?;
            writeln!(writer, "{}", line("average per person", format!("{:.2}", average)))?;
            writeln!(writer, "{:>22}:", "top donors")?;
            for donor in self.top_donors(top_n) {
                writeln!(writer, "{:>22}  {}", "", donor.name)?;
            }
        }

        writer.flush()
    }
}
