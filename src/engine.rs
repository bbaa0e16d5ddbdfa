//! Donation processing engine.
//!
//! Streams donation rows from CSV, charges each one through a
//! [`ChargeGateway`] and accumulates the outcome in a [`Summary`]. Input can
//! be plain CSV or a Rot128-encoded stream decoded on the fly.

use crate::donation::{Donation, DonationRecord};
use crate::error::Result;
use crate::gateway::ChargeGateway;
use crate::rot128::{Rot128Reader, Rotation};
use crate::summary::Summary;
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::io::{Read, Write};

/// Per-run settings for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// ISO currency code sent with every charge, lowercase
    pub currency: String,

    /// How many donors the report lists
    pub top_donors: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            currency: "thb".to_string(),
            top_donors: 3,
        }
    }
}

/// The donation processing engine.
///
/// Rows are charged in file order. A row that cannot be parsed or charged
/// is logged at warn level and processing continues with the next row.
pub struct DonationEngine<G> {
    gateway: G,
    config: EngineConfig,
    summary: Summary,
}

impl<G: ChargeGateway> DonationEngine<G> {
    /// Creates an engine with an empty summary.
    pub fn new(gateway: G, config: EngineConfig) -> Self {
        DonationEngine {
            gateway,
            config,
            summary: Summary::new(),
        }
    }

    /// Processes donations from a CSV reader in streaming fashion.
    ///
    /// Only a failure of the underlying reader aborts the run.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<DonationRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => match record.parse() {
                    Some(donation) => self.process_donation(donation, row_num),
                    None => warn!("Row {}: Failed to parse donation record", row_num),
                },
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => warn!("Row {}: CSV parse error: {}", row_num, e),
            }
        }

        info!(
            "Processed {} donations, {} succeeded",
            self.summary.donors().len() + self.summary.failure_count(),
            self.summary.donors().len()
        );
        Ok(())
    }

    /// Decodes `reader` with `rotation` and processes the resulting CSV.
    pub fn process_encrypted<R: Read>(&mut self, reader: R, rotation: Rotation) -> Result<()> {
        self.process_csv(Rot128Reader::new(reader, rotation))
    }

    fn process_donation(&mut self, donation: Donation, row: usize) {
        match self.gateway.charge(&donation, &self.config.currency) {
            Ok(receipt) => {
                debug!(
                    "Row {}: Charged {} {} for {} ({})",
                    row, donation.amount, self.config.currency, donation.name, receipt.id
                );
                self.summary.record_success(donation);
            }
            Err(e) => {
                warn!(
                    "Row {}: Failed to create charge for {}: {}",
                    row, donation.name, e
                );
                self.summary.record_failure(&donation);
            }
        }
    }

    /// Returns the summary accumulated so far.
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Returns a reference to the gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Writes the summary report configured by [`EngineConfig`].
    pub fn write_summary<W: Write>(&self, writer: W) -> Result<()> {
        self.summary
            .write_report(writer, &self.config.currency, self.config.top_donors)?;
        Ok(())
    }

    /// Consumes the engine, returning the final summary.
    pub fn into_summary(self) -> Summary {
        self.summary
    }
}
