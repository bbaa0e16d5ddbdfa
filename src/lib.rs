//! # Rot128 Donations
//!
//! Decodes donation files that were "encrypted" by adding a fixed offset to
//! every byte modulo 256, then charges each donation through a payment
//! gateway and summarizes the outcome.
//!
//! ## Design Principles
//!
//! - **Streaming decode**: [`Rot128Reader`] is a plain `Read` adapter, so it
//!   composes with `io::copy`, `BufReader` and the CSV reader
//! - **Chunk independence**: each byte is rotated on its own, the output never
//!   depends on read sizes
//! - **Integer money**: amounts stay in minor units until they are printed
//! - **Pluggable gateway**: charging goes through the [`ChargeGateway`] trait
//!
//! ## Example
//!
//! ```no_run
//! use rot128_donations::{decrypt_file, DonationEngine, DryRunGateway, EngineConfig, Rotation};
//! use std::fs::File;
//!
//! decrypt_file("fng.1000.csv.rot128", "fng.1000.csv", Rotation::ROT128).unwrap();
//!
//! let mut engine = DonationEngine::new(DryRunGateway::new(), EngineConfig::default());
//! engine.process_csv(File::open("fng.1000.csv").unwrap()).unwrap();
//! engine.write_summary(std::io::stdout()).unwrap();
//! ```

pub mod amount;
pub mod decrypt;
pub mod donation;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod rot128;
pub mod summary;

pub use amount::Amount;
pub use decrypt::{decrypt_file, default_output_path, encrypt_file};
pub use donation::{Donation, DonationRecord};
pub use engine::{DonationEngine, EngineConfig};
pub use error::{DonationError, Result};
pub use gateway::{CardToken, ChargeGateway, ChargeReceipt, DryRunGateway, GatewayError};
pub use rot128::{rotate_in_place, Rot128Reader, Rot128Writer, Rotation};
pub use summary::Summary;
