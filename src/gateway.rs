//! Payment gateway seam.
//!
//! A charge is two calls: the card is exchanged for a token, then the token
//! is charged. [`DryRunGateway`] runs the same flow offline so the pipeline
//! can be exercised without credentials.

use crate::amount::Amount;
use crate::donation::Donation;
use log::debug;
use thiserror::Error;

/// A single-use card token issued by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardToken(pub String);

/// Confirmation of a successful charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeReceipt {
    pub id: String,
    pub amount: Amount,
    pub currency: String,
}

/// Rejections reported by a gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The card could not be tokenized
    #[error("failed to create token: {0}")]
    TokenRejected(String),

    /// The charge was refused
    #[error("failed to create charge: {0}")]
    ChargeRejected(String),
}

/// A payment gateway able to tokenize cards and charge tokens.
pub trait ChargeGateway {
    fn create_token(&mut self, donation: &Donation) -> Result<CardToken, GatewayError>;

    fn create_charge(
        &mut self,
        amount: Amount,
        currency: &str,
        token: &CardToken,
    ) -> Result<ChargeReceipt, GatewayError>;

    /// Tokenizes the donation's card and charges its amount.
    fn charge(
        &mut self,
        donation: &Donation,
        currency: &str,
    ) -> Result<ChargeReceipt, GatewayError> {
        let token = self.create_token(donation)?;
        self.create_charge(donation.amount, currency, &token)
    }
}

impl<G: ChargeGateway + ?Sized> ChargeGateway for &mut G {
    fn create_token(&mut self, donation: &Donation) -> Result<CardToken, GatewayError> {
        (**self).create_token(donation)
    }

    fn create_charge(
        &mut self,
        amount: Amount,
        currency: &str,
        token: &CardToken,
    ) -> Result<ChargeReceipt, GatewayError> {
        (**self).create_charge(amount, currency, token)
    }
}

/// Offline gateway that approves every well-formed request.
///
/// Cards expiring before `as_of` (year, month) are refused at tokenization
/// and zero amounts are refused at charge time.
#[derive(Debug, Default)]
pub struct DryRunGateway {
    as_of: Option<(u16, u8)>,
    tokens_issued: u32,
    charges: Vec<ChargeReceipt>,
}

impl DryRunGateway {
    /// Creates a gateway that accepts cards of any expiry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses cards that expired before the given month.
    pub fn with_reference_month(mut self, year: u16, month: u8) -> Self {
        self.as_of = Some((year, month));
        self
    }

    /// Receipts of every accepted charge, in order.
    pub fn charges(&self) -> &[ChargeReceipt] {
        &self.charges
    }
}

impl ChargeGateway for DryRunGateway {
    fn create_token(&mut self, donation: &Donation) -> Result<CardToken, GatewayError> {
        if let Some(as_of) = self.as_of {
            if donation.expiry() < as_of {
                return Err(GatewayError::TokenRejected(format!(
                    "card {} expired {:02}/{}",
                    donation.masked_card(),
                    donation.exp_month,
                    donation.exp_year
                )));
            }
        }

        self.tokens_issued += 1;
        let token = CardToken(format!("tokn_dry_{:06}", self.tokens_issued));
        debug!("Issued {} for card {}", token.0, donation.masked_card());
        Ok(token)
    }

    fn create_charge(
        &mut self,
        amount: Amount,
        currency: &str,
        token: &CardToken,
    ) -> Result<ChargeReceipt, GatewayError> {
        if amount.is_zero() {
            return Err(GatewayError::ChargeRejected(
                "amount must be greater than zero".to_string(),
            ));
        }

        let receipt = ChargeReceipt {
            id: format!("chrg_dry_{:06}", self.charges.len() + 1),
            amount,
            currency: currency.to_string(),
        };
        debug!("Charged {} {} on {}", amount, currency, token.0);
        self.charges.push(receipt.clone());
        Ok(receipt)
    }
}
