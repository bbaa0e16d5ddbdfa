//! Donation models for CSV parsing and internal representation.

use crate::amount::Amount;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Raw donation row as read from the decrypted CSV.
///
/// Every field is kept as a string so a malformed row can be reported and
/// skipped instead of failing the whole file.
#[derive(Debug, Deserialize)]
pub struct DonationRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "AmountSubunits")]
    pub amount_subunits: String,

    #[serde(rename = "CCNumber")]
    pub card_number: String,

    #[serde(rename = "CVV")]
    pub cvv: String,

    #[serde(rename = "ExpMonth")]
    pub exp_month: String,

    #[serde(rename = "ExpYear")]
    pub exp_year: String,
}

impl DonationRecord {
    /// Parses the raw CSV row into a typed donation.
    ///
    /// Returns `None` for an empty name, a non-integer or negative amount,
    /// a month outside `1..=12`, or a non-integer year.
    pub fn parse(&self) -> Option<Donation> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }

        let amount = Amount::from_str(&self.amount_subunits).ok()?;
        if amount.subunits() < 0 {
            return None;
        }

        let exp_month = self.exp_month.trim().parse::<u8>().ok()?;
        if !(1..=12).contains(&exp_month) {
            return None;
        }
        let exp_year = self.exp_year.trim().parse::<u16>().ok()?;

        Some(Donation {
            name: name.to_string(),
            amount,
            card_number: self.card_number.trim().to_string(),
            cvv: self.cvv.trim().to_string(),
            exp_month,
            exp_year,
        })
    }
}

/// A parsed donation ready to be charged.
#[derive(Clone, PartialEq, Eq)]
pub struct Donation {
    /// Card holder and donor name
    pub name: String,

    /// Donated amount in subunits
    pub amount: Amount,

    pub card_number: String,

    pub cvv: String,

    /// Card expiration month (1-12)
    pub exp_month: u8,

    /// Card expiration year, four digits
    pub exp_year: u16,
}

impl Donation {
    /// The card number with everything but the last 4 digits hidden.
    pub fn masked_card(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().collect();
        let visible = digits.len().saturating_sub(4);
        digits
            .iter()
            .enumerate()
            .map(|(i, c)| if i < visible { '*' } else { *c })
            .collect()
    }

    /// `(year, month)` of the card expiration, comparable in order.
    pub fn expiry(&self) -> (u16, u8) {
        (self.exp_year, self.exp_month)
    }
}

// Card data must not leak through `{:?}` in logs.
impl fmt::Debug for Donation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Donation")
            .field("name", &self.name)
            .field("amount", &self.amount)
            .field("card_number", &self.masked_card())
            .field("cvv", &"***")
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, amount: &str, month: &str, year: &str) -> DonationRecord {
        DonationRecord {
            name: name.to_string(),
            amount_subunits: amount.to_string(),
            card_number: "4111111111111111".to_string(),
            cvv: "123".to_string(),
            exp_month: month.to_string(),
            exp_year: year.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_row() {
        let donation = record("Mr. Grossman R Oldbuck", "2879410", "3", "2030")
            .parse()
            .unwrap();

        assert_eq!(donation.name, "Mr. Grossman R Oldbuck");
        assert_eq!(donation.amount.to_string(), "28794.10");
        assert_eq!(donation.exp_month, 3);
        assert_eq!(donation.exp_year, 2030);
        assert_eq!(donation.expiry(), (2030, 3));
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let donation = record("  Ms. Primula Boffin ", " 100 ", " 12 ", " 2029 ")
            .parse()
            .unwrap();
        assert_eq!(donation.name, "Ms. Primula Boffin");
        assert_eq!(donation.amount.subunits(), 100);
        assert_eq!(donation.exp_month, 12);
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        assert!(record("A", "12.50", "1", "2030").parse().is_none());
        assert!(record("A", "", "1", "2030").parse().is_none());
        assert!(record("A", "-5", "1", "2030").parse().is_none());
    }

    #[test]
    fn test_parse_rejects_bad_expiry() {
        assert!(record("A", "100", "0", "2030").parse().is_none());
        assert!(record("A", "100", "13", "2030").parse().is_none());
        assert!(record("A", "100", "1", "twenty").parse().is_none());
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert!(record("   ", "100", "1", "2030").parse().is_none());
    }

    #[test]
    fn test_debug_masks_card_data() {
        let donation = record("A", "100", "1", "2030").parse().unwrap();
        let debug = format!("{:?}", donation);

        assert!(debug.contains("************1111"));
        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123"));
    }
}
