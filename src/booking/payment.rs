use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BookingError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvc: String,
    pub holder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub reference: Uuid,
    pub amount: f64,
    pub card_last4: String,
    pub paid_at: DateTime<Utc>,
}

pub trait PaymentGateway {
    fn charge(
        &self,
        card: &CardDetails,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<PaymentReceipt, BookingError>;
}

/// Stand-in for a real processor: checks the card form and hands out a
/// receipt. Nothing leaves the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockPaymentGateway;

impl PaymentGateway for MockPaymentGateway {
    fn charge(
        &self,
        card: &CardDetails,
        amount: f64,
        now: DateTime<Utc>,
    ) -> Result<PaymentReceipt, BookingError> {
        let number: String = card.number.chars().filter(|c| !c.is_whitespace()).collect();
        if !(13..=19).contains(&number.len()) || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(BookingError::Payment("Invalid card number".to_string()));
        }
        if card.holder.trim().is_empty() {
            return Err(BookingError::Payment("Cardholder name is required".to_string()));
        }
        let cvc = card.cvc.trim();
        if !(3..=4).contains(&cvc.len()) || !cvc.chars().all(|c| c.is_ascii_digit()) {
            return Err(BookingError::Payment("Invalid CVC".to_string()));
        }
        let (month, year) = parse_expiry(&card.expiry)
            .ok_or_else(|| BookingError::Payment("Expiry must be MM/YY".to_string()))?;
        if (year, month) < (now.year(), now.month()) {
            return Err(BookingError::Payment("Card has expired".to_string()));
        }
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(BookingError::Payment(format!("Invalid amount {}", amount)));
        }

        Ok(PaymentReceipt {
            reference: Uuid::new_v4(),
            amount,
            card_last4: number[number.len() - 4..].to_string(),
            paid_at: now,
        })
    }
}

fn parse_expiry(expiry: &str) -> Option<(u32, i32)> {
    let (month, year) = expiry.trim().split_once('/')?;
    let month: u32 = month.trim().parse().ok()?;
    let year = year.trim();
    if !(1..=12).contains(&month) || year.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    Some((month, 2000 + year))
}
