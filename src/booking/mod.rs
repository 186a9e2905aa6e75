// src/booking/mod.rs

pub mod flow;
pub mod payment;

pub use flow::{BookingFlow, BookingStep};
pub use payment::{CardDetails, MockPaymentGateway, PaymentGateway, PaymentReceipt};

use chrono::NaiveDate;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::TimeSlot;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("cannot {operation} while at the {step} step")]
    WrongStep {
        operation: &'static str,
        step: BookingStep,
    },
    #[error("no psychologist selected")]
    NoDoctor,
    #[error("{date} at {time} is not available")]
    SlotUnavailable { date: NaiveDate, time: TimeSlot },
    #[error("package does not belong to the selected psychologist")]
    PackageMismatch,
    #[error("payment failed: {0}")]
    Payment(String),
    #[error("booking has not been paid yet")]
    NotPaid,
    #[error("booking has already been paid")]
    AlreadyPaid,
    #[error(transparent)]
    Api(#[from] ApiError),
}
