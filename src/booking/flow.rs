use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::info;
use std::fmt;

use super::payment::{CardDetails, PaymentGateway, PaymentReceipt};
use super::BookingError;
use crate::models::availability::{is_available, normalize_schedule};
use crate::models::{Availability, NewBooking, Package, Psychologist, Session, TimeSlot};
use crate::services::ClientService;

pub const REDIRECT_AFTER_BOOKING: &str = "/client/sessions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    SelectDoctor,
    PickSlot,
    Confirm,
    Payment,
    Complete,
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStep::SelectDoctor => "select doctor",
            BookingStep::PickSlot => "pick slot",
            BookingStep::Confirm => "confirm",
            BookingStep::Payment => "payment",
            BookingStep::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// Guided booking: select doctor, pick date/time, confirm, pay, submit.
///
/// Lives only in memory; nothing reaches the backend before `submit`, so a
/// dropped flow loses all progress.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    step: BookingStep,
    doctor: Option<Psychologist>,
    schedule: Vec<Availability>,
    package: Option<Package>,
    slot: Option<(NaiveDate, TimeSlot)>,
    notes: Option<String>,
    receipt: Option<PaymentReceipt>,
    session: Option<Session>,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: BookingStep::SelectDoctor,
            doctor: None,
            schedule: Vec::new(),
            package: None,
            slot: None,
            notes: None,
            receipt: None,
            session: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn doctor(&self) -> Option<&Psychologist> {
        self.doctor.as_ref()
    }

    /// Normalized availability of the selected doctor, what the slot picker shows.
    pub fn schedule(&self) -> &[Availability] {
        &self.schedule
    }

    pub fn package(&self) -> Option<&Package> {
        self.package.as_ref()
    }

    pub fn slot(&self) -> Option<(NaiveDate, TimeSlot)> {
        self.slot
    }

    pub fn receipt(&self) -> Option<&PaymentReceipt> {
        self.receipt.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn expect_step(
        &self,
        operation: &'static str,
        allowed: &[BookingStep],
    ) -> Result<(), BookingError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(BookingError::WrongStep {
                operation,
                step: self.step,
            })
        }
    }

    pub fn select_doctor(&mut self, doctor: Psychologist) -> Result<(), BookingError> {
        self.expect_step(
            "select a doctor",
            &[BookingStep::SelectDoctor, BookingStep::PickSlot],
        )?;

        if self
            .package
            .as_ref()
            .and_then(|p| p.psychologist_id.as_ref())
            .is_some_and(|owner| owner != &doctor.id)
        {
            self.package = None;
        }
        self.schedule = normalize_schedule(doctor.availability.clone());
        self.doctor = Some(doctor);
        self.slot = None;
        self.step = BookingStep::PickSlot;
        Ok(())
    }

    pub fn select_package(&mut self, package: Package) -> Result<(), BookingError> {
        self.expect_step(
            "select a package",
            &[BookingStep::PickSlot, BookingStep::Confirm],
        )?;
        let doctor = self.doctor.as_ref().ok_or(BookingError::NoDoctor)?;
        if package
            .psychologist_id
            .as_ref()
            .is_some_and(|owner| owner != &doctor.id)
        {
            return Err(BookingError::PackageMismatch);
        }
        self.package = Some(package);
        Ok(())
    }

    pub fn clear_package(&mut self) {
        if self.step != BookingStep::Payment && self.step != BookingStep::Complete {
            self.package = None;
        }
    }

    /// Picks a listed slot that starts after `now`.
    pub fn pick_slot(
        &mut self,
        date: NaiveDate,
        time: TimeSlot,
        now: NaiveDateTime,
    ) -> Result<(), BookingError> {
        self.expect_step("pick a slot", &[BookingStep::PickSlot])?;
        if self.doctor.is_none() {
            return Err(BookingError::NoDoctor);
        }
        if date.and_time(time.time()) <= now || !is_available(&self.schedule, date, time) {
            return Err(BookingError::SlotUnavailable { date, time });
        }
        self.slot = Some((date, time));
        self.step = BookingStep::Confirm;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
    }

    pub fn confirm(&mut self) -> Result<(), BookingError> {
        self.expect_step("confirm", &[BookingStep::Confirm])?;
        self.step = BookingStep::Payment;
        Ok(())
    }

    /// Package price when a package is chosen, otherwise the doctor's rate.
    pub fn amount_due(&self) -> Option<f64> {
        match (&self.package, &self.doctor) {
            (Some(package), _) => Some(package.price),
            (None, Some(doctor)) => Some(doctor.price),
            (None, None) => None,
        }
    }

    pub fn pay<G: PaymentGateway + ?Sized>(
        &mut self,
        gateway: &G,
        card: &CardDetails,
        now: DateTime<Utc>,
    ) -> Result<&PaymentReceipt, BookingError> {
        self.expect_step("pay", &[BookingStep::Payment])?;
        if self.receipt.is_some() {
            return Err(BookingError::AlreadyPaid);
        }
        let amount = self.amount_due().ok_or(BookingError::NoDoctor)?;
        let receipt = gateway.charge(card, amount, now)?;
        info!("mock payment {} for {:.2}", receipt.reference, receipt.amount);
        Ok(&*self.receipt.insert(receipt))
    }

    /// The booking request `submit` sends.
    pub fn booking_request(&self) -> Result<NewBooking, BookingError> {
        let doctor = self.doctor.as_ref().ok_or(BookingError::NoDoctor)?;
        let (date, time) = self.slot.ok_or(BookingError::WrongStep {
            operation: "build a booking",
            step: self.step,
        })?;
        Ok(NewBooking {
            psychologist_id: doctor.id.clone(),
            package_id: self.package.as_ref().map(|p| p.id.clone()),
            scheduled_date: date,
            scheduled_time: time,
            notes: self.notes.clone(),
            payment_reference: self.receipt.as_ref().map(|r| r.reference.to_string()),
        })
    }

    /// Sends the booking. A failed call leaves the flow at the payment step
    /// with its receipt, so it can be submitted again.
    pub async fn submit(&mut self, clients: &ClientService<'_>) -> Result<&Session, BookingError> {
        self.expect_step("submit", &[BookingStep::Payment])?;
        if self.receipt.is_none() {
            return Err(BookingError::NotPaid);
        }

        let request = self.booking_request()?;
        let session = clients.book(&request).await?;
        self.step = BookingStep::Complete;
        Ok(&*self.session.insert(session))
    }

    /// Steps back once, dropping what the step being left collected.
    pub fn back(&mut self) -> Result<(), BookingError> {
        match self.step {
            BookingStep::SelectDoctor => {}
            BookingStep::PickSlot => {
                self.doctor = None;
                self.schedule.clear();
                self.package = None;
                self.step = BookingStep::SelectDoctor;
            }
            BookingStep::Confirm => {
                self.slot = None;
                self.step = BookingStep::PickSlot;
            }
            BookingStep::Payment => {
                if self.receipt.is_some() {
                    return Err(BookingError::AlreadyPaid);
                }
                self.step = BookingStep::Confirm;
            }
            BookingStep::Complete => {
                return Err(BookingError::WrongStep {
                    operation: "go back",
                    step: self.step,
                })
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn redirect_path(&self) -> Option<&'static str> {
        (self.step == BookingStep::Complete).then_some(REDIRECT_AFTER_BOOKING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::MockPaymentGateway;
    use crate::models::Id;
    use chrono::TimeZone;
    use serde_json::json;

    fn doctor(id: i64) -> Psychologist {
        serde_json::from_value(json!({
            "id": id,
            "first_name": "Rae",
            "last_name": "Moss",
            "price": 90.0,
            "availability": [
                {"date": "2026-07-01", "time_slots": ["13:00", "09:00", "13:00"]},
                {"date": "2026-07-02", "time_slots": ["10:00"]}
            ]
        }))
        .unwrap()
    }

    fn package(owner: Option<i64>) -> Package {
        Package {
            id: Id::from(30),
            psychologist_id: owner.map(Id::from),
            name: "Four sessions".to_string(),
            description: None,
            session_count: 4,
            price: 320.0,
            is_active: true,
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
    }

    fn card() -> CardDetails {
        CardDetails {
            number: "4000056655665556".to_string(),
            expiry: "12/28".to_string(),
            cvc: "321".to_string(),
            holder: "Lu Chen".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 20, 8, 0, 0).unwrap()
    }

    #[test]
    fn walks_the_steps_in_order() {
        let mut flow = BookingFlow::new();
        assert_eq!(flow.step(), BookingStep::SelectDoctor);

        flow.select_doctor(doctor(1)).unwrap();
        assert_eq!(flow.step(), BookingStep::PickSlot);
        assert_eq!(flow.schedule()[0].time_slots.len(), 2);

        flow.pick_slot(day(), "09:00".parse().unwrap(), now().naive_utc()).unwrap();
        assert_eq!(flow.step(), BookingStep::Confirm);

        flow.confirm().unwrap();
        assert_eq!(flow.step(), BookingStep::Payment);

        let receipt = flow.pay(&MockPaymentGateway, &card(), now()).unwrap();
        assert_eq!(receipt.amount, 90.0);

        let request = flow.booking_request().unwrap();
        assert_eq!(request.psychologist_id, Id::from(1));
        assert!(request.payment_reference.is_some());
        assert!(flow.redirect_path().is_none());
    }

    #[test]
    fn rejects_out_of_order_calls() {
        let mut flow = BookingFlow::new();
        assert!(matches!(
            flow.pick_slot(day(), "09:00".parse().unwrap(), now().naive_utc()),
            Err(BookingError::WrongStep { step: BookingStep::SelectDoctor, .. })
        ));
        assert!(matches!(flow.confirm(), Err(BookingError::WrongStep { .. })));
        assert!(matches!(
            flow.pay(&MockPaymentGateway, &card(), now()),
            Err(BookingError::WrongStep { .. })
        ));
    }

    #[test]
    fn only_listed_slots_can_be_picked() {
        let mut flow = BookingFlow::new();
        flow.select_doctor(doctor(1)).unwrap();
        let err = flow.pick_slot(day(), "11:00".parse().unwrap(), now().naive_utc()).unwrap_err();
        assert!(matches!(err, BookingError::SlotUnavailable { .. }));
        assert_eq!(flow.step(), BookingStep::PickSlot);
    }

    #[test]
    fn past_slots_cannot_be_picked() {
        let mut flow = BookingFlow::new();
        flow.select_doctor(doctor(1)).unwrap();

        let after_first_slot = day().and_hms_opt(10, 0, 0).unwrap();
        let err = flow
            .pick_slot(day(), "09:00".parse().unwrap(), after_first_slot)
            .unwrap_err();
        assert!(matches!(err, BookingError::SlotUnavailable { .. }));
        let at_start = day().and_hms_opt(13, 0, 0).unwrap();
        assert!(flow
            .pick_slot(day(), "13:00".parse().unwrap(), at_start)
            .is_err());
        assert_eq!(flow.step(), BookingStep::PickSlot);

        flow.pick_slot(day(), "13:00".parse().unwrap(), after_first_slot)
            .unwrap();
        assert_eq!(flow.step(), BookingStep::Confirm);
    }

    #[test]
    fn package_sets_price_and_must_match_doctor() {
        let mut flow = BookingFlow::new();
        flow.select_doctor(doctor(1)).unwrap();
        assert!(matches!(
            flow.select_package(package(Some(2))),
            Err(BookingError::PackageMismatch)
        ));

        flow.select_package(package(Some(1))).unwrap();
        assert_eq!(flow.amount_due(), Some(320.0));

        // switching doctor drops a package owned by the previous one
        flow.select_doctor(doctor(2)).unwrap();
        assert!(flow.package().is_none());
        assert_eq!(flow.amount_due(), Some(90.0));
    }

    #[test]
    fn back_drops_step_data() {
        let mut flow = BookingFlow::new();
        flow.select_doctor(doctor(1)).unwrap();
        flow.pick_slot(day(), "13:00".parse().unwrap(), now().naive_utc()).unwrap();
        flow.back().unwrap();
        assert_eq!(flow.step(), BookingStep::PickSlot);
        assert!(flow.slot().is_none());
        flow.back().unwrap();
        assert_eq!(flow.step(), BookingStep::SelectDoctor);
        assert!(flow.doctor().is_none());
    }

    #[test]
    fn paid_flow_cannot_go_back_or_pay_twice() {
        let mut flow = BookingFlow::new();
        flow.select_doctor(doctor(1)).unwrap();
        flow.pick_slot(day(), "13:00".parse().unwrap(), now().naive_utc()).unwrap();
        flow.confirm().unwrap();
        flow.pay(&MockPaymentGateway, &card(), now()).unwrap();

        assert!(matches!(flow.back(), Err(BookingError::AlreadyPaid)));
        assert!(matches!(
            flow.pay(&MockPaymentGateway, &card(), now()),
            Err(BookingError::AlreadyPaid)
        ));

        flow.reset();
        assert_eq!(flow.step(), BookingStep::SelectDoctor);
        assert!(flow.receipt().is_none());
    }

    #[test]
    fn failed_payment_keeps_flow_at_payment() {
        let mut flow = BookingFlow::new();
        flow.select_doctor(doctor(1)).unwrap();
        flow.pick_slot(day(), "13:00".parse().unwrap(), now().naive_utc()).unwrap();
        flow.confirm().unwrap();

        let expired = CardDetails {
            expiry: "01/26".to_string(),
            ..card()
        };
        assert!(matches!(
            flow.pay(&MockPaymentGateway, &expired, now()),
            Err(BookingError::Payment(_))
        ));
        assert_eq!(flow.step(), BookingStep::Payment);
        assert!(flow.receipt().is_none());
    }
}
