// src/models/mod.rs

pub mod availability;
pub mod id;
pub mod package;
pub mod psychologist;
pub mod session;
pub mod time_slot;
pub mod user;

pub use availability::Availability;
pub use id::Id;
pub use package::{Package, PackageInput};
pub use psychologist::{NewPsychologist, Psychologist, PsychologistUpdate};
pub use session::{NewBooking, RescheduleRequest, Session, SessionStatus, SessionUpdate};
pub use time_slot::TimeSlot;
pub use user::{AuthResponse, ClientProfile, Credentials, Registration, Role, User, UserUpdate};
