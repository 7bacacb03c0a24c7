use crate::api::booking_management::models::{Booking, BookingStatus};
use crate::error::ServiceError;
use chrono::NaiveDateTime;
use std::str::FromStr;

/// Filter applied to booking listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum BookingState {
    #[default]
    All,
    Current,
    Past,
    Future,
    Waiting,
    Approved,
    Rejected,
}

impl BookingState {
    pub(crate) fn matches(&self, booking: &Booking, now: NaiveDateTime) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => booking.start < now && now < booking.end,
            BookingState::Past => booking.end < now,
            BookingState::Future => now < booking.start,
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Approved => booking.status == BookingStatus::Approved,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

impl FromStr for BookingState {
    type Err = ServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "APPROVED" => Ok(BookingState::Approved),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(ServiceError::bad_request(format!("Unknown state: {}", value))),
        }
    }
}
