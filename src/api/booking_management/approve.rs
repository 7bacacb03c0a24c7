use crate::api::booking_management::models::BookingOut;
use crate::api::booking_management::service::BookingService;
use crate::api::now;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::{ErrorResponse, ServiceError};
use crate::store::PgStore;
use rocket::serde::json::Json;

/// A missing or unparsable `approved` value arrives as `None`.
fn decision(approved: Option<bool>) -> Result<bool, ServiceError> {
    approved.ok_or_else(|| {
        ServiceError::bad_request("Query parameter approved must be true or false")
    })
}

/// Owner's decision on a waiting booking: `approved=true` or `approved=false`.
#[patch("/bookings/<booking_id>?<approved>")]
pub(crate) async fn approve_booking(
    booking_id: i64,
    approved: Option<bool>,
    sharer: SharerId,
    conn: DbConn,
) -> Result<Json<BookingOut>, ErrorResponse> {
    let approved = decision(approved)?;

    let view = conn
        .run(move |c| {
            BookingService::new(&PgStore::new(c), now()).approve(booking_id, sharer.0, approved)
        })
        .await?;

    Ok(Json(BookingOut::from(&view)))
}
