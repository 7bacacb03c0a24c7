use crate::api::booking_management::models::BookingOut;
use crate::api::booking_management::service::BookingService;
use crate::api::now;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::serde::json::Json;

#[get("/bookings/<booking_id>")]
pub(crate) async fn get_booking(
    booking_id: i64,
    sharer: SharerId,
    conn: DbConn,
) -> Result<Json<BookingOut>, ErrorResponse> {
    let view = conn
        .run(move |c| BookingService::new(&PgStore::new(c), now()).get(booking_id, sharer.0))
        .await?;

    Ok(Json(BookingOut::from(&view)))
}
