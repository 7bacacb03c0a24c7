use crate::api::booking_management::service::BookingService;
use crate::api::now;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::response::status::NoContent;

#[delete("/bookings/<booking_id>")]
pub(crate) async fn delete_booking(
    booking_id: i64,
    sharer: SharerId,
    conn: DbConn,
) -> Result<NoContent, ErrorResponse> {
    conn.run(move |c| BookingService::new(&PgStore::new(c), now()).delete(booking_id, sharer.0))
        .await?;

    Ok(NoContent)
}
