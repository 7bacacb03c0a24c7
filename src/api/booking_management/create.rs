use crate::api::booking_management::models::BookingOut;
use crate::api::booking_management::service::BookingService;
use crate::api::now;
use crate::api::sharer::SharerId;
use crate::api::validation::{required, validated};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use chrono::NaiveDateTime;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[validate(required(message = "itemId is required"))]
    item_id: Option<i64>,
    #[validate(required(message = "start is required"))]
    start: Option<NaiveDateTime>,
    #[validate(required(message = "end is required"))]
    end: Option<NaiveDateTime>,
}

#[post("/bookings", data = "<draft>")]
pub(crate) async fn create_booking(
    sharer: SharerId,
    draft: Json<BookingDraft>,
    conn: DbConn,
) -> Result<status::Created<Json<BookingOut>>, ErrorResponse> {
    let draft = validated(draft.into_inner())?;
    let item_id = required(draft.item_id, "itemId")?;
    let start = required(draft.start, "start")?;
    let end = required(draft.end, "end")?;

    let view = conn
        .run(move |c| {
            BookingService::new(&PgStore::new(c), now()).create(sharer.0, item_id, start, end)
        })
        .await?;

    Ok(status::Created::new(format!("/bookings/{}", view.booking.id))
        .body(Json(BookingOut::from(&view))))
}
