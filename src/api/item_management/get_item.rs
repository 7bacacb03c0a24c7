use crate::api::item_management::models::ItemOut;
use crate::api::item_management::service::ItemService;
use crate::api::now;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::serde::json::Json;

/// Item with its comments. The owner also sees the last and next approved
/// bookings.
#[get("/items/<item_id>")]
pub(crate) async fn get_item(
    item_id: i64,
    sharer: SharerId,
    conn: DbConn,
) -> Result<Json<ItemOut>, ErrorResponse> {
    let view = conn
        .run(move |c| ItemService::new(&PgStore::new(c), now()).get_item(sharer.0, item_id))
        .await?;

    Ok(Json(ItemOut::from(&view)))
}
