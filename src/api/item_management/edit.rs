use crate::api::item_management::models::{ItemChanges, ItemOut};
use crate::api::item_management::service::ItemService;
use crate::api::now;
use crate::api::sharer::SharerId;
use crate::api::validation::validated;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::serde::json::Json;

#[patch("/items/<item_id>", data = "<changes>")]
pub(crate) async fn edit_item(
    item_id: i64,
    sharer: SharerId,
    changes: Json<ItemChanges>,
    conn: DbConn,
) -> Result<Json<ItemOut>, ErrorResponse> {
    let changes = validated(changes.into_inner())?;

    let view = conn
        .run(move |c| {
            ItemService::new(&PgStore::new(c), now()).update_item(sharer.0, item_id, &changes)
        })
        .await?;

    Ok(Json(ItemOut::from(&view)))
}
