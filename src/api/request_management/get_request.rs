use crate::api::now;
use crate::api::request_management::models::ItemRequestOut;
use crate::api::request_management::service::RequestService;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::serde::json::Json;

#[get("/requests/<request_id>")]
pub(crate) async fn get_request(
    request_id: i64,
    sharer: SharerId,
    conn: DbConn,
) -> Result<Json<ItemRequestOut>, ErrorResponse> {
    let view = conn
        .run(move |c| RequestService::new(&PgStore::new(c), now()).get(sharer.0, request_id))
        .await?;

    Ok(Json(ItemRequestOut::from(&view)))
}
