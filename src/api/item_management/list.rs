use crate::api::item_management::models::ItemOut;
use crate::api::item_management::service::ItemService;
use crate::api::now;
use crate::api::paging::Page;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::settings::Settings;
use crate::store::PgStore;
use rocket::serde::json::Json;
use rocket::State;

#[get("/items?<from>&<size>")]
pub(crate) async fn get_items(
    sharer: SharerId,
    from: Option<i64>,
    size: Option<i64>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<Vec<ItemOut>>, ErrorResponse> {
    let page = Page::new(from, size, settings)?;

    let views = conn
        .run(move |c| ItemService::new(&PgStore::new(c), now()).items_by_owner(sharer.0, page))
        .await?;

    Ok(Json(views.iter().map(ItemOut::from).collect()))
}
