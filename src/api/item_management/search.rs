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

#[get("/items/search?<text>&<from>&<size>")]
pub(crate) async fn search_items(
    sharer: SharerId,
    text: Option<String>,
    from: Option<i64>,
    size: Option<i64>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<Vec<ItemOut>>, ErrorResponse> {
    let page = Page::new(from, size, settings)?;
    let text = text.unwrap_or_default();

    let items = conn
        .run(move |c| {
            ItemService::new(&PgStore::new(c), now()).search_items(sharer.0, &text, page)
        })
        .await?;

    Ok(Json(items.iter().map(ItemOut::from).collect()))
}
