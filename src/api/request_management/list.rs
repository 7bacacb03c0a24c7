use crate::api::now;
use crate::api::paging::Page;
use crate::api::request_management::models::ItemRequestOut;
use crate::api::request_management::service::RequestService;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::settings::Settings;
use crate::store::PgStore;
use rocket::serde::json::Json;
use rocket::State;

/// The caller's own requests, newest first.
#[get("/requests")]
pub(crate) async fn get_own_requests(
    sharer: SharerId,
    conn: DbConn,
) -> Result<Json<Vec<ItemRequestOut>>, ErrorResponse> {
    let views = conn
        .run(move |c| RequestService::new(&PgStore::new(c), now()).own(sharer.0))
        .await?;

    Ok(Json(views.iter().map(ItemRequestOut::from).collect()))
}

/// Requests posted by other users, newest first.
#[get("/requests/all?<from>&<size>")]
pub(crate) async fn get_all_requests(
    sharer: SharerId,
    from: Option<i64>,
    size: Option<i64>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<Vec<ItemRequestOut>>, ErrorResponse> {
    let page = Page::new(from, size, settings)?;

    let views = conn
        .run(move |c| RequestService::new(&PgStore::new(c), now()).all(sharer.0, page))
        .await?;

    Ok(Json(views.iter().map(ItemRequestOut::from).collect()))
}
