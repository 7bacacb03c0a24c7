use crate::api::booking_management::models::BookingOut;
use crate::api::booking_management::service::BookingService;
use crate::api::booking_management::state::BookingState;
use crate::api::now;
use crate::api::paging::Page;
use crate::api::sharer::SharerId;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::settings::Settings;
use crate::store::PgStore;
use rocket::serde::json::Json;
use rocket::State;

fn parse_state(state: Option<&str>) -> Result<BookingState, ErrorResponse> {
    Ok(state.map(str::parse::<BookingState>).transpose()?.unwrap_or_default())
}

/// Bookings made by the caller, newest start first.
#[get("/bookings?<state>&<from>&<size>")]
pub(crate) async fn get_bookings(
    sharer: SharerId,
    state: Option<&str>,
    from: Option<i64>,
    size: Option<i64>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<Vec<BookingOut>>, ErrorResponse> {
    let state = parse_state(state)?;
    let page = Page::new(from, size, settings)?;

    let views = conn
        .run(move |c| {
            BookingService::new(&PgStore::new(c), now()).list_by_booker(sharer.0, state, page)
        })
        .await?;

    Ok(Json(views.iter().map(BookingOut::from).collect()))
}

/// Bookings of every item the caller owns, newest start first.
#[get("/bookings/owner?<state>&<from>&<size>")]
pub(crate) async fn get_owner_bookings(
    sharer: SharerId,
    state: Option<&str>,
    from: Option<i64>,
    size: Option<i64>,
    conn: DbConn,
    settings: &State<Settings>,
) -> Result<Json<Vec<BookingOut>>, ErrorResponse> {
    let state = parse_state(state)?;
    let page = Page::new(from, size, settings)?;

    let views = conn
        .run(move |c| {
            BookingService::new(&PgStore::new(c), now()).list_by_owner(sharer.0, state, page)
        })
        .await?;

    Ok(Json(views.iter().map(BookingOut::from).collect()))
}
