use crate::api::user_management::models::UserOut;
use crate::api::user_management::service::UserService;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::serde::json::Json;

#[get("/users")]
pub(crate) async fn get_users(conn: DbConn) -> Result<Json<Vec<UserOut>>, ErrorResponse> {
    let users = conn
        .run(|c| UserService::new(&PgStore::new(c)).list())
        .await?;

    Ok(Json(users.iter().map(UserOut::from).collect()))
}
