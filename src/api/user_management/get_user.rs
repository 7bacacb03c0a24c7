use crate::api::user_management::models::UserOut;
use crate::api::user_management::service::UserService;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::serde::json::Json;

#[get("/users/<user_id>")]
pub(crate) async fn get_user(user_id: i64, conn: DbConn) -> Result<Json<UserOut>, ErrorResponse> {
    let user = conn
        .run(move |c| UserService::new(&PgStore::new(c)).get(user_id))
        .await?;

    Ok(Json(UserOut::from(&user)))
}
