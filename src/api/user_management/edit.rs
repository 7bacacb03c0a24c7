use crate::api::user_management::models::{UserChanges, UserOut};
use crate::api::user_management::service::UserService;
use crate::api::validation::validated;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::serde::json::Json;

#[patch("/users/<user_id>", data = "<changes>")]
pub(crate) async fn edit_user(
    user_id: i64,
    changes: Json<UserChanges>,
    conn: DbConn,
) -> Result<Json<UserOut>, ErrorResponse> {
    let changes = validated(changes.into_inner())?;

    let user = conn
        .run(move |c| UserService::new(&PgStore::new(c)).update(user_id, &changes))
        .await?;

    Ok(Json(UserOut::from(&user)))
}
