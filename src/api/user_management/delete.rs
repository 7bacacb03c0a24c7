use crate::api::user_management::service::UserService;
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::response::status::NoContent;

#[delete("/users/<user_id>")]
pub(crate) async fn delete_user(user_id: i64, conn: DbConn) -> Result<NoContent, ErrorResponse> {
    conn.run(move |c| UserService::new(&PgStore::new(c)).delete(user_id))
        .await?;

    Ok(NoContent)
}
