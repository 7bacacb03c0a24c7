use crate::api::item_management::models::CommentOut;
use crate::api::item_management::service::ItemService;
use crate::api::now;
use crate::api::sharer::SharerId;
use crate::api::validation::{not_blank, required, validated};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CommentText {
    #[validate(
        required(message = "text is required"),
        custom(function = "not_blank", message = "text must not be blank")
    )]
    text: Option<String>,
}

/// Leaves a review on an item the caller has finished renting.
#[post("/items/<item_id>/comment", data = "<comment>")]
pub(crate) async fn add_comment(
    item_id: i64,
    sharer: SharerId,
    comment: Json<CommentText>,
    conn: DbConn,
) -> Result<status::Created<Json<CommentOut>>, ErrorResponse> {
    let text = required(validated(comment.into_inner())?.text, "text")?;

    let view = conn
        .run(move |c| ItemService::new(&PgStore::new(c), now()).add_comment(sharer.0, item_id, text))
        .await?;

    Ok(status::Created::new(format!("/items/{}", item_id)).body(Json(CommentOut::from(&view))))
}
