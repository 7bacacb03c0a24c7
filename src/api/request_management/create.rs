use crate::api::now;
use crate::api::request_management::models::ItemRequestOut;
use crate::api::request_management::service::RequestService;
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
pub struct RequestDraft {
    #[validate(
        required(message = "description is required"),
        custom(function = "not_blank", message = "description must not be blank")
    )]
    description: Option<String>,
}

#[post("/requests", data = "<draft>")]
pub(crate) async fn create_request(
    sharer: SharerId,
    draft: Json<RequestDraft>,
    conn: DbConn,
) -> Result<status::Created<Json<ItemRequestOut>>, ErrorResponse> {
    let description = required(validated(draft.into_inner())?.description, "description")?;

    let view = conn
        .run(move |c| RequestService::new(&PgStore::new(c), now()).create(sharer.0, description))
        .await?;

    Ok(status::Created::new(format!("/requests/{}", view.request.id))
        .body(Json(ItemRequestOut::from(&view))))
}
