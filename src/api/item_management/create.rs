use crate::api::item_management::models::{ItemOut, NewItem};
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
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    #[validate(
        required(message = "name is required"),
        custom(function = "not_blank", message = "name must not be blank")
    )]
    name: Option<String>,
    #[validate(
        required(message = "description is required"),
        custom(function = "not_blank", message = "description must not be blank")
    )]
    description: Option<String>,
    #[validate(required(message = "available is required"))]
    available: Option<bool>,
    request_id: Option<i64>,
}

#[post("/items", data = "<draft>")]
pub(crate) async fn create_item(
    sharer: SharerId,
    draft: Json<ItemDraft>,
    conn: DbConn,
) -> Result<status::Created<Json<ItemOut>>, ErrorResponse> {
    let draft = validated(draft.into_inner())?;
    let new_item = NewItem {
        name: required(draft.name, "name")?,
        description: required(draft.description, "description")?,
        available: required(draft.available, "available")?,
        owner_id: sharer.0,
        request_id: draft.request_id,
    };

    let item = conn
        .run(move |c| ItemService::new(&PgStore::new(c), now()).add_item(new_item))
        .await?;

    Ok(status::Created::new(format!("/items/{}", item.id)).body(Json(ItemOut::from(&item))))
}
