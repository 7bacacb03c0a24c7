use crate::api::item_management::models::{Item, ItemOut};
use crate::api::user_management::models::{User, UserOut};
use crate::schema::item_requests;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    pub id: i64,
    pub description: String,
    pub requestor_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[table_name = "item_requests"]
pub struct NewItemRequest {
    pub description: String,
    pub requestor_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct RequestView {
    pub request: ItemRequest,
    pub requestor: User,
    pub items: Vec<Item>,
}

#[derive(Serialize, Debug)]
pub struct ItemRequestOut {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub requestor: UserOut,
    pub items: Vec<ItemOut>,
}

impl From<&RequestView> for ItemRequestOut {
    fn from(view: &RequestView) -> Self {
        ItemRequestOut {
            id: view.request.id,
            description: view.request.description.clone(),
            created: view.request.created,
            requestor: UserOut::from(&view.requestor),
            items: view.items.iter().map(ItemOut::from).collect(),
        }
    }
}
