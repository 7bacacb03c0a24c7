use crate::api::booking_management::models::Booking;
use crate::api::user_management::models::User;
use crate::api::validation::not_blank;
use crate::schema::{comments, items};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

#[derive(Insertable, Debug, Clone)]
#[table_name = "items"]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
}

/// Partial update of an item by its owner.
#[derive(Deserialize, Validate, Debug, Default)]
pub struct ItemChanges {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: Option<String>,
    #[validate(custom(function = "not_blank", message = "description must not be blank"))]
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl ItemChanges {
    pub(crate) fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(available) = self.available {
            item.available = available;
        }
    }
}

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[table_name = "comments"]
pub struct NewComment {
    pub text: String,
    pub item_id: i64,
    pub author_id: i64,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author: User,
}

/// An item together with what its detail page shows.
///
/// `last_booking` and `next_booking` are only filled for the owner.
#[derive(Debug, Clone)]
pub struct ItemView {
    pub item: Item,
    pub comments: Vec<CommentView>,
    pub last_booking: Option<Booking>,
    pub next_booking: Option<Booking>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentOut {
    pub id: i64,
    pub text: String,
    pub author_name: String,
    pub created: NaiveDateTime,
}

impl From<&CommentView> for CommentOut {
    fn from(view: &CommentView) -> Self {
        CommentOut {
            id: view.comment.id,
            text: view.comment.text.clone(),
            author_name: view.author.name.clone(),
            created: view.comment.created,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingShortOut {
    pub id: i64,
    pub booker_id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl From<&Booking> for BookingShortOut {
    fn from(booking: &Booking) -> Self {
        BookingShortOut {
            id: booking.id,
            booker_id: booking.booker_id,
            start: booking.start,
            end: booking.end,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ItemOut {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
    pub comments: Vec<CommentOut>,
    pub last_booking: Option<BookingShortOut>,
    pub next_booking: Option<BookingShortOut>,
}

impl From<&Item> for ItemOut {
    fn from(item: &Item) -> Self {
        ItemOut {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available,
            request_id: item.request_id,
            comments: Vec::new(),
            last_booking: None,
            next_booking: None,
        }
    }
}

impl From<&ItemView> for ItemOut {
    fn from(view: &ItemView) -> Self {
        ItemOut {
            comments: view.comments.iter().map(CommentOut::from).collect(),
            last_booking: view.last_booking.as_ref().map(BookingShortOut::from),
            next_booking: view.next_booking.as_ref().map(BookingShortOut::from),
            ..ItemOut::from(&view.item)
        }
    }
}
