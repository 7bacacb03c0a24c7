//! Storage seam shared by every service.
//!
//! Services only talk to [`Store`]. The production implementation is
//! [`PgStore`], which runs Diesel queries on a pooled PostgreSQL connection.

mod pg;

#[cfg(test)]
pub(crate) mod memory;

pub(crate) use pg::PgStore;

use chrono::NaiveDateTime;

use crate::api::booking_management::models::{Booking, BookingStatus, NewBooking};
use crate::api::item_management::models::{Comment, Item, NewComment, NewItem};
use crate::api::paging::Page;
use crate::api::request_management::models::{ItemRequest, NewItemRequest};
use crate::api::user_management::models::{NewUser, User};
use crate::error::ServiceError;

pub(crate) type StoreResult<T> = Result<T, ServiceError>;

pub(crate) trait Store {
    /// Runs `f` inside one storage transaction. An `Err` rolls back every
    /// write made by `f`.
    fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce() -> StoreResult<T>;

    fn insert_user(&self, user: &NewUser) -> StoreResult<User>;
    fn find_user(&self, id: i64) -> StoreResult<Option<User>>;
    /// Case-insensitive lookup.
    fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    fn list_users(&self) -> StoreResult<Vec<User>>;
    fn update_user(&self, user: &User) -> StoreResult<User>;
    fn delete_user(&self, id: i64) -> StoreResult<bool>;

    fn insert_item(&self, item: &NewItem) -> StoreResult<Item>;
    fn find_item(&self, id: i64) -> StoreResult<Option<Item>>;
    fn update_item(&self, item: &Item) -> StoreResult<Item>;
    /// Ordered by id.
    fn items_by_owner(&self, owner_id: i64, page: Page) -> StoreResult<Vec<Item>>;
    /// Available items whose name or description contains `text`, ignoring
    /// case. Ordered by id.
    fn search_available_items(&self, text: &str, page: Page) -> StoreResult<Vec<Item>>;
    fn items_by_requests(&self, request_ids: &[i64]) -> StoreResult<Vec<Item>>;

    fn insert_booking(&self, booking: &NewBooking) -> StoreResult<Booking>;
    fn find_booking(&self, id: i64) -> StoreResult<Option<Booking>>;
    fn update_booking_status(&self, id: i64, status: BookingStatus) -> StoreResult<Booking>;
    /// Newest start first.
    fn bookings_by_booker(&self, booker_id: i64) -> StoreResult<Vec<Booking>>;
    /// Bookings of every item owned by `owner_id`, newest start first.
    fn bookings_by_owner(&self, owner_id: i64) -> StoreResult<Vec<Booking>>;
    /// Oldest start first.
    fn bookings_by_item(&self, item_id: i64) -> StoreResult<Vec<Booking>>;
    /// Whether a booking of `item_id` in `status` intersects `[start, end)`.
    fn has_overlapping_booking(
        &self,
        item_id: i64,
        status: BookingStatus,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<bool>;
    /// Whether `booker_id` has a booking of `item_id`, in any status, that
    /// ended before `moment`.
    fn has_finished_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        moment: NaiveDateTime,
    ) -> StoreResult<bool>;
    fn delete_booking(&self, id: i64) -> StoreResult<bool>;

    fn insert_request(&self, request: &NewItemRequest) -> StoreResult<ItemRequest>;
    fn find_request(&self, id: i64) -> StoreResult<Option<ItemRequest>>;
    /// Newest first.
    fn requests_by_requestor(&self, requestor_id: i64) -> StoreResult<Vec<ItemRequest>>;
    /// Requests of everyone but `requestor_id`, newest first.
    fn requests_excluding(&self, requestor_id: i64, page: Page) -> StoreResult<Vec<ItemRequest>>;

    fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment>;
    /// Comments with their authors, oldest first.
    fn comments_by_item(&self, item_id: i64) -> StoreResult<Vec<(Comment, User)>>;

    fn require_user(&self, id: i64) -> StoreResult<User> {
        self.find_user(id)?.ok_or(ServiceError::UserNotFound(id))
    }

    fn require_item(&self, id: i64) -> StoreResult<Item> {
        self.find_item(id)?.ok_or(ServiceError::ItemNotFound(id))
    }

    fn require_booking(&self, id: i64) -> StoreResult<Booking> {
        self.find_booking(id)?.ok_or(ServiceError::BookingNotFound(id))
    }

    fn require_request(&self, id: i64) -> StoreResult<ItemRequest> {
        self.find_request(id)?.ok_or(ServiceError::RequestNotFound(id))
    }
}
