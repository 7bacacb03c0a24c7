//! In-memory [`Store`] used by service tests.

use std::cell::RefCell;

use chrono::NaiveDateTime;

use super::{Store, StoreResult};
use crate::api::booking_management::models::{Booking, BookingStatus, NewBooking};
use crate::api::item_management::models::{Comment, Item, NewComment, NewItem};
use crate::api::paging::Page;
use crate::api::request_management::models::{ItemRequest, NewItemRequest};
use crate::api::user_management::models::{NewUser, User};
use crate::error::ServiceError;

#[derive(Default, Clone)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    items: Vec<Item>,
    bookings: Vec<Booking>,
    requests: Vec<ItemRequest>,
    comments: Vec<Comment>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: RefCell<Tables>,
}

impl MemoryStore {
    pub(crate) fn seed_user(&self, name: &str, email: &str) -> User {
        self.insert_user(&NewUser {
            name: name.to_string(),
            email: email.to_string(),
        })
        .expect("memory insert")
    }

    pub(crate) fn seed_item(&self, owner_id: i64, name: &str, available: bool) -> Item {
        self.insert_item(&NewItem {
            name: name.to_string(),
            description: format!("{} in good condition", name),
            available,
            owner_id,
            request_id: None,
        })
        .expect("memory insert")
    }

    pub(crate) fn seed_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: BookingStatus,
    ) -> Booking {
        self.insert_booking(&NewBooking {
            start,
            end,
            item_id,
            booker_id,
            status,
        })
        .expect("memory insert")
    }

    pub(crate) fn booking_count(&self) -> usize {
        self.tables.borrow().bookings.len()
    }
}

fn newest_start_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.start.cmp(&a.start).then(b.id.cmp(&a.id)));
}

/// Half-open intervals, so a booking ending at `start` does not clash.
fn overlaps(booking: &Booking, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    booking.start < end && booking.end > start
}

fn newest_request_first(requests: &mut [ItemRequest]) {
    requests.sort_by(|a, b| b.created.cmp(&a.created).then(b.id.cmp(&a.id)));
}

impl Store for MemoryStore {
    fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce() -> StoreResult<T>,
    {
        let snapshot = self.tables.borrow().clone();
        let result = f();
        if result.is_err() {
            *self.tables.borrow_mut() = snapshot;
        }
        result
    }

    fn insert_user(&self, user: &NewUser) -> StoreResult<User> {
        let mut tables = self.tables.borrow_mut();
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(ServiceError::conflict("unique violation on users.email"));
        }
        let user = User {
            id: tables.next_id(),
            name: user.name.clone(),
            email: user.email.clone(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.borrow().users.iter().find(|u| u.id == id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables
            .borrow()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.borrow().users.clone())
    }

    fn update_user(&self, user: &User) -> StoreResult<User> {
        let mut tables = self.tables.borrow_mut();
        let stored = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(ServiceError::UserNotFound(user.id))?;
        *stored = user.clone();
        Ok(user.clone())
    }

    fn delete_user(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.borrow_mut();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        let owned: Vec<i64> = tables
            .items
            .iter()
            .filter(|i| i.owner_id == id)
            .map(|i| i.id)
            .collect();
        tables.items.retain(|i| i.owner_id != id);
        tables
            .bookings
            .retain(|b| b.booker_id != id && !owned.contains(&b.item_id));
        let dropped: Vec<i64> = tables
            .requests
            .iter()
            .filter(|r| r.requestor_id == id)
            .map(|r| r.id)
            .collect();
        tables.requests.retain(|r| r.requestor_id != id);
        for item in tables.items.iter_mut() {
            if item.request_id.map_or(false, |r| dropped.contains(&r)) {
                item.request_id = None;
            }
        }
        tables
            .comments
            .retain(|c| c.author_id != id && !owned.contains(&c.item_id));
        Ok(true)
    }

    fn insert_item(&self, item: &NewItem) -> StoreResult<Item> {
        let mut tables = self.tables.borrow_mut();
        let item = Item {
            id: tables.next_id(),
            name: item.name.clone(),
            description: item.description.clone(),
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
        };
        tables.items.push(item.clone());
        Ok(item)
    }

    fn find_item(&self, id: i64) -> StoreResult<Option<Item>> {
        Ok(self.tables.borrow().items.iter().find(|i| i.id == id).cloned())
    }

    fn update_item(&self, item: &Item) -> StoreResult<Item> {
        let mut tables = self.tables.borrow_mut();
        let stored = tables
            .items
            .iter_mut()
            .find(|i| i.id == item.id)
            .ok_or(ServiceError::ItemNotFound(item.id))?;
        *stored = item.clone();
        Ok(item.clone())
    }

    fn items_by_owner(&self, owner_id: i64, page: Page) -> StoreResult<Vec<Item>> {
        Ok(page.apply(
            self.tables
                .borrow()
                .items
                .iter()
                .filter(|i| i.owner_id == owner_id)
                .cloned()
                .collect(),
        ))
    }

    fn search_available_items(&self, text: &str, page: Page) -> StoreResult<Vec<Item>> {
        let needle = text.to_lowercase();
        Ok(page.apply(
            self.tables
                .borrow()
                .items
                .iter()
                .filter(|i| i.available)
                .filter(|i| {
                    i.name.to_lowercase().contains(&needle)
                        || i.description.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect(),
        ))
    }

    fn items_by_requests(&self, request_ids: &[i64]) -> StoreResult<Vec<Item>> {
        Ok(self
            .tables
            .borrow()
            .items
            .iter()
            .filter(|i| i.request_id.map_or(false, |id| request_ids.contains(&id)))
            .cloned()
            .collect())
    }

    fn insert_booking(&self, booking: &NewBooking) -> StoreResult<Booking> {
        let mut tables = self.tables.borrow_mut();
        let booking = Booking {
            id: tables.next_id(),
            start: booking.start,
            end: booking.end,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            status: booking.status,
        };
        tables.bookings.push(booking.clone());
        Ok(booking)
    }

    fn find_booking(&self, id: i64) -> StoreResult<Option<Booking>> {
        Ok(self
            .tables
            .borrow()
            .bookings
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    fn update_booking_status(&self, id: i64, status: BookingStatus) -> StoreResult<Booking> {
        let mut tables = self.tables.borrow_mut();
        let stored = tables
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ServiceError::BookingNotFound(id))?;
        stored.status = status;
        Ok(stored.clone())
    }

    fn bookings_by_booker(&self, booker_id: i64) -> StoreResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .tables
            .borrow()
            .bookings
            .iter()
            .filter(|b| b.booker_id == booker_id)
            .cloned()
            .collect();
        newest_start_first(&mut found);
        Ok(found)
    }

    fn bookings_by_owner(&self, owner_id: i64) -> StoreResult<Vec<Booking>> {
        let tables = self.tables.borrow();
        let owned: Vec<i64> = tables
            .items
            .iter()
            .filter(|i| i.owner_id == owner_id)
            .map(|i| i.id)
            .collect();
        let mut found: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|b| owned.contains(&b.item_id))
            .cloned()
            .collect();
        newest_start_first(&mut found);
        Ok(found)
    }

    fn bookings_by_item(&self, item_id: i64) -> StoreResult<Vec<Booking>> {
        let mut found: Vec<Booking> = self
            .tables
            .borrow()
            .bookings
            .iter()
            .filter(|b| b.item_id == item_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    fn has_overlapping_booking(
        &self,
        item_id: i64,
        status: BookingStatus,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<bool> {
        Ok(self
            .tables
            .borrow()
            .bookings
            .iter()
            .any(|b| b.item_id == item_id && b.status == status && overlaps(b, start, end)))
    }

    fn has_finished_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        moment: NaiveDateTime,
    ) -> StoreResult<bool> {
        Ok(self.tables.borrow().bookings.iter().any(|b| {
            b.item_id == item_id
                && b.booker_id == booker_id
                && b.end < moment
        }))
    }

    fn delete_booking(&self, id: i64) -> StoreResult<bool> {
        let mut tables = self.tables.borrow_mut();
        let before = tables.bookings.len();
        tables.bookings.retain(|b| b.id != id);
        Ok(tables.bookings.len() < before)
    }

    fn insert_request(&self, request: &NewItemRequest) -> StoreResult<ItemRequest> {
        let mut tables = self.tables.borrow_mut();
        let request = ItemRequest {
            id: tables.next_id(),
            description: request.description.clone(),
            requestor_id: request.requestor_id,
            created: request.created,
        };
        tables.requests.push(request.clone());
        Ok(request)
    }

    fn find_request(&self, id: i64) -> StoreResult<Option<ItemRequest>> {
        Ok(self
            .tables
            .borrow()
            .requests
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    fn requests_by_requestor(&self, requestor_id: i64) -> StoreResult<Vec<ItemRequest>> {
        let mut found: Vec<ItemRequest> = self
            .tables
            .borrow()
            .requests
            .iter()
            .filter(|r| r.requestor_id == requestor_id)
            .cloned()
            .collect();
        newest_request_first(&mut found);
        Ok(found)
    }

    fn requests_excluding(
        &self,
        requestor_id: i64,
        page: Page,
    ) -> StoreResult<Vec<ItemRequest>> {
        let mut found: Vec<ItemRequest> = self
            .tables
            .borrow()
            .requests
            .iter()
            .filter(|r| r.requestor_id != requestor_id)
            .cloned()
            .collect();
        newest_request_first(&mut found);
        Ok(page.apply(found))
    }

    fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment> {
        let mut tables = self.tables.borrow_mut();
        let comment = Comment {
            id: tables.next_id(),
            text: comment.text.clone(),
            item_id: comment.item_id,
            author_id: comment.author_id,
            created: comment.created,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    fn comments_by_item(&self, item_id: i64) -> StoreResult<Vec<(Comment, User)>> {
        let tables = self.tables.borrow();
        tables
            .comments
            .iter()
            .filter(|c| c.item_id == item_id)
            .map(|c| -> StoreResult<(Comment, User)> {
                let author = tables
                    .users
                    .iter()
                    .find(|u| u.id == c.author_id)
                    .cloned()
                    .ok_or(ServiceError::UserNotFound(c.author_id))?;
                Ok((c.clone(), author))
            })
            .collect()
    }
}
