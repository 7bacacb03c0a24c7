use chrono::NaiveDateTime;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;

use super::{Store, StoreResult};
use crate::api::booking_management::models::{Booking, BookingStatus, NewBooking};
use crate::api::item_management::models::{Comment, Item, NewComment, NewItem};
use crate::api::paging::Page;
use crate::api::request_management::models::{ItemRequest, NewItemRequest};
use crate::api::user_management::models::{NewUser, User};
use crate::error::ServiceError;
use crate::schema::{bookings, comments, item_requests, items, users};

sql_function!(fn lower(x: Text) -> Text);

/// Diesel-backed [`Store`] borrowing one pooled connection for the length of
/// a request.
pub(crate) struct PgStore<'c> {
    conn: &'c PgConnection,
}

impl<'c> PgStore<'c> {
    pub(crate) fn new(conn: &'c PgConnection) -> Self {
        PgStore { conn }
    }
}

#[derive(Queryable)]
struct BookingRow {
    id: i64,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    item_id: i64,
    booker_id: i64,
    status: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = ServiceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            item_id: row.item_id,
            booker_id: row.booker_id,
            status: row.status.parse()?,
        })
    }
}

#[derive(Insertable)]
#[table_name = "bookings"]
struct NewBookingRow {
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    item_id: i64,
    booker_id: i64,
    status: String,
}

impl From<&NewBooking> for NewBookingRow {
    fn from(booking: &NewBooking) -> Self {
        NewBookingRow {
            start_date: booking.start,
            end_date: booking.end,
            item_id: booking.item_id,
            booker_id: booking.booker_id,
            status: booking.status.to_string(),
        }
    }
}

fn into_bookings(rows: Vec<BookingRow>) -> StoreResult<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

/// `%text%` with LIKE wildcards in `text` escaped.
fn contains_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

impl Store for PgStore<'_> {
    fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce() -> StoreResult<T>,
    {
        self.conn.transaction::<T, ServiceError, _>(f)
    }

    fn insert_user(&self, user: &NewUser) -> StoreResult<User> {
        Ok(diesel::insert_into(users::table)
            .values(user)
            .get_result::<User>(self.conn)?)
    }

    fn find_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(users::table.find(id).first::<User>(self.conn).optional()?)
    }

    fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(users::table
            .filter(lower(users::email).eq(email.to_lowercase()))
            .first::<User>(self.conn)
            .optional()?)
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(users::table
            .order(users::id.asc())
            .load::<User>(self.conn)?)
    }

    fn update_user(&self, user: &User) -> StoreResult<User> {
        Ok(diesel::update(users::table.find(user.id))
            .set((users::name.eq(&user.name), users::email.eq(&user.email)))
            .get_result::<User>(self.conn)?)
    }

    fn delete_user(&self, id: i64) -> StoreResult<bool> {
        let deleted = diesel::delete(users::table.find(id)).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn insert_item(&self, item: &NewItem) -> StoreResult<Item> {
        Ok(diesel::insert_into(items::table)
            .values(item)
            .get_result::<Item>(self.conn)?)
    }

    fn find_item(&self, id: i64) -> StoreResult<Option<Item>> {
        Ok(items::table.find(id).first::<Item>(self.conn).optional()?)
    }

    fn update_item(&self, item: &Item) -> StoreResult<Item> {
        Ok(diesel::update(items::table.find(item.id))
            .set((
                items::name.eq(&item.name),
                items::description.eq(&item.description),
                items::available.eq(item.available),
            ))
            .get_result::<Item>(self.conn)?)
    }

    fn items_by_owner(&self, owner_id: i64, page: Page) -> StoreResult<Vec<Item>> {
        Ok(items::table
            .filter(items::owner_id.eq(owner_id))
            .order(items::id.asc())
            .offset(page.from)
            .limit(page.size)
            .load::<Item>(self.conn)?)
    }

    fn search_available_items(&self, text: &str, page: Page) -> StoreResult<Vec<Item>> {
        let pattern = contains_pattern(text);
        Ok(items::table
            .filter(items::available.eq(true))
            .filter(
                items::name
                    .ilike(&pattern)
                    .or(items::description.ilike(&pattern)),
            )
            .order(items::id.asc())
            .offset(page.from)
            .limit(page.size)
            .load::<Item>(self.conn)?)
    }

    fn items_by_requests(&self, request_ids: &[i64]) -> StoreResult<Vec<Item>> {
        if request_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(items::table
            .filter(items::request_id.eq_any(request_ids.to_vec()))
            .order(items::id.asc())
            .load::<Item>(self.conn)?)
    }

    fn insert_booking(&self, booking: &NewBooking) -> StoreResult<Booking> {
        let row = diesel::insert_into(bookings::table)
            .values(&NewBookingRow::from(booking))
            .get_result::<BookingRow>(self.conn)?;
        Booking::try_from(row)
    }

    fn find_booking(&self, id: i64) -> StoreResult<Option<Booking>> {
        bookings::table
            .find(id)
            .first::<BookingRow>(self.conn)
            .optional()?
            .map(Booking::try_from)
            .transpose()
    }

    fn update_booking_status(&self, id: i64, status: BookingStatus) -> StoreResult<Booking> {
        let row = diesel::update(bookings::table.find(id))
            .set(bookings::status.eq(status.as_str()))
            .get_result::<BookingRow>(self.conn)?;
        Booking::try_from(row)
    }

    fn bookings_by_booker(&self, booker_id: i64) -> StoreResult<Vec<Booking>> {
        into_bookings(
            bookings::table
                .filter(bookings::booker_id.eq(booker_id))
                .order((bookings::start_date.desc(), bookings::id.desc()))
                .load::<BookingRow>(self.conn)?,
        )
    }

    fn bookings_by_owner(&self, owner_id: i64) -> StoreResult<Vec<Booking>> {
        into_bookings(
            bookings::table
                .inner_join(items::table)
                .filter(items::owner_id.eq(owner_id))
                .select(bookings::all_columns)
                .order((bookings::start_date.desc(), bookings::id.desc()))
                .load::<BookingRow>(self.conn)?,
        )
    }

    fn bookings_by_item(&self, item_id: i64) -> StoreResult<Vec<Booking>> {
        into_bookings(
            bookings::table
                .filter(bookings::item_id.eq(item_id))
                .order((bookings::start_date.asc(), bookings::id.asc()))
                .load::<BookingRow>(self.conn)?,
        )
    }

    fn has_overlapping_booking(
        &self,
        item_id: i64,
        status: BookingStatus,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<bool> {
        Ok(diesel::select(exists(
            bookings::table
                .filter(bookings::item_id.eq(item_id))
                .filter(bookings::status.eq(status.as_str()))
                .filter(bookings::start_date.lt(end))
                .filter(bookings::end_date.gt(start)),
        ))
        .get_result::<bool>(self.conn)?)
    }

    fn has_finished_booking(
        &self,
        item_id: i64,
        booker_id: i64,
        moment: NaiveDateTime,
    ) -> StoreResult<bool> {
        Ok(diesel::select(exists(
            bookings::table
                .filter(bookings::item_id.eq(item_id))
                .filter(bookings::booker_id.eq(booker_id))
                .filter(bookings::end_date.lt(moment)),
        ))
        .get_result::<bool>(self.conn)?)
    }

    fn delete_booking(&self, id: i64) -> StoreResult<bool> {
        let deleted = diesel::delete(bookings::table.find(id)).execute(self.conn)?;
        Ok(deleted > 0)
    }

    fn insert_request(&self, request: &NewItemRequest) -> StoreResult<ItemRequest> {
        Ok(diesel::insert_into(item_requests::table)
            .values(request)
            .get_result::<ItemRequest>(self.conn)?)
    }

    fn find_request(&self, id: i64) -> StoreResult<Option<ItemRequest>> {
        Ok(item_requests::table
            .find(id)
            .first::<ItemRequest>(self.conn)
            .optional()?)
    }

    fn requests_by_requestor(&self, requestor_id: i64) -> StoreResult<Vec<ItemRequest>> {
        Ok(item_requests::table
            .filter(item_requests::requestor_id.eq(requestor_id))
            .order((item_requests::created.desc(), item_requests::id.desc()))
            .load::<ItemRequest>(self.conn)?)
    }

    fn requests_excluding(
        &self,
        requestor_id: i64,
        page: Page,
    ) -> StoreResult<Vec<ItemRequest>> {
        Ok(item_requests::table
            .filter(item_requests::requestor_id.ne(requestor_id))
            .order((item_requests::created.desc(), item_requests::id.desc()))
            .offset(page.from)
            .limit(page.size)
            .load::<ItemRequest>(self.conn)?)
    }

    fn insert_comment(&self, comment: &NewComment) -> StoreResult<Comment> {
        Ok(diesel::insert_into(comments::table)
            .values(comment)
            .get_result::<Comment>(self.conn)?)
    }

    fn comments_by_item(&self, item_id: i64) -> StoreResult<Vec<(Comment, User)>> {
        Ok(comments::table
            .inner_join(users::table)
            .filter(comments::item_id.eq(item_id))
            .order((comments::created.asc(), comments::id.asc()))
            .load::<(Comment, User)>(self.conn)?)
    }
}
