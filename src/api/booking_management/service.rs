//! Booking lifecycle.
//!
//! A booking is created `WAITING` and decided exactly once by the item's
//! owner. Approved bookings of one item never overlap: the check runs both
//! when a booking is requested and when it is approved.

use crate::api::booking_management::models::{Booking, BookingStatus, BookingView, NewBooking};
use crate::api::booking_management::state::BookingState;
use crate::api::item_management::models::Item;
use crate::api::paging::Page;
use crate::error::ServiceError;
use crate::store::{Store, StoreResult};
use chrono::NaiveDateTime;
use tracing::{info, warn};

pub(crate) struct BookingService<'s, S: Store> {
    store: &'s S,
    now: NaiveDateTime,
}

impl<'s, S: Store> BookingService<'s, S> {
    pub(crate) fn new(store: &'s S, now: NaiveDateTime) -> Self {
        BookingService { store, now }
    }

    fn view(&self, booking: Booking) -> StoreResult<BookingView> {
        let item = self.store.require_item(booking.item_id)?;
        let booker = self.store.require_user(booking.booker_id)?;
        Ok(BookingView {
            booking,
            item,
            booker,
        })
    }

    fn views(&self, bookings: Vec<Booking>) -> StoreResult<Vec<BookingView>> {
        bookings.into_iter().map(|b| self.view(b)).collect()
    }

    fn ensure_no_approved_overlap(
        &self,
        item_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<()> {
        if self
            .store
            .has_overlapping_booking(item_id, BookingStatus::Approved, start, end)?
        {
            return Err(ServiceError::bad_request(format!(
                "Item {} is already booked between {} and {}",
                item_id, start, end
            )));
        }
        Ok(())
    }

    /// Item of `booking`, checking that `user_id` is allowed to see it.
    fn participant_item(&self, booking: &Booking, user_id: i64) -> StoreResult<Item> {
        let item = self.store.require_item(booking.item_id)?;
        if booking.booker_id != user_id && item.owner_id != user_id {
            return Err(ServiceError::access_denied(format!(
                "User {} is neither the booker nor the owner of booking {}",
                user_id, booking.id
            )));
        }
        Ok(item)
    }

    pub(crate) fn create(
        &self,
        booker_id: i64,
        item_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> StoreResult<BookingView> {
        if start >= end {
            return Err(ServiceError::bad_request(
                "Booking start must be before its end",
            ));
        }
        if start <= self.now {
            return Err(ServiceError::bad_request(
                "Booking start must be in the future",
            ));
        }

        self.store.transaction(|| {
            let item = self.store.require_item(item_id)?;
            let booker = self.store.require_user(booker_id)?;
            if item.owner_id == booker_id {
                return Err(ServiceError::bad_request(format!(
                    "User {} owns item {} and cannot book it",
                    booker_id, item_id
                )));
            }
            if !item.available {
                return Err(ServiceError::bad_request(format!(
                    "Item {} is not available",
                    item_id
                )));
            }
            self.ensure_no_approved_overlap(item_id, start, end)?;

            let booking = self.store.insert_booking(&NewBooking {
                start,
                end,
                item_id,
                booker_id,
                status: BookingStatus::Waiting,
            })?;
            info!(booking_id = booking.id, item_id, booker_id, "booking requested");
            Ok(BookingView {
                booking,
                item,
                booker,
            })
        })
    }

    /// Approves or rejects a waiting booking on behalf of the item owner.
    pub(crate) fn approve(
        &self,
        booking_id: i64,
        owner_id: i64,
        approved: bool,
    ) -> StoreResult<BookingView> {
        self.store.transaction(|| {
            let booking = self.store.require_booking(booking_id)?;
            let item = self.store.require_item(booking.item_id)?;
            if item.owner_id != owner_id {
                return Err(ServiceError::access_denied(format!(
                    "Only the owner of item {} can decide booking {}",
                    item.id, booking_id
                )));
            }
            if booking.status != BookingStatus::Waiting {
                warn!(booking_id, status = %booking.status, "booking already decided");
                return Err(ServiceError::bad_request(format!(
                    "Booking {} has already been {}",
                    booking_id,
                    booking.status.as_str().to_lowercase()
                )));
            }

            let status = if approved {
                self.ensure_no_approved_overlap(item.id, booking.start, booking.end)?;
                BookingStatus::Approved
            } else {
                BookingStatus::Rejected
            };
            let booking = self.store.update_booking_status(booking_id, status)?;
            info!(booking_id, %status, "booking decided");
            let booker = self.store.require_user(booking.booker_id)?;
            Ok(BookingView {
                booking,
                item,
                booker,
            })
        })
    }

    pub(crate) fn get(&self, booking_id: i64, user_id: i64) -> StoreResult<BookingView> {
        self.store.transaction(|| {
            let booking = self.store.require_booking(booking_id)?;
            let item = self.participant_item(&booking, user_id)?;
            let booker = self.store.require_user(booking.booker_id)?;
            Ok(BookingView {
                booking,
                item,
                booker,
            })
        })
    }

    fn filtered(&self, bookings: Vec<Booking>, state: BookingState, page: Page) -> Vec<Booking> {
        page.apply(
            bookings
                .into_iter()
                .filter(|b| state.matches(b, self.now))
                .collect(),
        )
    }

    pub(crate) fn list_by_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        page: Page,
    ) -> StoreResult<Vec<BookingView>> {
        self.store.transaction(|| {
            self.store.require_user(booker_id)?;
            let bookings = self.store.bookings_by_booker(booker_id)?;
            self.views(self.filtered(bookings, state, page))
        })
    }

    pub(crate) fn list_by_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        page: Page,
    ) -> StoreResult<Vec<BookingView>> {
        self.store.transaction(|| {
            self.store.require_user(owner_id)?;
            let bookings = self.store.bookings_by_owner(owner_id)?;
            self.views(self.filtered(bookings, state, page))
        })
    }

    pub(crate) fn delete(&self, booking_id: i64, user_id: i64) -> StoreResult<()> {
        self.store.transaction(|| {
            let booking = self.store.require_booking(booking_id)?;
            self.participant_item(&booking, user_id)?;
            if !self.store.delete_booking(booking_id)? {
                return Err(ServiceError::BookingNotFound(booking_id));
            }
            info!(booking_id, user_id, "booking deleted");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::user_management::models::User;
    use crate::store::memory::MemoryStore;
    use chrono::{Duration, NaiveDate};
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 6, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid date")
    }

    fn at(hours: i64) -> NaiveDateTime {
        now() + Duration::hours(hours)
    }

    struct World {
        store: MemoryStore,
        owner: User,
        booker: User,
        stranger: User,
        item: Item,
    }

    #[fixture]
    fn world() -> World {
        let store = MemoryStore::default();
        let owner = store.seed_user("Ann", "ann@example.com");
        let booker = store.seed_user("Bob", "bob@example.com");
        let stranger = store.seed_user("Cat", "cat@example.com");
        let item = store.seed_item(owner.id, "Kayak", true);
        World {
            store,
            owner,
            booker,
            stranger,
            item,
        }
    }

    impl World {
        fn service(&self) -> BookingService<'_, MemoryStore> {
            BookingService::new(&self.store, now())
        }

        fn request(&self, start: i64, end: i64) -> StoreResult<BookingView> {
            self.service()
                .create(self.booker.id, self.item.id, at(start), at(end))
        }
    }

    #[rstest]
    fn new_booking_waits_for_the_owner(world: World) {
        let view = world.request(1, 3).expect("booking created");

        assert_eq!(view.booking.status, BookingStatus::Waiting);
        assert_eq!(view.item, world.item);
        assert_eq!(view.booker, world.booker);
    }

    #[rstest]
    #[case(3, 3)]
    #[case(3, 1)]
    #[case(0, 2)]
    #[case(-1, 2)]
    fn bad_intervals_are_rejected(world: World, #[case] start: i64, #[case] end: i64) {
        let err = world.request(start, end).err().expect("booking rejected");

        assert_eq!(err.code(), "BAD_REQUEST");
        assert_eq!(world.store.booking_count(), 0);
    }

    #[rstest]
    fn interval_is_checked_before_the_item(world: World) {
        let err = world
            .service()
            .create(world.booker.id, 999, at(3), at(1))
            .err()
            .expect("booking rejected");

        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[rstest]
    #[case(999, 2, "ITEM_NOT_FOUND")]
    #[case(4, 999, "USER_NOT_FOUND")]
    fn unknown_item_or_booker_is_not_found(
        world: World,
        #[case] item_id: i64,
        #[case] booker_id: i64,
        #[case] code: &str,
    ) {
        let err = world
            .service()
            .create(booker_id, item_id, at(1), at(2))
            .err()
            .expect("booking rejected");

        assert_eq!(err.code(), code);
    }

    #[rstest]
    fn owner_cannot_book_own_item(world: World) {
        let err = world
            .service()
            .create(world.owner.id, world.item.id, at(1), at(2))
            .err()
            .expect("booking rejected");

        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[rstest]
    fn unavailable_item_cannot_be_booked(world: World) {
        let shelved = world.store.seed_item(world.owner.id, "Tent", false);

        let err = world
            .service()
            .create(world.booker.id, shelved.id, at(1), at(2))
            .err()
            .expect("booking rejected");

        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[rstest]
    fn approved_interval_blocks_overlapping_requests(world: World) {
        let first = world.request(1, 3).expect("booking created");
        let decided = world
            .service()
            .approve(first.booking.id, world.owner.id, true)
            .expect("booking approved");
        assert_eq!(decided.booking.status, BookingStatus::Approved);

        let err = world.request(2, 4).err().expect("overlap rejected");
        assert_eq!(err.code(), "BAD_REQUEST");

        // Touching intervals do not overlap.
        assert!(world.request(3, 5).is_ok());
    }

    #[rstest]
    fn waiting_bookings_may_overlap_until_one_is_approved(world: World) {
        let first = world.request(1, 3).expect("booking created");
        let second = world.request(2, 4).expect("booking created");
        let service = world.service();

        service
            .approve(first.booking.id, world.owner.id, true)
            .expect("first approved");
        let err = service
            .approve(second.booking.id, world.owner.id, true)
            .err()
            .expect("second clashes");
        assert_eq!(err.code(), "BAD_REQUEST");

        let rejected = service
            .approve(second.booking.id, world.owner.id, false)
            .expect("second rejected");
        assert_eq!(rejected.booking.status, BookingStatus::Rejected);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn booking_is_decided_only_once(world: World, #[case] approved: bool) {
        let view = world.request(1, 3).expect("booking created");
        let service = world.service();
        service
            .approve(view.booking.id, world.owner.id, approved)
            .expect("first decision");

        let err = service
            .approve(view.booking.id, world.owner.id, !approved)
            .err()
            .expect("second decision rejected");

        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[rstest]
    fn only_the_owner_decides(world: World) {
        let view = world.request(1, 3).expect("booking created");

        for user in [&world.booker, &world.stranger] {
            let err = world
                .service()
                .approve(view.booking.id, user.id, true)
                .err()
                .expect("decision rejected");
            assert_eq!(err.code(), "ACCESS_DENIED");
        }
        assert_eq!(
            world
                .store
                .require_booking(view.booking.id)
                .expect("booking")
                .status,
            BookingStatus::Waiting
        );
    }

    #[rstest]
    fn deciding_unknown_booking_is_not_found(world: World) {
        let err = world
            .service()
            .approve(42, world.owner.id, true)
            .err()
            .expect("missing");

        assert_eq!(err.code(), "BOOKING_NOT_FOUND");
    }

    #[rstest]
    fn participants_can_read_a_booking(world: World) {
        let view = world.request(1, 3).expect("booking created");
        let service = world.service();

        assert!(service.get(view.booking.id, world.owner.id).is_ok());
        assert!(service.get(view.booking.id, world.booker.id).is_ok());
        assert_eq!(
            service
                .get(view.booking.id, world.stranger.id)
                .err()
                .expect("denied")
                .code(),
            "ACCESS_DENIED"
        );
    }

    #[rstest]
    fn listings_filter_by_state(world: World) {
        let store = &world.store;
        let (item, booker) = (world.item.id, world.booker.id);
        let past = store.seed_booking(item, booker, at(-10), at(-5), BookingStatus::Approved);
        let current = store.seed_booking(item, booker, at(-1), at(1), BookingStatus::Approved);
        let waiting = store.seed_booking(item, booker, at(5), at(6), BookingStatus::Waiting);
        let rejected = store.seed_booking(item, booker, at(7), at(8), BookingStatus::Rejected);
        let service = world.service();
        let ids = |state: BookingState| -> Vec<i64> {
            service
                .list_by_booker(booker, state, Page::unbounded())
                .expect("listed")
                .iter()
                .map(|v| v.booking.id)
                .collect()
        };

        assert_eq!(
            ids(BookingState::All),
            vec![rejected.id, waiting.id, current.id, past.id]
        );
        assert_eq!(ids(BookingState::Current), vec![current.id]);
        assert_eq!(ids(BookingState::Past), vec![past.id]);
        assert_eq!(ids(BookingState::Future), vec![rejected.id, waiting.id]);
        assert_eq!(ids(BookingState::Waiting), vec![waiting.id]);
        assert_eq!(ids(BookingState::Rejected), vec![rejected.id]);
        assert_eq!(ids(BookingState::Approved), vec![current.id, past.id]);
    }

    #[rstest]
    fn owner_listing_covers_every_owned_item(world: World) {
        let other = world.store.seed_item(world.owner.id, "Paddle", true);
        let foreign = world.store.seed_item(world.stranger.id, "Bike", true);
        let service = world.service();
        service
            .create(world.booker.id, world.item.id, at(1), at(2))
            .expect("booked");
        service
            .create(world.booker.id, other.id, at(3), at(4))
            .expect("booked");
        service
            .create(world.booker.id, foreign.id, at(5), at(6))
            .expect("booked");

        let views = service
            .list_by_owner(world.owner.id, BookingState::All, Page::unbounded())
            .expect("listed");

        let items: Vec<i64> = views.iter().map(|v| v.item.id).collect();
        assert_eq!(items, vec![other.id, world.item.id]);
    }

    #[rstest]
    fn page_window_applies_after_filtering(world: World) {
        let (item, booker) = (world.item.id, world.booker.id);
        for h in 1..=4 {
            world
                .store
                .seed_booking(item, booker, at(h * 2), at(h * 2 + 1), BookingStatus::Waiting);
        }
        world
            .store
            .seed_booking(item, booker, at(20), at(21), BookingStatus::Rejected);

        let views = world
            .service()
            .list_by_booker(booker, BookingState::Waiting, Page { from: 1, size: 2 })
            .expect("listed");

        let starts: Vec<NaiveDateTime> = views.iter().map(|v| v.booking.start).collect();
        assert_eq!(starts, vec![at(6), at(4)]);
    }

    #[rstest]
    fn listing_for_unknown_user_is_not_found(world: World) {
        let service = world.service();

        for result in [
            service.list_by_booker(999, BookingState::All, Page::unbounded()),
            service.list_by_owner(999, BookingState::All, Page::unbounded()),
        ] {
            assert_eq!(result.err().expect("missing").code(), "USER_NOT_FOUND");
        }
    }

    #[rstest]
    fn deleted_booking_is_not_found(world: World) {
        let view = world.request(1, 3).expect("booking created");
        let service = world.service();

        service
            .delete(view.booking.id, world.booker.id)
            .expect("booking deleted");

        assert_eq!(
            service
                .get(view.booking.id, world.booker.id)
                .err()
                .expect("missing")
                .code(),
            "BOOKING_NOT_FOUND"
        );
    }

    #[rstest]
    fn strangers_cannot_delete(world: World) {
        let view = world.request(1, 3).expect("booking created");

        let err = world
            .service()
            .delete(view.booking.id, world.stranger.id)
            .err()
            .expect("denied");

        assert_eq!(err.code(), "ACCESS_DENIED");
        assert_eq!(world.store.booking_count(), 1);
    }

    #[rstest]
    fn owner_can_delete(world: World) {
        let view = world.request(1, 3).expect("booking created");

        world
            .service()
            .delete(view.booking.id, world.owner.id)
            .expect("booking deleted");

        assert_eq!(world.store.booking_count(), 0);
    }
}
