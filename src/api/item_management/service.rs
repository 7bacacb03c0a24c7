use crate::api::booking_management::models::BookingStatus;
use crate::api::item_management::models::{
    CommentView, Item, ItemChanges, ItemView, NewComment, NewItem,
};
use crate::api::paging::Page;
use crate::error::ServiceError;
use crate::store::{Store, StoreResult};
use chrono::NaiveDateTime;
use tracing::{debug, info};

pub(crate) struct ItemService<'s, S: Store> {
    store: &'s S,
    now: NaiveDateTime,
}

impl<'s, S: Store> ItemService<'s, S> {
    pub(crate) fn new(store: &'s S, now: NaiveDateTime) -> Self {
        ItemService { store, now }
    }

    /// Detail view of `item` as seen by `viewer_id`.
    fn view(&self, item: Item, viewer_id: i64) -> StoreResult<ItemView> {
        let comments = self
            .store
            .comments_by_item(item.id)?
            .into_iter()
            .map(|(comment, author)| CommentView { comment, author })
            .collect();

        let (last_booking, next_booking) = if item.owner_id == viewer_id {
            let approved: Vec<_> = self
                .store
                .bookings_by_item(item.id)?
                .into_iter()
                .filter(|b| b.status == BookingStatus::Approved)
                .collect();
            // Oldest start first, so the last started one is the latest match.
            let last = approved.iter().filter(|b| b.start <= self.now).last().cloned();
            let next = approved.iter().find(|b| b.start > self.now).cloned();
            (last, next)
        } else {
            (None, None)
        };

        Ok(ItemView {
            item,
            comments,
            last_booking,
            next_booking,
        })
    }

    pub(crate) fn add_item(&self, item: NewItem) -> StoreResult<Item> {
        self.store.transaction(|| {
            self.store.require_user(item.owner_id)?;
            if let Some(request_id) = item.request_id {
                self.store.require_request(request_id)?;
            }
            let item = self.store.insert_item(&item)?;
            info!(item_id = item.id, owner_id = item.owner_id, "item added");
            Ok(item)
        })
    }

    pub(crate) fn update_item(
        &self,
        owner_id: i64,
        item_id: i64,
        changes: &ItemChanges,
    ) -> StoreResult<ItemView> {
        self.store.transaction(|| {
            self.store.require_user(owner_id)?;
            let mut item = self.store.require_item(item_id)?;
            if item.owner_id != owner_id {
                return Err(ServiceError::access_denied(format!(
                    "User {} does not own item {}",
                    owner_id, item_id
                )));
            }
            changes.apply_to(&mut item);
            let item = self.store.update_item(&item)?;
            info!(item_id, owner_id, "item updated");
            self.view(item, owner_id)
        })
    }

    pub(crate) fn get_item(&self, user_id: i64, item_id: i64) -> StoreResult<ItemView> {
        self.store.transaction(|| {
            self.store.require_user(user_id)?;
            let item = self.store.require_item(item_id)?;
            self.view(item, user_id)
        })
    }

    pub(crate) fn items_by_owner(&self, owner_id: i64, page: Page) -> StoreResult<Vec<ItemView>> {
        self.store.transaction(|| {
            self.store.require_user(owner_id)?;
            self.store
                .items_by_owner(owner_id, page)?
                .into_iter()
                .map(|item| self.view(item, owner_id))
                .collect()
        })
    }

    /// Available items matching `text` as given; blank text matches nothing.
    pub(crate) fn search_items(
        &self,
        user_id: i64,
        text: &str,
        page: Page,
    ) -> StoreResult<Vec<Item>> {
        if text.trim().is_empty() {
            debug!(user_id, "blank search text");
            return Ok(Vec::new());
        }
        self.store.transaction(|| {
            self.store.require_user(user_id)?;
            self.store.search_available_items(text, page)
        })
    }

    pub(crate) fn add_comment(
        &self,
        author_id: i64,
        item_id: i64,
        text: String,
    ) -> StoreResult<CommentView> {
        self.store.transaction(|| {
            let author = self.store.require_user(author_id)?;
            self.store.require_item(item_id)?;
            if !self
                .store
                .has_finished_booking(item_id, author_id, self.now)?
            {
                return Err(ServiceError::bad_request(format!(
                    "User {} has no finished booking of item {}",
                    author_id, item_id
                )));
            }
            let comment = self.store.insert_comment(&NewComment {
                text,
                item_id,
                author_id,
                created: self.now,
            })?;
            info!(comment_id = comment.id, item_id, author_id, "comment added");
            Ok(CommentView { comment, author })
        })
    }
}
