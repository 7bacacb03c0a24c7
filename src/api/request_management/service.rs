use crate::api::paging::Page;
use crate::api::request_management::models::{ItemRequest, NewItemRequest, RequestView};
use crate::api::user_management::models::User;
use crate::error::ServiceError;
use crate::store::{Store, StoreResult};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::info;

pub(crate) struct RequestService<'s, S: Store> {
    store: &'s S,
    now: NaiveDateTime,
}

impl<'s, S: Store> RequestService<'s, S> {
    pub(crate) fn new(store: &'s S, now: NaiveDateTime) -> Self {
        RequestService { store, now }
    }

    /// Attaches requestors and fulfilling items, keeping the order of
    /// `requests`.
    fn views(&self, requests: Vec<ItemRequest>) -> StoreResult<Vec<RequestView>> {
        let ids: Vec<i64> = requests.iter().map(|r| r.id).collect();
        let mut items_by_request: HashMap<i64, Vec<_>> = HashMap::new();
        for item in self.store.items_by_requests(&ids)? {
            if let Some(request_id) = item.request_id {
                items_by_request.entry(request_id).or_default().push(item);
            }
        }

        let mut requestors: HashMap<i64, User> = HashMap::new();
        requests
            .into_iter()
            .map(|request| -> StoreResult<RequestView> {
                let requestor = match requestors.get(&request.requestor_id) {
                    Some(user) => user.clone(),
                    None => {
                        let user = self.store.require_user(request.requestor_id)?;
                        requestors.insert(user.id, user.clone());
                        user
                    }
                };
                let items = items_by_request.remove(&request.id).unwrap_or_default();
                Ok(RequestView {
                    request,
                    requestor,
                    items,
                })
            })
            .collect()
    }

    pub(crate) fn create(&self, requestor_id: i64, description: String) -> StoreResult<RequestView> {
        self.store.transaction(|| {
            let requestor = self.store.require_user(requestor_id)?;
            let request = self.store.insert_request(&NewItemRequest {
                description,
                requestor_id,
                created: self.now,
            })?;
            info!(request_id = request.id, requestor_id, "item request created");
            Ok(RequestView {
                request,
                requestor,
                items: Vec::new(),
            })
        })
    }

    /// Requests made by `requestor_id`, newest first.
    pub(crate) fn own(&self, requestor_id: i64) -> StoreResult<Vec<RequestView>> {
        self.store.transaction(|| {
            self.store.require_user(requestor_id)?;
            self.views(self.store.requests_by_requestor(requestor_id)?)
        })
    }

    /// Requests made by everyone except `user_id`, newest first.
    pub(crate) fn all(&self, user_id: i64, page: Page) -> StoreResult<Vec<RequestView>> {
        self.store.transaction(|| {
            self.store.require_user(user_id)?;
            self.views(self.store.requests_excluding(user_id, page)?)
        })
    }

    pub(crate) fn get(&self, user_id: i64, request_id: i64) -> StoreResult<RequestView> {
        self.store.transaction(|| {
            self.store.require_user(user_id)?;
            let request = self.store.require_request(request_id)?;
            let mut views = self.views(vec![request])?;
            views
                .pop()
                .ok_or(ServiceError::RequestNotFound(request_id))
        })
    }
}
