use crate::api::user_management::models::{NewUser, User, UserChanges};
use crate::error::ServiceError;
use crate::store::{Store, StoreResult};
use tracing::info;

pub(crate) struct UserService<'s, S: Store> {
    store: &'s S,
}

impl<'s, S: Store> UserService<'s, S> {
    pub(crate) fn new(store: &'s S) -> Self {
        UserService { store }
    }

    fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> StoreResult<()> {
        match self.store.find_user_by_email(email)? {
            Some(existing) if Some(existing.id) != owner => Err(ServiceError::conflict(format!(
                "Email {} is already in use",
                email
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn create(&self, user: NewUser) -> StoreResult<User> {
        self.store.transaction(|| {
            self.ensure_email_free(&user.email, None)?;
            let user = self.store.insert_user(&user)?;
            info!(user_id = user.id, "user created");
            Ok(user)
        })
    }

    pub(crate) fn get(&self, user_id: i64) -> StoreResult<User> {
        self.store.transaction(|| self.store.require_user(user_id))
    }

    pub(crate) fn list(&self) -> StoreResult<Vec<User>> {
        self.store.transaction(|| self.store.list_users())
    }

    pub(crate) fn update(&self, user_id: i64, changes: &UserChanges) -> StoreResult<User> {
        self.store.transaction(|| {
            let mut user = self.store.require_user(user_id)?;
            if let Some(email) = &changes.email {
                self.ensure_email_free(email, Some(user_id))?;
                user.email = email.clone();
            }
            if let Some(name) = &changes.name {
                user.name = name.clone();
            }
            let user = self.store.update_user(&user)?;
            info!(user_id, "user updated");
            Ok(user)
        })
    }

    /// Removes the user together with their items, bookings, requests and
    /// comments.
    pub(crate) fn delete(&self, user_id: i64) -> StoreResult<()> {
        self.store.transaction(|| {
            if !self.store.delete_user(user_id)? {
                return Err(ServiceError::UserNotFound(user_id));
            }
            info!(user_id, "user deleted");
            Ok(())
        })
    }
}
