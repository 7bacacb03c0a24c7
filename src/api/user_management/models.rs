use crate::api::validation::not_blank;
use crate::schema::users;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Insertable, Debug, Clone)]
#[table_name = "users"]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Partial update; absent fields keep their stored value.
#[derive(Deserialize, Validate, Debug, Default)]
pub struct UserChanges {
    #[validate(custom(function = "not_blank", message = "name must not be blank"))]
    pub name: Option<String>,
    #[validate(email(message = "email has an invalid format"))]
    pub email: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct UserOut {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserOut {
    fn from(user: &User) -> Self {
        UserOut {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}
