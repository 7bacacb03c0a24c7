use crate::api::user_management::models::{NewUser, UserOut};
use crate::api::user_management::service::UserService;
use crate::api::validation::{not_blank, required, validated};
use crate::db::DbConn;
use crate::error::ErrorResponse;
use crate::store::PgStore;
use rocket::response::status;
use rocket::serde::json::Json;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct UserSignup {
    #[validate(
        required(message = "name is required"),
        custom(function = "not_blank", message = "name must not be blank")
    )]
    name: Option<String>,
    #[validate(
        required(message = "email is required"),
        email(message = "email has an invalid format")
    )]
    email: Option<String>,
}

#[post("/users", data = "<signup>")]
pub(crate) async fn create_user(
    signup: Json<UserSignup>,
    conn: DbConn,
) -> Result<status::Created<Json<UserOut>>, ErrorResponse> {
    let signup = validated(signup.into_inner())?;
    let new_user = NewUser {
        name: required(signup.name, "name")?,
        email: required(signup.email, "email")?,
    };

    let user = conn
        .run(move |c| UserService::new(&PgStore::new(c)).create(new_user))
        .await?;

    Ok(status::Created::new(format!("/users/{}", user.id)).body(Json(UserOut::from(&user))))
}
