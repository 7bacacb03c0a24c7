use crate::error::{ErrorResponse, RejectedRequest};
use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome};
use rocket::Request;

pub(crate) const SHARER_HEADER: &str = "X-Sharer-User-Id";

/// Id of the calling user, taken from the `X-Sharer-User-Id` header.
///
/// The id is not checked against storage here; services report unknown
/// users themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SharerId(pub(crate) i64);

fn parse_sharer(raw: Option<&str>) -> Result<i64, String> {
    let raw = raw.ok_or_else(|| format!("Missing required header {}", SHARER_HEADER))?;
    raw.trim()
        .parse::<i64>()
        .map_err(|_| format!("Header {} must be a numeric user id", SHARER_HEADER))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SharerId {
    type Error = ErrorResponse;

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match parse_sharer(req.headers().get_one(SHARER_HEADER)) {
            Ok(id) => Outcome::Success(SharerId(id)),
            Err(message) => {
                let err = ErrorResponse::new(Status::BadRequest, "BAD_REQUEST", message);
                // The catcher renders whatever the guard left behind.
                req.local_cache(|| RejectedRequest(Some(err.clone())));
                Outcome::Failure((Status::BadRequest, err))
            }
        }
    }
}
