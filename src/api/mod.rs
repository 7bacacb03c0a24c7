pub(crate) mod booking_management;
pub(crate) mod item_management;
pub(crate) mod paging;
pub(crate) mod request_management;
pub(crate) mod sharer;
pub(crate) mod user_management;
pub(crate) mod validation;

use chrono::{Local, NaiveDateTime};
use rocket::Route;

/// Wall clock handed to the services. Timestamps are stored as local time.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn routes() -> Vec<Route> {
    routes![
        user_management::create::create_user,
        user_management::get_user::get_user,
        user_management::list::get_users,
        user_management::edit::edit_user,
        user_management::delete::delete_user,
        item_management::create::create_item,
        item_management::edit::edit_item,
        item_management::get_item::get_item,
        item_management::list::get_items,
        item_management::search::search_items,
        item_management::add_comment::add_comment,
        booking_management::create::create_booking,
        booking_management::approve::approve_booking,
        booking_management::get_booking::get_booking,
        booking_management::list::get_bookings,
        booking_management::list::get_owner_bookings,
        booking_management::delete::delete_booking,
        request_management::create::create_request,
        request_management::list::get_own_requests,
        request_management::list::get_all_requests,
        request_management::get_request::get_request,
    ]
}
