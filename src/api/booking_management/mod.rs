pub(crate) mod approve;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get_booking;
pub(crate) mod list;
pub(crate) mod models;
pub(crate) mod service;
pub(crate) mod state;
