pub(crate) mod create;
pub(crate) mod get_request;
pub(crate) mod list;
pub(crate) mod models;
pub(crate) mod service;
