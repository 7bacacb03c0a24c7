pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod edit;
pub(crate) mod get_user;
pub(crate) mod list;
pub(crate) mod models;
pub(crate) mod service;
