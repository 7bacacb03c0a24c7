pub(crate) mod add_comment;
pub(crate) mod create;
pub(crate) mod edit;
pub(crate) mod get_item;
pub(crate) mod list;
pub(crate) mod models;
pub(crate) mod search;
pub(crate) mod service;
