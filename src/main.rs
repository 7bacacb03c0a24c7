mod api;
mod db;
mod error;
mod schema;
mod settings;
mod store;

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;
extern crate dotenv;
#[macro_use]
extern crate diesel_migrations;

use anyhow::Context;
use db::DbConn;
use error::default_catcher;
use settings::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::new().context("couldn't load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .try_init()
        .map_err(|err| anyhow::anyhow!("couldn't initialise logging: {}", err))?;

    info!(
        default_page_size = settings.default_page_size,
        max_page_size = settings.max_page_size,
        "starting shareit backend"
    );

    let _rocket = rocket::build()
        .attach(DbConn::fairing())
        .attach(db::migrations())
        .manage(settings)
        .mount("/", api::routes())
        .register("/", catchers![default_catcher])
        .launch()
        .await
        .map_err(|err| anyhow::anyhow!("server stopped: {}", err))?;

    Ok(())
}
