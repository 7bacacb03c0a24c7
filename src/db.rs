use rocket::fairing::{self, AdHoc};
use rocket::{Build, Rocket};
use rocket_sync_db_pools::{database, diesel};
use tracing::{error, info};

#[database("shareit")]
pub(crate) struct DbConn(diesel::PgConnection);

embed_migrations!();

pub(crate) fn migrations() -> AdHoc {
    AdHoc::try_on_ignite("Database Migrations", run_db_migrations)
}

async fn run_db_migrations(rocket: Rocket<Build>) -> fairing::Result {
    let conn = match DbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            error!("no database connection available for migrations");
            return Err(rocket);
        }
    };

    match conn.run(|c| embedded_migrations::run(&*c)).await {
        Ok(()) => {
            info!("database migrations applied");
            Ok(rocket)
        }
        Err(err) => {
            error!(error = %err, "database migrations failed");
            Err(rocket)
        }
    }
}
