use actix_files::Files;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use rusty_matchplay::args;
use rusty_matchplay::controller::{Scorekeeper, configure};
use rusty_matchplay::storage::SqliteStore;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    let storage = SqliteStore::open(&args.store)?;
    let keeper = Scorekeeper::load(Arc::new(storage)).await?;
    if let Some(games) = args.import_json.clone() {
        keeper.import(games).await?;
    }
    let keeper = Data::new(keeper);

    tracing::info!(bind = %args.bind, store = %args.store, "starting matchplay server");
    let static_dir = args.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(keeper.clone())
            .configure(configure)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind(args.bind.as_str())?
    .run()
    .await?;
    Ok(())
}
