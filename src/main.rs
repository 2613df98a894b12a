mod dto;
mod generator;
mod pagination;
mod query;
mod store;
mod template;
mod util;
mod web_interface;

use std::{env, process::exit};
use tracing::error;
use util::{config::load_config, connect_to_db, setup_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let ref args: Vec<String> = env::args().collect();

    let choice = args.get(1).map(|a| a.clone()).unwrap_or("web".into());

    let config = load_config()?;
    let pool = connect_to_db(&config);

    match choice.as_str() {
        "web" => handle_result(web_interface::start_server(pool, config).await),
        "generate" => handle_result(generator::run(pool, &config).await),
        _ => println!("Make a valid choice (web, generate)"),
    }

    Ok(())
}

fn handle_result(res: anyhow::Result<()>) {
    if let Err(err) = res {
        error!("An error occurred: {:?}", err);
        exit(1)
    }
}
