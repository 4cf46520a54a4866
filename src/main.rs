use anyhow::Result;
use chrono::Local;
use log::info;

use bir_streets::config::Config;
use bir_streets::crawl::run;

use cli_table::{print_stdout, WithTitle};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env();
    info!("Writing streets under {:?}", config.output_root);

    let start_time = Local::now();
    let summary = run(&config).await?;

    info!(
        "Wrote {} street(s) in {} sec",
        summary.total_streets(),
        (Local::now() - start_time).num_seconds()
    );

    print_stdout(summary.provinces.with_title())?;

    Ok(())
}
