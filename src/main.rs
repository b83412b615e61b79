use anyhow::Result;
use matterlist::config::Config;
use matterlist::logger::Logger;
use matterlist::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut config_path = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--generate-config" => {
                let path = match iter.next() {
                    Some(path) => std::path::PathBuf::from(path),
                    None => Config::get_default_config_path()?,
                };
                Config::generate_default_config(&path)?;
                return Ok(());
            }
            "--config" => match iter.next() {
                Some(path) => config_path = Some(path.clone()),
                None => anyhow::bail!("--config requires a path"),
            },
            "-h" | "--help" => {
                println!("Usage: matterlist [--config <path>] [--generate-config [<path>]]");
                return Ok(());
            }
            other => anyhow::bail!("Unknown argument: {other}"),
        }
    }

    let config = match config_path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let logger = Logger::from_config(&config.logging)?;
    logger.install()?;
    log::info!("Starting matterlist");

    ui::run_app(config, Some(logger)).await
}
