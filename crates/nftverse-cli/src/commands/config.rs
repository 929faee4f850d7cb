use anyhow::Result;

use nftverse_core::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("# Config file: {}", path.display());
    } else {
        println!("# Config file: {} (not found, using defaults)", path.display());
    }
    println!("# Local store: {}\n", config.database_path().display());
    print!("{}", config.to_toml()?);
    Ok(())
}
