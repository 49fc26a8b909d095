//! Config subcommands handler

use anyhow::Result;

use wlast::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    print!("{}", render(&config)?);
    Ok(())
}

fn render(config: &Config) -> Result<String> {
    let path = Config::config_path()?;
    Ok(format!("# {}\n{}", path.display(), config.to_toml()?))
}
