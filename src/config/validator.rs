use super::Config;
use anyhow::Result;

/// Validate config for correctness
pub fn validate_config(config: &Config) -> Result<()> {
    validate_node_version(&config.node.version)?;

    validate_https("node.dist_url", &config.node.dist_url)?;
    validate_https(
        "homebrew.install_script_url",
        &config.homebrew.install_script_url,
    )?;

    for (field, value) in [
        ("homebrew.formula", &config.homebrew.formula),
        ("tool.package", &config.tool.package),
        ("tool.command", &config.tool.command),
        ("tool.manifest", &config.tool.manifest),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("'{}' must not be empty", field);
        }
    }

    Ok(())
}

/// Node release tags look like v20.11.0
fn validate_node_version(version: &str) -> Result<()> {
    let numbers = version.strip_prefix('v').unwrap_or("");
    let parts: Vec<_> = numbers.split('.').collect();

    let well_formed = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

    if !well_formed {
        anyhow::bail!(
            "Invalid node.version '{}': expected a release tag like v20.11.0",
            version
        );
    }

    Ok(())
}

fn validate_https(field: &str, url: &str) -> Result<()> {
    if !url.starts_with("https://") {
        anyhow::bail!("'{}' must be an https:// URL, got '{}'", field, url);
    }
    Ok(())
}
