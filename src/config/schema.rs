use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub node: NodeConfig,

    #[serde(default)]
    pub homebrew: HomebrewConfig,

    #[serde(default)]
    pub tool: ToolConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeConfig {
    /// Release tag, e.g. v20.11.0 (LTS)
    #[serde(default = "default_node_version")]
    pub version: String,

    #[serde(default = "default_dist_url")]
    pub dist_url: String,

    /// Where the downloaded package is staged (system temp dir when unset)
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

fn default_node_version() -> String {
    "v20.11.0".to_string()
}

fn default_dist_url() -> String {
    "https://nodejs.org/dist".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            version: default_node_version(),
            dist_url: default_dist_url(),
            download_dir: None,
        }
    }
}

impl NodeConfig {
    /// Download URL of the macOS installer package for `arch` (arm64 or x64)
    pub fn package_url(&self, arch: &str) -> String {
        format!(
            "{}/{}/node-{}-darwin-{}.pkg",
            self.dist_url.trim_end_matches('/'),
            self.version,
            self.version,
            arch
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HomebrewConfig {
    #[serde(default = "default_install_script_url")]
    pub install_script_url: String,

    #[serde(default = "default_formula")]
    pub formula: String,

    /// Where the Homebrew installer puts `brew` (Apple Silicon, Intel)
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<PathBuf>,
}

fn default_install_script_url() -> String {
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh".to_string()
}

fn default_formula() -> String {
    "node".to_string()
}

fn default_prefixes() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/opt/homebrew/bin"),
        PathBuf::from("/usr/local/bin"),
    ]
}

impl Default for HomebrewConfig {
    fn default() -> Self {
        Self {
            install_script_url: default_install_script_url(),
            formula: default_formula(),
            prefixes: default_prefixes(),
        }
    }
}

impl HomebrewConfig {
    /// Shell line that fetches and runs the Homebrew installer
    pub fn bootstrap_command(&self) -> String {
        format!(
            r#"/bin/bash -c "$(curl -fsSL {})""#,
            self.install_script_url
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolConfig {
    /// npm package name
    #[serde(default = "default_package")]
    pub package: String,

    /// Command the package puts on PATH
    #[serde(default = "default_command")]
    pub command: String,

    /// Local manifest that enables the `npm install && npm link` fallback
    #[serde(default = "default_manifest")]
    pub manifest: String,
}

fn default_package() -> String {
    "dev-setup-cli".to_string()
}

fn default_command() -> String {
    "dev-setup".to_string()
}

fn default_manifest() -> String {
    "package.json".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            package: default_package(),
            command: default_command(),
            manifest: default_manifest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_url_arm64() {
        let node = NodeConfig::default();
        assert_eq!(
            node.package_url("arm64"),
            "https://nodejs.org/dist/v20.11.0/node-v20.11.0-darwin-arm64.pkg"
        );
    }

    #[test]
    fn test_package_url_trailing_slash() {
        let node = NodeConfig {
            version: "v18.19.1".to_string(),
            dist_url: "https://mirror.example.com/node/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            node.package_url("x64"),
            "https://mirror.example.com/node/v18.19.1/node-v18.19.1-darwin-x64.pkg"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [node]
            version = "v22.1.0"

            [tool]
            package = "my-cli"
            "#,
        )
        .unwrap();

        assert_eq!(config.node.version, "v22.1.0");
        assert_eq!(config.node.dist_url, "https://nodejs.org/dist");
        assert_eq!(config.tool.package, "my-cli");
        assert_eq!(config.tool.command, "dev-setup");
        assert_eq!(config.homebrew.formula, "node");
        assert_eq!(config.homebrew.prefixes.len(), 2);
    }

    #[test]
    fn test_bootstrap_command() {
        let brew = HomebrewConfig::default();
        assert_eq!(
            brew.bootstrap_command(),
            r#"/bin/bash -c "$(curl -fsSL https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh)""#
        );
    }
}
