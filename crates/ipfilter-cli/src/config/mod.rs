//! Policy file location and starter template.

use anyhow::Result;
use directories::ProjectDirs;
use ipfilter::PolicyConfig;
use std::path::{Path, PathBuf};

/// Starter policy written by `ipfilter config init`.
pub const TEMPLATE: &str = r#"# ipfilter policy
#
# permit = on the allow list AND NOT on the deny list.
# An empty allow list refuses every address.

# What to do with a malformed client address: "error", "deny" or "permit".
on_invalid_address = "error"

[allow]
# Comma-separated single addresses.
ips = "127.0.0.1"
# Comma-separated address;mask pairs.
masked_ips = "10.0.0.0;255.0.0.0,192.168.0.0;255.255.0.0"
# Comma-separated from-to ranges.
# ranges = "172.16.0.10-172.16.0.20"
# Names of [settings] keys (or IPFILTER_<key> environment variables)
# holding extra lists in the same formats.
# config_key_ips = "AdminIPs"
# config_key_masked_ips = "AdminMaskedIPs"

[deny]
# ips = "10.0.0.13"

[settings]
# AdminIPs = "203.0.113.7,203.0.113.8"
"#;

/// Default policy file path.
pub fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("rs", "ipfilter", "ipfilter")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join("policy.toml"))
}

/// Load the policy at `path`; a missing file yields the empty policy.
pub fn load(path: &Path) -> Result<PolicyConfig> {
    PolicyConfig::load(path)
        .map_err(|e| anyhow::anyhow!("failed to load policy {}: {e}", path.display()))
}

/// Write [`TEMPLATE`] to `path`, creating parent directories.
pub fn write_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, TEMPLATE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipfilter::{AccessPolicy, Decision, NoSettings};

    #[test]
    fn test_template_parses() {
        let config = PolicyConfig::from_toml(TEMPLATE).unwrap();
        let policy = AccessPolicy::from_config(&config, &NoSettings).unwrap();
        assert_eq!(policy.check("127.0.0.1").unwrap(), Decision::Permit);
        assert_eq!(policy.check("10.1.2.3").unwrap(), Decision::Permit);
        assert_eq!(policy.check("8.8.8.8").unwrap(), Decision::NotAllowed);
    }

    #[test]
    fn test_write_template_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("policy.toml");
        write_template(&path).unwrap();
        assert_eq!(load(&path).unwrap(), PolicyConfig::from_toml(TEMPLATE).unwrap());
    }
}
