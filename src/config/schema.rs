//! Config schema validation, run once before linting starts.
//!
//! Cop sections may only name cops the registry knows, and may only carry
//! option keys the cop declares. This catches typos like `allowConditional`
//! (wrong case) up front instead of silently ignoring them.

use anyhow::{bail, Result};

use crate::config::ResolvedConfig;
use crate::cop::registry::CopRegistry;

pub fn validate(config: &ResolvedConfig, registry: &CopRegistry) -> Result<()> {
    for (name, cop_config) in config.cop_sections() {
        let Some(cop) = registry.get(name) else {
            bail!("unknown cop in config: {name}");
        };

        let allowed = cop.allowed_options();
        for key in cop_config.options.keys() {
            if !allowed.contains(&key.as_str()) {
                if allowed.is_empty() {
                    bail!("unknown option `{key}` for {name}: this cop takes no options");
                }
                bail!(
                    "unknown option `{key}` for {name} (supported: {})",
                    allowed.join(", ")
                );
            }
        }
    }
    Ok(())
}
