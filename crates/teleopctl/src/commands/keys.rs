//! Keybinding help

use anyhow::Result;

use crate::output;

pub fn execute(json: bool) -> Result<()> {
    output::print_keys(json);
    Ok(())
}
