//! Raw sensor reads

use anyhow::Result;
use oi_teleop_engine::{CommandFrame, IntFormat};
use tracing::debug;

use crate::commands::Context;
use crate::error::CliError;
use crate::link;
use crate::output;

pub fn execute(ctx: &Context, format: IntFormat, request: Option<&str>) -> Result<()> {
    let request = request.map(parse_request).transpose()?;

    let mut session = link::connect(&ctx.config, ctx.dry_run, Vec::new())?;
    if let Some(frame) = &request {
        debug!(frame = %frame, "Sending sensor request");
        session.send_frame(frame).map_err(CliError::from)?;
    }
    let reading = session.read_sensor(format).map_err(CliError::from)?;
    session.disconnect().map_err(CliError::from)?;

    output::print_reading(&reading, ctx.json);
    Ok(())
}

/// Parse space- or comma-separated decimal bytes, e.g. `"142 7"`.
pub fn parse_request(text: &str) -> Result<CommandFrame, CliError> {
    let bytes = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .map(|word| {
            word.parse::<u8>()
                .map_err(|e| CliError::InvalidInput(format!("request byte '{word}': {e}")))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    CommandFrame::try_from_slice(&bytes)
        .map_err(|e| CliError::InvalidInput(format!("request '{text}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() -> Result<(), CliError> {
        assert_eq!(parse_request("142 7")?.as_bytes(), &[142, 7]);
        assert_eq!(parse_request(" 142, 21 ")?.as_bytes(), &[142, 21]);
        Ok(())
    }

    #[test]
    fn test_parse_request_rejects_bad_bytes() {
        assert!(matches!(parse_request("142 256"), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_request("sensors"), Err(CliError::InvalidInput(_))));
        assert!(matches!(parse_request(""), Err(CliError::InvalidInput(_))));
        assert!(matches!(
            parse_request("1 2 3 4 5 6 7 8"),
            Err(CliError::InvalidInput(_))
        ));
    }
}
