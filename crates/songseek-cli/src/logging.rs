use anyhow::Result;
use songseek_client::config::LoggingConfig;
use twyg::{LogLevel, OptsBuilder};

/// Install the global logger from the `[logging]` config table.
pub fn init(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        LogLevel::Debug
    } else {
        parse_level(&logging.level)
    };

    let opts = OptsBuilder::new()
        .coloured(logging.coloured)
        .level(level)
        .report_caller(logging.report_caller)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {:?}", e))?;

    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Could not set up logger: {:?}", e))?;

    Ok(())
}

/// Unknown names fall back to info.
fn parse_level(name: &str) -> LogLevel {
    match name.to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert!(matches!(parse_level("debug"), LogLevel::Debug));
        assert!(matches!(parse_level("WARN"), LogLevel::Warn));
        assert!(matches!(parse_level("nonsense"), LogLevel::Info));
    }
}
