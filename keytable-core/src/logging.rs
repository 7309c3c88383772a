use tracing::Level;

use crate::LoggingConfig;

/// Install the stderr subscriber. `quiet` limits output to warnings.
pub fn init_logging(config: &LoggingConfig, quiet: bool) {
    let level = if quiet {
        Level::WARN
    } else {
        parse_level(&config.level)
    };

    // A subscriber may already be installed when embedded in another tool.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("WARN"), Level::WARN);
        assert_eq!(parse_level("chatty"), Level::INFO);
    }
}
