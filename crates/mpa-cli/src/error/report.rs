//! Conversion from CLI errors to miette reports.

use miette::Report;

use crate::error::CliError;

pub fn cli_error_to_miette(err: CliError) -> Report {
    match err.hint() {
        Some(hint) => miette::miette!(help = hint, "{}", err),
        None => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpa_config::ConfigError;
    use std::path::PathBuf;

    #[test]
    fn report_keeps_message_and_help() {
        let report = cli_error_to_miette(ConfigError::NoPages(PathBuf::from("src/pages")).into());
        assert!(report.to_string().contains("no pages found"));
        let help = report.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("--allow-empty"));
    }
}
