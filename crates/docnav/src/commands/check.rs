//! `docnav check` command implementation.

use clap::Args;
use docnav_config::Align;
use docnav_site::Site;

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = self.config.load()?;
        let site = Site::new(&config);

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Source: {}", config.source_dir.display()));

        let base = site.base();
        output.highlight(&format!("{} ({})", base.title(), base.theme()));
        output.info(&format!("  root: {}", base.root()));
        output.info(&format!("  plugins: {}", base.plugins().join(", ")));
        output.info(&format!(
            "  nav: {} left, {} right",
            base.nav_aligned(Align::Left).count(),
            base.nav_aligned(Align::Right).count()
        ));
        for (route, entries) in base.sidebar() {
            output.info(&format!("  sidebar {route}: {} entries", entries.len()));
        }

        for locale in site.locales() {
            output.info(&format!(
                "  locale {} ({}): {}",
                locale.code,
                locale.label,
                locale.config.title()
            ));
        }

        output.success("Configuration is valid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use docnav_config::ConfigError;

    use super::*;
    use crate::commands::tests::site_args;

    #[test]
    fn test_check_valid_site() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = CheckArgs {
            config: site_args(temp_dir.path()),
        };

        assert!(args.execute(&Output::new()).is_ok());
    }

    #[test]
    fn test_check_reports_dangling_reference() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = site_args(temp_dir.path());
        fs::remove_file(temp_dir.path().join("guide.md")).unwrap();

        let err = CheckArgs { config }.execute(&Output::new()).unwrap_err();

        assert!(
            matches!(&err, CliError::Config(ConfigError::DanglingReference { path, .. })
                if path == "guide.md"),
            "got {err:?}"
        );
    }
}
