//! devtarget - list launch targets for Android virtual devices

use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use devtarget::commands::{BootArgsCommand, TargetsCommand};
use devtarget::core::{config::AppConfig, DevtargetError, APP_NAME, VERSION};
use devtarget::emulator::AvdManager;

#[derive(Parser, Debug)]
#[command(name = "devtarget")]
#[command(about = "Launch targets for Android virtual devices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// List AVDs with their launch targets (default)
    Targets {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// AVD home directory
        #[arg(long)]
        avd_home: Option<PathBuf>,
    },

    /// Print the emulator command line for one target of an AVD
    #[command(name = "boot-args")]
    BootArgs {
        /// AVD name
        avd: String,
        /// Target index; the default target when omitted
        target_index: Option<usize>,
        /// AVD home directory
        #[arg(long)]
        avd_home: Option<PathBuf>,
    },
}

/// Command line flag, then config, then the emulator's own lookup
fn resolve_avd_home(flag: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    flag.or_else(|| config.emulator.avd_home.clone())
        .unwrap_or_else(AvdManager::default_home)
}

/// Text shown for a failed command
fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<DevtargetError>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", err),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load().await?;
    let snapshots_enabled = config.emulator.snapshots_enabled;

    let command = cli.command.unwrap_or(Commands::Targets { json: false, avd_home: None });

    match command {
        Commands::Targets { json, avd_home } => {
            let avd_home = resolve_avd_home(avd_home, &config);
            debug!("AVD home: {:?}, snapshot targets: {}", avd_home, snapshots_enabled);

            TargetsCommand { avd_home, snapshots_enabled, json }
                .execute()
                .await
        }
        Commands::BootArgs { avd, target_index, avd_home } => {
            let avd_home = resolve_avd_home(avd_home, &config);
            debug!("AVD home: {:?}, snapshot targets: {}", avd_home, snapshots_enabled);

            BootArgsCommand {
                avd_home,
                sdk_path: config.get_sdk_path(),
                avd,
                target_index,
                snapshots_enabled,
            }
            .execute()
            .await
        }
    }
}

/// Main entry point
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    info!("{} v{} starting...", APP_NAME, VERSION);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["devtarget"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_targets_flags() {
        let cli = Cli::try_parse_from(["devtarget", "targets", "--json", "--avd-home=/tmp/avd"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Targets { json: true, avd_home: Some(PathBuf::from("/tmp/avd")) })
        );

        let cli = Cli::try_parse_from(["devtarget", "targets", "--avd-home", "/tmp/avd"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Targets { json: false, avd_home: Some(PathBuf::from("/tmp/avd")) })
        );
    }

    #[test]
    fn test_targets_rejects_positionals() {
        assert!(Cli::try_parse_from(["devtarget", "targets", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_boot_args() {
        let cli = Cli::try_parse_from(["devtarget", "boot-args", "Pixel_6", "2"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::BootArgs { avd: "Pixel_6".into(), target_index: Some(2), avd_home: None })
        );

        let cli = Cli::try_parse_from(["devtarget", "boot-args", "Pixel_6"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::BootArgs { avd: "Pixel_6".into(), target_index: None, avd_home: None })
        );
    }

    #[test]
    fn test_boot_args_errors() {
        let err = Cli::try_parse_from(["devtarget", "boot-args", "Pixel_6", "first"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = Cli::try_parse_from(["devtarget", "boot-args"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_unknown_command_and_help() {
        assert!(Cli::try_parse_from(["devtarget", "flash"]).is_err());

        let err = Cli::try_parse_from(["devtarget", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_resolve_avd_home_precedence() {
        let mut config = AppConfig::default();
        config.emulator.avd_home = Some(PathBuf::from("/from/config"));

        assert_eq!(
            resolve_avd_home(Some(PathBuf::from("/from/flag")), &config),
            PathBuf::from("/from/flag")
        );
        assert_eq!(resolve_avd_home(None, &config), PathBuf::from("/from/config"));
    }

    #[test]
    fn test_describe_uses_user_message() {
        let err: anyhow::Error = DevtargetError::NotFound("Pixel_6 has no target 5".into()).into();
        assert_eq!(describe(&err), "Not found: Pixel_6 has no target 5");

        let err = anyhow::anyhow!("plain failure");
        assert_eq!(describe(&err), "plain failure");
    }
}
