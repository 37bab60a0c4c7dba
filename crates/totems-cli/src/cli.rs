//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use totems_core::LayoutConfig;

/// Compile Totems required-action rules into byte layouts.
#[derive(Debug, Parser)]
#[command(name = "totems", version, about)]
pub struct Cli {
    /// Options shared by every command
    #[command(flatten)]
    pub common: CommonArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Directory holding `<contract>.abi.json` files
    #[arg(long, env = "TOTEMS_ABI_DIR", default_value = "abis", global = true)]
    pub abi_dir: PathBuf,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Reject duplicate rules and rules for undeclared parameters
    #[arg(long, global = true)]
    pub strict: bool,
}

impl CommonArgs {
    /// Layout engine configuration selected by the flags.
    pub fn layout_config(&self) -> LayoutConfig {
        if self.strict { LayoutConfig::strict() } else { LayoutConfig::default() }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile the rules for a single action
    Layout {
        /// Contract account
        #[arg(long)]
        contract: String,

        /// Action name
        #[arg(long)]
        action: String,

        /// JSON file holding the list of enforcement rules
        #[arg(long)]
        rules: PathBuf,

        /// Why the action is required
        #[arg(long, default_value = "")]
        label: String,
    },

    /// Compile every required action listed in a manifest
    Batch {
        /// JSON file holding a list of `{contract, action, fields, purpose}`
        #[arg(long)]
        manifest: PathBuf,
    },
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// CBOR
    Cbor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_layout_command() {
        let cli = Cli::try_parse_from([
            "totems",
            "layout",
            "--contract",
            "eosio.token",
            "--action",
            "transfer",
            "--rules",
            "rules.json",
            "--strict",
        ])
        .unwrap();

        assert!(cli.common.strict);
        assert_eq!(cli.common.format, OutputFormat::Json);
        let Command::Layout { contract, label, .. } = cli.command else {
            panic!("expected layout command");
        };
        assert_eq!(contract, "eosio.token");
        assert!(label.is_empty());
    }

    #[test]
    fn parse_batch_with_cbor() {
        let cli =
            Cli::try_parse_from(["totems", "--format", "cbor", "batch", "--manifest", "m.json"])
                .unwrap();
        assert_eq!(cli.common.format, OutputFormat::Cbor);
        assert!(matches!(cli.command, Command::Batch { .. }));
    }

    #[test]
    fn layout_requires_rules() {
        assert!(
            Cli::try_parse_from(["totems", "layout", "--contract", "a", "--action", "b"]).is_err()
        );
    }
}
