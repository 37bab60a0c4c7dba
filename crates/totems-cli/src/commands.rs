//! Command execution.

use std::{fs, io::Write, path::Path, sync::Arc};

use serde::de::DeserializeOwned;
use totems_core::{
    AbiCache, DirectoryProvider, EnforcementRule, LayoutEngine, RequiredActionSpec,
    SchemaResolver,
};
use tracing::info;

use crate::{
    cli::{Cli, Command},
    error::CliError,
    output::write_output,
};

/// Run `cli`, writing the compiled layouts to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    let resolver = SchemaResolver::new(
        DirectoryProvider::new(&cli.common.abi_dir),
        Arc::new(AbiCache::new()),
    );
    let engine = LayoutEngine::new(cli.common.layout_config());

    match &cli.command {
        Command::Layout { contract, action, rules, label } => {
            let rules: Vec<EnforcementRule> = read_json(rules, "rule list")?;
            let spec = RequiredActionSpec {
                contract: contract.clone(),
                action: action.clone(),
                rules,
                label: label.clone(),
            };
            let layout = engine.compile(&resolver, &spec)?;
            info!(
                contract = %spec.contract,
                action = %spec.action,
                fields = layout.fields.len(),
                "compiled layout"
            );
            write_output(&layout, cli.common.format, out)
        },
        Command::Batch { manifest } => {
            let specs: Vec<RequiredActionSpec> = read_json(manifest, "manifest")?;
            let layouts = engine.compile_all(&resolver, &specs)?;
            info!(actions = layouts.len(), contracts = resolver.cache().len(), "compiled manifest");
            write_output(&layouts, cli.common.format, out)
        },
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<T, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    serde_json::from_str(&text)
        .map_err(|source| CliError::Input { what, path: path.to_path_buf(), source })
}
