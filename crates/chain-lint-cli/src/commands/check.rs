//! Check command implementation.

use anyhow::{Context, Result};
use chain_lint_core::Analyzer;
use chain_lint_js::JavaScriptParser;
use chain_lint_rules::{method_chaining, rules_from_config};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Arguments of `chain-lint check`.
pub struct CheckArgs {
    /// File or directory to analyze.
    pub path: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Rewrite files with automatic fixes.
    pub fix: bool,
    /// Override for `ignore_chain_with_depth`.
    pub ignore_chain_with_depth: Option<u8>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
}

/// Runs the check command.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<()> {
    let mut config = source.load()?;

    if let Some(depth) = args.ignore_chain_with_depth {
        config
            .rule_mut(method_chaining::NAME)
            .set_option("ignore_chain_with_depth", i64::from(depth));
    }

    let rules = rules_from_config(&config).context("Invalid rule configuration")?;
    let fail_on = config.fail_on();

    let mut builder = Analyzer::builder()
        .root(&args.path)
        .parser(JavaScriptParser::new())
        .config(config);

    for pattern in &args.exclude {
        builder = builder.exclude(pattern.as_str());
    }

    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules",
        args.path,
        analyzer.rule_count()
    );

    let result = if args.fix {
        analyzer.fix().context("Fixing failed")?
    } else {
        analyzer.analyze().context("Analysis failed")?
    };

    super::output::print(&result, args.format, analyzer.base_dir())?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}
