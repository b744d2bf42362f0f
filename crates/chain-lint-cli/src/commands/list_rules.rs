//! List rules command implementation.

use chain_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<20} {:<10} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<20} {:<10} {}",
            rule.code(),
            rule.name(),
            rule.default_severity(),
            rule.description()
        );
    }

    println!("\nOptions for method-chaining:");
    println!("  ignore_chain_with_depth  Longest chain allowed on one line, 1-10 (default: 2)");
    println!("  require_allow_reason     Require reason=\"...\" on allow directives (default: false)");

    println!("\nConfigure rules in chain-lint.toml, e.g.:");
    println!("  [rules.method-chaining]");
    println!("  ignore_chain_with_depth = 3");
}
