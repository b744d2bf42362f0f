//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::fix::FixSet;
use crate::parser::{ParserBox, SourceParser};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Upper bound on fix-and-relint rounds for a single file.
pub const MAX_FIX_PASSES: usize = 10;

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the source tree.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// No registered parser handles the file's extension.
    #[error("No parser registered for {path}")]
    UnsupportedFile {
        /// Path of the file.
        path: PathBuf,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Outcome of fixing one in-memory source buffer.
#[derive(Debug)]
pub struct FixedSource {
    /// Source after all fix passes.
    pub output: String,
    /// Number of passes that applied at least one fix.
    pub passes: usize,
    /// Total number of edits applied.
    pub fixes_applied: usize,
    /// Violations still reported for `output`.
    pub remaining: Vec<Violation>,
}

impl FixedSource {
    /// Returns true if any edit was applied.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.fixes_applied > 0
    }
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Registers a language front end.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Adds a per-file rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        if let Some(ref config) = self.config {
            exclude_patterns.extend(config.analyzer.exclude.clone());
        }

        let exclude_patterns = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            parsers: self.parsers,
            exclude_patterns,
            config: self.config.unwrap_or_default(),
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    exclude_patterns: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory that reported paths are relative to: the root itself, or
    /// its parent when the root is a single file.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        }
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file
    /// fails to parse while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.check_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(e) => self.skip_unparsable(e)?,
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes all files, applies automatic fixes in place, and returns the
    /// violations that remain.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Analyzer::analyze`], plus failures writing files.
    pub fn fix(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting fix run at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.fix_source(file_path, &content) {
                Ok(fixed) => {
                    if fixed.changed() {
                        std::fs::write(file_path, &fixed.output)?;
                        result.files_fixed += 1;
                        info!(
                            "Fixed {} ({} edits in {} passes)",
                            file_path.display(),
                            fixed.fixes_applied,
                            fixed.passes
                        );
                    }
                    result.violations.extend(fixed.remaining);
                    result.files_checked += 1;
                }
                Err(e) => self.skip_unparsable(e)?,
            }
        }

        result.sort();

        info!(
            "Fix complete: {} files fixed, {} violations remaining",
            result.files_fixed,
            result.violations.len()
        );

        Ok(result)
    }

    /// Lints one in-memory source buffer.
    ///
    /// `path` selects the parser by extension and is used for reporting.
    /// Violations are returned in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser handles `path` or the source does not
    /// parse.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let parser = self
            .parser_for(path)
            .ok_or_else(|| AnalyzerError::UnsupportedFile {
                path: path.to_path_buf(),
            })?;

        let ast = parser.parse(content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let ctx = FileContext::new(path, content, self.base_dir());
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &ast);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        violations.sort_by_key(|v| v.location.offset);
        Ok(violations)
    }

    /// Lints `content` and applies fixes until none remain or
    /// [`MAX_FIX_PASSES`] is reached.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Analyzer::check_source`].
    pub fn fix_source(&self, path: &Path, content: &str) -> Result<FixedSource, AnalyzerError> {
        let mut output = content.to_string();
        let mut passes = 0;
        let mut fixes_applied = 0;

        while passes < MAX_FIX_PASSES {
            let violations = self.check_source(path, &output)?;
            let fixes = FixSet::from_violations(&violations);
            if fixes.is_empty() {
                return Ok(FixedSource {
                    output,
                    passes,
                    fixes_applied,
                    remaining: violations,
                });
            }

            passes += 1;
            fixes_applied += fixes.len();
            output = fixes.apply(&output);
            debug!(
                "Pass {passes}: applied {} fixes to {}",
                fixes.len(),
                path.display()
            );
        }

        warn!(
            "Stopped fixing {} after {MAX_FIX_PASSES} passes",
            path.display()
        );
        let remaining = self.check_source(path, &output)?;
        Ok(FixedSource {
            output,
            passes,
            fixes_applied,
            remaining,
        })
    }

    /// Logs and swallows parse failures unless configured to fail on them.
    fn skip_unparsable(&self, error: AnalyzerError) -> Result<(), AnalyzerError> {
        match error {
            AnalyzerError::Parse { path, message } => {
                warn!("Failed to parse {}: {}", path.display(), message);
                if self.fail_on_parse_error {
                    return Err(AnalyzerError::Parse { path, message });
                }
                Ok(())
            }
            e => Err(e),
        }
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Finds the parser registered for a path's extension.
    fn parser_for(&self, path: &Path) -> Option<&dyn SourceParser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))?;

        self.parsers
            .iter()
            .find(|p| p.handles_extension(&ext))
            .map(AsRef::as_ref)
    }

    /// Discovers all source files some registered parser can handle.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || self.parser_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path matches an exclude pattern, either as given or
    /// relative to the root.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|p| p.matches_path(path) || p.matches_path(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ast, AstBuilder, NodeKind, Position, Span};
    use crate::parser::ParseError;
    use crate::types::{Location, Replacement, Severity, Suggestion};
    use tempfile::TempDir;

    /// Parser stub: one `Other` node per file, or a syntax error when the
    /// source contains `!!`.
    struct LineParser;

    impl SourceParser for LineParser {
        fn language_id(&self) -> &'static str {
            "lines"
        }

        fn extensions(&self) -> &'static [&'static str] {
            &[".txt"]
        }

        fn parse(&self, source: &str) -> Result<Ast, ParseError> {
            if source.contains("!!") {
                return Err(ParseError::Syntax { line: 1, column: 1 });
            }
            let mut b = AstBuilder::new();
            let end = Position::new(source.lines().count().max(1), 0);
            let root = b.open(Span::new(0, source.len(), Position::new(1, 0), end), None);
            b.close(
                root,
                NodeKind::Other {
                    kind: "file".into(),
                    children: vec![],
                },
            );
            Ok(b.finish(root))
        }
    }

    /// Flags every `;` and offers to replace it with `,`.
    struct NoSemicolon;

    impl Rule for NoSemicolon {
        fn name(&self) -> &'static str {
            "no-semicolon"
        }
        fn code(&self) -> &'static str {
            "TEST002"
        }
        fn default_severity(&self) -> Severity {
            Severity::Warning
        }

        fn check(&self, ctx: &FileContext, _ast: &Ast) -> Vec<Violation> {
            ctx.content
                .match_indices(';')
                .map(|(offset, _)| {
                    let loc = Location::new(ctx.relative_path.clone(), 1, offset + 1)
                        .with_span(offset, 1);
                    Violation::new(self.code(), self.name(), Severity::Warning, loc.clone(), "semi")
                        .with_suggestion(Suggestion::with_fix("use a comma", Replacement::new(loc, ",")))
                })
                .collect()
        }
    }

    fn analyzer(root: &Path, config: Config) -> Analyzer {
        Analyzer::builder()
            .root(root)
            .parser(LineParser)
            .rule(NoSemicolon)
            .config(config)
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/node_modules/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 0);
    }

    #[test]
    fn invalid_exclude_pattern_fails_build() {
        let result = Analyzer::builder().root(".").exclude("a/***").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/project")
            .exclude("**/node_modules/**")
            .exclude("**/dist/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/project/node_modules/lib/a.js")));
        assert!(analyzer.should_exclude(Path::new("/project/dist/a.js")));
        assert!(!analyzer.should_exclude(Path::new("/project/src/a.js")));
    }

    #[test]
    fn check_source_runs_rules_in_order() {
        let a = analyzer(Path::new("."), Config::default());
        let v = a.check_source(Path::new("a.txt"), "x;y;").unwrap();
        assert_eq!(v.len(), 2);
        assert!(v[0].location.offset < v[1].location.offset);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let a = analyzer(Path::new("."), Config::default());
        let err = a.check_source(Path::new("a.rs"), "x;").unwrap_err();
        assert!(matches!(err, AnalyzerError::UnsupportedFile { .. }));
    }

    #[test]
    fn disabled_rule_and_severity_override() {
        let disabled = Config::parse("[rules.no-semicolon]\nenabled = false\n").unwrap();
        let a = analyzer(Path::new("."), disabled);
        assert!(a.check_source(Path::new("a.txt"), "x;").unwrap().is_empty());

        let escalated = Config::parse("[rules.no-semicolon]\nseverity = \"error\"\n").unwrap();
        let a = analyzer(Path::new("."), escalated);
        let v = a.check_source(Path::new("a.txt"), "x;").unwrap();
        assert_eq!(v[0].severity, Severity::Error);
    }

    #[test]
    fn fix_source_applies_until_clean() {
        let a = analyzer(Path::new("."), Config::default());
        let fixed = a.fix_source(Path::new("a.txt"), "a;b;c").unwrap();
        assert_eq!(fixed.output, "a,b,c");
        assert_eq!(fixed.passes, 1);
        assert_eq!(fixed.fixes_applied, 2);
        assert!(fixed.remaining.is_empty());
        assert!(fixed.changed());
    }

    #[test]
    fn analyze_walks_directory_and_skips_parse_errors() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("one.txt"), "a;b").unwrap();
        std::fs::write(tmp.path().join("broken.txt"), "!!;").unwrap();
        std::fs::write(tmp.path().join("other.md"), ";;;").unwrap();

        let a = analyzer(tmp.path(), Config::default());
        let result = a.analyze().unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("one.txt"));
    }

    #[test]
    fn analyze_fails_on_parse_error_when_asked() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("broken.txt"), "!!").unwrap();

        let a = Analyzer::builder()
            .root(tmp.path())
            .parser(LineParser)
            .fail_on_parse_error(true)
            .build()
            .unwrap();
        assert!(matches!(a.analyze(), Err(AnalyzerError::Parse { .. })));
    }

    #[test]
    fn single_file_root_reports_file_name() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("one.txt");
        std::fs::write(&file, "a;b").unwrap();

        let a = analyzer(&file, Config::default());
        assert_eq!(a.base_dir(), tmp.path());
        let result = a.analyze().unwrap();
        assert_eq!(result.violations[0].location.file, PathBuf::from("one.txt"));
    }

    #[test]
    fn fix_rewrites_files_in_place() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("one.txt");
        std::fs::write(&file, "a;b").unwrap();
        std::fs::write(tmp.path().join("clean.txt"), "ab").unwrap();

        let a = analyzer(tmp.path(), Config::default());
        let result = a.fix().unwrap();
        assert_eq!(result.files_fixed, 1);
        assert_eq!(result.files_checked, 2);
        assert!(result.violations.is_empty());
        assert_eq!(std::fs::read_to_string(file).unwrap(), "a,b");
    }
}
