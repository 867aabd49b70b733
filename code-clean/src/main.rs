use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use code_clean::diff::print_changes;
use code_clean::{
    load_findings, ComplexityStrategy, FileStore, HashSuffix, LiteralScope, PatchConfig, Patcher,
    Rule, SequentialSuffix, SuffixSource,
};

#[derive(Parser)]
#[command(name = "code-clean")]
#[command(about = "Rewrite source files to silence static-analysis findings")]
#[command(long_about = "Reads a findings file exported from the analyzer and mechanically patches the
offending files, one finding at a time, in input order.

SUPPORTED RULES:
  go:S1192   duplicated string literal -> trailing const declaration
  go:S3776   cognitive complexity      -> comment out nested ifs, or extract func literals
  go:S1186   empty function            -> placeholder comment in the body
  java:S112  generic exception         -> RuntimeException renamed to a private subclass

Edits are heuristic and line-based. Nothing is parsed and nothing is checked
for correctness afterwards: review the diff before committing.")]
#[command(after_help = "Examples:
  code-clean run problems.txt
  code-clean run problems.txt --rule S1192 --apply
  code-clean --format diff run problems.txt --complexity extract")]
#[command(version)]
struct Cli {
    /// Output format: "default" or "diff"
    #[arg(long, default_value = "default", global = true)]
    format: String,

    /// Show line statistics after diff output
    #[arg(long, global = true)]
    summary: bool,

    /// Skip findings on paths matching these glob patterns (can be used multiple times)
    #[arg(long, global = true, num_args = 0..)]
    exclude: Vec<String>,

    /// Log every skip decision
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch the files named by a findings file
    #[command(after_help = "EXAMPLES:
    # Preview every supported fix
    code-clean run problems.txt

    # Only extract duplicated literals, and write the files
    code-clean run problems.txt --rule go:S1192 --apply

    # Findings exported from another checkout
    code-clean run /tmp/problems.txt --base-dir ~/src/service --apply

BEHAVIOR:
    Without --apply nothing is written; edits are kept in memory so later
    findings in the same file still see earlier edits.

    With --apply every edit overwrites its file immediately. No backups are
    made.")]
    Run {
        /// JSON array of findings (resource, message, code, startLineNumber)
        #[arg(default_value = "problems.txt")]
        findings: PathBuf,

        /// Directory the findings' resource paths are relative to
        #[arg(long, default_value = ".")]
        base_dir: PathBuf,

        /// Only handle these rules (full code like go:S1192 or bare id like S1192)
        #[arg(short, long, num_args = 1..)]
        rule: Vec<String>,

        /// S3776 fix: 'comment' (default) or 'extract'
        #[arg(long, default_value = "comment")]
        complexity: String,

        /// S1192 fix: replace the 'first' (default) or 'all' quoted occurrences
        #[arg(long, default_value = "first")]
        literal_scope: String,

        /// Also rewrite complexity findings in test files
        #[arg(long)]
        include_tests: bool,

        /// Number generated names 0001, 0002, ... instead of random digits
        #[arg(long)]
        sequential_names: bool,

        /// Apply changes (default is dry-run)
        #[arg(long)]
        apply: bool,
    },

    /// List the rules this tool can patch
    Rules,
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_rules(names: &[String]) -> Result<BTreeSet<Rule>> {
    if names.is_empty() {
        return Ok(Rule::ALL.into_iter().collect());
    }
    names
        .iter()
        .map(|name| name.parse::<Rule>().map_err(anyhow::Error::msg))
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.format != "default" && cli.format != "diff" {
        bail!("Invalid format: {}. Valid values are 'default' or 'diff'", cli.format);
    }

    match cli.command {
        Commands::Run {
            findings,
            base_dir,
            rule,
            complexity,
            literal_scope,
            include_tests,
            sequential_names,
            apply,
        } => {
            let config = PatchConfig {
                base_dir,
                rules: parse_rules(&rule)?,
                complexity: complexity.parse::<ComplexityStrategy>().map_err(anyhow::Error::msg)?,
                literal_scope: literal_scope.parse::<LiteralScope>().map_err(anyhow::Error::msg)?,
                skip_test_files: !include_tests,
                exclude: cli.exclude.clone(),
            };
            let names: Box<dyn SuffixSource> = if sequential_names {
                Box::new(SequentialSuffix::new())
            } else {
                Box::new(HashSuffix::new())
            };

            run_findings(&findings, config, names, apply, &cli.format, cli.summary)?;
        }

        Commands::Rules => {
            for rule in Rule::ALL {
                println!("{:<10} {}", rule.code(), rule.description());
            }
        }
    }

    Ok(())
}

fn run_findings(
    findings_path: &Path,
    config: PatchConfig,
    names: Box<dyn SuffixSource>,
    apply: bool,
    format: &str,
    show_summary: bool,
) -> Result<()> {
    let findings = load_findings(findings_path)?;
    info!("begin code clean: {} findings", findings.len());

    let mut patcher = Patcher::new(FileStore::new(apply), names, config);
    patcher.run(&findings)?;
    let (store, summary) = patcher.into_parts();

    info!("end code clean");

    if format == "diff" {
        let stats = print_changes(store.changes());
        if show_summary {
            stats.print_summary();
        }
    } else {
        for change in store.changes() {
            if apply {
                println!("✓ Modified: {}", change.path.display());
            } else {
                println!("Would modify: {}", change.path.display());
            }
        }
    }

    summary.print();
    for path in &summary.test_files {
        println!("   test file: {}", path.display());
    }

    if !apply {
        println!("\n🔍 Dry run complete. Use --apply to write the files, or --format diff to see the edits.");
        println!("Summary: {} file(s) would be modified", store.changes().count());
    }

    Ok(())
}
