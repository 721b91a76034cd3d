use anyhow::Result;
use clap::{Parser, Subcommand};
use renderlint::report::aggregate;
use renderlint::{scan, Config, Severity};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "renderlint")]
#[command(about = "Static rendering-performance analysis for React projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to scan (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "console")]
    format: OutputFormat,

    /// Minimum severity to report
    #[arg(long, default_value = "info")]
    min_severity: Severity,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for rendering anti-patterns (default)
    Check {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Initialize renderlint.toml config
    Init,
    /// List available rules
    Rules,
    /// Explain a specific rule in detail
    Explain {
        /// Rule ID to explain (e.g., "missing-list-key")
        rule_id: String,
    },
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Console,
    Json,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { path }) => run_check(&path, cli.format, cli.min_severity),
        None => run_check(&cli.path, cli.format, cli.min_severity),
        Some(Commands::Init) => run_init(&cli.path).map(|_| ExitCode::SUCCESS),
        Some(Commands::Rules) => run_list_rules().map(|_| ExitCode::SUCCESS),
        Some(Commands::Explain { rule_id }) => run_explain(&rule_id).map(|_| ExitCode::SUCCESS),
    }
}

fn run_check(path: &Path, format: OutputFormat, min_severity: Severity) -> Result<ExitCode> {
    let config = Config::load_or_default(path)?;
    let mut report = scan(path, config)?;

    // Severity filtering happens after the scan so the outcome and summary
    // always describe exactly what is printed.
    if min_severity > Severity::Info {
        let diagnostics: Vec<_> = report
            .diagnostics
            .into_iter()
            .filter(|d| d.severity >= min_severity)
            .collect();
        report = aggregate(
            diagnostics,
            report.framework,
            report.tips,
            report.files_scanned,
        );
    }

    match format {
        OutputFormat::Console => {
            renderlint::reporter::console::report(&report);
        }
        OutputFormat::Json => {
            renderlint::reporter::json::report(&report)?;
        }
    }

    Ok(ExitCode::from(report.outcome.exit_code()))
}

fn run_init(path: &Path) -> Result<()> {
    let config_path = path.join("renderlint.toml");
    if config_path.exists() {
        anyhow::bail!("renderlint.toml already exists");
    }
    std::fs::write(&config_path, Config::default_toml())?;
    println!("Created {}", config_path.display());
    Ok(())
}

fn run_list_rules() -> Result<()> {
    use renderlint::rules::registry;

    println!("Available rules:\n");
    for rule in registry::all_rules() {
        println!(
            "  {:<28} [{}] {}",
            rule.id(),
            rule.default_severity(),
            rule.description()
        );
    }
    println!("\nUse `renderlint explain <rule-id>` for detailed information.");
    Ok(())
}

fn run_explain(rule_id: &str) -> Result<()> {
    use colored::Colorize;
    use renderlint::rules::registry;

    let rule = match registry::get_rule(rule_id) {
        Some(r) => r,
        None => {
            eprintln!("{} Unknown rule: {}", "error:".red().bold(), rule_id);
            eprintln!("\nAvailable rules:");
            for r in registry::all_rules() {
                eprintln!("  {}", r.id());
            }
            anyhow::bail!("Unknown rule: {}", rule_id);
        }
    };

    println!("{}", rule.name().bold().underline());
    println!("Rule ID: {}", rule.id().cyan());
    println!("Severity: {}", rule.default_severity());
    println!();
    println!("{}", rule.description());
    println!();

    print_rule_explanation(rule.id());

    Ok(())
}

fn print_rule_explanation(rule_id: &str) {
    use colored::Colorize;

    match rule_id {
        "missing-list-key" => {
            println!("{}", "Why it matters:".yellow().bold());
            println!("  Without a key, React reconciles list items by position. Inserting");
            println!("  or reordering items re-renders every item after the change point.");
            println!();
            println!("{}", "Bad:".red().bold());
            println!("  items.map(item => <Row item={{item}} />)");
            println!();
            println!("{}", "Good:".green().bold());
            println!("  items.map(item => <Row key={{item.id}} item={{item}} />)");
        }

        "index-as-key" => {
            println!("{}", "Why it matters:".yellow().bold());
            println!("  An index key changes identity when the list is reordered or");
            println!("  filtered, so React reuses the wrong DOM nodes and component state.");
            println!();
            println!("{}", "Bad:".red().bold());
            println!("  items.map((item, index) => <Row key={{index}} />)");
            println!();
            println!("{}", "Good:".green().bold());
            println!("  items.map(item => <Row key={{item.id}} />)");
        }

        "unstable-callback" => {
            println!("{}", "Why it matters:".yellow().bold());
            println!("  An inline arrow function is a new value on every render, so the");
            println!("  receiving component's props never compare equal and memoization");
            println!("  on that component is defeated.");
            println!();
            println!("{}", "Bad:".red().bold());
            println!("  <Row onClick={{() => select(id)}} />");
            println!();
            println!("{}", "Good:".green().bold());
            println!("  const onSelect = useCallback(() => select(id), [id]);");
            println!("  <Row onClick={{onSelect}} />");
        }

        "unstable-literal-prop" => {
            println!("{}", "Why it matters:".yellow().bold());
            println!("  Object and array literals allocate fresh on every render, failing");
            println!("  shallow prop comparison exactly like inline callbacks do.");
            println!();
            println!("{}", "Bad:".red().bold());
            println!("  <Chart margin={{{{ top: 8, left: 16 }}}} />");
            println!();
            println!("{}", "Good:".green().bold());
            println!("  const MARGIN = {{ top: 8, left: 16 }};  // module scope");
            println!("  <Chart margin={{MARGIN}} />");
        }

        "unmemoized-list-component" => {
            println!("{}", "Why it matters:".yellow().bold());
            println!("  A component rendered per list item re-renders N times whenever the");
            println!("  parent renders. Wrapping it in React.memo makes each item skip");
            println!("  renders when its own props are unchanged.");
            println!();
            println!("{}", "Good:".green().bold());
            println!("  const Row = React.memo(({{ item }}) => <li>{{item.name}}</li>);");
        }

        "component-in-render" => {
            println!("{}", "Why it matters:".yellow().bold());
            println!("  A component defined inside another component is a new type every");
            println!("  render, so React unmounts and remounts its whole subtree.");
            println!();
            println!("{}", "Good:".green().bold());
            println!("  Move the inner component to module scope and pass data via props.");
        }

        "unstable-context-value" => {
            println!("{}", "Why it matters:".yellow().bold());
            println!("  A fresh object passed to a Provider's value re-renders every");
            println!("  consumer of that context on each provider render.");
            println!();
            println!("{}", "Good:".green().bold());
            println!("  const value = useMemo(() => ({{ user, logout }}), [user, logout]);");
            println!("  <Session.Provider value={{value}}>");
        }

        _ => {
            println!("No detailed explanation available for this rule.");
            println!("Run `renderlint rules` to see all available rules.");
        }
    }

    println!();
    println!("{}", "Suppression:".yellow().bold());
    println!("  // renderlint-ignore: {}", rule_id);
}
