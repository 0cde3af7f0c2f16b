use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use grammar_chunker::{
    context_lines, preview_chunks, registry, ChunkerConfig, ContextLines, GrammarHandler,
    GrammarRegistry, PreviewChunk, SplitPlan, StructuralGrammar,
};
use grammar_indexer::{load_config, FileScanner, IndexingConfig};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "grammar-probe")]
#[command(about = "Inspect grammar dispatch and chunk classification", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the grammar and split plan for a file
    Resolve(ResolveArgs),

    /// Preview how a file is cut and classified
    Classify(ClassifyArgs),

    /// Plan every file under a project root
    Scan(ScanArgs),

    /// Print custom language registrations for the splitter
    Languages,

    /// Compile every grammar and run the startup self-check
    Check,
}

#[derive(Args)]
struct ResolveArgs {
    /// File path (relative paths are matched as given)
    path: PathBuf,

    /// Skip content markers; resolve by path alone
    #[arg(long)]
    path_only: bool,
}

#[derive(Args)]
struct ClassifyArgs {
    /// File to preview
    file: PathBuf,

    /// Grammar name or alias, overriding path resolution
    #[arg(long, short = 'g')]
    grammar: Option<String>,

    /// Lines of surrounding context to attach to each chunk
    #[arg(long, short = 'C', default_value_t = 0)]
    context: usize,
}

#[derive(Args)]
struct ScanArgs {
    /// Project root
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Config file (defaults to <root>/.grammar-index.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct ResolveOutput {
    path: String,
    grammar: Option<String>,
    base_language: Option<String>,
    split: Option<SplitPlan>,
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    path: String,
    grammar: String,
    chunks: Vec<ClassifiedChunk<'a>>,
}

#[derive(Serialize)]
struct ClassifiedChunk<'a> {
    #[serde(flatten)]
    chunk: PreviewChunk,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<ContextLines<'a>>,
}

#[derive(Serialize)]
struct CheckOutput {
    status: &'static str,
    grammars: Vec<GrammarSummary>,
}

#[derive(Serialize)]
struct GrammarSummary {
    name: String,
    base_language: String,
    aliases: Vec<String>,
    levels: usize,
    structural_levels: usize,
    rules: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Resolve(args) => run_resolve(args)?,
        Commands::Classify(args) => run_classify(args)?,
        Commands::Scan(args) => run_scan(args)?,
        Commands::Languages => print_json(&registry().custom_languages())?,
        Commands::Check => run_check()?,
    }

    Ok(())
}

fn run_resolve(args: ResolveArgs) -> Result<()> {
    let path = display_path(&args.path);
    let content = if args.path_only {
        None
    } else {
        Some(read_text(&args.path)?)
    };

    let handler = registry().resolve(&path, content.as_deref());
    let output = ResolveOutput {
        grammar: handler.map(|h| h.name().to_string()),
        base_language: handler.map(|h| h.base_language().to_string()),
        split: handler.map(|h| h.split_plan(&ChunkerConfig::default())),
        path,
    };
    print_json(&output)
}

fn run_classify(args: ClassifyArgs) -> Result<()> {
    let path = display_path(&args.file);
    let content = read_text(&args.file)?;
    let handler = select_handler(&path, &content, args.grammar.as_deref())?;
    log::debug!("Classifying {path} as {}", handler.name());

    let chunks = preview_chunks(handler, &content)
        .into_iter()
        .map(|chunk| {
            let context = (args.context > 0).then(|| {
                context_lines(&content, chunk.start_line, chunk.end_line, args.context)
            });
            ClassifiedChunk { chunk, context }
        })
        .collect();

    print_json(&ClassifyOutput {
        path,
        grammar: handler.name().to_string(),
        chunks,
    })
}

fn select_handler(
    path: &str,
    content: &str,
    grammar: Option<&str>,
) -> Result<&'static GrammarHandler> {
    match grammar {
        Some(name) => registry()
            .for_language(name)
            .with_context(|| format!("Unknown grammar '{name}'")),
        None => registry()
            .resolve(path, Some(content))
            .with_context(|| format!("No grammar matches {path}; pass --grammar")),
    }
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let config = match &args.config {
        Some(file) => IndexingConfig::load(file)
            .with_context(|| format!("Failed to load config {}", file.display()))?,
        None => load_config(&args.root),
    };

    let scanner = FileScanner::new(&args.root, &config)
        .with_context(|| format!("Cannot scan {}", args.root.display()))?;
    print_json(&scanner.scan())
}

fn run_check() -> Result<()> {
    let fresh = GrammarRegistry::builtin().context("Grammar self-check failed")?;
    let grammars = fresh
        .handlers()
        .map(|handler| {
            let cascade = handler.separator_cascade();
            GrammarSummary {
                name: handler.name().to_string(),
                base_language: handler.base_language().to_string(),
                aliases: handler.aliases().iter().map(|a| (*a).to_string()).collect(),
                levels: cascade.len(),
                structural_levels: cascade.levels().filter(|l| l.is_structural()).count(),
                rules: handler.rules().len(),
            }
        })
        .collect();

    print_json(&CheckOutput {
        status: "ok",
        grammars,
    })
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
