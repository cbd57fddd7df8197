use anyhow::Context;
use clap::Parser;
use gender_novels::utils::{logger, validation::Validate};
use gender_novels::{
    AnalysisConfig, AnalysisEngine, DistancePipeline, LocalResultStore, NovelError,
    PronounDistance,
};

#[derive(Parser)]
#[command(name = "gender-novels")]
#[command(about = "Pronoun instance distance analysis over a novel corpus")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "analysis.toml")]
    config: String,

    /// Override the corpus name from the config
    #[arg(long)]
    corpus: Option<String>,

    /// Replace previously stored raw results
    #[arg(long)]
    overwrite: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let mut config = AnalysisConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 命令列覆蓋設定
    if let Some(corpus) = args.corpus {
        config.corpus.name = corpus;
    }
    if args.overwrite {
        config.output.overwrite = true;
    }

    if let Err(e) = config.validate() {
        report(&e);
        std::process::exit(1);
    }

    let storage = LocalResultStore::new(config.output_path());
    let pipeline = DistancePipeline::new(storage, config, PronounDistance::new());
    let engine = AnalysisEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!(
                "✅ Analyzed {} of {} novels",
                summary.novels_analyzed, summary.novels_loaded
            );
            for failure in &summary.failures {
                println!("⚠️  {}: {}", failure.filename, failure.message);
            }
            for key in &summary.stored_keys {
                println!("💾 {}", key);
            }
            Ok(())
        }
        Err(e) => {
            report(&e);
            std::process::exit(2);
        }
    }
}

fn report(e: &NovelError) {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e);
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}
