use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use syl_gen_core::io::normalize_folder;
use syl_gen_core::{
    available_name_lists, resolve_name_list, Algorithm, Corpus, FileCache, GenerationInput, Generator,
    SegmenterKind,
};

/// Number of corpus names shown by `--syllables`.
const BREAKDOWN_SIZE: usize = 10;

/// Generate random names from a corpus of real names
#[derive(Parser, Debug)]
#[command(name = "syl-gen", author, version, about, long_about = None)]
struct Cli {
    /// Built-in name list identifier (see --list) or path to a YAML/text file
    #[arg(required_unless_present = "list")]
    names_file: Option<String>,

    /// Number of names to generate
    #[arg(short, long, default_value_t = 5)]
    number: usize,

    /// Maximum name length, in characters
    #[arg(short, long, default_value_t = 12)]
    length: usize,

    /// Generation algorithm (minimal, variable, bayesian)
    #[arg(short, long, default_value = "variable")]
    algorithm: Algorithm,

    /// Segmentation grammar (fantasy, japanese), overrides the name list metadata
    #[arg(short, long)]
    segmenter: Option<SegmenterKind>,

    /// Show the corpus names used to build each name
    #[arg(long)]
    show_sources: bool,

    /// Show corpus existence and, for Bayesian names, the probability
    #[arg(long)]
    show_analysis: bool,

    /// Minimum probability a Bayesian name must reach
    #[arg(long, default_value_t = 1.0e-8)]
    min_probability: f64,

    /// Show the syllable breakdown of the first loaded names
    #[arg(long)]
    syllables: bool,

    /// Show Bayesian probabilities of comma-separated syllables
    #[arg(long, value_name = "SYLLABLE[,SYLLABLE...]")]
    probabilities: Option<String>,

    /// Directory of cached probability tables
    #[arg(long, env = "SYL_GEN_CACHE_DIR", default_value = FileCache::DEFAULT_DIR)]
    cache_dir: PathBuf,

    /// Neither read nor write cached probability tables
    #[arg(long)]
    no_cache: bool,

    /// Seed of the random generator, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Directory of built-in name lists
    #[arg(long, env = "SYL_GEN_DATA_DIR", default_value = "data")]
    data_dir: String,

    /// List the built-in name lists and exit
    #[arg(long)]
    list: bool,

    /// Log debug information
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = normalize_folder(&cli.data_dir);

    if cli.list {
        println!("Available name lists:");
        for identifier in available_name_lists(&data_dir) {
            println!("  {identifier}");
        }
        return Ok(());
    }

    let Some(identifier) = cli.names_file.as_deref() else {
        return Err("No name list given".into());
    };
    let Some(path) = resolve_name_list(identifier, &data_dir) else {
        return Err(format!(
            "File '{}' not found. Searched the current directory and '{}'",
            identifier,
            data_dir.display()
        )
        .into());
    };

    let corpus = Corpus::load(&path, cli.segmenter)?;
    let mut input = GenerationInput::new(cli.number, cli.length, cli.algorithm);
    input.set_min_probability(cli.min_probability)?;

    let generator = match cli.seed {
        Some(seed) => Generator::seeded(corpus, seed),
        None => Generator::new(corpus),
    };
    // The library default is no cache at all
    let mut generator = if cli.no_cache {
        generator
    } else {
        generator.with_cache(FileCache::new(&cli.cache_dir))
    };

    if cli.syllables {
        print_syllables(&generator);
    }
    if let Some(syllables) = &cli.probabilities {
        print_probabilities(&mut generator, syllables, cli.algorithm);
    }

    println!("\n=== Generated Names ({} algorithm) ===", cli.algorithm);
    let names = generator.generate(&input)?;
    for (i, name) in names.iter().enumerate() {
        let mut line = format!("{}. {}", i + 1, name);

        if cli.show_sources && !name.source_names.is_empty() {
            line.push_str(&format!(" (sources: {})", name.source_names.join(", ")));
        }

        if cli.show_analysis {
            let mut analysis = Vec::new();
            if let Some(probability) = name.probability {
                analysis.push(format!("probability: {probability:.2e}"));
            }
            if generator.name_exists_in_corpus(&name.name) {
                analysis.push("*exists in corpus*".to_owned());
            } else {
                analysis.push("new name".to_owned());
            }
            line.push_str(&format!(" ({})", analysis.join(", ")));
        }

        println!("{line}");
    }

    Ok(())
}

fn print_syllables(generator: &Generator) {
    println!("\n=== Syllable Breakdown (first {BREAKDOWN_SIZE} names) ===");
    for name in generator.corpus().names().iter().take(BREAKDOWN_SIZE) {
        println!("{}: {}", name.name(), name.raw_name());
    }
}

fn print_probabilities(generator: &mut Generator, list: &str, algorithm: Algorithm) {
    if algorithm != Algorithm::Bayesian {
        println!("Note: probabilities come from the Bayesian model, not the {algorithm} algorithm");
    }
    println!("\n=== Probability Analysis for '{list}' ===");

    let syllables: Vec<&str> = list.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    for syllable in &syllables {
        if syllables.len() > 1 {
            println!("\n--- Analysis for '{syllable}' ---");
        }

        let Some(info) = generator.syllable_info(syllable) else {
            println!("No probability information available for syllable '{syllable}' (not in the corpus)");
            continue;
        };

        println!("Syllable: {}", info.syllable);
        println!("Start probability: {:.4}", info.start_probability);
        println!("End probability: {:.4}", info.end_probability);
        println!("\nTop transition probabilities:");
        for (i, (next, probability)) in info.top_transitions.iter().enumerate() {
            println!("  {}. {} → {} ({:.4})", i + 1, info.syllable, next, probability);
        }
    }
    println!();
}
