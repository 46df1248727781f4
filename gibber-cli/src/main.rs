use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use gibber_core::config::ModelConfig;
use gibber_core::model::generator::Generator;
use gibber_core::pipeline::TrainingPipeline;

mod source;

/// Trains a word-level Markov chain on chat logs or snippet archives and
/// prints generated sentences.
#[derive(Parser, Debug)]
#[command(name = "gibber", version, about)]
struct Args {
    /// Directory tree of raw text files to train on
    #[arg(long, default_value = "data")]
    data: PathBuf,

    /// Pre-fetched JSON snippet archive; takes precedence over --data
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of n-gram orders to maintain
    #[arg(long, default_value_t = 2)]
    max_order: usize,

    /// Maximal sentence length in words
    #[arg(long, default_value_t = 20)]
    max_len: usize,

    /// Scale applied to end-of-sentence likelihood when deciding to stop
    #[arg(long, default_value_t = 0.001)]
    end_bias: f64,

    /// Number of sentences to generate
    #[arg(long, default_value_t = 50)]
    count: usize,

    /// Where to write the model dump
    #[arg(long, default_value = "chain.json")]
    dump: PathBuf,
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ModelConfig::new(args.max_order, args.max_len, args.end_bias, args.count)?;
    let pipeline = TrainingPipeline::spawn(&config)?;

    if let Some(json) = &args.json {
        let archive = source::load_snippets(json)
            .map_err(|e| format!("cannot load {}: {}", json.display(), e))?;
        info!("loaded {} snippets of {}", archive.snippets.len(), archive.user);
        for snippet in archive.snippets {
            pipeline.feed_line(snippet.text);
        }
    } else {
        if !args.data.is_dir() {
            return Err(format!("data folder not found: {}", args.data.display()).into());
        }
        source::feed_directory(&args.data, &pipeline)?;
    }

    let (mut model, stats) = pipeline.finish()?;
    println!("Sentences: {}", stats.sentences);
    println!("Words: {}", stats.words);
    println!("----");

    model.normalize()?;

    let generator = Generator::new(&model, &config)?;
    for _ in 0..config.num_sentences {
        println!("{}", generator.sentence());
    }

    // A failed dump is reported but never aborts the run.
    match model.to_json() {
        Ok(dump) => {
            if let Err(e) = fs::write(&args.dump, dump) {
                error!("cannot write {}: {}", args.dump.display(), e);
            }
        }
        Err(e) => error!("cannot encode model dump: {e}"),
    }

    Ok(())
}
