use std::fs::File;
use std::io::BufWriter;
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use postino::Model;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(about = "A program to manipulate trained models.")]
struct Args {
    /// Input path of the model file
    #[arg(long)]
    model_in: PathBuf,

    /// Output path of the model file
    #[arg(long)]
    model_out: Option<PathBuf>,

    /// Output the per-class word counts contained in the model.
    #[arg(long)]
    dump_counts: Option<PathBuf>,

    /// Cap every class vocabulary at this many words, keeping the most
    /// frequent
    #[arg(long)]
    truncate: Option<NonZeroU64>,

    /// Set the model name stored in the metadata
    #[arg(long)]
    name: Option<String>,
}

#[derive(Deserialize, Serialize)]
struct WordCountRecord {
    class: String,
    word: String,
    count: u64,
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut model = Model::from_path(&args.model_in)?;

    if let Some(path) = args.dump_counts {
        eprintln!("Saving word count file...");
        let file = File::create(path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for class in model.classes() {
            for (word, &count) in class.word_counts() {
                wtr.serialize(WordCountRecord {
                    class: class.class_name().to_string(),
                    word: word.clone(),
                    count,
                })?;
            }
        }
    }

    if let Some(limit) = args.truncate {
        eprintln!("Truncating vocabulary...");
        model.truncate_vocabulary(limit);
    }

    if let Some(name) = args.name.as_deref() {
        model.set_name(name);
    }

    if let Some(path) = args.model_out {
        eprintln!("Saving model file...");
        let mut f = BufWriter::new(File::create(path)?);
        model.write(&mut f)?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
