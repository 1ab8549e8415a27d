use std::fs::{self, File};
use std::io::BufWriter;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use postino::{Corpus, Document, Trainer};
use postino_filters::token_filters::{JoinAdjacentFilter, TokenLengthFilter};
use postino_filters::TokenFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to train models of Postino.")]
struct Args {
    /// A corpus directory holding one subdirectory per class
    #[arg(long)]
    data: PathBuf,

    /// The file to write the trained model to
    #[arg(long)]
    model: PathBuf,

    /// Retain only this many words per class, keeping the most frequent
    #[arg(long)]
    vocab: Option<NonZeroU64>,

    /// A name to store in the model metadata
    #[arg(long)]
    name: Option<String>,

    /// Do not filter tokens of the training data.
    #[arg(long)]
    no_norm: bool,
}

fn default_filters() -> Vec<Box<dyn TokenFilter>> {
    vec![
        Box::new(JoinAdjacentFilter::new("e", "mail", "email")),
        Box::new(TokenLengthFilter::new(2, 14).keep("x")),
    ]
}

fn class_directories(data: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut dirs = vec![];
    for entry in fs::read_dir(data)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    // Directory listing order is platform-dependent; the class order fixes
    // score tie-breaks, so make it stable.
    dirs.sort();
    Ok(dirs)
}

fn load_documents(
    dir: &Path,
    filters: &[Box<dyn TokenFilter>],
) -> Result<Vec<Document>, std::io::Error> {
    let mut paths = vec![];
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    let mut documents = vec![];
    for path in paths {
        let content = fs::read_to_string(&path)?;
        // One document per file: a single line of whitespace-separated
        // tokens with no trailing structure.
        let document = Document::from_line(content.lines().next().unwrap_or(""));
        let document = filters
            .iter()
            .fold(document, |doc, filter| filter.filter(doc));
        documents.push(document);
    }
    Ok(documents)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filters = if args.no_norm {
        vec![]
    } else {
        default_filters()
    };

    eprintln!("Loading corpus...");
    let mut corpus = Corpus::new();
    for dir in class_directories(&args.data)? {
        let class_name = dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or("class directory name is not valid UTF-8")?
            .to_string();
        corpus.add_class(&class_name)?;
        let documents = load_documents(&dir, &filters)?;
        eprintln!("# of {} documents: {}", class_name, documents.len());
        for document in documents {
            corpus.add_document(&class_name, document);
        }
    }

    eprintln!("Start training...");
    let mut trainer = Trainer::new();
    if let Some(limit) = args.vocab {
        trainer = trainer.vocabulary_limit(limit);
    }
    if let Some(name) = args.name.as_deref() {
        trainer = trainer.model_name(name);
    }
    let model = trainer.train(&corpus)?;
    eprintln!(
        "Finish training: {} classes, vocabulary size {}",
        model.classes().len(),
        model.total_vocabulary_size()
    );

    eprintln!("Saving model file...");
    let mut f = BufWriter::new(File::create(&args.model)?);
    model.write(&mut f)?;

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
