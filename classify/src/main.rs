use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use postino::{Classifier, Document, Model};
use postino_filters::token_filters::{JoinAdjacentFilter, TokenLengthFilter};
use postino_filters::TokenFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to classify documents with a Postino model.")]
struct Args {
    /// The model file to use when classifying documents
    #[arg(long)]
    model: PathBuf,

    /// A directory holding one document per file
    #[arg(long)]
    data: PathBuf,

    /// Do not filter tokens of the input documents.
    #[arg(long)]
    no_norm: bool,
}

fn default_filters() -> Vec<Box<dyn TokenFilter>> {
    vec![
        Box::new(JoinAdjacentFilter::new("e", "mail", "email")),
        Box::new(TokenLengthFilter::new(2, 14).keep("x")),
    ]
}

fn document_files(data: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut paths = vec![];
    for entry in fs::read_dir(data)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filters = if args.no_norm {
        vec![]
    } else {
        default_filters()
    };

    eprintln!("Loading model file...");
    let model = Model::from_path(&args.model)?;
    let classifier = Classifier::new(&model)?;

    eprintln!("Start classification");
    for path in document_files(&args.data)? {
        let content = fs::read_to_string(&path)?;
        let document = Document::from_line(content.lines().next().unwrap_or(""));
        let document = filters
            .iter()
            .fold(document, |doc, filter| filter.filter(doc));
        let decision = classifier.classify(&document);
        println!(
            "{}\t{}\t{}",
            path.file_name().unwrap_or_default().to_string_lossy(),
            decision.class_name,
            decision.score
        );
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
