use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use postino::{Classifier, Corpus, Document, Model};
use postino_filters::token_filters::{JoinAdjacentFilter, TokenLengthFilter};
use postino_filters::TokenFilter;

#[derive(Parser, Debug)]
#[command(about = "A program to evaluate the accuracy of a Postino model.")]
struct Args {
    /// The model file to evaluate
    #[arg(long)]
    model: PathBuf,

    /// A test directory holding one subdirectory per class
    #[arg(long)]
    data: PathBuf,

    /// Do not filter tokens of the test documents.
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
        let document = Document::from_line(content.lines().next().unwrap_or(""));
        let document = filters
            .iter()
            .fold(document, |doc, filter| filter.filter(doc));
        documents.push(document);
    }
    Ok(documents)
}

fn percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.
    } else {
        correct as f64 / total as f64 * 100.
    }
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

    eprintln!("Loading test data...");
    let mut test_set = Corpus::new();
    for dir in class_directories(&args.data)? {
        let class_name = dir
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or("class directory name is not valid UTF-8")?
            .to_string();
        test_set.add_class(&class_name)?;
        for document in load_documents(&dir, &filters)? {
            test_set.add_document(&class_name, document);
        }
    }
    eprintln!("# of test documents: {}", test_set.n_documents());

    eprintln!("Start evaluation");
    let results = classifier.evaluate(&test_set);

    let mut n_correct = 0;
    let mut n_total = 0;
    for result in &results {
        println!(
            "Accuracy for {}: {} / {} ({:.2}%)",
            result.class_name,
            result.correct,
            result.total,
            percent(result.correct, result.total)
        );
        n_correct += result.correct;
        n_total += result.total;
    }
    println!(
        "Overall accuracy: {} / {} ({:.2}%)",
        n_correct,
        n_total,
        percent(n_correct, n_total)
    );

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
