use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, error::ErrorKind};

use crate::config::{NewsSplitConfig, RecordLayout};
use crate::constants::records::{
    DEFAULT_CODE_COLUMN, DEFAULT_EXPECTED_COLUMNS, DEFAULT_TEXT_COLUMN,
};
use crate::constants::splits::{DEFAULT_TEST_FILENAME, DEFAULT_TRAIN_FILENAME};
use crate::source::news::prepare_news_split;
use crate::source::service_requests::{ParseStats, RecordParser};
use crate::splits::SplitOutput;
use crate::stopwords::StopwordFilter;
use crate::synonyms::{SynonymCanonicalizer, SynonymTagStage};
use crate::types::{RawCode, ServiceCode};
use crate::vocabulary::Vocabulary;

#[derive(Debug, Parser)]
#[command(
    name = "prepare_news",
    disable_help_subcommand = true,
    about = "Split a category-bucketed news corpus into train/test files",
    long_about = "Load one directory per category, take the first two non-empty lines of every document, shuffle each category and write text<TAB>label train/test files.",
    after_help = "Without --category the five default categories are used: business, entertainment, politics, sport, tech."
)]
struct PrepareNewsCli {
    #[arg(
        long = "corpus-root",
        value_name = "PATH",
        help = "Directory holding one sub-directory per category"
    )]
    corpus_root: PathBuf,
    #[arg(
        long = "train-path",
        value_name = "PATH",
        default_value = DEFAULT_TRAIN_FILENAME,
        help = "Training output file, recreated on every run"
    )]
    train_path: PathBuf,
    #[arg(
        long = "test-path",
        value_name = "PATH",
        default_value = DEFAULT_TEST_FILENAME,
        help = "Held-out output file, recreated on every run"
    )]
    test_path: PathBuf,
    #[arg(long, help = "Optional deterministic shuffle seed")]
    seed: Option<u64>,
    #[arg(
        long = "category",
        value_name = "NAME",
        help = "Category directory to load, repeat as needed in output order"
    )]
    categories: Vec<String>,
}

#[derive(Debug, Parser)]
#[command(
    name = "service_records",
    disable_help_subcommand = true,
    about = "Parse a tab-separated service-request export",
    long_about = "Read a service-request TSV, keep lines whose code belongs to the service vocabulary, normalize their text and report what was accepted and which codes were unknown."
)]
struct ServiceRecordsCli {
    #[arg(long, value_name = "PATH", help = "Tab-separated input with a header line")]
    input: PathBuf,
    #[arg(
        long,
        default_value_t = DEFAULT_EXPECTED_COLUMNS,
        help = "Exact number of fields a data line must have"
    )]
    columns: usize,
    #[arg(
        long = "code-column",
        default_value_t = DEFAULT_CODE_COLUMN,
        help = "Zero-based index of the service code column"
    )]
    code_column: usize,
    #[arg(
        long = "text-column",
        default_value_t = DEFAULT_TEXT_COLUMN,
        help = "Zero-based index of the request text column"
    )]
    text_column: usize,
    #[arg(
        long,
        value_name = "PATH",
        help = "Stopword list applied before any other stage"
    )]
    stopwords: Option<PathBuf>,
    #[arg(long, help = "Canonicalize German service synonyms")]
    synonyms: bool,
    #[arg(
        long,
        conflicts_with = "synonyms",
        help = "Replace each text by the |-joined tags of its synonym variants"
    )]
    tag: bool,
    #[arg(long, help = "Print the summary as JSON")]
    json: bool,
}

/// Outcome of a `service_records` run.
#[derive(Debug, Serialize)]
struct ServiceRecordsSummary {
    stages: Vec<String>,
    stats: ParseStats,
    accepted_by_code: IndexMap<ServiceCode, CodeCount>,
    unknown_codes: IndexSet<RawCode>,
}

#[derive(Debug, Serialize)]
struct CodeCount {
    name: String,
    records: usize,
}

/// Load a news corpus, split it, and write the train/test files.
///
/// `args_iter` holds the command-line arguments without the program name.
pub fn run_prepare_news<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<PrepareNewsCli, _>(
        std::iter::once("prepare_news".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut config =
        NewsSplitConfig::new(cli.corpus_root).with_outputs(cli.train_path, cli.test_path);
    if !cli.categories.is_empty() {
        config = config.with_categories(cli.categories);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let output = prepare_news_split(&config)?;
    print_split_summary(&config, &output);
    Ok(())
}

/// Parse a service-request export and print what was accepted.
///
/// `args_iter` holds the command-line arguments without the program name.
pub fn run_service_records<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<ServiceRecordsCli, _>(
        std::iter::once("service_records".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let json = cli.json;
    let summary = summarize_service_records(cli)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_service_summary(&summary);
    }
    Ok(())
}

fn summarize_service_records(
    cli: ServiceRecordsCli,
) -> Result<ServiceRecordsSummary, Box<dyn Error>> {
    let vocabulary = Arc::new(Vocabulary::bonn_service_types());
    let layout = RecordLayout::new(cli.columns, cli.code_column, cli.text_column);
    let mut parser = RecordParser::new(layout, Arc::clone(&vocabulary))?;
    if let Some(path) = cli.stopwords {
        parser = parser.with_stage(Arc::new(StopwordFilter::from_path(path)?));
    }
    let synonyms = Arc::new(SynonymCanonicalizer::german_service_terms());
    if cli.synonyms {
        parser = parser.with_stage(synonyms.clone());
    }
    if cli.tag {
        parser = parser.with_stage(Arc::new(SynonymTagStage::new(synonyms)));
    }

    let mut accepted_by_code: IndexMap<ServiceCode, CodeCount> = IndexMap::new();
    let mut records = parser.open(&cli.input)?;
    for record in records.by_ref() {
        let record = record?;
        accepted_by_code
            .entry(record.code)
            .or_insert_with(|| CodeCount {
                name: vocabulary.display_name(record.code).to_string(),
                records: 0,
            })
            .records += 1;
    }
    accepted_by_code.sort_keys();

    Ok(ServiceRecordsSummary {
        stages: parser.stage_names().into_iter().map(str::to_string).collect(),
        stats: records.stats(),
        accepted_by_code,
        unknown_codes: records.unknown_codes().clone(),
    })
}

fn print_split_summary(config: &NewsSplitConfig, output: &SplitOutput) {
    println!("=== news split ===");
    for category in &output.categories {
        println!(
            "{:<16} total {:>6}  train {:>6}  test {:>6}",
            category.label, category.total, category.train, category.test
        );
    }
    println!(
        "train: {} samples -> {}",
        output.train.len(),
        config.train_path.display()
    );
    println!(
        "test:  {} samples -> {}",
        output.test.len(),
        config.test_path.display()
    );
}

fn print_service_summary(summary: &ServiceRecordsSummary) {
    println!("=== service records ===");
    if !summary.stages.is_empty() {
        println!("stages: {}", summary.stages.join(" -> "));
    }
    println!(
        "lines {}  accepted {}  malformed {}  unknown {}",
        summary.stats.lines, summary.stats.accepted, summary.stats.malformed, summary.stats.unknown
    );
    for (code, count) in &summary.accepted_by_code {
        println!("  {:>3} {:<32} {:>6}", code, count.name, count.records);
    }
    if summary.unknown_codes.is_empty() {
        println!("unknown codes: none");
    } else {
        let codes: Vec<&str> = summary.unknown_codes.iter().map(String::as_str).collect();
        println!("unknown codes: {}", codes.join(", "));
    }
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
