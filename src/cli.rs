use clap::Parser;
use std::path::PathBuf;

/// Sort phylogenetic trees into buckets by genus monophyly and by which
/// pair of genera forms the first sister clade.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder holding one Newick tree per file
    #[arg(long = "input-folder", alias = "input_folder")]
    pub input_folder: PathBuf,

    /// Folder receiving the label buckets and the summary CSV
    #[arg(long = "output-base", alias = "output_base")]
    pub output_base: PathBuf,

    /// TOML file with a [taxa] table mapping taxon to genus
    /// (default: built-in nematode-trapping fungi)
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short = 'j', long, default_value = "1")]
    pub jobs: usize,

    /// Only write the summary, do not copy files into buckets
    #[arg(long)]
    pub no_copy: bool,

    /// File name of the summary CSV
    #[arg(long, default_value = cladesort::batch::DEFAULT_SUMMARY_NAME)]
    pub summary_name: String,

    /// Log every classified file
    #[arg(short, long)]
    pub verbose: bool,
}
