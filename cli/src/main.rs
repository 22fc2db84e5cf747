use clap::Parser;
use log::info;
use usnjrnl_core::structs::toml::{Output, UsnJrnlOptions};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML collector
    #[clap(long, value_parser)]
    toml: Option<String>,

    /// Extracted $UsnJrnl:$J file
    #[clap(short = 'f', long, value_parser)]
    journal: Option<String>,

    /// Extracted $MFT file, used to get full paths
    #[clap(short, long, value_parser)]
    mft: Option<String>,

    /// Output directory. Entries are written to stdout if not provided
    #[clap(short, long, value_parser)]
    outdir: Option<String>,

    /// Name of the output and log files
    #[clap(short, long, default_value = "usnjrnl")]
    name: String,

    /// Output format
    #[clap(
        short = 't',
        long = "type",
        default_value = "csv",
        value_parser = ["csv", "tab", "body", "tln", "l2ttln", "jsonl"]
    )]
    format: String,

    /// Append to the output file instead of overwriting it
    #[clap(short = 'A', long)]
    append: bool,

    /// Output all records, not just close and rename records. Always set for body and tln formats
    #[clap(short, long)]
    all: bool,

    /// Use long descriptions for the update reason flags
    #[clap(short, long)]
    long: bool,

    /// Log level: error, warn, info, or debug
    #[clap(long, default_value = "warn")]
    logging: String,
}

fn main() {
    let args = Args::parse();
    eprintln!("[usnjrnl] Starting UsnJrnl parsing!");

    let collection_results = if let Some(toml) = &args.toml {
        usnjrnl_core::core::parse_toml_file(toml)
    } else if let Some(journal) = &args.journal {
        let (options, output) = collection_settings(&args, journal);
        usnjrnl_core::core::collect_usnjrnl(&options, &output)
    } else {
        eprintln!("[usnjrnl] No TOML file or UsnJrnl file provided!");
        return;
    };

    match collection_results {
        Ok(summary) => info!(
            "[usnjrnl] Parsing success. Wrote {} of {} records",
            summary.emitted, summary.decoded
        ),
        Err(err) => {
            eprintln!("[usnjrnl] Failed to parse UsnJrnl: {err}");
            return;
        }
    }
    eprintln!("[usnjrnl] Finished UsnJrnl parsing!");
}

/// Turn command line arguments into the same settings a TOML collector provides
fn collection_settings(args: &Args, journal: &str) -> (UsnJrnlOptions, Output) {
    let options = UsnJrnlOptions {
        journal: journal.to_string(),
        mft: args.mft.clone(),
        all_records: args.all,
        long_flags: args.long,
    };
    let output = Output {
        name: args.name.clone(),
        directory: args.outdir.clone(),
        format: args.format.clone(),
        append: args.append,
        logging: Some(args.logging.clone()),
    };
    (options, output)
}

#[cfg(test)]
mod tests {
    use super::{collection_settings, Args};
    use clap::Parser;

    #[test]
    fn test_collection_settings() {
        let args = Args::parse_from([
            "usnjrnl", "-f", "$J", "-m", "$MFT", "-t", "tln", "-a", "-l", "-A", "-o", "./tmp",
        ]);
        let (options, output) = collection_settings(&args, "$J");
        assert_eq!(options.journal, "$J");
        assert_eq!(options.mft.unwrap(), "$MFT");
        assert!(options.all_records);
        assert!(options.long_flags);
        assert_eq!(output.format, "tln");
        assert_eq!(output.name, "usnjrnl");
        assert_eq!(output.directory.unwrap(), "./tmp");
        assert!(output.append);
    }

    #[test]
    fn test_args_bad_format() {
        assert!(Args::try_parse_from(["usnjrnl", "-f", "$J", "-t", "xml"]).is_err());
    }
}
