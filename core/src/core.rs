use crate::{
    artifacts::os::windows::{
        mft::index::build_index_file,
        usnjrnl::parser::{parse_journal_file, JournalSummary},
    },
    error::CollectionError,
    filesystem::files::read_file,
    output::{
        formats::{EntryWriter, OutputFormat},
        local::output::output_writer,
    },
    structs::toml::{Output, UsnJrnlOptions, UsnJrnlToml},
    utils::logging::setup_logging,
};
use log::{error, info};
use std::str::from_utf8;

/// Parse a TOML file at provided path
pub fn parse_toml_file(path: &str) -> Result<JournalSummary, CollectionError> {
    let buffer_results = read_file(path);
    let buffer = match buffer_results {
        Ok(results) => results,
        Err(_) => {
            return Err(CollectionError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse an already read TOML file
pub fn parse_toml_data(data: &[u8]) -> Result<JournalSummary, CollectionError> {
    let toml_results = toml::from_str(from_utf8(data).unwrap_or_default());
    let collection: UsnJrnlToml = match toml_results {
        Ok(results) => results,
        Err(_) => {
            return Err(CollectionError::BadToml);
        }
    };

    collect_usnjrnl(&collection.usnjrnl, &collection.output)
}

/**
 * Parse the `UsnJrnl` described by `options` and write every entry to `output`
 * Records that cannot be decoded are logged and skipped. Only a failure to read the inputs or write the output stops the run
 */
pub fn collect_usnjrnl(
    options: &UsnJrnlOptions,
    output: &Output,
) -> Result<JournalSummary, CollectionError> {
    if let Err(err) = setup_logging(output) {
        eprintln!("Failed to setup logging: {err:?}");
        return Err(CollectionError::LogFile);
    }

    let format = match OutputFormat::from_name(&output.format) {
        Some(result) => result,
        None => {
            error!("[core] Unknown output format: {}", output.format);
            return Err(CollectionError::Format);
        }
    };

    let mut journal_options = options.clone();
    if format.forces_all_records() {
        journal_options.all_records = true;
    }

    let index = match &journal_options.mft {
        Some(path) => match build_index_file(path) {
            Ok(result) => Some(result),
            Err(err) => {
                error!("[core] Could not build MFT index from {path}: {err:?}");
                return Err(CollectionError::Mft);
            }
        },
        None => None,
    };

    let mut entries = match parse_journal_file(&journal_options, index.as_ref()) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Could not parse UsnJrnl {}: {err:?}", journal_options.journal);
            return Err(CollectionError::Journal);
        }
    };

    let writer = match output_writer(output, format.extension()) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Could not setup output: {err:?}");
            return Err(CollectionError::Output);
        }
    };
    let mut entry_writer = match EntryWriter::new(format, writer) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Could not write output header: {err:?}");
            return Err(CollectionError::Output);
        }
    };

    for entry_result in entries.by_ref() {
        let entry = match entry_result {
            Ok(result) => result,
            Err(err) => {
                error!("[core] UsnJrnl parsing stopped: {err:?}");
                return Err(CollectionError::Journal);
            }
        };

        if let Err(err) = entry_writer.write_entry(&entry) {
            error!("[core] Could not write entry: {err:?}");
            return Err(CollectionError::Output);
        }
    }

    if let Err(err) = entry_writer.finish() {
        error!("[core] Could not finish output: {err:?}");
        return Err(CollectionError::Output);
    }

    let summary = entries.summary().clone();
    info!(
        "[core] UsnJrnl records decoded: {}. Entries written: {}. Records skipped: {}",
        summary.decoded, summary.emitted, summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{collect_usnjrnl, parse_toml_data, parse_toml_file};
    use crate::{
        error::CollectionError,
        structs::toml::{Output, UsnJrnlOptions},
    };
    use std::{fs::read_to_string, path::PathBuf};

    fn test_paths() -> (String, String) {
        let mut journal = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        journal.push("tests/test_data/usnjrnl/journal.bin");
        let mut mft = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        mft.push("tests/test_data/usnjrnl/mft.bin");
        (journal.display().to_string(), mft.display().to_string())
    }

    fn test_output(name: &str, format: &str) -> Output {
        Output {
            name: name.to_string(),
            directory: Some(String::from("./tmp/core")),
            format: format.to_string(),
            append: false,
            logging: Some(String::from("warn")),
        }
    }

    #[test]
    fn test_collect_usnjrnl() {
        let (journal, mft) = test_paths();
        let options = UsnJrnlOptions {
            journal,
            mft: Some(mft),
            all_records: false,
            long_flags: false,
        };
        let output = test_output("collect", "csv");

        let summary = collect_usnjrnl(&options, &output).unwrap();
        assert_eq!(summary.decoded, 5);
        assert_eq!(summary.emitted, 4);
        assert_eq!(summary.skipped, 2);

        let data = read_to_string("./tmp/core/collect.csv").unwrap();
        assert_eq!(data.lines().count(), 5);
        assert!(data.contains("\".\\Users\\Docs\\report.docx\""));
        assert!(data.contains("\"[ORPHAN]\\lost.tmp\""));
    }

    #[test]
    fn test_collect_usnjrnl_timeline() {
        let (journal, _) = test_paths();
        let options = UsnJrnlOptions {
            journal,
            mft: None,
            all_records: false,
            long_flags: false,
        };
        let output = test_output("collect", "body");

        let summary = collect_usnjrnl(&options, &output).unwrap();
        assert_eq!(summary.emitted, 5);

        let data = read_to_string("./tmp/core/collect.body").unwrap();
        assert_eq!(data.lines().count(), 5);
        assert!(data.starts_with("0|b97f8602-d9b6-4387-a5c8-bc5c273f4333.jsonl|350259||0|0|0|1675039199|"));
    }

    #[test]
    fn test_collect_usnjrnl_bad_format() {
        let (journal, _) = test_paths();
        let options = UsnJrnlOptions {
            journal,
            mft: None,
            all_records: false,
            long_flags: false,
        };
        let output = test_output("bad", "xml");
        assert_eq!(
            collect_usnjrnl(&options, &output),
            Err(CollectionError::Format)
        );
    }

    #[test]
    fn test_collect_usnjrnl_missing_mft() {
        let (journal, _) = test_paths();
        let options = UsnJrnlOptions {
            journal,
            mft: Some(String::from("./does/not/exist/$MFT")),
            all_records: false,
            long_flags: false,
        };
        let output = test_output("missing", "csv");
        assert_eq!(
            collect_usnjrnl(&options, &output),
            Err(CollectionError::Mft)
        );
    }

    #[test]
    fn test_parse_toml_file() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/usnjrnl/usnjrnl.toml");
        let summary = parse_toml_file(&test_location.display().to_string()).unwrap();
        assert_eq!(summary.emitted, 4);
    }

    #[test]
    fn test_parse_toml_file_missing() {
        assert_eq!(
            parse_toml_file("./does/not/exist.toml"),
            Err(CollectionError::NoFile)
        );
    }

    #[test]
    fn test_parse_toml_data_bad() {
        assert_eq!(
            parse_toml_data(b"[output]\nname = 1"),
            Err(CollectionError::BadToml)
        );
    }
}
