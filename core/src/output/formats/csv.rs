use crate::{
    artifacts::os::windows::usnjrnl::parser::UsnJrnlEntry,
    output::{error::OutputError, formats::OutputFormat},
};
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use log::error;
use std::io::Write;

pub(crate) type CsvWriter<W> = Writer<W>;

pub(crate) const RECORD_HEADER: [&str; 10] = [
    "Timestamp",
    "MFT Reference",
    "MFT Sequence",
    "Parent MFT Reference",
    "Parent MFT Sequence",
    "USN",
    "Filename",
    "Attributes",
    "Change Type",
    "Source Info",
];

/// Delimiter and quoting for the delimited formats
pub(crate) fn delimited_writer<W: Write>(format: &OutputFormat, writer: W) -> CsvWriter<W> {
    let (delimiter, quote_style) = match format {
        OutputFormat::Csv => (b',', QuoteStyle::Always),
        OutputFormat::Tab => (b'\t', QuoteStyle::Never),
        _ => (b'|', QuoteStyle::Never),
    };

    WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(quote_style)
        .terminator(Terminator::Any(b'\n'))
        .has_headers(false)
        .flexible(true)
        .from_writer(writer)
}

/// Fields for one entry. Timeline formats use unix seconds
pub(crate) fn entry_row(format: &OutputFormat, entry: &UsnJrnlEntry) -> Vec<String> {
    let time = entry.unix_time.to_string();
    let event = format!(
        "{};{};{}",
        entry.mft_entry, entry.full_path, entry.update_reason
    );

    match format {
        OutputFormat::Body => vec![
            String::from("0"),
            entry.full_path.clone(),
            entry.mft_entry.to_string(),
            String::new(),
            String::from("0"),
            String::from("0"),
            String::from("0"),
            time.clone(),
            time.clone(),
            time.clone(),
            time,
        ],
        OutputFormat::Tln => vec![
            time,
            String::from("USN"),
            String::from("-"),
            String::from("-"),
            event,
        ],
        OutputFormat::L2tTln => vec![
            time,
            String::from("USN"),
            String::from("-"),
            String::from("-"),
            event,
            String::from("UTC"),
            String::from("-"),
        ],
        _ => vec![
            entry.update_time.clone(),
            entry.mft_entry.to_string(),
            entry.mft_sequence.to_string(),
            entry.parent_mft_entry.to_string(),
            entry.parent_mft_sequence.to_string(),
            entry.update_sequence_number.to_string(),
            entry.full_path.clone(),
            entry.file_attributes.clone(),
            entry.update_reason.clone(),
            entry.update_source_flags.clone(),
        ],
    }
}

pub(crate) fn write_row<W: Write, T: AsRef<[u8]>>(
    writer: &mut CsvWriter<W>,
    row: &[T],
) -> Result<(), OutputError> {
    if let Err(err) = writer.write_record(row) {
        error!("[core] Could not write csv row: {err:?}");
        return Err(OutputError::WriteRecord);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{delimited_writer, entry_row, write_row, RECORD_HEADER};
    use crate::output::formats::{tests::test_entry, OutputFormat};

    #[test]
    fn test_entry_row() {
        let result = entry_row(&OutputFormat::Csv, &test_entry());
        assert_eq!(result.len(), RECORD_HEADER.len());
        assert_eq!(result[6], ".\\Users\\Docs\\report.docx");

        let result = entry_row(&OutputFormat::Body, &test_entry());
        assert_eq!(result.len(), 11);
        assert_eq!(result[7], "1675039199");
    }

    #[test]
    fn test_write_row_quotes() {
        let mut data = Vec::new();
        {
            let mut writer = delimited_writer(&OutputFormat::Csv, &mut data);
            write_row(&mut writer, &["say \"hi\"", "a,b"]).unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(data).unwrap(), "\"say \"\"hi\"\"\",\"a,b\"\n");
    }
}
