pub(crate) mod csv;
pub(crate) mod jsonl;

use self::csv::{delimited_writer, entry_row, write_row, CsvWriter, RECORD_HEADER};
use super::error::OutputError;
use crate::artifacts::os::windows::usnjrnl::parser::UsnJrnlEntry;
use log::error;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /**Header row, every field quoted */
    Csv,
    /**Header row, tab separated */
    Tab,
    /**Sleuthkit bodyfile */
    Body,
    /**Five field timeline */
    Tln,
    /**TLN with the timezone and notes fields used by log2timeline */
    L2tTln,
    /**One JSON object per line */
    Jsonl,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        let format = match name.to_lowercase().as_str() {
            "csv" => OutputFormat::Csv,
            "tab" => OutputFormat::Tab,
            "body" => OutputFormat::Body,
            "tln" => OutputFormat::Tln,
            "l2ttln" => OutputFormat::L2tTln,
            "jsonl" => OutputFormat::Jsonl,
            _ => return None,
        };
        Some(format)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tab => "tsv",
            OutputFormat::Body => "body",
            OutputFormat::Tln | OutputFormat::L2tTln => "tln",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Timelines need every record, not just the close and rename records
    pub fn forces_all_records(&self) -> bool {
        matches!(
            self,
            OutputFormat::Body | OutputFormat::Tln | OutputFormat::L2tTln
        )
    }

    fn has_header(&self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Tab)
    }
}

enum Sink<W: Write> {
    Delimited(CsvWriter<W>),
    Lines(W),
}

/// Write entries one at a time in the selected format
pub(crate) struct EntryWriter<W: Write> {
    format: OutputFormat,
    sink: Sink<W>,
}

impl<W: Write> EntryWriter<W> {
    /// Setup the writer and output the header row if the format has one
    pub(crate) fn new(format: OutputFormat, writer: W) -> Result<EntryWriter<W>, OutputError> {
        let sink = if format == OutputFormat::Jsonl {
            Sink::Lines(writer)
        } else {
            Sink::Delimited(delimited_writer(&format, writer))
        };

        let mut entry_writer = EntryWriter { format, sink };
        if format.has_header() {
            if let Sink::Delimited(writer) = &mut entry_writer.sink {
                write_row(writer, &RECORD_HEADER)?;
            }
        }
        Ok(entry_writer)
    }

    pub(crate) fn write_entry(&mut self, entry: &UsnJrnlEntry) -> Result<(), OutputError> {
        match &mut self.sink {
            Sink::Delimited(writer) => write_row(writer, &entry_row(&self.format, entry)),
            Sink::Lines(writer) => jsonl::write_line(writer, entry),
        }
    }

    /// Flush any buffered entries
    pub(crate) fn finish(&mut self) -> Result<(), OutputError> {
        let flush_result = match &mut self.sink {
            Sink::Delimited(writer) => writer.flush(),
            Sink::Lines(writer) => writer.flush(),
        };
        if let Err(err) = flush_result {
            error!("[core] Could not flush output: {err:?}");
            return Err(OutputError::WriteRecord);
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{EntryWriter, OutputFormat};
    use crate::artifacts::os::windows::usnjrnl::parser::UsnJrnlEntry;

    pub(crate) fn test_entry() -> UsnJrnlEntry {
        UsnJrnlEntry {
            update_time: String::from("2023-01-30 00:39:59.292182"),
            unix_time: 1675039199,
            major_version: 2,
            mft_entry: 41,
            mft_sequence: 2,
            parent_mft_entry: 40,
            parent_mft_sequence: 1,
            update_sequence_number: 27383955704,
            filename: String::from("report.docx"),
            full_path: String::from(".\\Users\\Docs\\report.docx"),
            file_attributes: String::from("ARCHIVE"),
            update_reason: String::from("file_created; file_closed"),
            update_source_flags: String::new(),
            security_descriptor_id: 0,
        }
    }

    fn write(format: OutputFormat) -> String {
        let mut data = Vec::new();
        {
            let mut writer = EntryWriter::new(format, &mut data).unwrap();
            writer.write_entry(&test_entry()).unwrap();
            writer.finish().unwrap();
        }
        String::from_utf8(data).unwrap()
    }

    #[test]
    fn test_from_name() {
        assert_eq!(OutputFormat::from_name("csv"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_name("TAB"), Some(OutputFormat::Tab));
        assert_eq!(OutputFormat::from_name("l2ttln"), Some(OutputFormat::L2tTln));
        assert_eq!(OutputFormat::from_name("json"), None);
    }

    #[test]
    fn test_forces_all_records() {
        assert!(OutputFormat::Body.forces_all_records());
        assert!(OutputFormat::Tln.forces_all_records());
        assert!(OutputFormat::L2tTln.forces_all_records());
        assert!(!OutputFormat::Csv.forces_all_records());
        assert!(!OutputFormat::Jsonl.forces_all_records());
    }

    #[test]
    fn test_write_csv() {
        let result = write(OutputFormat::Csv);
        assert_eq!(
            result,
            "\"Timestamp\",\"MFT Reference\",\"MFT Sequence\",\"Parent MFT Reference\",\"Parent MFT Sequence\",\"USN\",\"Filename\",\"Attributes\",\"Change Type\",\"Source Info\"\n\
             \"2023-01-30 00:39:59.292182\",\"41\",\"2\",\"40\",\"1\",\"27383955704\",\".\\Users\\Docs\\report.docx\",\"ARCHIVE\",\"file_created; file_closed\",\"\"\n"
        );
    }

    #[test]
    fn test_write_tab() {
        let result = write(OutputFormat::Tab);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Timestamp\tMFT Reference\t"));
        assert_eq!(
            lines[1],
            "2023-01-30 00:39:59.292182\t41\t2\t40\t1\t27383955704\t.\\Users\\Docs\\report.docx\tARCHIVE\tfile_created; file_closed\t"
        );
    }

    #[test]
    fn test_write_body() {
        let result = write(OutputFormat::Body);
        assert_eq!(
            result,
            "0|.\\Users\\Docs\\report.docx|41||0|0|0|1675039199|1675039199|1675039199|1675039199\n"
        );
    }

    #[test]
    fn test_write_tln() {
        assert_eq!(
            write(OutputFormat::Tln),
            "1675039199|USN|-|-|41;.\\Users\\Docs\\report.docx;file_created; file_closed\n"
        );
        assert_eq!(
            write(OutputFormat::L2tTln),
            "1675039199|USN|-|-|41;.\\Users\\Docs\\report.docx;file_created; file_closed|UTC|-\n"
        );
    }

    #[test]
    fn test_write_jsonl() {
        let result = write(OutputFormat::Jsonl);
        assert_eq!(result.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["full_path"], ".\\Users\\Docs\\report.docx");
        assert_eq!(value["mft_entry"], 41);
    }
}
