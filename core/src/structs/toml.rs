use serde::Deserialize;

/// Collection settings read from a TOML file or built by the CLI
#[derive(Debug, Deserialize, Clone)]
pub struct UsnJrnlToml {
    pub output: Output,
    pub usnjrnl: UsnJrnlOptions,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Output {
    /**Stem for the output and log files */
    pub name: String,
    /**If not provided entries are written to stdout and logs only go to stderr */
    pub directory: Option<String>,
    /**csv, tab, body, tln, l2ttln, or jsonl */
    pub format: String,
    #[serde(default)]
    pub append: bool,
    pub logging: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsnJrnlOptions {
    /**Path to an extracted `$UsnJrnl:$J` stream */
    pub journal: String,
    /**Path to an extracted `$MFT`. Used to rebuild full paths */
    pub mft: Option<String>,
    /**Output every record, not just close and rename (old name) records */
    #[serde(default)]
    pub all_records: bool,
    /**Use the long descriptions for the update reason flags */
    #[serde(default)]
    pub long_flags: bool,
}

#[cfg(test)]
mod tests {
    use super::UsnJrnlToml;

    #[test]
    fn test_usnjrnl_toml() {
        let test = r#"
            [output]
            name = "case_1"
            directory = "./tmp"
            format = "tln"
            logging = "debug"

            [usnjrnl]
            journal = "/cases/1/$J"
            mft = "/cases/1/$MFT"
            long_flags = true
        "#;

        let result: UsnJrnlToml = toml::from_str(test).unwrap();
        assert_eq!(result.output.name, "case_1");
        assert_eq!(result.output.format, "tln");
        assert!(!result.output.append);
        assert_eq!(result.usnjrnl.mft.unwrap(), "/cases/1/$MFT");
        assert!(result.usnjrnl.long_flags);
        assert!(!result.usnjrnl.all_records);
    }

    #[test]
    fn test_usnjrnl_toml_missing_journal() {
        let test = r#"
            [output]
            name = "case_1"
            format = "csv"

            [usnjrnl]
            mft = "/cases/1/$MFT"
        "#;

        let result: Result<UsnJrnlToml, _> = toml::from_str(test);
        assert!(result.is_err());
    }
}
