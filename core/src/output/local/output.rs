use crate::{output::error::OutputError, structs::toml::Output};
use log::{error, info};
use std::{
    fs::{create_dir_all, OpenOptions},
    io::{stdout, BufWriter, Write},
};

/**
 * Where decoded entries go
 * Without an output directory entries are written to stdout. Otherwise to `<directory>/<name>.<extension>`,
 * truncated unless `append` is set
 */
pub(crate) fn output_writer(
    output: &Output,
    extension: &str,
) -> Result<Box<dyn Write>, OutputError> {
    let directory = match &output.directory {
        Some(result) => result,
        None => return Ok(Box::new(BufWriter::new(stdout()))),
    };

    if let Err(err) = create_dir_all(directory) {
        error!("[core] Failed to create output directory for {directory}. Error: {err:?}");
        return Err(OutputError::CreateDirectory);
    }

    let output_path = format!("{directory}/{}.{extension}", output.name);
    let mut options = OpenOptions::new();
    options.create(true);
    if output.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    let file = match options.open(&output_path) {
        Ok(result) => result,
        Err(err) => {
            error!("[core] Failed to create output file {output_path}. Error: {err:?}");
            return Err(OutputError::CreateFile);
        }
    };
    info!("[core] Writing entries to {output_path}");
    Ok(Box::new(BufWriter::new(file)))
}
