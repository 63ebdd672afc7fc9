//! Command-line arguments and command execution.
//!
//! Commands:
//! - `place-to-cora <xml-file>` - Convert a legacy place document, print JSON
//! - `cora-to-fedora <json-file>` - Merge a record into its stored place document, print XML
//! - `read <type> <id> --rows <json-file>` - Read one record through the storage facade
//! - `list <type> --rows <json-file>` - List records through the storage facade

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use alvincora_convert::FedoraConfig;
use alvincora_data::DataGroup;
use alvincora_storage::{DbRecordStorage, InMemoryRecordReader, RecordStorage};

use crate::CliError;

/// alvincora - convert legacy Alvin records to and from Cora records
#[derive(Parser, Debug)]
#[command(name = "alvincora")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Owning system stamped on converted records (overrides ALVINCORA_DATA_DIVIDER)
    #[arg(long, global = true)]
    pub data_divider: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a legacy place XML document and print the record as JSON
    PlaceToCora {
        /// Legacy place document
        xml_file: PathBuf,
    },

    /// Merge a record into its stored legacy document and print the updated XML
    CoraToFedora {
        /// Record in its JSON form
        json_file: PathBuf,

        /// Fedora base URL, ending with a slash (overrides ALVINCORA_FEDORA_URL)
        #[arg(long)]
        fedora_url: Option<String>,

        /// Fetch timeout in seconds (overrides ALVINCORA_FETCH_TIMEOUT_SECS)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },

    /// Read one record through the storage facade and print it as JSON
    Read {
        record_type: String,
        id: String,

        /// JSON file mapping table names to arrays of rows
        #[arg(long)]
        rows: PathBuf,
    },

    /// Read every record of a type through the storage facade
    List {
        record_type: String,

        /// JSON file mapping table names to arrays of rows
        #[arg(long)]
        rows: PathBuf,
    },
}

/// Run one command, writing its result to `out`.
///
/// `config` carries the environment settings; flags given on the command
/// line take precedence over it.
pub fn run(cli: &Cli, mut config: FedoraConfig, out: &mut impl Write) -> Result<(), CliError> {
    if let Some(divider) = &cli.data_divider {
        config.data_divider = divider.clone();
    }
    let converters = config.converter_factory();

    match &cli.command {
        Command::PlaceToCora { xml_file } => {
            let xml = read_file(xml_file)?;
            let place = converters.factor_from_xml("place")?.from_xml(&xml)?;
            writeln!(out, "{}", place.to_json()?)?;
        }

        Command::CoraToFedora {
            json_file,
            fedora_url,
            timeout,
        } => {
            if let Some(url) = fedora_url {
                config.base_url = url.clone();
            }
            if let Some(secs) = timeout {
                config.timeout = Duration::from_secs(*secs);
            }

            let record = DataGroup::from_json(&read_file(json_file)?)?;
            let entity_type = record
                .attribute("type")
                .unwrap_or_else(|| record.name_in_data());
            let converter =
                converters.factor_to_fedora(entity_type, config.executor()?, &config.base_url)?;
            write!(out, "{}", converter.to_xml(&record)?)?;
        }

        Command::Read {
            record_type,
            id,
            rows,
        } => {
            let storage = open_storage(rows, &config)?;
            let record = storage.read(record_type, id)?;
            writeln!(out, "{}", record.to_json()?)?;
        }

        Command::List { record_type, rows } => {
            let storage = open_storage(rows, &config)?;
            let result = storage.read_list(record_type, &DataGroup::with_name_in_data("filter"))?;
            log::info!(
                "{} {} record(s) found",
                result.total_number_of_matches,
                record_type
            );
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&result.list_of_data_groups)?
            )?;
        }
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn open_storage(
    rows: &Path,
    config: &FedoraConfig,
) -> Result<DbRecordStorage<InMemoryRecordReader>, CliError> {
    let reader = InMemoryRecordReader::from_json(&read_file(rows)?)?;
    Ok(DbRecordStorage::using_record_reader_and_converter_factory(
        reader,
        config.converter_factory(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subcommand_names() {
        let cli = Cli::try_parse_from(["alvincora", "place-to-cora", "22.xml"]).unwrap();
        assert!(matches!(cli.command, Command::PlaceToCora { .. }));

        let cli = Cli::try_parse_from([
            "alvincora",
            "cora-to-fedora",
            "679.json",
            "--fedora-url",
            "http://fedora/",
            "--timeout",
            "5",
        ])
        .unwrap();
        match cli.command {
            Command::CoraToFedora {
                fedora_url,
                timeout,
                ..
            } => {
                assert_eq!(fedora_url.as_deref(), Some("http://fedora/"));
                assert_eq!(timeout, Some(5));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result =
            Cli::try_parse_from(["alvincora", "cora-to-fedora", "x.json", "--timeout", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn rows_are_required_for_reads() {
        assert!(Cli::try_parse_from(["alvincora", "read", "country", "SE"]).is_err());
        assert!(
            Cli::try_parse_from(["alvincora", "read", "country", "SE", "--rows", "rows.json"])
                .is_ok()
        );
    }

    #[test]
    fn data_divider_is_global() {
        let cli = Cli::try_parse_from([
            "alvincora",
            "list",
            "country",
            "--rows",
            "rows.json",
            "--data-divider",
            "cora",
        ])
        .unwrap();
        assert_eq!(cli.data_divider.as_deref(), Some("cora"));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
