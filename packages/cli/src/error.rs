use std::io;
use std::path::PathBuf;

use alvincora_convert::{ConfigError, ConversionError, UnsupportedTypeError};
use alvincora_data::DataError;
use alvincora_storage::StorageError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] alvincora_http::Error),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}
