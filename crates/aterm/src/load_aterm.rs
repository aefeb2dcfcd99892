#![forbid(unsafe_code)]

use std::io::Read;

use thiserror::Error;

use crate::ATerm;
use crate::TermPool;
use crate::TextATermError;
use crate::TextATermReader;

/// The error that is returned by [load_aterm].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read a valid {format} from the input{origin}.\n{cause}")]
    Invalid {
        format: String,
        origin: String,
        #[source]
        cause: TextATermError,
    },

    #[error("Failed to read a valid {format} from the input{origin}.\nThe input does not contain a term")]
    Missing { format: String, origin: String },
}

/// Returns the name of the source for a file name given on the command line,
/// where the empty name and `-` stand for standard input.
pub fn file_source(filename: &str) -> &str {
    if filename.is_empty() || filename == "-" {
        "standard input"
    } else {
        filename
    }
}

/// Reads a single term in the text format from the reader.
///
/// The `format` describes what is being read, for example `"aterm"`, and the
/// `source` names where the input comes from, or is empty when that is
/// unknown. Both only appear in the error message.
pub fn load_aterm<R, F>(reader: R, pool: &TermPool, format: &str, source: &str, transformer: F) -> Result<ATerm, LoadError>
where
    R: Read,
    F: Fn(ATerm) -> ATerm,
{
    let origin = if source.is_empty() {
        String::new()
    } else {
        format!(" {source}")
    };

    let mut reader = TextATermReader::with_transformer(reader, pool, transformer);
    match reader.read_aterm() {
        Ok(Some(term)) => Ok(term),
        Ok(None) => Err(LoadError::Missing {
            format: format.to_string(),
            origin,
        }),
        Err(cause) => Err(LoadError::Invalid {
            format: format.to_string(),
            origin,
            cause,
        }),
    }
}
