//! Result encoding.

use std::io::Write;

use serde::Serialize;

use crate::{cli::OutputFormat, error::CliError};

/// Write `value` to `out` in the requested format.
///
/// JSON is pretty-printed with a trailing newline; CBOR is written raw.
pub fn write_output<T, W>(value: &T, format: OutputFormat, out: &mut W) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, value)?;
            out.write_all(b"\n")?;
        },
        OutputFormat::Cbor => ciborium::into_writer(value, &mut *out)?,
    }
    out.flush()?;
    Ok(())
}
