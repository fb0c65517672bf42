use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

/// Opening the store already created the tables; report it.
pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    output_success(output_format, "Database schema ready", None)
}
