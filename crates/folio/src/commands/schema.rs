//! `folio schema` command implementation.

use clap::Args;
use folio_schema::Schema;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the schema command.
#[derive(Args)]
pub(crate) struct SchemaArgs {
    /// Print a single document type.
    #[arg(long = "type", value_name = "NAME")]
    type_name: Option<String>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl SchemaArgs {
    /// Execute the schema command.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested type does not exist.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        Output::new().print(&self.to_json(&Schema::portfolio())?)?;
        Ok(())
    }

    fn to_json(&self, schema: &Schema) -> Result<String, CliError> {
        let value = match &self.type_name {
            Some(name) => serde_json::to_value(
                schema
                    .document(name)
                    .ok_or_else(|| CliError::NotFound(format!("Unknown document type '{name}'")))?,
            )?,
            None => serde_json::to_value(schema)?,
        };
        let json = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        Ok(json)
    }
}
