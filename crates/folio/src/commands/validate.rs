//! `folio validate` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_schema::{Schema, ValidationIssue};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    /// Dataset export (NDJSON, one document per line).
    export_file: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be read or any document fails
    /// validation.
    pub(crate) fn execute(&self) -> Result<(), CliError> {
        let output = Output::new();

        let documents = folio_store::read_export(&self.export_file)?;
        output.info(&format!(
            "Validating {} documents from {}",
            documents.len(),
            self.export_file.display()
        ));

        let issues = Schema::portfolio().validate(&documents);
        for issue in &issues {
            output.warning(&issue.to_string());
        }

        check(&issues)?;
        output.success("All documents valid");
        Ok(())
    }
}

fn check(issues: &[ValidationIssue]) -> Result<(), CliError> {
    if issues.is_empty() {
        return Ok(());
    }
    Err(CliError::Validation(format!(
        "{} validation issue{} found",
        issues.len(),
        if issues.len() == 1 { "" } else { "s" }
    )))
}
