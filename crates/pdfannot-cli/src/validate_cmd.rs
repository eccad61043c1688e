use std::path::Path;

use pdfannot::{DocumentError, ValidationIssue, ValidationOptions, ValidationSummary};

use crate::cli::ValidateFormat;

/// Exit status for a document whose annotations are invalid.
const EXIT_INVALID: i32 = 2;

pub fn run(file: &Path, options: &ValidationOptions, format: &ValidateFormat) -> Result<(), i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }
    let doc = pdfannot::open_file(file).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })?;

    match pdfannot::validate_document(&doc, options) {
        Ok(summary) => {
            report_valid(&summary, format)?;
            Ok(())
        }
        Err(DocumentError::Annotation(err)) => {
            report_invalid(&ValidationIssue::from(&err), format)?;
            Err(EXIT_INVALID)
        }
        Err(e) => {
            eprintln!("Error: validation failed: {e}");
            Err(1)
        }
    }
}

fn report_valid(summary: &ValidationSummary, format: &ValidateFormat) -> Result<(), i32> {
    match format {
        ValidateFormat::Text => println!("OK: {summary}"),
        ValidateFormat::Json => {
            let mut output = to_json(summary)?;
            output["valid"] = serde_json::json!(true);
            print_json(&output)?;
        }
    }
    Ok(())
}

fn report_invalid(issue: &ValidationIssue, format: &ValidateFormat) -> Result<(), i32> {
    match format {
        ValidateFormat::Text => println!("{issue}"),
        ValidateFormat::Json => {
            let output = serde_json::json!({
                "valid": false,
                "error": to_json(issue)?,
            });
            print_json(&output)?;
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, i32> {
    serde_json::to_value(value).map_err(|e| {
        eprintln!("Error: failed to serialize report: {e}");
        1
    })
}

fn print_json(value: &serde_json::Value) -> Result<(), i32> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        eprintln!("Error: failed to serialize report: {e}");
        1
    })?;
    println!("{text}");
    Ok(())
}
