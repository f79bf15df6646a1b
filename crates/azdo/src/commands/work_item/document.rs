//! Patch document options shared by `create` and `update`.

use azdo_client::types::PatchOperation;
use clap::Args;

use crate::error::CliError;

/// Fields to set, as a JSON Patch document and/or `KEY=VALUE` pairs.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// JSON Patch document, e.g. '[{"op":"add","path":"/fields/System.Title","value":"x"}]'.
    #[arg(short, long, required_unless_present = "fields")]
    document: Option<String>,

    /// Set a field, e.g. --field System.Title="Fix login" (repeatable).
    #[arg(long = "field", id = "fields", value_name = "KEY=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

impl DocumentArgs {
    /// Operations of the document followed by one `add` per `--field`.
    pub(crate) fn operations(&self) -> Result<Vec<PatchOperation>, CliError> {
        let mut operations: Vec<PatchOperation> = match &self.document {
            Some(json) => serde_json::from_str(json).map_err(|err| {
                CliError::Validation(format!("--document must be a JSON Patch array: {err}"))
            })?,
            None => Vec::new(),
        };
        operations.extend(
            self.fields
                .iter()
                .map(|(key, value)| PatchOperation::add_field(key, value.as_str())),
        );
        Ok(operations)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(document: Option<&str>, fields: &[(&str, &str)]) -> DocumentArgs {
        DocumentArgs {
            document: document.map(str::to_owned),
            fields: fields
                .iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("System.Title=a=b").unwrap(),
            ("System.Title".to_owned(), "a=b".to_owned())
        );
        assert!(parse_field("System.Title").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_document_then_fields() {
        let ops = args(
            Some(r#"[{"op":"add","path":"/fields/System.Title","value":"Fix login"}]"#),
            &[("System.State", "Active")],
        )
        .operations()
        .unwrap();

        assert_eq!(
            ops,
            vec![
                PatchOperation::add_field("System.Title", "Fix login"),
                PatchOperation::add_field("System.State", "Active"),
            ]
        );
    }

    #[test]
    fn test_invalid_document() {
        let err = args(Some("{not json"), &[]).operations().unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
