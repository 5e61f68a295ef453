//! Models command - prints catalog entries as JSON

use clap::{Args, Subcommand};

use crate::api::types::{ModelDetail, ModelSummary, ModelsResponse};
use crate::domain::ModelCatalog;

#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub command: ModelsCommand,
}

#[derive(Subcommand)]
pub enum ModelsCommand {
    /// List every model in the catalog
    List,

    /// Show features and parameter ranges for one model
    Show {
        /// Exact model identifier, e.g. anthropic.claude-3-5-sonnet-20240620-v1:0
        model_id: String,
    },
}

pub fn run(args: ModelsArgs) -> anyhow::Result<()> {
    let catalog = ModelCatalog::builtin();
    println!("{}", render(&catalog, &args.command)?);
    Ok(())
}

fn render(catalog: &ModelCatalog, command: &ModelsCommand) -> anyhow::Result<String> {
    let output = match command {
        ModelsCommand::List => {
            let models = catalog.iter().map(ModelSummary::from_domain).collect();
            serde_json::to_string_pretty(&ModelsResponse::new(models))?
        }
        ModelsCommand::Show { model_id } => {
            let model = catalog
                .find(model_id)
                .ok_or_else(|| anyhow::anyhow!("Model '{}' not found", model_id))?;
            serde_json::to_string_pretty(&ModelDetail::from_domain(model))?
        }
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_show_known_model() {
        let output = render(
            &ModelCatalog::builtin(),
            &ModelsCommand::Show {
                model_id: "meta.llama3-8b-instruct-v1:0".to_string(),
            },
        )
        .unwrap();

        let detail: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(detail["provider"], "Meta");
        assert_eq!(detail["parameters"]["TopK"]["supported"], false);
    }

    #[test]
    fn test_show_unknown_model_fails() {
        let result = render(
            &ModelCatalog::builtin(),
            &ModelsCommand::Show {
                model_id: "meta.llama9".to_string(),
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_list_contains_all_models() {
        let catalog = ModelCatalog::builtin();
        let output = render(&catalog, &ModelsCommand::List).unwrap();

        let list: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(list["object"], "list");
        assert_eq!(list["data"].as_array().unwrap().len(), catalog.len());
    }
}
