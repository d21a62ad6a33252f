use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dre_analise::{
    aggregate, compute_taxes, export_pdf, extract, get_config, load_sheet, render_table,
    summarize, tax_table, write_taxes_as_csv, ChatCompletionClient,
};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let config = get_config()?;
    init_tracing(config.verbose);

    let sheet = load_sheet(&config.input, config.sheet.as_deref())
        .with_context(|| format!("failed to read {}", config.input.display()))?;
    let extraction = extract(&sheet).context("failed to extract DRE line items")?;
    let table_text = render_table(
        &extraction.table,
        &extraction.description_column,
        &extraction.value_column,
    );
    println!("\n=== PRÉVIA DA DRE ===\n\n{table_text}");

    if let Some(settings) = &config.summary {
        let client =
            ChatCompletionClient::new(&settings.api_base, &settings.api_key, &settings.model);
        println!("\n=== RESUMO COM IA ===\n");
        match summarize(
            &extraction.table,
            &extraction.description_column,
            &extraction.value_column,
            &client,
        ) {
            Ok(summary) => println!("{summary}"),
            Err(e) => {
                warn!(error = %e, "summary unavailable");
                println!("Não foi possível gerar o resumo: {e}");
            }
        }
    }

    let aggregates = aggregate(&extraction.table);
    let result = compute_taxes(&aggregates, config.regime, &config.activity);
    println!("\n{}", tax_table(&result, config.regime));

    export_pdf(&result, &config.output)
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    println!("PDF report written to {}", config.output.display());

    if let Some(csv_path) = &config.csv {
        write_taxes_as_csv(&result, csv_path)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        println!("Tax simulation written as CSV to {}", csv_path.display());
    }

    Ok(())
}
