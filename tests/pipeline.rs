use calamine::Data;
use dre_analise::*;
use pretty_assertions::assert_eq;

struct CannedSummary(&'static str);

impl CompletionService for CannedSummary {
    fn complete(&self, messages: &[ChatMessage]) -> DreResult<String> {
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        Ok(self.0.to_string())
    }
}

struct Offline;

impl CompletionService for Offline {
    fn complete(&self, _: &[ChatMessage]) -> DreResult<String> {
        Err(DreError::CompletionService("connection refused".to_string()))
    }
}

fn text(s: &str) -> Data {
    Data::String(s.to_string())
}

fn retail_sheet() -> RawSheet {
    RawSheet {
        name: "DRE 2024".to_string(),
        headers: vec!["Descrição".to_string(), "Valor Total".to_string()],
        rows: vec![
            vec![text("Receita Bruta de Vendas"), Data::Float(200_000.)],
            vec![text("(-) CMV"), Data::Float(-90_000.)],
            vec![Data::Empty, Data::Float(1_234.)],
            vec![text("Despesas Operacionais"), Data::Float(-30_000.)],
            vec![text("Lucro Líquido"), Data::Int(80_000)],
            vec![text("Observação"), Data::Empty],
        ],
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn spreadsheet_to_real_profit_report() {
    let extraction = extract(&retail_sheet()).unwrap();
    assert_eq!(extraction.description_column, "Descrição");
    assert_eq!(extraction.value_column, "Valor Total");
    assert_eq!(extraction.table.len(), 4);

    let aggregates = aggregate(&extraction.table);
    assert_eq!(
        aggregates,
        Aggregates {
            revenue: 200_000.,
            profit: 80_000.
        }
    );

    let result = compute_taxes(&aggregates, TaxRegime::RealProfit, DEFAULT_ACTIVITY);
    assert_close(result.total(), 39_700.);

    let pdf = render(&result).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(REPORT_FILE_NAME);
    std::fs::write(&path, &pdf).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), pdf);
}

#[test]
fn spreadsheet_to_presumed_profit_service_report() {
    let extraction = extract(&retail_sheet()).unwrap();
    let aggregates = aggregate(&extraction.table);
    let result = compute_taxes(
        &aggregates,
        TaxRegime::PresumedProfit,
        "Prestação de serviço de consultoria",
    );
    assert_close(result.get(TaxName::Irpj), 9_600.);
    assert_close(result.get(TaxName::IrpjSurtax), 400.);
    assert_close(result.get(TaxName::Csll), 5_760.);
    assert_close(result.get(TaxName::Pis), 1_300.);
    assert_close(result.get(TaxName::Cofins), 6_000.);
    assert_close(result.total(), 23_060.);

    let table = tax_table(&result, TaxRegime::PresumedProfit);
    assert!(table.contains("Adicional IRPJ"));
    assert!(table.contains("23,060.00"));
}

#[test]
fn summary_is_returned_verbatim_from_the_service() {
    let extraction = extract(&retail_sheet()).unwrap();
    let summary = summarize(
        &extraction.table,
        &extraction.description_column,
        &extraction.value_column,
        &CannedSummary("1. Lucro Bruto: R$ 110 mil"),
    )
    .unwrap();
    assert_eq!(summary, "1. Lucro Bruto: R$ 110 mil");
}

#[test]
fn summary_failure_leaves_the_simulation_usable() {
    let extraction = extract(&retail_sheet()).unwrap();
    let err = summarize(
        &extraction.table,
        &extraction.description_column,
        &extraction.value_column,
        &Offline,
    )
    .unwrap_err();
    assert!(err.to_string().contains("connection refused"));

    let result = compute_taxes(
        &aggregate(&extraction.table),
        TaxRegime::RealProfit,
        DEFAULT_ACTIVITY,
    );
    assert!(render(&result).is_ok());
}

#[test]
fn csv_export_matches_pdf_order() {
    let extraction = extract(&retail_sheet()).unwrap();
    let result = compute_taxes(
        &aggregate(&extraction.table),
        TaxRegime::PresumedProfit,
        DEFAULT_ACTIVITY,
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tributos.csv");
    write_taxes_as_csv(&result, &path).unwrap();

    let labels: Vec<String> = csv::Reader::from_path(&path)
        .unwrap()
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    let expected: Vec<String> = TaxName::ORDER.iter().map(|n| n.label().to_string()).collect();
    assert_eq!(labels, expected);
}
