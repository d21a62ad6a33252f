use crate::{format_amount, TaxRegime, TaxResult};

/// Two-column text table of the simulated amounts.
pub fn tax_table(result: &TaxResult, regime: TaxRegime) -> String {
    let label_width = result
        .entries()
        .iter()
        .map(|(name, _)| name.label().chars().count())
        .max()
        .unwrap_or_default()
        .max("Imposto".len());
    let amounts: Vec<String> = result
        .entries()
        .iter()
        .map(|(_, v)| format_amount(*v))
        .collect();
    let amount_width = amounts
        .iter()
        .map(|a| a.len())
        .max()
        .unwrap_or_default()
        .max("Valor (R$)".len());

    let mut out = format!("Simulação de tributos ({regime})\n\n");
    out.push_str(&format!(
        "{:<label_width$}  {:>amount_width$}\n",
        "Imposto", "Valor (R$)"
    ));
    for ((name, _), amount) in result.entries().iter().zip(&amounts) {
        out.push_str(&format!(
            "{:<label_width$}  {:>amount_width$}\n",
            name.label(),
            amount
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_taxes, Aggregates};

    #[test]
    fn lists_every_entry_with_formatted_amount() {
        let result = compute_taxes(
            &Aggregates {
                revenue: 200_000.,
                profit: 80_000.,
            },
            TaxRegime::RealProfit,
            "",
        );
        let table = tax_table(&result, TaxRegime::RealProfit);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Simulação de tributos (Lucro Real)");
        assert_eq!(lines[2], "Imposto         Valor (R$)");
        assert_eq!(lines[3], "Receita         200,000.00");
        assert_eq!(lines[10], "Total Tributos   39,700.00");
    }
}
