use std::fmt;

use clap::ValueEnum;

use crate::Aggregates;

const SURTAX_THRESHOLD: f64 = 60000.0;
const SURTAX_RATE: f64 = 0.10;
const IRPJ_RATE: f64 = 0.15;
const CSLL_RATE: f64 = 0.09;

const REAL_PIS_RATE: f64 = 0.0165;
const REAL_COFINS_RATE: f64 = 0.076;
const PRESUMED_PIS_RATE: f64 = 0.0065;
const PRESUMED_COFINS_RATE: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TaxRegime {
    /// Lucro Real: taxes on the reported profit
    #[value(name = "real")]
    RealProfit,
    /// Lucro Presumido: taxes on a fixed share of revenue
    #[value(name = "presumido")]
    PresumedProfit,
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRegime::RealProfit => write!(f, "Lucro Real"),
            TaxRegime::PresumedProfit => write!(f, "Lucro Presumido"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityClass {
    Commerce,
    Service,
    Other,
}

impl ActivityClass {
    pub fn classify(activity: &str) -> Self {
        let a = activity.to_lowercase();
        if a.contains("comércio") || a.contains("comercio") {
            ActivityClass::Commerce
        } else if a.contains("serviço") || a.contains("servico") {
            ActivityClass::Service
        } else {
            ActivityClass::Other
        }
    }

    /// Presumed profit shares of revenue for IRPJ and CSLL.
    fn presumption_rates(self) -> (f64, f64) {
        match self {
            ActivityClass::Service => (0.32, 0.32),
            ActivityClass::Commerce | ActivityClass::Other => (0.08, 0.12),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxName {
    Revenue,
    Profit,
    Irpj,
    IrpjSurtax,
    Csll,
    Pis,
    Cofins,
    Total,
}

impl TaxName {
    pub const ORDER: [TaxName; 8] = [
        TaxName::Revenue,
        TaxName::Profit,
        TaxName::Irpj,
        TaxName::IrpjSurtax,
        TaxName::Csll,
        TaxName::Pis,
        TaxName::Cofins,
        TaxName::Total,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaxName::Revenue => "Receita",
            TaxName::Profit => "Lucro",
            TaxName::Irpj => "IRPJ",
            TaxName::IrpjSurtax => "Adicional IRPJ",
            TaxName::Csll => "CSLL",
            TaxName::Pis => "PIS",
            TaxName::Cofins => "COFINS",
            TaxName::Total => "Total Tributos",
        }
    }
}

impl fmt::Display for TaxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named amounts, always in [`TaxName::ORDER`].
#[derive(Debug, Clone, PartialEq)]
pub struct TaxResult {
    entries: Vec<(TaxName, f64)>,
}

impl TaxResult {
    pub fn entries(&self) -> &[(TaxName, f64)] {
        &self.entries
    }

    pub fn get(&self, name: TaxName) -> f64 {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .unwrap_or_default()
    }

    pub fn total(&self) -> f64 {
        self.get(TaxName::Total)
    }
}

/// Negative bases are not clamped.
fn surtax(base: f64) -> f64 {
    if base > SURTAX_THRESHOLD {
        (base - SURTAX_THRESHOLD) * SURTAX_RATE
    } else {
        0.
    }
}

pub fn compute_taxes(aggregates: &Aggregates, regime: TaxRegime, activity: &str) -> TaxResult {
    let Aggregates { revenue, profit } = *aggregates;

    let (irpj, irpj_surtax, csll, pis, cofins) = match regime {
        TaxRegime::RealProfit => (
            profit * IRPJ_RATE,
            surtax(profit),
            profit * CSLL_RATE,
            revenue * REAL_PIS_RATE,
            revenue * REAL_COFINS_RATE,
        ),
        TaxRegime::PresumedProfit => {
            let (irpj_share, csll_share) = ActivityClass::classify(activity).presumption_rates();
            let base_irpj = revenue * irpj_share;
            let base_csll = revenue * csll_share;
            (
                base_irpj * IRPJ_RATE,
                surtax(base_irpj),
                base_csll * CSLL_RATE,
                revenue * PRESUMED_PIS_RATE,
                revenue * PRESUMED_COFINS_RATE,
            )
        }
    };
    let total = irpj + irpj_surtax + csll + pis + cofins;

    TaxResult {
        entries: vec![
            (TaxName::Revenue, revenue),
            (TaxName::Profit, profit),
            (TaxName::Irpj, irpj),
            (TaxName::IrpjSurtax, irpj_surtax),
            (TaxName::Csll, csll),
            (TaxName::Pis, pis),
            (TaxName::Cofins, cofins),
            (TaxName::Total, total),
        ],
    }
}
