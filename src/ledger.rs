//! Ledger Presentation
//!
//! Burn rate, breakdowns and currency formatting for the finance views.

use chrono::NaiveDate;

use crate::models::{FinanceCategory, FinancialRecord, FinancialRecordRequest, FinancialSummary, FinancialType};

/// Business tax rate applied when a record is entered tax-inclusive
pub const DEFAULT_TAX_RATE: f64 = 5.0;

/// Percentage of the budget already spent; 0 without a budget
pub fn burn_rate(total_expense: f64, budget: f64) -> f64 {
    if budget <= 0.0 {
        return 0.0;
    }
    total_expense / budget * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnLevel {
    Healthy,
    Warning,
    Critical,
}

impl BurnLevel {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 90.0 {
            BurnLevel::Critical
        } else if rate >= 80.0 {
            BurnLevel::Warning
        } else {
            BurnLevel::Healthy
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            BurnLevel::Healthy => "success",
            BurnLevel::Warning => "warning",
            BurnLevel::Critical => "error",
        }
    }
}

/// Progress bar width in percent
pub fn bar_percent(rate: f64) -> f64 {
    rate.clamp(0.0, 100.0)
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// `NT$` with thousands separators, rounded to whole dollars
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-NT${}", grouped)
    } else {
        format!("NT${}", grouped)
    }
}

/// Amount with a sign by record type, as shown in record tables
pub fn signed_amount(record: &FinancialRecord) -> String {
    match record.kind {
        FinancialType::Income => format!("+{}", format_currency(record.amount)),
        FinancialType::Expense => format!("-{}", format_currency(record.amount)),
    }
}

/// Gross amount for a tax-inclusive entry
pub fn tax_inclusive(amount: f64, rate: Option<f64>) -> f64 {
    amount * (1.0 + rate.unwrap_or(DEFAULT_TAX_RATE) / 100.0)
}

/// Categories offered for a record type
pub fn categories_for(categories: &[FinanceCategory], kind: FinancialType) -> Vec<FinanceCategory> {
    categories.iter().filter(|c| c.kind == kind).cloned().collect()
}

/// Expense totals per category, largest first
pub fn expense_breakdown(records: &[FinancialRecord]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for record in records.iter().filter(|r| r.kind == FinancialType::Expense) {
        match totals.iter_mut().find(|(name, _)| *name == record.category) {
            Some((_, total)) => *total += record.amount,
            None => totals.push((record.category.clone(), record.amount)),
        }
    }
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
}

/// Summary computed from records when the server has not supplied one
pub fn summarize(records: &[FinancialRecord], budget: f64) -> FinancialSummary {
    let (total_income, total_expense) = records.iter().fold((0.0, 0.0), |(income, expense), r| match r.kind {
        FinancialType::Income => (income + r.amount, expense),
        FinancialType::Expense => (income, expense + r.amount),
    });
    FinancialSummary {
        budget,
        total_income,
        total_expense,
        net_profit: total_income - total_expense,
        burn_rate: burn_rate(total_expense, budget),
    }
}

/// Record table tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl RecordFilter {
    pub const ALL: [RecordFilter; 3] = [RecordFilter::All, RecordFilter::Income, RecordFilter::Expense];

    pub fn label(self) -> &'static str {
        match self {
            RecordFilter::All => "All",
            RecordFilter::Income => "Income",
            RecordFilter::Expense => "Expense",
        }
    }

    pub fn apply(self, records: &[FinancialRecord]) -> Vec<FinancialRecord> {
        records
            .iter()
            .filter(|r| match self {
                RecordFilter::All => true,
                RecordFilter::Income => r.kind == FinancialType::Income,
                RecordFilter::Expense => r.kind == FinancialType::Expense,
            })
            .cloned()
            .collect()
    }
}

/// Record modal fields, with the amount kept as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDraft {
    pub project_id: String,
    pub kind: FinancialType,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub tax_included: bool,
    pub receipt_url: Option<String>,
}

impl RecordDraft {
    pub fn new(project_id: &str, date: NaiveDate) -> Self {
        Self {
            project_id: project_id.to_string(),
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn from_record(record: &FinancialRecord) -> Self {
        Self {
            project_id: record.project_id.clone(),
            kind: record.kind,
            amount: record.amount.to_string(),
            category: record.category.clone(),
            description: record.description.clone().unwrap_or_default(),
            date: Some(record.transaction_date),
            tax_included: false,
            receipt_url: record.receipt_url.clone(),
        }
    }

    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount.trim().parse::<f64>().ok().filter(|a| a.is_finite() && *a > 0.0)
    }

    /// Gross amount shown next to the tax checkbox
    pub fn gross_preview(&self) -> Option<f64> {
        let amount = self.parsed_amount()?;
        Some(if self.tax_included { tax_inclusive(amount, None) } else { amount })
    }

    /// Validated request body, or the message to show
    pub fn request(&self) -> Result<FinancialRecordRequest, String> {
        if self.project_id.is_empty() {
            return Err("Select a project".to_string());
        }
        let amount = self.parsed_amount().ok_or_else(|| "Enter an amount greater than zero".to_string())?;
        if self.category.trim().is_empty() {
            return Err("Select a category".to_string());
        }
        Ok(FinancialRecordRequest {
            project_id: self.project_id.clone(),
            kind: self.kind,
            amount,
            category: self.category.trim().to_string(),
            description: self.description.clone(),
            transaction_date: self.date,
            tax_included: self.tax_included,
            tax_rate: self.tax_included.then_some(DEFAULT_TAX_RATE),
            receipt_url: self.receipt_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: FinancialType, category: &str, amount: f64) -> FinancialRecord {
        FinancialRecord {
            id: format!("{}-{}", category, amount),
            project_id: "p1".into(),
            kind,
            amount,
            category: category.into(),
            description: None,
            transaction_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            receipt_url: None,
            created_by: None,
        }
    }

    #[test]
    fn test_burn_rate() {
        assert_eq!(burn_rate(50_000.0, 200_000.0), 25.0);
        assert_eq!(burn_rate(10.0, 0.0), 0.0);
        assert_eq!(burn_rate(10.0, -5.0), 0.0);
    }

    #[test]
    fn test_burn_levels_and_clamp() {
        assert_eq!(BurnLevel::from_rate(79.9), BurnLevel::Healthy);
        assert_eq!(BurnLevel::from_rate(80.0), BurnLevel::Warning);
        assert_eq!(BurnLevel::from_rate(90.0), BurnLevel::Critical);
        assert_eq!(bar_percent(135.0), 100.0);
        assert_eq!(format_rate(12.345), "12.3%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "NT$0");
        assert_eq!(format_currency(999.0), "NT$999");
        assert_eq!(format_currency(1234.6), "NT$1,235");
        assert_eq!(format_currency(1_250_000.0), "NT$1,250,000");
        assert_eq!(format_currency(-4500.0), "-NT$4,500");
    }

    #[test]
    fn test_tax_inclusive_defaults_to_five_percent() {
        assert!((tax_inclusive(1000.0, None) - 1050.0).abs() < 1e-9);
        assert!((tax_inclusive(1000.0, Some(10.0)) - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_expense_breakdown_sorted_descending() {
        let records = vec![
            record(FinancialType::Expense, "SERVER", 300.0),
            record(FinancialType::Income, "CONSULTING", 9000.0),
            record(FinancialType::Expense, "LABOR", 1000.0),
            record(FinancialType::Expense, "SERVER", 900.0),
        ];
        assert_eq!(
            expense_breakdown(&records),
            vec![("SERVER".to_string(), 1200.0), ("LABOR".to_string(), 1000.0)]
        );
    }

    #[test]
    fn test_summarize_and_filter() {
        let records = vec![
            record(FinancialType::Income, "CONSULTING", 5000.0),
            record(FinancialType::Expense, "LABOR", 1500.0),
        ];
        let summary = summarize(&records, 3000.0);
        assert_eq!(summary.net_profit, 3500.0);
        assert_eq!(summary.burn_rate, 50.0);
        assert_eq!(RecordFilter::Income.apply(&records).len(), 1);
        assert_eq!(RecordFilter::All.apply(&records).len(), 2);
        assert_eq!(signed_amount(&records[1]), "-NT$1,500");
    }

    #[test]
    fn test_categories_for_type() {
        let categories = vec![
            FinanceCategory { id: "1".into(), name: "LABOR".into(), kind: FinancialType::Expense },
            FinanceCategory { id: "2".into(), name: "SALES".into(), kind: FinancialType::Income },
        ];
        let income = categories_for(&categories, FinancialType::Income);
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].name, "SALES");
    }

    #[test]
    fn test_record_draft_validation() {
        let day = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let mut draft = RecordDraft::new("p1", day);
        assert_eq!(draft.request().unwrap_err(), "Enter an amount greater than zero");

        draft.amount = "2000".into();
        assert_eq!(draft.request().unwrap_err(), "Select a category");

        draft.category = "LABOR".into();
        draft.tax_included = true;
        assert_eq!(draft.gross_preview(), Some(2100.0));
        let request = draft.request().unwrap();
        assert_eq!(request.amount, 2000.0);
        assert_eq!(request.tax_rate, Some(DEFAULT_TAX_RATE));
        assert_eq!(request.transaction_date, Some(day));

        draft.amount = "-5".into();
        assert!(draft.request().is_err());
    }
}
