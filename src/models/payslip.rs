//! Pay-slip ("recibo") model.
//!
//! A [`PaySlip`] is the data contract handed to document renderers: the
//! employee display fields, the issuing company, and the finished
//! settlement. [`PaySlip::render_text`] produces a fixed-width text rendition;
//! richer formats (PDF) are left to external renderers.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Deductions, Earnings, Period, Settlement};

const WIDTH: usize = 64;
const AMOUNT_WIDTH: usize = 16;

/// The company printed in the pay-slip header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Legal name.
    pub name: String,
    /// Tax identifier (CUIT).
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
}

/// Employee fields shown on a pay-slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySlipEmployee {
    /// Badge number.
    pub badge_id: String,
    /// "Last, First".
    pub display_name: String,
    /// National identity document number.
    #[serde(default)]
    pub national_id: Option<String>,
    /// Hire date.
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    /// Name of the governing agreement.
    #[serde(default)]
    pub agreement_name: Option<String>,
}

/// A settlement prepared for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySlip {
    /// Issuing company.
    pub company: CompanyInfo,
    /// Employee display fields.
    pub employee: PaySlipEmployee,
    /// The pay period.
    pub period: Period,
    /// The date the pay-slip was issued.
    pub issue_date: NaiveDate,
    /// Gross pay breakdown.
    pub earnings: Earnings,
    /// Deduction breakdown.
    pub deductions: Deductions,
    /// Net pay.
    pub net_pay: Decimal,
    /// The complete settlement the pay-slip was built from.
    pub settlement: Settlement,
}

impl PaySlip {
    /// Builds a pay-slip from a computed settlement.
    pub fn new(
        company: CompanyInfo,
        employee: PaySlipEmployee,
        issue_date: NaiveDate,
        settlement: Settlement,
    ) -> Self {
        Self {
            company,
            employee,
            period: settlement.period,
            issue_date,
            earnings: settlement.earnings.clone(),
            deductions: settlement.deductions.clone(),
            net_pay: settlement.net_pay,
            settlement,
        }
    }

    /// Suggested file name for a rendered document, without extension.
    pub fn file_stem(&self) -> String {
        format!("payslip_{}_{}", self.employee.badge_id, self.period)
    }

    /// Renders the pay-slip as fixed-width text.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PaySlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heavy = "=".repeat(WIDTH);
        let light = "-".repeat(WIDTH);

        writeln!(f, "{heavy}")?;
        writeln!(f, "PAY SLIP")?;
        writeln!(f, "{}", self.company.name)?;
        if let Some(tax_id) = &self.company.tax_id {
            writeln!(f, "Tax ID: {tax_id}")?;
        }
        if let Some(address) = &self.company.address {
            writeln!(f, "Address: {address}")?;
        }
        writeln!(f, "{light}")?;

        let employee = &self.employee;
        writeln!(f, "Employee: {}", employee.display_name)?;
        writeln!(f, "Badge: {}", employee.badge_id)?;
        if let Some(national_id) = &employee.national_id {
            writeln!(f, "National ID: {national_id}")?;
        }
        if let Some(hire_date) = employee.hire_date {
            writeln!(f, "Hire date: {hire_date}")?;
        }
        writeln!(
            f,
            "Agreement: {}",
            employee.agreement_name.as_deref().unwrap_or("None")
        )?;
        writeln!(f, "Period: {}", self.period)?;
        writeln!(f, "Issued: {}", self.issue_date)?;
        writeln!(f, "{light}")?;

        writeln!(f, "EARNINGS")?;
        f.write_str(&amount_row("Base salary", self.earnings.base_salary))?;
        for line in &self.earnings.overtime_lines {
            let mut label = format!(
                "{} ({} h x {})",
                line.type_label,
                line.quantity.normalize(),
                line.multiplier.normalize()
            );
            if let Some(description) = &line.description {
                label.push_str(&format!(" - {description}"));
            }
            f.write_str(&amount_row(&label, line.total))?;
        }
        for line in &self.earnings.bonus_lines {
            f.write_str(&amount_row(&line.concept, line.amount))?;
        }
        f.write_str(&amount_row("Total earnings", self.earnings.total))?;
        writeln!(f, "{light}")?;

        writeln!(f, "DEDUCTIONS")?;
        for line in &self.deductions.lines {
            let label = match line.rate {
                Some(rate) => format!("{} ({}%)", line.concept, rate.normalize()),
                None => line.concept.clone(),
            };
            f.write_str(&amount_row(&label, line.amount))?;
        }
        f.write_str(&amount_row("Total deductions", self.deductions.total))?;

        writeln!(f, "{heavy}")?;
        writeln!(f, "NET PAY: $ {:.2}", self.net_pay)?;
        writeln!(f, "{heavy}")?;
        writeln!(f)?;
        writeln!(f, "{:<32}{}", "____________________", "____________________")?;
        writeln!(f, "{:<32}{}", "Employer signature", "Employee signature")
    }
}

fn amount_row(label: &str, amount: Decimal) -> String {
    let label_width = WIDTH - AMOUNT_WIDTH - 2;
    let mut label: String = label.chars().take(label_width).collect();
    let padding = label_width.saturating_sub(label.chars().count());
    label.extend(std::iter::repeat_n(' ', padding));
    format!("  {label}{:>AMOUNT_WIDTH$}\n", format!("{amount:.2}"))
}
