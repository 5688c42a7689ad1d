use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum MovementNature {
    Income,
    Expense,
}

/// What a cash movement was for. Each concept belongs to exactly one
/// nature; the register form only offers the matching subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum MovementConcept {
    Consultation,
    Cleaning,
    Filling,
    RootCanal,
    Extraction,
    Orthodontics,
    Prosthesis,
    Whitening,
    ControlVisit,
    OtherIncome,
    Materials,
    Laboratory,
    Suppliers,
    Rent,
    Services,
    Salaries,
    Taxes,
    Maintenance,
    OtherExpense,
}

/// Income concepts in form order.
pub const INCOME_CONCEPTS: [MovementConcept; 10] = [
    MovementConcept::Consultation,
    MovementConcept::Cleaning,
    MovementConcept::Filling,
    MovementConcept::RootCanal,
    MovementConcept::Extraction,
    MovementConcept::Orthodontics,
    MovementConcept::Prosthesis,
    MovementConcept::Whitening,
    MovementConcept::ControlVisit,
    MovementConcept::OtherIncome,
];

/// Expense concepts in form order.
pub const EXPENSE_CONCEPTS: [MovementConcept; 9] = [
    MovementConcept::Materials,
    MovementConcept::Laboratory,
    MovementConcept::Suppliers,
    MovementConcept::Rent,
    MovementConcept::Services,
    MovementConcept::Salaries,
    MovementConcept::Taxes,
    MovementConcept::Maintenance,
    MovementConcept::OtherExpense,
];

impl MovementConcept {
    pub fn nature(self) -> MovementNature {
        if EXPENSE_CONCEPTS.contains(&self) {
            MovementNature::Expense
        } else {
            MovementNature::Income
        }
    }

    /// Income movements are tied to a patient, except generic income.
    /// Expenses never are.
    pub fn requires_patient(self) -> bool {
        self.nature() == MovementNature::Income && self != MovementConcept::OtherIncome
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

/// A cash-register entry as returned by the admin service. Created by
/// explicit submission only; never mutated from the client.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MoneyMovement {
    pub id: i64,
    pub movement_nature: MovementNature,
    /// Decimal string; monetary amounts never travel as binary floats.
    pub amount: String,
    pub currency: String,
    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub appointment_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateMoneyMovementRequest {
    pub concept: MovementConcept,
    pub payment_method: PaymentMethod,
    /// Decimal string, e.g. "25000" or "25000.50".
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patient_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub appointment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Totals for a date range, from the cash summary report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CashSummary {
    pub from: String,
    pub to: String,
    pub total_income: String,
    pub total_expense: String,
    pub net_total: String,
}
