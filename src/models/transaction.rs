//! Transaction model
//!
//! A transaction is one row of the `Movimentacoes` sheet. `kind` and `status`
//! keep the raw sheet text; the typed views below decide how strictly that
//! text is matched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Category used for paying a card bill; excluded from budget tracking so the
/// card purchases are not counted twice.
pub const CARD_BILL_PAYMENT_CATEGORY: &str = "Pagamento de Fatura";

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// "Receita"
    Income,
    /// "Despesa"
    Expense,
}

impl TransactionKind {
    /// Exact match against the sheet labels
    pub fn parse_exact(raw: &str) -> Option<Self> {
        match raw {
            "Receita" => Some(Self::Income),
            "Despesa" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Trimmed, case-folded match against the sheet labels
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "receita" => Some(Self::Income),
            "despesa" => Some(Self::Expense),
            _ => None,
        }
    }

    /// The sheet label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Receita",
            Self::Expense => "Despesa",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Settlement status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// "Pago": money has moved
    Paid,
    /// "Pendente": still to be paid
    Pending,
    /// "Faturado": billed on a card statement
    Billed,
}

impl TransactionStatus {
    /// Exact match against the sheet labels
    pub fn parse_exact(raw: &str) -> Option<Self> {
        match raw {
            "Pago" => Some(Self::Paid),
            "Pendente" => Some(Self::Pending),
            "Faturado" => Some(Self::Billed),
            _ => None,
        }
    }

    /// Trimmed, case-folded match against the sheet labels
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pago" => Some(Self::Paid),
            "pendente" => Some(Self::Pending),
            "faturado" => Some(Self::Billed),
            _ => None,
        }
    }

    /// Paid or billed: the money is committed
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Paid | Self::Billed)
    }

    /// The sheet label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Pago",
            Self::Pending => "Pendente",
            Self::Billed => "Faturado",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which of the two transaction dates a view filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBasis {
    /// When the transaction was incurred
    Movement,
    /// When the money settled
    Payment,
}

/// A financial transaction as imported from the spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Source-assigned identifier
    pub id: String,

    /// Date the transaction was incurred
    pub movement_date: Option<NaiveDate>,

    /// Date the money actually moved
    pub payment_date: Option<NaiveDate>,

    /// Raw "Tipo" text ("Receita" / "Despesa")
    pub kind: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Always non-negative; the sign comes from `kind`
    pub amount: Money,

    /// Card name for card purchases, otherwise free text
    #[serde(default)]
    pub payment_method: String,

    /// Counterparty account, when the sheet names one
    #[serde(default)]
    pub counterparty_account: Option<String>,

    /// "À Vista" or an installment/credit form
    #[serde(default)]
    pub payment_form: String,

    #[serde(default)]
    pub installment_number: String,

    /// Raw "Situação" text ("Pago" / "Pendente" / "Faturado")
    #[serde(default)]
    pub status: String,

    /// `YYYY-MM` billing cycle for card purchases
    #[serde(default)]
    pub payment_reference: String,

    #[serde(default)]
    pub movement_reference: String,

    #[serde(default)]
    pub classification_hint: String,

    /// Pre-computed week label such as "Semana 3"
    #[serde(default)]
    pub week_of_month: String,
}

impl Transaction {
    /// Create a transaction with the fields every report reads; the rest are empty
    pub fn new(id: impl Into<String>, kind: TransactionKind, amount: Money) -> Self {
        Self {
            id: id.into(),
            movement_date: None,
            payment_date: None,
            kind: kind.label().to_string(),
            category: String::new(),
            description: String::new(),
            amount,
            payment_method: String::new(),
            counterparty_account: None,
            payment_form: String::new(),
            installment_number: String::new(),
            status: String::new(),
            payment_reference: String::new(),
            movement_reference: String::new(),
            classification_hint: String::new(),
            week_of_month: String::new(),
        }
    }

    /// Typed kind, matched exactly
    pub fn kind_exact(&self) -> Option<TransactionKind> {
        TransactionKind::parse_exact(&self.kind)
    }

    /// Typed kind, matched after trimming and case folding
    pub fn kind_lenient(&self) -> Option<TransactionKind> {
        TransactionKind::parse_lenient(&self.kind)
    }

    /// Typed status, matched exactly
    pub fn status_exact(&self) -> Option<TransactionStatus> {
        TransactionStatus::parse_exact(&self.status)
    }

    /// Typed status, matched after trimming and case folding
    pub fn status_lenient(&self) -> Option<TransactionStatus> {
        TransactionStatus::parse_lenient(&self.status)
    }

    /// The date a view filters on
    pub fn date_for(&self, basis: DateBasis) -> Option<NaiveDate> {
        match basis {
            DateBasis::Movement => self.movement_date,
            DateBasis::Payment => self.payment_date,
        }
    }

    /// Is this a card bill payment?
    pub fn is_card_bill_payment(&self) -> bool {
        self.category == CARD_BILL_PAYMENT_CATEGORY
    }

    /// Numeric value of the id, 0 when it is not a number
    pub fn numeric_id(&self) -> i64 {
        self.id.trim().parse().unwrap_or(0)
    }

    /// Builder: set the movement date
    pub fn with_movement_date(mut self, date: NaiveDate) -> Self {
        self.movement_date = Some(date);
        self
    }

    /// Builder: set the payment date
    pub fn with_payment_date(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date);
        self
    }

    /// Builder: set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder: set the raw status text
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder: set the payment method (card name)
    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    /// Builder: set the billing reference
    pub fn with_payment_reference(mut self, reference: impl Into<String>) -> Self {
        self.payment_reference = reference.into();
        self
    }

    /// Builder: set the week label
    pub fn with_week_label(mut self, label: impl Into<String>) -> Self {
        self.week_of_month = label.into();
        self
    }

    /// Builder: set the payment form
    pub fn with_payment_form(mut self, form: impl Into<String>) -> Self {
        self.payment_form = form.into();
        self
    }

    /// Builder: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .movement_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "--/--/----".to_string());
        write!(
            f,
            "{} {} {} {}",
            date, self.category, self.description, self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matching() {
        assert_eq!(TransactionKind::parse_exact("Despesa"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse_exact(" despesa "), None);
        assert_eq!(
            TransactionKind::parse_lenient(" despesa "),
            Some(TransactionKind::Expense)
        );
        assert_eq!(TransactionKind::parse_lenient("Transferência"), None);
    }

    #[test]
    fn test_status_matching() {
        assert_eq!(TransactionStatus::parse_exact("Pago"), Some(TransactionStatus::Paid));
        assert_eq!(TransactionStatus::parse_exact("pago"), None);
        assert_eq!(
            TransactionStatus::parse_lenient("  FATURADO"),
            Some(TransactionStatus::Billed)
        );
        assert!(TransactionStatus::Billed.is_settled());
        assert!(!TransactionStatus::Pending.is_settled());
    }

    #[test]
    fn test_date_for_basis() {
        let movement = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let payment = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let txn = Transaction::new("1", TransactionKind::Expense, Money::from_units(10))
            .with_movement_date(movement)
            .with_payment_date(payment);

        assert_eq!(txn.date_for(DateBasis::Movement), Some(movement));
        assert_eq!(txn.date_for(DateBasis::Payment), Some(payment));
    }

    #[test]
    fn test_numeric_id() {
        let txn = Transaction::new("42", TransactionKind::Income, Money::zero());
        assert_eq!(txn.numeric_id(), 42);
        let txn = Transaction::new("abc", TransactionKind::Income, Money::zero());
        assert_eq!(txn.numeric_id(), 0);
    }

    #[test]
    fn test_serde_dates_round_trip_as_iso() {
        let txn = Transaction::new("7", TransactionKind::Expense, Money::from_cents(1999))
            .with_payment_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"payment_date\":\"2024-07-01\""));
        assert!(json.contains("\"movement_date\":null"));

        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, txn);
    }
}
