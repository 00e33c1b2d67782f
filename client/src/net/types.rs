//! Wire types for the finance REST API.
//!
//! DESIGN
//! ======
//! These mirror the server's JSON shapes field-for-field. Nothing here is
//! computed locally: totals, breakdowns and import validation all arrive
//! pre-computed and are only rendered.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

/// Whether an expense type books money in or out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Expense,
    Income,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

/// Payment instrument recorded on an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "UPI")]
    Upi,
    PhonePe,
    GPay,
    Other,
}

impl PaymentMethod {
    /// Wire/display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::BankTransfer => "Bank Transfer",
            Self::Upi => "UPI",
            Self::PhonePe => "PhonePe",
            Self::GPay => "GPay",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cadence of a recurring expense rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurrenceType {
    Weekly,
    Monthly,
    Yearly,
}

/// Source format of a bulk-upload file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkUploadKind {
    Csv,
    Excel,
    PhonePe,
    GPay,
}

impl BulkUploadKind {
    /// Value sent in the multipart `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::PhonePe => "phonepe",
            Self::GPay => "gpay",
        }
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// An authenticated user as returned by `/auth/login`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Expense/income category definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: String,
    pub category: Category,
    pub name: String,
    /// Emoji or short glyph shown next to the name.
    pub icon: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A single booked transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub expense_type_id: String,
    /// Signed, currency-agnostic amount.
    pub amount: f64,
    /// ISO 8601 date (`YYYY-MM-DD`).
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
    pub created_at: String,
    pub updated_at: String,
    /// Embedded type for display, when the server expands it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<ExpenseType>,
}

/// A rule the server uses to book expenses on a schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: String,
    pub expense_type_id: String,
    pub amount: f64,
    pub recurrence_type: RecurrenceType,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_type: Option<ExpenseType>,
}

/// Partially parsed expense row from a bulk-upload file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseDraft {
    pub id: Option<String>,
    pub expense_type_id: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub note: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub expense_type: Option<ExpenseType>,
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Server-computed aggregate for a date range.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_amount: f64,
    #[serde(default)]
    pub monthly_breakdown: Vec<MonthlyBreakdown>,
    #[serde(default)]
    pub category_breakdown: Vec<CategoryBreakdown>,
}

/// Totals for one calendar month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Share of the range's spending attributed to one category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

// =============================================================================
// BULK UPLOAD
// =============================================================================

/// Dry-run validation result for an uploaded file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadPreview {
    pub total_records: u32,
    pub valid_records: u32,
    pub invalid_records: u32,
    #[serde(default)]
    pub preview_data: Vec<ExpenseDraft>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Outcome of committing an uploaded file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkUploadResult {
    pub total_processed: u32,
    pub successful: u32,
    pub failed: u32,
    #[serde(default)]
    pub failed_records: Vec<FailedRecord>,
}

/// A row the server refused to import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailedRecord {
    pub row: u32,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub data: ExpenseDraft,
}

/// File payload for bulk-upload calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// A file plus the parser the server should apply to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkUpload {
    pub file: UploadFile,
    pub kind: BulkUploadKind,
}

// =============================================================================
// AUTH
// =============================================================================

/// Credentials posted to `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload of a successful login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub user: User,
    /// Opaque bearer token.
    pub token: String,
    /// Server-side expiry. Not enforced client-side.
    pub expires_at: String,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseTypeRequest {
    pub category: Category,
    pub name: String,
    pub icon: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseTypeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub expense_type_id: String,
    pub amount: f64,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateRecurringExpenseRequest {
    pub expense_type_id: String,
    pub amount: f64,
    pub recurrence_type: RecurrenceType,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecurringExpenseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence_type: Option<RecurrenceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// =============================================================================
// QUERIES
// =============================================================================

/// Types that render to URL query pairs. Unset fields produce no pair.
pub trait QueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Filters accepted by `GET /expenses`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub expense_type_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

impl QueryParams for ExpenseQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "page", self.page.map(|v| v.to_string()));
        push_pair(&mut pairs, "per_page", self.per_page.map(|v| v.to_string()));
        push_pair(&mut pairs, "expense_type_id", self.expense_type_id.clone());
        push_pair(&mut pairs, "date_from", self.date_from.clone());
        push_pair(&mut pairs, "date_to", self.date_to.clone());
        push_pair(&mut pairs, "payment_method", self.payment_method.map(|m| m.as_str().to_owned()));
        pairs
    }
}

/// Date range accepted by `GET /expenses/summary`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SummaryQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl QueryParams for SummaryQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "date_from", self.date_from.clone());
        push_pair(&mut pairs, "date_to", self.date_to.clone());
        pairs
    }
}

/// Plain pagination for list endpoints without filters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl QueryParams for PageQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_pair(&mut pairs, "page", self.page.map(|v| v.to_string()));
        push_pair(&mut pairs, "per_page", self.per_page.map(|v| v.to_string()));
        pairs
    }
}

fn push_pair(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value {
        pairs.push((key, value));
    }
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// `{success, message, data}` wrapper used by singular endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// `{success, message, data[], pagination}` wrapper used by list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginatedEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Body-less acknowledgement (logout, deletes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Page cursor metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// `{success:false, message, errors[]}` body returned with error statuses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

pub type LoginResponse = ApiEnvelope<LoginData>;
pub type ExpenseTypeResponse = ApiEnvelope<ExpenseType>;
pub type ExpenseTypesResponse = ApiEnvelope<Vec<ExpenseType>>;
pub type ExpenseResponse = ApiEnvelope<Expense>;
pub type ExpensesResponse = PaginatedEnvelope<Expense>;
pub type SummaryResponse = ApiEnvelope<Summary>;
pub type RecurringExpenseResponse = ApiEnvelope<RecurringExpense>;
pub type RecurringExpensesResponse = PaginatedEnvelope<RecurringExpense>;
pub type BulkUploadPreviewResponse = ApiEnvelope<BulkUploadPreview>;
pub type BulkUploadResponse = ApiEnvelope<BulkUploadResult>;
