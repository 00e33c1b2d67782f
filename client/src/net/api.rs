//! Typed wrappers for each finance REST endpoint.
//!
//! Each method names its verb, path and payload shape and returns the parsed
//! response envelope. No wrapper has behavior of its own beyond what
//! `ApiClient::execute` provides.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use tokio_util::sync::CancellationToken;

use super::client::{ApiClient, ApiError, ApiRequest};
use super::types::{
    BulkUpload, BulkUploadPreviewResponse, BulkUploadResponse, CreateExpenseRequest, CreateExpenseTypeRequest,
    CreateRecurringExpenseRequest, ExpenseQuery, ExpenseResponse, ExpenseTypeResponse, ExpenseTypesResponse,
    ExpensesResponse, LoginRequest, LoginResponse, MessageEnvelope, PageQuery, RecurringExpenseResponse,
    RecurringExpensesResponse, SummaryQuery, SummaryResponse, UpdateExpenseRequest, UpdateExpenseTypeRequest,
    UpdateRecurringExpenseRequest,
};

pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const EXPENSE_TYPES_PATH: &str = "/expense-types";
pub const EXPENSES_PATH: &str = "/expenses";
pub const EXPENSE_SUMMARY_PATH: &str = "/expenses/summary";
pub const RECURRING_EXPENSES_PATH: &str = "/recurring-expenses";
pub const BULK_UPLOAD_PREVIEW_PATH: &str = "/bulk-upload/preview";
pub const BULK_UPLOAD_CONFIRM_PATH: &str = "/bulk-upload/confirm";

fn expense_type_path(id: &str) -> String {
    format!("{EXPENSE_TYPES_PATH}/{}", urlencoding::encode(id))
}

fn expense_path(id: &str) -> String {
    format!("{EXPENSES_PATH}/{}", urlencoding::encode(id))
}

fn recurring_expense_path(id: &str) -> String {
    format!("{RECURRING_EXPENSES_PATH}/{}", urlencoding::encode(id))
}

fn bulk_upload_request(path: &str, upload: &BulkUpload) -> ApiRequest {
    ApiRequest::post(path).multipart(
        vec![("type".to_owned(), upload.kind.as_str().to_owned())],
        vec![("file".to_owned(), upload.file.clone())],
    )
}

impl ApiClient {
    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on transport failure, error status, or an
    /// unexpected body.
    pub async fn login(&self, credentials: &LoginRequest, cancel: &CancellationToken) -> Result<LoginResponse, ApiError> {
        self.execute(ApiRequest::post(LOGIN_PATH).json(credentials)?, cancel).await
    }

    /// `POST /auth/logout`, authorized with `token` rather than storage so it
    /// can run after the local session has been cleared.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure; callers treat it as best-effort.
    pub async fn logout(&self, token: Option<String>, cancel: &CancellationToken) -> Result<MessageEnvelope, ApiError> {
        // Never falls back to storage, which may already hold a newer session.
        let request = ApiRequest::post(LOGOUT_PATH).bearer(token.unwrap_or_default());
        self.execute(request, cancel).await
    }

    // =========================================================================
    // EXPENSE TYPES
    // =========================================================================

    /// `GET /expense-types`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn list_expense_types(&self, cancel: &CancellationToken) -> Result<ExpenseTypesResponse, ApiError> {
        self.execute(ApiRequest::get(EXPENSE_TYPES_PATH), cancel).await
    }

    /// `GET /expense-types/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn get_expense_type(&self, id: &str, cancel: &CancellationToken) -> Result<ExpenseTypeResponse, ApiError> {
        self.execute(ApiRequest::get(expense_type_path(id)), cancel).await
    }

    /// `POST /expense-types`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn create_expense_type(
        &self,
        body: &CreateExpenseTypeRequest,
        cancel: &CancellationToken,
    ) -> Result<ExpenseTypeResponse, ApiError> {
        self.execute(ApiRequest::post(EXPENSE_TYPES_PATH).json(body)?, cancel).await
    }

    /// `PUT /expense-types/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn update_expense_type(
        &self,
        id: &str,
        body: &UpdateExpenseTypeRequest,
        cancel: &CancellationToken,
    ) -> Result<ExpenseTypeResponse, ApiError> {
        self.execute(ApiRequest::put(expense_type_path(id)).json(body)?, cancel).await
    }

    /// `DELETE /expense-types/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn delete_expense_type(&self, id: &str, cancel: &CancellationToken) -> Result<MessageEnvelope, ApiError> {
        self.execute(ApiRequest::delete(expense_type_path(id)), cancel).await
    }

    // =========================================================================
    // EXPENSES
    // =========================================================================

    /// `GET /expenses` with optional filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn list_expenses(&self, query: &ExpenseQuery, cancel: &CancellationToken) -> Result<ExpensesResponse, ApiError> {
        self.execute(ApiRequest::get(EXPENSES_PATH).query(query), cancel).await
    }

    /// `GET /expenses/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn get_expense(&self, id: &str, cancel: &CancellationToken) -> Result<ExpenseResponse, ApiError> {
        self.execute(ApiRequest::get(expense_path(id)), cancel).await
    }

    /// `POST /expenses`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn create_expense(&self, body: &CreateExpenseRequest, cancel: &CancellationToken) -> Result<ExpenseResponse, ApiError> {
        self.execute(ApiRequest::post(EXPENSES_PATH).json(body)?, cancel).await
    }

    /// `PUT /expenses/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn update_expense(
        &self,
        id: &str,
        body: &UpdateExpenseRequest,
        cancel: &CancellationToken,
    ) -> Result<ExpenseResponse, ApiError> {
        self.execute(ApiRequest::put(expense_path(id)).json(body)?, cancel).await
    }

    /// `DELETE /expenses/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn delete_expense(&self, id: &str, cancel: &CancellationToken) -> Result<MessageEnvelope, ApiError> {
        self.execute(ApiRequest::delete(expense_path(id)), cancel).await
    }

    /// `GET /expenses/summary` for `date_from..date_to`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn expense_summary(&self, query: &SummaryQuery, cancel: &CancellationToken) -> Result<SummaryResponse, ApiError> {
        self.execute(ApiRequest::get(EXPENSE_SUMMARY_PATH).query(query), cancel).await
    }

    // =========================================================================
    // RECURRING EXPENSES
    // =========================================================================

    /// `GET /recurring-expenses`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn list_recurring_expenses(
        &self,
        query: &PageQuery,
        cancel: &CancellationToken,
    ) -> Result<RecurringExpensesResponse, ApiError> {
        self.execute(ApiRequest::get(RECURRING_EXPENSES_PATH).query(query), cancel).await
    }

    /// `POST /recurring-expenses`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn create_recurring_expense(
        &self,
        body: &CreateRecurringExpenseRequest,
        cancel: &CancellationToken,
    ) -> Result<RecurringExpenseResponse, ApiError> {
        self.execute(ApiRequest::post(RECURRING_EXPENSES_PATH).json(body)?, cancel).await
    }

    /// `PUT /recurring-expenses/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn update_recurring_expense(
        &self,
        id: &str,
        body: &UpdateRecurringExpenseRequest,
        cancel: &CancellationToken,
    ) -> Result<RecurringExpenseResponse, ApiError> {
        self.execute(ApiRequest::put(recurring_expense_path(id)).json(body)?, cancel).await
    }

    /// `DELETE /recurring-expenses/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn delete_recurring_expense(&self, id: &str, cancel: &CancellationToken) -> Result<MessageEnvelope, ApiError> {
        self.execute(ApiRequest::delete(recurring_expense_path(id)), cancel).await
    }

    // =========================================================================
    // BULK UPLOAD
    // =========================================================================

    /// `POST /bulk-upload/preview` (multipart `file` + `type`).
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn bulk_upload_preview(
        &self,
        upload: &BulkUpload,
        cancel: &CancellationToken,
    ) -> Result<BulkUploadPreviewResponse, ApiError> {
        self.execute(bulk_upload_request(BULK_UPLOAD_PREVIEW_PATH, upload), cancel).await
    }

    /// `POST /bulk-upload/confirm` (multipart `file` + `type`).
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` on any failure.
    pub async fn bulk_upload_confirm(&self, upload: &BulkUpload, cancel: &CancellationToken) -> Result<BulkUploadResponse, ApiError> {
        self.execute(bulk_upload_request(BULK_UPLOAD_CONFIRM_PATH, upload), cancel).await
    }
}
