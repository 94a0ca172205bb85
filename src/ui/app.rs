use std::path::PathBuf;
use std::str::FromStr;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::api::{ApiRequest, ApiResponse};
use crate::models::{Category, Expense, NewExpense};

use super::chart::ChartData;

/// How many expenses the list shows: the most recent ones, newest
/// first, matching the server's arrival order reversed.
pub(crate) const VISIBLE_EXPENSES: usize = 8;

/// Notices auto-dismiss after this long unless replaced earlier.
pub(crate) const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NoticeKind {
    Success,
    Error,
}

/// Single-slot transient banner. A new notice replaces the current one
/// along with its dismissal deadline; there is no queue.
#[derive(Debug, Clone)]
pub(crate) struct Notice {
    pub(crate) text: String,
    pub(crate) kind: NoticeKind,
    pub(crate) expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Category,
    Description,
}

/// State of the add-expense form. Values survive a failed submission
/// so the user can correct them; only a server-acknowledged add clears
/// the form.
#[derive(Debug, Clone, Default)]
pub(crate) struct ExpenseForm {
    pub(crate) amount: String,
    pub(crate) category: Option<Category>,
    pub(crate) description: String,
    pub(crate) field: FormField,
}

impl Default for FormField {
    fn default() -> Self {
        Self::Amount
    }
}

impl ExpenseForm {
    /// Minimal required-field check: amount must parse and be nonzero,
    /// category must be chosen. Anything else is the server's call.
    pub(crate) fn validate(&self) -> Option<NewExpense> {
        let amount = Decimal::from_str(self.amount.trim()).ok()?;
        if amount.is_zero() {
            return None;
        }
        let category = self.category.clone()?;
        Some(NewExpense {
            amount,
            category,
            description: self.description.clone(),
        })
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Amount => FormField::Category,
            FormField::Category => FormField::Description,
            FormField::Description => FormField::Amount,
        };
    }

    pub(crate) fn prev_field(&mut self) {
        self.field = match self.field {
            FormField::Amount => FormField::Description,
            FormField::Category => FormField::Amount,
            FormField::Description => FormField::Category,
        };
    }

    pub(crate) fn cycle_category(&mut self, step: isize) {
        let all = Category::all();
        let next = match &self.category {
            None => {
                if step >= 0 {
                    0
                } else {
                    all.len() - 1
                }
            }
            Some(current) => {
                let idx = all.iter().position(|c| c == current).unwrap_or(0) as isize;
                (idx + step).rem_euclid(all.len() as isize) as usize
            }
        };
        self.category = Some(all[next].clone());
    }

    pub(crate) fn input_char(&mut self, c: char) {
        match self.field {
            FormField::Amount => {
                if c.is_ascii_digit() {
                    self.amount.push(c);
                } else if c == '.' || c == ',' {
                    if !self.amount.contains('.') {
                        self.amount.push('.');
                    }
                }
            }
            FormField::Category => {}
            FormField::Description => self.description.push(c),
        }
    }

    pub(crate) fn backspace(&mut self) {
        match self.field {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Category => self.category = None,
            FormField::Description => {
                self.description.pop();
            }
        }
    }
}

/// Delete waiting for the user's confirmation. No request goes out
/// until they confirm.
#[derive(Debug, Clone)]
pub(crate) struct PendingDelete {
    pub(crate) id: i64,
    pub(crate) label: String,
}

/// The expense client controller. Owns the last known server snapshot
/// and every piece of ephemeral UI state; talks to the network side
/// purely through the injected request channel.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) form: ExpenseForm,
    pub(crate) show_help: bool,

    /// Transient snapshot of the server's collection, replaced on
    /// every fetch.
    pub(crate) expenses: Vec<Expense>,
    pub(crate) category_filter: Option<Category>,
    pub(crate) selected: usize,

    /// Total spent, formatted to two decimals; "0.00" until known.
    pub(crate) total_display: String,
    pub(crate) expense_count: usize,
    pub(crate) chart: Option<ChartData>,

    pub(crate) notice: Option<Notice>,
    pub(crate) busy: bool,
    pub(crate) pending_delete: Option<PendingDelete>,
    pub(crate) confirm_message: String,

    api: Sender<ApiRequest>,
}

impl App {
    pub(crate) fn new(api: Sender<ApiRequest>) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            form: ExpenseForm::default(),
            show_help: false,
            expenses: Vec::new(),
            category_filter: None,
            selected: 0,
            total_display: "0.00".into(),
            expense_count: 0,
            chart: None,
            notice: None,
            busy: false,
            pending_delete: None,
            confirm_message: String::new(),
            api,
        }
    }

    fn send(&self, request: ApiRequest) {
        if self.api.send(request).is_err() {
            tracing::error!("api dispatcher is gone");
        }
    }

    // ── Fetch cycle ──────────────────────────────────────────

    /// Kicks off a list fetch. The busy indicator stays up until the
    /// list response lands, success or failure; the stats refresh that
    /// follows a success never re-raises it.
    pub(crate) fn load_expenses(&mut self) {
        self.set_busy(true);
        match &self.category_filter {
            Some(category) => self.send(ApiRequest::FetchByCategory(category.clone())),
            None => self.send(ApiRequest::FetchExpenses),
        }
    }

    pub(crate) fn refresh_stats(&mut self) {
        self.send(ApiRequest::FetchStats);
    }

    pub(crate) fn set_filter(&mut self, category: Option<Category>) {
        self.category_filter = category;
        self.selected = 0;
        self.load_expenses();
    }

    // ── Display policy ───────────────────────────────────────

    /// The most recent [`VISIBLE_EXPENSES`] entries, newest first.
    pub(crate) fn visible_expenses(&self) -> Vec<&Expense> {
        self.expenses.iter().rev().take(VISIBLE_EXPENSES).collect()
    }

    pub(crate) fn selected_expense(&self) -> Option<&Expense> {
        self.visible_expenses().get(self.selected).copied()
    }

    pub(crate) fn move_down(&mut self) {
        let len = self.visible_expenses().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub(crate) fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_expenses().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    // ── Form ─────────────────────────────────────────────────

    pub(crate) fn open_form(&mut self) {
        self.input_mode = InputMode::Editing;
        self.form.field = FormField::Amount;
    }

    pub(crate) fn close_form(&mut self) {
        // Values are kept so a canceled form can be resumed.
        self.input_mode = InputMode::Normal;
    }

    /// Validates and submits the form. Missing required fields show a
    /// validation notice and issue no request at all.
    pub(crate) fn submit_form(&mut self) {
        if self.busy {
            return;
        }
        match self.form.validate() {
            Some(expense) => self.send(ApiRequest::CreateExpense(expense)),
            None => self.notify("Заповніть всі обов'язкові поля", NoticeKind::Error),
        }
    }

    // ── Delete ───────────────────────────────────────────────

    pub(crate) fn request_delete(&mut self) {
        let Some((id, amount)) = self.selected_expense().map(|e| (e.id, e.amount)) else {
            return;
        };
        let label = super::util::format_uah(amount);
        self.confirm_message = format!("Видалити цю витрату? ({label})");
        self.pending_delete = Some(PendingDelete { id, label });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm_pending(&mut self) {
        if let Some(pending) = self.pending_delete.take() {
            tracing::debug!(id = pending.id, amount = %pending.label, "delete confirmed");
            self.send(ApiRequest::DeleteExpense(pending.id));
        }
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn cancel_pending(&mut self) {
        self.pending_delete = None;
        self.input_mode = InputMode::Normal;
    }

    // ── Report ───────────────────────────────────────────────

    pub(crate) fn export_report(&mut self, path: PathBuf) {
        self.send(ApiRequest::ExportReport(path));
    }

    // ── Notices & busy state ─────────────────────────────────

    pub(crate) fn notify(&mut self, text: impl Into<String>, kind: NoticeKind) {
        self.notify_at(text, kind, Instant::now());
    }

    pub(crate) fn notify_at(&mut self, text: impl Into<String>, kind: NoticeKind, now: Instant) {
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            expires_at: now + NOTICE_TTL,
        });
    }

    /// Advances the notice clock; called once per event-loop tick.
    pub(crate) fn tick(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now >= notice.expires_at {
                self.notice = None;
            }
        }
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    // ── Response handling ────────────────────────────────────

    /// Applies a completed request to the UI state. Every failure path
    /// leaves the UI defined: busy cleared, prior list/chart retained
    /// or replaced with an explicit empty state.
    pub(crate) fn handle_response(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Expenses(Ok(expenses)) => {
                self.set_busy(false);
                self.expenses = expenses;
                self.clamp_selection();
                self.refresh_stats();
            }
            ApiResponse::Expenses(Err(error)) => {
                self.set_busy(false);
                tracing::warn!(%error, "expense fetch failed");
                self.notify("Помилка завантаження даних", NoticeKind::Error);
            }
            ApiResponse::Stats(Ok(stats)) => {
                self.total_display = stats.total.display();
                self.expense_count = stats.count;
                // Replaces the previous chart; at most one exists.
                self.chart = ChartData::build(&stats.summary);
            }
            ApiResponse::Stats(Err(error)) => {
                // Non-fatal: the list stays usable with the prior
                // stats and chart on screen.
                tracing::warn!(%error, "stats refresh failed");
            }
            ApiResponse::Created(Ok(expense)) => {
                tracing::info!(id = expense.id, "expense created");
                self.notify("Витрату успішно додано!", NoticeKind::Success);
                self.form.clear();
                self.input_mode = InputMode::Normal;
                self.load_expenses();
            }
            ApiResponse::Created(Err(error)) => {
                tracing::warn!(%error, "expense create failed");
                let message = if error.is_connection() {
                    "Помилка з'єднання"
                } else {
                    "Помилка при додаванні витрати"
                };
                self.notify(message, NoticeKind::Error);
            }
            ApiResponse::Deleted(Ok(())) => {
                self.notify("Витрату видалено", NoticeKind::Success);
                self.load_expenses();
            }
            ApiResponse::Deleted(Err(error)) => {
                tracing::warn!(%error, "expense delete failed");
                let message = if error.is_connection() {
                    "Помилка з'єднання"
                } else {
                    "Помилка при видаленні"
                };
                self.notify(message, NoticeKind::Error);
            }
            ApiResponse::ReportSaved(Ok(path)) => {
                self.notify(
                    format!("Звіт збережено: {}", path.display()),
                    NoticeKind::Success,
                );
            }
            ApiResponse::ReportSaved(Err(error)) => {
                tracing::warn!(%error, "report export failed");
                let message = if error.is_connection() {
                    "Помилка з'єднання"
                } else {
                    "Помилка при створенні звіту"
                };
                self.notify(message, NoticeKind::Error);
            }
        }
    }
}
