use anyhow::Result;
use std::path::PathBuf;

use crate::models::{Ledger, Record};
use crate::store::LedgerStore;
use crate::tracker::Tracker;
use crate::ui::forms::{Form, FormKind, Submission};
use crate::ui::pager::Pager;
use crate::ui::util::format_money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Form,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Form => write!(f, "INPUT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteRecord { id: String, description: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // History
    pub(crate) pager: Pager,
    /// Row of the highlighted record within the current page.
    pub(crate) cursor: usize,

    pub(crate) form: Option<Form>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    pub(crate) export_dir: PathBuf,
}

impl App {
    pub(crate) fn new(export_dir: PathBuf) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            pager: Pager::default(),
            cursor: 0,

            form: None,

            pending_action: None,
            confirm_message: String::new(),

            export_dir,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    // ── History navigation ───────────────────────────────────

    pub(crate) fn selected_record<'a>(&self, ledger: &'a Ledger) -> Option<&'a Record> {
        self.pager.slice(ledger.records()).get(self.cursor)
    }

    /// Re-clamp page and cursor after the record list changed size.
    pub(crate) fn sync(&mut self, ledger: &Ledger) {
        self.pager.clamp(ledger.len());
        let rows = self.pager.range(ledger.len()).len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    pub(crate) fn move_down(&mut self, ledger: &Ledger) {
        let rows = self.pager.range(ledger.len()).len();
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub(crate) fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn next_page(&mut self, ledger: &Ledger) {
        if self.pager.has_next(ledger.len()) {
            self.pager.next(ledger.len());
            self.cursor = 0;
        }
    }

    pub(crate) fn prev_page(&mut self) {
        if self.pager.has_prev() {
            self.pager.prev();
            self.cursor = 0;
        }
    }

    pub(crate) fn go_to_page(&mut self, page: usize, ledger: &Ledger) {
        self.pager.go_to(page, ledger.len());
        self.cursor = 0;
    }

    // ── Forms ────────────────────────────────────────────────

    pub(crate) fn open_form(&mut self, kind: FormKind) {
        self.form = Some(Form::new(kind));
        self.input_mode = InputMode::Form;
    }

    pub(crate) fn close_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    /// Submit the open form. An invalid form stays open with focus moved to
    /// the field that needs fixing.
    pub(crate) fn submit_form<S: LedgerStore>(&mut self, tracker: &mut Tracker<S>) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        match form.submit() {
            Some(submission) => {
                self.close_form();
                self.apply(submission, tracker)
            }
            None => {
                form.attempted = true;
                if let Some(field) = form.first_invalid() {
                    form.focus = field;
                }
                Ok(())
            }
        }
    }

    pub(crate) fn apply<S: LedgerStore>(
        &mut self,
        submission: Submission,
        tracker: &mut Tracker<S>,
    ) -> Result<()> {
        match submission {
            Submission::InitialBalance(amount) => {
                tracker.set_initial_balance(amount)?;
                self.set_status(format!("Balance set to {}", format_money(amount)));
            }
            Submission::Expense {
                description,
                amount,
            } => {
                if let Some(record) = tracker.add_expense(&description, amount)? {
                    self.show_newest();
                    self.set_status(format!(
                        "Added: {} {}",
                        record.description,
                        record.display_amount()
                    ));
                }
            }
            Submission::TopUp(amount) => {
                let record = tracker.top_up(amount)?;
                self.show_newest();
                self.set_status(format!("Topped up {}", record.display_amount()));
            }
        }
        self.sync(tracker.ledger());
        Ok(())
    }

    fn show_newest(&mut self) {
        self.pager = Pager::default();
        self.cursor = 0;
    }

    // ── Deletion ─────────────────────────────────────────────

    /// Ask for confirmation before deleting the highlighted record.
    pub(crate) fn request_delete(&mut self, ledger: &Ledger) {
        let Some(record) = self.selected_record(ledger) else {
            self.set_status("No record selected");
            return;
        };
        self.confirm_message = format!(
            "Delete '{}' ({})?",
            record.description,
            record.display_amount()
        );
        self.pending_action = Some(PendingAction::DeleteRecord {
            id: record.id.clone(),
            description: record.description.clone(),
        });
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn confirm<S: LedgerStore>(&mut self, tracker: &mut Tracker<S>) -> Result<()> {
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        if let Some(PendingAction::DeleteRecord { id, description }) = self.pending_action.take() {
            let removed = tracker.remove_record(&id);
            // The record leaves the ledger even when the save fails.
            self.sync(tracker.ledger());
            if removed?.is_some() {
                self.set_status(format!("Deleted: {description}"));
            } else {
                self.set_status("Record no longer exists");
            }
        }
        Ok(())
    }

    pub(crate) fn cancel_confirm(&mut self) {
        self.pending_action = None;
        self.input_mode = InputMode::Normal;
        self.confirm_message.clear();
        self.set_status("Cancelled");
    }

    // ── Export ───────────────────────────────────────────────

    pub(crate) fn export(&mut self, ledger: &Ledger, dir: Option<PathBuf>) -> Result<()> {
        let dir = dir.unwrap_or_else(|| self.export_dir.clone());
        let path = crate::export::export_to_dir(ledger.records(), &dir)?;
        self.set_status(format!(
            "Exported {} records to {}",
            ledger.len(),
            path.display()
        ));
        Ok(())
    }
}
