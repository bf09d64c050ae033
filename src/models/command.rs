use chrono::NaiveDate;

use crate::models::{BudgetDraft, GoalDraft, RuleDraft, ScheduleItemDraft, TransactionDraft, TransferDraft};
use crate::types::{OwnerId, RecordId, TransactionId};

/// A single mutation of one owner's ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerCommand {
    CreateTransaction(TransactionDraft),
    /// Full replacement of every editable field; ids never change.
    ReplaceTransaction {
        transaction_id: TransactionId,
        draft: TransactionDraft
    },
    DeleteTransaction(TransactionId),
    Transfer(TransferDraft),
    CreateBudget(BudgetDraft),
    DeleteBudget(RecordId),
    CreateRule(RuleDraft),
    DeleteRule(RecordId),
    CreateGoal(GoalDraft),
    ToggleGoal(RecordId),
    DeleteGoal(RecordId),
    ScheduleTask(ScheduleItemDraft),
    ToggleTask(RecordId),
    DeleteTask(RecordId),
    SaveTemplate {
        name: String,
        date: NaiveDate
    },
    ApplyTemplate {
        template_id: RecordId,
        date: NaiveDate
    }
}

impl LedgerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            LedgerCommand::CreateTransaction(_) => "create_transaction",
            LedgerCommand::ReplaceTransaction { .. } => "replace_transaction",
            LedgerCommand::DeleteTransaction(_) => "delete_transaction",
            LedgerCommand::Transfer(_) => "transfer",
            LedgerCommand::CreateBudget(_) => "create_budget",
            LedgerCommand::DeleteBudget(_) => "delete_budget",
            LedgerCommand::CreateRule(_) => "create_rule",
            LedgerCommand::DeleteRule(_) => "delete_rule",
            LedgerCommand::CreateGoal(_) => "create_goal",
            LedgerCommand::ToggleGoal(_) => "toggle_goal",
            LedgerCommand::DeleteGoal(_) => "delete_goal",
            LedgerCommand::ScheduleTask(_) => "schedule_task",
            LedgerCommand::ToggleTask(_) => "toggle_task",
            LedgerCommand::DeleteTask(_) => "delete_task",
            LedgerCommand::SaveTemplate { .. } => "save_template",
            LedgerCommand::ApplyTemplate { .. } => "apply_template"
        }
    }
}

/// A command addressed to one owner's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub owner_id: OwnerId,
    pub command: LedgerCommand
}

impl Submission {
    pub fn new(owner_id: impl Into<OwnerId>, command: LedgerCommand) -> Self {
        Self {
            owner_id: owner_id.into(),
            command
        }
    }
}
