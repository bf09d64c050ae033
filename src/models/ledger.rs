use chrono::NaiveDate;

use crate::models::errors::LedgerError;
use crate::models::{
    Budget, BudgetDraft, Collection, Goal, GoalDraft, LedgerCommand, Rule, RuleDraft, ScheduleItem,
    ScheduleItemDraft, ScheduleTemplate, TemplateItem, Transaction, TransactionDraft, TransactionQuery,
    TransactionType, TransferDraft
};
use crate::types::{OwnerId, RecordId, TransactionId};

const TRANSFER_CATEGORY: &str = "Transfer";

/// Every row one owner has across the ledger's collections.
///
/// All mutation goes through [`OwnerLedger::apply`], which either applies a
/// command completely and bumps the revision, or leaves the ledger untouched
/// and returns the reason.
#[derive(Debug, Clone)]
pub struct OwnerLedger {
    /// The owner every row in this ledger belongs to.
    pub owner_id: OwnerId,
    /// Incremented after every successful command; used to key cached reports.
    revision: u64,
    /// Last identifier handed out, shared by all collections.
    last_id: u32,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    rules: Vec<Rule>,
    goals: Vec<Goal>,
    schedule: Vec<ScheduleItem>,
    templates: Vec<ScheduleTemplate>
}

impl OwnerLedger {
    pub fn new(owner_id: impl Into<OwnerId>) -> Self {
        Self {
            owner_id: owner_id.into(),
            revision: 0,
            last_id: 0,
            transactions: Vec::new(),
            budgets: Vec::new(),
            rules: Vec::new(),
            goals: Vec::new(),
            schedule: Vec::new(),
            templates: Vec::new()
        }
    }

    /// Applies a single command to the ledger.
    ///
    /// # Errors
    /// Returns `LedgerError` if:
    /// - A referenced transaction or record does not exist.
    /// - A transfer moves money to its own account, or a single transfer row is created.
    /// - A goal is nested under a parent of the wrong horizon or has an invalid target.
    /// - A schedule item ends before it starts, or a required text field is empty.
    pub fn apply(&mut self, command: LedgerCommand) -> Result<(), LedgerError> {
        let result = match command {
            LedgerCommand::CreateTransaction(draft) => self.create_transaction(draft),
            LedgerCommand::ReplaceTransaction { transaction_id, draft } => self.replace_transaction(transaction_id, draft),
            LedgerCommand::DeleteTransaction(transaction_id) => self.delete_transaction(transaction_id),
            LedgerCommand::Transfer(draft) => self.transfer(draft),
            LedgerCommand::CreateBudget(draft) => self.create_budget(draft),
            LedgerCommand::DeleteBudget(budget_id) => self.delete_budget(budget_id),
            LedgerCommand::CreateRule(draft) => self.create_rule(draft),
            LedgerCommand::DeleteRule(rule_id) => self.delete_rule(rule_id),
            LedgerCommand::CreateGoal(draft) => self.create_goal(draft),
            LedgerCommand::ToggleGoal(goal_id) => self.toggle_goal(goal_id),
            LedgerCommand::DeleteGoal(goal_id) => self.delete_goal(goal_id),
            LedgerCommand::ScheduleTask(draft) => self.schedule_task(draft),
            LedgerCommand::ToggleTask(item_id) => self.toggle_task(item_id),
            LedgerCommand::DeleteTask(item_id) => self.delete_task(item_id),
            LedgerCommand::SaveTemplate { name, date } => self.save_template(name, date),
            LedgerCommand::ApplyTemplate { template_id, date } => self.apply_template(template_id, date)
        };

        if result.is_ok() {
            self.revision += 1;
        }

        result
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction(&self, transaction_id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|transaction| transaction.transaction_id == transaction_id)
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn templates(&self) -> &[ScheduleTemplate] {
        &self.templates
    }

    /// The transaction log: matching entries, newest first.
    pub fn search(&self, query: &TransactionQuery) -> Vec<&Transaction> {
        let mut matches: Vec<&Transaction> = self.transactions.iter()
            .filter(|transaction| query.matches(transaction))
            .collect();

        matches.sort_by(|left, right| right.date.cmp(&left.date));
        matches
    }

    /// Goals ordered by target date, then by creation order.
    pub fn goals(&self) -> Vec<&Goal> {
        let mut goals: Vec<&Goal> = self.goals.iter().collect();
        goals.sort_by_key(|goal| (goal.target_date, goal.goal_id));
        goals
    }

    /// Direct sub-goals of `parent_id`, or the top-level goals for `None`.
    pub fn child_goals(&self, parent_id: Option<RecordId>) -> Vec<&Goal> {
        self.goals().into_iter()
            .filter(|goal| goal.parent_id == parent_id)
            .collect()
    }

    /// The schedule for one day, ordered by start time.
    pub fn schedule_for(&self, date: NaiveDate) -> Vec<&ScheduleItem> {
        let mut items: Vec<&ScheduleItem> = self.schedule.iter()
            .filter(|item| item.date == date)
            .collect();

        items.sort_by_key(|item| (item.start, item.item_id));
        items
    }

    /// Percentage of the day's items that are completed, rounded half up.
    pub fn day_progress(&self, date: NaiveDate) -> u8 {
        let items = self.schedule_for(date);

        if items.is_empty() {
            return 0;
        }

        let total = items.len();
        let completed = items.iter().filter(|item| item.is_completed).count();
        let percent = (completed * 200 + total) / (2 * total);

        u8::try_from(percent).unwrap_or(100)
    }

    fn next_id(&mut self) -> u32 {
        self.last_id += 1;
        self.last_id
    }

    fn create_transaction(&mut self, draft: TransactionDraft) -> Result<(), LedgerError> {
        if draft.transaction_type == TransactionType::Transfer {
            return Err(LedgerError::unpaired_transfer(self));
        }

        let transaction_id = self.next_id();

        self.transactions.push(Transaction {
            transaction_id,
            owner_id: self.owner_id.clone(),
            transaction_type: draft.transaction_type,
            amount: draft.amount.value(),
            category: draft.category,
            account: draft.account,
            is_initial: draft.is_initial,
            date: draft.date,
            description: draft.description,
            frequency: draft.frequency,
            transfer_id: None
        });

        Ok(())
    }

    fn replace_transaction(&mut self, transaction_id: TransactionId, draft: TransactionDraft) -> Result<(), LedgerError> {
        let Some(index) = self.transactions.iter().position(|transaction| transaction.transaction_id == transaction_id) else {
            return Err(LedgerError::transaction_not_found(self, transaction_id));
        };

        let existing = &self.transactions[index];

        // A transfer leg stays a signed leg of the same transfer; anything else is a plain entry.
        let (amount, transfer_id) = match (draft.transaction_type, existing.transfer_id) {
            (TransactionType::Transfer, Some(transfer_id)) if existing.amount.is_sign_negative() => (-draft.amount.value(), Some(transfer_id)),
            (TransactionType::Transfer, Some(transfer_id)) => (draft.amount.value(), Some(transfer_id)),
            (TransactionType::Transfer, None) => return Err(LedgerError::unpaired_transfer(self)),
            (_, _) => (draft.amount.value(), None)
        };

        self.transactions[index] = Transaction {
            transaction_id,
            owner_id: self.owner_id.clone(),
            transaction_type: draft.transaction_type,
            amount,
            category: draft.category,
            account: draft.account,
            is_initial: draft.is_initial,
            date: draft.date,
            description: draft.description,
            frequency: draft.frequency,
            transfer_id
        };

        Ok(())
    }

    fn delete_transaction(&mut self, transaction_id: TransactionId) -> Result<(), LedgerError> {
        let before = self.transactions.len();
        self.transactions.retain(|transaction| transaction.transaction_id != transaction_id);

        if self.transactions.len() == before {
            return Err(LedgerError::transaction_not_found(self, transaction_id));
        }

        Ok(())
    }

    fn transfer(&mut self, draft: TransferDraft) -> Result<(), LedgerError> {
        if draft.from_account == draft.to_account {
            return Err(LedgerError::same_account_transfer(self, &draft.from_account));
        }

        let transfer_id = self.next_id();
        let withdrawal_id = self.next_id();
        let deposit_id = self.next_id();
        let amount = draft.amount.value();

        let withdrawal_description = draft.description.clone()
            .unwrap_or_else(|| format!("Transfer to {}", draft.to_account));
        let deposit_description = draft.description
            .unwrap_or_else(|| format!("Transfer from {}", draft.from_account));

        let leg = |transaction_id, amount, account: String, description: String| Transaction {
            transaction_id,
            owner_id: self.owner_id.clone(),
            transaction_type: TransactionType::Transfer,
            amount,
            category: TRANSFER_CATEGORY.to_string(),
            account,
            is_initial: false,
            date: draft.date,
            description: Some(description),
            frequency: None,
            transfer_id: Some(transfer_id)
        };

        let withdrawal = leg(withdrawal_id, -amount, draft.from_account, withdrawal_description);
        let deposit = leg(deposit_id, amount, draft.to_account, deposit_description);

        self.transactions.push(withdrawal);
        self.transactions.push(deposit);

        Ok(())
    }

    fn create_budget(&mut self, draft: BudgetDraft) -> Result<(), LedgerError> {
        if draft.category.trim().is_empty() {
            return Err(LedgerError::empty_field(self, "category"));
        }

        let budget_id = self.next_id();

        self.budgets.push(Budget {
            budget_id,
            category: draft.category,
            limit: draft.limit,
            period: draft.period
        });

        Ok(())
    }

    fn delete_budget(&mut self, budget_id: RecordId) -> Result<(), LedgerError> {
        let before = self.budgets.len();
        self.budgets.retain(|budget| budget.budget_id != budget_id);

        if self.budgets.len() == before {
            return Err(LedgerError::record_not_found(self, Collection::Budgets, budget_id));
        }

        Ok(())
    }

    fn create_rule(&mut self, draft: RuleDraft) -> Result<(), LedgerError> {
        if draft.target.to_string().is_empty() {
            return Err(LedgerError::empty_field(self, "target"));
        }

        let rule_id = self.next_id();

        self.rules.push(Rule {
            rule_id,
            target: draft.target,
            condition: draft.condition,
            value: draft.value,
            value_type: draft.value_type,
            timeframe: draft.timeframe,
            message: draft.message
        });

        Ok(())
    }

    fn delete_rule(&mut self, rule_id: RecordId) -> Result<(), LedgerError> {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.rule_id != rule_id);

        if self.rules.len() == before {
            return Err(LedgerError::record_not_found(self, Collection::Rules, rule_id));
        }

        Ok(())
    }

    fn create_goal(&mut self, draft: GoalDraft) -> Result<(), LedgerError> {
        if draft.title.trim().is_empty() {
            return Err(LedgerError::empty_field(self, "title"));
        }

        if let Some(parent_id) = draft.parent_id {
            let parent = self.goals.iter()
                .find(|goal| goal.goal_id == parent_id)
                .ok_or_else(|| LedgerError::record_not_found(self, Collection::Goals, parent_id))?;

            if parent.horizon.child() != Some(draft.horizon) {
                return Err(LedgerError::invalid_goal_parent(self, parent_id, draft.horizon));
            }
        }

        let target_date = draft.horizon.target_date(&draft.target)
            .map_err(|error| LedgerError::invalid_goal_target(self, error))?;

        let goal_id = self.next_id();

        self.goals.push(Goal {
            goal_id,
            title: draft.title,
            horizon: draft.horizon,
            parent_id: draft.parent_id,
            target_date,
            is_completed: false
        });

        Ok(())
    }

    fn toggle_goal(&mut self, goal_id: RecordId) -> Result<(), LedgerError> {
        let Some(index) = self.goals.iter().position(|goal| goal.goal_id == goal_id) else {
            return Err(LedgerError::record_not_found(self, Collection::Goals, goal_id));
        };

        self.goals[index].is_completed = !self.goals[index].is_completed;

        Ok(())
    }

    fn delete_goal(&mut self, goal_id: RecordId) -> Result<(), LedgerError> {
        if !self.goals.iter().any(|goal| goal.goal_id == goal_id) {
            return Err(LedgerError::record_not_found(self, Collection::Goals, goal_id));
        }

        // Sub-goals go with their parent.
        let mut doomed = vec![goal_id];
        let mut cursor = 0;

        while cursor < doomed.len() {
            let parent_id = doomed[cursor];
            doomed.extend(self.goals.iter()
                .filter(|goal| goal.parent_id == Some(parent_id))
                .map(|goal| goal.goal_id));
            cursor += 1;
        }

        self.goals.retain(|goal| !doomed.contains(&goal.goal_id));

        Ok(())
    }

    fn schedule_task(&mut self, draft: ScheduleItemDraft) -> Result<(), LedgerError> {
        if draft.task.trim().is_empty() {
            return Err(LedgerError::empty_field(self, "task"));
        }

        if draft.end <= draft.start {
            return Err(LedgerError::invalid_time_range(self));
        }

        let item_id = self.next_id();

        self.schedule.push(ScheduleItem {
            item_id,
            date: draft.date,
            start: draft.start,
            end: draft.end,
            task: draft.task,
            is_completed: false
        });

        Ok(())
    }

    fn toggle_task(&mut self, item_id: RecordId) -> Result<(), LedgerError> {
        let Some(index) = self.schedule.iter().position(|item| item.item_id == item_id) else {
            return Err(LedgerError::record_not_found(self, Collection::DailySchedule, item_id));
        };

        self.schedule[index].is_completed = !self.schedule[index].is_completed;

        Ok(())
    }

    fn delete_task(&mut self, item_id: RecordId) -> Result<(), LedgerError> {
        let before = self.schedule.len();
        self.schedule.retain(|item| item.item_id != item_id);

        if self.schedule.len() == before {
            return Err(LedgerError::record_not_found(self, Collection::DailySchedule, item_id));
        }

        Ok(())
    }

    fn save_template(&mut self, name: String, date: NaiveDate) -> Result<(), LedgerError> {
        if name.trim().is_empty() {
            return Err(LedgerError::empty_field(self, "name"));
        }

        let items = self.schedule_for(date).into_iter()
            .map(|item| TemplateItem {
                start: item.start,
                end: item.end,
                task: item.task.clone()
            })
            .collect();

        let template_id = self.next_id();

        self.templates.push(ScheduleTemplate {
            template_id,
            name,
            items
        });

        Ok(())
    }

    fn apply_template(&mut self, template_id: RecordId, date: NaiveDate) -> Result<(), LedgerError> {
        let Some(template) = self.templates.iter().find(|template| template.template_id == template_id) else {
            return Err(LedgerError::record_not_found(self, Collection::ScheduleTemplates, template_id));
        };

        let items = template.items.clone();

        for item in items {
            let item_id = self.next_id();

            self.schedule.push(ScheduleItem {
                item_id,
                date,
                start: item.start,
                end: item.end,
                task: item.task,
                is_completed: false
            });
        }

        Ok(())
    }
}
