use chrono::{NaiveDate, NaiveTime};

use crate::calendar::{parse_date, CalendarError};
use crate::types::RecordId;

/// Planning horizon of a goal, from coarsest to finest.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum GoalHorizon {
    Yearly,
    Monthly,
    Weekly
}

impl GoalHorizon {
    /// The horizon a sub-goal of this horizon must have.
    pub fn child(self) -> Option<GoalHorizon> {
        match self {
            GoalHorizon::Yearly => Some(GoalHorizon::Monthly),
            GoalHorizon::Monthly => Some(GoalHorizon::Weekly),
            GoalHorizon::Weekly => None
        }
    }

    /// Turns planner input into a target date: `2026` for a yearly goal,
    /// `2026-02` for a monthly goal and a full date for a weekly goal.
    pub fn target_date(self, input: &str) -> Result<NaiveDate, CalendarError> {
        let input = input.trim();

        let full_date = match self {
            GoalHorizon::Yearly => format!("{input}-01-01"),
            GoalHorizon::Monthly => format!("{input}-01"),
            GoalHorizon::Weekly => input.to_string()
        };

        parse_date(&full_date).map_err(|_| CalendarError::InvalidDate(input.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub goal_id: RecordId,
    pub title: String,
    pub horizon: GoalHorizon,
    pub parent_id: Option<RecordId>,
    pub target_date: NaiveDate,
    pub is_completed: bool
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub horizon: GoalHorizon,
    pub parent_id: Option<RecordId>,
    /// Raw target as typed; normalised by [`GoalHorizon::target_date`].
    pub target: String
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleItem {
    pub item_id: RecordId,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub task: String,
    pub is_completed: bool
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleItemDraft {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub task: String
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateItem {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub task: String
}

/// A reusable day layout saved from an existing schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTemplate {
    pub template_id: RecordId,
    pub name: String,
    pub items: Vec<TemplateItem>
}
