//! Frontend Models
//!
//! Data structures matching backend entities and request bodies.
//! Keys are camelCase on the wire; optional fields tolerate `null` or absence.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ========================
// Users
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Client,
    #[default]
    Dev,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Client, UserRole::Dev];

    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Client => "CLIENT",
            UserRole::Dev => "DEV",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserRole::Admin => "Administrator",
            UserRole::Client => "Client",
            UserRole::Dev => "Developer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

/// Account record (also the signed-in user)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
}

/// Lightweight user reference embedded in projects and tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl Member {
    /// First letter of the name for avatar badges
    pub fn initial(&self) -> String {
        self.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub login_id: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Account,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccountRequest {
    pub name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// ========================
// Projects
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Review,
    Done,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Review,
        ProjectStatus::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "PLANNING",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Review => "REVIEW",
            ProjectStatus::Done => "DONE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Review => "In review",
            ProjectStatus::Done => "Done",
        }
    }

    /// CSS modifier for status chips
    pub fn tone(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "info",
            ProjectStatus::InProgress => "primary",
            ProjectStatus::Review => "warning",
            ProjectStatus::Done => "success",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub team: Vec<Member>,
    #[serde(default)]
    pub github_repo: Option<String>,
    #[serde(default)]
    pub github_branch: Option<String>,
    #[serde(default)]
    pub github_token: Option<String>,
    #[serde(default)]
    pub backup_config: Option<String>,
    #[serde(default)]
    pub file_location: Option<String>,
}

impl Project {
    /// Case-insensitive search over title and client
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.title.to_lowercase().contains(&query)
            || self.client.to_lowercase().contains(&query)
    }
}

/// Number of projects in each status, in status order
pub fn count_by_status(projects: &[Project]) -> Vec<(ProjectStatus, usize)> {
    ProjectStatus::ALL
        .into_iter()
        .map(|status| (status, projects.iter().filter(|p| p.status == status).count()))
        .collect()
}

/// Create/update body for projects
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub title: String,
    pub client: String,
    pub budget: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub description: String,
    pub team_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_github_repo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_private: Option<bool>,
}

impl ProjectRequest {
    /// Pre-fill an edit form from an existing project
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            client: project.client.clone(),
            budget: project.budget,
            start_date: project.start_date,
            end_date: project.end_date,
            status: project.status,
            description: project.description.clone().unwrap_or_default(),
            team_ids: project.team.iter().map(|m| m.id.clone()).collect(),
            github_repo: project.github_repo.clone(),
            github_branch: project.github_branch.clone(),
            github_token: project.github_token.clone(),
            backup_config: project.backup_config.clone(),
            file_location: project.file_location.clone(),
            ..Default::default()
        }
    }
}

// ========================
// Tasks
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Board column order
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::Doing => "DOING",
            TaskStatus::Done => "DONE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::Doing => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee: Option<Member>,
    #[serde(default)]
    pub order_index: Option<i32>,
    #[serde(default)]
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    /// Rank used for sorting; absent index counts as 0
    pub fn rank(&self) -> i32 {
        self.order_index.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub status: TaskStatus,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
}

/// Partial task update; unset fields are left untouched by the backend.
/// An empty `assignee_id` unassigns the task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDateTime>,
}

// ========================
// Finance
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancialType {
    Income,
    #[default]
    Expense,
}

impl FinancialType {
    pub fn label(self) -> &'static str {
        match self {
            FinancialType::Income => "Income",
            FinancialType::Expense => "Expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: String,
    pub project_id: String,
    #[serde(rename = "type")]
    pub kind: FinancialType,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub receipt_url: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecordRequest {
    pub project_id: String,
    #[serde(rename = "type")]
    pub kind: FinancialType,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub transaction_date: Option<NaiveDate>,
    pub tax_included: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub total_income: f64,
    #[serde(default)]
    pub total_expense: f64,
    #[serde(default)]
    pub net_profit: f64,
    #[serde(default)]
    pub burn_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceCategory {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FinancialType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRequest<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: FinancialType,
}

// ========================
// Events
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RepeatType {
    #[default]
    #[serde(rename = "None")]
    Never,
    Daily,
    Weekly,
    Monthly,
}

impl RepeatType {
    pub const ALL: [RepeatType; 4] = [RepeatType::Never, RepeatType::Daily, RepeatType::Weekly, RepeatType::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            RepeatType::Never => "None",
            RepeatType::Daily => "Daily",
            RepeatType::Weekly => "Weekly",
            RepeatType::Monthly => "Monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub repeat_type: RepeatType,
    #[serde(default)]
    pub creator_id: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub category: String,
    pub priority: Priority,
    pub repeat_type: RepeatType,
}

// ========================
// GitHub
// ========================

#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest<'a> {
    pub token: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub private: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest<'a> {
    pub token: &'a str,
    pub new_branch: &'a str,
    pub source_branch: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
    #[serde(other)]
    Other,
}

/// One entry of a repository directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserializes_backend_shape() {
        let json = r#"{
            "id": "t-1",
            "projectId": "p-1",
            "title": "Wireframes",
            "status": "DOING",
            "orderIndex": 3,
            "assignee": {"id": "u-1", "name": "alice", "email": null},
            "createdAt": "2025-03-01T09:30:00.123",
            "updatedAt": null
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Doing);
        assert_eq!(task.rank(), 3);
        assert_eq!(task.assignee.as_ref().unwrap().initial(), "A");
        assert!(task.deadline.is_none());
        assert!(task.created_at.is_some());
    }

    #[test]
    fn test_missing_order_index_ranks_zero() {
        let json = r#"{"id":"t","projectId":"p","title":"x","status":"TODO"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.rank(), 0);
    }

    #[test]
    fn test_update_task_request_skips_unset_fields() {
        let req = UpdateTaskRequest {
            order_index: Some(2),
            status: Some(TaskStatus::Done),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"orderIndex": 2, "status": "DONE"}));
    }

    #[test]
    fn test_project_status_wire_names() {
        assert_eq!(serde_json::to_string(&ProjectStatus::InProgress).unwrap(), r#""IN_PROGRESS""#);
        assert_eq!(ProjectStatus::parse("REVIEW"), Some(ProjectStatus::Review));
        assert_eq!(ProjectStatus::parse("ARCHIVED"), None);
    }

    #[test]
    fn test_financial_record_type_field() {
        let json = r#"{"id":"f","projectId":"p","type":"INCOME","amount":1200.5,
            "category":"CONSULTING","transactionDate":"2025-02-14"}"#;
        let record: FinancialRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, FinancialType::Income);
        assert_eq!(record.transaction_date, NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
    }

    #[test]
    fn test_repeat_type_none_on_wire() {
        assert_eq!(serde_json::to_string(&RepeatType::Never).unwrap(), r#""None""#);
        let parsed: RepeatType = serde_json::from_str(r#""Weekly""#).unwrap();
        assert_eq!(parsed, RepeatType::Weekly);
    }

    #[test]
    fn test_repo_entry_unknown_kind() {
        let json = r#"{"name":"link","path":"link","type":"symlink"}"#;
        let entry: RepoEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, EntryKind::Other);
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn test_project_search_and_counts() {
        let json = r#"[
            {"id":"1","title":"Harbor Website","client":"Blue Fin","status":"IN_PROGRESS"},
            {"id":"2","title":"POS Refresh","client":"Harbor Foods","status":"DONE"},
            {"id":"3","title":"Intranet","client":"Acme"}
        ]"#;
        let projects: Vec<Project> = serde_json::from_str(json).unwrap();
        let hits: Vec<&str> = projects.iter().filter(|p| p.matches("harbor")).map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["1", "2"]);
        assert!(projects[2].matches("  "));

        let counts = count_by_status(&projects);
        assert_eq!(counts[0], (ProjectStatus::Planning, 1));
        assert_eq!(counts[1], (ProjectStatus::InProgress, 1));
        assert_eq!(counts[3], (ProjectStatus::Done, 1));
    }
}
