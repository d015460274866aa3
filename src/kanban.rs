//! Kanban Board Logic
//!
//! One ordered task list per project. Columns are filtered views of that
//! list, so a card's place in its column is its place in the list.
//! Dragging reorders the list in place; dropping persists every task whose
//! position no longer matches its stored `orderIndex`.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::future::join_all;

use crate::error::{ApiError, ApiResult};
use crate::models::{CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest};

/// Task persistence used by the board
#[async_trait(?Send)]
pub trait TaskGateway {
    async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<Task>;
    async fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> ApiResult<Task>;
    async fn delete_task(&self, id: &str) -> ApiResult<()>;
}

/// What the dragged card is currently over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Task(String),
    /// Empty area of a column
    Column(TaskStatus),
}

/// Pending write produced by a drop
#[derive(Debug, Clone, PartialEq)]
pub struct OrderUpdate {
    pub id: String,
    pub order_index: i32,
    pub status: TaskStatus,
}

impl OrderUpdate {
    pub fn request(&self) -> UpdateTaskRequest {
        UpdateTaskRequest {
            order_index: Some(self.order_index),
            status: Some(self.status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveDrag {
    id: String,
    moved: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    tasks: Vec<Task>,
    active: Option<ActiveDrag>,
}

impl Board {
    /// Build from a fetch; stable sort so equal indexes keep server order
    pub fn from_fetched(mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(Task::rank);
        Self { tasks, active: None }
    }

    #[cfg(test)]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Cards of one column, in board order
    pub fn column(&self, status: TaskStatus) -> Vec<Task> {
        self.tasks.iter().filter(|t| t.status == status).cloned().collect()
    }

    /// Task being dragged, for the floating overlay
    pub fn active(&self) -> Option<&Task> {
        self.active.as_ref().and_then(|drag| self.task(&drag.id))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    // ========================
    // Drag lifecycle
    // ========================

    pub fn drag_start(&mut self, id: &str) {
        self.active = self.task(id).map(|task| ActiveDrag { id: task.id.clone(), moved: false });
    }

    /// Apply a hover. Returns whether the board changed.
    pub fn drag_over(&mut self, target: &DragTarget) -> bool {
        let Some(active_id) = self.active.as_ref().map(|d| d.id.clone()) else {
            return false;
        };
        let Some(from) = self.position(&active_id) else {
            return false;
        };

        let changed = match target {
            DragTarget::Task(over_id) if *over_id == active_id => false,
            DragTarget::Task(over_id) => match self.position(over_id) {
                Some(to) => {
                    let status = self.tasks[to].status;
                    let mut task = self.tasks.remove(from);
                    task.status = status;
                    self.tasks.insert(to, task);
                    true
                }
                None => false,
            },
            DragTarget::Column(status) if self.tasks[from].status == *status => false,
            DragTarget::Column(status) => {
                let mut task = self.tasks.remove(from);
                task.status = *status;
                // Goes after the column's last card, or to the end of the list
                let to = self
                    .tasks
                    .iter()
                    .rposition(|t| t.status == *status)
                    .map_or(self.tasks.len(), |last| last + 1);
                self.tasks.insert(to, task);
                true
            }
        };

        if changed {
            if let Some(drag) = self.active.as_mut() {
                drag.moved = true;
            }
        }
        changed
    }

    /// Finish the drag and list the writes needed to persist it: one per
    /// task whose position differs from its stored index.
    pub fn drag_end(&mut self) -> Vec<OrderUpdate> {
        let Some(drag) = self.active.take() else {
            return Vec::new();
        };
        if !drag.moved {
            return Vec::new();
        }

        self.tasks
            .iter()
            .enumerate()
            .filter(|(position, task)| task.order_index != Some(*position as i32))
            .map(|(position, task)| OrderUpdate {
                id: task.id.clone(),
                order_index: position as i32,
                status: task.status,
            })
            .collect()
    }

    /// Record persisted indexes locally. An update is skipped when its task
    /// has moved again since, so a late response never undoes a newer drag.
    pub fn accept(&mut self, updates: &[OrderUpdate]) {
        for update in updates {
            let Some(task) = usize::try_from(update.order_index).ok().and_then(|i| self.tasks.get_mut(i)) else {
                continue;
            };
            if task.id == update.id && task.status == update.status {
                task.order_index = Some(update.order_index);
            }
        }
    }

    // ========================
    // Edits
    // ========================

    /// Body for an inline quick-add, or None for a blank title
    pub fn quick_add_request(&self, project_id: &str, status: TaskStatus, title: &str) -> Option<CreateTaskRequest> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(CreateTaskRequest {
            title: title.to_string(),
            status,
            project_id: project_id.to_string(),
            assignee_id: None,
            order_index: Some(self.tasks.len() as i32),
        })
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.tasks.retain(|t| t.id != id);
    }
}

/// Editable copy of a task for the detail modal
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub status: TaskStatus,
    /// Empty means unassigned
    pub assignee_id: String,
    pub description: String,
    pub deadline: Option<NaiveDateTime>,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            status: task.status,
            assignee_id: task.assignee.as_ref().map(|a| a.id.clone()).unwrap_or_default(),
            description: task.description.clone().unwrap_or_default(),
            deadline: task.deadline,
        }
    }

    pub fn request(&self) -> UpdateTaskRequest {
        UpdateTaskRequest {
            title: Some(self.title.trim().to_string()),
            status: Some(self.status),
            assignee_id: Some(self.assignee_id.clone()),
            order_index: None,
            description: Some(self.description.clone()),
            deadline: self.deadline,
        }
    }
}

// ========================
// Persistence
// ========================

/// Send all order updates concurrently. Fails with the first error.
pub async fn persist_order<G>(gateway: &G, updates: &[OrderUpdate]) -> ApiResult<()>
where
    G: TaskGateway + ?Sized,
{
    if updates.is_empty() {
        return Ok(());
    }
    let requests: Vec<(String, UpdateTaskRequest)> =
        updates.iter().map(|u| (u.id.clone(), u.request())).collect();
    let results = join_all(
        requests
            .iter()
            .map(|(id, request)| gateway.update_task(id, request)),
    )
    .await;

    match results.into_iter().find_map(Result::err) {
        Some(err) => {
            log::error!("Failed to update task order: {}", err);
            Err(err)
        }
        None => {
            log::debug!("persisted order for {} tasks", updates.len());
            Ok(())
        }
    }
}

/// Create a task from a quick-add body
pub async fn quick_add<G>(gateway: &G, request: &CreateTaskRequest) -> ApiResult<Task>
where
    G: TaskGateway + ?Sized,
{
    gateway.create_task(request).await
}

/// Save the detail modal; returns the server's copy
pub async fn save_detail<G>(gateway: &G, id: &str, draft: &TaskDraft) -> ApiResult<Task>
where
    G: TaskGateway + ?Sized,
{
    if draft.title.trim().is_empty() {
        return Err(ApiError::Rejected { message: Some("Title is required".to_string()) });
    }
    gateway.update_task(id, &draft.request()).await
}

/// Delete after confirmation. Returns whether a delete was issued.
pub async fn delete_task<G>(gateway: &G, id: &str, confirmed: bool) -> ApiResult<bool>
where
    G: TaskGateway + ?Sized,
{
    if !confirmed {
        return Ok(false);
    }
    gateway.delete_task(id).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn make_task(id: &str, status: TaskStatus, order_index: Option<i32>) -> Task {
        Task {
            id: id.to_string(),
            project_id: "p1".to_string(),
            title: format!("Task {}", id),
            status,
            assignee: None,
            order_index,
            deadline: None,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[derive(Default)]
    struct FakeGateway {
        updates: RefCell<Vec<(String, UpdateTaskRequest)>>,
        creates: RefCell<Vec<CreateTaskRequest>>,
        deletes: RefCell<Vec<String>>,
        fail_on: Option<String>,
    }

    #[async_trait(?Send)]
    impl TaskGateway for FakeGateway {
        async fn create_task(&self, request: &CreateTaskRequest) -> ApiResult<Task> {
            self.creates.borrow_mut().push(request.clone());
            let mut task = make_task("new", request.status, request.order_index);
            task.title = request.title.clone();
            Ok(task)
        }

        async fn update_task(&self, id: &str, request: &UpdateTaskRequest) -> ApiResult<Task> {
            self.updates.borrow_mut().push((id.to_string(), request.clone()));
            if self.fail_on.as_deref() == Some(id) {
                return Err(ApiError::Server { status: 500, message: None });
            }
            let mut task = make_task(id, request.status.unwrap_or_default(), request.order_index);
            if let Some(title) = &request.title {
                task.title = title.clone();
            }
            Ok(task)
        }

        async fn delete_task(&self, id: &str) -> ApiResult<()> {
            self.deletes.borrow_mut().push(id.to_string());
            Ok(())
        }
    }

    fn sample_board() -> Board {
        Board::from_fetched(vec![
            make_task("C", TaskStatus::Doing, Some(1)),
            make_task("A", TaskStatus::Todo, Some(0)),
            make_task("B", TaskStatus::Doing, Some(0)),
        ])
    }

    #[test]
    fn test_fetch_sorts_by_order_index() {
        let board = Board::from_fetched(vec![
            make_task("x", TaskStatus::Todo, Some(2)),
            make_task("y", TaskStatus::Todo, None),
            make_task("z", TaskStatus::Todo, Some(1)),
        ]);
        assert_eq!(ids(board.tasks()), vec!["y", "z", "x"]);
        assert_eq!(ids(&board.column(TaskStatus::Todo)), vec!["y", "z", "x"]);
        assert!(board.column(TaskStatus::Done).is_empty());
    }

    #[test]
    fn test_drag_down_onto_task_in_other_column() {
        let mut board = sample_board();
        assert_eq!(ids(board.tasks()), vec!["A", "B", "C"]);

        board.drag_start("A");
        assert_eq!(board.active().map(|t| t.id.as_str()), Some("A"));
        assert!(board.drag_over(&DragTarget::Task("C".into())));

        assert_eq!(ids(board.tasks()), vec!["B", "C", "A"]);
        assert_eq!(board.task("A").unwrap().status, TaskStatus::Doing);
        assert_eq!(ids(&board.column(TaskStatus::Doing)), vec!["B", "C", "A"]);

        let updates = board.drag_end();
        assert!(board.active().is_none());
        assert_eq!(
            updates,
            vec![OrderUpdate { id: "A".into(), order_index: 2, status: TaskStatus::Doing }]
        );
    }

    #[test]
    fn test_drag_up_lands_before_target() {
        let mut board = Board::from_fetched(vec![
            make_task("a", TaskStatus::Todo, Some(0)),
            make_task("b", TaskStatus::Todo, Some(1)),
            make_task("c", TaskStatus::Todo, Some(2)),
        ]);
        board.drag_start("c");
        board.drag_over(&DragTarget::Task("a".into()));
        assert_eq!(ids(board.tasks()), vec!["c", "a", "b"]);

        let updates = board.drag_end();
        // Every task shifted, so every task is written
        assert_eq!(updates.len(), 3);
        for (position, update) in updates.iter().enumerate() {
            assert_eq!(update.order_index, position as i32);
        }
    }

    #[test]
    fn test_drag_onto_column_appends_to_it() {
        let mut board = Board::from_fetched(vec![
            make_task("a", TaskStatus::Todo, Some(0)),
            make_task("b", TaskStatus::Done, Some(1)),
            make_task("c", TaskStatus::Done, Some(2)),
        ]);
        board.drag_start("a");
        assert!(board.drag_over(&DragTarget::Column(TaskStatus::Done)));
        assert_eq!(ids(board.tasks()), vec!["b", "c", "a"]);
        assert_eq!(ids(&board.column(TaskStatus::Done)), vec!["b", "c", "a"]);
        assert_eq!(board.task("a").unwrap().status, TaskStatus::Done);
        // Repeated hover on the same column is a no-op
        assert!(!board.drag_over(&DragTarget::Column(TaskStatus::Done)));

        let mismatched = board
            .tasks()
            .iter()
            .enumerate()
            .filter(|(i, t)| t.order_index != Some(*i as i32))
            .count();
        let updates = board.drag_end();
        assert_eq!(updates.len(), mismatched);
        assert_eq!(
            updates,
            vec![
                OrderUpdate { id: "b".into(), order_index: 0, status: TaskStatus::Done },
                OrderUpdate { id: "c".into(), order_index: 1, status: TaskStatus::Done },
                OrderUpdate { id: "a".into(), order_index: 2, status: TaskStatus::Done },
            ]
        );
    }

    #[test]
    fn test_drag_onto_column_keeps_later_tasks_in_place() {
        let mut board = Board::from_fetched(vec![
            make_task("a", TaskStatus::Todo, Some(0)),
            make_task("b", TaskStatus::Done, Some(1)),
            make_task("c", TaskStatus::Todo, Some(2)),
        ]);
        board.drag_start("a");
        board.drag_over(&DragTarget::Column(TaskStatus::Done));
        assert_eq!(ids(board.tasks()), vec!["b", "a", "c"]);
        assert_eq!(ids(&board.column(TaskStatus::Done)), vec!["b", "a"]);

        // c kept its index, so only b and a are written
        let written: Vec<String> = board.drag_end().into_iter().map(|u| u.id).collect();
        assert_eq!(written, vec!["b", "a"]);
    }

    #[test]
    fn test_drag_onto_empty_column_goes_to_end() {
        let mut board = Board::from_fetched(vec![
            make_task("a", TaskStatus::Todo, Some(0)),
            make_task("b", TaskStatus::Todo, Some(1)),
        ]);
        board.drag_start("a");
        board.drag_over(&DragTarget::Column(TaskStatus::Doing));
        assert_eq!(ids(board.tasks()), vec!["b", "a"]);
        assert_eq!(board.drag_end().len(), 2);
    }

    #[test]
    fn test_drop_on_self_makes_no_calls() {
        let mut board = sample_board();
        board.drag_start("B");
        assert!(!board.drag_over(&DragTarget::Task("B".into())));
        assert!(board.drag_end().is_empty());
        assert_eq!(ids(board.tasks()), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_and_back_writes_only_mismatched_indexes() {
        let mut board = Board::from_fetched(vec![
            make_task("a", TaskStatus::Todo, Some(0)),
            make_task("b", TaskStatus::Todo, Some(1)),
        ]);
        board.drag_start("a");
        board.drag_over(&DragTarget::Task("b".into()));
        board.drag_over(&DragTarget::Task("b".into()));
        assert_eq!(ids(board.tasks()), vec!["a", "b"]);
        assert!(board.drag_end().is_empty());
    }

    #[test]
    fn test_drag_end_without_start() {
        let mut board = sample_board();
        assert!(!board.drag_over(&DragTarget::Column(TaskStatus::Done)));
        assert!(board.drag_end().is_empty());
    }

    #[test]
    fn test_accept_writes_indexes() {
        let mut board = sample_board();
        board.drag_start("A");
        board.drag_over(&DragTarget::Task("C".into()));
        let updates = board.drag_end();
        board.accept(&updates);
        assert_eq!(board.task("A").unwrap().order_index, Some(2));
        // Nothing left to write
        board.drag_start("A");
        board.drag_over(&DragTarget::Task("A".into()));
        assert!(board.drag_end().is_empty());
    }

    #[test]
    fn test_late_accept_keeps_newer_drag() {
        let mut board = Board::from_fetched(vec![
            make_task("a", TaskStatus::Todo, Some(0)),
            make_task("b", TaskStatus::Done, Some(1)),
        ]);
        board.drag_start("a");
        board.drag_over(&DragTarget::Column(TaskStatus::Done));
        let first = board.drag_end();
        assert_eq!(ids(board.tasks()), vec!["b", "a"]);

        // Second drag before the first write came back
        board.drag_start("a");
        board.drag_over(&DragTarget::Column(TaskStatus::Doing));
        let second = board.drag_end();
        assert_eq!(
            second,
            vec![
                OrderUpdate { id: "b".into(), order_index: 0, status: TaskStatus::Done },
                OrderUpdate { id: "a".into(), order_index: 1, status: TaskStatus::Doing },
            ]
        );

        board.accept(&first);
        let a = board.task("a").unwrap();
        assert_eq!(a.status, TaskStatus::Doing);
        assert_eq!(a.order_index, Some(0));
        // b is still where the first write put it
        assert_eq!(board.task("b").unwrap().order_index, Some(0));

        board.accept(&second);
        assert_eq!(board.task("a").unwrap().order_index, Some(1));
    }

    #[test]
    fn test_quick_add_request() {
        let board = sample_board();
        let request = board.quick_add_request("p1", TaskStatus::Todo, "  Write docs ").unwrap();
        assert_eq!(request.title, "Write docs");
        assert_eq!(request.status, TaskStatus::Todo);
        assert_eq!(request.order_index, Some(3));
        assert!(board.quick_add_request("p1", TaskStatus::Todo, "   ").is_none());
    }

    #[test]
    fn test_draft_request_unassigns_with_empty_id() {
        let mut task = make_task("t", TaskStatus::Doing, Some(0));
        task.description = Some("notes".into());
        let draft = TaskDraft::from_task(&task);
        let json = serde_json::to_value(draft.request()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Task t", "status": "DOING", "assigneeId": "", "description": "notes"})
        );
    }

    #[tokio::test]
    async fn test_persist_order_sends_each_update() {
        let gateway = FakeGateway::default();
        let mut board = sample_board();
        board.drag_start("A");
        board.drag_over(&DragTarget::Task("C".into()));
        let updates = board.drag_end();

        persist_order(&gateway, &updates).await.unwrap();
        let sent = gateway.updates.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "A");
        assert_eq!(sent[0].1.order_index, Some(2));
        assert_eq!(sent[0].1.status, Some(TaskStatus::Doing));
    }

    #[tokio::test]
    async fn test_persist_order_reports_failure_without_rollback() {
        let gateway = FakeGateway { fail_on: Some("b".into()), ..Default::default() };
        let mut board = Board::from_fetched(vec![
            make_task("a", TaskStatus::Todo, Some(0)),
            make_task("b", TaskStatus::Todo, Some(1)),
        ]);
        board.drag_start("b");
        board.drag_over(&DragTarget::Task("a".into()));
        let updates = board.drag_end();

        let err = persist_order(&gateway, &updates).await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));
        assert_eq!(gateway.updates.borrow().len(), 2);
        assert_eq!(ids(board.tasks()), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_persist_nothing_makes_no_calls() {
        let gateway = FakeGateway::default();
        persist_order(&gateway, &[]).await.unwrap();
        assert!(gateway.updates.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_quick_add_touches_nothing_else() {
        let gateway = FakeGateway::default();
        let mut board = sample_board();
        let request = board.quick_add_request("p1", TaskStatus::Todo, "New").unwrap();
        let task = quick_add(&gateway, &request).await.unwrap();
        board.push(task);

        assert_eq!(gateway.creates.borrow().len(), 1);
        assert!(gateway.updates.borrow().is_empty());
        assert_eq!(board.len(), 4);
        assert_eq!(board.column(TaskStatus::Todo).last().unwrap().title, "New");
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let gateway = FakeGateway::default();
        let mut board = sample_board();

        assert!(!delete_task(&gateway, "B", false).await.unwrap());
        assert!(gateway.deletes.borrow().is_empty());

        assert!(delete_task(&gateway, "B", true).await.unwrap());
        board.remove("B");
        assert_eq!(*gateway.deletes.borrow(), vec!["B".to_string()]);
        assert_eq!(ids(board.tasks()), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_save_detail_replaces_task() {
        let gateway = FakeGateway::default();
        let mut board = sample_board();
        let mut draft = TaskDraft::from_task(board.task("C").unwrap());
        draft.title = "Renamed".into();
        draft.status = TaskStatus::Done;

        let saved = save_detail(&gateway, "C", &draft).await.unwrap();
        board.replace(saved);
        assert_eq!(board.task("C").unwrap().title, "Renamed");
        assert_eq!(board.task("C").unwrap().status, TaskStatus::Done);

        draft.title = " ".into();
        assert!(save_detail(&gateway, "C", &draft).await.is_err());
        assert_eq!(gateway.updates.borrow().len(), 1);
    }
}
