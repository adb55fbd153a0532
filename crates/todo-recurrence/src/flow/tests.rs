//! Flow tests against an in-memory gateway and scripted prompts.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::*;
use crate::draft::{Priority, RepeatDraft};
use crate::error::Field;
use crate::model::{Completion, RepeatVo};
use crate::prompt::{self, PromptResolver};
use crate::rule::{RepeatType, WeekDays};
use crate::scope::TERMINATION_WARNING;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Create(CreateTodoRequest),
    Update(TodoId, UpdateTodoRequest),
    Delete(DeleteTodoRequest),
}

#[derive(Default)]
struct FakeGateway {
    calls: RefCell<Vec<Call>>,
    fail: bool,
}

impl FakeGateway {
    fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.fail {
            Err(ApiError::Network("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl TodoGateway for FakeGateway {
    async fn create_todo(&self, request: &CreateTodoRequest) -> Result<TodoResponse, ApiError> {
        self.calls.borrow_mut().push(Call::Create(request.clone()));
        self.check()?;
        Ok(TodoResponse {
            todo_id: 100,
            user_id: Some(1),
            title: request.title.clone(),
            memo: request.memo.clone(),
            priority: request.priority,
            is_completed: Completion::No,
            due_date: request.due_date,
            created_at: None,
            updated_at: None,
            repeat_vo: None,
        })
    }

    async fn update_todo(&self, id: TodoId, request: &UpdateTodoRequest) -> Result<TodoResponse, ApiError> {
        self.calls.borrow_mut().push(Call::Update(id, request.clone()));
        self.check()?;
        let mut todo = todo(id, None, None);
        if let Some(done) = request.is_completed {
            todo.is_completed = done;
        }
        Ok(todo)
    }

    async fn delete_todo(&self, request: &DeleteTodoRequest) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::Delete(*request));
        self.check()
    }
}

/// Answers prompts from queues and records what was asked
#[derive(Default)]
struct ScriptedPrompter {
    change_answers: RefCell<VecDeque<PromptOutcome<ChangeScope>>>,
    delete_answers: RefCell<VecDeque<PromptOutcome<DeleteScope>>>,
    confirm_answers: RefCell<VecDeque<PromptOutcome<()>>>,
    change_requests: RefCell<Vec<ChangeScopeRequest>>,
    delete_prompts: RefCell<u32>,
    confirm_prompts: RefCell<u32>,
}

impl ScriptedPrompter {
    fn answering_change(outcome: PromptOutcome<ChangeScope>) -> Self {
        let prompter = Self::default();
        prompter.change_answers.borrow_mut().push_back(outcome);
        prompter
    }
}

#[async_trait(?Send)]
impl ScopePrompter for ScriptedPrompter {
    async fn choose_change_scope(&self, request: ChangeScopeRequest) -> PromptOutcome<ChangeScope> {
        self.change_requests.borrow_mut().push(request);
        self.change_answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(PromptOutcome::Cancelled)
    }

    async fn choose_delete_scope(&self, _todo_id: TodoId) -> PromptOutcome<DeleteScope> {
        *self.delete_prompts.borrow_mut() += 1;
        self.delete_answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(PromptOutcome::Cancelled)
    }

    async fn confirm_delete(&self, _todo_id: TodoId) -> PromptOutcome<()> {
        *self.confirm_prompts.borrow_mut() += 1;
        self.confirm_answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(PromptOutcome::Cancelled)
    }
}

/// Parks change-scope prompts until the test resolves them
#[derive(Default)]
struct ChannelPrompter {
    pending: RefCell<Option<PromptResolver<ChangeScope>>>,
}

#[async_trait(?Send)]
impl ScopePrompter for ChannelPrompter {
    async fn choose_change_scope(&self, _request: ChangeScopeRequest) -> PromptOutcome<ChangeScope> {
        let (resolver, pending) = prompt::channel();
        *self.pending.borrow_mut() = Some(resolver);
        pending.await
    }

    async fn choose_delete_scope(&self, _todo_id: TodoId) -> PromptOutcome<DeleteScope> {
        PromptOutcome::Cancelled
    }

    async fn confirm_delete(&self, _todo_id: TodoId) -> PromptOutcome<()> {
        PromptOutcome::Cancelled
    }
}

fn weekly_vo(days: &str) -> RepeatVo {
    RepeatVo {
        repeat_rule_id: Some(9),
        repeat_type: "WEEKLY".into(),
        interval_value: Some(1),
        week_days: Some(days.into()),
        end_date: None,
    }
}

fn todo(id: TodoId, due_date: Option<NaiveDate>, repeat_vo: Option<RepeatVo>) -> TodoResponse {
    TodoResponse {
        todo_id: id,
        user_id: Some(1),
        title: "주간 회의".into(),
        memo: None,
        priority: Priority::Medium,
        is_completed: Completion::No,
        due_date,
        created_at: None,
        updated_at: None,
        repeat_vo,
    }
}

fn weekly_draft(due: Option<NaiveDate>, days: &[u32]) -> TodoDraft {
    let repeat = RepeatDraft {
        repeat_type: RepeatType::Weekly,
        interval_value: 1,
        week_days: WeekDays::from_indices(days.iter().copied()),
        end_date: None,
    };
    TodoDraft::new("주간 회의", "", Priority::Medium, due, Some(repeat))
}

// ========================
// Create
// ========================

#[tokio::test]
async fn test_create_sends_recurrence_block() {
    let gateway = FakeGateway::default();
    let draft = weekly_draft(Some(date(2025, 1, 13)), &[1, 3]);

    let created = submit_create(&gateway, &draft).await.unwrap();
    assert_eq!(created.todo_id, 100);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    let Call::Create(request) = &calls[0] else { panic!("expected create") };
    let block = request.repeat_rule.as_ref().unwrap();
    assert_eq!(block.week_days.as_deref(), Some("MON,WED"));
}

#[tokio::test]
async fn test_create_validation_failure_sends_nothing() {
    let gateway = FakeGateway::default();
    let mut draft = weekly_draft(Some(date(2025, 1, 15)), &[5]);
    draft.title = "x".into();

    let err = submit_create(&gateway, &draft).await.unwrap_err();
    let FlowError::Validation(err) = err else { panic!("expected validation error") };
    assert!(err.message_for(Field::Title).is_some());
    assert!(gateway.calls().is_empty());
}

// ========================
// Edit
// ========================

#[tokio::test]
async fn test_changed_weekdays_prompt_and_send_change_type() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::answering_change(PromptOutcome::Chosen(ChangeScope::AfterThis));
    let existing = todo(7, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));
    let draft = weekly_draft(Some(date(2025, 1, 13)), &[1, 3]);

    let outcome = submit_edit(&gateway, &prompter, &existing, &draft).await.unwrap();
    assert!(matches!(outcome, EditOutcome::Updated(_)));
    assert_eq!(prompter.change_requests.borrow().len(), 1);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    let Call::Update(id, request) = &calls[0] else { panic!("expected update") };
    assert_eq!(*id, 7);
    assert_eq!(request.change_type, Some(ChangeScope::AfterThis));
}

#[tokio::test]
async fn test_identical_rule_skips_prompt() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::default();
    let existing = todo(7, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));
    let mut draft = weekly_draft(Some(date(2025, 1, 13)), &[1]);
    draft.title = "제목만 변경".into();

    submit_edit(&gateway, &prompter, &existing, &draft).await.unwrap();
    assert!(prompter.change_requests.borrow().is_empty());

    let Call::Update(_, request) = &gateway.calls()[0] else { panic!("expected update") };
    assert_eq!(request.change_type, None);
    assert_eq!(request.title.as_deref(), Some("제목만 변경"));
}

#[tokio::test]
async fn test_first_recurrence_skips_prompt() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::default();
    let existing = todo(7, Some(date(2025, 1, 13)), None);
    let draft = weekly_draft(Some(date(2025, 1, 13)), &[1]);

    submit_edit(&gateway, &prompter, &existing, &draft).await.unwrap();
    assert!(prompter.change_requests.borrow().is_empty());
    let Call::Update(_, request) = &gateway.calls()[0] else { panic!("expected update") };
    assert!(matches!(request.repeat_rule, Some(Some(_))));
    assert_eq!(request.change_type, None);
}

#[tokio::test]
async fn test_cancelled_scope_prompt_sends_nothing() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::answering_change(PromptOutcome::Cancelled);
    let existing = todo(7, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));
    let draft = weekly_draft(Some(date(2025, 1, 13)), &[1, 3]);

    let outcome = submit_edit(&gateway, &prompter, &existing, &draft).await.unwrap();
    assert_eq!(outcome, EditOutcome::Cancelled);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_clearing_due_date_warns_only_for_all() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::answering_change(PromptOutcome::Chosen(ChangeScope::All));
    let existing = todo(7, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));
    // clearing the due date turns recurrence off as well
    let draft = weekly_draft(None, &[1]);
    assert!(!draft.is_repeating());

    submit_edit(&gateway, &prompter, &existing, &draft).await.unwrap();

    let requests = prompter.change_requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].warning(ChangeScope::All), Some(TERMINATION_WARNING));
    assert_eq!(requests[0].warning(ChangeScope::AfterThis), None);

    let Call::Update(_, request) = &gateway.calls()[0] else { panic!("expected update") };
    assert_eq!(request.due_date, Some(None));
    assert_eq!(request.repeat_rule, Some(None));
    assert_eq!(request.change_type, Some(ChangeScope::All));
}

#[tokio::test]
async fn test_update_waits_for_prompt() {
    let gateway = FakeGateway::default();
    let prompter = ChannelPrompter::default();
    let existing = todo(7, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));
    let draft = weekly_draft(Some(date(2025, 1, 13)), &[1, 5]);

    let flow = submit_edit(&gateway, &prompter, &existing, &draft);
    let user = async {
        tokio::task::yield_now().await;
        // prompt is up, nothing sent yet
        assert!(gateway.calls().is_empty());
        let resolver = prompter.pending.borrow_mut().take().expect("scope prompt shown");
        resolver.resolve(ChangeScope::All);
    };
    let (outcome, ()) = futures::join!(flow, user);

    assert!(matches!(outcome, Ok(EditOutcome::Updated(_))));
    let Call::Update(_, request) = &gateway.calls()[0] else { panic!("expected update") };
    assert_eq!(request.change_type, Some(ChangeScope::All));
}

#[tokio::test]
async fn test_backend_failure_is_reported() {
    let gateway = FakeGateway::failing();
    let prompter = ScriptedPrompter::default();
    let existing = todo(7, None, None);
    let draft = TodoDraft::new("장보기", "", Priority::Low, None, None);

    let err = submit_edit(&gateway, &prompter, &existing, &draft).await.unwrap_err();
    assert!(matches!(err, FlowError::Api(ApiError::Network(_))));
    assert_eq!(gateway.calls().len(), 1);
}

#[tokio::test]
async fn test_toggle_completed_only_sends_flag() {
    let gateway = FakeGateway::default();
    let existing = todo(3, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));

    let updated = toggle_completed(&gateway, &existing).await.unwrap();
    assert!(updated.is_completed());
    assert_eq!(
        gateway.calls(),
        vec![Call::Update(3, UpdateTodoRequest::completion(Completion::Yes))]
    );
}

// ========================
// Delete
// ========================

#[tokio::test]
async fn test_recurring_delete_uses_chosen_scope() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::default();
    prompter
        .delete_answers
        .borrow_mut()
        .push_back(PromptOutcome::Chosen(crate::scope::DeleteScopeSelector::new().confirm()));
    let recurring = todo(4, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));

    let outcome = delete_todo(&gateway, &prompter, &recurring).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted(Some(DeleteScope::Future)));
    assert_eq!(*prompter.confirm_prompts.borrow(), 0);
    assert_eq!(
        gateway.calls(),
        vec![Call::Delete(DeleteTodoRequest { id: 4, scope: Some(DeleteScope::Future) })]
    );
}

#[tokio::test]
async fn test_recurring_delete_cancelled() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::default();
    let recurring = todo(4, Some(date(2025, 1, 13)), Some(weekly_vo("MON")));

    let outcome = delete_todo(&gateway, &prompter, &recurring).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_plain_delete_skips_scope_selector() {
    let gateway = FakeGateway::default();
    let prompter = ScriptedPrompter::default();
    prompter.confirm_answers.borrow_mut().push_back(PromptOutcome::Chosen(()));
    let plain = todo(5, None, None);

    let outcome = delete_todo(&gateway, &prompter, &plain).await.unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted(None));
    assert_eq!(*prompter.delete_prompts.borrow(), 0);
    assert_eq!(*prompter.confirm_prompts.borrow(), 1);
    assert_eq!(
        gateway.calls(),
        vec![Call::Delete(DeleteTodoRequest { id: 5, scope: None })]
    );
}
