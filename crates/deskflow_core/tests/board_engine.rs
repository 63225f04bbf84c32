use deskflow_core::seed::initial_tasks;
use deskflow_core::{
    BoardService, SequentialIdGenerator, Task, TaskId, TaskPriority, TaskStatus,
};

fn seeded_board() -> BoardService {
    BoardService::with_id_generator(
        initial_tasks(),
        Box::new(SequentialIdGenerator::new("t")),
    )
}

fn ids(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id.to_string()).collect()
}

#[test]
fn create_task_appends_with_defaults() {
    let mut board = seeded_board();

    let task = board
        .create_task(TaskStatus::InProgress, "Hotel chatbot", "750.5")
        .unwrap();

    assert_eq!(task.id.as_str(), "t-1");
    assert_eq!(task.title, "Hotel chatbot");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.tags, vec!["New".to_string()]);
    assert_eq!(task.revenue, 750.5);
    assert_eq!(ids(board.tasks()), vec!["1", "2", "3", "4", "t-1"]);
    assert_eq!(board.revision(), 1);
}

#[test]
fn create_task_appends_globally_not_per_column() {
    let mut board = seeded_board();
    board.create_task(TaskStatus::Todo, "Later backlog item", "0");

    let backlog = board.tasks_by_status(TaskStatus::Todo);
    assert_eq!(ids(&backlog), vec!["1", "4", "t-1"]);
    assert_eq!(board.tasks().last().unwrap().title, "Later backlog item");
}

#[test]
fn blank_title_leaves_board_unchanged() {
    let mut board = seeded_board();
    let before = board.snapshot();

    assert!(board.create_task(TaskStatus::Todo, "", "100").is_none());
    assert!(board.create_task(TaskStatus::Done, "   \t", "100").is_none());

    assert_eq!(board.snapshot(), before);
}

#[test]
fn unparsable_revenue_becomes_zero() {
    let mut board = seeded_board();
    let task = board.create_task(TaskStatus::Todo, "X", "abc").unwrap();
    assert_eq!(task.revenue, 0.0);
}

#[test]
fn move_task_changes_only_status() {
    let mut board = seeded_board();
    let before = board.get(&TaskId::new("1")).unwrap().clone();

    let snapshot = board.move_task(&TaskId::new("1"), TaskStatus::Done);

    let after = &snapshot.tasks[0];
    assert_eq!(after.status, TaskStatus::Done);
    assert_eq!(after.with_status(before.status), before);
    assert_eq!(ids(&snapshot.tasks), vec!["1", "2", "3", "4"]);
}

#[test]
fn unknown_ids_are_ignored() {
    let mut board = seeded_board();
    let before = board.snapshot();

    assert_eq!(board.delete_task(&TaskId::new("missing")), before);
    assert_eq!(
        board.move_task(&TaskId::new("missing"), TaskStatus::Done),
        before
    );
    assert_eq!(board.advance_task(&TaskId::new("missing")), before);
}

#[test]
fn delete_task_removes_only_the_match() {
    let mut board = seeded_board();
    let snapshot = board.delete_task(&TaskId::new("2"));
    assert_eq!(ids(&snapshot.tasks), vec!["1", "3", "4"]);
    assert_eq!(snapshot.revision, 1);
}

#[test]
fn advance_and_retreat_follow_the_workflow() {
    let mut board = seeded_board();
    let id = TaskId::new("1");

    board.advance_task(&id);
    assert_eq!(board.get(&id).unwrap().status, TaskStatus::InProgress);
    board.advance_task(&id);
    assert_eq!(board.get(&id).unwrap().status, TaskStatus::Done);

    let revision = board.revision();
    board.advance_task(&id);
    assert_eq!(board.revision(), revision, "done is the last stage");

    board.retreat_task(&id);
    board.retreat_task(&id);
    assert_eq!(board.get(&id).unwrap().status, TaskStatus::Todo);
    let revision = board.revision();
    board.retreat_task(&id);
    assert_eq!(board.revision(), revision, "todo is the first stage");
}

#[test]
fn older_snapshots_are_not_affected_by_later_mutations() {
    let mut board = seeded_board();
    let before = board.snapshot();

    board.delete_task(&TaskId::new("1"));
    board.create_task(TaskStatus::Todo, "Fresh", "10");

    assert_eq!(ids(&before.tasks), vec!["1", "2", "3", "4"]);
    assert_eq!(before.revision, 0);
}

#[test]
fn tasks_by_status_preserves_insertion_order() {
    let mut board = seeded_board();
    board.move_task(&TaskId::new("3"), TaskStatus::Todo);

    let backlog = board.tasks_by_status(TaskStatus::Todo);
    assert_eq!(ids(&backlog), vec!["1", "3", "4"]);
    assert!(board.tasks_by_status(TaskStatus::Done).is_empty());
    assert_eq!(board.tasks().len(), 4);
}

#[test]
fn shared_board_serializes_mutations() {
    let shared = seeded_board().into_shared();

    let handles = (0..4)
        .map(|n| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                let mut board = shared.lock().unwrap();
                board.create_task(TaskStatus::Todo, &format!("worker {n}"), "1");
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.join().unwrap();
    }

    let board = shared.lock().unwrap();
    assert_eq!(board.tasks().len(), 8);
    assert_eq!(board.revision(), 4);
}

#[test]
fn duplicate_seed_ids_keep_first_task_only() {
    let mut tasks = initial_tasks();
    let mut shadow = tasks[1].clone();
    shadow.id = TaskId::new("1");
    shadow.title = "Shadow copy".to_string();
    tasks.push(shadow);

    let mut board = BoardService::new(tasks);
    assert_eq!(ids(board.tasks()), vec!["1", "2", "3", "4"]);
    assert_eq!(
        board.get(&TaskId::new("1")).unwrap().title,
        "BADAGUESTHOUSE SEO Package"
    );

    board.delete_task(&TaskId::new("1"));
    assert_eq!(ids(board.tasks()), vec!["2", "3", "4"]);
}

#[test]
fn stepping_past_workflow_ends_keeps_revision() {
    let mut board = seeded_board();

    let after_advance = board.advance_task(&TaskId::new("3"));
    let after_retreat = board.retreat_task(&TaskId::new("1"));
    let after_unknown = board.advance_task(&TaskId::new("missing"));

    assert_eq!(after_advance.revision, 0);
    assert_eq!(after_retreat.revision, 0);
    assert_eq!(after_unknown.revision, 0);
    assert_eq!(board.get(&TaskId::new("3")).unwrap().status, TaskStatus::Done);
}
