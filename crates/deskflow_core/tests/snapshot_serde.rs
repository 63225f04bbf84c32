use deskflow_core::seed::{initial_pages, initial_tasks};
use deskflow_core::{
    aggregate, BlockKind, BoardService, BoardSnapshot, EditorService, Page, PageSnapshot,
    TaskStatus,
};
use serde_json::json;

#[test]
fn board_snapshot_roundtrip_preserves_order_and_fields() {
    let mut board = BoardService::new(initial_tasks());
    board.create_task(TaskStatus::InProgress, "Roundtrip", "12.5");
    let snapshot = board.snapshot();

    let encoded = serde_json::to_string(&snapshot).unwrap();
    let decoded: BoardSnapshot = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, snapshot);
}

#[test]
fn page_roundtrip_preserves_block_types_and_content() {
    for page in initial_pages() {
        let encoded = serde_json::to_value(&page).unwrap();
        let decoded: Page = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, page);
        assert!(decoded.has_unique_block_ids());
    }
}

#[test]
fn edited_page_snapshot_roundtrip() {
    let page = initial_pages().remove(0);
    let mut editor = EditorService::open(page);
    let anchor = editor.blocks()[1].id().clone();
    editor.insert_block(BlockKind::FinanceLearning, Some(&anchor), true);
    let snapshot = editor.snapshot();

    let encoded = serde_json::to_string(&snapshot).unwrap();
    let decoded: PageSnapshot = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, snapshot);
    assert_eq!(decoded.blocks[2].kind(), BlockKind::FinanceLearning);
}

#[test]
fn task_wire_format_uses_lowercase_labels() {
    let value = serde_json::to_value(&initial_tasks()[1]).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "2",
            "title": "YECARS Sales Bot Integration",
            "status": "in-progress",
            "priority": "medium",
            "tags": ["Automation"],
            "revenue": 5000.0
        })
    );
}

#[test]
fn page_wire_format_matches_workspace_shape() {
    let page = initial_pages().remove(0);
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(value["id"], "p1");
    assert_eq!(value["isFavorite"], true);
    assert_eq!(value["blocks"][0], json!({ "id": "b1", "type": "h1", "content": "Omni-Strategy" }));
    assert_eq!(value["blocks"][2]["type"], "project-tracker");
    assert_eq!(
        value["blocks"][2]["content"][1]["nextAction"],
        "Finish training dataset"
    );
    assert_eq!(
        value["blocks"][5]["content"],
        json!({ "text": "IFC Finance Certification", "checked": true })
    );

    let growth = serde_json::to_value(&initial_pages()[1]).unwrap();
    assert!(growth.get("isFavorite").is_none());
    assert_eq!(growth["blocks"], json!([]));
}

#[test]
fn unknown_block_type_is_rejected() {
    let value = json!({ "id": "x", "type": "video", "content": "" });
    assert!(serde_json::from_value::<deskflow_core::Block>(value).is_err());
}

#[test]
fn mismatched_content_shape_is_rejected() {
    let value = json!({ "id": "x", "type": "todo", "content": "just text" });
    assert!(serde_json::from_value::<deskflow_core::Block>(value).is_err());
}

#[test]
fn decoded_board_never_carries_negative_revenue() {
    let value = json!({
        "revision": 3,
        "tasks": [
            {
                "id": "1",
                "title": "Refund",
                "status": "done",
                "priority": "low",
                "tags": [],
                "revenue": -500.0
            },
            {
                "id": "2",
                "title": "Retainer",
                "status": "todo",
                "priority": "high",
                "tags": ["Growth"],
                "revenue": 800.0
            }
        ]
    });

    let snapshot: BoardSnapshot = serde_json::from_value(value).unwrap();

    assert_eq!(snapshot.tasks[0].revenue, 0.0);
    assert_eq!(aggregate(&snapshot.tasks).total_revenue, 800.0);
}
