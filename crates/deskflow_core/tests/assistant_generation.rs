use async_trait::async_trait;
use deskflow_core::seed::initial_tasks;
use deskflow_core::{
    AssistantError, AssistantReply, BoardService, CaptionDraft, ContentGenerator, GenerationSlot,
    GenerationState,
};

struct ScriptedGenerator {
    fail: bool,
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_caption(&self, topic: &str) -> Result<CaptionDraft, AssistantError> {
        if self.fail {
            return Err(AssistantError::EmptyResponse);
        }
        Ok(CaptionDraft {
            caption: format!("All about {topic}"),
            hashtags: vec!["#one".to_string(), "#two".to_string()],
        })
    }

    async fn assist(&self, prompt: &str, _context: &str) -> Result<AssistantReply, AssistantError> {
        if self.fail {
            return Err(AssistantError::HttpStatus {
                status: 503,
                body: "overloaded".to_string(),
            });
        }
        Ok(AssistantReply {
            content: format!("# {prompt}"),
            suggestions: vec!["next".to_string()],
        })
    }
}

#[test]
fn new_slot_is_idle() {
    let slot: GenerationSlot<CaptionDraft> = GenerationSlot::new("caption");
    assert_eq!(slot.state(), &GenerationState::Idle);
    assert!(slot.result().is_none());
}

#[tokio::test]
async fn successful_generation_is_recorded() {
    let generator = ScriptedGenerator { fail: false };
    let mut slot = GenerationSlot::new("caption");

    let state = slot.run(generator.generate_caption("sunsets")).await;

    assert!(matches!(
        state,
        GenerationState::Succeeded(draft) if draft.caption == "All about sunsets"
    ));
    assert_eq!(slot.result().unwrap().hashtags.len(), 2);
}

#[tokio::test]
async fn failure_is_distinguishable_and_replaces_old_result() {
    let mut slot = GenerationSlot::new("assist");
    slot.run(ScriptedGenerator { fail: false }.assist("plan", "")).await;
    assert!(slot.result().is_some());

    let state = slot
        .run(ScriptedGenerator { fail: true }.assist("plan", ""))
        .await;

    assert!(matches!(state, GenerationState::Failed(message) if message.contains("503")));
    assert!(slot.result().is_none(), "stale result must not look current");
}

#[test]
fn in_flight_is_visible_between_begin_and_complete() {
    let mut slot: GenerationSlot<CaptionDraft> = GenerationSlot::new("caption");
    let ticket = slot.begin();
    assert!(slot.is_in_flight());

    assert!(slot.complete(ticket, Err(AssistantError::EmptyResponse)));
    assert_eq!(
        slot.state(),
        &GenerationState::Failed("AI returned no content".to_string())
    );
}

#[test]
fn stale_completion_is_discarded() {
    let mut slot = GenerationSlot::new("caption");
    let first = slot.begin();
    let second = slot.begin();

    let fresh = CaptionDraft {
        caption: "fresh".to_string(),
        hashtags: Vec::new(),
    };
    assert!(slot.complete(second, Ok(fresh.clone())));
    assert!(!slot.complete(first, Err(AssistantError::EmptyResponse)));
    assert_eq!(slot.state(), &GenerationState::Succeeded(fresh));
}

#[test]
fn reset_invalidates_outstanding_ticket() {
    let mut slot: GenerationSlot<CaptionDraft> = GenerationSlot::new("caption");
    let ticket = slot.begin();
    slot.reset();

    assert!(!slot.complete(ticket, Err(AssistantError::EmptyResponse)));
    assert_eq!(slot.state(), &GenerationState::Idle);
}

#[tokio::test]
async fn failed_generation_leaves_board_untouched() {
    let board = BoardService::new(initial_tasks());
    let before = board.snapshot();
    let mut slot = GenerationSlot::new("caption");

    slot.run(ScriptedGenerator { fail: true }.generate_caption("x"))
        .await;

    assert!(matches!(slot.state(), GenerationState::Failed(_)));
    assert_eq!(board.snapshot(), before);
}
