//! End-to-end tests for sample chat splitting: segmentation scenarios and
//! budget fitting properties.

use sample_chat_core::{
    fit, segment, split_sample_chat, to_prompt_messages, ExampleStyle, PromptRole,
    SampleChatRequest, Turn, TurnRole,
};

const CHAR: &str = "Vader";
const USER: &str = "Sam";

fn split(input: &str) -> Vec<Turn> {
    segment(input, CHAR, USER)
}

fn word_cost(turn: &Turn) -> u32 {
    turn.content.split_whitespace().count() as u32
}

#[test]
fn converts_start_case_insensitively_and_splits_basic_messages() {
    let turns = split("<STaRT>\nSam: hey there Vader!\nVader: hi Sam!");

    assert_eq!(
        turns,
        vec![
            Turn::new_conversation(),
            Turn::user(USER, "hey there Vader!"),
            Turn::character(CHAR, "hi Sam!"),
        ]
    );
}

#[test]
fn marker_turn_is_identical_for_every_casing() {
    let variants: Vec<_> = ["<START>", "<StArT>", "<start>"]
        .iter()
        .map(|marker| split(marker))
        .collect();

    assert_eq!(variants[0], vec![Turn::new_conversation()]);
    assert!(variants.iter().all(|v| v == &variants[0]));
}

#[test]
fn first_conversation_without_start_has_no_preamble() {
    let turns = split("Sam: hey there\nVader: hi!");

    assert_eq!(
        turns,
        vec![Turn::user(USER, "hey there"), Turn::character(CHAR, "hi!")]
    );
}

#[test]
fn leading_unattributed_text_becomes_system_turn() {
    let turns = split("Vader is nice.\nSam: hey\nVader: hi!");
    assert_eq!(
        turns,
        vec![
            Turn::system("Vader is nice."),
            Turn::user(USER, "hey"),
            Turn::character(CHAR, "hi!"),
        ]
    );

    let with_start = split("Vader is nice.\n<START>\nSam: hey\nVader: hi!");
    assert_eq!(
        with_start,
        vec![
            Turn::system("Vader is nice."),
            Turn::new_conversation(),
            Turn::user(USER, "hey"),
            Turn::character(CHAR, "hi!"),
        ]
    );
}

#[test]
fn multiple_start_markers_each_precede_their_segment() {
    let request = SampleChatRequest::new(
        "{{char}} is nice.\n<START>\nSam: hey\nVader: hi!\n<START>\nVader: bye Sam\nSam: byebye Vader",
        CHAR,
        USER,
    );
    let result = split_sample_chat(&request, word_cost).unwrap();

    assert_eq!(
        result.additions,
        vec![
            Turn::system("Vader is nice."),
            Turn::new_conversation(),
            Turn::user(USER, "hey"),
            Turn::character(CHAR, "hi!"),
            Turn::new_conversation(),
            Turn::character(CHAR, "bye Sam"),
            Turn::user(USER, "byebye Vader"),
        ]
    );
    assert_eq!(result.dropped, 0);
    assert_eq!(result.total_cost, None);
}

#[test]
fn text_after_start_up_to_first_speaker_is_system_turn() {
    let turns = split(
        "Sam: hey\nVader: hi!\n<STaRT>\ntest\nVader: bye Sam\nSam: byebye Vader\n\
         Vader: I love you Sam\nSam: me too Vader\nVader is very excited.",
    );

    assert_eq!(
        turns,
        vec![
            Turn::user(USER, "hey"),
            Turn::character(CHAR, "hi!"),
            Turn::new_conversation(),
            Turn::system("test"),
            Turn::character(CHAR, "bye Sam"),
            Turn::user(USER, "byebye Vader"),
            Turn::character(CHAR, "I love you Sam"),
            Turn::user(USER, "me too Vader\nVader is very excited."),
        ]
    );
}

#[test]
fn explicit_system_lines_are_separate_turns() {
    let turns = split(
        "Sam: hey\nVader: hi!\n<START>\nVader: bye Sam\nSam: byebye Vader\n\
         System: New conversation started. Previous conversations are examples only.",
    );

    let last = turns.last().unwrap();
    assert_eq!(last.role, TurnRole::System);
    assert_eq!(last.name, "System");
    assert_eq!(
        last.content,
        "New conversation started. Previous conversations are examples only."
    );
    assert_eq!(turns.len(), 6);
}

#[test]
fn trims_result_into_budget() {
    let input = "\nSam: Hey\nVader: Hi!\n<START>\ntest\nVader: This is how I talk\n\
                 Sam: Oh, interesting!\n\
                 Vader: I also talk like this! *smiles* But this is far too long to include in our budget!\n\
                 Sam: More interesting!";

    let turns = split(input);
    assert_eq!(turns.len(), 8);

    let result = fit(&turns, Some(25), word_cost).unwrap();
    assert_eq!(result.dropped, 5);
    assert_eq!(result.total_cost, Some(21));
    assert_eq!(result.additions, turns[5..].to_vec());
    assert_eq!(result.additions[0], Turn::user(USER, "Oh, interesting!"));

    let tight = fit(&turns, Some(10), word_cost).unwrap();
    assert_eq!(tight.additions, vec![Turn::user(USER, "More interesting!")]);
    assert_eq!(tight.dropped, 7);
}

#[test]
fn empty_transcript_fits_to_nothing() {
    for input in ["", "   ", "\n\r\n\t"] {
        let request = SampleChatRequest::new(input, CHAR, USER).with_budget(Some(100));
        let result = split_sample_chat(&request, word_cost).unwrap();
        assert!(result.additions.is_empty());
        assert_eq!(result.dropped, 0);
    }
}

#[test]
fn negative_budget_is_rejected_before_segmenting() {
    let request = SampleChatRequest::new("Sam: hey", CHAR, USER).with_budget(Some(-5));
    let err = split_sample_chat(&request, |_| panic!("oracle must not be called")).unwrap_err();
    assert_eq!(err.to_string(), "Invalid budget -5: budget must be a non-negative integer");
}

#[test]
fn placeholders_can_be_disabled() {
    let request =
        SampleChatRequest::new("{{char}}: hi\nSam: hey", CHAR, USER).with_placeholders(false);
    let result = split_sample_chat(&request, word_cost).unwrap();

    assert_eq!(
        result.additions,
        vec![Turn::system("{{char}}: hi"), Turn::user(USER, "hey")]
    );
}

#[test]
fn fitted_turns_render_as_prompt_messages() {
    let request = SampleChatRequest::new("<START>\nSam: hey\nVader: hi!", CHAR, USER);
    let result = split_sample_chat(&request, word_cost).unwrap();
    let messages = to_prompt_messages(&result.additions, ExampleStyle::Native);

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].role, PromptRole::Assistant);
    assert_eq!(messages[2].content, "hi!");
}

fn long_sample() -> Vec<Turn> {
    split(
        "The bridge of the Executor.\n<START>\nSam: hello\nVader: You have failed me for the last time.\n\
         Sam: sorry\nsorry again\n<start>\nVader: I find your lack of faith disturbing.\n\
         Sam: ok\nVader: Impressive. Most impressive.",
    )
}

#[test]
fn additions_are_a_suffix_in_transcript_order() {
    let turns = long_sample();
    for budget in 0..40 {
        let result = fit(&turns, Some(budget), word_cost).unwrap();
        assert_eq!(result.additions, turns[result.dropped..].to_vec());
        for turn in &result.additions {
            assert!(turns.contains(turn), "fitted turn was altered: {turn:?}");
        }
    }
}

#[test]
fn additions_are_the_longest_fitting_suffix() {
    let turns = long_sample();
    for budget in 0..40i64 {
        let result = fit(&turns, Some(budget), word_cost).unwrap();
        let total: u32 = result.additions.iter().map(word_cost).sum();
        assert!(i64::from(total) <= budget);

        if result.dropped > 0 {
            let longer: u32 = turns[result.dropped - 1..].iter().map(word_cost).sum();
            assert!(
                i64::from(longer) > budget,
                "budget {budget}: a longer suffix would have fit"
            );
        }
    }
}

#[test]
fn fitting_is_idempotent() {
    let turns = long_sample();
    for budget in [0, 3, 7, 12, 20, 1000] {
        let once = fit(&turns, Some(budget), word_cost).unwrap();
        let twice = fit(&once.additions, Some(budget), word_cost).unwrap();
        assert_eq!(twice.additions, once.additions);
        assert_eq!(twice.dropped, 0);
    }
}
