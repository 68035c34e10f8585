//! Property tests for transcript construction

use super::{build_transcript, ChatTurn, Role};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.!?,]{0,40}"
}

fn arb_history() -> impl Strategy<Value = Vec<ChatTurn>> {
    proptest::collection::vec((arb_text(), arb_text()), 0..12)
        .prop_map(|pairs| pairs.into_iter().map(|(h, a)| ChatTurn(h, a)).collect())
}

proptest! {
    #[test]
    fn length_is_two_per_turn_plus_one(history in arb_history(), text in arb_text()) {
        let transcript = build_transcript(&history, &text);
        prop_assert_eq!(transcript.len(), history.len() * 2 + 1);
    }

    #[test]
    fn roles_alternate_starting_and_ending_with_human(history in arb_history(), text in arb_text()) {
        let transcript = build_transcript(&history, &text);
        for (i, message) in transcript.messages().iter().enumerate() {
            let expected = if i % 2 == 0 { Role::Human } else { Role::Assistant };
            prop_assert_eq!(message.role(), expected);
        }
        prop_assert_eq!(transcript.last().map(|m| m.text().to_string()), Some(text));
    }

    #[test]
    fn texts_follow_input_order(history in arb_history(), text in arb_text()) {
        let transcript = build_transcript(&history, &text);
        let messages = transcript.messages();
        for (i, ChatTurn(human, assistant)) in history.iter().enumerate() {
            prop_assert_eq!(messages[2 * i].text(), human.as_str());
            prop_assert_eq!(messages[2 * i + 1].text(), assistant.as_str());
        }
    }

    #[test]
    fn building_twice_gives_same_transcript(history in arb_history(), text in arb_text()) {
        prop_assert_eq!(build_transcript(&history, &text), build_transcript(&history, &text));
    }
}
