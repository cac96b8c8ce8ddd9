use solace::safety::{classify, matched_phrase, CrisisVerdict, CRISIS_PHRASES};

/// Utterances seen in real conversations that must be caught
#[test]
fn test_crisis_sentences_are_flagged() {
    let sentences = [
        "I want to end my life",
        "honestly I think about suicide every day",
        "Sometimes I feel like I can't go on anymore",
        "I've been cutting myself again",
        "there's no way out of this",
        "Everything is HOPELESS",
        "I just want to   end   it   all",
        "I can\u{2019}t go on",
    ];
    for sentence in sentences {
        assert_eq!(classify(sentence), CrisisVerdict::Crisis, "{sentence}");
    }
}

#[test]
fn test_everyday_sentences_are_normal() {
    let sentences = [
        "I had a rough day at work",
        "My exam went badly and I'm stressed",
        "Can you help me feel calmer before bed?",
        "",
        "   ",
    ];
    for sentence in sentences {
        assert_eq!(classify(sentence), CrisisVerdict::Normal, "{sentence:?}");
        assert!(matched_phrase(sentence).is_none());
    }
}

#[test]
fn test_every_listed_phrase_matches_itself_in_context() {
    for phrase in CRISIS_PHRASES {
        let sentence = format!("lately {} is all I think about", phrase.to_uppercase());
        assert!(classify(&sentence).is_crisis(), "{sentence}");
    }
}

#[test]
fn test_classify_is_deterministic() {
    let text = "I feel hopeless";
    assert_eq!(classify(text), classify(text));
    assert_eq!(matched_phrase(text), Some("hopeless"));
}
