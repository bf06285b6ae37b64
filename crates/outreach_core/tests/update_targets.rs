use outreach_core::{update, AppState, Effect, Msg, Notice, Target, DEFAULT_TARGET_TITLE};
use pretty_assertions::assert_eq;

fn init_logging() {
    outreach_logging::initialize_for_tests();
}

#[test]
fn text_import_replaces_targets() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::TargetsLoaded(vec![Target::new("Old", "https://old.example.com")]),
    );

    let raw = "Post A|https://a.blogspot.com/1\n\nhttps://b.blogspot.com/2\n";
    let (mut state, effects) = update(state, Msg::TargetsTextImported(raw.to_string()));

    assert!(effects.is_empty());
    assert_eq!(
        state.targets(),
        &[
            Target::new("Post A", "https://a.blogspot.com/1"),
            Target {
                title: DEFAULT_TARGET_TITLE.to_string(),
                url: "https://b.blogspot.com/2".to_string(),
            },
        ]
    );
    assert_eq!(state.drain_notices().last(), Some(&Notice::TargetsImported(2)));
}

#[test]
fn search_results_can_be_copied_into_targets() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::SearchClicked {
            keyword: " gardening ".to_string(),
            count: 5,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::SearchBlogs {
            keyword: "gardening".to_string(),
            count: 5,
        }]
    );
    assert!(state.is_searching());

    let found = vec![
        Target::new("Roses", "https://roses.example.com/2024/04/pruning.html"),
        Target::new("Soil", "https://soil.example.com/compost.php"),
    ];
    let (state, _) = update(state, Msg::SearchCompleted(found.clone()));
    assert!(!state.is_searching());
    assert!(state.targets().is_empty());

    let (state, _) = update(state, Msg::UseSearchResultsClicked);
    assert_eq!(state.targets(), found.as_slice());
}

#[test]
fn search_while_searching_is_ignored() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::SearchClicked {
            keyword: String::new(),
            count: 3,
        },
    );
    let (_state, effects) = update(
        state,
        Msg::SearchClicked {
            keyword: String::new(),
            count: 3,
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn search_failure_is_a_notice() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::SearchClicked {
            keyword: "x".to_string(),
            count: 3,
        },
    );
    let (mut state, _) = update(state, Msg::SearchFailed("network error".to_string()));

    assert!(!state.is_searching());
    assert_eq!(
        state.drain_notices(),
        vec![Notice::SearchFailed("network error".to_string())]
    );
}

#[test]
fn targets_are_locked_while_running() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::TargetsLoaded(vec![Target::new("A", "https://a.example.com")]),
    );
    let (state, _) = update(state, Msg::CommentChanged("comment".to_string()));
    let (state, _) = update(state, Msg::StartRunClicked);

    let (state, _) = update(
        state,
        Msg::TargetsTextImported("B|https://b.example.com\n".to_string()),
    );

    assert_eq!(state.targets(), &[Target::new("A", "https://a.example.com")]);
}
