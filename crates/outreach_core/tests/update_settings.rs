use outreach_core::{update, AppState, Effect, Msg, Notice, Settings};
use pretty_assertions::assert_eq;

fn init_logging() {
    outreach_logging::initialize_for_tests();
}

fn saved() -> Settings {
    Settings {
        target_url: "https://shop.example.com".to_string(),
        keywords: "garden tools, pruning".to_string(),
        generated_comment: "Nice read! <a href=\"https://shop.example.com\">garden tools</a>"
            .to_string(),
    }
}

#[test]
fn restored_settings_show_in_view() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::RestoreSettings(saved()));

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.target_url, "https://shop.example.com");
    assert_eq!(view.keywords, "garden tools, pruning");
    assert!(view.comment.contains("<a href="));
}

#[test]
fn save_emits_whole_settings() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RestoreSettings(saved()));
    let (state, _) = update(state, Msg::KeywordsChanged("  hedges  ".to_string()));
    let (mut state, effects) = update(state, Msg::SaveSettingsClicked);

    let expected = Settings {
        keywords: "hedges".to_string(),
        ..saved()
    };
    assert_eq!(effects, vec![Effect::SaveSettings(expected)]);
    assert!(state.drain_notices().is_empty());

    let (mut state, _) = update(state, Msg::SettingsSaved);
    assert_eq!(state.drain_notices(), vec![Notice::SettingsSaved]);
}

#[test]
fn failed_save_is_an_error_notice() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new(),
        Msg::SettingsSaveFailed("read-only file system".to_string()),
    );

    assert!(effects.is_empty());
    let notices = state.drain_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert_eq!(
        notices[0].to_string(),
        "could not save settings: read-only file system"
    );
}

#[test]
fn generate_requires_keywords_and_link() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::KeywordsChanged("tools".to_string()));
    let (mut state, effects) = update(state, Msg::GenerateClicked { tone: None });

    assert!(effects.is_empty());
    assert!(!state.is_generating());
    assert_eq!(state.drain_notices(), vec![Notice::MissingGenerationInput]);
}

#[test]
fn generate_emits_effect_and_stores_comment() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::KeywordsChanged("tools".to_string()));
    let (state, _) = update(
        state,
        Msg::TargetUrlChanged("https://shop.example.com".to_string()),
    );
    let (state, effects) = update(
        state,
        Msg::GenerateClicked {
            tone: Some("friendly".to_string()),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::GenerateComment {
            keywords: "tools".to_string(),
            link_target: "https://shop.example.com".to_string(),
            tone: Some("friendly".to_string()),
        }]
    );
    assert!(state.is_generating());

    // A second click while the first is in flight is ignored.
    let (state, effects) = update(state, Msg::GenerateClicked { tone: None });
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::CommentGenerated("  Great post! <a href=\"https://shop.example.com\">tools</a>\n".to_string()),
    );
    assert!(!state.is_generating());
    assert_eq!(
        state.settings().generated_comment,
        "Great post! <a href=\"https://shop.example.com\">tools</a>"
    );
}

#[test]
fn empty_generation_keeps_previous_comment() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RestoreSettings(saved()));
    let (state, _) = update(state, Msg::GenerateClicked { tone: None });
    let (mut state, _) = update(state, Msg::CommentGenerated("   ".to_string()));

    assert_eq!(state.settings().generated_comment, saved().generated_comment);
    assert!(matches!(
        state.drain_notices().as_slice(),
        [Notice::GenerationFailed(_)]
    ));
}

#[test]
fn generation_failure_is_a_notice() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RestoreSettings(saved()));
    let (state, _) = update(state, Msg::GenerateClicked { tone: None });
    let (mut state, effects) = update(state, Msg::CommentFailed("http status 503".to_string()));

    assert!(effects.is_empty());
    assert!(!state.is_generating());
    let notices = state.drain_notices();
    assert_eq!(
        notices,
        vec![Notice::GenerationFailed("http status 503".to_string())]
    );
    assert_eq!(
        notices[0].to_string(),
        "comment generation failed: http status 503"
    );
}
