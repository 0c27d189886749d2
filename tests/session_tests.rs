/// Session integration tests — end-to-end action sequences, invariants,
/// and export.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use story_loom::core::session::{Action, StorySession};
use story_loom::core::stats::{char_count, word_count};
use story_loom::core::story::Notice;
use story_loom::core::view::StoryView;
use story_loom::schema::genre::Genre;

fn assert_joined(session: &StorySession) {
    let state = session.state();
    assert_eq!(state.text(), state.fragments().join(" "));
    assert_eq!(state.text().is_empty(), state.fragments().is_empty());
}

#[test]
fn start_for_every_genre_yields_one_opener() {
    for genre in Genre::ALL {
        let mut session = StorySession::builder().seed(17).genre(genre).build().unwrap();
        session.start();
        let fragments = session.state().fragments();
        assert_eq!(fragments.len(), 1);
        assert!(session.catalog().lookup(genre).openers.contains(&fragments[0]));
    }
}

#[test]
fn join_invariant_holds_across_a_long_session() {
    let mut session = StorySession::builder().seed(2024).build().unwrap();
    let script = [
        Action::Continue,
        Action::Start,
        Action::Twist,
        Action::AddCustomText("   ".to_string()),
        Action::Continue,
        Action::AddCustomText("  the hero hesitates  ".to_string()),
        Action::Clear,
        Action::Twist,
        Action::Start,
        Action::Continue,
        Action::Twist,
    ];

    for (i, action) in script.into_iter().enumerate() {
        if i == 4 {
            session.select_genre(Genre::Horror);
        }
        let _ = session.apply(action);
        assert_joined(&session);
    }
    assert_eq!(session.stats().continuations, 2);
}

#[test]
fn no_ops_on_empty_story_leave_state_unchanged() {
    let mut session = StorySession::builder().seed(8).build().unwrap();
    let before = session.state().clone();

    assert_eq!(session.apply(Action::Continue), Err(Notice::NoActiveStory));
    assert_eq!(session.apply(Action::Twist), Err(Notice::NoActiveStory));
    assert_eq!(
        session.apply(Action::AddCustomText("hello".to_string())),
        Err(Notice::NoActiveStory)
    );
    assert_eq!(session.state(), &before);
}

#[test]
fn three_appends_count_three_continuations() {
    let mut session = StorySession::builder().seed(4).build().unwrap();
    session.start();
    session.continue_story().unwrap();
    session.twist().unwrap();
    session.add_custom_text("and so it goes").unwrap();
    assert_eq!(session.stats().continuations, 3);
    assert_eq!(session.state().fragments().len(), 4);
}

#[test]
fn clear_resets_and_is_idempotent() {
    let mut session = StorySession::builder().seed(5).build().unwrap();
    session.start();
    session.twist().unwrap();
    session.apply(Action::Clear).unwrap();
    assert_eq!(session.state().text(), "");
    assert!(session.state().fragments().is_empty());
    session.apply(Action::Clear).unwrap();
    assert_eq!(session.state().text(), "");
    assert_eq!(session.stats().continuations, 0);
}

#[test]
fn stats_match_the_text() {
    let mut session = StorySession::builder().seed(6).build().unwrap();
    session.start();
    session.add_custom_text("a b  c").unwrap();
    let stats = session.stats();
    assert_eq!(stats.words, word_count(session.state().text()));
    assert_eq!(stats.characters, char_count(session.state().text()));
    assert!(session.state().text().ends_with(" a b  c"));
}

#[test]
fn export_uses_genre_and_timestamp() {
    let at = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 58)
        .unwrap();
    let mut session = StorySession::builder()
        .seed(7)
        .genre(Genre::Adventure)
        .build()
        .unwrap();
    session.start();
    session.select_genre(Genre::SciFi);

    let export = session.export(at).unwrap();
    assert_eq!(export.filename, "story_Sci-Fi_20231231_235958.txt");
    assert_eq!(export.mime, "text/plain");
    assert_eq!(export.bytes(), session.state().text().as_bytes());

    let dir = tempfile::tempdir().unwrap();
    let path = export.write_to_dir(dir.path()).unwrap();
    assert_eq!(std::fs::read_to_string(path).unwrap(), session.state().text());
}

#[test]
fn view_tracks_latest_state() {
    let mut session = StorySession::builder().seed(10).build().unwrap();
    assert_eq!(StoryView::render(&session).text, None);

    session.start();
    session
        .add_custom_text("A very long sentence that goes on and on well past the fifty character mark")
        .unwrap();
    let view = StoryView::render(&session);
    assert_eq!(view.log.len(), 2);
    assert_eq!(view.log[1].step, 2);
    assert_eq!(
        view.log[1].preview,
        "A very long sentence that goes on and on well past..."
    );

    session.clear();
    let view = StoryView::render(&session);
    assert!(view.log.is_empty());
    assert_eq!(view.stats, None);
}
