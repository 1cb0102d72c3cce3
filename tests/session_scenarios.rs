use keypace::engine::window::wrap_lines;
use keypace::engine::{CharState, Viewport, metrics};
use keypace::generator::{self, DEFAULT_TIMED_STREAM_WORDS, PracticeText};
use keypace::session::{Key, ManualClock, Mode, Phase, TestConfig, TestSession, Transition};
use keypace::store::ScoreLedger;

fn type_str(session: &mut TestSession<ManualClock>, text: &str) -> Vec<Transition> {
    text.chars().map(|c| session.apply_key(Key::Char(c))).collect()
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn sentence_with_one_typo_finishes_with_expected_accuracy() {
    let clock = ManualClock::new();
    let mut session = TestSession::with_target(TestConfig::Sentence, clock.clone(), "the cat sat");

    let transitions = type_str(&mut session, "the cat sa");
    assert!(transitions.iter().all(|t| !matches!(t, Transition::Finished(_))));
    clock.advance_secs(6.0);

    let result = match session.apply_key(Key::Char('m')) {
        Transition::Finished(result) => result,
        other => panic!("expected the run to finish, got {other:?}"),
    };
    assert_eq!(result.correct_count, 10);
    assert_eq!(result.typed_count, 11);
    assert!((result.accuracy - 10.0 / 11.0 * 100.0).abs() < 1e-9);
    assert_eq!(result.mode, Mode::Sentence);
    assert_eq!(result.duration_secs, None);
    assert_eq!(result.word_count, None);
    // 10 correct chars = 2 words in 0.1 minutes
    assert!((result.wpm - 20.0).abs() < 1e-9);
}

#[test]
fn timed_run_completes_at_exactly_the_duration() {
    let clock = ManualClock::new();
    let config = TestConfig::timed(15.0).unwrap();
    let mut source = PracticeText::seeded(11);
    let target = generator::build_target(&mut source, &config, DEFAULT_TIMED_STREAM_WORDS);
    let mut session = TestSession::with_target(config, clock.clone(), &target);

    type_str(&mut session, "ab");
    clock.advance_secs(15.0);

    let metrics = session.metrics();
    assert_eq!(metrics.remaining_secs, Some(0.0));
    assert!(session.typed().len() < session.target().len());

    match session.tick() {
        Transition::Finished(result) => {
            assert_eq!(result.duration_secs, Some(15.0));
            assert!((result.elapsed_secs - 15.0).abs() < 1e-9);
        }
        other => panic!("expected completion, got {other:?}"),
    }
    assert_eq!(session.tick(), Transition::Unchanged);
}

#[test]
fn fixed_words_run_never_ends_on_a_timer() {
    let clock = ManualClock::new();
    let config = TestConfig::fixed(25).unwrap();
    let mut source = PracticeText::seeded(5);
    let target = generator::build_target(&mut source, &config, DEFAULT_TIMED_STREAM_WORDS);
    assert_eq!(target.split(' ').count(), 25);

    let mut session = TestSession::with_target(config, clock.clone(), &target);
    let (head, tail) = target.split_at(target.len() - 1);
    type_str(&mut session, head);

    for _ in 0..10 {
        clock.advance_secs(3600.0);
        assert_eq!(session.tick(), Transition::Unchanged);
        assert_eq!(session.metrics().remaining_secs, None);
    }
    assert_eq!(session.phase(), Phase::Running);

    let last = type_str(&mut session, tail);
    assert!(matches!(last[0], Transition::Finished(_)));
}

#[test]
fn typed_never_exceeds_target() {
    let mut session =
        TestSession::with_target(TestConfig::timed(60.0).unwrap(), ManualClock::new(), "hi there");
    for c in "hi there and then some more".chars() {
        session.apply_key(Key::Char(c));
        assert!(session.typed().len() <= session.target().len());
    }
    session.apply_key(Key::Backspace);
    assert_eq!(session.typed().len(), session.target().len() - 1);
}

#[test]
fn abort_and_regenerate_do_not_produce_results() {
    let mut session =
        TestSession::with_target(TestConfig::fixed(3).unwrap(), ManualClock::new(), "one two six");
    type_str(&mut session, "one");
    assert_eq!(session.apply_key(Key::from_name("Escape")), Transition::Abort);
    assert_eq!(session.apply_key(Key::from_name("Tab")), Transition::Regenerate);
    assert_eq!(session.apply_key(Key::from_name("ArrowLeft")), Transition::Unchanged);

    session.start("red fox ran");
    assert_eq!(session.phase(), Phase::Armed);
    assert!(session.started_at().is_none());
}

#[test]
fn empty_history_has_no_best() {
    let ledger = ScoreLedger::in_memory();
    assert!(ledger.best_for(Mode::Words, None, Some(50)).is_none());
}

#[test]
fn metric_bounds_hold_across_inputs() {
    let target = chars("quick brown fox");
    for typed in ["", "q", "quack", "quick brown fox", "zzzzzzzzzzzzzzz"] {
        let typed = chars(typed);
        let correct = metrics::correct_count(&typed, &target);
        assert!(correct <= typed.len().min(target.len()));
        let acc = metrics::accuracy(correct, typed.len());
        assert!((0.0..=100.0).contains(&acc));
    }
    assert_eq!(metrics::accuracy(0, 0), 100.0);
    assert_eq!(metrics::wpm(10, 0.0), 0.0);
    assert!(metrics::wpm(11, 30.0) > metrics::wpm(10, 30.0));
}

#[test]
fn windowed_render_respects_bounds_for_every_caret() {
    let target = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu \
                  supercalifragilistic nu xi omicron pi rho sigma tau";
    let target_chars = chars(target);
    let viewport = Viewport::new(16, 3);

    for line in wrap_lines(&target_chars, viewport.width) {
        let text: String = target_chars[line.start..line.end].iter().collect();
        assert!(line.len() <= viewport.width || !text.contains(' '), "line {text:?}");
    }

    let clock = ManualClock::new();
    let mut session =
        TestSession::with_target(TestConfig::timed(600.0).unwrap(), clock, target);
    for c in target.chars() {
        let model = session.render(viewport);
        assert!(model.lines.len() <= viewport.visible_lines);
        let caret = model.caret().expect("caret visible while typing");
        assert_eq!(caret.index, session.typed().len());
        session.apply_key(Key::Char(c));
    }

    let done = session.render(viewport);
    assert!(done.trailing_caret);
    assert!(done.chars().all(|c| c.state == CharState::Correct));
}
