
use fixture::Fixture;
use say_core::runner::exit_code;
use say_core::speaker::AudioSource;
use say_core::voice::tts::mock::{MockBehavior, MockTextToSpeech, SynthesisCall};
use say_core::voice::tts::types::{Model, Voice};
use say_core::SayError;

#[tokio::test]
async fn test_female_request_selects_rachel_and_caches_audio() {
    let mut fixture = Fixture::bella_and_rachel();

    let result = fixture.say(Some("Female"), "hello").await;

    assert_eq!(exit_code(&result), 0);
    let report = result.unwrap();
    assert_eq!(report.model_id, "eleven_v2");
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].voice, "Rachel");
    assert!(matches!(
        report.outcomes[0].result,
        Ok(AudioSource::Synthesized)
    ));

    assert_eq!(
        fixture.provider.synthesis_calls(),
        vec![SynthesisCall {
            text: "hello".to_string(),
            voice: "Rachel".to_string(),
            model_id: "eleven_v2".to_string(),
        }]
    );

    let expected_audio = MockTextToSpeech::audio_for("Rachel", "hello");
    let path = fixture.audio_path("Rachel", "hello");
    assert!(path.ends_with(
        "audio/1fd33aed834e05cbfdd8be3f9ef973a5e156e5283205b371953b7a21057afe56.mp3"
    ));
    assert_eq!(std::fs::read(&path).unwrap(), expected_audio);
    assert_eq!(fixture.player.played(), vec![expected_audio]);
}

#[tokio::test]
async fn test_cached_audio_is_played_without_synthesis() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture.write_audio("Bella", "hi", b"valid cached mp3");

    let result = fixture.say(Some("Bella"), "hi").await;

    assert_eq!(exit_code(&result), 0);
    assert!(matches!(
        result.unwrap().outcomes[0].result,
        Ok(AudioSource::Cache)
    ));
    assert!(fixture.provider.synthesis_calls().is_empty());
    assert_eq!(fixture.player.played(), vec![b"valid cached mp3".to_vec()]);
}

#[tokio::test]
async fn test_repeat_request_never_resynthesizes() {
    let mut fixture = Fixture::bella_and_rachel();

    for _ in 0..3 {
        let result = fixture.say(Some("Bella"), "good morning").await;
        assert_eq!(exit_code(&result), 0);
    }

    assert_eq!(fixture.provider.synthesis_calls().len(), 1);
    assert_eq!(fixture.player.played().len(), 3);
}

#[tokio::test]
async fn test_all_reports_last_voice_outcome() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture
        .provider
        .set_synthesis_behavior(MockBehavior::BehaviorQueue {
            behaviors: vec![MockBehavior::AlwaysError, MockBehavior::Success],
        });

    let result = fixture.say(Some("All"), "hello").await;

    // The first voice failed, but only the last attempted voice decides
    assert_eq!(exit_code(&result), 0);
    let report = result.unwrap();
    let voices: Vec<&str> = report.outcomes.iter().map(|o| o.voice.as_str()).collect();
    assert_eq!(voices, vec!["Bella", "Rachel"]);
    assert!(matches!(
        report.outcomes[0].result,
        Err(SayError::Synthesis { .. })
    ));
    assert_eq!(report.failures().count(), 1);

    assert!(!fixture.audio_path("Bella", "hello").exists());
    assert!(fixture.audio_path("Rachel", "hello").exists());
    assert_eq!(
        fixture.player.played(),
        vec![MockTextToSpeech::audio_for("Rachel", "hello")]
    );
}

#[tokio::test]
async fn test_all_fails_when_last_voice_fails() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture
        .provider
        .set_synthesis_behavior(MockBehavior::BehaviorQueue {
            behaviors: vec![MockBehavior::Success, MockBehavior::AlwaysError],
        });

    let result = fixture.say(Some("All"), "hello").await;

    assert_eq!(exit_code(&result), 1);
    assert_eq!(result.unwrap().outcomes.len(), 2);
}

#[tokio::test]
async fn test_all_attempts_each_voice_once_in_order() {
    let voices = vec![
        Voice::new("1", "Charlie"),
        Voice::new("2", "Adam"),
        Voice::new("3", "Bella"),
        Voice::new("4", "Dorothy"),
    ];
    let mut fixture = Fixture::new(voices, vec![]);

    let result = fixture.say(Some("All"), "roll call").await;

    assert_eq!(exit_code(&result), 0);
    let attempted: Vec<String> = fixture
        .provider
        .synthesis_calls()
        .into_iter()
        .map(|call| call.voice)
        .collect();
    assert_eq!(attempted, vec!["Charlie", "Adam", "Bella", "Dorothy"]);
}

#[tokio::test]
async fn test_corrupt_cached_audio_is_deleted_then_resynthesized() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture.write_audio("Bella", "hi", b"truncated garbage");
    fixture.player.reject(b"truncated garbage".to_vec());

    let result = fixture.say(Some("Bella"), "hi").await;

    assert_eq!(exit_code(&result), 1);
    assert!(matches!(
        result.unwrap().outcomes[0].result,
        Err(SayError::Playback { .. })
    ));
    assert!(!fixture.audio_path("Bella", "hi").exists());
    assert!(fixture.provider.synthesis_calls().is_empty());

    let result = fixture.say(Some("Bella"), "hi").await;

    assert_eq!(exit_code(&result), 0);
    assert_eq!(fixture.provider.synthesis_calls().len(), 1);
    assert_eq!(
        std::fs::read(fixture.audio_path("Bella", "hi")).unwrap(),
        MockTextToSpeech::audio_for("Bella", "hi")
    );
}

#[tokio::test]
async fn test_synthesis_failure_writes_nothing_and_plays_nothing() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture
        .provider
        .set_synthesis_behavior(MockBehavior::AlwaysError);

    let result = fixture.say(Some("Rachel"), "hello").await;

    assert_eq!(exit_code(&result), 1);
    assert!(matches!(
        result.unwrap().outcomes[0].result,
        Err(SayError::Synthesis { .. })
    ));
    assert!(!fixture.audio_path("Rachel", "hello").exists());
    assert!(fixture.player.played().is_empty());
}

#[tokio::test]
async fn test_fresh_audio_playback_failure_keeps_cache_entry() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture
        .player
        .reject(MockTextToSpeech::audio_for("Rachel", "hello"));

    let result = fixture.say(Some("Rachel"), "hello").await;

    assert_eq!(exit_code(&result), 1);
    assert!(matches!(
        result.unwrap().outcomes[0].result,
        Err(SayError::Playback { .. })
    ));
    assert!(fixture.audio_path("Rachel", "hello").exists());
}

#[tokio::test]
async fn test_empty_gender_set_is_fatal_configuration_error() {
    let mut fixture = Fixture::bella_and_rachel();

    let result = fixture.say(Some("Male"), "hello").await;

    assert_eq!(exit_code(&result), 1);
    assert!(matches!(result, Err(SayError::Configuration(_))));
    assert!(fixture.provider.synthesis_calls().is_empty());
    assert!(fixture.player.played().is_empty());
}

#[tokio::test]
async fn test_unset_voice_uses_configured_default() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture.default_voice = "Bella".to_string();

    let result = fixture.say(None, "hello").await;

    assert_eq!(exit_code(&result), 0);
    assert_eq!(result.unwrap().outcomes[0].voice, "Bella");
}

#[tokio::test]
async fn test_unknown_default_voice_is_configuration_error() {
    let mut fixture = Fixture::new(vec![Voice::new("b", "Bella")], vec![]);

    let result = fixture.say(None, "hello").await;

    assert!(matches!(result, Err(SayError::Configuration(_))));
}

#[tokio::test]
async fn test_random_alias_picks_some_voice() {
    let mut fixture = Fixture::bella_and_rachel();

    let result = fixture.say(Some("Random"), "hello").await;

    assert_eq!(exit_code(&result), 0);
    let voice = result.unwrap().outcomes[0].voice.clone();
    assert!(voice == "Bella" || voice == "Rachel", "unexpected voice {voice}");
}

#[tokio::test]
async fn test_fingerprint_distinguishes_voice_and_text() {
    let mut fixture = Fixture::new(
        vec![Voice::new("b", "Bella"), Voice::new("r", "Rachel")],
        vec![Model::new("eleven_v2")],
    );

    fixture.say(Some("Bella"), "hello").await.unwrap();
    fixture.say(Some("Rachel"), "hello").await.unwrap();
    fixture.say(Some("Bella"), "hello again").await.unwrap();

    assert_eq!(fixture.provider.synthesis_calls().len(), 3);
    let cached = std::fs::read_dir(fixture.cache_dir.path().join("audio"))
        .unwrap()
        .count();
    assert_eq!(cached, 3);
}

#[tokio::test]
async fn test_playback_failures_are_per_voice() {
    let mut fixture = Fixture::bella_and_rachel();
    fixture.player.set_always_fail(true);

    let result = fixture.say(Some("All"), "hello").await;

    assert_eq!(exit_code(&result), 1);
    let report = result.unwrap();
    assert_eq!(report.failures().count(), 2);
    for outcome in &report.outcomes {
        assert!(matches!(outcome.result, Err(SayError::Playback { .. })));
    }
    // Freshly synthesized audio stays cached even though it did not play
    assert!(fixture.audio_path("Bella", "hello").exists());
    assert!(fixture.audio_path("Rachel", "hello").exists());
}
