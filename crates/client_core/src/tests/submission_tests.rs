use crate::{
    tests::{analysis, entry, greeting, server_error, ScriptedBackend, TEST_DEADLINE},
    AnalyzerSession, BackendError,
};
use tokio::{task::yield_now, time::timeout};

#[tokio::test]
async fn empty_text_is_forwarded_unchanged() {
    let backend = ScriptedBackend::new();
    let session = AnalyzerSession::new(backend.clone());
    backend.push_analysis(Ok(greeting())).await;

    session.submission().submit("").await;

    assert_eq!(backend.analyzed_texts().await, vec![String::new()]);
    assert_eq!(session.submission().snapshot().await.result, Some(greeting()));
}

#[tokio::test]
async fn reply_without_data_still_clears_input_and_refreshes() {
    let backend = ScriptedBackend::new();
    let session = AnalyzerSession::new(backend.clone());
    backend.push_analysis(Ok(greeting())).await;
    session.submission().submit("first").await;
    backend.push_empty_analysis().await;
    backend.push_history(Ok(vec![entry(1, "stored")])).await;

    session.submission().set_input("hello").await;
    session.submission().submit_input().await;

    let snapshot = session.submission().snapshot().await;
    assert!(!snapshot.submitting);
    assert!(snapshot.result.is_none());
    assert_eq!(snapshot.input, "");
    assert_eq!(backend.history_fetches().await, 2);
    assert_eq!(
        session.history().snapshot().await.entries,
        vec![entry(1, "stored")]
    );
}

#[tokio::test]
async fn previous_result_is_hidden_while_new_request_is_in_flight() {
    let backend = ScriptedBackend::new();
    let session = AnalyzerSession::new(backend.clone());
    backend.push_analysis(Ok(greeting())).await;
    session.submission().submit("first").await;
    assert!(session.submission().snapshot().await.result.is_some());

    let reply = backend.hold_analysis().await;
    let observe = async {
        while backend.analyzed_texts().await.len() < 2 {
            yield_now().await;
        }
        let during = session.submission().snapshot().await;
        assert!(during.submitting);
        assert!(during.result.is_none());
        reply.send(Ok(Some(analysis("second")))).expect("deliver reply");
    };

    timeout(TEST_DEADLINE, async {
        tokio::join!(session.submission().submit("second"), observe);
    })
    .await
    .expect("submission finished");

    let after = session.submission().snapshot().await;
    assert!(!after.submitting);
    assert_eq!(after.result, Some(analysis("second")));
}

#[tokio::test]
async fn history_refresh_completes_before_submitting_clears() {
    let backend = ScriptedBackend::new();
    let session = AnalyzerSession::new(backend.clone());
    backend.push_analysis(Ok(greeting())).await;
    let history_reply = backend.hold_history().await;

    let observe = async {
        while !session.history().snapshot().await.loading {
            yield_now().await;
        }
        let during = session.submission().snapshot().await;
        assert!(during.submitting);
        assert_eq!(during.result, Some(greeting()));
        assert_eq!(during.input, "");
        history_reply
            .send(Ok(vec![entry(1, "Greeting")]))
            .expect("deliver history");
    };

    timeout(TEST_DEADLINE, async {
        tokio::join!(session.submission().submit("hello"), observe);
    })
    .await
    .expect("submission finished");

    assert!(!session.submission().snapshot().await.submitting);
    let history = session.history().snapshot().await;
    assert!(!history.loading);
    assert_eq!(history.entries, vec![entry(1, "Greeting")]);
}

#[tokio::test]
async fn every_failure_kind_clears_the_flag_and_keeps_input() {
    let failures = [
        server_error("analyze"),
        BackendError::malformed("analyze", "expected value at line 1 column 1"),
    ];

    for failure in failures {
        let backend = ScriptedBackend::new();
        let session = AnalyzerSession::new(backend.clone());
        backend.push_analysis(Err(failure)).await;

        session.submission().set_input("draft").await;
        session.submission().submit_input().await;

        let snapshot = session.submission().snapshot().await;
        assert!(!snapshot.submitting);
        assert!(snapshot.result.is_none());
        assert_eq!(snapshot.input, "draft");
        assert_eq!(backend.history_fetches().await, 0);
    }
}

#[tokio::test]
async fn late_response_from_superseded_submission_is_discarded() {
    let backend = ScriptedBackend::new();
    let session = AnalyzerSession::new(backend.clone());
    let first_reply = backend.hold_analysis().await;
    let second_reply = backend.hold_analysis().await;
    backend.push_history(Ok(vec![entry(2, "second")])).await;
    session.submission().set_input("typed").await;

    let drive = async {
        while backend.analyzed_texts().await.len() < 2 {
            yield_now().await;
        }
        second_reply
            .send(Ok(Some(analysis("second"))))
            .expect("deliver second");
        while session.submission().snapshot().await.submitting {
            yield_now().await;
        }
        session.submission().set_input("next draft").await;
        first_reply
            .send(Ok(Some(analysis("first"))))
            .expect("deliver first");
    };

    timeout(TEST_DEADLINE, async {
        tokio::join!(
            session.submission().submit("first"),
            session.submission().submit("second"),
            drive
        );
    })
    .await
    .expect("submissions finished");

    let snapshot = session.submission().snapshot().await;
    assert!(!snapshot.submitting);
    assert_eq!(snapshot.result, Some(analysis("second")));
    assert_eq!(snapshot.input, "next draft");
    assert_eq!(backend.history_fetches().await, 1);
}

#[tokio::test]
async fn early_response_from_superseded_submission_keeps_flag_raised() {
    let backend = ScriptedBackend::new();
    let session = AnalyzerSession::new(backend.clone());
    let first_reply = backend.hold_analysis().await;
    let second_reply = backend.hold_analysis().await;

    let drive = async {
        while backend.analyzed_texts().await.len() < 2 {
            yield_now().await;
        }
        first_reply
            .send(Ok(Some(analysis("first"))))
            .expect("deliver first");
        for _ in 0..8 {
            yield_now().await;
        }
        let during = session.submission().snapshot().await;
        assert!(during.submitting);
        assert!(during.result.is_none());
        second_reply
            .send(Ok(Some(analysis("second"))))
            .expect("deliver second");
    };

    timeout(TEST_DEADLINE, async {
        tokio::join!(
            session.submission().submit("first"),
            session.submission().submit("second"),
            drive
        );
    })
    .await
    .expect("submissions finished");

    let snapshot = session.submission().snapshot().await;
    assert!(!snapshot.submitting);
    assert_eq!(snapshot.result, Some(analysis("second")));
    assert_eq!(backend.history_fetches().await, 1);
}
