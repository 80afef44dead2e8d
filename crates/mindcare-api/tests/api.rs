use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use jiff::{SignedDuration, Timestamp};
use serde_json::{Value, json};
use tower::ServiceExt;

use mindcare_api::activity::DocumentActivityStore;
use mindcare_api::state::AppState;
use mindcare_auth::clock::ManualClock;
use mindcare_auth::jwt::TokenSigner;
use mindcare_auth::session::{SessionManager, SessionPolicy};
use mindcare_coach::Coach;
use mindcare_coach::error::CoachError;
use mindcare_coach::provider::ChatProvider;
use mindcare_core::keys;
use mindcare_storage::memory::MemoryStore;
use mindcare_storage::store::DocumentStore;

const ANA: &str = "ana@example.com";
const BEN: &str = "ben@example.com";

struct StubProvider {
    reply: Option<&'static str>,
    delay: Duration,
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<String, CoachError> {
        tokio::time::sleep(self.delay).await;
        self.reply
            .map(str::to_string)
            .ok_or_else(|| CoachError::Request("connection refused".to_string()))
    }
}

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    sessions: Arc<SessionManager>,
}

fn test_app(provider: StubProvider, coach_timeout: Duration) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap()));
    let sessions = SessionManager::new(
        TokenSigner::from_secret(b"api-test-secret").unwrap(),
        SessionPolicy::default(),
        clock.clone(),
        Arc::new(DocumentActivityStore::new(store.clone())),
    );
    let sessions = Arc::new(sessions);
    let coach = Coach::new(Arc::new(provider), coach_timeout);
    let state = AppState::new(
        store.clone(),
        sessions.clone(),
        Arc::new(coach),
        clock.clone(),
    );

    TestApp {
        router: mindcare_api::router(state),
        store,
        clock,
        sessions,
    }
}

fn default_app() -> TestApp {
    test_app(
        StubProvider {
            reply: None,
            delay: Duration::ZERO,
        },
        Duration::from_secs(5),
    )
}

impl TestApp {
    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn signup(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/signup",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn login(&self, email: &str, password: &str) -> StatusCode {
        let body = json!({ "email": email, "password": password });
        self.send("POST", "/login", None, Some(body)).await.0
    }

    async fn session_markers(&self) -> usize {
        self.store.list(keys::SESSIONS_PREFIX).await.unwrap().len()
    }

    fn advance_hours(&self, hours: i64) {
        self.clock.advance(SignedDuration::from_hours(hours));
    }
}

/// Answers scoring `value` on every depression item and 0 elsewhere.
fn depression_answers(value: u8) -> Value {
    const DEPRESSION: [u8; 7] = [3, 5, 10, 13, 16, 17, 21];
    let answers: serde_json::Map<String, Value> = (1..=21u8)
        .map(|id| {
            let v = if DEPRESSION.contains(&id) { value } else { 0 };
            (id.to_string(), json!(v))
        })
        .collect();
    Value::Object(answers)
}

#[tokio::test]
async fn health_is_public() {
    let app = default_app();
    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn questionnaire_lists_21_items() {
    let app = default_app();
    let (status, body) = app.send("GET", "/questionnaire", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "dass21");
    assert_eq!(body["questions"].as_array().unwrap().len(), 21);
    assert_eq!(body["questions"][0]["dimension"], "stress");
}

#[tokio::test]
async fn score_endpoint_doubles_and_bands() {
    let app = default_app();
    let (status, body) = app
        .send(
            "POST",
            "/assessments/score",
            None,
            Some(json!({ "answers": depression_answers(3) })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["depressionScore"], 42);
    assert_eq!(body["anxietyScore"], 0);
    assert_eq!(body["summary"]["depression"]["severity"], "Extremely Severe");
    assert_eq!(body["summary"]["stress"]["severity"], "Normal");
    assert_eq!(body["summary"]["overall"], "Mild Concern");
}

#[tokio::test]
async fn score_endpoint_rejects_incomplete_answers() {
    let app = default_app();
    let mut answers = depression_answers(1);
    answers.as_object_mut().unwrap().remove("12");

    let (status, body) = app
        .send(
            "POST",
            "/assessments/score",
            None,
            Some(json!({ "answers": answers })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "question 12 has no answer");
}

#[tokio::test]
async fn short_password_is_rejected_before_anything_is_stored() {
    let app = default_app();
    let (status, body) = app
        .send(
            "POST",
            "/signup",
            None,
            Some(json!({ "email": ANA, "password": "12345" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters.");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = default_app();
    let (status, body) = app
        .send(
            "POST",
            "/signup",
            None,
            Some(json!({ "email": "ana@example", "password": "123456" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid email.");
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = default_app();
    app.signup(ANA, "123456").await;

    let (status, body) = app
        .send(
            "POST",
            "/signup",
            None,
            Some(json!({ "email": ANA, "password": "abcdef" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists.");

    // The first account's credentials are untouched.
    assert_eq!(app.login(ANA, "123456").await, StatusCode::OK);
    assert_eq!(app.login(ANA, "abcdef").await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = default_app();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_distinguishes_unknown_user_and_wrong_password() {
    let app = default_app();
    app.signup(ANA, "correct-horse").await;

    let (status, body) = app
        .send(
            "POST",
            "/login",
            None,
            Some(json!({ "email": BEN, "password": "correct-horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, body) = app
        .send(
            "POST",
            "/login",
            None,
            Some(json!({ "email": ANA, "password": "wrong-horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Password incorrect");

    let (status, body) = app
        .send(
            "POST",
            "/login",
            None,
            Some(json!({ "email": ANA, "password": "correct-horse" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful!");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn reset_password_replaces_credentials() {
    let app = default_app();
    app.signup(ANA, "old-secret").await;

    let (status, _) = app
        .send(
            "POST",
            "/reset-password",
            None,
            Some(json!({ "email": BEN, "newPassword": "new-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            "POST",
            "/reset-password",
            None,
            Some(json!({ "email": "not-an-email", "newPassword": "new-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please enter a valid email.");

    let (status, body) = app
        .send(
            "POST",
            "/reset-password",
            None,
            Some(json!({ "email": ANA, "newPassword": "new" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters.");

    let (status, _) = app
        .send(
            "POST",
            "/reset-password",
            None,
            Some(json!({ "email": ANA, "newPassword": "new-secret" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.login(ANA, "old-secret").await, StatusCode::UNAUTHORIZED);
    assert_eq!(app.login(ANA, "new-secret").await, StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let app = default_app();

    let (status, body) = app
        .send("GET", &format!("/mentalhealthresults/{ANA}"), None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app
        .send(
            "GET",
            &format!("/mentalhealthresults/{ANA}"),
            Some("not.a.jwt"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn results_are_owner_scoped() {
    let app = default_app();
    let ana = app.signup(ANA, "123456").await;
    app.signup(BEN, "123456").await;

    let (status, _) = app
        .send("GET", &format!("/mentalhealthresults/{BEN}"), Some(&ana), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "POST",
            "/mentalhealthresults",
            Some(&ana),
            Some(json!({ "userEmail": BEN, "answers": depression_answers(1) })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn results_are_recomputed_and_listed_newest_first() {
    let app = default_app();
    let token = app.signup(ANA, "123456").await;

    let (status, body) = app
        .send(
            "POST",
            "/mentalhealthresults",
            Some(&token),
            Some(json!({ "userEmail": ANA, "answers": depression_answers(1) })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Saved Successfully");

    app.advance_hours(1);
    let (status, _) = app
        .send(
            "POST",
            "/mentalhealthresults",
            Some(&token),
            Some(json!({
                "userEmail": ANA,
                "answers": depression_answers(3),
                "depressionScore": 42
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send("GET", &format!("/mentalhealthresults/{ANA}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["depressionScore"], 42);
    assert_eq!(results[0]["summary"]["depression"]["severity"], "Extremely Severe");
    assert_eq!(results[1]["depressionScore"], 14);
    assert_eq!(results[1]["summary"]["depression"]["severity"], "Moderate");
    assert_eq!(results[1]["userEmail"], ANA);
}

#[tokio::test]
async fn results_with_inconsistent_scores_are_rejected() {
    let app = default_app();
    let token = app.signup(ANA, "123456").await;

    let (status, body) = app
        .send(
            "POST",
            "/mentalhealthresults",
            Some(&token),
            Some(json!({
                "userEmail": ANA,
                "answers": depression_answers(3),
                "depressionScore": 21
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Depression"));

    let mut incomplete = depression_answers(1);
    incomplete.as_object_mut().unwrap().remove("1");
    let (status, _) = app
        .send(
            "POST",
            "/mentalhealthresults",
            Some(&token),
            Some(json!({ "userEmail": ANA, "answers": incomplete })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .send("GET", &format!("/mentalhealthresults/{ANA}"), Some(&token), None)
        .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn idle_session_is_rejected_after_24_hours() {
    let app = default_app();
    let token = app.signup(ANA, "123456").await;
    let uri = format!("/mentalhealthresults/{ANA}");

    app.advance_hours(23);
    assert_eq!(app.send("GET", &uri, Some(&token), None).await.0, StatusCode::OK);

    app.advance_hours(25);
    let (status, _) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The marker is gone, so the token stays dead.
    let (status, _) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn active_session_still_expires_after_seven_days() {
    let app = default_app();
    let token = app.signup(ANA, "123456").await;
    let uri = format!("/mentalhealthresults/{ANA}");

    for _ in 0..8 {
        app.advance_hours(20);
        assert_eq!(app.send("GET", &uri, Some(&token), None).await.0, StatusCode::OK);
    }
    // 160h elapsed; 168h is the absolute limit.
    app.advance_hours(8);
    let (status, body) = app.send("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "token expired");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = default_app();
    let token = app.signup(ANA, "123456").await;

    let (status, body) = app.send("GET", "/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "active");

    let (status, _) = app.send("POST", "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send("GET", &format!("/mentalhealthresults/{ANA}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.send("GET", "/session", Some(&token), None).await;
    assert_ne!(body["state"], "active");
}

#[tokio::test]
async fn slow_recommendation_provider_yields_fallback() {
    let app = test_app(
        StubProvider {
            reply: Some("{}"),
            delay: Duration::from_secs(10),
        },
        Duration::from_millis(50),
    );
    let token = app.signup(ANA, "123456").await;

    let (status, body) = app
        .send(
            "POST",
            "/recommendations",
            Some(&token),
            Some(json!({ "depression": 30, "anxiety": 12, "stress": 20, "mood": "low" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::to_value(mindcare_coach::content::fallback_content()).unwrap()
    );
}

#[tokio::test]
async fn recommendation_content_comes_from_the_provider() {
    let app = test_app(
        StubProvider {
            reply: Some(
                r#"Here: {"meditations": [], "musics": [], "quotes": ["q"], "affirmations": ["a"], "tips": ["t"]}"#,
            ),
            delay: Duration::ZERO,
        },
        Duration::from_secs(5),
    );
    let token = app.signup(ANA, "123456").await;

    let (status, body) = app
        .send("POST", "/recommendations", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quotes"], json!(["q"]));

    let (status, _) = app
        .send("POST", "/recommendations", None, Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn voice_analyses_are_capped_and_newest_first() {
    let app = default_app();
    let token = app.signup(ANA, "123456").await;

    for i in 0..25i64 {
        let at = Timestamp::from_second(1_700_000_000 + i * 60).unwrap();
        let (status, body) = app
            .send(
                "POST",
                "/voice-analysis",
                Some(&token),
                Some(json!({
                    "userEmail": ANA,
                    "pitch": 180.5,
                    "speed": 96.0,
                    "emotion": "calm",
                    "mood": format!("entry {i}"),
                    "timestamp": at.to_string(),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["mood"], format!("entry {i}"));
    }

    let (status, body) = app
        .send("GET", &format!("/voice-analysis/{ANA}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 20);
    assert_eq!(items[0]["mood"], "entry 24");
    assert_eq!(items[19]["mood"], "entry 5");

    let (status, _) = app
        .send("GET", &format!("/voice-analysis/{BEN}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn session_markers_do_not_outlive_their_sessions() {
    let app = default_app();
    let ana = app.signup(ANA, "123456").await;
    app.signup(BEN, "123456").await;
    assert_eq!(app.session_markers().await, 2);

    // Ben abandons his token; Ana keeps hers warm until it expires.
    for _ in 0..8 {
        app.advance_hours(20);
        app.send("GET", &format!("/mentalhealthresults/{ANA}"), Some(&ana), None)
            .await;
    }
    assert_eq!(app.sessions.prune_idle().await.unwrap(), 1);
    assert_eq!(app.session_markers().await, 1);

    app.advance_hours(10);
    let (status, body) = app
        .send("GET", &format!("/mentalhealthresults/{ANA}"), Some(&ana), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "token expired");
    assert_eq!(app.session_markers().await, 0);
}
