pub mod admin;
pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::interests::handlers as interests;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates
        .route(
            "/api/v1/candidates",
            post(candidates::handle_upsert_candidate).get(candidates::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/parse-resume",
            post(candidates::handle_parse_resume),
        )
        .route(
            "/api/v1/candidates/import-linkedin",
            post(candidates::handle_import_linkedin),
        )
        .route(
            "/api/v1/candidates/extract-skills",
            post(candidates::handle_extract_skills),
        )
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        .route(
            "/api/v1/candidates/:id/interests",
            get(candidates::handle_candidate_interests),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route(
            "/api/v1/jobs/generate-requirements",
            post(matching::handle_generate_requirements),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Matching
        .route("/api/v1/jobs/:id/match", get(matching::handle_match_job))
        .route("/api/v1/jobs/:id/matches", get(matching::handle_stored_matches))
        .route(
            "/api/v1/jobs/:id/score/:candidate_id",
            get(matching::handle_match_score),
        )
        // Interests
        .route("/api/v1/interests", post(interests::handle_express_interest))
        // Admin
        .route("/api/v1/admin/reset", delete(admin::handle_reset_database))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::db::test_pool;
    use crate::llm_client::fake::ScriptedCompletion;
    use crate::llm_client::{CompletionService, UnconfiguredCompletion};
    use crate::matching::TalentMatcher;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            anthropic_api_key: None,
            port: 0,
            rust_log: "info".to_string(),
            llm_timeout_secs: 1,
            llm_max_attempts: 1,
            default_match_limit: 3,
            cors_allowed_origins: Vec::new(),
            enable_database_reset: false,
        }
    }

    async fn test_app(config: Config) -> Router {
        test_app_with(config, Arc::new(UnconfiguredCompletion)).await
    }

    async fn test_app_with(config: Config, completion: Arc<dyn CompletionService>) -> Router {
        let state = AppState {
            db: test_pool().await,
            matcher: Arc::new(TalentMatcher::new(completion.clone())),
            completion,
            config,
        };
        build_router(state)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_candidate(app: &Router, name: &str, skills: Value, experience: Option<&str>) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/candidates",
            Some(json!({
                "name": name,
                "email": format!("{}@example.com", name.to_lowercase()),
                "skills": skills,
                "experience": experience,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["candidate"]["id"].as_i64().unwrap()
    }

    async fn create_python_job(app: &Router) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/jobs",
            Some(json!({
                "title": "Senior Python Developer",
                "company": "TechCorp",
                "requirements": "5+ years Python, AWS",
                "required_skills": ["Python", "AWS"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_database_and_ai_flag() {
        let app = test_app(test_config()).await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
        assert_eq!(body["ai_configured"], false);
    }

    #[tokio::test]
    async fn test_candidate_upsert_by_email() {
        let app = test_app(test_config()).await;
        let id = create_candidate(&app, "Alice", json!("Python, Django, python"), None).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates",
            Some(json!({
                "name": "Alice Johnson",
                "email": "ALICE@example.com",
                "skills": ["Go"],
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["created"], false);
        assert_eq!(body["candidate"]["id"], id);
        assert_eq!(body["candidate"]["skills"], json!(["Go"]));

        let (_, list) = send(&app, Method::GET, "/api/v1/candidates", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_candidate_validation_and_not_found() {
        let app = test_app(test_config()).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates",
            Some(json!({"name": "Bob", "email": "not-an-email"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(&app, Method::GET, "/api/v1/candidates/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_job_requires_title() {
        let app = test_app(test_config()).await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/jobs",
            Some(json!({"title": "  ", "company": "TechCorp", "requirements": "Python"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_job_defaults_and_fetch() {
        let app = test_app(test_config()).await;
        let id = create_python_job(&app).await;

        let (status, body) = send(&app, Method::GET, &format!("/api/v1/jobs/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_type"], "Full-time");
        assert_eq!(body["required_skills"], json!(["Python", "AWS"]));

        let (status, _) = send(&app, Method::GET, "/api/v1/jobs/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_match_ranks_with_fallback_and_stores_results() {
        let app = test_app(test_config()).await;
        let job_id = create_python_job(&app).await;
        let alice = create_candidate(&app, "Alice", json!(["Python", "Django", "AWS"]), Some("6 years")).await;
        let bob = create_candidate(&app, "Bob", json!(["JavaScript", "React"]), Some("4 years")).await;
        let carol = create_candidate(&app, "Carol", json!(["Python"]), None).await;
        let _dave = create_candidate(&app, "Dave", json!([]), None).await;

        let (status, body) =
            send(&app, Method::GET, &format!("/api/v1/jobs/{job_id}/match"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["candidates_evaluated"], 4);

        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 3);
        let ids: Vec<i64> = matches.iter().map(|m| m["candidate_id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![alice, carol, bob]);
        assert_eq!(matches[0]["score"], 100.0);
        assert_eq!(matches[0]["match_category"], "Strong Match");
        assert_eq!(matches[0]["scorer_backend"], "heuristic");
        assert_eq!(matches[1]["score"], 45.0);
        assert_eq!(matches[2]["score"], 30.0);

        let (status, stored) =
            send(&app, Method::GET, &format!("/api/v1/jobs/{job_id}/matches"), None).await;
        assert_eq!(status, StatusCode::OK);
        let stored = stored.as_array().unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0]["candidate_name"], "Alice");
        assert_eq!(stored[0]["candidate_skills"], json!(["Python", "Django", "AWS"]));
    }

    #[tokio::test]
    async fn test_single_pair_score() {
        let app = test_app(test_config()).await;
        let job_id = create_python_job(&app).await;
        let alice = create_candidate(&app, "Alice", json!(["python", "aws"]), Some("2 years")).await;

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/jobs/{job_id}/score/{alice}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 100.0);
        assert_eq!(body["match_category"], "Strong Match");

        let (_, stored) =
            send(&app, Method::GET, &format!("/api/v1/jobs/{job_id}/matches"), None).await;
        assert!(stored.as_array().unwrap().is_empty());

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/v1/jobs/{job_id}/score/404"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_match_limit_query_and_unknown_job() {
        let app = test_app(test_config()).await;
        let job_id = create_python_job(&app).await;
        create_candidate(&app, "Alice", json!(["Python"]), None).await;
        create_candidate(&app, "Bob", json!(["AWS"]), None).await;

        let (_, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/jobs/{job_id}/match?limit=1"),
            None,
        )
        .await;
        assert_eq!(body["matches"].as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, "/api/v1/jobs/77/match", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_requirements_falls_back_to_stub() {
        let app = test_app(test_config()).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/jobs/generate-requirements",
            Some(json!({"description": "We need someone to build dashboards"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["requirements"]["title"], "Position");
        assert_eq!(
            body["requirements"]["company_context"],
            "We need someone to build dashboards"
        );

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/jobs/generate-requirements",
            Some(json!({"description": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_interest_flow() {
        let app = test_app(test_config()).await;
        let job_id = create_python_job(&app).await;
        let alice = create_candidate(&app, "Alice", json!(["Python"]), None).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/interests",
            Some(json!({"candidate_id": alice, "job_id": job_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, interests) = send(
            &app,
            Method::GET,
            &format!("/api/v1/candidates/{alice}/interests"),
            None,
        )
        .await;
        assert_eq!(interests[0]["title"], "Senior Python Developer");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/interests",
            Some(json!({"candidate_id": alice, "job_id": 999})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reset_is_forbidden_unless_enabled() {
        let app = test_app(test_config()).await;
        let (status, body) = send(&app, Method::DELETE, "/api/v1/admin/reset", None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");

        let app = test_app(Config {
            enable_database_reset: true,
            ..test_config()
        })
        .await;
        create_python_job(&app).await;
        let (status, _) = send(&app, Method::DELETE, "/api/v1/admin/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, jobs) = send(&app, Method::GET, "/api/v1/jobs", None).await;
        assert!(jobs.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_parse_resume_stores_candidate() {
        let completion = Arc::new(ScriptedCompletion::replying(
            r#"{
                "name": "Priya Patel",
                "email": null,
                "skills": ["Python", "Airflow"],
                "experience": [{"title": "Data Engineer", "company": "Acme", "duration": "2021-2024"}],
                "summary": "Data engineer focused on pipelines."
            }"#,
        ));
        let app = test_app_with(test_config(), completion).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/parse-resume",
            Some(json!({"text": "Priya Patel, Data Engineer", "email": "Priya@Example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["created"], true);
        assert_eq!(body["parsed_data"]["name"], "Priya Patel");

        let id = body["candidate_id"].as_i64().unwrap();
        let (_, candidate) = send(&app, Method::GET, &format!("/api/v1/candidates/{id}"), None).await;
        assert_eq!(candidate["email"], "priya@example.com");
        assert_eq!(candidate["skills"], json!(["Python", "Airflow"]));
        assert_eq!(candidate["experience"], "Data engineer focused on pipelines.");
        assert_eq!(candidate["raw_data"]["experience"][0]["company"], "Acme");
    }

    #[tokio::test]
    async fn test_parse_resume_without_any_email_is_rejected() {
        let completion = Arc::new(ScriptedCompletion::replying(r#"{"name": "No Mail"}"#));
        let app = test_app_with(test_config(), completion).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/parse-resume",
            Some(json!({"text": "No Mail"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/parse-resume",
            Some(json!({"text": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparseable_resume_stores_nothing() {
        let app = test_app(test_config()).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/parse-resume",
            Some(json!({"text": "Jane Roe", "email": "jane@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["candidate_id"], Value::Null);
        assert_eq!(body["parsed_data"]["name"], "Unknown");

        let (_, list) = send(&app, Method::GET, "/api/v1/candidates", None).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_linkedin_creates_then_updates() {
        let app = test_app(test_config()).await;
        let request = json!({"profile_url": "https://www.linkedin.com/in/john-doe"});

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/import-linkedin",
            Some(request.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["profile_data"]["name"], "John Doe");
        assert_eq!(body["profile_data"]["is_fallback"], true);

        let id = body["candidate_id"].as_i64().unwrap();
        let (_, candidate) = send(&app, Method::GET, &format!("/api/v1/candidates/{id}"), None).await;
        assert_eq!(candidate["email"], "john.doe@email.com");
        assert_eq!(candidate["linkedin_url"], "https://www.linkedin.com/in/john-doe");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/import-linkedin",
            Some(request),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["created"], false);
        assert_eq!(body["candidate_id"], id);
    }

    #[tokio::test]
    async fn test_import_linkedin_rejects_non_profile_urls() {
        let app = test_app(test_config()).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/import-linkedin",
            Some(json!({"profile_url": "https://example.com/in/john"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_extract_skills_endpoint() {
        let completion = Arc::new(ScriptedCompletion::replying(r#"["Kubernetes", "Go"]"#));
        let app = test_app_with(test_config(), completion).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/candidates/extract-skills",
            Some(json!({"text": "Runs Go services on Kubernetes"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["Kubernetes", "Go"]));
    }
}
