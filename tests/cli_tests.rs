//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use std::fs;

use predicates::prelude::*;

use common::{fixture_path, Sandbox};

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("submit"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("agentcamp"));
}

// ─────────────────────────────────────────────────────────────────
// Knowledge Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_ingest_file() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ingest", "--source", "meeting_stt", "--file"])
        .arg(fixture_path("transcript.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingested 6 items from meeting_stt"));

    let kb = sandbox.document("knowledge.json");
    let items = kb["items"].as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["tag"], "process");
    assert_eq!(items[1]["tag"], "rule");
    assert_eq!(items[2]["tag"], "pitfall");
    assert_eq!(items[3]["tag"], "glossary");
    assert_eq!(items[5]["text"], "금요일 오후 배포는 금지입니다.");
    assert!(items[0]["id"].as_str().unwrap().starts_with("meeting_stt-"));
    assert!(items[5]["id"].as_str().unwrap().ends_with("-5"));
}

#[test]
fn test_ingest_appends() {
    let sandbox = Sandbox::new();
    for text in ["첫 번째 메모", "두 번째 메모\n세 번째 메모"] {
        sandbox
            .cmd()
            .args(["ingest", "--source", "slack_discord", "--text", text])
            .assert()
            .success();
    }

    let kb = sandbox.document("knowledge.json");
    assert_eq!(kb["items"].as_array().unwrap().len(), 3);
    assert_eq!(kb["items"][2]["text"], "세 번째 메모");
    assert_eq!(kb["items"][2]["source"], "slack_discord");
}

#[test]
fn test_ingest_caps_batch() {
    let sandbox = Sandbox::new();
    let text = (0..60).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
    sandbox
        .cmd()
        .args(["ingest", "--source", "client_stt", "--text", &text])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingested 50 items"));
}

#[test]
fn test_ingest_blank_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ingest", "--source", "meeting_stt", "--text", "  \n \n"])
        .assert()
        .failure()
        .code(50)
        .stderr(predicate::str::contains("E500"));
}

#[test]
fn test_ingest_file_with_invalid_utf8() {
    let sandbox = Sandbox::new();
    let path = sandbox.path().join("broken.txt");
    fs::write(&path, b"deploy error \xff\xfe today\n\xc3 second line\n").unwrap();

    sandbox
        .cmd()
        .args(["ingest", "--source", "meeting_stt", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingested 2 items from meeting_stt"));

    let kb = sandbox.document("knowledge.json");
    assert_eq!(kb["items"][0]["text"], "deploy error  today");
    assert_eq!(kb["items"][0]["tag"], "pitfall");
    assert_eq!(kb["items"][1]["text"], "second line");
}

#[test]
fn test_ingest_missing_file() {
    Sandbox::new()
        .cmd()
        .args(["ingest", "--source", "meeting_stt", "--file", "nope.txt"])
        .assert()
        .failure()
        .code(20);
}

#[test]
fn test_knowledge_listing() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("knowledge")
        .assert()
        .success()
        .stdout(predicate::str::contains("Knowledge base is empty"));

    sandbox
        .cmd()
        .args(["ingest", "--source", "meeting_stt", "--file"])
        .arg(fixture_path("transcript.txt"))
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["knowledge", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("request_id"))
        .stdout(predicate::str::contains("금지입니다"))
        .stdout(predicate::str::contains("스프린트").not());
}

// ─────────────────────────────────────────────────────────────────
// Routing and Answers
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_route() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["route", "UI 개편 리스크는?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sam Lee"));

    sandbox
        .cmd()
        .args(["route", "어떤 로그를 봐야 하나요?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jin Park"));
}

#[test]
fn test_route_blank_rejected() {
    Sandbox::new()
        .cmd()
        .args(["route", "   "])
        .assert()
        .failure()
        .code(50);
}

#[test]
fn test_ask_templated_answer() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["ingest", "--source", "meeting_stt", "--file"])
        .arg(fixture_path("transcript.txt"))
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["ask", "--user", "jisoo", "이번 KPI 지표는 뭔가요?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("라우팅: JH Kim"))
        .stdout(predicate::str::contains("[JH Kim | PM]"))
        .stdout(predicate::str::contains("질문: 이번 KPI 지표는 뭔가요?"))
        .stdout(predicate::str::contains("- (회사 지식 참고) 금요일 오후 배포는 금지입니다."))
        .stdout(predicate::str::contains("권장 액션(오늘 OJT 관점):"));

    let sessions = sandbox.document("sessions.json");
    assert_eq!(sessions["users"]["jisoo"]["questions"], 1);
    assert_eq!(sessions["users"]["jisoo"]["adapt_score"], 50);
}

#[test]
fn test_ask_remote_provider_without_key() {
    Sandbox::new()
        .cmd()
        .env("AGENTCAMP_PROVIDER", "openai")
        .args(["ask", "질문"])
        .assert()
        .failure()
        .code(30)
        .stderr(predicate::str::contains("E301"))
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn test_ask_provider_override_skips_configured_provider() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("AGENTCAMP_PROVIDER", "openai")
        .args(["ask", "--provider", "mock", "이번 기능의 KPI는?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("라우팅: JH Kim"))
        .stdout(predicate::str::contains("[JH Kim | PM]"));
}

#[test]
fn test_ask_unknown_provider_override() {
    Sandbox::new()
        .cmd()
        .args(["ask", "--provider", "gemini", "질문"])
        .assert()
        .failure()
        .code(30)
        .stderr(predicate::str::contains("E300"));
}

// ─────────────────────────────────────────────────────────────────
// Persona and Org Commands
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_persona_list() {
    Sandbox::new()
        .cmd()
        .args(["persona", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sam-lee"))
        .stdout(predicate::str::contains("jh-kim"))
        .stdout(predicate::str::contains("seul-kim"))
        .stdout(predicate::str::contains("jin-park"));
}

#[test]
fn test_persona_show_unknown() {
    Sandbox::new()
        .cmd()
        .args(["persona", "show", "nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Persona not found"));
}

#[test]
fn test_org_set_and_show() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["org", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Veluga"));

    sandbox
        .cmd()
        .args([
            "org", "set", "--company", "Acme", "--tools", "Slack, Jira,", "--keywords", "timeout, retry",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme"));

    let org = sandbox.document("org.json");
    assert_eq!(org["company"], "Acme");
    assert_eq!(org["role"], "Backend Engineer");
    assert_eq!(org["tools"], serde_json::json!(["Slack", "Jira"]));
    assert_eq!(
        org["rubric"]["acceptance_keywords"],
        serde_json::json!(["timeout", "retry"])
    );
}
