//! In-memory stand-ins for the network: a scripted reachability probe, a
//! request-recording transport, and small fakes of the Notion database and
//! the LeetCode problem set that honour their pagination protocols.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use crate::connectivity::{ConnectivityGuard, Probe};
use crate::error::SyncError;
use crate::retry::BackoffConfig;
use crate::transport::JsonTransport;
use crate::types::ProblemId;

#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Probe that replays a fixed sequence of results, then repeats `fallback`.
pub struct ScriptedProbe {
    results: Mutex<VecDeque<bool>>,
    fallback: bool,
    calls: CallCounter,
}

impl ScriptedProbe {
    pub fn always(online: bool) -> Self {
        Self::sequence(&[]).then(online)
    }

    pub fn sequence(results: &[bool]) -> Self {
        Self {
            results: Mutex::new(results.iter().copied().collect()),
            fallback: results.last().copied().unwrap_or(true),
            calls: CallCounter::default(),
        }
    }

    /// Append `online` to the script and make it the fallback.
    pub fn then(mut self, online: bool) -> Self {
        self.results.get_mut().unwrap().push_back(online);
        self.fallback = online;
        self
    }

    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait::async_trait]
impl Probe for ScriptedProbe {
    async fn check_connectivity(&self, _timeout: Duration) -> bool {
        self.calls.bump();
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// Guard with zero backoff so tests never sleep.
pub fn guard(probe: ScriptedProbe, max_retries: Option<u32>) -> ConnectivityGuard {
    ConnectivityGuard::new(
        Box::new(probe),
        Duration::from_secs(1),
        BackoffConfig {
            max_retries,
            initial_delay_secs: 0,
            max_delay_secs: 0,
        },
    )
}

pub fn online_guard() -> ConnectivityGuard {
    guard(ScriptedProbe::always(true), Some(0))
}

fn status_error(url: &str, status: u16) -> SyncError {
    SyncError::Status {
        status,
        url: url.to_string(),
        body: "scripted failure".to_string(),
    }
}

fn offline_error() -> SyncError {
    SyncError::Connection("scripted: network unreachable".to_string())
}

// ---------------------------------------------------------------------------
// Recording transport
// ---------------------------------------------------------------------------

pub enum Scripted {
    Ok(Value),
    Status(u16),
    Offline,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub headers: Vec<(String, String)>,
}

pub struct RecordingTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl RecordingTransport {
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<RecordedRequest>>> {
        self.requests.clone()
    }
}

#[async_trait::async_trait]
impl JsonTransport for RecordingTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> Result<Value, SyncError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
            headers: headers
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Ok(value)) => Ok(value),
            Some(Scripted::Status(status)) => Err(status_error(url, status)),
            Some(Scripted::Offline) => Err(offline_error()),
            None => Err(SyncError::Protocol("no scripted response left".to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Fake Notion database
// ---------------------------------------------------------------------------

#[derive(Default)]
struct NotionState {
    pages: Vec<Value>,
    query_calls: usize,
    create_calls: usize,
    fail_query_call: Option<usize>,
    offline_query_calls: HashSet<usize>,
    fail_create_ids: HashSet<ProblemId>,
    offline_create_calls: HashSet<usize>,
    timeout_create_calls: HashSet<usize>,
}

/// Cursor-paginated database; cursors are stringified row offsets.
#[derive(Clone, Default)]
pub struct FakeNotion {
    state: Arc<Mutex<NotionState>>,
}

pub fn notion_page(page_id: &str, id_property: Value) -> Value {
    json!({
        "object": "page",
        "id": page_id,
        "properties": {
            "Problem name": {"type": "title", "title": []},
            "ID": id_property,
        }
    })
}

impl FakeNotion {
    pub fn with_ids(ids: &[ProblemId]) -> Self {
        let fake = Self::default();
        for &id in ids {
            fake.push_page(notion_page(
                &format!("existing-{}", id),
                json!({"type": "number", "number": id}),
            ));
        }
        fake
    }

    pub fn push_page(&self, page: Value) {
        self.state.lock().unwrap().pages.push(page);
    }

    /// Make the `call`-th (1-based) query request fail with HTTP 500.
    pub fn fail_query_call(&self, call: usize) {
        self.state.lock().unwrap().fail_query_call = Some(call);
    }

    /// Make the `call`-th (1-based) query request fail as unreachable.
    pub fn offline_query_call(&self, call: usize) {
        self.state.lock().unwrap().offline_query_calls.insert(call);
    }

    pub fn fail_create_for(&self, id: ProblemId) {
        self.state.lock().unwrap().fail_create_ids.insert(id);
    }

    /// Make the `call`-th (1-based) create request fail as unreachable.
    pub fn offline_create_call(&self, call: usize) {
        self.state.lock().unwrap().offline_create_calls.insert(call);
    }

    /// Store the page for the `call`-th (1-based) create, then answer with a
    /// timeout as if the reply was lost.
    pub fn timeout_after_create_call(&self, call: usize) {
        self.state.lock().unwrap().timeout_create_calls.insert(call);
    }

    pub fn query_calls(&self) -> usize {
        self.state.lock().unwrap().query_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    /// Sorted numeric IDs of every stored page.
    pub fn ids(&self) -> Vec<ProblemId> {
        let mut ids: Vec<ProblemId> = self
            .state
            .lock()
            .unwrap()
            .pages
            .iter()
            .filter_map(|p| p["properties"]["ID"]["number"].as_u64())
            .collect();
        ids.sort_unstable();
        ids
    }

    fn query(state: &mut NotionState, url: &str, body: &Value) -> Result<Value, SyncError> {
        state.query_calls += 1;
        if state.fail_query_call == Some(state.query_calls) {
            return Err(status_error(url, 500));
        }
        if state.offline_query_calls.contains(&state.query_calls) {
            return Err(offline_error());
        }
        let page_size = body["page_size"].as_u64().unwrap_or(100) as usize;
        let start = body["start_cursor"]
            .as_str()
            .map(|c| c.parse::<usize>().unwrap())
            .unwrap_or(0);
        let end = (start + page_size).min(state.pages.len());
        let has_more = end < state.pages.len();
        let next_cursor = if has_more {
            Value::String(end.to_string())
        } else {
            Value::Null
        };
        Ok(json!({
            "object": "list",
            "results": &state.pages[start..end],
            "has_more": has_more,
            "next_cursor": next_cursor,
        }))
    }

    fn create(state: &mut NotionState, url: &str, body: &Value) -> Result<Value, SyncError> {
        state.create_calls += 1;
        if state.offline_create_calls.contains(&state.create_calls) {
            return Err(offline_error());
        }
        let id = body["properties"]["ID"]["number"]
            .as_u64()
            .ok_or_else(|| SyncError::Protocol("create without ID".to_string()))?;
        if state.fail_create_ids.contains(&id) {
            return Err(status_error(url, 400));
        }
        let page_id = format!("created-{}", id);
        let mut properties = body["properties"].clone();
        properties["ID"] = json!({"type": "number", "number": id});
        state.pages.push(json!({
            "object": "page",
            "id": &page_id,
            "properties": properties,
        }));
        if state.timeout_create_calls.contains(&state.create_calls) {
            return Err(SyncError::Timeout("scripted: operation timed out".to_string()));
        }
        Ok(json!({"object": "page", "id": page_id}))
    }
}

#[async_trait::async_trait]
impl JsonTransport for FakeNotion {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        _headers: &[(&str, &str)],
    ) -> Result<Value, SyncError> {
        let mut state = self.state.lock().unwrap();
        if url.ends_with("/query") {
            Self::query(&mut state, url, body)
        } else if url.ends_with("/pages") {
            Self::create(&mut state, url, body)
        } else {
            Err(status_error(url, 404))
        }
    }
}

// ---------------------------------------------------------------------------
// Fake LeetCode problem set
// ---------------------------------------------------------------------------

#[derive(Default)]
struct LeetCodeState {
    questions: Vec<Value>,
    declared_total: Option<u64>,
    calls: usize,
    requested_skips: Vec<u64>,
    fail_call: Option<usize>,
    offline_calls: HashSet<usize>,
}

/// Offset/limit paginated problem set.
#[derive(Clone, Default)]
pub struct FakeLeetCode {
    state: Arc<Mutex<LeetCodeState>>,
}

pub fn question(id: &str, status: Option<&str>) -> Value {
    json!({
        "difficulty": "Medium",
        "frontendQuestionId": id,
        "status": status,
        "title": format!("Problem {}", id),
        "titleSlug": format!("problem-{}", id),
        "topicTags": [{"name": "Array"}],
    })
}

impl FakeLeetCode {
    pub fn with_questions(questions: Vec<Value>) -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().questions = questions;
        fake
    }

    /// `n` questions with IDs `1..=n`; every `accepted_every`-th is solved.
    pub fn catalog(n: usize, accepted_every: usize) -> Self {
        let questions = (1..=n)
            .map(|i| {
                let status = if i % accepted_every == 0 { Some("ac") } else { None };
                question(&i.to_string(), status)
            })
            .collect();
        Self::with_questions(questions)
    }

    pub fn declare_total(&self, total: u64) {
        self.state.lock().unwrap().declared_total = Some(total);
    }

    pub fn fail_call(&self, call: usize) {
        self.state.lock().unwrap().fail_call = Some(call);
    }

    pub fn offline_call(&self, call: usize) {
        self.state.lock().unwrap().offline_calls.insert(call);
    }

    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls
    }

    pub fn requested_skips(&self) -> Vec<u64> {
        self.state.lock().unwrap().requested_skips.clone()
    }
}

#[async_trait::async_trait]
impl JsonTransport for FakeLeetCode {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        _headers: &[(&str, &str)],
    ) -> Result<Value, SyncError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.fail_call == Some(state.calls) {
            return Err(status_error(url, 500));
        }
        if state.offline_calls.contains(&state.calls) {
            return Err(offline_error());
        }
        let skip = body["variables"]["skip"].as_u64().unwrap_or(0);
        let limit = body["variables"]["limit"].as_u64().unwrap_or(100);
        state.requested_skips.push(skip);

        let len = state.questions.len();
        let start = (skip as usize).min(len);
        let end = (start + limit as usize).min(len);
        let total = state.declared_total.unwrap_or(len as u64);
        Ok(json!({
            "data": {
                "problemsetQuestionList": {
                    "total": total,
                    "questions": &state.questions[start..end],
                }
            }
        }))
    }
}
