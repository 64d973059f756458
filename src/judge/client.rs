//! Judge service client
//!
//! Submits execution batches to the remote judge service and polls the
//! returned tokens until every execution reaches a terminal status or the
//! configured deadline elapses. Results are returned in batch order no
//! matter which order the service finishes them in, since callers correlate
//! result `i` with test case `i` positionally.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    config::JudgeConfig,
    constants::JUDGE_REQUEST_TIMEOUT_SECS,
    error::{AppError, AppResult},
};

use super::status::{JudgeResult, JudgeStatus};

/// One entry of a submission batch: the candidate source run against a
/// single test case. Built fresh per evaluation, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
    pub expected_output: String,
}

/// Transport to the judge service.
///
/// Split from the poll loop so the loop can be exercised against a mock
/// backend in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeBackend: Send + Sync {
    /// Submit a batch; returns one opaque token per item, same order.
    async fn create_batch(&self, items: &[BatchItem]) -> AppResult<Vec<String>>;

    /// Fetch the current state of the given tokens, same order.
    async fn fetch_batch(&self, tokens: &[String]) -> AppResult<Vec<JudgeResult>>;
}

/// Time source for the poll loop; swapped for a manual clock in tests so
/// backoff and deadline behavior run without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by tokio's timer
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Polling schedule: exponential backoff from `initial_interval` up to
/// `max_interval`, bounded overall by `deadline`.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub deadline: Duration,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl From<&JudgeConfig> for PollPolicy {
    fn from(config: &JudgeConfig) -> Self {
        Self {
            deadline: config.poll_deadline,
            initial_interval: config.poll_interval,
            max_interval: config.max_poll_interval,
        }
    }
}

/// HTTP transport to the judge service
pub struct HttpJudgeBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct CreateBatchBody<'a> {
    submissions: &'a [BatchItem],
}

#[derive(Deserialize)]
struct CreatedSubmission {
    token: Option<String>,
}

#[derive(Deserialize)]
struct BatchStatusBody {
    submissions: Vec<StatusPayload>,
}

#[derive(Deserialize)]
struct WireStatus {
    id: i32,
}

/// Raw per-execution payload as the service reports it. Every optional
/// field gets its explicit default in the `JudgeResult` conversion below.
#[derive(Deserialize)]
struct StatusPayload {
    status: Option<WireStatus>,
    /// Wall time in seconds, as a decimal string
    time: Option<String>,
    /// Peak memory in kilobytes
    memory: Option<f64>,
    stdout: Option<String>,
    stderr: Option<String>,
    compile_output: Option<String>,
}

impl From<StatusPayload> for JudgeResult {
    fn from(payload: StatusPayload) -> Self {
        // An execution the service has not picked up yet comes back without
        // a status object: still queued. Absent time/memory mean zero.
        let status = payload
            .status
            .map(|s| JudgeStatus::from_id(s.id))
            .unwrap_or(JudgeStatus::InQueue);
        let time_ms = payload
            .time
            .and_then(|t| t.trim().parse::<f64>().ok())
            .map(|secs| secs * 1000.0)
            .unwrap_or(0.0);
        let memory_kb = payload.memory.map(|kb| kb as i64).unwrap_or(0);

        Self {
            status,
            time_ms,
            memory_kb,
            stdout: payload.stdout,
            stderr: payload.stderr,
            compile_output: payload.compile_output,
        }
    }
}

impl HttpJudgeBackend {
    pub fn new(config: &JudgeConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(JUDGE_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Configuration(format!("judge HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("X-Auth-Token", key),
            None => request,
        }
    }
}

#[async_trait]
impl JudgeBackend for HttpJudgeBackend {
    async fn create_batch(&self, items: &[BatchItem]) -> AppResult<Vec<String>> {
        let response = self
            .with_auth(self.client.post(self.url("/submissions/batch")))
            .query(&[("base64_encoded", "false")])
            .json(&CreateBatchBody { submissions: items })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::JudgeQuotaExceeded);
        }
        if !response.status().is_success() {
            return Err(AppError::JudgeUnavailable(format!(
                "batch create returned {}",
                response.status()
            )));
        }

        let created: Vec<CreatedSubmission> = response
            .json()
            .await
            .map_err(|e| AppError::JudgeUnavailable(format!("malformed batch create response: {}", e)))?;

        let tokens: Vec<String> = created.into_iter().filter_map(|c| c.token).collect();
        if tokens.len() != items.len() {
            return Err(AppError::JudgeUnavailable(
                "batch create response missing tokens".to_string(),
            ));
        }

        Ok(tokens)
    }

    async fn fetch_batch(&self, tokens: &[String]) -> AppResult<Vec<JudgeResult>> {
        let response = self
            .with_auth(self.client.get(self.url("/submissions/batch")))
            .query(&[
                ("tokens", tokens.join(",")),
                ("base64_encoded", "false".to_string()),
                (
                    "fields",
                    "status,time,memory,stdout,stderr,compile_output".to_string(),
                ),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::JudgeQuotaExceeded);
        }
        if !response.status().is_success() {
            return Err(AppError::JudgeUnavailable(format!(
                "batch status returned {}",
                response.status()
            )));
        }

        let body: BatchStatusBody = response
            .json()
            .await
            .map_err(|e| AppError::JudgeUnavailable(format!("malformed batch status response: {}", e)))?;

        Ok(body.submissions.into_iter().map(JudgeResult::from).collect())
    }
}

/// Client for the remote judge service. Cloning is cheap.
#[derive(Clone)]
pub struct JudgeClient {
    backend: Arc<dyn JudgeBackend>,
    clock: Arc<dyn Clock>,
    poll: PollPolicy,
}

impl JudgeClient {
    pub fn new(backend: Arc<dyn JudgeBackend>, clock: Arc<dyn Clock>, poll: PollPolicy) -> Self {
        Self {
            backend,
            clock,
            poll,
        }
    }

    /// Build the production client from configuration
    pub fn from_config(config: &JudgeConfig) -> AppResult<Self> {
        Ok(Self::new(
            Arc::new(HttpJudgeBackend::new(config)?),
            Arc::new(SystemClock),
            PollPolicy::from(config),
        ))
    }

    /// Submit a batch of executions; returns one token per item, in order
    pub async fn submit_batch(&self, items: &[BatchItem]) -> AppResult<Vec<String>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let tokens = self.backend.create_batch(items).await?;
        if tokens.len() != items.len() {
            return Err(AppError::JudgeUnavailable(
                "batch create token count mismatch".to_string(),
            ));
        }

        tracing::debug!(batch_size = items.len(), "submitted batch to judge service");
        Ok(tokens)
    }

    /// Poll until every token is terminal or the deadline elapses.
    ///
    /// The returned vector matches `tokens` by index regardless of the order
    /// in which the service finishes individual executions.
    pub async fn await_results(&self, tokens: &[String]) -> AppResult<Vec<JudgeResult>> {
        let deadline = self.clock.now() + self.poll.deadline;
        let mut interval = self.poll.initial_interval;

        let mut results: Vec<Option<JudgeResult>> = vec![None; tokens.len()];
        let mut outstanding: Vec<usize> = (0..tokens.len()).collect();

        while !outstanding.is_empty() {
            let pending: Vec<String> = outstanding.iter().map(|&i| tokens[i].clone()).collect();
            let fetched = self.backend.fetch_batch(&pending).await?;
            if fetched.len() != pending.len() {
                return Err(AppError::JudgeUnavailable(
                    "batch status response length mismatch".to_string(),
                ));
            }

            let mut still_running = Vec::new();
            for (slot, result) in outstanding.into_iter().zip(fetched) {
                if result.status.is_terminal() {
                    results[slot] = Some(result);
                } else {
                    still_running.push(slot);
                }
            }
            outstanding = still_running;

            if outstanding.is_empty() {
                break;
            }
            if self.clock.now() + interval >= deadline {
                tracing::warn!(
                    outstanding = outstanding.len(),
                    "judge polling deadline exceeded"
                );
                return Err(AppError::JudgeTimeout);
            }
            self.clock.sleep(interval).await;
            interval = (interval * 2).min(self.poll.max_interval);
        }

        Ok(results.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Clock that advances instantly instead of sleeping
    struct ManualClock {
        now: Mutex<Instant>,
        slept: Mutex<Vec<Duration>>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
                slept: Mutex::new(Vec::new()),
            }
        }

        fn sleeps(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }

        async fn sleep(&self, duration: Duration) {
            *self.now.lock().unwrap() += duration;
            self.slept.lock().unwrap().push(duration);
        }
    }

    fn result(status: JudgeStatus, time_ms: f64) -> JudgeResult {
        JudgeResult {
            status,
            time_ms,
            memory_kb: 256,
            stdout: None,
            stderr: None,
            compile_output: None,
        }
    }

    fn policy() -> PollPolicy {
        PollPolicy {
            deadline: Duration::from_secs(10),
            initial_interval: Duration::from_millis(100),
            max_interval: Duration::from_secs(1),
        }
    }

    fn client(backend: MockJudgeBackend, clock: Arc<ManualClock>, poll: PollPolicy) -> JudgeClient {
        JudgeClient::new(Arc::new(backend), clock, poll)
    }

    #[tokio::test]
    async fn test_empty_batch_skips_the_backend() {
        let backend = MockJudgeBackend::new();
        let judge = client(backend, Arc::new(ManualClock::new()), policy());

        let tokens = judge.submit_batch(&[]).await.unwrap();
        assert!(tokens.is_empty());
    }

    #[tokio::test]
    async fn test_token_count_mismatch_is_an_error() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_create_batch()
            .times(1)
            .returning(|_| Ok(vec!["only-one".to_string()]));
        let judge = client(backend, Arc::new(ManualClock::new()), policy());

        let items = vec![
            BatchItem {
                source_code: "print(1)".to_string(),
                language_id: 71,
                stdin: "1".to_string(),
                expected_output: "1".to_string(),
            },
            BatchItem {
                source_code: "print(2)".to_string(),
                language_id: 71,
                stdin: "2".to_string(),
                expected_output: "2".to_string(),
            },
        ];
        let err = judge.submit_batch(&items).await.unwrap_err();
        assert!(matches!(err, AppError::JudgeUnavailable(_)));
    }

    #[tokio::test]
    async fn test_results_keep_batch_order_across_polls() {
        // Token "b" finishes a poll round before token "a"; the returned
        // vector must still line up with the submitted order [a, b].
        let mut seq = mockall::Sequence::new();
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|tokens| {
                assert_eq!(tokens, &["a".to_string(), "b".to_string()][..]);
                Ok(vec![
                    result(JudgeStatus::Processing, 0.0),
                    result(JudgeStatus::Accepted, 222.0),
                ])
            });
        backend
            .expect_fetch_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|tokens| {
                assert_eq!(tokens, &["a".to_string()][..]);
                Ok(vec![result(JudgeStatus::WrongAnswer, 111.0)])
            });

        let judge = client(backend, Arc::new(ManualClock::new()), policy());
        let results = judge
            .await_results(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, JudgeStatus::WrongAnswer);
        assert_eq!(results[0].time_ms, 111.0);
        assert_eq!(results[1].status, JudgeStatus::Accepted);
        assert_eq!(results[1].time_ms, 222.0);
    }

    #[tokio::test]
    async fn test_deadline_elapsed_fails_with_timeout() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_fetch_batch()
            .returning(|tokens| Ok(tokens.iter().map(|_| result(JudgeStatus::Processing, 0.0)).collect()));

        let clock = Arc::new(ManualClock::new());
        let judge = client(backend, clock.clone(), policy());

        let err = judge.await_results(&["t".to_string()]).await.unwrap_err();
        assert!(matches!(err, AppError::JudgeTimeout));
        // Total simulated sleep stays under the deadline
        let total: Duration = clock.sleeps().iter().sum();
        assert!(total < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_backoff_doubles_up_to_the_cap() {
        let mut backend = MockJudgeBackend::new();
        backend
            .expect_fetch_batch()
            .returning(|tokens| Ok(tokens.iter().map(|_| result(JudgeStatus::InQueue, 0.0)).collect()));

        let clock = Arc::new(ManualClock::new());
        let judge = client(backend, clock.clone(), policy());

        let _ = judge.await_results(&["t".to_string()]).await;
        let sleeps = clock.sleeps();
        assert!(sleeps.len() >= 4);
        assert_eq!(sleeps[0], Duration::from_millis(100));
        assert_eq!(sleeps[1], Duration::from_millis(200));
        assert_eq!(sleeps[2], Duration::from_millis(400));
        assert!(sleeps.iter().all(|s| *s <= Duration::from_secs(1)));
    }
}
