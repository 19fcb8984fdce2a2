//! 再試行（指数バックオフ）
//!
//! 待機と送信はホストから非同期クロージャで渡す。
//! CLIは tokio::time::sleep、Webは gloo のタイマーを使う。

use crate::error::SummaryError;
use std::future::Future;
use std::time::Duration;

/// 再試行ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大試行回数（初回を含む）
    pub max_attempts: u32,
    /// 初回失敗後の待機時間（以降倍々）
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self { max_attempts, base_delay }
    }

    /// `attempt` 回目が失敗した後の待機時間 (1s, 2s, 4s, ...)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exp)
    }
}

/// 再試行付きで `attempt` を実行する
///
/// 試行は必ず直列。n回目の結果が出て、失敗なら待機が終わってから n+1 回目を始める。
/// 再試行対象外のエラー（終端エラー・不正応答）はその場で返す。
/// 最終試行の後は待機しない。
///
/// # Arguments
/// * `policy` - 再試行ポリシー
/// * `attempt` - 試行番号（1始まり）を受け取って1回送信する
/// * `sleep` - 指定時間待機する
pub async fn with_retry<T, A, AF, S, SF>(
    policy: &RetryPolicy,
    mut attempt: A,
    mut sleep: S,
) -> Result<T, SummaryError>
where
    A: FnMut(u32) -> AF,
    AF: Future<Output = Result<T, SummaryError>>,
    S: FnMut(Duration) -> SF,
    SF: Future<Output = ()>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut n = 1;

    loop {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() => {
                if n >= max_attempts {
                    return Err(SummaryError::Exhausted {
                        attempts: n,
                        last: Box::new(e),
                    });
                }
                sleep(policy.delay_after(n)).await;
                n += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    fn run(
        policy: RetryPolicy,
        script: Vec<Result<&'static str, SummaryError>>,
    ) -> (Result<&'static str, SummaryError>, u32, Vec<Duration>) {
        let script = RefCell::new(VecDeque::from(script));
        let calls = Cell::new(0u32);
        let sleeps = RefCell::new(Vec::new());

        let result = block_on(with_retry(
            &policy,
            |n| {
                calls.set(calls.get() + 1);
                assert_eq!(n, calls.get());
                let next = script
                    .borrow_mut()
                    .pop_front()
                    .unwrap_or(Err(SummaryError::Transport("script exhausted".into())));
                std::future::ready(next)
            },
            |d| {
                sleeps.borrow_mut().push(d);
                std::future::ready(())
            },
        ));

        (result, calls.get(), sleeps.into_inner())
    }

    #[test]
    fn test_delay_after_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_secs(1));
        assert_eq!(policy.delay_after(2), Duration::from_secs(2));
        assert_eq!(policy.delay_after(3), Duration::from_secs(4));
    }

    #[test]
    fn test_success_first_attempt() {
        let (result, calls, sleeps) = run(RetryPolicy::default(), vec![Ok("done")]);
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls, 1);
        assert!(sleeps.is_empty());
    }

    #[test]
    fn test_two_transport_failures_then_success() {
        let (result, calls, sleeps) = run(
            RetryPolicy::default(),
            vec![
                Err(SummaryError::Transport("refused".into())),
                Err(SummaryError::Transport("refused".into())),
                Ok("summary"),
            ],
        );
        assert_eq!(result.unwrap(), "summary");
        assert_eq!(calls, 3);
        assert_eq!(sleeps, vec![Duration::from_secs(1), Duration::from_secs(2)]);
    }

    #[test]
    fn test_exhausted_without_trailing_sleep() {
        let (result, calls, sleeps) = run(
            RetryPolicy::default(),
            vec![
                Err(SummaryError::HttpStatus { status: 502, body: String::new() }),
                Err(SummaryError::HttpStatus { status: 502, body: String::new() }),
                Err(SummaryError::HttpStatus { status: 503, body: String::new() }),
            ],
        );
        match result.unwrap_err() {
            SummaryError::Exhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, SummaryError::HttpStatus { status: 503, .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(calls, 3);
        assert_eq!(sleeps.len(), 2);
    }

    #[test]
    fn test_terminal_error_not_retried() {
        let (result, calls, sleeps) = run(
            RetryPolicy::default(),
            vec![Err(SummaryError::Rejected { status: 400, message: "too long".into() })],
        );
        assert!(matches!(result.unwrap_err(), SummaryError::Rejected { .. }));
        assert_eq!(calls, 1);
        assert!(sleeps.is_empty());
    }

    #[test]
    fn test_invalid_response_not_retried() {
        let (result, calls, _) = run(
            RetryPolicy::default(),
            vec![Err(SummaryError::InvalidResponse("{}".into()))],
        );
        assert!(matches!(result.unwrap_err(), SummaryError::InvalidResponse(_)));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        let (result, calls, sleeps) = run(policy, vec![Err(SummaryError::Transport("x".into()))]);
        assert!(matches!(result.unwrap_err(), SummaryError::Exhausted { attempts: 1, .. }));
        assert_eq!(calls, 1);
        assert!(sleeps.is_empty());
    }
}
