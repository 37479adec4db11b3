//! Rate Limiter (Token Bucket)
//!
//! Caps request throughput on the mutating queue methods. Contention on
//! the bucket mutex is negligible at the request rates a single waitline
//! daemon sees.

use std::time::Instant;
use tokio::sync::Mutex;

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Token bucket rate limiter
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    max_tokens: f64,
    refill_per_sec: f64,
}

impl RateLimiter {
    /// # Arguments
    /// * `max_tokens` - Maximum burst size
    /// * `refill_rate` - Tokens added per second
    pub fn new(max_tokens: u32, refill_rate: u32) -> Self {
        Self {
            bucket: Mutex::new(Bucket {
                tokens: max_tokens as f64,
                last_refill: Instant::now(),
            }),
            max_tokens: max_tokens as f64,
            refill_per_sec: refill_rate as f64,
        }
    }

    /// Check if a request is allowed (consumes 1 token)
    pub async fn check(&self) -> bool {
        let mut bucket = self.bucket.lock().await;

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.max_tokens);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Remaining tokens (for monitoring)
    #[allow(dead_code)]
    pub async fn remaining(&self) -> f64 {
        self.bucket.lock().await.tokens
    }
}
