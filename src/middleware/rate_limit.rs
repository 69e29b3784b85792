use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::Error;

#[derive(Debug)]
struct Window {
    start: Instant,
    count: u32,
}

/// Fixed one-second window shared by every caller of the wrapped routes.
/// Used in front of `/login` to slow down password guessing.
#[derive(Clone, Debug)]
pub struct LoginThrottle {
    per_second: u32,
    window: Arc<Mutex<Window>>,
}

impl LoginThrottle {
    pub fn new(per_second: u32) -> Self {
        Self {
            per_second: per_second.max(1),
            window: Arc::new(Mutex::new(Window {
                start: Instant::now(),
                count: 0,
            })),
        }
    }

    fn allow_at(&self, now: Instant) -> bool {
        let mut guard = match self.window.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if now.duration_since(guard.start) >= Duration::from_secs(1) {
            guard.start = now;
            guard.count = 0;
        }
        if guard.count < self.per_second {
            guard.count += 1;
            true
        } else {
            false
        }
    }
}

pub async fn throttle_login(
    State(throttle): State<LoginThrottle>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !throttle.allow_at(Instant::now()) {
        tracing::warn!(path = %req.uri().path(), "login throttled");
        return Error::TooManyRequests.into_response();
    }
    next.run(req).await
}
