use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bunner_cors_gate::{Cors, CorsOptions, OriginMatcher, OriginPolicy, PatternError, ValidationError};
use serde::Serialize;

pub type SharedCors = Arc<Cors>;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone, Serialize)]
pub struct Grocery {
    pub name: &'static str,
    pub quantity: u32,
}

/// Pretend data layer. Counts loads so skipped work is visible in the logs.
#[derive(Default)]
pub struct GroceryStore {
    loads: AtomicUsize,
}

impl GroceryStore {
    pub async fn load(&self) -> Vec<Grocery> {
        let loads = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(loads, "loading groceries");
        tokio::time::sleep(Duration::from_millis(50)).await;
        vec![
            Grocery {
                name: "eggs",
                quantity: 12,
            },
            Grocery {
                name: "milk",
                quantity: 1,
            },
        ]
    }
}

#[derive(Clone)]
pub struct AppState {
    pub cors: SharedCors,
    pub store: Arc<GroceryStore>,
}

pub fn build_state() -> Result<AppState, SetupError> {
    let options = CorsOptions {
        origin: OriginPolicy::set_literals_first([
            OriginMatcher::pattern_str(r"(?i)^http://localhost:")?,
            OriginMatcher::literal("http://127.0.0.1:3000"),
        ]),
        resolve_timeout: Some(Duration::from_secs(2)),
    };

    Ok(AppState {
        cors: Arc::new(Cors::new(options)?),
        store: Arc::new(GroceryStore::default()),
    })
}

pub mod middleware;
