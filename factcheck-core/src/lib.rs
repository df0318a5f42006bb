pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod models;

pub use classify::{classify, validation_error, ErrorInfo, ErrorKind};
pub use client::{
    ApiError, ClientConfig, FactCheckClient, DEFAULT_BACKEND_URL, FACTCHECK_PATH,
    GENERIC_BACKEND_ERROR,
};
pub use config::FactcheckConfig;
pub use error::FactCheckError;
pub use history::{FileStorage, HistoryStore, MemoryStorage, Storage, PAGE_SIZE, STORAGE_KEY};
pub use models::{validate_claim, ClaimError, FactCheckResult, Source, Verdict, MAX_CLAIM_LEN};
