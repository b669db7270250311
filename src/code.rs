use std::sync::OnceLock;

use rand::{thread_rng, Rng};
use regex::Regex;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::store::SnippetStore;

const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";
pub const CODE_LEN: usize = 4;
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 5;

/// Random code, uniform over the 36^4 possibilities.
pub fn generate_code() -> String {
    let mut rng = thread_rng();
    (0..CODE_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn is_valid_code(code: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z0-9]{4}$").expect("code pattern is valid"))
        .is_match(code)
}

/// Pick a code no stored snippet uses yet.
///
/// Check and insert are separate store calls, so two allocators racing on the
/// same code can both succeed.
pub async fn allocate<S: SnippetStore>(store: &mut S, attempts: u32) -> crate::AppResult<String> {
    for attempt in 1..=attempts {
        let code = generate_code();
        if store.find_one(&code).await?.is_none() {
            return Ok(code);
        }
        debug!("code collision: code='{code}', attempt={attempt}");
    }
    warn!("no free code after {attempts} attempts");
    Err(AppError::AllocationExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::testing::TakenStore;

    #[test]
    fn generated_codes_are_well_formed() {
        for _ in 0..1000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(is_valid_code(&code), "bad code {code:?}");
        }
    }

    #[test]
    fn validates_codes() {
        assert!(is_valid_code("ab12"));
        assert!(is_valid_code("0000"));
        assert!(!is_valid_code("AB1"));
        assert!(!is_valid_code("AB12"));
        assert!(!is_valid_code("ab123"));
        assert!(!is_valid_code("ab-1"));
        assert!(!is_valid_code(""));
    }

    #[tokio::test]
    async fn allocates_against_empty_store() {
        let mut store = MemoryStore::new();
        let code = allocate(&mut store, MAX_ALLOCATION_ATTEMPTS).await.unwrap();
        assert!(is_valid_code(&code));
    }

    #[tokio::test]
    async fn gives_up_after_repeated_collisions() {
        let mut store = TakenStore::default();
        let result = allocate(&mut store, MAX_ALLOCATION_ATTEMPTS).await;

        assert!(matches!(result, Err(AppError::AllocationExhausted)));
        assert_eq!(store.lookups, 5);
        assert_eq!(store.inserts, 0);
    }
}
