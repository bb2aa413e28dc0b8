//! Request-scoped memoization of remote lookups.
//!
//! A [`RequestCache`] is built at the start of one HTTP request, passed by
//! `&mut` to every service call made while handling it, and dropped with
//! the response. Only successful lookups are remembered.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

use iotfleet_domain::board::Board;
use iotfleet_domain::fleet::Fleet;
use iotfleet_domain::id::{BoardId, FleetId};
use iotfleet_domain::injection::Injection;

/// Memoized results of one kind of lookup, keyed by entity id.
#[derive(Debug)]
pub struct Memo<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Return the remembered value for `key`, or run `fetch` and remember
    /// its result when it succeeds.
    ///
    /// # Errors
    ///
    /// Returns the error of `fetch`; failures are not remembered.
    pub async fn get_or_try_fetch<E, F, Fut>(&mut self, key: &K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.entries.get(key) {
            return Ok(value.clone());
        }
        let value = fetch().await?;
        self.entries.insert(key.clone(), value.clone());
        Ok(value)
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All lookups memoized for the lifetime of one request.
#[derive(Debug, Default)]
pub struct RequestCache {
    pub fleets: Memo<FleetId, Option<Fleet>>,
    pub fleet_boards: Memo<FleetId, Vec<Board>>,
    pub fleet_injections: Memo<FleetId, Vec<Injection>>,
    pub boards: Memo<BoardId, Option<Board>>,
    pub board_injections: Memo<BoardId, Vec<Injection>>,
}

impl RequestCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn should_fetch_once_per_key() {
        let calls = AtomicUsize::new(0);
        let mut memo: Memo<&str, u32> = Memo::default();

        for _ in 0..3 {
            let value = memo
                .get_or_try_fetch(&"a", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(1)
                })
                .await
                .unwrap();
            assert_eq!(value, 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.len(), 1);
    }

    #[tokio::test]
    async fn should_not_remember_failures() {
        let mut memo: Memo<&str, u32> = Memo::default();

        let first = memo
            .get_or_try_fetch(&"a", || async { Err::<u32, _>("down") })
            .await;
        assert_eq!(first, Err("down"));
        assert!(memo.is_empty());

        let second = memo
            .get_or_try_fetch(&"a", || async { Ok::<_, &str>(2) })
            .await;
        assert_eq!(second, Ok(2));
        assert_eq!(memo.get(&"a"), Some(&2));
    }

    #[tokio::test]
    async fn should_keep_keys_independent() {
        let mut memo: Memo<&str, &str> = Memo::default();
        memo.get_or_try_fetch(&"a", || async { Ok::<_, ()>("x") })
            .await
            .unwrap();
        let b = memo
            .get_or_try_fetch(&"b", || async { Ok::<_, ()>("y") })
            .await
            .unwrap();
        assert_eq!(b, "y");
        assert_eq!(memo.len(), 2);
    }
}
