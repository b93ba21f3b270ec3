// In-Memory StoreClient Implementation

use async_trait::async_trait;
use kvqueue_core::error::{AppError, Result};
use kvqueue_core::port::StoreClient;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::trace;

/// Value stored under a key; one key holds one type, as in Redis
enum Value {
    List(VecDeque<String>),
    Set(BTreeSet<String>),
}

fn wrong_type(key: &str) -> AppError {
    AppError::Store(format!(
        "WRONGTYPE Operation against a key holding the wrong kind of value: {key}"
    ))
}

#[derive(Default)]
struct State {
    keys: HashMap<String, Value>,
}

impl State {
    fn list(&self, key: &str) -> Result<Option<&VecDeque<String>>> {
        match self.keys.get(key) {
            None => Ok(None),
            Some(Value::List(list)) => Ok(Some(list)),
            Some(Value::Set(_)) => Err(wrong_type(key)),
        }
    }

    fn list_mut(&mut self, key: &str) -> Result<Option<&mut VecDeque<String>>> {
        match self.keys.get_mut(key) {
            None => Ok(None),
            Some(Value::List(list)) => Ok(Some(list)),
            Some(Value::Set(_)) => Err(wrong_type(key)),
        }
    }

    fn set(&self, key: &str) -> Result<Option<&BTreeSet<String>>> {
        match self.keys.get(key) {
            None => Ok(None),
            Some(Value::Set(set)) => Ok(Some(set)),
            Some(Value::List(_)) => Err(wrong_type(key)),
        }
    }

    fn set_mut(&mut self, key: &str) -> Result<Option<&mut BTreeSet<String>>> {
        match self.keys.get_mut(key) {
            None => Ok(None),
            Some(Value::Set(set)) => Ok(Some(set)),
            Some(Value::List(_)) => Err(wrong_type(key)),
        }
    }

    /// Remove `member` from the set at `key`, dropping the set once empty
    fn srem(&mut self, key: &str, member: &str) -> Result<bool> {
        let Some(set) = self.set_mut(key)? else {
            return Ok(false);
        };

        let removed = set.remove(member);
        if set.is_empty() {
            self.keys.remove(key);
        }
        Ok(removed)
    }
}

/// Process-local store with Redis list/set semantics
///
/// One keyspace: using a key as a list and as a set fails with a WRONGTYPE
/// store error. Empty lists and sets are dropped, like Redis does, so a
/// drained queue reads the same as one that never existed. Only the
/// primitives of `StoreClient` are provided.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    pushed: Notify,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }

    fn try_lpop(&self, key: &str) -> Result<Option<String>> {
        let mut state = self.state()?;
        let Some(list) = state.list_mut(key)? else {
            return Ok(None);
        };

        let head = list.pop_front();
        if list.is_empty() {
            state.keys.remove(key);
        }
        Ok(head)
    }

    async fn wait_lpop(&self, key: &str) -> Result<(String, String)> {
        loop {
            // Register interest before checking so a push in between is not missed
            let notified = self.pushed.notified();

            if let Some(value) = self.try_lpop(key)? {
                return Ok((key.to_string(), value));
            }

            notified.await;
        }
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn llen(&self, key: &str) -> Result<u64> {
        let state = self.state()?;
        Ok(state.list(key)?.map_or(0, |list| list.len() as u64))
    }

    async fn lrange(&self, key: &str, start: usize, stop: usize) -> Result<Vec<String>> {
        let state = self.state()?;
        let Some(list) = state.list(key)? else {
            return Ok(Vec::new());
        };

        if start >= list.len() || start > stop {
            return Ok(Vec::new());
        }

        let stop = stop.min(list.len() - 1);
        Ok(list.range(start..=stop).cloned().collect())
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<u64> {
        let len = {
            let mut state = self.state()?;
            if state.list(key)?.is_none() {
                state
                    .keys
                    .insert(key.to_string(), Value::List(VecDeque::new()));
            }

            let list = state
                .list_mut(key)?
                .ok_or_else(|| AppError::Internal(format!("list {key} vanished under lock")))?;
            list.push_back(value.to_string());
            list.len() as u64
        };

        self.pushed.notify_waiters();
        trace!(key, len, "rpush");
        Ok(len)
    }

    async fn blpop(&self, key: &str, timeout: Duration) -> Result<Option<(String, String)>> {
        if timeout.is_zero() {
            return self.wait_lpop(key).await.map(Some);
        }

        match tokio::time::timeout(timeout, self.wait_lpop(key)).await {
            Ok(popped) => popped.map(Some),
            Err(_) => Ok(None),
        }
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut state = self.state()?;
        Ok(u64::from(state.keys.remove(key).is_some()))
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        let mut state = self.state()?;
        if state.set(key)?.is_none() {
            state
                .keys
                .insert(key.to_string(), Value::Set(BTreeSet::new()));
        }

        let set = state
            .set_mut(key)?
            .ok_or_else(|| AppError::Internal(format!("set {key} vanished under lock")))?;
        Ok(set.insert(member.to_string()))
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let state = self.state()?;
        Ok(state
            .set(key)?
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn srem(&self, key: &str, member: &str) -> Result<bool> {
        self.state()?.srem(key, member)
    }

    async fn info(&self) -> Result<BTreeMap<String, String>> {
        let state = self.state()?;
        let (mut lists, mut sets, mut messages) = (0usize, 0usize, 0usize);
        for value in state.keys.values() {
            match value {
                Value::List(list) => {
                    lists += 1;
                    messages += list.len();
                }
                Value::Set(_) => sets += 1,
            }
        }

        Ok(BTreeMap::from([
            ("backend".to_string(), "memory".to_string()),
            ("lists".to_string(), lists.to_string()),
            ("sets".to_string(), sets.to_string()),
            ("messages".to_string(), messages.to_string()),
        ]))
    }

    async fn del_and_srem(&self, list_key: &str, set_key: &str, member: &str) -> Result<()> {
        // Single lock: observers never see one effect without the other.
        // Type-check first so a WRONGTYPE registry leaves the list in place.
        let mut state = self.state()?;
        state.set(set_key)?;

        state.keys.remove(list_key);
        state.srem(set_key, member)?;
        Ok(())
    }
}
