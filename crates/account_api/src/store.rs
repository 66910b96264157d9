//! Account storage operations

use std::collections::HashMap;
use tokio::sync::RwLock;
use types::{Account, AccountId};

/// Account storage interface
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert an account, replacing any account already stored under `id`
    async fn put(&self, id: AccountId, account: Account);

    /// Get an account by ID
    async fn get(&self, id: &str) -> Option<Account>;

    /// Remove an account, returning whether it was present
    async fn delete(&self, id: &str) -> bool;

    /// Number of stored accounts
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Process-lifetime account storage backed by a locked hash map
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn put(&self, id: AccountId, account: Account) {
        self.accounts.write().await.insert(id, account);
    }

    async fn get(&self, id: &str) -> Option<Account> {
        self.accounts.read().await.get(id).cloned()
    }

    async fn delete(&self, id: &str) -> bool {
        self.accounts.write().await.remove(id).is_some()
    }

    async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}
