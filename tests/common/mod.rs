use std::sync::Arc;

use rusty_matchplay::controller::Scorekeeper;
use rusty_matchplay::storage::{MemoryStore, Storage};

pub struct TestContext {
    pub keeper: Scorekeeper,
    pub store: Arc<MemoryStore>,
}

pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error>> {
    let store = Arc::new(MemoryStore::new());
    let keeper = Scorekeeper::load(store.clone() as Arc<dyn Storage>).await?;
    Ok(TestContext { keeper, store })
}
