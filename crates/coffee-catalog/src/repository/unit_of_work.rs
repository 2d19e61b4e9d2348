use super::coffee::persist_coffee;
use super::event::insert_event;
use super::{DataSource, UnitOfWork};
use crate::{Coffee, Event, Result};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;
use tracing::debug;

/// 基于 SeaORM 连接池的事务数据源
pub struct SeaDataSource {
    db: Arc<DatabaseConnection>,
}

impl SeaDataSource {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DataSource for SeaDataSource {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let txn = self.db.begin().await?;
        debug!("Transaction started");
        Ok(Box::new(SeaUnitOfWork { txn }))
    }
}

/// 持有一个 SeaORM 事务；drop 时若未提交则回滚
pub struct SeaUnitOfWork {
    txn: DatabaseTransaction,
}

#[async_trait]
impl UnitOfWork for SeaUnitOfWork {
    async fn save_coffee(&mut self, coffee: &Coffee) -> Result<Coffee> {
        persist_coffee(&self.txn, coffee).await
    }

    async fn save_event(&mut self, event: Event) -> Result<Event> {
        insert_event(&self.txn, event).await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.txn.commit().await?;
        debug!("Transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.txn.rollback().await?;
        debug!("Transaction rolled back");
        Ok(())
    }
}
