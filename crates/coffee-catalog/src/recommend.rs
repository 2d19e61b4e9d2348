use crate::repository::{DataSource, UnitOfWork};
use crate::{CatalogError, Coffee, Event, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 推荐事务
///
/// 推荐次数加一与写入 `recommend_event` 在同一个事务里完成：
/// 两者都写入后提交，任一失败则整体回滚。
pub struct RecommendationTransaction {
    data_source: Arc<dyn DataSource>,
}

impl RecommendationTransaction {
    pub fn new(data_source: Arc<dyn DataSource>) -> Self {
        Self { data_source }
    }

    /// 推荐一杯咖啡
    ///
    /// # 参数
    /// * `coffee` - 已保存的咖啡，成功后其 `recommendations` 加一
    ///
    /// # 返回
    /// 写入的推荐事件
    ///
    /// # 错误
    /// * `Validation` - 咖啡尚未保存，或推荐次数已达上限
    /// * `TransactionFailure` - 写入失败，事务已回滚，`coffee` 保持原值
    pub async fn recommend(&self, coffee: &mut Coffee) -> Result<Event> {
        let coffee_id = coffee
            .id
            .ok_or_else(|| CatalogError::validation("Cannot recommend a coffee that was never saved"))?;

        let previous = coffee.recommendations;
        let next = previous.checked_add(1).ok_or_else(|| {
            CatalogError::validation(format!(
                "Coffee #{} has reached the recommendation limit",
                coffee_id
            ))
        })?;

        let mut uow = self
            .data_source
            .begin()
            .await
            .map_err(|e| CatalogError::TransactionFailure(e.to_string()))?;

        coffee.recommendations = next;
        let event = Event::recommendation(coffee_id);

        let outcome = persist(uow.as_mut(), coffee, event).await;
        match outcome {
            Ok(recorded) => match uow.commit().await {
                Ok(()) => {
                    info!(
                        coffee_id,
                        recommendations = coffee.recommendations,
                        "Coffee recommended"
                    );
                    Ok(recorded)
                }
                Err(e) => {
                    coffee.recommendations = previous;
                    error!(coffee_id, error = %e, "Recommendation commit failed");
                    Err(CatalogError::TransactionFailure(e.to_string()))
                }
            },
            Err(e) => {
                coffee.recommendations = previous;
                error!(coffee_id, error = %e, "Recommendation failed, rolling back");
                if let Err(rollback_err) = uow.rollback().await {
                    warn!(coffee_id, error = %rollback_err, "Rollback failed");
                }
                Err(CatalogError::TransactionFailure(e.to_string()))
            }
        }
    }
}

/// 先写咖啡再写事件
async fn persist(uow: &mut dyn UnitOfWork, coffee: &Coffee, event: Event) -> Result<Event> {
    uow.save_coffee(coffee).await?;
    uow.save_event(event).await
}
