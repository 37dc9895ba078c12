//! 策略注册表
//!
//! 按奖励类别索引所有合并策略，编排器通过注册表路由每一条奖励。

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::classifier::ItemCategory;

use super::handler::MergeStrategy;
use super::handlers::{
    BannerStrategy, CosmeticStrategy, CurrencyStrategy, GenericStrategy, XpBoostStrategy,
};

/// 策略注册表
///
/// 所有策略通过 Arc 共享，可在多个发放服务实例间复用。
pub struct StrategyRegistry {
    strategies: HashMap<ItemCategory, Arc<dyn MergeStrategy>>,
}

impl StrategyRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// 注册一个策略，同类别的旧策略会被替换
    pub fn register(&mut self, strategy: Arc<dyn MergeStrategy>) -> &mut Self {
        let category = strategy.category();
        debug!(
            category = category.as_str(),
            description = strategy.description(),
            "注册合并策略"
        );
        self.strategies.insert(category, strategy);
        self
    }

    pub fn get(&self, category: ItemCategory) -> Option<Arc<dyn MergeStrategy>> {
        self.strategies.get(&category).cloned()
    }

    pub fn contains(&self, category: ItemCategory) -> bool {
        self.strategies.contains_key(&category)
    }

    pub fn registered_categories(&self) -> Vec<ItemCategory> {
        self.strategies.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// 创建包含全部默认策略的注册表
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry
            .register(Arc::new(XpBoostStrategy::season()))
            .register(Arc::new(XpBoostStrategy::friend()))
            .register(Arc::new(CurrencyStrategy))
            .register(Arc::new(BannerStrategy))
            .register(Arc::new(CosmeticStrategy))
            .register(Arc::new(GenericStrategy));

        info!(
            strategy_count = registry.len(),
            "默认合并策略初始化完成"
        );

        registry
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_category() {
        let registry = StrategyRegistry::with_defaults();
        assert_eq!(registry.len(), ItemCategory::ALL.len());
        for category in ItemCategory::ALL {
            let strategy = registry.get(category).unwrap();
            assert_eq!(strategy.category(), category);
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = StrategyRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains(ItemCategory::Currency));
        assert!(registry.get(ItemCategory::Currency).is_none());
    }

    #[test]
    fn test_register_replaces_same_category() {
        let mut registry = StrategyRegistry::new();
        registry.register(Arc::new(GenericStrategy));
        registry.register(Arc::new(GenericStrategy));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.registered_categories(), vec![ItemCategory::Generic]);
    }
}
