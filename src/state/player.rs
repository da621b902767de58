use ahash::AHashSet;

use crate::core::types::{FoundingFather, Nation, RevolutionStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub nation: Nation,
    pub fathers: AHashSet<FoundingFather>,
    pub revolution_status: RevolutionStatus,
    pub money: i32,
    pub royal_money: i32,
    pub total_after_tax_revenue: i32,
    /// Percent
    pub tax_rate: i32,
}

impl Player {
    pub fn new(nation: Nation) -> Self {
        Self {
            nation,
            fathers: AHashSet::new(),
            revolution_status: RevolutionStatus::NotDeclared,
            money: 0,
            royal_money: 0,
            total_after_tax_revenue: 0,
            tax_rate: 0,
        }
    }

    pub fn has_father(&self, father: FoundingFather) -> bool {
        self.fathers.contains(&father)
    }

    pub fn independence_declared(&self) -> bool {
        self.revolution_status >= RevolutionStatus::Declared
    }
}
