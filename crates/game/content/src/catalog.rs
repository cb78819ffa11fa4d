//! In-memory catalogs backing the ability and condition oracles.

use std::collections::BTreeMap;

use game_core::{Ability, AbilityId, AbilityOracle, ConditionDef, ConditionKey, ConditionOracle};

/// Ability definitions keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityCatalog {
    abilities: BTreeMap<AbilityId, Ability>,
}

impl AbilityCatalog {
    pub fn new(abilities: BTreeMap<AbilityId, Ability>) -> Self {
        Self { abilities }
    }

    /// The catalog shipped with the crate.
    #[cfg(feature = "loaders")]
    pub fn embedded() -> crate::LoadResult<Self> {
        crate::AbilityLoader::parse(include_str!("../data/abilities.ron")).map(Self::new)
    }

    pub fn get(&self, id: &AbilityId) -> Option<&Ability> {
        self.abilities.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &AbilityId> + '_ {
        self.abilities.keys()
    }

    /// Adds or replaces a definition.
    pub fn insert(&mut self, id: impl Into<AbilityId>, ability: Ability) -> Option<Ability> {
        self.abilities.insert(id.into(), ability)
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl AbilityOracle for AbilityCatalog {
    fn ability(&self, id: &AbilityId) -> Option<Ability> {
        self.abilities.get(id).cloned()
    }
}

/// Condition definitions keyed by condition name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionCatalog {
    conditions: BTreeMap<ConditionKey, ConditionDef>,
}

impl ConditionCatalog {
    /// Builds a catalog, keying each definition by its name. Later
    /// definitions with the same name replace earlier ones.
    pub fn new(conditions: impl IntoIterator<Item = ConditionDef>) -> Self {
        let conditions = conditions
            .into_iter()
            .map(|def| (ConditionKey::new(def.name.clone()), def))
            .collect();
        Self { conditions }
    }

    #[cfg(feature = "loaders")]
    pub fn embedded() -> crate::LoadResult<Self> {
        crate::ConditionLoader::parse(include_str!("../data/conditions.ron")).map(Self::new)
    }

    pub fn get(&self, key: &ConditionKey) -> Option<&ConditionDef> {
        self.conditions.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ConditionKey> + '_ {
        self.conditions.keys()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl ConditionOracle for ConditionCatalog {
    fn condition(&self, key: &ConditionKey) -> Option<ConditionDef> {
        self.conditions.get(key).cloned()
    }
}
