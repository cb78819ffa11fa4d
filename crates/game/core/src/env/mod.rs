//! Traits describing read-only collaborator data.
//!
//! Oracles expose the ability and condition catalogs, map queries, game-design
//! configuration and the dice source. The [`Env`] aggregate bundles them so
//! the engine can reach everything it needs without depending on concrete
//! implementations.
mod catalog;
mod config;
mod error;
mod map;
mod rng;

use crate::effect::ConditionDef;
use crate::state::{Ability, AbilityId, ConditionKey};

pub use catalog::{AbilityOracle, ConditionOracle};
pub use config::ConfigOracle;
pub use error::OracleError;
pub use map::{MapOracle, OpenTerrain};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates read-only oracles required by the engine.
pub struct Env<'a, A, C, M, G, R>
where
    A: AbilityOracle + ?Sized,
    C: ConditionOracle + ?Sized,
    M: MapOracle + ?Sized,
    G: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    abilities: Option<&'a A>,
    conditions: Option<&'a C>,
    map: Option<&'a M>,
    config: Option<&'a G>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn AbilityOracle + 'a,
    dyn ConditionOracle + 'a,
    dyn MapOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
>;

// Manual impls: the derives would demand `Clone` of the (unsized) oracle types.
impl<A, C, M, G, R> Clone for Env<'_, A, C, M, G, R>
where
    A: AbilityOracle + ?Sized,
    C: ConditionOracle + ?Sized,
    M: MapOracle + ?Sized,
    G: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, C, M, G, R> Copy for Env<'_, A, C, M, G, R>
where
    A: AbilityOracle + ?Sized,
    C: ConditionOracle + ?Sized,
    M: MapOracle + ?Sized,
    G: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, A, C, M, G, R> Env<'a, A, C, M, G, R>
where
    A: AbilityOracle + ?Sized,
    C: ConditionOracle + ?Sized,
    M: MapOracle + ?Sized,
    G: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        abilities: Option<&'a A>,
        conditions: Option<&'a C>,
        map: Option<&'a M>,
        config: Option<&'a G>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            abilities,
            conditions,
            map,
            config,
            rng,
        }
    }

    pub fn with_all(
        abilities: &'a A,
        conditions: &'a C,
        map: &'a M,
        config: &'a G,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(abilities),
            Some(conditions),
            Some(map),
            Some(config),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            abilities: None,
            conditions: None,
            map: None,
            config: None,
            rng: None,
        }
    }

    /// Returns the AbilityOracle, or an error if not available.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// Returns the ConditionOracle, or an error if not available.
    pub fn conditions(&self) -> Result<&'a C, OracleError> {
        self.conditions.ok_or(OracleError::ConditionsNotAvailable)
    }

    /// Returns the MapOracle, or an error if not available.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    pub fn config(&self) -> Result<&'a G, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Looks up an ability definition in the catalog.
    ///
    /// # Errors
    ///
    /// `AbilitiesNotAvailable` without a catalog, `AbilityNotFound` for an unknown id.
    pub fn ability(&self, id: &AbilityId) -> Result<Ability, OracleError> {
        self.abilities()?
            .ability(id)
            .ok_or_else(|| OracleError::AbilityNotFound(id.clone()))
    }

    /// Looks up a condition definition in the catalog.
    pub fn condition(&self, key: &ConditionKey) -> Result<ConditionDef, OracleError> {
        self.conditions()?
            .condition(key)
            .ok_or_else(|| OracleError::ConditionNotFound(key.clone()))
    }
}

impl<'a, A, C, M, G, R> Env<'a, A, C, M, G, R>
where
    A: AbilityOracle + 'a,
    C: ConditionOracle + 'a,
    M: MapOracle + 'a,
    G: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let abilities: Option<&'a dyn AbilityOracle> = self.abilities.map(|oracle| oracle as _);
        let conditions: Option<&'a dyn ConditionOracle> =
            self.conditions.map(|oracle| oracle as _);
        let map: Option<&'a dyn MapOracle> = self.map.map(|oracle| oracle as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|oracle| oracle as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|oracle| oracle as _);
        Env::new(abilities, conditions, map, config, rng)
    }
}
