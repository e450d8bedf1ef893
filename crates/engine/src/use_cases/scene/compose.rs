//! Scene composition use case.
//!
//! Turns extracted attributes into a `ScenePlan` using the rule catalog, the
//! world's ground probe and a caller-supplied RNG. Composition keeps no state
//! between calls; with the same seed and the same ground it yields the same
//! plan.

use std::sync::Arc;

use rand::Rng;

use dreamforge_domain::{
    CharacterPlacement, DreamAttributes, GenerationIssue, ObjectPlacement, ObjectiveMode,
    Position, RuleCatalog, RuleKind, ScenePlan, TerrainPlacement,
};

use super::sampling::sample_ground_position;
use crate::infrastructure::ports::WorldPort;

pub struct ComposeScene {
    world: Arc<dyn WorldPort>,
}

impl ComposeScene {
    pub fn new(world: Arc<dyn WorldPort>) -> Self {
        Self { world }
    }

    pub fn execute<R: Rng + ?Sized>(
        &self,
        attributes: &DreamAttributes,
        catalog: &RuleCatalog,
        rng: &mut R,
    ) -> ScenePlan {
        let mut issues = Vec::new();

        let atmosphere = catalog.atmosphere_for(attributes.mood());
        let terrain = self.resolve_terrain(attributes.setting(), catalog, &mut issues);
        let characters = self.place_characters(attributes.characters(), catalog, rng, &mut issues);
        let objects = self.place_objects(attributes.objects(), catalog, rng, &mut issues);
        let objective = ObjectiveMode::from_keyword(attributes.objective());
        let player_spawn = self
            .sample(catalog.spawn_bounds, rng, &mut issues)
            .raised(catalog.player_spawn_height);

        tracing::info!(
            terrain = terrain.as_ref().map(|t| t.terrain.as_str()),
            characters = characters.len(),
            objects = objects.len(),
            objective = objective.as_str(),
            issues = issues.len(),
            "Scene composed"
        );

        ScenePlan {
            atmosphere,
            terrain,
            characters,
            objects,
            player_spawn,
            player_asset: catalog.player_asset.clone(),
            objective,
            issues,
        }
    }

    fn resolve_terrain(
        &self,
        setting: &str,
        catalog: &RuleCatalog,
        issues: &mut Vec<GenerationIssue>,
    ) -> Option<TerrainPlacement> {
        match catalog.match_terrain(setting) {
            Some(rule) => Some(TerrainPlacement {
                terrain: rule.terrain.clone(),
                skybox: rule.skybox.clone(),
            }),
            None => {
                tracing::warn!(setting, "No terrain rule matches setting");
                issues.push(GenerationIssue::NoRuleMatch {
                    kind: RuleKind::Terrain,
                    keyword: setting.to_string(),
                });
                None
            }
        }
    }

    fn place_characters<R: Rng + ?Sized>(
        &self,
        tokens: &[String],
        catalog: &RuleCatalog,
        rng: &mut R,
        issues: &mut Vec<GenerationIssue>,
    ) -> Vec<CharacterPlacement> {
        let mut placements = Vec::with_capacity(tokens.len());
        for token in tokens {
            let Some(rule) = catalog.match_character(token) else {
                tracing::debug!(token = %token, "No character rule matches, skipping");
                issues.push(GenerationIssue::NoRuleMatch {
                    kind: RuleKind::Character,
                    keyword: token.clone(),
                });
                continue;
            };
            let position = self.sample(catalog.spawn_bounds, rng, issues);
            placements.push(CharacterPlacement {
                asset: rule.character.clone(),
                position,
                hostile: rule.hostile,
            });
        }
        placements
    }

    fn place_objects<R: Rng + ?Sized>(
        &self,
        tokens: &[String],
        catalog: &RuleCatalog,
        rng: &mut R,
        issues: &mut Vec<GenerationIssue>,
    ) -> Vec<ObjectPlacement> {
        let pool = &catalog.object_assets;
        if pool.is_empty() {
            if !tokens.is_empty() {
                tracing::debug!(tokens = tokens.len(), "Object pool is empty, no objects placed");
            }
            return Vec::new();
        }

        // Token text does not pick the asset; each token just adds one object.
        let mut placements = Vec::with_capacity(tokens.len());
        for _ in tokens {
            let asset = pool[rng.gen_range(0..pool.len())].clone();
            let position = self.sample(catalog.spawn_bounds, rng, issues);
            let y_rotation_degrees = rng.gen_range(0.0..360.0);
            placements.push(ObjectPlacement {
                asset,
                position,
                y_rotation_degrees,
            });
        }
        placements
    }

    fn sample<R: Rng + ?Sized>(
        &self,
        bounds: f32,
        rng: &mut R,
        issues: &mut Vec<GenerationIssue>,
    ) -> Position {
        let sample = sample_ground_position(self.world.as_ref(), bounds, rng);
        if !sample.hit {
            issues.push(GenerationIssue::GroundProbeMiss {
                x: sample.x,
                z: sample.z,
            });
        }
        sample.position
    }
}
