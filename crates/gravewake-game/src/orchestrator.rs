// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The event-driven state machine that swaps plugin sets.
//!
//! Transitions ride the bus: screens and gameplay plugins publish, the
//! orchestrator's handlers translate each event into an [`Intent`], and
//! the simulation thread drains those intents at the top of the next
//! tick. Handlers never touch the world or the manager directly; the
//! intent queue is the one funnel through which dispatch-context code
//! reaches simulation state.

use anyhow::Context;
use gravewake_core::kernel::Kernel;
use gravewake_core::math::Vec2;
use gravewake_core::platform::{AssetCatalog, DrawSurface, InputSource};
use gravewake_core::plugin::{InitContext, PluginManager};
use gravewake_data::ability::AbilityKind;
use gravewake_data::config::{CharacterSpec, GameConfig};
use gravewake_data::{GameEvent, GameEventKind, World};
use gravewake_plugins::{
    AbilityChoicePlugin, AbilityPlugin, CameraPlugin, CharacterSelectPlugin, CombatPlugin,
    EnemyPlugin, HudPlugin, MenuPlugin, PickupPlugin, PlayerPlugin,
};

/// Offers presented on each level-up.
const CHOICES_PER_LEVEL: usize = 3;

/// The game's top-level states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Title screen.
    Menu,
    /// Class selection.
    CharacterSelect,
    /// A live run.
    Playing,
    /// Run paused on the level-up choice.
    ChooseAbility,
}

/// A deferred state mutation requested from event-handler context.
#[derive(Debug)]
enum Intent {
    EnterCharacterSelect,
    StartRun(CharacterSpec),
    GrantAbility(AbilityKind),
    EnterAbilityChoice,
    EndRun,
    DropPickup { position: Vec2, experience: u32 },
}

/// The running game.
///
/// One instance lives for the life of the process. Drive it with
/// [`tick`](Game::tick) (or [`tick_fixed`](Game::tick_fixed) from a
/// fixed-step or headless host) and [`draw`](Game::draw) once per frame.
pub struct Game {
    kernel: Kernel<GameEvent>,
    manager: PluginManager<GameEvent>,
    /// The Playing manager parked while the ability choice is open.
    suspended: Option<PluginManager<GameEvent>>,
    stage: Stage,
    world: Option<World>,
    config: GameConfig,
    assets: Box<dyn AssetCatalog>,
    intent_rx: flume::Receiver<Intent>,
    base_seed: u64,
    runs: u64,
}

impl Game {
    /// Builds the orchestrator: wires the event handlers, installs the
    /// menu plugin set, and leaves the game on the title screen.
    pub fn new(
        config: GameConfig,
        assets: Box<dyn AssetCatalog>,
        seed: u64,
    ) -> anyhow::Result<Self> {
        let kernel = Kernel::new();
        let (intent_tx, intent_rx) = flume::unbounded();

        Self::wire_transitions(&kernel, intent_tx);

        let mut game = Self {
            kernel,
            manager: PluginManager::new(),
            suspended: None,
            stage: Stage::Menu,
            world: None,
            config,
            assets,
            intent_rx,
            base_seed: seed,
            runs: 0,
        };
        game.manager = game.build_menu_manager()?;
        Ok(game)
    }

    /// Subscribes the transition handlers. Each handler only enqueues an
    /// intent (and, for `StartGame`, the follow-up `NewAbility` event);
    /// the simulation thread applies them at its next tick.
    fn wire_transitions(kernel: &Kernel<GameEvent>, intent_tx: flume::Sender<Intent>) {
        let bus = kernel.bus();

        let tx = intent_tx.clone();
        bus.subscribe(GameEventKind::OpenCharacterSelect, move |_| {
            let _ = tx.send(Intent::EnterCharacterSelect);
        });

        let tx = intent_tx.clone();
        let publisher = bus.publisher();
        bus.subscribe(GameEventKind::StartGame, move |event| {
            if let GameEvent::StartGame(spec) = event {
                let _ = tx.send(Intent::StartRun(spec.clone()));
                // The starting ability arrives through the same granting
                // path as every later one.
                publisher.publish(GameEvent::NewAbility(spec.starting_ability));
            }
        });

        let tx = intent_tx.clone();
        bus.subscribe(GameEventKind::NewAbility, move |event| {
            if let GameEvent::NewAbility(kind) = event {
                let _ = tx.send(Intent::GrantAbility(*kind));
            }
        });

        let tx = intent_tx.clone();
        bus.subscribe(GameEventKind::ChoosingAbility, move |_| {
            let _ = tx.send(Intent::EnterAbilityChoice);
        });

        let tx = intent_tx.clone();
        bus.subscribe(GameEventKind::GameOver, move |_| {
            let _ = tx.send(Intent::EndRun);
        });

        let tx = intent_tx;
        bus.subscribe(GameEventKind::EnemyKilled, move |event| {
            if let GameEvent::EnemyKilled {
                position,
                experience,
            } = event
            {
                let _ = tx.send(Intent::DropPickup {
                    position: *position,
                    experience: *experience,
                });
            }
        });
    }

    /// Advances the game one frame against the wall clock.
    pub fn tick(&mut self, input: &dyn InputSource) -> anyhow::Result<()> {
        self.apply_pending_intents()?;
        let Self {
            kernel,
            manager,
            world,
            ..
        } = self;
        match world {
            Some(world) => kernel.update(manager, world, input),
            None => {
                let mut unit = ();
                kernel.update(manager, &mut unit, input)
            }
        }
    }

    /// Advances the game one frame by a fixed raw delta. Headless hosts
    /// and tests use this for deterministic pacing.
    pub fn tick_fixed(&mut self, raw_dt: f32, input: &dyn InputSource) -> anyhow::Result<()> {
        self.apply_pending_intents()?;
        let Self {
            kernel,
            manager,
            world,
            ..
        } = self;
        match world {
            Some(world) => kernel.update_fixed(raw_dt, manager, world, input),
            None => {
                let mut unit = ();
                kernel.update_fixed(raw_dt, manager, &mut unit, input)
            }
        }
    }

    /// Renders the active plugin set.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        match &self.world {
            Some(world) => self.kernel.draw(&self.manager, world, surface),
            None => self.kernel.draw(&self.manager, &(), surface),
        }
    }

    /// The current state.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The live world, present only during a run.
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Mutable access to the live world.
    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    /// The kernel, for bus access and time-scale control.
    pub fn kernel(&self) -> &Kernel<GameEvent> {
        &self.kernel
    }

    /// The active plugin manager.
    pub fn manager(&self) -> &PluginManager<GameEvent> {
        &self.manager
    }

    /// Drains the intent queue, applying transitions in arrival order.
    fn apply_pending_intents(&mut self) -> anyhow::Result<()> {
        while let Ok(intent) = self.intent_rx.try_recv() {
            log::debug!("Applying {intent:?} in stage {:?}.", self.stage);
            match intent {
                Intent::EnterCharacterSelect => {
                    if self.stage != Stage::Menu {
                        log::warn!("Character select requested outside the menu; ignored.");
                        continue;
                    }
                    self.manager = self.build_character_select_manager()?;
                    self.stage = Stage::CharacterSelect;
                }
                Intent::StartRun(spec) => {
                    self.runs += 1;
                    let seed = self.base_seed.wrapping_add(self.runs);
                    log::info!("Run {} starting as {} (seed {seed}).", self.runs, spec.name);
                    self.world = Some(World::new(self.config.clone(), &spec, seed));
                    self.manager = self.build_playing_manager()?;
                    self.suspended = None;
                    self.stage = Stage::Playing;
                }
                Intent::GrantAbility(kind) => {
                    let Some(world) = self.world.as_mut() else {
                        log::warn!("Ability granted with no run in progress; ignored.");
                        continue;
                    };
                    world.abilities.grant(kind);
                    if self.stage == Stage::ChooseAbility {
                        self.manager = self
                            .suspended
                            .take()
                            .context("choice resolved but no suspended manager to restore")?;
                        self.stage = Stage::Playing;
                    }
                }
                Intent::EnterAbilityChoice => {
                    if self.stage != Stage::Playing {
                        continue;
                    }
                    let Some(world) = self.world.as_mut() else {
                        continue;
                    };
                    let offers = world
                        .abilities
                        .offer_choices(&mut world.rng, CHOICES_PER_LEVEL);
                    let mut choice = PluginManager::new();
                    choice.register(Box::new(AbilityChoicePlugin::new(offers)), 10);
                    Self::init_manager(&mut choice, self.assets.as_ref(), &self.kernel)?;
                    self.suspended = Some(std::mem::replace(&mut self.manager, choice));
                    self.stage = Stage::ChooseAbility;
                }
                Intent::EndRun => {
                    self.world = None;
                    self.suspended = None;
                    self.manager = self.build_menu_manager()?;
                    self.stage = Stage::Menu;
                }
                Intent::DropPickup {
                    position,
                    experience,
                } => {
                    if let Some(world) = self.world.as_mut() {
                        world.pickups.drop_gem(position, experience);
                    }
                }
            }
        }
        Ok(())
    }

    fn build_menu_manager(&self) -> anyhow::Result<PluginManager<GameEvent>> {
        let mut manager = PluginManager::new();
        manager.register(Box::new(MenuPlugin::new()), 10);
        Self::init_manager(&mut manager, self.assets.as_ref(), &self.kernel)?;
        Ok(manager)
    }

    fn build_character_select_manager(&self) -> anyhow::Result<PluginManager<GameEvent>> {
        let mut manager = PluginManager::new();
        manager.register(
            Box::new(CharacterSelectPlugin::new(self.config.characters.clone())),
            10,
        );
        Self::init_manager(&mut manager, self.assets.as_ref(), &self.kernel)?;
        Ok(manager)
    }

    /// The Playing plugin set with its explicit priorities: abilities and
    /// the player act first, enemies and combat follow, and the camera
    /// and HUD observe the finished tick.
    fn build_playing_manager(&self) -> anyhow::Result<PluginManager<GameEvent>> {
        let mut manager = PluginManager::new();
        manager.register(Box::new(AbilityPlugin::new()), 10);
        manager.register(Box::new(PlayerPlugin::new()), 20);
        manager.register(Box::new(EnemyPlugin::new()), 30);
        manager.register(Box::new(CombatPlugin::new()), 40);
        manager.register(Box::new(PickupPlugin::new()), 50);
        manager.register(Box::new(CameraPlugin::new()), 60);
        manager.register(Box::new(HudPlugin::new()), 70);
        Self::init_manager(&mut manager, self.assets.as_ref(), &self.kernel)?;
        Ok(manager)
    }

    fn init_manager(
        manager: &mut PluginManager<GameEvent>,
        assets: &dyn AssetCatalog,
        kernel: &Kernel<GameEvent>,
    ) -> anyhow::Result<()> {
        let mut ctx = InitContext {
            assets,
            events: kernel.bus(),
        };
        manager.init_all(&mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravewake_core::platform::{NullCatalog, NullInput};

    #[test]
    fn boots_into_the_menu() {
        let game = Game::new(GameConfig::default(), Box::new(NullCatalog::default()), 1).unwrap();
        assert_eq!(game.stage(), Stage::Menu);
        assert!(game.world().is_none());
        assert_eq!(game.manager().len(), 1);
    }

    #[test]
    fn ticking_the_menu_is_uneventful() {
        let mut game =
            Game::new(GameConfig::default(), Box::new(NullCatalog::default()), 1).unwrap();
        for _ in 0..5 {
            game.tick_fixed(0.016, &NullInput).unwrap();
        }
        assert_eq!(game.stage(), Stage::Menu);
    }
}
