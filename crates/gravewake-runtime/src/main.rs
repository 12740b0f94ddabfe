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

//! Headless Gravewake runtime.
//!
//! A shipping host supplies a real window, renderer, asset pack and input
//! device behind the capability traits in `gravewake-core`. This binary
//! plugs null implementations into those seams and drives a scripted demo
//! run at a fixed step, which exercises the whole core (state machine,
//! spawning, combat, leveling) and logs a per-second summary.

use anyhow::Context;
use gravewake_core::platform::{Control, InputSource, NullCatalog, NullSurface};
use gravewake_data::GameConfig;
use gravewake_game::{Game, Stage};
use std::time::{SystemTime, UNIX_EPOCH};

/// Tuning tables packed next to the binary at build time. A parse failure
/// is a packaging defect and aborts startup.
const CONFIG_JSON: &str = include_str!("../assets/config.json");

/// Fixed simulation step for the demo drive loop.
const DT: f32 = 1.0 / 60.0;

/// Simulated seconds the demo run lasts before the process exits.
const DEMO_SECONDS: f32 = 45.0;

/// An input source holding a fixed set of controls down.
struct Held(Vec<Control>);

impl InputSource for Held {
    fn is_active(&self, control: Control) -> bool {
        self.0.contains(&control)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Gravewake runtime starting (headless demo mode).");

    let config = GameConfig::from_json(CONFIG_JSON).context("packed config is unreadable")?;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(config, Box::new(NullCatalog::default()), seed)?;
    let mut surface = NullSurface::default();

    // Scripted path to a live run: confirm through the menu, confirm the
    // first character.
    press_confirm(&mut game, &mut surface)?;
    settle(&mut game, &mut surface)?;
    anyhow::ensure!(
        game.stage() == Stage::CharacterSelect,
        "menu did not open character select"
    );
    press_confirm(&mut game, &mut surface)?;
    settle(&mut game, &mut surface)?;
    anyhow::ensure!(game.stage() == Stage::Playing, "run did not start");

    let idle = Held(Vec::new());
    let mut simulated = 0.0f32;
    let mut next_report = 1.0f32;
    while simulated < DEMO_SECONDS {
        // Resolve any level-up pause by confirming the highlighted offer,
        // then let the grant intent apply before pressing anything else.
        if game.stage() == Stage::ChooseAbility {
            press_confirm(&mut game, &mut surface)?;
            settle(&mut game, &mut surface)?;
            continue;
        }
        if game.stage() == Stage::Menu {
            log::info!("Run ended at {simulated:.1}s simulated.");
            break;
        }

        game.tick_fixed(DT, &idle)?;
        game.draw(&mut surface);
        simulated += DT;

        if simulated >= next_report {
            next_report += 1.0;
            if let Some(world) = game.world() {
                log::info!(
                    "t={simulated:>5.1}s  hp={:>3.0}  lv={}  enemies={:>2}  kills={:>3}",
                    world.player.health,
                    world.player.level,
                    world.enemies.active_len(),
                    world.stats.kills,
                );
            }
        }
    }

    if let Some(world) = game.world() {
        log::info!(
            "Demo finished: level {}, {} kills, {} draw calls issued.",
            world.player.level,
            world.stats.kills,
            surface.rects + surface.sprites + surface.texts,
        );
    }
    Ok(())
}

/// One confirm press followed by a release tick, so the next press
/// registers as a fresh edge.
fn press_confirm(game: &mut Game, surface: &mut NullSurface) -> anyhow::Result<()> {
    game.tick_fixed(DT, &Held(vec![Control::Confirm]))?;
    game.draw(surface);
    game.tick_fixed(DT, &Held(Vec::new()))?;
    game.draw(surface);
    Ok(())
}

/// Idle ticks that let published events dispatch and intents apply.
fn settle(game: &mut Game, surface: &mut NullSurface) -> anyhow::Result<()> {
    for _ in 0..4 {
        game.tick_fixed(DT, &Held(Vec::new()))?;
        game.draw(surface);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_config_parses() {
        let config = GameConfig::from_json(CONFIG_JSON).unwrap();
        assert_eq!(config.characters.len(), 2);
        assert!(config.spawning.max_alive > 0);
    }
}
