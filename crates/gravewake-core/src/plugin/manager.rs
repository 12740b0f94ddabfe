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

use super::{DrawContext, InitContext, Plugin, TickContext};
use crate::event::Event;
use anyhow::Context;
use std::collections::HashMap;

struct RegisteredPlugin<E: Event> {
    plugin: Box<dyn Plugin<E>>,
    priority: i32,
}

/// A priority-ordered registry of [`Plugin`]s.
///
/// Registration order is irrelevant; traversal during
/// [`update_all`](PluginManager::update_all) and
/// [`draw_all`](PluginManager::draw_all) is ascending by priority, with
/// ties broken by plugin id so the order is stable across ticks.
///
/// The registry is mutated only at setup and state-transition points, on
/// the simulation thread. Swapping in a freshly built manager is the
/// sanctioned way to change the plugin set mid-run; mutating a manager
/// that another context is iterating is not a supported pattern.
pub struct PluginManager<E: Event> {
    plugins: HashMap<String, RegisteredPlugin<E>>,
}

impl<E: Event> PluginManager<E> {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Registers `plugin` under its own id with the given priority.
    /// Lower priorities update first. Registering a second plugin under an
    /// already-used id replaces the first.
    pub fn register(&mut self, plugin: Box<dyn Plugin<E>>, priority: i32) {
        let id = plugin.id().to_owned();
        if self.plugins.contains_key(&id) {
            log::warn!("Plugin `{id}` re-registered; previous instance replaced.");
        }
        self.plugins
            .insert(id, RegisteredPlugin { plugin, priority });
    }

    /// Runs [`Plugin::init`] on every registered plugin in priority order,
    /// stopping at the first failure.
    pub fn init_all(&mut self, ctx: &mut InitContext<'_, E>) -> anyhow::Result<()> {
        for id in self.ordered_ids() {
            if let Some(entry) = self.plugins.get_mut(&id) {
                entry
                    .plugin
                    .init(ctx)
                    .with_context(|| format!("plugin `{id}` failed to initialize"))?;
            }
        }
        Ok(())
    }

    /// Invokes [`Plugin::update`] on every registered plugin, synchronously,
    /// in ascending priority order.
    ///
    /// Fail-fast: the first plugin that reports an error aborts the
    /// remaining updates for this tick and the error is propagated with the
    /// offending plugin's id attached.
    pub fn update_all(&mut self, ctx: &mut TickContext<'_, E>) -> anyhow::Result<()> {
        for id in self.ordered_ids() {
            if let Some(entry) = self.plugins.get_mut(&id) {
                entry
                    .plugin
                    .update(ctx)
                    .with_context(|| format!("plugin `{id}` failed to update"))?;
            }
        }
        Ok(())
    }

    /// Invokes [`Plugin::draw`] on every registered plugin in the same
    /// order as [`update_all`](PluginManager::update_all).
    pub fn draw_all(&self, ctx: &mut DrawContext<'_>) {
        for id in self.ordered_ids() {
            if let Some(entry) = self.plugins.get(&id) {
                entry.plugin.draw(ctx);
            }
        }
    }

    /// Atomically replaces the registry with an empty one, dropping every
    /// registered plugin.
    pub fn unregister_all(&mut self) {
        let dropped = self.plugins.len();
        self.plugins = HashMap::new();
        log::debug!("Unregistered {dropped} plugins.");
    }

    /// Returns the plugin registered under `id`, if any.
    pub fn get(&self, id: &str) -> Option<&dyn Plugin<E>> {
        self.plugins.get(id).map(|entry| entry.plugin.as_ref())
    }

    /// Returns the plugin registered under `id` downcast to `P`.
    ///
    /// Returns `None` both for an unknown id and for a type mismatch, so
    /// callers discover sibling plugins without an unchecked cast.
    pub fn get_as<P: 'static>(&self, id: &str) -> Option<&P> {
        self.get(id)?.as_any().downcast_ref::<P>()
    }

    /// Mutable variant of [`get_as`](PluginManager::get_as).
    pub fn get_as_mut<P: 'static>(&mut self, id: &str) -> Option<&mut P> {
        self.plugins
            .get_mut(id)?
            .plugin
            .as_any_mut()
            .downcast_mut::<P>()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns `true` if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Plugin ids sorted ascending by `(priority, id)`.
    ///
    /// Computed per traversal; the registry is small (a handful of
    /// subsystems) and transitions rebuild it wholesale anyway.
    fn ordered_ids(&self) -> Vec<String> {
        let mut order: Vec<(i32, String)> = self
            .plugins
            .iter()
            .map(|(id, entry)| (entry.priority, id.clone()))
            .collect();
        order.sort();
        order.into_iter().map(|(_, id)| id).collect()
    }
}

impl<E: Event> Default for PluginManager<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventBus;
    use crate::platform::NullInput;
    use std::any::Any;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct NoKind;

    #[derive(Debug, Clone)]
    struct NoEvent;

    impl Event for NoEvent {
        type Kind = NoKind;

        fn kind(&self) -> NoKind {
            NoKind
        }
    }

    struct Recorder {
        id: String,
        trace: Arc<Mutex<Vec<String>>>,
        fail: bool,
        generation: u32,
    }

    impl Recorder {
        fn boxed(id: &str, trace: &Arc<Mutex<Vec<String>>>) -> Box<Self> {
            Box::new(Self {
                id: id.to_owned(),
                trace: trace.clone(),
                fail: false,
                generation: 0,
            })
        }
    }

    impl Plugin<NoEvent> for Recorder {
        fn id(&self) -> &str {
            &self.id
        }

        fn update(&mut self, _ctx: &mut TickContext<'_, NoEvent>) -> anyhow::Result<()> {
            self.trace.lock().unwrap().push(self.id.clone());
            if self.fail {
                anyhow::bail!("boom");
            }
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn tick<'a>(
        bus: &EventBus<NoEvent>,
        input: &'a NullInput,
        world: &'a mut (),
    ) -> TickContext<'a, NoEvent> {
        TickContext {
            dt: 1.0 / 60.0,
            events: bus.publisher(),
            input,
            world,
        }
    }

    #[test]
    fn update_order_follows_priority_not_registration() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut manager = PluginManager::new();
        manager.register(Recorder::boxed("a", &trace), 5);
        manager.register(Recorder::boxed("b", &trace), 1);
        manager.register(Recorder::boxed("c", &trace), 3);

        let bus = EventBus::new();
        let input = NullInput;
        let mut world = ();
        manager.update_all(&mut tick(&bus, &input, &mut world)).unwrap();

        assert_eq!(*trace.lock().unwrap(), vec!["b", "c", "a"]);
    }

    #[test]
    fn re_registration_overwrites() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut manager = PluginManager::new();

        let mut first = Recorder::boxed("player", &trace);
        first.generation = 1;
        manager.register(first, 10);

        let mut second = Recorder::boxed("player", &trace);
        second.generation = 2;
        manager.register(second, 10);

        assert_eq!(manager.len(), 1);
        let current = manager.get_as::<Recorder>("player").unwrap();
        assert_eq!(current.generation, 2);
    }

    #[test]
    fn failing_plugin_aborts_the_tick() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut manager = PluginManager::new();
        manager.register(Recorder::boxed("first", &trace), 1);

        let mut bad = Recorder::boxed("second", &trace);
        bad.fail = true;
        manager.register(bad, 2);
        manager.register(Recorder::boxed("third", &trace), 3);

        let bus = EventBus::new();
        let input = NullInput;
        let mut world = ();
        let err = manager
            .update_all(&mut tick(&bus, &input, &mut world))
            .unwrap_err();

        assert!(err.to_string().contains("second"));
        // "third" never ran.
        assert_eq!(*trace.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unregister_all_empties_the_registry() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut manager = PluginManager::new();
        manager.register(Recorder::boxed("a", &trace), 1);
        manager.register(Recorder::boxed("b", &trace), 2);

        manager.unregister_all();
        assert!(manager.is_empty());
        assert!(manager.get("a").is_none());
    }

    #[test]
    fn typed_lookup_rejects_wrong_type() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let mut manager = PluginManager::new();
        manager.register(Recorder::boxed("a", &trace), 1);

        assert!(manager.get_as::<Recorder>("a").is_some());
        assert!(manager.get_as::<String>("a").is_none());
        assert!(manager.get_as::<Recorder>("missing").is_none());
    }
}
