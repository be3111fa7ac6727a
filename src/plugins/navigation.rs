use crate::config::NavigationConfig;
use crate::map::MapDefinition;
use crate::pathfinding::{LockToken, NavigationEngine, PermissionSet};
use crate::terrain::coordinates::floor_cell;
use bevy::prelude::*;

/// Drives a [`NavigationEngine`] from the ECS tick.
///
/// Obstructions are rebuilt in `PreUpdate`, so every path request serviced in `Update`
/// sees the same snapshot for the whole tick.
#[derive(Default)]
pub struct NavigationPlugin {
    map: Option<MapDefinition>,
    config: NavigationConfig,
}

impl NavigationPlugin {
    /// Build and insert the engine for `map` when the plugin is added
    pub fn with_map(map: MapDefinition, config: NavigationConfig) -> Self {
        Self {
            map: Some(map),
            config,
        }
    }
}

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        if let Some(map) = &self.map {
            let engine = NavigationEngine::from_map(map, self.config);
            if let Err(err) = engine.ensure_spawnable() {
                warn!("Map '{}': {err} - spawn requests will be ignored", map.name);
            }
            app.insert_resource(engine);
        }

        app.add_systems(PreUpdate, rebuild_obstruction_registry)
            .add_systems(Update, (place_spawn_requests, service_path_requests).chain());
    }
}

/// Continuous position in grid space
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPosition(pub Vec2);

/// Marks an entity whose cell is locked with `token` this tick
#[derive(Component, Debug, Clone)]
pub struct BlockingItem {
    pub token: LockToken,
}

impl BlockingItem {
    pub fn new(token: impl Into<LockToken>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Lock tokens an agent may pass through. Agents without this component hold none.
#[derive(Component, Debug, Clone, Default)]
pub struct Permissions(pub PermissionSet);

/// Ask for a route from the entity's [`GridPosition`] to `goal`; answered with a [`NavPath`]
#[derive(Component, Debug, Clone, Copy)]
pub struct PathRequest {
    pub goal: Vec2,
    pub fuzzy: bool,
}

impl PathRequest {
    pub fn exact(goal: Vec2) -> Self {
        Self { goal, fuzzy: false }
    }

    pub fn fuzzy(goal: Vec2) -> Self {
        Self { goal, fuzzy: true }
    }
}

/// Ask for a random walkable starting cell; answered with a [`GridPosition`]
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SpawnRequest;

/// Remaining waypoints for an agent
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct NavPath {
    waypoints: Vec<IVec2>,
    current_index: usize,
}

impl NavPath {
    pub fn new(waypoints: Vec<IVec2>) -> Self {
        Self {
            waypoints,
            current_index: 0,
        }
    }

    pub fn current_waypoint(&self) -> Option<IVec2> {
        self.waypoints.get(self.current_index).copied()
    }

    pub fn advance(&mut self) {
        if self.current_index < self.waypoints.len() {
            self.current_index += 1;
        }
    }

    pub fn final_destination(&self) -> Option<IVec2> {
        self.waypoints.last().copied()
    }

    pub fn waypoints(&self) -> &[IVec2] {
        &self.waypoints
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.waypoints.len()
    }
}

/// Clear the registry, then lock the cell under every blocking item
pub fn rebuild_obstruction_registry(
    engine: Option<ResMut<NavigationEngine>>,
    items: Query<(&GridPosition, &BlockingItem)>,
) {
    let Some(mut engine) = engine else {
        return;
    };

    engine.clear_blocking_items();
    for (position, item) in &items {
        let cell = floor_cell(position.0);
        engine.set_blocking_item(cell.x, cell.y, item.token.clone());
    }

    debug!(
        "Rebuilt obstruction registry: {} locked cells",
        engine.blocking_item_count()
    );
}

pub fn place_spawn_requests(
    mut commands: Commands,
    engine: Option<Res<NavigationEngine>>,
    requests: Query<Entity, With<SpawnRequest>>,
) {
    let Some(engine) = engine else {
        return;
    };
    if engine.ensure_spawnable().is_err() {
        return;
    }

    for entity in &requests {
        let cell = engine.spawn_coordinate();
        debug!("Spawning {entity} at {cell}");
        commands
            .entity(entity)
            .insert(GridPosition(cell.as_vec2()))
            .remove::<SpawnRequest>();
    }
}

pub fn service_path_requests(
    mut commands: Commands,
    engine: Option<Res<NavigationEngine>>,
    requests: Query<(Entity, &GridPosition, &PathRequest, Option<&Permissions>)>,
) {
    let Some(engine) = engine else {
        return;
    };

    let nobody = PermissionSet::empty();
    for (entity, position, request, permissions) in &requests {
        let permissions = permissions.map_or(&nobody, |p| &p.0);
        let waypoints =
            engine.generate_path(permissions, position.0, request.goal, request.fuzzy);

        if waypoints.is_empty() {
            debug!(
                "No route for {entity} from ({:.1}, {:.1}) to ({:.1}, {:.1})",
                position.0.x, position.0.y, request.goal.x, request.goal.y
            );
        }

        commands
            .entity(entity)
            .insert(NavPath::new(waypoints))
            .remove::<PathRequest>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courtyard_app() -> App {
        let map = MapDefinition::from_ascii(
            "courtyard",
            "
            ...
            .#.
            ...
            ",
        )
        .unwrap();

        let mut app = App::new();
        app.add_plugins(NavigationPlugin::with_map(map, NavigationConfig::default()));
        app
    }

    fn spawn_gates(app: &mut App) -> [Entity; 2] {
        [(2.0, 0.0), (0.0, 2.0)].map(|(x, y)| {
            app.world_mut()
                .spawn((GridPosition(Vec2::new(x, y)), BlockingItem::new("gate")))
                .id()
        })
    }

    #[test]
    fn test_plugin_inserts_engine() {
        let app = courtyard_app();
        let engine = app.world().resource::<NavigationEngine>();
        assert_eq!(engine.grid().width(), 3);
        assert_eq!(engine.grid().walkable_count(), 8);
    }

    #[test]
    fn test_registry_rebuilt_each_tick() {
        let mut app = courtyard_app();
        let gates = spawn_gates(&mut app);

        app.update();
        assert_eq!(app.world().resource::<NavigationEngine>().blocking_item_count(), 2);

        app.world_mut().despawn(gates[0]);
        app.update();
        let engine = app.world().resource::<NavigationEngine>();
        assert_eq!(engine.blocking_item_count(), 1);
        assert!(engine.blocking_token_at(2, 0).is_none());
        assert!(engine.blocking_token_at(0, 2).is_some());
    }

    #[test]
    fn test_path_requests_respect_permissions() {
        let mut app = courtyard_app();
        spawn_gates(&mut app);

        let stranger = app
            .world_mut()
            .spawn((GridPosition(Vec2::ZERO), PathRequest::exact(Vec2::new(2.0, 2.0))))
            .id();
        let keyholder = app
            .world_mut()
            .spawn((
                GridPosition(Vec2::ZERO),
                PathRequest::exact(Vec2::new(2.0, 2.0)),
                Permissions(["gate"].into_iter().collect()),
            ))
            .id();

        app.update();

        let world = app.world();
        assert!(world.get::<PathRequest>(stranger).is_none());
        assert!(world.get::<NavPath>(stranger).unwrap().is_empty());

        let path = world.get::<NavPath>(keyholder).unwrap();
        assert_eq!(path.final_destination(), Some(IVec2::new(2, 2)));
        assert_eq!(path.waypoints(), &[IVec2::new(0, 2), IVec2::new(2, 2)]);
    }

    #[test]
    fn test_spawn_requests_land_on_open_cells() {
        let mut app = courtyard_app();
        spawn_gates(&mut app);
        let spawned: Vec<Entity> = (0..10)
            .map(|_| app.world_mut().spawn(SpawnRequest).id())
            .collect();

        app.update();

        let world = app.world();
        let engine = world.resource::<NavigationEngine>();
        for entity in spawned {
            assert!(world.get::<SpawnRequest>(entity).is_none());
            let cell = floor_cell(world.get::<GridPosition>(entity).unwrap().0);
            assert!(engine.is_cell_walkable(&PermissionSet::empty(), cell));
        }
    }

    #[test]
    fn test_systems_idle_without_engine() {
        let mut app = App::new();
        app.add_plugins(NavigationPlugin::default());
        let agent = app
            .world_mut()
            .spawn((GridPosition(Vec2::ZERO), PathRequest::fuzzy(Vec2::ONE)))
            .id();

        app.update();
        assert!(app.world().get::<PathRequest>(agent).is_some());
    }

    #[test]
    fn test_nav_path_progress() {
        let mut path = NavPath::new(vec![IVec2::new(1, 0), IVec2::new(3, 2)]);
        assert_eq!(path.current_waypoint(), Some(IVec2::new(1, 0)));
        path.advance();
        assert_eq!(path.current_waypoint(), Some(IVec2::new(3, 2)));
        assert_eq!(path.current_index(), 1);
        path.advance();
        path.advance();
        assert!(path.is_finished());
        assert_eq!(path.current_waypoint(), None);
        assert_eq!(path.len(), 2);
    }
}
