#[derive(Debug, Default)]
struct ActiveLevel {
    name: String,
    width: usize,
    height: usize,
}

/// One play-through: the indexed world, the level set, and the movement
/// policies of everything that moves.
#[derive(Debug)]
pub(crate) struct GameSession {
    state: GameState,
    registry: LevelRegistry,
    active: ActiveLevel,
    controllers: Vec<(EntityId, Controller)>,
    player_id: EntityId,
    hint: String,
    goal_reached: bool,
}

impl GameSession {
    pub(crate) fn new(
        registry: LevelRegistry,
        start_level: &str,
        start_entrance: &str,
    ) -> Result<Self, LevelError> {
        let mut state = GameState::default();
        let mut player = Entity::unplaced();
        player.player = true;
        player.radius = Some(PLAYER_RADIUS);
        player.run_speed = PLAYER_RUN_SPEED_TILES_PER_SECOND;
        player.sprites.set(DrawLayer::Fg3, "smiles");
        let player_id = state.add_entity(player);

        let mut session = Self {
            state,
            registry,
            active: ActiveLevel::default(),
            controllers: vec![(player_id, Controller::PlayerInput)],
            player_id,
            hint: String::new(),
            goal_reached: false,
        };
        session.move_to_level(start_level, start_entrance)?;
        Ok(session)
    }

    /// Tears down the outgoing level and builds the target one, then places
    /// the player at the named entrance with re-trigger suppression armed.
    fn move_to_level(&mut self, level_name: &str, entrance_name: &str) -> Result<(), LevelError> {
        // Exactly-one-player is load-bearing here; one_of_type enforces it.
        let player_id = self.state.one_of_type(TypeFlag::Player);
        let loaded = load_level(self.registry.get(level_name)?)?;
        let spawn_tile = *loaded.entrances.get(entrance_name).ok_or_else(|| {
            LevelError::UnknownEntrance {
                level: level_name.to_string(),
                entrance: entrance_name.to_string(),
            }
        })?;

        let stale: Vec<EntityId> = self.state.all_of_type(TypeFlag::LevelBound).to_vec();
        for id in &stale {
            self.state.remove_entity(*id);
        }
        let state = &self.state;
        self.controllers.retain(|(id, _)| state.contains(*id));

        let player_has_spawned_key = self
            .state
            .find_entity(player_id)
            .map(|player| player.held_keys.contains(&KeyId::new(SPAWNED_KEY_ID)))
            .unwrap_or(false);

        let tile_count = loaded.tiles.len();
        for level_tile in &loaded.tiles {
            let mut entity = Entity::tile_at(level_tile.tile);
            entity.level_bound = true;
            entity.floor = level_tile.floor;
            entity.wall = level_tile.wall;
            entity.goal = level_tile.goal;
            entity.entrance = level_tile.entrance.clone();
            entity.exit = level_tile.exit.clone();
            entity.spawner = level_tile.spawner;
            entity.sprites = level_tile.sprites.clone();
            self.state.add_entity(entity);

            if let Some(kind) = level_tile.spawner {
                self.activate_spawner(kind, level_tile.tile, player_has_spawned_key);
            }
        }

        self.state.move_entity(
            player_id,
            Vec2::new(spawn_tile.x as f32, spawn_tile.y as f32),
            vec![spawn_tile],
        );
        if let Some(player) = self.state.find_entity_mut(player_id) {
            player.recent_entrance = Some(RecentEntrance {
                entrance: entrance_name.to_string(),
                tile: spawn_tile,
            });
        }

        info!(
            level = %loaded.name,
            entrance = %entrance_name,
            tile_count,
            removed_entities = stale.len(),
            "level_entered"
        );
        self.active = ActiveLevel {
            name: loaded.name,
            width: loaded.width,
            height: loaded.height,
        };
        Ok(())
    }

    fn activate_spawner(&mut self, kind: SpawnerKind, tile: TileCoord, player_has_spawned_key: bool) {
        match kind {
            SpawnerKind::Key => {
                if player_has_spawned_key {
                    return;
                }
                let mut key = Entity::tile_at(tile);
                key.level_bound = true;
                key.key = Some(KeyId::new(SPAWNED_KEY_ID));
                key.sprites.set(DrawLayer::Fg1, "key");
                self.state.add_entity(key);
            }
            SpawnerKind::Lock => {
                let mut lock = Entity::tile_at(tile);
                lock.level_bound = true;
                lock.lock = Some(KeyId::new(SPAWNED_KEY_ID));
                lock.sprites.set(DrawLayer::Fg1, "lock");
                self.state.add_entity(lock);
            }
            SpawnerKind::Slime => {
                let mut slime = Entity::tile_at(tile);
                slime.level_bound = true;
                slime.radius = Some(SLIME_RADIUS);
                slime.run_speed = SLIME_RUN_SPEED_TILES_PER_SECOND;
                slime.sprites.set(DrawLayer::Fg2, "slime");
                let id = self.state.add_entity(slime);
                self.controllers
                    .push((id, Controller::brownian_walk(slime_seed(tile))));
            }
        }
    }

    /// One fixed logic step: timers first, then every controller gets one
    /// decision and at most one move attempt.
    pub(crate) fn tick(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        for (_, controller) in &mut self.controllers {
            controller.advance(dt_seconds);
        }

        let mut index = 0;
        while index < self.controllers.len() {
            let (mover_id, heading) = {
                let (id, controller) = &mut self.controllers[index];
                (*id, controller.decide(input))
            };
            if let Some(heading) = heading {
                if self.state.contains(mover_id) {
                    let report = self.try_move(mover_id, heading, dt_seconds);
                    let transitioned = matches!(report.outcome, MoveOutcome::Transitioned { .. });
                    self.apply_report(report);
                    if transitioned {
                        // The level-bound population was just replaced;
                        // surviving movers act again next step.
                        break;
                    }
                }
            }
            index += 1;
        }
        let state = &self.state;
        self.controllers.retain(|(id, _)| state.contains(*id));
    }

    fn apply_report(&mut self, report: MoveReport) {
        if let MoveOutcome::Transitioned { level, .. } = &report.outcome {
            self.hint = format!("Now entering {level} ...");
        }
        for notice in &report.notices {
            self.hint = notice_text(*notice).to_string();
            if *notice == MoveNotice::GoalReached {
                self.goal_reached = true;
            }
        }
    }

    pub(crate) fn goal_reached(&self) -> bool {
        self.goal_reached
    }

    pub(crate) fn hint(&self) -> &str {
        &self.hint
    }

    pub(crate) fn render_text(&self) -> String {
        render_to_string(&self.state, &self.active, &self.hint)
    }
}

fn slime_seed(tile: TileCoord) -> u64 {
    ((tile.x as u32 as u64) << 32) | tile.y as u32 as u64
}
