#[derive(Debug, Clone, PartialEq, Eq)]
enum MoveOutcome {
    /// Zero heading or missing mover. Nothing was attempted.
    Idle,
    Moved,
    BlockedByWall,
    BlockedByLock,
    BlockedNoFloor,
    Transitioned { level: String, entrance: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveNotice {
    HitWall,
    LockBlocked,
    KeyCollected,
    GoalReached,
    NoFloor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MoveReport {
    outcome: MoveOutcome,
    notices: Vec<MoveNotice>,
}

impl MoveReport {
    fn idle() -> Self {
        Self {
            outcome: MoveOutcome::Idle,
            notices: Vec::new(),
        }
    }
}

impl GameSession {
    /// Resolves one move attempt against the tile grid.
    ///
    /// Rule precedence over the candidate footprint: wall, then lock, then
    /// key pickup, then exit, then the floor requirement. Notices are only
    /// emitted for the player; other movers obey the same physics silently.
    fn try_move(&mut self, mover_id: EntityId, heading: Vec2, dt_seconds: f32) -> MoveReport {
        let Some(mover) = self.state.find_entity(mover_id) else {
            return MoveReport::idle();
        };
        let Some(unit) = heading.normalized() else {
            return MoveReport::idle();
        };
        let is_player = mover_id == self.player_id;
        let radius = mover.radius.unwrap_or(0.0);
        let held_keys = mover.held_keys.clone();
        let recent_entrance = mover.recent_entrance.clone();
        let candidate = mover.position + unit * (mover.run_speed * dt_seconds);
        let cover = circle_tile_cover(candidate, radius);

        let mut occupants: Vec<EntityId> = Vec::new();
        for tile in &cover {
            for id in self.state.entities_at_tile(*tile) {
                if id != mover_id && !occupants.contains(&id) {
                    occupants.push(id);
                }
            }
        }

        let mut has_floor = false;
        let mut has_wall = false;
        let mut has_goal = false;
        let mut key_entities: Vec<EntityId> = Vec::new();
        let mut lock_entities: Vec<EntityId> = Vec::new();
        let mut exit_entities: Vec<EntityId> = Vec::new();
        for id in &occupants {
            let Some(entity) = self.state.find_entity(*id) else {
                continue;
            };
            has_floor |= entity.floor;
            has_wall |= entity.wall;
            has_goal |= entity.goal;
            if entity.key.is_some() {
                key_entities.push(*id);
            }
            if entity.lock.is_some() {
                lock_entities.push(*id);
            }
            if entity.exit.is_some() {
                let suppressed = recent_entrance
                    .as_ref()
                    .map(|recent| entity.tile_cover.contains(&recent.tile))
                    .unwrap_or(false);
                if !suppressed {
                    exit_entities.push(*id);
                }
            }
        }

        let mut notices = Vec::new();
        if has_wall {
            if is_player {
                notices.push(MoveNotice::HitWall);
            }
            return MoveReport {
                outcome: MoveOutcome::BlockedByWall,
                notices,
            };
        }

        let locks_open = lock_entities.iter().all(|id| {
            self.state
                .find_entity(*id)
                .and_then(|entity| entity.lock.as_ref())
                .map(|key_id| held_keys.contains(key_id))
                .unwrap_or(true)
        });
        if !locks_open {
            if is_player {
                notices.push(MoveNotice::LockBlocked);
            }
            return MoveReport {
                outcome: MoveOutcome::BlockedByLock,
                notices,
            };
        }
        for id in lock_entities {
            self.state.remove_entity(id);
        }

        // Keys land on the mover's key ring; only the player carries one.
        if is_player {
            for id in key_entities {
                let collected = self
                    .state
                    .remove_entity(id)
                    .and_then(|entity| entity.key);
                if let Some(key_id) = collected {
                    if let Some(player) = self.state.find_entity_mut(mover_id) {
                        player.held_keys.insert(key_id);
                    }
                    notices.push(MoveNotice::KeyCollected);
                }
            }
        }

        if is_player {
            if let Some(exit_id) = exit_entities.first() {
                let target = self
                    .state
                    .find_entity(*exit_id)
                    .and_then(|entity| entity.exit.clone());
                if let Some(target) = target {
                    let level = target
                        .level
                        .unwrap_or_else(|| self.active.name.clone());
                    // Bad exit wiring is an authoring bug in shipped level
                    // data; there is no recovery path mid-play.
                    self.move_to_level(&level, &target.entrance)
                        .unwrap_or_else(|error| panic!("{error}"));
                    return MoveReport {
                        outcome: MoveOutcome::Transitioned {
                            level,
                            entrance: target.entrance,
                        },
                        notices,
                    };
                }
            }
        }

        if !has_floor {
            if is_player {
                notices.push(MoveNotice::NoFloor);
            }
            return MoveReport {
                outcome: MoveOutcome::BlockedNoFloor,
                notices,
            };
        }

        self.state.move_entity(mover_id, candidate, cover.clone());
        if is_player {
            if has_goal {
                notices.push(MoveNotice::GoalReached);
            }
            if let Some(recent) = recent_entrance {
                if !cover.contains(&recent.tile) {
                    if let Some(player) = self.state.find_entity_mut(mover_id) {
                        player.recent_entrance = None;
                    }
                }
            }
        }
        MoveReport {
            outcome: MoveOutcome::Moved,
            notices,
        }
    }
}
