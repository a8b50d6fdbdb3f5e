#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct EntityId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum DrawLayer {
    Bg3,
    Bg2,
    Bg1,
    Fg1,
    Fg2,
    Fg3,
}

impl DrawLayer {
    // Back-to-front paint order; the last layer with a sprite wins a cell.
    const ALL: [DrawLayer; 6] = [
        DrawLayer::Bg3,
        DrawLayer::Bg2,
        DrawLayer::Bg1,
        DrawLayer::Fg1,
        DrawLayer::Fg2,
        DrawLayer::Fg3,
    ];

    fn slot(self) -> usize {
        match self {
            DrawLayer::Bg3 => 0,
            DrawLayer::Bg2 => 1,
            DrawLayer::Bg1 => 2,
            DrawLayer::Fg1 => 3,
            DrawLayer::Fg2 => 4,
            DrawLayer::Fg3 => 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct SpriteLayers([Option<String>; 6]);

impl SpriteLayers {
    fn set(&mut self, layer: DrawLayer, sprite: impl Into<String>) {
        self.0[layer.slot()] = Some(sprite.into());
    }

    fn get(&self, layer: DrawLayer) -> Option<&str> {
        self.0[layer.slot()].as_deref()
    }

    fn occupied_layers(&self) -> impl Iterator<Item = DrawLayer> + '_ {
        DrawLayer::ALL
            .into_iter()
            .filter(|layer| self.0[layer.slot()].is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct KeyId(String);

impl KeyId {
    fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ExitTarget {
    // None means "current level".
    level: Option<String>,
    entrance: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SpawnerKind {
    Key,
    Lock,
    Slime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TypeFlag {
    Player,
    Wall,
    Floor,
    Goal,
    Key,
    Lock,
    Exit,
    LevelBound,
    Sprite(DrawLayer),
}

#[derive(Debug, Clone, PartialEq)]
struct Entity {
    id: EntityId,
    position: Vec2,
    tile_cover: Vec<TileCoord>,
    radius: Option<f32>,
    run_speed: f32,
    player: bool,
    wall: bool,
    floor: bool,
    goal: bool,
    level_bound: bool,
    key: Option<KeyId>,
    lock: Option<KeyId>,
    exit: Option<ExitTarget>,
    entrance: Option<String>,
    spawner: Option<SpawnerKind>,
    sprites: SpriteLayers,
    held_keys: HashSet<KeyId>,
    recent_entrance: Option<RecentEntrance>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RecentEntrance {
    entrance: String,
    tile: TileCoord,
}

impl Entity {
    fn unplaced() -> Self {
        Self {
            id: EntityId(0),
            position: Vec2::ZERO,
            tile_cover: Vec::new(),
            radius: None,
            run_speed: 0.0,
            player: false,
            wall: false,
            floor: false,
            goal: false,
            level_bound: false,
            key: None,
            lock: None,
            exit: None,
            entrance: None,
            spawner: None,
            sprites: SpriteLayers::default(),
            held_keys: HashSet::new(),
            recent_entrance: None,
        }
    }

    fn tile_at(tile: TileCoord) -> Self {
        Self {
            position: Vec2::new(tile.x as f32, tile.y as f32),
            tile_cover: vec![tile],
            ..Self::unplaced()
        }
    }

    fn type_flags(&self) -> Vec<TypeFlag> {
        let mut flags = Vec::new();
        if self.player {
            flags.push(TypeFlag::Player);
        }
        if self.wall {
            flags.push(TypeFlag::Wall);
        }
        if self.floor {
            flags.push(TypeFlag::Floor);
        }
        if self.goal {
            flags.push(TypeFlag::Goal);
        }
        if self.key.is_some() {
            flags.push(TypeFlag::Key);
        }
        if self.lock.is_some() {
            flags.push(TypeFlag::Lock);
        }
        if self.exit.is_some() {
            flags.push(TypeFlag::Exit);
        }
        if self.level_bound {
            flags.push(TypeFlag::LevelBound);
        }
        for layer in self.sprites.occupied_layers() {
            flags.push(TypeFlag::Sprite(layer));
        }
        flags
    }
}

/// Entity store plus the three lookup indices the rest of the game queries.
///
/// Index discipline: an entity is either fully indexed under every x/y of
/// its current `tile_cover` and every flag it carries, or not indexed at
/// all. Position and flags are only mutated between a deindex and a
/// reindex ([`GameState::move_entity`] wraps that sequence), so the indices
/// can never hold stale coordinates.
#[derive(Debug, Default)]
struct GameState {
    next_entity_id: u64,
    entities: HashMap<EntityId, Entity>,
    by_x: HashMap<i32, Vec<EntityId>>,
    by_y: HashMap<i32, Vec<EntityId>>,
    by_type: HashMap<TypeFlag, Vec<EntityId>>,
}

fn push_unique(bucket: &mut Vec<EntityId>, id: EntityId) {
    if !bucket.contains(&id) {
        bucket.push(id);
    }
}

fn ids_at<K: std::hash::Hash + Eq>(index: &HashMap<K, Vec<EntityId>>, key: K) -> &[EntityId] {
    index.get(&key).map(Vec::as_slice).unwrap_or(&[])
}

fn intersect_entity_sets(a: &[EntityId], b: &[EntityId]) -> Vec<EntityId> {
    a.iter().copied().filter(|id| b.contains(id)).collect()
}

impl GameState {
    fn add_entity(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        entity.id = id;
        self.entities.insert(id, entity);
        self.index_entity(id);
        id
    }

    fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        self.deindex_entity(id);
        self.entities.remove(&id)
    }

    /// Atomic within a tick: deindex, mutate position and footprint, reindex.
    fn move_entity(&mut self, id: EntityId, new_position: Vec2, new_cover: Vec<TileCoord>) {
        self.deindex_entity(id);
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = new_position;
            entity.tile_cover = new_cover;
        }
        self.index_entity(id);
    }

    fn index_entity(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(&id) else {
            return;
        };
        let xs: Vec<i32> = entity.tile_cover.iter().map(|tile| tile.x).collect();
        let ys: Vec<i32> = entity.tile_cover.iter().map(|tile| tile.y).collect();
        let flags = entity.type_flags();
        for x in xs {
            push_unique(self.by_x.entry(x).or_default(), id);
        }
        for y in ys {
            push_unique(self.by_y.entry(y).or_default(), id);
        }
        for flag in flags {
            push_unique(self.by_type.entry(flag).or_default(), id);
        }
    }

    fn deindex_entity(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(&id) else {
            return;
        };
        let xs: Vec<i32> = entity.tile_cover.iter().map(|tile| tile.x).collect();
        let ys: Vec<i32> = entity.tile_cover.iter().map(|tile| tile.y).collect();
        let flags = entity.type_flags();
        for x in xs {
            if let Some(bucket) = self.by_x.get_mut(&x) {
                bucket.retain(|other| *other != id);
            }
        }
        for y in ys {
            if let Some(bucket) = self.by_y.get_mut(&y) {
                bucket.retain(|other| *other != id);
            }
        }
        for flag in flags {
            if let Some(bucket) = self.by_type.get_mut(&flag) {
                bucket.retain(|other| *other != id);
            }
        }
    }

    fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    fn all_at_x(&self, x: i32) -> &[EntityId] {
        ids_at(&self.by_x, x)
    }

    fn all_at_y(&self, y: i32) -> &[EntityId] {
        ids_at(&self.by_y, y)
    }

    fn all_of_type(&self, flag: TypeFlag) -> &[EntityId] {
        ids_at(&self.by_type, flag)
    }

    /// Contract accessor: the caller asserts exactly one entity carries
    /// `flag`. Any other count is an index-maintenance bug, not a game
    /// outcome, so it fails loudly.
    fn one_of_type(&self, flag: TypeFlag) -> EntityId {
        let ids = self.all_of_type(flag);
        if ids.len() != 1 {
            panic!(
                "type {flag:?} does not store exactly one entity (actual: {})",
                ids.len()
            );
        }
        ids[0]
    }

    fn entities_at_tile(&self, tile: TileCoord) -> Vec<EntityId> {
        intersect_entity_sets(self.all_at_x(tile.x), self.all_at_y(tile.y))
    }
}
