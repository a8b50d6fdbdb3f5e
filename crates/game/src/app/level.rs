#[derive(Debug, Error)]
pub(crate) enum LevelError {
    #[error("level {level}: character {symbol:?} at column {column}, row {row} has no legend entry")]
    UnknownSymbol {
        level: String,
        symbol: char,
        column: usize,
        row: usize,
    },
    #[error("level {level}: duplicate entrance name {entrance:?}")]
    DuplicateEntrance { level: String, entrance: String },
    #[error("level {level}: exit value {value:?} is not \"entrance\" or \"level.entrance\"")]
    MalformedExit { level: String, value: String },
    #[error("duplicate level name {level:?} in level set")]
    DuplicateLevel { level: String },
    #[error("unknown level {level:?}")]
    UnknownLevel { level: String },
    #[error("level {level}: unknown entrance {entrance:?}")]
    UnknownEntrance { level: String, entrance: String },
    #[error("level data is not valid JSON: {0}")]
    Parse(#[from] serde_path_to_error::Error<serde_json::Error>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TileSymbol {
    #[serde(default)]
    floor: bool,
    #[serde(default)]
    wall: bool,
    #[serde(default)]
    goal: bool,
    #[serde(default)]
    entrance: Option<String>,
    #[serde(default)]
    exit: Option<String>,
    #[serde(default)]
    spawner: Option<SpawnerKind>,
    #[serde(default)]
    svgbg1: Option<String>,
    #[serde(default)]
    svgbg2: Option<String>,
    #[serde(default)]
    svgbg3: Option<String>,
    #[serde(default)]
    svgfg1: Option<String>,
    #[serde(default)]
    svgfg2: Option<String>,
    #[serde(default)]
    svgfg3: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelData {
    name: String,
    legend: HashMap<char, TileSymbol>,
    rows: Vec<String>,
}

/// One grid cell of a loaded level, before it is registered as an entity.
#[derive(Debug, Clone)]
struct LevelTile {
    tile: TileCoord,
    floor: bool,
    wall: bool,
    goal: bool,
    entrance: Option<String>,
    exit: Option<ExitTarget>,
    spawner: Option<SpawnerKind>,
    sprites: SpriteLayers,
}

#[derive(Debug, Clone)]
struct LoadedLevel {
    name: String,
    tiles: Vec<LevelTile>,
    entrances: HashMap<String, TileCoord>,
    width: usize,
    height: usize,
}

fn parse_exit_target(level: &str, value: &str) -> Result<ExitTarget, LevelError> {
    let mut parts = value.split('.');
    let first = parts.next().unwrap_or_default();
    let second = parts.next();
    if first.is_empty() || second == Some("") || parts.next().is_some() {
        return Err(LevelError::MalformedExit {
            level: level.to_string(),
            value: value.to_string(),
        });
    }
    Ok(match second {
        Some(entrance) => ExitTarget {
            level: Some(first.to_string()),
            entrance: entrance.to_string(),
        },
        None => ExitTarget {
            level: None,
            entrance: first.to_string(),
        },
    })
}

/// Expands the character grid into per-cell tiles and the entrance registry.
/// Pure with respect to game state; rows may be ragged.
fn load_level(data: &LevelData) -> Result<LoadedLevel, LevelError> {
    let mut tiles = Vec::new();
    let mut entrances = HashMap::new();
    let mut width = 0usize;

    for (row, row_str) in data.rows.iter().enumerate() {
        for (column, symbol) in row_str.chars().enumerate() {
            width = width.max(column + 1);
            let Some(symbol_data) = data.legend.get(&symbol) else {
                return Err(LevelError::UnknownSymbol {
                    level: data.name.clone(),
                    symbol,
                    column,
                    row,
                });
            };
            let tile = TileCoord {
                x: column as i32,
                y: row as i32,
            };
            let exit = symbol_data
                .exit
                .as_deref()
                .map(|value| parse_exit_target(&data.name, value))
                .transpose()?;
            let mut sprites = SpriteLayers::default();
            for (layer, sprite) in [
                (DrawLayer::Bg1, &symbol_data.svgbg1),
                (DrawLayer::Bg2, &symbol_data.svgbg2),
                (DrawLayer::Bg3, &symbol_data.svgbg3),
                (DrawLayer::Fg1, &symbol_data.svgfg1),
                (DrawLayer::Fg2, &symbol_data.svgfg2),
                (DrawLayer::Fg3, &symbol_data.svgfg3),
            ] {
                if let Some(sprite) = sprite {
                    sprites.set(layer, sprite.clone());
                }
            }
            if let Some(entrance) = &symbol_data.entrance {
                if entrances.insert(entrance.clone(), tile).is_some() {
                    return Err(LevelError::DuplicateEntrance {
                        level: data.name.clone(),
                        entrance: entrance.clone(),
                    });
                }
            }
            tiles.push(LevelTile {
                tile,
                floor: symbol_data.floor,
                wall: symbol_data.wall,
                goal: symbol_data.goal,
                entrance: symbol_data.entrance.clone(),
                exit,
                spawner: symbol_data.spawner,
                sprites,
            });
        }
    }

    Ok(LoadedLevel {
        name: data.name.clone(),
        tiles,
        entrances,
        width,
        height: data.rows.len(),
    })
}

#[derive(Debug, Default)]
pub(crate) struct LevelRegistry {
    levels: HashMap<String, LevelData>,
}

impl LevelRegistry {
    /// Parses a JSON array of level definitions. Failures carry the JSON
    /// path of the offending field.
    pub(crate) fn from_json_str(raw: &str) -> Result<Self, LevelError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let levels: Vec<LevelData> = serde_path_to_error::deserialize(&mut deserializer)?;
        let mut registry = Self::default();
        for level in levels {
            let name = level.name.clone();
            if registry.levels.insert(name.clone(), level).is_some() {
                return Err(LevelError::DuplicateLevel { level: name });
            }
        }
        Ok(registry)
    }

    fn get(&self, name: &str) -> Result<&LevelData, LevelError> {
        self.levels.get(name).ok_or_else(|| LevelError::UnknownLevel {
            level: name.to_string(),
        })
    }

    pub(crate) fn level_names(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }
}
