fn notice_text(notice: MoveNotice) -> &'static str {
    match notice {
        MoveNotice::HitWall => "BONK",
        MoveNotice::LockBlocked => "BONK! Need a key...",
        MoveNotice::KeyCollected => "Got the key.",
        MoveNotice::GoalReached => "Found the glowing thing! Winner!",
        MoveNotice::NoFloor => "No floor there.. scary.",
    }
}

fn sprite_glyph(sprite: &str) -> char {
    match sprite {
        "floor" => '.',
        "bricks" => '#',
        "stairs" => '>',
        "glowycircle" => '*',
        "key" => 'k',
        "lock" => 'L',
        "slime" => 's',
        "smiles" => '@',
        _ => '?',
    }
}

/// Text view of the current level: for each cell, the topmost sprite in
/// back-to-front layer order wins.
fn render_to_string(state: &GameState, active: &ActiveLevel, hint: &str) -> String {
    let mut out = String::with_capacity((active.width + 1) * active.height + hint.len() + 16);
    for y in 0..active.height as i32 {
        for x in 0..active.width as i32 {
            let occupants = state.entities_at_tile(TileCoord::new(x, y));
            let mut glyph = ' ';
            for layer in DrawLayer::ALL {
                for id in &occupants {
                    if let Some(sprite) = state
                        .find_entity(*id)
                        .and_then(|entity| entity.sprites.get(layer))
                    {
                        glyph = sprite_glyph(sprite);
                    }
                }
            }
            out.push(glyph);
        }
        out.push('\n');
    }
    out.push_str("| ");
    out.push_str(hint);
    out.push('\n');
    out
}
