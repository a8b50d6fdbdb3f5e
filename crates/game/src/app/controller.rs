const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const RNG_INCREMENT: u64 = 1;

const CARDINAL_HEADINGS: [Vec2; 4] = [
    Vec2 { x: 0.0, y: -1.0 },
    Vec2 { x: 0.0, y: 1.0 },
    Vec2 { x: -1.0, y: 0.0 },
    Vec2 { x: 1.0, y: 0.0 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(RNG_MULTIPLIER)
            .wrapping_add(RNG_INCREMENT);
        self.state
    }

    fn next_index(&mut self, bound: u64) -> u64 {
        (self.next_u64() >> 33) % bound.max(1)
    }
}

/// Per-entity movement policy, polled once per logic step.
#[derive(Debug, Clone)]
enum Controller {
    PlayerInput,
    BrownianWalk {
        timer: Timer,
        heading: Vec2,
        rng: Lcg,
    },
}

impl Controller {
    fn brownian_walk(seed: u64) -> Self {
        Self::BrownianWalk {
            timer: Timer::new(BROWNIAN_PERIOD_SECONDS),
            heading: Vec2::ZERO,
            rng: Lcg::seeded(seed),
        }
    }

    fn advance(&mut self, dt_seconds: f32) {
        if let Self::BrownianWalk { timer, .. } = self {
            timer.advance(dt_seconds);
        }
    }

    fn decide(&mut self, input: &InputSnapshot) -> Option<Vec2> {
        match self {
            Self::PlayerInput => held_movement_heading(input),
            Self::BrownianWalk {
                timer,
                heading,
                rng,
            } => {
                if timer.complete() {
                    timer.reset(None);
                    // Four directions plus standing still.
                    *heading = match rng.next_index(5) {
                        index @ 0..=3 => CARDINAL_HEADINGS[index as usize],
                        _ => Vec2::ZERO,
                    };
                }
                (*heading != Vec2::ZERO).then_some(*heading)
            }
        }
    }
}

// Grid rows grow downward, so MoveDown is +y.
fn held_movement_heading(input: &InputSnapshot) -> Option<Vec2> {
    let mut heading = Vec2::ZERO;
    if input.is_down(InputAction::MoveRight) {
        heading.x += 1.0;
    }
    if input.is_down(InputAction::MoveLeft) {
        heading.x -= 1.0;
    }
    if input.is_down(InputAction::MoveDown) {
        heading.y += 1.0;
    }
    if input.is_down(InputAction::MoveUp) {
        heading.y -= 1.0;
    }
    (heading != Vec2::ZERO).then_some(heading)
}
