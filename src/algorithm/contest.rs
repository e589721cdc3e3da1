//! Territory contest between color tokens over resolved pipe connections
//!
//! Tokens live in a [`TokenStore`] and cells refer to them by [`TokenId`]. Winning
//! a battle hands the winner's id to the losing cell, so a single token can own
//! many cells at once and every owner sees its weight and value change together.

use crate::algorithm::selection::RandomSelector;
use crate::spatial::GridState;

/// Display values new tokens draw from
pub const PASTEL_PALETTE: [[u8; 4]; 7] = [
    [0xff, 0xad, 0xad, 0xff],
    [0xff, 0xd6, 0xa5, 0xff],
    [0xfd, 0xff, 0xb6, 0xff],
    [0xca, 0xff, 0xbf, 0xff],
    [0x9b, 0xf6, 0xff, 0xff],
    [0xa0, 0xc4, 0xff, 0xff],
    [0xbd, 0xb2, 0xff, 0xff],
];

/// Exclusive upper bound of a new token's weight
pub const MAX_INITIAL_WEIGHT: f64 = 100.0;

/// Captures a token must exceed before it is promoted
pub const PROMOTION_THRESHOLD: u32 = 20;

/// Weight of a promoted token
pub const DOMINANT_WEIGHT: f64 = 100_000.0;

/// Display value of a promoted token (`#333333`)
pub const DOMINANT_VALUE: [u8; 4] = [0x33, 0x33, 0x33, 0xff];

/// Handle to a token inside a [`TokenStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TokenId(usize);

impl TokenId {
    /// Position of the token in its store
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Contested territory owner
#[derive(Debug, Clone, PartialEq)]
pub struct ColorToken {
    value: [u8; 4],
    weight: f64,
    captures: u32,
}

impl ColorToken {
    /// Create a token that so far owns a single cell
    pub const fn new(value: [u8; 4], weight: f64) -> Self {
        Self {
            value,
            weight,
            captures: 1,
        }
    }

    /// Random palette value with weight uniform in `[0, MAX_INITIAL_WEIGHT)`
    pub fn random(random_selector: &mut RandomSelector) -> Self {
        let value = PASTEL_PALETTE
            .get(random_selector.choose_index(PASTEL_PALETTE.len()))
            .copied()
            .unwrap_or(DOMINANT_VALUE);
        Self::new(value, random_selector.unit() * MAX_INITIAL_WEIGHT)
    }

    /// RGBA display value
    pub const fn value(&self) -> [u8; 4] {
        self.value
    }

    /// Contest strength
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Cells won so far, starting from 1
    pub const fn captures(&self) -> u32 {
        self.captures
    }

    /// Whether the token has been promoted
    pub fn is_dominant(&self) -> bool {
        self.captures > PROMOTION_THRESHOLD
    }

    /// Whether this token wins a battle against `opponent`
    ///
    /// Higher weight wins. A tie costs one coin flip; no randomness is drawn
    /// otherwise.
    pub fn beats(&self, opponent: &Self, random_selector: &mut RandomSelector) -> bool {
        #[allow(clippy::float_cmp)]
        let tied = self.weight == opponent.weight;
        self.weight > opponent.weight || (tied && random_selector.coin_flip())
    }

    /// Count a captured cell, promoting the token once past the threshold
    pub fn record_capture(&mut self) {
        self.captures = self.captures.saturating_add(1);
        if self.is_dominant() {
            self.weight = DOMINANT_WEIGHT;
            self.value = DOMINANT_VALUE;
        }
    }
}

/// Owned storage for every token created on a grid
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Vec<ColorToken>,
}

impl TokenStore {
    /// Create an empty store
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Add a token and return its handle
    pub fn insert(&mut self, token: ColorToken) -> TokenId {
        self.tokens.push(token);
        TokenId(self.tokens.len() - 1)
    }

    /// Look up a token
    pub fn get(&self, id: TokenId) -> Option<&ColorToken> {
        self.tokens.get(id.0)
    }

    /// Look up a token mutably
    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut ColorToken> {
        self.tokens.get_mut(id.0)
    }

    /// Number of tokens ever created
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no token has been created
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// All tokens with their handles
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &ColorToken)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| (TokenId(index), token))
    }

    fn battle(
        &mut self,
        attacker: TokenId,
        defender: TokenId,
        random_selector: &mut RandomSelector,
    ) -> TokenId {
        let attacker_wins = match (self.get(attacker), self.get(defender)) {
            (Some(a), Some(d)) => a.beats(d, random_selector),
            (Some(_), None) => true,
            _ => false,
        };
        let winner = if attacker_wins { attacker } else { defender };
        if let Some(token) = self.get_mut(winner) {
            token.record_capture();
        }
        winner
    }
}

/// Result of one contest pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContestOutcome {
    /// Battles fought this pass
    pub battles: usize,
    /// Battles that ended with a promotion of the winner
    pub promotions: usize,
}

impl ContestOutcome {
    /// Whether any cell changed owner
    pub const fn changed(&self) -> bool {
        self.battles > 0
    }
}

/// Run one pass of battles across every collapsed cell's connections
///
/// Cells are visited x outer, y inner. Each cell fights with the token it held
/// when its turn began, along both of its connected edges, against collapsed
/// neighbors whose token shows a different display value. The loser's cell is
/// handed to the winner.
pub fn simulate_color_step(
    grid_state: &mut GridState,
    tokens: &mut TokenStore,
    random_selector: &mut RandomSelector,
) -> ContestOutcome {
    let mut outcome = ContestOutcome::default();

    for (x, y) in grid_state.cells() {
        let Some(tile) = grid_state.collapsed_tile(x, y) else {
            continue;
        };
        let attacker = grid_state.token_id(x, y);

        for direction in tile.connections() {
            let Some((nx, ny)) = grid_state.neighbor(x, y, direction) else {
                continue;
            };
            if grid_state.collapsed_tile(nx, ny).is_none() {
                continue;
            }
            let defender = grid_state.token_id(nx, ny);
            let same_value = match (tokens.get(attacker), tokens.get(defender)) {
                (Some(a), Some(d)) => a.value() == d.value(),
                _ => true,
            };
            if same_value {
                continue;
            }

            let was_dominant = [attacker, defender]
                .map(|id| tokens.get(id).is_some_and(ColorToken::is_dominant));
            let winner = tokens.battle(attacker, defender, random_selector);
            outcome.battles += 1;

            if winner == attacker {
                grid_state.set_token_id(nx, ny, attacker);
            } else {
                grid_state.set_token_id(x, y, defender);
            }

            let winner_was_dominant = if winner == attacker {
                was_dominant[0]
            } else {
                was_dominant[1]
            };
            if !winner_was_dominant && tokens.get(winner).is_some_and(ColorToken::is_dominant) {
                outcome.promotions += 1;
                tracing::debug!(token = winner.index(), "token promoted to dominant");
            }
        }
    }

    outcome
}
