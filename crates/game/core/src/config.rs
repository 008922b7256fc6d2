/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of spheres kept on the energy field between harvests.
    pub field_capacity: usize,
    /// Longest path a single harvest may take.
    pub max_path_len: usize,
    /// Path length used when the requested path cannot be honoured.
    pub fallback_path_len: usize,
    /// Chance (percent) that a regenerated sphere is a rainbow sphere.
    pub rainbow_chance_pct: u32,
    /// Super-attack chance of the first enemy attack slot.
    pub enemy_opening_super_pct: u32,
    /// Super-attack chance of every later enemy attack slot.
    pub enemy_follow_up_super_pct: u32,
    /// Damage multiplier (percent) of a critical hit.
    pub critical_pct: u32,
    /// Minimum mini-game quality for bonus mode to count as passed.
    pub dokkan_pass_quality: f64,
    /// Extra damage (percent) granted at quality 1.0 on a passed bonus mode.
    pub dokkan_quality_bonus_pct: u32,
    /// Move requests a single member turn may consume before the engine
    /// falls back to a plain attack.
    pub request_budget: u32,
    /// Hard ceiling on rounds; exceeding it is an engine contract violation.
    pub max_rounds: u32,
    /// Number of events carried in each snapshot.
    pub event_window: usize,
    /// Uses of every support item at battle start.
    pub starting_items: u8,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_MEMBERS: usize = 6;
    pub const ROTATION_SIZE: usize = 3;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const MAX_ENEMY_SLOTS: usize = 3;
    /// Strikes a player member may make in its own turn: the terminal
    /// attack plus one additional attack.
    pub const MAX_STRIKES_PER_TURN: u8 = 2;

    // ===== resource thresholds =====
    pub const MAX_ENERGY: u8 = 24;
    pub const SUPER_THRESHOLD: u8 = 12;
    pub const ULTRA_THRESHOLD: u8 = 18;
    /// Damage multiplier (percent) applied to a pooled side under a domain.
    pub const DOMAIN_DAMAGE_PCT: u64 = 130;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FIELD_CAPACITY: usize = 24;
    pub const DEFAULT_MAX_PATH_LEN: usize = 7;
    pub const DEFAULT_FALLBACK_PATH_LEN: usize = 4;
    pub const DEFAULT_RAINBOW_CHANCE_PCT: u32 = 10;
    pub const DEFAULT_ENEMY_OPENING_SUPER_PCT: u32 = 30;
    pub const DEFAULT_ENEMY_FOLLOW_UP_SUPER_PCT: u32 = 10;
    pub const DEFAULT_CRITICAL_PCT: u32 = 150;
    pub const DEFAULT_DOKKAN_PASS_QUALITY: f64 = 0.5;
    pub const DEFAULT_DOKKAN_QUALITY_BONUS_PCT: u32 = 20;
    pub const DEFAULT_REQUEST_BUDGET: u32 = 16;
    pub const DEFAULT_MAX_ROUNDS: u32 = 500;
    pub const DEFAULT_EVENT_WINDOW: usize = 16;
    pub const DEFAULT_STARTING_ITEMS: u8 = 2;

    pub fn new() -> Self {
        Self {
            field_capacity: Self::DEFAULT_FIELD_CAPACITY,
            max_path_len: Self::DEFAULT_MAX_PATH_LEN,
            fallback_path_len: Self::DEFAULT_FALLBACK_PATH_LEN,
            rainbow_chance_pct: Self::DEFAULT_RAINBOW_CHANCE_PCT,
            enemy_opening_super_pct: Self::DEFAULT_ENEMY_OPENING_SUPER_PCT,
            enemy_follow_up_super_pct: Self::DEFAULT_ENEMY_FOLLOW_UP_SUPER_PCT,
            critical_pct: Self::DEFAULT_CRITICAL_PCT,
            dokkan_pass_quality: Self::DEFAULT_DOKKAN_PASS_QUALITY,
            dokkan_quality_bonus_pct: Self::DEFAULT_DOKKAN_QUALITY_BONUS_PCT,
            request_budget: Self::DEFAULT_REQUEST_BUDGET,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            event_window: Self::DEFAULT_EVENT_WINDOW,
            starting_items: Self::DEFAULT_STARTING_ITEMS,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_starting_items(mut self, starting_items: u8) -> Self {
        self.starting_items = starting_items;
        self
    }

    /// Super-attack chance for the enemy attack slot at `slot`.
    pub fn enemy_super_pct(&self, slot: usize) -> u32 {
        if slot == 0 {
            self.enemy_opening_super_pct
        } else {
            self.enemy_follow_up_super_pct
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
