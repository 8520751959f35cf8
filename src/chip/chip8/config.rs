/// Selects the bit that 8xyE (SHL) shifts into VF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShlCarry {
    /// The bit shifted out, i.e., bit 7. This is the documented CHIP-8 behavior.
    MostSignificantBit,
    /// Bit 0 of Vx, as some interpreters do.
    LeastSignificantBit,
}

/// Selects what happens to sprite pixels that cross the edge of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEdge {
    /// Pixels reappear on the opposite edge.
    Wrap,
    /// Pixels beyond the edge are not drawn.
    Clip,
}

/// Tunable behavior of the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed of the PCG32 generator used by CXKK. `None` seeds from system entropy.
    ///
    /// With seed 1 the first CXKK draws 0xE6 before masking.
    pub rng_seed: Option<u64>,

    pub shl_carry: ShlCarry,

    pub sprite_edge: SpriteEdge,

    /// The timers are decremented every `cycles_per_timer_tick` steps. A value of 0 is treated
    /// as 1.
    pub cycles_per_timer_tick: u8,
}

impl Config {
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_shl_carry(mut self, shl_carry: ShlCarry) -> Self {
        self.shl_carry = shl_carry;
        self
    }

    pub fn with_sprite_edge(mut self, sprite_edge: SpriteEdge) -> Self {
        self.sprite_edge = sprite_edge;
        self
    }

    pub fn with_cycles_per_timer_tick(mut self, cycles: u8) -> Self {
        self.cycles_per_timer_tick = cycles;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rng_seed: None,
            shl_carry: ShlCarry::MostSignificantBit,
            sprite_edge: SpriteEdge::Wrap,
            cycles_per_timer_tick: 1,
        }
    }
}
