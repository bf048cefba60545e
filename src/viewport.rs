// Device tiering and surface dimensions.
// The tier is picked once from the width at startup; later resizes only touch `Viewport`.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tier {
    Compact,
    Full,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TierParams {
    pub particle_count: usize,
    pub connection_threshold: f64,
}

/// Parameter sets per tier and the width that separates them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TierTable {
    pub compact: TierParams,
    pub full: TierParams,
    pub breakpoint: f64,
}

impl Default for TierTable {
    fn default() -> Self {
        TierTable {
            compact: TierParams {
                particle_count: 35,
                connection_threshold: 140.0,
            },
            full: TierParams {
                particle_count: 85,
                connection_threshold: 190.0,
            },
            breakpoint: 768.0,
        }
    }
}

impl TierTable {
    pub fn classify(&self, width: f64) -> Tier {
        if width < self.breakpoint {
            Tier::Compact
        } else {
            Tier::Full
        }
    }

    pub fn params(&self, tier: Tier) -> TierParams {
        match tier {
            Tier::Compact => self.compact,
            Tier::Full => self.full,
        }
    }

    pub fn tier_for(&self, width: f64) -> TierParams {
        self.params(self.classify(width))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    pub tier: Tier,
    pub particle_count: usize,
    pub connection_threshold: f64,
}

/// Pure: derives the parameters for a surface of the given size.
/// Only the width takes part in the classification.
pub fn initialize(width: u32, _height: u32, table: &TierTable) -> SimulationParameters {
    let tier = table.classify(width as f64);
    let TierParams {
        particle_count,
        connection_threshold,
    } = table.params(tier);
    SimulationParameters {
        tier,
        particle_count,
        connection_threshold,
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Viewport {
        Viewport { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
