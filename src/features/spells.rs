use crate::features::whiteboard::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellKind {
    Fire,
    Ice,
    Lightning,
}

impl SpellKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Ice => "Ice",
            Self::Lightning => "Lightning",
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Self::Fire => Rgb::new(0xff, 0x45, 0x00),
            Self::Ice => Rgb::new(0x00, 0xbf, 0xff),
            Self::Lightning => Rgb::new(0xff, 0xff, 0x00),
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Fire => "🔥",
            Self::Ice => "❄",
            Self::Lightning => "⚡",
        }
    }
}

/// A short-lived effect at a fractional position inside the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellEffect {
    pub id: u64,
    pub kind: SpellKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Spells {
    pub cast_count: u32,
    pub last_cast: Option<SpellKind>,
    effects: Vec<SpellEffect>,
    next_effect: u64,
}

impl Spells {
    pub fn reset(&mut self) {
        self.cast_count = 0;
        self.last_cast = None;
        self.effects.clear();
    }

    pub fn effects(&self) -> &[SpellEffect] {
        &self.effects
    }

    /// Cast `kind` with its effect at `(x, y)`; positions are kept inside
    /// the arena's 10%..90% band. Returns the effect id for fading.
    pub fn cast(&mut self, kind: SpellKind, x: f64, y: f64) -> u64 {
        self.next_effect += 1;
        let id = self.next_effect;
        self.effects.push(SpellEffect {
            id,
            kind,
            x: x.clamp(0.1, 0.9),
            y: y.clamp(0.1, 0.9),
        });
        self.cast_count += 1;
        self.last_cast = Some(kind);
        id
    }

    pub fn fade(&mut self, id: u64) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.id != id);
        self.effects.len() != before
    }
}
