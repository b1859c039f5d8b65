//! Epistasis stages — one pure function per locus
//!
//! Colour stages take the partial colour state and return the next state plus
//! a flow flag. Only the colour channel can be short-circuited; merle,
//! spotting and coat length are separate channels that always run.

use super::palette::{Eumelanin, Phaeomelanin, Shade};
use serde::{Deserialize, Serialize};

/// Snout length used when the A locus is masked
pub const DEFAULT_SNOUT: f64 = 0.12;

/// Evaluation order of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Extension,
    DominantBlack,
    Agouti,
    Brown,
    Dilution,
    Merle,
    Spotting,
    CoatLength,
}

impl Stage {
    pub const ORDER: [Stage; 8] = [
        Stage::Extension,
        Stage::DominantBlack,
        Stage::Agouti,
        Stage::Brown,
        Stage::Dilution,
        Stage::Merle,
        Stage::Spotting,
        Stage::CoatLength,
    ];

    pub fn locus(self) -> &'static str {
        match self {
            Stage::Extension => "E",
            Stage::DominantBlack => "K",
            Stage::Agouti => "A",
            Stage::Brown => "B",
            Stage::Dilution => "D",
            Stage::Merle => "M",
            Stage::Spotting => "S",
            Stage::CoatLength => "L",
        }
    }
}

/// Dominance ranks of one pair, relative to its locus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    /// Rank of the more dominant allele
    pub dominant: usize,
    /// Rank of the less dominant allele
    pub recessive: usize,
    /// Rank of the locus' least dominant allele
    pub last: usize,
}

impl Expression {
    pub fn new(ranks: (usize, usize), last: usize) -> Self {
        Self {
            dominant: ranks.0,
            recessive: ranks.1,
            last,
        }
    }

    pub fn fully_recessive(&self) -> bool {
        self.dominant == self.last
    }

    /// Copies of the top-ranked allele (0, 1 or 2)
    pub fn top_copies(&self) -> usize {
        usize::from(self.dominant == 0) + usize::from(self.recessive == 0)
    }

    /// Copies of the bottom-ranked allele (0, 1 or 2)
    pub fn bottom_copies(&self) -> usize {
        usize::from(self.dominant == self.last) + usize::from(self.recessive == self.last)
    }
}

/// Partial colour state threaded through stages 1-5
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorState {
    pub body: Shade,
    pub legs: Shade,
    pub snout_length: f64,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            body: Shade::Solid(Eumelanin::Black),
            legs: Shade::Solid(Eumelanin::Black),
            snout_length: DEFAULT_SNOUT,
        }
    }
}

/// What the next colour stages may do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// K expressed a pattern of its own; A is masked
    SkipAgouti,
    /// E is fully recessive; K, A, B and D are masked
    SkipColorLoci,
}

/// Stage 1. e/e paints recessive red and ends colour evaluation.
pub fn extension(state: ColorState, e: Expression) -> (ColorState, Flow) {
    if e.fully_recessive() {
        let red = Shade::RecessiveRed(Phaeomelanin::Red);
        return (
            ColorState {
                body: red,
                legs: red,
                ..state
            },
            Flow::SkipColorLoci,
        );
    }
    (state, Flow::Continue)
}

/// Stage 2. Dominant black and brindle both mask A.
pub fn dominant_black(state: ColorState, k: Expression) -> (ColorState, Flow) {
    if k.fully_recessive() {
        return (state, Flow::Continue);
    }
    let shade = if k.dominant == 0 {
        Shade::Solid(Eumelanin::Black)
    } else {
        Shade::Brindle(Eumelanin::Black)
    };
    (
        ColorState {
            body: shade,
            legs: shade,
            ..state
        },
        Flow::SkipAgouti,
    )
}

/// Stage 3. The only stage that sets leg colour and snout length from colour
/// genetics. Ranks past the fourth tier fall into the recessive tier.
pub fn agouti(_state: ColorState, a: Expression) -> ColorState {
    let (body, legs, snout_length) = match a.dominant {
        0 => (Shade::Sable(Eumelanin::Black), Shade::Fawn, 0.12),
        1 => (Shade::WolfSable(Eumelanin::Black), Shade::Grizzle, 0.10),
        2 => (Shade::TanPoint(Eumelanin::Black), Shade::Tan, 0.06),
        _ => {
            let black = Shade::RecessiveBlack(Eumelanin::Black);
            (black, black, 0.08)
        }
    };
    ColorState {
        body,
        legs,
        snout_length,
    }
}

/// Stage 4. b/b turns black pigment brown in whatever entry was chosen.
pub fn brown(state: ColorState, b: Expression) -> ColorState {
    if !b.fully_recessive() {
        return state;
    }
    ColorState {
        body: state.body.browned(),
        legs: state.legs.browned(),
        ..state
    }
}

/// Stage 5. d/d swaps the entry for its diluted counterpart.
pub fn dilution(state: ColorState, d: Expression) -> ColorState {
    if !d.fully_recessive() {
        return state;
    }
    ColorState {
        body: state.body.diluted(),
        legs: state.legs.diluted(),
        ..state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MerleTier {
    None,
    Merle,
    DoubleMerle,
}

impl MerleTier {
    /// Stage 6
    pub fn from_expression(m: Expression) -> Self {
        match m.top_copies() {
            0 => MerleTier::None,
            1 => MerleTier::Merle,
            _ => MerleTier::DoubleMerle,
        }
    }

    /// (body, head) blend toward white
    pub fn lightening(self) -> (f64, f64) {
        match self {
            MerleTier::None => (0.0, 0.0),
            MerleTier::Merle => (0.25, 0.0),
            MerleTier::DoubleMerle => (0.40, 0.40),
        }
    }

    pub fn describe(self) -> Option<&'static str> {
        match self {
            MerleTier::None => None,
            MerleTier::Merle => Some("merle patches"),
            MerleTier::DoubleMerle => Some("double merle (extensive white, health risks)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotPattern {
    Irish,
    Piebald,
    ExtremeWhite,
}

impl SpotPattern {
    /// Stage 7; the solid tier yields None
    pub fn from_expression(s: Expression) -> Option<Self> {
        match s.dominant {
            0 => None,
            1 => Some(SpotPattern::Irish),
            2 => Some(SpotPattern::Piebald),
            _ => Some(SpotPattern::ExtremeWhite),
        }
    }

    /// Body blend toward white
    pub fn lightening(self) -> f64 {
        match self {
            SpotPattern::Irish => 0.15,
            SpotPattern::Piebald => 0.40,
            SpotPattern::ExtremeWhite => 1.0,
        }
    }

    /// Allele-style tag
    pub fn tag(self) -> &'static str {
        match self {
            SpotPattern::Irish => "si",
            SpotPattern::Piebald => "sp",
            SpotPattern::ExtremeWhite => "sw",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            SpotPattern::Irish => "Irish spotting (white chest/feet)",
            SpotPattern::Piebald => "piebald (significant white patches)",
            SpotPattern::ExtremeWhite => "extreme white (mostly white)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoatLength {
    Short,
    ShortCarrier,
    Long,
}

impl CoatLength {
    /// Stage 8, tiered by copies of the long allele
    pub fn from_expression(l: Expression) -> Self {
        match l.bottom_copies() {
            0 => CoatLength::Short,
            1 => CoatLength::ShortCarrier,
            _ => CoatLength::Long,
        }
    }

    /// Leg/ear blend toward the light reference colour
    pub fn leg_blend(self) -> f64 {
        match self {
            CoatLength::Short => 0.0,
            CoatLength::ShortCarrier => 0.15,
            CoatLength::Long => 0.30,
        }
    }

    /// Leg and ear scale multiplier
    pub fn scale(self) -> f64 {
        match self {
            CoatLength::Short => 1.0,
            CoatLength::ShortCarrier => 1.08,
            CoatLength::Long => 1.15,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            CoatLength::Short => "short coat",
            CoatLength::ShortCarrier => "short coat (carries long)",
            CoatLength::Long => "long/fluffy coat",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            CoatLength::Long => "long coat",
            _ => "short coat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(dominant: usize, recessive: usize, last: usize) -> Expression {
        Expression::new((dominant, recessive), last)
    }

    #[test]
    fn test_extension_short_circuits_only_when_recessive() {
        let (state, flow) = extension(ColorState::default(), expr(2, 2, 2));
        assert_eq!(flow, Flow::SkipColorLoci);
        assert_eq!(state.body, Shade::RecessiveRed(Phaeomelanin::Red));

        let (state, flow) = extension(ColorState::default(), expr(1, 2, 2));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(state, ColorState::default());
    }

    #[test]
    fn test_dominant_black_tiers() {
        let (state, flow) = dominant_black(ColorState::default(), expr(0, 2, 2));
        assert_eq!((state.body, flow), (Shade::Solid(Eumelanin::Black), Flow::SkipAgouti));
        let (state, flow) = dominant_black(ColorState::default(), expr(1, 1, 2));
        assert_eq!((state.body, flow), (Shade::Brindle(Eumelanin::Black), Flow::SkipAgouti));
        let (_, flow) = dominant_black(ColorState::default(), expr(2, 2, 2));
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_agouti_tiers_are_distinct() {
        let states: Vec<ColorState> = (0..4)
            .map(|rank| agouti(ColorState::default(), expr(rank, 3, 3)))
            .collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(states[i].body, states[j].body);
                assert_ne!(states[i].legs, states[j].legs);
                assert_ne!(states[i].snout_length, states[j].snout_length);
            }
        }
    }

    #[test]
    fn test_brown_and_dilution_need_both_recessive() {
        let black = ColorState::default();
        assert_eq!(brown(black, expr(0, 1, 1)), black);
        assert_eq!(brown(black, expr(1, 1, 1)).body, Shade::Solid(Eumelanin::Brown));
        assert_eq!(dilution(black, expr(0, 1, 1)), black);
        assert_eq!(dilution(black, expr(1, 1, 1)).body, Shade::Solid(Eumelanin::Blue));
    }

    #[test]
    fn test_channel_tiers() {
        assert_eq!(MerleTier::from_expression(expr(0, 0, 1)), MerleTier::DoubleMerle);
        assert_eq!(MerleTier::from_expression(expr(0, 1, 1)), MerleTier::Merle);
        assert_eq!(MerleTier::from_expression(expr(1, 1, 1)), MerleTier::None);
        assert_eq!(SpotPattern::from_expression(expr(0, 2, 3)), None);
        assert_eq!(SpotPattern::from_expression(expr(2, 3, 3)), Some(SpotPattern::Piebald));
        assert_eq!(CoatLength::from_expression(expr(0, 1, 1)), CoatLength::ShortCarrier);
        assert_eq!(CoatLength::from_expression(expr(1, 1, 1)).scale(), 1.15);
    }

    #[test]
    fn test_stage_order_matches_loci() {
        let loci: String = Stage::ORDER.iter().map(|s| s.locus()).collect();
        assert_eq!(loci, "EKABDMSL");
    }
}
