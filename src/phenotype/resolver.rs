//! PhenotypeResolver — one resolution pass per offspring genotype
//!
//! The pass walks the stages in fixed order and records a `Resolution`. The
//! visual record and both description strings are projections of that single
//! record, so text and visuals cannot disagree. No randomness is involved.

use super::palette::{Rgb, Shade, WHITE, WHEAT};
use super::stages::{
    self, CoatLength, ColorState, Expression, Flow, MerleTier, SpotPattern, Stage,
};
use crate::cross::engine::OFFSPRING;
use crate::error::Result;
use crate::locus::{Genotype, LocusTable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything a renderer needs for one offspring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualParams {
    pub body_color: Rgb,
    pub head_color: Rgb,
    /// Colour of legs and ears
    pub leg_color: Rgb,
    pub leg_scale: f64,
    pub ear_scale: f64,
    pub snout_length: f64,
    pub spotted: bool,
    pub spot_pattern: Option<SpotPattern>,
    pub merle: bool,
    pub masked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhenotypeDescription {
    /// "This dog will have a ..." sentence
    pub full: String,
    /// "Solid black, short coat"
    pub short: String,
}

/// Visual record and text for one genotype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phenotype {
    pub visual: VisualParams,
    pub description: PhenotypeDescription,
}

/// Trace of one resolution pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Body and head entry after stages 1-5
    pub coat: Shade,
    /// Leg and ear entry after stages 1-5
    pub legs: Shade,
    pub snout_length: f64,
    pub masked: bool,
    pub merle: MerleTier,
    pub spotting: Option<SpotPattern>,
    pub length: CoatLength,
    /// Stages that actually ran, in order
    pub stages: Vec<Stage>,
}

impl Resolution {
    pub fn visual(&self) -> VisualParams {
        let mut body = self.coat.rgb();
        let mut head = self.coat.rgb();

        let (body_merle, head_merle) = self.merle.lightening();
        body = body.blend(WHITE, body_merle);
        head = head.blend(WHITE, head_merle);

        if let Some(pattern) = self.spotting {
            body = body.blend(WHITE, pattern.lightening());
        }

        VisualParams {
            body_color: body,
            head_color: head,
            leg_color: self.legs.rgb().blend(WHEAT, self.length.leg_blend()),
            leg_scale: self.length.scale(),
            ear_scale: self.length.scale(),
            snout_length: self.snout_length,
            spotted: self.spotting.is_some(),
            spot_pattern: self.spotting,
            merle: self.merle != MerleTier::None,
            masked: self.masked,
        }
    }

    pub fn description(&self) -> PhenotypeDescription {
        let color = self.coat.describe();

        let patterns: Vec<&str> = self
            .merle
            .describe()
            .into_iter()
            .chain(self.spotting.map(SpotPattern::describe))
            .collect();

        let mut parts = vec![format!("{} coat", color)];
        if !patterns.is_empty() {
            parts.push(format!("with {}", patterns.join(", ")));
        }
        parts.push(self.length.describe().to_string());
        if self.masked {
            parts.push("and dark facial mask".to_string());
        }

        PhenotypeDescription {
            full: format!("This dog will have a {}.", parts.join(", ")),
            short: format!("{}, {}", capitalize(&color), self.length.summary()),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves offspring genotypes against an injected locus table
#[derive(Debug, Clone)]
pub struct PhenotypeResolver {
    loci: Arc<LocusTable>,
}

impl PhenotypeResolver {
    pub fn new(loci: Arc<LocusTable>) -> Self {
        Self { loci }
    }

    /// Ranks of the pair at a stage's locus. A locus is only required when
    /// its stage runs.
    fn expression(&self, genotype: &Genotype, stage: Stage) -> Result<Expression> {
        let locus = self.loci.locus(stage.locus())?;
        let pair = genotype.require(&locus.id, OFFSPRING)?;
        let ranks = self.loci.pair_ranks(&locus.id, pair)?;
        Ok(Expression::new(ranks, locus.recessive_rank()))
    }

    /// Walk the stages once and record what each contributed
    pub fn resolve(&self, genotype: &Genotype) -> Result<Resolution> {
        for (locus, pair) in genotype.iter() {
            self.loci.pair_ranks(locus, pair)?;
        }

        let mut ran = Vec::with_capacity(Stage::ORDER.len());
        let mut state = ColorState::default();

        let e = self.expression(genotype, Stage::Extension)?;
        ran.push(Stage::Extension);
        let (next, flow) = stages::extension(state, e);
        state = next;
        let masked = !e.fully_recessive() && e.top_copies() > 0;

        if flow != Flow::SkipColorLoci {
            let (next, flow) =
                stages::dominant_black(state, self.expression(genotype, Stage::DominantBlack)?);
            ran.push(Stage::DominantBlack);
            state = next;

            if flow != Flow::SkipAgouti {
                state = stages::agouti(state, self.expression(genotype, Stage::Agouti)?);
                ran.push(Stage::Agouti);
            }

            state = stages::brown(state, self.expression(genotype, Stage::Brown)?);
            ran.push(Stage::Brown);
            state = stages::dilution(state, self.expression(genotype, Stage::Dilution)?);
            ran.push(Stage::Dilution);
        }

        let merle = MerleTier::from_expression(self.expression(genotype, Stage::Merle)?);
        ran.push(Stage::Merle);
        let spotting = SpotPattern::from_expression(self.expression(genotype, Stage::Spotting)?);
        ran.push(Stage::Spotting);
        let length = CoatLength::from_expression(self.expression(genotype, Stage::CoatLength)?);
        ran.push(Stage::CoatLength);

        Ok(Resolution {
            coat: state.body,
            legs: state.legs,
            snout_length: state.snout_length,
            masked,
            merle,
            spotting,
            length,
            stages: ran,
        })
    }

    /// Visual record plus full and short descriptions
    pub fn resolve_phenotype(&self, genotype: &Genotype) -> Result<Phenotype> {
        let resolution = self.resolve(genotype)?;
        Ok(Phenotype {
            visual: resolution.visual(),
            description: resolution.description(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticsError;
    use crate::phenotype::palette::{Eumelanin, GOLDEN};

    fn resolver() -> PhenotypeResolver {
        PhenotypeResolver::new(Arc::new(LocusTable::canine()))
    }

    fn genotype(text: &str) -> Genotype {
        Genotype::parse(text).unwrap()
    }

    const SOLID_BLACK: &str = "E:E/E K:Kb/Kb A:Ay/Ay B:B/B D:D/D M:m/m S:S/S L:L/L";

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver();
        let g = genotype("E:Em/e K:kbr/ky A:aw/at B:B/b D:D/d M:M/m S:si/sw L:L/l");
        let first = resolver.resolve_phenotype(&g).unwrap();
        let second = resolver.resolve_phenotype(&g).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_recessive_red_masks_color_loci() {
        let resolver = resolver();
        let combos = [
            "E:e/e K:Kb/Kb A:Ay/Ay B:B/B D:D/D M:m/m S:S/S L:L/L",
            "E:e/e K:ky/ky A:a/a B:b/b D:d/d M:m/m S:S/S L:L/L",
            "E:e/e K:kbr/ky A:at/aw B:B/b D:d/d M:m/m S:S/S L:L/L",
        ];
        let colors: Vec<Rgb> = combos
            .iter()
            .map(|c| resolver.resolve_phenotype(&genotype(c)).unwrap().visual.body_color)
            .collect();
        assert!(colors.iter().all(|c| *c == GOLDEN));

        let resolution = resolver.resolve(&genotype(combos[1])).unwrap();
        assert_eq!(
            resolution.stages,
            vec![Stage::Extension, Stage::Merle, Stage::Spotting, Stage::CoatLength]
        );
    }

    #[test]
    fn test_dominant_black_masks_agouti() {
        let resolver = resolver();
        let bodies: Vec<Rgb> = ["Ay/Ay", "aw/aw", "at/at", "a/a"]
            .iter()
            .map(|a| {
                let g = genotype(&SOLID_BLACK.replace("A:Ay/Ay", &format!("A:{}", a)));
                resolver.resolve_phenotype(&g).unwrap().visual.body_color
            })
            .collect();
        assert!(bodies.iter().all(|b| *b == bodies[0]));
        let resolution = resolver.resolve(&genotype(SOLID_BLACK)).unwrap();
        assert!(!resolution.stages.contains(&Stage::Agouti));
        assert!(resolution.stages.contains(&Stage::Brown));
    }

    #[test]
    fn test_agouti_tiers_under_ky() {
        let resolver = resolver();
        let visuals: Vec<VisualParams> = ["Ay/a", "aw/at", "at/a", "a/a"]
            .iter()
            .map(|a| {
                let g = genotype(&format!("E:E/E K:ky/ky A:{} B:B/B D:D/D M:m/m S:S/S L:L/L", a));
                resolver.resolve_phenotype(&g).unwrap().visual
            })
            .collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(visuals[i].body_color, visuals[j].body_color);
                assert_ne!(visuals[i].leg_color, visuals[j].leg_color);
                assert_ne!(visuals[i].snout_length, visuals[j].snout_length);
            }
        }
    }

    #[test]
    fn test_length_channel_independent_of_color() {
        let resolver = resolver();
        let scales: Vec<(f64, Rgb)> = ["L/L", "L/l", "l/l"]
            .iter()
            .map(|l| {
                let g = genotype(&SOLID_BLACK.replace("L:L/L", &format!("L:{}", l)));
                let v = resolver.resolve_phenotype(&g).unwrap().visual;
                (v.leg_scale, v.body_color)
            })
            .collect();
        assert_eq!(scales[0].0, 1.0);
        assert_eq!(scales[1].0, 1.08);
        assert_eq!(scales[2].0, 1.15);
        assert!(scales.iter().all(|(_, body)| *body == scales[0].1));
    }

    #[test]
    fn test_recessive_red_long_coat_scenario() {
        let resolver = resolver();
        let g = genotype("E:e/e K:Kb/Kb B:b/b D:d/d M:m/m S:S/S L:l/l");
        let phenotype = resolver.resolve_phenotype(&g).unwrap();
        assert_eq!(phenotype.visual.body_color, GOLDEN);
        assert_eq!(phenotype.visual.leg_scale, 1.15);
        assert_eq!(phenotype.visual.ear_scale, 1.15);
        assert_eq!(phenotype.description.short, "Golden/red, long coat");
    }

    #[test]
    fn test_missing_locus_required_by_running_stage() {
        let g = genotype("E:E/E K:ky/ky B:B/B D:D/D M:m/m S:S/S L:L/L");
        match resolver().resolve(&g) {
            Err(GeneticsError::IncompleteGenotype { locus, .. }) => assert_eq!(locus, "A"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_malformed_genotype_is_rejected() {
        let resolver = resolver();
        let foreign = genotype(&SOLID_BLACK.replace("B:B/B", "B:B/x"));
        assert!(matches!(
            resolver.resolve(&foreign),
            Err(GeneticsError::UnknownAllele { .. })
        ));
        let unknown = genotype(&format!("{} Z:z/z", SOLID_BLACK));
        assert!(matches!(resolver.resolve(&unknown), Err(GeneticsError::UnknownLocus(_))));
    }

    #[test]
    fn test_brown_then_dilution_on_tan_point() {
        let g = genotype("E:E/E K:Kb/ky A:at/at B:b/b D:d/d M:m/m S:S/S L:L/L");
        let resolution = resolver().resolve(&g).unwrap();
        assert_eq!(resolution.coat, Shade::Solid(Eumelanin::Isabella));
        let g = genotype("E:E/E K:ky/ky A:at/at B:b/b D:d/d M:m/m S:S/S L:L/L");
        let resolution = resolver().resolve(&g).unwrap();
        assert_eq!(resolution.coat, Shade::TanPoint(Eumelanin::Isabella));
        assert_eq!(resolution.legs, Shade::Tan);
    }

    #[test]
    fn test_merle_and_spotting_lighten_body() {
        let resolver = resolver();
        let base = resolver.resolve_phenotype(&genotype(SOLID_BLACK)).unwrap().visual;

        let merle = resolver
            .resolve_phenotype(&genotype(&SOLID_BLACK.replace("M:m/m", "M:M/m")))
            .unwrap()
            .visual;
        assert!(merle.merle);
        assert_eq!(merle.body_color, base.body_color.blend(WHITE, 0.25));
        assert_eq!(merle.head_color, base.head_color);

        let double = resolver
            .resolve_phenotype(&genotype(&SOLID_BLACK.replace("M:m/m", "M:M/M")))
            .unwrap()
            .visual;
        assert_eq!(double.body_color, base.body_color.blend(WHITE, 0.40));
        assert_eq!(double.head_color, base.head_color.blend(WHITE, 0.40));

        let white = resolver
            .resolve_phenotype(&genotype(&SOLID_BLACK.replace("S:S/S", "S:sw/sw")))
            .unwrap()
            .visual;
        assert!(white.spotted);
        assert_eq!(white.spot_pattern, Some(SpotPattern::ExtremeWhite));
        assert_eq!(white.body_color, WHITE);
    }

    #[test]
    fn test_descriptions() {
        let resolver = resolver();
        let lab = resolver.resolve_phenotype(&genotype(SOLID_BLACK)).unwrap();
        assert_eq!(lab.description.full, "This dog will have a solid black coat, short coat.");
        assert_eq!(lab.description.short, "Solid black, short coat");

        let collie = resolver
            .resolve_phenotype(&genotype(
                "E:Em/E K:ky/ky A:at/at B:B/B D:D/D M:M/m S:si/si L:L/l",
            ))
            .unwrap();
        assert_eq!(
            collie.description.full,
            "This dog will have a black with tan points coat, with merle patches, \
             Irish spotting (white chest/feet), short coat (carries long), and dark facial mask."
        );
        assert_eq!(collie.description.short, "Black with tan points, short coat");
        assert!(collie.visual.masked);
    }
}
