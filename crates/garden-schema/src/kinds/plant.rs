//! Plant species

use super::GardenSpec;
use crate::field::{ArrayShape, FieldSpec, KindSchema, NumberRule};
use crate::path::insert_default;
use garden_core::{ContentKind, Hsb, Span};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const OSCILLATORS: &[&str] = &["sine", "square", "triangle", "sawtooth"];
pub const GROWTH_PATTERNS: &[&str] = &["spiral", "symmetrical", "cascading", "random"];
pub const STEM_STYLES: &[&str] =
    &["straight", "curved", "segmented", "submerged", "straight_bushy"];
pub const PETAL_SHAPES: &[&str] = &["elongated", "round", "pointed", "bell_shaped", "daisy_like"];
pub const LEAF_PATTERNS: &[&str] = &["basal", "alternate", "opposite", "whorled"];
pub const FLOWER_TYPES: &[&str] = &["spike", "single_bloom", "cluster", "composite", "bell"];
pub const SEASONAL_BEHAVIORS: &[&str] = &["perennial", "annual", "biennial"];

// Rendering hints for the 3D garden
pub const PETAL_SHAPES_3D: &[&str] = &[
    "ellipsoid",
    "cone",
    "box_thin",
    "curved_plane",
    "spherical_cap",
    "thin_ray",
    "ruffled_edge",
];
pub const PETAL_ARRANGEMENTS: &[&str] =
    &["flat_disc", "spherical", "upright_cup", "drooping_bell", "random"];
pub const LEAF_SHAPES_3D: &[&str] = &[
    "ellipsoid_flat",
    "box_thin",
    "lanceolate",
    "large_round_flat",
    "jagged_basal",
    "pinnate",
];
pub const LEAF_ARRANGEMENTS: &[&str] = &["spiral_stem", "on_branches", "basal_rosette", "floating"];
pub const CENTER_DETAILS: &[&str] = &[
    "simple_sphere",
    "torus_ring",
    "spiky_cluster",
    "anthers_stamens",
    "seed_pod",
    "fluffy_sphere",
    "dense_cluster",
    "complex_lip",
];
pub const TEXTURE_HINTS: &[&str] = &["smooth", "veined", "bumpy", "velvet", "waxy", "delicate"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Oscillator {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthPattern {
    Spiral,
    Symmetrical,
    Cascading,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StemStyle {
    Straight,
    Curved,
    Segmented,
    Submerged,
    StraightBushy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetalShape {
    Elongated,
    Round,
    Pointed,
    BellShaped,
    DaisyLike,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafPattern {
    Basal,
    Alternate,
    Opposite,
    Whorled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowerType {
    Spike,
    SingleBloom,
    Cluster,
    Composite,
    Bell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalBehavior {
    Perennial,
    Annual,
    Biennial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetalShape3d {
    Ellipsoid,
    Cone,
    BoxThin,
    CurvedPlane,
    SphericalCap,
    ThinRay,
    RuffledEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetalArrangement {
    FlatDisc,
    Spherical,
    UprightCup,
    DroopingBell,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafShape3d {
    EllipsoidFlat,
    BoxThin,
    Lanceolate,
    LargeRoundFlat,
    JaggedBasal,
    Pinnate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafArrangement {
    SpiralStem,
    OnBranches,
    BasalRosette,
    Floating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterDetail {
    SimpleSphere,
    TorusRing,
    SpikyCluster,
    AnthersStamens,
    SeedPod,
    FluffySphere,
    DenseCluster,
    ComplexLip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureHint {
    Smooth,
    Veined,
    Bumpy,
    Velvet,
    Waxy,
    Delicate,
}

/// A generated plant species. Colours are HSB triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSpec {
    pub name: String,
    pub description: String,
    pub colors: Vec<Hsb>,
    pub petals: u32,
    pub size: Span<f64>,
    pub height: Span<f64>,
    /// MIDI note numbers
    pub scale: Vec<u8>,
    pub oscillator: Oscillator,
    pub layer_count: u8,
    pub growth_pattern: GrowthPattern,
    pub depth_offset: u8,

    pub stem_style: StemStyle,
    pub stem_radius: f64,
    pub petal_shape: PetalShape,
    pub leaf_pattern: LeafPattern,
    pub flower_type: FlowerType,
    pub seasonal_behavior: SeasonalBehavior,
    pub pollinator_attractant: bool,

    // Lifecycle, in seconds of simulation time
    pub lifespan: u32,
    pub maturity_age: u32,
    pub growth_rate: f64,
    pub decay_rate: f64,
    pub resilience: u8,

    // Rendering hints; the renderer picks its own when absent
    #[serde(rename = "petalShape3D", default, skip_serializing_if = "Option::is_none")]
    pub petal_shape_3d: Option<PetalShape3d>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petal_thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petal_arrangement: Option<PetalArrangement>,
    #[serde(rename = "leafShape3D", default, skip_serializing_if = "Option::is_none")]
    pub leaf_shape_3d: Option<LeafShape3d>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_arrangement: Option<LeafArrangement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center_detail: Option<CenterDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture_hint: Option<TextureHint>,

    pub is_luminous: bool,
    pub luminosity_color: Vec<Hsb>,
    pub has_branches: bool,
    pub branch_count: u8,
    pub secondary_structures: Vec<String>,
}

fn hsb_channels() -> Vec<NumberRule> {
    vec![
        NumberRule::float(0.0, 360.0),
        NumberRule::float(0.0, 100.0),
        NumberRule::float(0.0, 100.0),
    ]
}

impl GardenSpec for PlantSpec {
    const KIND: ContentKind = ContentKind::Plant;

    fn schema() -> KindSchema {
        let mut schema = KindSchema::new(
            "plant",
            vec![
                FieldSpec::string("name"),
                FieldSpec::string("description"),
                FieldSpec::array(
                    "colors",
                    ArrayShape::Tuples {
                        min_len: 1,
                        max_len: 5,
                        channels: hsb_channels(),
                    },
                )
                .describe("HSB colours: hue 0-360, saturation and brightness 0-100"),
                FieldSpec::integer("petals", 1.0, 40.0),
                FieldSpec::array(
                    "size",
                    ArrayShape::Pair {
                        element: NumberRule::float(5.0, 150.0),
                        ordered: true,
                    },
                ),
                FieldSpec::array(
                    "height",
                    ArrayShape::Pair {
                        element: NumberRule::float(10.0, 300.0),
                        ordered: true,
                    },
                ),
                FieldSpec::array(
                    "scale",
                    ArrayShape::Numbers {
                        min_len: 2,
                        max_len: 8,
                        element: NumberRule::int(20.0, 100.0),
                    },
                )
                .describe("MIDI note numbers"),
                FieldSpec::one_of("oscillator", OSCILLATORS),
                FieldSpec::integer("layerCount", 1.0, 4.0),
                FieldSpec::one_of("growthPattern", GROWTH_PATTERNS),
                FieldSpec::integer("depthOffset", 0.0, 100.0),
                FieldSpec::one_of("stemStyle", STEM_STYLES).optional(),
                FieldSpec::float("stemRadius", 1.0, 10.0).optional(),
                FieldSpec::one_of("petalShape", PETAL_SHAPES).optional(),
                FieldSpec::one_of("leafPattern", LEAF_PATTERNS).optional(),
                FieldSpec::one_of("flowerType", FLOWER_TYPES).optional(),
                FieldSpec::one_of("seasonalBehavior", SEASONAL_BEHAVIORS).optional(),
                FieldSpec::boolean("pollinatorAttractant").optional(),
                FieldSpec::integer("lifespan", 30.0, 600.0).optional(),
                FieldSpec::integer("maturityAge", 5.0, 120.0).optional(),
                FieldSpec::float("growthRate", 0.5, 1.5).optional(),
                FieldSpec::float("decayRate", 0.1, 1.0).optional(),
                FieldSpec::integer("resilience", 1.0, 10.0).optional(),
                FieldSpec::one_of("petalShape3D", PETAL_SHAPES_3D).optional(),
                FieldSpec::float("petalThickness", 0.5, 10.0).optional(),
                FieldSpec::one_of("petalArrangement", PETAL_ARRANGEMENTS).optional(),
                FieldSpec::one_of("leafShape3D", LEAF_SHAPES_3D).optional(),
                FieldSpec::one_of("leafArrangement", LEAF_ARRANGEMENTS).optional(),
                FieldSpec::one_of("centerDetail", CENTER_DETAILS).optional(),
                FieldSpec::one_of("textureHint", TEXTURE_HINTS).optional(),
                FieldSpec::boolean("isLuminous").optional(),
                FieldSpec::array(
                    "luminosityColor",
                    ArrayShape::Tuples {
                        min_len: 0,
                        max_len: 3,
                        channels: hsb_channels(),
                    },
                )
                .optional(),
                FieldSpec::boolean("hasBranches").optional(),
                FieldSpec::integer("branchCount", 0.0, 8.0).optional(),
                FieldSpec::array(
                    "secondaryStructures",
                    ArrayShape::Strings {
                        min_len: 0,
                        max_len: 8,
                    },
                )
                .optional(),
            ],
        );
        schema.description = Some("A garden flower species with a musical voice".to_string());
        schema
    }

    fn apply_defaults(candidate: &mut Value) {
        let Some(obj) = candidate.as_object_mut() else {
            return;
        };

        // A plant that does not glow carries a black glow colour; one without
        // branches carries no branch count.
        if obj.get("isLuminous").and_then(Value::as_bool) != Some(true) {
            obj.insert("luminosityColor".to_string(), json!([[0, 0, 0]]));
        }
        if obj.get("hasBranches").and_then(Value::as_bool) != Some(true) {
            obj.insert("branchCount".to_string(), json!(0));
        }

        let defaults = [
            ("stemStyle", json!("straight")),
            ("stemRadius", json!(3)),
            ("petalShape", json!("round")),
            ("leafPattern", json!("alternate")),
            ("flowerType", json!("single_bloom")),
            ("seasonalBehavior", json!("perennial")),
            ("pollinatorAttractant", json!(false)),
            ("lifespan", json!(120)),
            ("maturityAge", json!(30)),
            ("growthRate", json!(1.0)),
            ("decayRate", json!(0.5)),
            ("resilience", json!(5)),
            ("isLuminous", json!(false)),
            ("luminosityColor", json!([])),
            ("hasBranches", json!(false)),
            ("branchCount", json!(0)),
            ("secondaryStructures", json!([])),
        ];
        for (key, value) in defaults {
            insert_default(candidate, key, value);
        }
    }

    fn dependent_errors(candidate: &Value) -> Vec<String> {
        let luminous = candidate.get("isLuminous").and_then(Value::as_bool) == Some(true);
        let glow_empty = candidate
            .get("luminosityColor")
            .and_then(Value::as_array)
            .is_some_and(|colors| colors.is_empty());
        if luminous && glow_empty {
            vec!["Invalid luminosityColor: a luminous plant needs at least one colour".to_string()]
        } else {
            Vec::new()
        }
    }
}
