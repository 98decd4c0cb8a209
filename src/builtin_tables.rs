/*!
Built-in crop and soil tables.

Baselines are target application rates in lbs/acre before any soil adjustment.
Soil factors scale those targets per nutrient: values above 1.0 mean the soil
loses or locks up that nutrient and needs more of it, values below 1.0 mean it
holds the nutrient well.

`data/reference_data.toml` carries the same rows for callers that load tables
from a file.
*/
use crate::reference_data::{CropProfile, SoilType};

fn crop(
    id: &str,
    name: &str,
    (nitrogen, phosphorus, potassium): (f64, f64, f64),
    npk_ratio: &str,
    application_timing: &[&str],
    notes: &[&str],
) -> CropProfile {
    CropProfile {
        id: id.to_string(),
        name: name.to_string(),
        nitrogen,
        phosphorus,
        potassium,
        npk_ratio: npk_ratio.to_string(),
        application_timing: application_timing.iter().map(|s| s.to_string()).collect(),
        notes: notes.iter().map(|s| s.to_string()).collect(),
    }
}

fn soil(id: &str, (n, p, k): (f64, f64, f64), amendments: &[&str]) -> SoilType {
    SoilType {
        id: id.to_string(),
        nitrogen_factor: n,
        phosphorus_factor: p,
        potassium_factor: k,
        amendments: amendments.iter().map(|s| s.to_string()).collect(),
    }
}

pub(crate) fn crops() -> Vec<CropProfile> {
    vec![
        crop(
            "corn",
            "Corn (Maize)",
            (150.0, 60.0, 60.0),
            "5-2-2",
            &["Pre-planting", "Side-dress at V6 stage"],
            &[
                "Apply 30% at planting and 70% as side-dress",
                "Monitor leaf color for nitrogen deficiency",
                "Increase rates for high-yield goals (>200 bu/acre)",
            ],
        ),
        crop(
            "wheat",
            "Wheat",
            (100.0, 50.0, 40.0),
            "5-3-2",
            &["Fall application", "Spring topdress"],
            &[
                "Split application: 60% in fall, 40% in spring",
                "Topdress when plants reach Feekes 5 stage",
                "Adjust based on previous crop residue",
            ],
        ),
        crop(
            "rice",
            "Rice",
            (120.0, 40.0, 40.0),
            "6-2-2",
            &["Basal application", "Tillering stage", "Panicle initiation"],
            &[
                "Split into 3 applications: 50% basal, 25% tillering, 25% panicle initiation",
                "Ensure adequate water management",
                "Consider zinc application in deficient soils",
            ],
        ),
        crop(
            "soybeans",
            "Soybeans",
            (20.0, 50.0, 80.0),
            "1-3-4",
            &["Pre-planting"],
            &[
                "Soybeans fix their own nitrogen - minimal N needed",
                "Focus on P and K for pod development",
                "Ensure proper inoculation for nitrogen fixation",
            ],
        ),
        crop(
            "tomatoes",
            "Tomatoes",
            (120.0, 80.0, 120.0),
            "3-2-3",
            &["Pre-planting", "Flowering", "Fruit development"],
            &[
                "Higher potassium during fruiting improves quality",
                "Avoid excessive nitrogen which promotes foliage over fruit",
                "Consider calcium supplementation to prevent blossom end rot",
            ],
        ),
        crop(
            "potatoes",
            "Potatoes",
            (140.0, 70.0, 140.0),
            "2-1-2",
            &["Pre-planting", "Hilling"],
            &[
                "High potassium needs for tuber development",
                "Apply 60% at planting, 40% at hilling",
                "Maintain consistent soil moisture",
            ],
        ),
        crop(
            "cotton",
            "Cotton",
            (100.0, 50.0, 50.0),
            "4-2-2",
            &["Pre-planting", "First square", "First bloom"],
            &[
                "Split application based on growth stages",
                "Monitor plant mapping for nutrient deficiencies",
                "Adjust for previous legume crops",
            ],
        ),
        crop(
            "lettuce",
            "Lettuce",
            (100.0, 40.0, 80.0),
            "5-2-4",
            &["Pre-planting", "Side-dress at 2-3 weeks"],
            &[
                "High nitrogen for leafy growth",
                "Apply lighter, more frequent applications",
                "Avoid over-fertilization which can affect taste",
            ],
        ),
        crop(
            "carrots",
            "Carrots",
            (80.0, 60.0, 100.0),
            "2-2-3",
            &["Pre-planting"],
            &[
                "High potassium for root development",
                "Avoid excessive nitrogen which causes forking",
                "Ensure phosphorus for strong root growth",
            ],
        ),
    ]
}

pub(crate) fn soils() -> Vec<SoilType> {
    vec![
        soil(
            "sandy",
            (1.2, 1.1, 1.3),
            &[
                "Add organic matter to improve water retention",
                "Consider more frequent, lighter applications due to leaching",
                "Incorporate compost to improve nutrient holding capacity",
            ],
        ),
        soil(
            "clay",
            (0.9, 1.2, 0.9),
            &[
                "Add gypsum to improve soil structure",
                "Incorporate organic matter to improve drainage",
                "Consider subsurface drainage if waterlogging occurs",
            ],
        ),
        soil(
            "loamy",
            (1.0, 1.0, 1.0),
            &[
                "Maintain organic matter with cover crops or compost",
                "Excellent soil - minimal amendments needed",
            ],
        ),
        soil(
            "silty",
            (1.0, 1.1, 1.0),
            &[
                "Add organic matter to prevent compaction",
                "Avoid working soil when too wet",
            ],
        ),
        soil(
            "peaty",
            (0.8, 1.0, 1.1),
            &[
                "May need lime to adjust pH",
                "Add sand or clay to improve structure",
                "Monitor drainage and consider raised beds",
            ],
        ),
        soil(
            "chalky",
            (1.1, 1.3, 1.0),
            &[
                "Add organic matter regularly",
                "Monitor for iron and manganese deficiencies",
                "Consider acidifying amendments if pH is too high",
            ],
        ),
    ]
}
