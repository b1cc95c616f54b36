//! Bundled reference dataset.
//!
//! A compact set of named colors covering every category, with environment
//! tags on the colors that belong to a scene. Its intra-category pairs
//! populate all four difficulty tiers under the default thresholds.

use crate::sample::ColorRecord;

/// (name, hex, category, description, environment)
const BUILTIN: &[(&str, &str, &str, &str, Option<&str>)] = &[
    ("Crimson", "#DC143C", "Reds", "Deep red with a faint blue lean.", Some("forest")),
    ("Scarlet", "#FF2400", "Reds", "Brilliant red tipped toward orange.", None),
    ("Vermilion", "#E34234", "Reds", "Mineral red pigment from cinnabar.", Some("city")),
    ("Carmine", "#960018", "Reds", "Dark red from cochineal insects.", None),
    ("Burgundy", "#800020", "Reds", "Wine red, darker than carmine.", Some("city")),
    ("Coral", "#FF7F50", "Oranges", "Pinkish orange of reef coral.", Some("ocean")),
    ("Tangerine", "#F28500", "Oranges", "Vivid orange of the citrus rind.", None),
    ("Burnt Orange", "#CC5500", "Oranges", "Orange darkened as if by fire.", Some("desert")),
    ("Pumpkin", "#FF7518", "Oranges", "Bright autumn orange.", Some("forest")),
    ("Gamboge", "#E49B0F", "Yellows", "Deep mustard yellow from tree resin.", None),
    ("Indian Yellow", "#E3B505", "Yellows", "Luminous yellow once made from cow urine.", None),
    ("Lemon", "#FFF700", "Yellows", "Sharp, slightly greenish yellow.", Some("city")),
    ("Mustard", "#FFDB58", "Yellows", "Soft yellow of prepared mustard.", None),
    ("Saffron", "#F4C430", "Yellows", "Golden yellow of saffron threads.", Some("desert")),
    ("Emerald", "#50C878", "Greens", "Clear green of the gemstone.", Some("forest")),
    ("Jade", "#00A86B", "Greens", "Cool, slightly blue green.", Some("forest")),
    ("Chartreuse", "#7FFF00", "Greens", "Yellow-green named after the liqueur.", None),
    ("Olive", "#808000", "Greens", "Dark yellowish green of unripe olives.", Some("forest")),
    ("Sage", "#BCB88A", "Greens", "Grayish green of dried sage leaves.", Some("forest")),
    ("Cerulean", "#007BA7", "Blues", "Sky blue leaning toward cyan.", Some("ocean")),
    ("Cobalt", "#0047AB", "Blues", "Strong blue from cobalt salts.", Some("ocean")),
    ("Navy", "#000080", "Blues", "Very dark blue of naval uniforms.", Some("ocean")),
    ("Teal", "#008080", "Blues", "Dark cyan named after the duck.", Some("ocean")),
    ("Azure", "#007FFF", "Blues", "Bright blue of a clear sky.", Some("city")),
    ("Lavender", "#B57EDC", "Purples", "Pale purple of the flower.", None),
    ("Violet", "#8F00FF", "Purples", "Spectral violet at the end of the rainbow.", None),
    ("Amethyst", "#9966CC", "Purples", "Moderate purple of the quartz.", None),
    ("Plum", "#8E4585", "Purples", "Reddish purple of the ripe fruit.", None),
    ("Ivory", "#FFFFF0", "Neutrals", "Off-white with a yellow cast.", Some("city")),
    ("Charcoal", "#36454F", "Neutrals", "Dark blue-gray of burnt wood.", Some("city")),
    ("Taupe", "#483C32", "Neutrals", "Brownish gray of moleskin.", None),
    ("Beige", "#F5F5DC", "Neutrals", "Pale sandy fawn.", Some("desert")),
    ("Slate Gray", "#708090", "Neutrals", "Bluish gray of slate rock.", Some("city")),
    ("Sienna", "#A0522D", "Earth Tones", "Burnt clay from Tuscany.", Some("desert")),
    ("Umber", "#635147", "Earth Tones", "Dark brown natural pigment.", Some("desert")),
    ("Ochre", "#CC7722", "Earth Tones", "Yellow-brown iron oxide earth.", Some("desert")),
    ("Moss", "#8A9A5B", "Earth Tones", "Muted green of forest moss.", Some("forest")),
    ("Blush", "#DE5D83", "Pastels", "Rosy pink of flushed cheeks.", None),
    ("Mint", "#98FF98", "Pastels", "Light fresh green.", None),
    ("Periwinkle", "#CCCCFF", "Pastels", "Pale lavender blue.", None),
    ("Peach", "#FFE5B4", "Pastels", "Soft orange of peach skin.", None),
    ("Ruby", "#E0115F", "Jewel Tones", "Deep pinkish red of the gem.", None),
    ("Sapphire", "#0F52BA", "Jewel Tones", "Rich royal blue.", Some("ocean")),
    ("Topaz", "#FFC87C", "Jewel Tones", "Warm golden orange.", None),
    ("Amber", "#FFBF00", "Jewel Tones", "Fossil resin yellow-orange.", Some("forest")),
];

/// The bundled dataset as raw records, ready for
/// [`load_dataset`](crate::database::load_dataset).
pub fn builtin_records() -> Vec<ColorRecord> {
    BUILTIN
        .iter()
        .map(|&(name, hex, category, description, environment)| ColorRecord {
            name: name.to_string(),
            hex: hex.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            environment: environment.map(str::to_string),
        })
        .collect()
}
