//! Built-in material tables for the "putnam" house scene.

use super::NameTable;

/// Raw material name to canonical material name.
pub const PUTNAM_NAME_MAP: &[(&str, &str)] = &[
    ("__11_Colonial_White", "white-porcelain-material"),
    ("Aquatica_Aquatica_True_Ofuro_Regular_True_Ofuro_Regular_Aquatic", "tub-material"),
    ("Color_C01", "ceiling-material"),
    ("Color_C02", "ceiling-material"),
    ("Color_C06", "teak-material"),
    ("Color_F01", "guest-bath-floor-material"),
    ("Color_G06", "dormer-interior-material"),
    ("Color_K01", "Roofing_Shingles_GAF_Estates"),
    ("Color_M07", "master-sink-material"),
    ("dormer-interior-material", "dormer-interior-material"),
    ("guest-bath-floor-material", "guest-bath-floor-material"),
    ("guest-bath-half-wall-material", "guest-bath-half-wall-material"),
    ("guest-surround-tile", "guest-surround-tile"),
    ("Helen_BraceletGlasses", "Helen_BraceletGlasses"),
    ("interior-shell-angled-wall-material", "interior-shell-angled-wall-material"),
    ("interior-shell-kneewall-material", "interior-shell-kneewall-material"),
    ("interior-wall-angled-shell-back-material", "interior-wall-angled-shell-back-material"),
    ("light-material", "light-material"),
    ("master-bath-countertop-material", "master-bath-countertop-material"),
    ("master-bath-material", "master-bath-material"),
    ("master-vanity-material", "master-vanity-material"),
    ("Material", "material"),
    ("material", "material"),
    ("metal-fixture-material", "metal-fixture-material"),
    ("metal-fixture-material_0", "metal-fixture-material"),
    ("Mirror_01", "Mirror_01"),
    ("off-white-porcelain-material", "material"),
    ("Roofing_Shingles_GAF_Estates", "Roofing_Shingles_GAF_Estates"),
    ("shiny-grey-metal-seamless-texture-light-steel-chrome-material-h", "metal-fixture-material"),
    ("Steel_Brushed_Stainless", "metal-fixture-material"),
    ("Steel_Brushed_Stainless_1", "metal-fixture-material"),
    ("Translucent_Glass_Gray", "Translucent_Glass_Gray"),
    ("tub-material", "tub-material"),
    ("Wallpaper_Thin_Brown_Stripes", "Wallpaper_Thin_Brown_Stripes"),
    ("wet-bar-cabinet-material", "wet-bar-cabinet-material"),
    ("wetbar-countertop-material", "wetbar-countertop-material"),
    ("white-porcelain-material", "white-porcelain-material"),
    ("White_Subway_Tile", "guest-surround-tile"),
    ("wife-hair-material", "wife-hair-material"),
    ("wife-skin-material", "wife-skin-material"),
    ("window-trim-material", "window-trim-material"),
    ("wood-floor-material", "wood-floor-material"),
];

/// Canonical material name to final material name.
pub const PUTNAM_RENAME_MAP: &[(&str, &str)] = &[
    ("Helen_BraceletGlasses", "wife-eye-material"),
    ("Mirror_01", "mirror-material"),
    ("Roofing_Shingles_GAF_Estates", "roof-shingles-material"),
    ("Translucent_Glass_Gray", "glass-material"),
    ("tub-material", "tub-material"),
    ("Wallpaper_Thin_Brown_Stripes", "bed-material"),
    ("wet-bar-cabinet-material", "wet-bar-cabinet-material"),
    ("wetbar-countertop-material", "wet-bar-countertop-material"),
];

/// Canonical name table for the putnam scene.
pub fn putnam_name_map() -> NameTable {
    NameTable::from_pairs(PUTNAM_NAME_MAP)
}

/// Final rename table for the putnam scene.
pub fn putnam_rename_map() -> NameTable {
    NameTable::from_pairs(PUTNAM_RENAME_MAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::ResolvedMaterialMap;

    #[test]
    fn test_tables_have_no_duplicate_keys() {
        assert_eq!(putnam_name_map().len(), PUTNAM_NAME_MAP.len());
        assert_eq!(putnam_rename_map().len(), PUTNAM_RENAME_MAP.len());
    }

    #[test]
    fn test_name_map_is_fixed_point() {
        let names = putnam_name_map();
        assert!(names.is_fixed_point(), "unstable: {:?}", names.unstable_entries());
    }

    #[test]
    fn test_resolved_putnam_names() {
        let resolved = ResolvedMaterialMap::compose(&putnam_name_map(), &putnam_rename_map());
        assert_eq!(resolved.resolve("Color_K01"), "roof-shingles-material");
        assert_eq!(resolved.resolve("Mirror_01"), "mirror-material");
        assert_eq!(resolved.resolve("Steel_Brushed_Stainless_1"), "metal-fixture-material");
        assert_eq!(resolved.resolve("Material"), "material");
        assert_eq!(resolved.resolve("off-white-porcelain-material"), "material");
        assert_eq!(resolved.resolve("wetbar-countertop-material"), "wet-bar-countertop-material");
        assert_eq!(resolved.resolve("mirror-material"), "mirror-material");
    }
}
