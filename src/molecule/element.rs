//! Element table: symbols, CPK colors and van der Waals radii.
//!
//! Colors follow the Jmol CPK palette; radii are Bondi/Alvarez van der
//! Waals radii in angstroms.

/// Element number used for wildcard / attachment-point atoms.
pub const WILDCARD: u8 = 0;
/// Hydrogen.
pub const HYDROGEN: u8 = 1;
/// Carbon.
pub const CARBON: u8 = 6;
/// Nitrogen.
pub const NITROGEN: u8 = 7;
/// Oxygen.
pub const OXYGEN: u8 = 8;

/// Radius used for elements missing from the table.
pub const DEFAULT_VDW_RADIUS: f32 = 2.0;

/// Color used for elements missing from the table.
const FALLBACK_COLOR: [f32; 3] = [1.0, 0.08, 0.58];

/// Static per-element data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementInfo {
    /// Atomic symbol.
    pub symbol: &'static str,
    /// CPK color as linear RGB.
    pub color: [f32; 3],
    /// Van der Waals radius in angstroms.
    pub vdw_radius: f32,
}

const fn rgb(r: u8, g: u8, b: u8) -> [f32; 3] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

const fn el(symbol: &'static str, color: [f32; 3], vdw_radius: f32) -> ElementInfo {
    ElementInfo {
        symbol,
        color,
        vdw_radius,
    }
}

/// Elements 1 through 54 (H to Xe), index = atomic number - 1.
static TABLE: [ElementInfo; 54] = [
    el("H", rgb(255, 255, 255), 1.10),
    el("He", rgb(217, 255, 255), 1.40),
    el("Li", rgb(204, 128, 255), 1.81),
    el("Be", rgb(194, 255, 0), 1.53),
    el("B", rgb(255, 181, 181), 1.92),
    el("C", rgb(144, 144, 144), 1.70),
    el("N", rgb(48, 80, 248), 1.55),
    el("O", rgb(255, 13, 13), 1.52),
    el("F", rgb(144, 224, 80), 1.47),
    el("Ne", rgb(179, 227, 245), 1.54),
    el("Na", rgb(171, 92, 242), 2.27),
    el("Mg", rgb(138, 255, 0), 1.73),
    el("Al", rgb(191, 166, 166), 1.84),
    el("Si", rgb(240, 200, 160), 2.10),
    el("P", rgb(255, 128, 0), 1.80),
    el("S", rgb(255, 255, 48), 1.80),
    el("Cl", rgb(31, 240, 31), 1.75),
    el("Ar", rgb(128, 209, 227), 1.88),
    el("K", rgb(143, 64, 212), 2.75),
    el("Ca", rgb(61, 255, 0), 2.31),
    el("Sc", rgb(230, 230, 230), 2.15),
    el("Ti", rgb(191, 194, 199), 2.11),
    el("V", rgb(166, 166, 171), 2.07),
    el("Cr", rgb(138, 153, 199), 2.06),
    el("Mn", rgb(156, 122, 199), 2.05),
    el("Fe", rgb(224, 102, 51), 2.04),
    el("Co", rgb(240, 144, 160), 2.00),
    el("Ni", rgb(80, 208, 80), 1.97),
    el("Cu", rgb(200, 128, 51), 1.96),
    el("Zn", rgb(125, 128, 176), 2.01),
    el("Ga", rgb(194, 143, 143), 1.87),
    el("Ge", rgb(102, 143, 143), 2.11),
    el("As", rgb(189, 128, 227), 1.85),
    el("Se", rgb(255, 161, 0), 1.90),
    el("Br", rgb(166, 41, 41), 1.85),
    el("Kr", rgb(92, 184, 209), 2.02),
    el("Rb", rgb(112, 46, 176), 3.03),
    el("Sr", rgb(0, 255, 0), 2.49),
    el("Y", rgb(148, 255, 255), 2.32),
    el("Zr", rgb(148, 224, 224), 2.23),
    el("Nb", rgb(115, 194, 201), 2.18),
    el("Mo", rgb(84, 181, 181), 2.17),
    el("Tc", rgb(59, 158, 158), 2.16),
    el("Ru", rgb(36, 143, 143), 2.13),
    el("Rh", rgb(10, 125, 140), 2.10),
    el("Pd", rgb(0, 105, 133), 2.10),
    el("Ag", rgb(192, 192, 192), 2.11),
    el("Cd", rgb(255, 217, 143), 2.18),
    el("In", rgb(166, 117, 115), 1.93),
    el("Sn", rgb(102, 128, 128), 2.17),
    el("Sb", rgb(158, 99, 181), 2.06),
    el("Te", rgb(212, 122, 0), 2.06),
    el("I", rgb(148, 0, 148), 1.98),
    el("Xe", rgb(66, 158, 176), 2.16),
];

static PLATINUM: ElementInfo = el("Pt", rgb(208, 208, 224), 2.13);
static GOLD: ElementInfo = el("Au", rgb(255, 209, 35), 2.14);
static MERCURY: ElementInfo = el("Hg", rgb(184, 184, 208), 2.23);
static LEAD: ElementInfo = el("Pb", rgb(87, 89, 97), 2.02);

/// Look up an element by atomic number.
#[must_use]
pub fn info(element: u8) -> Option<&'static ElementInfo> {
    match element {
        1..=54 => TABLE.get(usize::from(element) - 1),
        78 => Some(&PLATINUM),
        79 => Some(&GOLD),
        80 => Some(&MERCURY),
        82 => Some(&LEAD),
        _ => None,
    }
}

/// CPK color for an element; unknown elements render magenta.
#[must_use]
pub fn cpk_color(element: u8) -> [f32; 3] {
    info(element).map_or(FALLBACK_COLOR, |e| e.color)
}

/// Van der Waals radius for an element.
#[must_use]
pub fn vdw_radius(element: u8) -> f32 {
    info(element).map_or(DEFAULT_VDW_RADIUS, |e| e.vdw_radius)
}

/// Atomic number for a symbol (case-sensitive, e.g. `"Cl"`).
#[must_use]
pub fn from_symbol(symbol: &str) -> Option<u8> {
    if symbol == "*" {
        return Some(WILDCARD);
    }
    (1..=u8::MAX).find(|&z| info(z).is_some_and(|e| e.symbol == symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_atomic_number() {
        assert_eq!(info(HYDROGEN).map(|e| e.symbol), Some("H"));
        assert_eq!(info(CARBON).map(|e| e.symbol), Some("C"));
        assert_eq!(info(54).map(|e| e.symbol), Some("Xe"));
        assert_eq!(info(79).map(|e| e.symbol), Some("Au"));
        assert!(info(WILDCARD).is_none());
        assert!(info(118).is_none());
    }

    #[test]
    fn symbol_lookup() {
        assert_eq!(from_symbol("Cl"), Some(17));
        assert_eq!(from_symbol("Pb"), Some(82));
        assert_eq!(from_symbol("*"), Some(WILDCARD));
        assert_eq!(from_symbol("Xx"), None);
    }

    #[test]
    fn unknown_element_falls_back() {
        assert_eq!(vdw_radius(WILDCARD), DEFAULT_VDW_RADIUS);
        assert_eq!(cpk_color(110), FALLBACK_COLOR);
        assert_ne!(cpk_color(CARBON), cpk_color(OXYGEN));
    }
}
