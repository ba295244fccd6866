use serde::Serialize;

pub const FALLBACK_COLOR: &str = "#64748b";

/// Pyramid tier a category belongs to, from daily staples up to foods to limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Base,
    Energy,
    HealthyFats,
    Structural,
    Limit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryMeta {
    pub id: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub tier: Tier,
}

const fn meta(id: &'static str, label: &'static str, color: &'static str, tier: Tier) -> CategoryMeta {
    CategoryMeta { id, label, color, tier }
}

pub const CATEGORIES: &[CategoryMeta] = &[
    meta("Verdure", "Verdure Foglia", "#10b981", Tier::Base),
    meta("Frutta", "Frutta Fresca", "#10b981", Tier::Base),
    meta("Ortaggi", "Ortaggi/Radici", "#10b981", Tier::Base),
    meta("Aromi", "Erbe/Spezie", "#10b981", Tier::Base),
    meta("CerealiInt", "Cereali Integrali", "#f59e0b", Tier::Energy),
    meta("Pseudo", "Pseudocereali", "#f59e0b", Tier::Energy),
    meta("Tuberi", "Patate/Tuberi", "#f59e0b", Tier::Energy),
    meta("Oli", "Oli Vegetali (EVO)", "#eab308", Tier::HealthyFats),
    meta("Noci", "Frutta Guscio", "#eab308", Tier::HealthyFats),
    meta("Legumi", "Legumi", "#ef4444", Tier::Structural),
    meta("Pesce", "Pesce", "#ef4444", Tier::Structural),
    meta("CarneB", "Carne Bianche", "#ef4444", Tier::Structural),
    meta("Uova", "Uova", "#ef4444", Tier::Structural),
    meta("Latticini", "Latticini", "#3b82f6", Tier::Structural),
    meta("VegProt", "Alt. Vegetali", "#ef4444", Tier::Structural),
    meta("CarneR", "Carni Rosse", "#8b5cf6", Tier::Limit),
    meta("GrassiA", "Grassi Animali", "#8b5cf6", Tier::Limit),
    meta("Salse", "Salse Grasse", "#8b5cf6", Tier::Limit),
    meta("Insaccati", "Insaccati", "#8b5cf6", Tier::Limit),
    meta("Dolci", "Dolci", "#8b5cf6", Tier::Limit),
    meta("Snack", "Snack Salati", "#8b5cf6", Tier::Limit),
    meta("Bevande", "Bev. Zuccherate", "#8b5cf6", Tier::Limit),
    meta("CerealiRaf", "Cereali Raffinati", "#8b5cf6", Tier::Limit),
];

pub fn lookup(id: &str) -> Option<&'static CategoryMeta> {
    CATEGORIES.iter().find(|category| category.id == id)
}

/// Label and color for `id`; unknown ids display as themselves.
pub fn display(id: &str) -> (String, String) {
    match lookup(id) {
        Some(category) => (category.label.to_string(), category.color.to_string()),
        None => (id.to_string(), FALLBACK_COLOR.to_string()),
    }
}
