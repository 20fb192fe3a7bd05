use serde::{Deserialize, Serialize};

/// What the validator accepts for a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string
    Text,
    /// Integer
    Int,
    /// Identifier referencing another record (positive integer)
    Ref,
    /// Passed through to storage unchecked (deck card lists)
    Opaque,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Everything the generic CRUD handler needs to serve one resource family:
/// the nouns its error messages use, the table it binds to, and the field
/// schema the validator checks payloads against.
#[derive(Debug)]
pub struct ResourceSpec {
    /// Singular noun for operation messages ("Failed to fetch <noun>")
    pub noun: &'static str,
    /// Plural noun for the list message ("Failed to fetch <plural>")
    pub plural: &'static str,
    /// Capitalized noun for "<display> not found"
    pub display: &'static str,
    /// Backing table name
    pub table: &'static str,
    pub fields: &'static [FieldSpec],
}

pub static ATTACK: ResourceSpec = ResourceSpec {
    noun: "attack",
    plural: "attacks",
    display: "Attack",
    table: "Attack",
    fields: &[
        FieldSpec { name: "name", kind: FieldKind::Text, required: true },
        FieldSpec { name: "typeId", kind: FieldKind::Ref, required: true },
        FieldSpec { name: "damages", kind: FieldKind::Int, required: true },
    ],
};

pub static DECK: ResourceSpec = ResourceSpec {
    noun: "deck",
    plural: "decks",
    display: "Deck",
    table: "Deck",
    fields: &[
        FieldSpec { name: "name", kind: FieldKind::Text, required: true },
        FieldSpec { name: "ownerId", kind: FieldKind::Ref, required: true },
        // Opaque card-reference list; the store decides what to make of it
        FieldSpec { name: "cards", kind: FieldKind::Opaque, required: false },
    ],
};

// The pokemon card keeps its historical PascalCase singular in messages
// ("Failed to fetch PokemonCard"), with only the list message lowercased.
pub static POKEMON_CARD: ResourceSpec = ResourceSpec {
    noun: "PokemonCard",
    plural: "pokemonCards",
    display: "PokemonCard",
    table: "PokemonCard",
    fields: &[
        FieldSpec { name: "name", kind: FieldKind::Text, required: true },
        FieldSpec { name: "pokedexId", kind: FieldKind::Int, required: true },
        FieldSpec { name: "typeId", kind: FieldKind::Ref, required: true },
        FieldSpec { name: "imageUrl", kind: FieldKind::Text, required: true },
        FieldSpec { name: "lifePoints", kind: FieldKind::Int, required: true },
        FieldSpec { name: "weight", kind: FieldKind::Int, required: true },
        FieldSpec { name: "height", kind: FieldKind::Int, required: true },
        FieldSpec { name: "attackId", kind: FieldKind::Ref, required: true },
        FieldSpec { name: "weaknessId", kind: FieldKind::Ref, required: true },
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    pub id: i64,
    pub name: String,
    pub type_id: i64,
    pub damages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonCard {
    pub id: i64,
    pub name: String,
    pub pokedex_id: i64,
    pub type_id: i64,
    pub image_url: String,
    pub life_points: i64,
    pub weight: i64,
    pub height: i64,
    pub attack_id: i64,
    pub weakness_id: i64,
}
