//! PokéAPI の生レスポンス型（serde）
//!
//! 必要なフィールドだけを拾い、未知のフィールドは無視する。

use serde::Deserialize;

/// `{ name, url }` 形式の参照（API 全体で使われる NamedAPIResource）
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// `GET <base>/pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPokemonList {
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

/// `GET <base>/pokemon/{id or name}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawPokemonDetail {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub sprites: RawSprites,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub abilities: Vec<RawAbilitySlot>,
    pub species: Option<NamedResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSprites {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<RawOtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

/// `GET {species.url}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawSpecies {
    pub evolution_chain: Option<RawUrlRef>,
}

/// `{ url }` だけの参照（evolution_chain など）
#[derive(Debug, Clone, Deserialize)]
pub struct RawUrlRef {
    pub url: String,
}

/// `GET {evolution_chain.url}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvolutionChain {
    pub chain: RawChainLink,
}

/// 進化チェーンの再帰ノード
#[derive(Debug, Clone, Deserialize)]
pub struct RawChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<RawChainLink>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_ignores_unknown_fields() {
        let json = r#"{
            "id": 25,
            "name": "pikachu",
            "base_experience": 112,
            "sprites": {"front_default": "https://img/25.png", "back_default": null},
            "types": [{"slot": 1, "type": {"name": "electric", "url": "https://t/13/"}}],
            "abilities": [],
            "species": {"name": "pikachu", "url": "https://s/25/"}
        }"#;
        let d: RawPokemonDetail = serde_json::from_str(json).unwrap();
        assert_eq!(d.id, 25);
        assert_eq!(d.sprites.front_default.as_deref(), Some("https://img/25.png"));
        assert_eq!(d.types[0].type_.name, "electric");
        assert!(d.height.is_none());
    }

    #[test]
    fn test_chain_link_without_evolves_to() {
        let json = r#"{"chain": {"species": {"name": "tauros", "url": "u"}}}"#;
        let c: RawEvolutionChain = serde_json::from_str(json).unwrap();
        assert_eq!(c.chain.species.name, "tauros");
        assert!(c.chain.evolves_to.is_empty());
    }
}
