//! PokeAPI client
//!
//! Two read-only endpoints: the primary record and the species flavor
//! text, each addressed by dex number or lowercase name. Any transport
//! error or non-2xx status surfaces as `Err(String)`; the reducer decides
//! what that means for the view.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{FlavorEntry, Pokemon, PokemonStat, Species};

const API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

pub async fn fetch_pokemon(identifier: &str) -> Result<Pokemon, String> {
    let url = format!("{API_BASE}/pokemon/{identifier}");
    let response: PokemonResponse = fetch_json(&url).await?;
    Ok(map_pokemon(response))
}

pub async fn fetch_species(identifier: &str) -> Result<Species, String> {
    let url = format!("{API_BASE}/pokemon-species/{identifier}");
    let response: SpeciesResponse = fetch_json(&url).await?;
    Ok(Species {
        flavor_entries: response
            .flavor_text_entries
            .into_iter()
            .map(|entry| FlavorEntry {
                text: entry.flavor_text,
                language: entry.language.name,
            })
            .collect(),
    })
}

fn map_pokemon(response: PokemonResponse) -> Pokemon {
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();

    let sprite_default = pointer_string(&response.sprites, "/front_default");
    let sprite_animated = pointer_string(
        &response.sprites,
        "/versions/generation-v/black-white/animated/front_default",
    );
    let sprite_showdown = pointer_string(&response.sprites, "/other/showdown/front_default");

    Pokemon {
        id: response.id,
        name: response.name,
        types,
        stats,
        sprite_default,
        sprite_animated,
        sprite_showdown,
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    response.json().await.map_err(|err| err.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
