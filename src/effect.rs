//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone)]
pub enum Effect {
    /// Fetch the primary record for the browse view
    FetchPokemon { identifier: String },
    /// Fetch flavor text for the browse view, keyed by the resolved dex id
    FetchDescription { id: u16 },
    /// Fetch record and flavor text concurrently for the lookup view
    FetchEntry { query: String },
}
