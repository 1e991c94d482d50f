//! Fixed catalog endpoints for archetypes and visual styles.

use axum::Json;
use serde::Serialize;

use adforge_models::{AdStyle, Archetype};

#[derive(Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Serialize)]
pub struct ArchetypesResponse {
    pub archetypes: Vec<CatalogEntry>,
}

/// Available story archetypes.
pub async fn get_archetypes() -> Json<ArchetypesResponse> {
    Json(ArchetypesResponse {
        archetypes: Archetype::ALL
            .iter()
            .map(|a| CatalogEntry {
                id: a.as_str(),
                name: a.display_name(),
                description: a.blurb(),
            })
            .collect(),
    })
}

#[derive(Serialize)]
pub struct StylesResponse {
    pub styles: Vec<CatalogEntry>,
}

/// Available visual styles.
pub async fn get_styles() -> Json<StylesResponse> {
    Json(StylesResponse {
        styles: AdStyle::ALL
            .iter()
            .map(|s| CatalogEntry {
                id: s.as_str(),
                name: s.display_name(),
                description: s.blurb(),
            })
            .collect(),
    })
}
