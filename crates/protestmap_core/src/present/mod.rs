//! Render-agnostic marker and popup view models.
//!
//! # Responsibility
//! - Carry the one set of options that distinguishes map page variants.
//! - Derive marker and popup content from points for any renderer.
//!
//! # Invariants
//! - Link labels are at most `LINK_LABEL_CHARS` characters plus `...`.
//! - Embeds are only populated when `show_embeds` is set.

use crate::model::point::{Point, PointSize};
use crate::query::View;
use serde::{Deserialize, Serialize};

/// Characters of a link kept in its popup label.
pub const LINK_LABEL_CHARS: usize = 25;

const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Marker glyph family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    /// Placard emoji on a dark disc.
    #[default]
    Emoji,
    /// Plain circle scaled by crowd size.
    Circle,
}

/// Color theme of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeVariant {
    Light,
    Dark,
    #[default]
    Halloween,
}

/// Initial camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        // Colombo.
        Self {
            latitude: 6.927079,
            longitude: 79.861244,
            zoom: 8.0,
        }
    }
}

/// Options for a map page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Embed footage links in the popup instead of only listing them.
    pub show_embeds: bool,
    pub marker_style: MarkerStyle,
    pub theme: ThemeVariant,
    pub viewport: Viewport,
}

/// Marker radius in pixels for a size assessment.
pub fn marker_radius(size: Option<PointSize>) -> u32 {
    match size {
        Some(PointSize::Small) => 8,
        Some(PointSize::Medium) => 12,
        Some(PointSize::Large) => 16,
        None => 10,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub style: MarkerStyle,
    pub radius: u32,
    pub selected: bool,
}

impl MarkerView {
    pub fn from_point(point: &Point, options: &RenderOptions, selected: bool) -> Self {
        Self {
            id: point.id.clone(),
            latitude: point.latitude,
            longitude: point.longitude,
            style: options.marker_style,
            radius: marker_radius(point.size),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupLink {
    pub href: String,
    pub label: String,
}

/// Content of the detail popup for one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupView {
    pub title: String,
    pub date_label: String,
    pub notes: Option<String>,
    pub size: Option<PointSize>,
    pub links: Vec<PopupLink>,
    pub embeds: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl PopupView {
    pub fn from_point(point: &Point, options: &RenderOptions) -> Self {
        Self {
            title: point.location.clone(),
            date_label: point.date.format(DATE_LABEL_FORMAT).to_string(),
            notes: point.notes.clone(),
            size: point.size,
            links: point
                .links
                .iter()
                .map(|href| PopupLink {
                    href: href.clone(),
                    label: link_label(href),
                })
                .collect(),
            embeds: if options.show_embeds {
                point.links.clone()
            } else {
                Vec::new()
            },
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

/// Shortens a link for display: first `LINK_LABEL_CHARS` chars plus `...`.
pub fn link_label(href: &str) -> String {
    let mut label: String = href.chars().take(LINK_LABEL_CHARS).collect();
    label.push_str("...");
    label
}

/// Renderer input for one evaluated view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub options: RenderOptions,
    pub markers: Vec<MarkerView>,
    pub popup: Option<PopupView>,
    /// Canonical URL query for the current view.
    pub query: String,
}

impl MapScene {
    pub fn from_view(view: &View<'_>, options: &RenderOptions) -> Self {
        let selected_id = view.selected.map(|point| point.id.as_str());
        Self {
            options: *options,
            markers: view
                .points
                .iter()
                .map(|point| {
                    let selected = Some(point.id.as_str()) == selected_id;
                    MarkerView::from_point(point, options, selected)
                })
                .collect(),
            popup: view
                .selected
                .map(|point| PopupView::from_point(point, options)),
            query: view.state.to_query_string(),
        }
    }
}
